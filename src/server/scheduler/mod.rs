//! Scheduled jobs.

pub mod network_status;
