//! Network status monitor backend.
//!
//! Polls every backend server of the network and the two public proxies, keeps a durable
//! status record per server, and reports outages, recoveries and a fleet summary to
//! Discord webhooks.
//!
//! # Architecture
//!
//! - **Service Layer** (`service/`) - Fleet cycle, proxy refresh, debouncing, diffing,
//!   protocol probes and notification rendering
//! - **Data Layer** (`data/`) - Database operations and entity-to-domain model conversion
//! - **Model Layer** (`model/`) - Domain models
//! - **Error Layer** (`error/`) - Application error types
//! - **Utilities** (`util/`) - Address parsing, MOTD formatting, roster and version parsing
//!
//! # Infrastructure
//!
//! - **Configuration** (`config`) - Environment-based application configuration
//! - **State** (`state`) - Shared application and monitor state
//! - **Startup** (`startup`) - Database connections and migrations
//! - **Scheduler** (`scheduler/`) - Repeated fleet and proxy jobs

pub mod config;
pub mod data;
pub mod error;
pub mod model;
pub mod scheduler;
pub mod service;
pub mod startup;
pub mod state;
pub mod util;
