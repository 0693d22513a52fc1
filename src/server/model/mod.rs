//! Domain models for the network status monitor.
//!
//! Repositories convert SeaORM entities into these types at the data-layer boundary, and
//! services work exclusively with them.

pub mod directory;
pub mod notification;
pub mod probe;
pub mod proxy;
pub mod server_status;
