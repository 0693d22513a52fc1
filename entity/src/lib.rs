//! SeaORM entities for the network status monitor.
//!
//! `server_status` and `admin_setting` live in the monitor's own database. `static_instance`
//! maps the externally owned `StaticInstances` directory table, which is only ever read.

pub mod prelude;

pub mod admin_setting;
pub mod server_status;
pub mod static_instance;
