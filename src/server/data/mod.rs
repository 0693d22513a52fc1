//! Database repository layer.
//!
//! Repositories use SeaORM entity models internally and return domain models to keep the
//! data layer separate from the monitoring logic.

pub mod admin_setting;
pub mod directory;
pub mod server_status;

#[cfg(test)]
mod test;
