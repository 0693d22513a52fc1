//! Error types for the network status monitor.
//!
//! `AppError` is the top-level error returned by startup code, repositories and the
//! scheduled jobs. Probe and notification failures have their own enums because they are
//! handled locally (debounced or logged) and never abort a cycle on their own.

pub mod config;
pub mod notify;
pub mod probe;

use thiserror::Error;

use crate::server::error::config::ConfigError;

/// Top-level application error type.
///
/// Aggregates all possible error types that can occur in the application. Most variants
/// use `#[from]` for automatic error conversion.
#[derive(Error, Debug)]
pub enum AppError {
    /// Configuration error during startup or environment variable loading.
    #[error(transparent)]
    ConfigErr(#[from] ConfigError),

    /// Database operation error from SeaORM.
    #[error(transparent)]
    DbErr(#[from] sea_orm::DbErr),

    /// The node directory could not be read.
    ///
    /// Aborts the current fleet cycle before any record is touched; the next tick
    /// retries.
    #[error("Node directory unavailable: {0}")]
    DirectoryUnavailable(#[source] sea_orm::DbErr),

    /// Writing a node record failed.
    ///
    /// The stored record stays stale. A confirmed outage is re-armed in the flap tracker so
    /// the next failed probe confirms it again.
    #[error("Failed to persist status of server {id}: {source}")]
    PersistenceWriteFailed {
        /// Directory id of the server whose record could not be written
        id: String,
        /// The underlying database error
        #[source]
        source: sea_orm::DbErr,
    },

    /// Cron scheduler error.
    #[error(transparent)]
    SchedulerErr(#[from] tokio_cron_scheduler::JobSchedulerError),

    /// Internal error with custom message.
    #[error("{0}")]
    InternalError(String),
}
