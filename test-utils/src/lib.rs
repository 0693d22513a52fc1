//! Network Status Test Utils
//!
//! Provides shared testing utilities for the network status monitor. This crate offers a
//! builder pattern for creating test contexts with in-memory SQLite databases and factories
//! for the monitor's entities.
//!
//! # Overview
//!
//! The test utilities consist of three main components:
//! - **TestBuilder**: Fluent builder for configuring test environments
//! - **TestContext**: Test environment containing the database connection
//! - **TestError**: Error types that can occur during test setup
//!
//! # Usage
//!
//! ```rust,ignore
//! use test_utils::builder::TestBuilder;
//! use entity::prelude::ServerStatus;
//!
//! #[tokio::test]
//! async fn test_status_operations() -> Result<(), TestError> {
//!     let test = TestBuilder::new()
//!         .with_table(ServerStatus)
//!         .build()
//!         .await?;
//!
//!     let db = test.db.unwrap();
//!     // Perform database operations...
//!
//!     Ok(())
//! }
//! ```

pub mod builder;
pub mod context;
pub mod error;
pub mod factory;
