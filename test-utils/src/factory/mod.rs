//! Factory methods for creating test data.
//!
//! Each entity has its own factory module with both a `Factory` struct for customization
//! and a `create_*` convenience function for quick default creation.
//!
//! # Basic Usage
//!
//! ```rust,ignore
//! use test_utils::factory;
//!
//! let status = factory::create_server_status(&db).await?;
//! let offline = factory::server_status::ServerStatusFactory::new(&db)
//!     .id("Building1NYC")
//!     .online(false)
//!     .build()
//!     .await?;
//! factory::create_static_instance(&db, "Building1NYC", "10.0.0.2:25566").await?;
//! ```
//!
//! # Available Factories
//!
//! - `server_status` - Create persisted node status records
//! - `admin_setting` - Create key/value admin settings
//! - `static_instance` - Create directory rows
//! - `helpers` - Shared utilities such as unique id generation

pub mod admin_setting;
pub mod helpers;
pub mod server_status;
pub mod static_instance;

pub use admin_setting::create_admin_setting;
pub use server_status::create_server_status;
pub use static_instance::create_static_instance;
