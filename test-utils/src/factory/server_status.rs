//! Server status factory for creating persisted node records.

use crate::factory::helpers::next_id;
use chrono::Utc;
use sea_orm::{ActiveModelTrait, ActiveValue, DatabaseConnection, DbErr};

/// Factory for creating test server status records with customizable fields.
///
/// # Example
///
/// ```rust,ignore
/// let status = ServerStatusFactory::new(&db)
///     .id("LobbyNYC")
///     .online(true)
///     .version("Paper 1.20.4", 765)
///     .build()
///     .await?;
/// ```
pub struct ServerStatusFactory<'a> {
    db: &'a DatabaseConnection,
    id: String,
    address: String,
    online: bool,
    version: Option<(String, i32)>,
    players_online: i32,
    players_max: i32,
}

impl<'a> ServerStatusFactory<'a> {
    /// Creates a new ServerStatusFactory with default values.
    ///
    /// Defaults:
    /// - id: `"Server{n}"` where n is auto-incremented
    /// - address: `"10.0.0.{n}:25565"`
    /// - online: `true`
    /// - version: `Some(("Paper 1.20.4", 765))`
    /// - players: 0 online, 100 max
    ///
    /// # Arguments
    /// - `db` - Database connection for inserting the entity
    ///
    /// # Returns
    /// - `ServerStatusFactory` - New factory instance with defaults
    pub fn new(db: &'a DatabaseConnection) -> Self {
        let id = next_id();
        Self {
            db,
            id: format!("Server{}", id),
            address: format!("10.0.0.{}:25565", id % 250),
            online: true,
            version: Some(("Paper 1.20.4".to_string(), 765)),
            players_online: 0,
            players_max: 100,
        }
    }

    pub fn id(mut self, id: impl Into<String>) -> Self {
        self.id = id.into();
        self
    }

    pub fn address(mut self, address: impl Into<String>) -> Self {
        self.address = address.into();
        self
    }

    pub fn online(mut self, online: bool) -> Self {
        self.online = online;
        self
    }

    pub fn version(mut self, name: impl Into<String>, protocol: i32) -> Self {
        self.version = Some((name.into(), protocol));
        self
    }

    /// Marks the record as never successfully probed.
    pub fn no_version(mut self) -> Self {
        self.version = None;
        self
    }

    pub fn players(mut self, online: i32, max: i32) -> Self {
        self.players_online = online;
        self.players_max = max;
        self
    }

    /// Builds and inserts the server status entity into the database.
    ///
    /// # Returns
    /// - `Ok(entity::server_status::Model)` - Created record
    /// - `Err(DbErr)` - Database error during insert
    pub async fn build(self) -> Result<entity::server_status::Model, DbErr> {
        let (version_name, version_protocol) = match self.version {
            Some((name, protocol)) => (Some(name), Some(protocol)),
            None => (None, None),
        };

        entity::server_status::ActiveModel {
            id: ActiveValue::Set(self.id),
            address: ActiveValue::Set(self.address),
            online: ActiveValue::Set(self.online),
            version_name: ActiveValue::Set(version_name),
            version_protocol: ActiveValue::Set(version_protocol),
            players_online: ActiveValue::Set(self.players_online),
            players_max: ActiveValue::Set(self.players_max),
            players_sample: ActiveValue::Set(serde_json::json!([])),
            updated_at: ActiveValue::Set(Utc::now()),
        }
        .insert(self.db)
        .await
    }
}

/// Creates an online server status record with default values.
///
/// Shorthand for `ServerStatusFactory::new(db).build().await`.
pub async fn create_server_status(
    db: &DatabaseConnection,
) -> Result<entity::server_status::Model, DbErr> {
    ServerStatusFactory::new(db).build().await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::TestBuilder;
    use entity::prelude::*;

    #[tokio::test]
    async fn creates_server_status_with_defaults() -> Result<(), DbErr> {
        let test = TestBuilder::new()
            .with_table(ServerStatus)
            .build()
            .await
            .unwrap();
        let db = test.db.as_ref().unwrap();

        let status = create_server_status(db).await?;

        assert!(status.id.starts_with("Server"));
        assert!(status.online);
        assert_eq!(status.version_protocol, Some(765));
        assert_eq!(status.players_sample, serde_json::json!([]));

        Ok(())
    }

    #[tokio::test]
    async fn creates_offline_status_without_version() -> Result<(), DbErr> {
        let test = TestBuilder::new()
            .with_table(ServerStatus)
            .build()
            .await
            .unwrap();
        let db = test.db.as_ref().unwrap();

        let status = ServerStatusFactory::new(db)
            .id("MapNYC")
            .online(false)
            .no_version()
            .build()
            .await?;

        assert_eq!(status.id, "MapNYC");
        assert!(!status.online);
        assert!(status.version_name.is_none());

        Ok(())
    }
}
