//! Server status data repository.
//!
//! This module provides the `ServerStatusRepository` for reading and writing the durable
//! per-server status records. Records are never deleted here.

use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ActiveValue, DatabaseConnection, DbErr, EntityTrait, QueryOrder,
};

use crate::server::model::server_status::ServerStatus;

pub struct ServerStatusRepository<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> ServerStatusRepository<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Gets every known server status record, ordered by id.
    ///
    /// # Returns
    /// - `Ok(Vec<ServerStatus>)` - All records
    /// - `Err(DbErr)` - Database error during query
    pub async fn get_all(&self) -> Result<Vec<ServerStatus>, DbErr> {
        let entities = entity::prelude::ServerStatus::find()
            .order_by_asc(entity::server_status::Column::Id)
            .all(self.db)
            .await?;

        Ok(entities.into_iter().map(ServerStatus::from_entity).collect())
    }

    /// Inserts a new server status record.
    ///
    /// # Arguments
    /// - `status` - Record to insert, its `updated_at` is replaced with the current time
    ///
    /// # Returns
    /// - `Ok(ServerStatus)` - The stored record
    /// - `Err(DbErr)` - Database error, including a duplicate id
    pub async fn create(&self, status: &ServerStatus) -> Result<ServerStatus, DbErr> {
        let entity = Self::to_active_model(status).insert(self.db).await?;

        Ok(ServerStatus::from_entity(entity))
    }

    /// Overwrites the stored record with the same id.
    ///
    /// # Arguments
    /// - `status` - Record holding the new values
    ///
    /// # Returns
    /// - `Ok(ServerStatus)` - The stored record
    /// - `Err(DbErr::RecordNotUpdated)` - No record with this id exists
    /// - `Err(DbErr)` - Other database error
    pub async fn update(&self, status: &ServerStatus) -> Result<ServerStatus, DbErr> {
        let entity = Self::to_active_model(status).update(self.db).await?;

        Ok(ServerStatus::from_entity(entity))
    }

    fn to_active_model(status: &ServerStatus) -> entity::server_status::ActiveModel {
        let (version_name, version_protocol) = match &status.version {
            Some(version) => (Some(version.name.clone()), Some(version.protocol)),
            None => (None, None),
        };

        entity::server_status::ActiveModel {
            id: ActiveValue::Set(status.id.clone()),
            address: ActiveValue::Set(status.address.clone()),
            online: ActiveValue::Set(status.online),
            version_name: ActiveValue::Set(version_name),
            version_protocol: ActiveValue::Set(version_protocol),
            players_online: ActiveValue::Set(status.players.online),
            players_max: ActiveValue::Set(status.players.max),
            players_sample: ActiveValue::Set(
                serde_json::to_value(&status.players.sample)
                    .unwrap_or_else(|_| serde_json::Value::Array(Vec::new())),
            ),
            updated_at: ActiveValue::Set(Utc::now()),
        }
    }
}
