//! Node directory repository.
//!
//! Reads the externally owned `StaticInstances` table that lists every backend server and
//! its current address. The table is never written by this application.

use sea_orm::{DatabaseConnection, DbErr, EntityTrait, QueryOrder};

use crate::server::model::directory::DirectoryEntry;

pub struct DirectoryRepository<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> DirectoryRepository<'a> {
    /// Creates a new DirectoryRepository.
    ///
    /// # Arguments
    /// - `db` - Connection to the directory database, separate from the monitor's own
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Gets the current directory listing, ordered by id.
    ///
    /// # Returns
    /// - `Ok(Vec<DirectoryEntry>)` - All listed servers
    /// - `Err(DbErr)` - Directory database unreachable or table missing
    pub async fn get_all(&self) -> Result<Vec<DirectoryEntry>, DbErr> {
        let entities = entity::prelude::StaticInstance::find()
            .order_by_asc(entity::static_instance::Column::Id)
            .all(self.db)
            .await?;

        Ok(entities.into_iter().map(DirectoryEntry::from_entity).collect())
    }
}
