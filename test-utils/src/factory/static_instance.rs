//! Directory row factory mirroring the proxy's `StaticInstances` table.

use sea_orm::{ActiveModelTrait, ActiveValue, DatabaseConnection, DbErr};

/// Creates a directory entry for a backend server.
///
/// # Arguments
/// - `db` - Database connection holding the `StaticInstances` table
/// - `id` - Directory id of the server
/// - `address` - `host:port` address
///
/// # Returns
/// - `Ok(entity::static_instance::Model)` - Created row
/// - `Err(DbErr)` - Database error during insert
pub async fn create_static_instance(
    db: &DatabaseConnection,
    id: impl Into<String>,
    address: impl Into<String>,
) -> Result<entity::static_instance::Model, DbErr> {
    entity::static_instance::ActiveModel {
        id: ActiveValue::Set(id.into()),
        address: ActiveValue::Set(address.into()),
    }
    .insert(db)
    .await
}
