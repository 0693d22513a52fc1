//! Admin setting factory for creating key/value configuration rows.

use sea_orm::{ActiveModelTrait, ActiveValue, DatabaseConnection, DbErr};

/// Creates an admin setting with the given key and raw JSON value.
///
/// # Arguments
/// - `db` - Database connection
/// - `key` - Setting key, e.g. `"status_embed_servers"`
/// - `value` - JSON encoded value
///
/// # Returns
/// - `Ok(entity::admin_setting::Model)` - Created setting
/// - `Err(DbErr)` - Database error during insert
pub async fn create_admin_setting(
    db: &DatabaseConnection,
    key: impl Into<String>,
    value: impl Into<String>,
) -> Result<entity::admin_setting::Model, DbErr> {
    entity::admin_setting::ActiveModel {
        key: ActiveValue::Set(key.into()),
        value: ActiveValue::Set(value.into()),
    }
    .insert(db)
    .await
}
