use sea_orm::{DatabaseConnection, DbErr, EntityTrait};

/// Key of the setting listing the server ids shown in the status embed.
pub const STATUS_EMBED_SERVERS: &str = "status_embed_servers";

/// Read access to the key/value admin settings.
pub struct AdminSettingRepository<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> AdminSettingRepository<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Gets the raw JSON value of a setting.
    ///
    /// # Returns
    /// - `Ok(Some(String))` - Setting exists
    /// - `Ok(None)` - No setting with this key
    /// - `Err(DbErr)` - Database error during query
    pub async fn find_by_key(&self, key: &str) -> Result<Option<String>, DbErr> {
        let setting = entity::prelude::AdminSetting::find_by_id(key.to_string())
            .one(self.db)
            .await?;

        Ok(setting.map(|s| s.value))
    }
}
