use sea_orm::entity::prelude::*;

/// Last known status of one network server, keyed by its directory id.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "server_status")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub address: String,
    pub online: bool,
    pub version_name: Option<String>,
    pub version_protocol: Option<i32>,
    pub players_online: i32,
    pub players_max: i32,
    /// JSON array of `{ "name": ..., "id": ... }` objects.
    pub players_sample: Json,
    pub updated_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
