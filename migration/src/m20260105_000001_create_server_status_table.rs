use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(ServerStatus::Table)
                    .if_not_exists()
                    .col(string(ServerStatus::Id).primary_key())
                    .col(string(ServerStatus::Address))
                    .col(boolean(ServerStatus::Online).default(false))
                    .col(string_null(ServerStatus::VersionName))
                    .col(integer_null(ServerStatus::VersionProtocol))
                    .col(integer(ServerStatus::PlayersOnline).default(0))
                    .col(integer(ServerStatus::PlayersMax).default(0))
                    .col(json(ServerStatus::PlayersSample))
                    .col(
                        timestamp_with_time_zone(ServerStatus::UpdatedAt)
                            .default(Expr::current_timestamp())
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(ServerStatus::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum ServerStatus {
    Table,
    Id,
    Address,
    Online,
    VersionName,
    VersionProtocol,
    PlayersOnline,
    PlayersMax,
    PlayersSample,
    UpdatedAt,
}
