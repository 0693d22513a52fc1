use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(AdminSetting::Table)
                    .if_not_exists()
                    .col(string(AdminSetting::Key).primary_key())
                    .col(text(AdminSetting::Value))
                    .to_owned(),
            )
            .await?;

        // Seed the status embed selection so a fresh install renders something
        let seed = Query::insert()
            .into_table(AdminSetting::Table)
            .columns([AdminSetting::Key, AdminSetting::Value])
            .values_panic([
                "status_embed_servers".into(),
                r#"["NYC-1","Building1NYC","Building2NYC","MapNYC","LobbyNYC","Hub1"]"#.into(),
            ])
            .to_owned();

        manager.exec_stmt(seed).await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(AdminSetting::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum AdminSetting {
    Table,
    Key,
    Value,
}
