use crate::server::{data::directory::DirectoryRepository, error::AppError};
use test_utils::{builder::TestBuilder, factory};

/// Tests listing the directory.
///
/// Expected: Ok with entries ordered by id
#[tokio::test]
async fn lists_entries_ordered_by_id() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::StaticInstance)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    factory::create_static_instance(db, "LobbyNYC", "10.0.0.3:25567").await?;
    factory::create_static_instance(db, "Building1NYC", "10.0.0.2:25566").await?;

    let entries = DirectoryRepository::new(db).get_all().await?;

    assert_eq!(entries.len(), 2);
    assert_eq!(entries[0].id, "Building1NYC");
    assert_eq!(entries[0].address, "10.0.0.2:25566");
    assert_eq!(entries[1].id, "LobbyNYC");

    Ok(())
}

/// Tests that a missing directory table surfaces as an error.
///
/// Expected: Err
#[tokio::test]
async fn fails_when_table_missing() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::ServerStatus)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let result = DirectoryRepository::new(db).get_all().await;

    assert!(result.is_err());

    Ok(())
}
