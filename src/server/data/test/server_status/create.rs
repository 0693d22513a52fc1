use super::*;

/// Tests creating the record of a newly sighted server.
///
/// Expected: Ok with an offline record without version
#[tokio::test]
async fn creates_first_sighting_record() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::ServerStatus)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let repo = ServerStatusRepository::new(db);
    let created = repo
        .create(&ServerStatus::first_sighting("LobbyNYC", "10.0.0.9:25570"))
        .await?;

    assert_eq!(created.id, "LobbyNYC");
    assert_eq!(created.address, "10.0.0.9:25570");
    assert!(!created.online);
    assert!(created.version.is_none());

    let count = entity::prelude::ServerStatus::find().count(db).await?;
    assert_eq!(count, 1);

    Ok(())
}

/// Tests that creating a record with an existing id fails.
///
/// Expected: Err from the primary key constraint
#[tokio::test]
async fn fails_for_duplicate_id() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::ServerStatus)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    factory::server_status::ServerStatusFactory::new(db)
        .id("Hub1")
        .build()
        .await?;

    let result = ServerStatusRepository::new(db)
        .create(&ServerStatus::first_sighting("Hub1", "10.0.0.1:25565"))
        .await;

    assert!(result.is_err());

    Ok(())
}
