use super::*;

/// Tests that every tracked field is written, including the player sample.
///
/// Expected: Ok with the stored record matching the update
#[tokio::test]
async fn overwrites_tracked_fields() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::ServerStatus)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let stored = factory::server_status::ServerStatusFactory::new(db)
        .id("NYC-1")
        .online(false)
        .no_version()
        .build()
        .await?;

    let repo = ServerStatusRepository::new(db);
    let mut status = ServerStatus::from_entity(stored);
    status.online = true;
    status.address = "10.0.0.20:25565".to_string();
    status.version = Some(Version {
        name: "Paper 1.20.4".to_string(),
        protocol: 765,
    });
    status.players.online = 2;
    status.players.max = 40;
    status.players.sample = vec![PlayerSample {
        name: "Builder".to_string(),
        id: "0000-1111".to_string(),
    }];

    repo.update(&status).await?;

    let records = repo.get_all().await?;
    assert_eq!(records.len(), 1);
    let record = &records[0];
    assert!(record.online);
    assert_eq!(record.address, "10.0.0.20:25565");
    assert_eq!(record.version, status.version);
    assert_eq!(record.players.sample, status.players.sample);

    Ok(())
}

/// Tests that updating an unknown id does not insert a record.
///
/// Expected: Err with no rows in the table
#[tokio::test]
async fn fails_for_unknown_id() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::ServerStatus)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let result = ServerStatusRepository::new(db)
        .update(&ServerStatus::first_sighting("Ghost", "10.0.0.1:25565"))
        .await;

    assert!(result.is_err());
    let count = entity::prelude::ServerStatus::find().count(db).await?;
    assert_eq!(count, 0);

    Ok(())
}
