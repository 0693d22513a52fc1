use super::*;

/// Tests listing records when the table is empty.
///
/// Expected: Ok with empty vector
#[tokio::test]
async fn returns_empty_when_no_records() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::ServerStatus)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let records = ServerStatusRepository::new(db).get_all().await?;

    assert!(records.is_empty());

    Ok(())
}

/// Tests that records are converted to domain models ordered by id.
///
/// Verifies version columns are folded into `Version` and that a record without a
/// version maps to `None`.
///
/// Expected: Ok with records sorted by id
#[tokio::test]
async fn returns_records_ordered_by_id() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::ServerStatus)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    factory::server_status::ServerStatusFactory::new(db)
        .id("MapNYC")
        .online(false)
        .no_version()
        .build()
        .await?;
    factory::server_status::ServerStatusFactory::new(db)
        .id("Building1NYC")
        .version("Paper 1.20.4", 765)
        .players(4, 50)
        .build()
        .await?;

    let records = ServerStatusRepository::new(db).get_all().await?;

    assert_eq!(records.len(), 2);
    assert_eq!(records[0].id, "Building1NYC");
    assert_eq!(
        records[0].version,
        Some(Version {
            name: "Paper 1.20.4".to_string(),
            protocol: 765
        })
    );
    assert_eq!(records[0].players.online, 4);
    assert_eq!(records[0].players.max, 50);
    assert_eq!(records[1].id, "MapNYC");
    assert!(records[1].version.is_none());
    assert!(!records[1].online);

    Ok(())
}
