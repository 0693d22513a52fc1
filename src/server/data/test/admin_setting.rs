use crate::server::{
    data::admin_setting::{AdminSettingRepository, STATUS_EMBED_SERVERS},
    error::AppError,
};
use test_utils::{builder::TestBuilder, factory};

/// Tests reading an existing setting.
///
/// Expected: Ok with the raw JSON value
#[tokio::test]
async fn finds_existing_setting() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::AdminSetting)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    factory::create_admin_setting(db, STATUS_EMBED_SERVERS, r#"["NYC-1"]"#).await?;

    let value = AdminSettingRepository::new(db)
        .find_by_key(STATUS_EMBED_SERVERS)
        .await?;

    assert_eq!(value.as_deref(), Some(r#"["NYC-1"]"#));

    Ok(())
}

/// Tests reading a missing setting.
///
/// Expected: Ok(None)
#[tokio::test]
async fn returns_none_for_missing_key() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::AdminSetting)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let value = AdminSettingRepository::new(db).find_by_key("ips").await?;

    assert!(value.is_none());

    Ok(())
}
