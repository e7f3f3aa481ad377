mod common;

use common::{done, farm_input as input, stored_farm};
use krishimitra::{error::AppError, models::Role, services::farm_service};
use sea_orm::{DatabaseBackend, DbErr, MockDatabase};

#[tokio::test]
async fn farm_and_crops_are_created_together() -> anyhow::Result<()> {
    let farmer = common::caller(Role::Farmer);
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([vec![stored_farm(&farmer)]])
        .append_exec_results([done(2)])
        .into_connection();
    let state = common::state_with(db);

    let farm = farm_service::create_farm(&state, &farmer, input(&["Wheat", " Rice ", ""]))
        .await?
        .data
        .expect("farm");
    assert_eq!(farm.crops, vec!["Wheat", "Rice"]);
    assert_eq!(farm.farmer_id, farmer.user_id);
    Ok(())
}

#[tokio::test]
async fn failed_crop_insert_removes_the_farm() {
    let farmer = common::caller(Role::Farmer);
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([vec![stored_farm(&farmer)]])
        .append_exec_errors([DbErr::Custom("crop insert refused".into())])
        .append_exec_results([done(1)])
        .into_connection();
    let state = common::state_with(db);

    let err = farm_service::create_farm(&state, &farmer, input(&["Wheat"]))
        .await
        .unwrap_err();
    assert!(
        matches!(err, AppError::Store { context, .. } if context == "Error adding farm crops"),
        "{err:?}"
    );

    let log = common::transaction_log(state);
    assert_eq!(log.len(), 3);
    let rollback = format!("{:?}", log[2]);
    assert!(rollback.contains("DELETE FROM") && rollback.contains("farms"), "{rollback}");
}

#[tokio::test]
async fn failed_rollback_reports_the_orphaned_farm() {
    let farmer = common::caller(Role::Farmer);
    let farm = stored_farm(&farmer);
    let farm_id = farm.id;
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([vec![farm]])
        .append_exec_errors([
            DbErr::Custom("crop insert refused".into()),
            DbErr::Custom("delete refused".into()),
        ])
        .into_connection();
    let state = common::state_with(db);

    let err = farm_service::create_farm(&state, &farmer, input(&["Wheat"]))
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::OrphanedFarm { farm_id: id } if id == farm_id));
}

#[tokio::test]
async fn farm_without_crops_skips_the_second_write() -> anyhow::Result<()> {
    let farmer = common::caller(Role::Farmer);
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([vec![stored_farm(&farmer)]])
        .into_connection();
    let state = common::state_with(db);

    farm_service::create_farm(&state, &farmer, input(&[])).await?;
    assert_eq!(common::transaction_log(state).len(), 1);
    Ok(())
}

#[tokio::test]
async fn buyers_cannot_create_farms() {
    let state = common::offline_state();
    let err = farm_service::create_farm(&state, &common::caller(Role::User), input(&[]))
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Forbidden));
}

#[tokio::test]
async fn invalid_pincode_is_rejected_before_any_write() {
    let state = common::offline_state();
    let mut bad = input(&[]);
    bad.pincode = "14100".into();
    let err = farm_service::create_farm(&state, &common::caller(Role::Farmer), bad)
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::BadRequest(_)));
}
