mod common;

use chrono::Utc;
use common::{done, farm_input, stored_farm};
use krishimitra::{
    dto::farmer_products::ProductInput,
    entity::{farmer_products, farms},
    error::AppError,
    models::{ProductUnit, Role},
    services::{farm_service, farmer_product_service},
};
use sea_orm::{DatabaseBackend, DbErr, MockDatabase};
use uuid::Uuid;

fn product_input() -> ProductInput {
    ProductInput {
        name: "Basmati".into(),
        description: None,
        category: "grains".into(),
        unit: ProductUnit::Kg,
        price: 12_000,
        stock: 40,
        image_url: None,
    }
}

#[tokio::test]
async fn another_farmers_farm_cannot_be_updated() {
    let farmer = common::caller(Role::Farmer);
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([Vec::<farms::Model>::new()])
        .into_connection();
    let state = common::state_with(db);

    let err = farm_service::update_farm(&state, &farmer, Uuid::new_v4(), farm_input(&["Wheat"]))
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::NotFound), "{err:?}");

    let log = common::transaction_log(state);
    assert_eq!(log.len(), 1);
    assert!(format!("{:?}", log[0]).contains("farmer_id"));
}

#[tokio::test]
async fn another_farmers_farm_cannot_be_deleted() {
    let farmer = common::caller(Role::Farmer);
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_exec_results([done(0)])
        .into_connection();
    let state = common::state_with(db);

    let err = farm_service::delete_farm(&state, &farmer, Uuid::new_v4())
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::NotFound), "{err:?}");

    let delete = format!("{:?}", common::transaction_log(state)[0]);
    assert!(delete.contains("DELETE FROM") && delete.contains("farmer_id"), "{delete}");
}

#[tokio::test]
async fn another_farmers_listing_cannot_be_updated() {
    let farmer = common::caller(Role::Farmer);
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([Vec::<farmer_products::Model>::new()])
        .into_connection();
    let state = common::state_with(db);

    let err = farmer_product_service::update_product(&state, &farmer, Uuid::new_v4(), product_input())
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::NotFound), "{err:?}");
    assert_eq!(common::transaction_log(state).len(), 1);
}

#[tokio::test]
async fn another_farmers_listing_cannot_be_deleted() {
    let farmer = common::caller(Role::Farmer);
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_exec_results([done(0)])
        .into_connection();
    let state = common::state_with(db);

    let err = farmer_product_service::delete_product(&state, &farmer, Uuid::new_v4())
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::NotFound), "{err:?}");
}

#[tokio::test]
async fn own_listing_is_updated() -> anyhow::Result<()> {
    let farmer = common::caller(Role::Farmer);
    let now = Utc::now().fixed_offset();
    let row = farmer_products::Model {
        id: Uuid::new_v4(),
        farmer_id: farmer.user_id,
        name: "Basmati".into(),
        description: None,
        category: "grains".into(),
        unit: ProductUnit::Kg,
        price: 12_000,
        stock: 40,
        image_url: None,
        created_at: now,
        updated_at: now,
    };
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([vec![row.clone()], vec![row.clone()]])
        .into_connection();
    let state = common::state_with(db);

    let product = farmer_product_service::update_product(&state, &farmer, row.id, product_input())
        .await?
        .data
        .expect("product");
    assert_eq!(product.id, row.id);
    Ok(())
}

#[tokio::test]
async fn failed_crop_reinsert_is_reported_after_the_farm_update() {
    let farmer = common::caller(Role::Farmer);
    let farm = stored_farm(&farmer);
    let farm_id = farm.id;
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([vec![farm.clone()], vec![farm]])
        .append_exec_results([done(2)])
        .append_exec_errors([DbErr::Custom("crop insert refused".into())])
        .into_connection();
    let state = common::state_with(db);

    let err = farm_service::update_farm(&state, &farmer, farm_id, farm_input(&["Maize"]))
        .await
        .unwrap_err();
    assert!(
        matches!(err, AppError::Store { context, .. } if context == "Error adding farm crops"),
        "{err:?}"
    );
    // Updates are not compensated: no delete of the farm follows.
    assert_eq!(common::transaction_log(state).len(), 4);
}

#[tokio::test]
async fn failed_crop_clear_stops_the_farm_update() {
    let farmer = common::caller(Role::Farmer);
    let farm = stored_farm(&farmer);
    let farm_id = farm.id;
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([vec![farm.clone()], vec![farm]])
        .append_exec_errors([DbErr::Custom("delete refused".into())])
        .into_connection();
    let state = common::state_with(db);

    let err = farm_service::update_farm(&state, &farmer, farm_id, farm_input(&["Maize"]))
        .await
        .unwrap_err();
    assert!(
        matches!(err, AppError::Store { context, .. } if context == "Error updating farm crops"),
        "{err:?}"
    );
    assert_eq!(common::transaction_log(state).len(), 3);
}
