mod common;

use axum::{
    body::Body,
    http::{Request, StatusCode, header},
};
use krishimitra::{
    error::AppError,
    models::Role,
    routes::create_app,
    services::farmer_product_service,
    storage::{Bucket, Storage, StorageError},
};
use tower::ServiceExt;
use uuid::Uuid;

#[tokio::test]
async fn upload_writes_under_bucket_with_random_name() -> anyhow::Result<()> {
    let root = std::env::temp_dir().join(format!("krishimitra-storage-{}", Uuid::new_v4()));
    let storage = Storage::new(&root, "http://localhost:3000/");

    let object = storage.upload(Bucket::FarmImages, "field.PNG", b"png-bytes").await?;
    assert!(object.path.ends_with(".png"));
    assert_ne!(object.path, "field.png");
    assert_eq!(
        object.public_url,
        format!("http://localhost:3000/storage/farm_images/{}", object.path)
    );

    let stored = tokio::fs::read(root.join("farm_images").join(&object.path)).await?;
    assert_eq!(stored, b"png-bytes");

    let again = storage.upload(Bucket::FarmImages, "field.PNG", b"png-bytes").await?;
    assert_ne!(again.path, object.path);

    tokio::fs::remove_dir_all(&root).await?;
    Ok(())
}

#[tokio::test]
async fn empty_upload_is_rejected() {
    let storage = Storage::new(std::env::temp_dir(), "http://localhost:3000");
    let err = storage.upload(Bucket::ProductImages, "a.jpg", &[]).await.unwrap_err();
    assert!(matches!(err, StorageError::Empty));

    let state = common::offline_state();
    let err = farmer_product_service::upload_product_image(
        &state,
        &common::caller(Role::Farmer),
        "a.jpg",
        &[],
    )
    .await
    .unwrap_err();
    assert!(matches!(err, AppError::BadRequest(_)));
}

#[tokio::test]
async fn uploaded_image_is_served_back() -> anyhow::Result<()> {
    let state = common::offline_state();
    let auth = common::bearer(&state, &common::caller(Role::Farmer));
    let root = state.storage.root().to_path_buf();
    let app = create_app(state);

    let upload = Request::builder()
        .method("POST")
        .uri("/api/farms/images?file_name=barn.jpg")
        .header(header::AUTHORIZATION, &auth)
        .header(header::CONTENT_TYPE, "application/octet-stream")
        .body(Body::from("jpeg-bytes"))?;
    let response = app.clone().oneshot(upload).await?;
    assert_eq!(response.status(), StatusCode::CREATED);

    let body = common::json_body(response).await;
    let path = body["data"]["path"].as_str().expect("path").to_string();
    assert_eq!(body["data"]["bucket"], "farm_images");

    let response = app
        .oneshot(common::get(&format!("/storage/farm_images/{path}"), None))
        .await?;
    assert_eq!(response.status(), StatusCode::OK);

    tokio::fs::remove_dir_all(&root).await?;
    Ok(())
}
