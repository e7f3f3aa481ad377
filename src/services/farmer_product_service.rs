use chrono::Utc;
use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, QueryOrder, Set};
use uuid::Uuid;

use crate::{
    db::OrmConn,
    dto::farmer_products::{FarmerProductList, ProductInput},
    entity::farmer_products::{
        ActiveModel, Column, Entity as FarmerProducts, Model as FarmerProductModel,
    },
    error::{AppError, AppResult},
    middleware::auth::{AuthUser, ensure_farmer},
    models::FarmerProduct,
    response::{ApiResponse, Meta},
    state::AppState,
    storage::{Bucket, UploadedObject},
};

pub async fn list_products(
    state: &AppState,
    user: &AuthUser,
) -> AppResult<ApiResponse<FarmerProductList>> {
    ensure_farmer(user)?;
    let items = fetch_products(state.db(), user.user_id).await?;
    let meta = Meta::all(items.len());
    Ok(ApiResponse::success(
        "Products",
        FarmerProductList { items },
        Some(meta),
    ))
}

/// Listings of one farmer, newest first.
pub async fn fetch_products(db: &OrmConn, farmer_id: Uuid) -> AppResult<Vec<FarmerProduct>> {
    let products = FarmerProducts::find()
        .filter(Column::FarmerId.eq(farmer_id))
        .order_by_desc(Column::CreatedAt)
        .all(db)
        .await
        .map_err(AppError::store("Error fetching products"))?;
    Ok(products.into_iter().map(product_from_entity).collect())
}

pub async fn create_product(
    state: &AppState,
    user: &AuthUser,
    payload: ProductInput,
) -> AppResult<ApiResponse<FarmerProduct>> {
    ensure_farmer(user)?;
    let input = payload.validated()?;
    let now = Utc::now().fixed_offset();

    let product = ActiveModel {
        id: Set(Uuid::new_v4()),
        farmer_id: Set(user.user_id),
        name: Set(input.name),
        description: Set(input.description),
        category: Set(input.category),
        unit: Set(input.unit),
        price: Set(input.price),
        stock: Set(input.stock),
        image_url: Set(input.image_url),
        created_at: Set(now),
        updated_at: Set(now),
    }
    .insert(state.db())
    .await
    .map_err(AppError::store("Error creating product"))?;

    tracing::info!(product_id = %product.id, farmer_id = %user.user_id, "product listed");
    Ok(ApiResponse::success(
        "Product created",
        product_from_entity(product),
        Some(Meta::empty()),
    ))
}

pub async fn update_product(
    state: &AppState,
    user: &AuthUser,
    id: Uuid,
    payload: ProductInput,
) -> AppResult<ApiResponse<FarmerProduct>> {
    ensure_farmer(user)?;
    let input = payload.validated()?;

    let existing = FarmerProducts::find_by_id(id)
        .filter(Column::FarmerId.eq(user.user_id))
        .one(state.db())
        .await
        .map_err(AppError::store("Error updating product"))?
        .ok_or(AppError::NotFound)?;

    let mut active: ActiveModel = existing.into();
    active.name = Set(input.name);
    active.description = Set(input.description);
    active.category = Set(input.category);
    active.unit = Set(input.unit);
    active.price = Set(input.price);
    active.stock = Set(input.stock);
    if let Some(image_url) = input.image_url {
        active.image_url = Set(Some(image_url));
    }
    active.updated_at = Set(Utc::now().fixed_offset());

    let product = active
        .update(state.db())
        .await
        .map_err(AppError::store("Error updating product"))?;

    tracing::info!(product_id = %product.id, "product updated");
    Ok(ApiResponse::success(
        "Updated",
        product_from_entity(product),
        Some(Meta::empty()),
    ))
}

pub async fn delete_product(
    state: &AppState,
    user: &AuthUser,
    id: Uuid,
) -> AppResult<ApiResponse<serde_json::Value>> {
    ensure_farmer(user)?;
    let result = FarmerProducts::delete_many()
        .filter(Column::Id.eq(id))
        .filter(Column::FarmerId.eq(user.user_id))
        .exec(state.db())
        .await
        .map_err(AppError::store("Error deleting product"))?;

    if result.rows_affected == 0 {
        return Err(AppError::NotFound);
    }

    tracing::info!(product_id = %id, "product deleted");
    Ok(ApiResponse::done("Deleted"))
}

pub async fn upload_product_image(
    state: &AppState,
    user: &AuthUser,
    file_name: &str,
    bytes: &[u8],
) -> AppResult<ApiResponse<UploadedObject>> {
    ensure_farmer(user)?;
    let object = state
        .storage
        .upload(Bucket::ProductImages, file_name, bytes)
        .await
        .map_err(AppError::upload("Error uploading product image"))?;
    Ok(ApiResponse::success("Image uploaded", object, Some(Meta::empty())))
}

fn product_from_entity(model: FarmerProductModel) -> FarmerProduct {
    FarmerProduct {
        id: model.id,
        farmer_id: model.farmer_id,
        name: model.name,
        description: model.description,
        category: model.category,
        unit: model.unit,
        price: model.price,
        stock: model.stock,
        image_url: model.image_url,
        created_at: model.created_at.with_timezone(&Utc),
        updated_at: model.updated_at.with_timezone(&Utc),
    }
}
