use std::collections::HashMap;

use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DbErr, EntityTrait, QueryFilter, QueryOrder, Set,
};
use uuid::Uuid;

use crate::{
    db::OrmConn,
    dto::farms::{FarmInput, FarmList},
    entity::{
        farm_crops::{ActiveModel as CropActive, Column as CropCol, Entity as FarmCrops},
        farms::{ActiveModel as FarmActive, Column as FarmCol, Entity as Farms, Model as FarmModel},
    },
    error::{AppError, AppResult},
    middleware::auth::{AuthUser, ensure_farmer},
    models::Farm,
    response::{ApiResponse, Meta},
    state::AppState,
    storage::{Bucket, UploadedObject},
};

const CROPS_INSERT_FAILED: &str = "Error adding farm crops";

pub async fn list_farms(state: &AppState, user: &AuthUser) -> AppResult<ApiResponse<FarmList>> {
    ensure_farmer(user)?;
    let items = fetch_farms(state.db(), user.user_id).await?;
    let meta = Meta::all(items.len());
    Ok(ApiResponse::success("Farms", FarmList { items }, Some(meta)))
}

/// Farms of one farmer, oldest first, each with its crop names.
pub async fn fetch_farms(db: &OrmConn, farmer_id: Uuid) -> AppResult<Vec<Farm>> {
    let farms = Farms::find()
        .filter(FarmCol::FarmerId.eq(farmer_id))
        .order_by_asc(FarmCol::CreatedAt)
        .all(db)
        .await
        .map_err(AppError::store("Error fetching farms"))?;
    if farms.is_empty() {
        return Ok(Vec::new());
    }

    let crops = FarmCrops::find()
        .filter(CropCol::FarmId.is_in(farms.iter().map(|f| f.id)))
        .order_by_asc(CropCol::CreatedAt)
        .all(db)
        .await
        .map_err(AppError::store("Error fetching farm crops"))?;

    let mut by_farm: HashMap<Uuid, Vec<String>> = HashMap::new();
    for crop in crops {
        by_farm.entry(crop.farm_id).or_default().push(crop.crop_name);
    }

    Ok(farms
        .into_iter()
        .map(|farm| {
            let crops = by_farm.remove(&farm.id).unwrap_or_default();
            farm_from_entity(farm, crops)
        })
        .collect())
}

/// Inserts the farm, then its crops. A failed crop insert deletes the farm
/// again; if that delete fails too the farm is reported as orphaned.
pub async fn create_farm(
    state: &AppState,
    user: &AuthUser,
    payload: FarmInput,
) -> AppResult<ApiResponse<Farm>> {
    ensure_farmer(user)?;
    let input = payload.validated()?;
    let db = state.db();
    let now = Utc::now().fixed_offset();

    let farm = FarmActive {
        id: Set(Uuid::new_v4()),
        farmer_id: Set(user.user_id),
        name: Set(input.name),
        state: Set(input.state),
        district: Set(input.district),
        village: Set(input.village),
        pincode: Set(input.pincode),
        land_size: Set(input.land_size),
        land_unit: Set(input.land_unit),
        farming_type: Set(input.farming_type),
        image_url: Set(input.image_url),
        created_at: Set(now),
        updated_at: Set(now),
    }
    .insert(db)
    .await
    .map_err(AppError::store("Error creating farm"))?;

    if !input.crops.is_empty() {
        if let Err(cause) = insert_crops(db, farm.id, &input.crops).await {
            return Err(roll_back_farm(db, farm.id, cause).await);
        }
    }

    tracing::info!(farm_id = %farm.id, farmer_id = %user.user_id, crops = input.crops.len(), "farm created");
    Ok(ApiResponse::success(
        "Farm created",
        farm_from_entity(farm, input.crops),
        Some(Meta::empty()),
    ))
}

pub async fn update_farm(
    state: &AppState,
    user: &AuthUser,
    id: Uuid,
    payload: FarmInput,
) -> AppResult<ApiResponse<Farm>> {
    ensure_farmer(user)?;
    let input = payload.validated()?;
    let db = state.db();

    let existing = Farms::find_by_id(id)
        .filter(FarmCol::FarmerId.eq(user.user_id))
        .one(db)
        .await
        .map_err(AppError::store("Error updating farm"))?
        .ok_or(AppError::NotFound)?;

    let mut active: FarmActive = existing.into();
    active.name = Set(input.name);
    active.state = Set(input.state);
    active.district = Set(input.district);
    active.village = Set(input.village);
    active.pincode = Set(input.pincode);
    active.land_size = Set(input.land_size);
    active.land_unit = Set(input.land_unit);
    active.farming_type = Set(input.farming_type);
    if let Some(image_url) = input.image_url {
        active.image_url = Set(Some(image_url));
    }
    active.updated_at = Set(Utc::now().fixed_offset());
    let farm = active
        .update(db)
        .await
        .map_err(AppError::store("Error updating farm"))?;

    FarmCrops::delete_many()
        .filter(CropCol::FarmId.eq(farm.id))
        .exec(db)
        .await
        .map_err(AppError::store("Error updating farm crops"))?;

    if !input.crops.is_empty() {
        insert_crops(db, farm.id, &input.crops)
            .await
            .map_err(AppError::store(CROPS_INSERT_FAILED))?;
    }

    tracing::info!(farm_id = %farm.id, "farm updated");
    Ok(ApiResponse::success(
        "Farm updated",
        farm_from_entity(farm, input.crops),
        Some(Meta::empty()),
    ))
}

pub async fn delete_farm(
    state: &AppState,
    user: &AuthUser,
    id: Uuid,
) -> AppResult<ApiResponse<serde_json::Value>> {
    ensure_farmer(user)?;
    let result = Farms::delete_many()
        .filter(FarmCol::Id.eq(id))
        .filter(FarmCol::FarmerId.eq(user.user_id))
        .exec(state.db())
        .await
        .map_err(AppError::store("Error deleting farm"))?;

    if result.rows_affected == 0 {
        return Err(AppError::NotFound);
    }

    tracing::info!(farm_id = %id, "farm deleted");
    Ok(ApiResponse::done("Farm deleted"))
}

pub async fn upload_farm_image(
    state: &AppState,
    user: &AuthUser,
    file_name: &str,
    bytes: &[u8],
) -> AppResult<ApiResponse<UploadedObject>> {
    ensure_farmer(user)?;
    let object = state
        .storage
        .upload(Bucket::FarmImages, file_name, bytes)
        .await
        .map_err(AppError::upload("Error uploading farm image"))?;
    Ok(ApiResponse::success("Image uploaded", object, Some(Meta::empty())))
}

async fn insert_crops(db: &OrmConn, farm_id: Uuid, crops: &[String]) -> Result<u64, DbErr> {
    let now = Utc::now().fixed_offset();
    FarmCrops::insert_many(crops.iter().map(|name| CropActive {
        id: Set(Uuid::new_v4()),
        farm_id: Set(farm_id),
        crop_name: Set(name.clone()),
        created_at: Set(now),
    }))
    .exec_without_returning(db)
    .await
}

async fn roll_back_farm(db: &OrmConn, farm_id: Uuid, cause: DbErr) -> AppError {
    tracing::error!(error = %cause, %farm_id, "{CROPS_INSERT_FAILED}");
    match Farms::delete_by_id(farm_id).exec(db).await {
        Ok(_) => {
            tracing::warn!(%farm_id, "farm removed after failed crop insert");
            AppError::Store {
                context: CROPS_INSERT_FAILED,
                source: cause,
            }
        }
        Err(err) => {
            tracing::error!(error = %err, %farm_id, "farm left orphaned, rollback failed");
            AppError::OrphanedFarm { farm_id }
        }
    }
}

fn farm_from_entity(model: FarmModel, crops: Vec<String>) -> Farm {
    Farm {
        id: model.id,
        farmer_id: model.farmer_id,
        name: model.name,
        state: model.state,
        district: model.district,
        village: model.village,
        pincode: model.pincode,
        land_size: model.land_size,
        land_unit: model.land_unit,
        farming_type: model.farming_type,
        image_url: model.image_url,
        crops,
        created_at: model.created_at.with_timezone(&Utc),
        updated_at: model.updated_at.with_timezone(&Utc),
    }
}
