mod common;

use krishimitra::{
    db::{create_pool, orm_from_pool, run_migrations},
    dto::{
        admin::{FarmerQuery, UpdateApprovalRequest},
        auth::{LoginRequest, RegisterRequest},
        farmer_products::ProductInput,
        farms::FarmInput,
    },
    entity::users::ActiveModel as UserActive,
    error::AppError,
    middleware::auth::{AuthUser, authenticate},
    models::{ApprovalStatus, LandUnit, ProductUnit, Role},
    services::{
        admin_service, auth_service, dashboard_service, farm_service, farmer_product_service,
    },
    state::AppState,
};
use sea_orm::ActiveValue::NotSet;
use sea_orm::{ActiveModelTrait, Set};
use uuid::Uuid;

// Integration flow: farmer signs up -> registers a farm and a listing -> admin approves.
#[tokio::test]
async fn farmer_onboarding_and_approval_flow() -> anyhow::Result<()> {
    // Allow skipping when no DB is configured in the environment.
    let database_url = match std::env::var("TEST_DATABASE_URL")
        .or_else(|_| std::env::var("DATABASE_URL"))
    {
        Ok(url) => url,
        Err(_) => {
            eprintln!(
                "Skipping test: set TEST_DATABASE_URL or DATABASE_URL to run integration flow tests."
            );
            return Ok(());
        }
    };

    let state = setup_state(&database_url).await?;
    let email = format!("farmer-{}@example.com", Uuid::new_v4().simple());

    let registered = auth_service::register_user(
        &state,
        RegisterRequest {
            email: email.to_uppercase(),
            password: "secret123".into(),
            full_name: Some("  Ravi Kumar ".into()),
            mobile: None,
            user_type: Role::Farmer,
        },
    )
    .await?
    .data
    .expect("user");
    assert_eq!(registered.email, email);
    assert_eq!(registered.approval_status, ApprovalStatus::Pending);
    assert_eq!(registered.full_name.as_deref(), Some("Ravi Kumar"));

    let duplicate = auth_service::register_user(
        &state,
        RegisterRequest {
            email: email.clone(),
            password: "secret123".into(),
            full_name: None,
            mobile: None,
            user_type: Role::User,
        },
    )
    .await
    .unwrap_err();
    assert!(matches!(duplicate, AppError::BadRequest(_)));

    let login = auth_service::login_user(
        &state,
        LoginRequest {
            email: email.clone(),
            password: "secret123".into(),
        },
    )
    .await?
    .data
    .expect("login");
    let farmer = authenticate(&login.token, &state.config.jwt_secret)?;
    assert_eq!(farmer.role, Role::Farmer);
    assert_eq!(farmer.user_id, registered.id);

    // Farm with crops, then crops replaced on edit
    let farm = farm_service::create_farm(&state, &farmer, farm_input(&["Wheat", "Mustard"]))
        .await?
        .data
        .expect("farm");
    let edited = farm_service::update_farm(&state, &farmer, farm.id, farm_input(&["Rice"]))
        .await?
        .data
        .expect("farm");
    assert_eq!(edited.crops, vec!["Rice"]);

    let farms = farm_service::fetch_farms(state.db(), farmer.user_id).await?;
    assert_eq!(farms.len(), 1);
    assert_eq!(farms[0].crops, vec!["Rice"]);

    farmer_product_service::create_product(
        &state,
        &farmer,
        ProductInput {
            name: "Basmati Rice".into(),
            description: Some("Aged one year".into()),
            category: "Grains".into(),
            unit: ProductUnit::Kg,
            price: 120_00,
            stock: 0,
            image_url: None,
        },
    )
    .await?;

    let dashboard = dashboard_service::load_dashboard(&state, &farmer)
        .await?
        .data
        .expect("dashboard");
    assert_eq!(dashboard.stats.farms, 1);
    assert_eq!(dashboard.stats.products, 1);
    assert_eq!(dashboard.stats.out_of_stock, 1);
    assert_eq!(dashboard.products[0].category, "grains");

    // Admin review
    let admin = create_admin(&state).await?;
    let pending = admin_service::list_farmers(
        &state,
        &admin,
        FarmerQuery {
            q: Some(email.clone()),
            status: Some(ApprovalStatus::Pending),
            ..Default::default()
        },
    )
    .await?
    .data
    .expect("farmers");
    assert_eq!(pending.items.len(), 1);

    let forbidden = admin_service::update_approval(
        &state,
        &farmer,
        farmer.user_id,
        UpdateApprovalRequest {
            status: ApprovalStatus::Approved,
        },
    )
    .await
    .unwrap_err();
    assert!(matches!(forbidden, AppError::Forbidden));

    let approved = admin_service::update_approval(
        &state,
        &admin,
        farmer.user_id,
        UpdateApprovalRequest {
            status: ApprovalStatus::Approved,
        },
    )
    .await?
    .data
    .expect("farmer");
    assert_eq!(approved.approval_status, ApprovalStatus::Approved);
    assert!(approved.reviewed_at.is_some());

    let stats = admin_service::load_stats(state.db()).await?;
    assert!(stats.approved_today >= 1);
    assert!(stats.total_farmers >= 1);

    // Delete is scoped to the owner
    farm_service::delete_farm(&state, &farmer, farm.id).await?;
    let gone = farm_service::delete_farm(&state, &farmer, farm.id)
        .await
        .unwrap_err();
    assert!(matches!(gone, AppError::NotFound));

    Ok(())
}

#[tokio::test]
async fn racing_sign_ups_with_one_email_get_a_single_account() -> anyhow::Result<()> {
    let Ok(database_url) =
        std::env::var("TEST_DATABASE_URL").or_else(|_| std::env::var("DATABASE_URL"))
    else {
        eprintln!("Skipping test: set TEST_DATABASE_URL or DATABASE_URL to run integration flow tests.");
        return Ok(());
    };

    let state = setup_state(&database_url).await?;
    let email = format!("buyer-{}@example.com", Uuid::new_v4().simple());
    let state = &state;
    let sign_up = move || {
        auth_service::register_user(
            state,
            RegisterRequest {
                email: email.clone(),
                password: "secret123".into(),
                full_name: None,
                mobile: None,
                user_type: Role::User,
            },
        )
    };

    let (first, second) = tokio::join!(sign_up(), sign_up());
    let outcomes = [first, second];
    assert_eq!(outcomes.iter().filter(|r| r.is_ok()).count(), 1);
    assert!(
        outcomes
            .iter()
            .any(|r| matches!(r, Err(AppError::BadRequest(_)))),
        "{:?}",
        outcomes.iter().filter_map(|r| r.as_ref().err()).collect::<Vec<_>>()
    );
    Ok(())
}

async fn setup_state(database_url: &str) -> anyhow::Result<AppState> {
    let config = common::test_config(database_url);
    let pool = create_pool(&config).await?;
    run_migrations(&pool).await?;
    Ok(AppState::new(orm_from_pool(pool), config))
}

fn farm_input(crops: &[&str]) -> FarmInput {
    FarmInput {
        name: "Riverside".into(),
        state: "Haryana".into(),
        district: "Karnal".into(),
        village: "Gharaunda".into(),
        pincode: "132114".into(),
        land_size: 2.0,
        land_unit: LandUnit::Hectares,
        farming_type: "conventional".into(),
        image_url: None,
        crops: crops.iter().map(|c| c.to_string()).collect(),
    }
}

async fn create_admin(state: &AppState) -> anyhow::Result<AuthUser> {
    let user_id = Uuid::new_v4();
    UserActive {
        id: Set(user_id),
        email: Set(format!("admin-{}@example.com", user_id.simple())),
        password_hash: Set(auth_service::hash_password("admin123")?),
        full_name: Set(None),
        mobile: Set(None),
        role: Set(Role::Admin),
        approval_status: Set(ApprovalStatus::Approved),
        reviewed_at: Set(None),
        created_at: NotSet,
    }
    .insert(state.db())
    .await?;

    Ok(AuthUser {
        user_id,
        role: Role::Admin,
    })
}
