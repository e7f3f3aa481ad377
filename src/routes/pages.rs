//! Client screens. The guard runs before each handler, so a handler only sees
//! callers its screen admits and answers with a view model.

use axum::{
    Extension, Json, Router,
    extract::{Path, Query, State},
    middleware,
    routing::get,
};

use crate::{
    catalog::{self, CatalogQuery, Category},
    dto::{
        cart::payment_options,
        pages::{
            AdminPage, AuthPage, CartPage, CategoryLink, ChatbotPage, DashboardPage, LandingPage,
            ProductPage, ProfilePage, ShopPage, profile_menu,
        },
    },
    error::{AppError, AppResult},
    guard,
    middleware::auth::AuthUser,
    services::{admin_service, auth_service, cart_service, dashboard_service},
    state::AppState,
};

/// Every screen, gated by [`guard::enforce`] from the entries of [`guard::SCREENS`].
pub fn router(state: AppState) -> Router<AppState> {
    Router::new()
        .route("/", get(landing))
        .route("/auth", get(auth))
        .route("/chatbot", get(chatbot))
        .route("/shop", get(shop))
        .route("/product/{id}", get(product))
        .route("/cart", get(cart))
        .route("/profile", get(profile))
        .route("/dashboard", get(dashboard))
        .route("/admin", get(admin))
        .route_layer(middleware::from_fn_with_state(state, guard::enforce))
}

pub async fn landing() -> Json<LandingPage> {
    Json(LandingPage::new())
}

pub async fn auth() -> Json<AuthPage> {
    Json(AuthPage::new())
}

pub async fn chatbot() -> Json<ChatbotPage> {
    Json(ChatbotPage::new())
}

pub async fn shop(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Query(query): Query<CatalogQuery>,
) -> AppResult<Json<ShopPage>> {
    let products = catalog::search(&query).into_iter().cloned().collect();
    let cart_count = state.carts.get(user.user_id).await.item_count();

    Ok(Json(ShopPage {
        q: query.q,
        category: query.category,
        categories: Category::ALL.into_iter().map(CategoryLink::from).collect(),
        products,
        cart_count,
    }))
}

/// Unknown or malformed ids are 404 once the guard has passed.
pub async fn product(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Path(id): Path<String>,
) -> AppResult<Json<ProductPage>> {
    let product = id
        .parse::<u32>()
        .ok()
        .and_then(catalog::find)
        .ok_or(AppError::NotFound)?;
    let in_cart = state.carts.get(user.user_id).await.quantity_of(product.id);

    Ok(Json(ProductPage {
        product: product.clone(),
        in_cart,
    }))
}

pub async fn cart(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
) -> AppResult<Json<CartPage>> {
    let cart = state.carts.get(user.user_id).await;

    Ok(Json(CartPage {
        cart: cart_service::cart_view(&cart),
        payment_options: payment_options(),
    }))
}

pub async fn profile(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
) -> AppResult<Json<ProfilePage>> {
    let found = auth_service::find_user(state.db(), user.user_id).await?;

    Ok(Json(ProfilePage {
        menu: profile_menu(found.role),
        user: found,
    }))
}

pub async fn dashboard(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
) -> AppResult<Json<DashboardPage>> {
    let dashboard = dashboard_service::build_dashboard(state.db(), user.user_id).await?;
    Ok(Json(DashboardPage { dashboard }))
}

pub async fn admin(State(state): State<AppState>) -> AppResult<Json<AdminPage>> {
    let stats = admin_service::load_stats(state.db()).await?;

    Ok(Json(AdminPage {
        stats,
        farmers_endpoint: "/api/admin/farmers".to_string(),
    }))
}
