use utoipa::{
    Modify, OpenApi,
    openapi::{
        self,
        OpenApi as OpenApiSpec,
        security::{HttpAuthScheme, HttpBuilder, SecurityScheme},
    },
};
use utoipa_scalar::{Scalar, Servable};

use crate::{
    cart::{Cart, CartLine},
    catalog::{CatalogProduct, CatalogQuery, Category, Farmer, FarmingDetails, NutritionFacts},
    dto::{
        admin::{FarmerList, FarmerQuery, FarmerStats, UpdateApprovalRequest},
        auth::{LoginRequest, LoginResponse, RegisterRequest},
        cart::{CartView, CheckoutRequest, PaymentMethod, PaymentOption, Receipt, UpdateCartRequest},
        chat::{ChatMessage, ChatReply},
        dashboard::{Dashboard, DashboardStats},
        farmer_products::{FarmerProductList, ProductInput},
        farms::{FarmInput, FarmList, UploadQuery},
    },
    models::{ApprovalStatus, Farm, FarmerProduct, LandUnit, ProductUnit, Role, User},
    pricing::{OrderSummary, PricedLine, SummaryDisplay},
    response::{ApiResponse, Meta},
    routes::{
        admin, auth, cart, catalog, chat, dashboard, farmer_products, farms, health, params,
    },
    storage::UploadedObject,
};

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut openapi::OpenApi) {
        let components = openapi.components.get_or_insert_with(Default::default);
        components.add_security_scheme(
            "bearer_auth",
            SecurityScheme::Http(
                HttpBuilder::new()
                    .scheme(HttpAuthScheme::Bearer)
                    .bearer_format("JWT")
                    .build(),
            ),
        );
    }
}

#[derive(OpenApi)]
#[openapi(
    paths(
        health::health_check,
        auth::register,
        auth::login,
        auth::logout,
        auth::me,
        catalog::list_products,
        catalog::get_product,
        cart::view_cart,
        cart::update_cart,
        cart::remove_item,
        cart::checkout,
        farms::list_farms,
        farms::create_farm,
        farms::update_farm,
        farms::delete_farm,
        farms::upload_farm_image,
        farmer_products::list_products,
        farmer_products::create_product,
        farmer_products::update_product,
        farmer_products::delete_product,
        farmer_products::upload_product_image,
        dashboard::get_dashboard,
        admin::list_farmers,
        admin::farmer_stats,
        admin::update_approval,
        chat::chat
    ),
    components(
        schemas(
            User,
            Role,
            ApprovalStatus,
            Farm,
            LandUnit,
            FarmerProduct,
            ProductUnit,
            Category,
            Farmer,
            FarmingDetails,
            NutritionFacts,
            CatalogProduct,
            CatalogQuery,
            Cart,
            CartLine,
            CartView,
            PricedLine,
            OrderSummary,
            SummaryDisplay,
            PaymentMethod,
            PaymentOption,
            UpdateCartRequest,
            CheckoutRequest,
            Receipt,
            RegisterRequest,
            LoginRequest,
            LoginResponse,
            FarmInput,
            FarmList,
            UploadQuery,
            UploadedObject,
            ProductInput,
            FarmerProductList,
            Dashboard,
            DashboardStats,
            FarmerQuery,
            FarmerList,
            FarmerStats,
            UpdateApprovalRequest,
            ChatMessage,
            ChatReply,
            params::Pagination,
            Meta,
            ApiResponse<User>,
            ApiResponse<Farm>,
            ApiResponse<CartView>,
            ApiResponse<Receipt>,
            ApiResponse<Dashboard>
        )
    ),
    security(
        ("bearer_auth" = [])
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Health", description = "Health check endpoint"),
        (name = "Auth", description = "Sign-up, sign-in and session endpoints"),
        (name = "Catalog", description = "Shop catalog endpoints"),
        (name = "Cart", description = "Cart and checkout endpoints"),
        (name = "Farms", description = "Farm registry endpoints"),
        (name = "Farmer Products", description = "Farmer listing endpoints"),
        (name = "Dashboard", description = "Farmer dashboard endpoint"),
        (name = "Admin", description = "Farmer approval endpoints"),
        (name = "Chat", description = "Assistant endpoint"),
    )
)]
pub struct ApiDoc;

pub fn scalar_docs() -> Scalar<OpenApiSpec> {
    Scalar::with_url("/docs", ApiDoc::openapi())
}
