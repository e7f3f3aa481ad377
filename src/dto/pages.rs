//! View models returned by the client screens.

use serde::Serialize;
use utoipa::ToSchema;

use crate::{
    catalog::{CatalogProduct, Category},
    dto::{
        admin::FarmerStats,
        cart::{CartView, PaymentOption},
        dashboard::Dashboard,
    },
    models::{Role, User},
};

pub const BRAND: &str = "KrishiMitra";

#[derive(Debug, Serialize, ToSchema)]
pub struct CategoryLink {
    pub id: Category,
    pub label: String,
}

impl From<Category> for CategoryLink {
    fn from(id: Category) -> Self {
        Self {
            id,
            label: id.label().to_string(),
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct LandingPage {
    pub brand: String,
    pub headline: String,
    pub tagline: String,
    pub categories: Vec<CategoryLink>,
}

impl LandingPage {
    pub fn new() -> Self {
        Self {
            brand: BRAND.to_string(),
            headline: "Fresh From Farm to Table".to_string(),
            tagline: "Connecting farmers and consumers for fresher, better produce.".to_string(),
            categories: Category::ALL.into_iter().map(CategoryLink::from).collect(),
        }
    }
}

impl Default for LandingPage {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct AuthPage {
    pub sign_in: String,
    pub sign_up: String,
    /// Account types offered at sign-up.
    pub user_types: Vec<Role>,
}

impl AuthPage {
    pub fn new() -> Self {
        Self {
            sign_in: "/api/auth/login".to_string(),
            sign_up: "/api/auth/register".to_string(),
            user_types: vec![Role::User, Role::Farmer],
        }
    }
}

impl Default for AuthPage {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ShopPage {
    pub q: Option<String>,
    pub category: Option<Category>,
    pub categories: Vec<CategoryLink>,
    pub products: Vec<CatalogProduct>,
    pub cart_count: u64,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ProductPage {
    pub product: CatalogProduct,
    pub in_cart: u32,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct CartPage {
    pub cart: CartView,
    pub payment_options: Vec<PaymentOption>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct MenuItem {
    pub label: String,
    pub link: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct MenuSection {
    pub title: String,
    pub items: Vec<MenuItem>,
}

fn section(title: &str, items: &[(&str, &str)]) -> MenuSection {
    MenuSection {
        title: title.to_string(),
        items: items
            .iter()
            .map(|(label, link)| MenuItem {
                label: label.to_string(),
                link: link.to_string(),
            })
            .collect(),
    }
}

/// Profile menu for a role. Every role ends with the shared "More" section.
pub fn profile_menu(role: Role) -> Vec<MenuSection> {
    let mut sections = match role {
        Role::Farmer => vec![
            section(
                "Farm Management",
                &[
                    ("Dashboard", "/dashboard"),
                    ("My Farms", "/api/farms"),
                    ("My Listings", "/api/farmer-products"),
                ],
            ),
            section("Farm Monitoring", &[("AI Assistant", "/chatbot")]),
        ],
        Role::Admin => vec![section(
            "Administration",
            &[
                ("Admin Panel", "/admin"),
                ("Farmers", "/api/admin/farmers"),
            ],
        )],
        Role::User => vec![section(
            "Food Orders",
            &[("Shop", "/shop"), ("Your Cart", "/cart")],
        )],
    };
    sections.push(section(
        "More",
        &[("Help", "/chatbot"), ("Log out", "/api/auth/logout")],
    ));
    sections
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ProfilePage {
    pub user: User,
    pub menu: Vec<MenuSection>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct DashboardPage {
    pub dashboard: Dashboard,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct AdminPage {
    pub stats: FarmerStats,
    /// Where the farmer list and review actions live.
    pub farmers_endpoint: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ChatbotPage {
    pub endpoint: String,
    pub method: String,
    pub greeting: String,
}

impl ChatbotPage {
    pub fn new() -> Self {
        Self {
            endpoint: "/chat".to_string(),
            method: "POST".to_string(),
            greeting: format!("Hi! I'm the {BRAND} assistant. How can I help you today?"),
        }
    }
}

impl Default for ChatbotPage {
    fn default() -> Self {
        Self::new()
    }
}
