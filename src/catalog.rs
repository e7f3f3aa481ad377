//! Products sold in the shop. The catalog is compiled into the service; farmer
//! listings from the dashboard are managed separately.

use std::sync::LazyLock;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Fruits,
    Vegetables,
    Organic,
}

impl Category {
    pub const ALL: [Category; 3] = [Category::Fruits, Category::Vegetables, Category::Organic];

    pub fn label(&self) -> &'static str {
        match self {
            Category::Fruits => "Fruits",
            Category::Vegetables => "Vegetables",
            Category::Organic => "Organic",
        }
    }
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct Farmer {
    pub name: String,
    pub image: String,
    pub experience: String,
    pub farm_name: String,
    pub location: String,
    pub farming_type: String,
    pub certification: String,
    pub story: String,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct FarmingDetails {
    pub method: String,
    pub pesticides: String,
    pub fertilizers: String,
    pub irrigation: String,
    pub harvested_date: String,
    pub seasonality: String,
    pub storage_method: String,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct NutritionFacts {
    pub serving_size: String,
    pub calories: u32,
    pub protein: String,
    pub carbohydrates: String,
    pub fiber: String,
    pub vitamins: Vec<String>,
}

/// Shop product. `price` is in paise.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct CatalogProduct {
    pub id: u32,
    pub name: String,
    pub price: i64,
    pub unit: String,
    pub image: String,
    pub category: Category,
    pub description: String,
    pub farmer: Farmer,
    pub farming_details: FarmingDetails,
    pub nutrition_facts: NutritionFacts,
}

/// Filter used by the shop screen. A missing category means every category.
#[derive(Debug, Default, Clone, Deserialize, ToSchema)]
pub struct CatalogQuery {
    pub q: Option<String>,
    pub category: Option<Category>,
}

static PRODUCTS: LazyLock<Vec<CatalogProduct>> = LazyLock::new(build_catalog);

pub fn products() -> &'static [CatalogProduct] {
    &PRODUCTS
}

pub fn find(id: u32) -> Option<&'static CatalogProduct> {
    PRODUCTS.iter().find(|p| p.id == id)
}

/// Case-insensitive name search combined with the category filter.
pub fn search(query: &CatalogQuery) -> Vec<&'static CatalogProduct> {
    let needle = query
        .q
        .as_deref()
        .map(str::trim)
        .filter(|q| !q.is_empty())
        .map(str::to_lowercase);

    PRODUCTS
        .iter()
        .filter(|p| query.category.is_none_or(|c| p.category == c))
        .filter(|p| {
            needle
                .as_deref()
                .is_none_or(|n| p.name.to_lowercase().contains(n))
        })
        .collect()
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

#[allow(clippy::too_many_arguments)]
fn farmer(
    name: &str,
    image: &str,
    experience: &str,
    farm_name: &str,
    location: &str,
    farming_type: &str,
    certification: &str,
    story: &str,
) -> Farmer {
    Farmer {
        name: name.into(),
        image: image.into(),
        experience: experience.into(),
        farm_name: farm_name.into(),
        location: location.into(),
        farming_type: farming_type.into(),
        certification: certification.into(),
        story: story.into(),
    }
}

fn details(
    method: &str,
    pesticides: &str,
    fertilizers: &str,
    irrigation: &str,
    harvested_date: &str,
    seasonality: &str,
    storage_method: &str,
) -> FarmingDetails {
    FarmingDetails {
        method: method.into(),
        pesticides: pesticides.into(),
        fertilizers: fertilizers.into(),
        irrigation: irrigation.into(),
        harvested_date: harvested_date.into(),
        seasonality: seasonality.into(),
        storage_method: storage_method.into(),
    }
}

fn nutrition(
    calories: u32,
    protein: &str,
    carbohydrates: &str,
    fiber: &str,
    vitamins: &[&str],
) -> NutritionFacts {
    NutritionFacts {
        serving_size: "100g".into(),
        calories,
        protein: protein.into(),
        carbohydrates: carbohydrates.into(),
        fiber: fiber.into(),
        vitamins: strings(vitamins),
    }
}

const IMG: &str = "https://images.unsplash.com";

fn build_catalog() -> Vec<CatalogProduct> {
    vec![
        CatalogProduct {
            id: 1,
            name: "Fresh Apples".into(),
            price: 99_00,
            unit: "1 kg".into(),
            image: format!("{IMG}/photo-1560806887-1e4cd0b6cbd6?auto=format&fit=crop&w=1000&q=80"),
            category: Category::Fruits,
            description: "Sweet and crispy apples, perfect for snacking or baking.".into(),
            farmer: farmer(
                "Rajesh Kumar",
                &format!("{IMG}/photo-1592878904946-b3cd8ae243d0?auto=format&fit=crop&w=300&q=80"),
                "15 years",
                "Green Valley Orchards",
                "Himachal Pradesh, India",
                "Organic",
                "NPOP Certified Organic",
                "Grows apples with organic methods handed down over generations, \
                 in an orchard 2,000 meters above sea level.",
            ),
            farming_details: details(
                "Traditional Organic",
                "None",
                "Natural compost and vermicompost",
                "Drip irrigation system",
                "2024-03-01",
                "September to March",
                "Temperature-controlled storage",
            ),
            nutrition_facts: nutrition(
                52,
                "0.3g",
                "14g",
                "2.4g",
                &["Vitamin C", "Vitamin B6", "Vitamin K"],
            ),
        },
        CatalogProduct {
            id: 2,
            name: "Organic Carrots".into(),
            price: 45_00,
            unit: "500 g".into(),
            image: format!("{IMG}/photo-1598170845058-32b9d6a5da37?auto=format&fit=crop&w=1000&q=80"),
            category: Category::Vegetables,
            description: "Farm-fresh organic carrots, rich in vitamins and minerals.".into(),
            farmer: farmer(
                "Priya Sharma",
                &format!("{IMG}/photo-1594167154836-838a4be99977?auto=format&fit=crop&w=300&q=80"),
                "8 years",
                "Sunshine Organic Farm",
                "Maharashtra, India",
                "Biodynamic",
                "Demeter Certified Biodynamic",
                "Moved from conventional to biodynamic farming for the sake of soil health; \
                 the farm is now a regional model for sustainable agriculture.",
            ),
            farming_details: details(
                "Biodynamic",
                "Natural pest control",
                "Biodynamic preparations",
                "Rainwater harvesting",
                "2024-03-10",
                "Year-round",
                "Cold storage",
            ),
            nutrition_facts: nutrition(
                41,
                "0.9g",
                "10g",
                "2.8g",
                &["Vitamin A", "Vitamin C", "Vitamin K"],
            ),
        },
        CatalogProduct {
            id: 3,
            name: "Green Grapes".into(),
            price: 149_00,
            unit: "500 g".into(),
            image: format!("{IMG}/photo-1537640538966-79f369143f8f?auto=format&fit=crop&w=1000&q=80"),
            category: Category::Fruits,
            description: "Juicy and sweet seedless green grapes.".into(),
            farmer: farmer(
                "Amit Patel",
                &format!("{IMG}/photo-1622030411594-c282a3f29cdb?auto=format&fit=crop&w=300&q=80"),
                "12 years",
                "Vineyard Paradise",
                "Nashik, Maharashtra",
                "Sustainable",
                "GlobalG.A.P. Certified",
                "Third-generation grape grower combining modern sustainable practice \
                 with long-standing quality standards.",
            ),
            farming_details: details(
                "Integrated Pest Management",
                "Minimal, targeted application",
                "Balanced organic and mineral",
                "Precision irrigation",
                "2024-03-05",
                "February to April",
                "Controlled atmosphere storage",
            ),
            nutrition_facts: nutrition(
                69,
                "0.7g",
                "18g",
                "0.9g",
                &["Vitamin C", "Vitamin K", "Vitamin B6"],
            ),
        },
        CatalogProduct {
            id: 4,
            name: "Fresh Tomatoes".into(),
            price: 60_00,
            unit: "500 g".into(),
            image: format!("{IMG}/photo-1592924357228-91a4daadcfea?auto=format&fit=crop&w=1000&q=80"),
            category: Category::Vegetables,
            description: "Vine-ripened tomatoes, perfect for salads and cooking.".into(),
            farmer: farmer(
                "Meera Reddy",
                &format!("{IMG}/photo-1595475207225-428b62bda831?auto=format&fit=crop&w=300&q=80"),
                "10 years",
                "Red Earth Farms",
                "Karnataka, India",
                "Hydroponic",
                "India Good Agricultural Practices (IndGAP)",
                "Introduced hydroponics to the region and showed neighbouring farmers \
                 that efficient farming can also be sustainable.",
            ),
            farming_details: details(
                "Hydroponic",
                "Biological control",
                "Balanced nutrient solution",
                "Recirculating system",
                "2024-03-12",
                "Year-round",
                "Room temperature",
            ),
            nutrition_facts: nutrition(
                18,
                "0.9g",
                "3.9g",
                "1.2g",
                &["Vitamin C", "Vitamin K", "Vitamin A", "Vitamin B6"],
            ),
        },
        CatalogProduct {
            id: 5,
            name: "Organic Spinach".into(),
            price: 40_00,
            unit: "250 g".into(),
            image: format!("{IMG}/photo-1576045057995-568f588f82fb?auto=format&fit=crop&w=1000&q=80"),
            category: Category::Vegetables,
            description: "Fresh, nutrient-rich organic spinach leaves.".into(),
            farmer: farmer(
                "Suresh Verma",
                &format!("{IMG}/photo-1595475207225-428b62bda831?auto=format&fit=crop&w=300&q=80"),
                "7 years",
                "Green Leaf Organics",
                "Uttarakhand, India",
                "Organic",
                "NPOP Certified Organic",
                "Left a corporate job for organic farming; the farm is now a benchmark \
                 for organic leafy vegetables.",
            ),
            farming_details: details(
                "Organic",
                "Neem-based solutions",
                "Vermicompost",
                "Drip irrigation",
                "2024-03-13",
                "October to March",
                "Refrigerated",
            ),
            nutrition_facts: nutrition(
                23,
                "2.9g",
                "3.6g",
                "2.2g",
                &["Vitamin K", "Vitamin A", "Vitamin C", "Vitamin E", "Folate"],
            ),
        },
        CatalogProduct {
            id: 6,
            name: "Sweet Mangoes".into(),
            price: 199_00,
            unit: "1 kg".into(),
            image: format!("{IMG}/photo-1553279768-865429fa0078?auto=format&fit=crop&w=1000&q=80"),
            category: Category::Fruits,
            description: "Premium Alphonso mangoes, known for their sweet taste and rich flavor."
                .into(),
            farmer: farmer(
                "Dinesh Pawar",
                &format!("{IMG}/photo-1595475207225-428b62bda831?auto=format&fit=crop&w=300&q=80"),
                "20 years",
                "Mango Haven",
                "Ratnagiri, Maharashtra",
                "Traditional",
                "GI Tagged Alphonso",
                "The family has grown Ratnagiri Alphonso mangoes for generations.",
            ),
            farming_details: details(
                "Traditional",
                "Minimal use",
                "Organic manure",
                "Basin irrigation",
                "2024-03-15",
                "March to May",
                "Controlled ripening chambers",
            ),
            nutrition_facts: nutrition(
                60,
                "0.8g",
                "15g",
                "1.6g",
                &["Vitamin A", "Vitamin C", "Vitamin B6", "Vitamin E"],
            ),
        },
    ]
}
