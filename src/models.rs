use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

/// Represents a catalog product in the database
///
/// A product carries name/visibility metadata; its unit prices live on the
/// associated size variants (see [`SizeVariant`]). A product that is not
/// visible cannot be priced.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Product {
    #[schema(example = 1)]
    pub id: i32,
    #[schema(example = "Classic Hoodie")]
    pub name: String,
    #[schema(example = "https://cdn.example.com/hoodie.png")]
    pub image_url: Option<String>,
    #[schema(example = true)]
    pub is_visible: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A (label, unit price) variant of a product
///
/// A product with exactly one variant is priceable without naming a size;
/// with more than one, the caller must disambiguate by label.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct SizeVariant {
    #[schema(example = 10)]
    pub id: i32,
    #[schema(example = 1)]
    pub product_id: i32,
    #[schema(example = "M")]
    pub label: String,
    /// Unit price for this variant, always > 0
    #[schema(value_type = f64, example = 29.99)]
    pub unit_price: Decimal,
}

/// Request DTO for one size variant of a new product
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CreateSizeVariant {
    #[validate(length(min = 1, message = "Size label must not be empty"))]
    #[schema(example = "M")]
    pub label: String,
    #[validate(custom = "crate::validation::validate_positive_price")]
    #[schema(value_type = f64, example = 29.99)]
    pub unit_price: Decimal,
}

/// Request DTO for creating a new product with its size variants
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CreateProduct {
    #[validate(length(min = 1, message = "Product name must not be empty"))]
    #[schema(example = "Classic Hoodie")]
    pub name: String,
    #[schema(example = "https://cdn.example.com/hoodie.png")]
    pub image_url: Option<String>,
    #[serde(default = "default_visible")]
    #[schema(example = true)]
    pub is_visible: bool,
    #[validate]
    pub sizes: Vec<CreateSizeVariant>,
}

fn default_visible() -> bool {
    true
}

/// Response DTO for a product together with its size variants
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ProductResponse {
    #[schema(example = 1)]
    pub id: i32,
    #[schema(example = "Classic Hoodie")]
    pub name: String,
    #[schema(example = "https://cdn.example.com/hoodie.png")]
    pub image_url: Option<String>,
    #[schema(example = true)]
    pub is_visible: bool,
    pub sizes: Vec<SizeVariant>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl ProductResponse {
    pub fn from_parts(product: Product, sizes: Vec<SizeVariant>) -> Self {
        Self {
            id: product.id,
            name: product.name,
            image_url: product.image_url,
            is_visible: product.is_visible,
            sizes,
            created_at: product.created_at,
            updated_at: product.updated_at,
        }
    }
}
