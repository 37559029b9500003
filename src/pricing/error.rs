// Error types for the Pricing & Offer Calculation Engine
//
// Every variant here is recovered at the line level: the cart aggregator
// converts it into the priced line's error field and keeps going. Nothing in
// this enum escapes `CartCalculator::calculate` as an Err.

use thiserror::Error;

/// Line-level pricing failure
#[derive(Debug, Error)]
pub enum PricingError {
    /// Quantity was zero or negative
    #[error("Quantity must be positive, got {0}")]
    InvalidQuantity(i32),

    /// Explicitly requested promotion does not exist
    #[error("Promotion {0} not found")]
    PromotionNotFound(i32),

    /// Explicitly requested promotion exists but is hidden
    #[error("Promotion {0} is not available")]
    PromotionNotAvailable(i32),

    /// Explicitly requested promotion is bound to a different product
    #[error("Promotion {promotion_id} does not apply to product {product_id}")]
    PromotionProductMismatch { promotion_id: i32, product_id: i32 },

    /// Neither the line nor an explicit promotion supplied a product id
    #[error("A product id is required to price this line")]
    ProductIdRequired,

    /// Product id did not resolve
    #[error("Product {0} not found")]
    ProductNotFound(i32),

    /// Product exists but is not visible
    #[error("Product {0} is not available")]
    ProductUnavailable(i32),

    /// Product has multiple size variants and the line named none
    #[error("Product {0} has multiple sizes, a size label is required")]
    SizeRequired(i32),

    /// No size variant matched the requested label
    #[error("Size '{label}' not found for product {product_id}")]
    SizeNotFound { product_id: i32, label: String },

    /// Product has no size variants and therefore no unit price
    #[error("Product {0} has no priced sizes")]
    NoPriceAvailable(i32),

    /// External store I/O failure, wrapped as a line-level error
    #[error("Lookup failed: {0}")]
    Lookup(String),
}

impl From<sqlx::Error> for PricingError {
    fn from(err: sqlx::Error) -> Self {
        PricingError::Lookup(err.to_string())
    }
}

/// Result type alias for pricing operations
pub type PricingResult<T> = Result<T, PricingError>;
