// Validation utilities module
// Provides custom validation functions for domain-specific rules

use rust_decimal::Decimal;
use validator::ValidationError;

/// Validates that a monetary price is strictly positive
pub fn validate_positive_price(price: &Decimal) -> Result<(), ValidationError> {
    if *price <= Decimal::ZERO {
        let mut err = ValidationError::new("price_must_be_positive");
        err.message = Some("Unit price must be a positive number".into());
        Err(err)
    } else {
        Ok(())
    }
}

/// Validates that a discount percentage is in (0, 100]
pub fn validate_discount_percentage(pct: &Decimal) -> Result<(), ValidationError> {
    if *pct > Decimal::ZERO && *pct <= Decimal::from(100) {
        Ok(())
    } else {
        Err(ValidationError::new("percentage_out_of_range"))
    }
}
