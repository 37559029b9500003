use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::pricing::error::PricingError;

/// One requested cart entry to be priced
///
/// `product_id` may be omitted when an explicit `promotion_id` is given; the
/// promotion's own product binding then determines what is priced. `color` is
/// carried through untouched.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CartLine {
    pub product_id: Option<i32>,
    pub promotion_id: Option<i32>,
    pub quantity: i32,
    pub size: Option<String>,
    pub color: Option<String>,
}

/// Request DTO for the cart calculation endpoint
#[derive(Debug, Deserialize, Validate)]
pub struct CalculateCartRequest {
    pub lines: Vec<CartLine>,
}

/// The computed result of pricing one cart line
///
/// A line with a non-null `error` carries zero-valued price fields and no
/// promotion; it is never dropped from the result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PricedLine {
    pub product_id: Option<i32>,
    pub product_name: Option<String>,
    pub quantity: i32,
    /// Base price per unit, rounded to 2 decimal places
    pub unit_price: Decimal,
    /// Displayed per-unit price after promotion, rounded to 2 decimal places
    pub final_unit_price: Decimal,
    /// Line total after promotion, rounded half-up to 2 decimal places
    pub line_total: Decimal,
    pub promotion_id: Option<i32>,
    pub promotion_name: Option<String>,
    pub size: Option<String>,
    pub color: Option<String>,
    pub error: Option<String>,
}

impl PricedLine {
    /// Build the zero-valued line emitted when pricing fails
    ///
    /// Echoes the identifying input fields so the caller can correlate the
    /// failure with its request.
    pub fn errored(line: &CartLine, err: &PricingError) -> Self {
        Self {
            product_id: line.product_id,
            product_name: None,
            quantity: line.quantity,
            unit_price: Decimal::ZERO,
            final_unit_price: Decimal::ZERO,
            line_total: Decimal::ZERO,
            promotion_id: None,
            promotion_name: None,
            size: line.size.clone(),
            color: line.color.clone(),
            error: Some(err.to_string()),
        }
    }
}

/// Ordered priced lines plus the cart total
///
/// One entry per input line, in input order; `total` sums only the lines
/// whose `error` is null.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalculationResult {
    pub lines: Vec<PricedLine>,
    pub total: Decimal,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_cart_line_deserialization_minimal() {
        let json = r#"{"product_id": 3, "quantity": 2}"#;
        let line: CartLine = serde_json::from_str(json).expect("Failed to deserialize CartLine");

        assert_eq!(line.product_id, Some(3));
        assert_eq!(line.promotion_id, None);
        assert_eq!(line.quantity, 2);
        assert_eq!(line.size, None);
        assert_eq!(line.color, None);
    }

    #[test]
    fn test_errored_line_echoes_input_and_zeroes_amounts() {
        let line = CartLine {
            product_id: Some(9),
            promotion_id: Some(4),
            quantity: 3,
            size: Some("L".to_string()),
            color: Some("black".to_string()),
        };

        let priced = PricedLine::errored(&line, &PricingError::ProductNotFound(9));

        assert_eq!(priced.product_id, Some(9));
        assert_eq!(priced.quantity, 3);
        assert_eq!(priced.size.as_deref(), Some("L"));
        assert_eq!(priced.color.as_deref(), Some("black"));
        assert_eq!(priced.unit_price, dec!(0));
        assert_eq!(priced.final_unit_price, dec!(0));
        assert_eq!(priced.line_total, dec!(0));
        assert_eq!(priced.promotion_id, None);
        assert_eq!(priced.promotion_name, None);
        assert_eq!(priced.error.as_deref(), Some("Product 9 not found"));
    }
}
