// Product Price Lookup
//
// Resolves a unit price from a product's size-variant list, optionally
// disambiguated by a size label. Label matching is on trimmed input and
// case-sensitive.

use rust_decimal::Decimal;

use crate::pricing::error::PricingError;
use crate::pricing::store::ProductView;

/// Resolve the unit price for a product and optional size label
///
/// Fails with `ProductUnavailable` for hidden products, `NoPriceAvailable`
/// for products without size variants, `SizeNotFound` on a label miss, and
/// `SizeRequired` when several variants exist but no label was given.
pub fn resolve_unit_price(
    product: &ProductView,
    size_label: Option<&str>,
) -> Result<Decimal, PricingError> {
    if !product.is_visible {
        return Err(PricingError::ProductUnavailable(product.id));
    }

    if product.sizes.is_empty() {
        return Err(PricingError::NoPriceAvailable(product.id));
    }

    match size_label {
        Some(label) => {
            let wanted = label.trim();
            product
                .sizes
                .iter()
                .find(|size| size.label.trim() == wanted)
                .map(|size| size.unit_price)
                .ok_or_else(|| PricingError::SizeNotFound {
                    product_id: product.id,
                    label: label.to_string(),
                })
        }
        None if product.sizes.len() > 1 => Err(PricingError::SizeRequired(product.id)),
        None => Ok(product.sizes[0].unit_price),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pricing::store::SizeView;
    use rust_decimal_macros::dec;

    fn product(sizes: Vec<SizeView>) -> ProductView {
        ProductView {
            id: 1,
            name: "Classic Hoodie".to_string(),
            is_visible: true,
            sizes,
        }
    }

    fn size(label: &str, price: Decimal) -> SizeView {
        SizeView {
            label: label.to_string(),
            unit_price: price,
        }
    }

    #[test]
    fn test_single_size_used_without_label() {
        let product = product(vec![size("One Size", dec!(12.00))]);
        let price = resolve_unit_price(&product, None).expect("single size prices implicitly");
        assert_eq!(price, dec!(12.00));
    }

    #[test]
    fn test_multiple_sizes_require_label() {
        let product = product(vec![size("M", dec!(29.99)), size("L", dec!(31.99))]);
        let err = resolve_unit_price(&product, None).unwrap_err();
        assert!(matches!(err, PricingError::SizeRequired(1)));
    }

    #[test]
    fn test_label_match_is_trimmed() {
        let product = product(vec![size("M", dec!(29.99)), size("L", dec!(31.99))]);
        let price = resolve_unit_price(&product, Some("  L ")).expect("trimmed label matches");
        assert_eq!(price, dec!(31.99));
    }

    #[test]
    fn test_label_match_is_case_sensitive() {
        let product = product(vec![size("M", dec!(29.99))]);
        let err = resolve_unit_price(&product, Some("m")).unwrap_err();
        assert!(matches!(err, PricingError::SizeNotFound { .. }));
    }

    #[test]
    fn test_hidden_product_is_unavailable() {
        let mut product = product(vec![size("M", dec!(29.99))]);
        product.is_visible = false;
        let err = resolve_unit_price(&product, Some("M")).unwrap_err();
        assert!(matches!(err, PricingError::ProductUnavailable(1)));
    }

    #[test]
    fn test_no_sizes_means_no_price() {
        let product = product(vec![]);
        let err = resolve_unit_price(&product, None).unwrap_err();
        assert!(matches!(err, PricingError::NoPriceAvailable(1)));
    }
}
