// Promotion Resolver
//
// Selects the single promotion to apply to a cart line: either validates an
// explicitly requested one, or auto-discovers among the product's visible
// promotions. Auto-discovery tie-break is fixed: the lowest promotion id
// wins, regardless of store ordering.

use crate::pricing::error::{PricingError, PricingResult};
use crate::pricing::store::CatalogStore;
use crate::promotions::{Promotion, Visibility};

/// Resolve the promotion for a line, if any
///
/// With an explicit id: the promotion must exist, be visible, and be bound
/// to the line's product (a line without a product id adopts the promotion's
/// product instead). Without one: the lowest-id visible promotion for the
/// line's product, or none. Never mutates promotion state.
pub async fn resolve_promotion<S: CatalogStore>(
    store: &S,
    line_product_id: Option<i32>,
    explicit_promotion_id: Option<i32>,
) -> PricingResult<Option<Promotion>> {
    if let Some(promotion_id) = explicit_promotion_id {
        let promotion = store
            .find_promotion(promotion_id)
            .await?
            .ok_or(PricingError::PromotionNotFound(promotion_id))?;

        if promotion.visibility != Visibility::Visible {
            return Err(PricingError::PromotionNotAvailable(promotion_id));
        }

        if let Some(product_id) = line_product_id {
            if promotion.product_id != product_id {
                return Err(PricingError::PromotionProductMismatch {
                    promotion_id,
                    product_id,
                });
            }
        }

        return Ok(Some(promotion));
    }

    let Some(product_id) = line_product_id else {
        // No product and no explicit promotion: the line pricer reports
        // ProductIdRequired when it cannot determine a product either.
        return Ok(None);
    };

    let candidates = store.visible_promotions_for(product_id).await?;
    Ok(candidates.into_iter().min_by_key(|p| p.id))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pricing::store::testing::InMemoryCatalog;
    use crate::promotions::PromotionKind;
    use rust_decimal_macros::dec;

    fn percentage(id: i32, product_id: i32, visibility: Visibility) -> Promotion {
        Promotion {
            id,
            product_id,
            name: format!("Promo {}", id),
            kind: PromotionKind::Percentage {
                discount_percentage: dec!(10),
            },
            visibility,
        }
    }

    #[tokio::test]
    async fn test_explicit_promotion_not_found() {
        let store = InMemoryCatalog::new();
        let err = resolve_promotion(&store, Some(1), Some(42))
            .await
            .unwrap_err();
        assert!(matches!(err, PricingError::PromotionNotFound(42)));
    }

    #[tokio::test]
    async fn test_explicit_hidden_promotion_not_available() {
        let store =
            InMemoryCatalog::new().with_promotion(percentage(5, 1, Visibility::Hidden));
        let err = resolve_promotion(&store, Some(1), Some(5)).await.unwrap_err();
        assert!(matches!(err, PricingError::PromotionNotAvailable(5)));
    }

    #[tokio::test]
    async fn test_explicit_promotion_product_mismatch() {
        let store =
            InMemoryCatalog::new().with_promotion(percentage(5, 2, Visibility::Visible));
        let err = resolve_promotion(&store, Some(1), Some(5)).await.unwrap_err();
        assert!(matches!(
            err,
            PricingError::PromotionProductMismatch {
                promotion_id: 5,
                product_id: 1
            }
        ));
    }

    #[tokio::test]
    async fn test_line_without_product_adopts_promotion_product() {
        let store =
            InMemoryCatalog::new().with_promotion(percentage(5, 2, Visibility::Visible));
        let resolved = resolve_promotion(&store, None, Some(5))
            .await
            .expect("resolves")
            .expect("promotion present");
        assert_eq!(resolved.product_id, 2);
    }

    #[tokio::test]
    async fn test_auto_discovery_picks_lowest_id() {
        // Inserted high id first; the resolver must still pick the lowest id.
        let store = InMemoryCatalog::new()
            .with_promotion(percentage(9, 1, Visibility::Visible))
            .with_promotion(percentage(3, 1, Visibility::Visible))
            .with_promotion(percentage(7, 1, Visibility::Visible));

        let resolved = resolve_promotion(&store, Some(1), None)
            .await
            .expect("resolves")
            .expect("promotion present");
        assert_eq!(resolved.id, 3);
    }

    #[tokio::test]
    async fn test_auto_discovery_ignores_hidden_and_other_products() {
        let store = InMemoryCatalog::new()
            .with_promotion(percentage(1, 1, Visibility::Hidden))
            .with_promotion(percentage(2, 2, Visibility::Visible));

        let resolved = resolve_promotion(&store, Some(1), None).await.expect("resolves");
        assert!(resolved.is_none());
    }

    #[tokio::test]
    async fn test_no_product_and_no_explicit_promotion_resolves_none() {
        let store = InMemoryCatalog::new();
        let resolved = resolve_promotion(&store, None, None).await.expect("resolves");
        assert!(resolved.is_none());
    }
}
