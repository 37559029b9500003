// Cart Line Pricer
//
// Prices one cart line end to end: quantity check, promotion resolution,
// unit-price lookup, discount application, rounding. Never returns an error;
// every failure mode becomes the emitted line's error field so one bad line
// cannot abort a batch.

use rust_decimal::Decimal;

use crate::pricing::error::{PricingError, PricingResult};
use crate::pricing::models::{CartLine, PricedLine};
use crate::pricing::price_lookup::resolve_unit_price;
use crate::pricing::resolver::resolve_promotion;
use crate::pricing::store::CatalogStore;
use crate::pricing::strategy::{round_money, DiscountOutcome};
use crate::promotions::{Promotion, PromotionKind};

/// Prices individual cart lines against a catalog store
#[derive(Clone)]
pub struct CartLinePricer<S: CatalogStore> {
    store: S,
}

impl<S: CatalogStore> CartLinePricer<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Price one line, capturing any failure into the output
    pub async fn price_line(&self, line: &CartLine) -> PricedLine {
        match self.try_price(line).await {
            Ok(priced) => priced,
            Err(err) => {
                tracing::debug!("Line pricing failed: {}", err);
                PricedLine::errored(line, &err)
            }
        }
    }

    async fn try_price(&self, line: &CartLine) -> PricingResult<PricedLine> {
        if line.quantity <= 0 {
            return Err(PricingError::InvalidQuantity(line.quantity));
        }

        // A resolution failure terminates the line; there is no fallback to
        // unpromoted pricing for an explicitly requested promotion.
        let promotion =
            resolve_promotion(&self.store, line.product_id, line.promotion_id).await?;

        let product_id = line
            .product_id
            .or(promotion.as_ref().map(|p| p.product_id))
            .ok_or(PricingError::ProductIdRequired)?;

        let product = self
            .store
            .find_product(product_id)
            .await?
            .ok_or(PricingError::ProductNotFound(product_id))?;

        let unit_price = resolve_unit_price(&product, line.size.as_deref())?;
        let quantity = Decimal::from(line.quantity);

        let outcome = match &promotion {
            Some(promo) => promo.kind.apply(unit_price, line.quantity),
            None => DiscountOutcome::unchanged(unit_price * quantity),
        };
        let applied = promotion.as_ref().filter(|_| outcome.applied);

        let line_total = round_money(outcome.final_amount);
        let final_unit_price = displayed_unit_price(applied, unit_price, line_total, quantity);

        Ok(PricedLine {
            product_id: Some(product.id),
            product_name: Some(product.name),
            quantity: line.quantity,
            unit_price: round_money(unit_price),
            final_unit_price,
            line_total,
            promotion_id: applied.map(|p| p.id),
            promotion_name: applied.map(|p| p.name.clone()),
            size: line.size.clone(),
            color: line.color.clone(),
            error: None,
        })
    }
}

/// Per-unit price shown on the line
///
/// Normally the rounded line total divided by quantity. For an applied
/// buy-X-get-Y-free promotion the base unit price is shown instead: the
/// discount lives only in the line total, a BOGO "price per unit" is not
/// economically meaningful.
fn displayed_unit_price(
    applied: Option<&Promotion>,
    unit_price: Decimal,
    line_total: Decimal,
    quantity: Decimal,
) -> Decimal {
    match applied {
        Some(promo) if matches!(promo.kind, PromotionKind::BuyXGetYFree { .. }) => {
            round_money(unit_price)
        }
        _ => round_money(line_total / quantity),
    }
}
