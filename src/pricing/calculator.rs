// Cart Pricing Aggregator
//
// Runs the line pricer over every cart line, isolating failures per line,
// and sums the non-errored line totals into the cart total. Lines are
// mutually independent; a failing line never blocks or reduces the rest.

use rust_decimal::Decimal;

use crate::pricing::line_pricer::CartLinePricer;
use crate::pricing::models::{CalculationResult, CartLine};
use crate::pricing::store::CatalogStore;
use crate::pricing::strategy::round_money;

/// Calculates a whole cart against a catalog store
#[derive(Clone)]
pub struct CartCalculator<S: CatalogStore> {
    pricer: CartLinePricer<S>,
}

impl<S: CatalogStore> CartCalculator<S> {
    pub fn new(store: S) -> Self {
        Self {
            pricer: CartLinePricer::new(store),
        }
    }

    /// Price every line and total the cart
    ///
    /// Output order and cardinality match the input exactly. Each line total
    /// is already rounded; the grand total is the exact Decimal sum of those
    /// rounded totals, rounded once at the end. Re-rounding the sum of
    /// per-line-rounded values can differ from rounding the unrounded sum by
    /// up to a cent per line; that drift is the contract, matching what each
    /// line displays.
    pub async fn calculate(&self, lines: &[CartLine]) -> CalculationResult {
        let mut priced = Vec::with_capacity(lines.len());
        for line in lines {
            priced.push(self.pricer.price_line(line).await);
        }

        let total: Decimal = priced
            .iter()
            .filter(|line| line.error.is_none())
            .map(|line| line.line_total)
            .sum();

        tracing::debug!(
            "Calculated cart: {} lines, {} errored, total {}",
            priced.len(),
            priced.iter().filter(|l| l.error.is_some()).count(),
            total
        );

        CalculationResult {
            lines: priced,
            total: round_money(total),
        }
    }
}
