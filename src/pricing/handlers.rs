// HTTP handler for the cart calculation endpoint

use axum::{extract::State, Json};

use crate::pricing::calculator::CartCalculator;
use crate::pricing::models::{CalculateCartRequest, CalculationResult};
use crate::pricing::store::PgCatalogStore;

/// Handler for POST /api/cart/calculate
///
/// Prices every line of the submitted cart and returns one priced line per
/// input line plus the cart total. Performs no writes; per-line failures are
/// reported in each line's error field, so the response is always 200.
pub async fn calculate_cart_handler(
    State(state): State<crate::AppState>,
    Json(request): Json<CalculateCartRequest>,
) -> Json<CalculationResult> {
    tracing::debug!("Calculating cart with {} lines", request.lines.len());

    let calculator = CartCalculator::new(PgCatalogStore::new(state.db.clone()));
    let result = calculator.calculate(&request.lines).await;

    Json(result)
}
