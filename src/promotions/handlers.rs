// HTTP handlers for promotion endpoints

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use validator::Validate;

use crate::promotions::{
    CreatePromotionRequest, Promotion, PromotionError, PromotionsRepository,
    UpdateVisibilityRequest,
};

/// Handler for POST /api/promotions
/// Creates a promotion for a product, enforcing the kind invariant on write
pub async fn create_promotion_handler(
    State(state): State<crate::AppState>,
    Json(request): Json<CreatePromotionRequest>,
) -> Result<(StatusCode, Json<Promotion>), PromotionError> {
    request
        .validate()
        .map_err(|e| PromotionError::ValidationError(e.to_string()))?;

    let kind = request
        .resolve_kind()
        .map_err(PromotionError::InvalidDefinition)?;

    // The promotion must reference an existing product.
    let product_exists: Option<bool> =
        sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM products WHERE id = $1)")
            .bind(request.product_id)
            .fetch_one(&state.db)
            .await?;
    if !product_exists.unwrap_or(false) {
        return Err(PromotionError::ProductNotFound(request.product_id));
    }

    let repo = PromotionsRepository::new(state.db.clone());
    let promotion = repo
        .create(request.product_id, &request.name, &kind, request.visibility)
        .await?;

    tracing::info!(
        "Created {} promotion {} for product {}",
        promotion.kind.type_name(),
        promotion.id,
        promotion.product_id
    );
    Ok((StatusCode::CREATED, Json(promotion)))
}

/// Handler for GET /api/products/{product_id}/promotions
/// Lists all promotions bound to a product, visible or not
pub async fn get_product_promotions_handler(
    State(state): State<crate::AppState>,
    Path(product_id): Path<i32>,
) -> Result<Json<Vec<Promotion>>, PromotionError> {
    let repo = PromotionsRepository::new(state.db.clone());
    let promotions = repo.find_by_product(product_id).await?;

    Ok(Json(promotions))
}

/// Handler for PATCH /api/promotions/{id}/visibility
/// Toggles whether a promotion is eligible for application
pub async fn update_promotion_visibility_handler(
    State(state): State<crate::AppState>,
    Path(id): Path<i32>,
    Json(request): Json<UpdateVisibilityRequest>,
) -> Result<Json<Promotion>, PromotionError> {
    let repo = PromotionsRepository::new(state.db.clone());
    let promotion = repo.set_visibility(id, request.visibility).await?;

    tracing::info!(
        "Promotion {} visibility set to {}",
        promotion.id,
        promotion.visibility
    );
    Ok(Json(promotion))
}
