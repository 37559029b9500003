use rust_decimal::Decimal;
use sqlx::PgPool;

use crate::promotions::error::PromotionError;
use crate::promotions::models::{Promotion, PromotionKind, PromotionRow, Visibility};

/// Repository for promotion operations
#[derive(Clone)]
pub struct PromotionsRepository {
    pool: PgPool,
}

impl PromotionsRepository {
    /// Create a new PromotionsRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Insert a promotion for a product
    ///
    /// The kind columns are split out of [`PromotionKind`] so exactly one
    /// kind's fields are written; the table's CHECK constraint backs this up.
    pub async fn create(
        &self,
        product_id: i32,
        name: &str,
        kind: &PromotionKind,
        visibility: Visibility,
    ) -> Result<Promotion, PromotionError> {
        let (discount_percentage, buy_quantity, get_quantity): (
            Option<Decimal>,
            Option<i32>,
            Option<i32>,
        ) = match kind {
            PromotionKind::Percentage {
                discount_percentage,
            } => (Some(*discount_percentage), None, None),
            PromotionKind::BuyXGetYFree {
                buy_quantity,
                get_quantity,
            } => (None, Some(*buy_quantity), Some(*get_quantity)),
        };

        let row = sqlx::query_as::<_, PromotionRow>(
            r#"
            INSERT INTO promotions
                (product_id, name, promotion_type, discount_percentage,
                 buy_quantity, get_quantity, visibility)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING id, product_id, name, promotion_type, discount_percentage,
                      buy_quantity, get_quantity, visibility, created_at, updated_at
            "#,
        )
        .bind(product_id)
        .bind(name)
        .bind(kind.type_name())
        .bind(discount_percentage)
        .bind(buy_quantity)
        .bind(get_quantity)
        .bind(visibility)
        .fetch_one(&self.pool)
        .await?;

        Promotion::try_from(row).map_err(PromotionError::DatabaseError)
    }

    /// Find a promotion by ID
    pub async fn find_by_id(&self, id: i32) -> Result<Option<Promotion>, PromotionError> {
        let row = sqlx::query_as::<_, PromotionRow>(
            r#"
            SELECT id, product_id, name, promotion_type, discount_percentage,
                   buy_quantity, get_quantity, visibility, created_at, updated_at
            FROM promotions
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        row.map(|row| Promotion::try_from(row).map_err(PromotionError::DatabaseError))
            .transpose()
    }

    /// Find all promotions for a product, ordered by id
    pub async fn find_by_product(
        &self,
        product_id: i32,
    ) -> Result<Vec<Promotion>, PromotionError> {
        let rows = sqlx::query_as::<_, PromotionRow>(
            r#"
            SELECT id, product_id, name, promotion_type, discount_percentage,
                   buy_quantity, get_quantity, visibility, created_at, updated_at
            FROM promotions
            WHERE product_id = $1
            ORDER BY id
            "#,
        )
        .bind(product_id)
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter()
            .map(|row| Promotion::try_from(row).map_err(PromotionError::DatabaseError))
            .collect()
    }

    /// Update a promotion's visibility
    pub async fn set_visibility(
        &self,
        id: i32,
        visibility: Visibility,
    ) -> Result<Promotion, PromotionError> {
        let row = sqlx::query_as::<_, PromotionRow>(
            r#"
            UPDATE promotions
            SET visibility = $1, updated_at = NOW()
            WHERE id = $2
            RETURNING id, product_id, name, promotion_type, discount_percentage,
                      buy_quantity, get_quantity, visibility, created_at, updated_at
            "#,
        )
        .bind(visibility)
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or(PromotionError::NotFound)?;

        Promotion::try_from(row).map_err(PromotionError::DatabaseError)
    }
}

#[cfg(test)]
mod tests {
    // Repository methods run against a live database and are covered by the
    // integration test suite; the row-to-domain conversion they rely on is
    // tested in promotions::models.
}
