// Catalog store seam for the pricing engine
//
// Pricing consumes products and promotions read-only through this trait. The
// production implementation queries Postgres; tests use the in-memory
// implementation below. Reads are not transactional: a promotion or price
// edited between quotation and order commit is not detected here, callers
// that care must re-validate at commit time.

use rust_decimal::Decimal;
use sqlx::PgPool;

use crate::pricing::error::{PricingError, PricingResult};
use crate::promotions::{Promotion, PromotionRow};

/// Product projection consumed by the pricing engine
#[derive(Debug, Clone)]
pub struct ProductView {
    pub id: i32,
    pub name: String,
    pub is_visible: bool,
    pub sizes: Vec<SizeView>,
}

/// One priced size variant of a product
#[derive(Debug, Clone)]
pub struct SizeView {
    pub label: String,
    pub unit_price: Decimal,
}

/// Read-only access to products and promotions
///
/// All lookups are async and may fail with `PricingError::Lookup`, which the
/// line pricer records as a line-level error.
#[allow(async_fn_in_trait)]
pub trait CatalogStore {
    /// Resolve a product with its size variants
    async fn find_product(&self, id: i32) -> PricingResult<Option<ProductView>>;

    /// Resolve a promotion by id regardless of visibility
    async fn find_promotion(&self, id: i32) -> PricingResult<Option<Promotion>>;

    /// Visible promotions bound to a product, ordered by ascending id
    async fn visible_promotions_for(&self, product_id: i32) -> PricingResult<Vec<Promotion>>;
}

/// Postgres-backed catalog store
#[derive(Clone)]
pub struct PgCatalogStore {
    pool: PgPool,
}

impl PgCatalogStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

impl CatalogStore for PgCatalogStore {
    async fn find_product(&self, id: i32) -> PricingResult<Option<ProductView>> {
        let row: Option<(i32, String, bool)> =
            sqlx::query_as("SELECT id, name, is_visible FROM products WHERE id = $1")
                .bind(id)
                .fetch_optional(&self.pool)
                .await?;

        let Some((id, name, is_visible)) = row else {
            return Ok(None);
        };

        let sizes: Vec<(String, Decimal)> = sqlx::query_as(
            "SELECT label, unit_price FROM product_sizes WHERE product_id = $1 ORDER BY id",
        )
        .bind(id)
        .fetch_all(&self.pool)
        .await?;

        Ok(Some(ProductView {
            id,
            name,
            is_visible,
            sizes: sizes
                .into_iter()
                .map(|(label, unit_price)| SizeView { label, unit_price })
                .collect(),
        }))
    }

    async fn find_promotion(&self, id: i32) -> PricingResult<Option<Promotion>> {
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

        row.map(|row| Promotion::try_from(row).map_err(PricingError::Lookup))
            .transpose()
    }

    async fn visible_promotions_for(&self, product_id: i32) -> PricingResult<Vec<Promotion>> {
        let rows = sqlx::query_as::<_, PromotionRow>(
            r#"
            SELECT id, product_id, name, promotion_type, discount_percentage,
                   buy_quantity, get_quantity, visibility, created_at, updated_at
            FROM promotions
            WHERE product_id = $1 AND visibility = 'visible'
            ORDER BY id
            "#,
        )
        .bind(product_id)
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter()
            .map(|row| Promotion::try_from(row).map_err(PricingError::Lookup))
            .collect()
    }
}
