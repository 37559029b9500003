use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

/// Promotion visibility state
///
/// Only visible promotions are eligible for automatic application; a hidden
/// promotion cannot be applied even when requested explicitly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "text", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum Visibility {
    Visible,
    Hidden,
}

impl Visibility {
    /// Convert visibility to string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            Visibility::Visible => "visible",
            Visibility::Hidden => "hidden",
        }
    }

    /// Parse visibility from string
    pub fn from_str(s: &str) -> Result<Self, String> {
        match s.to_lowercase().as_str() {
            "visible" => Ok(Visibility::Visible),
            "hidden" => Ok(Visibility::Hidden),
            _ => Err(format!("Invalid visibility: {}", s)),
        }
    }
}

impl Default for Visibility {
    fn default() -> Self {
        Visibility::Visible
    }
}

impl std::fmt::Display for Visibility {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// The discount rule carried by a promotion
///
/// Exactly one of the two kinds is populated per promotion; the write side
/// and a database CHECK constraint enforce this.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "promotion_type", rename_all = "snake_case")]
pub enum PromotionKind {
    /// Percentage off the line's original amount, pct in (0, 100]
    Percentage { discount_percentage: Decimal },
    /// Every `buy_quantity` paid units grant `get_quantity` free ones
    #[serde(rename = "buy_x_get_y")]
    BuyXGetYFree {
        buy_quantity: i32,
        get_quantity: i32,
    },
}

impl PromotionKind {
    /// Wire name of the kind, matching the `promotion_type` column
    pub fn type_name(&self) -> &'static str {
        match self {
            PromotionKind::Percentage { .. } => "percentage",
            PromotionKind::BuyXGetYFree { .. } => "buy_x_get_y",
        }
    }
}

/// Domain model for a promotion bound to one product
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Promotion {
    pub id: i32,
    pub product_id: i32,
    pub name: String,
    #[serde(flatten)]
    pub kind: PromotionKind,
    pub visibility: Visibility,
}

/// Raw promotion row as stored, before the kind columns are folded into
/// [`PromotionKind`]
#[derive(Debug, Clone, FromRow)]
pub struct PromotionRow {
    pub id: i32,
    pub product_id: i32,
    pub name: String,
    pub promotion_type: String,
    pub discount_percentage: Option<Decimal>,
    pub buy_quantity: Option<i32>,
    pub get_quantity: Option<i32>,
    pub visibility: Visibility,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl TryFrom<PromotionRow> for Promotion {
    type Error = String;

    fn try_from(row: PromotionRow) -> Result<Self, Self::Error> {
        let kind = match row.promotion_type.as_str() {
            "percentage" => PromotionKind::Percentage {
                discount_percentage: row
                    .discount_percentage
                    .ok_or_else(|| format!("Promotion {} is missing discount_percentage", row.id))?,
            },
            "buy_x_get_y" => PromotionKind::BuyXGetYFree {
                buy_quantity: row
                    .buy_quantity
                    .ok_or_else(|| format!("Promotion {} is missing buy_quantity", row.id))?,
                get_quantity: row
                    .get_quantity
                    .ok_or_else(|| format!("Promotion {} is missing get_quantity", row.id))?,
            },
            other => return Err(format!("Promotion {} has unknown type '{}'", row.id, other)),
        };

        Ok(Promotion {
            id: row.id,
            product_id: row.product_id,
            name: row.name,
            kind,
            visibility: row.visibility,
        })
    }
}

/// Request DTO for creating a promotion
///
/// Kind fields are deliberately all optional here; `resolve_kind` enforces
/// that exactly the fields of the declared type are present.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreatePromotionRequest {
    pub product_id: i32,
    #[validate(length(min = 1, message = "Promotion name must not be empty"))]
    pub name: String,
    pub promotion_type: String,
    pub discount_percentage: Option<Decimal>,
    pub buy_quantity: Option<i32>,
    pub get_quantity: Option<i32>,
    #[serde(default)]
    pub visibility: Visibility,
}

impl CreatePromotionRequest {
    /// Fold the raw kind fields into a validated [`PromotionKind`]
    ///
    /// Rejects requests that populate the other kind's fields, omit their own,
    /// or carry out-of-range values.
    pub fn resolve_kind(&self) -> Result<PromotionKind, String> {
        match self.promotion_type.as_str() {
            "percentage" => {
                if self.buy_quantity.is_some() || self.get_quantity.is_some() {
                    return Err(
                        "A percentage promotion must not set buy_quantity or get_quantity"
                            .to_string(),
                    );
                }
                let pct = self
                    .discount_percentage
                    .ok_or_else(|| "A percentage promotion requires discount_percentage".to_string())?;
                if crate::validation::validate_discount_percentage(&pct).is_err() {
                    return Err(format!(
                        "discount_percentage must be in (0, 100], got {}",
                        pct
                    ));
                }
                Ok(PromotionKind::Percentage {
                    discount_percentage: pct,
                })
            }
            "buy_x_get_y" => {
                if self.discount_percentage.is_some() {
                    return Err(
                        "A buy_x_get_y promotion must not set discount_percentage".to_string()
                    );
                }
                let buy = self
                    .buy_quantity
                    .ok_or_else(|| "A buy_x_get_y promotion requires buy_quantity".to_string())?;
                let get = self
                    .get_quantity
                    .ok_or_else(|| "A buy_x_get_y promotion requires get_quantity".to_string())?;
                if buy < 1 || get < 1 {
                    return Err(format!(
                        "buy_quantity and get_quantity must be at least 1, got buy={} get={}",
                        buy, get
                    ));
                }
                Ok(PromotionKind::BuyXGetYFree {
                    buy_quantity: buy,
                    get_quantity: get,
                })
            }
            other => Err(format!("Unknown promotion_type '{}'", other)),
        }
    }
}

/// Request DTO for toggling promotion visibility
#[derive(Debug, Deserialize)]
pub struct UpdateVisibilityRequest {
    pub visibility: Visibility,
}
