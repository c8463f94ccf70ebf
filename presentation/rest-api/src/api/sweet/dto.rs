use chrono::{DateTime, Utc};
use poem_openapi::Object;
use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;

use business::domain::sweet::model::{Sweet, SweetChanges};
use business::domain::sweet::value_objects::SweetPage;

/// JSON numbers arrive as `f64`; the domain works in exact decimals.
pub fn to_decimal(value: f64) -> Option<Decimal> {
    Decimal::try_from(value).ok()
}

pub fn to_number(value: Decimal) -> f64 {
    value.to_f64().unwrap_or_default()
}

#[derive(Debug, Clone, Object)]
#[oai(rename_all = "camelCase")]
pub struct CreateSweetRequest {
    /// Display name (cannot be empty)
    pub name: String,
    /// Category (cannot be empty)
    pub category: String,
    /// Unit price, never negative
    pub price: f64,
    /// Units in stock, never negative
    pub quantity: i32,
    #[oai(skip_serializing_if_is_none)]
    pub description: Option<String>,
    #[oai(skip_serializing_if_is_none)]
    pub image_url: Option<String>,
}

/// Partial update: omitted fields keep their stored value.
#[derive(Debug, Clone, Object)]
#[oai(rename_all = "camelCase")]
pub struct UpdateSweetRequest {
    #[oai(skip_serializing_if_is_none)]
    pub name: Option<String>,
    #[oai(skip_serializing_if_is_none)]
    pub category: Option<String>,
    #[oai(skip_serializing_if_is_none)]
    pub price: Option<f64>,
    #[oai(skip_serializing_if_is_none)]
    pub quantity: Option<i32>,
    #[oai(skip_serializing_if_is_none)]
    pub description: Option<String>,
    #[oai(skip_serializing_if_is_none)]
    pub image_url: Option<String>,
}

impl UpdateSweetRequest {
    /// `None` when the price is not a finite number.
    pub fn into_changes(self) -> Option<SweetChanges> {
        let price = match self.price {
            Some(price) => Some(to_decimal(price)?),
            None => None,
        };

        Some(SweetChanges {
            name: self.name,
            category: self.category,
            price,
            quantity: self.quantity,
            description: self.description,
            image_url: self.image_url,
        })
    }
}

#[derive(Debug, Clone, Object)]
pub struct StockMovementRequest {
    /// Units to purchase or restock, strictly positive
    pub quantity: i32,
}

#[derive(Debug, Clone, Object)]
#[oai(rename_all = "camelCase")]
pub struct SweetResponse {
    /// 24-character hex identifier
    pub id: String,
    pub name: String,
    pub category: String,
    pub price: f64,
    /// Units in stock
    pub quantity: i32,
    #[oai(skip_serializing_if_is_none)]
    pub description: Option<String>,
    #[oai(skip_serializing_if_is_none)]
    pub image_url: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Sweet> for SweetResponse {
    fn from(sweet: Sweet) -> Self {
        Self {
            id: sweet.id.to_string(),
            name: sweet.name,
            category: sweet.category,
            price: to_number(sweet.price),
            quantity: sweet.quantity,
            description: sweet.description,
            image_url: sweet.image_url,
            created_at: sweet.created_at,
            updated_at: sweet.updated_at,
        }
    }
}

#[derive(Debug, Clone, Object)]
pub struct SweetPageResponse {
    pub sweets: Vec<SweetResponse>,
    /// Total number of sweets in the catalog
    pub total: i64,
    /// Number of pages at the requested limit
    pub pages: i64,
}

impl From<SweetPage> for SweetPageResponse {
    fn from(page: SweetPage) -> Self {
        Self {
            sweets: page.sweets.into_iter().map(SweetResponse::from).collect(),
            total: page.total,
            pages: page.pages,
        }
    }
}

#[derive(Debug, Clone, Object)]
pub struct DeletedSweetResponse {
    pub message: String,
    pub sweet: SweetResponse,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_convert_json_numbers_to_decimals() {
        assert_eq!(to_decimal(2.5), Some(Decimal::new(25, 1)));
        assert_eq!(to_decimal(f64::NAN), None);
        assert_eq!(to_decimal(f64::INFINITY), None);
    }

    #[test]
    fn should_render_decimals_as_numbers() {
        assert_eq!(to_number(Decimal::new(750, 2)), 7.5);
    }

    #[test]
    fn should_reject_non_finite_price_change() {
        let request = UpdateSweetRequest {
            name: None,
            category: None,
            price: Some(f64::NAN),
            quantity: None,
            description: None,
            image_url: None,
        };
        assert!(request.into_changes().is_none());
    }
}
