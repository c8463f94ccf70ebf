use chrono::{DateTime, Utc};
use rust_decimal::Decimal;

use super::model::{Cart, CartSummary};
use super::value_objects::TaxRate;
use crate::domain::shared::entity_id::EntityId;
use crate::domain::shared::value_objects::UserId;

#[derive(Debug, Clone, PartialEq)]
pub struct OrderLine {
    pub sweet_id: EntityId,
    pub name: String,
    pub quantity: i32,
    pub unit_price: Decimal,
}

/// Immutable record of a checked-out cart, taken before its lines are cleared.
#[derive(Debug, Clone, PartialEq)]
pub struct Order {
    pub id: EntityId,
    pub user_id: UserId,
    pub cart_id: EntityId,
    pub lines: Vec<OrderLine>,
    pub summary: CartSummary,
    pub created_at: DateTime<Utc>,
}

impl Order {
    pub fn from_cart(cart: &Cart, tax_rate: TaxRate) -> Self {
        Self {
            id: EntityId::generate(),
            user_id: cart.user_id.clone(),
            cart_id: cart.id,
            lines: cart
                .items
                .iter()
                .map(|item| OrderLine {
                    sweet_id: item.sweet_id,
                    name: item.name.clone(),
                    quantity: item.quantity,
                    unit_price: item.price_at_time,
                })
                .collect(),
            summary: cart.summary(tax_rate),
            created_at: Utc::now(),
        }
    }

    /// Constructor for data already persisted in the repository (no validation).
    pub fn from_repository(
        id: EntityId,
        user_id: UserId,
        cart_id: EntityId,
        lines: Vec<OrderLine>,
        summary: CartSummary,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            user_id,
            cart_id,
            lines,
            summary,
            created_at,
        }
    }
}
