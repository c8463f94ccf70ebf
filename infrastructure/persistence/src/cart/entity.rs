use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::FromRow;

use business::domain::cart::model::{Cart, CartItem, CartSummary};
use business::domain::cart::order::{Order, OrderLine};
use business::domain::cart::value_objects::CartStatus;
use business::domain::errors::RepositoryError;
use business::domain::shared::entity_id::EntityId;
use business::domain::shared::value_objects::UserId;

fn parse_id(raw: &str) -> Result<EntityId, RepositoryError> {
    EntityId::parse(raw).map_err(|_| {
        tracing::error!(id = raw, "Stored row has a malformed id");
        RepositoryError::Persistence
    })
}

#[derive(Debug, FromRow)]
pub struct CartEntity {
    pub id: String,
    pub user_id: String,
    pub status: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, FromRow)]
pub struct CartItemEntity {
    pub id: String,
    pub sweet_id: String,
    pub name: String,
    pub quantity: i32,
    pub price_at_time: Decimal,
    /// Computed by joining against `sweets`.
    pub available: bool,
    pub added_at: DateTime<Utc>,
}

#[derive(Debug, FromRow)]
pub struct OrderEntity {
    pub id: String,
    pub user_id: String,
    pub cart_id: String,
    pub item_count: i64,
    pub subtotal: Decimal,
    pub tax: Decimal,
    pub total: Decimal,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, FromRow)]
pub struct OrderItemEntity {
    pub order_id: String,
    pub sweet_id: String,
    pub name: String,
    pub quantity: i32,
    pub unit_price: Decimal,
}

impl CartItemEntity {
    pub fn into_domain(self) -> Result<CartItem, RepositoryError> {
        Ok(CartItem::from_repository(
            parse_id(&self.id)?,
            parse_id(&self.sweet_id)?,
            self.name,
            self.quantity,
            self.price_at_time,
            self.available,
            self.added_at,
        ))
    }
}

impl CartEntity {
    pub fn into_domain(self, items: Vec<CartItemEntity>) -> Result<Cart, RepositoryError> {
        let status = self.status.parse::<CartStatus>().map_err(|e| {
            tracing::error!(cart_id = %self.id, "{}", e);
            RepositoryError::Persistence
        })?;
        let items = items
            .into_iter()
            .map(CartItemEntity::into_domain)
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Cart::from_repository(
            parse_id(&self.id)?,
            UserId::new(self.user_id),
            status,
            items,
            self.created_at,
            self.updated_at,
        ))
    }
}

impl OrderItemEntity {
    pub fn into_domain(self) -> Result<OrderLine, RepositoryError> {
        Ok(OrderLine {
            sweet_id: parse_id(&self.sweet_id)?,
            name: self.name,
            quantity: self.quantity,
            unit_price: self.unit_price,
        })
    }
}

impl OrderEntity {
    /// `lines` must already be filtered to this order, in position order.
    pub fn into_domain(self, lines: Vec<OrderItemEntity>) -> Result<Order, RepositoryError> {
        let lines = lines
            .into_iter()
            .map(OrderItemEntity::into_domain)
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Order::from_repository(
            parse_id(&self.id)?,
            UserId::new(self.user_id),
            parse_id(&self.cart_id)?,
            lines,
            CartSummary {
                item_count: self.item_count,
                subtotal: self.subtotal,
                tax: self.tax,
                total: self.total,
            },
            self.created_at,
        ))
    }
}
