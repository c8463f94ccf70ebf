use chrono::{DateTime, Utc};
use poem_openapi::Object;

use business::domain::cart::model::{Cart, CartItem, CartSummary, CartView};
use business::domain::cart::order::{Order, OrderLine};

use crate::api::sweet::dto::to_number;

#[derive(Debug, Clone, Object)]
#[oai(rename_all = "camelCase")]
pub struct AddCartItemRequest {
    /// Id of the sweet to add
    pub sweet_id: String,
    /// Units to add, strictly positive. Merged into an existing line.
    pub quantity: i32,
}

#[derive(Debug, Clone, Object)]
pub struct UpdateCartItemRequest {
    /// New quantity for the line, at least 1
    pub quantity: i32,
}

#[derive(Debug, Clone, Object)]
#[oai(rename_all = "camelCase")]
pub struct CartSummaryResponse {
    /// Sum of line quantities
    pub item_count: i64,
    pub subtotal: f64,
    pub tax: f64,
    pub total: f64,
}

impl From<CartSummary> for CartSummaryResponse {
    fn from(summary: CartSummary) -> Self {
        Self {
            item_count: summary.item_count,
            subtotal: to_number(summary.subtotal),
            tax: to_number(summary.tax),
            total: to_number(summary.total),
        }
    }
}

#[derive(Debug, Clone, Object)]
#[oai(rename_all = "camelCase")]
pub struct CartItemResponse {
    pub id: String,
    pub sweet_id: String,
    /// Name of the sweet when it was added
    pub name: String,
    pub quantity: i32,
    /// Unit price captured when the sweet was first added
    pub price_at_time: f64,
    pub line_total: f64,
    /// False once the sweet has left the catalog; such lines block checkout
    pub available: bool,
    pub added_at: DateTime<Utc>,
}

impl From<CartItem> for CartItemResponse {
    fn from(item: CartItem) -> Self {
        Self {
            line_total: to_number(item.line_total()),
            id: item.id.to_string(),
            sweet_id: item.sweet_id.to_string(),
            name: item.name,
            quantity: item.quantity,
            price_at_time: to_number(item.price_at_time),
            available: item.available,
            added_at: item.added_at,
        }
    }
}

#[derive(Debug, Clone, Object)]
#[oai(rename_all = "camelCase")]
pub struct CartResponse {
    pub id: String,
    pub user_id: String,
    /// `active` or `completed`
    pub status: String,
    pub items: Vec<CartItemResponse>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Cart> for CartResponse {
    fn from(cart: Cart) -> Self {
        Self {
            id: cart.id.to_string(),
            user_id: cart.user_id.to_string(),
            status: cart.status.to_string(),
            items: cart.items.into_iter().map(Into::into).collect(),
            created_at: cart.created_at,
            updated_at: cart.updated_at,
        }
    }
}

#[derive(Debug, Clone, Object)]
pub struct CartViewResponse {
    /// Null until the first item is added
    pub cart: Option<CartResponse>,
    pub summary: CartSummaryResponse,
}

impl From<CartView> for CartViewResponse {
    fn from(view: CartView) -> Self {
        Self {
            cart: view.cart.map(Into::into),
            summary: view.summary.into(),
        }
    }
}

#[derive(Debug, Clone, Object)]
#[oai(rename_all = "camelCase")]
pub struct OrderLineResponse {
    pub sweet_id: String,
    pub name: String,
    pub quantity: i32,
    pub unit_price: f64,
}

impl From<OrderLine> for OrderLineResponse {
    fn from(line: OrderLine) -> Self {
        Self {
            sweet_id: line.sweet_id.to_string(),
            name: line.name,
            quantity: line.quantity,
            unit_price: to_number(line.unit_price),
        }
    }
}

#[derive(Debug, Clone, Object)]
#[oai(rename_all = "camelCase")]
pub struct OrderResponse {
    pub id: String,
    pub cart_id: String,
    pub items: Vec<OrderLineResponse>,
    pub summary: CartSummaryResponse,
    pub created_at: DateTime<Utc>,
}

impl From<Order> for OrderResponse {
    fn from(order: Order) -> Self {
        Self {
            id: order.id.to_string(),
            cart_id: order.cart_id.to_string(),
            items: order.lines.into_iter().map(Into::into).collect(),
            summary: order.summary.into(),
            created_at: order.created_at,
        }
    }
}
