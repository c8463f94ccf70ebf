use async_trait::async_trait;

use crate::domain::errors::RepositoryError;
use crate::domain::shared::entity_id::EntityId;
use crate::domain::shared::value_objects::UserId;

use super::model::{Cart, CartItem};
use super::order::Order;
use super::value_objects::TaxRate;

/// Result of the transactional checkout.
#[derive(Debug, Clone, PartialEq)]
pub enum CheckoutOutcome {
    /// The order recorded from the lines the cart held when it was claimed.
    Completed(Order),
    /// Nothing was written: this sweet lacked stock or no longer exists.
    InsufficientStock { sweet_id: EntityId },
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CartRepository: Send + Sync {
    /// The user's active cart with its lines, if one exists.
    async fn find_active(&self, user_id: &UserId) -> Result<Option<Cart>, RepositoryError>;
    /// Stores `candidate` unless the user already has an active cart, and
    /// returns whichever cart is active afterwards.
    async fn get_or_create_active(&self, candidate: &Cart) -> Result<Cart, RepositoryError>;
    /// Adds `added` units to the cart's line for `item.sweet_id`, inserting
    /// `item` when there is none. An existing line keeps its snapshot.
    /// `NotFound` when the cart is no longer active.
    async fn merge_item(
        &self,
        cart_id: EntityId,
        item: &CartItem,
        added: i32,
    ) -> Result<(), RepositoryError>;
    /// `NotFound` when the line is gone or the cart is no longer active.
    async fn set_item_quantity(
        &self,
        cart_id: EntityId,
        item_id: EntityId,
        quantity: i32,
    ) -> Result<(), RepositoryError>;
    /// `NotFound` when the line is not part of the cart.
    async fn delete_item(&self, cart_id: EntityId, item_id: EntityId)
    -> Result<(), RepositoryError>;
    async fn clear_items(&self, cart_id: EntityId) -> Result<(), RepositoryError>;
    /// In one transaction: mark the cart completed, decrement stock for the
    /// lines it holds at that moment, record the order priced with
    /// `tax_rate` and drop the lines. All or nothing. `NotFound` when the
    /// cart is no longer active or has no lines.
    async fn checkout(
        &self,
        cart_id: EntityId,
        tax_rate: TaxRate,
    ) -> Result<CheckoutOutcome, RepositoryError>;
    /// Orders of the user, newest first.
    async fn get_orders(&self, user_id: &UserId) -> Result<Vec<Order>, RepositoryError>;
}
