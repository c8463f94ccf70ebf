use chrono::{DateTime, Utc};
use rust_decimal::{Decimal, RoundingStrategy};

use super::errors::CartError;
use super::value_objects::{CartStatus, TaxRate};
use crate::domain::shared::entity_id::EntityId;
use crate::domain::shared::value_objects::UserId;
use crate::domain::sweet::model::{PRICE_SCALE, Sweet};

/// One line of a cart. `name` and `price_at_time` are captured when the
/// sweet is first added and never refreshed from the catalog.
#[derive(Debug, Clone, PartialEq)]
pub struct CartItem {
    pub id: EntityId,
    pub sweet_id: EntityId,
    pub name: String,
    pub quantity: i32,
    pub price_at_time: Decimal,
    /// False once the referenced sweet has been removed from the catalog.
    /// Filled in by the store on load, never persisted.
    pub available: bool,
    pub added_at: DateTime<Utc>,
}

impl CartItem {
    fn new(sweet: &Sweet, quantity: i32) -> Self {
        Self {
            id: EntityId::generate(),
            sweet_id: sweet.id,
            name: sweet.name.clone(),
            quantity,
            price_at_time: sweet.price,
            available: true,
            added_at: Utc::now(),
        }
    }

    /// Constructor for data already persisted in the repository (no validation).
    pub fn from_repository(
        id: EntityId,
        sweet_id: EntityId,
        name: String,
        quantity: i32,
        price_at_time: Decimal,
        available: bool,
        added_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            sweet_id,
            name,
            quantity,
            price_at_time,
            available,
            added_at,
        }
    }

    pub fn line_total(&self) -> Decimal {
        self.price_at_time * Decimal::from(self.quantity)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Cart {
    pub id: EntityId,
    pub user_id: UserId,
    pub status: CartStatus,
    pub items: Vec<CartItem>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Cart {
    pub fn new(user_id: UserId) -> Self {
        let now = Utc::now();
        Self {
            id: EntityId::generate(),
            user_id,
            status: CartStatus::Active,
            items: Vec::new(),
            created_at: now,
            updated_at: now,
        }
    }

    /// Constructor for data already persisted in the repository (no validation).
    pub fn from_repository(
        id: EntityId,
        user_id: UserId,
        status: CartStatus,
        items: Vec<CartItem>,
        created_at: DateTime<Utc>,
        updated_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            user_id,
            status,
            items,
            created_at,
            updated_at,
        }
    }

    pub fn find_item(&self, item_id: EntityId) -> Option<&CartItem> {
        self.items.iter().find(|item| item.id == item_id)
    }

    /// Adds `quantity` units of `sweet`, merging into an existing line for
    /// the same sweet. Returns the affected line.
    pub fn add_item(&mut self, sweet: &Sweet, quantity: i32) -> Result<CartItem, CartError> {
        if quantity <= 0 {
            return Err(CartError::QuantityNotPositive);
        }

        let line = match self.items.iter_mut().find(|item| item.sweet_id == sweet.id) {
            Some(existing) => {
                existing.quantity = existing
                    .quantity
                    .checked_add(quantity)
                    .ok_or(CartError::QuantityTooLarge)?;
                existing.clone()
            }
            None => {
                let item = CartItem::new(sweet, quantity);
                self.items.push(item.clone());
                item
            }
        };

        self.updated_at = Utc::now();
        Ok(line)
    }

    pub fn set_item_quantity(
        &mut self,
        item_id: EntityId,
        quantity: i32,
    ) -> Result<CartItem, CartError> {
        if quantity < 1 {
            return Err(CartError::QuantityNotPositive);
        }

        let item = self
            .items
            .iter_mut()
            .find(|item| item.id == item_id)
            .ok_or(CartError::ItemNotFound)?;
        item.quantity = quantity;
        let updated = item.clone();

        self.updated_at = Utc::now();
        Ok(updated)
    }

    pub fn remove_item(&mut self, item_id: EntityId) -> Result<CartItem, CartError> {
        let index = self
            .items
            .iter()
            .position(|item| item.id == item_id)
            .ok_or(CartError::ItemNotFound)?;
        let removed = self.items.remove(index);

        self.updated_at = Utc::now();
        Ok(removed)
    }

    pub fn clear(&mut self) {
        self.items.clear();
        self.updated_at = Utc::now();
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn summary(&self, tax_rate: TaxRate) -> CartSummary {
        CartSummary::compute(&self.items, tax_rate)
    }

    /// Units to take from stock per sweet, ordered by sweet id so concurrent
    /// checkouts lock rows in the same order.
    pub fn stock_requirements(&self) -> Vec<(EntityId, i32)> {
        let mut requirements: Vec<(EntityId, i32)> = self
            .items
            .iter()
            .map(|item| (item.sweet_id, item.quantity))
            .collect();
        requirements.sort_by_key(|(sweet_id, _)| *sweet_id);
        requirements
    }
}

/// Totals derived from the current cart lines. Never persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CartSummary {
    pub item_count: i64,
    pub subtotal: Decimal,
    pub tax: Decimal,
    pub total: Decimal,
}

impl CartSummary {
    pub fn empty() -> Self {
        Self {
            item_count: 0,
            subtotal: Decimal::ZERO,
            tax: Decimal::ZERO,
            total: Decimal::ZERO,
        }
    }

    pub fn compute(items: &[CartItem], tax_rate: TaxRate) -> Self {
        let item_count = items.iter().map(|item| i64::from(item.quantity)).sum();
        let subtotal: Decimal = items.iter().map(CartItem::line_total).sum();
        let tax = (subtotal * tax_rate.value())
            .round_dp_with_strategy(PRICE_SCALE, RoundingStrategy::MidpointAwayFromZero);

        Self {
            item_count,
            subtotal,
            tax,
            total: subtotal + tax,
        }
    }
}

/// Cart state returned to clients: the active cart, if any, and its totals.
#[derive(Debug, Clone)]
pub struct CartView {
    pub cart: Option<Cart>,
    pub summary: CartSummary,
}

impl CartView {
    pub fn of(cart: Option<Cart>, tax_rate: TaxRate) -> Self {
        let summary = cart
            .as_ref()
            .map(|c| c.summary(tax_rate))
            .unwrap_or_else(CartSummary::empty);
        Self { cart, summary }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{dec, sweet_fixture};
    use proptest::prelude::*;

    fn new_cart() -> Cart {
        Cart::new(UserId::new("customer-1"))
    }

    #[test]
    fn should_snapshot_price_and_name_on_first_add() {
        let mut cart = new_cart();
        let sweet = sweet_fixture("Chocolate Bar", "2.50", 100);

        let line = cart.add_item(&sweet, 3).unwrap();

        assert_eq!(line.sweet_id, sweet.id);
        assert_eq!(line.name, "Chocolate Bar");
        assert_eq!(line.price_at_time, dec("2.50"));
        assert_eq!(line.quantity, 3);
        assert!(line.available);
        assert_eq!(cart.items.len(), 1);
    }

    #[test]
    fn should_merge_repeated_add_and_keep_first_price() {
        let mut cart = new_cart();
        let mut sweet = sweet_fixture("Chocolate Bar", "2.50", 100);
        let first = cart.add_item(&sweet, 2).unwrap();

        sweet.price = dec("9.99");
        let merged = cart.add_item(&sweet, 3).unwrap();

        assert_eq!(cart.items.len(), 1);
        assert_eq!(merged.id, first.id);
        assert_eq!(merged.quantity, 5);
        assert_eq!(merged.price_at_time, dec("2.50"));
    }

    #[test]
    fn should_reject_overflowing_merge() {
        let mut cart = new_cart();
        let sweet = sweet_fixture("Fudge", "1", 10);
        cart.add_item(&sweet, i32::MAX).unwrap();

        assert!(matches!(
            cart.add_item(&sweet, 1),
            Err(CartError::QuantityTooLarge)
        ));
        assert_eq!(cart.items[0].quantity, i32::MAX);
    }

    #[test]
    fn should_reject_quantity_below_one_and_keep_line() {
        let mut cart = new_cart();
        let sweet = sweet_fixture("Toffee", "1.20", 10);
        let line = cart.add_item(&sweet, 2).unwrap();

        let result = cart.set_item_quantity(line.id, 0);

        assert!(matches!(result, Err(CartError::QuantityNotPositive)));
        assert_eq!(cart.find_item(line.id).unwrap().quantity, 2);
    }

    #[test]
    fn should_set_quantity_of_existing_line() {
        let mut cart = new_cart();
        let sweet = sweet_fixture("Toffee", "1.20", 10);
        let line = cart.add_item(&sweet, 2).unwrap();

        let updated = cart.set_item_quantity(line.id, 7).unwrap();

        assert_eq!(updated.quantity, 7);
        assert_eq!(cart.find_item(line.id).unwrap().quantity, 7);
    }

    #[test]
    fn should_report_missing_line_on_update_and_remove() {
        let mut cart = new_cart();
        let missing = EntityId::generate();

        assert!(matches!(
            cart.set_item_quantity(missing, 2),
            Err(CartError::ItemNotFound)
        ));
        assert!(matches!(
            cart.remove_item(missing),
            Err(CartError::ItemNotFound)
        ));
    }

    #[test]
    fn should_remove_and_clear_lines() {
        let mut cart = new_cart();
        let a = cart.add_item(&sweet_fixture("A", "1", 5), 1).unwrap();
        cart.add_item(&sweet_fixture("B", "2", 5), 1).unwrap();

        cart.remove_item(a.id).unwrap();
        assert_eq!(cart.items.len(), 1);

        cart.clear();
        assert!(cart.is_empty());
        assert_eq!(cart.status, CartStatus::Active);
    }

    #[test]
    fn should_compute_summary_with_tax() {
        let mut cart = new_cart();
        cart.add_item(&sweet_fixture("Chocolate Bar", "2.50", 100), 3)
            .unwrap();

        let summary = cart.summary(TaxRate::default());

        assert_eq!(summary.item_count, 3);
        assert_eq!(summary.subtotal, dec("7.50"));
        assert_eq!(summary.tax, dec("1.35"));
        assert_eq!(summary.total, dec("8.85"));
    }

    #[test]
    fn should_compute_zero_summary_for_empty_cart() {
        let summary = new_cart().summary(TaxRate::default());
        assert_eq!(summary, CartSummary::empty());
    }

    #[test]
    fn should_order_stock_requirements_by_sweet_id() {
        let mut cart = new_cart();
        let a = sweet_fixture("A", "1", 5);
        let b = sweet_fixture("B", "1", 5);
        cart.add_item(&b, 2).unwrap();
        cart.add_item(&a, 1).unwrap();

        let requirements = cart.stock_requirements();

        assert_eq!(requirements.len(), 2);
        assert!(requirements[0].0 <= requirements[1].0);
    }

    #[test]
    fn should_build_view_without_cart() {
        let view = CartView::of(None, TaxRate::default());
        assert!(view.cart.is_none());
        assert_eq!(view.summary, CartSummary::empty());
    }

    proptest! {
        #[test]
        fn summary_total_is_subtotal_plus_rounded_tax(
            lines in prop::collection::vec((0i64..100_000, 1i32..1_000), 0..12),
            rate_pct in 0i64..=100,
        ) {
            let mut cart = new_cart();
            for (cents, quantity) in &lines {
                let mut sweet = sweet_fixture("Sweet", "0", 0);
                sweet.price = Decimal::new(*cents, 2);
                cart.add_item(&sweet, *quantity).unwrap();
            }
            let rate = TaxRate::new(Decimal::new(rate_pct, 2)).unwrap();

            let summary = cart.summary(rate);

            let expected_subtotal: Decimal = lines
                .iter()
                .map(|(c, q)| Decimal::new(*c, 2) * Decimal::from(*q))
                .sum();
            let expected_count: i64 = lines.iter().map(|(_, q)| i64::from(*q)).sum();
            prop_assert_eq!(summary.subtotal, expected_subtotal);
            prop_assert_eq!(summary.item_count, expected_count);
            prop_assert_eq!(
                summary.tax,
                (expected_subtotal * rate.value()).round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
            );
            prop_assert_eq!(summary.total, summary.subtotal + summary.tax);
        }
    }
}
