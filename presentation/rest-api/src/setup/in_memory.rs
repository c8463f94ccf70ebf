//! Process-local repositories used to drive the HTTP surface in tests.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::Utc;

use business::domain::cart::model::{Cart, CartItem};
use business::domain::cart::order::Order;
use business::domain::cart::repository::{CartRepository, CheckoutOutcome};
use business::domain::cart::value_objects::{CartStatus, TaxRate};
use business::domain::errors::RepositoryError;
use business::domain::shared::entity_id::EntityId;
use business::domain::shared::value_objects::UserId;
use business::domain::sweet::model::{Sweet, SweetChanges};
use business::domain::sweet::repository::SweetRepository;
use business::domain::sweet::value_objects::SweetSearch;

#[derive(Default)]
pub struct InMemorySweetRepository {
    sweets: Mutex<Vec<Sweet>>,
}

impl InMemorySweetRepository {
    fn newest_first(&self) -> Vec<Sweet> {
        let mut sweets = self.sweets.lock().unwrap().clone();
        sweets.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));
        sweets
    }

    fn exists(&self, id: EntityId) -> bool {
        self.sweets.lock().unwrap().iter().any(|s| s.id == id)
    }
}

fn matches_text(sweet: &Sweet, query: &str) -> bool {
    let haystack = format!(
        "{} {} {}",
        sweet.name,
        sweet.category,
        sweet.description.as_deref().unwrap_or_default()
    )
    .to_lowercase();
    query
        .to_lowercase()
        .split_whitespace()
        .all(|word| haystack.contains(word))
}

#[async_trait]
impl SweetRepository for InMemorySweetRepository {
    async fn get_all(&self) -> Result<Vec<Sweet>, RepositoryError> {
        Ok(self.newest_first())
    }

    async fn get_page(&self, offset: i64, limit: i64) -> Result<Vec<Sweet>, RepositoryError> {
        Ok(self
            .newest_first()
            .into_iter()
            .skip(offset as usize)
            .take(limit as usize)
            .collect())
    }

    async fn count(&self) -> Result<i64, RepositoryError> {
        Ok(self.sweets.lock().unwrap().len() as i64)
    }

    async fn search(&self, search: &SweetSearch) -> Result<Vec<Sweet>, RepositoryError> {
        Ok(self
            .newest_first()
            .into_iter()
            .filter(|s| search.query.as_deref().is_none_or(|q| matches_text(s, q)))
            .filter(|s| search.matches_price(s.price))
            .collect())
    }

    async fn get_by_id(&self, id: EntityId) -> Result<Sweet, RepositoryError> {
        self.sweets
            .lock()
            .unwrap()
            .iter()
            .find(|s| s.id == id)
            .cloned()
            .ok_or(RepositoryError::NotFound)
    }

    async fn save(&self, sweet: &Sweet) -> Result<(), RepositoryError> {
        self.sweets.lock().unwrap().push(sweet.clone());
        Ok(())
    }

    async fn update(&self, id: EntityId, changes: &SweetChanges) -> Result<Sweet, RepositoryError> {
        let mut sweets = self.sweets.lock().unwrap();
        let sweet = sweets
            .iter_mut()
            .find(|s| s.id == id)
            .ok_or(RepositoryError::NotFound)?;

        if let Some(name) = &changes.name {
            sweet.name = name.clone();
        }
        if let Some(category) = &changes.category {
            sweet.category = category.clone();
        }
        if let Some(price) = changes.price {
            sweet.price = price;
        }
        if let Some(quantity) = changes.quantity {
            sweet.quantity = quantity;
        }
        if let Some(description) = &changes.description {
            sweet.description = Some(description.clone());
        }
        if let Some(image_url) = &changes.image_url {
            sweet.image_url = Some(image_url.clone());
        }
        sweet.updated_at = Utc::now();
        Ok(sweet.clone())
    }

    async fn delete(&self, id: EntityId) -> Result<Sweet, RepositoryError> {
        let mut sweets = self.sweets.lock().unwrap();
        let index = sweets
            .iter()
            .position(|s| s.id == id)
            .ok_or(RepositoryError::NotFound)?;
        Ok(sweets.remove(index))
    }

    async fn decrement_stock(
        &self,
        id: EntityId,
        quantity: i32,
    ) -> Result<Option<Sweet>, RepositoryError> {
        let mut sweets = self.sweets.lock().unwrap();
        Ok(sweets
            .iter_mut()
            .find(|s| s.id == id && s.quantity >= quantity)
            .map(|sweet| {
                sweet.quantity -= quantity;
                sweet.updated_at = Utc::now();
                sweet.clone()
            }))
    }

    async fn increment_stock(
        &self,
        id: EntityId,
        quantity: i32,
    ) -> Result<Option<Sweet>, RepositoryError> {
        let mut sweets = self.sweets.lock().unwrap();
        Ok(sweets.iter_mut().find(|s| s.id == id).and_then(|sweet| {
            sweet.quantity = sweet.quantity.checked_add(quantity)?;
            sweet.updated_at = Utc::now();
            Some(sweet.clone())
        }))
    }
}

pub struct InMemoryCartRepository {
    sweets: Arc<InMemorySweetRepository>,
    carts: Mutex<Vec<Cart>>,
    orders: Mutex<Vec<Order>>,
}

impl InMemoryCartRepository {
    pub fn new(sweets: Arc<InMemorySweetRepository>) -> Self {
        Self {
            sweets,
            carts: Mutex::new(Vec::new()),
            orders: Mutex::new(Vec::new()),
        }
    }

    fn with_availability(&self, mut cart: Cart) -> Cart {
        for item in &mut cart.items {
            item.available = self.sweets.exists(item.sweet_id);
        }
        cart
    }
}

#[async_trait]
impl CartRepository for InMemoryCartRepository {
    async fn find_active(&self, user_id: &UserId) -> Result<Option<Cart>, RepositoryError> {
        let cart = self
            .carts
            .lock()
            .unwrap()
            .iter()
            .find(|c| &c.user_id == user_id && c.status == CartStatus::Active)
            .cloned();
        Ok(cart.map(|c| self.with_availability(c)))
    }

    async fn get_or_create_active(&self, candidate: &Cart) -> Result<Cart, RepositoryError> {
        let existing = {
            let mut carts = self.carts.lock().unwrap();
            match carts
                .iter()
                .find(|c| c.user_id == candidate.user_id && c.status == CartStatus::Active)
            {
                Some(cart) => cart.clone(),
                None => {
                    carts.push(candidate.clone());
                    candidate.clone()
                }
            }
        };
        Ok(self.with_availability(existing))
    }

    async fn merge_item(
        &self,
        cart_id: EntityId,
        item: &CartItem,
        added: i32,
    ) -> Result<(), RepositoryError> {
        let mut carts = self.carts.lock().unwrap();
        let cart = carts
            .iter_mut()
            .find(|c| c.id == cart_id && c.status == CartStatus::Active)
            .ok_or(RepositoryError::NotFound)?;

        match cart.items.iter_mut().find(|i| i.sweet_id == item.sweet_id) {
            Some(existing) => existing.quantity += added,
            None => {
                let mut line = item.clone();
                line.quantity = added;
                cart.items.push(line);
            }
        }
        cart.updated_at = Utc::now();
        Ok(())
    }

    async fn set_item_quantity(
        &self,
        cart_id: EntityId,
        item_id: EntityId,
        quantity: i32,
    ) -> Result<(), RepositoryError> {
        let mut carts = self.carts.lock().unwrap();
        let cart = carts
            .iter_mut()
            .find(|c| c.id == cart_id && c.status == CartStatus::Active)
            .ok_or(RepositoryError::NotFound)?;
        cart.set_item_quantity(item_id, quantity)
            .map(|_| ())
            .map_err(|_| RepositoryError::NotFound)
    }

    async fn delete_item(
        &self,
        cart_id: EntityId,
        item_id: EntityId,
    ) -> Result<(), RepositoryError> {
        let mut carts = self.carts.lock().unwrap();
        let cart = carts
            .iter_mut()
            .find(|c| c.id == cart_id)
            .ok_or(RepositoryError::NotFound)?;
        cart.remove_item(item_id)
            .map(|_| ())
            .map_err(|_| RepositoryError::NotFound)
    }

    async fn clear_items(&self, cart_id: EntityId) -> Result<(), RepositoryError> {
        let mut carts = self.carts.lock().unwrap();
        if let Some(cart) = carts.iter_mut().find(|c| c.id == cart_id) {
            cart.clear();
        }
        Ok(())
    }

    async fn checkout(
        &self,
        cart_id: EntityId,
        tax_rate: TaxRate,
    ) -> Result<CheckoutOutcome, RepositoryError> {
        let mut carts = self.carts.lock().unwrap();
        let stored = carts
            .iter_mut()
            .find(|c| c.id == cart_id && c.status == CartStatus::Active && !c.is_empty())
            .ok_or(RepositoryError::NotFound)?;

        let mut sweets = self.sweets.sweets.lock().unwrap();
        let requirements = stored.stock_requirements();
        for (sweet_id, quantity) in &requirements {
            let covered = sweets
                .iter()
                .any(|s| s.id == *sweet_id && s.quantity >= *quantity);
            if !covered {
                return Ok(CheckoutOutcome::InsufficientStock {
                    sweet_id: *sweet_id,
                });
            }
        }
        for (sweet_id, quantity) in requirements {
            if let Some(sweet) = sweets.iter_mut().find(|s| s.id == sweet_id) {
                sweet.quantity -= quantity;
            }
        }

        let order = Order::from_cart(stored, tax_rate);
        stored.status = CartStatus::Completed;
        stored.clear();
        self.orders.lock().unwrap().push(order.clone());
        Ok(CheckoutOutcome::Completed(order))
    }

    async fn get_orders(&self, user_id: &UserId) -> Result<Vec<Order>, RepositoryError> {
        let mut orders: Vec<Order> = self
            .orders
            .lock()
            .unwrap()
            .iter()
            .filter(|o| &o.user_id == user_id)
            .cloned()
            .collect();
        orders.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(orders)
    }
}
