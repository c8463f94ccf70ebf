use std::collections::HashMap;

use async_trait::async_trait;
use sqlx::{PgPool, Postgres, Transaction};

use business::domain::cart::model::{Cart, CartItem};
use business::domain::cart::order::Order;
use business::domain::cart::repository::{CartRepository, CheckoutOutcome};
use business::domain::cart::value_objects::{CartStatus, TaxRate};
use business::domain::errors::RepositoryError;
use business::domain::shared::entity_id::EntityId;
use business::domain::shared::value_objects::UserId;

use super::entity::{CartEntity, CartItemEntity, OrderEntity, OrderItemEntity};
use crate::db::repository_error;

/// Lines with availability against the catalog. `$1` is the cart id.
const CART_ITEMS_QUERY: &str = r#"SELECT ci.id, ci.sweet_id, ci.name, ci.quantity, ci.price_at_time,
        (s.id IS NOT NULL) AS available, ci.added_at
    FROM cart_items ci
    LEFT JOIN sweets s ON s.id = ci.sweet_id
    WHERE ci.cart_id = $1
    ORDER BY ci.added_at, ci.id"#;

/// Line writes go through this CTE. Locking the cart row orders them
/// against a checkout claiming the same cart.
const ACTIVE_CART_CTE: &str = r#"WITH active AS (
        UPDATE carts SET updated_at = NOW()
        WHERE id = $2 AND status = 'active'
        RETURNING id
    )"#;

pub struct CartRepositoryPostgres {
    pool: PgPool,
}

impl CartRepositoryPostgres {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn load_items(&self, cart_id: &str) -> Result<Vec<CartItemEntity>, RepositoryError> {
        sqlx::query_as::<_, CartItemEntity>(CART_ITEMS_QUERY)
            .bind(cart_id)
            .fetch_all(&self.pool)
            .await
            .map_err(repository_error)
    }

    /// Marks the cart completed and returns it with its current lines locked.
    /// `None` when the cart is not active any more.
    async fn claim(
        tx: &mut Transaction<'_, Postgres>,
        cart_id: EntityId,
    ) -> Result<Option<Cart>, RepositoryError> {
        let claimed = sqlx::query_as::<_, CartEntity>(
            r#"UPDATE carts SET status = 'completed', updated_at = NOW()
            WHERE id = $1 AND status = 'active'
            RETURNING id, user_id, status, created_at, updated_at"#,
        )
        .bind(cart_id.to_hex())
        .fetch_optional(&mut **tx)
        .await
        .map_err(repository_error)?;

        let Some(claimed) = claimed else {
            return Ok(None);
        };

        let locked_items = format!("{CART_ITEMS_QUERY} FOR UPDATE OF ci");
        let items = sqlx::query_as::<_, CartItemEntity>(&locked_items)
            .bind(&claimed.id)
            .fetch_all(&mut **tx)
            .await
            .map_err(repository_error)?;

        claimed.into_domain(items).map(Some)
    }

    /// Takes stock for every line, lowest sweet id first. Returns the first
    /// sweet that could not cover its line.
    async fn take_stock(
        tx: &mut Transaction<'_, Postgres>,
        cart: &Cart,
    ) -> Result<Option<EntityId>, RepositoryError> {
        for (sweet_id, quantity) in cart.stock_requirements() {
            let result = sqlx::query(
                r#"UPDATE sweets SET quantity = quantity - $2, updated_at = NOW()
                WHERE id = $1 AND quantity >= $2"#,
            )
            .bind(sweet_id.to_hex())
            .bind(quantity)
            .execute(&mut **tx)
            .await
            .map_err(repository_error)?;

            if result.rows_affected() == 0 {
                return Ok(Some(sweet_id));
            }
        }
        Ok(None)
    }

    async fn record_order(
        tx: &mut Transaction<'_, Postgres>,
        order: &Order,
    ) -> Result<(), RepositoryError> {
        sqlx::query(
            r#"INSERT INTO orders (id, user_id, cart_id, item_count, subtotal, tax, total, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)"#,
        )
        .bind(order.id.to_hex())
        .bind(order.user_id.as_str())
        .bind(order.cart_id.to_hex())
        .bind(order.summary.item_count)
        .bind(order.summary.subtotal)
        .bind(order.summary.tax)
        .bind(order.summary.total)
        .bind(order.created_at)
        .execute(&mut **tx)
        .await
        .map_err(repository_error)?;

        for (position, line) in order.lines.iter().enumerate() {
            sqlx::query(
                r#"INSERT INTO order_items (order_id, position, sweet_id, name, quantity, unit_price)
                VALUES ($1, $2, $3, $4, $5, $6)"#,
            )
            .bind(order.id.to_hex())
            .bind(i32::try_from(position).map_err(|_| RepositoryError::Persistence)?)
            .bind(line.sweet_id.to_hex())
            .bind(&line.name)
            .bind(line.quantity)
            .bind(line.unit_price)
            .execute(&mut **tx)
            .await
            .map_err(repository_error)?;
        }
        Ok(())
    }
}

#[async_trait]
impl CartRepository for CartRepositoryPostgres {
    async fn find_active(&self, user_id: &UserId) -> Result<Option<Cart>, RepositoryError> {
        let entity = sqlx::query_as::<_, CartEntity>(
            "SELECT id, user_id, status, created_at, updated_at FROM carts WHERE user_id = $1 AND status = 'active'",
        )
        .bind(user_id.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(repository_error)?;

        match entity {
            Some(entity) => {
                let items = self.load_items(&entity.id).await?;
                entity.into_domain(items).map(Some)
            }
            None => Ok(None),
        }
    }

    async fn get_or_create_active(&self, candidate: &Cart) -> Result<Cart, RepositoryError> {
        sqlx::query(
            r#"INSERT INTO carts (id, user_id, status, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5)
            ON CONFLICT (user_id) WHERE status = 'active' DO NOTHING"#,
        )
        .bind(candidate.id.to_hex())
        .bind(candidate.user_id.as_str())
        .bind(CartStatus::Active.to_string())
        .bind(candidate.created_at)
        .bind(candidate.updated_at)
        .execute(&self.pool)
        .await
        .map_err(repository_error)?;

        self.find_active(&candidate.user_id)
            .await?
            .ok_or(RepositoryError::Persistence)
    }

    async fn merge_item(
        &self,
        cart_id: EntityId,
        item: &CartItem,
        added: i32,
    ) -> Result<(), RepositoryError> {
        let sql = format!(
            r#"{ACTIVE_CART_CTE}
            INSERT INTO cart_items (id, cart_id, sweet_id, name, quantity, price_at_time, added_at)
            SELECT $1, active.id, $3, $4, $5, $6, $7 FROM active
            ON CONFLICT (cart_id, sweet_id)
            DO UPDATE SET quantity = cart_items.quantity + EXCLUDED.quantity"#
        );
        let result = sqlx::query(&sql)
            .bind(item.id.to_hex())
            .bind(cart_id.to_hex())
            .bind(item.sweet_id.to_hex())
            .bind(&item.name)
            .bind(added)
            .bind(item.price_at_time)
            .bind(item.added_at)
            .execute(&self.pool)
            .await
            .map_err(repository_error)?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }
        Ok(())
    }

    async fn set_item_quantity(
        &self,
        cart_id: EntityId,
        item_id: EntityId,
        quantity: i32,
    ) -> Result<(), RepositoryError> {
        let sql = format!(
            r#"{ACTIVE_CART_CTE}
            UPDATE cart_items SET quantity = $3
            FROM active
            WHERE cart_items.id = $1 AND cart_items.cart_id = active.id"#
        );
        let result = sqlx::query(&sql)
            .bind(item_id.to_hex())
            .bind(cart_id.to_hex())
            .bind(quantity)
            .execute(&self.pool)
            .await
            .map_err(repository_error)?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }
        Ok(())
    }

    async fn delete_item(
        &self,
        cart_id: EntityId,
        item_id: EntityId,
    ) -> Result<(), RepositoryError> {
        let result = sqlx::query("DELETE FROM cart_items WHERE id = $1 AND cart_id = $2")
            .bind(item_id.to_hex())
            .bind(cart_id.to_hex())
            .execute(&self.pool)
            .await
            .map_err(repository_error)?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }
        Ok(())
    }

    async fn clear_items(&self, cart_id: EntityId) -> Result<(), RepositoryError> {
        sqlx::query("DELETE FROM cart_items WHERE cart_id = $1")
            .bind(cart_id.to_hex())
            .execute(&self.pool)
            .await
            .map_err(repository_error)?;

        Ok(())
    }

    async fn checkout(
        &self,
        cart_id: EntityId,
        tax_rate: TaxRate,
    ) -> Result<CheckoutOutcome, RepositoryError> {
        let mut tx = self.pool.begin().await.map_err(repository_error)?;

        // Claiming first serialises concurrent checkouts and line writes.
        let cart = match Self::claim(&mut tx, cart_id).await? {
            Some(cart) if !cart.is_empty() => cart,
            _ => {
                tx.rollback().await.map_err(repository_error)?;
                return Err(RepositoryError::NotFound);
            }
        };

        if let Some(sweet_id) = Self::take_stock(&mut tx, &cart).await? {
            tx.rollback().await.map_err(repository_error)?;
            tracing::warn!(cart_id = %cart.id, sweet_id = %sweet_id, "Checkout rolled back: insufficient stock");
            return Ok(CheckoutOutcome::InsufficientStock { sweet_id });
        }

        let order = Order::from_cart(&cart, tax_rate);
        Self::record_order(&mut tx, &order).await?;

        sqlx::query("DELETE FROM cart_items WHERE cart_id = $1")
            .bind(cart.id.to_hex())
            .execute(&mut *tx)
            .await
            .map_err(repository_error)?;

        tx.commit().await.map_err(repository_error)?;
        Ok(CheckoutOutcome::Completed(order))
    }

    async fn get_orders(&self, user_id: &UserId) -> Result<Vec<Order>, RepositoryError> {
        let orders = sqlx::query_as::<_, OrderEntity>(
            r#"SELECT id, user_id, cart_id, item_count, subtotal, tax, total, created_at
            FROM orders WHERE user_id = $1 ORDER BY created_at DESC, id DESC"#,
        )
        .bind(user_id.as_str())
        .fetch_all(&self.pool)
        .await
        .map_err(repository_error)?;

        if orders.is_empty() {
            return Ok(Vec::new());
        }

        let order_ids: Vec<String> = orders.iter().map(|o| o.id.clone()).collect();
        let items = sqlx::query_as::<_, OrderItemEntity>(
            r#"SELECT order_id, sweet_id, name, quantity, unit_price
            FROM order_items WHERE order_id = ANY($1) ORDER BY order_id, position"#,
        )
        .bind(order_ids.as_slice())
        .fetch_all(&self.pool)
        .await
        .map_err(repository_error)?;

        let mut lines_by_order: HashMap<String, Vec<OrderItemEntity>> = HashMap::new();
        for item in items {
            lines_by_order
                .entry(item.order_id.clone())
                .or_default()
                .push(item);
        }

        orders
            .into_iter()
            .map(|order| {
                let lines = lines_by_order.remove(&order.id).unwrap_or_default();
                order.into_domain(lines)
            })
            .collect()
    }
}
