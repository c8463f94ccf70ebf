use async_trait::async_trait;
use sqlx::PgPool;

use business::domain::errors::RepositoryError;
use business::domain::shared::entity_id::EntityId;
use business::domain::sweet::model::{Sweet, SweetChanges};
use business::domain::sweet::repository::SweetRepository;
use business::domain::sweet::value_objects::SweetSearch;

use super::entity::{SWEET_COLUMNS, SweetEntity, into_domain_list};
use crate::db::repository_error;

pub struct SweetRepositoryPostgres {
    pool: PgPool,
}

impl SweetRepositoryPostgres {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl SweetRepository for SweetRepositoryPostgres {
    async fn get_all(&self) -> Result<Vec<Sweet>, RepositoryError> {
        let sql = format!("SELECT {SWEET_COLUMNS} FROM sweets ORDER BY created_at DESC, id DESC");
        let entities = sqlx::query_as::<_, SweetEntity>(&sql)
            .fetch_all(&self.pool)
            .await
            .map_err(repository_error)?;

        into_domain_list(entities)
    }

    async fn get_page(&self, offset: i64, limit: i64) -> Result<Vec<Sweet>, RepositoryError> {
        let sql = format!(
            "SELECT {SWEET_COLUMNS} FROM sweets ORDER BY created_at DESC, id DESC LIMIT $1 OFFSET $2"
        );
        let entities = sqlx::query_as::<_, SweetEntity>(&sql)
            .bind(limit)
            .bind(offset)
            .fetch_all(&self.pool)
            .await
            .map_err(repository_error)?;

        into_domain_list(entities)
    }

    async fn count(&self) -> Result<i64, RepositoryError> {
        sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM sweets")
            .fetch_one(&self.pool)
            .await
            .map_err(repository_error)
    }

    async fn search(&self, search: &SweetSearch) -> Result<Vec<Sweet>, RepositoryError> {
        let sql = format!(
            r#"SELECT {SWEET_COLUMNS} FROM sweets
            WHERE ($1::text IS NULL OR search_vector @@ websearch_to_tsquery('english', $1))
              AND ($2::numeric IS NULL OR price >= $2)
              AND ($3::numeric IS NULL OR price <= $3)
            ORDER BY created_at DESC, id DESC"#
        );
        let entities = sqlx::query_as::<_, SweetEntity>(&sql)
            .bind(search.query.as_deref())
            .bind(search.price_min)
            .bind(search.price_max)
            .fetch_all(&self.pool)
            .await
            .map_err(repository_error)?;

        into_domain_list(entities)
    }

    async fn get_by_id(&self, id: EntityId) -> Result<Sweet, RepositoryError> {
        let sql = format!("SELECT {SWEET_COLUMNS} FROM sweets WHERE id = $1");
        sqlx::query_as::<_, SweetEntity>(&sql)
            .bind(id.to_hex())
            .fetch_optional(&self.pool)
            .await
            .map_err(repository_error)?
            .ok_or(RepositoryError::NotFound)?
            .into_domain()
    }

    async fn save(&self, sweet: &Sweet) -> Result<(), RepositoryError> {
        sqlx::query(
            r#"INSERT INTO sweets (id, name, category, price, quantity, description, image_url, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)"#,
        )
        .bind(sweet.id.to_hex())
        .bind(&sweet.name)
        .bind(&sweet.category)
        .bind(sweet.price)
        .bind(sweet.quantity)
        .bind(&sweet.description)
        .bind(&sweet.image_url)
        .bind(sweet.created_at)
        .bind(sweet.updated_at)
        .execute(&self.pool)
        .await
        .map_err(repository_error)?;

        Ok(())
    }

    async fn update(&self, id: EntityId, changes: &SweetChanges) -> Result<Sweet, RepositoryError> {
        let sql = format!(
            r#"UPDATE sweets SET
                name = COALESCE($2, name),
                category = COALESCE($3, category),
                price = COALESCE($4, price),
                quantity = COALESCE($5, quantity),
                description = COALESCE($6, description),
                image_url = COALESCE($7, image_url),
                updated_at = NOW()
            WHERE id = $1
            RETURNING {SWEET_COLUMNS}"#
        );
        sqlx::query_as::<_, SweetEntity>(&sql)
            .bind(id.to_hex())
            .bind(&changes.name)
            .bind(&changes.category)
            .bind(changes.price)
            .bind(changes.quantity)
            .bind(&changes.description)
            .bind(&changes.image_url)
            .fetch_optional(&self.pool)
            .await
            .map_err(repository_error)?
            .ok_or(RepositoryError::NotFound)?
            .into_domain()
    }

    async fn delete(&self, id: EntityId) -> Result<Sweet, RepositoryError> {
        let sql = format!("DELETE FROM sweets WHERE id = $1 RETURNING {SWEET_COLUMNS}");
        sqlx::query_as::<_, SweetEntity>(&sql)
            .bind(id.to_hex())
            .fetch_optional(&self.pool)
            .await
            .map_err(repository_error)?
            .ok_or(RepositoryError::NotFound)?
            .into_domain()
    }

    async fn decrement_stock(
        &self,
        id: EntityId,
        quantity: i32,
    ) -> Result<Option<Sweet>, RepositoryError> {
        let sql = format!(
            r#"UPDATE sweets SET quantity = quantity - $2, updated_at = NOW()
            WHERE id = $1 AND quantity >= $2
            RETURNING {SWEET_COLUMNS}"#
        );
        sqlx::query_as::<_, SweetEntity>(&sql)
            .bind(id.to_hex())
            .bind(quantity)
            .fetch_optional(&self.pool)
            .await
            .map_err(repository_error)?
            .map(SweetEntity::into_domain)
            .transpose()
    }

    async fn increment_stock(
        &self,
        id: EntityId,
        quantity: i32,
    ) -> Result<Option<Sweet>, RepositoryError> {
        // the guard keeps the addition inside INTEGER range
        let sql = format!(
            r#"UPDATE sweets SET quantity = quantity + $2, updated_at = NOW()
            WHERE id = $1 AND quantity <= 2147483647 - $2
            RETURNING {SWEET_COLUMNS}"#
        );
        sqlx::query_as::<_, SweetEntity>(&sql)
            .bind(id.to_hex())
            .bind(quantity)
            .fetch_optional(&self.pool)
            .await
            .map_err(repository_error)?
            .map(SweetEntity::into_domain)
            .transpose()
    }
}
