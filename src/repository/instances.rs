//! Book instances repository for database operations

use sqlx::{Pool, Postgres};
use uuid::Uuid;

use crate::{
    error::{AppError, AppResult},
    models::{Book, BookInstance, InstanceSummary},
};

#[derive(Clone)]
pub struct InstancesRepository {
    pool: Pool<Postgres>,
}

impl InstancesRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// All instances as list rows with the book title pre-joined.
    pub async fn list(&self) -> AppResult<Vec<InstanceSummary>> {
        let instances = sqlx::query_as::<_, InstanceSummary>(
            r#"
            SELECT bi.id, b.title, bi.imprint, bi.status, bi.due_back
            FROM book_instances bi
            JOIN books b ON b.id = bi.book_id
            ORDER BY b.title, bi.imprint
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(instances)
    }

    /// Get an instance by ID with its book populated.
    pub async fn get(&self, id: Uuid) -> AppResult<BookInstance> {
        let mut instance = sqlx::query_as::<_, BookInstance>(
            "SELECT id, book_id, imprint, status, due_back FROM book_instances WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Book instance with id {} not found", id)))?;

        instance.book = sqlx::query_as::<_, Book>(
            "SELECT id, title, author_id, summary, isbn FROM books WHERE id = $1",
        )
        .bind(instance.book_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(instance)
    }

    /// All instances referencing a book, sorted by imprint. The book
    /// relation is left unpopulated.
    pub async fn by_book(&self, book_id: Uuid) -> AppResult<Vec<BookInstance>> {
        let instances = sqlx::query_as::<_, BookInstance>(
            r#"
            SELECT id, book_id, imprint, status, due_back
            FROM book_instances
            WHERE book_id = $1
            ORDER BY imprint
            "#,
        )
        .bind(book_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(instances)
    }

    /// Insert a new instance. Instances have no natural key, so creation
    /// never deduplicates.
    pub async fn create(&self, instance: &BookInstance) -> AppResult<Uuid> {
        let id = sqlx::query_scalar::<_, Uuid>(
            r#"
            INSERT INTO book_instances (id, book_id, imprint, status, due_back)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id
            "#,
        )
        .bind(instance.id)
        .bind(instance.book_id)
        .bind(&instance.imprint)
        .bind(instance.status)
        .bind(instance.due_back)
        .fetch_one(&self.pool)
        .await?;

        Ok(id)
    }

    /// Overwrite all fields of an existing instance. Fails with not-found
    /// when the id does not exist.
    pub async fn update(&self, instance: &BookInstance) -> AppResult<()> {
        sqlx::query_scalar::<_, Uuid>(
            r#"
            UPDATE book_instances
            SET book_id = $2, imprint = $3, status = $4, due_back = $5
            WHERE id = $1
            RETURNING id
            "#,
        )
        .bind(instance.id)
        .bind(instance.book_id)
        .bind(&instance.imprint)
        .bind(instance.status)
        .bind(instance.due_back)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| {
            AppError::NotFound(format!("Book instance with id {} not found", instance.id))
        })?;

        Ok(())
    }

    /// Delete an instance by id. Instances have no dependents, so deletion
    /// is unconditional; deleting an id that no longer exists is a no-op.
    pub async fn delete(&self, id: Uuid) -> AppResult<()> {
        sqlx::query("DELETE FROM book_instances WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    pub async fn count(&self) -> AppResult<i64> {
        let count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM book_instances")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }

    pub async fn count_available(&self) -> AppResult<i64> {
        let count = sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM book_instances WHERE status = 'Available'",
        )
        .fetch_one(&self.pool)
        .await?;

        Ok(count)
    }
}
