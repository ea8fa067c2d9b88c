//! Authors repository for database operations

use sqlx::{Pool, Postgres};
use uuid::Uuid;

use crate::{
    error::{AppError, AppResult},
    models::Author,
};

#[derive(Clone)]
pub struct AuthorsRepository {
    pool: Pool<Postgres>,
}

impl AuthorsRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// All authors, sorted by name.
    pub async fn list(&self) -> AppResult<Vec<Author>> {
        let authors = sqlx::query_as::<_, Author>(
            r#"
            SELECT id, first_name, family_name, date_of_birth, date_of_death
            FROM authors
            ORDER BY family_name, first_name
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(authors)
    }

    /// Get author by ID.
    pub async fn get(&self, id: Uuid) -> AppResult<Author> {
        sqlx::query_as::<_, Author>(
            r#"
            SELECT id, first_name, family_name, date_of_birth, date_of_death
            FROM authors
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Author with id {} not found", id)))
    }

    /// Conditional insert keyed on (first_name, family_name): inserts the
    /// candidate, or resolves to the existing record when the name pair is
    /// already taken. Returns the canonical id and whether a row was
    /// actually inserted. A single atomic statement, so two concurrent
    /// creates with the same name cannot both insert.
    pub async fn create_or_get(&self, author: &Author) -> AppResult<(Uuid, bool)> {
        let (id, inserted): (Uuid, bool) = sqlx::query_as(
            r#"
            INSERT INTO authors (id, first_name, family_name, date_of_birth, date_of_death)
            VALUES ($1, $2, $3, $4, $5)
            ON CONFLICT (first_name, family_name)
            DO UPDATE SET first_name = EXCLUDED.first_name
            RETURNING id, (xmax = 0) AS inserted
            "#,
        )
        .bind(author.id)
        .bind(&author.first_name)
        .bind(&author.family_name)
        .bind(author.date_of_birth)
        .bind(author.date_of_death)
        .fetch_one(&self.pool)
        .await?;

        Ok((id, inserted))
    }

    /// Overwrite all fields of an existing author. Fails with not-found when
    /// the id does not exist.
    pub async fn update(&self, author: &Author) -> AppResult<()> {
        sqlx::query_scalar::<_, Uuid>(
            r#"
            UPDATE authors
            SET first_name = $2, family_name = $3, date_of_birth = $4, date_of_death = $5
            WHERE id = $1
            RETURNING id
            "#,
        )
        .bind(author.id)
        .bind(&author.first_name)
        .bind(&author.family_name)
        .bind(author.date_of_birth)
        .bind(author.date_of_death)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Author with id {} not found", author.id)))?;

        Ok(())
    }

    /// Delete an author by id. Deleting an id that no longer exists is a
    /// no-op.
    pub async fn delete(&self, id: Uuid) -> AppResult<()> {
        sqlx::query("DELETE FROM authors WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    pub async fn count(&self) -> AppResult<i64> {
        let count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM authors")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }
}
