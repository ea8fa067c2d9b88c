//! Books repository for database operations

use sqlx::{Pool, Postgres};
use uuid::Uuid;

use crate::{
    error::{AppError, AppResult},
    models::{Author, Book, BookSummary, Genre},
};

#[derive(Clone)]
pub struct BooksRepository {
    pool: Pool<Postgres>,
}

impl BooksRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// All books as list rows with the author pre-joined, sorted by title.
    pub async fn list(&self) -> AppResult<Vec<BookSummary>> {
        let books = sqlx::query_as::<_, BookSummary>(
            r#"
            SELECT b.id, b.title, (a.family_name || ', ' || a.first_name) AS author
            FROM books b
            JOIN authors a ON a.id = b.author_id
            ORDER BY b.title
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(books)
    }

    /// Get a book by ID with its author and genres populated.
    pub async fn get(&self, id: Uuid) -> AppResult<Book> {
        let mut book = sqlx::query_as::<_, Book>(
            "SELECT id, title, author_id, summary, isbn FROM books WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Book with id {} not found", id)))?;

        book.author = sqlx::query_as::<_, Author>(
            r#"
            SELECT id, first_name, family_name, date_of_birth, date_of_death
            FROM authors
            WHERE id = $1
            "#,
        )
        .bind(book.author_id)
        .fetch_optional(&self.pool)
        .await?;

        book.genres = sqlx::query_as::<_, Genre>(
            r#"
            SELECT g.id, g.name
            FROM genres g
            JOIN book_genres bg ON bg.genre_id = g.id
            WHERE bg.book_id = $1
            ORDER BY g.name
            "#,
        )
        .bind(id)
        .fetch_all(&self.pool)
        .await?;

        Ok(book)
    }

    /// All books referencing an author, sorted by title. Relations are left
    /// unpopulated.
    pub async fn by_author(&self, author_id: Uuid) -> AppResult<Vec<Book>> {
        let books = sqlx::query_as::<_, Book>(
            "SELECT id, title, author_id, summary, isbn FROM books WHERE author_id = $1 ORDER BY title",
        )
        .bind(author_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(books)
    }

    /// Conditional insert keyed on title: inserts the candidate, or resolves
    /// to the existing record when the title is already taken. Genres are
    /// attached only for a freshly inserted book; a dedup hit leaves the
    /// existing record untouched.
    pub async fn create_or_get(&self, book: &Book, genre_ids: &[Uuid]) -> AppResult<(Uuid, bool)> {
        let (id, inserted): (Uuid, bool) = sqlx::query_as(
            r#"
            INSERT INTO books (id, title, author_id, summary, isbn)
            VALUES ($1, $2, $3, $4, $5)
            ON CONFLICT (title)
            DO UPDATE SET title = EXCLUDED.title
            RETURNING id, (xmax = 0) AS inserted
            "#,
        )
        .bind(book.id)
        .bind(&book.title)
        .bind(book.author_id)
        .bind(&book.summary)
        .bind(&book.isbn)
        .fetch_one(&self.pool)
        .await?;

        if inserted {
            self.set_genres(id, genre_ids).await?;
        }

        Ok((id, inserted))
    }

    /// Overwrite all fields of an existing book, replacing its genre set.
    /// Fails with not-found when the id does not exist.
    pub async fn update(&self, book: &Book, genre_ids: &[Uuid]) -> AppResult<()> {
        sqlx::query_scalar::<_, Uuid>(
            r#"
            UPDATE books
            SET title = $2, author_id = $3, summary = $4, isbn = $5
            WHERE id = $1
            RETURNING id
            "#,
        )
        .bind(book.id)
        .bind(&book.title)
        .bind(book.author_id)
        .bind(&book.summary)
        .bind(&book.isbn)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Book with id {} not found", book.id)))?;

        self.set_genres(book.id, genre_ids).await
    }

    /// Delete a book by id. The genre junction rows go with it. Deleting an
    /// id that no longer exists is a no-op.
    pub async fn delete(&self, id: Uuid) -> AppResult<()> {
        sqlx::query("DELETE FROM books WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    pub async fn count(&self) -> AppResult<i64> {
        let count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM books")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }

    /// Replace all genres for a book: delete existing rows then insert new ones.
    async fn set_genres(&self, book_id: Uuid, genre_ids: &[Uuid]) -> AppResult<()> {
        sqlx::query("DELETE FROM book_genres WHERE book_id = $1")
            .bind(book_id)
            .execute(&self.pool)
            .await?;

        for genre_id in genre_ids {
            sqlx::query(
                r#"
                INSERT INTO book_genres (book_id, genre_id)
                VALUES ($1, $2)
                ON CONFLICT DO NOTHING
                "#,
            )
            .bind(book_id)
            .bind(genre_id)
            .execute(&self.pool)
            .await?;
        }

        Ok(())
    }
}
