//! Catalog statistics for the home page

use serde::Serialize;

use crate::{error::AppResult, repository::Repository};

/// Record counts shown on the home page
#[derive(Debug, Clone, Serialize)]
pub struct CatalogCounts {
    pub books: i64,
    pub copies: i64,
    pub copies_available: i64,
    pub authors: i64,
    pub genres: i64,
}

#[derive(Clone)]
pub struct StatsService {
    repository: Repository,
}

impl StatsService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    /// All record counts, issued concurrently.
    pub async fn counts(&self) -> AppResult<CatalogCounts> {
        let (books, copies, copies_available, authors, genres) = tokio::try_join!(
            self.repository.books.count(),
            self.repository.instances.count(),
            self.repository.instances.count_available(),
            self.repository.authors.count(),
            self.repository.genres.count(),
        )?;

        Ok(CatalogCounts {
            books,
            copies,
            copies_available,
            authors,
            genres,
        })
    }

    /// Database connectivity probe for the readiness endpoint.
    pub async fn ping(&self) -> AppResult<()> {
        sqlx::query_scalar::<_, i32>("SELECT 1")
            .fetch_one(&self.repository.pool)
            .await?;
        Ok(())
    }
}
