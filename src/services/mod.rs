//! Catalog workflow services

pub mod authors;
pub mod books;
pub mod instances;
pub mod stats;

use crate::repository::Repository;

/// Container for all services
#[derive(Clone)]
pub struct Services {
    pub authors: authors::AuthorsService,
    pub books: books::BooksService,
    pub instances: instances::InstancesService,
    pub stats: stats::StatsService,
}

impl Services {
    /// Create all services with the given repository
    pub fn new(repository: Repository) -> Self {
        Self {
            authors: authors::AuthorsService::new(repository.clone()),
            books: books::BooksService::new(repository.clone()),
            instances: instances::InstancesService::new(repository.clone()),
            stats: stats::StatsService::new(repository),
        }
    }
}
