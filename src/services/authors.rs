//! Author CRUD workflows

use uuid::Uuid;

use crate::{
    error::AppResult,
    forms::{rules, Check, FieldFailure, FormData, Rule},
    models::{Author, Book},
    repository::Repository,
};

const AUTHOR_CHECKS: &[Check] = &[
    Check {
        field: "first_name",
        rule: Rule::Required,
        message: "First name must be specified.",
    },
    Check {
        field: "first_name",
        rule: Rule::MaxLen(100),
        message: "First name must not exceed 100 characters.",
    },
    Check {
        field: "first_name",
        rule: Rule::Alphanumeric,
        message: "First name has non-alphanumeric characters.",
    },
    Check {
        field: "family_name",
        rule: Rule::Required,
        message: "Family name must be specified.",
    },
    Check {
        field: "family_name",
        rule: Rule::MaxLen(100),
        message: "Family name must not exceed 100 characters.",
    },
    Check {
        field: "family_name",
        rule: Rule::Alphanumeric,
        message: "Family name has non-alphanumeric characters.",
    },
    Check {
        field: "date_of_birth",
        rule: Rule::IsoDate,
        message: "Invalid date of birth.",
    },
    Check {
        field: "date_of_death",
        rule: Rule::IsoDate,
        message: "Invalid date of death.",
    },
];

/// Outcome of an author create or update submission. Validation failures
/// are data, not errors: the candidate comes back for re-rendering.
pub enum AuthorOutcome {
    Saved { id: Uuid },
    Invalid { author: Author, errors: Vec<FieldFailure> },
}

/// Outcome of an author delete request. The dependents check is part of the
/// type: an author with books is never deleted.
pub enum AuthorDelete {
    Deleted,
    Blocked { author: Author, books: Vec<Book> },
}

#[derive(Clone)]
pub struct AuthorsService {
    repository: Repository,
}

impl AuthorsService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    pub async fn list(&self) -> AppResult<Vec<Author>> {
        self.repository.authors.list().await
    }

    pub async fn get(&self, id: Uuid) -> AppResult<Author> {
        self.repository.authors.get(id).await
    }

    /// Author plus all books referencing them, fetched concurrently. Used
    /// by the detail page and the delete confirmation page.
    pub async fn detail(&self, id: Uuid) -> AppResult<(Author, Vec<Book>)> {
        tokio::try_join!(
            self.repository.authors.get(id),
            self.repository.books.by_author(id),
        )
    }

    /// Create an author from a form submission, deduplicating by exact
    /// first/family name match.
    pub async fn create(&self, form: &FormData) -> AppResult<AuthorOutcome> {
        match Self::candidate(Uuid::new_v4(), form) {
            Candidate::Invalid { author, errors } => Ok(AuthorOutcome::Invalid { author, errors }),
            Candidate::Valid(author) => {
                let (id, inserted) = self.repository.authors.create_or_get(&author).await?;
                if !inserted {
                    tracing::info!("author create deduplicated to existing record {}", id);
                }
                Ok(AuthorOutcome::Saved { id })
            }
        }
    }

    /// Overwrite an existing author from a form submission. A missing id is
    /// an explicit not-found error.
    pub async fn update(&self, id: Uuid, form: &FormData) -> AppResult<AuthorOutcome> {
        match Self::candidate(id, form) {
            Candidate::Invalid { author, errors } => Ok(AuthorOutcome::Invalid { author, errors }),
            Candidate::Valid(author) => {
                self.repository.authors.update(&author).await?;
                Ok(AuthorOutcome::Saved { id })
            }
        }
    }

    /// Delete an author unless books still reference them. A blocked delete
    /// returns the same data shape as the confirmation read.
    pub async fn delete(&self, id: Uuid) -> AppResult<AuthorDelete> {
        let books = self.repository.books.by_author(id).await?;
        if !books.is_empty() {
            let author = self.repository.authors.get(id).await?;
            tracing::info!(
                "author delete blocked: {} book(s) reference author {}",
                books.len(),
                id
            );
            return Ok(AuthorDelete::Blocked { author, books });
        }

        self.repository.authors.delete(id).await?;
        Ok(AuthorDelete::Deleted)
    }

    fn candidate(id: Uuid, form: &FormData) -> Candidate {
        let (norm, errors) = rules::run(form, AUTHOR_CHECKS);
        let author = Author {
            id,
            first_name: norm.value("first_name").to_string(),
            family_name: norm.value("family_name").to_string(),
            date_of_birth: norm.date("date_of_birth"),
            date_of_death: norm.date("date_of_death"),
        };
        if errors.is_empty() {
            Candidate::Valid(author)
        } else {
            Candidate::Invalid { author, errors }
        }
    }
}

enum Candidate {
    Valid(Author),
    Invalid { author: Author, errors: Vec<FieldFailure> },
}
