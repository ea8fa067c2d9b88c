//! Book instance CRUD workflows

use chrono::Utc;
use uuid::Uuid;

use crate::{
    error::AppResult,
    forms::{rules, Check, FieldFailure, FormData, Rule},
    models::{BookInstance, BookSummary, InstanceSummary, LoanStatus},
    repository::Repository,
};

const INSTANCE_CHECKS: &[Check] = &[
    Check {
        field: "book",
        rule: Rule::Required,
        message: "Book must be specified.",
    },
    Check {
        field: "imprint",
        rule: Rule::Required,
        message: "Imprint must not be empty.",
    },
    Check {
        field: "status",
        rule: Rule::Escape,
        message: "",
    },
    Check {
        field: "due_back",
        rule: Rule::IsoDate,
        message: "Invalid date.",
    },
];

/// Everything the instance form view needs.
pub struct InstanceFormView {
    pub instance: BookInstance,
    pub books: Vec<BookSummary>,
    pub errors: Vec<FieldFailure>,
}

/// Outcome of an instance create or update submission.
pub enum InstanceOutcome {
    Saved { id: Uuid },
    Invalid(Box<InstanceFormView>),
}

#[derive(Clone)]
pub struct InstancesService {
    repository: Repository,
}

impl InstancesService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    pub async fn list(&self) -> AppResult<Vec<InstanceSummary>> {
        self.repository.instances.list().await
    }

    /// Instance with its book populated. Used by the detail page and the
    /// delete confirmation page.
    pub async fn get(&self, id: Uuid) -> AppResult<BookInstance> {
        self.repository.instances.get(id).await
    }

    /// Book list for the instance form select.
    pub async fn form_books(&self) -> AppResult<Vec<BookSummary>> {
        self.repository.books.list().await
    }

    /// Create an instance from a form submission. Instances have no natural
    /// key, so creation always inserts.
    pub async fn create(&self, form: &FormData) -> AppResult<InstanceOutcome> {
        let (instance, errors) = Self::candidate(Uuid::new_v4(), form);
        if !errors.is_empty() {
            return self.invalid(instance, errors).await;
        }

        let id = self.repository.instances.create(&instance).await?;
        Ok(InstanceOutcome::Saved { id })
    }

    /// Overwrite an existing instance from a form submission. A missing id
    /// is an explicit not-found error.
    pub async fn update(&self, id: Uuid, form: &FormData) -> AppResult<InstanceOutcome> {
        let (instance, errors) = Self::candidate(id, form);
        if !errors.is_empty() {
            return self.invalid(instance, errors).await;
        }

        self.repository.instances.update(&instance).await?;
        Ok(InstanceOutcome::Saved { id })
    }

    /// Delete an instance by id, unconditionally: instances have no
    /// dependents.
    pub async fn delete(&self, id: Uuid) -> AppResult<()> {
        self.repository.instances.delete(id).await
    }

    /// Re-fetch the book list and hand the failed candidate back for
    /// re-rendering. The submission is discarded.
    async fn invalid(
        &self,
        instance: BookInstance,
        errors: Vec<FieldFailure>,
    ) -> AppResult<InstanceOutcome> {
        let books = self.form_books().await?;
        Ok(InstanceOutcome::Invalid(Box::new(InstanceFormView {
            instance,
            books,
            errors,
        })))
    }

    fn candidate(id: Uuid, form: &FormData) -> (BookInstance, Vec<FieldFailure>) {
        let (norm, errors) = rules::run(form, INSTANCE_CHECKS);
        let instance = BookInstance {
            id,
            // An unparseable book id falls through to the foreign key.
            book_id: Uuid::parse_str(norm.value("book")).unwrap_or_else(|_| Uuid::nil()),
            imprint: norm.value("imprint").to_string(),
            status: LoanStatus::from(norm.value("status")),
            due_back: norm
                .date("due_back")
                .unwrap_or_else(|| Utc::now().date_naive()),
            book: None,
        };
        (instance, errors)
    }
}
