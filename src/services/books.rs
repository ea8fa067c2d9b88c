//! Book CRUD workflows

use uuid::Uuid;

use crate::{
    error::AppResult,
    forms::{rules, Check, FieldFailure, FormData, Rule},
    models::{Author, Book, BookInstance, BookSummary, Genre},
    repository::Repository,
};

const BOOK_CHECKS: &[Check] = &[
    Check {
        field: "title",
        rule: Rule::Required,
        message: "Title must not be empty.",
    },
    Check {
        field: "author",
        rule: Rule::Required,
        message: "Author must be specified.",
    },
    Check {
        field: "summary",
        rule: Rule::Required,
        message: "Summary must not be empty.",
    },
    Check {
        field: "isbn",
        rule: Rule::Required,
        message: "ISBN must not be empty.",
    },
];

/// Everything the book form view needs: the candidate, its selected genre
/// ids, the reference lists, and the validation failures.
pub struct BookFormView {
    pub book: Book,
    pub genre_ids: Vec<Uuid>,
    pub authors: Vec<Author>,
    pub genres: Vec<Genre>,
    pub errors: Vec<FieldFailure>,
}

/// Outcome of a book create or update submission.
pub enum BookOutcome {
    Saved { id: Uuid },
    Invalid(Box<BookFormView>),
}

/// Outcome of a book delete request. A book with copies is never deleted.
pub enum BookDelete {
    Deleted,
    Blocked {
        book: Book,
        instances: Vec<BookInstance>,
    },
}

#[derive(Clone)]
pub struct BooksService {
    repository: Repository,
}

impl BooksService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    pub async fn list(&self) -> AppResult<Vec<BookSummary>> {
        self.repository.books.list().await
    }

    pub async fn get(&self, id: Uuid) -> AppResult<Book> {
        self.repository.books.get(id).await
    }

    /// Book plus all copies referencing it, fetched concurrently. Used by
    /// the detail page and the delete confirmation page.
    pub async fn detail(&self, id: Uuid) -> AppResult<(Book, Vec<BookInstance>)> {
        tokio::try_join!(
            self.repository.books.get(id),
            self.repository.instances.by_book(id),
        )
    }

    /// Reference lists for an empty create form.
    pub async fn form_lists(&self) -> AppResult<(Vec<Author>, Vec<Genre>)> {
        tokio::try_join!(
            self.repository.authors.list(),
            self.repository.genres.list(),
        )
    }

    /// Existing book plus reference lists for the update form, fetched
    /// concurrently.
    pub async fn form_view(&self, id: Uuid) -> AppResult<BookFormView> {
        let (book, authors, genres) = tokio::try_join!(
            self.repository.books.get(id),
            self.repository.authors.list(),
            self.repository.genres.list(),
        )?;
        let genre_ids = book.genres.iter().map(|g| g.id).collect();
        Ok(BookFormView {
            book,
            genre_ids,
            authors,
            genres,
            errors: Vec::new(),
        })
    }

    /// Create a book from a form submission, deduplicating by exact title
    /// match. A dedup hit resolves to the existing record and leaves it
    /// untouched.
    pub async fn create(&self, form: &FormData) -> AppResult<BookOutcome> {
        let (book, genre_ids, errors) = Self::candidate(Uuid::new_v4(), form);
        if !errors.is_empty() {
            return self.invalid(book, genre_ids, errors).await;
        }

        let (id, inserted) = self.repository.books.create_or_get(&book, &genre_ids).await?;
        if !inserted {
            tracing::info!("book create deduplicated to existing record {}", id);
        }
        Ok(BookOutcome::Saved { id })
    }

    /// Overwrite an existing book from a form submission, replacing its
    /// genre set. A missing id is an explicit not-found error.
    pub async fn update(&self, id: Uuid, form: &FormData) -> AppResult<BookOutcome> {
        let (book, genre_ids, errors) = Self::candidate(id, form);
        if !errors.is_empty() {
            return self.invalid(book, genre_ids, errors).await;
        }

        self.repository.books.update(&book, &genre_ids).await?;
        Ok(BookOutcome::Saved { id })
    }

    /// Delete a book unless copies still reference it. A blocked delete
    /// returns the same data shape as the confirmation read.
    pub async fn delete(&self, id: Uuid) -> AppResult<BookDelete> {
        let instances = self.repository.instances.by_book(id).await?;
        if !instances.is_empty() {
            let book = self.repository.books.get(id).await?;
            tracing::info!(
                "book delete blocked: {} instance(s) reference book {}",
                instances.len(),
                id
            );
            return Ok(BookDelete::Blocked { book, instances });
        }

        self.repository.books.delete(id).await?;
        Ok(BookDelete::Deleted)
    }

    /// Re-fetch the reference lists and hand the failed candidate back for
    /// re-rendering. The submission is discarded.
    async fn invalid(
        &self,
        book: Book,
        genre_ids: Vec<Uuid>,
        errors: Vec<FieldFailure>,
    ) -> AppResult<BookOutcome> {
        let (authors, genres) = self.form_lists().await?;
        Ok(BookOutcome::Invalid(Box::new(BookFormView {
            book,
            genre_ids,
            authors,
            genres,
            errors,
        })))
    }

    fn candidate(id: Uuid, form: &FormData) -> (Book, Vec<Uuid>, Vec<FieldFailure>) {
        let (norm, errors) = rules::run(form, BOOK_CHECKS);
        // The genre field is coerced to a list before validation; elements
        // that are not ids are dropped.
        let genre_ids: Vec<Uuid> = form
            .values("genre")
            .iter()
            .filter_map(|g| Uuid::parse_str(g).ok())
            .collect();
        let book = Book {
            id,
            title: norm.value("title").to_string(),
            // An unparseable author id falls through to the foreign key.
            author_id: Uuid::parse_str(norm.value("author")).unwrap_or_else(|_| Uuid::nil()),
            summary: norm.value("summary").to_string(),
            isbn: norm.value("isbn").to_string(),
            author: None,
            genres: Vec::new(),
        };
        (book, genre_ids, errors)
    }
}
