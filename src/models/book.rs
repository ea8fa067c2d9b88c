//! Book model and related types

use serde::{Deserialize, Serialize};
use serde_json::json;
use sqlx::FromRow;
use uuid::Uuid;

use super::{author::Author, genre::Genre};

/// Full book model (relations loaded separately)
#[derive(Debug, Clone, Default, Serialize, Deserialize, FromRow)]
pub struct Book {
    pub id: Uuid,
    pub title: String,
    pub author_id: Uuid,
    pub summary: String,
    pub isbn: String,
    #[sqlx(skip)]
    #[serde(default)]
    pub author: Option<Author>,
    #[sqlx(skip)]
    #[serde(default)]
    pub genres: Vec<Genre>,
}

impl Book {
    /// Canonical URL for a book id.
    pub fn url_for(id: Uuid) -> String {
        format!("/catalog/book/{}", id)
    }

    pub fn url(&self) -> String {
        Self::url_for(self.id)
    }

    /// Template payload including the derived display fields and any
    /// populated relations.
    pub fn view(&self) -> serde_json::Value {
        json!({
            "id": self.id,
            "title": self.title,
            "author_id": self.author_id,
            "summary": self.summary,
            "isbn": self.isbn,
            "url": self.url(),
            "author": self.author.as_ref().map(Author::view),
            "genres": self.genres.iter().map(Genre::view).collect::<Vec<_>>(),
        })
    }
}

/// Short book representation for lists: the author comes pre-joined so the
/// rendering layer never issues secondary queries.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct BookSummary {
    pub id: Uuid,
    pub title: String,
    pub author: String,
}

impl BookSummary {
    pub fn view(&self) -> serde_json::Value {
        json!({
            "id": self.id,
            "title": self.title,
            "author": self.author,
            "url": Book::url_for(self.id),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_url() {
        let book = Book {
            id: Uuid::nil(),
            ..Book::default()
        };
        assert_eq!(book.url(), "/catalog/book/00000000-0000-0000-0000-000000000000");
    }

    #[test]
    fn test_view_without_relations() {
        let v = Book::default().view();
        assert!(v["author"].is_null());
        assert_eq!(v["genres"], json!([]));
    }
}
