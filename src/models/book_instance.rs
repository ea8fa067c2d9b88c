//! Book instance (physical copy) model and related types

use chrono::{NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use serde_json::json;
use sqlx::FromRow;
use uuid::Uuid;

use super::book::Book;

/// Loan status of a copy. Membership is also enforced by the `loan_status`
/// enum type in the database schema.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "loan_status")]
pub enum LoanStatus {
    Available,
    Maintenance,
    Loaned,
    Reserved,
}

impl LoanStatus {
    pub const ALL: [LoanStatus; 4] = [
        LoanStatus::Available,
        LoanStatus::Maintenance,
        LoanStatus::Loaned,
        LoanStatus::Reserved,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            LoanStatus::Available => "Available",
            LoanStatus::Maintenance => "Maintenance",
            LoanStatus::Loaned => "Loaned",
            LoanStatus::Reserved => "Reserved",
        }
    }
}

impl Default for LoanStatus {
    fn default() -> Self {
        LoanStatus::Maintenance
    }
}

impl From<&str> for LoanStatus {
    fn from(s: &str) -> Self {
        match s {
            "Available" => LoanStatus::Available,
            "Maintenance" => LoanStatus::Maintenance,
            "Loaned" => LoanStatus::Loaned,
            "Reserved" => LoanStatus::Reserved,
            _ => LoanStatus::default(),
        }
    }
}

impl std::fmt::Display for LoanStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Full book instance model (book relation loaded separately)
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct BookInstance {
    pub id: Uuid,
    pub book_id: Uuid,
    pub imprint: String,
    pub status: LoanStatus,
    pub due_back: NaiveDate,
    #[sqlx(skip)]
    #[serde(default)]
    pub book: Option<Book>,
}

impl Default for BookInstance {
    fn default() -> Self {
        Self {
            id: Uuid::nil(),
            book_id: Uuid::nil(),
            imprint: String::new(),
            status: LoanStatus::default(),
            due_back: Utc::now().date_naive(),
            book: None,
        }
    }
}

impl BookInstance {
    /// Canonical URL for a book instance id.
    pub fn url_for(id: Uuid) -> String {
        format!("/catalog/bookinstance/{}", id)
    }

    pub fn url(&self) -> String {
        Self::url_for(self.id)
    }

    pub fn due_back_formatted(&self) -> String {
        self.due_back.format("%b %-d, %Y").to_string()
    }

    /// ISO form of the due-back date (used as the form input value).
    pub fn due_back_iso(&self) -> String {
        self.due_back.to_string()
    }

    /// Template payload including the derived display fields.
    pub fn view(&self) -> serde_json::Value {
        json!({
            "id": self.id,
            "book_id": self.book_id,
            "imprint": self.imprint,
            "status": self.status.as_str(),
            "due_back": self.due_back_iso(),
            "due_back_formatted": self.due_back_formatted(),
            "url": self.url(),
            "book": self.book.as_ref().map(Book::view),
        })
    }
}

/// Short instance representation for lists, with the book title pre-joined.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct InstanceSummary {
    pub id: Uuid,
    pub title: String,
    pub imprint: String,
    pub status: LoanStatus,
    pub due_back: NaiveDate,
}

impl InstanceSummary {
    pub fn view(&self) -> serde_json::Value {
        json!({
            "id": self.id,
            "title": self.title,
            "imprint": self.imprint,
            "status": self.status.as_str(),
            "due_back_formatted": super::format_date(Some(self.due_back)),
            "url": BookInstance::url_for(self.id),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_defaults_to_maintenance() {
        assert_eq!(LoanStatus::default(), LoanStatus::Maintenance);
        assert_eq!(BookInstance::default().status, LoanStatus::Maintenance);
    }

    #[test]
    fn test_status_from_unknown_string_is_default() {
        assert_eq!(LoanStatus::from("Borrowed"), LoanStatus::Maintenance);
        assert_eq!(LoanStatus::from("Available"), LoanStatus::Available);
    }

    #[test]
    fn test_due_back_defaults_to_today() {
        assert_eq!(BookInstance::default().due_back, Utc::now().date_naive());
    }

    #[test]
    fn test_due_back_formats() {
        let instance = BookInstance {
            due_back: NaiveDate::from_ymd_opt(2023, 4, 7).unwrap(),
            ..BookInstance::default()
        };
        assert_eq!(instance.due_back_formatted(), "Apr 7, 2023");
        assert_eq!(instance.due_back_iso(), "2023-04-07");
    }

    #[test]
    fn test_url() {
        assert_eq!(
            BookInstance::default().url(),
            "/catalog/bookinstance/00000000-0000-0000-0000-000000000000"
        );
    }
}
