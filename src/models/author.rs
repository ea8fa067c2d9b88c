//! Author model

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_json::json;
use sqlx::FromRow;
use uuid::Uuid;

use super::{format_date, iso_date};

/// Full author model from database
#[derive(Debug, Clone, Default, Serialize, Deserialize, FromRow)]
pub struct Author {
    pub id: Uuid,
    pub first_name: String,
    pub family_name: String,
    pub date_of_birth: Option<NaiveDate>,
    pub date_of_death: Option<NaiveDate>,
}

impl Author {
    /// Canonical URL for an author id.
    pub fn url_for(id: Uuid) -> String {
        format!("/catalog/author/{}", id)
    }

    /// Display name, `family, first`. Empty when either part is missing.
    pub fn name(&self) -> String {
        if self.first_name.is_empty() || self.family_name.is_empty() {
            return String::new();
        }
        format!("{}, {}", self.family_name, self.first_name)
    }

    pub fn url(&self) -> String {
        Self::url_for(self.id)
    }

    pub fn date_of_birth_formatted(&self) -> String {
        format_date(self.date_of_birth)
    }

    pub fn date_of_death_formatted(&self) -> String {
        format_date(self.date_of_death)
    }

    /// Birth and death dates joined for display, e.g. `Oct 21, 1929 - Jan 22, 2018`.
    pub fn lifespan(&self) -> String {
        format!(
            "{} - {}",
            self.date_of_birth_formatted(),
            self.date_of_death_formatted()
        )
    }

    /// Template payload including the derived display fields.
    pub fn view(&self) -> serde_json::Value {
        json!({
            "id": self.id,
            "first_name": self.first_name,
            "family_name": self.family_name,
            "date_of_birth": iso_date(self.date_of_birth),
            "date_of_death": iso_date(self.date_of_death),
            "date_of_birth_formatted": self.date_of_birth_formatted(),
            "date_of_death_formatted": self.date_of_death_formatted(),
            "name": self.name(),
            "lifespan": self.lifespan(),
            "url": self.url(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn author() -> Author {
        Author {
            id: Uuid::nil(),
            first_name: "Ursula".to_string(),
            family_name: "LeGuin".to_string(),
            date_of_birth: NaiveDate::from_ymd_opt(1929, 10, 21),
            date_of_death: NaiveDate::from_ymd_opt(2018, 1, 22),
        }
    }

    #[test]
    fn test_name() {
        assert_eq!(author().name(), "LeGuin, Ursula");
    }

    #[test]
    fn test_name_empty_when_part_missing() {
        let mut a = author();
        a.first_name.clear();
        assert_eq!(a.name(), "");
    }

    #[test]
    fn test_url() {
        assert_eq!(
            author().url(),
            "/catalog/author/00000000-0000-0000-0000-000000000000"
        );
    }

    #[test]
    fn test_date_formatting() {
        let a = author();
        assert_eq!(a.date_of_birth_formatted(), "Oct 21, 1929");
        assert_eq!(a.lifespan(), "Oct 21, 1929 - Jan 22, 2018");
    }

    #[test]
    fn test_absent_dates_format_empty() {
        let a = Author::default();
        assert_eq!(a.date_of_birth_formatted(), "");
        assert_eq!(a.lifespan(), " - ");
    }

    #[test]
    fn test_view_carries_iso_dates_for_form_inputs() {
        let v = author().view();
        assert_eq!(v["date_of_birth"], "1929-10-21");
        assert_eq!(v["name"], "LeGuin, Ursula");
    }
}
