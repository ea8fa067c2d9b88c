//! Genre model.
//!
//! Genres have no controller of their own; they exist to be referenced by
//! books and listed on book forms.

use serde::{Deserialize, Serialize};
use serde_json::json;
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, Default, Serialize, Deserialize, FromRow)]
pub struct Genre {
    pub id: Uuid,
    pub name: String,
}

impl Genre {
    pub fn view(&self) -> serde_json::Value {
        json!({
            "id": self.id,
            "name": self.name,
        })
    }
}
