use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Movie {
    pub id: Uuid,
    pub title: String,
    pub language: String,
    pub genre: String,
    pub duration_minutes: i32,
    pub release_date: NaiveDate,
    pub active: bool,
}

impl Movie {
    /// Case-insensitive substring match on the title. An empty fragment matches everything.
    pub fn title_contains(&self, fragment: &str) -> bool {
        self.title
            .to_lowercase()
            .contains(&fragment.trim().to_lowercase())
    }
}
