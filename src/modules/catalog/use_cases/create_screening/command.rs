use chrono::NaiveDateTime;
use serde::Deserialize;
use uuid::Uuid;

/// Caller-supplied screening. Everything is optional at this stage;
/// `validate_draft` decides what is required. `id` is always discarded.
/// Unknown fields are rejected so a misspelled or fractional `price` is not
/// silently dropped.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct ScreeningDraft {
    #[serde(default)]
    pub id: Option<Uuid>,
    #[serde(default)]
    pub movie_id: Option<Uuid>,
    #[serde(default)]
    pub screen_id: Option<Uuid>,
    #[serde(default)]
    pub show_time: Option<NaiveDateTime>,
    #[serde(default)]
    pub price_cents: Option<i64>,
}
