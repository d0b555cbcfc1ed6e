use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A scheduled showing of a movie on a screen.
///
/// Screenings are immutable once persisted. The only way to obtain a new one
/// is the create-screening workflow, which assigns `id`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Screening {
    pub id: Uuid,
    pub movie_id: Uuid,
    pub screen_id: Uuid,
    pub show_time: NaiveDateTime,
    pub price_cents: Option<i64>,
}
