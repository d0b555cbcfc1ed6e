use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A theatre. `city` is free text and only ever compared through
/// [`crate::modules::catalog::core::city::normalize_city`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Venue {
    pub id: Uuid,
    pub name: String,
    pub city: String,
}

/// An auditorium inside a venue. Screenings reference screens, and reach
/// their venue (and city) through `venue_id`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Screen {
    pub id: Uuid,
    pub venue_id: Uuid,
    pub name: String,
    pub total_seats: i32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct SeatTemplate {
    pub id: Uuid,
    pub screen_id: Uuid,
    pub seat_number: String,
    pub seat_type: String,
    pub row_number: i32,
}
