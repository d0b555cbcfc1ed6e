use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::modules::catalog::core::screening::Screening;

pub const SCREENING_CREATED_EVENT_TYPE: &str = "ScreeningCreated";

/// Broadcast after a screening has been durably stored.
///
/// Fields are private so the event can only be derived from a persisted row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScreeningCreatedEvent {
    show_id: Uuid,
    movie_id: Uuid,
    screen_id: Uuid,
    show_time: NaiveDateTime,
}

impl ScreeningCreatedEvent {
    pub fn from_persisted(screening: &Screening) -> Self {
        Self {
            show_id: screening.id,
            movie_id: screening.movie_id,
            screen_id: screening.screen_id,
            show_time: screening.show_time,
        }
    }

    pub fn show_id(&self) -> Uuid {
        self.show_id
    }

    pub fn movie_id(&self) -> Uuid {
        self.movie_id
    }

    pub fn screen_id(&self) -> Uuid {
        self.screen_id
    }

    pub fn show_time(&self) -> NaiveDateTime {
        self.show_time
    }

    /// Routing key: every event about one screening lands on the same partition.
    pub fn partition_key(&self) -> String {
        self.show_id.to_string()
    }
}
