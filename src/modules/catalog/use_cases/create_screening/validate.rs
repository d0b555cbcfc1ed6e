use chrono::NaiveDateTime;
use uuid::Uuid;

use crate::modules::catalog::core::screening::Screening;
use crate::modules::catalog::use_cases::create_screening::command::ScreeningDraft;
use crate::modules::catalog::use_cases::create_screening::handler::CreateScreeningError;

/// A draft that passed shape validation. It has no identity yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidScreening {
    pub movie_id: Uuid,
    pub screen_id: Uuid,
    pub show_time: NaiveDateTime,
    pub price_cents: Option<i64>,
}

impl ValidScreening {
    pub fn with_identity(self, id: Uuid) -> Screening {
        Screening {
            id,
            movie_id: self.movie_id,
            screen_id: self.screen_id,
            show_time: self.show_time,
            price_cents: self.price_cents,
        }
    }
}

pub fn validate_draft(draft: ScreeningDraft) -> Result<ValidScreening, CreateScreeningError> {
    let missing = |field: &str| CreateScreeningError::InvalidInput(format!("{field} is required"));

    let movie_id = draft.movie_id.ok_or_else(|| missing("movieId"))?;
    let screen_id = draft.screen_id.ok_or_else(|| missing("screenId"))?;
    let show_time = draft.show_time.ok_or_else(|| missing("showTime"))?;
    if draft.price_cents.is_some_and(|price| price < 0) {
        return Err(CreateScreeningError::InvalidInput(
            "priceCents must not be negative".into(),
        ));
    }

    Ok(ValidScreening {
        movie_id,
        screen_id,
        show_time,
        price_cents: draft.price_cents,
    })
}
