// Shared catalog fixtures: entity factories, a seeded world, and wired use cases.

use crate::modules::catalog::adapters::outbound::in_memory::InMemoryCatalog;
use crate::modules::catalog::adapters::outbound::screening_notifier::{
    SHOW_CREATED_TOPIC, ScreeningNotifier,
};
use crate::modules::catalog::core::movie::Movie;
use crate::modules::catalog::core::ports::{
    MovieRepository, ScreenRepository, ScreeningRepository, SeatTemplateRepository,
    VenueRepository,
};
use crate::modules::catalog::core::screening::Screening;
use crate::modules::catalog::core::venue::{Screen, SeatTemplate, Venue};
use crate::modules::catalog::use_cases::create_screening::handler::CreateScreeningHandler;
use crate::modules::catalog::use_cases::find_screenings::handler::ScreeningDiscovery;
use crate::modules::catalog::use_cases::find_screenings::query::DiscoveryStrategy;
use crate::shared::core::retry::RetryPolicy;
use crate::shared::infrastructure::event_bus::in_memory::InMemoryEventProducer;
use chrono::{NaiveDate, NaiveDateTime};
use std::sync::Arc;
use std::time::Duration;
use uuid::Uuid;

pub fn show_time() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2025, 3, 1)
        .unwrap()
        .and_hms_opt(19, 30, 0)
        .unwrap()
}

pub fn movie(title: &str, active: bool) -> Movie {
    Movie {
        id: Uuid::now_v7(),
        title: title.to_string(),
        language: "English".to_string(),
        genre: "Sci-Fi".to_string(),
        duration_minutes: 155,
        release_date: NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(),
        active,
    }
}

pub fn venue(name: &str, city: &str) -> Venue {
    Venue {
        id: Uuid::now_v7(),
        name: name.to_string(),
        city: city.to_string(),
    }
}

pub fn screen(venue_id: Uuid, name: &str) -> Screen {
    Screen {
        id: Uuid::now_v7(),
        venue_id,
        name: name.to_string(),
        total_seats: 120,
    }
}

pub fn seat(screen_id: Uuid, row_number: i32, seat_number: &str) -> SeatTemplate {
    SeatTemplate {
        id: Uuid::now_v7(),
        screen_id,
        seat_number: seat_number.to_string(),
        seat_type: "REGULAR".to_string(),
        row_number,
    }
}

pub fn screening_of(movie_id: Uuid, screen_id: Uuid) -> Screening {
    Screening {
        id: Uuid::now_v7(),
        movie_id,
        screen_id,
        show_time: show_time(),
        price_cents: Some(999),
    }
}

pub fn fast_retry() -> RetryPolicy {
    RetryPolicy {
        max_retries: 1,
        initial_delay: Duration::from_millis(1),
        max_delay: Duration::from_millis(1),
        multiplier: 1.0,
    }
}

pub fn discovery_over(strategy: DiscoveryStrategy, catalog: Arc<InMemoryCatalog>) -> ScreeningDiscovery {
    ScreeningDiscovery::new(strategy, catalog.clone(), catalog.clone(), catalog)
}

pub fn creation_over(
    catalog: Arc<InMemoryCatalog>,
    producer: Arc<InMemoryEventProducer>,
) -> CreateScreeningHandler {
    creation_with_retry(catalog, producer, fast_retry())
}

pub fn creation_with_retry(
    catalog: Arc<InMemoryCatalog>,
    producer: Arc<InMemoryEventProducer>,
    retry: RetryPolicy,
) -> CreateScreeningHandler {
    let notifier = Arc::new(ScreeningNotifier::new(SHOW_CREATED_TOPIC, producer, retry));
    CreateScreeningHandler::new(catalog.clone(), catalog.clone(), catalog, notifier)
}

/// One retry after `delay`. Long enough for a test to cancel the caller mid-broadcast.
pub fn slow_retry(delay: Duration) -> RetryPolicy {
    RetryPolicy {
        max_retries: 1,
        initial_delay: delay,
        max_delay: delay,
        multiplier: 1.0,
    }
}

/// Dune plays twice in Mumbai (two venues, one spelled "MUMBAI") and once in Pune.
/// Heat plays once in Mumbai. One Mumbai screen has seat templates.
pub struct CatalogSeed {
    pub movie_id: Uuid,
    pub other_movie_id: Uuid,
    pub inactive_movie_id: Uuid,
    pub mumbai_venue_ids: Vec<Uuid>,
    pub mumbai_screen_ids: Vec<Uuid>,
    pub pune_screen_id: Uuid,
    /// Sorted by id.
    pub mumbai_screenings: Vec<Screening>,
}

impl CatalogSeed {
    pub async fn mumbai_and_pune(catalog: &InMemoryCatalog) -> Self {
        let dune = MovieRepository::save(catalog, movie("Dune: Part Two", true)).await.unwrap();
        let heat = MovieRepository::save(catalog, movie("Heat", true)).await.unwrap();
        let old = MovieRepository::save(catalog, movie("Dune (1984)", false)).await.unwrap();

        let phoenix = VenueRepository::save(catalog, venue("PVR Phoenix", "Mumbai")).await.unwrap();
        let nariman = VenueRepository::save(catalog, venue("INOX Nariman", "MUMBAI")).await.unwrap();
        let pride = VenueRepository::save(catalog, venue("City Pride", "Pune")).await.unwrap();

        let audi_1 = ScreenRepository::save(catalog, screen(phoenix.id, "Audi 1")).await.unwrap();
        let audi_2 = ScreenRepository::save(catalog, screen(phoenix.id, "IMAX")).await.unwrap();
        let insignia = ScreenRepository::save(catalog, screen(nariman.id, "Insignia")).await.unwrap();
        let pune = ScreenRepository::save(catalog, screen(pride.id, "Screen 1")).await.unwrap();

        SeatTemplateRepository::save(catalog, seat(audi_1.id, 1, "A1")).await.unwrap();
        SeatTemplateRepository::save(catalog, seat(audi_1.id, 1, "A2")).await.unwrap();

        let mut mumbai_screenings = vec![
            ScreeningRepository::save(catalog, screening_of(dune.id, audi_1.id)).await.unwrap(),
            ScreeningRepository::save(catalog, screening_of(dune.id, insignia.id)).await.unwrap(),
        ];
        mumbai_screenings.sort_by_key(|s| s.id);
        ScreeningRepository::save(catalog, screening_of(dune.id, pune.id)).await.unwrap();
        ScreeningRepository::save(catalog, screening_of(heat.id, audi_2.id)).await.unwrap();

        Self {
            movie_id: dune.id,
            other_movie_id: heat.id,
            inactive_movie_id: old.id,
            mumbai_venue_ids: vec![phoenix.id, nariman.id],
            mumbai_screen_ids: vec![audi_1.id, audi_2.id, insignia.id],
            pune_screen_id: pune.id,
            mumbai_screenings,
        }
    }
}
