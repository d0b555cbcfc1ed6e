// In memory implementation of every catalog storage port.
//
// Purpose
// - Exercise use cases and the HTTP surface without a database.
//
// Responsibilities
// - Keep rows in insertion order so query results are stable for a given state.
// - Apply the same case-insensitive city rule as the SQL adapter.
// - Simulate an offline or slow backend and count screening queries for assertions.

use crate::modules::catalog::core::city::same_city;
use crate::modules::catalog::core::movie::Movie;
use crate::modules::catalog::core::ports::{
    MovieRepository, ScreenRepository, ScreeningRepository, SeatTemplateRepository, StorageError,
    VenueRepository,
};
use crate::modules::catalog::core::screening::Screening;
use crate::modules::catalog::core::venue::{Screen, SeatTemplate, Venue};
use std::collections::HashSet;
use std::sync::atomic::{AtomicBool, AtomicU32, AtomicU64, Ordering};
use std::time::Duration;
use tokio::sync::RwLock;
use uuid::Uuid;

#[derive(Default)]
pub struct InMemoryCatalog {
    movies: RwLock<Vec<Movie>>,
    venues: RwLock<Vec<Venue>>,
    screens: RwLock<Vec<Screen>>,
    seats: RwLock<Vec<SeatTemplate>>,
    screenings: RwLock<Vec<Screening>>,
    screening_queries: AtomicU32,
    delay_ms: AtomicU64,
    is_offline: AtomicBool,
}

impl InMemoryCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn toggle_offline(&self) {
        self.is_offline.fetch_xor(true, Ordering::SeqCst);
    }

    /// Every subsequent call sleeps this long before touching the data.
    pub fn set_delay_ms(&self, ms: u64) {
        self.delay_ms.store(ms, Ordering::SeqCst);
    }

    /// Number of read queries issued against the screenings collection.
    pub fn screening_queries(&self) -> u32 {
        self.screening_queries.load(Ordering::SeqCst)
    }

    async fn reach(&self) -> Result<(), StorageError> {
        let delay = self.delay_ms.load(Ordering::SeqCst);
        if delay > 0 {
            tokio::time::sleep(Duration::from_millis(delay)).await;
        }
        if self.is_offline.load(Ordering::SeqCst) {
            return Err(StorageError::Unavailable("Catalog storage offline".into()));
        }
        Ok(())
    }

    async fn reach_screenings(&self) -> Result<(), StorageError> {
        self.screening_queries.fetch_add(1, Ordering::SeqCst);
        self.reach().await
    }
}

fn insert_unique<T: Clone>(
    rows: &mut Vec<T>,
    row: T,
    id_of: impl Fn(&T) -> Uuid,
    collection: &str,
) -> Result<T, StorageError> {
    let id = id_of(&row);
    if rows.iter().any(|existing| id_of(existing) == id) {
        return Err(StorageError::Constraint(format!(
            "duplicate key {id} in {collection}"
        )));
    }
    rows.push(row.clone());
    Ok(row)
}

#[async_trait::async_trait]
impl MovieRepository for InMemoryCatalog {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Movie>, StorageError> {
        self.reach().await?;
        Ok(self.movies.read().await.iter().find(|m| m.id == id).cloned())
    }

    async fn find_active(&self) -> Result<Vec<Movie>, StorageError> {
        self.reach().await?;
        Ok(self
            .movies
            .read()
            .await
            .iter()
            .filter(|m| m.active)
            .cloned()
            .collect())
    }

    async fn search_active_by_title(&self, fragment: &str) -> Result<Vec<Movie>, StorageError> {
        self.reach().await?;
        Ok(self
            .movies
            .read()
            .await
            .iter()
            .filter(|m| m.active && m.title_contains(fragment))
            .cloned()
            .collect())
    }

    async fn save(&self, movie: Movie) -> Result<Movie, StorageError> {
        self.reach().await?;
        insert_unique(&mut *self.movies.write().await, movie, |m| m.id, "movies")
    }

    async fn delete_all(&self) -> Result<(), StorageError> {
        self.reach().await?;
        self.movies.write().await.clear();
        Ok(())
    }
}

#[async_trait::async_trait]
impl VenueRepository for InMemoryCatalog {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Venue>, StorageError> {
        self.reach().await?;
        Ok(self.venues.read().await.iter().find(|v| v.id == id).cloned())
    }

    async fn find_by_city(&self, city: &str) -> Result<Vec<Venue>, StorageError> {
        self.reach().await?;
        Ok(self
            .venues
            .read()
            .await
            .iter()
            .filter(|v| same_city(&v.city, city))
            .cloned()
            .collect())
    }

    async fn save(&self, venue: Venue) -> Result<Venue, StorageError> {
        self.reach().await?;
        insert_unique(&mut *self.venues.write().await, venue, |v| v.id, "venues")
    }

    async fn delete_all(&self) -> Result<(), StorageError> {
        self.reach().await?;
        self.venues.write().await.clear();
        Ok(())
    }
}

#[async_trait::async_trait]
impl ScreenRepository for InMemoryCatalog {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Screen>, StorageError> {
        self.reach().await?;
        Ok(self.screens.read().await.iter().find(|s| s.id == id).cloned())
    }

    async fn find_by_venue_id(&self, venue_id: Uuid) -> Result<Vec<Screen>, StorageError> {
        self.reach().await?;
        Ok(self
            .screens
            .read()
            .await
            .iter()
            .filter(|s| s.venue_id == venue_id)
            .cloned()
            .collect())
    }

    async fn find_by_venue_ids(
        &self,
        venue_ids: &HashSet<Uuid>,
    ) -> Result<Vec<Screen>, StorageError> {
        self.reach().await?;
        Ok(self
            .screens
            .read()
            .await
            .iter()
            .filter(|s| venue_ids.contains(&s.venue_id))
            .cloned()
            .collect())
    }

    async fn save(&self, screen: Screen) -> Result<Screen, StorageError> {
        self.reach().await?;
        insert_unique(&mut *self.screens.write().await, screen, |s| s.id, "screens")
    }

    async fn delete_all(&self) -> Result<(), StorageError> {
        self.reach().await?;
        self.screens.write().await.clear();
        Ok(())
    }
}

#[async_trait::async_trait]
impl SeatTemplateRepository for InMemoryCatalog {
    async fn find_by_screen_id(&self, screen_id: Uuid) -> Result<Vec<SeatTemplate>, StorageError> {
        self.reach().await?;
        Ok(self
            .seats
            .read()
            .await
            .iter()
            .filter(|s| s.screen_id == screen_id)
            .cloned()
            .collect())
    }

    async fn save(&self, seat: SeatTemplate) -> Result<SeatTemplate, StorageError> {
        self.reach().await?;
        insert_unique(&mut *self.seats.write().await, seat, |s| s.id, "screen_seats")
    }

    async fn delete_all(&self) -> Result<(), StorageError> {
        self.reach().await?;
        self.seats.write().await.clear();
        Ok(())
    }
}

#[async_trait::async_trait]
impl ScreeningRepository for InMemoryCatalog {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Screening>, StorageError> {
        self.reach_screenings().await?;
        Ok(self
            .screenings
            .read()
            .await
            .iter()
            .find(|s| s.id == id)
            .cloned())
    }

    async fn find_by_movie_id(&self, movie_id: Uuid) -> Result<Vec<Screening>, StorageError> {
        self.reach_screenings().await?;
        Ok(self
            .screenings
            .read()
            .await
            .iter()
            .filter(|s| s.movie_id == movie_id)
            .cloned()
            .collect())
    }

    async fn find_by_movie_and_city(
        &self,
        movie_id: Uuid,
        city: &str,
    ) -> Result<Vec<Screening>, StorageError> {
        self.reach_screenings().await?;
        let venues = self.venues.read().await;
        let screens = self.screens.read().await;
        let screenings = self.screenings.read().await;

        Ok(screenings
            .iter()
            .filter(|screening| screening.movie_id == movie_id)
            .filter(|screening| {
                screens
                    .iter()
                    .find(|screen| screen.id == screening.screen_id)
                    .and_then(|screen| venues.iter().find(|venue| venue.id == screen.venue_id))
                    .is_some_and(|venue| same_city(&venue.city, city))
            })
            .cloned()
            .collect())
    }

    async fn find_by_movie_and_screens(
        &self,
        movie_id: Uuid,
        screen_ids: &HashSet<Uuid>,
    ) -> Result<Vec<Screening>, StorageError> {
        self.reach_screenings().await?;
        Ok(self
            .screenings
            .read()
            .await
            .iter()
            .filter(|s| s.movie_id == movie_id && screen_ids.contains(&s.screen_id))
            .cloned()
            .collect())
    }

    async fn save(&self, screening: Screening) -> Result<Screening, StorageError> {
        self.reach().await?;
        insert_unique(
            &mut *self.screenings.write().await,
            screening,
            |s| s.id,
            "shows",
        )
    }

    async fn delete_all(&self) -> Result<(), StorageError> {
        self.reach().await?;
        self.screenings.write().await.clear();
        Ok(())
    }
}
