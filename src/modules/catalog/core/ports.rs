// Ports describe what the catalog needs from storage, without implementing it.
//
// Responsibilities
// - Keep use cases independent of the storage engine by coding against traits.
// - One trait per collection: lookup by id, lookup by parent id, filtered scans, save, delete_all.
//
// Boundaries
// - No business logic. Adapters (in memory, postgres) implement these traits.

use async_trait::async_trait;
use std::collections::HashSet;
use thiserror::Error;
use uuid::Uuid;

use crate::modules::catalog::core::movie::Movie;
use crate::modules::catalog::core::screening::Screening;
use crate::modules::catalog::core::venue::{Screen, SeatTemplate, Venue};

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StorageError {
    #[error("storage unavailable: {0}")]
    Unavailable(String),

    #[error("constraint violated: {0}")]
    Constraint(String),

    #[error("backend error: {0}")]
    Backend(String),
}

#[async_trait]
pub trait MovieRepository: Send + Sync {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Movie>, StorageError>;
    async fn find_active(&self) -> Result<Vec<Movie>, StorageError>;
    async fn search_active_by_title(&self, fragment: &str) -> Result<Vec<Movie>, StorageError>;
    async fn save(&self, movie: Movie) -> Result<Movie, StorageError>;
    async fn delete_all(&self) -> Result<(), StorageError>;
}

#[async_trait]
pub trait VenueRepository: Send + Sync {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Venue>, StorageError>;
    /// Case-insensitive on `city`.
    async fn find_by_city(&self, city: &str) -> Result<Vec<Venue>, StorageError>;
    async fn save(&self, venue: Venue) -> Result<Venue, StorageError>;
    async fn delete_all(&self) -> Result<(), StorageError>;
}

#[async_trait]
pub trait ScreenRepository: Send + Sync {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Screen>, StorageError>;
    async fn find_by_venue_id(&self, venue_id: Uuid) -> Result<Vec<Screen>, StorageError>;
    async fn find_by_venue_ids(&self, venue_ids: &HashSet<Uuid>)
    -> Result<Vec<Screen>, StorageError>;
    async fn save(&self, screen: Screen) -> Result<Screen, StorageError>;
    async fn delete_all(&self) -> Result<(), StorageError>;
}

#[async_trait]
pub trait SeatTemplateRepository: Send + Sync {
    async fn find_by_screen_id(&self, screen_id: Uuid) -> Result<Vec<SeatTemplate>, StorageError>;
    async fn save(&self, seat: SeatTemplate) -> Result<SeatTemplate, StorageError>;
    async fn delete_all(&self) -> Result<(), StorageError>;
}

#[async_trait]
pub trait ScreeningRepository: Send + Sync {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Screening>, StorageError>;
    async fn find_by_movie_id(&self, movie_id: Uuid) -> Result<Vec<Screening>, StorageError>;
    /// Single round trip: screening -> screen -> venue, filtered on movie and city.
    async fn find_by_movie_and_city(
        &self,
        movie_id: Uuid,
        city: &str,
    ) -> Result<Vec<Screening>, StorageError>;
    /// Callers must not pass an empty set; an empty set has no matching screenings.
    async fn find_by_movie_and_screens(
        &self,
        movie_id: Uuid,
        screen_ids: &HashSet<Uuid>,
    ) -> Result<Vec<Screening>, StorageError>;
    async fn save(&self, screening: Screening) -> Result<Screening, StorageError>;
    async fn delete_all(&self) -> Result<(), StorageError>;
}
