// Read-only browsing around discovery: active movies, title search, a single
// movie, and the screens and seat layout of a venue.

use std::sync::Arc;
use thiserror::Error;
use uuid::Uuid;

use crate::modules::catalog::core::movie::Movie;
use crate::modules::catalog::core::ports::{
    MovieRepository, ScreenRepository, SeatTemplateRepository, StorageError,
};
use crate::modules::catalog::core::venue::{Screen, SeatTemplate};

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CatalogQueryError {
    #[error("movie not found")]
    MovieNotFound,

    #[error(transparent)]
    Storage(#[from] StorageError),
}

pub struct MovieCatalog {
    movies: Arc<dyn MovieRepository>,
}

impl MovieCatalog {
    pub fn new(movies: Arc<dyn MovieRepository>) -> Self {
        Self { movies }
    }

    pub async fn list_active(&self) -> Result<Vec<Movie>, CatalogQueryError> {
        Ok(self.movies.find_active().await?)
    }

    /// A blank title lists every active movie.
    pub async fn search(&self, title: &str) -> Result<Vec<Movie>, CatalogQueryError> {
        if title.trim().is_empty() {
            return self.list_active().await;
        }
        Ok(self.movies.search_active_by_title(title).await?)
    }

    pub async fn get(&self, id: Uuid) -> Result<Movie, CatalogQueryError> {
        self.movies
            .find_by_id(id)
            .await?
            .ok_or(CatalogQueryError::MovieNotFound)
    }
}

pub struct VenueLayout {
    screens: Arc<dyn ScreenRepository>,
    seats: Arc<dyn SeatTemplateRepository>,
}

impl VenueLayout {
    pub fn new(screens: Arc<dyn ScreenRepository>, seats: Arc<dyn SeatTemplateRepository>) -> Self {
        Self { screens, seats }
    }

    pub async fn screens_for_venue(&self, venue_id: Uuid) -> Result<Vec<Screen>, CatalogQueryError> {
        Ok(self.screens.find_by_venue_id(venue_id).await?)
    }

    pub async fn seats_for_screen(
        &self,
        screen_id: Uuid,
    ) -> Result<Vec<SeatTemplate>, CatalogQueryError> {
        Ok(self.seats.find_by_screen_id(screen_id).await?)
    }
}
