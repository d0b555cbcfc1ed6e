use std::collections::HashSet;
use std::sync::Arc;
use uuid::Uuid;

use crate::modules::catalog::core::ports::{ScreenRepository, ScreeningRepository, VenueRepository};
use crate::modules::catalog::core::screening::Screening;
use crate::modules::catalog::use_cases::find_screenings::query::{
    DiscoveryError, DiscoveryStrategy, FindScreeningsQuery,
};

/// Resolves the screenings of a movie in a city. Read-only, no retries.
pub struct ScreeningDiscovery {
    strategy: DiscoveryStrategy,
    venues: Arc<dyn VenueRepository>,
    screens: Arc<dyn ScreenRepository>,
    screenings: Arc<dyn ScreeningRepository>,
}

impl ScreeningDiscovery {
    pub fn new(
        strategy: DiscoveryStrategy,
        venues: Arc<dyn VenueRepository>,
        screens: Arc<dyn ScreenRepository>,
        screenings: Arc<dyn ScreeningRepository>,
    ) -> Self {
        Self {
            strategy,
            venues,
            screens,
            screenings,
        }
    }

    pub fn strategy(&self) -> DiscoveryStrategy {
        self.strategy
    }

    #[tracing::instrument(
        skip(self, query),
        fields(movie_id = %query.movie_id(), city = %query.city(), strategy = %self.strategy)
    )]
    pub async fn find_screenings(
        &self,
        query: &FindScreeningsQuery,
    ) -> Result<Vec<Screening>, DiscoveryError> {
        let found = match self.strategy {
            DiscoveryStrategy::Join => self.by_join(query).await,
            DiscoveryStrategy::TwoPhase => self.by_two_phase(query).await,
        };
        match &found {
            Ok(screenings) => tracing::debug!(count = screenings.len(), "screenings resolved"),
            Err(err) => tracing::warn!(error = %err, "screening lookup failed"),
        }
        found
    }

    async fn by_join(&self, query: &FindScreeningsQuery) -> Result<Vec<Screening>, DiscoveryError> {
        Ok(self
            .screenings
            .find_by_movie_and_city(query.movie_id(), query.city())
            .await?)
    }

    // Each step feeds the next one's filter, so they run strictly in sequence.
    async fn by_two_phase(
        &self,
        query: &FindScreeningsQuery,
    ) -> Result<Vec<Screening>, DiscoveryError> {
        let venue_ids: HashSet<Uuid> = self
            .venues
            .find_by_city(query.city())
            .await?
            .into_iter()
            .map(|venue| venue.id)
            .collect();
        if venue_ids.is_empty() {
            return Ok(Vec::new());
        }

        let screen_ids: HashSet<Uuid> = self
            .screens
            .find_by_venue_ids(&venue_ids)
            .await?
            .into_iter()
            .map(|screen| screen.id)
            .collect();
        if screen_ids.is_empty() {
            return Ok(Vec::new());
        }

        Ok(self
            .screenings
            .find_by_movie_and_screens(query.movie_id(), &screen_ids)
            .await?)
    }
}
