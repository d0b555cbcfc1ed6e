use serde::Deserialize;
use std::str::FromStr;
use thiserror::Error;
use uuid::Uuid;

use crate::modules::catalog::core::city::normalize_city;
use crate::modules::catalog::core::ports::StorageError;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DiscoveryError {
    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("screening lookup failed: {0}")]
    Storage(#[from] StorageError),
}

/// A validated "screenings of movie M in city C" request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FindScreeningsQuery {
    movie_id: Uuid,
    city: String,
}

impl FindScreeningsQuery {
    pub fn new(movie_id: &str, city: Option<&str>) -> Result<Self, DiscoveryError> {
        let movie_id = Uuid::parse_str(movie_id.trim()).map_err(|_| {
            DiscoveryError::InvalidInput(format!("malformed movie id: {movie_id}"))
        })?;
        let city = city
            .map(normalize_city)
            .filter(|c| !c.is_empty())
            .ok_or_else(|| DiscoveryError::InvalidInput("city is required".into()))?;
        Ok(Self { movie_id, city })
    }

    pub fn movie_id(&self) -> Uuid {
        self.movie_id
    }

    /// Already normalized.
    pub fn city(&self) -> &str {
        &self.city
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DiscoveryStrategy {
    /// One storage query joining screenings, screens and venues.
    #[default]
    Join,
    /// Venues in the city, then their screens, then screenings on those screens.
    TwoPhase,
}

impl FromStr for DiscoveryStrategy {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_lowercase().replace('-', "_").as_str() {
            "join" => Ok(Self::Join),
            "two_phase" => Ok(Self::TwoPhase),
            other => Err(format!("unknown discovery strategy: {other}")),
        }
    }
}

impl std::fmt::Display for DiscoveryStrategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Join => write!(f, "join"),
            Self::TwoPhase => write!(f, "two_phase"),
        }
    }
}
