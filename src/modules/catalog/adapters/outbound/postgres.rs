// Postgres implementation of every catalog storage port.
//
// Queries are checked at runtime (no DATABASE_URL needed to build).
// Venues store `city_key = normalize_city(city)` on save and lookups compare it
// with `normalize_city(arg)`, so SQL and the in-memory adapter agree on every
// input, including non-ASCII names and tabs.

use crate::modules::catalog::core::city::normalize_city;
use crate::modules::catalog::core::movie::Movie;
use crate::modules::catalog::core::ports::{
    MovieRepository, ScreenRepository, ScreeningRepository, SeatTemplateRepository, StorageError,
    VenueRepository,
};
use crate::modules::catalog::core::screening::Screening;
use crate::modules::catalog::core::venue::{Screen, SeatTemplate, Venue};
use async_trait::async_trait;
use sqlx::PgPool;
use std::collections::HashSet;
use uuid::Uuid;

const MOVIE_COLUMNS: &str =
    "id, title, language, genre, duration_minutes, release_date, active";
const SCREEN_COLUMNS: &str = "id, theatre_id AS venue_id, name, total_seats";
const SHOW_COLUMNS: &str = "s.id, s.movie_id, s.screen_id, s.show_time, s.price_cents";

impl From<sqlx::Error> for StorageError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::PoolTimedOut | sqlx::Error::PoolClosed | sqlx::Error::Io(_) => {
                StorageError::Unavailable(err.to_string())
            }
            sqlx::Error::Database(db_err) if db_err.constraint().is_some() => {
                StorageError::Constraint(db_err.to_string())
            }
            other => StorageError::Backend(other.to_string()),
        }
    }
}

#[derive(Clone)]
pub struct PgCatalog {
    pool: PgPool,
}

impl PgCatalog {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn migrate(&self) -> Result<(), StorageError> {
        sqlx::migrate!("./migrations")
            .run(&self.pool)
            .await
            .map_err(|err| StorageError::Backend(err.to_string()))
    }
}

fn id_list(ids: &HashSet<Uuid>) -> Vec<Uuid> {
    ids.iter().copied().collect()
}

#[async_trait]
impl MovieRepository for PgCatalog {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Movie>, StorageError> {
        let sql = format!("SELECT {MOVIE_COLUMNS} FROM movies WHERE id = $1");
        Ok(sqlx::query_as::<_, Movie>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?)
    }

    async fn find_active(&self) -> Result<Vec<Movie>, StorageError> {
        let sql = format!("SELECT {MOVIE_COLUMNS} FROM movies WHERE active ORDER BY title, id");
        Ok(sqlx::query_as::<_, Movie>(&sql).fetch_all(&self.pool).await?)
    }

    async fn search_active_by_title(&self, fragment: &str) -> Result<Vec<Movie>, StorageError> {
        let sql = format!(
            "SELECT {MOVIE_COLUMNS} FROM movies \
             WHERE active AND STRPOS(LOWER(title), LOWER($1)) > 0 ORDER BY title, id"
        );
        Ok(sqlx::query_as::<_, Movie>(&sql)
            .bind(fragment.trim())
            .fetch_all(&self.pool)
            .await?)
    }

    async fn save(&self, movie: Movie) -> Result<Movie, StorageError> {
        let sql = format!(
            "INSERT INTO movies ({MOVIE_COLUMNS}) VALUES ($1, $2, $3, $4, $5, $6, $7) \
             RETURNING {MOVIE_COLUMNS}"
        );
        Ok(sqlx::query_as::<_, Movie>(&sql)
            .bind(movie.id)
            .bind(&movie.title)
            .bind(&movie.language)
            .bind(&movie.genre)
            .bind(movie.duration_minutes)
            .bind(movie.release_date)
            .bind(movie.active)
            .fetch_one(&self.pool)
            .await?)
    }

    async fn delete_all(&self) -> Result<(), StorageError> {
        sqlx::query("DELETE FROM movies").execute(&self.pool).await?;
        Ok(())
    }
}

#[async_trait]
impl VenueRepository for PgCatalog {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Venue>, StorageError> {
        Ok(
            sqlx::query_as::<_, Venue>("SELECT id, name, city FROM theatres WHERE id = $1")
                .bind(id)
                .fetch_optional(&self.pool)
                .await?,
        )
    }

    async fn find_by_city(&self, city: &str) -> Result<Vec<Venue>, StorageError> {
        Ok(sqlx::query_as::<_, Venue>(
            "SELECT id, name, city FROM theatres WHERE city_key = $1 ORDER BY id",
        )
        .bind(normalize_city(city))
        .fetch_all(&self.pool)
        .await?)
    }

    async fn save(&self, venue: Venue) -> Result<Venue, StorageError> {
        Ok(sqlx::query_as::<_, Venue>(
            "INSERT INTO theatres (id, name, city, city_key) VALUES ($1, $2, $3, $4) \
             RETURNING id, name, city",
        )
        .bind(venue.id)
        .bind(&venue.name)
        .bind(&venue.city)
        .bind(normalize_city(&venue.city))
        .fetch_one(&self.pool)
        .await?)
    }

    async fn delete_all(&self) -> Result<(), StorageError> {
        sqlx::query("DELETE FROM theatres").execute(&self.pool).await?;
        Ok(())
    }
}

#[async_trait]
impl ScreenRepository for PgCatalog {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Screen>, StorageError> {
        let sql = format!("SELECT {SCREEN_COLUMNS} FROM screens WHERE id = $1");
        Ok(sqlx::query_as::<_, Screen>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?)
    }

    async fn find_by_venue_id(&self, venue_id: Uuid) -> Result<Vec<Screen>, StorageError> {
        let sql = format!("SELECT {SCREEN_COLUMNS} FROM screens WHERE theatre_id = $1 ORDER BY id");
        Ok(sqlx::query_as::<_, Screen>(&sql)
            .bind(venue_id)
            .fetch_all(&self.pool)
            .await?)
    }

    async fn find_by_venue_ids(
        &self,
        venue_ids: &HashSet<Uuid>,
    ) -> Result<Vec<Screen>, StorageError> {
        let sql = format!(
            "SELECT {SCREEN_COLUMNS} FROM screens WHERE theatre_id = ANY($1) ORDER BY id"
        );
        Ok(sqlx::query_as::<_, Screen>(&sql)
            .bind(id_list(venue_ids))
            .fetch_all(&self.pool)
            .await?)
    }

    async fn save(&self, screen: Screen) -> Result<Screen, StorageError> {
        let sql = format!(
            "INSERT INTO screens (id, theatre_id, name, total_seats) VALUES ($1, $2, $3, $4) \
             RETURNING {SCREEN_COLUMNS}"
        );
        Ok(sqlx::query_as::<_, Screen>(&sql)
            .bind(screen.id)
            .bind(screen.venue_id)
            .bind(&screen.name)
            .bind(screen.total_seats)
            .fetch_one(&self.pool)
            .await?)
    }

    async fn delete_all(&self) -> Result<(), StorageError> {
        sqlx::query("DELETE FROM screens").execute(&self.pool).await?;
        Ok(())
    }
}

#[async_trait]
impl SeatTemplateRepository for PgCatalog {
    async fn find_by_screen_id(&self, screen_id: Uuid) -> Result<Vec<SeatTemplate>, StorageError> {
        Ok(sqlx::query_as::<_, SeatTemplate>(
            "SELECT id, screen_id, seat_number, seat_type, row_number FROM screen_seats \
             WHERE screen_id = $1 ORDER BY row_number, seat_number",
        )
        .bind(screen_id)
        .fetch_all(&self.pool)
        .await?)
    }

    async fn save(&self, seat: SeatTemplate) -> Result<SeatTemplate, StorageError> {
        Ok(sqlx::query_as::<_, SeatTemplate>(
            "INSERT INTO screen_seats (id, screen_id, seat_number, seat_type, row_number) \
             VALUES ($1, $2, $3, $4, $5) \
             RETURNING id, screen_id, seat_number, seat_type, row_number",
        )
        .bind(seat.id)
        .bind(seat.screen_id)
        .bind(&seat.seat_number)
        .bind(&seat.seat_type)
        .bind(seat.row_number)
        .fetch_one(&self.pool)
        .await?)
    }

    async fn delete_all(&self) -> Result<(), StorageError> {
        sqlx::query("DELETE FROM screen_seats")
            .execute(&self.pool)
            .await?;
        Ok(())
    }
}

#[async_trait]
impl ScreeningRepository for PgCatalog {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Screening>, StorageError> {
        let sql = format!("SELECT {SHOW_COLUMNS} FROM shows s WHERE s.id = $1");
        Ok(sqlx::query_as::<_, Screening>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?)
    }

    async fn find_by_movie_id(&self, movie_id: Uuid) -> Result<Vec<Screening>, StorageError> {
        let sql = format!("SELECT {SHOW_COLUMNS} FROM shows s WHERE s.movie_id = $1 ORDER BY s.id");
        Ok(sqlx::query_as::<_, Screening>(&sql)
            .bind(movie_id)
            .fetch_all(&self.pool)
            .await?)
    }

    async fn find_by_movie_and_city(
        &self,
        movie_id: Uuid,
        city: &str,
    ) -> Result<Vec<Screening>, StorageError> {
        let sql = format!(
            "SELECT {SHOW_COLUMNS} FROM shows s \
             JOIN screens sc ON s.screen_id = sc.id \
             JOIN theatres t ON sc.theatre_id = t.id \
             WHERE s.movie_id = $1 AND t.city_key = $2 \
             ORDER BY s.id"
        );
        Ok(sqlx::query_as::<_, Screening>(&sql)
            .bind(movie_id)
            .bind(normalize_city(city))
            .fetch_all(&self.pool)
            .await?)
    }

    async fn find_by_movie_and_screens(
        &self,
        movie_id: Uuid,
        screen_ids: &HashSet<Uuid>,
    ) -> Result<Vec<Screening>, StorageError> {
        let sql = format!(
            "SELECT {SHOW_COLUMNS} FROM shows s \
             WHERE s.movie_id = $1 AND s.screen_id = ANY($2) ORDER BY s.id"
        );
        Ok(sqlx::query_as::<_, Screening>(&sql)
            .bind(movie_id)
            .bind(id_list(screen_ids))
            .fetch_all(&self.pool)
            .await?)
    }

    async fn save(&self, screening: Screening) -> Result<Screening, StorageError> {
        Ok(sqlx::query_as::<_, Screening>(
            "INSERT INTO shows AS s (id, movie_id, screen_id, show_time, price_cents) \
             VALUES ($1, $2, $3, $4, $5) \
             RETURNING s.id, s.movie_id, s.screen_id, s.show_time, s.price_cents",
        )
        .bind(screening.id)
        .bind(screening.movie_id)
        .bind(screening.screen_id)
        .bind(screening.show_time)
        .bind(screening.price_cents)
        .fetch_one(&self.pool)
        .await?)
    }

    async fn delete_all(&self) -> Result<(), StorageError> {
        sqlx::query("DELETE FROM shows").execute(&self.pool).await?;
        Ok(())
    }
}
