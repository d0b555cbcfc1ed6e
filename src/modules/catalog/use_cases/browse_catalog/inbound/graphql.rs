use async_graphql::{Context, Object, Result as GqlResult, SimpleObject};
use chrono::NaiveDate;
use uuid::Uuid;

use crate::modules::catalog::core::movie::Movie;
use crate::modules::catalog::use_cases::browse_catalog::handler::CatalogQueryError;
use crate::shell::state::AppState;

#[derive(SimpleObject, Clone)]
#[graphql(name = "Movie")]
pub struct GqlMovie {
    pub id: Uuid,
    pub title: String,
    pub language: String,
    pub genre: String,
    pub duration_minutes: i32,
    pub release_date: NaiveDate,
    pub active: bool,
}

impl From<Movie> for GqlMovie {
    fn from(m: Movie) -> Self {
        Self {
            id: m.id,
            title: m.title,
            language: m.language,
            genre: m.genre,
            duration_minutes: m.duration_minutes,
            release_date: m.release_date,
            active: m.active,
        }
    }
}

#[derive(Default)]
pub struct CatalogQuery;

#[Object]
impl CatalogQuery {
    /// `null` when no movie has this id.
    async fn movie(&self, context: &Context<'_>, id: Uuid) -> GqlResult<Option<GqlMovie>> {
        let state = context.data_unchecked::<AppState>();
        match state.movies.get(id).await {
            Ok(movie) => Ok(Some(movie.into())),
            Err(CatalogQueryError::MovieNotFound) => Ok(None),
            Err(err) => Err(err.into()),
        }
    }

    /// Active movies, optionally filtered by a title fragment.
    async fn movies(&self, context: &Context<'_>, title: Option<String>) -> GqlResult<Vec<GqlMovie>> {
        let state = context.data_unchecked::<AppState>();
        let movies = state.movies.search(title.as_deref().unwrap_or_default()).await?;
        Ok(movies.into_iter().map(Into::into).collect())
    }
}
