use async_graphql::{Context, Object, Result as GqlResult, SimpleObject};
use chrono::NaiveDateTime;
use uuid::Uuid;

use crate::modules::catalog::core::screening::Screening;
use crate::modules::catalog::use_cases::find_screenings::query::FindScreeningsQuery;
use crate::shell::state::AppState;

#[derive(SimpleObject, Clone)]
#[graphql(name = "Screening")]
pub struct GqlScreening {
    pub id: Uuid,
    pub movie_id: Uuid,
    pub screen_id: Uuid,
    pub show_time: NaiveDateTime,
    pub price_cents: Option<i64>,
}

impl From<Screening> for GqlScreening {
    fn from(s: Screening) -> Self {
        Self {
            id: s.id,
            movie_id: s.movie_id,
            screen_id: s.screen_id,
            show_time: s.show_time,
            price_cents: s.price_cents,
        }
    }
}

#[derive(Default)]
pub struct DiscoveryQuery;

#[Object]
impl DiscoveryQuery {
    async fn screenings(
        &self,
        context: &Context<'_>,
        movie_id: String,
        city: String,
    ) -> GqlResult<Vec<GqlScreening>> {
        let state = context.data_unchecked::<AppState>();
        let query = FindScreeningsQuery::new(&movie_id, Some(&city))?;
        let found = state.discovery.find_screenings(&query).await?;
        Ok(found.into_iter().map(Into::into).collect())
    }
}
