use async_graphql::{Context, Object, Result as GqlResult, SimpleObject};
use chrono::NaiveDateTime;
use uuid::Uuid;

use crate::modules::catalog::use_cases::create_screening::command::ScreeningDraft;
use crate::modules::catalog::use_cases::find_screenings::inbound::graphql::GqlScreening;
use crate::shell::auth::AdminPrincipal;
use crate::shell::state::AppState;

#[derive(SimpleObject)]
pub struct CreateScreeningPayload {
    pub screening: GqlScreening,
    /// `delivered` or `failed` once the broker answered, `dispatched` if the outcome was not awaited.
    pub notification: String,
}

#[derive(Default)]
pub struct CreateScreeningMutation;

#[Object]
impl CreateScreeningMutation {
    /// Waits for the broker so the caller learns whether the broadcast went out.
    /// The broadcast runs on a handler task, so a client that disconnects after
    /// the save does not cancel it.
    async fn create_screening(
        &self,
        context: &Context<'_>,
        movie_id: Uuid,
        screen_id: Uuid,
        show_time: NaiveDateTime,
        price_cents: Option<i64>,
    ) -> GqlResult<CreateScreeningPayload> {
        let AdminPrincipal(admin) = context
            .data_opt::<AdminPrincipal>()
            .cloned()
            .ok_or_else(|| async_graphql::Error::new("ADMIN role required"))?;
        let state = context.data_unchecked::<AppState>();

        tracing::info!(admin = %admin.subject, "create screening requested");
        let created = state
            .create_screening
            .handle(ScreeningDraft {
                id: None,
                movie_id: Some(movie_id),
                screen_id: Some(screen_id),
                show_time: Some(show_time),
                price_cents,
            })
            .await?;

        Ok(CreateScreeningPayload {
            notification: created.notification.status().to_string(),
            screening: created.screening.into(),
        })
    }
}
