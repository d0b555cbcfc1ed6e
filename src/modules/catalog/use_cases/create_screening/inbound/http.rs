use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
    http::{StatusCode, Uri},
    response::IntoResponse,
};

use crate::modules::catalog::use_cases::create_screening::command::ScreeningDraft;
use crate::modules::catalog::use_cases::create_screening::handler::CreateScreeningError;
use crate::shell::auth::AdminPrincipal;
use crate::shell::error::ApiError;
use crate::shell::state::AppState;

pub async fn handle(
    State(state): State<AppState>,
    AdminPrincipal(admin): AdminPrincipal,
    uri: Uri,
    body: Result<Json<ScreeningDraft>, JsonRejection>,
) -> impl IntoResponse {
    let Json(draft) = match body {
        Ok(b) => b,
        Err(rejection) => {
            return ApiError::unprocessable(rejection.body_text())
                .at(uri.path())
                .into_response();
        }
    };

    tracing::info!(admin = %admin.subject, "create screening requested");
    match state.create_screening.handle_detached(draft).await {
        Ok(created) => (StatusCode::CREATED, Json(created.screening)).into_response(),
        Err(
            err @ (CreateScreeningError::InvalidInput(_)
            | CreateScreeningError::UnknownMovie(_)
            | CreateScreeningError::UnknownScreen(_)),
        ) => ApiError::unprocessable(err.to_string())
            .at(uri.path())
            .into_response(),
        Err(err @ CreateScreeningError::Storage(_)) => ApiError::internal(err.to_string())
            .at(uri.path())
            .into_response(),
    }
}
