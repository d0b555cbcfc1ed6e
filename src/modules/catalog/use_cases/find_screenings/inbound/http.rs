use axum::{
    Json,
    extract::{Path, Query, State},
    http::Uri,
    response::IntoResponse,
};
use serde::Deserialize;

use crate::modules::catalog::use_cases::find_screenings::query::{
    DiscoveryError, FindScreeningsQuery,
};
use crate::shell::error::ApiError;
use crate::shell::state::AppState;

#[derive(Deserialize)]
pub struct FindScreeningsParams {
    pub city: Option<String>,
}

pub async fn handle(
    State(state): State<AppState>,
    Path(movie_id): Path<String>,
    Query(params): Query<FindScreeningsParams>,
    uri: Uri,
) -> impl IntoResponse {
    let query = match FindScreeningsQuery::new(&movie_id, params.city.as_deref()) {
        Ok(query) => query,
        Err(err) => return ApiError::bad_request(err.to_string()).at(uri.path()).into_response(),
    };

    match state.discovery.find_screenings(&query).await {
        Ok(screenings) => Json(screenings).into_response(),
        Err(DiscoveryError::InvalidInput(message)) => {
            ApiError::bad_request(message).at(uri.path()).into_response()
        }
        Err(err @ DiscoveryError::Storage(_)) => {
            ApiError::internal(err.to_string()).at(uri.path()).into_response()
        }
    }
}
