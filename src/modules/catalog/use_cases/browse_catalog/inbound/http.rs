use axum::{
    Json,
    extract::{Path, Query, State},
    http::Uri,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::modules::catalog::use_cases::browse_catalog::handler::CatalogQueryError;
use crate::shell::error::ApiError;
use crate::shell::state::AppState;

#[derive(Deserialize)]
pub struct SearchParams {
    #[serde(default)]
    pub title: String,
}

fn parse_id(raw: &str, uri: &Uri) -> Result<Uuid, Response> {
    Uuid::parse_str(raw.trim()).map_err(|_| {
        ApiError::bad_request(format!("malformed id: {raw}"))
            .at(uri.path())
            .into_response()
    })
}

fn respond<T: Serialize>(result: Result<T, CatalogQueryError>, uri: &Uri) -> Response {
    match result {
        Ok(value) => Json(value).into_response(),
        Err(err @ CatalogQueryError::MovieNotFound) => {
            ApiError::not_found(err.to_string()).at(uri.path()).into_response()
        }
        Err(err @ CatalogQueryError::Storage(_)) => {
            ApiError::internal(err.to_string()).at(uri.path()).into_response()
        }
    }
}

pub async fn list_movies(State(state): State<AppState>, uri: Uri) -> impl IntoResponse {
    respond(state.movies.list_active().await, &uri)
}

pub async fn search_movies(
    State(state): State<AppState>,
    Query(params): Query<SearchParams>,
    uri: Uri,
) -> impl IntoResponse {
    respond(state.movies.search(&params.title).await, &uri)
}

pub async fn get_movie(
    State(state): State<AppState>,
    Path(id): Path<String>,
    uri: Uri,
) -> impl IntoResponse {
    match parse_id(&id, &uri) {
        Ok(id) => respond(state.movies.get(id).await, &uri),
        Err(response) => response,
    }
}

pub async fn screens_for_venue(
    State(state): State<AppState>,
    Path(venue_id): Path<String>,
    uri: Uri,
) -> impl IntoResponse {
    match parse_id(&venue_id, &uri) {
        Ok(id) => respond(state.venues.screens_for_venue(id).await, &uri),
        Err(response) => response,
    }
}

pub async fn seats_for_screen(
    State(state): State<AppState>,
    Path(screen_id): Path<String>,
    uri: Uri,
) -> impl IntoResponse {
    match parse_id(&screen_id, &uri) {
        Ok(id) => respond(state.venues.seats_for_screen(id).await, &uri),
        Err(response) => response,
    }
}
