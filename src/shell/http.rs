use axum::{
    Extension, Router,
    routing::{get, post},
};
use tower_http::trace::TraceLayer;

use crate::modules::catalog::use_cases::browse_catalog::inbound::http as browse_http;
use crate::modules::catalog::use_cases::create_screening::inbound::http as create_http;
use crate::modules::catalog::use_cases::find_screenings::inbound::http as discovery_http;
use crate::shell::graphql::{self, schema};
use crate::shell::state::AppState;

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/movies", get(browse_http::list_movies))
        .route("/movies/search", get(browse_http::search_movies))
        .route("/movies/{movie_id}", get(browse_http::get_movie))
        .route("/movies/{movie_id}/shows", get(discovery_http::handle))
        .route("/venues/{venue_id}/screens", get(browse_http::screens_for_venue))
        .route("/screens/{screen_id}/seats", get(browse_http::seats_for_screen))
        .route("/shows/admin", post(create_http::handle))
        .route("/graphql", get(graphql::graphiql).post(graphql::graphql))
        .layer(Extension(schema(state.clone())))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
