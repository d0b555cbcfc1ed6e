// Composition root: configuration, identity boundary, wiring and the HTTP/GraphQL surface.

pub mod auth;
pub mod config;
pub mod error;
pub mod graphql;
pub mod http;
pub mod state;
