use async_graphql::{EmptySubscription, MergedObject, Schema, http::GraphiQLSource};
use async_graphql_axum::{GraphQLRequest, GraphQLResponse};
use axum::{Extension, response::Html};

use crate::modules::catalog::use_cases::browse_catalog::inbound::graphql::CatalogQuery;
use crate::modules::catalog::use_cases::create_screening::inbound::graphql::CreateScreeningMutation;
use crate::modules::catalog::use_cases::find_screenings::inbound::graphql::DiscoveryQuery;
use crate::shell::auth::{AdminPrincipal, AuthenticatedPrincipal};
use crate::shell::error::ApiError;
use crate::shell::state::AppState;

#[derive(MergedObject, Default)]
pub struct QueryRoot(DiscoveryQuery, CatalogQuery);

#[derive(MergedObject, Default)]
pub struct MutationRoot(CreateScreeningMutation);

pub type AppSchema = Schema<QueryRoot, MutationRoot, EmptySubscription>;

pub fn schema(state: AppState) -> AppSchema {
    Schema::build(QueryRoot::default(), MutationRoot::default(), EmptySubscription)
        .data(state)
        .finish()
}

/// Anonymous callers may query. Only a verified admin principal reaches the mutation.
pub async fn graphql(
    Extension(schema): Extension<AppSchema>,
    principal: Result<AuthenticatedPrincipal, ApiError>,
    request: GraphQLRequest,
) -> GraphQLResponse {
    let mut request = request.into_inner();
    if let Ok(principal) = principal {
        if let Ok(admin) = AdminPrincipal::try_from(principal.clone()) {
            request = request.data(admin);
        }
        request = request.data(principal);
    }
    schema.execute(request).await.into()
}

pub async fn graphiql() -> Html<String> {
    Html(GraphiQLSource::build().endpoint("/graphql").finish())
}
