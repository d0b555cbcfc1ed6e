use std::sync::Arc;

use crate::modules::catalog::adapters::outbound::screening_notifier::ScreeningNotifier;
use crate::modules::catalog::core::ports::{
    MovieRepository, ScreenRepository, ScreeningRepository, SeatTemplateRepository,
    VenueRepository,
};
use crate::modules::catalog::use_cases::browse_catalog::handler::{MovieCatalog, VenueLayout};
use crate::modules::catalog::use_cases::create_screening::handler::CreateScreeningHandler;
use crate::modules::catalog::use_cases::find_screenings::handler::ScreeningDiscovery;
use crate::shared::infrastructure::event_bus::EventProducer;
use crate::shell::auth::JwtVerifier;
use crate::shell::config::AppConfig;

#[derive(Clone)]
pub struct AppState {
    pub discovery: Arc<ScreeningDiscovery>,
    pub create_screening: Arc<CreateScreeningHandler>,
    pub movies: Arc<MovieCatalog>,
    pub venues: Arc<VenueLayout>,
    pub auth: Arc<JwtVerifier>,
}

impl AppState {
    /// Wires every use case over one catalog store and one event producer.
    pub fn wire<C>(catalog: Arc<C>, producer: Arc<dyn EventProducer>, config: &AppConfig) -> Self
    where
        C: MovieRepository
            + VenueRepository
            + ScreenRepository
            + SeatTemplateRepository
            + ScreeningRepository
            + 'static,
    {
        let notifier = Arc::new(ScreeningNotifier::new(
            config.show_created_topic.clone(),
            producer,
            config.publish_retry.clone(),
        ));

        Self {
            discovery: Arc::new(ScreeningDiscovery::new(
                config.discovery_strategy,
                catalog.clone(),
                catalog.clone(),
                catalog.clone(),
            )),
            create_screening: Arc::new(CreateScreeningHandler::new(
                catalog.clone(),
                catalog.clone(),
                catalog.clone(),
                notifier,
            )),
            movies: Arc::new(MovieCatalog::new(catalog.clone())),
            venues: Arc::new(VenueLayout::new(catalog.clone(), catalog)),
            auth: Arc::new(JwtVerifier::new(&config.jwt_secret)),
        }
    }
}
