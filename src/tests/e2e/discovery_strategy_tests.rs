// Both resolution strategies must return the same set for any catalog.

use crate::modules::catalog::adapters::outbound::in_memory::InMemoryCatalog;
use crate::modules::catalog::core::ports::{
    MovieRepository, ScreenRepository, ScreeningRepository, VenueRepository,
};
use crate::modules::catalog::use_cases::find_screenings::query::{
    DiscoveryStrategy, FindScreeningsQuery,
};
use crate::tests::fixtures::catalog::{discovery_over, movie, screen, screening_of, venue};
use proptest::prelude::*;
use std::sync::Arc;
use uuid::Uuid;

const CITIES: [&str; 4] = ["Mumbai", "mumbai", "PUNE", "Delhi"];
const QUERIED: [&str; 5] = ["mumbai", "Pune", "DELHI", "Chennai", " Mumbai "];

#[derive(Debug, Clone)]
struct CatalogShape {
    /// City index per venue.
    venues: Vec<usize>,
    /// Venue index per screen.
    screens: Vec<usize>,
    /// (movie index, screen index) per screening.
    screenings: Vec<(usize, usize)>,
}

fn catalog_shape() -> impl Strategy<Value = CatalogShape> {
    (0usize..5, 0usize..8, 0usize..20).prop_flat_map(|(venues, screens, screenings)| {
        (
            prop::collection::vec(0..CITIES.len(), venues),
            prop::collection::vec(0usize..venues.max(1), screens),
            prop::collection::vec((0usize..3, 0usize..screens.max(1)), screenings),
        )
            .prop_map(|(venues, screens, screenings)| CatalogShape {
                venues,
                screens,
                screenings,
            })
    })
}

async fn build(shape: &CatalogShape) -> (Arc<InMemoryCatalog>, Vec<Uuid>) {
    let catalog = Arc::new(InMemoryCatalog::new());
    let mut movie_ids = Vec::new();
    for title in ["Dune", "Heat", "Alien"] {
        movie_ids.push(MovieRepository::save(catalog.as_ref(), movie(title, true)).await.unwrap().id);
    }

    let mut venue_ids = Vec::new();
    for city in &shape.venues {
        let saved = VenueRepository::save(catalog.as_ref(), venue("Venue", CITIES[*city]))
            .await
            .unwrap();
        venue_ids.push(saved.id);
    }

    let mut screen_ids = Vec::new();
    if !venue_ids.is_empty() {
        for venue_index in &shape.screens {
            let saved = ScreenRepository::save(catalog.as_ref(), screen(venue_ids[*venue_index], "Screen"))
                .await
                .unwrap();
            screen_ids.push(saved.id);
        }
    }

    if !screen_ids.is_empty() {
        for (movie_index, screen_index) in &shape.screenings {
            ScreeningRepository::save(
                catalog.as_ref(),
                screening_of(movie_ids[*movie_index], screen_ids[*screen_index]),
            )
            .await
            .unwrap();
        }
    }
    (catalog, movie_ids)
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn join_and_two_phase_agree(shape in catalog_shape(), movie_index in 0usize..3, city_index in 0..QUERIED.len()) {
        let runtime = tokio::runtime::Builder::new_current_thread().enable_all().build().unwrap();
        let (join, two_phase) = runtime.block_on(async {
            let (catalog, movie_ids) = build(&shape).await;
            let query = FindScreeningsQuery::new(
                &movie_ids[movie_index].to_string(),
                Some(QUERIED[city_index]),
            )
            .unwrap();

            let mut join = discovery_over(DiscoveryStrategy::Join, catalog.clone())
                .find_screenings(&query)
                .await
                .unwrap();
            let mut two_phase = discovery_over(DiscoveryStrategy::TwoPhase, catalog)
                .find_screenings(&query)
                .await
                .unwrap();
            join.sort_by_key(|s| s.id);
            two_phase.sort_by_key(|s| s.id);
            (join, two_phase)
        });

        prop_assert_eq!(join, two_phase);
    }
}
