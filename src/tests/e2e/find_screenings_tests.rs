use crate::modules::catalog::adapters::outbound::in_memory::InMemoryCatalog;
use crate::modules::catalog::core::ports::{
    MovieRepository, ScreenRepository, ScreeningRepository, VenueRepository,
};
use crate::modules::catalog::core::screening::Screening;
use crate::modules::catalog::use_cases::find_screenings::query::{
    DiscoveryStrategy, FindScreeningsQuery,
};
use crate::tests::fixtures::catalog::{
    CatalogSeed, discovery_over, movie, screen, screening_of, venue,
};
use rstest::rstest;
use std::sync::Arc;
use uuid::Uuid;

async fn find(
    strategy: DiscoveryStrategy,
    catalog: Arc<InMemoryCatalog>,
    movie_id: Uuid,
    city: &str,
) -> Vec<Screening> {
    let query = FindScreeningsQuery::new(&movie_id.to_string(), Some(city)).unwrap();
    let mut found = discovery_over(strategy, catalog)
        .find_screenings(&query)
        .await
        .unwrap();
    found.sort_by_key(|s| s.id);
    found
}

#[rstest]
#[case(DiscoveryStrategy::Join)]
#[case(DiscoveryStrategy::TwoPhase)]
#[tokio::test]
async fn finds_both_mumbai_screenings_across_venues(#[case] strategy: DiscoveryStrategy) {
    let catalog = Arc::new(InMemoryCatalog::new());
    let seed = CatalogSeed::mumbai_and_pune(&catalog).await;

    let found = find(strategy, catalog, seed.movie_id, "mumbai").await;

    assert_eq!(found, seed.mumbai_screenings);
    assert!(found.iter().all(|s| s.screen_id != seed.pune_screen_id));
}

#[rstest]
#[case(DiscoveryStrategy::Join)]
#[case(DiscoveryStrategy::TwoPhase)]
#[tokio::test]
async fn matches_the_city_regardless_of_case(#[case] strategy: DiscoveryStrategy) {
    let catalog = Arc::new(InMemoryCatalog::new());
    let amelie = MovieRepository::save(catalog.as_ref(), movie("Amélie", true))
        .await
        .unwrap();
    let rex = VenueRepository::save(catalog.as_ref(), venue("Le Grand Rex", "Paris"))
        .await
        .unwrap();
    let salle = ScreenRepository::save(catalog.as_ref(), screen(rex.id, "Salle 1"))
        .await
        .unwrap();
    let screening = ScreeningRepository::save(catalog.as_ref(), screening_of(amelie.id, salle.id))
        .await
        .unwrap();

    for city in ["Paris", "PARIS", "paris", "  pArIs "] {
        let found = find(strategy, catalog.clone(), amelie.id, city).await;
        assert_eq!(found, vec![screening.clone()], "city {city:?}");
    }
}

#[rstest]
#[case(DiscoveryStrategy::Join)]
#[case(DiscoveryStrategy::TwoPhase)]
#[tokio::test]
async fn returns_nothing_for_an_unknown_city(#[case] strategy: DiscoveryStrategy) {
    let catalog = Arc::new(InMemoryCatalog::new());
    let seed = CatalogSeed::mumbai_and_pune(&catalog).await;

    let found = find(strategy, catalog, seed.movie_id, "Unknown City").await;

    assert!(found.is_empty());
}

#[rstest]
#[tokio::test]
async fn does_not_leak_screenings_of_other_movies() {
    let catalog = Arc::new(InMemoryCatalog::new());
    let seed = CatalogSeed::mumbai_and_pune(&catalog).await;

    let found = find(DiscoveryStrategy::Join, catalog, seed.other_movie_id, "Mumbai").await;

    assert_eq!(found.len(), 1);
    assert_eq!(found[0].screen_id, seed.mumbai_screen_ids[1]);
}
