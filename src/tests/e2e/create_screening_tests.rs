use crate::modules::catalog::adapters::outbound::in_memory::InMemoryCatalog;
use crate::modules::catalog::adapters::outbound::screening_notifier::SHOW_CREATED_TOPIC;
use crate::modules::catalog::core::ports::ScreeningRepository;
use crate::modules::catalog::use_cases::create_screening::outcome::NotificationOutcome;
use crate::modules::catalog::use_cases::find_screenings::query::{
    DiscoveryStrategy, FindScreeningsQuery,
};
use crate::shared::infrastructure::event_bus::in_memory::InMemoryEventProducer;
use crate::shell::http::router;
use crate::tests::fixtures::app::{app_state, bearer};
use crate::tests::fixtures::catalog::{CatalogSeed, creation_over, discovery_over, show_time};
use crate::tests::fixtures::commands::ScreeningDraftBuilder;
use axum::body::Body;
use axum::http::{Request, StatusCode, header::AUTHORIZATION};
use http_body_util::BodyExt;
use std::sync::Arc;
use std::time::Duration;
use tower::ServiceExt;
use uuid::Uuid;

#[tokio::test]
async fn creates_a_screening_and_publishes_exactly_one_event() {
    let catalog = Arc::new(InMemoryCatalog::new());
    let producer = Arc::new(InMemoryEventProducer::new());
    let seed = CatalogSeed::mumbai_and_pune(&catalog).await;
    let handler = creation_over(catalog.clone(), producer.clone());

    let draft = ScreeningDraftBuilder::new()
        .movie_id(Some(seed.movie_id))
        .screen_id(Some(seed.pune_screen_id))
        .price_cents(Some(999))
        .build();
    let created = handler.handle(draft).await.unwrap();

    assert_eq!(created.notification, NotificationOutcome::Delivered { attempts: 1 });
    let stored = catalog.find_by_id(created.screening.id).await.unwrap().unwrap();
    assert_eq!(stored, created.screening);
    assert_eq!(stored.price_cents, Some(999));

    let published = producer.published().await;
    assert_eq!(published.len(), 1);
    let message = &published[0];
    assert_eq!(message.topic, SHOW_CREATED_TOPIC);
    assert_eq!(message.partition_key, stored.id.to_string());
    assert_eq!(message.payload["type"], "ScreeningCreated");
    assert_eq!(message.payload["showId"], stored.id.to_string());
    assert_eq!(message.payload["movieId"], seed.movie_id.to_string());
    assert_eq!(message.payload["screenId"], seed.pune_screen_id.to_string());
    assert_eq!(message.payload["showTime"], show_time().format("%Y-%m-%dT%H:%M:%S").to_string());
}

#[tokio::test]
async fn a_created_screening_is_immediately_discoverable() {
    let catalog = Arc::new(InMemoryCatalog::new());
    let producer = Arc::new(InMemoryEventProducer::new());
    let seed = CatalogSeed::mumbai_and_pune(&catalog).await;

    let created = creation_over(catalog.clone(), producer)
        .handle(
            ScreeningDraftBuilder::new()
                .movie_id(Some(seed.other_movie_id))
                .screen_id(Some(seed.pune_screen_id))
                .build(),
        )
        .await
        .unwrap();

    let query = FindScreeningsQuery::new(&seed.other_movie_id.to_string(), Some("pune")).unwrap();
    let found = discovery_over(DiscoveryStrategy::Join, catalog)
        .find_screenings(&query)
        .await
        .unwrap();
    assert_eq!(found, vec![created.screening]);
}

#[tokio::test]
async fn recovers_from_a_transient_broker_rejection() {
    let catalog = Arc::new(InMemoryCatalog::new());
    let producer = Arc::new(InMemoryEventProducer::new());
    let seed = CatalogSeed::mumbai_and_pune(&catalog).await;
    producer.fail_next(1);

    let created = creation_over(catalog, producer.clone())
        .handle(
            ScreeningDraftBuilder::new()
                .movie_id(Some(seed.movie_id))
                .screen_id(Some(seed.mumbai_screen_ids[0]))
                .build(),
        )
        .await
        .unwrap();

    assert_eq!(created.notification, NotificationOutcome::Delivered { attempts: 2 });
    assert_eq!(producer.calls(), 2);
    assert_eq!(producer.published().await.len(), 1);
}

#[tokio::test]
async fn admin_http_request_persists_and_publishes_in_the_background() {
    let catalog = Arc::new(InMemoryCatalog::new());
    let producer = Arc::new(InMemoryEventProducer::new());
    let seed = CatalogSeed::mumbai_and_pune(&catalog).await;
    let app = router(app_state(catalog.clone(), producer.clone()));
    let body = format!(
        r#"{{"id":"{}","movieId":"{}","screenId":"{}","showTime":"2025-03-01T19:30:00","priceCents":999}}"#,
        Uuid::nil(),
        seed.movie_id,
        seed.mumbai_screen_ids[2]
    );

    let response = app
        .oneshot(
            Request::post("/shows/admin")
                .header("content-type", "application/json")
                .header(AUTHORIZATION, bearer(&["ADMIN"]))
                .body(Body::from(body))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::CREATED);
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let json: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
    let id: Uuid = json["id"].as_str().unwrap().parse().unwrap();
    assert_ne!(id, Uuid::nil());
    assert!(catalog.find_by_id(id).await.unwrap().is_some());

    let mut published = producer.published().await;
    for _ in 0..50 {
        if !published.is_empty() {
            break;
        }
        tokio::time::sleep(Duration::from_millis(10)).await;
        published = producer.published().await;
    }
    assert_eq!(published.len(), 1);
    assert_eq!(published[0].partition_key, id.to_string());
}
