mod common;

use std::sync::atomic::Ordering;
use std::sync::Arc;

use pokedex_explorer::api::{self, ApiError, PokedexApi};
use pokedex_explorer::state::Rarity;
use pretty_assertions::assert_eq;

use common::{ids, summary, FakeApi};

#[tokio::test]
async fn detail_batch_keeps_request_order() {
    let api = Arc::new(FakeApi::new().reverse_latency());
    let entries = (1..=10).map(summary).collect();

    let batch = api::fetch_detail_batch(api.clone(), entries, 10).await;

    assert_eq!(ids(&batch.details), (1..=10).collect::<Vec<_>>());
    assert!(batch.failures.is_empty());
}

#[tokio::test]
async fn detail_batch_respects_concurrency_limit() {
    let api = Arc::new(FakeApi::new().reverse_latency());
    let entries = (1..=12).map(summary).collect();

    let batch = api::fetch_detail_batch(api.clone(), entries, 3).await;

    assert_eq!(batch.details.len(), 12);
    assert!(api.max_in_flight.load(Ordering::SeqCst) <= 3);
}

#[tokio::test]
async fn detail_batch_collects_failures_per_item() {
    let api = Arc::new(FakeApi::new().failing_detail(2).failing_detail(4));
    let entries = (1..=5).map(summary).collect();

    let batch = api::fetch_detail_batch(api.clone(), entries, 20).await;

    assert_eq!(ids(&batch.details), vec![1, 3, 5]);
    let failed: Vec<&str> = batch.failures.iter().map(|f| f.name.as_str()).collect();
    assert_eq!(failed, vec!["mon-2", "mon-4"]);
    assert!(matches!(
        batch.failures[0].error,
        ApiError::Status { status: 500, .. }
    ));
}

#[tokio::test]
async fn empty_batch_makes_no_requests() {
    let api = Arc::new(FakeApi::new());
    let batch = api::fetch_detail_batch(api.clone(), Vec::new(), 20).await;
    assert!(batch.details.is_empty());
    assert_eq!(api.call_count(), 0);
}

#[tokio::test]
async fn memberships_keep_type_order() {
    let api = Arc::new(FakeApi::new());
    let types = vec!["flying".to_string(), "fire".to_string()];

    let lists = api::fetch_memberships(api.clone(), &types).await.expect("memberships");

    assert_eq!(lists.len(), 2);
    assert_eq!(lists[0][0].name, "mon-3");
    assert_eq!(lists[1][0].name, "mon-2");
}

#[tokio::test]
async fn one_failed_membership_fails_the_call() {
    let api = Arc::new(FakeApi::new().failing_type("fire"));
    let types = vec!["flying".to_string(), "fire".to_string()];

    let result = api::fetch_memberships(api.clone(), &types).await;

    assert_eq!(result, Err(ApiError::Request("fire unreachable".to_string())));
}

#[tokio::test]
async fn detail_page_returns_batch_and_cursor() {
    let api = Arc::new(FakeApi::new());
    let (batch, next) = api::fetch_detail_page(api.clone(), &common::page_url(100, 20), 5)
        .await
        .expect("page");

    assert_eq!(ids(&batch.details), (101..=120).collect::<Vec<_>>());
    assert_eq!(next, None);
}

#[tokio::test]
async fn profile_combines_pokemon_and_species() {
    let api: Arc<dyn PokedexApi> = Arc::new(FakeApi::new());

    let profile = api::fetch_profile(api, "mon-152").await.expect("profile");

    assert_eq!(profile.details.id, 152);
    assert_eq!(profile.region.map(|r| r.label()), Some("Johto"));
    assert_eq!(profile.species.rarity, None::<Rarity>);
}
