//! Integration tests for the Postgres gallery store.
//!
//! Exercises the repository layer and `PgGalleryStore` against a real
//! database:
//! - Category seed order
//! - Generation insert / fetch / listing with totals
//! - Rating upsert and aggregate recomputation
//! - View deduplication and the legacy increment

use hookforge_core::error::RepositoryError;
use hookforge_core::gallery::{
    GallerySort, GeneratedFile, GenerationFilter, GenerationInsert, ListGenerationsRequest,
};
use hookforge_core::rate_limit::SlidingWindowLimiter;
use hookforge_core::repository::GalleryRepository;
use hookforge_core::service::{GalleryConfig, GalleryService};
use hookforge_db::repositories::{GenerationRepo, RatingRepo};
use hookforge_db::PgGalleryStore;
use sqlx::PgPool;
use tokio::task::JoinSet;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn new_generation(id: &str, category_id: i64) -> GenerationInsert {
    GenerationInsert {
        id: id.to_string(),
        project_idea: format!("project {id}"),
        experience_level: "beginner".to_string(),
        hook_preset: "standard".to_string(),
        files: vec![GeneratedFile {
            path: "CLAUDE.md".to_string(),
            content: "# Project rules".to_string(),
        }],
        category_id,
    }
}

fn filter(
    category_id: Option<i64>,
    sort: GallerySort,
    page: i64,
    page_size: i64,
) -> GenerationFilter {
    GenerationFilter {
        category_id,
        sort,
        page,
        page_size,
    }
}

// ---------------------------------------------------------------------------
// Test: Categories are seeded in priority order
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_categories_seeded_in_priority_order(pool: PgPool) {
    let store = PgGalleryStore::new(pool);
    let categories = store.get_categories().await.unwrap();

    let ids: Vec<i64> = categories.iter().map(|c| c.id).collect();
    assert_eq!(ids, vec![1, 2, 3, 4, 5]);
    assert_eq!(categories[0].name, "API");
    assert!(categories[0].keywords.contains(&"api".to_string()));
    assert_eq!(categories[4].name, "Other");
    assert!(categories[4].keywords.is_empty());
}

// ---------------------------------------------------------------------------
// Test: Create and fetch
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_create_and_fetch_generation(pool: PgPool) {
    let store = PgGalleryStore::new(pool);

    let created = store
        .create_generation(&new_generation("gen-1", 3))
        .await
        .unwrap();
    assert_eq!(created.id, "gen-1");
    assert_eq!(created.category_name.as_deref(), Some("CLI Tool"));
    assert_eq!(created.avg_rating, 0.0);
    assert_eq!(created.rating_count, 0);
    assert_eq!(created.view_count, 0);

    let fetched = store.get_generation("gen-1").await.unwrap();
    assert_eq!(fetched.files.len(), 1);
    assert_eq!(fetched.files[0].path, "CLAUDE.md");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_missing_generation_is_not_found(pool: PgPool) {
    let store = PgGalleryStore::new(pool);

    let err = store.get_generation("missing").await.unwrap_err();
    assert!(matches!(err, RepositoryError::NotFound));

    let err = store.increment_view_count("missing").await.unwrap_err();
    assert!(matches!(err, RepositoryError::NotFound));
}

// ---------------------------------------------------------------------------
// Test: Listing
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_list_reports_total_and_pages(pool: PgPool) {
    let store = PgGalleryStore::new(pool);
    for i in 0..5 {
        store
            .create_generation(&new_generation(&format!("api-{i}"), 1))
            .await
            .unwrap();
    }
    store
        .create_generation(&new_generation("web-0", 2))
        .await
        .unwrap();

    let (items, total) = store
        .list_generations(&filter(None, GallerySort::Newest, 1, 4))
        .await
        .unwrap();
    assert_eq!(total, 6);
    assert_eq!(items.len(), 4);

    let (items, total) = store
        .list_generations(&filter(None, GallerySort::Newest, 2, 4))
        .await
        .unwrap();
    assert_eq!(total, 6);
    assert_eq!(items.len(), 2);

    let (items, total) = store
        .list_generations(&filter(Some(2), GallerySort::Newest, 1, 20))
        .await
        .unwrap();
    assert_eq!(total, 1);
    assert_eq!(items[0].id, "web-0");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_list_sorts_by_views_and_rating(pool: PgPool) {
    let store = PgGalleryStore::new(pool);
    for id in ["a", "b", "c"] {
        store.create_generation(&new_generation(id, 1)).await.unwrap();
    }

    store.record_view("b", "ip-1").await.unwrap();
    store.record_view("b", "ip-2").await.unwrap();
    store.record_view("c", "ip-1").await.unwrap();

    store.create_or_update_rating("a", 5, "v1").await.unwrap();
    store.create_or_update_rating("c", 3, "v1").await.unwrap();

    let (items, _) = store
        .list_generations(&filter(None, GallerySort::MostViewed, 1, 10))
        .await
        .unwrap();
    let ids: Vec<&str> = items.iter().map(|g| g.id.as_str()).collect();
    assert_eq!(ids, vec!["b", "c", "a"]);

    let (items, _) = store
        .list_generations(&filter(None, GallerySort::HighestRated, 1, 10))
        .await
        .unwrap();
    let ids: Vec<&str> = items.iter().map(|g| g.id.as_str()).collect();
    assert_eq!(ids, vec!["a", "c", "b"]);
}

// ---------------------------------------------------------------------------
// Test: Ratings
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_revote_replaces_score(pool: PgPool) {
    let store = PgGalleryStore::new(pool.clone());
    store.create_generation(&new_generation("g", 1)).await.unwrap();

    store.create_or_update_rating("g", 5, "voter").await.unwrap();
    store.create_or_update_rating("g", 2, "voter").await.unwrap();

    assert_eq!(RatingRepo::count_for_generation(&pool, "g").await.unwrap(), 1);
    assert_eq!(store.get_user_rating("g", "voter").await.unwrap(), 2);

    let g = store.get_generation("g").await.unwrap();
    assert_eq!(g.rating_count, 1);
    assert_eq!(g.avg_rating, 2.0);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_aggregate_over_distinct_voters(pool: PgPool) {
    let store = PgGalleryStore::new(pool);
    store.create_generation(&new_generation("g", 1)).await.unwrap();

    store.create_or_update_rating("g", 5, "alice").await.unwrap();
    store.create_or_update_rating("g", 2, "bob").await.unwrap();
    store.create_or_update_rating("g", 4, "carol").await.unwrap();

    let g = store.get_generation("g").await.unwrap();
    assert_eq!(g.rating_count, 3);
    assert!((g.avg_rating - 11.0 / 3.0).abs() < 1e-9);
    assert_eq!(store.get_user_rating("g", "dave").await.unwrap(), 0);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_rating_missing_generation_is_not_found(pool: PgPool) {
    let store = PgGalleryStore::new(pool);
    let err = store
        .create_or_update_rating("ghost", 3, "voter")
        .await
        .unwrap_err();
    assert!(matches!(err, RepositoryError::NotFound));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_concurrent_votes_keep_aggregate_consistent(pool: PgPool) {
    let store = PgGalleryStore::new(pool.clone());
    store.create_generation(&new_generation("g", 1)).await.unwrap();

    let scores = [1, 2, 3, 4, 5, 5, 4, 3, 2, 1];
    let mut votes = JoinSet::new();
    for (i, score) in scores.into_iter().enumerate() {
        let store = store.clone();
        votes.spawn(async move {
            store
                .create_or_update_rating("g", score, &format!("voter-{i}"))
                .await
        });
    }
    while let Some(result) = votes.join_next().await {
        result.unwrap().unwrap();
    }

    let g = store.get_generation("g").await.unwrap();
    assert_eq!(g.rating_count, scores.len() as i64);
    assert!((g.avg_rating - 3.0).abs() < 1e-9);
    assert_eq!(
        RatingRepo::count_for_generation(&pool, "g").await.unwrap(),
        scores.len() as i64
    );
}

// ---------------------------------------------------------------------------
// Test: Views
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_views_deduplicated_per_ip_hash(pool: PgPool) {
    let store = PgGalleryStore::new(pool);
    store.create_generation(&new_generation("g", 1)).await.unwrap();

    assert!(store.record_view("g", "ip-a").await.unwrap());
    assert!(!store.record_view("g", "ip-a").await.unwrap());
    assert!(store.record_view("g", "ip-b").await.unwrap());

    assert_eq!(store.get_generation("g").await.unwrap().view_count, 2);

    store.increment_view_count("g").await.unwrap();
    assert_eq!(store.get_generation("g").await.unwrap().view_count, 3);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_concurrent_views_from_one_ip_count_once(pool: PgPool) {
    let store = PgGalleryStore::new(pool);
    store.create_generation(&new_generation("g", 1)).await.unwrap();

    let mut views = JoinSet::new();
    for _ in 0..10 {
        let store = store.clone();
        views.spawn(async move { store.record_view("g", "same-ip").await });
    }

    let mut new_views = 0;
    while let Some(result) = views.join_next().await {
        if result.unwrap().unwrap() {
            new_views += 1;
        }
    }

    assert_eq!(new_views, 1);
    assert_eq!(store.get_generation("g").await.unwrap().view_count, 1);
}

// ---------------------------------------------------------------------------
// Test: Paging edge cases
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_page_beyond_end_keeps_total(pool: PgPool) {
    let store = PgGalleryStore::new(pool.clone());
    store.create_generation(&new_generation("only", 2)).await.unwrap();

    let (rows, total) =
        GenerationRepo::list_page(&pool, &filter(None, GallerySort::Newest, i64::MAX, 20))
            .await
            .unwrap();
    assert!(rows.is_empty());
    assert_eq!(total, 1);
}

// ---------------------------------------------------------------------------
// Test: Service over the real store
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_service_saves_and_lists_with_seeded_categories(pool: PgPool) {
    let service: GalleryService<PgGalleryStore, SlidingWindowLimiter> =
        GalleryService::new(PgGalleryStore::new(pool), None, GalleryConfig::default());

    let saved = service
        .save_generation(hookforge_core::gallery::NewGeneration {
            project_idea: "Build a web API with React frontend".to_string(),
            experience_level: "advanced".to_string(),
            hook_preset: "strict".to_string(),
            files: vec![GeneratedFile {
                path: ".claude/settings.json".to_string(),
                content: "{}".to_string(),
            }],
        })
        .await
        .unwrap();
    assert_eq!(saved.category_id, 1);
    assert_eq!(saved.category_name.as_deref(), Some("API"));

    let page = service
        .list_generations(&ListGenerationsRequest::default())
        .await
        .unwrap();
    assert_eq!(page.total, 1);
    assert_eq!(page.total_pages, 1);

    service
        .get_generation_with_view(&saved.id, "ip-hash")
        .await
        .unwrap();
    service
        .get_generation_with_view(&saved.id, "ip-hash")
        .await
        .unwrap();
    let viewed = service.repository().get_generation(&saved.id).await.unwrap();
    assert_eq!(viewed.view_count, 1);
}
