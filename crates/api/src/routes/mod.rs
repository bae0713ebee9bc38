pub mod gallery;
pub mod generation;
pub mod health;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /gallery                      list (?category, sort, page, page_size)
/// /gallery/{id}                 get (records a view)
/// /gallery/{id}/rate            rate (POST)
/// /gallery/{id}/rating          caller's rating
///
/// /categories                   list
///
/// /generations                  save (POST)
/// /generations/{id}             legacy get (increments views)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/gallery", gallery::router())
        .nest("/categories", gallery::categories_router())
        .nest("/generations", generation::router())
}
