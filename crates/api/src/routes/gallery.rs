use axum::routing::{get, post};
use axum::Router;

use crate::handlers::gallery;
use crate::state::AppState;

/// Routes mounted at `/gallery`.
///
/// ```text
/// GET  /             -> list_gallery
/// GET  /{id}         -> get_gallery_item
/// POST /{id}/rate    -> rate_gallery_item
/// GET  /{id}/rating  -> get_my_rating
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(gallery::list_gallery))
        .route("/{id}", get(gallery::get_gallery_item))
        .route("/{id}/rate", post(gallery::rate_gallery_item))
        .route("/{id}/rating", get(gallery::get_my_rating))
}

/// Routes mounted at `/categories`.
///
/// ```text
/// GET  /             -> list_categories
/// ```
pub fn categories_router() -> Router<AppState> {
    Router::new().route("/", get(gallery::list_categories))
}
