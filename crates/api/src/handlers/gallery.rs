//! Handlers for browsing and rating the public gallery.

use axum::extract::{Path, State};
use axum::response::IntoResponse;
use axum::Json;
use hookforge_core::gallery::ListGenerationsRequest;
use serde::{Deserialize, Serialize};

use crate::error::AppResult;
use crate::extract::{AppJson, AppQuery};
use crate::middleware::client::ClientIdentity;
use crate::query::GalleryParams;
use crate::response::DataResponse;
use crate::state::AppState;

/// Body of `POST /gallery/{id}/rate`.
#[derive(Debug, Deserialize)]
pub struct RateRequest {
    pub score: i32,
}

/// The caller's score for a generation; `0` means not yet rated.
#[derive(Debug, Serialize)]
pub struct UserRating {
    pub generation_id: String,
    pub score: i32,
}

// ---------------------------------------------------------------------------
// Listing and retrieval
// ---------------------------------------------------------------------------

/// GET /api/v1/gallery
///
/// One page of generations, optionally filtered by category.
pub async fn list_gallery(
    State(state): State<AppState>,
    AppQuery(params): AppQuery<GalleryParams>,
) -> AppResult<impl IntoResponse> {
    let request = ListGenerationsRequest::from(params);
    let page = state.gallery.list_generations(&request).await?;

    Ok(Json(DataResponse { data: page }))
}

/// GET /api/v1/gallery/{id}
///
/// Fetch a generation and count one view per client.
pub async fn get_gallery_item(
    State(state): State<AppState>,
    Path(id): Path<String>,
    client: ClientIdentity,
) -> AppResult<impl IntoResponse> {
    let generation = state
        .gallery
        .get_generation_with_view(&id, &client.ip_hash)
        .await?;

    Ok(Json(DataResponse { data: generation }))
}

// ---------------------------------------------------------------------------
// Ratings
// ---------------------------------------------------------------------------

/// POST /api/v1/gallery/{id}/rate
///
/// Submit or replace the caller's 1-5 rating.
pub async fn rate_gallery_item(
    State(state): State<AppState>,
    Path(id): Path<String>,
    client: ClientIdentity,
    AppJson(input): AppJson<RateRequest>,
) -> AppResult<impl IntoResponse> {
    state
        .gallery
        .rate_generation(&id, input.score, &client.voter_hash, &client.ip)
        .await?;

    tracing::info!(generation_id = %id, score = input.score, "Gallery item rated");

    Ok(Json(DataResponse {
        data: UserRating {
            generation_id: id,
            score: input.score,
        },
    }))
}

/// GET /api/v1/gallery/{id}/rating
pub async fn get_my_rating(
    State(state): State<AppState>,
    Path(id): Path<String>,
    client: ClientIdentity,
) -> AppResult<impl IntoResponse> {
    let score = state
        .gallery
        .get_user_rating(&id, &client.voter_hash)
        .await?;

    Ok(Json(DataResponse {
        data: UserRating {
            generation_id: id,
            score,
        },
    }))
}

// ---------------------------------------------------------------------------
// Categories
// ---------------------------------------------------------------------------

/// GET /api/v1/categories
pub async fn list_categories(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let categories = state.gallery.get_categories().await?;

    Ok(Json(DataResponse { data: categories }))
}
