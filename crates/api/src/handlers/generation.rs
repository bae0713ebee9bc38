//! Handlers for saving generated configurations.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use hookforge_core::gallery::NewGeneration;

use crate::error::AppResult;
use crate::extract::AppJson;
use crate::response::DataResponse;
use crate::state::AppState;

/// POST /api/v1/generations
///
/// Classify and persist a generation. Returns 201 with the stored record.
pub async fn create_generation(
    State(state): State<AppState>,
    AppJson(input): AppJson<NewGeneration>,
) -> AppResult<impl IntoResponse> {
    let generation = state.gallery.save_generation(input).await?;

    Ok((StatusCode::CREATED, Json(DataResponse { data: generation })))
}

/// GET /api/v1/generations/{id}
///
/// Legacy lookup: every call counts as a view.
pub async fn get_generation(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<impl IntoResponse> {
    let generation = state.gallery.get_generation(&id).await?;

    Ok(Json(DataResponse { data: generation }))
}
