//! Request handlers.
//!
//! Handlers extract request data, delegate to the gallery service in
//! [`AppState`](crate::state::AppState) and wrap results in
//! [`DataResponse`](crate::response::DataResponse).

pub mod gallery;
pub mod generation;
