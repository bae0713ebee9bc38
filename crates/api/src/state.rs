use std::sync::Arc;
use std::time::Duration;

use hookforge_core::rate_limit::SlidingWindowLimiter;
use hookforge_core::service::GalleryService;
use hookforge_db::PgGalleryStore;

use crate::config::ServerConfig;

/// The gallery service as wired for production.
pub type Gallery = GalleryService<PgGalleryStore, SlidingWindowLimiter>;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc` or is already `Clone`).
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: hookforge_db::DbPool,
    /// Server configuration.
    pub config: Arc<ServerConfig>,
    /// Gallery domain service over the Postgres store.
    pub gallery: Arc<Gallery>,
}

impl AppState {
    /// Wire the gallery service from a pool and configuration.
    ///
    /// A `rate_limit_max_requests` of zero leaves rating unlimited.
    pub fn new(pool: hookforge_db::DbPool, config: ServerConfig) -> Self {
        let limiter = (config.rate_limit_max_requests > 0).then(|| {
            SlidingWindowLimiter::new(
                config.rate_limit_max_requests,
                Duration::from_secs(config.rate_limit_window_secs),
            )
        });

        let gallery = GalleryService::new(
            PgGalleryStore::new(pool.clone()),
            limiter,
            config.gallery_config(),
        );

        Self {
            pool,
            config: Arc::new(config),
            gallery: Arc::new(gallery),
        }
    }
}
