//! Persistence contract behind the gallery service.
//!
//! The service never sees SQL; it only calls this trait. Implementations own
//! the uniqueness and atomicity guarantees listed on each method.

use std::future::Future;

use crate::category::Category;
use crate::error::RepositoryError;
use crate::gallery::{Generation, GenerationFilter, GenerationInsert};

/// Storage for generations, categories, ratings and view facts.
pub trait GalleryRepository: Send + Sync {
    /// One page of generations matching `filter`, plus the total number of
    /// matching rows (not just the page length).
    fn list_generations(
        &self,
        filter: &GenerationFilter,
    ) -> impl Future<Output = Result<(Vec<Generation>, i64), RepositoryError>> + Send;

    /// Fetch a generation. Missing IDs yield [`RepositoryError::NotFound`].
    fn get_generation(
        &self,
        id: &str,
    ) -> impl Future<Output = Result<Generation, RepositoryError>> + Send;

    /// Unconditionally bump `view_count`.
    fn increment_view_count(
        &self,
        id: &str,
    ) -> impl Future<Output = Result<(), RepositoryError>> + Send;

    /// Record that `ip_hash` viewed the generation.
    ///
    /// At most one view fact exists per (generation, ip_hash); only the call
    /// that creates it increments `view_count`, and only that call returns
    /// `true`.
    fn record_view(
        &self,
        id: &str,
        ip_hash: &str,
    ) -> impl Future<Output = Result<bool, RepositoryError>> + Send;

    /// Insert or replace the voter's score, then recompute `avg_rating` and
    /// `rating_count` atomically with the write.
    fn create_or_update_rating(
        &self,
        id: &str,
        score: i32,
        voter_hash: &str,
    ) -> impl Future<Output = Result<(), RepositoryError>> + Send;

    /// The voter's current score, or `0` if they have not rated.
    fn get_user_rating(
        &self,
        id: &str,
        voter_hash: &str,
    ) -> impl Future<Output = Result<i32, RepositoryError>> + Send;

    /// All categories in ascending ID order.
    fn get_categories(&self) -> impl Future<Output = Result<Vec<Category>, RepositoryError>> + Send;

    /// Persist a new generation with zeroed aggregates.
    fn create_generation(
        &self,
        input: &GenerationInsert,
    ) -> impl Future<Output = Result<Generation, RepositoryError>> + Send;
}
