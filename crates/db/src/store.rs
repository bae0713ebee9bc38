//! [`GalleryRepository`] backed by PostgreSQL.

use hookforge_core::category::Category;
use hookforge_core::error::RepositoryError;
use hookforge_core::gallery::{Generation, GenerationFilter, GenerationInsert};
use hookforge_core::repository::GalleryRepository;
use sqlx::PgPool;

use crate::repositories::{CategoryRepo, GenerationRepo, RatingRepo, ViewRepo};

/// Classify a sqlx error for the domain layer.
///
/// `RowNotFound` becomes [`RepositoryError::NotFound`]; everything else is
/// wrapped as a storage failure.
pub fn map_sqlx_error(err: sqlx::Error) -> RepositoryError {
    match err {
        sqlx::Error::RowNotFound => RepositoryError::NotFound,
        other => RepositoryError::storage(other),
    }
}

/// Postgres implementation of the gallery repository contract.
///
/// Cheap to clone; clones share the pool.
#[derive(Debug, Clone)]
pub struct PgGalleryStore {
    pool: PgPool,
}

impl PgGalleryStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

impl GalleryRepository for PgGalleryStore {
    async fn list_generations(
        &self,
        filter: &GenerationFilter,
    ) -> Result<(Vec<Generation>, i64), RepositoryError> {
        let (rows, total) = GenerationRepo::list_page(&self.pool, filter)
            .await
            .map_err(map_sqlx_error)?;
        Ok((rows.into_iter().map(Generation::from).collect(), total))
    }

    async fn get_generation(&self, id: &str) -> Result<Generation, RepositoryError> {
        GenerationRepo::find_by_id(&self.pool, id)
            .await
            .map_err(map_sqlx_error)?
            .map(Generation::from)
            .ok_or(RepositoryError::NotFound)
    }

    async fn increment_view_count(&self, id: &str) -> Result<(), RepositoryError> {
        let updated = GenerationRepo::increment_view_count(&self.pool, id)
            .await
            .map_err(map_sqlx_error)?;
        if !updated {
            return Err(RepositoryError::NotFound);
        }
        Ok(())
    }

    async fn record_view(&self, id: &str, ip_hash: &str) -> Result<bool, RepositoryError> {
        ViewRepo::record(&self.pool, id, ip_hash)
            .await
            .map_err(map_sqlx_error)
    }

    async fn create_or_update_rating(
        &self,
        id: &str,
        score: i32,
        voter_hash: &str,
    ) -> Result<(), RepositoryError> {
        RatingRepo::upsert(&self.pool, id, voter_hash, score)
            .await
            .map_err(map_sqlx_error)?;
        tracing::debug!(generation_id = %id, score, "Rating upserted and aggregates recomputed");
        Ok(())
    }

    async fn get_user_rating(&self, id: &str, voter_hash: &str) -> Result<i32, RepositoryError> {
        let score = RatingRepo::find_score(&self.pool, id, voter_hash)
            .await
            .map_err(map_sqlx_error)?;
        Ok(score.unwrap_or(0))
    }

    async fn get_categories(&self) -> Result<Vec<Category>, RepositoryError> {
        let rows = CategoryRepo::list_all(&self.pool)
            .await
            .map_err(map_sqlx_error)?;
        Ok(rows.into_iter().map(Category::from).collect())
    }

    async fn create_generation(
        &self,
        input: &GenerationInsert,
    ) -> Result<Generation, RepositoryError> {
        GenerationRepo::create(&self.pool, input)
            .await
            .map(Generation::from)
            .map_err(map_sqlx_error)
    }
}
