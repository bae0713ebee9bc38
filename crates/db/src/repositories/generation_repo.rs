//! Repository for the `generations` table.
//!
//! Listing joins the category name for display and always ends its ORDER BY
//! on `id` so equal sort values page deterministically.

use hookforge_core::gallery::{GallerySort, GenerationFilter, GenerationInsert};
use sqlx::types::Json;
use sqlx::PgPool;

use crate::models::generation::GenerationRow;

/// Column list for `generations g LEFT JOIN categories c` queries.
const COLUMNS: &str = "\
    g.id, g.project_idea, g.experience_level, g.hook_preset, g.files, \
    g.category_id, c.name AS category_name, \
    g.avg_rating, g.rating_count, g.view_count, g.created_at";

/// `ORDER BY` clause for a gallery sort key.
fn order_clause(sort: GallerySort) -> &'static str {
    match sort {
        GallerySort::Newest => "g.created_at DESC, g.id DESC",
        GallerySort::HighestRated => "g.avg_rating DESC, g.rating_count DESC, g.id DESC",
        GallerySort::MostViewed => "g.view_count DESC, g.id DESC",
    }
}

/// Provides reads and writes for generations.
pub struct GenerationRepo;

impl GenerationRepo {
    /// Insert a generation with zeroed aggregates and return it with its
    /// category name.
    pub async fn create(
        pool: &PgPool,
        input: &GenerationInsert,
    ) -> Result<GenerationRow, sqlx::Error> {
        let query = format!(
            "WITH g AS ( \
                 INSERT INTO generations \
                     (id, project_idea, experience_level, hook_preset, files, category_id) \
                 VALUES ($1, $2, $3, $4, $5, $6) \
                 RETURNING * \
             ) \
             SELECT {COLUMNS} FROM g LEFT JOIN categories c ON c.id = g.category_id"
        );
        sqlx::query_as::<_, GenerationRow>(&query)
            .bind(&input.id)
            .bind(&input.project_idea)
            .bind(&input.experience_level)
            .bind(&input.hook_preset)
            .bind(Json(&input.files))
            .bind(input.category_id)
            .fetch_one(pool)
            .await
    }

    /// Find a generation by ID.
    pub async fn find_by_id(
        pool: &PgPool,
        id: &str,
    ) -> Result<Option<GenerationRow>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM generations g \
             LEFT JOIN categories c ON c.id = g.category_id \
             WHERE g.id = $1"
        );
        sqlx::query_as::<_, GenerationRow>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// One page of generations matching `filter`, plus the total match count
    /// ignoring paging.
    ///
    /// Both statements run in one read-only `REPEATABLE READ` transaction so
    /// the total and the page come from the same snapshot.
    pub async fn list_page(
        pool: &PgPool,
        filter: &GenerationFilter,
    ) -> Result<(Vec<GenerationRow>, i64), sqlx::Error> {
        let mut tx = pool.begin().await?;

        sqlx::query("SET TRANSACTION ISOLATION LEVEL REPEATABLE READ, READ ONLY")
            .execute(&mut *tx)
            .await?;

        let query = format!(
            "SELECT {COLUMNS} FROM generations g \
             LEFT JOIN categories c ON c.id = g.category_id \
             WHERE ($1::BIGINT IS NULL OR g.category_id = $1) \
             ORDER BY {} \
             LIMIT $2 OFFSET $3",
            order_clause(filter.sort)
        );
        let rows = sqlx::query_as::<_, GenerationRow>(&query)
            .bind(filter.category_id)
            .bind(filter.page_size)
            .bind(filter.offset())
            .fetch_all(&mut *tx)
            .await?;

        let total = sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM generations g \
             WHERE ($1::BIGINT IS NULL OR g.category_id = $1)",
        )
        .bind(filter.category_id)
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok((rows, total))
    }

    /// Add one to `view_count` without deduplication.
    ///
    /// Returns `true` if a generation was updated.
    pub async fn increment_view_count(pool: &PgPool, id: &str) -> Result<bool, sqlx::Error> {
        let result =
            sqlx::query("UPDATE generations SET view_count = view_count + 1 WHERE id = $1")
                .bind(id)
                .execute(pool)
                .await?;
        Ok(result.rows_affected() > 0)
    }
}
