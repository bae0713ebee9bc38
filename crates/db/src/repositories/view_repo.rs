//! Repository for the `generation_views` table.

use sqlx::PgPool;

/// Deduplicated view facts.
pub struct ViewRepo;

impl ViewRepo {
    /// Record a view by `ip_hash`. Idempotent: only the first call for a
    /// (generation, ip_hash) pair inserts a row and increments `view_count`.
    ///
    /// Returns `true` if this call created the view fact.
    pub async fn record(
        pool: &PgPool,
        generation_id: &str,
        ip_hash: &str,
    ) -> Result<bool, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let result = sqlx::query(
            "INSERT INTO generation_views (generation_id, ip_hash) \
             VALUES ($1, $2) \
             ON CONFLICT (generation_id, ip_hash) DO NOTHING",
        )
        .bind(generation_id)
        .bind(ip_hash)
        .execute(&mut *tx)
        .await?;

        let is_new = result.rows_affected() > 0;

        if is_new {
            sqlx::query("UPDATE generations SET view_count = view_count + 1 WHERE id = $1")
                .bind(generation_id)
                .execute(&mut *tx)
                .await?;
        }

        tx.commit().await?;
        Ok(is_new)
    }
}
