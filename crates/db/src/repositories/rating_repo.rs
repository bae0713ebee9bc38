//! Repository for the `ratings` table.

use sqlx::PgPool;

/// Per-voter ratings and the aggregates derived from them.
pub struct RatingRepo;

impl RatingRepo {
    /// Insert or replace a voter's score and recompute the generation's
    /// `avg_rating` / `rating_count` in the same transaction.
    ///
    /// The generation row is locked first so concurrent votes on one
    /// generation recompute one after another. Fails with
    /// `sqlx::Error::RowNotFound` if the generation does not exist.
    pub async fn upsert(
        pool: &PgPool,
        generation_id: &str,
        voter_hash: &str,
        score: i32,
    ) -> Result<(), sqlx::Error> {
        let mut tx = pool.begin().await?;

        sqlx::query("SELECT id FROM generations WHERE id = $1 FOR UPDATE")
            .bind(generation_id)
            .fetch_one(&mut *tx)
            .await?;

        sqlx::query(
            "INSERT INTO ratings (generation_id, voter_hash, score) \
             VALUES ($1, $2, $3) \
             ON CONFLICT (generation_id, voter_hash) \
             DO UPDATE SET score = EXCLUDED.score, updated_at = NOW()",
        )
        .bind(generation_id)
        .bind(voter_hash)
        .bind(score)
        .execute(&mut *tx)
        .await?;

        sqlx::query(
            "UPDATE generations SET \
                 avg_rating = s.avg_rating, \
                 rating_count = s.rating_count \
             FROM ( \
                 SELECT COALESCE(AVG(score), 0)::DOUBLE PRECISION AS avg_rating, \
                        COUNT(*) AS rating_count \
                 FROM ratings WHERE generation_id = $1 \
             ) s \
             WHERE generations.id = $1",
        )
        .bind(generation_id)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok(())
    }

    /// The voter's current score, if any.
    pub async fn find_score(
        pool: &PgPool,
        generation_id: &str,
        voter_hash: &str,
    ) -> Result<Option<i32>, sqlx::Error> {
        sqlx::query_scalar::<_, i32>(
            "SELECT score FROM ratings WHERE generation_id = $1 AND voter_hash = $2",
        )
        .bind(generation_id)
        .bind(voter_hash)
        .fetch_optional(pool)
        .await
    }

    /// Number of rating rows for a generation.
    pub async fn count_for_generation(
        pool: &PgPool,
        generation_id: &str,
    ) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM ratings WHERE generation_id = $1")
            .bind(generation_id)
            .fetch_one(pool)
            .await
    }
}
