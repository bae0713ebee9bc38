//! Repository for the `categories` reference table.

use sqlx::PgPool;

use crate::models::category::CategoryRow;

/// Read access to seeded categories.
pub struct CategoryRepo;

impl CategoryRepo {
    /// All categories in ascending ID (priority) order.
    pub async fn list_all(pool: &PgPool) -> Result<Vec<CategoryRow>, sqlx::Error> {
        sqlx::query_as::<_, CategoryRow>("SELECT id, name, keywords FROM categories ORDER BY id")
            .fetch_all(pool)
            .await
    }
}
