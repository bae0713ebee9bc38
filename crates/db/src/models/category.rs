//! Category rows.

use hookforge_core::category::Category;
use hookforge_core::types::DbId;
use sqlx::FromRow;

/// A row from the `categories` table.
#[derive(Debug, Clone, FromRow)]
pub struct CategoryRow {
    pub id: DbId,
    pub name: String,
    pub keywords: Vec<String>,
}

impl From<CategoryRow> for Category {
    fn from(row: CategoryRow) -> Self {
        Self {
            id: row.id,
            name: row.name,
            keywords: row.keywords,
        }
    }
}
