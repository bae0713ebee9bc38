//! Generation rows.

use hookforge_core::gallery::{GeneratedFile, Generation};
use hookforge_core::types::{DbId, Timestamp};
use sqlx::types::Json;
use sqlx::FromRow;

/// A row from `generations` joined with its category name.
#[derive(Debug, Clone, FromRow)]
pub struct GenerationRow {
    pub id: String,
    pub project_idea: String,
    pub experience_level: String,
    pub hook_preset: String,
    pub files: Json<Vec<GeneratedFile>>,
    pub category_id: DbId,
    pub category_name: Option<String>,
    pub avg_rating: f64,
    pub rating_count: i64,
    pub view_count: i64,
    pub created_at: Timestamp,
}

impl From<GenerationRow> for Generation {
    fn from(row: GenerationRow) -> Self {
        Self {
            id: row.id,
            project_idea: row.project_idea,
            experience_level: row.experience_level,
            hook_preset: row.hook_preset,
            files: row.files.0,
            category_id: row.category_id,
            category_name: row.category_name,
            avg_rating: row.avg_rating,
            rating_count: row.rating_count,
            view_count: row.view_count,
            created_at: row.created_at,
        }
    }
}
