//! Gallery domain types, constants and pure helpers.
//!
//! This module lives in `core` (zero internal deps) so the repository, the
//! service and the HTTP layer all share one definition of a generation and of
//! the paging rules.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::types::{DbId, Timestamp};

// ---------------------------------------------------------------------------
// Pagination and sorting
// ---------------------------------------------------------------------------

/// Default gallery page size when none is configured.
pub const DEFAULT_PAGE_SIZE: i64 = 20;

/// Hard ceiling on the page size a caller may request.
pub const MAX_PAGE_SIZE: i64 = 100;

/// Lowest and highest accepted rating scores.
pub const MIN_RATING: i32 = 1;
pub const MAX_RATING: i32 = 5;

/// Sort keys accepted by gallery listing.
pub const SORT_KEYS: &[&str] = &["newest", "highest_rated", "most_viewed"];

/// Gallery ordering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GallerySort {
    Newest,
    HighestRated,
    MostViewed,
}

impl GallerySort {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Newest => "newest",
            Self::HighestRated => "highest_rated",
            Self::MostViewed => "most_viewed",
        }
    }
}

impl fmt::Display for GallerySort {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Unknown sort key; carries the rejected input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownSort(pub String);

impl FromStr for GallerySort {
    type Err = UnknownSort;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "newest" => Ok(Self::Newest),
            "highest_rated" => Ok(Self::HighestRated),
            "most_viewed" => Ok(Self::MostViewed),
            other => Err(UnknownSort(other.to_string())),
        }
    }
}

/// Number of pages needed for `total` items, never less than one.
///
/// An empty gallery still reports a single (empty) page.
pub fn total_pages(total: i64, page_size: i64) -> i64 {
    if page_size < 1 || total <= 0 {
        return 1;
    }
    ((total + page_size - 1) / page_size).max(1)
}

/// Clamp a requested page size: non-positive becomes `default`, anything
/// above [`MAX_PAGE_SIZE`] is capped.
pub fn normalize_page_size(page_size: i64, default: i64) -> i64 {
    let size = if page_size < 1 { default } else { page_size };
    size.clamp(1, MAX_PAGE_SIZE)
}

/// Pages are 1-based; anything lower becomes page 1.
pub fn normalize_page(page: i64) -> i64 {
    page.max(1)
}

/// Row offset of the first item on `page`, saturating at `i64::MAX` so
/// absurd page numbers yield an empty page instead of overflowing.
pub fn page_offset(page: i64, page_size: i64) -> i64 {
    (normalize_page(page) - 1).saturating_mul(page_size.max(0))
}

// ---------------------------------------------------------------------------
// Descriptive fields
// ---------------------------------------------------------------------------

/// Experience levels offered by the wizard.
pub const EXPERIENCE_LEVELS: &[&str] = &["beginner", "intermediate", "advanced"];

/// Hook presets offered by the wizard.
pub const HOOK_PRESETS: &[&str] = &["minimal", "standard", "strict", "custom"];

pub fn is_valid_experience_level(level: &str) -> bool {
    EXPERIENCE_LEVELS.contains(&level)
}

pub fn is_valid_hook_preset(preset: &str) -> bool {
    HOOK_PRESETS.contains(&preset)
}

// ---------------------------------------------------------------------------
// Records
// ---------------------------------------------------------------------------

/// One generated file in a generation's payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneratedFile {
    pub path: String,
    pub content: String,
}

/// A stored artifact as shown in the gallery.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Generation {
    pub id: String,
    pub project_idea: String,
    pub experience_level: String,
    pub hook_preset: String,
    pub files: Vec<GeneratedFile>,
    pub category_id: DbId,
    /// Joined display name; `None` when the category row is missing.
    pub category_name: Option<String>,
    pub avg_rating: f64,
    pub rating_count: i64,
    pub view_count: i64,
    pub created_at: Timestamp,
}

/// Input for saving a freshly generated artifact.
#[derive(Debug, Clone, Deserialize)]
pub struct NewGeneration {
    pub project_idea: String,
    pub experience_level: String,
    pub hook_preset: String,
    pub files: Vec<GeneratedFile>,
}

/// A validated, classified generation ready for insertion.
#[derive(Debug, Clone)]
pub struct GenerationInsert {
    pub id: String,
    pub project_idea: String,
    pub experience_level: String,
    pub hook_preset: String,
    pub files: Vec<GeneratedFile>,
    pub category_id: DbId,
}

// ---------------------------------------------------------------------------
// Listing
// ---------------------------------------------------------------------------

/// Caller-supplied listing request, before normalization.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ListGenerationsRequest {
    #[serde(default)]
    pub category_id: Option<DbId>,
    #[serde(default)]
    pub sort: String,
    #[serde(default)]
    pub page: i64,
    #[serde(default)]
    pub page_size: i64,
}

/// Normalized filter handed to the repository.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationFilter {
    pub category_id: Option<DbId>,
    pub sort: GallerySort,
    pub page: i64,
    pub page_size: i64,
}

impl GenerationFilter {
    pub fn offset(&self) -> i64 {
        page_offset(self.page, self.page_size)
    }
}

/// One page of gallery results.
#[derive(Debug, Clone, Serialize)]
pub struct GenerationPage {
    pub items: Vec<Generation>,
    pub total: i64,
    pub page: i64,
    pub page_size: i64,
    pub total_pages: i64,
}
