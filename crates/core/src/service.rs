//! Gallery domain service.
//!
//! [`GalleryService`] is a stateless orchestrator over a
//! [`GalleryRepository`] and an optional [`RateLimiter`]. It validates and
//! normalizes requests, translates repository outcomes into [`CoreError`]
//! classifications, and keeps best-effort side effects (view counting) from
//! ever failing a read.

use crate::category::{default_categories, Category, CategoryMatcher};
use crate::error::{CoreError, RepositoryError};
use crate::gallery::{
    is_valid_experience_level, is_valid_hook_preset, normalize_page, normalize_page_size,
    total_pages, GallerySort, Generation, GenerationFilter, GenerationInsert, GenerationPage,
    ListGenerationsRequest, NewGeneration, DEFAULT_PAGE_SIZE, EXPERIENCE_LEVELS, HOOK_PRESETS,
    MAX_PAGE_SIZE, MAX_RATING, MIN_RATING,
};
use crate::rate_limit::{retry_after_secs, Admission, RateLimiter, SlidingWindowLimiter};
use crate::repository::GalleryRepository;
use crate::types::DbId;

/// Construction-time defaults for listing.
#[derive(Debug, Clone)]
pub struct GalleryConfig {
    /// Page size used when a request asks for less than one item.
    pub default_page_size: i64,
    /// Sort key used when a request leaves it empty. Validated per request.
    pub default_sort: String,
}

impl Default for GalleryConfig {
    fn default() -> Self {
        Self {
            default_page_size: DEFAULT_PAGE_SIZE,
            default_sort: GallerySort::Newest.as_str().to_string(),
        }
    }
}

/// Orchestrates gallery reads, view counting, rating and classification.
///
/// Holds no locks and no mutable state, so one instance can serve any number
/// of concurrent callers.
#[derive(Debug)]
pub struct GalleryService<R, L = SlidingWindowLimiter> {
    repo: R,
    limiter: Option<L>,
    config: GalleryConfig,
}

impl<R, L> GalleryService<R, L>
where
    R: GalleryRepository,
    L: RateLimiter,
{
    pub fn new(repo: R, limiter: Option<L>, mut config: GalleryConfig) -> Self {
        if config.default_page_size < 1 {
            config.default_page_size = DEFAULT_PAGE_SIZE;
        }
        config.default_page_size = config.default_page_size.min(MAX_PAGE_SIZE);
        Self {
            repo,
            limiter,
            config,
        }
    }

    pub fn repository(&self) -> &R {
        &self.repo
    }

    pub fn config(&self) -> &GalleryConfig {
        &self.config
    }

    // -----------------------------------------------------------------------
    // Listing
    // -----------------------------------------------------------------------

    /// List one page of generations.
    ///
    /// Paging inputs are coerced, never rejected; an unknown sort key is
    /// rejected before the repository is touched.
    pub async fn list_generations(
        &self,
        request: &ListGenerationsRequest,
    ) -> Result<GenerationPage, CoreError> {
        let page = normalize_page(request.page);
        let page_size = normalize_page_size(request.page_size, self.config.default_page_size);
        let sort_key = if request.sort.is_empty() {
            self.config.default_sort.as_str()
        } else {
            request.sort.as_str()
        };
        let sort: GallerySort = sort_key
            .parse()
            .map_err(|_| CoreError::InvalidSort(sort_key.to_string()))?;

        let filter = GenerationFilter {
            category_id: request.category_id,
            sort,
            page,
            page_size,
        };
        let (items, total) = self.repo.list_generations(&filter).await?;

        tracing::debug!(
            sort = %sort,
            page,
            page_size,
            total,
            category_id = ?request.category_id,
            "Listed gallery page",
        );

        Ok(GenerationPage {
            items,
            total,
            page,
            page_size,
            total_pages: total_pages(total, page_size),
        })
    }

    // -----------------------------------------------------------------------
    // Retrieval
    // -----------------------------------------------------------------------

    /// Fetch a generation and record a deduplicated view for `viewer_ip_hash`.
    ///
    /// View recording is best-effort: its failure is logged and the fetched
    /// generation is still returned.
    pub async fn get_generation_with_view(
        &self,
        id: &str,
        viewer_ip_hash: &str,
    ) -> Result<Generation, CoreError> {
        require_non_empty(id, "generation id")?;

        let generation = self.fetch_generation(id).await?;

        if !viewer_ip_hash.is_empty() {
            match self.repo.record_view(id, viewer_ip_hash).await {
                Ok(true) => tracing::debug!(generation_id = %id, "Recorded new view"),
                Ok(false) => {}
                Err(e) => {
                    tracing::warn!(generation_id = %id, error = %e, "Failed to record view")
                }
            }
        }

        Ok(generation)
    }

    /// Legacy retrieval: fetch and unconditionally bump the view counter.
    pub async fn get_generation(&self, id: &str) -> Result<Generation, CoreError> {
        require_non_empty(id, "generation id")?;

        let generation = self.fetch_generation(id).await?;

        if let Err(e) = self.repo.increment_view_count(id).await {
            tracing::warn!(generation_id = %id, error = %e, "Failed to increment view count");
        }

        Ok(generation)
    }

    // -----------------------------------------------------------------------
    // Ratings
    // -----------------------------------------------------------------------

    /// Submit (or replace) a voter's rating.
    ///
    /// Checks run in order and short-circuit: identifiers, score bounds, rate
    /// limit, existence, then the upsert. Only the rate-limit check yields
    /// [`CoreError::RateLimited`].
    pub async fn rate_generation(
        &self,
        generation_id: &str,
        score: i32,
        voter_hash: &str,
        client_ip: &str,
    ) -> Result<(), CoreError> {
        require_non_empty(generation_id, "generation id")?;
        require_non_empty(voter_hash, "voter hash")?;

        if !(MIN_RATING..=MAX_RATING).contains(&score) {
            return Err(CoreError::InvalidRating(score));
        }

        if let Some(limiter) = &self.limiter {
            if let Admission::Limited { retry_after } = limiter.allow(client_ip).await {
                let retry_after_secs = retry_after_secs(retry_after);
                tracing::info!(
                    generation_id = %generation_id,
                    retry_after_secs,
                    "Rating rate limited",
                );
                return Err(CoreError::RateLimited { retry_after_secs });
            }
        }

        self.fetch_generation(generation_id).await?;

        self.repo
            .create_or_update_rating(generation_id, score, voter_hash)
            .await?;

        tracing::info!(generation_id = %generation_id, score, "Rating recorded");
        Ok(())
    }

    /// The voter's current score for a generation; `0` means not rated yet.
    pub async fn get_user_rating(
        &self,
        generation_id: &str,
        voter_hash: &str,
    ) -> Result<i32, CoreError> {
        require_non_empty(generation_id, "generation id")?;
        require_non_empty(voter_hash, "voter hash")?;

        Ok(self.repo.get_user_rating(generation_id, voter_hash).await?)
    }

    // -----------------------------------------------------------------------
    // Categories and saving
    // -----------------------------------------------------------------------

    pub async fn get_categories(&self) -> Result<Vec<Category>, CoreError> {
        Ok(self.repo.get_categories().await?)
    }

    /// Classify `text` against the stored categories, falling back to the
    /// compiled-in set when the store is unreachable.
    pub async fn classify(&self, text: &str) -> DbId {
        self.matcher().await.classify(text)
    }

    /// Validate, classify and persist a freshly generated artifact.
    pub async fn save_generation(&self, input: NewGeneration) -> Result<Generation, CoreError> {
        validate_new_generation(&input)?;

        let category_id = self.classify(&input.project_idea).await;
        let insert = GenerationInsert {
            id: uuid::Uuid::now_v7().to_string(),
            project_idea: input.project_idea,
            experience_level: input.experience_level,
            hook_preset: input.hook_preset,
            files: input.files,
            category_id,
        };

        let generation = self.repo.create_generation(&insert).await?;

        tracing::info!(
            generation_id = %generation.id,
            category_id,
            files = generation.files.len(),
            "Generation saved",
        );
        Ok(generation)
    }

    // -----------------------------------------------------------------------
    // Helpers
    // -----------------------------------------------------------------------

    async fn fetch_generation(&self, id: &str) -> Result<Generation, CoreError> {
        self.repo.get_generation(id).await.map_err(|e| match e {
            RepositoryError::NotFound => CoreError::NotFound {
                entity: "Generation",
                id: id.to_string(),
            },
            other => CoreError::Repository(other),
        })
    }

    async fn matcher(&self) -> CategoryMatcher {
        match self.repo.get_categories().await {
            Ok(categories) if !categories.is_empty() => CategoryMatcher::new(&categories),
            Ok(_) => CategoryMatcher::new(&default_categories()),
            Err(e) => {
                tracing::warn!(error = %e, "Category store unavailable, using default categories");
                CategoryMatcher::new(&default_categories())
            }
        }
    }
}

fn require_non_empty(value: &str, what: &str) -> Result<(), CoreError> {
    if value.is_empty() {
        return Err(CoreError::InvalidInput(format!("{what} is required")));
    }
    Ok(())
}

fn validate_new_generation(input: &NewGeneration) -> Result<(), CoreError> {
    if input.project_idea.trim().is_empty() {
        return Err(CoreError::InvalidInput("project idea is required".into()));
    }
    if !is_valid_experience_level(&input.experience_level) {
        return Err(CoreError::InvalidInput(format!(
            "experience level must be one of: {}",
            EXPERIENCE_LEVELS.join(", ")
        )));
    }
    if !is_valid_hook_preset(&input.hook_preset) {
        return Err(CoreError::InvalidInput(format!(
            "hook preset must be one of: {}",
            HOOK_PRESETS.join(", ")
        )));
    }
    if input.files.is_empty() {
        return Err(CoreError::InvalidInput(
            "at least one generated file is required".into(),
        ));
    }
    if input.files.iter().any(|f| f.path.trim().is_empty()) {
        return Err(CoreError::InvalidInput("file path must not be empty".into()));
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
