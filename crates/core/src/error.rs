/// Errors surfaced by the persistence layer behind
/// [`GalleryRepository`](crate::repository::GalleryRepository).
#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    /// The requested record does not exist.
    #[error("Record not found")]
    NotFound,

    /// Any other storage failure (connection, constraint, decode, ...).
    #[error("Storage error: {0}")]
    Storage(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl RepositoryError {
    /// Wrap an arbitrary backend error as [`RepositoryError::Storage`].
    pub fn storage<E>(err: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        Self::Storage(Box::new(err))
    }
}

/// Domain-level errors returned by gallery operations.
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Entity not found: {entity} with id {id}")]
    NotFound { entity: &'static str, id: String },

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Invalid rating {0}: must be between 1 and 5")]
    InvalidRating(i32),

    #[error("Invalid sort '{0}'")]
    InvalidSort(String),

    #[error("Rate limited: retry after {retry_after_secs}s")]
    RateLimited { retry_after_secs: u64 },

    #[error(transparent)]
    Repository(#[from] RepositoryError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_not_found() {
        let err = CoreError::NotFound {
            entity: "Generation",
            id: "abc".to_string(),
        };
        assert_eq!(err.to_string(), "Entity not found: Generation with id abc");
    }

    #[test]
    fn display_rate_limited() {
        let err = CoreError::RateLimited {
            retry_after_secs: 12,
        };
        assert_eq!(err.to_string(), "Rate limited: retry after 12s");
    }

    #[test]
    fn repository_error_is_transparent() {
        let inner = std::io::Error::new(std::io::ErrorKind::Other, "disk gone");
        let err = CoreError::from(RepositoryError::storage(inner));
        assert_eq!(err.to_string(), "Storage error: disk gone");
    }
}
