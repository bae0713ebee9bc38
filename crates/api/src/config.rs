use hookforge_core::service::GalleryConfig;

/// Server configuration loaded from environment variables.
///
/// All fields have sensible defaults suitable for local development.
/// In production, override via environment variables.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `3000`).
    pub port: u16,
    /// Allowed CORS origins, parsed from comma-separated `CORS_ORIGINS` env var.
    pub cors_origins: Vec<String>,
    /// HTTP request timeout in seconds (default: `30`).
    pub request_timeout_secs: u64,
    /// Gallery page size when a request omits one (default: `20`).
    pub gallery_page_size: i64,
    /// Gallery sort key when a request omits one (default: `newest`).
    pub gallery_default_sort: String,
    /// Ratings allowed per client inside one window. `0` disables limiting.
    pub rate_limit_max_requests: usize,
    /// Length of the rating rate-limit window in seconds (default: `60`).
    pub rate_limit_window_secs: u64,
    /// Salt mixed into viewer and voter hashes.
    pub identity_hash_salt: String,
    /// Take the client IP from `X-Forwarded-For` / `X-Real-IP`. Enable only
    /// behind a reverse proxy that overwrites these headers (default: `false`).
    pub trust_proxy_headers: bool,
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                   | Default                 |
    /// |---------------------------|-------------------------|
    /// | `HOST`                    | `0.0.0.0`               |
    /// | `PORT`                    | `3000`                  |
    /// | `CORS_ORIGINS`            | `http://localhost:5173` |
    /// | `REQUEST_TIMEOUT_SECS`    | `30`                    |
    /// | `GALLERY_PAGE_SIZE`       | `20`                    |
    /// | `GALLERY_DEFAULT_SORT`    | `newest`                |
    /// | `RATE_LIMIT_MAX_REQUESTS` | `10`                    |
    /// | `RATE_LIMIT_WINDOW_SECS`  | `60`                    |
    /// | `IDENTITY_HASH_SALT`      | `hookforge`             |
    /// | `TRUST_PROXY_HEADERS`     | `false`                 |
    pub fn from_env() -> Self {
        let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".into());

        let port: u16 = std::env::var("PORT")
            .unwrap_or_else(|_| "3000".into())
            .parse()
            .expect("PORT must be a valid u16");

        let cors_origins: Vec<String> = std::env::var("CORS_ORIGINS")
            .unwrap_or_else(|_| "http://localhost:5173".into())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let request_timeout_secs: u64 = std::env::var("REQUEST_TIMEOUT_SECS")
            .unwrap_or_else(|_| "30".into())
            .parse()
            .expect("REQUEST_TIMEOUT_SECS must be a valid u64");

        let gallery_page_size: i64 = std::env::var("GALLERY_PAGE_SIZE")
            .unwrap_or_else(|_| "20".into())
            .parse()
            .expect("GALLERY_PAGE_SIZE must be a valid i64");

        let gallery_default_sort =
            std::env::var("GALLERY_DEFAULT_SORT").unwrap_or_else(|_| "newest".into());

        let rate_limit_max_requests: usize = std::env::var("RATE_LIMIT_MAX_REQUESTS")
            .unwrap_or_else(|_| "10".into())
            .parse()
            .expect("RATE_LIMIT_MAX_REQUESTS must be a valid usize");

        let rate_limit_window_secs: u64 = std::env::var("RATE_LIMIT_WINDOW_SECS")
            .unwrap_or_else(|_| "60".into())
            .parse()
            .expect("RATE_LIMIT_WINDOW_SECS must be a valid u64");

        let identity_hash_salt =
            std::env::var("IDENTITY_HASH_SALT").unwrap_or_else(|_| "hookforge".into());

        let trust_proxy_headers: bool = std::env::var("TRUST_PROXY_HEADERS")
            .unwrap_or_else(|_| "false".into())
            .parse()
            .expect("TRUST_PROXY_HEADERS must be true or false");

        Self {
            host,
            port,
            cors_origins,
            request_timeout_secs,
            gallery_page_size,
            gallery_default_sort,
            rate_limit_max_requests,
            rate_limit_window_secs,
            identity_hash_salt,
            trust_proxy_headers,
        }
    }

    /// Listing defaults handed to the gallery service.
    pub fn gallery_config(&self) -> GalleryConfig {
        GalleryConfig {
            default_page_size: self.gallery_page_size,
            default_sort: self.gallery_default_sort.clone(),
        }
    }
}
