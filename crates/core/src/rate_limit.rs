//! Per-client admission control for rating submissions.

use std::collections::{HashMap, VecDeque};
use std::future::Future;
use std::time::{Duration, Instant};

use tokio::sync::Mutex;

/// Smallest key count at which idle keys are pruned. After a prune the next
/// one waits until the table doubles, so a large live table is not rescanned
/// on every check.
const PRUNE_THRESHOLD: usize = 10_000;

/// Outcome of an admission check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Admission {
    Allowed,
    Limited { retry_after: Duration },
}

impl Admission {
    pub fn is_allowed(&self) -> bool {
        matches!(self, Self::Allowed)
    }
}

/// Admission control keyed by client identity.
///
/// Implementations must be safe to call concurrently.
pub trait RateLimiter: Send + Sync {
    fn allow(&self, client_key: &str) -> impl Future<Output = Admission> + Send;
}

/// Whole seconds a limited client should wait, rounded, never zero.
pub fn retry_after_secs(retry_after: Duration) -> u64 {
    (retry_after.as_secs_f64().round() as u64).max(1)
}

/// Sliding-window limiter: at most `max_requests` admissions per client in
/// any trailing `window`.
///
/// Denied requests do not consume capacity.
#[derive(Debug)]
pub struct SlidingWindowLimiter {
    max_requests: usize,
    window: Duration,
    prune_floor: usize,
    clients: Mutex<ClientTable>,
}

#[derive(Debug)]
struct ClientTable {
    hits: HashMap<String, VecDeque<Instant>>,
    prune_at: usize,
}

impl SlidingWindowLimiter {
    pub fn new(max_requests: usize, window: Duration) -> Self {
        Self::with_prune_floor(max_requests, window, PRUNE_THRESHOLD)
    }

    fn with_prune_floor(max_requests: usize, window: Duration, prune_floor: usize) -> Self {
        let prune_floor = prune_floor.max(1);
        Self {
            max_requests: max_requests.max(1),
            window,
            prune_floor,
            clients: Mutex::new(ClientTable {
                hits: HashMap::new(),
                prune_at: prune_floor,
            }),
        }
    }

    pub fn max_requests(&self) -> usize {
        self.max_requests
    }

    pub fn window(&self) -> Duration {
        self.window
    }

    /// Admission check against an explicit clock reading.
    pub async fn check_at(&self, client_key: &str, now: Instant) -> Admission {
        let window = self.window;
        let mut guard = self.clients.lock().await;
        let table = &mut *guard;

        if table.hits.len() >= table.prune_at {
            table.hits.retain(|_, hits| {
                evict_expired(hits, now, window);
                !hits.is_empty()
            });
            table.prune_at = self.prune_floor.max(table.hits.len().saturating_mul(2));
        }

        let hits = table.hits.entry(client_key.to_string()).or_default();
        evict_expired(hits, now, window);

        if hits.len() < self.max_requests {
            hits.push_back(now);
            return Admission::Allowed;
        }

        let retry_after = hits
            .front()
            .map(|oldest| (*oldest + window).saturating_duration_since(now))
            .unwrap_or(window);
        Admission::Limited { retry_after }
    }

    /// Number of client keys currently tracked.
    pub async fn tracked_clients(&self) -> usize {
        self.clients.lock().await.hits.len()
    }
}

impl RateLimiter for SlidingWindowLimiter {
    async fn allow(&self, client_key: &str) -> Admission {
        self.check_at(client_key, Instant::now()).await
    }
}

/// Drop admissions that have left the window.
fn evict_expired(hits: &mut VecDeque<Instant>, now: Instant, window: Duration) {
    while let Some(oldest) = hits.front() {
        if now.saturating_duration_since(*oldest) >= window {
            hits.pop_front();
        } else {
            break;
        }
    }
}
