//! Anonymous client identity extractor.
//!
//! The gallery has no accounts. Views are deduplicated by a salted hash of
//! the client IP, and votes by a salted hash of IP plus User-Agent.

use std::convert::Infallible;
use std::net::SocketAddr;

use axum::extract::{ConnectInfo, FromRequestParts};
use axum::http::header::USER_AGENT;
use axum::http::request::Parts;
use axum::http::HeaderMap;
use hookforge_core::hashing::{viewer_ip_hash, voter_hash};

use crate::state::AppState;

/// Client IP used when neither proxy headers nor the socket reveal one.
pub const UNKNOWN_CLIENT_IP: &str = "unknown";

/// Identity of the anonymous caller.
#[derive(Debug, Clone)]
pub struct ClientIdentity {
    /// Best-effort client IP, also used as the rate-limit key.
    pub ip: String,
    /// Salted hash of the IP, for view deduplication.
    pub ip_hash: String,
    /// Salted hash of IP and User-Agent, for one-vote-per-voter.
    pub voter_hash: String,
}

impl FromRequestParts<AppState> for ClientIdentity {
    type Rejection = Infallible;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let peer = parts
            .extensions
            .get::<ConnectInfo<SocketAddr>>()
            .map(|ConnectInfo(addr)| *addr);
        let ip = client_ip(&parts.headers, peer, state.config.trust_proxy_headers);

        let user_agent = parts
            .headers
            .get(USER_AGENT)
            .and_then(|v| v.to_str().ok())
            .unwrap_or("");

        let salt = &state.config.identity_hash_salt;

        Ok(ClientIdentity {
            ip_hash: viewer_ip_hash(salt, &ip),
            voter_hash: voter_hash(salt, &ip, user_agent),
            ip,
        })
    }
}

/// Resolve the client IP.
///
/// With `trust_proxy_headers` the first entry of `X-Forwarded-For` wins, then
/// `X-Real-IP`. Otherwise those headers are ignored, since any caller can set
/// them. Falls back to the socket peer address, then [`UNKNOWN_CLIENT_IP`].
pub fn client_ip(
    headers: &HeaderMap,
    peer: Option<SocketAddr>,
    trust_proxy_headers: bool,
) -> String {
    if trust_proxy_headers {
        if let Some(ip) = proxy_client_ip(headers) {
            return ip;
        }
    }

    peer.map(|addr| addr.ip().to_string())
        .unwrap_or_else(|| UNKNOWN_CLIENT_IP.to_string())
}

fn proxy_client_ip(headers: &HeaderMap) -> Option<String> {
    let forwarded = headers
        .get("x-forwarded-for")
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.split(',').next())
        .map(str::trim)
        .filter(|ip| !ip.is_empty());

    let real_ip = || {
        headers
            .get("x-real-ip")
            .and_then(|v| v.to_str().ok())
            .map(str::trim)
            .filter(|ip| !ip.is_empty())
    };

    forwarded.or_else(real_ip).map(str::to_string)
}
