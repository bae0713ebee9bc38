//! One-way identity hashes for anonymous viewers and voters.
//!
//! Raw client addresses never reach the store; only these salted digests do.

use sha2::{Digest, Sha256};

/// Compute a SHA-256 hex digest of the given bytes.
pub fn sha256_hex(data: &[u8]) -> String {
    let hash = Sha256::digest(data);
    format!("{hash:x}")
}

/// Hash used to deduplicate views: `sha256(salt ":" ip)`.
pub fn viewer_ip_hash(salt: &str, client_ip: &str) -> String {
    sha256_hex(format!("{salt}:{client_ip}").as_bytes())
}

/// Hash used to deduplicate votes: `sha256(salt ":" ip ":" user_agent)`.
///
/// Mixing in the user agent lets two browsers behind one NAT vote separately.
pub fn voter_hash(salt: &str, client_ip: &str, user_agent: &str) -> String {
    sha256_hex(format!("{salt}:{client_ip}:{user_agent}").as_bytes())
}
