//! Content fingerprint and the single-entry summary cache guard.

use std::path::Path;

use serde::Deserialize;
use sha2::{Digest, Sha256};
use tracing::warn;

/// Lower-case hex SHA-256 of the document's exact bytes.
pub fn fingerprint(text: &str) -> String {
    hex::encode(Sha256::digest(text.as_bytes()))
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CacheDecision {
    UpToDate,
    Regenerate(StaleReason),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StaleReason {
    Missing,
    Unreadable(String),
    FingerprintChanged { cached: Option<String> },
}

#[derive(Debug, Deserialize)]
struct CachedFingerprint {
    #[serde(rename = "readmeHash")]
    readme_hash: Option<String>,
}

/// Compares `current` against the `readmeHash` stored in the summary artifact at `path`.
pub fn check_cache(path: &Path, current: &str) -> CacheDecision {
    let raw = match std::fs::read_to_string(path) {
        Ok(raw) => raw,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            return CacheDecision::Regenerate(StaleReason::Missing)
        }
        Err(e) => {
            warn!("Failed to read {}; regenerating: {e}", path.display());
            return CacheDecision::Regenerate(StaleReason::Unreadable(e.to_string()));
        }
    };

    let cached: CachedFingerprint = match serde_json::from_str(&raw) {
        Ok(cached) => cached,
        Err(e) => {
            warn!("Failed to parse {}; regenerating: {e}", path.display());
            return CacheDecision::Regenerate(StaleReason::Unreadable(e.to_string()));
        }
    };

    if cached.readme_hash.as_deref() == Some(current) {
        CacheDecision::UpToDate
    } else {
        CacheDecision::Regenerate(StaleReason::FingerprintChanged {
            cached: cached.readme_hash,
        })
    }
}
