// src/watch/hash.rs

use std::path::Path;

use blake3::Hasher;
use tracing::debug;

use crate::engine::RuntimeEvent;
use crate::fs::FileSystem;

/// blake3 digest of `contents`, hex-encoded.
pub fn compute_content_hash(contents: &[u8]) -> String {
    let mut hasher = Hasher::new();
    hasher.update(contents);
    hasher.finalize().to_hex().to_string()
}

/// Read the plan file and turn its current state into a runtime event.
pub fn observe_plan(fs: &dyn FileSystem, path: &Path) -> RuntimeEvent {
    match fs.read(path) {
        Ok(contents) => {
            let content_hash = compute_content_hash(&contents);
            debug!(path = ?path, hash = %content_hash, "hashed plan file");
            RuntimeEvent::PlanChanged { content_hash }
        }
        Err(err) => RuntimeEvent::PlanUnreadable {
            error: format!("{err:#}"),
        },
    }
}
