//! Build-pass output cache for miniweave.
//!
//! During a watch session the same template assets are rendered over and
//! over as sources change. Most rebuilds leave most outputs byte-identical,
//! and re-registering an unchanged asset only churns the downstream build.
//! [`CacheStore`] remembers a fingerprint of the last content accepted for
//! each output file name so the pipeline can skip redundant publishes.
//!
//! The store is session-scoped: create one when the watch session starts,
//! drop it when the session ends. It is passed into consumers explicitly
//! rather than held as global state, which keeps its lifetime and locking
//! discipline visible and testable.
//!
//! # Example
//!
//! ```
//! use mw_cache::CacheStore;
//!
//! let store = CacheStore::new();
//! assert!(store.admit("pages/home.axml", "<view/>"));
//! assert!(!store.admit("pages/home.axml", "<view/>"));
//! assert!(store.admit("pages/home.axml", "<view>changed</view>"));
//! ```

use std::collections::HashMap;
use std::sync::{Mutex, PoisonError};

use sha2::{Digest, Sha256};

/// SHA-256 digest of an asset's content.
type Fingerprint = [u8; 32];

fn fingerprint(content: &str) -> Fingerprint {
    Sha256::digest(content.as_bytes()).into()
}

/// Session-scoped map from output file name to the fingerprint of the
/// content most recently accepted for publication under that name.
///
/// [`admit`](CacheStore::admit) performs its read-check-write under one
/// lock acquisition, so two concurrent renders of the same file name can
/// never both observe "no prior record" and both decide to publish.
///
/// Entries are never removed within a session; a cold start is simply a
/// fresh store.
#[derive(Debug, Default)]
pub struct CacheStore {
    entries: Mutex<HashMap<String, Fingerprint>>,
}

impl CacheStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Decide whether `content` should be published under `file_name`.
    ///
    /// Returns `true` (and records the new fingerprint) when no content has
    /// been accepted for `file_name` yet or the fingerprint differs from
    /// the last accepted one. Returns `false` when the content is unchanged;
    /// nothing is recorded for rejected content.
    ///
    /// Skipping is strictly an optimization: it reduces redundant write
    /// notifications during incremental rebuilds and never changes which
    /// content ends up in the output set.
    pub fn admit(&self, file_name: &str, content: &str) -> bool {
        let fingerprint = fingerprint(content);
        // A poisoned lock means another render panicked mid-insert; the map
        // itself is still a valid fingerprint record.
        let mut entries = self
            .entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        match entries.get(file_name) {
            Some(previous) if *previous == fingerprint => {
                tracing::debug!(file = %file_name, "content unchanged since last publish");
                false
            }
            _ => {
                entries.insert(file_name.to_owned(), fingerprint);
                true
            }
        }
    }

    /// Number of file names with an accepted publish.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    /// True if nothing has been admitted yet.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;

    #[test]
    fn test_first_admit_accepts() {
        let store = CacheStore::new();
        assert!(store.admit("base.axml", "<block/>"));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_identical_content_rejected() {
        let store = CacheStore::new();
        assert!(store.admit("base.axml", "<block/>"));
        assert!(!store.admit("base.axml", "<block/>"));
        assert!(!store.admit("base.axml", "<block/>"));
    }

    #[test]
    fn test_changed_content_readmitted() {
        let store = CacheStore::new();
        assert!(store.admit("base.axml", "v1"));
        assert!(store.admit("base.axml", "v2"));
        // Reverting to v1 is still a change relative to v2
        assert!(store.admit("base.axml", "v1"));
    }

    #[test]
    fn test_file_names_tracked_independently() {
        let store = CacheStore::new();
        assert!(store.admit("pages/a.axml", "same"));
        assert!(store.admit("pages/b.axml", "same"));
        assert!(!store.admit("pages/a.axml", "same"));
        assert_eq!(store.len(), 2);
    }

    #[test]
    fn test_rejection_records_nothing() {
        let store = CacheStore::new();
        assert!(store.admit("f", "v1"));
        assert!(store.admit("f", "v2"));
        // v2 rejected here must not have displaced the recorded v2
        assert!(!store.admit("f", "v2"));
    }

    #[test]
    fn test_concurrent_admits_accept_exactly_once() {
        let store = Arc::new(CacheStore::new());
        let handles: Vec<_> = (0..8)
            .map(|_| {
                let store = Arc::clone(&store);
                std::thread::spawn(move || store.admit("base.axml", "<block/>"))
            })
            .collect();

        let admitted = handles
            .into_iter()
            .map(|h| h.join().unwrap())
            .filter(|admitted| *admitted)
            .count();
        assert_eq!(admitted, 1);
    }
}
