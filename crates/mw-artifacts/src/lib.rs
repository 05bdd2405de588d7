//! Build output asset table for miniweave.
//!
//! An in-progress build collects its generated files in an [`AssetTable`]:
//! a map from relative output file name to [`Asset`] content. The table is
//! the write target of the template pipeline and the read source of
//! whatever emits the output set to disk (or hands it to a host bundler).
//!
//! File names are taken as given; producing valid relative paths is the
//! caller's job.

use std::collections::HashMap;
use std::sync::{PoisonError, RwLock};

/// One generated output file.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Asset {
    content: String,
}

impl Asset {
    /// The asset's full text content.
    #[must_use]
    pub fn source(&self) -> &str {
        &self.content
    }

    /// Byte size of the content, computed on access.
    #[must_use]
    pub fn size(&self) -> usize {
        self.content.len()
    }
}

/// Thread-safe table of build output assets.
///
/// Publishing the same file name twice within a pass overwrites the prior
/// entry; concurrent publishes of distinct names never contend beyond the
/// brief map lock.
#[derive(Debug, Default)]
pub struct AssetTable {
    entries: RwLock<HashMap<String, Asset>>,
}

impl AssetTable {
    /// Create an empty table.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `content` under `file_name`, replacing any prior entry.
    pub fn publish(&self, file_name: impl Into<String>, content: impl Into<String>) {
        let file_name = file_name.into();
        let asset = Asset {
            content: content.into(),
        };
        tracing::debug!(file = %file_name, bytes = asset.size(), "publishing asset");
        let mut entries = self
            .entries
            .write()
            .unwrap_or_else(PoisonError::into_inner);
        if entries.insert(file_name.clone(), asset).is_some() {
            tracing::debug!(file = %file_name, "replaced previously published asset");
        }
    }

    /// Retrieve a published asset by file name.
    #[must_use]
    pub fn get(&self, file_name: &str) -> Option<Asset> {
        self.entries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(file_name)
            .cloned()
    }

    /// All published file names, sorted.
    #[must_use]
    pub fn file_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self
            .entries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .keys()
            .cloned()
            .collect();
        names.sort();
        names
    }

    /// Number of published assets.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    /// True if nothing has been published.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
