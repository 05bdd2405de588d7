//! Host component manifest registry for miniweave.
//!
//! The manifest catalogs the UI component kinds the target host runtime
//! supports, each with an id and the properties it accepts. It is populated
//! during an earlier build phase (while application sources are analyzed)
//! and is read-only by the time templates are generated, so template
//! generation shares it behind an `Arc`.
//!
//! # Example
//!
//! ```
//! use mw_manifest::{ComponentManifest, HostComponent, UNIVERSAL_CONTAINER};
//!
//! let mut manifest = ComponentManifest::new();
//! manifest.register(HostComponent::new("view", ["class", "style"]));
//! manifest.register(HostComponent::new("text", ["class"]));
//!
//! let ids: Vec<&str> = manifest.sorted().iter().map(|c| c.id.as_str()).collect();
//! assert_eq!(ids, ["text", "view"]);
//! assert!(manifest.container().is_some());
//! # let _ = UNIVERSAL_CONTAINER;
//! ```

use std::collections::HashMap;

use serde::Serialize;

/// Id of the universal container component.
///
/// The host runtime has no native recursion, so arbitrary nested structure
/// is emulated by statically unrolling this one component in the base
/// template. Its prop set is enumerated separately in render variables.
pub const UNIVERSAL_CONTAINER: &str = "view";

/// One host-supported UI component kind.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct HostComponent {
    /// Component id as known to the host runtime (e.g. `"view"`).
    pub id: String,
    /// Properties the component accepts, in registration order.
    ///
    /// May contain duplicates when several source-level aliases declare the
    /// same prop; consumers deduplicate where enumeration order matters.
    pub props: Vec<String>,
}

impl HostComponent {
    /// Create a component entry from an id and its props.
    #[must_use]
    pub fn new<I, S>(id: impl Into<String>, props: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            id: id.into(),
            props: props.into_iter().map(Into::into).collect(),
        }
    }
}

/// Registry of host components, keyed by component id.
///
/// Registration merges: registering an id twice extends the existing prop
/// list rather than replacing the entry, since different parts of an
/// application may surface different props of the same component.
#[derive(Debug, Default)]
pub struct ComponentManifest {
    components: HashMap<String, HostComponent>,
}

impl ComponentManifest {
    /// Create an empty manifest.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a component, merging props with any existing entry.
    pub fn register(&mut self, component: HostComponent) {
        match self.components.get_mut(&component.id) {
            Some(existing) => {
                tracing::debug!(id = %component.id, "merging props into registered component");
                existing.props.extend(component.props);
            }
            None => {
                self.components.insert(component.id.clone(), component);
            }
        }
    }

    /// Look up a component by id.
    #[must_use]
    pub fn get(&self, id: &str) -> Option<&HostComponent> {
        self.components.get(id)
    }

    /// The universal container component, if registered.
    #[must_use]
    pub fn container(&self) -> Option<&HostComponent> {
        self.get(UNIVERSAL_CONTAINER)
    }

    /// All components sorted ascending by id.
    ///
    /// Ids are unique (they key the registry), so the order is total.
    #[must_use]
    pub fn sorted(&self) -> Vec<&HostComponent> {
        let mut components: Vec<&HostComponent> = self.components.values().collect();
        components.sort_by(|a, b| a.id.cmp(&b.id));
        components
    }

    /// Number of registered components.
    #[must_use]
    pub fn len(&self) -> usize {
        self.components.len()
    }

    /// True if no components are registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.components.is_empty()
    }
}
