//! Render variable assembly.
//!
//! The templating pass receives a closed, mode-tagged variable set: one
//! shape for page templates, one for the base template. Both carry the
//! component manifest sorted by id and the universal container's
//! deduplicated prop list — the expansion language needs deterministic,
//! non-repeating enumeration for builds to be reproducible.
//!
//! Assembly is pure: a [`RenderVars`] value is constructed fresh per render
//! call, never mutated afterwards, and never shared across renders.

use mw_engine::TemplateVars;
use mw_manifest::{ComponentManifest, HostComponent};
use serde::Serialize;

use crate::page::PageDescriptor;
use crate::target::TargetMeta;

/// Variables for a page template render.
#[derive(Clone, Debug, Serialize)]
pub struct PageRenderConfig {
    /// Full component manifest, ascending by id.
    pub components: Vec<HostComponent>,
    /// Universal container props, deduplicated and sorted.
    pub container_props: Vec<String>,
    /// Absolute reference to the base template asset.
    pub base_template: String,
    /// Relative reference to the page's companion script asset.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub companion_script: Option<String>,
}

/// Variables for the base template render.
#[derive(Clone, Debug, Serialize)]
pub struct BaseRenderConfig {
    /// Full component manifest, ascending by id.
    pub components: Vec<HostComponent>,
    /// Universal container props, deduplicated and sorted.
    pub container_props: Vec<String>,
    /// Absolute reference to the base template asset.
    pub base_template: String,
    /// Number of nested container levels to unroll.
    pub depth: u32,
}

/// Variable set for one render call, tagged by render mode.
#[derive(Clone, Debug, Serialize)]
#[serde(untagged)]
pub enum RenderVars {
    /// Page template variables.
    Page(PageRenderConfig),
    /// Base template variables.
    Base(BaseRenderConfig),
}

impl RenderVars {
    /// Assemble variables for a page render.
    #[must_use]
    pub fn page(manifest: &ComponentManifest, meta: &TargetMeta, page: &PageDescriptor) -> Self {
        Self::Page(PageRenderConfig {
            components: sorted_components(manifest),
            container_props: container_props(manifest),
            base_template: meta.base_template_ref(),
            companion_script: page.companion_script_ref().map(str::to_owned),
        })
    }

    /// Assemble variables for the base template render.
    ///
    /// `depth` must already be resolved into a safe bound by the
    /// configuration layer; it is treated as opaque here.
    #[must_use]
    pub fn base(manifest: &ComponentManifest, meta: &TargetMeta, depth: u32) -> Self {
        Self::Base(BaseRenderConfig {
            components: sorted_components(manifest),
            container_props: container_props(manifest),
            base_template: meta.base_template_ref(),
            depth,
        })
    }

    /// Serialize into the normalized form the engine boundary accepts.
    #[must_use]
    pub fn to_engine_vars(&self) -> TemplateVars {
        // A closed set of string/integer records: serialization cannot fail
        // and always yields an object.
        match serde_json::to_value(self) {
            Ok(serde_json::Value::Object(vars)) => vars,
            Ok(_) | Err(_) => unreachable!("render variables serialize to an object"),
        }
    }
}

/// All manifest components, cloned and sorted ascending by id.
fn sorted_components(manifest: &ComponentManifest) -> Vec<HostComponent> {
    manifest.sorted().into_iter().cloned().collect()
}

/// The universal container's props, deduplicated then sorted ascending.
///
/// A manifest without the container yields an empty list; registering the
/// container is the earlier build phase's responsibility.
fn container_props(manifest: &ComponentManifest) -> Vec<String> {
    let mut props = manifest
        .container()
        .map(|container| container.props.clone())
        .unwrap_or_default();
    props.sort();
    props.dedup();
    props
}

#[cfg(test)]
mod tests {
    use std::path::{Path, PathBuf};

    use mw_manifest::UNIVERSAL_CONTAINER;
    use pretty_assertions::assert_eq;

    use super::*;

    fn meta() -> TargetMeta {
        TargetMeta {
            template_extension: ".axml".to_owned(),
            companion_extension: ".sjs".to_owned(),
            page_template: PathBuf::from("templates/page.tera"),
            base_template: Some(PathBuf::from("templates/base.tera")),
        }
    }

    fn manifest() -> ComponentManifest {
        let mut manifest = ComponentManifest::new();
        manifest.register(HostComponent::new("b", ["x"]));
        manifest.register(HostComponent::new("a", ["y", "x"]));
        manifest.register(HostComponent::new(UNIVERSAL_CONTAINER, ["m", "k", "m"]));
        manifest
    }

    fn page(has_companion: bool) -> PageDescriptor {
        PageDescriptor::derive(
            Path::new("/proj/src/pages/home/index.tsx"),
            Path::new("/proj/src"),
            &meta(),
            has_companion,
        )
        .unwrap()
    }

    #[test]
    fn test_components_sorted_ascending_by_id() {
        let RenderVars::Base(config) = RenderVars::base(&manifest(), &meta(), 3) else {
            panic!("expected base variables");
        };
        let ids: Vec<&str> = config.components.iter().map(|c| c.id.as_str()).collect();
        assert_eq!(ids, ["a", "b", UNIVERSAL_CONTAINER]);
    }

    #[test]
    fn test_container_props_deduplicated_and_sorted() {
        let RenderVars::Base(config) = RenderVars::base(&manifest(), &meta(), 3) else {
            panic!("expected base variables");
        };
        // Only the distinguished container's own props, not the union of
        // every component's props
        assert_eq!(config.container_props, ["k", "m"]);
    }

    #[test]
    fn test_container_props_empty_without_container() {
        let mut manifest = ComponentManifest::new();
        manifest.register(HostComponent::new("a", ["x"]));

        let RenderVars::Base(config) = RenderVars::base(&manifest, &meta(), 3) else {
            panic!("expected base variables");
        };
        assert!(config.container_props.is_empty());
    }

    #[test]
    fn test_base_vars_carry_depth_and_base_ref() {
        let RenderVars::Base(config) = RenderVars::base(&manifest(), &meta(), 3) else {
            panic!("expected base variables");
        };
        assert_eq!(config.depth, 3);
        assert_eq!(config.base_template, "/base.axml");
    }

    #[test]
    fn test_page_vars_with_companion_script() {
        let vars = RenderVars::page(&manifest(), &meta(), &page(true));
        let engine_vars = vars.to_engine_vars();
        assert_eq!(
            engine_vars["companion_script"],
            serde_json::json!("./pages_home_index_helper.sjs")
        );
    }

    #[test]
    fn test_page_vars_omit_absent_companion_script() {
        let vars = RenderVars::page(&manifest(), &meta(), &page(false));
        let engine_vars = vars.to_engine_vars();
        assert!(!engine_vars.contains_key("companion_script"));
        assert!(!engine_vars.contains_key("depth"));
    }

    #[test]
    fn test_engine_vars_shape() {
        let engine_vars = RenderVars::base(&manifest(), &meta(), 5).to_engine_vars();
        assert_eq!(engine_vars["depth"], serde_json::json!(5));
        assert_eq!(engine_vars["base_template"], serde_json::json!("/base.axml"));
        assert_eq!(
            engine_vars["components"][0]["id"],
            serde_json::json!("a")
        );
        assert_eq!(
            engine_vars["components"][0]["props"],
            serde_json::json!(["y", "x"])
        );
    }

    #[test]
    fn test_assembly_deterministic_across_calls() {
        let manifest = manifest();
        let first = RenderVars::base(&manifest, &meta(), 3).to_engine_vars();
        let second = RenderVars::base(&manifest, &meta(), 3).to_engine_vars();
        assert_eq!(first, second);
    }
}
