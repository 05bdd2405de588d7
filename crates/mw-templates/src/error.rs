//! Template generation error types.

use std::path::PathBuf;

use mw_engine::EngineError;

/// Error returned when generating a template asset fails.
///
/// Both variants are fatal for the page (or base template) being rendered
/// and are surfaced to the invoking build phase; neither aborts sibling
/// renders, and no partial asset is ever published on failure. Render
/// inputs are deterministic, so nothing here is retried.
#[derive(Debug, thiserror::Error)]
pub enum TemplateError {
    /// Source path is not under the configured project root.
    #[error("Source path {} is not under project root {}", .source_path.display(), .root.display())]
    InvalidPath {
        /// The offending source path.
        source_path: PathBuf,
        /// The configured project root.
        root: PathBuf,
    },
    /// The templating engine failed to expand a template.
    #[error("Template render failed for {}: {source}", .template.display())]
    Render {
        /// The template file that failed to render.
        template: PathBuf,
        /// The underlying engine failure.
        #[source]
        source: EngineError,
    },
}
