//! Engine trait and error types.

use std::path::{Path, PathBuf};

use async_trait::async_trait;

/// Normalized variable set handed to an engine: a flat JSON object.
pub type TemplateVars = serde_json::Map<String, serde_json::Value>;

/// Per-render options forwarded to the backend.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct EngineOptions {
    /// Hint that the caller intends to compact whitespace in the output.
    ///
    /// Backends whose expansion language has its own whitespace trimming
    /// may honor it; backends without one may ignore it. Callers must not
    /// rely on the hint for correctness.
    pub trim_whitespace: bool,
}

/// Error from a template expansion backend.
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    /// Template file does not exist.
    #[error("Template not found: {}", .0.display())]
    NotFound(PathBuf),
    /// I/O error reading the template file.
    #[error("I/O error reading template: {0}")]
    Io(#[from] std::io::Error),
    /// The expansion itself failed (syntax error, bad variable reference).
    #[error("Template expansion failed: {0}")]
    Render(String),
}

/// A text-expansion engine.
///
/// Implementations must be deterministic: for a fixed template file,
/// identical `vars` and `options` produce identical output. Reading the
/// template file is the only I/O an implementation performs, and it is the
/// render pipeline's sole suspension point.
#[async_trait]
pub trait TemplateEngine: Send + Sync {
    /// Expand the template at `template` with `vars`.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError`] when the template cannot be read or the
    /// expansion fails. No partial output is returned.
    async fn render_file(
        &self,
        template: &Path,
        vars: &TemplateVars,
        options: EngineOptions,
    ) -> Result<String, EngineError>;
}
