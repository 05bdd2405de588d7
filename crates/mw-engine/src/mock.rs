//! Mock engine implementation for testing.
//!
//! Provides [`MockEngine`] for unit testing render pipelines without
//! template files on disk.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, PoisonError, RwLock};

use async_trait::async_trait;

use crate::engine::{EngineError, EngineOptions, TemplateEngine, TemplateVars};

/// One recorded [`TemplateEngine::render_file`] invocation.
#[derive(Clone, Debug)]
pub struct RenderCall {
    /// Template path the consumer asked for.
    pub template: PathBuf,
    /// Variables as they crossed the boundary.
    pub vars: TemplateVars,
    /// Options as they crossed the boundary.
    pub options: EngineOptions,
}

/// Deterministic engine for tests.
///
/// Canned outputs and failures are configured per template path with the
/// builder methods; every call is recorded for assertions.
///
/// # Example
///
/// ```ignore
/// use std::path::Path;
/// use mw_engine::{EngineOptions, MockEngine, TemplateEngine, TemplateVars};
///
/// let engine = MockEngine::new().with_output("page.tera", "<view/>");
/// let output = engine
///     .render_file(Path::new("page.tera"), &TemplateVars::new(), EngineOptions::default())
///     .await?;
/// assert_eq!(output, "<view/>");
/// assert_eq!(engine.calls().len(), 1);
/// ```
#[derive(Debug, Default)]
pub struct MockEngine {
    outputs: RwLock<HashMap<PathBuf, String>>,
    failures: RwLock<HashMap<PathBuf, String>>,
    calls: Mutex<Vec<RenderCall>>,
}

impl MockEngine {
    /// Create a mock with no canned outputs.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Configure the output returned for a template path.
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned.
    #[must_use]
    pub fn with_output(self, template: impl Into<PathBuf>, output: impl Into<String>) -> Self {
        self.outputs
            .write()
            .unwrap()
            .insert(template.into(), output.into());
        self
    }

    /// Configure a render failure for a template path.
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned.
    #[must_use]
    pub fn with_failure(self, template: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        self.failures
            .write()
            .unwrap()
            .insert(template.into(), message.into());
        self
    }

    /// All recorded calls, in invocation order.
    #[must_use]
    pub fn calls(&self) -> Vec<RenderCall> {
        self.calls
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Number of recorded calls.
    #[must_use]
    pub fn render_count(&self) -> usize {
        self.calls
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }
}

#[async_trait]
impl TemplateEngine for MockEngine {
    async fn render_file(
        &self,
        template: &Path,
        vars: &TemplateVars,
        options: EngineOptions,
    ) -> Result<String, EngineError> {
        self.calls
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(RenderCall {
                template: template.to_path_buf(),
                vars: vars.clone(),
                options,
            });

        if let Some(message) = self
            .failures
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(template)
        {
            return Err(EngineError::Render(message.clone()));
        }

        self.outputs
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(template)
            .cloned()
            .ok_or_else(|| EngineError::NotFound(template.to_path_buf()))
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[tokio::test]
    async fn test_canned_output() {
        let engine = MockEngine::new().with_output("page.tera", "<view/>");
        let output = engine
            .render_file(
                Path::new("page.tera"),
                &TemplateVars::new(),
                EngineOptions::default(),
            )
            .await
            .unwrap();
        assert_eq!(output, "<view/>");
    }

    #[tokio::test]
    async fn test_unconfigured_template_is_not_found() {
        let engine = MockEngine::new();
        let result = engine
            .render_file(
                Path::new("absent.tera"),
                &TemplateVars::new(),
                EngineOptions::default(),
            )
            .await;
        assert!(matches!(result, Err(EngineError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_configured_failure() {
        let engine = MockEngine::new().with_failure("bad.tera", "unexpected token");
        let result = engine
            .render_file(
                Path::new("bad.tera"),
                &TemplateVars::new(),
                EngineOptions::default(),
            )
            .await;
        match result {
            Err(EngineError::Render(message)) => assert_eq!(message, "unexpected token"),
            other => panic!("expected render failure, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_records_calls_with_vars_and_options() {
        let engine = MockEngine::new().with_output("page.tera", "");
        let mut vars = TemplateVars::new();
        vars.insert("depth".to_owned(), serde_json::json!(3));

        engine
            .render_file(
                Path::new("page.tera"),
                &vars,
                EngineOptions {
                    trim_whitespace: true,
                },
            )
            .await
            .unwrap();

        let calls = engine.calls();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].template, Path::new("page.tera"));
        assert_eq!(calls[0].vars["depth"], serde_json::json!(3));
        assert!(calls[0].options.trim_whitespace);
    }
}
