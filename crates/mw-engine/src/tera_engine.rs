//! Tera-backed [`TemplateEngine`] implementation.

use std::path::Path;
use std::sync::{Mutex, PoisonError};

use async_trait::async_trait;

use crate::engine::{EngineError, EngineOptions, TemplateEngine, TemplateVars};

/// Production engine backed by the Tera expansion language.
///
/// Template files are loaded into an in-process registry on first use and
/// reused for subsequent renders, so a watch session parses each template
/// once. Tera templates control their own whitespace (`{%-`/`-%}`), so the
/// [`EngineOptions::trim_whitespace`] hint is ignored here.
#[derive(Debug, Default)]
pub struct TeraEngine {
    templates: Mutex<tera::Tera>,
}

impl TeraEngine {
    /// Create an engine with an empty template registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl TemplateEngine for TeraEngine {
    async fn render_file(
        &self,
        template: &Path,
        vars: &TemplateVars,
        _options: EngineOptions,
    ) -> Result<String, EngineError> {
        if !template.exists() {
            return Err(EngineError::NotFound(template.to_path_buf()));
        }

        let name = template.to_string_lossy().into_owned();
        let context = tera::Context::from_serialize(serde_json::Value::Object(vars.clone()))
            .map_err(|e| EngineError::Render(e.to_string()))?;

        let mut templates = self
            .templates
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        if !templates.get_template_names().any(|n| n == name) {
            tracing::debug!(template = %name, "loading template file");
            templates
                .add_template_file(template, Some(&name))
                .map_err(|e| EngineError::Render(e.to_string()))?;
        }
        templates
            .render(&name, &context)
            .map_err(|e| EngineError::Render(e.to_string()))
    }
}
