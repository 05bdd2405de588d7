//! The render pipeline: expand, compact, gate, publish.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use mw_artifacts::AssetTable;
use mw_cache::CacheStore;
use mw_engine::{EngineOptions, TemplateEngine};
use mw_manifest::ComponentManifest;

use crate::error::TemplateError;
use crate::page::PageDescriptor;
use crate::target::TargetMeta;
use crate::vars::RenderVars;

/// Options governing one template generation pass.
#[derive(Clone, Debug)]
pub struct GeneratorOptions {
    /// Project root that page source paths are derived against.
    pub root_dir: PathBuf,
    /// Compact whitespace in emitted templates.
    pub compress: bool,
    /// Resolved recursion depth for the base template.
    pub template_depth: u32,
}

/// Renders page and base template assets and publishes them into the
/// build's output set.
///
/// Collaborators are shared and read-only during the pass, except the
/// [`CacheStore`], whose per-file-name admission gate is the only mutable
/// shared state; page renders are therefore free to run concurrently (see
/// [`emit_pages`](Self::emit_pages)). The generator is cheap to clone — all
/// collaborators sit behind `Arc`s.
#[derive(Clone)]
pub struct TemplateGenerator {
    engine: Arc<dyn TemplateEngine>,
    manifest: Arc<ComponentManifest>,
    cache: Arc<CacheStore>,
    assets: Arc<AssetTable>,
    meta: TargetMeta,
    options: GeneratorOptions,
}

impl TemplateGenerator {
    /// Create a generator over the given collaborators.
    ///
    /// The cache store should be session-scoped: reuse one instance across
    /// incremental rebuilds of a watch session so unchanged assets are
    /// skipped, and start a fresh one on cold start.
    #[must_use]
    pub fn new(
        engine: Arc<dyn TemplateEngine>,
        manifest: Arc<ComponentManifest>,
        cache: Arc<CacheStore>,
        assets: Arc<AssetTable>,
        meta: TargetMeta,
        options: GeneratorOptions,
    ) -> Self {
        Self {
            engine,
            manifest,
            cache,
            assets,
            meta,
            options,
        }
    }

    /// Derive a [`PageDescriptor`] for a source file under this generator's
    /// project root.
    ///
    /// # Errors
    ///
    /// Returns [`TemplateError::InvalidPath`] when `source` is not under the
    /// configured root.
    pub fn describe_page(
        &self,
        source: &Path,
        has_companion_script: bool,
    ) -> Result<PageDescriptor, TemplateError> {
        PageDescriptor::derive(source, &self.options.root_dir, &self.meta, has_companion_script)
    }

    /// Render one page's template asset and publish it if its content
    /// changed since the last accepted publish.
    ///
    /// Returns whether a publish happened.
    ///
    /// # Errors
    ///
    /// Returns [`TemplateError::Render`] when the engine fails; nothing is
    /// published in that case.
    pub async fn emit_page(&self, page: &PageDescriptor) -> Result<bool, TemplateError> {
        let vars = RenderVars::page(&self.manifest, &self.meta, page);
        let content = self.render(&self.meta.page_template, &vars).await?;
        Ok(self.publish_if_changed(page.output_path(), content))
    }

    /// Render the base template asset and publish it if its content changed.
    ///
    /// Targets without a base template resolve to `Ok(false)`.
    ///
    /// # Errors
    ///
    /// Returns [`TemplateError::Render`] when the engine fails.
    pub async fn emit_base(&self) -> Result<bool, TemplateError> {
        let Some(base_template) = self.meta.base_template.as_deref() else {
            return Ok(false);
        };
        let vars = RenderVars::base(&self.manifest, &self.meta, self.options.template_depth);
        let content = self.render(base_template, &vars).await?;
        Ok(self.publish_if_changed(&self.meta.base_file_name(), content))
    }

    /// Render every page concurrently, one cooperative task per page.
    ///
    /// Page renders are independent — they share only read-only inputs and
    /// the per-file-name cache gate — so no ordering is guaranteed between
    /// them. Failures are collected per output path and returned once all
    /// tasks settle; one failing page never aborts its siblings. Dropping
    /// the returned future abandons in-flight renders without partial
    /// publication.
    pub async fn emit_pages(&self, pages: Vec<PageDescriptor>) -> Vec<(String, TemplateError)> {
        let mut tasks = tokio::task::JoinSet::new();
        for page in pages {
            let generator = self.clone();
            tasks.spawn(async move {
                generator
                    .emit_page(&page)
                    .await
                    .map(|_| ())
                    .map_err(|error| (page.output_path().to_owned(), error))
            });
        }

        let mut failures = Vec::new();
        while let Some(joined) = tasks.join_next().await {
            match joined {
                Ok(Ok(())) => {}
                Ok(Err(failure)) => failures.push(failure),
                Err(join_error) => {
                    tracing::error!(error = %join_error, "page render task did not complete");
                }
            }
        }
        failures
    }

    /// Expand a template and apply the optional whitespace compaction.
    async fn render(&self, template: &Path, vars: &RenderVars) -> Result<String, TemplateError> {
        let options = EngineOptions {
            trim_whitespace: self.options.compress,
        };
        let content = self
            .engine
            .render_file(template, &vars.to_engine_vars(), options)
            .await
            .map_err(|source| TemplateError::Render {
                template: template.to_path_buf(),
                source,
            })?;

        if self.options.compress {
            Ok(compact_template(&content))
        } else {
            Ok(content)
        }
    }

    /// Publish `content` under `file_name` unless it is unchanged since the
    /// last accepted publish for that name.
    fn publish_if_changed(&self, file_name: &str, content: String) -> bool {
        if !self.cache.admit(file_name, &content) {
            tracing::debug!(file = %file_name, "skipping unchanged template asset");
            return false;
        }
        self.assets.publish(file_name, content);
        true
    }
}

/// Compact rendered template text.
///
/// Two transforms, in order: drop every line that is entirely whitespace
/// (terminator included), then collapse each remaining line terminator to a
/// single space. A final line without a terminator is kept as-is. Purely
/// textual; non-whitespace content and its order are untouched.
fn compact_template(source: &str) -> String {
    let mut compacted = String::with_capacity(source.len());
    for line in source.split_inclusive('\n') {
        let (body, terminated) = match line.strip_suffix('\n') {
            Some(rest) => (rest.strip_suffix('\r').unwrap_or(rest), true),
            None => (line, false),
        };
        if terminated && body.chars().all(char::is_whitespace) {
            continue;
        }
        compacted.push_str(body);
        if terminated {
            compacted.push(' ');
        }
    }
    compacted
}
