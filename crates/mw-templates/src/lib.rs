//! Page and base template generation for miniweave.
//!
//! The target host runtime cannot execute arbitrary application logic; it
//! loads statically expanded, declarative view templates instead. This crate
//! renders those template assets — one per page plus a shared base template —
//! and publishes them into an in-progress build's output set.
//!
//! Pipeline, per page:
//!
//! ```text
//! source path ─► Path Deriver ─► Variable Assembler ─► Render Pipeline
//!                                                         │
//!                              Asset Publisher ◄── Cache Gate
//! ```
//!
//! - **Path Deriver** ([`path`] helpers, [`PageDescriptor`]): turns a
//!   platform-specific source path into a build-relative output path and a
//!   stable unique identifier.
//! - **Variable Assembler** ([`RenderVars`]): the sorted component manifest,
//!   the universal container's deduplicated prop list, and mode-specific
//!   extras (companion-script reference for pages, recursion depth for the
//!   base template).
//! - **Render Pipeline + Cache Gate + Publisher** ([`TemplateGenerator`]):
//!   expands the template through an injected [`mw_engine::TemplateEngine`],
//!   optionally compacts whitespace, and publishes into the
//!   [`mw_artifacts::AssetTable`] only when the rendered content actually
//!   changed since the last accepted publish ([`mw_cache::CacheStore`]).
//!
//! # Quick Start
//!
//! ```ignore
//! use std::path::{Path, PathBuf};
//! use std::sync::Arc;
//! use mw_artifacts::AssetTable;
//! use mw_cache::CacheStore;
//! use mw_engine::TeraEngine;
//! use mw_templates::{GeneratorOptions, TargetMeta, TemplateGenerator};
//!
//! let generator = TemplateGenerator::new(
//!     Arc::new(TeraEngine::new()),
//!     manifest,
//!     Arc::new(CacheStore::new()),
//!     Arc::new(AssetTable::new()),
//!     TargetMeta {
//!         template_extension: ".axml".to_owned(),
//!         companion_extension: ".sjs".to_owned(),
//!         page_template: PathBuf::from("templates/page.tera"),
//!         base_template: Some(PathBuf::from("templates/base.tera")),
//!     },
//!     GeneratorOptions {
//!         root_dir: PathBuf::from("/proj/src"),
//!         compress: true,
//!         template_depth: 20,
//!     },
//! );
//!
//! let page = generator.describe_page(Path::new("/proj/src/pages/home/index.tsx"), false)?;
//! generator.emit_page(&page).await?;
//! generator.emit_base().await?;
//! ```

mod error;
mod generator;
mod page;
pub mod path;
mod target;
mod vars;

pub use error::TemplateError;
pub use generator::{GeneratorOptions, TemplateGenerator};
pub use page::PageDescriptor;
pub use target::TargetMeta;
pub use vars::{BaseRenderConfig, PageRenderConfig, RenderVars};
