//! Templating engine boundary for miniweave.
//!
//! Template generation treats the text-expansion engine as an injected
//! capability: a function from a template file and a variable set to output
//! text. This crate provides:
//!
//! - [`TemplateEngine`]: the trait consumers depend on
//! - [`TeraEngine`]: production backend over the Tera expansion language
//! - `MockEngine`: deterministic test double (behind the `mock` feature)
//!
//! The trait seam exists so the render pipeline can be unit tested without
//! template files, and so the expansion language can be swapped without
//! touching any consumer.
//!
//! Variables cross the boundary in a normalized form: a JSON object map.
//! Whatever typed records a consumer assembles are serialized before they
//! reach the engine, keeping backends free of consumer types.

mod engine;
#[cfg(feature = "mock")]
mod mock;
mod tera_engine;

pub use engine::{EngineError, EngineOptions, TemplateEngine, TemplateVars};
#[cfg(feature = "mock")]
pub use mock::{MockEngine, RenderCall};
pub use tera_engine::TeraEngine;
