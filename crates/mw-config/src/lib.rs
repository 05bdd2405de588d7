//! Configuration management for miniweave.
//!
//! Parses `miniweave.toml` configuration files with serde and provides
//! auto-discovery of config files in parent directories.
//!
//! ## Environment Variable Expansion
//!
//! String configuration values support environment variable expansion:
//!
//! - `${VAR}` - expands to the value of VAR, errors if unset
//! - `${VAR:-default}` - expands to VAR if set, otherwise uses default
//!
//! Expanded fields:
//! - `build.root_dir`
//!
//! ## Template Depth
//!
//! The `build.template_depth` value is a raw user request. [`resolve_depth`]
//! turns it into the bound the template generator actually unrolls to.

mod expand;

use std::path::{Path, PathBuf};

use serde::Deserialize;

/// Configuration filename to search for.
const CONFIG_FILENAME: &str = "miniweave.toml";

/// Depth used when no `template_depth` is configured.
pub const DEFAULT_TEMPLATE_DEPTH: u32 = 20;

/// Smallest depth that still produces a usable base template.
pub const MIN_TEMPLATE_DEPTH: u32 = 1;

/// Upper bound on unrolled container nesting.
///
/// Every level is statically expanded into the base template, so the emitted
/// asset grows linearly with depth; 32 levels is already far beyond any real
/// page structure.
pub const MAX_TEMPLATE_DEPTH: u32 = 32;

/// Resolve a raw depth request into the bound handed to template generation.
///
/// An absent request resolves to [`DEFAULT_TEMPLATE_DEPTH`]. Out-of-range
/// requests are clamped into `[MIN_TEMPLATE_DEPTH, MAX_TEMPLATE_DEPTH]` with
/// a warning.
#[must_use]
pub fn resolve_depth(requested: Option<u32>) -> u32 {
    let Some(depth) = requested else {
        return DEFAULT_TEMPLATE_DEPTH;
    };
    let resolved = depth.clamp(MIN_TEMPLATE_DEPTH, MAX_TEMPLATE_DEPTH);
    if resolved != depth {
        tracing::warn!(
            requested = depth,
            resolved,
            "template_depth outside supported range, clamping"
        );
    }
    resolved
}

/// Application configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Build configuration (paths are relative strings from TOML).
    build: BuildConfigRaw,

    /// Resolved build configuration (set after loading).
    #[serde(skip)]
    pub build_resolved: BuildConfig,
    /// Path to the config file (set after loading).
    #[serde(skip)]
    pub config_path: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self::default_with_base(Path::new("."))
    }
}

/// Raw build configuration as parsed from TOML (paths as strings).
#[derive(Debug, Deserialize, Default)]
#[serde(default)]
struct BuildConfigRaw {
    root_dir: Option<String>,
    compress_template: Option<bool>,
    template_depth: Option<u32>,
}

/// Resolved build configuration with absolute paths.
#[derive(Debug, Default)]
pub struct BuildConfig {
    /// Root directory containing page sources.
    pub root_dir: PathBuf,
    /// Whether emitted templates have their whitespace compacted.
    pub compress_template: bool,
    /// Raw template depth request (resolve with [`resolve_depth`]).
    pub template_depth: Option<u32>,
}

/// Configuration error.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// File not found.
    #[error("Configuration file not found: {}", .0.display())]
    NotFound(PathBuf),
    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// TOML parsing error.
    #[error("TOML parse error: {0}")]
    Parse(#[from] toml::de::Error),
    /// Validation error.
    #[error("Configuration error: {0}")]
    Validation(String),
    /// Environment variable error during expansion.
    #[error("Environment variable error in {field}: {message}")]
    EnvVar {
        /// Config field path (e.g., "`build.root_dir`").
        field: String,
        /// Error message (e.g., "${`MW_ROOT`} not set").
        message: String,
    },
}

impl Config {
    /// Load configuration.
    ///
    /// If `config_path` is provided, loads from that file. Otherwise,
    /// searches for `miniweave.toml` in the current directory and parents,
    /// falling back to defaults when none is found.
    ///
    /// # Errors
    ///
    /// Returns an error if an explicit `config_path` doesn't exist or
    /// parsing fails.
    pub fn load(config_path: Option<&Path>) -> Result<Self, ConfigError> {
        if let Some(path) = config_path {
            if !path.exists() {
                return Err(ConfigError::NotFound(path.to_path_buf()));
            }
            Self::load_from_file(path)
        } else if let Some(discovered) = Self::discover_config() {
            Self::load_from_file(&discovered)
        } else {
            Ok(Self::default_with_cwd())
        }
    }

    /// The resolved template depth for this configuration.
    #[must_use]
    pub fn template_depth(&self) -> u32 {
        resolve_depth(self.build_resolved.template_depth)
    }

    /// Search for config file in current directory and parents.
    fn discover_config() -> Option<PathBuf> {
        let mut current = std::env::current_dir().ok()?;
        loop {
            let candidate = current.join(CONFIG_FILENAME);
            if candidate.exists() {
                return Some(candidate);
            }
            if !current.pop() {
                return None;
            }
        }
    }

    /// Create default config with paths relative to current working directory.
    fn default_with_cwd() -> Self {
        let cwd = std::env::current_dir().unwrap_or_default();
        Self::default_with_base(&cwd)
    }

    /// Create default config with paths relative to given base directory.
    fn default_with_base(base: &Path) -> Self {
        Self {
            build: BuildConfigRaw::default(),
            build_resolved: BuildConfig {
                root_dir: base.join("src"),
                compress_template: false,
                template_depth: None,
            },
            config_path: None,
        }
    }

    /// Load configuration from a specific file.
    fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let mut config: Self = toml::from_str(&content)?;

        let config_dir = path.parent().unwrap_or(Path::new("."));
        config.resolve(config_dir)?;
        config.config_path = Some(path.to_path_buf());

        Ok(config)
    }

    /// Expand and resolve raw values against the config file's directory.
    fn resolve(&mut self, config_dir: &Path) -> Result<(), ConfigError> {
        let root_dir = match &self.build.root_dir {
            Some(raw) => {
                let expanded = expand::expand_env(raw, "build.root_dir")?;
                if expanded.is_empty() {
                    return Err(ConfigError::Validation(
                        "build.root_dir cannot be empty".to_owned(),
                    ));
                }
                let expanded = PathBuf::from(expanded);
                if expanded.is_absolute() {
                    expanded
                } else {
                    config_dir.join(expanded)
                }
            }
            None => config_dir.join("src"),
        };

        self.build_resolved = BuildConfig {
            root_dir,
            compress_template: self.build.compress_template.unwrap_or(false),
            template_depth: self.build.template_depth,
        };
        Ok(())
    }
}
