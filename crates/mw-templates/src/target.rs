//! Per-target template descriptors.

use std::path::PathBuf;

/// Template metadata for one target host runtime.
///
/// Supplied by the surrounding build tooling: each supported host runtime
/// declares its emitted file extensions and the template files its assets
/// are expanded from.
#[derive(Clone, Debug)]
pub struct TargetMeta {
    /// Extension of emitted markup assets, with leading dot (e.g. `".axml"`).
    pub template_extension: String,
    /// Extension of companion script assets, with leading dot (e.g. `".sjs"`).
    pub companion_extension: String,
    /// Template file every page asset is expanded from.
    pub page_template: PathBuf,
    /// Template file for the shared base template.
    ///
    /// Targets whose runtime needs no base template leave this unset; base
    /// emission is then a no-op.
    pub base_template: Option<PathBuf>,
}

impl TargetMeta {
    /// Output file name of the base template asset.
    #[must_use]
    pub fn base_file_name(&self) -> String {
        format!("base{}", self.template_extension)
    }

    /// Absolute reference pages use to import the base template.
    #[must_use]
    pub fn base_template_ref(&self) -> String {
        format!("/base{}", self.template_extension)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn meta() -> TargetMeta {
        TargetMeta {
            template_extension: ".axml".to_owned(),
            companion_extension: ".sjs".to_owned(),
            page_template: PathBuf::from("templates/page.tera"),
            base_template: None,
        }
    }

    #[test]
    fn test_base_file_name() {
        assert_eq!(meta().base_file_name(), "base.axml");
    }

    #[test]
    fn test_base_template_ref_is_absolute() {
        assert_eq!(meta().base_template_ref(), "/base.axml");
    }
}
