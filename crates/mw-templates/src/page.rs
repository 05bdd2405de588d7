//! Page descriptors.

use std::path::{Path, PathBuf};

use crate::error::TemplateError;
use crate::path;
use crate::target::TargetMeta;

/// One page whose template asset is to be generated.
///
/// All derived fields are computed once from the source path and are
/// immutable afterwards; a descriptor lives for a single build pass and is
/// discarded after its asset is (possibly) published.
#[derive(Clone, Debug)]
pub struct PageDescriptor {
    source_path: PathBuf,
    relative_path: String,
    output_path: String,
    uid: String,
    companion_script_ref: Option<String>,
}

impl PageDescriptor {
    /// Derive a descriptor from a page source path.
    ///
    /// `has_companion_script` is true when the page declares an auxiliary
    /// logic file; the emitted template then references the companion asset
    /// next to it.
    ///
    /// # Errors
    ///
    /// Returns [`TemplateError::InvalidPath`] when `source` is not under
    /// `root`.
    pub fn derive(
        source: &Path,
        root: &Path,
        meta: &TargetMeta,
        has_companion_script: bool,
    ) -> Result<Self, TemplateError> {
        let relative_path = path::project_relative(source, root)?;
        let uid = path::page_uid(&relative_path);
        let output_path = path::template_file_name(&relative_path, &meta.template_extension);
        let companion_script_ref = has_companion_script
            .then(|| format!("./{uid}_helper{}", meta.companion_extension));

        Ok(Self {
            source_path: source.to_path_buf(),
            relative_path,
            output_path,
            uid,
            companion_script_ref,
        })
    }

    /// The page's source file path as given.
    #[must_use]
    pub fn source_path(&self) -> &Path {
        &self.source_path
    }

    /// Build-relative source path with normalized separators.
    #[must_use]
    pub fn relative_path(&self) -> &str {
        &self.relative_path
    }

    /// Relative output path of the emitted template asset.
    #[must_use]
    pub fn output_path(&self) -> &str {
        &self.output_path
    }

    /// Stable unique identifier for the page.
    #[must_use]
    pub fn uid(&self) -> &str {
        &self.uid
    }

    /// Relative reference to the page's companion script asset, if any.
    #[must_use]
    pub fn companion_script_ref(&self) -> Option<&str> {
        self.companion_script_ref.as_deref()
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
    fn test_derive_fills_all_fields() {
        let page = PageDescriptor::derive(
            Path::new("/proj/src/pages/home/index.tsx"),
            Path::new("/proj/src"),
            &meta(),
            true,
        )
        .unwrap();

        assert_eq!(page.source_path(), Path::new("/proj/src/pages/home/index.tsx"));
        assert_eq!(page.relative_path(), "pages/home/index.tsx");
        assert_eq!(page.output_path(), "pages/home/index.axml");
        assert_eq!(page.uid(), "pages_home_index");
        assert_eq!(
            page.companion_script_ref(),
            Some("./pages_home_index_helper.sjs")
        );
    }

    #[test]
    fn test_derive_without_companion_script() {
        let page = PageDescriptor::derive(
            Path::new("/proj/src/pages/about.tsx"),
            Path::new("/proj/src"),
            &meta(),
            false,
        )
        .unwrap();

        assert_eq!(page.output_path(), "pages/about.axml");
        assert_eq!(page.companion_script_ref(), None);
    }

    #[test]
    fn test_derive_rejects_source_outside_root() {
        let result = PageDescriptor::derive(
            Path::new("/elsewhere/about.tsx"),
            Path::new("/proj/src"),
            &meta(),
            false,
        );
        assert!(matches!(result, Err(TemplateError::InvalidPath { .. })));
    }
}
