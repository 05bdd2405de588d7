//! Source path derivation.
//!
//! Page sources arrive as absolute, platform-specific paths. Everything the
//! pipeline keys on is derived from them here: a build-relative path with
//! normalized separators, the emitted asset's file name, and a stable unique
//! identifier usable in file names and lookup keys.

use std::path::Path;

use crate::error::TemplateError;

/// Render a path with separators normalized to `/`.
fn normalize_separators(path: &Path) -> String {
    path.to_string_lossy().replace('\\', "/")
}

/// Build-relative path of `source` under `root`.
///
/// Separators are normalized to `/` on both sides before the root prefix is
/// stripped, so Windows-style inputs derive the same relative path as their
/// Unix equivalents.
///
/// # Errors
///
/// Returns [`TemplateError::InvalidPath`] when `root` is not a literal
/// prefix of `source` (symlinked or differently-cased spellings included) —
/// a mis-derived path would silently corrupt the output set, so this is a
/// hard error for the page in question.
pub fn project_relative(source: &Path, root: &Path) -> Result<String, TemplateError> {
    let normalized = normalize_separators(source);
    let root_normalized = normalize_separators(root);
    let prefix = format!("{}/", root_normalized.trim_end_matches('/'));

    normalized
        .strip_prefix(&prefix)
        .filter(|relative| !relative.is_empty())
        .map(str::to_owned)
        .ok_or_else(|| TemplateError::InvalidPath {
            source_path: source.to_path_buf(),
            root: root.to_path_buf(),
        })
}

/// Unique identifier for a page, derived from its build-relative path.
///
/// The file extension is stripped and every path separator is replaced with
/// an underscore: `pages/home/index.tsx` becomes `pages_home_index`. Within
/// one project root the result is stable across builds and unique per page,
/// so it doubles as a lookup key and as the stem of per-page companion
/// assets.
#[must_use]
pub fn page_uid(relative_path: &str) -> String {
    Path::new(relative_path)
        .with_extension("")
        .to_string_lossy()
        .replace('/', "_")
}

/// Output file name for a page asset: the build-relative path with the
/// source extension swapped for the target's template extension.
#[must_use]
pub fn template_file_name(relative_path: &str, template_extension: &str) -> String {
    let path = Path::new(relative_path);
    let stem = path.file_stem().unwrap_or_default().to_string_lossy();
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => {
            format!("{}/{stem}{template_extension}", parent.to_string_lossy())
        }
        _ => format!("{stem}{template_extension}"),
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_project_relative_strips_root() {
        let relative = project_relative(
            Path::new("/proj/src/pages/home/index.tsx"),
            Path::new("/proj/src"),
        )
        .unwrap();
        assert_eq!(relative, "pages/home/index.tsx");
    }

    #[test]
    fn test_project_relative_accepts_trailing_slash_on_root() {
        let relative = project_relative(
            Path::new("/proj/src/pages/a.tsx"),
            Path::new("/proj/src/"),
        )
        .unwrap();
        assert_eq!(relative, "pages/a.tsx");
    }

    #[test]
    fn test_project_relative_normalizes_windows_separators() {
        let relative = project_relative(
            Path::new(r"C:\proj\src\pages\home\index.tsx"),
            Path::new(r"C:\proj\src"),
        )
        .unwrap();
        assert_eq!(relative, "pages/home/index.tsx");
    }

    #[test]
    fn test_project_relative_rejects_path_outside_root() {
        let result = project_relative(
            Path::new("/other/pages/index.tsx"),
            Path::new("/proj/src"),
        );
        assert!(matches!(result, Err(TemplateError::InvalidPath { .. })));
    }

    #[test]
    fn test_project_relative_rejects_partial_component_match() {
        // "/proj/srcs" shares a string prefix with "/proj/src" but is a
        // different directory
        let result = project_relative(
            Path::new("/proj/srcs/pages/index.tsx"),
            Path::new("/proj/src"),
        );
        assert!(matches!(result, Err(TemplateError::InvalidPath { .. })));
    }

    #[test]
    fn test_project_relative_rejects_root_itself() {
        let result = project_relative(Path::new("/proj/src"), Path::new("/proj/src"));
        assert!(matches!(result, Err(TemplateError::InvalidPath { .. })));
    }

    #[test]
    fn test_page_uid_strips_extension_and_replaces_separators() {
        assert_eq!(page_uid("pages/home/index.tsx"), "pages_home_index");
    }

    #[test]
    fn test_page_uid_root_level_source() {
        assert_eq!(page_uid("app.tsx"), "app");
    }

    #[test]
    fn test_page_uid_keeps_dots_in_directory_names() {
        assert_eq!(page_uid("pages/v1.2/index.tsx"), "pages_v1.2_index");
    }

    #[test]
    fn test_page_uid_without_extension() {
        assert_eq!(page_uid("pages/readme"), "pages_readme");
    }

    #[test]
    fn test_page_uid_distinct_for_distinct_paths() {
        assert_ne!(page_uid("pages/home/index.tsx"), page_uid("pages/home.tsx"));
    }

    #[test]
    fn test_template_file_name_swaps_extension() {
        assert_eq!(
            template_file_name("pages/home/index.tsx", ".axml"),
            "pages/home/index.axml"
        );
    }

    #[test]
    fn test_template_file_name_root_level_source() {
        assert_eq!(template_file_name("app.tsx", ".axml"), "app.axml");
    }
}
