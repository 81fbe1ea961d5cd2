use std::path::Path;

use tracing::debug;
use walkdir::WalkDir;

use crate::error::CoreError;

/// Extensions a documentation source is allowed to contain: markdown plus
/// common image formats.
pub const ALLOWED_EXTENSIONS: [&str; 7] = ["md", "jpg", "jpeg", "png", "gif", "bmp", "svg"];

/// Check that every regular file under `root` has an allow-listed extension.
///
/// Directories are not checked, and file contents are never sniffed; the
/// lowercase extension alone decides. The first violation short-circuits to
/// `Ok(false)`. Pure gate: no side effects; the caller decides whether a
/// `false` verdict is fatal.
pub fn validate_tree(root: &Path) -> Result<bool, CoreError> {
    for entry in WalkDir::new(root) {
        let entry = entry?;
        if !entry.file_type().is_file() {
            continue;
        }

        let allowed = entry
            .path()
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| ALLOWED_EXTENSIONS.contains(&e.to_lowercase().as_str()))
            .unwrap_or(false);

        if !allowed {
            debug!(path = %entry.path().display(), "disallowed file in source tree");
            return Ok(false);
        }
    }

    Ok(true)
}

#[cfg(test)]
mod tests {
    use std::fs;

    use tempfile::tempdir;

    use super::*;

    #[test]
    fn test_markdown_and_images_pass() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("README.md"), "# hi").unwrap();
        fs::create_dir(dir.path().join("img")).unwrap();
        fs::write(dir.path().join("img/logo.png"), [0u8; 8]).unwrap();

        assert!(validate_tree(dir.path()).unwrap());
    }

    #[test]
    fn test_script_file_fails() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("README.md"), "# hi").unwrap();
        fs::write(dir.path().join("script.js"), "alert(1)").unwrap();

        assert!(!validate_tree(dir.path()).unwrap());
    }

    #[test]
    fn test_extension_case_insensitive() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("PHOTO.JPG"), [0u8; 8]).unwrap();

        assert!(validate_tree(dir.path()).unwrap());
    }

    #[test]
    fn test_file_without_extension_fails() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("Makefile"), "all:").unwrap();

        assert!(!validate_tree(dir.path()).unwrap());
    }

    #[test]
    fn test_empty_tree_passes() {
        let dir = tempdir().unwrap();
        fs::create_dir(dir.path().join("empty")).unwrap();

        assert!(validate_tree(dir.path()).unwrap());
    }
}
