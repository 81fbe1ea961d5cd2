use std::{
    fs,
    path::{Path, PathBuf},
};

use docsmith_utils::{
    fs::{ensure_dir_exists, safe_remove},
    string::sanitize_folder_name,
};
use tracing::{debug, info};
use walkdir::WalkDir;

use crate::{
    error::CoreError,
    render::markdown_to_html,
    validate::ALLOWED_EXTENSIONS,
};

/// Materialization switches.
#[derive(Debug, Clone, Copy, Default)]
pub struct MaterializeOptions {
    /// Copy validated image files alongside the rendered HTML. Off by
    /// default: the reference pipeline renders HTML only.
    pub copy_images: bool,
}

/// Render a validated source tree into the destination root.
///
/// Locates the archive's first top-level folder, removes any previous
/// destination tree for the same repository name, then mirrors that folder's
/// contents straight into `dest_root/<sanitized name>`, converting every
/// `*.md` to `*.html` on the way. Only the chosen folder is mirrored, so
/// stray sibling entries in the extraction never reach the destination root.
///
/// Returns the final destination directory.
pub fn materialize(
    source_dir: &Path,
    dest_root: &Path,
    display_name: &str,
    options: MaterializeOptions,
) -> Result<PathBuf, CoreError> {
    let clean_name = sanitize_folder_name(display_name);
    let final_dest = dest_root.join(&clean_name);

    let top_root = first_top_folder(source_dir)?;

    safe_remove(&final_dest)?;
    ensure_dir_exists(&final_dest)?;

    for entry in WalkDir::new(&top_root).min_depth(1).sort_by_file_name() {
        let entry = entry?;
        let Ok(relative) = entry.path().strip_prefix(&top_root) else {
            continue;
        };
        let dest_path = final_dest.join(relative);

        if entry.file_type().is_dir() {
            ensure_dir_exists(&dest_path)?;
            continue;
        }

        let extension = entry
            .path()
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_lowercase())
            .unwrap_or_default();

        if extension == "md" {
            convert_file(entry.path(), &dest_path)?;
        } else if options.copy_images && ALLOWED_EXTENSIONS.contains(&extension.as_str()) {
            if let Some(parent) = dest_path.parent() {
                ensure_dir_exists(parent)?;
            }
            fs::copy(entry.path(), &dest_path)?;
        }
    }

    info!(dest = %final_dest.display(), "destination tree materialized");
    Ok(final_dest)
}

/// Convert one markdown file, writing the HTML to the mirrored destination
/// path with the extension replaced.
fn convert_file(source: &Path, dest: &Path) -> Result<(), CoreError> {
    let bytes = fs::read(source)?;
    let markdown = String::from_utf8(bytes).map_err(|_| CoreError::InvalidMarkdown {
        path: source.to_path_buf(),
    })?;

    let html = markdown_to_html(&markdown);
    let dest = dest.with_extension("html");
    if let Some(parent) = dest.parent() {
        ensure_dir_exists(parent)?;
    }

    debug!(file = %dest.display(), "rendered markdown");
    fs::write(dest, html)?;
    Ok(())
}

/// First top-level folder the archive unpacked into, in sorted order;
/// archives produce a single folder named after the ref. An extraction with
/// no folder at all has nothing to publish.
fn first_top_folder(source_dir: &Path) -> Result<PathBuf, CoreError> {
    let mut folders: Vec<PathBuf> = fs::read_dir(source_dir)?
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.path())
        .filter(|path| path.is_dir())
        .collect();
    folders.sort();

    folders
        .into_iter()
        .next()
        .ok_or_else(|| CoreError::EmptySource {
            path: source_dir.to_path_buf(),
        })
}

#[cfg(test)]
mod tests {
    use tempfile::tempdir;

    use super::*;

    fn build_source(root: &Path, top: &str, files: &[(&str, &str)]) {
        let top_dir = root.join(top);
        fs::create_dir_all(&top_dir).unwrap();
        for (rel, content) in files {
            let path = top_dir.join(rel);
            fs::create_dir_all(path.parent().unwrap()).unwrap();
            fs::write(path, content).unwrap();
        }
    }

    #[test]
    fn test_materialize_renders_under_sanitized_name() {
        let source = tempdir().unwrap();
        let dest = tempdir().unwrap();
        build_source(
            source.path(),
            "widgets-abc123",
            &[("README.md", "# Widgets"), ("docs/guide.md", "## Guide")],
        );

        let final_dest = materialize(
            source.path(),
            dest.path(),
            "My Repo!! 2.0",
            MaterializeOptions::default(),
        )
        .unwrap();

        assert_eq!(final_dest, dest.path().join("MyRepo20"));
        assert!(final_dest.join("README.html").is_file());
        assert!(final_dest.join("docs/guide.html").is_file());
        assert!(!dest.path().join("widgets-abc123").exists());

        let html = fs::read_to_string(final_dest.join("README.html")).unwrap();
        assert!(html.contains("<h1>Widgets</h1>"));
    }

    #[test]
    fn test_only_first_top_folder_reaches_destination() {
        let source = tempdir().unwrap();
        let dest = tempdir().unwrap();
        build_source(source.path(), "docs-v1", &[("README.md", "# hi")]);
        build_source(source.path(), "extra", &[("note.md", "# stray")]);

        let final_dest = materialize(
            source.path(),
            dest.path(),
            "docs",
            MaterializeOptions::default(),
        )
        .unwrap();

        assert!(final_dest.join("README.html").is_file());
        assert!(!dest.path().join("extra").exists());
        assert_eq!(fs::read_dir(dest.path()).unwrap().count(), 1);
    }

    #[test]
    fn test_images_not_copied_by_default() {
        let source = tempdir().unwrap();
        let dest = tempdir().unwrap();
        build_source(source.path(), "repo-v1", &[("README.md", "# hi")]);
        fs::create_dir_all(source.path().join("repo-v1/img")).unwrap();
        fs::write(source.path().join("repo-v1/img/logo.png"), [0u8; 8]).unwrap();

        let final_dest = materialize(
            source.path(),
            dest.path(),
            "repo",
            MaterializeOptions::default(),
        )
        .unwrap();

        // The directory is mirrored but the image itself is not.
        assert!(final_dest.join("img").is_dir());
        assert!(!final_dest.join("img/logo.png").exists());
    }

    #[test]
    fn test_images_copied_when_enabled() {
        let source = tempdir().unwrap();
        let dest = tempdir().unwrap();
        build_source(source.path(), "repo-v1", &[("README.md", "# hi")]);
        fs::create_dir_all(source.path().join("repo-v1/img")).unwrap();
        fs::write(source.path().join("repo-v1/img/logo.png"), [0u8; 8]).unwrap();

        let final_dest = materialize(
            source.path(),
            dest.path(),
            "repo",
            MaterializeOptions {
                copy_images: true,
            },
        )
        .unwrap();

        assert!(final_dest.join("img/logo.png").is_file());
    }

    #[test]
    fn test_second_run_replaces_previous_tree() {
        let dest = tempdir().unwrap();

        let first = tempdir().unwrap();
        build_source(first.path(), "repo-v1", &[("old.md", "# old")]);
        materialize(
            first.path(),
            dest.path(),
            "repo",
            MaterializeOptions::default(),
        )
        .unwrap();
        assert!(dest.path().join("repo/old.html").is_file());

        let second = tempdir().unwrap();
        build_source(second.path(), "repo-v2", &[("new.md", "# new")]);
        let final_dest = materialize(
            second.path(),
            dest.path(),
            "repo",
            MaterializeOptions::default(),
        )
        .unwrap();

        assert!(final_dest.join("new.html").is_file());
        assert!(!final_dest.join("old.html").exists());
    }

    #[test]
    fn test_all_symbol_name_uses_fallback() {
        let source = tempdir().unwrap();
        let dest = tempdir().unwrap();
        build_source(source.path(), "repo-v1", &[("README.md", "# hi")]);

        let final_dest = materialize(
            source.path(),
            dest.path(),
            "!!!",
            MaterializeOptions::default(),
        )
        .unwrap();

        assert_eq!(final_dest, dest.path().join("default_folder"));
    }

    #[test]
    fn test_empty_source_fails() {
        let source = tempdir().unwrap();
        let dest = tempdir().unwrap();

        let err = materialize(
            source.path(),
            dest.path(),
            "repo",
            MaterializeOptions::default(),
        )
        .unwrap_err();

        assert!(matches!(err, CoreError::EmptySource { .. }));
    }

    #[test]
    fn test_source_without_top_folder_fails() {
        let source = tempdir().unwrap();
        let dest = tempdir().unwrap();
        fs::write(source.path().join("README.md"), "# flat").unwrap();

        let err = materialize(
            source.path(),
            dest.path(),
            "repo",
            MaterializeOptions::default(),
        )
        .unwrap_err();

        assert!(matches!(err, CoreError::EmptySource { .. }));
        assert!(!dest.path().join("repo").exists());
    }

    #[test]
    fn test_invalid_utf8_markdown_fails() {
        let source = tempdir().unwrap();
        let dest = tempdir().unwrap();
        let top = source.path().join("repo-v1");
        fs::create_dir_all(&top).unwrap();
        fs::write(top.join("bad.md"), [0xff, 0xfe, 0x00]).unwrap();

        let err = materialize(
            source.path(),
            dest.path(),
            "repo",
            MaterializeOptions::default(),
        )
        .unwrap_err();

        assert!(matches!(err, CoreError::InvalidMarkdown { .. }));
    }
}
