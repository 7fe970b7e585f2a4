use std::{
    ffi::OsStr,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};
use walkdir::WalkDir;

/// Recursively collect every non-directory entry under `root`.
/// Entries within each directory are visited in file name order, so the
/// result is stable across runs and platforms.
pub fn walk_files(root: impl AsRef<Path>) -> Result<Vec<PathBuf>> {
    let root = root.as_ref();
    let mut out = Vec::new();
    for entry in WalkDir::new(root).follow_links(false).sort_by_file_name() {
        let entry =
            entry.with_context(|| format!("Failed to read directory {}", root.display()))?;
        if entry.file_type().is_dir() {
            continue;
        }
        out.push(entry.into_path());
    }
    Ok(out)
}

/// Whether `path` has exactly the extension `ext` (case-sensitive).
pub fn has_extension(path: &Path, ext: &str) -> bool {
    path.extension() == Some(OsStr::new(ext))
}
