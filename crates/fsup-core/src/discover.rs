//! File discovery by extension.

use crate::error::UploadError;
use std::fs;
use std::path::{Path, PathBuf};

/// Splits an extension filter such as `"log"`, `".log"` or `"log, txt"` into bare extensions.
pub fn parse_extensions(filter: &str) -> Vec<String> {
    filter
        .split(',')
        .map(|e| e.trim().trim_start_matches('.'))
        .filter(|e| !e.is_empty())
        .map(str::to_string)
        .collect()
}

fn has_extension(path: &Path, exts: &[String]) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| exts.iter().any(|x| x == e))
}

/// Lists files under `file_or_dir` whose extension is in `exts`.
///
/// A file path yields itself if it matches, otherwise nothing. A directory
/// yields its matching regular files (non-recursive), sorted by path.
pub fn files_by_extensions(file_or_dir: &Path, exts: &[String]) -> Result<Vec<PathBuf>, UploadError> {
    let meta = fs::metadata(file_or_dir).map_err(|e| UploadError::file_access(file_or_dir, e))?;

    if meta.is_file() {
        return Ok(if has_extension(file_or_dir, exts) {
            vec![file_or_dir.to_path_buf()]
        } else {
            Vec::new()
        });
    }

    let entries = fs::read_dir(file_or_dir).map_err(|e| UploadError::file_access(file_or_dir, e))?;
    let mut files = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|e| UploadError::file_access(file_or_dir, e))?;
        let path = entry.path();
        if path.is_file() && has_extension(&path, exts) {
            files.push(path);
        }
    }
    files.sort();
    Ok(files)
}
