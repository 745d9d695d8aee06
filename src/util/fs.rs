//! Filesystem utilities.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::SystemTime;

use anyhow::{Context, Result};
use glob::{glob, Pattern};
use walkdir::WalkDir;

/// Check whether `path` is an existing directory.
///
/// A missing path is `Ok(false)`; other metadata failures are errors.
pub fn is_dir_exists(path: &Path) -> Result<bool> {
    match fs::metadata(path) {
        Ok(meta) => Ok(meta.is_dir()),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(false),
        Err(e) => Err(e).with_context(|| format!("failed to stat: {}", path.display())),
    }
}

/// Remove a directory and all its contents, if it exists.
pub fn remove_dir_all_if_exists(path: &Path) -> Result<()> {
    if path.exists() {
        fs::remove_dir_all(path)
            .with_context(|| format!("failed to remove directory: {}", path.display()))?;
    }
    Ok(())
}

/// Read a file to string, with nice error messages.
pub fn read_to_string(path: &Path) -> Result<String> {
    fs::read_to_string(path).with_context(|| format!("failed to read file: {}", path.display()))
}

fn modified(path: &Path) -> Result<SystemTime> {
    fs::metadata(path)
        .and_then(|m| m.modified())
        .with_context(|| format!("failed to read modification time: {}", path.display()))
}

/// Pick the most recently modified path.
pub fn newest<I>(paths: I) -> Result<Option<PathBuf>>
where
    I: IntoIterator<Item = PathBuf>,
{
    let mut best: Option<(SystemTime, PathBuf)> = None;

    for path in paths {
        let time = modified(&path)?;
        let newer = match &best {
            Some((best_time, _)) => time > *best_time,
            None => true,
        };
        if newer {
            best = Some((time, path));
        }
    }

    Ok(best.map(|(_, path)| path))
}

/// Glob for entries named `<prefix>*<suffix>` in `dir`.
///
/// `dir` may itself contain glob wildcards; the prefix is matched literally.
pub fn glob_prefixed(dir: &str, prefix: &str, suffix: &str) -> Result<Vec<PathBuf>> {
    let pattern = format!("{}/{}*{}", dir, Pattern::escape(prefix), suffix);

    let mut results = Vec::new();
    for entry in glob(&pattern).with_context(|| format!("invalid glob pattern: {}", pattern))? {
        let path = entry.with_context(|| format!("failed to read glob match for {}", pattern))?;
        results.push(path);
    }

    results.sort();
    Ok(results)
}

/// Glob-escaped form of a concrete directory.
pub fn escaped_dir(dir: &Path) -> String {
    Pattern::escape(&dir.to_string_lossy())
}

/// Files below `root` (recursively) named `<prefix>*<suffix>`.
///
/// A missing root yields no files.
pub fn find_files_recursive(root: &Path, prefix: &str, suffix: &str) -> Result<Vec<PathBuf>> {
    if !is_dir_exists(root)? {
        return Ok(Vec::new());
    }

    let mut results = Vec::new();
    for entry in WalkDir::new(root).sort_by_file_name() {
        let entry = entry.with_context(|| format!("failed to walk directory: {}", root.display()))?;
        if !entry.file_type().is_file() {
            continue;
        }
        let name = entry.file_name().to_string_lossy();
        if name.starts_with(prefix) && name.ends_with(suffix) {
            results.push(entry.into_path());
        }
    }

    Ok(results)
}
