use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use crate::error::{Result, ScanError};
use crate::types::{DEFAULT_DEPENDENCY_DIRS, DEFAULT_EXTENSIONS, ScanWarning, WarningKind};

/// What to walk and what to keep.
#[derive(Clone, Debug)]
pub struct ScanOptions {
    /// Lowercase extensions without the dot.
    pub extensions: HashSet<String>,
    /// Directory names never descended into (package-manager caches).
    pub dependency_dirs: HashSet<String>,
}

impl Default for ScanOptions {
    fn default() -> Self {
        Self {
            extensions: DEFAULT_EXTENSIONS.iter().map(|s| s.to_string()).collect(),
            dependency_dirs: DEFAULT_DEPENDENCY_DIRS
                .iter()
                .map(|s| s.to_string())
                .collect(),
        }
    }
}

/// Candidate files in descent order plus the subtrees that had to be skipped.
#[derive(Clone, Debug, Default)]
pub struct Discovery {
    pub files: Vec<PathBuf>,
    pub warnings: Vec<ScanWarning>,
}

pub fn matches_extension(path: &Path, extensions: &HashSet<String>) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| extensions.contains(&ext.to_lowercase()))
        .unwrap_or(false)
}

fn should_skip_dir(name: &str, options: &ScanOptions) -> bool {
    name.starts_with('.') || options.dependency_dirs.contains(name)
}

/// Walks `root` and returns every component file under it.
///
/// Only an unreadable root is an error; unreadable subdirectories are
/// recorded as [`WarningKind::Discovery`] warnings and skipped. Symlinked
/// files are kept, symlinked directories are never descended into, so a
/// link back to an ancestor cannot repeat a subtree.
pub fn gather_files(root: &Path, options: &ScanOptions) -> Result<Discovery> {
    let entries = read_sorted(root).map_err(|source| ScanError::RootUnreadable {
        path: root.to_path_buf(),
        source,
    })?;

    let mut discovery = Discovery::default();
    visit_entries(root, entries, options, &mut discovery);
    Ok(discovery)
}

fn read_sorted(dir: &Path) -> std::io::Result<Vec<fs::DirEntry>> {
    let mut dir_entries: Vec<_> = fs::read_dir(dir)?.filter_map(|e| e.ok()).collect();
    dir_entries.sort_by(|a, b| {
        a.file_name()
            .to_string_lossy()
            .to_lowercase()
            .cmp(&b.file_name().to_string_lossy().to_lowercase())
    });
    Ok(dir_entries)
}

fn visit_entries(
    root: &Path,
    entries: Vec<fs::DirEntry>,
    options: &ScanOptions,
    discovery: &mut Discovery,
) {
    for entry in entries {
        let path = entry.path();
        let Ok(file_type) = entry.file_type() else {
            continue;
        };
        // `is_file` on the path follows the link: only linked files get in.
        let is_file = if file_type.is_symlink() {
            path.is_file()
        } else {
            file_type.is_file()
        };
        if is_file {
            if matches_extension(&path, &options.extensions) {
                discovery.files.push(path);
            }
            continue;
        }
        if file_type.is_symlink() {
            debug!("not following symlinked directory {}", relative_path(root, &path));
            continue;
        }
        if !file_type.is_dir() {
            continue;
        }
        let name = entry.file_name();
        if should_skip_dir(&name.to_string_lossy(), options) {
            continue;
        }
        match read_sorted(&path) {
            Ok(children) => visit_entries(root, children, options, discovery),
            Err(err) => {
                let rel = relative_path(root, &path);
                warn!("skipping unreadable directory {}: {}", rel, err);
                discovery
                    .warnings
                    .push(ScanWarning::new(rel, WarningKind::Discovery, err.to_string()));
            }
        }
    }
}

/// Root-relative path with `/` separators, the form every finding reports.
pub fn relative_path(root: &Path, path: &Path) -> String {
    let rel = path.strip_prefix(root).unwrap_or(path);
    rel.components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}
