//! Per-run source index: every file read once, parsed once.
//!
//! The index is the only place that touches file contents. Detectors borrow
//! it immutably, so it is shared across detector threads without locking.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::thread;

use tracing::{debug, warn};

use crate::fs_utils::{Discovery, relative_path};
use crate::types::{ParsedUnit, ScanWarning, SourceFile, WarningKind};

use super::ast_js::parse_module;

#[derive(Debug, Default)]
pub struct SourceIndex {
    files: Vec<SourceFile>,
    /// Parallel to `files`.
    units: Vec<ParsedUnit>,
    by_path: HashMap<String, usize>,
    discovered: usize,
    warnings: Vec<ScanWarning>,
}

enum Loaded {
    Ready(SourceFile, ParsedUnit),
    Unreadable(ScanWarning),
}

fn load_file(root: &Path, path: &Path) -> Loaded {
    let rel = relative_path(root, path);
    match std::fs::read_to_string(path) {
        Ok(text) => {
            let unit = parse_unit(&rel, &text);
            Loaded::Ready(SourceFile::new(rel, text), unit)
        }
        Err(err) => {
            warn!("cannot read {}: {}", rel, err);
            Loaded::Unreadable(ScanWarning::new(rel, WarningKind::Read, err.to_string()))
        }
    }
}

fn parse_unit(rel: &str, text: &str) -> ParsedUnit {
    ParsedUnit {
        path: rel.to_string(),
        outcome: parse_module(text, Path::new(rel), rel),
    }
}

impl SourceIndex {
    /// Reads and parses every discovered file on up to `threads` workers.
    /// Results keep discovery order regardless of which worker finished first.
    pub fn build(root: &Path, discovery: &Discovery, threads: usize) -> Self {
        let paths = &discovery.files;
        let threads = threads.max(1);
        let chunk_size = paths.len().div_ceil(threads).max(1);

        let mut loaded: Vec<Loaded> = Vec::with_capacity(paths.len());
        thread::scope(|s| {
            let handles: Vec<_> = paths
                .chunks(chunk_size)
                .map(|chunk| {
                    let handle = s.spawn(move || {
                        chunk
                            .iter()
                            .map(|p| load_file(root, p))
                            .collect::<Vec<_>>()
                    });
                    (handle, chunk)
                })
                .collect();

            for (handle, chunk) in handles {
                match handle.join() {
                    Ok(results) => loaded.extend(results),
                    Err(_) => {
                        // A worker died mid-chunk; its files are lost for this run only.
                        loaded.extend(chunk.iter().map(|p: &PathBuf| {
                            let rel = relative_path(root, p);
                            warn!("worker panicked while loading {}", rel);
                            Loaded::Unreadable(ScanWarning::new(
                                rel,
                                WarningKind::Read,
                                "worker panicked while loading file",
                            ))
                        }));
                    }
                }
            }
        });

        let mut index = Self {
            discovered: paths.len(),
            warnings: discovery.warnings.clone(),
            ..Self::default()
        };
        for item in loaded {
            match item {
                Loaded::Ready(file, unit) => index.insert(file, unit),
                Loaded::Unreadable(warning) => index.warnings.push(warning),
            }
        }
        debug!(
            "indexed {} of {} files ({} parse failures, {} recoverable parser errors)",
            index.files.len(),
            index.discovered,
            index.parse_failures().count(),
            index.recoverable_diagnostics()
        );
        index
    }

    /// Index in-memory sources, `(relative path, text)`, in the given order.
    pub fn from_sources<P, T>(sources: impl IntoIterator<Item = (P, T)>) -> Self
    where
        P: Into<String>,
        T: Into<String>,
    {
        let mut index = Self::default();
        for (path, text) in sources {
            let (path, text) = (path.into(), text.into());
            let unit = parse_unit(&path, &text);
            index.discovered += 1;
            index.insert(SourceFile::new(path, text), unit);
        }
        index
    }

    fn insert(&mut self, file: SourceFile, unit: ParsedUnit) {
        if let Err(failure) = &unit.outcome {
            warn!("parse failure in {}: {}", failure.path, failure.message);
            self.warnings.push(ScanWarning::new(
                failure.path.clone(),
                WarningKind::Parse,
                failure.message.clone(),
            ));
        }
        self.by_path.insert(file.path.clone(), self.files.len());
        self.files.push(file);
        self.units.push(unit);
    }

    /// Successfully read files, discovery order.
    pub fn files(&self) -> &[SourceFile] {
        &self.files
    }

    pub fn file(&self, path: &str) -> Option<&SourceFile> {
        self.by_path.get(path).map(|&i| &self.files[i])
    }

    pub fn parsed(&self, path: &str) -> Option<&ParsedUnit> {
        self.by_path.get(path).map(|&i| &self.units[i])
    }

    pub fn units(&self) -> &[ParsedUnit] {
        &self.units
    }

    pub fn parse_failures(&self) -> impl Iterator<Item = &ParsedUnit> {
        self.units.iter().filter(|u| u.is_failure())
    }

    /// Parser errors that were recovered from, summed over parsed outlines.
    pub fn recoverable_diagnostics(&self) -> usize {
        self.units
            .iter()
            .filter_map(|u| u.outline())
            .map(|o| o.diagnostics)
            .sum()
    }

    /// Every discovered file, including ones that later failed to read.
    pub fn discovered(&self) -> usize {
        self.discovered
    }

    pub fn warnings(&self) -> &[ScanWarning] {
        &self.warnings
    }
}
