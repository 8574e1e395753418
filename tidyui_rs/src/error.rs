//! Errors that can escape the scanner.
//!
//! Per-file problems (unreadable files, parse failures, unreadable
//! subdirectories) never show up here: they are collected as
//! [`ScanWarning`](crate::types::ScanWarning)s and the scan keeps going.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ScanError {
    /// The scan root itself could not be listed.
    #[error("cannot enumerate source root {}: {source}", path.display())]
    RootUnreadable {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("invalid config {}: {message}", path.display())]
    Config { path: PathBuf, message: String },

    #[error("failed to write report {}: {source}", path.display())]
    ReportWrite {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

pub type Result<T> = std::result::Result<T, ScanError>;
