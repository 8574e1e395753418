//! # tidyui
//!
//! **Component hygiene scanner** for React-style `.jsx`/`.tsx` trees.
//!
//! tidyui reads a source tree once and reports four kinds of maintainability
//! debt that pile up when components get copied around instead of shared.
//!
//! ## Features
//!
//! - **Duplicate Components** - same component under `Pokemon*`/`Common*` names, drifted apart
//! - **Style Compliance** - hardcoded colours, opacities and spacing, inline styles, colour-scale utilities
//! - **Repeated Blocks** - the same JSX shape pasted into three or more files
//! - **Dead Parrots** - exported components nobody imports, plus naming conflicts
//!
//! ## Quick Start (Library Usage)
//!
//! ```rust,no_run
//! use std::path::Path;
//! use tidyui::{TidyConfig, analyze, render_markdown};
//!
//! let root = Path::new("src");
//! let config = TidyConfig::load(root);
//! let report = analyze(root, &config).expect("root is readable");
//! println!("{} issues", report.summary.total_issues);
//! std::fs::write("component-analysis-report.md", render_markdown(&report)).ok();
//! ```
//!
//! ## CLI Usage
//!
//! ```bash
//! tidyui                       # scan ./src, write component-analysis-report.md
//! tidyui app/src -o out.md     # custom root and report path
//! tidyui --json | jq .summary  # machine-readable report on stdout
//! tidyui --fail-on-issues      # non-zero exit for CI
//! ```
//!
//! Per-project tuning lives in `<root>/.tidyui/config.toml`; see [`config`].

// ============================================================================
// Core Modules
// ============================================================================

/// Scanner: source index, exclusion policy, the four detectors and the report.
///
/// # Submodules
///
/// - [`analyzer::source_index`] - read + parse every file once
/// - [`analyzer::duplicates`] - duplicate component detection
/// - [`analyzer::style_lint`] - style compliance
/// - [`analyzer::repeated_blocks`] - repeated JSX blocks
/// - [`analyzer::dead_parrots`] - unused components and naming conflicts
/// - [`analyzer::findings`] - report aggregation
/// - [`analyzer::output`] - Markdown/JSON rendering
pub mod analyzer;

/// Command-line front end used by the `tidyui` binary.
pub mod cli;

/// `.tidyui/config.toml` loading.
pub mod config;

/// Errors that abort a scan.
pub mod error;

/// File discovery.
pub mod fs_utils;

/// Spinner and console helpers.
pub mod progress;

/// Shared data types: source files, parse outlines and findings.
pub mod types;

// ============================================================================
// Re-exports for convenience
// ============================================================================

/// Run a full scan.
pub use analyzer::runner::analyze;

/// The report produced by a scan.
pub use analyzer::findings::{AnalysisReport, Summary};

/// Markdown rendering of a report.
pub use analyzer::output::render_markdown;

/// Scanner configuration.
pub use config::TidyConfig;

/// Fatal scan error.
pub use error::ScanError;
