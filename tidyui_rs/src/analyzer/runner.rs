use std::path::Path;
use std::thread;
use std::time::Instant;

use tracing::{debug, info, warn};

use crate::config::TidyConfig;
use crate::error::ScanError;
use crate::fs_utils::gather_files;
use crate::types::{DuplicateFinding, RepeatedBlockFinding, StyleFinding};

use super::dead_parrots::{LivenessResult, analyze_liveness};
use super::duplicates::find_duplicate_components;
use super::exclusions::ExclusionPolicy;
use super::findings::{AnalysisReport, ReportInputs};
use super::repeated_blocks::find_repeated_blocks;
use super::source_index::SourceIndex;
use super::style_lint::lint_styles;

struct DetectorOutputs {
    duplicates: Vec<DuplicateFinding>,
    style: Vec<StyleFinding>,
    repeated_blocks: Vec<RepeatedBlockFinding>,
    liveness: LivenessResult,
}

/// Scan `root` and build the report.
///
/// Only an unreadable root is an error; everything else (unreadable
/// subdirectories and files, parse failures) ends up in `report.warnings`.
pub fn analyze(root: &Path, config: &TidyConfig) -> Result<AnalysisReport, ScanError> {
    let started = Instant::now();
    info!("scanning {}", root.display());

    let discovery = gather_files(root, &config.scan_options())?;
    debug!(
        "discovered {} files in {:?}",
        discovery.files.len(),
        started.elapsed()
    );

    let threads = config.threads();
    let index = SourceIndex::build(root, &discovery, threads);
    debug!("index ready after {:?}", started.elapsed());

    let policy = ExclusionPolicy::new(&config.exclusions);
    let outputs = run_detectors(&index, &policy, config);

    let report = AnalysisReport::produce(ReportInputs {
        root: root.display().to_string(),
        files_scanned: index.discovered(),
        parse_failures: index.parse_failures().count(),
        duplicates: outputs.duplicates,
        style: outputs.style,
        repeated_blocks: outputs.repeated_blocks,
        liveness: outputs.liveness,
        warnings: index.warnings().to_vec(),
    });

    info!(
        "scanned {} files, {} issues in {:?}",
        report.summary.files_scanned,
        report.summary.total_issues,
        started.elapsed()
    );
    Ok(report)
}

/// Runs the four detectors side by side over the shared index. A detector
/// that panics contributes nothing instead of taking the run down.
fn run_detectors(
    index: &SourceIndex,
    policy: &ExclusionPolicy,
    config: &TidyConfig,
) -> DetectorOutputs {
    thread::scope(|s| {
        let duplicates = s.spawn(|| timed("duplicates", || {
            find_duplicate_components(index, policy, &config.duplicates)
        }));
        let style = s.spawn(|| timed("style", || lint_styles(index, policy)));
        let repeated = s.spawn(|| timed("repeated-blocks", || {
            find_repeated_blocks(index, policy, &config.blocks)
        }));
        let liveness = s.spawn(|| timed("liveness", || analyze_liveness(index)));

        DetectorOutputs {
            duplicates: joined("duplicates", duplicates.join()),
            style: joined("style", style.join()),
            repeated_blocks: joined("repeated-blocks", repeated.join()),
            liveness: joined("liveness", liveness.join()),
        }
    })
}

fn timed<T>(name: &str, f: impl FnOnce() -> T) -> T {
    let started = Instant::now();
    let out = f();
    debug!("{} detector finished in {:?}", name, started.elapsed());
    out
}

fn joined<T: Default>(name: &str, result: thread::Result<T>) -> T {
    result.unwrap_or_else(|_| {
        warn!("{} detector panicked; its findings are omitted", name);
        T::default()
    })
}
