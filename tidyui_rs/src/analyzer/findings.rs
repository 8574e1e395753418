//! Findings - the consolidated report of one run.
//!
//! [`AnalysisReport`] is the single artifact every output format renders:
//! - Duplicate components (renamed then diverged)
//! - Style violations (hardcoded values, inline styles, non-theme classes)
//! - Repeated UI blocks
//! - Unused components and naming conflicts
//! - Recommendations derived from the counts
//!
//! Producing it is pure aggregation; rendering and writing live in `output`.

use serde::{Deserialize, Serialize};

use crate::types::{
    DuplicateFinding, ExportedSymbol, NamingConflict, RepeatedBlockFinding, ScanWarning,
    StyleFinding,
};

use super::dead_parrots::LivenessResult;

pub const TOOL_NAME: &str = "tidyui";

/// Above this many issues the report also suggests a phased cleanup.
const LARGE_BACKLOG_THRESHOLD: usize = 20;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisReport {
    pub tool: String,
    pub version: String,
    /// ISO 8601 timestamp; the only field that differs between identical runs.
    pub generated_at: String,
    /// Scanned root as given on the command line.
    pub root: String,
    pub summary: Summary,
    pub duplicate_components: Vec<DuplicateFinding>,
    pub style_findings: Vec<StyleFinding>,
    pub repeated_blocks: Vec<RepeatedBlockFinding>,
    pub unused_components: Vec<ExportedSymbol>,
    pub naming_conflicts: Vec<NamingConflict>,
    pub recommendations: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub warnings: Vec<ScanWarning>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Summary {
    /// Discovered files, parse failures included.
    pub files_scanned: usize,
    pub parse_failures: usize,
    pub duplicate_components: usize,
    pub style_violations: usize,
    pub repeated_blocks: usize,
    pub unused_components: usize,
    pub naming_conflicts: usize,
    pub total_issues: usize,
}

/// Everything the detectors produced, handed over by value.
#[derive(Debug, Default)]
pub struct ReportInputs {
    pub root: String,
    pub files_scanned: usize,
    pub parse_failures: usize,
    pub duplicates: Vec<DuplicateFinding>,
    pub style: Vec<StyleFinding>,
    pub repeated_blocks: Vec<RepeatedBlockFinding>,
    pub liveness: LivenessResult,
    pub warnings: Vec<ScanWarning>,
}

impl AnalysisReport {
    pub fn produce(inputs: ReportInputs) -> Self {
        let generated_at = time::OffsetDateTime::now_utc()
            .format(&time::format_description::well_known::Iso8601::DEFAULT)
            .unwrap_or_else(|_| "unknown".to_string());

        let unused_components: Vec<ExportedSymbol> =
            inputs.liveness.unused().cloned().collect();
        let naming_conflicts = inputs.liveness.conflicts;

        let mut summary = Summary {
            files_scanned: inputs.files_scanned,
            parse_failures: inputs.parse_failures,
            duplicate_components: inputs.duplicates.len(),
            style_violations: inputs.style.len(),
            repeated_blocks: inputs.repeated_blocks.len(),
            unused_components: unused_components.len(),
            naming_conflicts: naming_conflicts.len(),
            total_issues: 0,
        };
        summary.total_issues = summary.duplicate_components
            + summary.style_violations
            + summary.repeated_blocks
            + summary.unused_components
            + summary.naming_conflicts;

        AnalysisReport {
            tool: TOOL_NAME.to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            generated_at,
            root: inputs.root,
            recommendations: recommendations(&summary),
            summary,
            duplicate_components: inputs.duplicates,
            style_findings: inputs.style,
            repeated_blocks: inputs.repeated_blocks,
            unused_components,
            naming_conflicts,
            warnings: inputs.warnings,
        }
    }

    pub fn has_issues(&self) -> bool {
        self.summary.total_issues > 0
    }

    /// Same report with the timestamp cleared, for run-to-run comparison.
    pub fn without_timestamp(&self) -> Self {
        Self {
            generated_at: String::new(),
            ..self.clone()
        }
    }
}

fn recommendations(summary: &Summary) -> Vec<String> {
    let mut out = Vec::new();
    if summary.duplicate_components > 0 {
        out.push(
            "Consolidate duplicate components into a single shared implementation.".to_string(),
        );
    }
    if summary.style_violations > 0 {
        out.push("Replace hardcoded styles with theme variables and theme classes.".to_string());
    }
    if summary.repeated_blocks > 0 {
        out.push("Extract repeated UI blocks into reusable components.".to_string());
    }
    if summary.unused_components > 0 {
        out.push("Remove unused components or wire them into the app.".to_string());
    }
    if summary.naming_conflicts > 0 {
        out.push(
            "Rename or merge components whose names collide after normalization.".to_string(),
        );
    }
    if summary.total_issues > LARGE_BACKLOG_THRESHOLD {
        out.push(
            "Plan the cleanup in phases: start with duplicates and dead code, then styling."
                .to_string(),
        );
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{ExportKind, Severity, StyleKind};

    fn style(n: usize) -> Vec<StyleFinding> {
        (0..n)
            .map(|i| StyleFinding {
                file: "components/Foo.tsx".into(),
                line: i + 1,
                kind: StyleKind::HardcodedColor,
                literal: "#fff".into(),
                severity: Severity::High,
                fix: "use a theme colour".into(),
            })
            .collect()
    }

    #[test]
    fn empty_inputs_give_empty_report() {
        let report = AnalysisReport::produce(ReportInputs::default());
        assert_eq!(report.summary, Summary::default());
        assert!(report.recommendations.is_empty());
        assert!(!report.has_issues());
        assert_eq!(report.tool, "tidyui");
        assert!(!report.generated_at.is_empty());
    }

    #[test]
    fn totals_and_recommendations_follow_counts() {
        let orphan =
            ExportedSymbol::new("a/Orphan.tsx".into(), "Orphan".into(), ExportKind::Named, 1);
        let mut used = orphan.clone();
        used.name = "Used".into();
        used.mark_used();
        let report = AnalysisReport::produce(ReportInputs {
            root: "src".into(),
            files_scanned: 4,
            style: style(2),
            liveness: LivenessResult {
                symbols: vec![orphan, used],
                conflicts: vec![],
            },
            ..ReportInputs::default()
        });
        assert_eq!(report.summary.files_scanned, 4);
        assert_eq!(report.summary.style_violations, 2);
        assert_eq!(report.summary.unused_components, 1);
        assert_eq!(report.summary.total_issues, 3);
        assert_eq!(report.unused_components[0].name, "Orphan");
        assert_eq!(report.recommendations.len(), 2);
        assert!(report.recommendations[0].contains("theme"));
        assert!(report.recommendations[1].contains("unused"));
    }

    #[test]
    fn large_backlog_adds_phased_recommendation() {
        let report = AnalysisReport::produce(ReportInputs {
            style: style(21),
            ..ReportInputs::default()
        });
        assert_eq!(report.summary.total_issues, 21);
        assert_eq!(report.recommendations.len(), 2);
        assert!(report.recommendations[1].starts_with("Plan the cleanup"));

        let at_threshold = AnalysisReport::produce(ReportInputs {
            style: style(20),
            ..ReportInputs::default()
        });
        assert_eq!(at_threshold.recommendations.len(), 1);
    }

    #[test]
    fn conflict_groups_count_once() {
        let report = AnalysisReport::produce(ReportInputs {
            liveness: LivenessResult {
                symbols: vec![],
                conflicts: vec![NamingConflict {
                    key: "card".into(),
                    members: vec![],
                }],
            },
            ..ReportInputs::default()
        });
        assert_eq!(report.summary.naming_conflicts, 1);
        assert_eq!(report.summary.total_issues, 1);
    }
}
