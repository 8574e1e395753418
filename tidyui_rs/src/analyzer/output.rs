//! Report rendering: Markdown for humans, JSON for tools.

use std::fmt::Write as _;
use std::path::Path;

use crate::error::ScanError;
use crate::types::truncate_chars;

use super::findings::AnalysisReport;

pub const DEFAULT_REPORT_PATH: &str = "component-analysis-report.md";

/// Longest snippet shown inline in a table cell.
const CELL_MAX_CHARS: usize = 80;

/// Table cells cannot contain raw pipes or newlines.
fn cell(text: &str) -> String {
    truncate_chars(text, CELL_MAX_CHARS)
        .replace('|', "\\|")
        .replace('\n', " ")
}

pub fn render_markdown(report: &AnalysisReport) -> String {
    let mut md = String::new();
    let s = &report.summary;

    let _ = writeln!(md, "# Component Analysis Report\n");
    let _ = writeln!(
        md,
        "Generated by {} {} at {} for `{}`.\n",
        report.tool, report.version, report.generated_at, report.root
    );

    let _ = writeln!(md, "## Summary\n");
    let _ = writeln!(md, "| Metric | Count |");
    let _ = writeln!(md, "| --- | ---: |");
    for (label, count) in [
        ("Files scanned", s.files_scanned),
        ("Parse failures", s.parse_failures),
        ("Duplicate components", s.duplicate_components),
        ("Style violations", s.style_violations),
        ("Repeated blocks", s.repeated_blocks),
        ("Unused components", s.unused_components),
        ("Naming conflicts", s.naming_conflicts),
        ("**Total issues**", s.total_issues),
    ] {
        let _ = writeln!(md, "| {label} | {count} |");
    }
    md.push('\n');

    if !report.recommendations.is_empty() {
        let _ = writeln!(md, "## Recommendations\n");
        for rec in &report.recommendations {
            let _ = writeln!(md, "- {rec}");
        }
        md.push('\n');
    }

    if !report.duplicate_components.is_empty() {
        let _ = writeln!(md, "## Duplicate Components\n");
        let _ = writeln!(md, "| File | Component | Duplicate of | Similarity | Fix |");
        let _ = writeln!(md, "| --- | --- | --- | ---: | --- |");
        for f in &report.duplicate_components {
            let _ = writeln!(
                md,
                "| `{}:{}` | {} | {} (`{}`) | {}% | {} |",
                f.file,
                f.line,
                f.component,
                f.duplicate_of_component,
                f.duplicate_of_file,
                f.similarity,
                cell(&f.fix)
            );
        }
        md.push('\n');
    }

    if !report.style_findings.is_empty() {
        let _ = writeln!(md, "## Style Violations\n");
        let _ = writeln!(md, "| File | Kind | Severity | Literal | Fix |");
        let _ = writeln!(md, "| --- | --- | --- | --- | --- |");
        for f in &report.style_findings {
            let _ = writeln!(
                md,
                "| `{}:{}` | {} | {} | `{}` | {} |",
                f.file,
                f.line,
                f.kind.as_str(),
                f.severity.as_str(),
                cell(&f.literal),
                cell(&f.fix)
            );
        }
        md.push('\n');
    }

    if !report.repeated_blocks.is_empty() {
        let _ = writeln!(md, "## Repeated UI Blocks\n");
        // Findings of one group are contiguous; a new id opens a new heading.
        let mut last_block: Option<&str> = None;
        for f in &report.repeated_blocks {
            if last_block != Some(f.block_id.as_str()) {
                let _ = writeln!(
                    md,
                    "\n### Block seen in {} files (`{}`)\n\n```tsx\n{}\n```\n",
                    f.occurrences, f.block_id, f.sample
                );
                last_block = Some(f.block_id.as_str());
            }
            let _ = writeln!(md, "- `{}:{}`", f.file, f.line);
        }
        md.push('\n');
    }

    if !report.unused_components.is_empty() {
        let _ = writeln!(md, "## Unused Components\n");
        for sym in &report.unused_components {
            let kind = match sym.export_kind {
                crate::types::ExportKind::Named => "named",
                crate::types::ExportKind::Default => "default",
            };
            let _ = writeln!(md, "- `{}` ({kind} export) in `{}:{}`", sym.name, sym.file, sym.line);
        }
        md.push('\n');
    }

    if !report.naming_conflicts.is_empty() {
        let _ = writeln!(md, "## Naming Conflicts\n");
        for conflict in &report.naming_conflicts {
            let members: Vec<String> = conflict
                .members
                .iter()
                .map(|m| format!("`{}` (`{}`)", m.name, m.file))
                .collect();
            let _ = writeln!(md, "- **{}**: {}", conflict.key, members.join(", "));
        }
        md.push('\n');
    }

    if !report.warnings.is_empty() {
        let _ = writeln!(md, "## Warnings\n");
        for w in &report.warnings {
            let _ = writeln!(md, "- {:?} `{}`: {}", w.kind, w.path, w.message);
        }
        md.push('\n');
    }

    md
}

pub fn render_json(report: &AnalysisReport) -> String {
    // Every report field is plain data; serialization cannot fail.
    serde_json::to_string_pretty(report).unwrap_or_else(|_| "{}".to_string())
}

fn write_text(path: &Path, content: &str) -> Result<(), ScanError> {
    let fail = |source| ScanError::ReportWrite {
        path: path.to_path_buf(),
        source,
    };
    if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
        std::fs::create_dir_all(dir).map_err(fail)?;
    }
    std::fs::write(path, content).map_err(fail)
}

pub fn write_report(path: &Path, report: &AnalysisReport) -> Result<(), ScanError> {
    write_text(path, &render_markdown(report))
}

pub fn write_json(path: &Path, report: &AnalysisReport) -> Result<(), ScanError> {
    write_text(path, &render_json(report))
}

/// Short summary lines for the terminal.
pub fn console_summary(report: &AnalysisReport) -> Vec<String> {
    let s = &report.summary;
    let mut lines = vec![
        format!(
            "Scanned {}, found {}",
            crate::progress::format_count(s.files_scanned, "file", "files"),
            crate::progress::format_count(s.total_issues, "issue", "issues")
        ),
    ];
    for (label, count) in [
        ("duplicate components", s.duplicate_components),
        ("style violations", s.style_violations),
        ("repeated blocks", s.repeated_blocks),
        ("unused components", s.unused_components),
        ("naming conflicts", s.naming_conflicts),
    ] {
        if count > 0 {
            lines.push(format!("  {count:>4}  {label}"));
        }
    }
    if !report.warnings.is_empty() {
        lines.push(format!(
            "  {} skipped or unparsed (see report)",
            crate::progress::format_count(report.warnings.len(), "file", "files")
        ));
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analyzer::findings::ReportInputs;
    use crate::types::{RepeatedBlockFinding, Severity, StyleFinding, StyleKind};

    fn sample_report() -> AnalysisReport {
        let block = |file: &str| RepeatedBlockFinding {
            block_id: "0a1b2c3d4e5f".into(),
            file: file.into(),
            line: 3,
            occurrences: 3,
            sample: "<li>{x}</li>".into(),
        };
        AnalysisReport::produce(ReportInputs {
            root: "src".into(),
            files_scanned: 3,
            style: vec![StyleFinding {
                file: "components/Foo.tsx".into(),
                line: 7,
                kind: StyleKind::NonThemeClass,
                literal: "bg-red-500 | text-gray-700".into(),
                severity: Severity::Medium,
                fix: "use theme classes".into(),
            }],
            repeated_blocks: vec![block("a.tsx"), block("b.tsx"), block("c.tsx")],
            ..ReportInputs::default()
        })
    }

    #[test]
    fn markdown_has_summary_and_sections() {
        let md = render_markdown(&sample_report());
        assert!(md.starts_with("# Component Analysis Report"));
        assert!(md.contains("| Files scanned | 3 |"));
        assert!(md.contains("| **Total issues** | 4 |"));
        assert!(md.contains("## Style Violations"));
        assert!(md.contains("non-theme-class"));
        assert!(md.contains("bg-red-500 \\| text-gray-700"));
        assert_eq!(md.matches("### Block seen in 3 files").count(), 1);
        assert!(md.contains("- `c.tsx:3`"));
        assert!(!md.contains("## Duplicate Components"));
    }

    #[test]
    fn blocks_with_equal_samples_get_separate_headings() {
        let block = |id: &str, file: &str| RepeatedBlockFinding {
            block_id: id.into(),
            file: file.into(),
            line: 1,
            occurrences: 2,
            sample: "<li>{x}</li>".into(),
        };
        let report = AnalysisReport::produce(ReportInputs {
            files_scanned: 4,
            repeated_blocks: vec![
                block("aaaaaaaaaaaa", "a.tsx"),
                block("aaaaaaaaaaaa", "b.tsx"),
                block("bbbbbbbbbbbb", "c.tsx"),
                block("bbbbbbbbbbbb", "d.tsx"),
            ],
            ..ReportInputs::default()
        });
        let md = render_markdown(&report);
        assert_eq!(md.matches("### Block seen in 2 files").count(), 2);
        assert!(md.contains("(`aaaaaaaaaaaa`)"));
        assert!(md.contains("(`bbbbbbbbbbbb`)"));
    }

    #[test]
    fn empty_report_has_no_sections() {
        let md = render_markdown(&AnalysisReport::produce(ReportInputs::default()));
        assert!(md.contains("## Summary"));
        assert!(!md.contains("## Recommendations"));
        assert!(!md.contains("## Warnings"));
    }

    #[test]
    fn json_round_trips() {
        let report = sample_report();
        let parsed: AnalysisReport =
            serde_json::from_str(&render_json(&report)).expect("valid json");
        assert_eq!(parsed, report);
    }

    #[test]
    fn write_report_creates_parent_dirs() {
        let tmp = tempfile::tempdir().expect("tmp dir");
        let path = tmp.path().join("out/nested/report.md");
        write_report(&path, &sample_report()).expect("write");
        let written = std::fs::read_to_string(&path).expect("read back");
        assert!(written.contains("## Repeated UI Blocks"));
    }

    #[test]
    fn console_summary_lists_non_zero_categories() {
        let lines = console_summary(&sample_report());
        assert_eq!(lines[0], "Scanned 3 files, found 4 issues");
        assert_eq!(lines.len(), 3);
    }
}
