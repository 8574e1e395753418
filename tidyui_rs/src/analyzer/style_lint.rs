//! Style compliance checks.
//!
//! Flags styling that bypasses the theme system:
//! - inline `style={{ ... }}` objects
//! - hardcoded colours, opacities and pixel spacing
//! - Tailwind colour-scale utilities (`bg-blue-500`) instead of theme classes
//!
//! Each line goes through three independent passes, so one line can yield
//! findings of several kinds.
//!
//! # Example
//!
//! ```ignore
//! // BAD
//! <div style={{ color: "#ff0000" }} className="bg-blue-500" />
//!
//! // GOOD
//! <div className="theme-bg-primary theme-primary" />
//! ```

use regex::{Captures, Regex};

use crate::types::{Severity, StyleFinding, StyleKind, truncate_chars};

use super::exclusions::{ExclusionCategory, ExclusionPolicy};
use super::regexes::{
    regex_class_name_attr, regex_color_scale_utility, regex_hex_color, regex_opacity_literal,
    regex_pixel_literal, regex_rgb_color,
};
use super::source_index::SourceIndex;

const INLINE_STYLE_TOKEN: &str = "style={{";
const LITERAL_MAX_CHARS: usize = 120;

/// Hardcoded-literal rules: each variant owns its pattern, the finding kind
/// it produces and the path category that exempts it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StyleRule {
    HexColor,
    RgbColor,
    OpacityLiteral,
    PixelSpacing,
}

impl StyleRule {
    pub const ALL: [StyleRule; 4] = [
        Self::HexColor,
        Self::RgbColor,
        Self::OpacityLiteral,
        Self::PixelSpacing,
    ];

    pub fn pattern(&self) -> &'static Regex {
        match self {
            Self::HexColor => regex_hex_color(),
            Self::RgbColor => regex_rgb_color(),
            Self::OpacityLiteral => regex_opacity_literal(),
            Self::PixelSpacing => regex_pixel_literal(),
        }
    }

    pub fn kind(&self) -> StyleKind {
        match self {
            Self::HexColor | Self::RgbColor => StyleKind::HardcodedColor,
            Self::OpacityLiteral => StyleKind::HardcodedOpacity,
            Self::PixelSpacing => StyleKind::HardcodedSpacing,
        }
    }

    pub fn category(&self) -> ExclusionCategory {
        match self {
            Self::HexColor | Self::RgbColor => ExclusionCategory::HardcodedColor,
            Self::OpacityLiteral => ExclusionCategory::HardcodedOpacity,
            Self::PixelSpacing => ExclusionCategory::HardcodedSpacing,
        }
    }

    /// Line words that exempt this rule outright.
    fn exempting_context(&self) -> &'static [&'static str] {
        match self {
            Self::PixelSpacing => &["transition", "animation"],
            _ => &[],
        }
    }

    /// The literal a match reports: the capture group when the pattern has one.
    fn literal<'t>(&self, caps: &Captures<'t>) -> &'t str {
        caps.get(1)
            .or_else(|| caps.get(0))
            .map(|m| m.as_str())
            .unwrap_or_default()
    }
}

pub fn fix_for(kind: StyleKind) -> &'static str {
    match kind {
        StyleKind::InlineStyle => {
            "Move inline styles into a theme class or a styled component"
        }
        StyleKind::HardcodedColor => {
            "Use a theme colour variable (var(--theme-primary)) or a theme-* class"
        }
        StyleKind::HardcodedOpacity => "Use a theme opacity token (var(--theme-opacity-*))",
        StyleKind::HardcodedSpacing => "Use a theme spacing token (var(--theme-spacing-*))",
        StyleKind::NonThemeClass => "Replace colour-scale utilities with theme classes",
    }
}

fn is_motion_path(path: &str, policy: &ExclusionPolicy) -> bool {
    policy.is_effects_path(path) || path.to_lowercase().contains("animation")
}

fn severity_for(kind: StyleKind, path: &str, policy: &ExclusionPolicy) -> Severity {
    if is_motion_path(path, policy) {
        Severity::Low
    } else if kind == StyleKind::HardcodedColor && path.contains("components/") {
        Severity::High
    } else {
        Severity::Medium
    }
}

/// Theme replacement for a colour-scale utility.
pub fn theme_alternative(class: &str) -> &'static str {
    let base = class.rsplit(':').next().unwrap_or(class);
    if base.starts_with("bg-") {
        "theme-bg-primary"
    } else if base.starts_with("text-") {
        "theme-primary"
    } else if base.starts_with("border-") {
        "theme-border-primary"
    } else {
        "theme-*"
    }
}

pub fn lint_styles(index: &SourceIndex, policy: &ExclusionPolicy) -> Vec<StyleFinding> {
    index
        .files()
        .iter()
        .filter(|file| !policy.is_effects_path(&file.path))
        .flat_map(|file| lint_file_lines(&file.path, &file.lines, policy))
        .collect()
}

pub fn lint_file_lines(path: &str, lines: &[String], policy: &ExclusionPolicy) -> Vec<StyleFinding> {
    let mut findings = Vec::new();
    for (idx, line) in lines.iter().enumerate() {
        let line_no = idx + 1;
        check_inline_style(path, line_no, line, policy, &mut findings);
        check_literals(path, line_no, line, policy, &mut findings);
        check_utility_classes(path, line_no, line, policy, &mut findings);
    }
    findings
}

fn check_inline_style(
    path: &str,
    line_no: usize,
    line: &str,
    policy: &ExclusionPolicy,
    out: &mut Vec<StyleFinding>,
) {
    let Some(start) = line.find(INLINE_STYLE_TOKEN) else {
        return;
    };
    if policy.is_legitimate_inline_style(line, path) {
        return;
    }
    let rest = &line[start..];
    let literal = match rest.find("}}") {
        Some(end) => &rest[..end + 2],
        None => rest,
    };
    out.push(StyleFinding {
        file: path.to_string(),
        line: line_no,
        kind: StyleKind::InlineStyle,
        literal: truncate_chars(literal.trim(), LITERAL_MAX_CHARS),
        severity: Severity::High,
        fix: fix_for(StyleKind::InlineStyle).to_string(),
    });
}

fn check_literals(
    path: &str,
    line_no: usize,
    line: &str,
    policy: &ExclusionPolicy,
    out: &mut Vec<StyleFinding>,
) {
    if policy.references_theme(line) {
        return;
    }
    for rule in StyleRule::ALL {
        if policy.is_excluded_path(path, rule.category()) {
            continue;
        }
        if rule.exempting_context().iter().any(|kw| line.contains(kw)) {
            continue;
        }
        for caps in rule.pattern().captures_iter(line) {
            let literal = rule.literal(&caps);
            if policy.is_legitimate_style_literal(literal, line) {
                continue;
            }
            let kind = rule.kind();
            out.push(StyleFinding {
                file: path.to_string(),
                line: line_no,
                kind,
                literal: literal.to_string(),
                severity: severity_for(kind, path, policy),
                fix: fix_for(kind).to_string(),
            });
        }
    }
}

fn check_utility_classes(
    path: &str,
    line_no: usize,
    line: &str,
    policy: &ExclusionPolicy,
    out: &mut Vec<StyleFinding>,
) {
    if policy.is_excluded_path(path, ExclusionCategory::UtilityClasses) {
        return;
    }
    let mut offending: Vec<&str> = Vec::new();
    for caps in regex_class_name_attr().captures_iter(line) {
        let Some(value) = caps.get(1).or_else(|| caps.get(2)) else {
            continue;
        };
        for class in value.as_str().split_whitespace() {
            // `hover:bg-blue-500` is judged by its base utility.
            let base = class.rsplit(':').next().unwrap_or(class);
            if policy.is_theme_class(base) {
                continue;
            }
            if regex_color_scale_utility().is_match(base) {
                offending.push(class);
            }
        }
    }
    if offending.is_empty() {
        return;
    }
    let mapping = offending
        .iter()
        .map(|class| format!("{} → {}", class, theme_alternative(class)))
        .collect::<Vec<_>>()
        .join(", ");
    out.push(StyleFinding {
        file: path.to_string(),
        line: line_no,
        kind: StyleKind::NonThemeClass,
        literal: offending.join(" "),
        severity: Severity::Medium,
        fix: format!("{}: {}", fix_for(StyleKind::NonThemeClass), mapping),
    });
}
