use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

pub const DEFAULT_EXTENSIONS: &[&str] = &["jsx", "tsx"];
pub const DEFAULT_DEPENDENCY_DIRS: &[&str] = &["node_modules"];

/// One component source file, read once per run.
#[derive(Clone, Debug)]
pub struct SourceFile {
    /// Root-relative path with `/` separators.
    pub path: String,
    pub text: String,
    pub lines: Vec<String>,
}

impl SourceFile {
    pub fn new(path: String, text: String) -> Self {
        let lines = text.lines().map(str::to_string).collect();
        Self { path, text, lines }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParseFailure {
    pub path: String,
    pub message: String,
}

/// Owned digest of a parsed module: what the liveness pass needs from the tree.
#[derive(Clone, Debug, Default)]
pub struct ModuleOutline {
    pub exports: Vec<ExportRecord>,
    /// Named imports by imported name, default imports by local name.
    pub import_names: Vec<String>,
    /// Recoverable parser diagnostics.
    pub diagnostics: usize,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ExportRecord {
    pub name: String,
    pub kind: ExportKind,
    pub line: usize,
}

#[derive(Clone, Debug)]
pub struct ParsedUnit {
    pub path: String,
    pub outcome: Result<ModuleOutline, ParseFailure>,
}

impl ParsedUnit {
    pub fn outline(&self) -> Option<&ModuleOutline> {
        self.outcome.as_ref().ok()
    }

    pub fn is_failure(&self) -> bool {
        self.outcome.is_err()
    }
}

#[derive(Clone, Debug)]
pub struct ComponentDeclaration {
    pub file: String,
    pub name: String,
    pub normalized_key: String,
    pub signature: String,
    pub props: BTreeSet<String>,
    pub line: usize,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DuplicateFinding {
    pub file: String,
    pub component: String,
    pub duplicate_of_component: String,
    pub duplicate_of_file: String,
    pub similarity: u8,
    pub line: usize,
    pub evidence: String,
    pub fix: String,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum StyleKind {
    InlineStyle,
    HardcodedColor,
    HardcodedOpacity,
    HardcodedSpacing,
    NonThemeClass,
}

impl StyleKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::InlineStyle => "inline-style",
            Self::HardcodedColor => "hardcoded-color",
            Self::HardcodedOpacity => "hardcoded-opacity",
            Self::HardcodedSpacing => "hardcoded-spacing",
            Self::NonThemeClass => "non-theme-class",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Low,
    Medium,
    High,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct StyleFinding {
    pub file: String,
    pub line: usize,
    pub kind: StyleKind,
    pub literal: String,
    pub severity: Severity,
    pub fix: String,
}

/// Cross-file group of identical normalized windows.
#[derive(Clone, Debug, Default)]
pub struct RepeatedBlockGroup {
    /// Distinct files, first-seen order.
    pub files: Vec<String>,
    /// 1-based first line of the block in each file.
    pub first_line: BTreeMap<String, usize>,
    /// Short hex digest of the normalized shape; identifies the group.
    pub block_id: String,
    pub sample: String,
}

impl RepeatedBlockGroup {
    /// Records an occurrence; later hits in an already-seen file are ignored.
    pub fn record(&mut self, file: &str, line: usize) {
        if self.first_line.contains_key(file) {
            return;
        }
        self.first_line.insert(file.to_string(), line);
        self.files.push(file.to_string());
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RepeatedBlockFinding {
    /// Shared by every finding of the same group.
    pub block_id: String,
    pub file: String,
    pub line: usize,
    pub occurrences: usize,
    pub sample: String,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportKind {
    Named,
    Default,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExportedSymbol {
    pub file: String,
    pub name: String,
    pub export_kind: ExportKind,
    pub line: usize,
    pub used: bool,
    #[serde(default, skip_serializing_if = "BTreeSet::is_empty")]
    pub conflicts_with: BTreeSet<String>,
}

impl ExportedSymbol {
    pub fn new(file: String, name: String, export_kind: ExportKind, line: usize) -> Self {
        Self {
            file,
            name,
            export_kind,
            line,
            used: false,
            conflicts_with: BTreeSet::new(),
        }
    }

    /// Liveness only ever moves from unused to used.
    pub fn mark_used(&mut self) {
        self.used = true;
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConflictMember {
    pub file: String,
    pub name: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct NamingConflict {
    pub key: String,
    pub members: Vec<ConflictMember>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WarningKind {
    Discovery,
    Read,
    Parse,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScanWarning {
    pub path: String,
    pub kind: WarningKind,
    pub message: String,
}

impl ScanWarning {
    pub fn new(path: impl Into<String>, kind: WarningKind, message: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            kind,
            message: message.into(),
        }
    }
}

/// Lowercases a component name and drops the `pokemon`/`common` qualifiers,
/// so `PokemonCard`, `CommonCard` and `Card` land on the same key.
pub fn normalized_key(name: &str) -> String {
    name.to_lowercase()
        .replace("pokemon", "")
        .replace("common", "")
}

/// Uppercase first letter followed by alphanumerics only.
pub fn is_pascal_case(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) if first.is_ascii_uppercase() => chars.all(|c| c.is_ascii_alphanumeric()),
        _ => false,
    }
}

/// Truncates on a char boundary.
pub fn truncate_chars(text: &str, max: usize) -> String {
    text.chars().take(max).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalized_key_strips_qualifiers() {
        assert_eq!(normalized_key("PokemonButton"), "button");
        assert_eq!(normalized_key("CommonButton"), "button");
        assert_eq!(normalized_key("Button"), "button");
        assert_eq!(normalized_key("PokemonCommonList"), "list");
    }

    #[test]
    fn pascal_case_detection() {
        assert!(is_pascal_case("Orphan"));
        assert!(is_pascal_case("PokemonCard2"));
        assert!(!is_pascal_case("orphan"));
        assert!(!is_pascal_case("use-thing"));
        assert!(!is_pascal_case(""));
    }

    #[test]
    fn repeated_group_keeps_first_line_per_file() {
        let mut group = RepeatedBlockGroup::default();
        group.record("a.tsx", 3);
        group.record("a.tsx", 40);
        group.record("b.tsx", 7);
        assert_eq!(group.files, vec!["a.tsx", "b.tsx"]);
        assert_eq!(group.first_line["a.tsx"], 3);
    }

    #[test]
    fn mark_used_is_sticky() {
        let mut sym = ExportedSymbol::new("a.tsx".into(), "A".into(), ExportKind::Named, 1);
        sym.mark_used();
        sym.mark_used();
        assert!(sym.used);
    }
}
