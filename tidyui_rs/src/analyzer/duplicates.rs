//! Duplicate Component Detection
//!
//! Finds component declarations whose normalized names collide
//! (`PokemonCard` vs `Card` vs `CommonCard`) across different files, and
//! reports the pairs whose implementations have drifted apart in size.
//!
//! Same-size copies are left alone: the target is the renamed-then-diverged
//! component, which is where behaviour silently forks.

use std::collections::{BTreeSet, HashMap};

use crate::config::DuplicateConfig;
use crate::types::{ComponentDeclaration, DuplicateFinding, normalized_key, truncate_chars};

use super::exclusions::{ExclusionCategory, ExclusionPolicy};
use super::regexes::{
    regex_component_decl, regex_first_brace_group, regex_non_component_decls, regex_prop_name,
};
use super::source_index::SourceIndex;

/// Lines after the declaration included in its signature.
const SIGNATURE_TAIL_LINES: usize = 5;
const SIGNATURE_MAX_CHARS: usize = 200;
const EVIDENCE_MAX_CHARS: usize = 120;

pub fn find_duplicate_components(
    index: &SourceIndex,
    policy: &ExclusionPolicy,
    config: &DuplicateConfig,
) -> Vec<DuplicateFinding> {
    let mut canonical: HashMap<String, ComponentDeclaration> = HashMap::new();
    let mut findings = Vec::new();

    for file in index.files() {
        if policy.is_excluded_path(&file.path, ExclusionCategory::DuplicateComponents) {
            continue;
        }
        for decl in extract_declarations(&file.path, &file.lines) {
            let Some(original) = canonical.get(&decl.normalized_key) else {
                canonical.insert(decl.normalized_key.clone(), decl);
                continue;
            };
            if original.file == decl.file {
                continue;
            }
            if !is_different_implementation(
                &original.signature,
                &decl.signature,
                config.size_divergence,
            ) {
                continue;
            }
            findings.push(DuplicateFinding {
                file: decl.file.clone(),
                component: decl.name.clone(),
                duplicate_of_component: original.name.clone(),
                duplicate_of_file: original.file.clone(),
                similarity: line_similarity(&original.signature, &decl.signature),
                line: decl.line,
                evidence: truncate_chars(
                    decl.signature.lines().next().unwrap_or_default().trim(),
                    EVIDENCE_MAX_CHARS,
                ),
                fix: suggest_fix(&decl, original, &config.design_system),
            });
        }
    }

    findings
}

/// Component declarations of one file, in line order.
pub fn extract_declarations(path: &str, lines: &[String]) -> Vec<ComponentDeclaration> {
    let decl_re = regex_component_decl();
    let mut out = Vec::new();

    for (idx, line) in lines.iter().enumerate() {
        let Some(name) = decl_re
            .captures(line)
            .and_then(|caps| caps.get(1))
            .map(|m| m.as_str())
        else {
            continue;
        };
        if regex_non_component_decls().iter().any(|re| re.is_match(line)) {
            continue;
        }

        let end = (idx + 1 + SIGNATURE_TAIL_LINES).min(lines.len());
        let signature = truncate_chars(&lines[idx..end].join("\n"), SIGNATURE_MAX_CHARS);

        out.push(ComponentDeclaration {
            file: path.to_string(),
            name: name.to_string(),
            normalized_key: normalized_key(name),
            signature,
            props: extract_props(line),
            line: idx + 1,
        });
    }
    out
}

/// Identifiers of the first `{ ... }` group on the line (destructured props).
fn extract_props(line: &str) -> BTreeSet<String> {
    let Some(group) = regex_first_brace_group()
        .captures(line)
        .and_then(|caps| caps.get(1))
    else {
        return BTreeSet::new();
    };
    group
        .as_str()
        .split(',')
        .filter_map(|part| {
            regex_prop_name()
                .captures(part)
                .and_then(|caps| caps.get(1))
                .map(|m| m.as_str().to_string())
        })
        .collect()
}

/// `|len(a) - len(b)| > divergence * avg(len(a), len(b))`, in characters.
pub fn is_different_implementation(a: &str, b: &str, divergence: f64) -> bool {
    let len_a = a.chars().count() as f64;
    let len_b = b.chars().count() as f64;
    let avg = (len_a + len_b) / 2.0;
    (len_a - len_b).abs() > divergence * avg
}

/// `100 - round(|lines(a) - lines(b)| / avg * 100)`, saturating at 0.
pub fn line_similarity(a: &str, b: &str) -> u8 {
    let lines_a = a.lines().count() as f64;
    let lines_b = b.lines().count() as f64;
    let avg = (lines_a + lines_b) / 2.0;
    if avg == 0.0 {
        return 100;
    }
    let score = 100.0 - ((lines_a - lines_b).abs() / avg * 100.0).round();
    score.clamp(0.0, 100.0) as u8
}

fn suggest_fix(
    candidate: &ComponentDeclaration,
    original: &ComponentDeclaration,
    design_system: &[String],
) -> String {
    let lower = candidate.name.to_lowercase();
    if let Some(ds) = design_system
        .iter()
        .find(|ds| lower.contains(&ds.to_lowercase()))
    {
        return format!(
            "Replace {} with the design-system <{}> component",
            candidate.name, ds
        );
    }
    format!(
        "Merge {} into {} from {} and import it from there",
        candidate.name, original.name, original.file
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lines(text: &str) -> Vec<String> {
        text.lines().map(str::to_string).collect()
    }

    const SHORT_BUTTON: &str = "export const PokemonButton = () => (\n  <button>Go</button>\n);\n";
    const LONG_BUTTON: &str = r#"export const PokemonButton = ({ label, onClick }) => (
  <button className="btn" onClick={onClick}>
    {label}
  </button>
);
"#;

    #[test]
    fn extracts_declaration_with_signature_and_props() {
        let decls = extract_declarations("components/Button.tsx", &lines(LONG_BUTTON));
        assert_eq!(decls.len(), 1);
        let decl = &decls[0];
        assert_eq!(decl.name, "PokemonButton");
        assert_eq!(decl.normalized_key, "button");
        assert_eq!(decl.line, 1);
        assert_eq!(decl.signature.lines().count(), 5);
        let props: Vec<&str> = decl.props.iter().map(String::as_str).collect();
        assert_eq!(props, vec!["label", "onClick"]);
    }

    #[test]
    fn signature_is_capped() {
        let long = format!("function Big() {{\n{}\n", "x".repeat(400));
        let decls = extract_declarations("a.tsx", &lines(&long));
        assert_eq!(decls[0].signature.chars().count(), SIGNATURE_MAX_CHARS);
    }

    #[test]
    fn skips_non_component_shapes() {
        let text = r#"
const IconComponent = icons[name];
const Rows = items.map((item) => <Row key={item.id} />);
export const Real = () => <div />;
"#;
        let decls = extract_declarations("a.tsx", &lines(text));
        let names: Vec<&str> = decls.iter().map(|d| d.name.as_str()).collect();
        assert_eq!(names, vec!["Real"]);
    }

    #[test]
    fn divergent_pair_is_reported_once() {
        let index = SourceIndex::from_sources([
            ("components/PokemonButton.tsx", SHORT_BUTTON),
            ("features/PokemonButton.tsx", LONG_BUTTON),
        ]);
        let findings = find_duplicate_components(
            &index,
            &ExclusionPolicy::default(),
            &DuplicateConfig::default(),
        );
        assert_eq!(findings.len(), 1);
        let f = &findings[0];
        assert_eq!(f.file, "features/PokemonButton.tsx");
        assert_eq!(f.duplicate_of_file, "components/PokemonButton.tsx");
        assert_ne!(f.file, f.duplicate_of_file);
        assert_eq!(f.similarity, 50);
        assert!(f.similarity < 100);
        assert!(f.fix.contains("<Button>"));
    }

    #[test]
    fn same_size_copies_are_not_reported() {
        let index = SourceIndex::from_sources([
            ("a/Card.tsx", "export const Card = () => <div>one</div>;\n"),
            ("b/Card.tsx", "export const Card = () => <div>two</div>;\n"),
        ]);
        let findings = find_duplicate_components(
            &index,
            &ExclusionPolicy::default(),
            &DuplicateConfig::default(),
        );
        assert!(findings.is_empty());
    }

    #[test]
    fn same_file_redeclaration_is_ignored() {
        let text = format!("{SHORT_BUTTON}{LONG_BUTTON}");
        let index = SourceIndex::from_sources([("a/Button.tsx", text)]);
        let findings = find_duplicate_components(
            &index,
            &ExclusionPolicy::default(),
            &DuplicateConfig::default(),
        );
        assert!(findings.is_empty());
    }

    #[test]
    fn effects_components_are_allowed_to_repeat() {
        let index = SourceIndex::from_sources([
            ("effects/Glow.tsx", SHORT_BUTTON),
            ("effects/Shine.tsx", LONG_BUTTON),
        ]);
        let findings = find_duplicate_components(
            &index,
            &ExclusionPolicy::default(),
            &DuplicateConfig::default(),
        );
        assert!(findings.is_empty());
    }

    #[test]
    fn fix_names_canonical_when_no_catalog_match() {
        let index = SourceIndex::from_sources([
            ("a/StatsPanel.tsx", "export function StatsPanel() {\n  return null;\n}\n"),
            (
                "b/PokemonStatsPanel.tsx",
                "export function PokemonStatsPanel({ stats, compact, onSelect, highlight }) {\n  return null;\n}\n",
            ),
        ]);
        let findings = find_duplicate_components(
            &index,
            &ExclusionPolicy::default(),
            &DuplicateConfig::default(),
        );
        assert_eq!(findings.len(), 1);
        assert_eq!(findings[0].duplicate_of_component, "StatsPanel");
        assert!(findings[0].fix.contains("a/StatsPanel.tsx"));
        assert_eq!(findings[0].similarity, 100);
    }

    #[test]
    fn similarity_math() {
        assert_eq!(line_similarity("a\nb\nc", "a\nb\nc\nd\ne"), 50);
        assert_eq!(line_similarity("", ""), 100);
        assert_eq!(line_similarity("a", "a\nb\nc\nd\ne\nf\ng\nh\ni\nj"), 0);
        assert!(is_different_implementation("aaaa", "aaaaaaaaaa", 0.3));
        assert!(!is_different_implementation("aaaaaaaaaa", "aaaaaaaaab", 0.3));
    }
}
