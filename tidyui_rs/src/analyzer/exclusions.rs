//! Exclusion policy shared by every detector.
//!
//! A read-only table of path patterns and content predicates describing what
//! is *acceptable* even though it looks like a defect: hand-tuned effects and
//! animation components, the theme module itself, and animation literals.
//! Built once per run, then borrowed by all detectors concurrently.

use std::collections::{HashMap, HashSet};

use globset::{Glob, GlobSet, GlobSetBuilder};
use tracing::warn;

use crate::config::ExclusionsSection;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ExclusionCategory {
    /// Visual-effect components: skipped wholesale by the text detectors.
    Effects,
    /// Components that are legitimately near-identical.
    DuplicateComponents,
    HardcodedColor,
    HardcodedOpacity,
    HardcodedSpacing,
    UtilityClasses,
    RepeatedBlocks,
}

impl ExclusionCategory {
    pub const ALL: [ExclusionCategory; 7] = [
        Self::Effects,
        Self::DuplicateComponents,
        Self::HardcodedColor,
        Self::HardcodedOpacity,
        Self::HardcodedSpacing,
        Self::UtilityClasses,
        Self::RepeatedBlocks,
    ];

    fn defaults(self) -> &'static [&'static str] {
        match self {
            Self::Effects => &["effects/"],
            Self::DuplicateComponents => &["effects/", "animations/", "ui/skeletons/"],
            Self::HardcodedColor => &["theme/", "effects/", "animations/", "*.stories.*"],
            Self::HardcodedOpacity => &["effects/", "animations/"],
            Self::HardcodedSpacing => &["effects/", "animations/", "theme/"],
            Self::UtilityClasses => &["effects/", "theme/"],
            Self::RepeatedBlocks => &["effects/", "*.test.*", "*.stories.*"],
        }
    }

    fn configured(self, extra: &ExclusionsSection) -> &[String] {
        match self {
            Self::Effects => &extra.effects,
            Self::DuplicateComponents => &extra.duplicate_components,
            Self::HardcodedColor => &extra.hardcoded_color,
            Self::HardcodedOpacity => &extra.hardcoded_opacity,
            Self::HardcodedSpacing => &extra.hardcoded_spacing,
            Self::UtilityClasses => &extra.utility_classes,
            Self::RepeatedBlocks => &extra.repeated_blocks,
        }
    }
}

/// Keywords that make an inline style legitimate (motion is driven at runtime).
const MOTION_KEYWORDS: &[&str] = &["animation", "transform", "opacity"];

/// Literal values used by the animation helpers.
const ANIMATION_LITERALS: &[&str] = &["0.4", "0.6", "0.8"];

/// Line context in which a literal is animation timing, not styling.
const ANIMATION_CONTEXT: &[&str] = &["transition", "animation", "Duration", "Delay"];

/// Markers showing a line already goes through the theme system.
const THEME_MARKERS: &[&str] = &["var(--", "theme-", "theme.", "useTheme", "tokens."];

const THEME_CLASSES: &[&str] = &[
    "theme-bg-primary",
    "theme-bg-secondary",
    "theme-primary",
    "theme-secondary",
    "theme-border-primary",
    "theme-text-muted",
    "theme-card",
];

const THEME_CLASS_PREFIXES: &[&str] = &["theme-", "ds-", "type-"];

#[derive(Debug, Default)]
struct PatternSet {
    substrings: Vec<String>,
    globs: Option<GlobSet>,
}

impl PatternSet {
    fn build(patterns: impl IntoIterator<Item = String>) -> Self {
        let mut substrings = Vec::new();
        let mut builder = GlobSetBuilder::new();
        let mut has_globs = false;
        for pattern in patterns {
            if pattern.contains(['*', '?', '[']) {
                // A bare `*.stories.*` should match at any depth.
                let anchored = if pattern.starts_with("**/") || pattern.starts_with('/') {
                    pattern.clone()
                } else {
                    format!("**/{}", pattern)
                };
                match Glob::new(&anchored) {
                    Ok(glob) => {
                        builder.add(glob);
                        has_globs = true;
                    }
                    Err(e) => warn!("ignoring invalid exclusion glob {}: {}", pattern, e),
                }
            } else {
                substrings.push(pattern);
            }
        }
        let globs = if has_globs {
            match builder.build() {
                Ok(set) => Some(set),
                Err(e) => {
                    warn!("ignoring exclusion globs: {}", e);
                    None
                }
            }
        } else {
            None
        };
        Self { substrings, globs }
    }

    fn matches(&self, path: &str) -> bool {
        let path = path.replace('\\', "/");
        if self.substrings.iter().any(|s| path.contains(s.as_str())) {
            return true;
        }
        self.globs.as_ref().is_some_and(|set| set.is_match(&path))
    }
}

/// Per-category path patterns plus the content allow-lists.
#[derive(Debug)]
pub struct ExclusionPolicy {
    paths: HashMap<ExclusionCategory, PatternSet>,
    theme_classes: HashSet<String>,
}

impl Default for ExclusionPolicy {
    fn default() -> Self {
        Self::new(&ExclusionsSection::default())
    }
}

impl ExclusionPolicy {
    pub fn new(extra: &ExclusionsSection) -> Self {
        let paths = ExclusionCategory::ALL
            .iter()
            .map(|&category| {
                let patterns = category
                    .defaults()
                    .iter()
                    .map(|s| s.to_string())
                    .chain(category.configured(extra).iter().cloned());
                (category, PatternSet::build(patterns))
            })
            .collect();
        let theme_classes = THEME_CLASSES
            .iter()
            .map(|s| s.to_string())
            .chain(extra.theme_classes.iter().cloned())
            .collect();
        Self {
            paths,
            theme_classes,
        }
    }

    pub fn is_excluded_path(&self, path: &str, category: ExclusionCategory) -> bool {
        self.paths
            .get(&category)
            .is_some_and(|set| set.matches(path))
    }

    pub fn is_effects_path(&self, path: &str) -> bool {
        self.is_excluded_path(path, ExclusionCategory::Effects)
    }

    /// Inline styles carrying runtime motion values, or living in an effects
    /// component, are fine.
    pub fn is_legitimate_inline_style(&self, line: &str, path: &str) -> bool {
        let lower = line.to_lowercase();
        MOTION_KEYWORDS.iter().any(|kw| lower.contains(kw)) || self.is_effects_path(path)
    }

    pub fn is_legitimate_style_literal(&self, literal: &str, line: &str) -> bool {
        ANIMATION_LITERALS.contains(&literal.trim())
            || ANIMATION_CONTEXT.iter().any(|kw| line.contains(kw))
    }

    pub fn is_theme_utility_block(&self, block: &str) -> bool {
        self.references_theme(block)
    }

    pub fn references_theme(&self, text: &str) -> bool {
        THEME_MARKERS.iter().any(|marker| text.contains(marker))
    }

    pub fn is_theme_class(&self, class: &str) -> bool {
        self.theme_classes.contains(class)
            || THEME_CLASS_PREFIXES
                .iter()
                .any(|prefix| class.starts_with(prefix))
    }
}
