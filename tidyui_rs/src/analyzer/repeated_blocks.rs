//! Repeated UI block detection.
//!
//! Slides a fixed-height window over every file, normalizes each markup-heavy
//! window into a shape (whitespace, class lists, `{expressions}` and indexed
//! identifiers erased) and groups identical shapes across files. A shape
//! seen in enough distinct files is a copy-pasted block worth extracting.

use std::collections::HashMap;

use sha2::{Digest, Sha256};

use crate::config::BlockConfig;
use crate::types::{RepeatedBlockFinding, RepeatedBlockGroup, truncate_chars};

use super::exclusions::{ExclusionCategory, ExclusionPolicy};
use super::regexes::{
    regex_brace_expr, regex_class_value, regex_indexed_ident, regex_markup_segment,
    regex_module_keyword, regex_whitespace_run,
};
use super::source_index::SourceIndex;

const MIN_MARKUP_SEGMENTS: usize = 3;
const MIN_BLOCK_CHARS: usize = 50;
const SAMPLE_MAX_CHARS: usize = 150;
/// Bytes of the fingerprint spelled out in `block_id`.
const BLOCK_ID_BYTES: usize = 6;

type Fingerprint = [u8; 32];

/// A window that survived the filters, before cross-file grouping.
#[derive(Debug, Clone)]
pub struct CandidateWindow {
    /// 1-based first line.
    pub line: usize,
    pub fingerprint: Fingerprint,
    pub text: String,
}

pub fn find_repeated_blocks(
    index: &SourceIndex,
    policy: &ExclusionPolicy,
    config: &BlockConfig,
) -> Vec<RepeatedBlockFinding> {
    let groups = collect_groups(index, policy, config);
    promote_groups(&groups, config.min_files)
}

/// Groups every candidate window by shape, in first-seen order.
pub fn collect_groups(
    index: &SourceIndex,
    policy: &ExclusionPolicy,
    config: &BlockConfig,
) -> Vec<RepeatedBlockGroup> {
    // Per-file partials first; grouping only starts once all of them exist.
    let partials: Vec<(&str, Vec<CandidateWindow>)> = index
        .files()
        .iter()
        .filter(|file| {
            !policy.is_effects_path(&file.path)
                && !policy.is_excluded_path(&file.path, ExclusionCategory::RepeatedBlocks)
        })
        .map(|file| {
            (
                file.path.as_str(),
                candidate_windows(&file.lines, policy, config.window),
            )
        })
        .collect();

    let mut slots: HashMap<Fingerprint, usize> = HashMap::new();
    let mut groups: Vec<RepeatedBlockGroup> = Vec::new();
    for (path, windows) in partials {
        for window in windows {
            let slot = *slots.entry(window.fingerprint).or_insert_with(|| {
                groups.push(RepeatedBlockGroup {
                    block_id: block_id(&window.fingerprint),
                    sample: truncate_chars(window.text.trim(), SAMPLE_MAX_CHARS),
                    ..RepeatedBlockGroup::default()
                });
                groups.len() - 1
            });
            groups[slot].record(path, window.line);
        }
    }
    groups
}

fn block_id(fingerprint: &Fingerprint) -> String {
    fingerprint[..BLOCK_ID_BYTES]
        .iter()
        .map(|b| format!("{b:02x}"))
        .collect()
}

/// One finding per contributing file for every group spanning `min_files`.
pub fn promote_groups(groups: &[RepeatedBlockGroup], min_files: usize) -> Vec<RepeatedBlockFinding> {
    groups
        .iter()
        .filter(|group| group.files.len() >= min_files)
        .flat_map(|group| {
            let occurrences = group.files.len();
            group.files.iter().map(move |file| RepeatedBlockFinding {
                block_id: group.block_id.clone(),
                file: file.clone(),
                line: group.first_line.get(file).copied().unwrap_or(1),
                occurrences,
                sample: group.sample.clone(),
            })
        })
        .collect()
}

pub fn candidate_windows(
    lines: &[String],
    policy: &ExclusionPolicy,
    window: usize,
) -> Vec<CandidateWindow> {
    if window == 0 || lines.len() < window {
        return Vec::new();
    }
    let mut out = Vec::new();
    for start in 0..=(lines.len() - window) {
        let text = lines[start..start + window].join("\n");
        if !is_candidate_block(&text, policy) {
            continue;
        }
        let normalized = normalize_block(&text);
        out.push(CandidateWindow {
            line: start + 1,
            fingerprint: Sha256::digest(normalized.as_bytes()).into(),
            text,
        });
    }
    out
}

fn is_candidate_block(text: &str, policy: &ExclusionPolicy) -> bool {
    if !text.contains('<') {
        return false;
    }
    if regex_markup_segment().find_iter(text).count() < MIN_MARKUP_SEGMENTS {
        return false;
    }
    if text.trim().chars().count() < MIN_BLOCK_CHARS {
        return false;
    }
    if regex_module_keyword().is_match(text) {
        return false;
    }
    !policy.is_theme_utility_block(text)
}

/// Shape of a block: what stays when the incidental details are erased.
pub fn normalize_block(text: &str) -> String {
    let collapsed = regex_whitespace_run().replace_all(text, " ");
    let classes = regex_class_value().replace_all(&collapsed, "className=\"_\"");
    let exprs = regex_brace_expr().replace_all(&classes, "{_}");
    let idents = regex_indexed_ident().replace_all(&exprs, "_ID_");
    idents.trim().to_string()
}
