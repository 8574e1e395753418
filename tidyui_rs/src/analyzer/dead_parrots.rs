//! Dead Parrots - exported components nobody imports.
//!
//! Named after the Monty Python sketch: a component that is "just resting"
//! in the tree but is never imported anywhere is dead.
//!
//! Liveness is decided by bare name over the whole corpus: an export is used
//! when any *other* file imports that name. There is no module resolution, so
//! two unrelated components sharing a name keep each other alive.
//!
//! This is deliberately narrower than a plain lookup of the export's name in
//! the set of all imported names: an import written in the exporting file
//! itself is ignored, so a module cannot keep its own export alive (see
//! `self_import_does_not_keep_alive`).
//!
//! The same pass groups exports by normalized key (`PokemonCard`, `Card` and
//! `CommonCard` collide) and reports each group as a naming conflict.

use std::collections::{BTreeSet, HashMap, HashSet};

use crate::types::{ConflictMember, ExportedSymbol, NamingConflict, normalized_key};

use super::source_index::SourceIndex;

#[derive(Debug, Clone, Default)]
pub struct LivenessResult {
    /// Every exported component symbol, discovery order.
    pub symbols: Vec<ExportedSymbol>,
    /// One entry per normalized key shared by more than one export.
    pub conflicts: Vec<NamingConflict>,
}

impl LivenessResult {
    pub fn unused(&self) -> impl Iterator<Item = &ExportedSymbol> {
        self.symbols.iter().filter(|s| !s.used)
    }
}

pub fn analyze_liveness(index: &SourceIndex) -> LivenessResult {
    let mut symbols = collect_exports(index);
    let importers = collect_imports(index);
    mark_used(&mut symbols, &importers);
    let conflicts = link_conflicts(&mut symbols);
    LivenessResult { symbols, conflicts }
}

/// Pass 1. A component exported twice from one file (`export function X`
/// plus `export default X`) is one symbol; the first record wins.
fn collect_exports(index: &SourceIndex) -> Vec<ExportedSymbol> {
    let mut seen: HashSet<(&str, &str)> = HashSet::new();
    let mut symbols = Vec::new();
    for unit in index.units() {
        let Some(outline) = unit.outline() else {
            continue;
        };
        for export in &outline.exports {
            if !seen.insert((unit.path.as_str(), export.name.as_str())) {
                continue;
            }
            symbols.push(ExportedSymbol::new(
                unit.path.clone(),
                export.name.clone(),
                export.kind,
                export.line,
            ));
        }
    }
    symbols
}

/// Pass 2: imported name -> files importing it.
fn collect_imports(index: &SourceIndex) -> HashMap<&str, BTreeSet<&str>> {
    let mut importers: HashMap<&str, BTreeSet<&str>> = HashMap::new();
    for unit in index.units() {
        let Some(outline) = unit.outline() else {
            continue;
        };
        for name in &outline.import_names {
            importers
                .entry(name.as_str())
                .or_default()
                .insert(unit.path.as_str());
        }
    }
    importers
}

/// Pass 3. Imports written in the exporting file do not count.
fn mark_used(symbols: &mut [ExportedSymbol], importers: &HashMap<&str, BTreeSet<&str>>) {
    for symbol in symbols.iter_mut() {
        let imported_elsewhere = importers
            .get(symbol.name.as_str())
            .is_some_and(|files| files.iter().any(|f| *f != symbol.file));
        if imported_elsewhere {
            symbol.mark_used();
        }
    }
}

/// Pass 4. Every member of a group records every other member's name.
fn link_conflicts(symbols: &mut [ExportedSymbol]) -> Vec<NamingConflict> {
    let mut order: Vec<String> = Vec::new();
    let mut groups: HashMap<String, Vec<usize>> = HashMap::new();
    for (idx, symbol) in symbols.iter().enumerate() {
        let key = normalized_key(&symbol.name);
        groups
            .entry(key.clone())
            .or_insert_with(|| {
                order.push(key);
                Vec::new()
            })
            .push(idx);
    }

    let mut conflicts = Vec::new();
    for key in order {
        let Some(members) = groups.remove(&key) else {
            continue;
        };
        if members.len() < 2 {
            continue;
        }
        for &idx in &members {
            let others: Vec<String> = members
                .iter()
                .filter(|&&other| other != idx)
                .map(|&other| symbols[other].name.clone())
                .collect();
            symbols[idx].conflicts_with.extend(others);
        }
        conflicts.push(NamingConflict {
            key,
            members: members
                .iter()
                .map(|&idx| ConflictMember {
                    file: symbols[idx].file.clone(),
                    name: symbols[idx].name.clone(),
                })
                .collect(),
        });
    }
    conflicts
}
