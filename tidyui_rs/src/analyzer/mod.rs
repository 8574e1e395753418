mod ast_js;
pub mod dead_parrots;
pub mod duplicates;
pub mod exclusions;
pub mod findings;
pub mod output;
pub(crate) mod regexes;
pub mod repeated_blocks;
pub mod runner;
pub mod source_index;
pub mod style_lint;

pub use dead_parrots::{LivenessResult, analyze_liveness};
pub use duplicates::find_duplicate_components;
pub use exclusions::{ExclusionCategory, ExclusionPolicy};
pub use findings::{AnalysisReport, ReportInputs, Summary};
pub use repeated_blocks::find_repeated_blocks;
pub use runner::analyze;
pub use source_index::SourceIndex;
pub use style_lint::lint_styles;
