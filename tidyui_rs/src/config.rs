//! Configuration file support for tidyui.
//!
//! Loads optional `.tidyui/config.toml` from the scanned root. Every value
//! has a default, so an absent file behaves exactly like an empty one.

use std::collections::HashSet;
use std::path::Path;

use serde::Deserialize;
use tracing::warn;

use crate::error::ScanError;
use crate::fs_utils::ScanOptions;
use crate::types::{DEFAULT_DEPENDENCY_DIRS, DEFAULT_EXTENSIONS};

/// Root configuration structure
#[derive(Debug, Default, Clone, Deserialize)]
#[serde(default)]
pub struct TidyConfig {
    pub scan: ScanSection,
    pub duplicates: DuplicateConfig,
    pub blocks: BlockConfig,
    pub exclusions: ExclusionsSection,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ScanSection {
    pub extensions: Vec<String>,
    pub dependency_dirs: Vec<String>,
    /// Worker threads for reading and parsing; 0 means available parallelism.
    pub threads: usize,
}

impl Default for ScanSection {
    fn default() -> Self {
        Self {
            extensions: DEFAULT_EXTENSIONS.iter().map(|s| s.to_string()).collect(),
            dependency_dirs: DEFAULT_DEPENDENCY_DIRS
                .iter()
                .map(|s| s.to_string())
                .collect(),
            threads: 0,
        }
    }
}

/// Duplicate-component tuning.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct DuplicateConfig {
    /// Relative size gap above which two same-key declarations count as diverged.
    pub size_divergence: f64,
    /// Design-system component names offered as replacements.
    pub design_system: Vec<String>,
}

pub const DEFAULT_SIZE_DIVERGENCE: f64 = 0.3;

const DESIGN_SYSTEM_COMPONENTS: &[&str] = &[
    "Button", "Card", "Modal", "Input", "Badge", "Tooltip", "Avatar", "Spinner", "Tabs",
    "Dropdown",
];

impl Default for DuplicateConfig {
    fn default() -> Self {
        Self {
            size_divergence: DEFAULT_SIZE_DIVERGENCE,
            design_system: DESIGN_SYSTEM_COMPONENTS
                .iter()
                .map(|s| s.to_string())
                .collect(),
        }
    }
}

/// Repeated-block tuning.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct BlockConfig {
    /// Lines per sliding window.
    pub window: usize,
    /// Distinct files a block must appear in before it is reported.
    pub min_files: usize,
}

pub const DEFAULT_BLOCK_WINDOW: usize = 5;
pub const DEFAULT_BLOCK_MIN_FILES: usize = 3;
/// A repeated block has to span at least two files.
pub const MIN_BLOCK_FILES: usize = 2;

impl Default for BlockConfig {
    fn default() -> Self {
        Self {
            window: DEFAULT_BLOCK_WINDOW,
            min_files: DEFAULT_BLOCK_MIN_FILES,
        }
    }
}

impl BlockConfig {
    /// Raises values that would make the detector meaningless.
    fn clamped(mut self, origin: &Path) -> Self {
        if self.min_files < MIN_BLOCK_FILES {
            warn!(
                "{}: blocks.min_files = {} is below {}, using {}",
                origin.display(),
                self.min_files,
                MIN_BLOCK_FILES,
                MIN_BLOCK_FILES
            );
            self.min_files = MIN_BLOCK_FILES;
        }
        if self.window == 0 {
            warn!(
                "{}: blocks.window = 0, using {}",
                origin.display(),
                DEFAULT_BLOCK_WINDOW
            );
            self.window = DEFAULT_BLOCK_WINDOW;
        }
        self
    }
}

/// Extra path patterns appended to the built-in exclusion tables.
#[derive(Debug, Default, Clone, Deserialize)]
#[serde(default)]
pub struct ExclusionsSection {
    pub effects: Vec<String>,
    pub duplicate_components: Vec<String>,
    pub hardcoded_color: Vec<String>,
    pub hardcoded_opacity: Vec<String>,
    pub hardcoded_spacing: Vec<String>,
    pub utility_classes: Vec<String>,
    pub repeated_blocks: Vec<String>,
    /// Extra class names accepted as theme classes.
    pub theme_classes: Vec<String>,
}

impl TidyConfig {
    /// Load config from `.tidyui/config.toml` in the given root directory.
    /// Returns default config if file doesn't exist or is invalid.
    pub fn load(root: &Path) -> Self {
        let config_path = root.join(".tidyui").join("config.toml");
        Self::load_from_path(&config_path)
    }

    /// Load config from a specific path.
    pub fn load_from_path(path: &Path) -> Self {
        if !path.exists() {
            return Self::default();
        }

        match std::fs::read_to_string(path) {
            Ok(content) => match toml::from_str::<Self>(&content) {
                Ok(config) => config.validated(path),
                Err(e) => {
                    warn!("failed to parse {}: {}", path.display(), e);
                    Self::default()
                }
            },
            Err(e) => {
                warn!("failed to read {}: {}", path.display(), e);
                Self::default()
            }
        }
    }

    /// Load a config the user pointed at explicitly; here a missing or broken
    /// file is an error rather than a silent fallback.
    pub fn load_explicit(path: &Path) -> Result<Self, ScanError> {
        let content = std::fs::read_to_string(path).map_err(|e| ScanError::Config {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        let config: Self = toml::from_str(&content).map_err(|e| ScanError::Config {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        Ok(config.validated(path))
    }

    fn validated(mut self, origin: &Path) -> Self {
        self.blocks = self.blocks.clamped(origin);
        self
    }

    pub fn scan_options(&self) -> ScanOptions {
        let lower = |items: &[String]| -> HashSet<String> {
            items
                .iter()
                .map(|s| s.trim_start_matches('.').to_lowercase())
                .collect()
        };
        ScanOptions {
            extensions: lower(&self.scan.extensions),
            dependency_dirs: self.scan.dependency_dirs.iter().cloned().collect(),
        }
    }

    pub fn threads(&self) -> usize {
        if self.scan.threads > 0 {
            return self.scan.threads;
        }
        std::thread::available_parallelism()
            .map(|n| n.get())
            .unwrap_or(1)
    }
}
