//! Project-level configuration support
//!
//! Loads per-workspace configuration from `monorepo-health.toml` or
//! `.monorepo-healthrc.json` in the workspace root.
//!
//! # Configuration Format
//!
//! ```toml
//! # monorepo-health.toml
//!
//! [workspace]
//! members = ["packages/core", "packages/ui"]
//! package_dirs = ["packages"]
//!
//! [scoring]
//! required_scripts = ["build", "test", "lint"]
//! missing_script = 3
//! coverage_target = 85.0
//!
//! [graph]
//! max_cycles = 50
//!
//! [performance]
//! slow_build_ms = 20000
//!
//! [defaults]
//! format = "json"
//! fail_below = 70
//! ```

use crate::error::{HealthError, Result};
use serde::Deserialize;
use std::path::Path;
use tracing::{debug, warn};

pub const CONFIG_FILE_NAME: &str = "monorepo-health.toml";
const JSON_CONFIG_FILE_NAME: &str = ".monorepo-healthrc.json";

/// Project-level configuration loaded from monorepo-health.toml or similar
#[derive(Debug, Clone, Deserialize, Default)]
pub struct ProjectConfig {
    /// Where workspace packages live
    #[serde(default)]
    pub workspace: WorkspaceConfig,

    /// Package health checklist weights
    #[serde(default)]
    pub scoring: ScoringConfig,

    /// Dependency graph analysis options
    #[serde(default)]
    pub graph: GraphConfig,

    /// Build timing thresholds
    #[serde(default)]
    pub performance: PerformanceConfig,

    /// Default CLI flags
    #[serde(default)]
    pub defaults: CliDefaults,
}

/// Workspace member discovery
#[derive(Debug, Clone, Deserialize)]
pub struct WorkspaceConfig {
    /// Explicit package directories, relative to the workspace root.
    /// When empty, members come from pnpm-workspace.yaml or `package_dirs`.
    #[serde(default)]
    pub members: Vec<String>,

    /// Directories whose immediate children are packages (fallback discovery)
    #[serde(default = "default_package_dirs")]
    pub package_dirs: Vec<String>,
}

impl Default for WorkspaceConfig {
    fn default() -> Self {
        Self {
            members: Vec::new(),
            package_dirs: default_package_dirs(),
        }
    }
}

fn default_package_dirs() -> Vec<String> {
    vec!["packages".to_string()]
}

/// Deduction weights for the unified package checklist
#[derive(Debug, Clone, Deserialize)]
pub struct ScoringConfig {
    /// package.json fields that must be present and non-empty
    #[serde(default = "default_required_fields")]
    pub required_fields: Vec<String>,

    /// Scripts every package must define
    #[serde(default = "default_required_scripts")]
    pub required_scripts: Vec<String>,

    #[serde(default = "default_missing_field")]
    pub missing_field: u32,
    #[serde(default = "default_missing_script")]
    pub missing_script: u32,
    #[serde(default = "default_missing_tsconfig")]
    pub missing_tsconfig: u32,
    #[serde(default = "default_missing_src")]
    pub missing_src: u32,
    #[serde(default = "default_missing_tests")]
    pub missing_tests: u32,
    #[serde(default = "default_missing_readme")]
    pub missing_readme: u32,
    #[serde(default = "default_tests_failed")]
    pub tests_failed: u32,

    /// Coverage percentage below which points are deducted
    #[serde(default = "default_coverage_target")]
    pub coverage_target: f64,

    /// Bundle size limit in KB
    #[serde(default = "default_bundle_limit_kb")]
    pub bundle_limit_kb: f64,
    #[serde(default = "default_bundle_penalty")]
    pub bundle_penalty: u32,

    #[serde(default = "default_outdated_per_dep")]
    pub outdated_per_dep: u32,
    #[serde(default = "default_outdated_cap")]
    pub outdated_cap: u32,

    #[serde(default = "default_vulnerability_per_item")]
    pub vulnerability_per_item: u32,
    #[serde(default = "default_vulnerability_cap")]
    pub vulnerability_cap: u32,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            required_fields: default_required_fields(),
            required_scripts: default_required_scripts(),
            missing_field: default_missing_field(),
            missing_script: default_missing_script(),
            missing_tsconfig: default_missing_tsconfig(),
            missing_src: default_missing_src(),
            missing_tests: default_missing_tests(),
            missing_readme: default_missing_readme(),
            tests_failed: default_tests_failed(),
            coverage_target: default_coverage_target(),
            bundle_limit_kb: default_bundle_limit_kb(),
            bundle_penalty: default_bundle_penalty(),
            outdated_per_dep: default_outdated_per_dep(),
            outdated_cap: default_outdated_cap(),
            vulnerability_per_item: default_vulnerability_per_item(),
            vulnerability_cap: default_vulnerability_cap(),
        }
    }
}

fn default_required_fields() -> Vec<String> {
    ["name", "version", "description", "main", "types"]
        .iter()
        .map(|s| s.to_string())
        .collect()
}
fn default_required_scripts() -> Vec<String> {
    ["build", "test", "lint", "typecheck"]
        .iter()
        .map(|s| s.to_string())
        .collect()
}
fn default_missing_field() -> u32 {
    5
}
fn default_missing_script() -> u32 {
    5
}
fn default_missing_tsconfig() -> u32 {
    10
}
fn default_missing_src() -> u32 {
    15
}
fn default_missing_tests() -> u32 {
    10
}
fn default_missing_readme() -> u32 {
    5
}
fn default_tests_failed() -> u32 {
    15
}
fn default_coverage_target() -> f64 {
    80.0
}
fn default_bundle_limit_kb() -> f64 {
    50.0
}
fn default_bundle_penalty() -> u32 {
    5
}
fn default_outdated_per_dep() -> u32 {
    2
}
fn default_outdated_cap() -> u32 {
    10
}
fn default_vulnerability_per_item() -> u32 {
    5
}
fn default_vulnerability_cap() -> u32 {
    20
}

/// Dependency graph options
#[derive(Debug, Clone, Deserialize)]
pub struct GraphConfig {
    /// Cap on enumerated cycles longer than two packages
    #[serde(default = "default_max_cycles")]
    pub max_cycles: usize,
}

impl Default for GraphConfig {
    fn default() -> Self {
        Self {
            max_cycles: default_max_cycles(),
        }
    }
}

fn default_max_cycles() -> usize {
    crate::graph::DEFAULT_MAX_CYCLES
}

/// Build timing thresholds
#[derive(Debug, Clone, Deserialize)]
pub struct PerformanceConfig {
    /// Builds slower than this are reported (milliseconds)
    #[serde(default = "default_slow_build_ms")]
    pub slow_build_ms: u64,
}

impl Default for PerformanceConfig {
    fn default() -> Self {
        Self {
            slow_build_ms: default_slow_build_ms(),
        }
    }
}

fn default_slow_build_ms() -> u64 {
    30_000
}

/// Default CLI flags that can be set in project config
#[derive(Debug, Clone, Deserialize, Default)]
pub struct CliDefaults {
    /// Default output format (text, json, markdown, html)
    #[serde(default)]
    pub format: Option<String>,

    /// Default signals file, relative to the workspace root
    #[serde(default)]
    pub signals: Option<String>,

    /// Exit non-zero when the overall score is below this
    #[serde(default)]
    pub fail_below: Option<u32>,
}

/// Load project configuration from the workspace root.
///
/// Searches for configuration files in this order:
/// 1. `monorepo-health.toml`
/// 2. `.monorepo-healthrc.json`
///
/// Returns default configuration if no config file is found or the file
/// cannot be parsed (a warning is logged).
pub fn load_project_config(repo_path: &Path) -> ProjectConfig {
    for name in [CONFIG_FILE_NAME, JSON_CONFIG_FILE_NAME] {
        let path = repo_path.join(name);
        if !path.exists() {
            continue;
        }
        match load_config_file(&path) {
            Ok(config) => {
                debug!("Loaded project config from {}", path.display());
                return config;
            }
            Err(e) => {
                warn!("{}", e);
            }
        }
    }

    debug!("No project config found, using defaults");
    ProjectConfig::default()
}

/// Load a config file explicitly; format chosen by extension
pub fn load_config_file(path: &Path) -> Result<ProjectConfig> {
    let content = std::fs::read_to_string(path).map_err(|e| HealthError::io(path, e))?;
    let is_json = path.extension().is_some_and(|ext| ext == "json");

    let parsed = if is_json {
        serde_json::from_str::<ProjectConfig>(&content).map_err(|e| e.to_string())
    } else {
        toml::from_str::<ProjectConfig>(&content).map_err(|e| e.to_string())
    };

    parsed.map_err(|message| HealthError::Config {
        path: path.to_path_buf(),
        message,
    })
}
