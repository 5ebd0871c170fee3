//! Configuration module for monorepo-health
//!
//! This module handles:
//! - Project-level configuration (monorepo-health.toml)
//! - Workspace member discovery overrides
//! - Scoring checklist weights
//! - CLI defaults

mod project_config;

pub use project_config::{
    load_config_file, load_project_config, CliDefaults, GraphConfig, PerformanceConfig,
    ProjectConfig, ScoringConfig, WorkspaceConfig, CONFIG_FILE_NAME,
};
