//! CLI command definitions and handlers

mod check;
mod drift;
mod graph;
mod init;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use monorepo_health::config::{load_config_file, load_project_config, ProjectConfig};
use std::path::{Path, PathBuf};

/// monorepo-health - dependency graph and health checks for JS/TS workspaces
#[derive(Parser, Debug)]
#[command(name = "monorepo-health")]
#[command(
    version,
    about = "Dependency-graph and health analysis for JavaScript/TypeScript monorepos",
    long_about = "monorepo-health reads every package.json in a pnpm-style workspace, builds the \
internal dependency graph, detects circular dependencies, scores each package against a \
health checklist and turns the results into prioritized recommendations.\n\n\
Run without a subcommand to check the current directory:\n  \
monorepo-health .",
    after_help = "\
Examples:
  monorepo-health .                                 Check current workspace
  monorepo-health check . --format json -o health.json
  monorepo-health check . --signals ci-signals.json --fail-below 70
  monorepo-health graph .                           Show internal dependency tree
  monorepo-health drift . --format json             Version inconsistencies as JSON"
)]
pub struct Cli {
    /// Path to the workspace root (default: current directory)
    #[arg(global = true, default_value = ".")]
    pub path: PathBuf,

    /// Log level (error, warn, info, debug, trace); RUST_LOG overrides
    #[arg(long, global = true, default_value = "warn", value_parser = ["error", "warn", "info", "debug", "trace"])]
    pub log_level: String,

    /// Explicit config file (default: monorepo-health.toml in the workspace)
    #[arg(long, global = true, env = "MONOREPO_HEALTH_CONFIG")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run the full health check (default)
    #[command(after_help = "\
Examples:
  monorepo-health check .                              Terminal report
  monorepo-health check . --format html -o health.html Standalone HTML report
  monorepo-health check . --signals signals.json       Merge CI measurements
  monorepo-health check . --fail-below 80              Exit code 1 if overall < 80")]
    Check {
        /// Output format: text, json, html, markdown (or md)
        #[arg(long, short = 'f', value_parser = ["text", "json", "html", "markdown", "md"])]
        format: Option<String>,

        /// Output file path (default: stdout)
        #[arg(long, short = 'o')]
        output: Option<PathBuf>,

        /// Signals file (JSON or TOML) with coverage, test, bundle, audit and build data
        #[arg(long, short = 's')]
        signals: Option<PathBuf>,

        /// Exit with code 1 if the overall score is below this
        #[arg(long, value_parser = clap::value_parser!(u32).range(0..=100))]
        fail_below: Option<u32>,
    },

    /// Show the internal dependency graph and cycles
    Graph {
        /// Output format: text, json
        #[arg(long, short = 'f', default_value = "text", value_parser = ["text", "json"])]
        format: String,
    },

    /// Show dependencies declared at different versions across packages
    Drift {
        /// Output format: text, json
        #[arg(long, short = 'f', default_value = "text", value_parser = ["text", "json"])]
        format: String,
    },

    /// Write a monorepo-health.toml with the default settings
    Init {
        /// Overwrite an existing config file
        #[arg(long)]
        force: bool,
    },
}

/// Run the CLI
pub fn run(cli: Cli) -> Result<()> {
    let config_path = cli.config.as_deref();
    match cli.command {
        Some(Commands::Check {
            format,
            output,
            signals,
            fail_below,
        }) => check::run(
            &cli.path,
            config_path,
            check::CheckOptions {
                format,
                output,
                signals,
                fail_below,
            },
        ),
        Some(Commands::Graph { format }) => graph::run(&cli.path, config_path, &format),
        Some(Commands::Drift { format }) => drift::run(&cli.path, config_path, &format),
        Some(Commands::Init { force }) => init::run(&cli.path, force),
        None => check::run(&cli.path, config_path, check::CheckOptions::default()),
    }
}

/// Canonical workspace root, which must be an existing directory
fn resolve_workspace(path: &Path) -> Result<PathBuf> {
    let root = path
        .canonicalize()
        .with_context(|| format!("Path does not exist: {}", path.display()))?;
    if !root.is_dir() {
        anyhow::bail!("Path is not a directory: {}", root.display());
    }
    Ok(root)
}

/// Explicit config file when given, otherwise discovered from the workspace
fn load_config(root: &Path, explicit: Option<&Path>) -> Result<ProjectConfig> {
    match explicit {
        Some(path) => load_config_file(path)
            .with_context(|| format!("Failed to load config {}", path.display())),
        None => Ok(load_project_config(root)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_subcommand_defaults_to_check() {
        let cli = Cli::try_parse_from(["monorepo-health", "some/dir"]).expect("parse");
        assert!(cli.command.is_none());
        assert_eq!(cli.path, PathBuf::from("some/dir"));
        assert_eq!(cli.log_level, "warn");
    }

    #[test]
    fn test_check_flags() {
        let cli = Cli::try_parse_from([
            "monorepo-health",
            "check",
            "ws",
            "--format",
            "json",
            "--fail-below",
            "70",
            "--signals",
            "s.json",
        ])
        .expect("parse");
        match cli.command {
            Some(Commands::Check {
                format,
                fail_below,
                signals,
                ..
            }) => {
                assert_eq!(format.as_deref(), Some("json"));
                assert_eq!(fail_below, Some(70));
                assert_eq!(signals, Some(PathBuf::from("s.json")));
            }
            other => panic!("unexpected command: {:?}", other),
        }
        assert_eq!(cli.path, PathBuf::from("ws"));
    }

    #[test]
    fn test_rejects_out_of_range_threshold() {
        assert!(Cli::try_parse_from(["monorepo-health", "check", "--fail-below", "101"]).is_err());
        assert!(Cli::try_parse_from(["monorepo-health", "check", "--format", "sarif"]).is_err());
    }
}
