//! Check command - full health analysis

use anyhow::{Context, Result};
use console::style;
use monorepo_health::pipeline;
use monorepo_health::reporters::{self, OutputFormat};
use std::path::{Path, PathBuf};
use std::str::FromStr;
use tracing::debug;

#[derive(Debug, Default)]
pub struct CheckOptions {
    pub format: Option<String>,
    pub output: Option<PathBuf>,
    pub signals: Option<PathBuf>,
    pub fail_below: Option<u32>,
}

pub fn run(path: &Path, config_path: Option<&Path>, opts: CheckOptions) -> Result<()> {
    let root = super::resolve_workspace(path)?;
    let config = super::load_config(&root, config_path)?;

    // CLI flags win over [defaults] in the project config
    let format = opts
        .format
        .or_else(|| config.defaults.format.clone())
        .unwrap_or_else(|| "text".to_string());
    let format = OutputFormat::from_str(&format)?;
    let signals = opts
        .signals
        .or_else(|| config.defaults.signals.as_ref().map(|s| root.join(s)));
    let fail_below = opts.fail_below.or(config.defaults.fail_below);

    debug!(
        "Checking {} (format: {}, signals: {:?})",
        root.display(),
        format,
        signals
    );

    let report = pipeline::analyze(&root, &config, signals.as_deref())
        .with_context(|| format!("Health check failed for {}", root.display()))?;
    let output = reporters::report_with_format(&report, format)?;

    match &opts.output {
        Some(out_path) => {
            std::fs::write(out_path, &output)
                .with_context(|| format!("Failed to write {}", out_path.display()))?;
            eprintln!(
                "{} Report written to: {}",
                style("✓").green(),
                style(out_path.display()).cyan()
            );
        }
        None => println!("{}", output),
    }

    if let Some(threshold) = fail_below {
        if report.overall.score < threshold {
            eprintln!(
                "{} Overall score {} is below --fail-below={}",
                style("✗").red(),
                report.overall.score,
                threshold
            );
            std::process::exit(1);
        }
    }

    Ok(())
}
