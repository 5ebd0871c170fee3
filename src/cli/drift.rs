//! Drift command - version inconsistencies across packages

use anyhow::Result;
use console::style;
use monorepo_health::drift::find_version_drift;
use monorepo_health::loader::load_workspace;
use std::path::Path;

pub fn run(path: &Path, config_path: Option<&Path>, format: &str) -> Result<()> {
    let root = super::resolve_workspace(path)?;
    let config = super::load_config(&root, config_path)?;

    let packages = load_workspace(&root, &config.workspace)?;
    let descriptors: Vec<_> = packages.iter().map(|p| p.descriptor.clone()).collect();
    let drift = find_version_drift(&descriptors);

    if format == "json" {
        println!("{}", serde_json::to_string_pretty(&drift)?);
        return Ok(());
    }

    if drift.is_empty() {
        println!(
            "{} All shared dependencies use the same version",
            style("✓").green()
        );
        return Ok(());
    }

    println!(
        "\n{} Found {} inconsistencies:\n",
        style("!").yellow().bold(),
        drift.len()
    );
    for entry in &drift {
        println!("{}", style(&entry.dependency).cyan().bold());
        for declared in &entry.versions {
            println!("  {}: {}", declared.package, style(&declared.version).yellow());
        }
        println!();
    }

    Ok(())
}
