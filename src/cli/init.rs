//! Init command - write a default monorepo-health.toml

use anyhow::{Context, Result};
use console::style;
use monorepo_health::config::CONFIG_FILE_NAME;
use std::path::Path;

const DEFAULT_CONFIG: &str = r#"# monorepo-health configuration

[workspace]
# Explicit package directories. Empty = read pnpm-workspace.yaml,
# then fall back to every directory under package_dirs.
members = []
package_dirs = ["packages"]

[scoring]
# package.json fields and scripts every package must have
required_fields = ["name", "version", "description", "main", "types"]
required_scripts = ["build", "test", "lint", "typecheck"]

# Points deducted per failed check
missing_field = 5
missing_script = 5
missing_tsconfig = 10
missing_src = 15
missing_tests = 10
missing_readme = 5
tests_failed = 15

# Coverage below target costs round((target - coverage) / 2)
coverage_target = 80.0

bundle_limit_kb = 50.0
bundle_penalty = 5

outdated_per_dep = 2
outdated_cap = 10
vulnerability_per_item = 5
vulnerability_cap = 20

[graph]
# Cap on enumerated cycles longer than two packages
max_cycles = 100

[performance]
# Builds slower than this are reported (milliseconds)
slow_build_ms = 30000

[defaults]
# format = "text"
# signals = "health-signals.json"
# fail_below = 70
"#;

pub fn run(path: &Path, force: bool) -> Result<()> {
    let root = super::resolve_workspace(path)?;
    let config_path = root.join(CONFIG_FILE_NAME);

    if config_path.exists() && !force {
        println!(
            "{} Already initialized at {} (use --force to overwrite)",
            style("✓").green(),
            style(config_path.display()).cyan()
        );
        return Ok(());
    }

    std::fs::write(&config_path, DEFAULT_CONFIG)
        .with_context(|| format!("Failed to write {}", config_path.display()))?;
    println!(
        "{} Created {}",
        style("✓").green(),
        style(config_path.display()).cyan()
    );

    println!("\nNext steps:");
    println!("  {} Run the health check", style("monorepo-health check .").cyan());
    println!("  {} Inspect the dependency graph", style("monorepo-health graph .").cyan());

    Ok(())
}
