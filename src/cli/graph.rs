//! Graph command - print the internal dependency tree

use anyhow::Result;
use console::style;
use monorepo_health::graph::{self, CycleReport, DependencyGraph};
use monorepo_health::loader::load_workspace;
use serde::Serialize;
use std::path::Path;

#[derive(Serialize)]
struct GraphOutput<'a> {
    graph: &'a DependencyGraph,
    cycles: &'a CycleReport,
    issues: Vec<String>,
}

pub fn run(path: &Path, config_path: Option<&Path>, format: &str) -> Result<()> {
    let root = super::resolve_workspace(path)?;
    let config = super::load_config(&root, config_path)?;

    let packages = load_workspace(&root, &config.workspace)?;
    let descriptors: Vec<_> = packages.iter().map(|p| p.descriptor.clone()).collect();
    let (dep_graph, cycles) = graph::build_with_limit(&descriptors, config.graph.max_cycles);

    if format == "json" {
        let out = GraphOutput {
            graph: &dep_graph,
            cycles: &cycles,
            issues: cycles.issues(),
        };
        println!("{}", serde_json::to_string_pretty(&out)?);
        return Ok(());
    }

    println!(
        "\n{} Dependency graph ({} packages, {} internal edges)\n",
        style("▸").bold(),
        dep_graph.node_count(),
        dep_graph.edge_count()
    );
    for name in dep_graph.nodes() {
        println!("{}", style(name).cyan());
        let deps: Vec<&str> = dep_graph.dependencies_of(name).collect();
        if deps.is_empty() {
            println!("  {}", style("(no internal dependencies)").dim());
        }
        for dep in deps {
            let marker = if cycles.on_cycle(name, dep) {
                style("↻").red()
            } else {
                style("→").dim()
            };
            println!("  {} {}", marker, dep);
        }
    }

    println!();
    if cycles.is_empty() {
        println!("{} No circular dependencies", style("✓").green());
    } else {
        println!(
            "{} {} circular dependencies{}",
            style("✗").red(),
            cycles.len(),
            if cycles.truncated { " (enumeration capped)" } else { "" }
        );
        for issue in cycles.issues() {
            println!("  {}", issue);
        }
    }

    Ok(())
}
