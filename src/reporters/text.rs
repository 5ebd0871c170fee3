//! Text (terminal) reporter with colors and formatting

use crate::models::{HealthReport, HealthStatus, Priority};
use anyhow::Result;

/// Status colors (ANSI escape codes)
fn status_color(status: HealthStatus) -> &'static str {
    match status {
        HealthStatus::Excellent => "\x1b[32m", // Green
        HealthStatus::Good => "\x1b[92m",      // Light green
        HealthStatus::Fair => "\x1b[33m",      // Yellow
        HealthStatus::Poor => "\x1b[91m",      // Light red
        HealthStatus::Critical => "\x1b[31m",  // Red
    }
}

const RESET: &str = "\x1b[0m";
const BOLD: &str = "\x1b[1m";
const DIM: &str = "\x1b[2m";

fn priority_tag(priority: Priority) -> &'static str {
    match priority {
        Priority::High => "\x1b[31m[HIGH]\x1b[0m",
        Priority::Medium => "\x1b[33m[MED] \x1b[0m",
    }
}

/// Render report as formatted terminal output
pub fn render(report: &HealthReport) -> Result<String> {
    let mut out = String::new();

    // Header
    let color = status_color(report.overall.status);
    out.push_str(&format!("\n{BOLD}Monorepo Health{RESET}\n"));
    out.push_str(&format!(
        "{DIM}──────────────────────────────────────{RESET}\n"
    ));
    out.push_str(&format!(
        "Overall: {color}{BOLD}{}/100{RESET} ({color}{}{RESET})  Packages: {}  Config: {}/100\n\n",
        report.overall.score,
        report.overall.status,
        report.packages.len(),
        report.config.score
    ));

    // Packages table
    if !report.packages.is_empty() {
        out.push_str(&format!("{BOLD}PACKAGES{RESET}\n"));
        out.push_str(&format!(
            "{DIM}  SCORE  STATUS     PACKAGE{RESET}\n"
        ));
        for (name, record) in &report.packages {
            let c = status_color(record.status);
            out.push_str(&format!(
                "  {c}{:>5}{RESET}  {c}{:<9}{RESET}  {}\n",
                record.score,
                record.status.to_string(),
                name
            ));
            for issue in &record.issues {
                out.push_str(&format!("         {DIM}- {}{RESET}\n", issue));
            }
        }
        out.push('\n');
    }

    // Dependency graph
    let deps = &report.dependencies;
    out.push_str(&format!(
        "{BOLD}DEPENDENCIES{RESET} ({} internal edges)\n",
        deps.graph.edge_count()
    ));
    if deps.issues.is_empty() {
        out.push_str(&format!("  {DIM}No circular dependencies{RESET}\n"));
    } else {
        for issue in &deps.issues {
            out.push_str(&format!("  \x1b[31m{}{RESET}\n", issue));
        }
    }
    if !deps.drift.is_empty() {
        out.push_str(&format!(
            "  {} dependencies declared at different versions\n",
            deps.drift.len()
        ));
    }
    out.push('\n');

    // Workspace config
    if !report.config.issues.is_empty() {
        out.push_str(&format!("{BOLD}WORKSPACE CONFIG{RESET} ({}/100)\n", report.config.score));
        for issue in &report.config.issues {
            out.push_str(&format!("  - {}\n", issue));
        }
        out.push('\n');
    }

    // Performance
    if !report.performance.issues.is_empty() {
        out.push_str(&format!("{BOLD}PERFORMANCE{RESET}\n"));
        for issue in &report.performance.issues {
            out.push_str(&format!("  - {}\n", issue));
        }
        out.push('\n');
    }

    // Recommendations
    if report.recommendations.is_empty() {
        out.push_str(&format!("{DIM}Everything looks healthy. Nothing to recommend.{RESET}\n"));
    } else {
        out.push_str(&format!(
            "{BOLD}RECOMMENDATIONS{RESET} ({})\n",
            report.recommendations.len()
        ));
        for rec in &report.recommendations {
            out.push_str(&format!("  {} {}\n", priority_tag(rec.priority), rec.message));
            for action in &rec.actions {
                out.push_str(&format!("         {DIM}→ {}{RESET}\n", action));
            }
        }
    }

    Ok(out)
}
