//! Markdown reporter for GitHub-flavored Markdown output
//!
//! Generates reports suitable for pull request comments and CI summaries.

use crate::models::{HealthReport, HealthStatus, Priority, StatusSummary};
use anyhow::Result;

/// Render report as GitHub-flavored Markdown
pub fn render(report: &HealthReport) -> Result<String> {
    let mut md = String::new();

    md.push_str(&render_header(report));
    md.push('\n');

    md.push_str(&render_summary(report));
    md.push('\n');

    md.push_str(&render_packages(report));
    md.push('\n');

    md.push_str(&render_dependencies(report));
    md.push('\n');

    md.push_str(&render_recommendations(report));
    md.push('\n');

    md.push_str(&render_footer());

    Ok(md)
}

fn render_header(report: &HealthReport) -> String {
    format!(
        r#"# {} Monorepo Health Report

**Overall: {}/100** ({})

Generated: {}
"#,
        status_emoji(report.overall.status),
        report.overall.score,
        report.overall.status,
        report.timestamp
    )
}

fn render_summary(report: &HealthReport) -> String {
    let s = StatusSummary::from_records(report.packages.values());
    format!(
        r#"## Summary

| Metric | Value |
|--------|-------|
| **Packages** | {} |
| **Excellent / Good / Fair / Poor / Critical** | {} / {} / {} / {} / {} |
| **Package Issues** | {} |
| **Circular Dependencies** | {} |
| **Workspace Config** | {}/100 |
"#,
        report.packages.len(),
        s.excellent,
        s.good,
        s.fair,
        s.poor,
        s.critical,
        s.total_issues,
        report.dependencies.cycles.len(),
        report.config.score
    )
}

fn render_packages(report: &HealthReport) -> String {
    let mut md = String::from("## Packages\n\n");
    if report.packages.is_empty() {
        md.push_str("_No packages found._\n");
        return md;
    }

    md.push_str("| Package | Score | Status | Issues |\n");
    md.push_str("|---------|-------|--------|--------|\n");
    for (name, record) in &report.packages {
        let issues = if record.issues.is_empty() {
            "-".to_string()
        } else {
            record
                .issues
                .iter()
                .map(|i| escape_cell(i))
                .collect::<Vec<_>>()
                .join("<br>")
        };
        md.push_str(&format!(
            "| `{}` | {} | {} {} | {} |\n",
            name,
            record.score,
            status_emoji(record.status),
            record.status,
            issues
        ));
    }
    md
}

fn render_dependencies(report: &HealthReport) -> String {
    let deps = &report.dependencies;
    let mut md = String::from("## Dependencies\n\n");

    if deps.issues.is_empty() {
        md.push_str("No circular dependencies.\n");
    } else {
        for issue in &deps.issues {
            md.push_str(&format!("- {}\n", issue));
        }
    }

    if !deps.drift.is_empty() {
        md.push_str("\n### Version Drift\n\n");
        md.push_str("| Dependency | Versions |\n");
        md.push_str("|------------|----------|\n");
        for drift in &deps.drift {
            let versions = drift
                .versions
                .iter()
                .map(|v| format!("`{}`: {}", v.package, escape_cell(&v.version)))
                .collect::<Vec<_>>()
                .join("<br>");
            md.push_str(&format!("| `{}` | {} |\n", drift.dependency, versions));
        }
    }
    md
}

fn render_recommendations(report: &HealthReport) -> String {
    let mut md = String::from("## Recommendations\n\n");
    if report.recommendations.is_empty() {
        md.push_str("Nothing to recommend.\n");
        return md;
    }

    for rec in &report.recommendations {
        let badge = match rec.priority {
            Priority::High => "🔴 high",
            Priority::Medium => "🟡 medium",
        };
        md.push_str(&format!("### {} ({}, {})\n\n", rec.message, rec.kind, badge));
        for action in &rec.actions {
            md.push_str(&format!("- {}\n", action));
        }
        md.push('\n');
    }
    md
}

fn render_footer() -> String {
    "---\n\n_Generated by monorepo-health_\n".to_string()
}

fn status_emoji(status: HealthStatus) -> &'static str {
    match status {
        HealthStatus::Excellent => "🟢",
        HealthStatus::Good => "🟢",
        HealthStatus::Fair => "🟡",
        HealthStatus::Poor => "🟠",
        HealthStatus::Critical => "🔴",
    }
}

fn escape_cell(s: &str) -> String {
    s.replace('|', "\\|")
}
