//! HTML reporter with embedded styles
//!
//! Generates a standalone HTML report that can be viewed in any browser:
//! overall score badge, per-package score bars, cycles, drift and
//! recommendations.

use crate::models::{HealthReport, HealthStatus, Priority};
use anyhow::Result;

/// Render report as standalone HTML
pub fn render(report: &HealthReport) -> Result<String> {
    let mut html = String::new();

    html.push_str(&render_head(report));
    html.push_str("<body>\n<div class=\"container\">\n");
    html.push_str(&render_header(report));

    html.push_str("<div class=\"content\">\n");
    html.push_str(&render_score_section(report));
    html.push_str(&render_packages(report));
    html.push_str(&render_dependencies(report));
    html.push_str(&render_recommendations(report));
    html.push_str("</div>\n"); // content

    html.push_str(&render_footer());
    html.push_str("</div>\n</body>\n</html>");

    Ok(html)
}

fn render_head(report: &HealthReport) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>Monorepo Health - {}/100</title>
    <style>
{CSS}
    </style>
</head>
"#,
        report.overall.score
    )
}

fn render_header(report: &HealthReport) -> String {
    format!(
        r#"<div class="header">
    <h1>Monorepo Health Report</h1>
    <p class="timestamp">Generated {}</p>
</div>
"#,
        html_escape(&report.timestamp)
    )
}

fn render_score_section(report: &HealthReport) -> String {
    format!(
        r#"<div class="score-section">
    <div class="score-badge status-{}">{}</div>
    <div class="score">Overall: {}</div>
    <p class="score-description">{} packages, workspace config {}/100</p>
</div>
"#,
        report.overall.status,
        report.overall.score,
        report.overall.status,
        report.packages.len(),
        report.config.score
    )
}

fn render_packages(report: &HealthReport) -> String {
    let mut html = String::from(
        "<div class=\"section\">\n    <h2 class=\"section-title\">Packages</h2>\n    <div class=\"metrics-grid\">\n",
    );
    for (name, record) in &report.packages {
        let issues: String = record
            .issues
            .iter()
            .map(|i| format!("                <li>{}</li>\n", html_escape(i)))
            .collect();
        html.push_str(&format!(
            r#"        <div class="metric-card">
            <h3>{}</h3>
            <div class="metric-value">{}</div>
            <div class="metric-bar">
                <div class="metric-bar-fill {}" style="width: {}%"></div>
            </div>
            <ul class="issues">
{}            </ul>
        </div>
"#,
            html_escape(name),
            record.score,
            bar_class(record.status),
            record.score,
            issues
        ));
    }
    html.push_str("    </div>\n</div>\n");
    html
}

fn render_dependencies(report: &HealthReport) -> String {
    let deps = &report.dependencies;
    let mut html = String::from(
        "<div class=\"section\">\n    <h2 class=\"section-title\">Dependencies</h2>\n",
    );

    if deps.issues.is_empty() {
        html.push_str("    <p class=\"ok\">No circular dependencies.</p>\n");
    } else {
        html.push_str("    <ul class=\"cycles\">\n");
        for issue in &deps.issues {
            html.push_str(&format!("        <li>{}</li>\n", html_escape(issue)));
        }
        html.push_str("    </ul>\n");
    }
    if deps.cycles_truncated {
        html.push_str(
            "    <p class=\"muted\">Cycle list capped; raise graph.max_cycles to see more.</p>\n",
        );
    }

    if !deps.drift.is_empty() {
        html.push_str("    <h3>Version drift</h3>\n    <table>\n");
        html.push_str("        <tr><th>Dependency</th><th>Package</th><th>Version</th></tr>\n");
        for drift in &deps.drift {
            for v in &drift.versions {
                html.push_str(&format!(
                    "        <tr><td>{}</td><td>{}</td><td><code>{}</code></td></tr>\n",
                    html_escape(&drift.dependency),
                    html_escape(&v.package),
                    html_escape(&v.version)
                ));
            }
        }
        html.push_str("    </table>\n");
    }

    html.push_str("</div>\n");
    html
}

fn render_recommendations(report: &HealthReport) -> String {
    let mut html = String::from(
        "<div class=\"section\">\n    <h2 class=\"section-title\">Recommendations</h2>\n",
    );
    if report.recommendations.is_empty() {
        html.push_str("    <p class=\"ok\">Nothing to recommend.</p>\n</div>\n");
        return html;
    }

    html.push_str("    <div class=\"recommendation-list\">\n");
    for rec in &report.recommendations {
        let priority_class = match rec.priority {
            Priority::High => "priority-high",
            Priority::Medium => "priority-medium",
        };
        let actions: String = rec
            .actions
            .iter()
            .map(|a| format!("                <li>{}</li>\n", html_escape(a)))
            .collect();
        html.push_str(&format!(
            r#"        <div class="recommendation-card">
            <div class="recommendation-header">
                <span class="priority-badge {}">{}</span>
                <span class="kind-badge">{}</span>
                <span class="recommendation-title">{}</span>
            </div>
            <ul class="actions">
{}            </ul>
        </div>
"#,
            priority_class,
            rec.priority,
            rec.kind,
            html_escape(&rec.message),
            actions
        ));
    }
    html.push_str("    </div>\n</div>\n");
    html
}

fn render_footer() -> String {
    r#"<div class="footer">
    <p>Generated by monorepo-health</p>
</div>
"#
    .to_string()
}

fn bar_class(status: HealthStatus) -> &'static str {
    match status {
        HealthStatus::Excellent | HealthStatus::Good => "bar-good",
        HealthStatus::Fair | HealthStatus::Poor => "bar-moderate",
        HealthStatus::Critical => "bar-poor",
    }
}

fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

// Embedded CSS
const CSS: &str = r#"
:root {
    --primary-color: #0f766e;
    --background-color: #f8fafc;
    --text-color: #1e293b;
    --card-background: white;
    --border-color: #e2e8f0;
}

* { margin: 0; padding: 0; box-sizing: border-box; }

body {
    font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', Roboto, sans-serif;
    line-height: 1.6;
    color: var(--text-color);
    background: var(--background-color);
    padding: 2rem;
}

.container {
    max-width: 1100px;
    margin: 0 auto;
    background: var(--card-background);
    border-radius: 12px;
    box-shadow: 0 4px 6px -1px rgba(0,0,0,0.1);
    overflow: hidden;
}

.header {
    background: linear-gradient(135deg, #0f766e 0%, #0e7490 100%);
    color: white;
    padding: 2.5rem 2rem;
    text-align: center;
}

.header h1 { font-size: 2.25rem; margin-bottom: 0.5rem; }
.header .timestamp { opacity: 0.9; font-size: 0.95rem; }

.content { padding: 2rem; }

.score-section {
    text-align: center;
    padding: 2rem;
    background: #f1f5f9;
    border-radius: 8px;
    margin-bottom: 2rem;
}

.score-badge {
    display: inline-block;
    font-size: 3rem;
    font-weight: bold;
    width: 120px;
    height: 120px;
    line-height: 120px;
    border-radius: 50%;
    margin-bottom: 1rem;
    color: white;
}

.status-excellent { background: #10b981; }
.status-good { background: #22c55e; }
.status-fair { background: #eab308; }
.status-poor { background: #f97316; }
.status-critical { background: #ef4444; }

.score { font-size: 1.5rem; color: #64748b; text-transform: capitalize; }
.score-description { color: #64748b; font-style: italic; }

.section { margin-bottom: 2rem; }
.section-title {
    font-size: 1.5rem;
    margin-bottom: 1rem;
    padding-bottom: 0.5rem;
    border-bottom: 2px solid var(--border-color);
}

.metrics-grid {
    display: grid;
    grid-template-columns: repeat(auto-fit, minmax(240px, 1fr));
    gap: 1rem;
}

.metric-card {
    border: 1px solid var(--border-color);
    border-radius: 8px;
    padding: 1.25rem;
}

.metric-card h3 { font-size: 0.95rem; font-family: monospace; margin-bottom: 0.5rem; }
.metric-value { font-size: 2rem; font-weight: bold; margin-bottom: 0.5rem; }

.metric-bar {
    height: 8px;
    background: #e2e8f0;
    border-radius: 4px;
    overflow: hidden;
    margin-bottom: 0.75rem;
}

.metric-bar-fill { height: 100%; border-radius: 4px; }
.bar-good { background: #10b981; }
.bar-moderate { background: #f59e0b; }
.bar-poor { background: #ef4444; }

.issues, .actions, .cycles { padding-left: 1.25rem; color: #64748b; font-size: 0.875rem; }
.ok { color: #059669; }
.muted { color: #94a3b8; font-size: 0.8rem; }

table { border-collapse: collapse; width: 100%; margin-top: 0.5rem; }
th, td { text-align: left; padding: 0.5rem; border-bottom: 1px solid var(--border-color); }

.recommendation-list { display: flex; flex-direction: column; gap: 1rem; }

.recommendation-card {
    border: 1px solid var(--border-color);
    border-radius: 8px;
    padding: 1rem;
}

.recommendation-header {
    display: flex;
    align-items: center;
    gap: 0.75rem;
    flex-wrap: wrap;
    margin-bottom: 0.5rem;
}

.priority-badge {
    padding: 0.25rem 0.75rem;
    border-radius: 6px;
    font-size: 0.875rem;
    font-weight: 600;
    color: white;
}

.priority-high { background: #dc2626; }
.priority-medium { background: #ca8a04; }

.kind-badge {
    background: #ccfbf1;
    color: #0f766e;
    padding: 0.25rem 0.75rem;
    border-radius: 6px;
    font-size: 0.875rem;
}

.recommendation-title { flex: 1; font-weight: 600; }

.footer {
    text-align: center;
    padding: 2rem;
    color: #64748b;
    border-top: 1px solid var(--border-color);
}

@media print {
    body { padding: 0; background: white; }
    .container { box-shadow: none; }
    .recommendation-card { page-break-inside: avoid; }
}
"#;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reporters::tests::test_report;

    #[test]
    fn test_html_is_standalone_document() {
        let html = render(&test_report()).expect("render html");
        assert!(html.starts_with("<!DOCTYPE html>"));
        assert!(html.ends_with("</html>"));
        assert!(html.contains("<style>"));
    }

    #[test]
    fn test_html_escapes_content() {
        let html = render(&test_report()).expect("render html");
        assert!(html.contains("@x/a &lt;-&gt; @x/b"));
        assert!(!html.contains("@x/a <-> @x/b"));
    }

    #[test]
    fn test_html_notes_capped_cycles() {
        let mut report = test_report();
        assert!(!render(&report).expect("render html").contains("Cycle list capped"));
        report.dependencies.cycles_truncated = true;
        assert!(render(&report).expect("render html").contains("Cycle list capped"));
    }

    #[test]
    fn test_html_priority_badges() {
        let html = render(&test_report()).expect("render html");
        assert!(html.contains("priority-high"));
        assert!(html.contains("status-critical"));
    }
}
