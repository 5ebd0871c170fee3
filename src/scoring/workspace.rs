//! Workspace configuration and overall scores

use crate::models::{ConfigHealth, HealthStatus, OverallHealth};
use crate::signals::WorkspaceSignals;

/// Score root tooling configuration
pub fn score_workspace(signals: &WorkspaceSignals) -> ConfigHealth {
    let checks: [(bool, &str, u32); 6] = [
        (signals.pnpm_workspace, "Missing pnpm-workspace.yaml", 20),
        (signals.nx, "Missing nx.json", 10),
        (signals.ci_workflow, "Missing CI workflow", 15),
        (signals.changesets, "Changesets not configured", 10),
        (signals.eslint, "ESLint not configured", 10),
        (signals.root_tsconfig, "Root TypeScript config missing", 10),
    ];

    let mut health = ConfigHealth::default();
    for (present, issue, points) in checks {
        if !present {
            health.issues.push(issue.to_string());
            health.score = health.score.saturating_sub(points);
        }
    }
    health
}

/// Rounded mean of every score; 100 when there is nothing to average
pub fn overall(scores: &[u32]) -> OverallHealth {
    let score = if scores.is_empty() {
        100
    } else {
        let sum: u64 = scores.iter().map(|&s| u64::from(s)).sum();
        (sum as f64 / scores.len() as f64).round() as u32
    };
    OverallHealth {
        score,
        status: HealthStatus::from_score(score),
    }
}
