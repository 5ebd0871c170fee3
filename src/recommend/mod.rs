//! Recommendation aggregation
//!
//! Turns scored packages, detected cycles and performance findings into a
//! flat list of actionable recommendations:
//!
//! - one `package` recommendation per package scoring below 80 (high below 60)
//! - a single high-priority `architecture` recommendation when any cycle exists
//! - a single medium-priority `performance` recommendation for build findings
//!
//! Emission order is package, architecture, performance; use
//! [`sort_by_priority`] to put high-priority items first.

use crate::graph::{Cycle, CycleReport};
use crate::models::{HealthRecord, Priority, Recommendation, RecommendationKind};
use std::collections::BTreeMap;

/// Packages scoring below this get a recommendation
pub const ATTENTION_THRESHOLD: u32 = 80;
/// Below this the recommendation is high priority
pub const HIGH_PRIORITY_THRESHOLD: u32 = 60;

pub fn aggregate(
    records: &BTreeMap<String, HealthRecord>,
    cycles: &CycleReport,
    performance_findings: &[String],
) -> Vec<Recommendation> {
    let mut recommendations: Vec<Recommendation> = records
        .iter()
        .filter(|(_, record)| record.score < ATTENTION_THRESHOLD)
        .map(|(name, record)| Recommendation {
            kind: RecommendationKind::Package,
            package: Some(name.clone()),
            priority: if record.score < HIGH_PRIORITY_THRESHOLD {
                Priority::High
            } else {
                Priority::Medium
            },
            message: format!("Package {} needs attention (score: {})", name, record.score),
            actions: record.issues.clone(),
        })
        .collect();

    if !cycles.is_empty() {
        recommendations.push(Recommendation {
            kind: RecommendationKind::Architecture,
            package: None,
            priority: Priority::High,
            message: "Circular dependencies detected".to_string(),
            actions: cycles.iter().map(refactor_action).collect(),
        });
    }

    if !performance_findings.is_empty() {
        recommendations.push(Recommendation {
            kind: RecommendationKind::Performance,
            package: None,
            priority: Priority::Medium,
            message: "Performance issues detected".to_string(),
            actions: performance_findings.to_vec(),
        });
    }

    recommendations
}

fn refactor_action(cycle: &Cycle) -> String {
    if cycle.is_pair() {
        let p = cycle.packages();
        format!(
            "Refactor to remove circular dependency between {} and {}",
            p[0], p[1]
        )
    } else {
        format!(
            "Refactor to remove circular dependency among {}",
            cycle.packages().join(" -> ")
        )
    }
}

/// Stable sort, high priority first
pub fn sort_by_priority(recommendations: &mut [Recommendation]) {
    recommendations.sort_by(|a, b| b.priority.cmp(&a.priority));
}
