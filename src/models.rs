//! Core data models for monorepo-health
//!
//! These models flow through the whole pipeline: package descriptors in,
//! health records and recommendations out. Everything serializes with
//! camelCase keys so the JSON report lines up with `package.json` naming.

use crate::drift::VersionDrift;
use crate::graph::{Cycle, DependencyGraph};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

/// One workspace member as seen by the dependency graph
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct PackageDescriptor {
    /// Namespaced package name (graph node identity)
    pub name: String,
    /// Workspace-relative location of the package directory
    #[serde(default)]
    pub path: String,
    #[serde(default)]
    pub dependencies: BTreeMap<String, String>,
    #[serde(default)]
    pub dev_dependencies: BTreeMap<String, String>,
    #[serde(default)]
    pub peer_dependencies: BTreeMap<String, String>,
}

impl PackageDescriptor {
    pub fn new(name: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            path: path.into(),
            ..Default::default()
        }
    }

    pub fn with_dependency(mut self, name: impl Into<String>, version: impl Into<String>) -> Self {
        self.dependencies.insert(name.into(), version.into());
        self
    }

    pub fn with_dev_dependency(
        mut self,
        name: impl Into<String>,
        version: impl Into<String>,
    ) -> Self {
        self.dev_dependencies.insert(name.into(), version.into());
        self
    }

    pub fn with_peer_dependency(
        mut self,
        name: impl Into<String>,
        version: impl Into<String>,
    ) -> Self {
        self.peer_dependencies.insert(name.into(), version.into());
        self
    }

    /// Union of keys across all three dependency maps, each name once
    pub fn all_dependency_names(&self) -> BTreeSet<&str> {
        self.dependencies
            .keys()
            .chain(self.dev_dependencies.keys())
            .chain(self.peer_dependencies.keys())
            .map(String::as_str)
            .collect()
    }
}

/// Health tier derived from a 0-100 score
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default,
)]
#[serde(rename_all = "lowercase")]
pub enum HealthStatus {
    Critical,
    Poor,
    Fair,
    Good,
    #[default]
    Excellent,
}

impl HealthStatus {
    /// Map a score onto the fixed tier thresholds
    pub fn from_score(score: u32) -> Self {
        match score {
            s if s >= 90 => HealthStatus::Excellent,
            s if s >= 80 => HealthStatus::Good,
            s if s >= 70 => HealthStatus::Fair,
            s if s >= 60 => HealthStatus::Poor,
            _ => HealthStatus::Critical,
        }
    }
}

impl std::fmt::Display for HealthStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            HealthStatus::Excellent => write!(f, "excellent"),
            HealthStatus::Good => write!(f, "good"),
            HealthStatus::Fair => write!(f, "fair"),
            HealthStatus::Poor => write!(f, "poor"),
            HealthStatus::Critical => write!(f, "critical"),
        }
    }
}

/// A single point deduction applied by the scorer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Deduction {
    pub reason: String,
    pub points: u32,
}

/// Per-package health result
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthRecord {
    pub score: u32,
    pub status: HealthStatus,
    pub issues: Vec<String>,
    /// Numeric measurements, keyed by metric name (`testCoverage`, `bundleSize`, ...)
    pub metrics: BTreeMap<String, f64>,
    #[serde(default)]
    pub deductions: Vec<Deduction>,
}

impl HealthRecord {
    /// Total points deducted before clamping, saturating at `u32::MAX`
    pub fn total_deducted(&self) -> u32 {
        self.deductions
            .iter()
            .map(|d| d.points)
            .fold(0u32, u32::saturating_add)
    }
}

/// Which part of the workspace a recommendation targets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RecommendationKind {
    Package,
    Architecture,
    Performance,
}

impl std::fmt::Display for RecommendationKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RecommendationKind::Package => write!(f, "package"),
            RecommendationKind::Architecture => write!(f, "architecture"),
            RecommendationKind::Performance => write!(f, "performance"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Medium,
    High,
}

impl std::fmt::Display for Priority {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Priority::Medium => write!(f, "medium"),
            Priority::High => write!(f, "high"),
        }
    }
}

/// An actionable item produced by the aggregator
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Recommendation {
    #[serde(rename = "type")]
    pub kind: RecommendationKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub package: Option<String>,
    pub priority: Priority,
    pub message: String,
    pub actions: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OverallHealth {
    pub score: u32,
    pub status: HealthStatus,
}

/// Workspace-level configuration check result
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfigHealth {
    pub score: u32,
    pub issues: Vec<String>,
}

impl Default for ConfigHealth {
    fn default() -> Self {
        Self {
            score: 100,
            issues: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct DependencySection {
    pub graph: DependencyGraph,
    pub cycles: Vec<Cycle>,
    /// Long-cycle enumeration hit `graph.max_cycles`
    #[serde(default, rename = "cyclesTruncated")]
    pub cycles_truncated: bool,
    pub issues: Vec<String>,
    #[serde(default)]
    pub drift: Vec<VersionDrift>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct PerformanceReport {
    /// Build time per package in milliseconds
    pub build_times: BTreeMap<String, u64>,
    pub issues: Vec<String>,
}

/// The persisted analysis artifact
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HealthReport {
    /// RFC 3339 UTC timestamp
    pub timestamp: String,
    pub overall: OverallHealth,
    pub packages: BTreeMap<String, HealthRecord>,
    pub dependencies: DependencySection,
    #[serde(default)]
    pub config: ConfigHealth,
    #[serde(default)]
    pub performance: PerformanceReport,
    pub recommendations: Vec<Recommendation>,
}

/// Count of packages per status tier
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusSummary {
    pub excellent: usize,
    pub good: usize,
    pub fair: usize,
    pub poor: usize,
    pub critical: usize,
    pub total_issues: usize,
}

impl StatusSummary {
    pub fn from_records<'a>(records: impl IntoIterator<Item = &'a HealthRecord>) -> Self {
        let mut summary = Self::default();
        for r in records {
            match r.status {
                HealthStatus::Excellent => summary.excellent += 1,
                HealthStatus::Good => summary.good += 1,
                HealthStatus::Fair => summary.fair += 1,
                HealthStatus::Poor => summary.poor += 1,
                HealthStatus::Critical => summary.critical += 1,
            }
            summary.total_issues += r.issues.len();
        }
        summary
    }
}
