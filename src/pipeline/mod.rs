//! Analysis pipeline
//!
//! Orchestrates a full health check:
//! 1. Load workspace manifests
//! 2. Collect signals per package (parallel)
//! 3. Build the dependency graph and detect cycles
//! 4. Score packages and workspace config
//! 5. Check version drift and build performance
//! 6. Aggregate recommendations

use chrono::{SecondsFormat, Utc};
use std::collections::BTreeMap;
use std::path::Path;
use tracing::{debug, info};

use crate::config::ProjectConfig;
use crate::drift::find_version_drift;
use crate::error::Result;
use crate::graph;
use crate::loader::{self, WorkspacePackage};
use crate::models::{DependencySection, HealthRecord, HealthReport, PackageDescriptor};
use crate::performance::check_performance;
use crate::recommend::aggregate;
use crate::scoring::{overall, score_workspace, PackageScorer};
use crate::signals::{
    collect_all, BuildSignal, FilesystemSignals, SignalProvider, SignalsFile, WorkspaceSignals,
};

/// Full analysis pipeline.
pub struct Pipeline<'a> {
    config: &'a ProjectConfig,
    signals_file: Option<SignalsFile>,
}

impl<'a> Pipeline<'a> {
    pub fn new(config: &'a ProjectConfig) -> Self {
        Self {
            config,
            signals_file: None,
        }
    }

    /// Merge measurements from a CI signals file.
    pub fn with_signals(mut self, signals: SignalsFile) -> Self {
        self.signals_file = Some(signals);
        self
    }

    /// Analyze the workspace rooted at `root`.
    pub fn run(&self, root: &Path) -> Result<HealthReport> {
        let packages = loader::load_workspace(root, &self.config.workspace)?;
        let workspace = WorkspaceSignals::collect(root);
        Ok(self.analyze_packages(&packages, &workspace))
    }

    /// Analyze already-loaded packages. Pure apart from provider I/O.
    pub fn analyze_packages(
        &self,
        packages: &[WorkspacePackage],
        workspace: &WorkspaceSignals,
    ) -> HealthReport {
        let filesystem = FilesystemSignals::new(&self.config.scoring);
        let mut providers: Vec<&dyn SignalProvider> = vec![&filesystem];
        if let Some(file) = &self.signals_file {
            providers.push(file);
        }
        let signals = collect_all(packages, &providers);

        let descriptors: Vec<PackageDescriptor> =
            packages.iter().map(|p| p.descriptor.clone()).collect();
        let (dep_graph, cycles) = graph::build_with_limit(&descriptors, self.config.graph.max_cycles);

        let scorer = PackageScorer::new(&self.config.scoring);
        let records: BTreeMap<String, HealthRecord> = signals
            .iter()
            .map(|(name, s)| (name.clone(), scorer.score(name, s)))
            .collect();

        let config_health = score_workspace(workspace);
        let scores: Vec<u32> = records
            .values()
            .map(|r| r.score)
            .chain(std::iter::once(config_health.score))
            .collect();
        let overall_health = overall(&scores);

        let builds: BTreeMap<String, BuildSignal> = signals
            .iter()
            .map(|(name, s)| (name.clone(), BuildSignal::from(s)))
            .collect();
        let performance = check_performance(&builds, self.config.performance.slow_build_ms);

        let drift = find_version_drift(&descriptors);
        debug!("{} dependencies drift across packages", drift.len());

        let recommendations = aggregate(&records, &cycles, &performance.issues);

        info!(
            "Analyzed {} packages: overall {} ({}), {} cycles, {} recommendations",
            records.len(),
            overall_health.score,
            overall_health.status,
            cycles.len(),
            recommendations.len()
        );

        HealthReport {
            timestamp: timestamp(),
            overall: overall_health,
            packages: records,
            dependencies: DependencySection {
                graph: dep_graph,
                issues: cycles.issues(),
                cycles_truncated: cycles.truncated,
                cycles: cycles.into_cycles(),
                drift,
            },
            config: config_health,
            performance,
            recommendations,
        }
    }
}

/// Analyze a workspace, optionally merging a signals file.
pub fn analyze(
    workspace_root: &Path,
    config: &ProjectConfig,
    signals: Option<&Path>,
) -> Result<HealthReport> {
    let mut pipeline = Pipeline::new(config);
    if let Some(path) = signals {
        pipeline = pipeline.with_signals(SignalsFile::load(path)?);
    }
    pipeline.run(workspace_root)
}

/// Current time as an RFC 3339 UTC string
pub fn timestamp() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true)
}
