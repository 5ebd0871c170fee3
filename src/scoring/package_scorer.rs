//! Unified package checklist scorer

use crate::config::ScoringConfig;
use crate::models::{Deduction, HealthRecord, HealthStatus};
use crate::signals::{ManifestCheck, PackageSignals, Signal};
use std::collections::BTreeMap;
use tracing::debug;

const MAX_SCORE: u32 = 100;

/// Scores packages against a fixed set of checklist weights
pub struct PackageScorer<'a> {
    config: &'a ScoringConfig,
}

impl<'a> PackageScorer<'a> {
    pub fn new(config: &'a ScoringConfig) -> Self {
        Self { config }
    }

    /// Score one package from its collected signals
    pub fn score(&self, name: &str, signals: &PackageSignals) -> HealthRecord {
        let mut card = Scorecard::default();
        let cfg = self.config;

        match &signals.manifest {
            Signal::Present(ManifestCheck::Missing) => {
                card.deduct("Missing package.json", MAX_SCORE);
                debug!("{}: no manifest, remaining checks skipped", name);
                return card.finish();
            }
            Signal::Present(ManifestCheck::Found {
                missing_fields,
                missing_scripts,
            }) => {
                for field in missing_fields {
                    card.deduct(format!("Missing {} in package.json", field), cfg.missing_field);
                }
                for script in missing_scripts {
                    card.deduct(format!("Missing {} script", script), cfg.missing_script);
                }
            }
            Signal::Failed(reason) => card.unavailable("package.json", reason),
            Signal::Absent => {}
        }

        card.require(&signals.tsconfig, "tsconfig", "Missing tsconfig.json", cfg.missing_tsconfig);
        card.require(&signals.src_dir, "src", "Missing src directory", cfg.missing_src);
        card.require(&signals.tests_dir, "tests", "Missing tests directory", cfg.missing_tests);
        card.require(&signals.readme, "README", "Missing README.md", cfg.missing_readme);
        card.require(&signals.tests_passed, "testsPassed", "Tests failed", cfg.tests_failed);

        match &signals.coverage {
            Signal::Present(coverage) => {
                card.metric("testCoverage", *coverage);
                if *coverage < cfg.coverage_target {
                    let points = ((cfg.coverage_target - coverage) / 2.0).round() as u32;
                    card.deduct(format!("Low test coverage: {}%", coverage), points);
                }
            }
            Signal::Failed(reason) => card.unavailable("coverage", reason),
            Signal::Absent => {}
        }

        match &signals.bundle_size_kb {
            Signal::Present(size) => {
                card.metric("bundleSize", *size);
                if *size > cfg.bundle_limit_kb {
                    card.deduct(format!("Large bundle size: {}KB", size), cfg.bundle_penalty);
                }
            }
            Signal::Failed(reason) => card.unavailable("bundleSizeKb", reason),
            Signal::Absent => {}
        }

        match &signals.outdated {
            Signal::Present(count) => {
                card.metric("outdatedDeps", f64::from(*count));
                if *count > 0 {
                    let points = count.saturating_mul(cfg.outdated_per_dep).min(cfg.outdated_cap);
                    card.deduct(format!("{} outdated dependencies", count), points);
                }
            }
            Signal::Failed(reason) => card.unavailable("outdated", reason),
            Signal::Absent => {}
        }

        match &signals.vulnerabilities {
            Signal::Present(count) => {
                card.metric("vulnerabilities", f64::from(*count));
                if *count > 0 {
                    let points = count
                        .saturating_mul(cfg.vulnerability_per_item)
                        .min(cfg.vulnerability_cap);
                    card.deduct(format!("{} security vulnerabilities", count), points);
                }
            }
            Signal::Failed(reason) => card.unavailable("vulnerabilities", reason),
            Signal::Absent => {}
        }

        // Build signals feed the performance check, not the score
        if let Signal::Present(ms) = &signals.build_time_ms {
            card.metric("buildTimeMs", *ms as f64);
        }

        let record = card.finish();
        debug!(
            "{}: score {} ({} deductions)",
            name,
            record.score,
            record.deductions.len()
        );
        record
    }
}

/// Score one package with the given checklist weights
pub fn score_package(name: &str, signals: &PackageSignals, config: &ScoringConfig) -> HealthRecord {
    PackageScorer::new(config).score(name, signals)
}

#[derive(Default)]
struct Scorecard {
    issues: Vec<String>,
    metrics: BTreeMap<String, f64>,
    deductions: Vec<Deduction>,
}

impl Scorecard {
    fn deduct(&mut self, reason: impl Into<String>, points: u32) {
        let reason = reason.into();
        self.issues.push(reason.clone());
        self.deductions.push(Deduction { reason, points });
    }

    fn unavailable(&mut self, signal: &str, reason: &str) {
        self.issues
            .push(format!("{} unavailable: {}", signal, reason));
    }

    fn metric(&mut self, name: &str, value: f64) {
        self.metrics.insert(name.to_string(), value);
    }

    /// Deduct when a boolean check came back false
    fn require(&mut self, signal: &Signal<bool>, label: &str, issue: &str, points: u32) {
        match signal {
            Signal::Present(false) => self.deduct(issue, points),
            Signal::Failed(reason) => self.unavailable(label, reason),
            Signal::Present(true) | Signal::Absent => {}
        }
    }

    fn finish(self) -> HealthRecord {
        let mut record = HealthRecord {
            score: MAX_SCORE,
            status: HealthStatus::Excellent,
            issues: self.issues,
            metrics: self.metrics,
            deductions: self.deductions,
        };
        record.score = MAX_SCORE.saturating_sub(record.total_deducted());
        record.status = HealthStatus::from_score(record.score);
        record
    }
}
