//! Per-package health signals
//!
//! A signal is one observation the scorer can use: manifest completeness,
//! file presence, test outcome, coverage, bundle size and so on. Each is a
//! [`Signal`] so a check that never ran (`Absent`) is distinguishable from
//! one that ran and could not produce a value (`Failed`).
//!
//! Signals come from [`SignalProvider`]s. Providers are merged per package
//! and collected in parallel.

mod file;
mod filesystem;

pub use file::{parse_bundle_size_kb, parse_coverage_percent, SignalsFile};
pub use filesystem::{FilesystemSignals, WorkspaceSignals};

use crate::loader::WorkspacePackage;
use rayon::prelude::*;
use std::collections::BTreeMap;
use tracing::debug;

/// An optional observation
#[derive(Debug, Clone, PartialEq)]
pub enum Signal<T> {
    /// The check was not run
    Absent,
    /// The check ran but produced no usable value
    Failed(String),
    Present(T),
}

impl<T> Default for Signal<T> {
    fn default() -> Self {
        Signal::Absent
    }
}

impl<T> Signal<T> {
    pub fn as_option(&self) -> Option<&T> {
        match self {
            Signal::Present(v) => Some(v),
            _ => None,
        }
    }

    pub fn is_absent(&self) -> bool {
        matches!(self, Signal::Absent)
    }

    /// Combine two observations of the same signal.
    /// `Present` beats `Failed` beats `Absent`; ties keep `self`.
    pub fn or(self, other: Signal<T>) -> Signal<T> {
        match (self, other) {
            (Signal::Present(v), _) => Signal::Present(v),
            (_, Signal::Present(v)) => Signal::Present(v),
            (Signal::Failed(r), _) => Signal::Failed(r),
            (Signal::Absent, other) => other,
        }
    }
}

impl<T> From<Option<T>> for Signal<T> {
    fn from(value: Option<T>) -> Self {
        match value {
            Some(v) => Signal::Present(v),
            None => Signal::Absent,
        }
    }
}

/// Result of inspecting a package's manifest
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ManifestCheck {
    Missing,
    Found {
        missing_fields: Vec<String>,
        missing_scripts: Vec<String>,
    },
}

/// Everything known about one package before scoring
#[derive(Debug, Clone, PartialEq, Default)]
pub struct PackageSignals {
    pub manifest: Signal<ManifestCheck>,
    pub tsconfig: Signal<bool>,
    pub src_dir: Signal<bool>,
    pub tests_dir: Signal<bool>,
    pub readme: Signal<bool>,
    pub tests_passed: Signal<bool>,
    /// Statement coverage percentage
    pub coverage: Signal<f64>,
    pub bundle_size_kb: Signal<f64>,
    pub outdated: Signal<u32>,
    pub vulnerabilities: Signal<u32>,
    pub build_time_ms: Signal<u64>,
    pub build_failed: Signal<bool>,
}

impl PackageSignals {
    /// Field-wise [`Signal::or`]
    pub fn merge(self, other: PackageSignals) -> PackageSignals {
        PackageSignals {
            manifest: self.manifest.or(other.manifest),
            tsconfig: self.tsconfig.or(other.tsconfig),
            src_dir: self.src_dir.or(other.src_dir),
            tests_dir: self.tests_dir.or(other.tests_dir),
            readme: self.readme.or(other.readme),
            tests_passed: self.tests_passed.or(other.tests_passed),
            coverage: self.coverage.or(other.coverage),
            bundle_size_kb: self.bundle_size_kb.or(other.bundle_size_kb),
            outdated: self.outdated.or(other.outdated),
            vulnerabilities: self.vulnerabilities.or(other.vulnerabilities),
            build_time_ms: self.build_time_ms.or(other.build_time_ms),
            build_failed: self.build_failed.or(other.build_failed),
        }
    }
}

/// Source of package signals
///
/// Providers must not panic; failures are reported as [`Signal::Failed`].
pub trait SignalProvider: Send + Sync {
    fn name(&self) -> &'static str;

    fn collect(&self, package: &WorkspacePackage) -> PackageSignals;
}

/// Build timing for one package, as consumed by the performance check
#[derive(Debug, Clone, PartialEq, Default)]
pub struct BuildSignal {
    pub time_ms: Signal<u64>,
    pub failed: Signal<bool>,
}

impl From<&PackageSignals> for BuildSignal {
    fn from(signals: &PackageSignals) -> Self {
        Self {
            time_ms: signals.build_time_ms.clone(),
            failed: signals.build_failed.clone(),
        }
    }
}

/// Run every provider over every package in parallel and merge the results
pub fn collect_all(
    packages: &[WorkspacePackage],
    providers: &[&dyn SignalProvider],
) -> BTreeMap<String, PackageSignals> {
    let collected: Vec<(String, PackageSignals)> = packages
        .par_iter()
        .map(|pkg| {
            let signals = providers
                .iter()
                .map(|p| p.collect(pkg))
                .fold(PackageSignals::default(), PackageSignals::merge);
            (pkg.name().to_string(), signals)
        })
        .collect();

    debug!(
        "Collected signals for {} packages from {} providers",
        collected.len(),
        providers.len()
    );
    collected.into_iter().collect()
}
