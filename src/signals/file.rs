//! Signals file written by CI
//!
//! Test, coverage, bundle, audit and build measurements are produced by
//! external tooling and handed over as one JSON (or TOML) document:
//!
//! ```json
//! {
//!   "packages": {
//!     "@x/core": {
//!       "coverage": 72.5,
//!       "testsPassed": true,
//!       "bundleSizeKb": 61.0,
//!       "outdated": 2,
//!       "vulnerabilities": 0,
//!       "buildTimeMs": 41000,
//!       "errors": { "bundleSizeKb": "size-limit not configured" }
//!     }
//!   }
//! }
//! ```
//!
//! Raw tool output may be passed instead of numbers via `coverageOutput`
//! (istanbul text summary) and `sizeOutput` (size-limit output).

use super::{PackageSignals, Signal, SignalProvider};
use crate::error::{HealthError, Result};
use crate::loader::WorkspacePackage;
use regex::Regex;
use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::Path;
use std::sync::OnceLock;
use tracing::{debug, warn};

const KNOWN_SIGNALS: &[&str] = &[
    "coverage",
    "testsPassed",
    "bundleSizeKb",
    "outdated",
    "vulnerabilities",
    "buildTimeMs",
    "buildFailed",
];

#[derive(Debug, Clone, Deserialize, Default)]
struct SignalsDocument {
    #[serde(default)]
    packages: BTreeMap<String, SignalEntry>,
}

#[derive(Debug, Clone, Deserialize, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
struct SignalEntry {
    coverage: Option<f64>,
    coverage_output: Option<String>,
    tests_passed: Option<bool>,
    bundle_size_kb: Option<f64>,
    size_output: Option<String>,
    outdated: Option<u32>,
    vulnerabilities: Option<u32>,
    build_time_ms: Option<u64>,
    build_failed: Option<bool>,
    #[serde(default)]
    errors: BTreeMap<String, String>,
}

impl SignalEntry {
    fn signal<T>(&self, key: &str, value: Option<T>) -> Signal<T> {
        match value {
            Some(v) => Signal::Present(v),
            None => match self.errors.get(key) {
                Some(reason) => Signal::Failed(reason.clone()),
                None => Signal::Absent,
            },
        }
    }

    fn to_signals(&self) -> PackageSignals {
        let coverage = self.coverage.map(Signal::Present).unwrap_or_else(|| {
            match &self.coverage_output {
                Some(output) => match parse_coverage_percent(output) {
                    Some(c) => Signal::Present(c),
                    None => Signal::Failed("no coverage summary in output".into()),
                },
                None => self.signal("coverage", None),
            }
        });
        let bundle_size_kb = self.bundle_size_kb.map(Signal::Present).unwrap_or_else(|| {
            match &self.size_output {
                Some(output) => match parse_bundle_size_kb(output) {
                    Some(s) => Signal::Present(s),
                    None => Signal::Failed("no size in output".into()),
                },
                None => self.signal("bundleSizeKb", None),
            }
        });

        PackageSignals {
            tests_passed: self.signal("testsPassed", self.tests_passed),
            coverage,
            bundle_size_kb,
            outdated: self.signal("outdated", self.outdated),
            vulnerabilities: self.signal("vulnerabilities", self.vulnerabilities),
            build_time_ms: self.signal("buildTimeMs", self.build_time_ms),
            build_failed: self.signal("buildFailed", self.build_failed),
            ..Default::default()
        }
    }
}

/// Measurements loaded from a signals file, keyed by package name
#[derive(Debug, Clone, Default)]
pub struct SignalsFile {
    packages: BTreeMap<String, SignalEntry>,
}

impl SignalsFile {
    /// Load a signals file; TOML when the extension is `.toml`, JSON otherwise
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| HealthError::io(path, e))?;
        let is_toml = path.extension().is_some_and(|ext| ext == "toml");

        let parsed = if is_toml {
            toml::from_str::<SignalsDocument>(&content).map_err(|e| e.to_string())
        } else {
            serde_json::from_str::<SignalsDocument>(&content).map_err(|e| e.to_string())
        };
        let document = parsed.map_err(|message| HealthError::SignalsParse {
            path: path.to_path_buf(),
            message,
        })?;

        for (pkg, entry) in &document.packages {
            for key in entry.errors.keys() {
                if !KNOWN_SIGNALS.contains(&key.as_str()) {
                    warn!("Unknown signal '{}' in errors for {}", key, pkg);
                }
            }
        }

        debug!(
            "Loaded signals for {} packages from {}",
            document.packages.len(),
            path.display()
        );
        Ok(Self {
            packages: document.packages,
        })
    }

    pub fn len(&self) -> usize {
        self.packages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.packages.is_empty()
    }

    /// Signals recorded for one package (all `Absent` when unknown)
    pub fn signals_for(&self, name: &str) -> PackageSignals {
        self.packages
            .get(name)
            .map(SignalEntry::to_signals)
            .unwrap_or_default()
    }
}

impl SignalProvider for SignalsFile {
    fn name(&self) -> &'static str {
        "signals-file"
    }

    fn collect(&self, package: &WorkspacePackage) -> PackageSignals {
        self.signals_for(package.name())
    }
}

/// Statement coverage from an istanbul text summary
pub fn parse_coverage_percent(output: &str) -> Option<f64> {
    static RE: OnceLock<Regex> = OnceLock::new();
    let re = RE.get_or_init(|| Regex::new(r"Statements\s+:\s+([\d.]+)%").expect("valid regex"));
    re.captures(output)?.get(1)?.as_str().parse().ok()
}

/// First `<n> KB` figure in size-limit output
pub fn parse_bundle_size_kb(output: &str) -> Option<f64> {
    static RE: OnceLock<Regex> = OnceLock::new();
    let re = RE.get_or_init(|| Regex::new(r"([\d.]+)\s*KB").expect("valid regex"));
    re.captures(output)?.get(1)?.as_str().parse().ok()
}
