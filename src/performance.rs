//! Build performance check

use crate::models::PerformanceReport;
use crate::signals::{BuildSignal, Signal};
use std::collections::BTreeMap;

pub const DEFAULT_SLOW_BUILD_MS: u64 = 30_000;

/// Turn per-package build signals into timings and findings.
///
/// A failed build yields `Build failed for <pkg>`; a build slower than
/// `threshold_ms` yields `Slow build time for <pkg>: <ms>ms`.
pub fn check_performance(
    builds: &BTreeMap<String, BuildSignal>,
    threshold_ms: u64,
) -> PerformanceReport {
    let mut report = PerformanceReport::default();

    for (name, build) in builds {
        if let Signal::Present(true) = build.failed {
            report.issues.push(format!("Build failed for {}", name));
        }
        if let Signal::Present(ms) = build.time_ms {
            report.build_times.insert(name.clone(), ms);
            if ms > threshold_ms {
                report
                    .issues
                    .push(format!("Slow build time for {}: {}ms", name, ms));
            }
        }
    }

    report
}
