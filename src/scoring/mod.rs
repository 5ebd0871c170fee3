//! Package and workspace health scoring
//!
//! Every package is scored against one checklist. The score starts at 100
//! and only goes down:
//!
//! ```text
//! Score  = max(0, 100 - Σ deductions)
//! Status = excellent ≥ 90, good ≥ 80, fair ≥ 70, poor ≥ 60, else critical
//! ```
//!
//! # Checklist (default weights, see `[scoring]` in monorepo-health.toml)
//!
//! - Missing package.json: whole score, nothing else checked
//! - Missing required field: 5 each
//! - Missing required script: 5 each
//! - No tsconfig.json: 10
//! - No src directory: 15
//! - No tests/test directory: 10
//! - No README.md: 5
//! - Tests failed: 15
//! - Coverage below 80%: round((80 - coverage) / 2)
//! - Bundle above 50 KB: 5
//! - Outdated dependencies: min(2n, 10)
//! - Vulnerabilities: min(5n, 20)
//!
//! A signal that could not be collected adds an issue but no deduction.
//!
//! The workspace itself gets a config score from root tooling files, and
//! the overall score is the rounded mean of all package scores plus the
//! config score.

mod package_scorer;
mod workspace;

pub use package_scorer::{score_package, PackageScorer};
pub use workspace::{overall, score_workspace};
