//! monorepo-health - dependency graph and health analysis for JS/TS monorepos
//!
//! Loads the `package.json` of every workspace member, builds the internal
//! dependency graph, detects cycles, scores each package against a single
//! checklist and aggregates the results into recommendations.
//!
//! ```no_run
//! use monorepo_health::config::load_project_config;
//! use monorepo_health::pipeline::analyze;
//! use std::path::Path;
//!
//! let root = Path::new(".");
//! let config = load_project_config(root);
//! let report = analyze(root, &config, None)?;
//! println!("overall: {}", report.overall.score);
//! # Ok::<(), monorepo_health::error::HealthError>(())
//! ```

pub mod config;
pub mod drift;
pub mod error;
pub mod graph;
pub mod loader;
pub mod models;
pub mod performance;
pub mod pipeline;
pub mod recommend;
pub mod reporters;
pub mod scoring;
pub mod signals;
