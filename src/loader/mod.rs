//! Workspace manifest loading
//!
//! Discovers workspace members and turns each `package.json` into a
//! [`PackageDescriptor`]. Discovery order:
//!
//! 1. `workspace.members` from project config
//! 2. `packages:` globs in `pnpm-workspace.yaml`
//! 3. every directory under each of `workspace.package_dirs`
//!
//! A member directory without `package.json` still loads, named after its
//! directory and carrying no manifest, so the scorer can flag it.

mod manifest;

pub use manifest::PackageManifest;

use crate::config::WorkspaceConfig;
use crate::error::{HealthError, Result};
use crate::graph::validate_descriptors;
use crate::models::PackageDescriptor;
use regex::Regex;
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;
use tracing::{debug, info, warn};

pub const MANIFEST_FILE: &str = "package.json";
const PNPM_WORKSPACE_FILE: &str = "pnpm-workspace.yaml";

/// Directories never treated as packages
const SKIPPED_DIRS: &[&str] = &["node_modules", "dist", "build", "coverage"];

/// A loaded workspace member
#[derive(Debug, Clone)]
pub struct WorkspacePackage {
    pub descriptor: PackageDescriptor,
    /// Absolute package directory
    pub dir: PathBuf,
    /// Parsed manifest; `None` when `package.json` is missing
    pub manifest: Option<PackageManifest>,
}

impl WorkspacePackage {
    pub fn name(&self) -> &str {
        &self.descriptor.name
    }
}

/// Discover and load all workspace packages, sorted by name
pub fn load_workspace(root: &Path, config: &WorkspaceConfig) -> Result<Vec<WorkspacePackage>> {
    let members = discover_members(root, config)?;
    debug!("Discovered {} workspace members", members.len());

    let mut packages = members
        .iter()
        .map(|rel| load_package(root, rel))
        .collect::<Result<Vec<_>>>()?;
    packages.sort_by(|a, b| a.descriptor.name.cmp(&b.descriptor.name));

    let descriptors: Vec<PackageDescriptor> =
        packages.iter().map(|p| p.descriptor.clone()).collect();
    validate_descriptors(&descriptors)?;

    info!("Loaded {} packages from {}", packages.len(), root.display());
    Ok(packages)
}

/// Load a single member directory (relative to `root`)
pub fn load_package(root: &Path, rel: &str) -> Result<WorkspacePackage> {
    let dir = root.join(rel);
    let manifest_path = dir.join(MANIFEST_FILE);
    let dir_name = dir
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_else(|| rel.to_string());

    if !manifest_path.is_file() {
        warn!("No {} in {}", MANIFEST_FILE, dir.display());
        return Ok(WorkspacePackage {
            descriptor: PackageDescriptor::new(dir_name, rel),
            dir,
            manifest: None,
        });
    }

    let manifest = PackageManifest::from_path(&manifest_path)?;
    let name = manifest
        .name
        .clone()
        .filter(|n| !n.trim().is_empty())
        .unwrap_or(dir_name);

    let descriptor = PackageDescriptor {
        name,
        path: rel.to_string(),
        dependencies: manifest.dependencies.clone(),
        dev_dependencies: manifest.dev_dependencies.clone(),
        peer_dependencies: manifest.peer_dependencies.clone(),
    };

    Ok(WorkspacePackage {
        descriptor,
        dir,
        manifest: Some(manifest),
    })
}

/// Workspace-relative member directories, sorted and de-duplicated
pub fn discover_members(root: &Path, config: &WorkspaceConfig) -> Result<Vec<String>> {
    if !config.members.is_empty() {
        let members: BTreeSet<String> = config
            .members
            .iter()
            .map(|m| normalize_rel(m))
            .filter(|m| !m.is_empty())
            .collect();
        return Ok(members.into_iter().collect());
    }

    let pnpm = root.join(PNPM_WORKSPACE_FILE);
    if pnpm.is_file() {
        let content = std::fs::read_to_string(&pnpm).map_err(|e| HealthError::io(&pnpm, e))?;
        let patterns = parse_pnpm_workspace(&content);
        if !patterns.is_empty() {
            debug!("Using {} patterns from {}", patterns.len(), PNPM_WORKSPACE_FILE);
            return expand_patterns(root, &patterns);
        }
    }

    let mut members = BTreeSet::new();
    for base in &config.package_dirs {
        let base = normalize_rel(base);
        members.extend(child_dirs(root, &base)?);
    }
    Ok(members.into_iter().collect())
}

/// Extract the `packages:` list from pnpm-workspace.yaml
///
/// Handles block sequences (`- 'packages/*'`) and flow sequences
/// (`packages: ['a/*', 'b']`). Comments and other keys are ignored.
pub fn parse_pnpm_workspace(content: &str) -> Vec<String> {
    static ITEM: OnceLock<Regex> = OnceLock::new();
    static FLOW: OnceLock<Regex> = OnceLock::new();
    let item = ITEM.get_or_init(|| {
        Regex::new(r##"^\s*-\s*['"]?([^'"#]+?)['"]?\s*(?:#.*)?$"##).expect("valid regex")
    });
    let flow = FLOW.get_or_init(|| Regex::new(r"^packages:\s*\[(.*)\]").expect("valid regex"));

    let mut patterns = Vec::new();
    let mut in_packages = false;

    for line in content.lines() {
        if let Some(caps) = flow.captures(line) {
            patterns.extend(
                caps[1]
                    .split(',')
                    .map(|p| p.trim().trim_matches(|c| c == '\'' || c == '"').to_string())
                    .filter(|p| !p.is_empty()),
            );
            in_packages = false;
            continue;
        }
        if line.trim_end() == "packages:" {
            in_packages = true;
            continue;
        }
        if !in_packages {
            continue;
        }
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }
        match item.captures(line) {
            Some(caps) => patterns.push(caps[1].trim().to_string()),
            // Any other top-level content ends the sequence
            None => in_packages = false,
        }
    }

    patterns
}

fn expand_patterns(root: &Path, patterns: &[String]) -> Result<Vec<String>> {
    let mut included = BTreeSet::new();
    let mut excluded = BTreeSet::new();

    for pattern in patterns {
        let (negated, pattern) = match pattern.strip_prefix('!') {
            Some(rest) => (true, rest),
            None => (false, pattern.as_str()),
        };
        let matches = expand_pattern(root, &normalize_rel(pattern))?;
        if negated {
            excluded.extend(matches);
        } else {
            included.extend(matches);
        }
    }

    Ok(included.difference(&excluded).cloned().collect())
}

fn expand_pattern(root: &Path, pattern: &str) -> Result<Vec<String>> {
    if let Some(base) = pattern.strip_suffix("/**") {
        let mut found = Vec::new();
        collect_manifest_dirs(root, base, &mut found)?;
        return Ok(found);
    }
    if let Some(base) = pattern.strip_suffix("/*") {
        return child_dirs(root, base);
    }
    if pattern == "*" {
        return child_dirs(root, "");
    }
    if root.join(pattern).is_dir() {
        return Ok(vec![pattern.to_string()]);
    }
    debug!("Workspace pattern '{}' matched nothing", pattern);
    Ok(Vec::new())
}

/// Immediate child directories of `base`, as workspace-relative paths
fn child_dirs(root: &Path, base: &str) -> Result<Vec<String>> {
    let dir = root.join(base);
    if !dir.is_dir() {
        return Ok(Vec::new());
    }

    let mut children = Vec::new();
    for entry in std::fs::read_dir(&dir).map_err(|e| HealthError::io(&dir, e))? {
        let entry = entry.map_err(|e| HealthError::io(&dir, e))?;
        if !entry.path().is_dir() {
            continue;
        }
        let name = entry.file_name().to_string_lossy().to_string();
        if name.starts_with('.') || SKIPPED_DIRS.contains(&name.as_str()) {
            continue;
        }
        children.push(join_rel(base, &name));
    }
    children.sort();
    Ok(children)
}

/// Every directory under `base` (inclusive) that holds a package.json
fn collect_manifest_dirs(root: &Path, base: &str, found: &mut Vec<String>) -> Result<()> {
    if root.join(base).join(MANIFEST_FILE).is_file() && !base.is_empty() {
        found.push(base.to_string());
    }
    for child in child_dirs(root, base)? {
        collect_manifest_dirs(root, &child, found)?;
    }
    Ok(())
}

fn join_rel(base: &str, name: &str) -> String {
    if base.is_empty() {
        name.to_string()
    } else {
        format!("{}/{}", base, name)
    }
}

fn normalize_rel(path: &str) -> String {
    path.trim()
        .trim_start_matches("./")
        .trim_end_matches('/')
        .replace('\\', "/")
}
