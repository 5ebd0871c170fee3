//! Version drift detection
//!
//! Drift is one dependency declared with more than one version specifier
//! across the workspace, e.g. `typescript@^5.3.0` in one package and
//! `typescript@^5.4.0` in another.

use crate::models::PackageDescriptor;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

/// One package's specifier for a drifting dependency
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeclaredVersion {
    pub package: String,
    pub version: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VersionDrift {
    pub dependency: String,
    /// Declarations in package-name order
    pub versions: Vec<DeclaredVersion>,
}

impl VersionDrift {
    /// Distinct specifiers, sorted
    pub fn specifiers(&self) -> BTreeSet<&str> {
        self.versions.iter().map(|v| v.version.as_str()).collect()
    }
}

/// Find dependencies declared at different versions, sorted by name
///
/// Considers `dependencies` and `devDependencies`; when one package lists
/// a name in both, the devDependencies specifier is used.
pub fn find_version_drift(descriptors: &[PackageDescriptor]) -> Vec<VersionDrift> {
    // dependency -> package -> specifier
    let mut declared: BTreeMap<&str, BTreeMap<&str, &str>> = BTreeMap::new();

    for pkg in descriptors {
        let mut merged: BTreeMap<&str, &str> = BTreeMap::new();
        for (name, version) in pkg.dependencies.iter().chain(&pkg.dev_dependencies) {
            merged.insert(name, version);
        }
        for (name, version) in merged {
            declared
                .entry(name)
                .or_default()
                .insert(pkg.name.as_str(), version);
        }
    }

    declared
        .into_iter()
        .filter(|(_, by_package)| {
            by_package.values().collect::<BTreeSet<_>>().len() > 1
        })
        .map(|(dependency, by_package)| VersionDrift {
            dependency: dependency.to_string(),
            versions: by_package
                .into_iter()
                .map(|(package, version)| DeclaredVersion {
                    package: package.to_string(),
                    version: version.to_string(),
                })
                .collect(),
        })
        .collect()
}
