//! Signals read straight from the package directory

use super::{ManifestCheck, PackageSignals, Signal, SignalProvider};
use crate::config::ScoringConfig;
use crate::loader::WorkspacePackage;
use std::path::Path;

const ESLINT_CONFIGS: &[&str] = &[
    ".eslintrc.cjs",
    ".eslintrc.js",
    ".eslintrc.json",
    "eslint.config.js",
    "eslint.config.mjs",
    "eslint.config.cjs",
];

/// Manifest completeness plus tsconfig/src/tests/README presence
pub struct FilesystemSignals {
    required_fields: Vec<String>,
    required_scripts: Vec<String>,
}

impl FilesystemSignals {
    pub fn new(config: &ScoringConfig) -> Self {
        Self {
            required_fields: config.required_fields.clone(),
            required_scripts: config.required_scripts.clone(),
        }
    }
}

impl SignalProvider for FilesystemSignals {
    fn name(&self) -> &'static str {
        "filesystem"
    }

    fn collect(&self, package: &WorkspacePackage) -> PackageSignals {
        let Some(manifest) = &package.manifest else {
            return PackageSignals {
                manifest: Signal::Present(ManifestCheck::Missing),
                ..Default::default()
            };
        };

        let missing_fields = self
            .required_fields
            .iter()
            .filter(|f| !manifest.has_field(f))
            .cloned()
            .collect();
        let missing_scripts = self
            .required_scripts
            .iter()
            .filter(|s| !manifest.has_script(s))
            .cloned()
            .collect();

        let dir = &package.dir;
        PackageSignals {
            manifest: Signal::Present(ManifestCheck::Found {
                missing_fields,
                missing_scripts,
            }),
            tsconfig: Signal::Present(dir.join("tsconfig.json").is_file()),
            src_dir: Signal::Present(dir.join("src").is_dir()),
            tests_dir: Signal::Present(dir.join("tests").is_dir() || dir.join("test").is_dir()),
            readme: Signal::Present(dir.join("README.md").is_file()),
            ..Default::default()
        }
    }
}

/// Presence of workspace-level tooling config at the repository root
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct WorkspaceSignals {
    pub pnpm_workspace: bool,
    pub nx: bool,
    pub ci_workflow: bool,
    pub changesets: bool,
    pub eslint: bool,
    pub root_tsconfig: bool,
}

impl WorkspaceSignals {
    pub fn collect(root: &Path) -> Self {
        Self {
            pnpm_workspace: root.join("pnpm-workspace.yaml").is_file(),
            nx: root.join("nx.json").is_file(),
            ci_workflow: root.join(".github/workflows/ci.yml").is_file(),
            changesets: root.join(".changeset/config.json").is_file(),
            eslint: ESLINT_CONFIGS.iter().any(|f| root.join(f).is_file()),
            root_tsconfig: root.join("tsconfig.json").is_file(),
        }
    }

    /// Every check satisfied
    pub fn complete() -> Self {
        Self {
            pnpm_workspace: true,
            nx: true,
            ci_workflow: true,
            changesets: true,
            eslint: true,
            root_tsconfig: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::loader::load_package;
    use std::fs;

    #[test]
    fn test_missing_manifest_short_circuits() {
        let dir = tempfile::tempdir().expect("tempdir");
        fs::create_dir_all(dir.path().join("packages/bare/src")).expect("mkdir");

        let pkg = load_package(dir.path(), "packages/bare").expect("load");
        let signals = FilesystemSignals::new(&ScoringConfig::default()).collect(&pkg);

        assert_eq!(signals.manifest, Signal::Present(ManifestCheck::Missing));
        assert!(signals.src_dir.is_absent());
    }

    #[test]
    fn test_reports_missing_fields_and_files() {
        let dir = tempfile::tempdir().expect("tempdir");
        let pkg_dir = dir.path().join("packages/core");
        fs::create_dir_all(pkg_dir.join("src")).expect("mkdir");
        fs::create_dir_all(pkg_dir.join("test")).expect("mkdir");
        fs::write(
            pkg_dir.join("package.json"),
            r#"{"name":"@x/core","version":"1.0.0","main":"dist/index.js","scripts":{"build":"tsup","test":"vitest"}}"#,
        )
        .expect("write manifest");

        let pkg = load_package(dir.path(), "packages/core").expect("load");
        let signals = FilesystemSignals::new(&ScoringConfig::default()).collect(&pkg);

        assert_eq!(
            signals.manifest,
            Signal::Present(ManifestCheck::Found {
                missing_fields: vec!["description".into(), "types".into()],
                missing_scripts: vec!["lint".into(), "typecheck".into()],
            })
        );
        assert_eq!(signals.src_dir, Signal::Present(true));
        assert_eq!(signals.tests_dir, Signal::Present(true));
        assert_eq!(signals.tsconfig, Signal::Present(false));
        assert_eq!(signals.readme, Signal::Present(false));
        assert!(signals.coverage.is_absent());
    }

    #[test]
    fn test_workspace_signals() {
        let dir = tempfile::tempdir().expect("tempdir");
        fs::write(dir.path().join("pnpm-workspace.yaml"), "packages: []\n").expect("write");
        fs::write(dir.path().join("eslint.config.js"), "export default []\n").expect("write");
        fs::create_dir_all(dir.path().join(".github/workflows")).expect("mkdir");
        fs::write(dir.path().join(".github/workflows/ci.yml"), "on: push\n").expect("write");

        let ws = WorkspaceSignals::collect(dir.path());
        assert!(ws.pnpm_workspace);
        assert!(ws.eslint);
        assert!(ws.ci_workflow);
        assert!(!ws.nx);
        assert!(!ws.changesets);
        assert!(!ws.root_tsconfig);
    }
}
