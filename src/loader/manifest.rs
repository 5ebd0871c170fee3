//! `package.json` model
//!
//! Only the fields the analysis reads are typed; everything else is kept
//! in `extra` so arbitrary required-field checks still work.

use crate::error::{HealthError, Result};
use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::Path;

#[derive(Debug, Clone, Deserialize, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PackageManifest {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub version: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub main: Option<String>,
    #[serde(default)]
    pub types: Option<String>,
    #[serde(default)]
    pub typings: Option<String>,
    #[serde(default)]
    pub scripts: BTreeMap<String, String>,
    #[serde(default)]
    pub dependencies: BTreeMap<String, String>,
    #[serde(default)]
    pub dev_dependencies: BTreeMap<String, String>,
    #[serde(default)]
    pub peer_dependencies: BTreeMap<String, String>,
    #[serde(flatten)]
    pub extra: BTreeMap<String, serde_json::Value>,
}

impl PackageManifest {
    pub fn from_path(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| HealthError::io(path, e))?;
        serde_json::from_str(&content).map_err(|source| HealthError::ManifestParse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Whether a top-level field is present and non-empty
    pub fn has_field(&self, field: &str) -> bool {
        let typed = match field {
            "name" => Some(&self.name),
            "version" => Some(&self.version),
            "description" => Some(&self.description),
            "main" => Some(&self.main),
            "types" | "typings" => {
                return non_blank(&self.types) || non_blank(&self.typings);
            }
            _ => None,
        };
        if let Some(value) = typed {
            return non_blank(value);
        }

        match field {
            "scripts" => !self.scripts.is_empty(),
            "dependencies" => !self.dependencies.is_empty(),
            "devDependencies" => !self.dev_dependencies.is_empty(),
            "peerDependencies" => !self.peer_dependencies.is_empty(),
            other => self.extra.get(other).is_some_and(is_truthy),
        }
    }

    pub fn has_script(&self, script: &str) -> bool {
        self.scripts
            .get(script)
            .is_some_and(|cmd| !cmd.trim().is_empty())
    }
}

fn non_blank(value: &Option<String>) -> bool {
    value.as_deref().is_some_and(|v| !v.trim().is_empty())
}

fn is_truthy(value: &serde_json::Value) -> bool {
    match value {
        serde_json::Value::Null => false,
        serde_json::Value::Bool(b) => *b,
        serde_json::Value::String(s) => !s.is_empty(),
        serde_json::Value::Array(a) => !a.is_empty(),
        serde_json::Value::Object(o) => !o.is_empty(),
        serde_json::Value::Number(_) => true,
    }
}
