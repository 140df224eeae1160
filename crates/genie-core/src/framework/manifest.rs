//! `package.json` reading

use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::Path;

/// Flat `dependency name -> version requirement` mapping
pub type Dependencies = BTreeMap<String, String>;

pub const MANIFEST_FILE: &str = "package.json";

/// The parts of `package.json` the detector cares about
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PackageManifest {
    #[serde(default)]
    pub name: Option<String>,

    #[serde(default)]
    pub dependencies: Dependencies,

    #[serde(default)]
    pub dev_dependencies: Dependencies,
}

impl PackageManifest {
    pub fn parse(contents: &str) -> serde_json::Result<Self> {
        serde_json::from_str(contents)
    }

    /// Runtime and development dependencies merged; dev entries win.
    pub fn all_dependencies(&self) -> Dependencies {
        let mut merged = self.dependencies.clone();
        merged.extend(
            self.dev_dependencies
                .iter()
                .map(|(k, v)| (k.clone(), v.clone())),
        );
        merged
    }
}

/// Load the merged dependency set of the project at `root`.
///
/// A missing, unreadable or malformed manifest is reported as `None`;
/// detection then falls back to asking.
pub async fn load(root: &Path) -> Option<Dependencies> {
    let path = root.join(MANIFEST_FILE);
    let contents = match tokio::fs::read_to_string(&path).await {
        Ok(contents) => contents,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            tracing::debug!(path = %path.display(), "no package manifest");
            return None;
        }
        Err(e) => {
            tracing::warn!(path = %path.display(), error = %e, "cannot read package manifest");
            return None;
        }
    };

    match PackageManifest::parse(&contents) {
        Ok(manifest) => Some(manifest.all_dependencies()),
        Err(e) => {
            tracing::warn!(path = %path.display(), error = %e, "malformed package manifest");
            None
        }
    }
}
