//! Project configuration (`genie.yaml`) and environment overrides

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::{GenieError, Result};
use crate::framework::FrameworkVariant;

pub const CONFIG_FILE: &str = "genie.yaml";

/// Environment variable that pins the framework for every command
pub const FRAMEWORK_ENV: &str = "GENIE_FRAMEWORK";

/// Optional settings read from the project root
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GenieConfig {
    /// Skip detection and always generate for this framework
    #[serde(default)]
    pub framework: Option<FrameworkVariant>,
}

impl GenieConfig {
    pub fn parse(path: &Path, contents: &str) -> Result<Self> {
        let config: GenieConfig = serde_yaml::from_str(contents).map_err(|e| GenieError::Config {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        if config.framework == Some(FrameworkVariant::Unknown) {
            return Err(GenieError::Config {
                path: path.to_path_buf(),
                message: "framework must be 'vue' or 'react'".to_string(),
            });
        }
        Ok(config)
    }

    /// Load `genie.yaml` from `root`; a missing file is the default config.
    pub async fn load(root: &Path) -> Result<Self> {
        let path = root.join(CONFIG_FILE);
        match tokio::fs::read_to_string(&path).await {
            Ok(contents) => Self::parse(&path, &contents),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(Self::default()),
            Err(e) => Err(GenieError::Config {
                path,
                message: e.to_string(),
            }),
        }
    }

    /// Apply an override taken from the environment or the command line.
    /// Earlier sources lose to later ones.
    pub fn with_framework(mut self, framework: Option<FrameworkVariant>) -> Self {
        if framework.is_some() {
            self.framework = framework;
        }
        self
    }
}

/// Framework pinned through [`FRAMEWORK_ENV`], if set to a supported value.
pub fn framework_from_env() -> Option<FrameworkVariant> {
    let value = std::env::var(FRAMEWORK_ENV).ok()?;
    let framework = FrameworkVariant::parse(&value);
    if framework.is_none() {
        tracing::warn!(value = %value, "ignoring unsupported {}", FRAMEWORK_ENV);
    }
    framework
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_framework() {
        let config = GenieConfig::parse(Path::new(CONFIG_FILE), "framework: react\n").unwrap();
        assert_eq!(config.framework, Some(FrameworkVariant::React));
    }

    #[test]
    fn test_parse_empty_file() {
        let config = GenieConfig::parse(Path::new(CONFIG_FILE), "{}").unwrap();
        assert_eq!(config, GenieConfig::default());
    }

    #[test]
    fn test_parse_rejects_unknown_framework_and_keys() {
        assert!(GenieConfig::parse(Path::new(CONFIG_FILE), "framework: unknown").is_err());
        assert!(GenieConfig::parse(Path::new(CONFIG_FILE), "framework: svelte").is_err());
        assert!(GenieConfig::parse(Path::new(CONFIG_FILE), "modules: src").is_err());
    }

    #[test]
    fn test_overrides_take_precedence() {
        let config = GenieConfig {
            framework: Some(FrameworkVariant::Vue),
        };
        assert_eq!(
            config.clone().with_framework(Some(FrameworkVariant::React)).framework,
            Some(FrameworkVariant::React)
        );
        assert_eq!(config.with_framework(None).framework, Some(FrameworkVariant::Vue));
    }

    #[tokio::test]
    async fn test_load_missing_file_is_default() {
        let dir = tempfile::tempdir().unwrap();
        assert_eq!(GenieConfig::load(dir.path()).await.unwrap(), GenieConfig::default());
    }

    #[tokio::test]
    async fn test_load_reports_path_on_error() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join(CONFIG_FILE), "framework: [").unwrap();
        let err = GenieConfig::load(dir.path()).await.unwrap_err();
        assert!(err.to_string().contains(CONFIG_FILE));
    }
}
