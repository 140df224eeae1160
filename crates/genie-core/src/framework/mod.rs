//! Framework detection from the project manifest
//!
//! This module provides:
//! - The [`FrameworkVariant`] every artifact plan is generated for
//! - Classification of a project's declared dependencies
//! - Loading `package.json` from a project root

pub mod manifest;

use semver::{Op, Version, VersionReq};
use std::fmt;

use crate::error::Warning;

pub use manifest::Dependencies;

/// Supported component ecosystems plus the unresolved state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Deserialize, serde::Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FrameworkVariant {
    Vue,
    React,
    Unknown,
}

impl FrameworkVariant {
    /// Frameworks a user can pick when detection is inconclusive.
    pub const SUPPORTED: [FrameworkVariant; 2] = [FrameworkVariant::Vue, FrameworkVariant::React];

    pub fn display_name(&self) -> &'static str {
        match self {
            FrameworkVariant::Vue => "Vue",
            FrameworkVariant::React => "React",
            FrameworkVariant::Unknown => "unknown",
        }
    }

    /// Stable identifier used in answers, config files and env vars.
    pub fn key(&self) -> &'static str {
        match self {
            FrameworkVariant::Vue => "vue",
            FrameworkVariant::React => "react",
            FrameworkVariant::Unknown => "unknown",
        }
    }

    /// Package name whose presence marks a project as using this framework.
    pub fn marker_dependency(&self) -> Option<&'static str> {
        match self {
            FrameworkVariant::Vue => Some("vue"),
            FrameworkVariant::React => Some("react"),
            FrameworkVariant::Unknown => None,
        }
    }

    /// Oldest release the generated templates work with
    /// (`<script setup>` for Vue, hooks for React).
    pub fn minimum_version(&self) -> Option<Version> {
        match self {
            FrameworkVariant::Vue => Some(Version::new(3, 0, 0)),
            FrameworkVariant::React => Some(Version::new(16, 8, 0)),
            FrameworkVariant::Unknown => None,
        }
    }

    /// Parse a user-supplied framework name. `Unknown` is never returned.
    pub fn parse(s: &str) -> Option<FrameworkVariant> {
        match s.trim().to_lowercase().as_str() {
            "vue" | "vuejs" | "vue3" => Some(FrameworkVariant::Vue),
            "react" | "reactjs" => Some(FrameworkVariant::React),
            _ => None,
        }
    }

    pub fn is_known(&self) -> bool {
        !matches!(self, FrameworkVariant::Unknown)
    }
}

impl fmt::Display for FrameworkVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// Result of classifying a project's dependencies
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Detection {
    pub variant: FrameworkVariant,
    /// Version requirement declared for the detected marker dependency
    pub declared_version: Option<String>,
    pub warnings: Vec<Warning>,
}

impl Detection {
    fn unknown() -> Self {
        Self {
            variant: FrameworkVariant::Unknown,
            declared_version: None,
            warnings: Vec::new(),
        }
    }
}

/// Classify a project from its merged dependency set.
///
/// `None` means no manifest could be read. Both markers present yields
/// `Unknown` with an [`Warning::AmbiguousFramework`] so the caller asks.
pub fn detect(deps: Option<&Dependencies>) -> Detection {
    let Some(deps) = deps else {
        return Detection::unknown();
    };

    let found: Vec<(FrameworkVariant, &str)> = FrameworkVariant::SUPPORTED
        .iter()
        .filter_map(|fw| {
            let marker = fw.marker_dependency()?;
            deps.get(marker).map(|version| (*fw, version.as_str()))
        })
        .collect();

    match found.as_slice() {
        [] => Detection::unknown(),
        [(variant, version)] => {
            let mut warnings = Vec::new();
            if let Some(warning) = check_version(*variant, version) {
                warnings.push(warning);
            }
            Detection {
                variant: *variant,
                declared_version: Some(version.to_string()),
                warnings,
            }
        }
        _ => {
            tracing::warn!("both Vue and React are declared; framework must be chosen");
            Detection {
                variant: FrameworkVariant::Unknown,
                declared_version: None,
                warnings: vec![Warning::AmbiguousFramework],
            }
        }
    }
}

/// Warn when the declared requirement allows only releases older than the
/// templates support. Requirements that are not semver (`latest`, git URLs,
/// `workspace:*`) are accepted as-is.
fn check_version(framework: FrameworkVariant, declared: &str) -> Option<Warning> {
    let minimum = framework.minimum_version()?;
    let req = VersionReq::parse(declared.trim()).ok()?;

    let floor = req
        .comparators
        .iter()
        .filter(|c| !matches!(c.op, Op::Less | Op::LessEq))
        .map(|c| Version::new(c.major, c.minor.unwrap_or(0), c.patch.unwrap_or(0)))
        .max()?;

    if floor < minimum {
        Some(Warning::OutdatedFramework {
            framework,
            declared: declared.to_string(),
            minimum,
        })
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn deps(entries: &[(&str, &str)]) -> Dependencies {
        entries
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_missing_manifest_is_unknown() {
        let detection = detect(None);
        assert_eq!(detection.variant, FrameworkVariant::Unknown);
        assert!(detection.warnings.is_empty());
    }

    #[test]
    fn test_no_marker_is_unknown() {
        let d = deps(&[("lodash", "^4.17.21"), ("axios", "^1.6.0")]);
        let detection = detect(Some(&d));
        assert_eq!(detection.variant, FrameworkVariant::Unknown);
        assert!(detection.warnings.is_empty());
    }

    #[test]
    fn test_single_marker_is_detected() {
        let vue = deps(&[("vue", "^3.4.0"), ("pinia", "^2.1.0")]);
        let detection = detect(Some(&vue));
        assert_eq!(detection.variant, FrameworkVariant::Vue);
        assert_eq!(detection.declared_version.as_deref(), Some("^3.4.0"));

        let react = deps(&[("react", "^18.2.0"), ("react-dom", "^18.2.0")]);
        assert_eq!(detect(Some(&react)).variant, FrameworkVariant::React);
    }

    #[test]
    fn test_both_markers_are_ambiguous() {
        let d = deps(&[("vue", "^3.4.0"), ("react", "^18.2.0")]);
        let detection = detect(Some(&d));
        assert_eq!(detection.variant, FrameworkVariant::Unknown);
        assert_eq!(detection.warnings, vec![Warning::AmbiguousFramework]);
    }

    #[test]
    fn test_outdated_versions_warn() {
        let vue2 = deps(&[("vue", "^2.6.14")]);
        let detection = detect(Some(&vue2));
        assert_eq!(detection.variant, FrameworkVariant::Vue);
        assert!(matches!(
            detection.warnings.as_slice(),
            [Warning::OutdatedFramework { .. }]
        ));

        let old_react = deps(&[("react", "~16.4.0")]);
        assert_eq!(detect(Some(&old_react)).warnings.len(), 1);
    }

    #[test]
    fn test_current_or_unparseable_versions_do_not_warn() {
        for version in ["^3.3.0", ">=3.0.0 <4.0.0", "latest", "github:vuejs/core"] {
            let d = deps(&[("vue", version)]);
            assert!(
                detect(Some(&d)).warnings.is_empty(),
                "{version} should not warn"
            );
        }
        let react = deps(&[("react", "16.8.0")]);
        assert!(detect(Some(&react)).warnings.is_empty());
    }

    #[test]
    fn test_parse_framework_names() {
        assert_eq!(FrameworkVariant::parse("Vue"), Some(FrameworkVariant::Vue));
        assert_eq!(FrameworkVariant::parse(" react "), Some(FrameworkVariant::React));
        assert_eq!(FrameworkVariant::parse("svelte"), None);
        assert_eq!(FrameworkVariant::parse("unknown"), None);
    }
}
