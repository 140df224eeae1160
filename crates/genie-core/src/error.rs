//! Error and warning types for the generation engine

use std::path::PathBuf;
use thiserror::Error;

use crate::framework::FrameworkVariant;
use crate::templates::ArtifactKind;

/// Fatal errors raised by the engine.
///
/// Every variant aborts the current command. Failures of individual file
/// writes are not errors: they are collected in
/// [`GenerationResult::failures`](crate::materialize::GenerationResult).
#[derive(Debug, Error)]
pub enum GenieError {
    #[error("'{raw}' cannot be turned into a component name (use letters and digits, starting with a letter)")]
    InvalidName { raw: String },

    #[error("no {kind} template for framework '{framework}'")]
    UnsupportedCombination {
        kind: ArtifactKind,
        framework: FrameworkVariant,
    },

    #[error("no answer available: {reason}")]
    DecisionUnavailable { reason: String },

    #[error("'{answer}' is not a valid answer for '{key}'")]
    InvalidAnswer { key: String, answer: String },

    #[error("artifact plan already contains {}", path.display())]
    DuplicateArtifact { path: PathBuf },

    #[error("generation cancelled")]
    Cancelled,

    #[error("invalid configuration in {}: {message}", path.display())]
    Config { path: PathBuf, message: String },
}

pub type Result<T> = std::result::Result<T, GenieError>;

/// Non-fatal conditions that are reported but never stop a command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Warning {
    /// Both marker dependencies are declared; the framework must be chosen.
    AmbiguousFramework,
    /// The declared marker version predates what the templates target.
    OutdatedFramework {
        framework: FrameworkVariant,
        declared: String,
        minimum: semver::Version,
    },
}

impl std::fmt::Display for Warning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Warning::AmbiguousFramework => {
                write!(f, "Both Vue and React are declared in package.json")
            }
            Warning::OutdatedFramework {
                framework,
                declared,
                minimum,
            } => write!(
                f,
                "{} {} is declared but generated code targets {} or newer",
                framework, declared, minimum
            ),
        }
    }
}
