//! Genie Core - Framework-aware code generation for Vue and React projects
//!
//! This library turns a short request ("create a component called
//! `my-button`") into a set of files laid out the way the target project
//! expects them. It is used by the `genie` binary but has no terminal
//! dependency of its own unless the `tui` feature is enabled.
//!
//! # Architecture
//!
//! The library is organized into layers:
//!
//! - **Layer 1: Pure building blocks** - name normalization, framework
//!   detection, template resolution into an [`ArtifactPlan`]
//! - **Layer 2: Orchestration** - the [`Generator`] pipeline, which asks
//!   questions through a [`DecisionSource`] and writes through a [`FileSystem`]
//! - **Layer 3: CLI/TUI Interface** - Optional cliclack-based prompts (feature-gated)
//!
//! # Feature Flags
//!
//! - `tui` (default): Enables the cliclack-based prompts module
//!
//! # Example Usage (without TUI)
//!
//! ```ignore
//! use genie_core::{Command, Generator, Request, ScriptedAnswers, TokioFs};
//!
//! let answers = ScriptedAnswers::empty();
//! let mut generator = Generator::new(".", answers, TokioFs);
//! let mut request = Request::new(Command::CreateComponent, "my-button");
//! request.flags.global = true;
//! let report = generator.run(request).await?;
//! ```

pub mod config;
pub mod decision;
pub mod error;
pub mod framework;
pub mod generator;
pub mod materialize;
pub mod naming;
pub mod project;
pub mod templates;

#[cfg(feature = "tui")]
pub mod tui;

// Re-export main types for convenience
pub use config::{framework_from_env, GenieConfig};
pub use decision::{
    DecisionAnswer, DecisionQuestion, DecisionResolver, DecisionSource, ScriptedAnswers,
};
pub use error::{GenieError, Result, Warning};
pub use framework::FrameworkVariant;
pub use generator::{Command, Flags, Generator, Report, Request, Stage};
pub use materialize::{materialize, FileSystem, GenerationResult, Status, TokioFs};
pub use naming::{normalize, CanonicalName};
pub use templates::{resolve_artifacts, ArtifactKind, ArtifactOptions, ArtifactPlan, Target};

#[cfg(feature = "tui")]
pub use tui::run;
