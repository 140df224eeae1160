//! Generation orchestrator
//!
//! Runs one command through a fixed sequence of stages:
//!
//! ```text
//! Start -> FrameworkResolution -> DecisionGathering -> PlanBuilding
//!       -> Confirmation -> Materializing -> Done
//! ```
//!
//! Any fatal error moves the run to `Aborted`. Errors before `Materializing`
//! leave the filesystem untouched; failures while materializing are partial
//! and reported in the [`GenerationResult`].

use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

use crate::decision::{Choice, DecisionAnswer, DecisionQuestion, DecisionResolver, DecisionSource};
use crate::error::{GenieError, Result, Warning};
use crate::framework::{self, manifest, FrameworkVariant};
use crate::materialize::{materialize, FileSystem, GenerationResult};
use crate::naming::{self, CanonicalName};
use crate::project;
use crate::templates::{resolve_artifacts, ArtifactKind, ArtifactOptions, ArtifactPlan, Target};

/// Value of the "Create new module..." choice; never a valid directory name
pub const NEW_MODULE_CHOICE: &str = "+new";
/// Value of the "no module" choice when placing a test case
pub const GLOBAL_CHOICE: &str = "+global";

/// Supported commands
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    CreateComponent,
    CreateModule,
    CreateStore,
    CreateTest,
}

impl Command {
    pub fn display_name(&self) -> &'static str {
        match self {
            Command::CreateComponent => "create-component",
            Command::CreateModule => "create-module",
            Command::CreateStore => "create-store",
            Command::CreateTest => "create-test",
        }
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// Boolean switches passed through from the command line
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Flags {
    pub view: bool,
    pub global: bool,
    pub standalone: bool,
}

/// One command invocation
#[derive(Debug, Clone)]
pub struct Request {
    pub command: Command,
    /// Name as typed by the user
    pub name: String,
    pub flags: Flags,
    /// Target module given up front; skips the module question
    pub module: Option<String>,
    /// Framework pinned by flag, env or config; skips detection
    pub framework: Option<FrameworkVariant>,
    /// Overwrite existing files without asking
    pub force: bool,
}

impl Request {
    pub fn new(command: Command, name: impl Into<String>) -> Self {
        Self {
            command,
            name: name.into(),
            flags: Flags::default(),
            module: None,
            framework: None,
            force: false,
        }
    }

    /// Artifact kind and canonical name this request generates.
    pub fn artifact(&self) -> Result<(ArtifactKind, CanonicalName)> {
        match self.command {
            Command::CreateComponent if self.flags.view => {
                Ok((ArtifactKind::View, naming::normalize(&self.name)?))
            }
            Command::CreateComponent => Ok((ArtifactKind::Component, naming::normalize(&self.name)?)),
            Command::CreateModule => Ok((ArtifactKind::Module, naming::normalize(&self.name)?)),
            Command::CreateStore if naming::hook_suffix(&self.name).is_some() => {
                Ok((ArtifactKind::Composable, naming::normalize_hook(&self.name)?))
            }
            Command::CreateStore => Ok((ArtifactKind::Store, naming::normalize(&self.name)?)),
            Command::CreateTest => Ok((ArtifactKind::Test, naming::normalize(&self.name)?)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Start,
    FrameworkResolution,
    DecisionGathering,
    PlanBuilding,
    Confirmation,
    Materializing,
    Done,
    Aborted,
}

/// A command that stopped before (or instead of) materializing
#[derive(Debug, Error)]
#[error("{error}")]
pub struct Aborted {
    /// Stage that was active when the command failed
    pub stage: Stage,
    #[source]
    pub error: GenieError,
}

/// Everything a finished command produced
#[derive(Debug, Clone)]
pub struct Report {
    pub kind: ArtifactKind,
    pub name: CanonicalName,
    pub framework: FrameworkVariant,
    pub target: Target,
    /// Module skeleton created alongside a component, if any
    pub new_module: Option<CanonicalName>,
    pub warnings: Vec<Warning>,
    pub result: GenerationResult,
}

/// Placement decided during decision gathering
struct Placement {
    target: Target,
    new_module: Option<CanonicalName>,
}

impl Placement {
    fn global() -> Self {
        Self {
            target: Target::Global,
            new_module: None,
        }
    }

    fn existing(module: String) -> Self {
        Self {
            target: Target::Module(module),
            new_module: None,
        }
    }

    fn new_module(module: CanonicalName) -> Self {
        Self {
            target: Target::Module(module.to_string()),
            new_module: Some(module),
        }
    }
}

/// Drives one command at a time against a project root
pub struct Generator<S, F> {
    root: PathBuf,
    resolver: DecisionResolver<S>,
    fs: F,
    stage: Stage,
}

impl<S: DecisionSource, F: FileSystem> Generator<S, F> {
    /// Every path the generator touches is relative to `root`.
    pub fn new(root: impl Into<PathBuf>, source: S, fs: F) -> Self {
        Self {
            root: root.into(),
            resolver: DecisionResolver::new(source),
            fs,
            stage: Stage::Start,
        }
    }

    pub fn stage(&self) -> Stage {
        self.stage
    }

    pub fn resolver(&self) -> &DecisionResolver<S> {
        &self.resolver
    }

    pub fn into_parts(self) -> (S, F) {
        (self.resolver.into_source(), self.fs)
    }

    pub async fn run(&mut self, request: Request) -> std::result::Result<Report, Aborted> {
        self.enter(Stage::Start);
        match self.execute(&request).await {
            Ok(report) => {
                self.enter(Stage::Done);
                Ok(report)
            }
            Err(error) => {
                let stage = self.stage;
                self.enter(Stage::Aborted);
                tracing::debug!(?stage, %error, command = %request.command, "aborted");
                Err(Aborted { stage, error })
            }
        }
    }

    async fn execute(&mut self, request: &Request) -> Result<Report> {
        let (kind, name) = request.artifact()?;

        self.enter(Stage::FrameworkResolution);
        let (framework, warnings) = self.resolve_framework(request.framework).await?;

        self.enter(Stage::DecisionGathering);
        let placement = self.gather(request, kind).await?;

        self.enter(Stage::PlanBuilding);
        let options = ArtifactOptions {
            standalone: request.flags.standalone,
            view: request.flags.view,
            target: placement.target.clone(),
        };
        let mut plan = ArtifactPlan::new();
        if let Some(module) = &placement.new_module {
            plan.merge(resolve_artifacts(
                ArtifactKind::Module,
                framework,
                module,
                &ArtifactOptions::default(),
            )?)?;
        }
        plan.merge(resolve_artifacts(kind, framework, &name, &options)?)?;

        self.enter(Stage::Confirmation);
        if !request.force {
            self.confirm_overwrite(&plan).await?;
        }

        self.enter(Stage::Materializing);
        let result = materialize(&self.fs, &self.root, plan).await;

        Ok(Report {
            kind,
            name,
            framework,
            target: placement.target,
            new_module: placement.new_module,
            warnings,
            result,
        })
    }

    fn enter(&mut self, stage: Stage) {
        tracing::debug!(from = ?self.stage, to = ?stage, "stage");
        self.stage = stage;
    }

    async fn resolve_framework(
        &mut self,
        pinned: Option<FrameworkVariant>,
    ) -> Result<(FrameworkVariant, Vec<Warning>)> {
        if let Some(framework) = pinned.filter(FrameworkVariant::is_known) {
            tracing::debug!(%framework, "framework pinned");
            return Ok((framework, Vec::new()));
        }

        let deps = manifest::load(&self.root).await;
        let detection = framework::detect(deps.as_ref());
        if detection.variant.is_known() {
            tracing::debug!(framework = %detection.variant, "framework detected");
            return Ok((detection.variant, detection.warnings));
        }

        self.enter(Stage::DecisionGathering);
        let question = framework_question(&detection.warnings);
        let answer = self.resolver.select(&question).await?;
        let framework = FrameworkVariant::parse(&answer).ok_or(GenieError::InvalidAnswer {
            key: question.key,
            answer,
        })?;
        Ok((framework, detection.warnings))
    }

    async fn gather(&mut self, request: &Request, kind: ArtifactKind) -> Result<Placement> {
        match kind {
            ArtifactKind::Component | ArtifactKind::View => {
                if request.flags.global {
                    return Ok(Placement::global());
                }
                let modules = project::list_modules(&self.root).await;
                match &request.module {
                    Some(module) => placement_for(module, &modules),
                    None => self.ask_component_module(&modules).await,
                }
            }
            ArtifactKind::Test => {
                let modules = project::list_modules(&self.root).await;
                match &request.module {
                    Some(module) if modules.contains(module) => {
                        Ok(Placement::existing(module.clone()))
                    }
                    Some(module) => Ok(Placement::existing(naming::normalize(module)?.to_string())),
                    None if modules.is_empty() => {
                        tracing::debug!("no modules found, placing test globally");
                        Ok(Placement::global())
                    }
                    None => self.ask_test_module(&modules).await,
                }
            }
            ArtifactKind::Module | ArtifactKind::Store | ArtifactKind::Composable => {
                Ok(Placement::global())
            }
        }
    }

    async fn ask_component_module(&mut self, modules: &[String]) -> Result<Placement> {
        let question = component_module_question(modules);
        match self.resolver.ask(&question).await? {
            DecisionAnswer::Choice(module) => Ok(Placement::existing(module)),
            DecisionAnswer::Text(name) => placement_for(&name, modules),
            DecisionAnswer::Confirm(_) => Err(GenieError::InvalidAnswer {
                key: question.key,
                answer: "confirm".to_string(),
            }),
        }
    }

    async fn ask_test_module(&mut self, modules: &[String]) -> Result<Placement> {
        let question = test_case_module_question(modules);
        let module = self.resolver.select(&question).await?;
        if module == GLOBAL_CHOICE {
            Ok(Placement::global())
        } else {
            Ok(Placement::existing(module))
        }
    }

    /// Ask before overwriting files that already exist.
    async fn confirm_overwrite(&mut self, plan: &ArtifactPlan) -> Result<()> {
        let mut existing = Vec::new();
        for file in plan.files() {
            if self.fs.exists(&self.root.join(&file.path)).await {
                existing.push(file.path.display().to_string());
            }
        }
        if existing.is_empty() {
            return Ok(());
        }

        tracing::debug!(files = ?existing, "planned files already exist");
        let question = DecisionQuestion::confirm(
            "overwrite",
            format!(
                "{} file(s) already exist and will be overwritten ({}). Continue?",
                existing.len(),
                existing.join(", ")
            ),
            false,
        );
        if self.resolver.confirm(&question).await? {
            Ok(())
        } else {
            Err(GenieError::Cancelled)
        }
    }
}

/// One choice per existing module. Directories named like a sentinel
/// choice cannot be offered without becoming ambiguous.
fn module_choices(modules: &[String]) -> Vec<Choice> {
    modules
        .iter()
        .filter(|m| {
            let reserved = matches!(m.as_str(), NEW_MODULE_CHOICE | GLOBAL_CHOICE);
            if reserved {
                tracing::warn!(module = %m, "module name clashes with a menu choice, not offered");
            }
            !reserved
        })
        .map(|m| Choice::new(m, m))
        .collect()
}

fn component_module_question(modules: &[String]) -> DecisionQuestion {
    let mut choices = module_choices(modules);
    choices.push(Choice::new(NEW_MODULE_CHOICE, "Create new module..."));

    DecisionQuestion::dependent(
        "module",
        "Select a module",
        choices,
        NEW_MODULE_CHOICE,
        DecisionQuestion::text("new_module", "Enter new module name").with_placeholder("checkout"),
    )
}

fn test_case_module_question(modules: &[String]) -> DecisionQuestion {
    let mut choices = module_choices(modules);
    choices.push(Choice::new(GLOBAL_CHOICE, "No module").with_hint("tests/"));
    DecisionQuestion::select("test_module", "Select a module for the test case", choices)
}

fn framework_question(warnings: &[Warning]) -> DecisionQuestion {
    let message = if warnings.contains(&Warning::AmbiguousFramework) {
        "Both Vue and React are installed. Which framework should be used?"
    } else {
        "Could not detect a framework. Which one does this project use?"
    };
    let choices = FrameworkVariant::SUPPORTED
        .iter()
        .map(|fw| Choice::new(fw.key(), fw.display_name()))
        .collect();
    DecisionQuestion::select("framework", message, choices)
}

/// Existing module by exact name, or a new module from the normalized name.
fn placement_for(raw: &str, modules: &[String]) -> Result<Placement> {
    if modules.iter().any(|m| m == raw) {
        return Ok(Placement::existing(raw.to_string()));
    }
    let module = naming::normalize(raw)?;
    if modules.iter().any(|m| m == module.as_str()) {
        Ok(Placement::existing(module.to_string()))
    } else {
        Ok(Placement::new_module(module))
    }
}
