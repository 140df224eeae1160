//! Template registry
//!
//! Maps an [`ArtifactKind`] and a [`FrameworkVariant`] to an [`ArtifactPlan`].
//! Each kind has one layout (which files go where); each framework has one
//! [`TemplateSet`] (what those files contain and how they are named). Adding
//! a framework means adding a template set, not new control flow.
//!
//! Resolution is pure: the same inputs always yield the same plan.

pub mod plan;
mod react;
mod vue;

use std::fmt;
use std::path::{Path, PathBuf};

use crate::error::{GenieError, Result};
use crate::framework::FrameworkVariant;
use crate::naming::CanonicalName;

pub use plan::{ArtifactPlan, PlannedFile};

/// Root of all generated source code
pub const SOURCE_DIR: &str = "src";
/// Feature modules live under `src/modules/<Module>`
pub const MODULES_DIR: &str = "src/modules";
/// Stand-alone test cases live under `tests/[<Module>/]`
pub const TESTS_DIR: &str = "tests";

/// What a command asks the engine to produce
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ArtifactKind {
    Component,
    View,
    Module,
    Store,
    Composable,
    Test,
}

impl ArtifactKind {
    pub fn display_name(&self) -> &'static str {
        match self {
            ArtifactKind::Component => "component",
            ArtifactKind::View => "view",
            ArtifactKind::Module => "module",
            ArtifactKind::Store => "store",
            ArtifactKind::Composable => "composable",
            ArtifactKind::Test => "test",
        }
    }
}

impl fmt::Display for ArtifactKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// Where component, view and test artifacts are placed
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub enum Target {
    /// Project-wide `src/components`, `src/views` or `tests`
    #[default]
    Global,
    /// Inside an existing or newly created feature module
    Module(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct ArtifactOptions {
    /// Also emit a loader that mounts the component on its own
    pub standalone: bool,
    /// Place under views/pages instead of components
    pub view: bool,
    pub target: Target,
}

/// File names and contents for one framework
pub(crate) struct TemplateSet {
    pub framework: FrameworkVariant,
    /// Global directory for views (`views` or `pages`)
    pub views_dir: &'static str,
    pub stores_dir: &'static str,
    pub composables_dir: &'static str,

    pub component_file: fn(&CanonicalName) -> String,
    pub component: fn(&CanonicalName) -> String,
    /// Co-located stylesheet, for frameworks without single-file components
    pub stylesheet: Option<FileTemplate>,
    pub test_file: fn(&CanonicalName) -> String,
    pub component_test: fn(&CanonicalName) -> String,
    pub index: fn(&CanonicalName) -> String,
    pub loader_file: fn(&CanonicalName) -> String,
    pub loader: fn(&CanonicalName) -> String,

    pub routes: fn(&CanonicalName) -> String,
    pub module_store: fn(&CanonicalName) -> String,
    pub styles_main: fn(&CanonicalName) -> String,

    pub store: fn(&CanonicalName) -> String,
    pub composable: fn(&CanonicalName) -> String,
    pub test_case: fn(&CanonicalName) -> String,
}

/// Name and content builders for one optional file
pub(crate) struct FileTemplate {
    pub file: fn(&CanonicalName) -> String,
    pub content: fn(&CanonicalName) -> String,
}

static TEMPLATE_SETS: &[&TemplateSet] = &[&vue::TEMPLATES, &react::TEMPLATES];

type Layout = fn(&TemplateSet, &CanonicalName, &ArtifactOptions) -> Result<ArtifactPlan>;

fn template_set(framework: FrameworkVariant) -> Option<&'static TemplateSet> {
    TEMPLATE_SETS
        .iter()
        .copied()
        .find(|set| set.framework == framework)
}

fn layout(kind: ArtifactKind) -> Layout {
    match kind {
        ArtifactKind::Component | ArtifactKind::View => component_layout,
        ArtifactKind::Module => module_layout,
        ArtifactKind::Store => store_layout,
        ArtifactKind::Composable => composable_layout,
        ArtifactKind::Test => test_layout,
    }
}

/// Build the plan for one artifact.
///
/// Fails with [`GenieError::UnsupportedCombination`] for
/// [`FrameworkVariant::Unknown`]; the registry never guesses.
pub fn resolve_artifacts(
    kind: ArtifactKind,
    framework: FrameworkVariant,
    name: &CanonicalName,
    options: &ArtifactOptions,
) -> Result<ArtifactPlan> {
    let set = template_set(framework)
        .ok_or(GenieError::UnsupportedCombination { kind, framework })?;

    let options = if kind == ArtifactKind::View && !options.view {
        ArtifactOptions {
            view: true,
            ..options.clone()
        }
    } else {
        options.clone()
    };

    layout(kind)(set, name, &options)
}

fn component_base(set: &TemplateSet, options: &ArtifactOptions) -> PathBuf {
    match &options.target {
        Target::Global if options.view => Path::new(SOURCE_DIR).join(set.views_dir),
        Target::Global => Path::new(SOURCE_DIR).join("components"),
        // Module skeletons use the same sub-directories for every framework
        Target::Module(module) if options.view => Path::new(MODULES_DIR).join(module).join("views"),
        Target::Module(module) => Path::new(MODULES_DIR).join(module).join("components"),
    }
}

fn component_layout(
    set: &TemplateSet,
    name: &CanonicalName,
    options: &ArtifactOptions,
) -> Result<ArtifactPlan> {
    let dir = component_base(set, options).join(name.as_str());
    let mut plan = ArtifactPlan::new();
    plan.add_dir(&dir);

    plan.add_file(dir.join((set.component_file)(name)), (set.component)(name))?;
    if let Some(stylesheet) = &set.stylesheet {
        plan.add_file(dir.join((stylesheet.file)(name)), (stylesheet.content)(name))?;
    }
    plan.add_file(dir.join((set.test_file)(name)), (set.component_test)(name))?;
    plan.add_file(dir.join("index.js"), (set.index)(name))?;
    if options.standalone {
        plan.add_file(dir.join((set.loader_file)(name)), (set.loader)(name))?;
    }

    Ok(plan)
}

/// Sub-directories of every module, independent of framework
pub const MODULE_DIRS: [&str; 5] = [
    "components",
    "views",
    "styles",
    "styles/components",
    "styles/views",
];

fn module_layout(
    set: &TemplateSet,
    name: &CanonicalName,
    options: &ArtifactOptions,
) -> Result<ArtifactPlan> {
    let base = Path::new(MODULES_DIR).join(name.as_str());
    let mut plan = ArtifactPlan::new();
    plan.add_dir(&base);
    for dir in MODULE_DIRS {
        plan.add_dir(base.join(dir));
    }

    plan.add_file(base.join("styles/main.scss"), (set.styles_main)(name))?;
    plan.add_file(base.join("routes.js"), (set.routes)(name))?;
    plan.add_file(base.join("services.js"), "")?;
    plan.add_file(base.join("store.js"), (set.module_store)(name))?;

    if options.standalone {
        plan.add_file(base.join((set.component_file)(name)), (set.component)(name))?;
        if let Some(stylesheet) = &set.stylesheet {
            plan.add_file(base.join((stylesheet.file)(name)), (stylesheet.content)(name))?;
        }
        plan.add_file(base.join((set.loader_file)(name)), (set.loader)(name))?;
    }

    Ok(plan)
}

fn store_layout(
    set: &TemplateSet,
    name: &CanonicalName,
    _options: &ArtifactOptions,
) -> Result<ArtifactPlan> {
    let dir = Path::new(SOURCE_DIR).join(set.stores_dir);
    let mut plan = ArtifactPlan::new();
    plan.add_dir(&dir);
    plan.add_file(dir.join(format!("{}Store.js", name)), (set.store)(name))?;
    Ok(plan)
}

fn composable_layout(
    set: &TemplateSet,
    name: &CanonicalName,
    _options: &ArtifactOptions,
) -> Result<ArtifactPlan> {
    let dir = Path::new(SOURCE_DIR).join(set.composables_dir);
    let mut plan = ArtifactPlan::new();
    plan.add_dir(&dir);
    plan.add_file(dir.join(format!("{}.js", name.camel())), (set.composable)(name))?;
    Ok(plan)
}

fn test_layout(
    set: &TemplateSet,
    name: &CanonicalName,
    options: &ArtifactOptions,
) -> Result<ArtifactPlan> {
    let dir = match &options.target {
        Target::Global => PathBuf::from(TESTS_DIR),
        Target::Module(module) => Path::new(TESTS_DIR).join(module),
    };
    let mut plan = ArtifactPlan::new();
    plan.add_dir(&dir);
    plan.add_file(dir.join((set.test_file)(name)), (set.test_case)(name))?;
    Ok(plan)
}
