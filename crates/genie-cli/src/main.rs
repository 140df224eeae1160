//! genie CLI - Component, module, store and test generation for Vue and React

use anyhow::{Context, Result};
use clap::{Args as ClapArgs, Parser, Subcommand};
use genie_core::{framework_from_env, Command as GenieCommand, FrameworkVariant, GenieConfig, Request};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Environment variable holding the log filter (`warn` by default)
const LOG_ENV: &str = "GENIE_LOG";

#[derive(Parser, Debug)]
#[command(name = "genie")]
#[command(about = "CLI for generating Vue and React components, modules, stores and tests")]
#[command(version)]
pub struct Args {
    /// Project root to generate into (defaults to the current directory)
    #[arg(short = 'C', long = "dir", global = true)]
    pub dir: Option<PathBuf>,

    /// Framework to generate for, skipping detection (vue or react)
    #[arg(long, global = true, value_parser = parse_framework)]
    pub framework: Option<FrameworkVariant>,

    /// Overwrite existing files without asking
    #[arg(short, long, alias = "force", global = true)]
    pub yes: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Create a component or view
    #[command(name = "create-component", alias = "cr")]
    CreateComponent(ComponentArgs),
    /// Create a feature module with its directory skeleton
    #[command(name = "create-module", alias = "cm")]
    CreateModule(ModuleArgs),
    /// Create a store, or a composable/hook when the name starts with `use`
    #[command(name = "create-store", alias = "cs")]
    CreateStore(NameArgs),
    /// Create a standalone test file
    #[command(name = "create-test", alias = "ct")]
    CreateTest(TestArgs),
}

#[derive(ClapArgs, Debug)]
pub struct NameArgs {
    /// Name of the artifact (any case; normalized to PascalCase)
    pub name: String,
}

#[derive(ClapArgs, Debug)]
pub struct ComponentArgs {
    /// Name of the component (any case; normalized to PascalCase)
    pub name: String,

    /// Generate a view (page) instead of a component
    #[arg(short, long)]
    pub view: bool,

    /// Place it in the global components directory
    #[arg(short, long, conflicts_with = "module")]
    pub global: bool,

    /// Also generate a standalone mount loader
    #[arg(short, long)]
    pub standalone: bool,

    /// Module to place it in
    #[arg(short, long)]
    pub module: Option<String>,
}

#[derive(ClapArgs, Debug)]
pub struct ModuleArgs {
    /// Name of the module
    pub name: String,

    /// Also generate a standalone mount loader for the root view
    #[arg(short, long)]
    pub standalone: bool,
}

#[derive(ClapArgs, Debug)]
pub struct TestArgs {
    /// Name of the unit under test
    pub name: String,

    /// Module whose tests directory receives the file
    #[arg(short, long)]
    pub module: Option<String>,
}

fn parse_framework(value: &str) -> std::result::Result<FrameworkVariant, String> {
    FrameworkVariant::parse(value)
        .ok_or_else(|| format!("unsupported framework '{}' (expected vue or react)", value))
}

impl From<Command> for Request {
    fn from(command: Command) -> Self {
        match command {
            Command::CreateComponent(args) => {
                let mut request = Request::new(GenieCommand::CreateComponent, args.name);
                request.flags.view = args.view;
                request.flags.global = args.global;
                request.flags.standalone = args.standalone;
                request.module = args.module;
                request
            }
            Command::CreateModule(args) => {
                let mut request = Request::new(GenieCommand::CreateModule, args.name);
                request.flags.standalone = args.standalone;
                request
            }
            Command::CreateStore(args) => Request::new(GenieCommand::CreateStore, args.name),
            Command::CreateTest(args) => {
                let mut request = Request::new(GenieCommand::CreateTest, args.name);
                request.module = args.module;
                request
            }
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Ensure terminal cursor is restored on panic
    let default_panic = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let _ = console::Term::stderr().show_cursor();
        default_panic(info);
    }));

    // Handle Ctrl+C gracefully
    ctrlc::set_handler(move || {
        let _ = console::Term::stderr().show_cursor();
        std::process::exit(130);
    })
    .ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    let args = Args::parse();

    let root = match args.dir {
        Some(dir) => dir,
        None => std::env::current_dir().context("failed to read the current directory")?,
    };

    let config = GenieConfig::load(&root)
        .await?
        .with_framework(framework_from_env())
        .with_framework(args.framework);
    tracing::debug!(root = %root.display(), framework = ?config.framework, "resolved settings");

    let mut request = Request::from(args.command);
    request.framework = config.framework;
    request.force = args.yes;

    let succeeded = genie_core::run(&root, request).await;

    // Ensure cursor is visible on normal exit
    let _ = console::Term::stderr().show_cursor();

    if !succeeded? {
        std::process::exit(1);
    }
    Ok(())
}
