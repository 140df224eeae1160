//! Terminal decision source and command report

use anyhow::Result;
use async_trait::async_trait;
use colored::Colorize;
use std::io;
use std::path::Path;

use crate::decision::{DecisionAnswer, DecisionQuestion, DecisionSource, Prompt};
use crate::generator::{Generator, Report, Request};
use crate::materialize::{Status, TokioFs};
use crate::templates::ArtifactKind;

/// Answers questions interactively on the terminal
#[derive(Debug, Default)]
pub struct TerminalPrompts;

#[async_trait]
impl DecisionSource for TerminalPrompts {
    async fn answer(&mut self, question: &DecisionQuestion) -> Result<DecisionAnswer, String> {
        let answer = match &question.prompt {
            Prompt::Select { choices } => {
                let mut select = cliclack::select(&question.message);
                for choice in choices {
                    select = select.item(choice.value.clone(), &choice.label, &choice.hint);
                }
                select.interact().map(DecisionAnswer::Choice)
            }
            Prompt::Text { placeholder } => {
                let mut input = cliclack::input(&question.message).validate(|value: &String| {
                    if value.trim().is_empty() {
                        Err("Please enter a name")
                    } else {
                        Ok(())
                    }
                });
                if let Some(placeholder) = placeholder {
                    input = input.placeholder(placeholder);
                }
                input.interact().map(DecisionAnswer::Text)
            }
            Prompt::Confirm { default } => cliclack::confirm(&question.message)
                .initial_value(*default)
                .interact()
                .map(DecisionAnswer::Confirm),
            Prompt::Dependent { .. } => {
                return Err(format!(
                    "'{}' must be asked through the resolver",
                    question.key
                ))
            }
        };

        answer.map_err(describe_input_error)
    }
}

fn describe_input_error(e: io::Error) -> String {
    match e.kind() {
        io::ErrorKind::Interrupted => "cancelled by user".to_string(),
        _ => format!("terminal input unavailable ({})", e),
    }
}

/// Run one command with interactive prompts and print its outcome.
///
/// Returns `true` when every artifact was written.
pub async fn run(root: &Path, request: Request) -> Result<bool> {
    cliclack::intro(format!("genie {}", request.command))?;

    let mut generator = Generator::new(root, TerminalPrompts, TokioFs);
    let outcome = generator.run(request).await;

    // Prompts may leave the cursor hidden when interrupted
    let _ = console::Term::stderr().show_cursor();

    match outcome {
        Ok(report) => {
            print_report(&report)?;
            Ok(report.result.status() == Status::Success)
        }
        Err(aborted) => {
            cliclack::log::error(format!("{}", aborted))?;
            cliclack::outro_cancel("Nothing was generated")?;
            Ok(false)
        }
    }
}

fn print_report(report: &Report) -> Result<()> {
    cliclack::log::info(format!("Framework: {}", report.framework))?;
    for warning in &report.warnings {
        cliclack::log::warning(warning.to_string())?;
    }

    if let Some(module) = &report.new_module {
        cliclack::log::info(format!("Created module {}", module.to_string().cyan()))?;
    }

    let result = &report.result;
    if !result.created.is_empty() {
        let files: Vec<String> = result
            .created
            .iter()
            .map(|p| format!("  {}", p.display()))
            .collect();
        cliclack::log::success(format!(
            "{} {} created\n{}",
            report.name.to_string().bold(),
            report.kind,
            files.join("\n").dimmed()
        ))?;
    }

    for failure in &result.failures {
        cliclack::log::error(format!(
            "{} {}",
            failure.path.display().to_string().red(),
            failure.reason
        ))?;
    }

    if let Some(hint) = import_hint(report) {
        cliclack::log::remark(format!("Import: {}", hint.yellow()))?;
    }

    match result.status() {
        Status::Success => cliclack::outro("Happy coding!")?,
        Status::Partial => cliclack::outro_cancel(format!(
            "{} path(s) could not be created",
            result.failures.len()
        ))?,
    }

    Ok(())
}

/// `import` statement for stores and composables, based on where they landed.
fn import_hint(report: &Report) -> Option<String> {
    let symbol = match report.kind {
        ArtifactKind::Store => format!("use{}Store", report.name),
        ArtifactKind::Composable => report.name.camel(),
        _ => return None,
    };
    let path = report.result.created.first()?;
    let module = path
        .strip_prefix(crate::templates::SOURCE_DIR)
        .ok()?
        .with_extension("");
    Some(format!(
        "import {{ {} }} from '@/{}'",
        symbol,
        module.to_string_lossy().replace('\\', "/")
    ))
}
