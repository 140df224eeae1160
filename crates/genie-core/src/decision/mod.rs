//! Decision resolution
//!
//! Whenever a command needs input it could not get from its flags (which
//! framework, which module, overwrite or not) it asks a [`DecisionSource`]
//! through the [`DecisionResolver`]. This is the only place generation waits
//! on the outside world for an answer.

mod scripted;

use async_trait::async_trait;

use crate::error::{GenieError, Result};

pub use scripted::ScriptedAnswers;

/// One enumerated answer of a select question
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Choice {
    pub value: String,
    pub label: String,
    pub hint: String,
}

impl Choice {
    pub fn new(value: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            label: label.into(),
            hint: String::new(),
        }
    }

    pub fn with_hint(mut self, hint: impl Into<String>) -> Self {
        self.hint = hint.into();
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Prompt {
    /// Exactly one of the listed choices
    Select { choices: Vec<Choice> },
    /// Any non-empty text
    Text { placeholder: Option<String> },
    /// Yes or no
    Confirm { default: bool },
    /// A select where one choice leads to a follow-up question
    Dependent {
        choices: Vec<Choice>,
        trigger: String,
        follow_up: Box<DecisionQuestion>,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecisionQuestion {
    /// Stable identifier, used in errors and scripted answers
    pub key: String,
    pub message: String,
    pub prompt: Prompt,
}

impl DecisionQuestion {
    pub fn select(key: impl Into<String>, message: impl Into<String>, choices: Vec<Choice>) -> Self {
        Self {
            key: key.into(),
            message: message.into(),
            prompt: Prompt::Select { choices },
        }
    }

    pub fn text(key: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            message: message.into(),
            prompt: Prompt::Text { placeholder: None },
        }
    }

    /// Example value shown in an empty text prompt. Other prompts ignore it.
    pub fn with_placeholder(mut self, example: impl Into<String>) -> Self {
        if let Prompt::Text { placeholder } = &mut self.prompt {
            *placeholder = Some(example.into());
        }
        self
    }

    pub fn confirm(key: impl Into<String>, message: impl Into<String>, default: bool) -> Self {
        Self {
            key: key.into(),
            message: message.into(),
            prompt: Prompt::Confirm { default },
        }
    }

    /// Select from `choices`; picking `trigger` asks `follow_up` next.
    pub fn dependent(
        key: impl Into<String>,
        message: impl Into<String>,
        choices: Vec<Choice>,
        trigger: impl Into<String>,
        follow_up: DecisionQuestion,
    ) -> Self {
        Self {
            key: key.into(),
            message: message.into(),
            prompt: Prompt::Dependent {
                choices,
                trigger: trigger.into(),
                follow_up: Box::new(follow_up),
            },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DecisionAnswer {
    /// Value of the selected [`Choice`]
    Choice(String),
    /// Free text, or the follow-up answer of a dependent question
    Text(String),
    Confirm(bool),
}

/// Where answers come from: a terminal, a script, a test double.
///
/// Sources only ever see `Select`, `Text` and `Confirm` prompts; dependent
/// questions are split up by the resolver.
#[async_trait]
pub trait DecisionSource: Send {
    /// Answer one question. An `Err` means the source can no longer answer
    /// (closed input, interrupted); the message is reported to the user.
    async fn answer(&mut self, question: &DecisionQuestion) -> std::result::Result<DecisionAnswer, String>;
}

/// Asks questions one at a time and validates the answers
pub struct DecisionResolver<S> {
    source: S,
    asked: usize,
}

impl<S: DecisionSource> DecisionResolver<S> {
    pub fn new(source: S) -> Self {
        Self { source, asked: 0 }
    }

    /// Number of questions issued to the source so far
    pub fn asked(&self) -> usize {
        self.asked
    }

    pub fn into_source(self) -> S {
        self.source
    }

    pub async fn ask(&mut self, question: &DecisionQuestion) -> Result<DecisionAnswer> {
        match &question.prompt {
            Prompt::Dependent {
                choices,
                trigger,
                follow_up,
            } => {
                let first = DecisionQuestion::select(
                    question.key.clone(),
                    question.message.clone(),
                    choices.clone(),
                );
                match self.ask_one(&first).await? {
                    DecisionAnswer::Choice(value) if value == *trigger => {
                        self.ask_one(follow_up).await
                    }
                    answer => Ok(answer),
                }
            }
            _ => self.ask_one(question).await,
        }
    }

    /// Ask a select question and return the chosen value.
    pub async fn select(&mut self, question: &DecisionQuestion) -> Result<String> {
        match self.ask(question).await? {
            DecisionAnswer::Choice(value) => Ok(value),
            other => Err(invalid(question, &other)),
        }
    }

    pub async fn confirm(&mut self, question: &DecisionQuestion) -> Result<bool> {
        match self.ask(question).await? {
            DecisionAnswer::Confirm(yes) => Ok(yes),
            other => Err(invalid(question, &other)),
        }
    }

    async fn ask_one(&mut self, question: &DecisionQuestion) -> Result<DecisionAnswer> {
        tracing::debug!(key = %question.key, "asking");
        self.asked += 1;
        let answer = self
            .source
            .answer(question)
            .await
            .map_err(|reason| GenieError::DecisionUnavailable { reason })?;
        validate(question, answer)
    }
}

fn validate(question: &DecisionQuestion, answer: DecisionAnswer) -> Result<DecisionAnswer> {
    let valid = match (&question.prompt, &answer) {
        (Prompt::Select { choices }, DecisionAnswer::Choice(value)) => {
            choices.iter().any(|c| c.value == *value)
        }
        (Prompt::Text { .. }, DecisionAnswer::Text(text)) => !text.trim().is_empty(),
        (Prompt::Confirm { .. }, DecisionAnswer::Confirm(_)) => true,
        _ => false,
    };

    if valid {
        Ok(match answer {
            DecisionAnswer::Text(text) => DecisionAnswer::Text(text.trim().to_string()),
            other => other,
        })
    } else {
        Err(invalid(question, &answer))
    }
}

fn invalid(question: &DecisionQuestion, answer: &DecisionAnswer) -> GenieError {
    let answer = match answer {
        DecisionAnswer::Choice(v) | DecisionAnswer::Text(v) => v.clone(),
        DecisionAnswer::Confirm(b) => b.to_string(),
    };
    GenieError::InvalidAnswer {
        key: question.key.clone(),
        answer,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn frameworks() -> DecisionQuestion {
        DecisionQuestion::select(
            "framework",
            "Which framework?",
            vec![Choice::new("vue", "Vue"), Choice::new("react", "React")],
        )
    }

    fn module_question() -> DecisionQuestion {
        DecisionQuestion::dependent(
            "module",
            "Select a module",
            vec![Choice::new("Shop", "Shop"), Choice::new("new", "Create new module...")],
            "new",
            DecisionQuestion::text("new_module", "Enter new module name"),
        )
    }

    #[test]
    fn test_placeholder_only_applies_to_text() {
        let text = DecisionQuestion::text("name", "Name").with_placeholder("checkout");
        assert_eq!(
            text.prompt,
            Prompt::Text {
                placeholder: Some("checkout".into())
            }
        );
        assert_eq!(frameworks().with_placeholder("vue"), frameworks());
    }

    #[tokio::test]
    async fn test_select_accepts_listed_choice() {
        let mut resolver = DecisionResolver::new(ScriptedAnswers::new([DecisionAnswer::Choice(
            "react".into(),
        )]));
        assert_eq!(resolver.select(&frameworks()).await.unwrap(), "react");
        assert_eq!(resolver.asked(), 1);
    }

    #[tokio::test]
    async fn test_select_rejects_unlisted_choice() {
        let mut resolver = DecisionResolver::new(ScriptedAnswers::new([DecisionAnswer::Choice(
            "svelte".into(),
        )]));
        let err = resolver.select(&frameworks()).await.unwrap_err();
        assert!(matches!(err, GenieError::InvalidAnswer { key, .. } if key == "framework"));
    }

    #[tokio::test]
    async fn test_exhausted_source_is_unavailable() {
        let mut resolver = DecisionResolver::new(ScriptedAnswers::empty());
        let err = resolver.ask(&frameworks()).await.unwrap_err();
        assert!(matches!(err, GenieError::DecisionUnavailable { .. }));
    }

    #[tokio::test]
    async fn test_empty_text_is_rejected() {
        let mut resolver =
            DecisionResolver::new(ScriptedAnswers::new([DecisionAnswer::Text("   ".into())]));
        let err = resolver
            .ask(&DecisionQuestion::text("name", "Name"))
            .await
            .unwrap_err();
        assert!(matches!(err, GenieError::InvalidAnswer { .. }));
    }

    #[tokio::test]
    async fn test_dependent_question_without_trigger_asks_once() {
        let mut resolver = DecisionResolver::new(ScriptedAnswers::new([DecisionAnswer::Choice(
            "Shop".into(),
        )]));
        let answer = resolver.ask(&module_question()).await.unwrap();
        assert_eq!(answer, DecisionAnswer::Choice("Shop".into()));
        assert_eq!(resolver.asked(), 1);
    }

    #[tokio::test]
    async fn test_dependent_question_follows_up_on_trigger() {
        let mut resolver = DecisionResolver::new(ScriptedAnswers::new([
            DecisionAnswer::Choice("new".into()),
            DecisionAnswer::Text(" billing ".into()),
        ]));
        let answer = resolver.ask(&module_question()).await.unwrap();
        assert_eq!(answer, DecisionAnswer::Text("billing".into()));
        assert_eq!(resolver.asked(), 2);
    }

    #[tokio::test]
    async fn test_confirm_type_mismatch_is_invalid() {
        let mut resolver =
            DecisionResolver::new(ScriptedAnswers::new([DecisionAnswer::Text("yes".into())]));
        let question = DecisionQuestion::confirm("overwrite", "Overwrite?", false);
        assert!(resolver.confirm(&question).await.is_err());
    }
}
