//! Pre-recorded answers for non-interactive runs and tests

use async_trait::async_trait;
use std::collections::VecDeque;

use super::{DecisionAnswer, DecisionQuestion, DecisionSource};

/// Replays answers in order; running out means no more answers are
/// available.
#[derive(Debug, Default)]
pub struct ScriptedAnswers {
    answers: VecDeque<DecisionAnswer>,
    asked: Vec<String>,
}

impl ScriptedAnswers {
    pub fn new(answers: impl IntoIterator<Item = DecisionAnswer>) -> Self {
        Self {
            answers: answers.into_iter().collect(),
            asked: Vec::new(),
        }
    }

    pub fn empty() -> Self {
        Self::default()
    }

    /// Keys of the questions received, in order
    pub fn asked(&self) -> &[String] {
        &self.asked
    }

    pub fn remaining(&self) -> usize {
        self.answers.len()
    }
}

#[async_trait]
impl DecisionSource for ScriptedAnswers {
    async fn answer(&mut self, question: &DecisionQuestion) -> Result<DecisionAnswer, String> {
        self.asked.push(question.key.clone());
        self.answers.pop_front().ok_or_else(|| {
            format!(
                "'{}' needs an answer but none was provided (run interactively or pass it as a flag)",
                question.message
            )
        })
    }
}
