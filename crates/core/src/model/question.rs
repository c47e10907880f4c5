use serde::{Deserialize, Serialize};

/// Ordered question bank as supplied by the external source.
pub type QuestionBank = Vec<Question>;

/// A single multiple-choice question.
///
/// Read-only for the lifetime of a session. Choices render in insertion
/// order and duplicates are allowed. Whether `correct_answer` actually
/// appears among the choices is the bank author's responsibility; nothing
/// here enforces it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    #[serde(rename = "question")]
    prompt: String,
    choices: Vec<String>,
    correct_answer: String,
}

impl Question {
    #[must_use]
    pub fn new(
        prompt: impl Into<String>,
        choices: Vec<String>,
        correct_answer: impl Into<String>,
    ) -> Self {
        Self {
            prompt: prompt.into(),
            choices,
            correct_answer: correct_answer.into(),
        }
    }

    #[must_use]
    pub fn prompt(&self) -> &str {
        &self.prompt
    }

    #[must_use]
    pub fn choices(&self) -> &[String] {
        &self.choices
    }

    #[must_use]
    pub fn correct_answer(&self) -> &str {
        &self.correct_answer
    }
}
