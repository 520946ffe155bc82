use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct Question {
    pub id: i64,
    pub quiz_id: i64,
    #[serde(rename = "question")]
    pub prompt: String,
    #[serde(rename = "type")]
    pub question_type: QuestionType,
    pub options: Vec<QuestionOption>,
    pub correct_answer: Answer,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub explanation: Option<String>,
    pub points: i32,
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct QuestionOption {
    pub id: String,
    pub text: String,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum QuestionType {
    MultipleChoice,
    TrueFalse,
    Matching,
}

/// An answer is either one option id or a list of them (matching questions).
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
#[serde(untagged)]
pub enum Answer {
    Single(String),
    Multiple(Vec<String>),
}

impl Answer {
    pub fn single(id: impl Into<String>) -> Self {
        Answer::Single(id.into())
    }

    pub fn ids(&self) -> Vec<&str> {
        match self {
            Answer::Single(id) => vec![id.as_str()],
            Answer::Multiple(ids) => ids.iter().map(String::as_str).collect(),
        }
    }

    /// An empty selection does not count as answered.
    pub fn is_empty(&self) -> bool {
        match self {
            Answer::Single(id) => id.trim().is_empty(),
            Answer::Multiple(ids) => ids.is_empty(),
        }
    }

    /// Order-insensitive for lists.
    pub fn matches(&self, other: &Answer) -> bool {
        let mut left = self.ids();
        let mut right = other.ids();
        left.sort_unstable();
        right.sort_unstable();
        left == right
    }
}

impl Question {
    pub fn option_text(&self, option_id: &str) -> Option<&str> {
        self.options
            .iter()
            .find(|o| o.id == option_id)
            .map(|o| o.text.as_str())
    }

    /// Option texts for an answer, falling back to the raw id when unknown.
    pub fn describe(&self, answer: &Answer) -> String {
        answer
            .ids()
            .into_iter()
            .map(|id| self.option_text(id).unwrap_or(id).to_string())
            .collect::<Vec<_>>()
            .join(", ")
    }

    pub fn is_correct(&self, answer: &Answer) -> bool {
        self.correct_answer.matches(answer)
    }
}
