use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use uuid::Uuid;

/// Number of ranked answers every prompt carries.
pub const ANSWER_COUNT: usize = 10;

/// Whether any ranked answer is blank once trimmed. Such a rank could never
/// be revealed.
pub fn has_blank_answer(answers: &[String]) -> bool {
    answers.iter().any(|answer| answer.trim().is_empty())
}

/// One day's question with its ranked answers, as persisted.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct PromptEntity {
    /// Stable identifier for the prompt.
    pub id: Uuid,
    /// The question shown to the player.
    pub question: String,
    /// Canonical answers, rank 1 first.
    pub answers: [String; ANSWER_COUNT],
    /// Wider pool used for autocomplete and the answer list. Empty means "use
    /// the ranked answers".
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub all_possible_answers: Vec<String>,
    /// Calendar date (`YYYY-MM-DD`) the prompt is scheduled for.
    pub date: String,
}

impl PromptEntity {
    /// See [`has_blank_answer`].
    pub fn has_blank_answer(&self) -> bool {
        has_blank_answer(&self.answers)
    }

    /// Answers offered for lookup, falling back to the ranked answers.
    pub fn answer_pool(&self) -> &[String] {
        if self.all_possible_answers.is_empty() {
            &self.answers
        } else {
            &self.all_possible_answers
        }
    }
}

/// Record stored under the prompts key.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct PromptCollection {
    /// Prompts in ascending date order, at most one per date.
    #[serde(default)]
    pub prompts: Vec<PromptEntity>,
}

/// Review state of a user submission.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum SubmissionStatus {
    /// Awaiting admin review.
    #[default]
    Pending,
}

impl SubmissionStatus {
    /// Lowercase label matching the persisted form.
    pub fn as_str(&self) -> &'static str {
        match self {
            SubmissionStatus::Pending => "pending",
        }
    }
}

/// A question idea proposed by a player.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct SubmissionEntity {
    /// Stable identifier for the submission.
    pub id: Uuid,
    /// Proposed question text.
    pub question: String,
    /// When the idea was submitted.
    #[serde(with = "time::serde::rfc3339")]
    pub submitted_at: OffsetDateTime,
    /// Review state.
    #[serde(default)]
    pub status: SubmissionStatus,
    /// Optional proposed ranked answers.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub answers: Option<Vec<String>>,
    /// Optional proposed answer pool.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub all_possible_answers: Option<Vec<String>>,
}
