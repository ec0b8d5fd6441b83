//! DTO definitions used by the admin REST API and documentation layer.

use serde::{Deserialize, Serialize};
use time::Date;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::{Validate, ValidationError, ValidationErrors};

use crate::{
    dao::models::{ANSWER_COUNT, PromptEntity, SubmissionEntity},
    dto::{
        format_timestamp,
        validation::{error_with_message, parse_calendar_date},
    },
};

/// Prompt authoring form as filled in by an administrator.
///
/// `all_possible_answers` is free text; entries are separated by newlines or
/// commas.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize, ToSchema)]
pub struct PromptDraft {
    #[serde(default)]
    pub question: String,
    #[serde(default)]
    pub answers: Vec<String>,
    #[serde(default)]
    pub all_possible_answers: String,
    #[serde(default)]
    pub date: Option<String>,
}

impl PromptDraft {
    /// Parsed `date` field, or the error reported for it by `validate`.
    pub fn scheduled_date(&self) -> Result<Date, ValidationError> {
        match self.date.as_deref().map(str::trim) {
            None | Some("") => Err(error_with_message("required", "Date is required")),
            Some(date) => parse_calendar_date(date),
        }
    }
}

impl Validate for PromptDraft {
    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();

        if self.question.trim().is_empty() {
            errors.add(
                "question",
                error_with_message("required", "Question is required"),
            );
        }

        let answers_complete = self.answers.len() == ANSWER_COUNT
            && self.answers.iter().all(|answer| !answer.trim().is_empty());
        if !answers_complete {
            errors.add(
                "answers",
                error_with_message("answers_incomplete", "All 10 answers are required"),
            );
        }

        if let Err(e) = self.scheduled_date() {
            errors.add("date", e);
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}

/// Stored prompt as listed for administrators.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct PromptSummary {
    pub id: Uuid,
    pub question: String,
    pub answers: Vec<String>,
    pub all_possible_answers: Vec<String>,
    pub date: String,
}

impl From<PromptEntity> for PromptSummary {
    fn from(prompt: PromptEntity) -> Self {
        let all_possible_answers = prompt.answer_pool().to_vec();
        Self {
            id: prompt.id,
            question: prompt.question,
            answers: prompt.answers.to_vec(),
            all_possible_answers,
            date: prompt.date,
        }
    }
}

/// Stored question submission as listed for administrators.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct SubmissionSummary {
    pub id: Uuid,
    pub question: String,
    pub submitted_at: String,
    pub status: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub answers: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub all_possible_answers: Option<Vec<String>>,
}

impl From<SubmissionEntity> for SubmissionSummary {
    fn from(submission: SubmissionEntity) -> Self {
        Self {
            id: submission.id,
            question: submission.question,
            submitted_at: format_timestamp(submission.submitted_at),
            status: submission.status.as_str().to_owned(),
            answers: submission.answers,
            all_possible_answers: submission.all_possible_answers,
        }
    }
}

/// Generic action acknowledgement used by admin endpoints.
#[derive(Debug, Serialize, ToSchema)]
pub struct ActionResponse {
    pub message: String,
}

impl ActionResponse {
    /// Acknowledge with `message`.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::field_messages;

    fn complete_draft() -> PromptDraft {
        PromptDraft {
            question: "Largest oceans".into(),
            answers: (1..=ANSWER_COUNT).map(|i| format!("answer {i}")).collect(),
            all_possible_answers: String::new(),
            date: Some("2024-02-01".into()),
        }
    }

    #[test]
    fn complete_draft_is_valid() {
        assert!(complete_draft().validate().is_ok());
    }

    #[test]
    fn empty_draft_reports_every_field() {
        let errors = PromptDraft::default().validate().unwrap_err();
        let fields = field_messages(&errors);
        assert_eq!(fields["question"], "Question is required");
        assert_eq!(fields["answers"], "All 10 answers are required");
        assert_eq!(fields["date"], "Date is required");
    }

    #[test]
    fn whitespace_answer_counts_as_missing() {
        let mut draft = complete_draft();
        draft.answers[7] = "   ".into();
        draft.question = "  ".into();

        let fields = field_messages(&draft.validate().unwrap_err());
        assert_eq!(fields.len(), 2);
        assert!(fields.contains_key("answers"));
        assert!(fields.contains_key("question"));
    }

    #[test]
    fn malformed_date_is_rejected() {
        let mut draft = complete_draft();
        draft.date = Some("2024-02-30".into());

        let fields = field_messages(&draft.validate().unwrap_err());
        assert_eq!(fields["date"], "Date must be a valid calendar date");
    }

    #[test]
    fn scheduled_date_matches_what_validate_reports() {
        let mut draft = complete_draft();
        draft.date = Some(" 2024-02-01 ".into());
        assert_eq!(
            draft.scheduled_date().unwrap(),
            time::macros::date!(2024 - 02 - 01)
        );

        draft.date = Some("  ".into());
        assert_eq!(draft.scheduled_date().unwrap_err().code, "required");
    }
}
