use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::{
    dao::models::SubmissionEntity,
    dto::{format_timestamp, validation::validate_not_blank},
};

/// Question idea proposed by a player.
#[derive(Debug, Deserialize, ToSchema, Validate)]
pub struct SubmissionRequest {
    #[validate(custom(function = "validate_not_blank", message = "Question is required"))]
    pub question: String,
    /// Optional proposed ranked answers.
    #[serde(default)]
    pub answers: Option<Vec<String>>,
    /// Optional proposed answer pool.
    #[serde(default)]
    pub all_possible_answers: Option<Vec<String>>,
}

/// Acknowledgement returned once a submission is stored.
#[derive(Debug, Serialize, ToSchema)]
pub struct SubmissionReceipt {
    pub id: Uuid,
    pub status: String,
    pub submitted_at: String,
}

impl From<&SubmissionEntity> for SubmissionReceipt {
    fn from(submission: &SubmissionEntity) -> Self {
        Self {
            id: submission.id,
            status: submission.status.as_str().to_owned(),
            submitted_at: format_timestamp(submission.submitted_at),
        }
    }
}
