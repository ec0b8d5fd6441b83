use tracing::info;
use uuid::Uuid;
use validator::Validate;

use crate::{
    dao::models::{SubmissionEntity, SubmissionStatus},
    dto::submission::{SubmissionReceipt, SubmissionRequest},
    error::ServiceError,
    state::SharedState,
};

/// Store a player's question idea for admin review.
pub async fn submit_question(
    state: &SharedState,
    request: SubmissionRequest,
) -> Result<SubmissionReceipt, ServiceError> {
    request.validate()?;

    let submission = SubmissionEntity {
        id: Uuid::new_v4(),
        question: request.question.trim().to_owned(),
        submitted_at: state.store().now(),
        status: SubmissionStatus::Pending,
        answers: request.answers,
        all_possible_answers: request.all_possible_answers,
    };
    state.store().save_submission(submission.clone())?;
    info!(submission_id = %submission.id, "question submitted");

    Ok(SubmissionReceipt::from(&submission))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::test_state;

    fn request(question: &str) -> SubmissionRequest {
        SubmissionRequest {
            question: question.into(),
            answers: None,
            all_possible_answers: None,
        }
    }

    #[tokio::test]
    async fn stores_trimmed_pending_submission() {
        let harness = test_state();

        let receipt = submit_question(&harness.state, request("  Longest rivers  "))
            .await
            .unwrap();
        assert_eq!(receipt.status, "pending");
        assert_eq!(receipt.submitted_at, "2024-01-01T09:00:00Z");

        let stored = harness.state.store().submissions();
        assert_eq!(stored.len(), 1);
        assert_eq!(stored[0].id, receipt.id);
        assert_eq!(stored[0].question, "Longest rivers");
        assert_eq!(stored[0].status, SubmissionStatus::Pending);
    }

    #[tokio::test]
    async fn blank_question_is_not_stored() {
        let harness = test_state();

        let err = submit_question(&harness.state, request("   "))
            .await
            .unwrap_err();
        assert!(matches!(err, ServiceError::Validation(_)));
        assert!(harness.state.store().submissions().is_empty());
    }

    #[tokio::test]
    async fn write_failure_is_reported() {
        let harness = test_state();
        harness.kv.reject_writes(true);

        let err = submit_question(&harness.state, request("Deepest lakes"))
            .await
            .unwrap_err();
        assert!(matches!(err, ServiceError::Unavailable(_)));
    }
}
