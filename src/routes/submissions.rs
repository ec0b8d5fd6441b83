use axum::{Json, Router, extract::State, http::StatusCode, routing::post};

use crate::{
    dto::submission::{SubmissionReceipt, SubmissionRequest},
    error::AppError,
    services::submission_service,
    state::SharedState,
};

/// Public route for proposing new questions.
pub fn router() -> Router<SharedState> {
    Router::new().route("/submissions", post(submit_question))
}

/// Propose a question for a future day.
#[utoipa::path(
    post,
    path = "/submissions",
    tag = "submissions",
    request_body = SubmissionRequest,
    responses(
        (status = 201, description = "Submission stored", body = SubmissionReceipt),
        (status = 422, description = "Question is blank"),
        (status = 503, description = "Storage rejected the write")
    )
)]
pub async fn submit_question(
    State(state): State<SharedState>,
    Json(payload): Json<SubmissionRequest>,
) -> Result<(StatusCode, Json<SubmissionReceipt>), AppError> {
    let receipt = submission_service::submit_question(&state, payload).await?;
    Ok((StatusCode::CREATED, Json(receipt)))
}

#[cfg(test)]
mod tests {
    use axum::http::StatusCode;
    use serde_json::json;

    use crate::{routes::test_client::send, test_support::test_state};

    #[tokio::test]
    async fn submission_is_stored() {
        let harness = test_state();
        let app = crate::routes::router(harness.state.clone());

        let (status, body) = send(
            app,
            "POST",
            "/submissions",
            None,
            Some(json!({ "question": " Most spoken languages " })),
        )
        .await;

        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(body["status"], "pending");
        let stored = harness.state.store().submissions();
        assert_eq!(stored[0].question, "Most spoken languages");
    }

    #[tokio::test]
    async fn blank_submission_reports_field_error() {
        let harness = test_state();
        let app = crate::routes::router(harness.state.clone());

        let (status, body) = send(
            app,
            "POST",
            "/submissions",
            None,
            Some(json!({ "question": "" })),
        )
        .await;

        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(body["fields"]["question"], "Question is required");
        assert!(harness.state.store().submissions().is_empty());
    }

    #[tokio::test]
    async fn rejected_write_is_service_unavailable() {
        let harness = test_state();
        harness.kv.reject_writes(true);
        let app = crate::routes::router(harness.state.clone());

        let (status, _) = send(
            app,
            "POST",
            "/submissions",
            None,
            Some(json!({ "question": "Busiest airports" })),
        )
        .await;
        assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    }
}
