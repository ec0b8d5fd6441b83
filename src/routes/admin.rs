use axum::{
    Json, Router,
    body::Body,
    extract::{Path, State},
    http::Request,
    middleware::{self, Next},
    response::Response,
    routing::{delete, get},
};
use uuid::Uuid;

use crate::{
    dto::admin::{ActionResponse, PromptDraft, PromptSummary, SubmissionSummary},
    error::AppError,
    services::admin_service,
    state::SharedState,
};

const ADMIN_TOKEN_HEADER: &str = "x-admin-token";

/// Admin-only routes for authoring prompts and reviewing submissions.
pub fn router(state: SharedState) -> Router<SharedState> {
    Router::new()
        .route("/admin/prompts", get(list_prompts).post(save_prompt))
        .route("/admin/submissions", get(list_submissions))
        .route("/admin/submissions/{id}", delete(delete_submission))
        .route("/admin/submissions/{id}/draft", get(draft_from_submission))
        .route("/admin/data", delete(clear_all_data))
        .route_layer(middleware::from_fn_with_state(state, require_admin_token))
}

/// List every scheduled prompt.
#[utoipa::path(
    get,
    path = "/admin/prompts",
    tag = "admin",
    params(("X-Admin-Token" = String, Header, description = "Configured admin token")),
    responses((status = 200, description = "Prompts in date order", body = [PromptSummary]))
)]
pub async fn list_prompts(State(state): State<SharedState>) -> Json<Vec<PromptSummary>> {
    Json(admin_service::list_prompts(&state).await)
}

/// Validate and store a prompt, replacing any prompt on the same date.
#[utoipa::path(
    post,
    path = "/admin/prompts",
    tag = "admin",
    params(("X-Admin-Token" = String, Header, description = "Configured admin token")),
    request_body = PromptDraft,
    responses(
        (status = 200, description = "Prompt saved", body = PromptSummary),
        (status = 422, description = "Draft failed validation"),
        (status = 503, description = "Storage rejected the write")
    )
)]
pub async fn save_prompt(
    State(state): State<SharedState>,
    Json(draft): Json<PromptDraft>,
) -> Result<Json<PromptSummary>, AppError> {
    Ok(Json(admin_service::save_prompt(&state, draft).await?))
}

/// List question submissions awaiting review.
#[utoipa::path(
    get,
    path = "/admin/submissions",
    tag = "admin",
    params(("X-Admin-Token" = String, Header, description = "Configured admin token")),
    responses((status = 200, description = "Submissions in arrival order", body = [SubmissionSummary]))
)]
pub async fn list_submissions(State(state): State<SharedState>) -> Json<Vec<SubmissionSummary>> {
    Json(admin_service::list_submissions(&state).await)
}

/// Delete a submission.
#[utoipa::path(
    delete,
    path = "/admin/submissions/{id}",
    tag = "admin",
    params(("X-Admin-Token" = String, Header, description = "Configured admin token"),
    ("id" = String, Path, description = "Identifier of the submission to delete")),
    responses((status = 200, description = "Submission deleted", body = ActionResponse))
)]
pub async fn delete_submission(
    State(state): State<SharedState>,
    Path(id): Path<Uuid>,
) -> Result<Json<ActionResponse>, AppError> {
    Ok(Json(admin_service::delete_submission(&state, id).await?))
}

/// Authoring draft pre-filled from a submission.
#[utoipa::path(
    get,
    path = "/admin/submissions/{id}/draft",
    tag = "admin",
    params(("X-Admin-Token" = String, Header, description = "Configured admin token"),
    ("id" = String, Path, description = "Identifier of the submission to use")),
    responses(
        (status = 200, description = "Draft", body = PromptDraft),
        (status = 404, description = "Unknown submission")
    )
)]
pub async fn draft_from_submission(
    State(state): State<SharedState>,
    Path(id): Path<Uuid>,
) -> Result<Json<PromptDraft>, AppError> {
    Ok(Json(admin_service::draft_from_submission(&state, id).await?))
}

/// Erase every stored prompt and submission.
#[utoipa::path(
    delete,
    path = "/admin/data",
    tag = "admin",
    params(("X-Admin-Token" = String, Header, description = "Configured admin token")),
    responses((status = 200, description = "Data cleared", body = ActionResponse))
)]
pub async fn clear_all_data(
    State(state): State<SharedState>,
) -> Result<Json<ActionResponse>, AppError> {
    Ok(Json(admin_service::clear_all_data(&state).await?))
}

async fn require_admin_token(
    State(state): State<SharedState>,
    req: Request<Body>,
    next: Next,
) -> Result<Response, AppError> {
    let provided = req
        .headers()
        .get(ADMIN_TOKEN_HEADER)
        .and_then(|value| value.to_str().ok())
        .map(|value| value.to_owned())
        .ok_or_else(|| {
            AppError::Unauthorized("missing admin token header `X-Admin-Token`".into())
        })?;

    match state.admin_token() {
        Some(token) if token == provided.as_str() => Ok(next.run(req).await),
        Some(_) => Err(AppError::Unauthorized("invalid admin token".into())),
        None => Err(AppError::Unauthorized("admin access is disabled".into())),
    }
}
