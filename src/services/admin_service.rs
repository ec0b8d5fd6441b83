use tracing::info;
use uuid::Uuid;
use validator::{Validate, ValidationErrors};

use crate::{
    clock::format_date,
    dao::models::{ANSWER_COUNT, PromptEntity},
    dto::admin::{ActionResponse, PromptDraft, PromptSummary, SubmissionSummary},
    error::ServiceError,
    state::SharedState,
};

/// Every stored prompt in date order.
pub async fn list_prompts(state: &SharedState) -> Vec<PromptSummary> {
    state
        .store()
        .all_prompts()
        .into_iter()
        .map(PromptSummary::from)
        .collect()
}

/// Validate `draft` and persist the resulting prompt, replacing any prompt
/// scheduled for the same date. Saving today's prompt restarts the session.
pub async fn save_prompt(
    state: &SharedState,
    draft: PromptDraft,
) -> Result<PromptSummary, ServiceError> {
    let prompt = build_prompt(&draft)?;
    let scheduled_today = prompt.date == state.store().today();

    state.store().save_prompt(prompt.clone())?;
    info!(date = %prompt.date, prompt_id = %prompt.id, "prompt saved");

    if scheduled_today {
        state.restart_session().await;
    }

    Ok(prompt.into())
}

/// Turn a validated draft into a prompt with a fresh id.
pub fn build_prompt(draft: &PromptDraft) -> Result<PromptEntity, ValidationErrors> {
    draft.validate()?;
    let date = draft.scheduled_date().map(format_date).map_err(|err| {
        let mut errors = ValidationErrors::new();
        errors.add("date", err);
        errors
    })?;

    let answers: [String; ANSWER_COUNT] =
        std::array::from_fn(|index| draft.answers[index].trim().to_owned());
    let mut all_possible_answers = parse_answer_pool(&draft.all_possible_answers);
    if all_possible_answers.is_empty() {
        all_possible_answers = answers.to_vec();
    }

    Ok(PromptEntity {
        id: Uuid::new_v4(),
        question: draft.question.trim().to_owned(),
        answers,
        all_possible_answers,
        date,
    })
}

/// Split free text on newlines or commas into trimmed, non-empty entries.
pub fn parse_answer_pool(raw: &str) -> Vec<String> {
    raw.split(['\n', ','])
        .map(str::trim)
        .filter(|entry| !entry.is_empty())
        .map(str::to_owned)
        .collect()
}

/// Every stored submission in submission order.
pub async fn list_submissions(state: &SharedState) -> Vec<SubmissionSummary> {
    state
        .store()
        .submissions()
        .into_iter()
        .map(SubmissionSummary::from)
        .collect()
}

/// Remove a submission. Unknown ids are accepted and change nothing.
pub async fn delete_submission(
    state: &SharedState,
    id: Uuid,
) -> Result<ActionResponse, ServiceError> {
    state.store().delete_submission(id)?;
    info!(submission_id = %id, "submission deleted");
    Ok(ActionResponse::new(format!("submission `{id}` deleted")))
}

/// Authoring draft pre-filled from a submission.
pub async fn draft_from_submission(
    state: &SharedState,
    id: Uuid,
) -> Result<PromptDraft, ServiceError> {
    let Some(submission) = state
        .store()
        .submissions()
        .into_iter()
        .find(|submission| submission.id == id)
    else {
        return Err(ServiceError::NotFound(format!("submission `{id}` not found")));
    };

    Ok(PromptDraft {
        question: submission.question,
        answers: submission.answers.unwrap_or_default(),
        all_possible_answers: submission
            .all_possible_answers
            .map(|pool| pool.join("\n"))
            .unwrap_or_default(),
        date: None,
    })
}

/// Erase every prompt and submission, then restart on the seeded default.
pub async fn clear_all_data(state: &SharedState) -> Result<ActionResponse, ServiceError> {
    state.store().clear_all_data()?;
    state.restart_session().await;
    Ok(ActionResponse::new("all data cleared"))
}
