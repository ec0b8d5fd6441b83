use utoipa::OpenApi;

#[derive(OpenApi)]
/// Aggregated OpenAPI specification for the daily top ten API.
#[openapi(
    paths(
        crate::routes::health::healthcheck,
        crate::routes::game::current_game,
        crate::routes::game::submit_guess,
        crate::routes::game::suggestions,
        crate::routes::game::answer_list,
        crate::routes::game::share,
        crate::routes::game::restart,
        crate::routes::submissions::submit_question,
        crate::routes::admin::list_prompts,
        crate::routes::admin::save_prompt,
        crate::routes::admin::list_submissions,
        crate::routes::admin::delete_submission,
        crate::routes::admin::draft_from_submission,
        crate::routes::admin::clear_all_data,
    ),
    components(
        schemas(
            crate::dto::health::HealthResponse,
            crate::dto::game::GameView,
            crate::dto::game::SlotView,
            crate::dto::game::PhaseView,
            crate::dto::game::SlotStatusView,
            crate::dto::game::GuessRequest,
            crate::dto::game::GuessResponse,
            crate::dto::game::GuessOutcomeDto,
            crate::dto::game::SuggestionsResponse,
            crate::dto::game::AnswerListResponse,
            crate::dto::game::PoolEntryView,
            crate::dto::game::ShareResponse,
            crate::dto::submission::SubmissionRequest,
            crate::dto::submission::SubmissionReceipt,
            crate::dto::admin::PromptDraft,
            crate::dto::admin::PromptSummary,
            crate::dto::admin::SubmissionSummary,
            crate::dto::admin::ActionResponse,
        )
    ),
    tags(
        (name = "health", description = "Health check endpoints"),
        (name = "game", description = "Today's guessing session"),
        (name = "submissions", description = "Player question ideas"),
        (name = "admin", description = "Prompt authoring and submission review"),
    )
)]
pub struct ApiDoc;
