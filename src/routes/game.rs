use axum::{
    Json, Router,
    extract::{Query, State},
    routing::{get, post},
};

use crate::{
    dto::game::{
        AnswerListQuery, AnswerListResponse, GameView, GuessRequest, GuessResponse,
        ShareResponse, SuggestionQuery, SuggestionsResponse,
    },
    error::AppError,
    services::game_service,
    state::SharedState,
};

/// Player-facing routes driving the running session.
pub fn router() -> Router<SharedState> {
    Router::new()
        .route("/game", get(current_game))
        .route("/game/guess", post(submit_guess))
        .route("/game/suggestions", get(suggestions))
        .route("/game/answers", get(answer_list))
        .route("/game/share", get(share))
        .route("/game/restart", post(restart))
}

/// Current board, lives and phase.
#[utoipa::path(
    get,
    path = "/game",
    tag = "game",
    responses((status = 200, description = "Running session", body = GameView))
)]
pub async fn current_game(State(state): State<SharedState>) -> Json<GameView> {
    Json(game_service::current_game(&state).await)
}

/// Submit a guess against today's prompt.
#[utoipa::path(
    post,
    path = "/game/guess",
    tag = "game",
    request_body = GuessRequest,
    responses(
        (status = 200, description = "Guess evaluated; duplicates and ignored guesses change nothing", body = GuessResponse)
    )
)]
pub async fn submit_guess(
    State(state): State<SharedState>,
    Json(payload): Json<GuessRequest>,
) -> Json<GuessResponse> {
    Json(game_service::submit_guess(&state, &payload.guess).await)
}

/// Autocomplete candidates for a partial guess.
#[utoipa::path(
    get,
    path = "/game/suggestions",
    tag = "game",
    params(SuggestionQuery),
    responses((status = 200, description = "Up to ten unrevealed pool entries", body = SuggestionsResponse))
)]
pub async fn suggestions(
    State(state): State<SharedState>,
    Query(query): Query<SuggestionQuery>,
) -> Json<SuggestionsResponse> {
    Json(game_service::suggestions(&state, &query.q).await)
}

/// Searchable answer pool.
#[utoipa::path(
    get,
    path = "/game/answers",
    tag = "game",
    params(AnswerListQuery),
    responses((status = 200, description = "Matching pool entries", body = AnswerListResponse))
)]
pub async fn answer_list(
    State(state): State<SharedState>,
    Query(query): Query<AnswerListQuery>,
) -> Json<AnswerListResponse> {
    Json(game_service::answer_list(&state, &query.search).await)
}

/// Spoiler-free result text for the client to copy.
#[utoipa::path(
    get,
    path = "/game/share",
    tag = "game",
    responses(
        (status = 200, description = "Share summary", body = ShareResponse),
        (status = 409, description = "Game still in progress")
    )
)]
pub async fn share(State(state): State<SharedState>) -> Result<Json<ShareResponse>, AppError> {
    Ok(Json(game_service::share(&state).await?))
}

/// Discard progress and start over on today's prompt.
#[utoipa::path(
    post,
    path = "/game/restart",
    tag = "game",
    responses((status = 200, description = "Fresh session", body = GameView))
)]
pub async fn restart(State(state): State<SharedState>) -> Json<GameView> {
    Json(game_service::restart(&state).await)
}

#[cfg(test)]
mod tests {
    use axum::http::StatusCode;
    use serde_json::json;

    use crate::{routes::test_client::send, test_support::test_state};

    #[tokio::test]
    async fn guess_round_trip_over_http() {
        let harness = test_state();
        let app = crate::routes::router(harness.state.clone());

        let (status, body) = send(
            app.clone(),
            "POST",
            "/game/guess",
            None,
            Some(json!({ "guess": "Brazil" })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["outcome"]["kind"], "correct");
        assert_eq!(body["outcome"]["rank"], 6);
        assert_eq!(body["game"]["board"][5]["answer"], "Brazil");

        let (status, body) = send(
            app.clone(),
            "POST",
            "/game/guess",
            None,
            Some(json!({ "guess": "brazil " })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["outcome"]["kind"], "duplicate");

        let (_, body) = send(app, "GET", "/game", None, None).await;
        assert_eq!(body["found"], 1);
        assert_eq!(body["lives"], 5);
        assert_eq!(body["phase"], "playing");
        assert!(body["board"][0].get("answer").is_none());
    }

    #[tokio::test]
    async fn share_is_refused_until_the_game_ends() {
        let harness = test_state();
        let app = crate::routes::router(harness.state.clone());

        let (status, body) = send(app.clone(), "GET", "/game/share", None, None).await;
        assert_eq!(status, StatusCode::CONFLICT);
        assert!(body["message"].as_str().unwrap().starts_with("conflict"));

        for miss in ["Peru", "Chad", "Fiji", "Oman", "Laos"] {
            send(
                app.clone(),
                "POST",
                "/game/guess",
                None,
                Some(json!({ "guess": miss })),
            )
            .await;
        }

        let (status, body) = send(app, "GET", "/game/share", None, None).await;
        assert_eq!(status, StatusCode::OK);
        assert!(body["text"].as_str().unwrap().contains("Found 0/10 answers"));
    }

    #[tokio::test]
    async fn lookup_queries() {
        let harness = test_state();
        let app = crate::routes::router(harness.state.clone());

        let (_, body) = send(app.clone(), "GET", "/game/suggestions?q=ger", None, None).await;
        assert_eq!(body["suggestions"], json!(["Nigeria", "Germany"]));

        let (_, body) = send(app.clone(), "GET", "/game/suggestions", None, None).await;
        assert_eq!(body["suggestions"], json!([]));

        let (_, body) = send(app, "GET", "/game/answers", None, None).await;
        assert_eq!(body["answers"].as_array().unwrap().len(), 20);
    }

    #[tokio::test]
    async fn restart_clears_the_board() {
        let harness = test_state();
        let app = crate::routes::router(harness.state.clone());
        send(
            app.clone(),
            "POST",
            "/game/guess",
            None,
            Some(json!({ "guess": "Atlantis" })),
        )
        .await;

        let (status, body) = send(app, "POST", "/game/restart", None, None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["lives"], 5);
        assert_eq!(body["incorrect_guesses"], json!([]));
    }
}
