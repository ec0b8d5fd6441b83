use tracing::{debug, info};

use crate::{
    dto::game::{
        AnswerListResponse, GameView, GuessResponse, PoolEntryView, ShareResponse,
        SuggestionsResponse,
    },
    error::ServiceError,
    state::{SharedState, game::GuessOutcome},
};

/// Snapshot of the running session.
pub async fn current_game(state: &SharedState) -> GameView {
    state.with_session(|session| GameView::from(session)).await
}

/// Apply a guess to the running session.
pub async fn submit_guess(state: &SharedState, guess: &str) -> GuessResponse {
    state
        .with_session_mut(|session| {
            let outcome = session.submit_guess(guess);
            match &outcome {
                GuessOutcome::Correct { rank, won, .. } => {
                    info!(rank, won, "answer revealed");
                }
                GuessOutcome::Incorrect { lives_left, lost } => {
                    info!(lives_left, lost, "guess missed");
                }
                GuessOutcome::Duplicate | GuessOutcome::Ignored => {
                    debug!(?outcome, "guess left the session unchanged");
                }
            }
            GuessResponse {
                outcome: outcome.into(),
                game: GameView::from(&*session),
            }
        })
        .await
}

/// Autocomplete candidates for a partial guess.
pub async fn suggestions(state: &SharedState, input: &str) -> SuggestionsResponse {
    let suggestions = state.with_session(|session| session.suggestions(input)).await;
    SuggestionsResponse { suggestions }
}

/// Answer pool filtered by `search`.
pub async fn answer_list(state: &SharedState, search: &str) -> AnswerListResponse {
    let answers = state
        .with_session(|session| session.search_answers(search))
        .await
        .into_iter()
        .map(PoolEntryView::from)
        .collect();
    AnswerListResponse { answers }
}

/// Share text for a finished session.
pub async fn share(state: &SharedState) -> Result<ShareResponse, ServiceError> {
    state
        .with_session(|session| {
            if !session.is_over() {
                return Err(ServiceError::InvalidState(
                    "results can only be shared once the game is over".into(),
                ));
            }
            Ok(ShareResponse {
                text: session.share_summary(),
            })
        })
        .await
}

/// Start a fresh session on today's prompt.
pub async fn restart(state: &SharedState) -> GameView {
    state.restart_session().await;
    current_game(state).await
}
