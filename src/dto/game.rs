//! DTOs exposed by the player-facing game routes.

use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;

use crate::state::{
    game::{AnswerSlot, GameSession, GuessOutcome, Rank, STARTING_LIVES, SlotStatus},
    lookup::PoolEntry,
    state_machine::GamePhase,
};

/// Phase of the running session as seen by clients.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum PhaseView {
    Playing,
    Won,
    Lost,
}

impl From<GamePhase> for PhaseView {
    fn from(phase: GamePhase) -> Self {
        match phase {
            GamePhase::Playing => PhaseView::Playing,
            GamePhase::Won => PhaseView::Won,
            GamePhase::Lost => PhaseView::Lost,
        }
    }
}

/// Display state of one board slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum SlotStatusView {
    Hidden,
    Correct,
    Missed,
}

impl From<SlotStatus> for SlotStatusView {
    fn from(status: SlotStatus) -> Self {
        match status {
            SlotStatus::Hidden => SlotStatusView::Hidden,
            SlotStatus::Correct => SlotStatusView::Correct,
            SlotStatus::Missed => SlotStatusView::Missed,
        }
    }
}

/// One ranked slot on the board.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct SlotView {
    pub rank: Rank,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub answer: Option<String>,
    pub status: SlotStatusView,
}

impl From<AnswerSlot> for SlotView {
    fn from(slot: AnswerSlot) -> Self {
        Self {
            rank: slot.rank,
            answer: slot.answer,
            status: slot.status.into(),
        }
    }
}

/// Full snapshot of the running session.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct GameView {
    pub prompt_id: Uuid,
    pub question: String,
    pub date: String,
    pub phase: PhaseView,
    pub lives: u8,
    pub max_lives: u8,
    pub found: usize,
    pub board: Vec<SlotView>,
    pub incorrect_guesses: Vec<String>,
}

impl From<&GameSession> for GameView {
    fn from(session: &GameSession) -> Self {
        let prompt = session.prompt();
        Self {
            prompt_id: prompt.id,
            question: prompt.question.clone(),
            date: prompt.date.clone(),
            phase: session.phase().into(),
            lives: session.lives(),
            max_lives: STARTING_LIVES,
            found: session.found_count(),
            board: session.board().into_iter().map(SlotView::from).collect(),
            incorrect_guesses: session.incorrect_guesses().to_vec(),
        }
    }
}

/// Guess submitted by the player.
#[derive(Debug, Deserialize, ToSchema)]
pub struct GuessRequest {
    pub guess: String,
}

/// Wire form of a guess outcome.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum GuessOutcomeDto {
    /// Empty guess or finished session; nothing changed.
    Ignored,
    /// Already revealed; nothing changed.
    Duplicate,
    /// A rank was revealed.
    Correct {
        rank: Rank,
        answer: String,
        won: bool,
    },
    /// A life was lost.
    Incorrect { lives_left: u8, lost: bool },
}

impl From<GuessOutcome> for GuessOutcomeDto {
    fn from(outcome: GuessOutcome) -> Self {
        match outcome {
            GuessOutcome::Ignored => GuessOutcomeDto::Ignored,
            GuessOutcome::Duplicate => GuessOutcomeDto::Duplicate,
            GuessOutcome::Correct { rank, answer, won } => {
                GuessOutcomeDto::Correct { rank, answer, won }
            }
            GuessOutcome::Incorrect { lives_left, lost } => {
                GuessOutcomeDto::Incorrect { lives_left, lost }
            }
        }
    }
}

/// Outcome of a guess together with the updated board.
#[derive(Debug, Serialize, ToSchema)]
pub struct GuessResponse {
    pub outcome: GuessOutcomeDto,
    pub game: GameView,
}

/// Query string of the autocomplete route.
#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct SuggestionQuery {
    /// Partial guess typed so far.
    #[serde(default)]
    pub q: String,
}

/// Autocomplete candidates in pool order.
#[derive(Debug, Serialize, ToSchema)]
pub struct SuggestionsResponse {
    pub suggestions: Vec<String>,
}

/// Query string of the answer-list route.
#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct AnswerListQuery {
    /// Substring filter; blank lists the whole pool.
    #[serde(default)]
    pub search: String,
}

/// One answer-pool entry.
#[derive(Debug, Serialize, ToSchema)]
pub struct PoolEntryView {
    pub answer: String,
    pub guessed: bool,
}

impl From<PoolEntry> for PoolEntryView {
    fn from(entry: PoolEntry) -> Self {
        Self {
            answer: entry.answer,
            guessed: entry.guessed,
        }
    }
}

/// Filtered answer pool.
#[derive(Debug, Serialize, ToSchema)]
pub struct AnswerListResponse {
    pub answers: Vec<PoolEntryView>,
}

/// Text for the client to place on its clipboard.
#[derive(Debug, Serialize, ToSchema)]
pub struct ShareResponse {
    pub text: String,
}
