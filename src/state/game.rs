use indexmap::IndexMap;
use tracing::{debug, warn};

use crate::{
    dao::models::{ANSWER_COUNT, PromptEntity},
    state::state_machine::{GameEvent, GamePhase, GameStateMachine},
};

/// Lives a fresh session starts with.
pub const STARTING_LIVES: u8 = 5;

/// 1-based position of a canonical answer within a prompt.
pub type Rank = u8;

/// Comparison form of an answer or guess: trimmed and lowercased.
pub fn normalize(value: &str) -> String {
    value.trim().to_lowercase()
}

/// Result of submitting a guess.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GuessOutcome {
    /// Empty guess, or the session is already over; nothing changed.
    Ignored,
    /// The guess matches an answer that is already revealed; nothing changed.
    Duplicate,
    /// The guess revealed `rank`.
    Correct {
        /// Rank that was revealed.
        rank: Rank,
        /// Canonical text of the revealed answer.
        answer: String,
        /// Whether this reveal completed the board.
        won: bool,
    },
    /// The guess matched nothing and cost a life.
    Incorrect {
        /// Lives remaining after the miss.
        lives_left: u8,
        /// Whether this miss ended the session.
        lost: bool,
    },
}

/// Display state of one rank on the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SlotStatus {
    /// Not found yet and the session is still running.
    Hidden,
    /// Found by the player.
    Correct,
    /// Not found before the session ended.
    Missed,
}

/// One rank on the board, with the answer text when it may be shown.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnswerSlot {
    /// Rank of the slot.
    pub rank: Rank,
    /// Answer text; `None` while hidden.
    pub answer: Option<String>,
    /// Display state.
    pub status: SlotStatus,
}

/// Ephemeral guessing session over one prompt.
///
/// The prompt is read-only for the lifetime of the session; progress is never
/// persisted.
#[derive(Debug, Clone)]
pub struct GameSession {
    prompt: PromptEntity,
    revealed: IndexMap<Rank, String>,
    lives: u8,
    incorrect_guesses: Vec<String>,
    machine: GameStateMachine,
}

impl GameSession {
    /// Start a fresh session on `prompt`.
    pub fn new(prompt: PromptEntity) -> Self {
        Self {
            prompt,
            revealed: IndexMap::new(),
            lives: STARTING_LIVES,
            incorrect_guesses: Vec::new(),
            machine: GameStateMachine::new(),
        }
    }

    /// Submit a raw guess and advance the session.
    pub fn submit_guess(&mut self, raw: &str) -> GuessOutcome {
        if self.is_over() || raw.is_empty() {
            return GuessOutcome::Ignored;
        }

        let normalized = normalize(raw);
        if self.is_revealed(&normalized) {
            debug!(guess = raw, "duplicate guess");
            return GuessOutcome::Duplicate;
        }

        match self.rank_of(&normalized) {
            Some(rank) => {
                let answer = self.prompt.answers[usize::from(rank) - 1].clone();
                self.revealed.insert(rank, answer.clone());
                let won = self.revealed.len() == ANSWER_COUNT
                    && self.advance(GameEvent::AllAnswersFound) == GamePhase::Won;
                GuessOutcome::Correct { rank, answer, won }
            }
            None => {
                self.lives = self.lives.saturating_sub(1);
                self.incorrect_guesses.push(raw.to_owned());
                let lost =
                    self.lives == 0 && self.advance(GameEvent::LivesExhausted) == GamePhase::Lost;
                GuessOutcome::Incorrect {
                    lives_left: self.lives,
                    lost,
                }
            }
        }
    }

    /// Prompt the session was started on.
    pub fn prompt(&self) -> &PromptEntity {
        &self.prompt
    }

    /// Current phase.
    pub fn phase(&self) -> GamePhase {
        self.machine.phase()
    }

    /// Whether the session is won or lost.
    pub fn is_over(&self) -> bool {
        self.phase().is_over()
    }

    /// Whether the session was won.
    pub fn is_won(&self) -> bool {
        self.phase() == GamePhase::Won
    }

    /// Lives left.
    pub fn lives(&self) -> u8 {
        self.lives
    }

    /// Lives spent so far.
    pub fn lives_used(&self) -> u8 {
        STARTING_LIVES - self.lives
    }

    /// Revealed answers keyed by rank, in the order they were found.
    pub fn revealed(&self) -> &IndexMap<Rank, String> {
        &self.revealed
    }

    /// Number of ranks revealed.
    pub fn found_count(&self) -> usize {
        self.revealed.len()
    }

    /// Misses, as typed.
    pub fn incorrect_guesses(&self) -> &[String] {
        &self.incorrect_guesses
    }

    /// Guesses that changed the session (reveals plus misses).
    pub fn guess_count(&self) -> usize {
        self.revealed.len() + self.incorrect_guesses.len()
    }

    /// All ten slots in rank order. Unrevealed answers are only exposed once
    /// the session is over.
    pub fn board(&self) -> Vec<AnswerSlot> {
        let over = self.is_over();
        (1..=ANSWER_COUNT as Rank)
            .map(|rank| match self.revealed.get(&rank) {
                Some(answer) => AnswerSlot {
                    rank,
                    answer: Some(answer.clone()),
                    status: SlotStatus::Correct,
                },
                None if over => AnswerSlot {
                    rank,
                    answer: Some(self.prompt.answers[usize::from(rank) - 1].clone()),
                    status: SlotStatus::Missed,
                },
                None => AnswerSlot {
                    rank,
                    answer: None,
                    status: SlotStatus::Hidden,
                },
            })
            .collect()
    }

    /// Whether a normalized value equals an already revealed answer.
    pub(crate) fn is_revealed(&self, normalized: &str) -> bool {
        self.revealed
            .values()
            .any(|answer| normalize(answer) == normalized)
    }

    /// Lowest rank whose answer normalizes to `normalized`.
    fn rank_of(&self, normalized: &str) -> Option<Rank> {
        self.prompt
            .answers
            .iter()
            .position(|answer| normalize(answer) == normalized)
            .map(|index| index as Rank + 1)
    }

    fn advance(&mut self, event: GameEvent) -> GamePhase {
        match self.machine.apply(event) {
            Ok(phase) => {
                debug!(?phase, "session finished");
                phase
            }
            Err(err) => {
                warn!(error = %err, "ignored session transition");
                self.machine.phase()
            }
        }
    }
}
