use thiserror::Error;

/// Phases a guessing session can be in.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum GamePhase {
    /// Guesses are accepted.
    #[default]
    Playing,
    /// All ten answers were found.
    Won,
    /// Lives ran out first.
    Lost,
}

impl GamePhase {
    /// Whether the session has reached a terminal phase.
    pub fn is_over(self) -> bool {
        matches!(self, GamePhase::Won | GamePhase::Lost)
    }
}

/// Events that can be applied to the state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameEvent {
    /// The last hidden rank was revealed.
    AllAnswersFound,
    /// The last life was spent on a miss.
    LivesExhausted,
}

/// Error returned when attempting to apply an invalid transition.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid transition: {event:?} cannot be applied while in {from:?}")]
pub struct InvalidTransition {
    /// The phase the state machine was in when the invalid event was received.
    pub from: GamePhase,
    /// The event that cannot be applied from this phase.
    pub event: GameEvent,
}

/// State machine implementing the `Playing -> Won | Lost` flow.
#[derive(Debug, Clone, Default)]
pub struct GameStateMachine {
    phase: GamePhase,
    version: usize,
}

impl GameStateMachine {
    /// Create a new state machine initialised in the playing state.
    pub fn new() -> Self {
        Self::default()
    }

    /// Inspect the current phase.
    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    /// Number of transitions applied so far.
    pub fn version(&self) -> usize {
        self.version
    }

    /// Apply `event`, returning the new phase.
    pub fn apply(&mut self, event: GameEvent) -> Result<GamePhase, InvalidTransition> {
        let next = self.compute_transition(event)?;
        self.phase = next;
        self.version += 1;
        Ok(next)
    }

    fn compute_transition(&self, event: GameEvent) -> Result<GamePhase, InvalidTransition> {
        let next = match (self.phase, event) {
            (GamePhase::Playing, GameEvent::AllAnswersFound) => GamePhase::Won,
            (GamePhase::Playing, GameEvent::LivesExhausted) => GamePhase::Lost,
            (from, event) => return Err(InvalidTransition { from, event }),
        };

        Ok(next)
    }
}
