pub mod game;
pub mod lookup;
pub mod share;
pub mod state_machine;

use std::sync::Arc;

use tokio::sync::RwLock;
use tracing::info;

use crate::{dao::trivia_store::TriviaStore, state::game::GameSession};

/// Shared handle passed to every router and service.
pub type SharedState = Arc<AppState>;

/// Central application state: the persistence layer plus the single running
/// guessing session.
pub struct AppState {
    store: TriviaStore,
    session: RwLock<GameSession>,
    admin_token: Option<String>,
}

impl AppState {
    /// Construct a new [`AppState`] wrapped in an [`Arc`], starting a session on
    /// today's prompt.
    pub fn new(store: TriviaStore, admin_token: Option<String>) -> SharedState {
        let session = GameSession::new(store.todays_prompt());
        Arc::new(Self {
            store,
            session: RwLock::new(session),
            admin_token,
        })
    }

    /// Persistence layer.
    pub fn store(&self) -> &TriviaStore {
        &self.store
    }

    /// Token admin requests must present; `None` disables admin access.
    pub fn admin_token(&self) -> Option<&str> {
        self.admin_token.as_deref()
    }

    /// Run `f` against the current session.
    pub async fn with_session<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&GameSession) -> R,
    {
        let guard = self.session.read().await;
        f(&guard)
    }

    /// Run `f` against the current session with mutable access.
    pub async fn with_session_mut<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&mut GameSession) -> R,
    {
        let mut guard = self.session.write().await;
        f(&mut guard)
    }

    /// Discard progress and start over on today's prompt.
    pub async fn restart_session(&self) {
        let prompt = self.store.todays_prompt();
        info!(date = %prompt.date, prompt_id = %prompt.id, "starting new session");
        *self.session.write().await = GameSession::new(prompt);
    }
}
