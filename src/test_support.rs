//! Fixtures shared by unit tests across modules.

use std::sync::Arc;

use time::macros::datetime;

use crate::{
    clock::FixedClock,
    config::PromptTemplate,
    dao::{kv::MemoryKeyValueStore, models::PromptEntity, trivia_store::TriviaStore},
    state::{AppState, SharedState},
};

/// Admin token configured on states built by [`test_state`].
pub(crate) const TEST_ADMIN_TOKEN: &str = "letmein";

/// Built-in countries prompt scheduled on `date`.
pub(crate) fn sample_prompt(date: &str) -> PromptEntity {
    PromptTemplate::default().instantiate(date.to_owned())
}

/// Handles behind a [`SharedState`] so tests can poke the medium and the clock.
pub(crate) struct TestHarness {
    pub kv: Arc<MemoryKeyValueStore>,
    pub clock: Arc<FixedClock>,
    pub state: SharedState,
}

/// In-memory state dated 2024-01-01 with admin access enabled.
pub(crate) fn test_state() -> TestHarness {
    let kv = Arc::new(MemoryKeyValueStore::new());
    let clock = Arc::new(FixedClock::at(datetime!(2024-01-01 09:00 UTC)));
    let store = TriviaStore::new(kv.clone(), clock.clone(), PromptTemplate::default());
    let state = AppState::new(store, Some(TEST_ADMIN_TOKEN.to_owned()));
    TestHarness { kv, clock, state }
}
