use tracing::warn;

use crate::{dto::health::HealthResponse, state::SharedState};

/// Respond with a health payload, probing the storage medium.
pub async fn health_status(state: &SharedState) -> HealthResponse {
    match state.store().health_check() {
        Ok(()) => HealthResponse::ok(),
        Err(err) => {
            warn!(error = %err, "storage health check failed");
            HealthResponse::degraded()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        dao::{kv::KeyValueStore, trivia_store::PROMPTS_KEY},
        test_support::test_state,
    };

    #[tokio::test]
    async fn readable_store_is_healthy() {
        let harness = test_state();
        assert_eq!(health_status(&harness.state).await.status, "ok");
    }

    #[tokio::test]
    async fn corrupt_record_does_not_degrade_health() {
        let harness = test_state();
        harness.kv.set(PROMPTS_KEY, "not json").unwrap();
        assert_eq!(health_status(&harness.state).await.status, "ok");
    }
}
