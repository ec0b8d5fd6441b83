use serde::Serialize;
use utoipa::ToSchema;

/// Simple health response returned by the `/healthcheck` route.
#[derive(Debug, Serialize, ToSchema)]
pub struct HealthResponse {
    /// Health status ("ok" or "degraded").
    pub status: String,
}

impl HealthResponse {
    /// Storage medium answered the probe.
    pub fn ok() -> Self {
        Self {
            status: "ok".to_string(),
        }
    }

    /// Storage medium could not be read; the game still runs on defaults.
    pub fn degraded() -> Self {
        Self {
            status: "degraded".to_string(),
        }
    }
}
