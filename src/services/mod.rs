/// Admin service for prompt authoring and submission review.
pub mod admin_service;
/// OpenAPI documentation generation.
pub mod documentation;
/// Guessing session operations.
pub mod game_service;
/// Health check service.
pub mod health_service;
/// Player question submissions.
pub mod submission_service;
