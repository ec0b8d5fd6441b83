/// Key-value media backing the durable records.
pub mod kv;
/// Persisted record definitions.
pub mod models;
/// Storage abstraction layer and error types.
pub mod storage;
/// Prompt and submission persistence built on a key-value medium.
pub mod trivia_store;
