//! Shared error types for the services crate.

use thiserror::Error;

use storage::StorageError;

/// Errors emitted by `QuestionLoader`.
///
/// Only two kinds ever reach the user, fetch failures and parse
/// failures, and both display as a single message carrying the raw
/// response text so the failure can be diagnosed from the screen.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum LoadError {
    #[error("question request failed with status {status}: {body}")]
    Status {
        status: reqwest::StatusCode,
        body: String,
    },

    #[error(transparent)]
    Request(#[from] reqwest::Error),

    #[error("could not parse question bank ({detail}): {body}")]
    Parse { detail: String, body: String },
}

/// Errors emitted by `SessionEngine`.
///
/// The quiz state machine itself never fails; only the durable store can.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum EngineError {
    #[error(transparent)]
    Storage(#[from] StorageError),
}
