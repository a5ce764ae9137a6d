//! Error types returned by this crate

use thiserror::Error;

use crate::event::EventId;

/// Why a call to the remote collection failed
#[derive(Error, Debug)]
pub enum SyncError {
    #[error("Invalid collection URL: {0}")]
    InvalidUrl(String),

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Unexpected HTTP status code {0}")]
    Status(reqwest::StatusCode),

    #[error("Invalid JSON payload: {0}")]
    Payload(#[from] serde_json::Error),

    /// Only returned by mocked remotes
    #[error("Mocked failure in {0}")]
    Mocked(String),
}

impl SyncError {
    /// Whether the server answered with a 404 status
    pub fn is_not_found(&self) -> bool {
        matches!(self, SyncError::Status(status) if *status == reqwest::StatusCode::NOT_FOUND)
    }
}

/// Errors of the local storage
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Unable to parse the stored events: {0}")]
    Parse(#[from] serde_json::Error),
}

/// A form submission that has been rejected before reaching the store
#[derive(Error, Debug, Clone, PartialEq)]
pub enum FormError {
    #[error("Field '{0}' is required")]
    MissingField(&'static str),

    #[error("'{0}' is not a valid date and time")]
    InvalidDate(String),
}

/// Errors surfaced by the [`Planner`](crate::Planner)
#[derive(Error, Debug)]
pub enum PlannerError {
    #[error(transparent)]
    Form(#[from] FormError),

    #[error(transparent)]
    Remote(#[from] SyncError),

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error("No event with id {0}")]
    UnknownEvent(EventId),
}
