//! Error types for widget operations
//!
//! Polling never fails early on a bad status; the last observed outcome is
//! turned into a [`WidgetError`] once the deadline passes.

use http_client::TransportError;
use thiserror::Error;

use crate::wait::WaitError;

/// Coarse classification of a failed widget call
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// No widget matched the filter before the timeout
    WidgetNotFound,
    /// The widget exists but the requested item inside it does not
    ItemNotFoundInWidget,
    /// Any other failure
    Generic,
}

/// High-level API errors for widget operations
///
/// Polling swallows intermediate failures, so these describe the state the
/// server was in when the timeout ran out, not the first thing that went
/// wrong.
#[derive(Debug, Error)]
pub enum WidgetError {
    /// The server answered 404 on the last attempt
    #[error("Widget not found: {body}")]
    WidgetNotFound { body: String },

    /// The server answered 422 on the last attempt
    #[error("Item not found in widget: {body}")]
    ItemNotFoundInWidget { body: String },

    /// Any other final state: an unexpected status, a network failure, or no
    /// response at all
    #[error("Widget client error{}: {message}", describe_status(.status))]
    Client { status: Option<u16>, message: String },

    /// A transport failure that retrying cannot fix
    #[error("Transport error: {0}")]
    Transport(#[from] TransportError),

    /// Invalid call arguments, such as a zero polling interval
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// The response body is not the JSON the caller asked for
    #[error("Invalid response body: {0}")]
    InvalidBody(#[from] serde_json::Error),
}

impl WidgetError {
    /// The kind callers are expected to branch on
    pub fn kind(&self) -> ErrorKind {
        match self {
            WidgetError::WidgetNotFound { .. } => ErrorKind::WidgetNotFound,
            WidgetError::ItemNotFoundInWidget { .. } => ErrorKind::ItemNotFoundInWidget,
            _ => ErrorKind::Generic,
        }
    }

    /// HTTP status behind this error, when one was observed
    pub fn status(&self) -> Option<u16> {
        match self {
            WidgetError::WidgetNotFound { .. } => Some(404),
            WidgetError::ItemNotFoundInWidget { .. } => Some(422),
            WidgetError::Client { status, .. } => *status,
            _ => None,
        }
    }
}

impl From<WaitError> for WidgetError {
    fn from(error: WaitError) -> Self {
        match error {
            WaitError::InvalidInterval => WidgetError::InvalidArgument(error.to_string()),
            WaitError::DeadlineExpired { .. } => WidgetError::Client {
                status: None,
                message: error.to_string(),
            },
        }
    }
}

fn describe_status(status: &Option<u16>) -> String {
    status.map(|s| format!(" (HTTP {})", s)).unwrap_or_default()
}

/// Type alias for results that can return a WidgetError
pub type Result<T> = std::result::Result<T, WidgetError>;
