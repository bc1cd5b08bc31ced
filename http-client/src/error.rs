//! Error types for the HTTP transport

use thiserror::Error;

/// Errors that can occur before an HTTP status is available
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransportError {
    /// The request URI could not be built or was rejected by the HTTP stack
    #[error("Invalid URI: {0}")]
    InvalidUri(String),

    /// Network or connection-level failure (refused, DNS, timeout, body read)
    #[error("Network/HTTP error: {0}")]
    Network(String),
}

impl TransportError {
    /// Whether another attempt against the same URI could succeed.
    ///
    /// A malformed URI stays malformed, so only network failures qualify.
    pub fn is_recoverable(&self) -> bool {
        matches!(self, TransportError::Network(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recoverable() {
        assert!(TransportError::Network("connection refused".to_string()).is_recoverable());
        assert!(!TransportError::InvalidUri("bad host".to_string()).is_recoverable());
    }

    #[test]
    fn test_error_display() {
        let err = TransportError::Network("connection refused".to_string());
        assert_eq!(err.to_string(), "Network/HTTP error: connection refused");

        let err = TransportError::InvalidUri("empty host".to_string());
        assert_eq!(err.to_string(), "Invalid URI: empty host");
    }
}
