//! Error taxonomy for a diagram request.
//!
//! Every failure in a request cycle ends up as one of three variants, and
//! each is turned into a single user-facing message by
//! [`DiagramError::user_message`]. Nothing here escapes the orchestrator.

use thiserror::Error;
use vizai_client::ClientError;
use vizai_token::TokenError;

/// Used when a failure carries no message of its own.
pub const GENERIC_FAILURE: &str = "Something went wrong";

/// Shown instead of internal compression/encoding details.
pub const ENCODING_FAILURE: &str = "Failed to encode diagram";

#[derive(Debug, Error)]
pub enum DiagramError {
    /// The generator answered, but not with a usable diagram.
    #[error("{0}")]
    Validation(String),

    /// The generator could not be reached.
    #[error("{0}")]
    Transport(String),

    /// The diagram could not be compressed or encoded.
    #[error("Failed to encode diagram: {0}")]
    Encoding(#[from] TokenError),
}

impl DiagramError {
    /// The text placed into `RequestState::Failed`.
    pub fn user_message(&self) -> String {
        let message = match self {
            DiagramError::Validation(msg) | DiagramError::Transport(msg) => msg.as_str(),
            DiagramError::Encoding(_) => ENCODING_FAILURE,
        };
        if message.trim().is_empty() {
            GENERIC_FAILURE.to_string()
        } else {
            message.to_string()
        }
    }
}

impl From<ClientError> for DiagramError {
    fn from(err: ClientError) -> Self {
        match err {
            ClientError::InvalidEndpoint(_) => DiagramError::Transport(err.to_string()),
            ClientError::Transport(msg) => DiagramError::Transport(msg),
            ClientError::MalformedBody(msg) => DiagramError::Validation(msg),
            ClientError::Rejected { .. } => DiagramError::Validation(err.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use vizai_client::FALLBACK_MESSAGE;

    #[test]
    fn test_rejected_with_message() {
        let err = DiagramError::from(ClientError::Rejected {
            status: 400,
            message: Some("topic too vague".to_string()),
        });
        assert!(matches!(err, DiagramError::Validation(_)));
        assert_eq!(err.user_message(), "topic too vague");
    }

    #[test]
    fn test_rejected_without_message() {
        let err = DiagramError::from(ClientError::Rejected {
            status: 200,
            message: None,
        });
        assert_eq!(err.user_message(), FALLBACK_MESSAGE);
    }

    #[test]
    fn test_transport_keeps_underlying_text() {
        let err = DiagramError::from(ClientError::Transport("connection refused".to_string()));
        assert!(matches!(err, DiagramError::Transport(_)));
        assert_eq!(err.user_message(), "connection refused");
    }

    #[test]
    fn test_invalid_endpoint_is_transport() {
        let err = DiagramError::from(ClientError::InvalidEndpoint("no host".to_string()));
        assert!(matches!(err, DiagramError::Transport(_)));
        assert!(err.user_message().contains("no host"));
    }

    #[test]
    fn test_malformed_body_is_validation() {
        let err = DiagramError::from(ClientError::MalformedBody(
            "Failed to parse response JSON: expected value".to_string(),
        ));
        assert!(matches!(err, DiagramError::Validation(_)));
    }

    #[test]
    fn test_encoding_message_is_generic() {
        let io = std::io::Error::other("deflate exploded");
        let err = DiagramError::Encoding(TokenError::Compress(io));
        assert_eq!(err.user_message(), ENCODING_FAILURE);
        assert!(err.to_string().contains("deflate exploded"));
    }

    #[test]
    fn test_empty_message_falls_back() {
        assert_eq!(
            DiagramError::Transport(String::new()).user_message(),
            GENERIC_FAILURE
        );
    }
}
