//! Error types for tiled-WMS resolution.

use thiserror::Error;

/// Result type alias using TwmsError.
pub type TwmsResult<T> = Result<T, TwmsError>;

/// Primary error type for tiled-WMS configuration and resolution.
#[derive(Debug, Error, PartialEq)]
pub enum TwmsError {
    // === Configuration-time errors (fatal for the endpoint) ===
    #[error("{0}")]
    MalformedSize(String),

    #[error("{0}")]
    MalformedBoundingBox(String),

    #[error("Missing Size directive")]
    MissingSize,

    #[error("invalid pyramid: {0}")]
    InvalidPyramid(String),

    // === Request-time errors (recoverable, per request) ===
    #[error("no pyramid level matches the request resolution")]
    ResolutionMismatch,

    #[error("request bounds do not align to a tile boundary")]
    BoundsMismatch,

    #[error("Missing required parameter: {0}")]
    MissingParameter(String),
}

impl TwmsError {
    /// Prefix a parse error message with the directive or field it came from,
    /// e.g. "Size incorrect format, expects 2 to 4 integers".
    pub fn prefixed(self, field: &str) -> Self {
        match self {
            TwmsError::MalformedSize(msg) => TwmsError::MalformedSize(format!("{} {}", field, msg)),
            TwmsError::MalformedBoundingBox(msg) => {
                TwmsError::MalformedBoundingBox(format!("{} {}", field, msg))
            }
            other => other,
        }
    }

    /// Whether this error is a per-request outcome rather than a
    /// configuration failure. Request errors are recoverable: the caller
    /// declines the request and keeps serving.
    pub fn is_request_error(&self) -> bool {
        matches!(
            self,
            TwmsError::ResolutionMismatch
                | TwmsError::BoundsMismatch
                | TwmsError::MissingParameter(_)
        )
    }

    /// Default HTTP status mapping for the response layer.
    pub fn http_status_code(&self) -> u16 {
        match self {
            TwmsError::MalformedBoundingBox(_) | TwmsError::MissingParameter(_) => 400,
            TwmsError::ResolutionMismatch | TwmsError::BoundsMismatch => 404,
            _ => 500,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prefixed_keeps_kind() {
        let err = TwmsError::MalformedSize("incorrect format".to_string()).prefixed("Size");
        assert_eq!(err.to_string(), "Size incorrect format");
        assert!(matches!(err, TwmsError::MalformedSize(_)));

        // Non-parse errors pass through untouched
        let err = TwmsError::MissingSize.prefixed("Size");
        assert_eq!(err, TwmsError::MissingSize);
    }

    #[test]
    fn test_request_vs_configuration() {
        assert!(TwmsError::ResolutionMismatch.is_request_error());
        assert!(TwmsError::BoundsMismatch.is_request_error());
        assert!(!TwmsError::MissingSize.is_request_error());
        assert!(!TwmsError::InvalidPyramid("x".into()).is_request_error());
    }

    #[test]
    fn test_status_codes() {
        assert_eq!(TwmsError::MissingParameter("bbox".into()).http_status_code(), 400);
        assert_eq!(TwmsError::BoundsMismatch.http_status_code(), 404);
        assert_eq!(TwmsError::MissingSize.http_status_code(), 500);
    }
}
