use thiserror::Error;

/// Error type for JWT operations.
///
/// Decoding failures are split so callers can tell a forged or garbled token
/// apart from one that was genuine but has run out of time.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum JwtError {
    #[error("Failed to encode token: {0}")]
    EncodingFailed(String),

    #[error("Token is malformed: {0}")]
    Malformed(String),

    #[error("Token signature does not match")]
    InvalidSignature,

    #[error("Token is expired")]
    TokenExpired,
}
