use thiserror::Error;

/// Error type for password operations.
#[derive(Debug, Clone, Error)]
pub enum PasswordError {
    #[error("Password hashing failed: {0}")]
    HashingFailed(String),

    #[error("Stored password hash is unreadable: {0}")]
    MalformedHash(String),

    #[error("Invalid hashing parameters: {0}")]
    InvalidParams(String),
}
