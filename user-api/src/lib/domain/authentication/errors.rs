use thiserror::Error;

use crate::user::errors::UserError;

/// Infrastructure failure during authentication.
///
/// Wrong passwords, unknown users and bad tokens are not errors; they are
/// `AuthOutcome` variants.
#[derive(Debug, Clone, Error)]
pub enum AuthError {
    #[error("Credential store failure: {0}")]
    Store(#[from] UserError),

    #[error("Password verification failed: {0}")]
    Password(#[from] auth::PasswordError),

    #[error("Token generation failed: {0}")]
    Token(#[from] auth::JwtError),
}
