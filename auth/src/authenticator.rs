use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::jwt::JwtError;
use crate::jwt::JwtHandler;
use crate::password::PasswordError;
use crate::password::PasswordHasher;

/// Checks passwords and mints or reads tokens with one signing key.
///
/// Built once at startup and shared behind an `Arc`.
pub struct Authenticator {
    password_hasher: PasswordHasher,
    jwt_handler: JwtHandler,
}

#[derive(Debug)]
pub struct AuthenticationResult {
    pub access_token: String,
}

#[derive(Debug, thiserror::Error)]
pub enum AuthenticationError {
    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Password error: {0}")]
    PasswordError(#[from] PasswordError),

    #[error("JWT error: {0}")]
    JwtError(#[from] JwtError),
}

impl Authenticator {
    /// Argon2 default costs, HS256 over `jwt_secret`.
    pub fn new(jwt_secret: &[u8]) -> Self {
        Self::with_password_hasher(jwt_secret, PasswordHasher::new())
    }

    pub fn with_password_hasher(jwt_secret: &[u8], password_hasher: PasswordHasher) -> Self {
        Self {
            password_hasher,
            jwt_handler: JwtHandler::new(jwt_secret),
        }
    }

    pub fn hash_password(&self, password: &str) -> Result<String, PasswordError> {
        self.password_hasher.hash(password)
    }

    /// Signs `claims` only once `password` matches `stored_hash`.
    ///
    /// A mismatch is `InvalidCredentials`; an unreadable stored hash is a
    /// `PasswordError`, never a mismatch.
    pub fn authenticate<T: Serialize>(
        &self,
        password: &str,
        stored_hash: &str,
        claims: &T,
    ) -> Result<AuthenticationResult, AuthenticationError> {
        if !self.password_hasher.compare(password, stored_hash)? {
            return Err(AuthenticationError::InvalidCredentials);
        }

        let access_token = self.jwt_handler.encode(claims)?;

        Ok(AuthenticationResult { access_token })
    }

    pub fn generate_token<T: Serialize>(&self, claims: &T) -> Result<String, JwtError> {
        self.jwt_handler.encode(claims)
    }

    /// Signature is checked before expiry.
    pub fn validate_token<T: DeserializeOwned>(&self, token: &str) -> Result<T, JwtError> {
        self.jwt_handler.decode(token)
    }
}
