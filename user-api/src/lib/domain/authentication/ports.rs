use async_trait::async_trait;

use crate::domain::authentication::errors::AuthError;
use crate::domain::authentication::models::AuthOutcome;
use crate::domain::authentication::models::Credential;

/// Port for deciding who a caller is.
#[async_trait]
pub trait AuthenticationPort: Send + Sync + 'static {
    /// Check a credential and issue a fresh token on success.
    ///
    /// Existence is checked before the password, so an unknown email yields
    /// `IdentityNotFound` whatever password was supplied.
    ///
    /// # Returns
    /// * `Authenticated` - Password matched; carries a new token
    /// * `IdentityNotFound` - No user with this email
    /// * `SecretMismatch` - User exists, password is wrong
    ///
    /// # Errors
    /// * `Store` - Credential store lookup failed
    /// * `Password` - Stored hash could not be read
    /// * `Token` - Token could not be signed
    async fn authenticate_by_credential(
        &self,
        credential: &Credential,
    ) -> Result<AuthOutcome, AuthError>;

    /// Resolve the current user behind a previously issued token.
    ///
    /// A token that fails signature or expiry checks never reaches the store.
    ///
    /// # Returns
    /// * `Authenticated` - Token is valid and its subject still exists
    /// * `TokenInvalid` - Token is malformed or forged
    /// * `TokenExpired` - Token is genuine but past its expiry
    /// * `IdentityNotFound` - Subject no longer exists
    ///
    /// # Errors
    /// * `Store` - Credential store lookup failed
    async fn identify_by_token(&self, token: &str) -> Result<AuthOutcome, AuthError>;
}
