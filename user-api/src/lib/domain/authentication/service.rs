use std::sync::Arc;

use async_trait::async_trait;
use auth::AuthenticationError;
use auth::Authenticator;
use auth::Claims;
use auth::JwtError;
use chrono::Duration;

use crate::domain::authentication::errors::AuthError;
use crate::domain::authentication::models::identity_claims;
use crate::domain::authentication::models::AuthOutcome;
use crate::domain::authentication::models::Credential;
use crate::domain::authentication::ports::AuthenticationPort;
use crate::domain::user::models::UserId;
use crate::user::ports::UserRepository;

/// Authentication flow over a credential store.
///
/// Read-only with respect to the store. Holds no per-request state, so one
/// instance serves all requests concurrently.
pub struct AuthenticationService<UR>
where
    UR: UserRepository,
{
    repository: Arc<UR>,
    authenticator: Arc<Authenticator>,
    token_ttl: Duration,
}

impl<UR> AuthenticationService<UR>
where
    UR: UserRepository,
{
    /// # Arguments
    /// * `repository` - Credential store
    /// * `authenticator` - Password comparison and token signing, keyed at construction
    /// * `token_ttl` - Lifetime of issued tokens
    pub fn new(
        repository: Arc<UR>,
        authenticator: Arc<Authenticator>,
        token_ttl: Duration,
    ) -> Self {
        Self {
            repository,
            authenticator,
            token_ttl,
        }
    }
}

#[async_trait]
impl<UR> AuthenticationPort for AuthenticationService<UR>
where
    UR: UserRepository,
{
    async fn authenticate_by_credential(
        &self,
        credential: &Credential,
    ) -> Result<AuthOutcome, AuthError> {
        let Some(user) = self.repository.find_by_email(&credential.email).await? else {
            tracing::debug!("No user registered under supplied email");
            return Ok(AuthOutcome::IdentityNotFound);
        };

        let claims = identity_claims(&user, self.token_ttl);

        match self
            .authenticator
            .authenticate(&credential.password, &user.password_hash, &claims)
        {
            Ok(result) => {
                tracing::debug!(user_id = %user.id, "Credential accepted");
                Ok(AuthOutcome::authenticated(user, result.access_token))
            }
            Err(AuthenticationError::InvalidCredentials) => {
                tracing::debug!(user_id = %user.id, "Password does not match");
                Ok(AuthOutcome::SecretMismatch)
            }
            Err(AuthenticationError::PasswordError(e)) => Err(e.into()),
            Err(AuthenticationError::JwtError(e)) => Err(e.into()),
        }
    }

    async fn identify_by_token(&self, token: &str) -> Result<AuthOutcome, AuthError> {
        let claims: Claims = match self.authenticator.validate_token(token) {
            Ok(claims) => claims,
            Err(JwtError::TokenExpired) => return Ok(AuthOutcome::TokenExpired),
            Err(e) => {
                tracing::debug!(error = %e, "Rejected token");
                return Ok(AuthOutcome::TokenInvalid);
            }
        };

        let Some(user_id) = claims
            .sub
            .as_deref()
            .and_then(|sub| UserId::from_string(sub).ok())
        else {
            tracing::warn!("Signed token carries no usable subject");
            return Ok(AuthOutcome::TokenInvalid);
        };

        match self.repository.find_by_id(&user_id).await? {
            Some(user) => Ok(AuthOutcome::authenticated(user, token.to_string())),
            None => {
                tracing::debug!(user_id = %user_id, "Token subject no longer exists");
                Ok(AuthOutcome::IdentityNotFound)
            }
        }
    }
}
