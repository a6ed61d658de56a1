use chrono::Duration;

use crate::domain::user::models::User;

/// Transient login input. Never persisted.
#[derive(Clone, PartialEq, Eq)]
pub struct Credential {
    pub email: String,
    pub password: String,
}

impl Credential {
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            password: password.into(),
        }
    }
}

impl std::fmt::Debug for Credential {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credential")
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// A resolved identity together with the token that proves it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthenticatedUser {
    pub user: User,
    pub token: String,
}

/// Result of an authentication attempt.
///
/// Every variant is an expected answer; infrastructure failures travel
/// separately as `AuthError`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthOutcome {
    Authenticated(AuthenticatedUser),
    IdentityNotFound,
    SecretMismatch,
    TokenInvalid,
    TokenExpired,
}

impl AuthOutcome {
    pub fn authenticated(user: User, token: String) -> Self {
        Self::Authenticated(AuthenticatedUser { user, token })
    }
}

pub(crate) const NAME_CLAIM: &str = "name";
pub(crate) const EMAIL_CLAIM: &str = "email";

/// Build token claims from the public fields of a user.
///
/// The password hash is never part of the snapshot.
pub fn identity_claims(user: &User, ttl: Duration) -> auth::Claims {
    auth::Claims::for_subject(user.id, ttl)
        .with_extra(NAME_CLAIM, user.name.as_str())
        .with_extra(EMAIL_CLAIM, user.email.as_str())
}
