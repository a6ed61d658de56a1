use axum::extract::Request;
use axum::extract::State;
use axum::http::header;
use axum::http::HeaderMap;
use axum::middleware::Next;
use axum::response::Response;

use crate::authentication::models::AuthOutcome;
use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::router::AppState;

/// Header carrying the access token.
pub const ACCESS_TOKEN_HEADER: &str = "x-access-token";

/// Middleware that resolves the token's owner and stores it in request extensions.
///
/// A token whose owner has been deleted answers 404, every other rejection 401.
pub async fn authenticate(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let token = extract_token(req.headers())?;
    let outcome = state.authentication.identify_by_token(token).await?;

    match outcome {
        AuthOutcome::Authenticated(authenticated) => {
            req.extensions_mut().insert(authenticated);
            Ok(next.run(req).await)
        }
        AuthOutcome::IdentityNotFound => Err(ApiError::NotFound("User not found".to_string())),
        AuthOutcome::TokenExpired => {
            tracing::warn!("Rejected expired token");
            Err(ApiError::Unauthorized("Token expired".to_string()))
        }
        AuthOutcome::TokenInvalid | AuthOutcome::SecretMismatch => {
            tracing::warn!("Rejected invalid token");
            Err(ApiError::Unauthorized("Invalid token".to_string()))
        }
    }
}

/// Token from `x-access-token`, falling back to `Authorization: Bearer <token>`.
fn extract_token(headers: &HeaderMap) -> Result<&str, ApiError> {
    if let Some(value) = headers.get(ACCESS_TOKEN_HEADER) {
        return value
            .to_str()
            .map(str::trim)
            .ok()
            .filter(|token| !token.is_empty())
            .ok_or_else(|| ApiError::Unauthorized("Invalid x-access-token header".to_string()));
    }

    let auth_header = headers
        .get(header::AUTHORIZATION)
        .ok_or_else(|| ApiError::Unauthorized("Missing access token".to_string()))?;

    let auth_str = auth_header
        .to_str()
        .map_err(|_| ApiError::Unauthorized("Invalid Authorization header".to_string()))?;

    auth_str.strip_prefix("Bearer ").ok_or_else(|| {
        ApiError::Unauthorized(
            "Invalid Authorization header format. Expected: Bearer <token>".to_string(),
        )
    })
}
