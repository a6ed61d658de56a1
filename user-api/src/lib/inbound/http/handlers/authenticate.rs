use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use axum_extra::extract::WithRejection;
use serde::Deserialize;
use serde::Serialize;

use super::ApiError;
use super::ApiSuccess;
use super::UserData;
use crate::authentication::models::AuthOutcome;
use crate::authentication::models::Credential;
use crate::inbound::http::router::AppState;

pub async fn authenticate(
    State(state): State<AppState>,
    WithRejection(Json(body), _): WithRejection<Json<AuthenticateRequestBody>, ApiError>,
) -> Result<ApiSuccess<AuthenticateResponseData>, ApiError> {
    let credential = Credential::new(body.email, body.password);

    match state
        .authentication
        .authenticate_by_credential(&credential)
        .await?
    {
        AuthOutcome::Authenticated(authenticated) => Ok(ApiSuccess::new(
            StatusCode::OK,
            AuthenticateResponseData {
                user: (&authenticated.user).into(),
                token: authenticated.token,
            },
        )),
        AuthOutcome::IdentityNotFound => {
            Err(ApiError::Unauthorized("User not found".to_string()))
        }
        AuthOutcome::SecretMismatch => {
            Err(ApiError::Unauthorized("Password does not match".to_string()))
        }
        AuthOutcome::TokenInvalid | AuthOutcome::TokenExpired => {
            Err(ApiError::Unauthorized("Invalid credentials".to_string()))
        }
    }
}

/// Missing fields are treated as empty strings, which never match a user.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct AuthenticateRequestBody {
    #[serde(default)]
    email: String,
    #[serde(default)]
    password: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AuthenticateResponseData {
    pub user: UserData,
    pub token: String,
}
