use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use axum_extra::extract::WithRejection;
use serde::Deserialize;
use thiserror::Error;

use super::ApiError;
use super::ApiSuccess;
use super::UserData;
use crate::domain::user::models::CreateUserCommand;
use crate::domain::user::models::EmailAddress;
use crate::domain::user::models::UserName;
use crate::inbound::http::router::AppState;
use crate::user::errors::EmailError;
use crate::user::errors::UserNameError;

pub async fn create_user(
    State(state): State<AppState>,
    WithRejection(Json(body), _): WithRejection<Json<CreateUserRequest>, ApiError>,
) -> Result<ApiSuccess<UserData>, ApiError> {
    state
        .user_service
        .create_user(body.try_into_command()?)
        .await
        .map_err(ApiError::from)
        .map(|ref user| ApiSuccess::new(StatusCode::CREATED, user.into()))
}

/// HTTP request body for registering a user (raw JSON).
///
/// Fields are optional here so that a missing field is reported as a
/// validation failure rather than a JSON rejection.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CreateUserRequest {
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    email: Option<String>,
    #[serde(default)]
    password: Option<String>,
}

#[derive(Debug, Clone, Error)]
enum ParseCreateUserRequestError {
    #[error("User validation failed: {0}")]
    Name(#[from] UserNameError),

    #[error("User validation failed: {0}")]
    Email(#[from] EmailError),

    #[error("User validation failed: password is required")]
    MissingPassword,
}

impl CreateUserRequest {
    fn try_into_command(self) -> Result<CreateUserCommand, ParseCreateUserRequestError> {
        let name = UserName::new(self.name.unwrap_or_default())?;
        let email = EmailAddress::new(self.email.unwrap_or_default())?;
        let password = self
            .password
            .filter(|p| !p.is_empty())
            .ok_or(ParseCreateUserRequestError::MissingPassword)?;
        Ok(CreateUserCommand::new(name, email, password))
    }
}

impl From<ParseCreateUserRequestError> for ApiError {
    fn from(err: ParseCreateUserRequestError) -> Self {
        ApiError::BadRequest(err.to_string())
    }
}
