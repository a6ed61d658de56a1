use axum::http::StatusCode;
use axum::Extension;
use serde::Serialize;

use super::ApiSuccess;
use super::UserData;
use crate::authentication::models::AuthenticatedUser;

/// Profile of the token's owner. The identity is resolved by the token middleware.
pub async fn get_profile(
    Extension(authenticated): Extension<AuthenticatedUser>,
) -> ApiSuccess<GetProfileResponseData> {
    ApiSuccess::new(
        StatusCode::OK,
        GetProfileResponseData {
            user: (&authenticated.user).into(),
        },
    )
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GetProfileResponseData {
    pub user: UserData,
}
