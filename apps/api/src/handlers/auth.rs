use axum::Json;
use axum::extract::State;
use axum::http::HeaderMap;
use rosterly_application::{CredentialError, strip_bearer};
use rosterly_core::AppError;

use crate::dto::{LoginRequest, LoginResponse, RefreshResponse};
use crate::error::ApiResult;
use crate::middleware::CREDENTIAL_HEADER;
use crate::state::AppState;

pub async fn login_handler(
    State(state): State<AppState>,
    Json(payload): Json<LoginRequest>,
) -> ApiResult<Json<LoginResponse>> {
    let pair = state
        .account_service
        .login(payload.username.as_str(), payload.password.as_str())
        .await?;

    Ok(Json(LoginResponse {
        access_token: pair.access_token,
        refresh_token: pair.refresh_token,
    }))
}

/// Exchanges a refresh token, sent as `token: Bearer <refresh>`, for a fresh
/// access token.
pub async fn refresh_token_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> ApiResult<Json<RefreshResponse>> {
    let header_value = headers
        .get(CREDENTIAL_HEADER)
        .ok_or_else(|| AppError::from(CredentialError::InvalidRefreshToken))?
        .to_str()
        .map_err(|_| AppError::from(CredentialError::InvalidRefreshToken))?;

    let refresh_token = strip_bearer(header_value)
        .map_err(|_| AppError::from(CredentialError::InvalidRefreshToken))?;
    let access_token = state.token_service.refresh(refresh_token)?;

    Ok(Json(RefreshResponse { access_token }))
}
