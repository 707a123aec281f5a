use axum::extract::{Request, State};
use axum::middleware::Next;
use axum::response::Response;
use rosterly_application::CredentialError;
use rosterly_core::AppError;

use crate::error::ApiResult;
use crate::state::AppState;

/// Header slot carrying the bearer credential, `"Bearer <token>"`.
pub const CREDENTIAL_HEADER: &str = "token";

/// Verifies the bearer credential and attaches the resulting principal to
/// the request.
pub async fn require_auth(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> ApiResult<Response> {
    let header_value = match request.headers().get(CREDENTIAL_HEADER) {
        Some(value) => Some(
            value
                .to_str()
                .map_err(|_| AppError::from(CredentialError::MalformedCredential))?,
        ),
        None => None,
    };

    let principal = state
        .authenticator
        .authenticate(header_value)
        .map_err(AppError::from)?;

    request.extensions_mut().insert(principal);
    Ok(next.run(request).await)
}
