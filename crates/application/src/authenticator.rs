//! Caller identity extraction from inbound bearer credentials.

use chrono::DateTime;
use rosterly_core::{AccountRole, AppError, AppResult, Principal, SubjectId};

use crate::{CredentialError, TokenKind, TokenService};

/// Expected prefix of the credential header value.
const BEARER_PREFIX: &str = "Bearer ";

/// Strips the `Bearer ` scheme from a credential header value.
///
/// Any other shape, including an empty token, is
/// [`CredentialError::MalformedCredential`].
pub fn strip_bearer(value: &str) -> Result<&str, CredentialError> {
    let token = value
        .strip_prefix(BEARER_PREFIX)
        .ok_or(CredentialError::MalformedCredential)?;
    if token.trim().is_empty() {
        return Err(CredentialError::MalformedCredential);
    }

    Ok(token)
}

/// Extracts and verifies the caller identity from a raw header value.
///
/// Performs no repository lookups: a [`Principal`] is built directly from
/// the verified claims, and only the *access* secret can authenticate a
/// request. Authorization predicates over the result live alongside as free
/// functions.
#[derive(Clone)]
pub struct Authenticator {
    tokens: TokenService,
}

impl Authenticator {
    /// Creates an authenticator over the given token service.
    #[must_use]
    pub fn new(tokens: TokenService) -> Self {
        Self { tokens }
    }

    /// Authenticates a raw credential header value of the form
    /// `"Bearer <token>"`.
    ///
    /// An absent header is [`CredentialError::MissingCredential`]; any other
    /// shape is [`CredentialError::MalformedCredential`]. Refresh tokens
    /// never authenticate a request.
    pub fn authenticate(&self, raw_header_value: Option<&str>) -> Result<Principal, CredentialError> {
        let value = raw_header_value.ok_or(CredentialError::MissingCredential)?;
        let token = strip_bearer(value)?;

        let claims = self.tokens.verify(token, TokenKind::Access)?;

        let issued_at =
            DateTime::from_timestamp(claims.iat, 0).ok_or(CredentialError::MalformedCredential)?;
        let expires_at =
            DateTime::from_timestamp(claims.exp, 0).ok_or(CredentialError::MalformedCredential)?;

        Ok(Principal::new(claims.sub, claims.role, issued_at, expires_at))
    }
}

/// Ensures the principal holds the given account role.
pub fn require_role(principal: &Principal, role: AccountRole) -> AppResult<()> {
    if principal.role() == role {
        return Ok(());
    }

    Err(AppError::Forbidden(
        "account role does not permit this operation".to_owned(),
    ))
}

/// Ensures the principal owns the resource or holds the given account role.
pub fn require_self_or_role(
    principal: &Principal,
    resource_owner: SubjectId,
    role: AccountRole,
) -> AppResult<()> {
    if principal.subject() == resource_owner {
        return Ok(());
    }

    require_role(principal, role)
}
