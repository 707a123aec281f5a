//! Signed credential issuance, verification, and refresh.
//!
//! Two credential classes share one fixed claims shape: short-lived access
//! tokens and long-lived refresh tokens, HS256-signed with distinct
//! secrets. Access tokens are never persisted; verification is signature +
//! expiry only, so any worker can verify without shared state.

use chrono::{Duration, Utc};
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use rosterly_core::{AccountRole, AppError, AppResult, SubjectId};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Default access token lifetime: five minutes.
pub const DEFAULT_ACCESS_TTL_SECONDS: i64 = 5 * 60;

/// Default refresh token lifetime: seven days.
pub const DEFAULT_REFRESH_TTL_SECONDS: i64 = 7 * 24 * 60 * 60;

/// Minimum accepted signing secret length in bytes.
pub const MIN_SECRET_LENGTH: usize = 32;

/// Declared failure modes for credential handling.
///
/// All of these are terminal for the current request; the caller must
/// re-authenticate or refresh. They are distinguishable for user-facing
/// messaging but are mapped to one transport status at the boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum CredentialError {
    /// No credential was provided.
    #[error("credential not provided")]
    MissingCredential,

    /// The credential was present but not in a recognizable shape.
    #[error("credential format not recognized")]
    MalformedCredential,

    /// The credential signature did not verify.
    #[error("credential rejected")]
    InvalidCredential,

    /// The credential verified but has expired.
    #[error("credential expired")]
    ExpiredToken,

    /// The refresh token failed verification; the caller must log in again.
    #[error("refresh token rejected")]
    InvalidRefreshToken,
}

impl From<CredentialError> for AppError {
    fn from(value: CredentialError) -> Self {
        AppError::Unauthorized(value.to_string())
    }
}

/// Selects which signing secret a token is checked against.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    /// Short-lived credential presented on every request.
    Access,
    /// Long-lived credential exchanged for new access tokens.
    Refresh,
}

impl TokenKind {
    /// Returns the display string for this kind.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Access => "access",
            Self::Refresh => "refresh",
        }
    }
}

/// Fixed, versioned claims payload carried by both credential classes.
///
/// Deliberately a closed struct rather than an open map: unknown claims in
/// an inbound token are dropped on decode and can never leak into a
/// refreshed credential.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenClaims {
    /// Subject identifier of the account.
    pub sub: SubjectId,
    /// Account role at issuance time.
    pub role: AccountRole,
    /// Issued-at, seconds since the Unix epoch.
    pub iat: i64,
    /// Expiry, seconds since the Unix epoch.
    pub exp: i64,
}

/// Access/refresh credential pair returned by login.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenPair {
    /// Short-lived access token.
    pub access_token: String,
    /// Long-lived refresh token.
    pub refresh_token: String,
}

/// Construction parameters for [`TokenService`].
#[derive(Debug, Clone)]
pub struct TokenConfig {
    /// Secret for signing and verifying access tokens.
    pub access_secret: String,
    /// Secret for signing and verifying refresh tokens.
    pub refresh_secret: String,
    /// Access token lifetime in seconds.
    pub access_ttl_seconds: i64,
    /// Refresh token lifetime in seconds.
    pub refresh_ttl_seconds: i64,
}

impl TokenConfig {
    /// Creates a config with the default short/long lifetimes.
    #[must_use]
    pub fn with_default_ttls(access_secret: String, refresh_secret: String) -> Self {
        Self {
            access_secret,
            refresh_secret,
            access_ttl_seconds: DEFAULT_ACCESS_TTL_SECONDS,
            refresh_ttl_seconds: DEFAULT_REFRESH_TTL_SECONDS,
        }
    }
}

/// Mints and verifies the two credential classes.
///
/// Holds only the signing secrets, initialized once at startup. Signing and
/// verification are pure CPU-bound operations safe for concurrent use.
#[derive(Clone)]
pub struct TokenService {
    access_encoding: EncodingKey,
    access_decoding: DecodingKey,
    refresh_encoding: EncodingKey,
    refresh_decoding: DecodingKey,
    access_ttl: Duration,
    refresh_ttl: Duration,
    validation: Validation,
}

impl TokenService {
    /// Creates a token service from signing configuration.
    ///
    /// Rejects short secrets, identical access/refresh secrets, and
    /// non-positive lifetimes.
    pub fn new(config: TokenConfig) -> AppResult<Self> {
        if config.access_secret.len() < MIN_SECRET_LENGTH
            || config.refresh_secret.len() < MIN_SECRET_LENGTH
        {
            return Err(AppError::Validation(format!(
                "signing secrets must be at least {MIN_SECRET_LENGTH} bytes"
            )));
        }

        if config.access_secret == config.refresh_secret {
            return Err(AppError::Validation(
                "access and refresh signing secrets must differ".to_owned(),
            ));
        }

        if config.access_ttl_seconds <= 0 || config.refresh_ttl_seconds <= 0 {
            return Err(AppError::Validation(
                "token lifetimes must be positive".to_owned(),
            ));
        }

        let mut validation = Validation::new(Algorithm::HS256);
        // Expiry is the contract; no clock slack.
        validation.leeway = 0;

        Ok(Self {
            access_encoding: EncodingKey::from_secret(config.access_secret.as_bytes()),
            access_decoding: DecodingKey::from_secret(config.access_secret.as_bytes()),
            refresh_encoding: EncodingKey::from_secret(config.refresh_secret.as_bytes()),
            refresh_decoding: DecodingKey::from_secret(config.refresh_secret.as_bytes()),
            access_ttl: Duration::seconds(config.access_ttl_seconds),
            refresh_ttl: Duration::seconds(config.refresh_ttl_seconds),
            validation,
        })
    }

    /// Signs a short-lived access token for the subject.
    pub fn issue_access_token(&self, subject: SubjectId, role: AccountRole) -> AppResult<String> {
        self.issue(subject, role, TokenKind::Access)
    }

    /// Signs a long-lived refresh token for the subject.
    pub fn issue_refresh_token(&self, subject: SubjectId, role: AccountRole) -> AppResult<String> {
        self.issue(subject, role, TokenKind::Refresh)
    }

    /// Issues both credentials at once, as returned by login.
    pub fn issue_pair(&self, subject: SubjectId, role: AccountRole) -> AppResult<TokenPair> {
        Ok(TokenPair {
            access_token: self.issue_access_token(subject, role)?,
            refresh_token: self.issue_refresh_token(subject, role)?,
        })
    }

    /// Verifies a token against the secret selected by `kind`.
    ///
    /// Signature integrity is checked before expiry; the two failures stay
    /// distinguishable for user-facing messaging.
    pub fn verify(&self, token: &str, kind: TokenKind) -> Result<TokenClaims, CredentialError> {
        let decoding_key = match kind {
            TokenKind::Access => &self.access_decoding,
            TokenKind::Refresh => &self.refresh_decoding,
        };

        decode::<TokenClaims>(token, decoding_key, &self.validation)
            .map(|data| data.claims)
            .map_err(|error| match error.kind() {
                ErrorKind::ExpiredSignature => CredentialError::ExpiredToken,
                ErrorKind::InvalidSignature => CredentialError::InvalidCredential,
                _ => CredentialError::MalformedCredential,
            })
    }

    /// Exchanges a valid refresh token for a new access token.
    ///
    /// The refreshed credential is minimal: only the subject and role are
    /// re-derived from the presented token. No new refresh token is issued.
    pub fn refresh(&self, refresh_token: &str) -> AppResult<String> {
        let claims = self
            .verify(refresh_token, TokenKind::Refresh)
            .map_err(|_| CredentialError::InvalidRefreshToken)?;

        self.issue_access_token(claims.sub, claims.role)
    }

    fn issue(&self, subject: SubjectId, role: AccountRole, kind: TokenKind) -> AppResult<String> {
        let ttl = match kind {
            TokenKind::Access => self.access_ttl,
            TokenKind::Refresh => self.refresh_ttl,
        };
        let encoding_key = match kind {
            TokenKind::Access => &self.access_encoding,
            TokenKind::Refresh => &self.refresh_encoding,
        };

        let now = Utc::now();
        let claims = TokenClaims {
            sub: subject,
            role,
            iat: now.timestamp(),
            exp: (now + ttl).timestamp(),
        };

        encode(&Header::new(Algorithm::HS256), &claims, encoding_key).map_err(|error| {
            AppError::Internal(format!("failed to sign {} token: {error}", kind.as_str()))
        })
    }
}
