use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{AppError, AppResult, SubjectId};

/// Account-level role carried in signed credentials.
///
/// This is the coarse account distinction; fine-grained directory
/// visibility comes from the rank hierarchy, not from this role.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AccountRole {
    /// Full administrative access; bypasses the visibility policy.
    Admin,
    /// Regular account; subject to the visibility policy.
    User,
}

impl AccountRole {
    /// Returns the storage string for this role.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Admin => "admin",
            Self::User => "user",
        }
    }

    /// Parses a storage string into an account role.
    pub fn parse(value: &str) -> AppResult<Self> {
        match value {
            "admin" => Ok(Self::Admin),
            "user" => Ok(Self::User),
            _ => Err(AppError::Validation(format!(
                "unknown account role '{value}'"
            ))),
        }
    }
}

/// Verified caller identity extracted from an access credential.
///
/// Only successful token verification produces one of these; it is never
/// built from untrusted input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Principal {
    subject: SubjectId,
    role: AccountRole,
    issued_at: DateTime<Utc>,
    expires_at: DateTime<Utc>,
}

impl Principal {
    /// Creates a principal from verified credential claims.
    #[must_use]
    pub fn new(
        subject: SubjectId,
        role: AccountRole,
        issued_at: DateTime<Utc>,
        expires_at: DateTime<Utc>,
    ) -> Self {
        Self {
            subject,
            role,
            issued_at,
            expires_at,
        }
    }

    /// Returns the stable subject identifier for the caller.
    #[must_use]
    pub fn subject(&self) -> SubjectId {
        self.subject
    }

    /// Returns the account role carried by the credential.
    #[must_use]
    pub fn role(&self) -> AccountRole {
        self.role
    }

    /// Returns whether the caller holds the admin account role.
    #[must_use]
    pub fn is_admin(&self) -> bool {
        self.role == AccountRole::Admin
    }

    /// Returns when the credential was issued.
    #[must_use]
    pub fn issued_at(&self) -> DateTime<Utc> {
        self.issued_at
    }

    /// Returns when the credential expires.
    #[must_use]
    pub fn expires_at(&self) -> DateTime<Utc> {
        self.expires_at
    }
}
