//! Application services and ports for the Rosterly directory core.

#![forbid(unsafe_code)]

mod account_service;
mod authenticator;
mod directory_service;
mod policy_engine;
mod token_service;

pub use account_service::{AccountRecord, AccountService, PasswordHasher, UserRepository};
pub use authenticator::{Authenticator, require_role, require_self_or_role, strip_bearer};
pub use directory_service::{
    DirectoryPage, DirectoryService, EmployeeProfile, EmployeeRepository,
};
pub use policy_engine::{AccessDecision, DenialReason, PolicyEngine};
pub use token_service::{
    CredentialError, DEFAULT_ACCESS_TTL_SECONDS, DEFAULT_REFRESH_TTL_SECONDS, MIN_SECRET_LENGTH,
    TokenClaims, TokenConfig, TokenKind, TokenPair, TokenService,
};
