use rosterly_application::{AccountService, Authenticator, DirectoryService, TokenService};

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    /// Login and credential issuance.
    pub account_service: AccountService,
    /// Policy-filtered directory queries.
    pub directory_service: DirectoryService,
    /// Credential refresh.
    pub token_service: TokenService,
    /// Inbound credential verification.
    pub authenticator: Authenticator,
}
