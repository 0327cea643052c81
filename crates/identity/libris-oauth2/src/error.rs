//! OAuth2 error types.

use thiserror::Error;

pub type AuthResult<T> = Result<T, AuthError>;

pub type ProviderResult<T> = Result<T, ProviderError>;

/// Outcomes of the auth flow that stop a request.
///
/// The `Display` strings are meant for server-side logs and may carry
/// diagnostic detail (state values, provider responses). They never contain
/// the access token.
#[derive(Debug, Error)]
pub enum AuthError {
    #[error("User not authorized: no access token in session")]
    Unauthorized,

    #[error("Invalid state parameter: expected {expected:?}; got {actual:?}")]
    InvalidState {
        expected: Option<String>,
        actual: Option<String>,
    },

    #[error("Callback received error: {0}")]
    CallbackError(String),

    #[error("Code not found in callback")]
    MissingCode,

    #[error("Problem with token exchange: {0}")]
    ExchangeFailed(#[source] ProviderError),

    #[error("Failed to revoke token for the current user: {0}")]
    RevokeFailed(#[source] ProviderError),

    #[error("Invalid provider configuration: {0}")]
    Configuration(#[source] ProviderError),
}

/// Failures talking to the OAuth2 provider.
#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Provider answered {status}: {body}")]
    Status { status: u16, body: String },

    #[error("Invalid token response: {0}")]
    InvalidTokenResponse(String),

    #[error("URL parsing error: {0}")]
    Url(#[from] url::ParseError),
}
