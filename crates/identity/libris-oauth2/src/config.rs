//! OAuth2 configuration types.

use crate::error::ProviderResult;
use std::time::Duration;
use url::Url;

/// Read-only access to the user's Google Books library.
pub const BOOKS_SCOPE: &str = "https://www.googleapis.com/auth/books";

/// Upper bound for every outbound call to the provider.
pub const DEFAULT_HTTP_TIMEOUT: Duration = Duration::from_secs(10);

/// Provider URLs used by the flow.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProviderEndpoint {
    pub authorization_url: String,
    pub token_url: String,
    pub revoke_url: String,
}

impl ProviderEndpoint {
    pub fn google() -> Self {
        Self {
            authorization_url: "https://accounts.google.com/o/oauth2/auth".to_string(),
            token_url: "https://oauth2.googleapis.com/token".to_string(),
            revoke_url: "https://oauth2.googleapis.com/revoke".to_string(),
        }
    }
}

/// Immutable client configuration, shared by every request.
///
/// The redirect URL is not stored here. It depends on the inbound request and
/// is passed to [`OAuthConfig::authorization_url`] and the token exchange on
/// every call.
#[derive(Debug, Clone)]
pub struct OAuthConfig {
    pub client_id: String,
    pub client_secret: String,
    pub endpoint: ProviderEndpoint,
    pub scopes: Vec<String>,
    pub http_timeout: Duration,
}

impl OAuthConfig {
    /// Google configuration requesting the books scope.
    pub fn google(client_id: impl Into<String>, client_secret: impl Into<String>) -> Self {
        Self {
            client_id: client_id.into(),
            client_secret: client_secret.into(),
            endpoint: ProviderEndpoint::google(),
            scopes: vec![BOOKS_SCOPE.to_string()],
            http_timeout: DEFAULT_HTTP_TIMEOUT,
        }
    }

    pub fn with_endpoint(mut self, endpoint: ProviderEndpoint) -> Self {
        self.endpoint = endpoint;
        self
    }

    pub fn with_http_timeout(mut self, timeout: Duration) -> Self {
        self.http_timeout = timeout;
        self
    }

    /// Builds the provider URL the user is sent to in order to grant access.
    pub fn authorization_url(&self, state: &str, redirect_url: &str) -> ProviderResult<String> {
        let mut url = Url::parse(&self.endpoint.authorization_url)?;

        url.query_pairs_mut()
            .append_pair("client_id", &self.client_id)
            .append_pair("redirect_uri", redirect_url)
            .append_pair("response_type", "code")
            .append_pair("scope", &self.scopes.join(" "))
            .append_pair("state", state);

        Ok(url.to_string())
    }
}
