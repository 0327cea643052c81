//! Provider calls: authorization code exchange and token revocation.

use crate::config::OAuthConfig;
use crate::error::{ProviderError, ProviderResult};
use crate::types::TokenResponse;
use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use tracing::{debug, error, info, warn};

/// The outbound half of the flow.
#[async_trait]
pub trait TokenProvider: Send + Sync {
    /// Trades a one-time authorization code for tokens. `redirect_url` must be
    /// the exact value sent in the authorization request.
    async fn exchange_code(&self, code: &str, redirect_url: &str) -> ProviderResult<TokenResponse>;

    /// Invalidates an access token at the provider.
    async fn revoke(&self, access_token: &str) -> ProviderResult<()>;
}

/// [`TokenProvider`] talking to the configured endpoints over HTTP.
#[derive(Clone)]
pub struct OAuth2Client {
    http_client: Client,
    config: OAuthConfig,
}

impl OAuth2Client {
    pub fn new(config: OAuthConfig) -> ProviderResult<Self> {
        let http_client = Client::builder().timeout(config.http_timeout).build()?;

        Ok(Self {
            http_client,
            config,
        })
    }
}

#[async_trait]
impl TokenProvider for OAuth2Client {
    async fn exchange_code(&self, code: &str, redirect_url: &str) -> ProviderResult<TokenResponse> {
        let params = [
            ("grant_type", "authorization_code"),
            ("code", code),
            ("client_id", self.config.client_id.as_str()),
            ("client_secret", self.config.client_secret.as_str()),
            ("redirect_uri", redirect_url),
        ];

        let response = self
            .http_client
            .post(&self.config.endpoint.token_url)
            .form(&params)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            error!(status = status.as_u16(), "Token exchange failed: {}", body);
            return Err(ProviderError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let token_response: TokenResponse = response
            .json()
            .await
            .map_err(|e| ProviderError::InvalidTokenResponse(e.to_string()))?;

        info!("Successfully exchanged code for tokens");
        Ok(token_response)
    }

    async fn revoke(&self, access_token: &str) -> ProviderResult<()> {
        let response = self
            .http_client
            .post(&self.config.endpoint.revoke_url)
            .form(&[("token", access_token)])
            .send()
            .await?;

        let status = response.status();
        if status.is_success() {
            debug!("Token revoked");
            return Ok(());
        }

        let body = response.text().await.unwrap_or_default();

        // Google answers 400 invalid_token for tokens that already expired or
        // were revoked elsewhere.
        if status == StatusCode::BAD_REQUEST && body.contains("invalid_token") {
            warn!("Token was already invalid at the provider");
            return Ok(());
        }

        error!(status = status.as_u16(), "Token revocation failed: {}", body);
        Err(ProviderError::Status {
            status: status.as_u16(),
            body,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ProviderEndpoint;
    use wiremock::matchers::{body_string_contains, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    async fn setup_client() -> (MockServer, OAuth2Client) {
        let mock_server = MockServer::start().await;

        let config = OAuthConfig::google("mock_client_id", "mock_secret").with_endpoint(
            ProviderEndpoint {
                authorization_url: format!("{}/authorize", mock_server.uri()),
                token_url: format!("{}/token", mock_server.uri()),
                revoke_url: format!("{}/revoke", mock_server.uri()),
            },
        );

        let client = OAuth2Client::new(config).unwrap();
        (mock_server, client)
    }

    #[tokio::test]
    async fn test_exchange_code_posts_form() {
        let (mock_server, client) = setup_client().await;

        Mock::given(method("POST"))
            .and(path("/token"))
            .and(body_string_contains("grant_type=authorization_code"))
            .and(body_string_contains("code=ABC123"))
            .and(body_string_contains("client_secret=mock_secret"))
            .and(body_string_contains(
                "redirect_uri=http%3A%2F%2Flocalhost%3A8080%2Fauth%2Fcallback",
            ))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "access_token": "tok_xyz",
                "token_type": "Bearer",
                "expires_in": 3600,
                "refresh_token": "refresh_xyz"
            })))
            .expect(1)
            .mount(&mock_server)
            .await;

        let token = client
            .exchange_code("ABC123", "http://localhost:8080/auth/callback")
            .await
            .unwrap();

        assert_eq!(token.access_token, "tok_xyz");
        assert_eq!(token.refresh_token.as_deref(), Some("refresh_xyz"));
    }

    #[tokio::test]
    async fn test_exchange_code_reports_provider_status() {
        let (mock_server, client) = setup_client().await;

        Mock::given(method("POST"))
            .and(path("/token"))
            .respond_with(
                ResponseTemplate::new(400).set_body_string(r#"{"error":"invalid_grant"}"#),
            )
            .mount(&mock_server)
            .await;

        let result = client.exchange_code("stale", "http://x/cb").await;

        match result {
            Err(ProviderError::Status { status, body }) => {
                assert_eq!(status, 400);
                assert!(body.contains("invalid_grant"));
            }
            other => panic!("Expected status error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_exchange_code_rejects_malformed_body() {
        let (mock_server, client) = setup_client().await;

        Mock::given(method("POST"))
            .and(path("/token"))
            .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
            .mount(&mock_server)
            .await;

        let result = client.exchange_code("ABC123", "http://x/cb").await;
        assert!(matches!(result, Err(ProviderError::InvalidTokenResponse(_))));
    }

    #[tokio::test]
    async fn test_revoke_sends_token_in_body() {
        let (mock_server, client) = setup_client().await;

        Mock::given(method("POST"))
            .and(path("/revoke"))
            .and(body_string_contains("token=tok_xyz"))
            .respond_with(ResponseTemplate::new(200))
            .expect(1)
            .mount(&mock_server)
            .await;

        client.revoke("tok_xyz").await.unwrap();
    }

    #[tokio::test]
    async fn test_revoke_of_dead_token_succeeds() {
        let (mock_server, client) = setup_client().await;

        Mock::given(method("POST"))
            .and(path("/revoke"))
            .respond_with(
                ResponseTemplate::new(400).set_body_string(r#"{"error":"invalid_token"}"#),
            )
            .mount(&mock_server)
            .await;

        assert!(client.revoke("tok_xyz").await.is_ok());
    }

    #[tokio::test]
    async fn test_revoke_failure() {
        let (mock_server, client) = setup_client().await;

        Mock::given(method("POST"))
            .and(path("/revoke"))
            .respond_with(ResponseTemplate::new(503))
            .mount(&mock_server)
            .await;

        let result = client.revoke("tok_xyz").await;
        assert!(matches!(result, Err(ProviderError::Status { status: 503, .. })));
    }
}
