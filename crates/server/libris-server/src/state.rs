use crate::config::Config;
use crate::routes;
use anyhow::Context;
use axum::extract::FromRef;
use axum_extra::extract::cookie::Key;
use libris_books::{BookLibrary, GoogleBooksClient};
use libris_oauth2::{AuthFlow, OAuth2Client, OAuthConfig, RedirectUrlResolver};
use libris_session::{SessionCookieConfig, session_key_from_base64};
use std::sync::Arc;
use tracing::{info, warn};

/// Application state shared across handlers. Read-only after start-up.
#[derive(Clone)]
pub struct AppState {
    pub auth: Arc<AuthFlow>,
    pub books: Arc<dyn BookLibrary>,
    pub session_key: Key,
    pub cookie_config: SessionCookieConfig,
}

impl AppState {
    pub fn new(auth: AuthFlow, books: Arc<dyn BookLibrary>, session_key: Key) -> Self {
        Self {
            auth: Arc::new(auth),
            books,
            session_key,
            cookie_config: SessionCookieConfig::default(),
        }
    }

    pub fn with_cookie_config(mut self, cookie_config: SessionCookieConfig) -> Self {
        self.cookie_config = cookie_config;
        self
    }

    /// Wires the Google-backed flow and books client from configuration.
    pub fn from_config(config: &Config) -> anyhow::Result<Self> {
        let oauth_config = OAuthConfig::google(&config.client_id, &config.client_secret)
            .with_http_timeout(config.http_timeout());

        let client = OAuth2Client::new(oauth_config.clone())
            .context("Failed to create the OAuth2 HTTP client")?;

        let resolver =
            RedirectUrlResolver::new(routes::CALLBACK).with_override(config.redirect_url.clone());

        let books = GoogleBooksClient::new(config.http_timeout())
            .context("Failed to create the Google Books client")?;

        let session_key = match &config.session_key {
            Some(encoded) => session_key_from_base64(encoded).context("Invalid SESSION_KEY")?,
            None => {
                warn!("SESSION_KEY not set; generating a key, sessions will not survive a restart");
                Key::generate()
            }
        };

        if let Some(url) = config.redirect_url.as_deref().filter(|url| !url.is_empty()) {
            info!("Using the configured redirect URL {}", url);
        }

        let auth = AuthFlow::new(oauth_config, Arc::new(client), resolver);

        Ok(Self::new(auth, Arc::new(books), session_key).with_cookie_config(SessionCookieConfig {
            secure: config.secure_cookies,
        }))
    }
}

impl FromRef<AppState> for Key {
    fn from_ref(state: &AppState) -> Self {
        state.session_key.clone()
    }
}

impl FromRef<AppState> for SessionCookieConfig {
    fn from_ref(state: &AppState) -> Self {
        state.cookie_config
    }
}
