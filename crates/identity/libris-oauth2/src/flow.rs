//! The connect → provider → callback → authorized state machine.
//!
//! A session moves through three states, tracked by which fields of
//! [`AuthSession`] are set:
//!
//! - *unauthenticated*: neither `state` nor `access_token`
//! - *pending callback*: `state` is set, the user is at the provider
//! - *authenticated*: `access_token` is set
//!
//! [`AuthFlow::disconnect`] brings an authenticated session back to
//! unauthenticated. Failures are returned as [`AuthError`] and never retried.

use crate::client::TokenProvider;
use crate::config::OAuthConfig;
use crate::error::{AuthError, AuthResult};
use crate::redirect::{RedirectUrlResolver, RequestOrigin};
use crate::session::AuthSession;
use crate::state::generate_state_token;
use crate::types::CallbackParams;
use std::sync::Arc;
use tracing::{info, warn};

/// Result of [`AuthFlow::begin_connect`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConnectOutcome {
    /// The session already holds an access token; nothing was started.
    AlreadyConnected,
    /// A new flow was started; send the user here.
    Redirect { authorization_url: String },
}

/// Result of [`AuthFlow::disconnect`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DisconnectOutcome {
    NotConnected,
    Disconnected,
}

#[derive(Clone)]
pub struct AuthFlow {
    config: OAuthConfig,
    provider: Arc<dyn TokenProvider>,
    resolver: RedirectUrlResolver,
}

impl AuthFlow {
    pub fn new(
        config: OAuthConfig,
        provider: Arc<dyn TokenProvider>,
        resolver: RedirectUrlResolver,
    ) -> Self {
        Self {
            config,
            provider,
            resolver,
        }
    }

    /// Returns the session's access token, or [`AuthError::Unauthorized`].
    pub fn ensure_authenticated<'a>(&self, session: &'a AuthSession) -> AuthResult<&'a str> {
        session.access_token().ok_or(AuthError::Unauthorized)
    }

    /// Starts a new flow unless the session is already authenticated.
    ///
    /// A pending state from an earlier, abandoned connect is overwritten:
    /// only the latest flow of a session can complete.
    pub fn begin_connect(
        &self,
        session: &mut AuthSession,
        origin: &RequestOrigin,
    ) -> AuthResult<ConnectOutcome> {
        if session.is_authenticated() {
            info!("User authenticated and authorized");
            return Ok(ConnectOutcome::AlreadyConnected);
        }

        info!("User not authorized; beginning auth exchange");
        let state = generate_state_token();

        let (redirect_url, source) = self.resolver.resolve(origin);
        info!(%redirect_url, "Resolved redirect URL by {}", source);

        let authorization_url = self
            .config
            .authorization_url(&state, &redirect_url)
            .map_err(AuthError::Configuration)?;

        session.state = Some(state);

        info!("Redirecting to the provider for a code");
        Ok(ConnectOutcome::Redirect { authorization_url })
    }

    /// Completes a flow from the provider's redirect.
    ///
    /// The session's pending state is consumed before anything else, so it is
    /// gone whatever the outcome and a replayed callback URL fails with
    /// [`AuthError::InvalidState`].
    pub async fn handle_callback(
        &self,
        session: &mut AuthSession,
        params: &CallbackParams,
        origin: &RequestOrigin,
    ) -> AuthResult<()> {
        info!("Validating the state");
        let expected = session.take_state();
        let actual = params.state();

        let valid = matches!(
            (expected.as_deref(), actual),
            (Some(expected), Some(actual)) if expected == actual
        );

        if !valid {
            warn!(expected = ?expected, actual = ?actual, "State mismatch in callback");
            return Err(AuthError::InvalidState {
                expected,
                actual: actual.map(str::to_string),
            });
        }

        if let Some(message) = params.error_message() {
            warn!(%message, "Provider reported an error");
            return Err(AuthError::CallbackError(message));
        }

        let code = params.code().ok_or(AuthError::MissingCode)?;

        let (redirect_url, source) = self.resolver.resolve(origin);
        info!(%redirect_url, "Exchanging the code for an access token, {}", source);

        let token = self
            .provider
            .exchange_code(code, &redirect_url)
            .await
            .map_err(AuthError::ExchangeFailed)?;

        session.access_token = Some(token.access_token);
        info!("Access token stored in session");

        Ok(())
    }

    /// Fails a callback whose parameters could not be read at all.
    ///
    /// The pending state is consumed just as in [`AuthFlow::handle_callback`].
    pub fn reject_callback(&self, session: &mut AuthSession) -> AuthError {
        let expected = session.take_state();
        warn!(expected = ?expected, "Unreadable callback parameters");

        AuthError::InvalidState {
            expected,
            actual: None,
        }
    }

    /// Revokes the session's token and forgets it.
    ///
    /// On a failed revoke the session is left untouched.
    pub async fn disconnect(&self, session: &mut AuthSession) -> AuthResult<DisconnectOutcome> {
        let Some(token) = session.access_token() else {
            info!("User wasn't connected; nothing was done");
            return Ok(DisconnectOutcome::NotConnected);
        };

        info!("Disconnecting the current user");
        self.provider
            .revoke(token)
            .await
            .map_err(AuthError::RevokeFailed)?;

        info!("Resetting the session");
        session.clear();

        Ok(DisconnectOutcome::Disconnected)
    }
}
