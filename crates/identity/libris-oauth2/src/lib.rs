//! OAuth2 connect/callback flow for a single provider, with the resulting
//! access token bound to the caller's session.
//!
//! The crate is transport-agnostic: [`AuthFlow`] operates on a typed
//! [`AuthSession`] and a [`RequestOrigin`], and reports its outcomes as
//! [`ConnectOutcome`], [`DisconnectOutcome`] or an [`AuthError`]. Persisting the
//! session and mapping errors to HTTP responses is the caller's job.

mod client;
mod config;
mod error;
mod flow;
mod redirect;
mod session;
mod state;
mod types;


pub use client::{OAuth2Client, TokenProvider};
pub use config::{BOOKS_SCOPE, DEFAULT_HTTP_TIMEOUT, OAuthConfig, ProviderEndpoint};
pub use error::{AuthError, AuthResult, ProviderError, ProviderResult};
pub use flow::{AuthFlow, ConnectOutcome, DisconnectOutcome};
pub use redirect::{RedirectSource, RedirectUrlResolver, RequestOrigin};
pub use session::{AuthSession, SessionKey};
pub use state::generate_state_token;
pub use types::{CallbackParams, TokenResponse};
