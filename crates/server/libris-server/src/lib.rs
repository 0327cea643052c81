//! HTTP surface of libris: the OAuth2 connect/callback endpoints and the
//! protected books resource.

pub mod config;
pub mod error;
pub mod handlers;
pub mod routes;
pub mod state;
pub mod telemetry;

pub use config::Config;
pub use error::AppError;
pub use routes::router;
pub use state::AppState;
