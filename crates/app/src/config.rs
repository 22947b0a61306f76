//! Terminal configuration

use clap::Args;

use crate::auth::{AccessToken, Session};

/// Store API connection settings.
#[derive(Debug, Args)]
pub struct StoreApiConfig {
    /// Base URL of the store API
    #[arg(
        long,
        env = "TILLPOINT_API_URL",
        default_value = "http://localhost:8000/api"
    )]
    pub api_url: String,

    /// Bearer token for the cashier session
    #[arg(long, env = "TILLPOINT_API_TOKEN", hide_env_values = true)]
    pub api_token: Option<String>,

    /// Log level filter used when RUST_LOG is unset
    #[arg(long, env = "TILLPOINT_LOG", default_value = "info")]
    pub log_level: String,
}

impl StoreApiConfig {
    /// Build the cashier session from the configured token.
    #[must_use]
    pub fn session(&self) -> Session {
        match &self.api_token {
            Some(token) => Session::signed_in(AccessToken::new(token.clone())),
            None => Session::signed_out(),
        }
    }
}
