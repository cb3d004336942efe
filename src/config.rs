use crate::error::config::ConfigError;

/// Runtime configuration sourced from the environment.
///
/// Algorithmic constants (schedule hours, grace windows, fuel allow-list,
/// brand aliases, address vocabulary) deliberately do not live here; they are
/// explicit config values with `Default` impls owned by the components that
/// use them, so tests can vary them without touching process state.
pub struct Config {
    pub database_url: String,
    pub server_address: String,
    pub feed_base_url: String,
    pub feed_api_key: String,
    pub feed_api_secret: String,
    /// Pre-supplied bearer token; when set, the token endpoint is never called.
    pub feed_bearer_token: Option<String>,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            database_url: require("DATABASE_URL")?,
            server_address: std::env::var("SERVER_ADDRESS")
                .unwrap_or_else(|_| "0.0.0.0:8080".to_string()),
            feed_base_url: require("FUEL_FEED_URL")?,
            feed_api_key: require("FUEL_FEED_API_KEY")?,
            feed_api_secret: require("FUEL_FEED_API_SECRET")?,
            feed_bearer_token: std::env::var("FUEL_FEED_BEARER_TOKEN").ok(),
        })
    }
}

fn require(var: &str) -> Result<String, ConfigError> {
    std::env::var(var).map_err(|_| ConfigError::MissingEnvVar(var.to_string()))
}
