/*
[INPUT]:  Application credentials, network identifier, OAuth provider choice
[OUTPUT]: Validated session configuration
[POS]:    Configuration layer - fixed values supplied at construction
[UPDATE]: When adding new configuration options
*/

use serde::{Deserialize, Serialize};

use crate::error::{Result, SessionError};
use crate::sdk::AppCredentials;
use crate::types::AuthProvider;

/// Configuration for one wallet session
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct SessionConfig {
    /// Credentials handed to each SDK client
    pub credentials: AppCredentials,
    /// Network the provider handle targets (e.g., "ethereum")
    #[serde(default = "default_network")]
    pub network: String,
    /// Provider used by the OAuth login flow
    #[serde(default = "default_oauth_provider")]
    pub oauth_provider: AuthProvider,
}

fn default_network() -> String {
    "ethereum".to_string()
}

fn default_oauth_provider() -> AuthProvider {
    AuthProvider::Google
}

impl SessionConfig {
    pub fn new(credentials: AppCredentials) -> Self {
        Self {
            credentials,
            network: default_network(),
            oauth_provider: default_oauth_provider(),
        }
    }

    pub fn with_network(mut self, network: impl Into<String>) -> Self {
        self.network = network.into();
        self
    }

    pub fn validate(&self) -> Result<()> {
        if self.credentials.app_id.trim().is_empty() {
            return Err(SessionError::Config("app_id must not be empty".to_string()));
        }
        if self.credentials.app_key.trim().is_empty() {
            return Err(SessionError::Config("app_key must not be empty".to_string()));
        }
        if self.network.trim().is_empty() {
            return Err(SessionError::Config("network must not be empty".to_string()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_from_json() {
        let config: SessionConfig = serde_json::from_value(serde_json::json!({
            "credentials": { "app_id": "app", "app_key": "key" }
        }))
        .unwrap();

        assert_eq!(config.network, "ethereum");
        assert_eq!(config.oauth_provider, AuthProvider::Google);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_blank_values() {
        let config = SessionConfig::new(AppCredentials::new("app", " "));
        assert!(matches!(config.validate(), Err(SessionError::Config(_))));

        let config = SessionConfig::new(AppCredentials::new("app", "key")).with_network("");
        assert!(matches!(config.validate(), Err(SessionError::Config(_))));
    }
}
