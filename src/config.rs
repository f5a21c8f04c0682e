//! Configuration management for the Assisted Service MCP Server
//!
//! Handles environment variables and runtime configuration.

use crate::error::{AuthError, Result};

/// Configuration for the Assisted Service MCP Server
#[derive(Debug, Clone)]
pub struct Config {
    /// Base URL of the Assisted Service API
    pub api_url: String,

    /// Red Hat SSO token endpoint
    pub sso_token_url: String,

    /// Long-lived offline token used to obtain access tokens
    pub offline_token: String,

    /// Pull secret to use when a create_cluster call does not supply one
    pub pull_secret: Option<String>,

    /// Bind host for the SSE transport
    pub sse_host: String,

    /// Bind port for the SSE transport
    pub sse_port: u16,
}

impl Config {
    /// Create a new configuration from the environment
    pub fn new() -> Result<Self> {
        let offline_token = std::env::var(assisted::OFFLINE_TOKEN_VAR)
            .ok()
            .filter(|t| !t.trim().is_empty())
            .ok_or(AuthError::OfflineTokenMissing)?;

        let api_url = std::env::var("ASSISTED_SERVICE_URL")
            .unwrap_or_else(|_| assisted::API_BASE_URL.to_string());

        let sso_token_url =
            std::env::var("SSO_TOKEN_URL").unwrap_or_else(|_| assisted::SSO_TOKEN_URL.to_string());

        let pull_secret = std::env::var("PULL_SECRET")
            .ok()
            .filter(|s| !s.trim().is_empty());

        let sse_host =
            std::env::var("MCP_SSE_HOST").unwrap_or_else(|_| assisted::DEFAULT_SSE_HOST.to_string());

        let sse_port = std::env::var("MCP_SSE_PORT")
            .ok()
            .and_then(|p| p.parse().ok())
            .unwrap_or(assisted::DEFAULT_SSE_PORT);

        Ok(Self {
            api_url,
            sso_token_url,
            offline_token,
            pull_secret,
            sse_host,
            sse_port,
        })
    }

    /// Full base URL of the Assisted Service v2 REST API
    pub fn rest_base(&self) -> String {
        format!(
            "{}{}",
            self.api_url.trim_end_matches('/'),
            assisted::API_V2_PATH
        )
    }
}

/// Assisted Service API constants
pub mod assisted {
    /// Default Assisted Service host
    pub const API_BASE_URL: &str = "https://api.openshift.com";

    /// Path prefix of the v2 installer API
    pub const API_V2_PATH: &str = "/api/assisted-install/v2";

    /// Red Hat SSO token endpoint
    pub const SSO_TOKEN_URL: &str =
        "https://sso.redhat.com/auth/realms/redhat-external/protocol/openid-connect/token";

    /// Public OAuth client used for the offline-token refresh grant
    pub const SSO_CLIENT_ID: &str = "cloud-services";

    /// Environment variable holding the offline token
    pub const OFFLINE_TOKEN_VAR: &str = "OFFLINE_TOKEN";

    /// Default SSE bind address (matches the upstream server)
    pub const DEFAULT_SSE_HOST: &str = "127.0.0.1";
    pub const DEFAULT_SSE_PORT: u16 = 8070;

    /// Defaults applied when create_cluster omits optional parameters
    pub const DEFAULT_HA_MODE: &str = "Full";
    pub const DEFAULT_CLUSTER_NETWORK_CIDR: &str = "10.128.0.0/14";

    /// Folder custom manifests are uploaded to unless overridden
    pub const DEFAULT_MANIFEST_FOLDER: &str = "manifests";
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rest_base_joins_path() {
        let config = Config {
            api_url: "https://api.openshift.com/".to_string(),
            sso_token_url: assisted::SSO_TOKEN_URL.to_string(),
            offline_token: "token".to_string(),
            pull_secret: None,
            sse_host: assisted::DEFAULT_SSE_HOST.to_string(),
            sse_port: assisted::DEFAULT_SSE_PORT,
        };

        assert_eq!(
            config.rest_base(),
            "https://api.openshift.com/api/assisted-install/v2"
        );
    }

    #[test]
    fn test_defaults() {
        assert_eq!(assisted::DEFAULT_SSE_PORT, 8070);
        assert_eq!(assisted::DEFAULT_HA_MODE, "Full");
        assert_eq!(assisted::DEFAULT_CLUSTER_NETWORK_CIDR, "10.128.0.0/14");
    }
}
