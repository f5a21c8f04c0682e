//! Red Hat SSO authentication
//!
//! The Assisted Service authenticates with short-lived access tokens
//! obtained from Red Hat SSO. The user supplies a long-lived offline token;
//! this module exchanges it via the OAuth refresh_token grant and caches
//! the result until shortly before expiry.

use std::sync::Arc;
use std::time::{SystemTime, UNIX_EPOCH};

use serde::Deserialize;
use tokio::sync::RwLock;

use crate::config::{assisted, Config};
use crate::error::{AuthError, AssistedMcpError, Result};

/// Seconds before expiry at which a cached token is considered stale
const EXPIRY_SKEW_SECS: i64 = 60;

/// Token response from the SSO token endpoint
#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
    expires_in: Option<i64>,
}

/// A cached access token with its expiry timestamp
#[derive(Debug, Clone)]
struct CachedToken {
    access_token: String,
    /// Unix seconds; None when the endpoint did not report a lifetime
    expires_at: Option<i64>,
}

impl CachedToken {
    fn is_fresh(&self, now: i64) -> bool {
        match self.expires_at {
            Some(expiry) => expiry - now > EXPIRY_SKEW_SECS,
            None => false,
        }
    }
}

/// Manages access tokens for the Assisted Service API
pub struct TokenManager {
    /// SSO token endpoint
    token_url: String,

    /// Offline token used for the refresh grant
    offline_token: String,

    /// HTTP client
    http_client: reqwest::Client,

    /// Cached access token
    token: Arc<RwLock<Option<CachedToken>>>,
}

impl TokenManager {
    /// Create a new token manager from configuration
    pub fn new(config: &Config) -> Self {
        Self {
            token_url: config.sso_token_url.clone(),
            offline_token: config.offline_token.clone(),
            http_client: reqwest::Client::new(),
            token: Arc::new(RwLock::new(None)),
        }
    }

    /// Get a valid access token, refreshing if necessary
    pub async fn access_token(&self) -> Result<String> {
        let now = unix_now();

        {
            let token = self.token.read().await;
            if let Some(ref cached) = *token {
                if cached.is_fresh(now) {
                    return Ok(cached.access_token.clone());
                }
            }
        }

        self.refresh().await
    }

    /// Exchange the offline token for a fresh access token
    async fn refresh(&self) -> Result<String> {
        let params = [
            ("grant_type", "refresh_token"),
            ("client_id", assisted::SSO_CLIENT_ID),
            ("refresh_token", self.offline_token.as_str()),
        ];

        tracing::debug!(url = %self.token_url, "refreshing access token");

        let response = self
            .http_client
            .post(&self.token_url)
            .form(&params)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let text = response.text().await.unwrap_or_default();
            return Err(AssistedMcpError::Auth(AuthError::TokenRefreshFailed {
                message: format!("{}: {}", status, text),
            }));
        }

        let token_response: TokenResponse = response.json().await.map_err(|e| {
            AssistedMcpError::Auth(AuthError::MalformedTokenResponse {
                message: e.to_string(),
            })
        })?;

        let now = unix_now();
        let cached = CachedToken {
            access_token: token_response.access_token.clone(),
            expires_at: token_response.expires_in.map(|e| now + e),
        };

        *self.token.write().await = Some(cached);

        tracing::debug!("access token refreshed");
        Ok(token_response.access_token)
    }

    /// Verify that the offline token can be exchanged at all
    pub async fn check(&self) -> Result<()> {
        self.refresh().await.map(|_| ())
    }
}

fn unix_now() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs() as i64)
        .unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cached_token_freshness() {
        let now = unix_now();

        let fresh = CachedToken {
            access_token: "a".to_string(),
            expires_at: Some(now + 600),
        };
        assert!(fresh.is_fresh(now));

        let stale = CachedToken {
            access_token: "a".to_string(),
            expires_at: Some(now + 30),
        };
        assert!(!stale.is_fresh(now));

        let unknown = CachedToken {
            access_token: "a".to_string(),
            expires_at: None,
        };
        assert!(!unknown.is_fresh(now));
    }
}
