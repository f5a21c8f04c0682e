//! Error types for the Assisted Service MCP Server
//!
//! This module defines the error hierarchy for all operations in the server.

use thiserror::Error;

/// Main error type for the Assisted Service MCP Server
#[derive(Error, Debug)]
pub enum AssistedMcpError {
    /// Red Hat SSO authentication errors
    #[error("Authentication error: {0}")]
    Auth(#[from] AuthError),

    /// Assisted Service API errors
    #[error("Assisted Service API error: {0}")]
    Api(#[from] ApiError),

    /// Validation errors
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// MCP protocol errors
    #[error("MCP protocol error: {0}")]
    Mcp(#[from] McpError),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// HTTP client errors
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
}

/// Red Hat SSO authentication errors
#[derive(Error, Debug)]
pub enum AuthError {
    #[error("OFFLINE_TOKEN environment variable is not set")]
    OfflineTokenMissing,

    #[error("Failed to refresh access token: {message}")]
    TokenRefreshFailed { message: String },

    #[error("SSO token endpoint returned an unusable response: {message}")]
    MalformedTokenResponse { message: String },
}

/// Assisted Service API errors
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Cluster not found: {name}")]
    ClusterNotFound { name: String },

    #[error("Multiple clusters named '{name}' exist; cannot resolve by name")]
    AmbiguousClusterName { name: String },

    #[error("Manifest not found: {file_name}")]
    ManifestNotFound { file_name: String },

    #[error("API request failed ({status}): {message}")]
    RequestFailed { status: u16, message: String },
}

/// Validation errors
#[derive(Error, Debug)]
pub enum ValidationError {
    #[error("Invalid cluster name '{name}': {message}")]
    InvalidClusterName { name: String, message: String },

    #[error("Invalid CIDR: {cidr}")]
    InvalidCidr { cidr: String },

    #[error("Invalid manifest file name '{file_name}': {message}")]
    InvalidManifestFileName { file_name: String, message: String },
}

/// MCP protocol errors
#[derive(Error, Debug)]
pub enum McpError {
    #[error("Transport error: {message}")]
    TransportError { message: String },
}

/// Result type alias for Assisted MCP operations
pub type Result<T> = std::result::Result<T, AssistedMcpError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = ApiError::ClusterNotFound {
            name: "prod-east".to_string(),
        };
        assert!(err.to_string().contains("prod-east"));
    }

    #[test]
    fn test_error_conversion() {
        let auth_err = AuthError::OfflineTokenMissing;
        let err: AssistedMcpError = auth_err.into();
        assert!(matches!(err, AssistedMcpError::Auth(_)));
    }

    #[test]
    fn test_request_failed_includes_status() {
        let err = ApiError::RequestFailed {
            status: 503,
            message: "service unavailable".to_string(),
        };
        assert!(err.to_string().contains("503"));
    }
}
