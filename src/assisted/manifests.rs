//! Custom manifest management
//!
//! Wraps the manifest sub-resource of a cluster: listing, uploading
//! base64-encoded content, and deleting.

use crate::assisted::types::{Manifest, ManifestCreateParams};
use crate::error::{ApiError, AssistedMcpError, Result};

/// Manifest manager for a single cluster
pub struct ManifestManager<'a> {
    client: &'a reqwest::Client,
    access_token: &'a str,
    base_url: &'a str,
    cluster_id: &'a str,
}

impl<'a> ManifestManager<'a> {
    /// Create a new manifest manager
    pub fn new(
        client: &'a reqwest::Client,
        access_token: &'a str,
        base_url: &'a str,
        cluster_id: &'a str,
    ) -> Self {
        Self {
            client,
            access_token,
            base_url,
            cluster_id,
        }
    }

    /// Base URL for the cluster's manifests sub-resource
    fn manifests_url(&self) -> String {
        format!("{}/clusters/{}/manifests", self.base_url, self.cluster_id)
    }

    /// List all custom manifests attached to the cluster
    pub async fn list(&self) -> Result<Vec<Manifest>> {
        let response = self
            .client
            .get(self.manifests_url())
            .bearer_auth(self.access_token)
            .send()
            .await?;

        if response.status().is_success() {
            Ok(response.json().await?)
        } else {
            let status = response.status();
            let text = response.text().await.unwrap_or_default();
            Err(AssistedMcpError::Api(ApiError::RequestFailed {
                status: status.as_u16(),
                message: format!("Failed to list manifests: {}", text),
            }))
        }
    }

    /// Upload a manifest with base64-encoded content
    pub async fn upload(&self, params: ManifestCreateParams) -> Result<Manifest> {
        let response = self
            .client
            .post(self.manifests_url())
            .bearer_auth(self.access_token)
            .json(&params)
            .send()
            .await?;

        if response.status().is_success() {
            Ok(response.json().await?)
        } else {
            let status = response.status();
            let text = response.text().await.unwrap_or_default();
            Err(AssistedMcpError::Api(ApiError::RequestFailed {
                status: status.as_u16(),
                message: format!("Failed to upload manifest '{}': {}", params.file_name, text),
            }))
        }
    }

    /// Delete a single manifest by folder and file name
    pub async fn delete(&self, folder: &str, file_name: &str) -> Result<()> {
        let url = format!(
            "{}?folder={}&file_name={}",
            self.manifests_url(),
            urlencoding::encode(folder),
            urlencoding::encode(file_name)
        );

        let response = self
            .client
            .delete(&url)
            .bearer_auth(self.access_token)
            .send()
            .await?;

        if response.status().is_success() {
            Ok(())
        } else if response.status().as_u16() == 404 {
            Err(AssistedMcpError::Api(ApiError::ManifestNotFound {
                file_name: file_name.to_string(),
            }))
        } else {
            let status = response.status();
            let text = response.text().await.unwrap_or_default();
            Err(AssistedMcpError::Api(ApiError::RequestFailed {
                status: status.as_u16(),
                message: format!("Failed to delete manifest '{}': {}", file_name, text),
            }))
        }
    }
}
