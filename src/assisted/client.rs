//! Assisted Service API client
//!
//! High-level client for Assisted Service cluster operations. Tools address
//! clusters by name; the client resolves names to UUIDs through the cluster
//! list before hitting id-scoped endpoints.

use std::sync::Arc;

use crate::assisted::auth::TokenManager;
use crate::assisted::manifests::ManifestManager;
use crate::assisted::types::*;
use crate::assisted::utils::{
    encode_manifest_content, validate_cidr, validate_cluster_name, validate_manifest_file_name,
};
use crate::config::Config;
use crate::error::{ApiError, AssistedMcpError, Result};

/// Assisted Service API client
pub struct AssistedClient {
    /// HTTP client
    http_client: reqwest::Client,

    /// Token manager for bearer auth
    token_manager: Arc<TokenManager>,

    /// Base URL of the v2 REST API
    base_url: String,
}

impl AssistedClient {
    /// Create a new Assisted Service client
    pub fn new(config: &Config, token_manager: Arc<TokenManager>) -> Self {
        Self {
            http_client: reqwest::Client::new(),
            token_manager,
            base_url: config.rest_base(),
        }
    }

    /// Get a valid access token
    async fn access_token(&self) -> Result<String> {
        self.token_manager.access_token().await
    }

    /// Base URL for clusters
    fn clusters_url(&self) -> String {
        format!("{}/clusters", self.base_url)
    }

    // ==================== Cluster Operations ====================

    /// List all clusters
    pub async fn list_clusters(&self) -> Result<Vec<Cluster>> {
        let token = self.access_token().await?;

        let response = self
            .http_client
            .get(self.clusters_url())
            .bearer_auth(&token)
            .send()
            .await?;

        if response.status().is_success() {
            Ok(response.json().await?)
        } else {
            let status = response.status();
            let text = response.text().await.unwrap_or_default();
            Err(AssistedMcpError::Api(ApiError::RequestFailed {
                status: status.as_u16(),
                message: format!("Failed to list clusters: {}", text),
            }))
        }
    }

    /// Get a cluster by UUID
    pub async fn get_cluster(&self, cluster_id: &str) -> Result<Cluster> {
        let token = self.access_token().await?;
        let url = format!("{}/{}", self.clusters_url(), cluster_id);

        let response = self
            .http_client
            .get(&url)
            .bearer_auth(&token)
            .send()
            .await?;

        if response.status().is_success() {
            Ok(response.json().await?)
        } else if response.status().as_u16() == 404 {
            Err(AssistedMcpError::Api(ApiError::ClusterNotFound {
                name: cluster_id.to_string(),
            }))
        } else {
            let status = response.status();
            let text = response.text().await.unwrap_or_default();
            Err(AssistedMcpError::Api(ApiError::RequestFailed {
                status: status.as_u16(),
                message: format!("Failed to get cluster: {}", text),
            }))
        }
    }

    /// Resolve a cluster name to the cluster record
    ///
    /// Names are not unique in the service, so duplicates are an error
    /// rather than a silent pick.
    pub async fn resolve_cluster(&self, name: &str) -> Result<Cluster> {
        let clusters = self.list_clusters().await?;

        let mut matches: Vec<Cluster> =
            clusters.into_iter().filter(|c| c.name == name).collect();

        match matches.len() {
            0 => Err(AssistedMcpError::Api(ApiError::ClusterNotFound {
                name: name.to_string(),
            })),
            1 => Ok(matches.remove(0)),
            _ => Err(AssistedMcpError::Api(ApiError::AmbiguousClusterName {
                name: name.to_string(),
            })),
        }
    }

    /// Create a new cluster
    pub async fn create_cluster(&self, params: ClusterCreateParams) -> Result<Cluster> {
        validate_cluster_name(&params.name)?;
        if let Some(ref cidr) = params.cluster_network_cidr {
            validate_cidr(cidr)?;
        }

        let token = self.access_token().await?;

        let response = self
            .http_client
            .post(self.clusters_url())
            .bearer_auth(&token)
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
                message: format!("Failed to create cluster '{}': {}", params.name, text),
            }))
        }
    }

    /// Update a cluster addressed by name
    pub async fn update_cluster(
        &self,
        name: &str,
        updates: ClusterUpdateParams,
    ) -> Result<Cluster> {
        let cluster = self.resolve_cluster(name).await?;

        let token = self.access_token().await?;
        let url = format!("{}/{}", self.clusters_url(), cluster.id);

        let response = self
            .http_client
            .patch(&url)
            .bearer_auth(&token)
            .json(&updates)
            .send()
            .await?;

        if response.status().is_success() {
            Ok(response.json().await?)
        } else {
            let status = response.status();
            let text = response.text().await.unwrap_or_default();
            Err(AssistedMcpError::Api(ApiError::RequestFailed {
                status: status.as_u16(),
                message: format!("Failed to update cluster '{}': {}", name, text),
            }))
        }
    }

    /// Delete a cluster addressed by name
    pub async fn delete_cluster(&self, name: &str) -> Result<()> {
        let cluster = self.resolve_cluster(name).await?;

        let token = self.access_token().await?;
        let url = format!("{}/{}", self.clusters_url(), cluster.id);

        let response = self
            .http_client
            .delete(&url)
            .bearer_auth(&token)
            .send()
            .await?;

        if response.status().is_success() {
            Ok(())
        } else {
            let status = response.status();
            let text = response.text().await.unwrap_or_default();
            Err(AssistedMcpError::Api(ApiError::RequestFailed {
                status: status.as_u16(),
                message: format!("Failed to delete cluster '{}': {}", name, text),
            }))
        }
    }

    // ==================== Event Operations ====================

    /// List installation events for a cluster addressed by name, oldest first
    pub async fn list_events(&self, name: &str) -> Result<Vec<Event>> {
        let cluster = self.resolve_cluster(name).await?;

        let token = self.access_token().await?;
        let url = format!(
            "{}/events?cluster_id={}",
            self.base_url,
            urlencoding::encode(&cluster.id)
        );

        let response = self
            .http_client
            .get(&url)
            .bearer_auth(&token)
            .send()
            .await?;

        if response.status().is_success() {
            let mut events: Vec<Event> = response.json().await?;
            // Timestamps are ISO 8601, so a string sort is chronological
            events.sort_by(|a, b| a.event_time.cmp(&b.event_time));
            Ok(events)
        } else {
            let status = response.status();
            let text = response.text().await.unwrap_or_default();
            Err(AssistedMcpError::Api(ApiError::RequestFailed {
                status: status.as_u16(),
                message: format!("Failed to list events for '{}': {}", name, text),
            }))
        }
    }

    // ==================== Manifest Operations ====================

    /// List custom manifests for a cluster addressed by name
    pub async fn list_manifests(&self, name: &str) -> Result<Vec<Manifest>> {
        let cluster = self.resolve_cluster(name).await?;
        let token = self.access_token().await?;

        ManifestManager::new(&self.http_client, &token, &self.base_url, &cluster.id)
            .list()
            .await
    }

    /// Upload one manifest to a cluster addressed by name
    pub async fn upload_manifest(
        &self,
        name: &str,
        folder: &str,
        file_name: &str,
        content: &[u8],
    ) -> Result<Manifest> {
        validate_manifest_file_name(file_name)?;

        let cluster = self.resolve_cluster(name).await?;
        let token = self.access_token().await?;

        let params = ManifestCreateParams {
            folder: folder.to_string(),
            file_name: file_name.to_string(),
            content: encode_manifest_content(content),
        };

        ManifestManager::new(&self.http_client, &token, &self.base_url, &cluster.id)
            .upload(params)
            .await
    }

    /// Delete one manifest from a cluster addressed by name
    pub async fn delete_manifest(&self, name: &str, folder: &str, file_name: &str) -> Result<()> {
        let cluster = self.resolve_cluster(name).await?;
        let token = self.access_token().await?;

        ManifestManager::new(&self.http_client, &token, &self.base_url, &cluster.id)
            .delete(folder, file_name)
            .await
    }

    /// Delete every manifest in a folder; returns the deleted file names
    pub async fn delete_all_manifests(&self, name: &str, folder: &str) -> Result<Vec<String>> {
        let cluster = self.resolve_cluster(name).await?;
        let token = self.access_token().await?;

        let manager = ManifestManager::new(&self.http_client, &token, &self.base_url, &cluster.id);

        let manifests = manager.list().await?;
        let mut deleted = Vec::new();

        for manifest in manifests.iter().filter(|m| m.folder == folder) {
            manager.delete(&manifest.folder, &manifest.file_name).await?;
            deleted.push(manifest.file_name.clone());
        }

        Ok(deleted)
    }
}
