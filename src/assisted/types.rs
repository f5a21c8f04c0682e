//! Assisted Service API type definitions
//!
//! These types mirror the Assisted Service v2 REST responses. The wire
//! format is snake_case, so field names map directly.

use serde::{Deserialize, Serialize};

/// An OpenShift cluster managed by the Assisted Service
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Cluster {
    /// Cluster UUID
    pub id: String,

    /// Cluster name
    #[serde(default)]
    pub name: String,

    /// Current installation status (e.g. "ready", "installing", "error")
    #[serde(default)]
    pub status: String,

    /// Human-readable elaboration of the status
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status_info: Option<String>,

    /// OpenShift version being installed
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub openshift_version: Option<String>,

    /// Base DNS domain for the cluster
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_dns_domain: Option<String>,

    /// High availability mode ("Full" or "None")
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub high_availability_mode: Option<String>,

    /// API virtual IP
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_vip: Option<String>,

    /// Ingress virtual IP
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ingress_vip: Option<String>,

    /// Cluster network CIDR
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cluster_network_cidr: Option<String>,

    /// Creation timestamp (RFC 3339)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,

    /// Installation start timestamp (RFC 3339)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub install_started_at: Option<String>,

    /// Installation completion timestamp (RFC 3339)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub install_completed_at: Option<String>,
}

/// Parameters for creating a cluster (POST /clusters)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClusterCreateParams {
    /// Cluster name
    pub name: String,

    /// OpenShift version to install
    pub openshift_version: String,

    /// Pull secret granting access to release images
    pub pull_secret: String,

    /// High availability mode ("Full" or "None")
    #[serde(skip_serializing_if = "Option::is_none")]
    pub high_availability_mode: Option<String>,

    /// Base DNS domain
    #[serde(skip_serializing_if = "Option::is_none")]
    pub base_dns_domain: Option<String>,

    /// Cluster network CIDR
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cluster_network_cidr: Option<String>,

    /// SSH public key installed on discovered hosts
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ssh_public_key: Option<String>,
}

/// Parameters for updating a cluster (PATCH /clusters/{id})
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ClusterUpdateParams {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub base_dns_domain: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_vip: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub ingress_vip: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub ssh_public_key: Option<String>,
}

impl ClusterUpdateParams {
    /// Whether any field is set
    pub fn is_empty(&self) -> bool {
        self.base_dns_domain.is_none()
            && self.api_vip.is_none()
            && self.ingress_vip.is_none()
            && self.ssh_public_key.is_none()
    }
}

/// An installation event for a cluster
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Event {
    /// Cluster UUID the event belongs to
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cluster_id: Option<String>,

    /// Host UUID, when the event is host-scoped
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub host_id: Option<String>,

    /// Severity ("info", "warning", "error", "critical")
    #[serde(default)]
    pub severity: String,

    /// Event message
    #[serde(default)]
    pub message: String,

    /// Event timestamp (RFC 3339)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub event_time: Option<String>,
}

/// A custom manifest attached to a cluster
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Manifest {
    /// Folder the manifest lives in ("manifests" or "openshift")
    #[serde(default)]
    pub folder: String,

    /// Manifest file name
    pub file_name: String,
}

/// Parameters for uploading a manifest (POST /clusters/{id}/manifests)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ManifestCreateParams {
    /// Target folder ("manifests" or "openshift")
    pub folder: String,

    /// Manifest file name
    pub file_name: String,

    /// Base64-encoded manifest content
    pub content: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cluster_deserialization_tolerates_missing_fields() {
        let json = r#"{"id":"5c1c0ab4-4e9f-41a7-a3b7-5e0c5a48e1a2","name":"dev","status":"ready"}"#;
        let cluster: Cluster = serde_json::from_str(json).unwrap();
        assert_eq!(cluster.name, "dev");
        assert_eq!(cluster.status, "ready");
        assert!(cluster.openshift_version.is_none());
    }

    #[test]
    fn test_create_params_skip_unset_fields() {
        let params = ClusterCreateParams {
            name: "dev".to_string(),
            openshift_version: "4.15".to_string(),
            pull_secret: "{}".to_string(),
            high_availability_mode: Some("Full".to_string()),
            base_dns_domain: None,
            cluster_network_cidr: None,
            ssh_public_key: None,
        };

        let json = serde_json::to_string(&params).unwrap();
        assert!(json.contains("high_availability_mode"));
        assert!(!json.contains("base_dns_domain"));
        assert!(!json.contains("ssh_public_key"));
    }

    #[test]
    fn test_update_params_is_empty() {
        assert!(ClusterUpdateParams::default().is_empty());

        let params = ClusterUpdateParams {
            api_vip: Some("192.168.111.5".to_string()),
            ..Default::default()
        };
        assert!(!params.is_empty());
    }

    #[test]
    fn test_event_deserialization() {
        let json = r#"{
            "cluster_id": "5c1c0ab4-4e9f-41a7-a3b7-5e0c5a48e1a2",
            "severity": "info",
            "message": "Host registered",
            "event_time": "2024-05-01T12:00:00.000Z"
        }"#;

        let event: Event = serde_json::from_str(json).unwrap();
        assert_eq!(event.severity, "info");
        assert_eq!(event.message, "Host registered");
    }
}
