//! Assisted Service utility functions
//!
//! Input validation and text rendering for tool output.

use base64::{engine::general_purpose::STANDARD, Engine};

use crate::assisted::types::{Cluster, Event, Manifest};
use crate::error::{AssistedMcpError, Result, ValidationError};

/// Maximum cluster name length accepted by the Assisted Service
const MAX_CLUSTER_NAME_LEN: usize = 54;

/// Validate a cluster name (RFC 1123 label, as the service enforces)
pub fn validate_cluster_name(name: &str) -> Result<()> {
    let invalid = |message: &str| {
        AssistedMcpError::Validation(ValidationError::InvalidClusterName {
            name: name.to_string(),
            message: message.to_string(),
        })
    };

    if name.is_empty() {
        return Err(invalid("name must not be empty"));
    }
    if name.len() > MAX_CLUSTER_NAME_LEN {
        return Err(invalid("name must be at most 54 characters"));
    }
    if !name
        .chars()
        .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-')
    {
        return Err(invalid(
            "name may only contain lowercase letters, digits, and hyphens",
        ));
    }
    // chars() is non-empty here, so first/last always exist
    let first = name.chars().next().unwrap_or('-');
    let last = name.chars().last().unwrap_or('-');
    if !first.is_ascii_alphanumeric() || !last.is_ascii_alphanumeric() {
        return Err(invalid("name must start and end with a letter or digit"));
    }

    Ok(())
}

/// Validate an IPv4 CIDR string such as "10.128.0.0/14"
pub fn validate_cidr(cidr: &str) -> Result<()> {
    let invalid = || {
        AssistedMcpError::Validation(ValidationError::InvalidCidr {
            cidr: cidr.to_string(),
        })
    };

    let (addr, prefix) = cidr.split_once('/').ok_or_else(invalid)?;
    addr.parse::<std::net::Ipv4Addr>().map_err(|_| invalid())?;

    let prefix: u8 = prefix.parse().map_err(|_| invalid())?;
    if prefix > 32 {
        return Err(invalid());
    }

    Ok(())
}

/// Validate a manifest file name (no path components, known extension)
pub fn validate_manifest_file_name(file_name: &str) -> Result<()> {
    let invalid = |message: &str| {
        AssistedMcpError::Validation(ValidationError::InvalidManifestFileName {
            file_name: file_name.to_string(),
            message: message.to_string(),
        })
    };

    if file_name.is_empty() {
        return Err(invalid("file name must not be empty"));
    }
    if file_name.contains('/') || file_name.contains('\\') {
        return Err(invalid("file name must not contain path separators"));
    }

    let known_extension = [".yaml", ".yml", ".json"]
        .iter()
        .any(|ext| file_name.ends_with(ext));
    if !known_extension {
        return Err(invalid("file name must end with .yaml, .yml, or .json"));
    }

    Ok(())
}

/// Encode manifest content for upload (standard base64)
pub fn encode_manifest_content(content: &[u8]) -> String {
    STANDARD.encode(content)
}

/// One-line summary of a cluster for list output
pub fn render_cluster_summary(cluster: &Cluster) -> String {
    format!(
        "{} (id: {}, status: {}, version: {})",
        cluster.name,
        cluster.id,
        cluster.status,
        cluster.openshift_version.as_deref().unwrap_or("unknown"),
    )
}

/// Multi-line rendering of a cluster for cluster_info output
pub fn render_cluster_details(cluster: &Cluster) -> String {
    let mut text = format!(
        "Name: {}\nID: {}\nStatus: {}\n",
        cluster.name, cluster.id, cluster.status
    );

    if let Some(ref info) = cluster.status_info {
        text.push_str(&format!("Status info: {}\n", info));
    }
    if let Some(ref version) = cluster.openshift_version {
        text.push_str(&format!("OpenShift version: {}\n", version));
    }
    if let Some(ref domain) = cluster.base_dns_domain {
        text.push_str(&format!("Base DNS domain: {}\n", domain));
    }
    if let Some(ref mode) = cluster.high_availability_mode {
        text.push_str(&format!("High availability mode: {}\n", mode));
    }
    if let Some(ref vip) = cluster.api_vip {
        text.push_str(&format!("API VIP: {}\n", vip));
    }
    if let Some(ref vip) = cluster.ingress_vip {
        text.push_str(&format!("Ingress VIP: {}\n", vip));
    }
    if let Some(ref cidr) = cluster.cluster_network_cidr {
        text.push_str(&format!("Cluster network CIDR: {}\n", cidr));
    }
    if let Some(ref created) = cluster.created_at {
        text.push_str(&format!("Created at: {}\n", created));
    }
    if let Some(ref started) = cluster.install_started_at {
        text.push_str(&format!("Install started at: {}\n", started));
    }
    if let Some(ref completed) = cluster.install_completed_at {
        text.push_str(&format!("Install completed at: {}\n", completed));
    }

    text
}

/// One-line rendering of an installation event
pub fn render_event(event: &Event) -> String {
    format!(
        "[{}] {} {}",
        event.severity.to_uppercase(),
        event.event_time.as_deref().unwrap_or("-"),
        event.message
    )
}

/// One-line rendering of a manifest entry
pub fn render_manifest(manifest: &Manifest) -> String {
    format!("{}/{}", manifest.folder, manifest.file_name)
}
