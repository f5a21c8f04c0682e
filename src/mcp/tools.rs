//! MCP Tool definitions and handlers
//!
//! Defines all available tools and their implementations.

use std::path::Path;
use std::sync::Arc;

use serde::Deserialize;
use serde_json::{json, Value};

use crate::assisted::client::AssistedClient;
use crate::assisted::types::{ClusterCreateParams, ClusterUpdateParams};
use crate::assisted::utils::{
    render_cluster_details, render_cluster_summary, render_event, render_manifest,
    validate_manifest_file_name,
};
use crate::config::assisted::{DEFAULT_CLUSTER_NETWORK_CIDR, DEFAULT_HA_MODE, DEFAULT_MANIFEST_FOLDER};
use crate::mcp::types::{CallToolResult, Tool};

/// Tool handler
pub struct ToolHandler {
    client: Arc<AssistedClient>,

    /// Pull secret applied when create_cluster does not supply one
    default_pull_secret: Option<String>,
}

impl ToolHandler {
    /// Create a new tool handler
    pub fn new(client: Arc<AssistedClient>, default_pull_secret: Option<String>) -> Self {
        Self {
            client,
            default_pull_secret,
        }
    }

    /// List all available tools
    pub fn list_tools(&self) -> Vec<Tool> {
        vec![
            tool_def("list_clusters", "List all OpenShift clusters in the Assisted Service", json!({"type": "object", "properties": {}})),
            tool_def("cluster_info", "Get detailed information about an OpenShift cluster", cluster_name_schema("Name of the cluster to get information for")),
            tool_def("cluster_events", "List installation events for an OpenShift cluster", cluster_name_schema("Name of the cluster to list events for")),
            tool_def("create_cluster", "Create a new OpenShift cluster", create_cluster_schema()),
            tool_def("update_cluster", "Update an OpenShift cluster's configuration", update_cluster_schema()),
            tool_def("delete_cluster", "Delete an OpenShift cluster", cluster_name_schema("Name of the cluster to delete")),
            tool_def("list_manifests", "List custom manifests attached to an OpenShift cluster", cluster_name_schema("Name of the cluster to list manifests for")),
            tool_def("create_manifests", "Upload custom manifests from a local directory to an OpenShift cluster", create_manifests_schema()),
            tool_def("delete_manifests", "Delete custom manifests from an OpenShift cluster", delete_manifests_schema()),
        ]
    }

    /// Call a tool by name
    pub async fn call_tool(&self, name: &str, args: Value) -> CallToolResult {
        tracing::info!(tool = name, "calling tool");

        match name {
            "list_clusters" => self.handle_list_clusters().await,
            "cluster_info" => self.handle_cluster_info(args).await,
            "cluster_events" => self.handle_cluster_events(args).await,
            "create_cluster" => self.handle_create_cluster(args).await,
            "update_cluster" => self.handle_update_cluster(args).await,
            "delete_cluster" => self.handle_delete_cluster(args).await,
            "list_manifests" => self.handle_list_manifests(args).await,
            "create_manifests" => self.handle_create_manifests(args).await,
            "delete_manifests" => self.handle_delete_manifests(args).await,
            _ => CallToolResult::error(format!("Unknown tool: {}", name)),
        }
    }

    // ==================== Tool Handlers ====================

    async fn handle_list_clusters(&self) -> CallToolResult {
        match self.client.list_clusters().await {
            Ok(clusters) => {
                if clusters.is_empty() {
                    return CallToolResult::text("No clusters found.");
                }

                let mut text = format!("Found {} clusters:\n", clusters.len());
                for cluster in &clusters {
                    text.push_str(&format!("- {}\n", render_cluster_summary(cluster)));
                }

                CallToolResult::text(text)
            }
            Err(e) => CallToolResult::error(e.to_string()),
        }
    }

    async fn handle_cluster_info(&self, args: Value) -> CallToolResult {
        #[derive(Deserialize)]
        struct Args {
            cluster_name: String,
        }

        let args: Args = match serde_json::from_value(args) {
            Ok(a) => a,
            Err(e) => return CallToolResult::error(format!("Invalid arguments: {}", e)),
        };

        match self.client.resolve_cluster(&args.cluster_name).await {
            Ok(cluster) => CallToolResult::text(render_cluster_details(&cluster)),
            Err(e) => CallToolResult::error(e.to_string()),
        }
    }

    async fn handle_cluster_events(&self, args: Value) -> CallToolResult {
        #[derive(Deserialize)]
        struct Args {
            cluster_name: String,
        }

        let args: Args = match serde_json::from_value(args) {
            Ok(a) => a,
            Err(e) => return CallToolResult::error(format!("Invalid arguments: {}", e)),
        };

        match self.client.list_events(&args.cluster_name).await {
            Ok(events) => {
                if events.is_empty() {
                    return CallToolResult::text(format!(
                        "No events for cluster '{}'.",
                        args.cluster_name
                    ));
                }

                let text = events
                    .iter()
                    .map(render_event)
                    .collect::<Vec<_>>()
                    .join("\n");

                CallToolResult::text(text)
            }
            Err(e) => CallToolResult::error(e.to_string()),
        }
    }

    async fn handle_create_cluster(&self, args: Value) -> CallToolResult {
        #[derive(Deserialize)]
        struct Args {
            name: String,
            openshift_version: String,
            base_dns_domain: Option<String>,
            high_availability_mode: Option<String>,
            cluster_network_cidr: Option<String>,
            pull_secret: Option<String>,
            ssh_public_key: Option<String>,
        }

        let args: Args = match serde_json::from_value(args) {
            Ok(a) => a,
            Err(e) => return CallToolResult::error(format!("Invalid arguments: {}", e)),
        };

        let pull_secret = match args.pull_secret.or_else(|| self.default_pull_secret.clone()) {
            Some(s) => s,
            None => {
                return CallToolResult::error(
                    "No pull secret provided and PULL_SECRET environment variable is not set",
                )
            }
        };

        let params = ClusterCreateParams {
            name: args.name,
            openshift_version: args.openshift_version,
            pull_secret,
            high_availability_mode: Some(
                args.high_availability_mode
                    .unwrap_or_else(|| DEFAULT_HA_MODE.to_string()),
            ),
            base_dns_domain: args.base_dns_domain,
            cluster_network_cidr: Some(
                args.cluster_network_cidr
                    .unwrap_or_else(|| DEFAULT_CLUSTER_NETWORK_CIDR.to_string()),
            ),
            ssh_public_key: args.ssh_public_key,
        };

        match self.client.create_cluster(params).await {
            Ok(cluster) => CallToolResult::text(format!(
                "Cluster '{}' created successfully with ID: {}",
                cluster.name, cluster.id
            )),
            Err(e) => CallToolResult::error(e.to_string()),
        }
    }

    async fn handle_update_cluster(&self, args: Value) -> CallToolResult {
        #[derive(Deserialize)]
        struct Args {
            cluster_name: String,
            base_dns_domain: Option<String>,
            api_vip: Option<String>,
            ingress_vip: Option<String>,
            ssh_public_key: Option<String>,
        }

        let args: Args = match serde_json::from_value(args) {
            Ok(a) => a,
            Err(e) => return CallToolResult::error(format!("Invalid arguments: {}", e)),
        };

        let updates = ClusterUpdateParams {
            base_dns_domain: args.base_dns_domain,
            api_vip: args.api_vip,
            ingress_vip: args.ingress_vip,
            ssh_public_key: args.ssh_public_key,
        };

        if updates.is_empty() {
            return CallToolResult::error("No update fields provided");
        }

        match self.client.update_cluster(&args.cluster_name, updates).await {
            Ok(cluster) => CallToolResult::text(format!(
                "Cluster '{}' updated successfully:\n{}",
                args.cluster_name,
                render_cluster_details(&cluster)
            )),
            Err(e) => CallToolResult::error(e.to_string()),
        }
    }

    async fn handle_delete_cluster(&self, args: Value) -> CallToolResult {
        #[derive(Deserialize)]
        struct Args {
            cluster_name: String,
        }

        let args: Args = match serde_json::from_value(args) {
            Ok(a) => a,
            Err(e) => return CallToolResult::error(format!("Invalid arguments: {}", e)),
        };

        match self.client.delete_cluster(&args.cluster_name).await {
            Ok(_) => CallToolResult::text(format!(
                "Cluster '{}' deleted successfully",
                args.cluster_name
            )),
            Err(e) => CallToolResult::error(e.to_string()),
        }
    }

    async fn handle_list_manifests(&self, args: Value) -> CallToolResult {
        #[derive(Deserialize)]
        struct Args {
            cluster_name: String,
        }

        let args: Args = match serde_json::from_value(args) {
            Ok(a) => a,
            Err(e) => return CallToolResult::error(format!("Invalid arguments: {}", e)),
        };

        match self.client.list_manifests(&args.cluster_name).await {
            Ok(manifests) => {
                if manifests.is_empty() {
                    return CallToolResult::text(format!(
                        "No manifests for cluster '{}'.",
                        args.cluster_name
                    ));
                }

                let mut text = format!("Found {} manifests:\n", manifests.len());
                for manifest in &manifests {
                    text.push_str(&format!("- {}\n", render_manifest(manifest)));
                }

                CallToolResult::text(text)
            }
            Err(e) => CallToolResult::error(e.to_string()),
        }
    }

    async fn handle_create_manifests(&self, args: Value) -> CallToolResult {
        #[derive(Deserialize)]
        struct Args {
            cluster_name: String,
            directory: String,
            folder: Option<String>,
        }

        let args: Args = match serde_json::from_value(args) {
            Ok(a) => a,
            Err(e) => return CallToolResult::error(format!("Invalid arguments: {}", e)),
        };

        let folder = args
            .folder
            .unwrap_or_else(|| DEFAULT_MANIFEST_FOLDER.to_string());

        let files = match collect_manifest_files(Path::new(&args.directory)) {
            Ok(f) => f,
            Err(e) => return CallToolResult::error(e.to_string()),
        };

        if files.is_empty() {
            return CallToolResult::error(format!(
                "No manifest files (*.yaml, *.yml, *.json) found in '{}'",
                args.directory
            ));
        }

        let mut uploaded = Vec::new();
        for (file_name, content) in files {
            match self
                .client
                .upload_manifest(&args.cluster_name, &folder, &file_name, &content)
                .await
            {
                Ok(_) => uploaded.push(file_name),
                Err(e) => {
                    return CallToolResult::error(format!(
                        "Failed to upload '{}': {} ({} uploaded before the failure)",
                        file_name,
                        e,
                        uploaded.len()
                    ))
                }
            }
        }

        CallToolResult::text(format!(
            "Uploaded {} manifests to cluster '{}' (folder '{}'):\n{}",
            uploaded.len(),
            args.cluster_name,
            folder,
            uploaded
                .iter()
                .map(|f| format!("- {}", f))
                .collect::<Vec<_>>()
                .join("\n")
        ))
    }

    async fn handle_delete_manifests(&self, args: Value) -> CallToolResult {
        #[derive(Deserialize)]
        struct Args {
            cluster_name: String,
            file_name: Option<String>,
            folder: Option<String>,
        }

        let args: Args = match serde_json::from_value(args) {
            Ok(a) => a,
            Err(e) => return CallToolResult::error(format!("Invalid arguments: {}", e)),
        };

        let folder = args
            .folder
            .unwrap_or_else(|| DEFAULT_MANIFEST_FOLDER.to_string());

        match args.file_name {
            Some(file_name) => {
                match self
                    .client
                    .delete_manifest(&args.cluster_name, &folder, &file_name)
                    .await
                {
                    Ok(_) => CallToolResult::text(format!(
                        "Manifest '{}' deleted from cluster '{}'",
                        file_name, args.cluster_name
                    )),
                    Err(e) => CallToolResult::error(e.to_string()),
                }
            }
            None => match self
                .client
                .delete_all_manifests(&args.cluster_name, &folder)
                .await
            {
                Ok(deleted) if deleted.is_empty() => CallToolResult::text(format!(
                    "No manifests to delete for cluster '{}'.",
                    args.cluster_name
                )),
                Ok(deleted) => CallToolResult::text(format!(
                    "Deleted {} manifests from cluster '{}':\n{}",
                    deleted.len(),
                    args.cluster_name,
                    deleted
                        .iter()
                        .map(|f| format!("- {}", f))
                        .collect::<Vec<_>>()
                        .join("\n")
                )),
                Err(e) => CallToolResult::error(e.to_string()),
            },
        }
    }
}

/// Read manifest files (*.yaml, *.yml, *.json) from a local directory
fn collect_manifest_files(dir: &Path) -> crate::error::Result<Vec<(String, Vec<u8>)>> {
    let mut files = Vec::new();

    for entry in std::fs::read_dir(dir)? {
        let entry = entry?;
        let path = entry.path();
        if !path.is_file() {
            continue;
        }

        let file_name = match path.file_name().and_then(|n| n.to_str()) {
            Some(n) => n.to_string(),
            None => continue,
        };

        if validate_manifest_file_name(&file_name).is_err() {
            continue;
        }

        let content = std::fs::read(&path)?;
        files.push((file_name, content));
    }

    // Deterministic upload order
    files.sort_by(|a, b| a.0.cmp(&b.0));
    Ok(files)
}

// ==================== Schema Definitions ====================

fn tool_def(name: &str, description: &str, input_schema: Value) -> Tool {
    Tool {
        name: name.to_string(),
        description: Some(description.to_string()),
        input_schema,
    }
}

fn cluster_name_schema(description: &str) -> Value {
    json!({
        "type": "object",
        "properties": {
            "cluster_name": {
                "type": "string",
                "description": description
            }
        },
        "required": ["cluster_name"]
    })
}

fn create_cluster_schema() -> Value {
    json!({
        "type": "object",
        "properties": {
            "name": {
                "type": "string",
                "description": "Name of the cluster to create"
            },
            "openshift_version": {
                "type": "string",
                "description": "Version of OpenShift to install (e.g. '4.15')"
            },
            "base_dns_domain": {
                "type": "string",
                "description": "Base DNS domain for the cluster"
            },
            "high_availability_mode": {
                "type": "string",
                "enum": ["Full", "None"],
                "description": "High availability mode (default: Full)"
            },
            "cluster_network_cidr": {
                "type": "string",
                "description": "Cluster network CIDR (default: 10.128.0.0/14)"
            },
            "pull_secret": {
                "type": "string",
                "description": "Pull secret; falls back to the PULL_SECRET environment variable"
            },
            "ssh_public_key": {
                "type": "string",
                "description": "SSH public key installed on discovered hosts"
            }
        },
        "required": ["name", "openshift_version"]
    })
}

fn update_cluster_schema() -> Value {
    json!({
        "type": "object",
        "properties": {
            "cluster_name": {
                "type": "string",
                "description": "Name of the cluster to update"
            },
            "base_dns_domain": {
                "type": "string",
                "description": "New base DNS domain"
            },
            "api_vip": {
                "type": "string",
                "description": "API virtual IP"
            },
            "ingress_vip": {
                "type": "string",
                "description": "Ingress virtual IP"
            },
            "ssh_public_key": {
                "type": "string",
                "description": "SSH public key installed on discovered hosts"
            }
        },
        "required": ["cluster_name"]
    })
}

fn create_manifests_schema() -> Value {
    json!({
        "type": "object",
        "properties": {
            "cluster_name": {
                "type": "string",
                "description": "Name of the cluster to upload manifests to"
            },
            "directory": {
                "type": "string",
                "description": "Local directory containing manifest files (*.yaml, *.yml, *.json)"
            },
            "folder": {
                "type": "string",
                "enum": ["manifests", "openshift"],
                "description": "Target folder (default: manifests)"
            }
        },
        "required": ["cluster_name", "directory"]
    })
}

fn delete_manifests_schema() -> Value {
    json!({
        "type": "object",
        "properties": {
            "cluster_name": {
                "type": "string",
                "description": "Name of the cluster to delete manifests from"
            },
            "file_name": {
                "type": "string",
                "description": "Manifest file name; omit to delete every manifest in the folder"
            },
            "folder": {
                "type": "string",
                "enum": ["manifests", "openshift"],
                "description": "Folder to delete from (default: manifests)"
            }
        },
        "required": ["cluster_name"]
    })
}
