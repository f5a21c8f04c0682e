//! Assisted Service MCP Server - Rust Implementation
//!
//! A Model Context Protocol (MCP) server for the OpenShift Assisted
//! Service. Translates MCP tool calls into Assisted Service REST calls.

use std::sync::Arc;

use clap::{Parser, Subcommand};

use anyhow::Result;

use assisted_mcp_server::assisted::auth::TokenManager;
use assisted_mcp_server::assisted::client::AssistedClient;
use assisted_mcp_server::config::Config;
use assisted_mcp_server::mcp::server::McpServer;
use assisted_mcp_server::mcp::sse::run_sse;

/// Assisted Service MCP Server
#[derive(Parser)]
#[command(name = "assisted-mcp-server")]
#[command(author, version, about = "MCP server for the OpenShift Assisted Service")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Serve MCP over HTTP/SSE instead of stdio
    Sse {
        /// Bind host
        #[arg(long)]
        host: Option<String>,

        /// Bind port
        #[arg(long)]
        port: Option<u16>,
    },

    /// Verify that the offline token can be exchanged for an access token
    CheckAuth,
}

#[tokio::main]
async fn main() -> Result<()> {
    // stdout carries the protocol; all logging goes to stderr
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let config = match Config::new() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Error: {}", e);
            eprintln!("Set OFFLINE_TOKEN to a Red Hat offline token (https://console.redhat.com/openshift/token).");
            std::process::exit(1);
        }
    };

    let token_manager = Arc::new(TokenManager::new(&config));

    match cli.command {
        Some(Commands::CheckAuth) => {
            token_manager.check().await?;
            eprintln!("Authentication OK: offline token exchanged successfully.");
            return Ok(());
        }
        Some(Commands::Sse { host, port }) => {
            let host = host.unwrap_or_else(|| config.sse_host.clone());
            let port = port.unwrap_or(config.sse_port);

            let server = build_server(&config, token_manager);
            run_sse(server, &host, port).await?;
        }
        None => {
            let server = build_server(&config, token_manager);
            server.run_stdio().await?;
        }
    }

    Ok(())
}

fn build_server(config: &Config, token_manager: Arc<TokenManager>) -> Arc<McpServer> {
    let client = Arc::new(AssistedClient::new(config, token_manager));
    Arc::new(McpServer::new(client, config.pull_secret.clone()))
}
