//! Assisted Service MCP Server Library
//!
//! A Model Context Protocol (MCP) server for the OpenShift Assisted
//! Service. Exposes cluster installation, event, and manifest operations
//! as MCP tools.

pub mod assisted;
pub mod config;
pub mod error;
pub mod mcp;

pub use config::Config;
pub use error::{AssistedMcpError, Result};
