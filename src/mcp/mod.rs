//! MCP (Model Context Protocol) module
//!
//! Implements the MCP server protocol over stdio and SSE transports.

pub mod server;
pub mod sse;
pub mod tools;
pub mod types;
