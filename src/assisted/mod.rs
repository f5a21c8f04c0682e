//! Assisted Service API module
//!
//! Contains types, authentication, and client for interacting with the
//! OpenShift Assisted Service.

pub mod auth;
pub mod client;
pub mod manifests;
pub mod types;
pub mod utils;
