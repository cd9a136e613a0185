//! Configuration module for the procdoc service
//!
//! This module provides the `ServiceConfig` struct and its builder for
//! configuring the HTTP server and the remote render and text-improvement
//! clients, with validation and sensible defaults.

// Sub-modules
pub mod builder;
pub mod getters;
pub mod methods;
pub mod types;

// Re-exports for public API
pub use builder::{env_vars, ServiceConfigBuilder};
pub use types::{Credential, DocumentBranding, ServiceConfig};
