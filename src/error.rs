//! Error types for evogate
//!
//! Structural errors raised by the registry, generator and configuration.
//! Transport failures live in [`crate::client::RequestError`] and never
//! surface through this type.

use thiserror::Error;

/// One failed entry of a batch registration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchFailure {
    pub index: usize,
    pub name: String,
    pub reason: String,
}

/// All structural errors that can occur while building the tool catalog
#[derive(Debug, Error)]
pub enum GatewayError {
    /// A tool with this name is already registered
    #[error("Tool already registered: {0}")]
    DuplicateTool(String),

    /// Tool failed structural validation
    #[error("Invalid tool '{name}': {reason}")]
    InvalidTool { name: String, reason: String },

    /// Tool not present in the registry
    #[error("Tool not found: {0}")]
    ToolNotFound(String),

    /// No endpoint descriptor with this name
    #[error("Endpoint not found: {0}")]
    EndpointNotFound(String),

    /// Endpoint descriptor is internally inconsistent
    #[error("Invalid endpoint descriptor '{name}': {reason}")]
    InvalidDescriptor { name: String, reason: String },

    /// Parameter schema could not be compiled
    #[error("Invalid schema for '{name}': {reason}")]
    InvalidSchema { name: String, reason: String },

    /// One or more entries of a batch registration failed
    #[error("Failed to register {} tool(s): {}", .0.len(), format_failures(.0))]
    Batch(Vec<BatchFailure>),

    /// Client configuration rejected
    #[error("Config error: {0}")]
    Config(String),

    /// JSON serialization/deserialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

fn format_failures(failures: &[BatchFailure]) -> String {
    failures
        .iter()
        .map(|f| format!("[{}] {}: {}", f.index, f.name, f.reason))
        .collect::<Vec<_>>()
        .join("; ")
}

/// Result type alias for evogate operations
pub type Result<T> = std::result::Result<T, GatewayError>;
