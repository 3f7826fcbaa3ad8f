//! Tool definitions and call results
//!
//! A [`Tool`] couples a compiled parameter schema with an async handler
//! bound to one remote endpoint. Calling it always produces a
//! [`ToolResult`]; failures are data, never panics.

use std::sync::Arc;

use futures::future::BoxFuture;
use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};
use serde_json::Value;

use crate::client::{ErrorKind, HttpMethod};
use crate::endpoints::Controller;

use super::schema::ParamSchema;

/// Async handler invoked with validated parameters
pub type ToolHandler = Arc<dyn Fn(Value) -> BoxFuture<'static, ToolResult> + Send + Sync>;

/// Error category reported to the agent
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ToolErrorKind {
    AuthenticationError,
    NetworkError,
    TimeoutError,
    ApiError,
    RateLimitError,
    ValidationError,
    UnknownError,
}

impl ToolErrorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::AuthenticationError => "AUTHENTICATION_ERROR",
            Self::NetworkError => "NETWORK_ERROR",
            Self::TimeoutError => "TIMEOUT_ERROR",
            Self::ApiError => "API_ERROR",
            Self::RateLimitError => "RATE_LIMIT_ERROR",
            Self::ValidationError => "VALIDATION_ERROR",
            Self::UnknownError => "UNKNOWN_ERROR",
        }
    }
}

impl From<ErrorKind> for ToolErrorKind {
    fn from(kind: ErrorKind) -> Self {
        match kind {
            ErrorKind::Authentication => Self::AuthenticationError,
            ErrorKind::Network => Self::NetworkError,
            ErrorKind::Timeout => Self::TimeoutError,
            ErrorKind::Api => Self::ApiError,
            ErrorKind::RateLimit => Self::RateLimitError,
            ErrorKind::Unknown => Self::UnknownError,
        }
    }
}

impl std::fmt::Display for ToolErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Failure half of a [`ToolResult`]
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ToolFailure {
    #[serde(rename = "type")]
    pub kind: ToolErrorKind,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suggestion: Option<String>,
}

impl ToolFailure {
    pub fn new(kind: ToolErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            code: None,
            details: None,
            suggestion: None,
        }
    }

    /// Parameter validation failure listing every violation
    pub fn invalid_params(violations: Vec<String>) -> Self {
        Self::new(
            ToolErrorKind::ValidationError,
            format!("Invalid parameters: {}", violations.join("; ")),
        )
        .with_code("INVALID_PARAMS")
        .with_details(Value::from(violations))
        .with_suggestion("Check the parameters against the tool's input schema")
    }

    pub fn with_code(mut self, code: impl Into<String>) -> Self {
        self.code = Some(code.into());
        self
    }

    pub fn with_details(mut self, details: Value) -> Self {
        self.details = Some(details);
        self
    }

    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestion = Some(suggestion.into());
        self
    }
}

/// Outcome of a tool call: success data or a failure, never both
#[derive(Debug, Clone, PartialEq)]
pub enum ToolResult {
    Success(Value),
    Error(ToolFailure),
}

impl ToolResult {
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success(_))
    }

    pub fn data(&self) -> Option<&Value> {
        match self {
            Self::Success(data) => Some(data),
            Self::Error(_) => None,
        }
    }

    pub fn failure(&self) -> Option<&ToolFailure> {
        match self {
            Self::Success(_) => None,
            Self::Error(failure) => Some(failure),
        }
    }
}

impl Serialize for ToolResult {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(2))?;
        match self {
            Self::Success(data) => {
                map.serialize_entry("success", &true)?;
                map.serialize_entry("data", data)?;
            }
            Self::Error(failure) => {
                map.serialize_entry("success", &false)?;
                map.serialize_entry("error", failure)?;
            }
        }
        map.end()
    }
}

/// Remote operation a tool is bound to
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ToolEndpoint {
    pub method: HttpMethod,
    pub path: String,
}

impl ToolEndpoint {
    pub fn new(method: HttpMethod, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
        }
    }
}

/// Agent-facing view of a tool
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolDefinition {
    pub name: String,
    pub description: String,
    pub input_schema: Value,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub example: Option<Value>,
}

/// A named, schema-validated callable backed by one endpoint
#[derive(Clone)]
pub struct Tool {
    /// Tool name (e.g., "evolution_send_text_message")
    pub name: String,
    /// Human-readable description for the agent
    pub description: String,
    pub controller: Controller,
    pub endpoint: ToolEndpoint,
    /// Compiled input schema
    pub schema: ParamSchema,
    /// Example input payload
    pub example: Option<Value>,
    handler: ToolHandler,
}

impl Tool {
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        controller: Controller,
        endpoint: ToolEndpoint,
        schema: ParamSchema,
        handler: ToolHandler,
    ) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            controller,
            endpoint,
            schema,
            example: None,
            handler,
        }
    }

    /// Set example payload
    pub fn with_example(mut self, example: Value) -> Self {
        self.example = Some(example);
        self
    }

    /// Rename the tool, keeping its handler
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Validate `params` against the schema, then run the handler
    pub async fn call(&self, params: Value) -> ToolResult {
        if let Err(violations) = self.schema.validate(&params) {
            tracing::debug!(tool = %self.name, violations = violations.len(), "Rejected tool parameters");
            return ToolResult::Error(ToolFailure::invalid_params(violations));
        }
        (self.handler)(params).await
    }

    /// Convert to the agent-facing definition
    pub fn to_definition(&self) -> ToolDefinition {
        ToolDefinition {
            name: self.name.clone(),
            description: self.description.clone(),
            input_schema: self.schema.raw().clone(),
            example: self.example.clone(),
        }
    }
}

impl std::fmt::Debug for Tool {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Tool")
            .field("name", &self.name)
            .field("controller", &self.controller)
            .field("endpoint", &self.endpoint)
            .field("schema", &self.schema)
            .finish_non_exhaustive()
    }
}
