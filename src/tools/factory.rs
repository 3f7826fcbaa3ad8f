//! Tool factory
//!
//! Turns an [`EndpointDescriptor`] into a [`Tool`] whose handler resolves
//! the path template, dispatches through the shared [`RequestClient`] and
//! maps failures to agent-facing [`ToolFailure`]s.

use std::sync::Arc;

use futures::future::BoxFuture;
use serde_json::{Map, Value};

use crate::client::{ErrorKind, HttpMethod, RequestClient, RequestError};
use crate::endpoints::{EndpointDescriptor, placeholders};
use crate::error::Result;

use super::definition::{Tool, ToolEndpoint, ToolErrorKind, ToolFailure, ToolHandler, ToolResult};
use super::schema::ParamSchema;

/// Builds tools bound to one request client
#[derive(Debug, Clone)]
pub struct ToolFactory {
    client: Arc<RequestClient>,
}

impl ToolFactory {
    pub fn new(client: Arc<RequestClient>) -> Self {
        Self { client }
    }

    pub fn client(&self) -> &Arc<RequestClient> {
        &self.client
    }

    /// Build a tool for `descriptor`, compiling its parameter schema
    pub fn build(&self, descriptor: &EndpointDescriptor) -> Result<Tool> {
        let schema = ParamSchema::compile(&descriptor.name, descriptor.schema.clone())?;
        let handler = endpoint_handler(self.client.clone(), Arc::new(descriptor.clone()));

        let mut tool = Tool::new(
            descriptor.name.clone(),
            descriptor.description.clone(),
            descriptor.controller,
            ToolEndpoint::new(descriptor.method, descriptor.path.clone()),
            schema,
            handler,
        );
        if let Some(example) = &descriptor.example {
            tool = tool.with_example(example.clone());
        }
        Ok(tool)
    }
}

fn endpoint_handler(client: Arc<RequestClient>, descriptor: Arc<EndpointDescriptor>) -> ToolHandler {
    Arc::new(move |params: Value| -> BoxFuture<'static, ToolResult> {
        let client = client.clone();
        let descriptor = descriptor.clone();
        Box::pin(async move { invoke(&client, &descriptor, params).await })
    })
}

async fn invoke(client: &RequestClient, descriptor: &EndpointDescriptor, params: Value) -> ToolResult {
    let (path, body) = match resolve(descriptor, &params) {
        Ok(resolved) => resolved,
        Err(failure) => return ToolResult::Error(failure),
    };

    let outcome = match descriptor.method {
        HttpMethod::Get => client.get(&path, body).await,
        HttpMethod::Post => client.post(&path, body).await,
        HttpMethod::Put => client.put(&path, body).await,
        HttpMethod::Delete => client.delete(&path, body).await,
    };

    match outcome {
        Ok(response) => {
            let data = match descriptor.shaper {
                Some(shape) => shape(&params, response.body),
                None => response.body,
            };
            ToolResult::Success(data)
        }
        Err(error) => {
            tracing::debug!(endpoint = %descriptor.name, kind = %error.kind, status = ?error.status, "Tool call failed");
            ToolResult::Error(failure_for(&error))
        }
    }
}

/// Substitute path tokens and strip them from the outgoing body
fn resolve(descriptor: &EndpointDescriptor, params: &Value) -> std::result::Result<(String, Option<Value>), ToolFailure> {
    let mut fields = match params {
        Value::Object(map) => map.clone(),
        Value::Null => Map::new(),
        other => {
            return Err(ToolFailure::new(
                ToolErrorKind::UnknownError,
                format!("Tool parameters must be a JSON object, got {}", other),
            )
            .with_code("INVALID_REQUEST"));
        }
    };

    let mut path = descriptor.path.clone();
    for token in placeholders(&descriptor.path) {
        let value = match fields.remove(&token) {
            Some(Value::String(s)) if !s.trim().is_empty() => s,
            Some(Value::Number(n)) => n.to_string(),
            _ => {
                return Err(ToolFailure::new(
                    ToolErrorKind::ValidationError,
                    format!("Missing value for path parameter '{}'", token),
                )
                .with_code("MISSING_PATH_PARAM")
                .with_suggestion(format!("Provide '{}' as a non-empty string", token)));
            }
        };
        if is_dot_segment(&value) {
            return Err(ToolFailure::new(
                ToolErrorKind::ValidationError,
                format!("Path parameter '{}' cannot be '{}'", token, value),
            )
            .with_code("INVALID_PATH_PARAM")
            .with_suggestion(format!("Provide the actual '{}' identifier", token)));
        }
        path = path.replace(&format!("{{{}}}", token), &urlencoding::encode(&value));
    }

    let body = if fields.is_empty() { None } else { Some(Value::Object(fields)) };
    Ok((path, body))
}

/// True for `.` or `..`, including percent-encoded forms
fn is_dot_segment(value: &str) -> bool {
    let decoded = urlencoding::decode(value).map(|d| d.into_owned()).unwrap_or_else(|_| value.to_string());
    matches!(decoded.trim(), "." | "..")
}

/// Map a classified request failure to its fixed agent-facing message
fn failure_for(error: &RequestError) -> ToolFailure {
    let kind = match (error.kind, error.status) {
        (ErrorKind::Api, Some(400 | 422)) => ToolErrorKind::ValidationError,
        (kind, _) => ToolErrorKind::from(kind),
    };
    let (message, suggestion) = match (error.kind, error.status) {
        (ErrorKind::Authentication, _) => (
            "Authentication with the Evolution API failed",
            "Check that the API key is correct and allowed to access this instance",
        ),
        (ErrorKind::Network, _) => (
            "Could not connect to the Evolution API",
            "Verify that the server URL is correct and the server is reachable",
        ),
        (ErrorKind::Timeout, _) => (
            "The Evolution API did not respond in time",
            "Retry later or raise the request timeout",
        ),
        (ErrorKind::Api, Some(404)) => (
            "The requested resource was not found",
            "Check that the instance name and identifiers exist",
        ),
        (ErrorKind::Api, Some(400 | 422)) => (
            "The Evolution API rejected the request parameters",
            "Review the parameters against the tool's input schema",
        ),
        (ErrorKind::Api, Some(409)) => (
            "The request conflicts with the current state of the resource",
            "The resource may already exist; fetch its current state first",
        ),
        (ErrorKind::Api, _) => (
            "The Evolution API returned an error",
            "Retry later; if the error persists check the server logs",
        ),
        (ErrorKind::RateLimit, _) => ("Rate limit exceeded", "Wait before sending more requests"),
        (ErrorKind::Unknown, _) => (
            "Unexpected error while calling the Evolution API",
            "Check the request parameters and the server logs",
        ),
    };

    let mut details = Map::new();
    if let Some(status) = error.status {
        details.insert("status".to_string(), Value::from(status));
    }
    details.insert("upstream".to_string(), Value::String(error.message.clone()));
    if let Some(body) = &error.details {
        details.insert("response".to_string(), body.clone());
    }

    let mut failure = ToolFailure::new(kind, message)
        .with_details(Value::Object(details))
        .with_suggestion(suggestion);
    if let Some(code) = &error.code {
        failure = failure.with_code(code.clone());
    }
    failure
}
