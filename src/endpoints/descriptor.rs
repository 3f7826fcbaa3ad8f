//! Endpoint descriptors
//!
//! A descriptor is static data: where an operation lives, how it is called,
//! and which parameters it accepts. The tool factory turns each one into a
//! callable tool.

use std::sync::LazyLock;

use regex::Regex;
use serde_json::{Map, Value, json};

use crate::client::HttpMethod;
use crate::error::{GatewayError, Result};

use super::Controller;

/// Path token naming the target Evolution instance
pub const INSTANCE_PLACEHOLDER: &str = "{instance}";

/// Parameter carrying the instance identifier
pub const INSTANCE_PARAM: &str = "instance";

static PLACEHOLDER_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\{([A-Za-z_][A-Za-z0-9_]*)\}").expect("placeholder pattern is valid"));

static ENDPOINT_NAME_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[a-z][a-z0-9_]*$").expect("endpoint name pattern is valid"));

/// Turns the raw response body into the tool's success payload.
/// Receives the validated call parameters and the parsed body.
pub type Shaper = fn(&Value, Value) -> Value;

/// Static description of one remote operation
#[derive(Debug, Clone)]
pub struct EndpointDescriptor {
    /// Unique snake_case name, e.g. "send_text_message"
    pub name: String,
    pub description: String,
    /// Path template, e.g. "/message/sendText/{instance}"
    pub path: String,
    pub method: HttpMethod,
    pub controller: Controller,
    /// True when the path targets a specific instance
    pub requires_instance: bool,
    /// JSON Schema for the call parameters
    pub schema: Value,
    pub example: Option<Value>,
    pub shaper: Option<Shaper>,
}

impl EndpointDescriptor {
    /// Create a descriptor; `requires_instance` follows the path template
    pub fn new(
        name: impl Into<String>,
        controller: Controller,
        method: HttpMethod,
        path: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        let path = path.into();
        let requires_instance = path.contains(INSTANCE_PLACEHOLDER);
        let mut descriptor = Self {
            name: name.into(),
            description: description.into(),
            path,
            method,
            controller,
            requires_instance,
            schema: Value::Null,
            example: None,
            shaper: None,
        };
        descriptor.schema = descriptor.build_schema(Map::new(), &[]);
        descriptor
    }

    /// Declare the call parameters (the instance parameter is added automatically)
    pub fn with_params(mut self, properties: Value, required: &[&str]) -> Self {
        let properties = match properties {
            Value::Object(map) => map,
            _ => Map::new(),
        };
        self.schema = self.build_schema(properties, required);
        self
    }

    pub fn with_example(mut self, example: Value) -> Self {
        self.example = Some(example);
        self
    }

    pub fn with_shaper(mut self, shaper: Shaper) -> Self {
        self.shaper = Some(shaper);
        self
    }

    fn build_schema(&self, mut properties: Map<String, Value>, required: &[&str]) -> Value {
        let mut required: Vec<Value> = required.iter().map(|r| Value::String(r.to_string())).collect();
        if self.requires_instance {
            properties.insert(
                INSTANCE_PARAM.to_string(),
                json!({
                    "type": "string",
                    "minLength": 1,
                    "pattern": "^[^/?#%]+$",
                    "not": { "enum": [".", ".."] },
                    "description": "Name of the Evolution API instance"
                }),
            );
            if !required.iter().any(|r| r == INSTANCE_PARAM) {
                required.insert(0, Value::String(INSTANCE_PARAM.to_string()));
            }
        }
        json!({
            "type": "object",
            "properties": properties,
            "required": required
        })
    }

    /// Names of every `{token}` in the path template, in order
    pub fn placeholders(&self) -> Vec<String> {
        placeholders(&self.path)
    }

    /// Check internal consistency of the descriptor
    pub fn validate(&self) -> Result<()> {
        let fail = |reason: String| GatewayError::InvalidDescriptor {
            name: self.name.clone(),
            reason,
        };

        if !ENDPOINT_NAME_RE.is_match(&self.name) {
            return Err(fail("name must be snake_case".to_string()));
        }
        if self.description.trim().is_empty() {
            return Err(fail("description is empty".to_string()));
        }
        if !self.path.starts_with('/') {
            return Err(fail(format!("path '{}' must start with '/'", self.path)));
        }

        let instance_tokens = self.path.matches(INSTANCE_PLACEHOLDER).count();
        if instance_tokens > 1 {
            return Err(fail(format!("path '{}' has more than one instance placeholder", self.path)));
        }
        if self.requires_instance != (instance_tokens == 1) {
            return Err(fail(format!(
                "requires_instance is {} but path '{}' {} the instance placeholder",
                self.requires_instance,
                self.path,
                if instance_tokens == 1 { "contains" } else { "lacks" }
            )));
        }

        if self.schema.get("type").and_then(Value::as_str) != Some("object") {
            return Err(fail("parameter schema must be an object schema".to_string()));
        }
        let required: Vec<&str> = self
            .schema
            .get("required")
            .and_then(Value::as_array)
            .map(|r| r.iter().filter_map(Value::as_str).collect())
            .unwrap_or_default();
        for token in self.placeholders() {
            if self.schema.pointer(&format!("/properties/{}", token)).is_none() {
                return Err(fail(format!("path parameter '{}' is not declared", token)));
            }
            if !required.contains(&token.as_str()) {
                return Err(fail(format!("path parameter '{}' must be required", token)));
            }
        }

        Ok(())
    }
}

/// Names of every `{token}` in a path template, in order
pub fn placeholders(path: &str) -> Vec<String> {
    PLACEHOLDER_RE
        .captures_iter(path)
        .map(|c| c[1].to_string())
        .collect()
}

/// Small builders for JSON Schema property fragments
pub mod param {
    use serde_json::{Value, json};

    pub fn string(description: &str) -> Value {
        json!({ "type": "string", "description": description })
    }

    pub fn required_string(description: &str) -> Value {
        json!({ "type": "string", "minLength": 1, "description": description })
    }

    pub fn integer(description: &str) -> Value {
        json!({ "type": "integer", "description": description })
    }

    pub fn number(description: &str) -> Value {
        json!({ "type": "number", "description": description })
    }

    pub fn boolean(description: &str) -> Value {
        json!({ "type": "boolean", "description": description })
    }

    pub fn one_of(values: &[&str], description: &str) -> Value {
        json!({ "type": "string", "enum": values, "description": description })
    }

    pub fn string_list(description: &str) -> Value {
        json!({ "type": "array", "items": { "type": "string" }, "minItems": 1, "description": description })
    }

    pub fn object(properties: Value, required: &[&str], description: &str) -> Value {
        json!({
            "type": "object",
            "properties": properties,
            "required": required,
            "description": description
        })
    }

    pub fn list_of(item: Value, description: &str) -> Value {
        json!({ "type": "array", "items": item, "minItems": 1, "description": description })
    }

    /// Recipient phone number or JID
    pub fn number_field() -> Value {
        required_string("Recipient number with country code (e.g. 5511999999999) or a JID")
    }

    /// Message key identifying an existing message
    pub fn message_key() -> Value {
        object(
            json!({
                "remoteJid": required_string("Chat JID the message belongs to"),
                "fromMe": boolean("Whether the message was sent by this instance"),
                "id": required_string("Message id")
            }),
            &["remoteJid", "fromMe", "id"],
            "Key of the target message",
        )
    }
}
