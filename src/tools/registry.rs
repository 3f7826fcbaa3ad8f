//! Tool registry
//!
//! Name-keyed store of callable tools. Registration enforces structural
//! validity and unique names; lookups hand out shared references so callers
//! cannot mutate registered tools in place.

use std::collections::BTreeMap;
use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;
use serde_json::Value;

use crate::endpoints::Controller;
use crate::error::{BatchFailure, GatewayError, Result};

use super::definition::{Tool, ToolDefinition};
use super::schema::ParamSchema;

static TOOL_NAME_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z][A-Za-z0-9_-]*$").expect("tool name pattern is valid"));

/// Check the structural invariants every registered tool must satisfy
pub fn validate_tool(tool: &Tool) -> Result<()> {
    let fail = |reason: &str| GatewayError::InvalidTool {
        name: tool.name.clone(),
        reason: reason.to_string(),
    };

    if tool.name.is_empty() {
        return Err(fail("name is empty"));
    }
    if !TOOL_NAME_RE.is_match(&tool.name) {
        return Err(fail("name must start with a letter and contain only letters, digits, '_' or '-'"));
    }
    if tool.description.trim().is_empty() {
        return Err(fail("description is empty"));
    }
    if tool.endpoint.path.trim().is_empty() {
        return Err(fail("endpoint path is empty"));
    }
    if !tool.schema.is_object() {
        return Err(fail("parameter schema must have type 'object'"));
    }
    Ok(())
}

/// Partial update applied by [`ToolRegistry::update`]
#[derive(Debug, Clone, Default)]
pub struct ToolUpdate {
    pub description: Option<String>,
    pub controller: Option<Controller>,
    pub schema: Option<Value>,
    pub example: Option<Value>,
}

impl ToolUpdate {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_controller(mut self, controller: Controller) -> Self {
        self.controller = Some(controller);
        self
    }

    pub fn with_schema(mut self, schema: Value) -> Self {
        self.schema = Some(schema);
        self
    }

    pub fn with_example(mut self, example: Value) -> Self {
        self.example = Some(example);
        self
    }
}

/// Registry summary
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RegistryStats {
    pub total: usize,
    /// Every controller, including those with no tools
    pub by_controller: BTreeMap<Controller, usize>,
    /// Sorted tool names
    pub names: Vec<String>,
}

/// Registry of callable tools keyed by name
#[derive(Debug, Clone, Default)]
pub struct ToolRegistry {
    tools: BTreeMap<String, Tool>,
}

impl ToolRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a tool; fails on duplicates and structural violations
    pub fn register(&mut self, tool: Tool) -> Result<()> {
        validate_tool(&tool)?;
        if self.tools.contains_key(&tool.name) {
            return Err(GatewayError::DuplicateTool(tool.name));
        }
        tracing::debug!(tool = %tool.name, controller = %tool.controller, "Registered tool");
        self.tools.insert(tool.name.clone(), tool);
        Ok(())
    }

    /// Register each tool independently, reporting every failure at once.
    ///
    /// Successful registrations are kept even when others fail.
    pub fn register_many(&mut self, tools: impl IntoIterator<Item = Tool>) -> Result<usize> {
        let mut registered = 0;
        let mut failures = Vec::new();
        for (index, tool) in tools.into_iter().enumerate() {
            let name = tool.name.clone();
            match self.register(tool) {
                Ok(()) => registered += 1,
                Err(e) => failures.push(BatchFailure {
                    index,
                    name,
                    reason: e.to_string(),
                }),
            }
        }
        if failures.is_empty() {
            Ok(registered)
        } else {
            tracing::warn!(registered, failed = failures.len(), "Batch registration had failures");
            Err(GatewayError::Batch(failures))
        }
    }

    /// Get a tool by name
    pub fn get(&self, name: &str) -> Option<&Tool> {
        self.tools.get(name)
    }

    /// Check if a tool exists
    pub fn has(&self, name: &str) -> bool {
        self.tools.contains_key(name)
    }

    /// All tools, ordered by name
    pub fn list(&self) -> Vec<&Tool> {
        self.tools.values().collect()
    }

    /// All tool names, sorted
    pub fn names(&self) -> Vec<&str> {
        self.tools.keys().map(|s| s.as_str()).collect()
    }

    /// Tools filtered by controller
    pub fn list_by_controller(&self, controller: Controller) -> Vec<&Tool> {
        self.tools.values().filter(|t| t.controller == controller).collect()
    }

    /// Case-insensitive substring search over name and description
    pub fn search(&self, query: &str) -> Vec<&Tool> {
        let needle = query.to_lowercase();
        self.tools
            .values()
            .filter(|t| t.name.to_lowercase().contains(&needle) || t.description.to_lowercase().contains(&needle))
            .collect()
    }

    /// Merge `update` into a registered tool; nothing changes if the result is invalid
    pub fn update(&mut self, name: &str, update: ToolUpdate) -> Result<()> {
        let current = self
            .tools
            .get(name)
            .ok_or_else(|| GatewayError::ToolNotFound(name.to_string()))?;

        let mut merged = current.clone();
        if let Some(description) = update.description {
            merged.description = description;
        }
        if let Some(controller) = update.controller {
            merged.controller = controller;
        }
        if let Some(schema) = update.schema {
            merged.schema = ParamSchema::compile(name, schema)?;
        }
        if let Some(example) = update.example {
            merged.example = Some(example);
        }
        validate_tool(&merged)?;

        tracing::debug!(tool = %name, "Updated tool");
        self.tools.insert(name.to_string(), merged);
        Ok(())
    }

    /// Remove a tool; fails if it is not registered
    pub fn remove(&mut self, name: &str) -> Result<Tool> {
        let tool = self
            .tools
            .remove(name)
            .ok_or_else(|| GatewayError::ToolNotFound(name.to_string()))?;
        tracing::debug!(tool = %name, "Removed tool");
        Ok(tool)
    }

    /// Remove every tool
    pub fn clear(&mut self) {
        self.tools.clear();
    }

    pub fn stats(&self) -> RegistryStats {
        let mut by_controller: BTreeMap<Controller, usize> = Controller::ALL.iter().map(|c| (*c, 0)).collect();
        for tool in self.tools.values() {
            *by_controller.entry(tool.controller).or_insert(0) += 1;
        }
        RegistryStats {
            total: self.tools.len(),
            by_controller,
            names: self.tools.keys().cloned().collect(),
        }
    }

    /// Agent-facing definitions of every tool, ordered by name
    pub fn definitions(&self) -> Vec<ToolDefinition> {
        self.tools.values().map(Tool::to_definition).collect()
    }

    pub fn len(&self) -> usize {
        self.tools.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::HttpMethod;
    use crate::tools::definition::{ToolEndpoint, ToolHandler, ToolResult};
    use futures::future::BoxFuture;
    use serde_json::json;
    use std::sync::Arc;

    fn noop() -> ToolHandler {
        Arc::new(|_params: Value| -> BoxFuture<'static, ToolResult> {
            Box::pin(async { ToolResult::Success(Value::Null) })
        })
    }

    fn tool(name: &str, controller: Controller, description: &str) -> Tool {
        let schema = ParamSchema::compile(name, json!({ "type": "object", "properties": {} })).unwrap();
        Tool::new(
            name,
            description,
            controller,
            ToolEndpoint::new(HttpMethod::Post, "/test/{instance}"),
            schema,
            noop(),
        )
    }

    fn send_text() -> Tool {
        tool("evolution_send_text_message", Controller::Message, "Send a text message")
    }

    fn create_instance() -> Tool {
        tool("evolution_create_instance", Controller::Instance, "Create a WhatsApp instance")
    }

    #[test]
    fn test_register_and_get() {
        let mut registry = ToolRegistry::new();
        registry.register(send_text()).unwrap();
        assert!(registry.has("evolution_send_text_message"));
        assert_eq!(registry.get("evolution_send_text_message").unwrap().controller, Controller::Message);
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_list_by_controller() {
        let mut registry = ToolRegistry::new();
        registry.register(send_text()).unwrap();
        registry.register(create_instance()).unwrap();

        let messages = registry.list_by_controller(Controller::Message);
        assert_eq!(messages.len(), 1);
        assert_eq!(messages[0].name, "evolution_send_text_message");
        assert!(registry.list_by_controller(Controller::Webhook).is_empty());
    }

    #[test]
    fn test_duplicate_rejected_without_mutation() {
        let mut registry = ToolRegistry::new();
        registry.register(send_text()).unwrap();

        let replacement = tool("evolution_send_text_message", Controller::Chat, "Different");
        let err = registry.register(replacement).unwrap_err();
        assert!(matches!(err, GatewayError::DuplicateTool(ref n) if n == "evolution_send_text_message"));
        assert_eq!(registry.len(), 1);
        assert_eq!(registry.get("evolution_send_text_message").unwrap().description, "Send a text message");
    }

    #[test]
    fn test_invalid_names_rejected() {
        let mut registry = ToolRegistry::new();
        for name in ["", "1tool", "_tool", "send text", "send.text", "tool/x"] {
            let result = registry.register(tool(name, Controller::Chat, "Bad name"));
            assert!(matches!(result, Err(GatewayError::InvalidTool { .. })), "accepted {:?}", name);
            assert_eq!(registry.len(), 0);
        }
        assert!(registry.register(tool("Send-Text_2", Controller::Chat, "Ok")).is_ok());
    }

    #[test]
    fn test_empty_description_rejected() {
        let mut registry = ToolRegistry::new();
        assert!(registry.register(tool("blank", Controller::Chat, "   ")).is_err());
        assert!(registry.is_empty());
    }

    #[test]
    fn test_non_object_schema_rejected() {
        let mut registry = ToolRegistry::new();
        let mut bad = send_text();
        bad.schema = ParamSchema::compile("bad", json!({ "type": "array" })).unwrap();
        assert!(registry.register(bad).is_err());
    }

    #[test]
    fn test_register_many_reports_every_failure() {
        let mut registry = ToolRegistry::new();
        let tools = vec![
            send_text(),
            tool("9bad", Controller::Chat, "Bad"),
            create_instance(),
            send_text(),
        ];

        let err = registry.register_many(tools).unwrap_err();
        match err {
            GatewayError::Batch(failures) => {
                assert_eq!(failures.len(), 2);
                assert_eq!(failures[0].index, 1);
                assert_eq!(failures[0].name, "9bad");
                assert_eq!(failures[1].index, 3);
                assert!(failures[1].reason.contains("already registered"));
            }
            other => panic!("expected Batch, got {:?}", other),
        }
        assert_eq!(registry.len(), 2);
    }

    #[test]
    fn test_register_many_all_ok() {
        let mut registry = ToolRegistry::new();
        assert_eq!(registry.register_many(vec![send_text(), create_instance()]).unwrap(), 2);
    }

    #[test]
    fn test_list_is_name_ordered() {
        let mut registry = ToolRegistry::new();
        registry.register(send_text()).unwrap();
        registry.register(create_instance()).unwrap();
        assert_eq!(registry.names(), vec!["evolution_create_instance", "evolution_send_text_message"]);
        assert_eq!(registry.list()[0].name, "evolution_create_instance");
    }

    #[test]
    fn test_search_case_insensitive() {
        let mut registry = ToolRegistry::new();
        registry.register(send_text()).unwrap();
        registry.register(create_instance()).unwrap();

        assert_eq!(registry.search("TEXT").len(), 1);
        assert_eq!(registry.search("whatsapp")[0].name, "evolution_create_instance");
        assert_eq!(registry.search("evolution").len(), 2);
        assert!(registry.search("webhook").is_empty());
    }

    #[test]
    fn test_update_merges_fields() {
        let mut registry = ToolRegistry::new();
        registry.register(send_text()).unwrap();

        registry
            .update(
                "evolution_send_text_message",
                ToolUpdate::new()
                    .with_description("Send a plain text message")
                    .with_example(json!({ "text": "hi" })),
            )
            .unwrap();

        let updated = registry.get("evolution_send_text_message").unwrap();
        assert_eq!(updated.description, "Send a plain text message");
        assert_eq!(updated.example, Some(json!({ "text": "hi" })));
        assert_eq!(updated.controller, Controller::Message);
    }

    #[test]
    fn test_update_invalid_leaves_tool_untouched() {
        let mut registry = ToolRegistry::new();
        registry.register(send_text()).unwrap();

        let result = registry.update(
            "evolution_send_text_message",
            ToolUpdate::new().with_description("").with_controller(Controller::Chat),
        );
        assert!(result.is_err());
        let tool = registry.get("evolution_send_text_message").unwrap();
        assert_eq!(tool.description, "Send a text message");
        assert_eq!(tool.controller, Controller::Message);
    }

    #[test]
    fn test_update_schema_recompiles() {
        let mut registry = ToolRegistry::new();
        registry.register(send_text()).unwrap();

        let schema = json!({ "type": "object", "properties": { "text": { "type": "string" } }, "required": ["text"] });
        registry
            .update("evolution_send_text_message", ToolUpdate::new().with_schema(schema))
            .unwrap();
        let tool = registry.get("evolution_send_text_message").unwrap();
        assert!(tool.schema.validate(&json!({})).is_err());

        let result = registry.update("evolution_send_text_message", ToolUpdate::new().with_schema(json!({ "type": 5 })));
        assert!(matches!(result, Err(GatewayError::InvalidSchema { .. })));
    }

    #[test]
    fn test_update_missing() {
        let mut registry = ToolRegistry::new();
        let result = registry.update("ghost", ToolUpdate::new());
        assert!(matches!(result, Err(GatewayError::ToolNotFound(_))));
    }

    #[test]
    fn test_remove_nonexistent_leaves_others() {
        let mut registry = ToolRegistry::new();
        registry.register(send_text()).unwrap();
        registry.register(create_instance()).unwrap();

        let err = registry.remove("nonexistent").unwrap_err();
        assert!(err.to_string().contains("nonexistent"));
        assert_eq!(registry.len(), 2);
    }

    #[test]
    fn test_remove_and_clear() {
        let mut registry = ToolRegistry::new();
        registry.register(send_text()).unwrap();
        registry.register(create_instance()).unwrap();

        let removed = registry.remove("evolution_create_instance").unwrap();
        assert_eq!(removed.name, "evolution_create_instance");
        assert!(!registry.has("evolution_create_instance"));

        registry.clear();
        assert!(registry.is_empty());
        registry.clear();
        assert!(registry.is_empty());
    }

    #[test]
    fn test_stats_include_every_controller() {
        let mut registry = ToolRegistry::new();
        registry.register(send_text()).unwrap();
        registry.register(create_instance()).unwrap();

        let stats = registry.stats();
        assert_eq!(stats.total, 2);
        assert_eq!(stats.by_controller.len(), Controller::ALL.len());
        assert_eq!(stats.by_controller[&Controller::Message], 1);
        assert_eq!(stats.by_controller[&Controller::Label], 0);
        assert_eq!(stats.by_controller.values().sum::<usize>(), 2);
        assert_eq!(stats.names, vec!["evolution_create_instance", "evolution_send_text_message"]);
    }

    #[test]
    fn test_definitions() {
        let mut registry = ToolRegistry::new();
        registry.register(send_text().with_example(json!({ "text": "hi" }))).unwrap();

        let definitions = registry.definitions();
        assert_eq!(definitions.len(), 1);
        assert_eq!(definitions[0].name, "evolution_send_text_message");
        assert_eq!(definitions[0].input_schema["type"], "object");
        assert_eq!(definitions[0].example, Some(json!({ "text": "hi" })));
    }
}
