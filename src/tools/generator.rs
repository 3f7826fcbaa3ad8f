//! Tool generator
//!
//! Builds tools from the endpoint catalog in bulk and keeps them in a
//! [`ToolRegistry`].

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::endpoints::{Controller, EndpointCatalog, EndpointDescriptor};
use crate::error::{GatewayError, Result};

use super::definition::Tool;
use super::factory::ToolFactory;
use super::registry::{ToolRegistry, validate_tool};

/// Which endpoints to turn into tools, and how to name them
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorConfig {
    /// Controllers to generate (all when empty)
    pub controllers: Vec<Controller>,
    /// When non-empty, only these endpoint names are generated
    pub include: Vec<String>,
    /// Endpoint names to skip (ignored when `include` is set)
    pub exclude: Vec<String>,
    /// Prefix prepended to every tool name
    pub prefix: Option<String>,
}

impl GeneratorConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_controllers(mut self, controllers: Vec<Controller>) -> Self {
        self.controllers = controllers;
        self
    }

    pub fn with_include(mut self, names: Vec<String>) -> Self {
        self.include = names;
        self
    }

    pub fn with_exclude(mut self, names: Vec<String>) -> Self {
        self.exclude = names;
        self
    }

    pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = Some(prefix.into());
        self
    }

    /// Requested controllers in order, each once
    fn controllers(&self) -> Vec<Controller> {
        if self.controllers.is_empty() {
            return Controller::ALL.to_vec();
        }
        let mut seen = HashSet::new();
        self.controllers.iter().copied().filter(|c| seen.insert(*c)).collect()
    }

    fn selects(&self, endpoint: &str) -> bool {
        if !self.include.is_empty() {
            return self.include.iter().any(|n| n == endpoint);
        }
        !self.exclude.iter().any(|n| n == endpoint)
    }

    /// Tool name for an endpoint
    pub fn tool_name(&self, endpoint: &str) -> String {
        match self.prefix.as_deref() {
            Some(prefix) => format!("{}{}", prefix, endpoint),
            None => endpoint.to_string(),
        }
    }

    /// Endpoint name a tool was generated from
    fn endpoint_name<'a>(&self, tool: &'a str) -> &'a str {
        match self.prefix.as_deref() {
            Some(prefix) => tool.strip_prefix(prefix).unwrap_or(tool),
            None => tool,
        }
    }
}

/// Outcome of [`ToolGenerator::validate`]
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ValidationReport {
    pub valid: bool,
    pub violations: Vec<String>,
}

/// Available versus registered counts for one controller
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ControllerStats {
    pub controller: Controller,
    pub available: usize,
    pub registered: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GeneratorStats {
    pub controllers: Vec<ControllerStats>,
    pub total_available: usize,
    pub total_registered: usize,
}

/// Generates tools from an endpoint catalog into a registry
#[derive(Debug)]
pub struct ToolGenerator {
    catalog: EndpointCatalog,
    factory: ToolFactory,
    registry: ToolRegistry,
    config: GeneratorConfig,
}

impl ToolGenerator {
    pub fn new(catalog: EndpointCatalog, factory: ToolFactory) -> Self {
        Self {
            catalog,
            factory,
            registry: ToolRegistry::new(),
            config: GeneratorConfig::default(),
        }
    }

    /// Replace the registry contents with tools selected by `config`.
    ///
    /// Returns the number of tools registered. Registration failures are
    /// reported together as one [`GatewayError::Batch`].
    pub fn generate_all(&mut self, config: GeneratorConfig) -> Result<usize> {
        self.registry.clear();
        self.config = config;

        let mut tools = Vec::new();
        for controller in self.config.controllers() {
            for endpoint in self.catalog.by_controller(controller) {
                if self.config.selects(&endpoint.name) {
                    tools.push(self.build(endpoint)?);
                }
            }
        }

        let count = self.registry.register_many(tools)?;
        tracing::info!(count, prefix = ?self.config.prefix, "Generated tools");
        Ok(count)
    }

    /// Add every tool of one controller to the registry
    pub fn generate_for_controller(&mut self, controller: Controller) -> Result<usize> {
        let tools = self
            .catalog
            .by_controller(controller)
            .into_iter()
            .map(|endpoint| self.build(endpoint))
            .collect::<Result<Vec<_>>>()?;
        let count = self.registry.register_many(tools)?;
        tracing::info!(count, controller = %controller, "Generated controller tools");
        Ok(count)
    }

    /// Add the tool for one endpoint; returns the registered tool name
    pub fn generate_for_endpoint(&mut self, name: &str) -> Result<String> {
        let endpoint = self
            .catalog
            .find(name)
            .ok_or_else(|| GatewayError::EndpointNotFound(name.to_string()))?;
        let tool = self.build(endpoint)?;
        let tool_name = tool.name.clone();
        self.registry.register(tool)?;
        Ok(tool_name)
    }

    fn build(&self, endpoint: &EndpointDescriptor) -> Result<Tool> {
        let tool = self.factory.build(endpoint)?;
        Ok(tool.with_name(self.config.tool_name(&endpoint.name)))
    }

    /// Re-check every registered tool against the invariants and its descriptor
    pub fn validate(&self) -> ValidationReport {
        let mut violations = Vec::new();
        let mut seen = HashSet::new();

        for tool in self.registry.list() {
            if !seen.insert(tool.name.as_str()) {
                violations.push(format!("duplicate tool name '{}'", tool.name));
            }
            if let Err(e) = validate_tool(tool) {
                violations.push(e.to_string());
            }

            let endpoint_name = self.config.endpoint_name(&tool.name);
            if let Some(endpoint) = self.catalog.find(endpoint_name) {
                if tool.controller != endpoint.controller {
                    violations.push(format!(
                        "tool '{}' is in controller '{}' but its endpoint belongs to '{}'",
                        tool.name, tool.controller, endpoint.controller
                    ));
                }
                if tool.endpoint.method != endpoint.method || tool.endpoint.path != endpoint.path {
                    violations.push(format!(
                        "tool '{}' targets {} {} but its endpoint is {} {}",
                        tool.name, tool.endpoint.method, tool.endpoint.path, endpoint.method, endpoint.path
                    ));
                }
            }
        }

        ValidationReport {
            valid: violations.is_empty(),
            violations,
        }
    }

    pub fn stats(&self) -> GeneratorStats {
        let controllers: Vec<ControllerStats> = Controller::ALL
            .iter()
            .map(|c| ControllerStats {
                controller: *c,
                available: self.catalog.count_by_controller(*c),
                registered: self.registry.list_by_controller(*c).len(),
            })
            .collect();
        GeneratorStats {
            total_available: controllers.iter().map(|c| c.available).sum(),
            total_registered: self.registry.len(),
            controllers,
        }
    }

    pub fn registry(&self) -> &ToolRegistry {
        &self.registry
    }

    pub fn registry_mut(&mut self) -> &mut ToolRegistry {
        &mut self.registry
    }

    pub fn catalog(&self) -> &EndpointCatalog {
        &self.catalog
    }

    /// Configuration of the last `generate_all` run
    pub fn config(&self) -> &GeneratorConfig {
        &self.config
    }
}
