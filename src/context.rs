//! Gateway context
//!
//! Owns the shared request client and the tool generator built on top of
//! it. Construct one per Evolution server configuration.

use std::sync::Arc;

use serde_json::Value;

use crate::client::{ClientConfig, HttpTransport, RequestClient, ReqwestTransport};
use crate::endpoints::EndpointCatalog;
use crate::error::{GatewayError, Result};
use crate::tools::{GeneratorConfig, ToolFactory, ToolGenerator, ToolRegistry, ToolResult};

#[derive(Debug)]
pub struct Gateway {
    client: Arc<RequestClient>,
    generator: ToolGenerator,
}

impl Gateway {
    /// Gateway over the reqwest transport
    pub fn new(config: ClientConfig) -> Result<Self> {
        Self::with_client(Arc::new(RequestClient::new(config)?))
    }

    /// Gateway over an explicit transport
    pub fn with_transport(config: ClientConfig, transport: Arc<dyn HttpTransport>) -> Result<Self> {
        Self::with_client(Arc::new(RequestClient::with_transport(config, transport)?))
    }

    /// Gateway for inspecting the catalog; the API key may be absent
    pub fn offline(config: ClientConfig) -> Result<Self> {
        let transport = ReqwestTransport::new(config.timeout())?;
        Self::with_client(Arc::new(RequestClient::offline(config, Arc::new(transport))?))
    }

    pub fn with_client(client: Arc<RequestClient>) -> Result<Self> {
        let catalog = EndpointCatalog::standard()?;
        let generator = ToolGenerator::new(catalog, ToolFactory::new(client.clone()));
        Ok(Self { client, generator })
    }

    /// Generate tools into the registry; see [`ToolGenerator::generate_all`]
    pub fn generate(&mut self, config: GeneratorConfig) -> Result<usize> {
        self.generator.generate_all(config)
    }

    /// Call a registered tool by name
    pub async fn call(&self, name: &str, params: Value) -> Result<ToolResult> {
        let tool = self
            .registry()
            .get(name)
            .ok_or_else(|| GatewayError::ToolNotFound(name.to_string()))?;
        tracing::debug!(tool = %name, "Calling tool");
        Ok(tool.call(params).await)
    }

    pub fn client(&self) -> &Arc<RequestClient> {
        &self.client
    }

    pub fn registry(&self) -> &ToolRegistry {
        self.generator.registry()
    }

    pub fn generator(&self) -> &ToolGenerator {
        &self.generator
    }

    pub fn generator_mut(&mut self) -> &mut ToolGenerator {
        &mut self.generator
    }
}
