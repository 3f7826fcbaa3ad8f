//! The fixed set of endpoint descriptors

use std::collections::HashSet;

use crate::error::{GatewayError, Result};

use super::{Controller, EndpointDescriptor};

/// Immutable, validated collection of endpoint descriptors
#[derive(Debug, Clone)]
pub struct EndpointCatalog {
    endpoints: Vec<EndpointDescriptor>,
}

impl EndpointCatalog {
    /// Build a catalog, rejecting inconsistent descriptors and duplicate names
    pub fn new(endpoints: Vec<EndpointDescriptor>) -> Result<Self> {
        let mut seen = HashSet::new();
        for endpoint in &endpoints {
            endpoint.validate()?;
            if !seen.insert(endpoint.name.as_str()) {
                return Err(GatewayError::InvalidDescriptor {
                    name: endpoint.name.clone(),
                    reason: "duplicate endpoint name".to_string(),
                });
            }
        }
        Ok(Self { endpoints })
    }

    /// Every Evolution API endpoint this crate knows about
    pub fn standard() -> Result<Self> {
        let endpoints = Controller::ALL.iter().flat_map(|c| c.endpoints()).collect();
        Self::new(endpoints)
    }

    /// Get a descriptor by name
    pub fn find(&self, name: &str) -> Option<&EndpointDescriptor> {
        self.endpoints.iter().find(|e| e.name == name)
    }

    pub fn by_controller(&self, controller: Controller) -> Vec<&EndpointDescriptor> {
        self.endpoints.iter().filter(|e| e.controller == controller).collect()
    }

    pub fn count_by_controller(&self, controller: Controller) -> usize {
        self.endpoints.iter().filter(|e| e.controller == controller).count()
    }

    pub fn all(&self) -> impl Iterator<Item = &EndpointDescriptor> {
        self.endpoints.iter()
    }

    pub fn names(&self) -> Vec<&str> {
        self.endpoints.iter().map(|e| e.name.as_str()).collect()
    }

    pub fn len(&self) -> usize {
        self.endpoints.len()
    }

    pub fn is_empty(&self) -> bool {
        self.endpoints.is_empty()
    }
}
