//! Tool system: compiled schemas, the endpoint tool factory, the registry
//! and the bulk generator.

mod definition;
mod factory;
mod generator;
mod registry;
mod schema;

pub use definition::{Tool, ToolDefinition, ToolEndpoint, ToolErrorKind, ToolFailure, ToolHandler, ToolResult};
pub use factory::ToolFactory;
pub use generator::{ControllerStats, GeneratorConfig, GeneratorStats, ToolGenerator, ValidationReport};
pub use registry::{RegistryStats, ToolRegistry, ToolUpdate, validate_tool};
pub use schema::ParamSchema;
