//! evogate - Evolution API (WhatsApp) operations exposed as agent tools
//!
//! The crate has two halves: a retrying, authenticated request client for
//! the Evolution API, and a tool system that turns a declarative endpoint
//! catalog into schema-validated callable tools.

pub mod client;
pub mod context;
pub mod endpoints;
pub mod error;
pub mod tools;

pub use context::Gateway;
pub use error::{GatewayError, Result};
