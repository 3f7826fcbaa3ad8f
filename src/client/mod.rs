//! Request client for the Evolution API
//!
//! This module provides:
//! - ClientConfig with validated timing/retry settings
//! - HttpTransport trait, with reqwest and scripted implementations
//! - One classification function mapping transport results to RequestError
//! - RequestClient, the retrying authenticated client shared by all tools

pub mod config;
pub mod error;
pub mod request;
pub mod transport;

pub use config::ClientConfig;
pub use error::{ApiResponse, ErrorKind, RequestError, RequestOutcome, classify};
pub use request::{API_KEY_HEADER, RequestClient};
pub use transport::{HttpMethod, HttpTransport, MockTransport, ReqwestTransport, TransportError, TransportRequest, TransportResponse};
