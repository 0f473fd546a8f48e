//! # unihub-gateway
//!
//! HTTP client for the remote gateway that stores all unihub user data,
//! plus a deterministic mock implementation for tests.
//!
//! The [`HttpGateway`] speaks plain JSON request/response against the
//! gateway's REST surface; authentication is carried implicitly by the
//! session and is out of scope here.

pub mod config;
pub mod http;
pub mod mock;

pub use config::{ConfigError, GatewayConfig};
pub use http::HttpGateway;
pub use mock::MockGateway;
