//! Registry Gateway - thin request/response client to the registry backend
//!
//! Defines the `ResidentGateway` trait - the contract the directory engine
//! consumes - plus the reqwest-based HTTP implementation and the explicit
//! session object carried on every request. The gateway does no caching and
//! holds no durable state; all consistency coordination lives upstream in
//! the directory engine.

#![warn(unreachable_pub)]
#![allow(missing_docs)]

pub mod config;
pub mod error;
pub mod http;
pub mod params;
pub mod session;
pub mod traits;

// Re-exports for convenience
pub use config::RegistryConfig;
pub use error::GatewayError;
pub use http::HttpGateway;
pub use params::ListParams;
pub use session::{Role, Session};
pub use traits::ResidentGateway;

/// Prelude module for common imports
pub mod prelude {
    //! Common imports for working with the gateway
    pub use crate::{
        GatewayError, HttpGateway, ListParams, RegistryConfig, ResidentGateway, Role, Session,
    };
}

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
