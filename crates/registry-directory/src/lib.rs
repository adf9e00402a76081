//! Registry Directory - query and lifecycle engine
//!
//! The coordination core of the resident registry client:
//! - Filter/pagination state deriving gateway request parameters
//! - A one-page directory cache with last-issued-wins stale suppression
//! - Lifecycle orchestration (archive, restore, promote-head, assistance
//!   CRUD) behind a single pending-workflow value
//! - Row expansion over the loaded page
//! - A locally paged archive view with optimistic restore removal
//!
//! The backend offers no multi-entity transactions, so every mutation ends
//! with an invalidate-then-refetch of the directory rather than a
//! client-side merge.
//!
//! # Example
//!
//! ```rust,ignore
//! use registry_directory::DirectoryEngine;
//! use registry_gateway::{HttpGateway, RegistryConfig, Role, Session};
//! use std::sync::Arc;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = RegistryConfig::new("https://registry.example");
//! let session = Session::new("token", Role::Admin);
//! let gateway = Arc::new(HttpGateway::from_config(&config, session.clone()));
//!
//! let engine = DirectoryEngine::new(gateway, session, &config);
//! engine.set_search("DELA CRUZ").await?;
//! println!("{} residents match", engine.total().await);
//! # Ok(())
//! # }
//! ```

#![warn(unreachable_pub)]
#![allow(missing_docs)]

pub mod archive;
pub mod cache;
pub mod engine;
pub mod error;
pub mod expansion;
pub mod lifecycle;
pub mod query;

// Re-exports for convenience
pub use archive::ArchiveView;
pub use cache::{CacheStats, DirectoryCache, FetchTicket};
pub use engine::DirectoryEngine;
pub use error::{DirectoryError, Notification, Operation};
pub use expansion::RowExpansion;
pub use lifecycle::PendingAction;
pub use query::{DirectoryQuery, PageSize};

/// Prelude module for common imports
pub mod prelude {
    //! Common imports for working with the directory engine
    pub use crate::{
        DirectoryEngine, DirectoryError, DirectoryQuery, Notification, PageSize, PendingAction,
    };
}

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
