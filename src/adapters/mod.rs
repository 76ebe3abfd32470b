//! Adapters - Implementations of port interfaces.
//!
//! Adapters connect the application to external systems:
//! - `backend` - the remote tutoring backend (HTTP, mock)
//! - `http` - the axum web tier (negotiation pipeline, auth routes, page shell)
//! - `storage` - content stores (in-memory, file, Redis)

pub mod backend;
pub mod http;
pub mod storage;

pub use backend::{HttpBackendClient, HttpBackendConfig, MockBackendClient};
pub use storage::{FileContentStore, InMemoryContentStore, RedisContentStore};
