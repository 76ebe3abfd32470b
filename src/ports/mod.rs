//! Ports - Interfaces for external dependencies.
//!
//! Ports define the contracts between the application and the outside
//! world. Adapters implement these ports.
//!
//! - `ContentStore` - local key-value store for cached payloads and the token
//! - `BackendClient` - the remote tutoring backend

mod backend_client;
mod content_store;

pub use backend_client::{BackendClient, BackendError, DayContentRequest, ScheduleRequest};
pub use content_store::{ContentStore, ContentStoreError};
