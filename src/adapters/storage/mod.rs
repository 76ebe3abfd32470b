//! Storage Adapters
//!
//! Implementations of the ContentStore port.
//!
//! ## Available Adapters
//!
//! - **InMemoryContentStore** - values in a shared map (tests, server default)
//! - **FileContentStore** - one file per key on disk (CLI local storage)
//! - **RedisContentStore** - prefixed keys in Redis (shared deployments)
//!
//! ## Usage
//!
//! ```ignore
//! use cogito::adapters::storage::{FileContentStore, InMemoryContentStore};
//!
//! let store = FileContentStore::new("~/.cogito/local");
//! let store = InMemoryContentStore::new();
//! ```

mod file_content_store;
mod in_memory_content_store;
mod redis_content_store;

pub use file_content_store::FileContentStore;
pub use in_memory_content_store::InMemoryContentStore;
pub use redis_content_store::RedisContentStore;
