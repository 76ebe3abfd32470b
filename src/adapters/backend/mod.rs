//! Backend adapters - implementations of the `BackendClient` port.
//!
//! - `HttpBackendClient` - reqwest client for the real backend
//! - `MockBackendClient` - canned responses and call recording for tests

mod http_client;
mod mock;

pub use http_client::{HttpBackendClient, HttpBackendConfig};
pub use mock::{MockBackendClient, RecordedCall};
