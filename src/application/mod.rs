//! Application layer - use cases built on the ports.
//!
//! - `loader` - cache-or-fetch loading of page payloads
//! - `state` - observable session, theme and loading cells

pub mod loader;
pub mod state;

pub use loader::{ContentLoader, LoaderError};
pub use state::{LoadingState, Platform, SessionState, ThemeState};
