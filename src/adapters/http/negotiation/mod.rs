//! Response negotiation for HTML pages.
//!
//! Theme and device preferences are resolved from cookies or client hints,
//! persisted as cookies and rendered into the page shell. Font resources
//! referenced by the page are advertised as preload links.

mod middleware;
mod negotiator;
mod page;
mod pipeline;
mod preload;

pub use middleware::{negotiate_preferences, PipelineState};
pub use negotiator::{Negotiator, Resolution};
pub use page::{PageResponse, RequestView};
pub use pipeline::{ResponsePipeline, ResponseStage};
pub use preload::{discover_resources, should_preload, PreloadStage, Resource, ResourceKind};
