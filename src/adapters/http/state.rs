use std::sync::Arc;

use super::cookies::CookieSettings;
use super::negotiation::ResponsePipeline;
use super::shell::PageShell;
use crate::ports::BackendClient;

/// Shared state for the web tier routes.
#[derive(Clone)]
pub struct AppState {
    pub backend: Arc<dyn BackendClient>,
    pub cookies: CookieSettings,
    pub shell: PageShell,
    pub pipeline: Arc<ResponsePipeline>,
}

impl AppState {
    /// State with the standard pipeline built from `cookies`.
    pub fn new(
        backend: Arc<dyn BackendClient>,
        cookies: CookieSettings,
        shell: PageShell,
        max_body_bytes: usize,
    ) -> Self {
        Self {
            backend,
            cookies,
            shell,
            pipeline: Arc::new(ResponsePipeline::standard(cookies, max_body_bytes)),
        }
    }
}
