//! HTML page shell.

use std::path::Path;
use std::sync::Arc;

use axum::{extract::State, response::Html};

use super::state::AppState;

/// Built-in shell used when no template is configured.
pub const DEFAULT_TEMPLATE: &str = r#"<!doctype html>
<html lang="en" data-theme="" data-device="">
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1">
<title>Cogito</title>
<link rel="stylesheet" href="/fonts/inter.css">
<link rel="stylesheet" href="/assets/app.css">
</head>
<body>
<div id="app"></div>
<script type="module" src="/assets/app.js"></script>
</body>
</html>
"#;

#[derive(Debug, Clone)]
pub struct PageShell {
    html: Arc<str>,
}

impl PageShell {
    pub fn new(html: impl Into<Arc<str>>) -> Self {
        Self { html: html.into() }
    }

    pub fn from_file(path: &Path) -> std::io::Result<Self> {
        let html = std::fs::read_to_string(path)?;
        Ok(Self::new(html))
    }

    pub fn html(&self) -> &str {
        &self.html
    }
}

impl Default for PageShell {
    fn default() -> Self {
        Self::new(DEFAULT_TEMPLATE)
    }
}

/// Serves the shell for `/` and every unmatched path.
pub async fn serve_shell(State(state): State<AppState>) -> Html<String> {
    Html(state.shell.html().to_string())
}
