//! Preload policy for resources referenced by the page shell.

use axum::http::header::LINK;

use super::page::{PageResponse, RequestView};
use super::pipeline::ResponseStage;

/// Resource type, as used in the `as=` parameter of a preload link.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResourceKind {
    Js,
    Css,
    Font,
    Asset,
}

impl ResourceKind {
    fn from_path(path: &str) -> Self {
        let extension = path
            .rsplit_once('.')
            .map(|(_, ext)| ext.to_ascii_lowercase())
            .unwrap_or_default();

        match extension.as_str() {
            "woff2" | "woff" | "ttf" | "otf" | "eot" => ResourceKind::Font,
            "css" => ResourceKind::Css,
            "js" | "mjs" => ResourceKind::Js,
            _ => ResourceKind::Asset,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ResourceKind::Js => "script",
            ResourceKind::Css => "style",
            ResourceKind::Font => "font",
            ResourceKind::Asset => "fetch",
        }
    }
}

/// A same-origin resource referenced by the document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resource {
    pub path: String,
    pub kind: ResourceKind,
}

impl Resource {
    pub fn new(path: impl Into<String>) -> Self {
        let path = path.into();
        let bare = path.split(&['?', '#'][..]).next().unwrap_or_default();
        let kind = ResourceKind::from_path(bare);
        Self { path, kind }
    }
}

/// Absolute-path references, `href` attributes first, then `src`.
pub fn discover_resources(html: &str) -> Vec<Resource> {
    let mut found: Vec<Resource> = Vec::new();

    for attr in ["href=\"", "src=\""] {
        let mut rest = html;
        while let Some(start) = rest.find(attr) {
            let value_start = start + attr.len();
            let Some(len) = rest[value_start..].find('"') else {
                break;
            };
            let value = &rest[value_start..value_start + len];
            if value.starts_with('/') && !value.starts_with("//") {
                found.push(Resource::new(value));
            }
            rest = &rest[value_start + len..];
        }
    }

    found
}

/// Only fonts are worth preloading.
pub fn should_preload(resource: &Resource) -> bool {
    resource.kind == ResourceKind::Font || resource.path.contains("/fonts/")
}

fn link_value(resource: &Resource) -> String {
    let mut value = format!("<{}>; rel=\"preload\"; as=\"{}\"", resource.path, resource.kind.as_str());
    if resource.kind == ResourceKind::Font {
        value.push_str("; crossorigin");
    }
    value
}

/// Adds a `Link` preload header per font resource in the page.
#[derive(Debug, Default, Clone, Copy)]
pub struct PreloadStage;

impl ResponseStage for PreloadStage {
    fn name(&self) -> &'static str {
        "preload"
    }

    fn apply(&self, _request: &RequestView, page: &mut PageResponse) {
        let mut emitted: Vec<String> = Vec::new();
        for resource in discover_resources(&page.html) {
            if !should_preload(&resource) || emitted.contains(&resource.path) {
                continue;
            }
            page.append_header(LINK, &link_value(&resource));
            emitted.push(resource.path);
        }
    }
}
