//! Ordered response stages applied to buffered HTML pages.

use super::negotiator::Negotiator;
use super::page::{PageResponse, RequestView};
use super::preload::PreloadStage;
use crate::adapters::http::cookies::CookieSettings;
use crate::domain::{Device, Theme};

/// One step of the HTML response pipeline.
///
/// Stages run in registration order and each sees the page as left by the
/// previous one.
pub trait ResponseStage: Send + Sync {
    fn name(&self) -> &'static str;

    fn apply(&self, request: &RequestView, page: &mut PageResponse);

    /// Response headers the stage contributes to every response, including
    /// ones it cannot rewrite.
    fn advertise(&self, _page: &mut PageResponse) {}
}

pub struct ResponsePipeline {
    stages: Vec<Box<dyn ResponseStage>>,
    max_body_bytes: usize,
}

impl ResponsePipeline {
    pub fn new(max_body_bytes: usize) -> Self {
        Self {
            stages: Vec::new(),
            max_body_bytes,
        }
    }

    pub fn with_stage(mut self, stage: impl ResponseStage + 'static) -> Self {
        self.stages.push(Box::new(stage));
        self
    }

    /// Theme, then device, then font preloads.
    pub fn standard(settings: CookieSettings, max_body_bytes: usize) -> Self {
        Self::new(max_body_bytes)
            .with_stage(Negotiator::<Theme>::new(settings))
            .with_stage(Negotiator::<Device>::new(settings))
            .with_stage(PreloadStage)
    }

    pub fn max_body_bytes(&self) -> usize {
        self.max_body_bytes
    }

    pub fn stage_names(&self) -> Vec<&'static str> {
        self.stages.iter().map(|s| s.name()).collect()
    }

    pub fn run(&self, request: &RequestView, page: &mut PageResponse) {
        for stage in &self.stages {
            stage.apply(request, page);
        }
    }

    /// Header-only pass for responses whose body is left untouched.
    pub fn advertise(&self, page: &mut PageResponse) {
        for stage in &self.stages {
            stage.advertise(page);
        }
    }
}

impl std::fmt::Debug for ResponsePipeline {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ResponsePipeline")
            .field("stages", &self.stage_names())
            .field("max_body_bytes", &self.max_body_bytes)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::{header, HeaderMap, HeaderValue};

    const SHELL: &str = r#"<html data-theme="" data-device=""><head>
<link rel="stylesheet" href="/fonts/inter.css"></head></html>"#;

    #[test]
    fn standard_pipeline_order() {
        let pipeline = ResponsePipeline::standard(CookieSettings::default(), 1024);
        assert_eq!(pipeline.stage_names(), vec!["theme", "device", "preload"]);
        assert_eq!(pipeline.max_body_bytes(), 1024);
    }

    #[test]
    fn stages_compose_over_one_page() {
        let pipeline = ResponsePipeline::standard(CookieSettings::default(), 1024);
        let mut headers = HeaderMap::new();
        headers.insert("sec-ch-prefers-color-scheme", HeaderValue::from_static("dark"));
        headers.insert("sec-ch-ua-mobile", HeaderValue::from_static("?1"));
        let request = RequestView::from_headers(headers);
        let mut page = PageResponse::new(SHELL);

        pipeline.run(&request, &mut page);

        assert!(page
            .html
            .starts_with(r#"<html data-theme="dark" data-device="mobile">"#));
        assert_eq!(page.cookies().len(), 2);
        assert_eq!(
            page.headers.get("accept-ch").unwrap(),
            "Sec-CH-Prefers-Color-Scheme, Sec-CH-UA-Mobile"
        );
        assert_eq!(
            page.headers.get(header::VARY).unwrap(),
            "Sec-CH-Prefers-Color-Scheme, Sec-CH-UA-Mobile"
        );
        assert!(page.headers.get(header::LINK).is_some());
    }

    #[test]
    fn empty_pipeline_leaves_page_alone() {
        let pipeline = ResponsePipeline::new(1024);
        let mut page = PageResponse::new(SHELL);

        pipeline.run(&RequestView::default(), &mut page);

        assert_eq!(page.html, SHELL);
        assert!(page.headers.is_empty());
    }

    #[test]
    fn advertise_adds_hint_headers_without_cookies() {
        let pipeline = ResponsePipeline::standard(CookieSettings::default(), 1024);
        let mut page = PageResponse::new(SHELL);

        pipeline.advertise(&mut page);

        assert_eq!(page.html, SHELL);
        assert!(page.cookies().is_empty());
        assert_eq!(
            page.headers.get("critical-ch").unwrap(),
            "Sec-CH-Prefers-Color-Scheme, Sec-CH-UA-Mobile"
        );
        assert!(page.headers.get(header::LINK).is_none());
    }
}
