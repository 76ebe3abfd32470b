//! Buffered page response the pipeline stages operate on.

use axum::http::{header, HeaderMap, HeaderName, HeaderValue};
use axum_extra::extract::cookie::{Cookie, CookieJar};

/// Request data visible to pipeline stages.
#[derive(Debug, Clone, Default)]
pub struct RequestView {
    headers: HeaderMap,
    cookies: CookieJar,
}

impl RequestView {
    pub fn from_headers(headers: HeaderMap) -> Self {
        let cookies = CookieJar::from_headers(&headers);
        Self { headers, cookies }
    }

    /// Header value as text, if present and valid ASCII.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).and_then(|v| v.to_str().ok())
    }

    pub fn cookie(&self, name: &str) -> Option<&str> {
        self.cookies.get(name).map(|c| c.value())
    }
}

/// An HTML response being rewritten by the pipeline.
#[derive(Debug, Default)]
pub struct PageResponse {
    pub html: String,
    pub headers: HeaderMap,
    cookies: Vec<Cookie<'static>>,
}

impl PageResponse {
    pub fn new(html: impl Into<String>) -> Self {
        Self {
            html: html.into(),
            headers: HeaderMap::new(),
            cookies: Vec::new(),
        }
    }

    pub fn with_headers(html: impl Into<String>, headers: HeaderMap) -> Self {
        Self {
            html: html.into(),
            headers,
            cookies: Vec::new(),
        }
    }

    pub fn add_cookie(&mut self, cookie: Cookie<'static>) {
        self.cookies.push(cookie);
    }

    pub fn cookies(&self) -> &[Cookie<'static>] {
        &self.cookies
    }

    /// Replace the first literal occurrence of `from`. Returns whether a
    /// replacement happened.
    pub fn replace_once(&mut self, from: &str, to: &str) -> bool {
        match self.html.find(from) {
            Some(start) => {
                self.html.replace_range(start..start + from.len(), to);
                true
            }
            None => false,
        }
    }

    /// Add `token` to a comma-separated list header, skipping duplicates.
    pub fn merge_list_header(&mut self, name: HeaderName, token: &str) {
        let mut tokens: Vec<String> = self
            .headers
            .get_all(&name)
            .iter()
            .filter_map(|v| v.to_str().ok())
            .flat_map(|v| v.split(','))
            .map(|t| t.trim().to_string())
            .filter(|t| !t.is_empty())
            .collect();

        if !tokens.iter().any(|t| t.eq_ignore_ascii_case(token)) {
            tokens.push(token.to_string());
        }

        match HeaderValue::from_str(&tokens.join(", ")) {
            Ok(value) => {
                self.headers.insert(name, value);
            }
            Err(e) => tracing::warn!(header = %name, error = %e, "Skipping invalid header value"),
        }
    }

    /// Append a header value without touching existing ones.
    pub fn append_header(&mut self, name: HeaderName, value: &str) {
        match HeaderValue::from_str(value) {
            Ok(value) => {
                self.headers.append(name, value);
            }
            Err(e) => tracing::warn!(header = %name, error = %e, "Skipping invalid header value"),
        }
    }

    /// Final headers with one `Set-Cookie` per added cookie.
    pub fn into_parts(self) -> (String, HeaderMap) {
        let mut headers = self.headers;
        for cookie in &self.cookies {
            if let Ok(value) = HeaderValue::from_str(&cookie.encoded().to_string()) {
                headers.append(header::SET_COOKIE, value);
            }
        }
        (self.html, headers)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::header::VARY;

    #[test]
    fn replace_once_only_touches_first_occurrence() {
        let mut page = PageResponse::new(r#"<a x=""></a><b x=""></b>"#);

        assert!(page.replace_once(r#"x="""#, r#"x="1""#));
        assert_eq!(page.html, r#"<a x="1"></a><b x=""></b>"#);
    }

    #[test]
    fn replace_once_without_match_leaves_html() {
        let mut page = PageResponse::new("<html></html>");
        assert!(!page.replace_once(r#"x="""#, r#"x="1""#));
        assert_eq!(page.html, "<html></html>");
    }

    #[test]
    fn merge_list_header_appends_and_dedupes() {
        let mut headers = HeaderMap::new();
        headers.insert(VARY, HeaderValue::from_static("Accept-Encoding"));
        let mut page = PageResponse::with_headers("", headers);

        page.merge_list_header(VARY, "Sec-CH-UA-Mobile");
        page.merge_list_header(VARY, "sec-ch-ua-mobile");

        assert_eq!(page.headers.get(VARY).unwrap(), "Accept-Encoding, Sec-CH-UA-Mobile");
    }

    #[test]
    fn request_view_reads_cookies_and_headers() {
        let mut headers = HeaderMap::new();
        headers.insert(header::COOKIE, HeaderValue::from_static("cogito-theme=dark; other=1"));
        headers.insert("sec-ch-ua-mobile", HeaderValue::from_static("?1"));
        let view = RequestView::from_headers(headers);

        assert_eq!(view.cookie("cogito-theme"), Some("dark"));
        assert_eq!(view.cookie("missing"), None);
        assert_eq!(view.header("Sec-CH-UA-Mobile"), Some("?1"));
    }

    #[test]
    fn into_parts_emits_set_cookie_headers() {
        let mut page = PageResponse::new("x");
        page.add_cookie(Cookie::new("a", "1"));
        page.add_cookie(Cookie::new("b", "2"));

        let (_, headers) = page.into_parts();
        let cookies: Vec<_> = headers.get_all(header::SET_COOKIE).iter().collect();
        assert_eq!(cookies.len(), 2);
    }
}
