//! Per-category preference negotiation.

use std::marker::PhantomData;

use axum::http::HeaderName;

use super::page::{PageResponse, RequestView};
use super::pipeline::ResponseStage;
use crate::adapters::http::cookies::{preference_cookie, CookieSettings};
use crate::domain::Preference;

const ACCEPT_CH: HeaderName = HeaderName::from_static("accept-ch");
const CRITICAL_CH: HeaderName = HeaderName::from_static("critical-ch");

/// How a preference value was obtained for this response.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolution<P> {
    /// A valid cookie was already present; nothing is written.
    Stored(P),
    /// Derived from the client hint; a cookie must be set.
    Negotiated(P),
}

impl<P: Copy> Resolution<P> {
    pub fn value(&self) -> P {
        match self {
            Resolution::Stored(p) | Resolution::Negotiated(p) => *p,
        }
    }
}

/// Resolves one preference category, persists it as a cookie when missing
/// and renders it into the page shell's placeholder attribute.
pub struct Negotiator<P> {
    settings: CookieSettings,
    _category: PhantomData<fn() -> P>,
}

impl<P: Preference> Negotiator<P> {
    pub fn new(settings: CookieSettings) -> Self {
        Self {
            settings,
            _category: PhantomData,
        }
    }

    /// Use the stored cookie when it holds a known value, otherwise derive
    /// from the hint header.
    pub fn resolve(&self, request: &RequestView) -> Resolution<P> {
        if let Some(raw) = request.cookie(P::COOKIE_NAME) {
            match raw.parse::<P>() {
                Ok(value) => return Resolution::Stored(value),
                Err(_) => {
                    tracing::debug!(category = P::CATEGORY, value = raw, "Ignoring unknown cookie value")
                }
            }
        }
        Resolution::Negotiated(P::from_hint(request.header(P::HINT_HEADER)))
    }

    fn placeholder() -> String {
        format!("{}=\"\"", P::ATTRIBUTE)
    }

    fn rendered(value: P) -> String {
        format!("{}=\"{}\"", P::ATTRIBUTE, value)
    }
}

impl<P: Preference> ResponseStage for Negotiator<P> {
    fn name(&self) -> &'static str {
        P::CATEGORY
    }

    fn apply(&self, request: &RequestView, page: &mut PageResponse) {
        let resolution = self.resolve(request);

        if let Resolution::Negotiated(value) = resolution {
            page.add_cookie(preference_cookie(
                P::COOKIE_NAME,
                value.as_str(),
                &self.settings,
            ));
            tracing::debug!(category = P::CATEGORY, value = %value, "Preference negotiated");
        }

        page.replace_once(&Self::placeholder(), &Self::rendered(resolution.value()));
        self.advertise(page);
    }

    fn advertise(&self, page: &mut PageResponse) {
        page.merge_list_header(ACCEPT_CH, P::HINT_HEADER);
        page.merge_list_header(axum::http::header::VARY, P::HINT_HEADER);
        page.merge_list_header(CRITICAL_CH, P::HINT_HEADER);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Device, Theme};
    use axum::http::{header, HeaderMap, HeaderValue};
    use proptest::prelude::*;

    fn request(pairs: &[(&'static str, &str)]) -> RequestView {
        let mut headers = HeaderMap::new();
        for (name, value) in pairs {
            headers.append(*name, HeaderValue::from_str(value).unwrap());
        }
        RequestView::from_headers(headers)
    }

    fn theme() -> Negotiator<Theme> {
        Negotiator::new(CookieSettings::default())
    }

    fn device() -> Negotiator<Device> {
        Negotiator::new(CookieSettings::default())
    }

    const SHELL: &str = r#"<html data-theme="" data-device=""><body data-theme=""></body></html>"#;

    #[test]
    fn missing_hint_defaults_theme_to_light_and_sets_cookie() {
        let mut page = PageResponse::new(SHELL);

        theme().apply(&request(&[]), &mut page);

        assert_eq!(page.cookies().len(), 1);
        assert_eq!(page.cookies()[0].name(), "cogito-theme");
        assert_eq!(page.cookies()[0].value(), "light");
        assert!(page.html.starts_with(r#"<html data-theme="light" data-device="">"#));
        assert!(page.html.contains(r#"<body data-theme="">"#));
    }

    #[test]
    fn dark_hint_resolves_dark() {
        let mut page = PageResponse::new(SHELL);

        theme().apply(
            &request(&[("sec-ch-prefers-color-scheme", "dark")]),
            &mut page,
        );

        assert_eq!(page.cookies()[0].value(), "dark");
        assert!(page.html.contains(r#"data-theme="dark""#));
    }

    #[test]
    fn missing_hint_defaults_device_to_desktop() {
        let mut page = PageResponse::new(SHELL);

        device().apply(&request(&[]), &mut page);

        assert_eq!(page.cookies()[0].value(), "desktop");
        assert!(page.html.contains(r#"data-device="desktop""#));
    }

    #[test]
    fn mobile_hint_resolves_mobile() {
        let mut page = PageResponse::new(SHELL);

        device().apply(&request(&[("sec-ch-ua-mobile", "?1")]), &mut page);

        assert_eq!(page.cookies()[0].value(), "mobile");
    }

    #[test]
    fn existing_cookie_wins_over_hint_and_is_not_rewritten() {
        let mut page = PageResponse::new(SHELL);

        theme().apply(
            &request(&[
                ("cookie", "cogito-theme=light"),
                ("sec-ch-prefers-color-scheme", "dark"),
            ]),
            &mut page,
        );

        assert!(page.cookies().is_empty());
        assert!(page.html.contains(r#"data-theme="light""#));
    }

    #[test]
    fn unknown_cookie_value_is_renegotiated() {
        let mut page = PageResponse::new(SHELL);

        theme().apply(&request(&[("cookie", "cogito-theme=purple")]), &mut page);

        assert_eq!(page.cookies().len(), 1);
        assert_eq!(page.cookies()[0].value(), "light");
        assert!(!page.html.contains("purple"));
    }

    #[test]
    fn missing_placeholder_passes_through() {
        let mut page = PageResponse::new("<html></html>");

        theme().apply(&request(&[]), &mut page);

        assert_eq!(page.html, "<html></html>");
        assert_eq!(page.cookies().len(), 1);
    }

    #[test]
    fn hint_headers_are_always_advertised() {
        let mut page = PageResponse::new(SHELL);

        theme().apply(&request(&[("cookie", "cogito-theme=dark")]), &mut page);

        for name in ["accept-ch", "vary", "critical-ch"] {
            assert_eq!(
                page.headers.get(name).unwrap(),
                "Sec-CH-Prefers-Color-Scheme",
                "{name}"
            );
        }
    }

    #[test]
    fn preference_cookie_is_not_http_only() {
        let mut page = PageResponse::new(SHELL);
        theme().apply(&request(&[]), &mut page);

        let (_, headers) = page.into_parts();
        let set_cookie = headers.get(header::SET_COOKIE).unwrap().to_str().unwrap();
        assert!(set_cookie.starts_with("cogito-theme=light"));
        assert!(set_cookie.contains("SameSite=Strict"));
        assert!(set_cookie.contains("Path=/"));
        assert!(!set_cookie.contains("HttpOnly"));
    }

    proptest! {
        #[test]
        fn theme_without_hint_or_cookie_is_light(other in "[a-z-]{0,16}") {
            prop_assume!(other != "dark");
            let mut page = PageResponse::new(SHELL);

            theme().apply(&request(&[("sec-ch-prefers-color-scheme", &other)]), &mut page);

            prop_assert_eq!(page.cookies().len(), 1);
            prop_assert_eq!(page.cookies()[0].value(), "light");
        }

        #[test]
        fn stored_cookie_is_never_overwritten(
            stored in prop_oneof![Just("light"), Just("dark")],
            hint in prop_oneof![Just("light"), Just("dark"), Just("")],
        ) {
            let cookie = format!("cogito-theme={stored}");
            let mut page = PageResponse::new(SHELL);

            theme().apply(
                &request(&[("cookie", &cookie), ("sec-ch-prefers-color-scheme", hint)]),
                &mut page,
            );

            prop_assert!(page.cookies().is_empty());
            let expected = format!(r#"<html data-theme="{stored}" data-device="">"#);
            prop_assert!(page.html.starts_with(&expected));
        }

        #[test]
        fn only_first_placeholder_is_rendered(prefix in "[a-z <>]{0,20}", suffix in "[a-z <>]{0,20}") {
            let html = format!(r#"{prefix}data-theme=""{suffix}data-theme="""#);
            let mut page = PageResponse::new(html);

            theme().apply(&request(&[]), &mut page);

            let expected = format!(r#"{prefix}data-theme="light"{suffix}data-theme="""#);
            prop_assert_eq!(page.html, expected);
        }
    }
}
