use axum::http::header::{
    ACCESS_CONTROL_ALLOW_HEADERS, ACCESS_CONTROL_ALLOW_METHODS, ACCESS_CONTROL_ALLOW_ORIGIN,
};
use axum::http::{HeaderMap, HeaderValue};
use lazy_static::lazy_static;
use regex::Regex;

/// Production page allowed to call the proxy
pub(crate) const PRODUCTION_ORIGIN: &str = "https://gaodeg-source.github.io";

const ALLOWED_METHODS: &str = "POST, OPTIONS";
const ALLOWED_HEADERS: &str = "Content-Type";

lazy_static! {
    // Local previews and hand-opened HTML pages
    static ref LOCALHOST_ORIGIN: Regex =
        Regex::new(r"^http://localhost:[0-9]+$").expect("Invalid localhost origin pattern");
}

/// Returns the origin itself if it may receive CORS headers, `None` otherwise.
pub(crate) fn allowed_origin(origin: &str) -> Option<&str> {
    if origin.is_empty() {
        return None;
    }
    if LOCALHOST_ORIGIN.is_match(origin) || origin == PRODUCTION_ORIGIN {
        return Some(origin);
    }
    None
}

/// Builds the CORS headers reflecting `origin`. An absent origin yields no headers.
pub(crate) fn cors_headers(origin: Option<&str>) -> HeaderMap {
    let mut headers = HeaderMap::new();
    let Some(origin) = origin else {
        return headers;
    };
    // Allowed origins are plain ASCII, anything else is left without CORS headers
    let Ok(origin) = HeaderValue::from_str(origin) else {
        return headers;
    };

    headers.insert(ACCESS_CONTROL_ALLOW_ORIGIN, origin);
    headers.insert(
        ACCESS_CONTROL_ALLOW_METHODS,
        HeaderValue::from_static(ALLOWED_METHODS),
    );
    headers.insert(
        ACCESS_CONTROL_ALLOW_HEADERS,
        HeaderValue::from_static(ALLOWED_HEADERS),
    );
    headers
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_localhost_any_port_is_allowed() {
        for origin in ["http://localhost:1", "http://localhost:3000", "http://localhost:65535"] {
            assert_eq!(allowed_origin(origin), Some(origin));
        }
    }

    #[test]
    fn test_production_origin_is_allowed() {
        assert_eq!(allowed_origin(PRODUCTION_ORIGIN), Some(PRODUCTION_ORIGIN));
    }

    #[test]
    fn test_other_origins_are_rejected() {
        for origin in [
            "",
            "http://localhost",
            "http://localhost:",
            "http://localhost:3000/",
            "https://localhost:3000",
            "http://localhost:3000.evil.example",
            "http://127.0.0.1:3000",
            "https://gaodeg-source.github.io/",
            "http://gaodeg-source.github.io",
            "https://evil.example",
        ] {
            assert_eq!(allowed_origin(origin), None, "{origin} should be rejected");
        }
    }

    #[test]
    fn test_cors_headers_absent_origin() {
        assert!(cors_headers(None).is_empty());
    }

    #[test]
    fn test_cors_headers_reflect_origin() {
        let headers = cors_headers(Some("http://localhost:8080"));
        assert_eq!(headers.len(), 3);
        assert_eq!(headers[ACCESS_CONTROL_ALLOW_ORIGIN], "http://localhost:8080");
        assert_eq!(headers[ACCESS_CONTROL_ALLOW_METHODS], "POST, OPTIONS");
        assert_eq!(headers[ACCESS_CONTROL_ALLOW_HEADERS], "Content-Type");
    }
}
