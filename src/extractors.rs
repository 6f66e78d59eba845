use std::convert::Infallible;

use axum::async_trait;
use axum::extract::FromRequestParts;
use axum::http::header::ORIGIN;
use axum::http::request::Parts;

use crate::api::cors::allowed_origin;

/// The caller's `Origin` header along with its allow-list status.
#[derive(Debug)]
pub(crate) struct RequestOrigin {
    /// Raw header value, empty when missing or not valid text
    pub(crate) raw: String,
    /// Same as `raw` when the origin may receive CORS headers
    pub(crate) allowed: Option<String>,
}

#[async_trait]
impl<S> FromRequestParts<S> for RequestOrigin
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let raw = parts
            .headers
            .get(ORIGIN)
            .and_then(|value| value.to_str().ok())
            .unwrap_or_default()
            .to_string();
        let allowed = allowed_origin(&raw).map(str::to_string);
        Ok(RequestOrigin { raw, allowed })
    }
}
