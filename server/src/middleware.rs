//! Origin enforcement.
//!
//! `CorsLayer` only decorates responses, so a non-browser client (or a
//! browser request that skips preflight) would still reach the handlers from
//! any origin. `origin_guard` rejects those requests with 403 before routing.
//! Requests without an `Origin` header and same-host requests pass through.

use axum::{
    extract::{Request, State},
    http::{header, HeaderValue},
    middleware::Next,
    response::Response,
};
use tracing::warn;

use crate::error::ApiError;

pub async fn origin_guard(
    State(allowed): State<HeaderValue>,
    req: Request,
    next: Next,
) -> Result<Response, ApiError> {
    if let Some(origin) = req.headers().get(header::ORIGIN) {
        let host = req.headers().get(header::HOST);
        if *origin != allowed && !is_same_host(origin, host) {
            warn!(origin = ?origin, "rejected request from foreign origin");
            return Err(ApiError::OriginNotAllowed);
        }
    }
    Ok(next.run(req).await)
}

/// `origin` names the host the request was sent to.
fn is_same_host(origin: &HeaderValue, host: Option<&HeaderValue>) -> bool {
    let (Ok(origin), Some(Ok(host))) = (origin.to_str(), host.map(HeaderValue::to_str)) else {
        return false;
    };
    ["http://", "https://"]
        .into_iter()
        .any(|scheme| origin.strip_prefix(scheme) == Some(host))
}
