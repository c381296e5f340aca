//! Per-request call context.

use std::convert::Infallible;

use axum::{async_trait, extract::FromRequestParts, http::request::Parts};

use management_service_lib::RequestContext;

use crate::state::AppState;

/// Header carrying a caller-supplied correlation id.
pub const REQUEST_ID_HEADER: &str = "x-request-id";

/// [`RequestContext`] for the current request.
///
/// Reuses a well-formed `x-request-id`, is cancelled when the server shuts
/// down, and carries the configured request deadline.
pub struct Ctx(pub RequestContext);

fn usable_request_id(value: &str) -> bool {
    !value.is_empty() && value.len() <= 128 && value.bytes().all(|b| b.is_ascii_graphic())
}

#[async_trait]
impl FromRequestParts<AppState> for Ctx {
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        let ctx = match parts
            .headers
            .get(REQUEST_ID_HEADER)
            .and_then(|value| value.to_str().ok())
            .filter(|value| usable_request_id(value))
        {
            Some(request_id) => RequestContext::with_id(request_id),
            None => RequestContext::new(),
        };

        Ok(Ctx(ctx
            .with_cancellation(state.shutdown.child_token())
            .with_timeout(state.config.request_timeout)))
    }
}
