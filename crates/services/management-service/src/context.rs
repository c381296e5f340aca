//! Per-call context threaded from the transport down to storage.

use std::future::Future;
use std::time::Duration;

use tokio::time::Instant;
use tokio_util::sync::CancellationToken;
use tracing::{Instrument, Span};
use uuid::Uuid;

use common::{AppError, AppResult};

/// Request-scoped data: correlation id, tracing span, cancellation and an
/// optional deadline.
///
/// Repositories wrap their I/O in [`RequestContext::guard`], so a cancelled or
/// expired call stops waiting on storage and reports [`AppError::Cancelled`].
#[derive(Debug, Clone)]
pub struct RequestContext {
    request_id: String,
    span: Span,
    cancellation: CancellationToken,
    deadline: Option<Instant>,
}

impl RequestContext {
    /// Fresh context with a generated request id and no deadline.
    pub fn new() -> Self {
        Self::with_id(Uuid::new_v4().to_string())
    }

    pub fn with_id(request_id: impl Into<String>) -> Self {
        let request_id = request_id.into();
        let span = tracing::info_span!("request", request_id = %request_id);
        Self {
            request_id,
            span,
            cancellation: CancellationToken::new(),
            deadline: None,
        }
    }

    /// Deadline `timeout` from now. A timeout too large to represent leaves
    /// the context without a deadline.
    pub fn with_timeout(self, timeout: Duration) -> Self {
        match Instant::now().checked_add(timeout) {
            Some(deadline) => self.with_deadline(deadline),
            None => self,
        }
    }

    pub fn with_deadline(mut self, deadline: Instant) -> Self {
        self.deadline = Some(deadline);
        self
    }

    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.cancellation = token;
        self
    }

    pub fn request_id(&self) -> &str {
        &self.request_id
    }

    pub fn span(&self) -> &Span {
        &self.span
    }

    pub fn cancellation(&self) -> &CancellationToken {
        &self.cancellation
    }

    /// Run `fut` inside the request span, abandoning it on cancellation or
    /// when the deadline passes.
    pub async fn guard<T, F>(&self, fut: F) -> AppResult<T>
    where
        F: Future<Output = AppResult<T>>,
    {
        let fut = fut.instrument(self.span.clone());
        let deadline = self.deadline;

        tokio::select! {
            biased;
            _ = self.cancellation.cancelled() => {
                Err(AppError::Cancelled("request cancelled".to_string()))
            }
            result = async {
                match deadline {
                    Some(at) => tokio::time::timeout_at(at, fut)
                        .await
                        .unwrap_or_else(|_| Err(AppError::Cancelled("deadline exceeded".to_string()))),
                    None => fut.await,
                }
            } => result,
        }
    }
}

impl Default for RequestContext {
    fn default() -> Self {
        Self::new()
    }
}
