use std::sync::Arc;

use crate::message::Envelope;

/// The callable a middleware wraps and returns.
pub type EnvelopeHandler = Arc<dyn Fn(&Envelope) -> anyhow::Result<()> + Send + Sync>;

/// Wraps a handler to produce a new handler.
pub type Middleware = Arc<dyn Fn(EnvelopeHandler) -> EnvelopeHandler + Send + Sync>;

/// Wrap `handler` so that `middleware[0]` runs first and sees the result last.
///
/// An empty slice returns `handler` unchanged.
#[must_use]
pub fn apply_middleware(handler: EnvelopeHandler, middleware: &[Middleware]) -> EnvelopeHandler {
    middleware
        .iter()
        .rev()
        .fold(handler, |next, wrap| wrap(next))
}
