//! In-process message routing.
//!
//! A [`Router`] delivers [`Envelope`]s to handlers registered by message
//! type. Middleware wraps the final handler; the first middleware registered
//! is the outermost layer. There is no transport here: callers own delivery.

mod message;
mod middleware;
mod router;

pub use message::{DispatchKind, Envelope, Message};
pub use middleware::{EnvelopeHandler, Middleware, apply_middleware};
pub use router::{DispatchError, Dispatcher, ErrorHandler, Handler, Job, Router};
