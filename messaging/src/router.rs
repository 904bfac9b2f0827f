use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use thiserror::Error;

use crate::message::{DispatchKind, Envelope, Message};
use crate::middleware::{EnvelopeHandler, Middleware, apply_middleware};

pub type Handler = Arc<dyn Fn(&Message) -> anyhow::Result<()> + Send + Sync>;

pub type ErrorHandler = Arc<dyn Fn(&Message, &anyhow::Error) + Send + Sync>;

#[derive(Debug, Error)]
pub enum DispatchError {
    #[error("no handler registered for message type `{0}`")]
    NoHandler(String),
    #[error("handler for `{msg_type}` failed: {cause:#}")]
    Handler {
        msg_type: String,
        cause: anyhow::Error,
    },
}

/// A handler and its error handler as one value.
pub trait Job: Send + Sync {
    fn process(&self, message: &Message) -> anyhow::Result<()>;

    fn on_error(&self, message: &Message, error: &anyhow::Error);
}

pub trait Dispatcher {
    /// Route every type in `msg_types` to `handler`. A later registration for
    /// the same type replaces the earlier one.
    fn add_handler(&mut self, handler: Handler, error_handler: ErrorHandler, msg_types: &[&str]);

    /// Append middleware. Earlier registrations wrap later ones.
    fn use_middleware(&mut self, middleware: &[Middleware]);

    fn dispatch(&self, envelope: &Envelope) -> Result<(), DispatchError>;
}

#[derive(Clone)]
struct Route {
    handler: Handler,
    on_error: ErrorHandler,
}

/// In-process [`Dispatcher`] keyed by message type.
#[derive(Default)]
pub struct Router {
    routes: HashMap<String, Route>,
    middleware: Vec<Middleware>,
}

impl fmt::Debug for Router {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut msg_types: Vec<_> = self.routes.keys().collect();
        msg_types.sort_unstable();
        f.debug_struct("Router")
            .field("msg_types", &msg_types)
            .field("middleware", &self.middleware.len())
            .finish()
    }
}

impl Router {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_job(&mut self, job: Arc<dyn Job>, msg_types: &[&str]) {
        let process = Arc::clone(&job);
        self.add_handler(
            Arc::new(move |message: &Message| process.process(message)),
            Arc::new(move |message: &Message, error: &anyhow::Error| job.on_error(message, error)),
            msg_types,
        );
    }

    #[must_use]
    pub fn has_handler(&self, msg_type: &str) -> bool {
        self.routes.contains_key(msg_type)
    }

    fn terminal(route: &Route) -> EnvelopeHandler {
        let route = route.clone();
        Arc::new(move |envelope: &Envelope| -> anyhow::Result<()> {
            match envelope.kind {
                DispatchKind::Handle => (route.handler)(&envelope.message),
                DispatchKind::Error => {
                    let reported = envelope.error.as_deref().unwrap_or("unspecified error");
                    (route.on_error)(&envelope.message, &anyhow::anyhow!(reported.to_string()));
                    Ok(())
                }
            }
        })
    }
}

impl Dispatcher for Router {
    fn add_handler(&mut self, handler: Handler, error_handler: ErrorHandler, msg_types: &[&str]) {
        let route = Route {
            handler,
            on_error: error_handler,
        };
        for msg_type in msg_types {
            if self
                .routes
                .insert((*msg_type).to_string(), route.clone())
                .is_some()
            {
                tracing::debug!(msg_type, "replaced message handler");
            }
        }
    }

    fn use_middleware(&mut self, middleware: &[Middleware]) {
        self.middleware.extend(middleware.iter().cloned());
    }

    /// Run `envelope` through the middleware chain into its handler.
    ///
    /// When a handle delivery fails, the route's error handler sees the
    /// error before it is returned.
    fn dispatch(&self, envelope: &Envelope) -> Result<(), DispatchError> {
        let msg_type = envelope.msg_type();
        let Some(route) = self.routes.get(msg_type) else {
            return Err(DispatchError::NoHandler(msg_type.to_string()));
        };
        tracing::debug!(
            msg_type,
            kind = envelope.kind.as_str(),
            request_id = %envelope.message.request_id,
            source = %envelope.message.source,
            "dispatching message"
        );

        let chain = apply_middleware(Self::terminal(route), &self.middleware);
        match chain(envelope) {
            Ok(()) => Ok(()),
            Err(cause) => {
                tracing::warn!(msg_type, error = %cause, "message handler failed");
                if envelope.kind == DispatchKind::Handle {
                    (route.on_error)(&envelope.message, &cause);
                }
                Err(DispatchError::Handler {
                    msg_type: msg_type.to_string(),
                    cause,
                })
            }
        }
    }
}
