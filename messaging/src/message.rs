use serde::{Deserialize, Serialize};

/// A routed message. `msg_type` selects the handler.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message {
    pub msg_type: String,
    #[serde(default)]
    pub request_id: String,
    #[serde(default)]
    pub source: String,
    #[serde(default)]
    pub payload: serde_json::Value,
}

impl Message {
    #[must_use]
    pub fn new(msg_type: impl Into<String>, payload: serde_json::Value) -> Self {
        Self {
            msg_type: msg_type.into(),
            request_id: String::new(),
            source: String::new(),
            payload,
        }
    }

    #[must_use]
    pub fn with_request_id(mut self, request_id: impl Into<String>) -> Self {
        self.request_id = request_id.into();
        self
    }

    #[must_use]
    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = source.into();
        self
    }
}

/// Whether an envelope is delivered to a handler or to its error handler.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DispatchKind {
    Handle,
    Error,
}

impl DispatchKind {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Handle => "handle",
            Self::Error => "error",
        }
    }
}

/// What middleware sees: the message plus how it is being delivered.
#[derive(Debug, Clone, PartialEq)]
pub struct Envelope {
    pub kind: DispatchKind,
    pub message: Message,
    /// Failure being reported, for [`DispatchKind::Error`] deliveries.
    pub error: Option<String>,
}

impl Envelope {
    #[must_use]
    pub fn handle(message: Message) -> Self {
        Self {
            kind: DispatchKind::Handle,
            message,
            error: None,
        }
    }

    /// Deliver an already observed failure straight to the error handler.
    #[must_use]
    pub fn error(message: Message, error: impl Into<String>) -> Self {
        Self {
            kind: DispatchKind::Error,
            message,
            error: Some(error.into()),
        }
    }

    #[must_use]
    pub fn msg_type(&self) -> &str {
        &self.message.msg_type
    }
}
