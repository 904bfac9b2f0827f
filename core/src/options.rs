use serde::{Deserialize, Serialize};

/// Per-call mapping options.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MapOptions {
    /// Fail with [`MapError::TypeMismatch`](crate::MapError::TypeMismatch)
    /// when a matched scalar cannot be assigned, instead of skipping it.
    ///
    /// Unmatched tags are tolerated either way.
    #[serde(default)]
    pub strict: bool,
}

impl MapOptions {
    #[must_use]
    pub const fn lossy() -> Self {
        Self { strict: false }
    }

    #[must_use]
    pub const fn strict() -> Self {
        Self { strict: true }
    }
}
