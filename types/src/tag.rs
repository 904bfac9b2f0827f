//! Field tags: the join key between source and destination records.

use std::borrow::{Borrow, Cow};
use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A non-empty field label.
///
/// Labels are opaque: no reserved characters, compared byte-for-byte, and no
/// uniqueness requirement at declaration time. An empty label is not a tag,
/// so a field declared with one is simply untagged and can never match.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Tag(Cow<'static, str>);

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("tag label must not be empty")]
pub struct EmptyTagError;

impl Tag {
    pub fn new(label: impl Into<Cow<'static, str>>) -> Result<Self, EmptyTagError> {
        let label = label.into();
        if label.is_empty() {
            Err(EmptyTagError)
        } else {
            Ok(Self(label))
        }
    }

    /// Like [`Tag::new`], but maps an empty label to "no tag".
    #[must_use]
    pub fn parse(label: impl Into<Cow<'static, str>>) -> Option<Self> {
        Self::new(label).ok()
    }

    #[must_use]
    pub const fn from_static(label: &'static str) -> Self {
        assert!(!label.is_empty(), "Tag must not be empty");
        Self(Cow::Borrowed(label))
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for Tag {
    type Error = EmptyTagError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Tag> for String {
    fn from(value: Tag) -> Self {
        value.0.into_owned()
    }
}

impl Borrow<str> for Tag {
    fn borrow(&self) -> &str {
        self.as_str()
    }
}

impl AsRef<str> for Tag {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
