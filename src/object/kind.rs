use std::fmt::{self, Display, Formatter};
use std::str::FromStr;

use thiserror::Error;

/// Error returned when an envelope (or a caller) names an object kind
/// outside the supported set.
#[derive(Clone, Debug, Eq, Error, PartialEq)]
#[error("unknown object kind `{0}`")]
pub struct UnknownKindError(pub String);

/// Describes the fundamental object type (blob, tree, or commit).
/// We use the word `kind` here to avoid conflict with the Rust reserved word `type`.
///
/// This set is closed: adding a kind means adding a codec and a dispatch arm
/// in [`crate::object::Object`], not modifying the existing ones.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum Kind {
    Blob,
    Tree,
    Commit,
}

impl Kind {
    /// Parse the kind tag from the front of an object envelope.
    pub fn from_tag(tag: &[u8]) -> Result<Kind, UnknownKindError> {
        match tag {
            b"blob" => Ok(Kind::Blob),
            b"tree" => Ok(Kind::Tree),
            b"commit" => Ok(Kind::Commit),
            _ => Err(UnknownKindError(String::from_utf8_lossy(tag).into_owned())),
        }
    }
}

impl Display for Kind {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        match self {
            Kind::Blob => write!(f, "blob"),
            Kind::Tree => write!(f, "tree"),
            Kind::Commit => write!(f, "commit"),
        }
    }
}

impl FromStr for Kind {
    type Err = UnknownKindError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Kind::from_tag(s.as_bytes())
    }
}
