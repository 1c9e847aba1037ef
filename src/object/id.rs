use std::fmt::{self, Write};
use std::str::FromStr;

use thiserror::Error;

/// An error which can be returned when parsing an object ID.
#[derive(Clone, Copy, Debug, Eq, Error, PartialEq)]
pub enum ParseIdError {
    /// Value being parsed is empty.
    #[error("cannot parse object ID from empty string")]
    Empty,

    /// Contains an invalid digit.
    ///
    /// Among other causes, this variant will be constructed when parsing a
    /// string that contains an uppercase hex digit.
    #[error("value contains invalid digit `{0}`")]
    InvalidDigit(char),

    /// ID is longer than the 20-byte signature allows.
    #[error("value is more than 40 digits long")]
    Overflow,

    /// ID is shorter than the 20-byte signature requires.
    #[error("value is less than 40 digits long")]
    Underflow,
}

/// An object ID is the identity of one object within a repository.
///
/// It is stored as the raw 20-byte signature; the 40-digit lowercase hex form
/// exists only at the API boundary (via `Display` and [`Id::from_hex`]).
/// Because the raw bytes are canonical, a signature with leading zero bytes
/// round-trips through hex without loss.
#[derive(Clone, Copy, Eq, Hash, PartialEq)]
pub struct Id {
    id: [u8; 20],
}

impl Id {
    /// Create a new ID from a raw 20-byte slice.
    ///
    /// It is an error if the slice contains anything other than 20 bytes.
    pub fn new(id: &[u8]) -> Result<Id, ParseIdError> {
        match id.len() {
            20 => {
                let mut raw = [0u8; 20];
                raw.copy_from_slice(id);
                Ok(Id { id: raw })
            }
            0 => Err(ParseIdError::Empty),
            n if n < 20 => Err(ParseIdError::Underflow),
            _ => Err(ParseIdError::Overflow),
        }
    }

    /// Convert a 40-character hex ID to an object ID.
    ///
    /// It is an error if the ID contains anything other than 40 lowercase
    /// hex digits.
    pub fn from_hex<T: AsRef<[u8]>>(id: T) -> Result<Id, ParseIdError> {
        let hex = id.as_ref();

        match hex.len() {
            40 => {
                let mut raw = [0u8; 20];
                for (byte, pair) in raw.iter_mut().zip(hex.chunks(2)) {
                    *byte = digit_value(pair[0])? << 4 | digit_value(pair[1])?;
                }
                Ok(Id { id: raw })
            }
            0 => Err(ParseIdError::Empty),
            n if n < 40 => Err(ParseIdError::Underflow),
            _ => Err(ParseIdError::Overflow),
        }
    }

    /// The raw 20-byte signature, as written into tree entries.
    pub fn as_bytes(&self) -> &[u8] {
        &self.id
    }
}

impl From<[u8; 20]> for Id {
    fn from(id: [u8; 20]) -> Id {
        Id { id }
    }
}

impl FromStr for Id {
    type Err = ParseIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Id::from_hex(s.as_bytes())
    }
}

static CHARS: &[u8] = b"0123456789abcdef";

impl fmt::Display for Id {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for &byte in self.id.iter() {
            f.write_char(CHARS[(byte >> 4) as usize].into())?;
            f.write_char(CHARS[(byte & 0xf) as usize].into())?;
        }

        Ok(())
    }
}

impl fmt::Debug for Id {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Id({})", self)
    }
}

fn digit_value(c: u8) -> Result<u8, ParseIdError> {
    match c {
        b'0'..=b'9' => Ok(c - b'0'),
        b'a'..=b'f' => Ok(c - b'a' + 10),
        _ => Err(ParseIdError::InvalidDigit(c as char)),
    }
}
