//! Codec for the "key-value list with message" format used by commit objects.
//!
//! The wire form is a sequence of `key SP value LF` header lines followed by
//! a blank line and a free-text message. A value may span multiple lines;
//! each embedded LF is escaped on the wire by a single following space (a
//! continuation line), so a multi-line value is never confused with the next
//! header.

use thiserror::Error;

/// An error which can be returned when decoding a KVLM byte stream.
#[derive(Clone, Copy, Debug, Eq, Error, PartialEq)]
pub enum ParseKvlmError {
    /// Input ended before the blank line that separates headers from
    /// the message.
    #[error("input ended before the header/message separator")]
    MissingMessage,

    /// A non-blank header line contains no space, so it has no key.
    #[error("header line at offset {0} has no key")]
    MalformedHeader(usize),
}

/// The decoded form of a commit payload: an ordered mapping from byte-string
/// keys to one or more byte-string values, plus the trailing message.
///
/// Keys keep first-seen order. A key that appears on more than one header
/// line accumulates its values in insertion order; callers always see the
/// values for a key as a slice, whether one or many.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Kvlm {
    fields: Vec<(Vec<u8>, Vec<Vec<u8>>)>,
    message: Vec<u8>,
}

impl Kvlm {
    /// Create an empty mapping with an empty message.
    pub fn new() -> Kvlm {
        Kvlm::default()
    }

    /// Append a value for `key`, preserving first-seen key order.
    pub fn push(&mut self, key: &[u8], value: &[u8]) {
        match self.fields.iter_mut().find(|(k, _)| k.as_slice() == key) {
            Some((_, values)) => values.push(value.to_vec()),
            None => self.fields.push((key.to_vec(), vec![value.to_vec()])),
        }
    }

    /// Replace the free-text message.
    pub fn set_message(&mut self, message: &[u8]) {
        self.message = message.to_vec();
    }

    /// All values recorded for `key`, in insertion order, or `None` if the
    /// key never appeared.
    pub fn get(&self, key: &[u8]) -> Option<&[Vec<u8>]> {
        self.fields
            .iter()
            .find(|(k, _)| k.as_slice() == key)
            .map(|(_, values)| values.as_slice())
    }

    /// The free-text message.
    pub fn message(&self) -> &[u8] {
        &self.message
    }

    /// Decode the wire form.
    ///
    /// This is an iterative scan with an explicit cursor: at each step the
    /// positions of the next space and next newline decide whether the cursor
    /// sits on a header line or on the blank separator, in which case the
    /// remainder is the message and the scan is done.
    pub fn decode(data: &[u8]) -> Result<Kvlm, ParseKvlmError> {
        let mut kvlm = Kvlm::new();
        let mut pos = 0;

        loop {
            let space = position(data, pos, b' ');
            let newline = position(data, pos, b'\n');

            let is_header = match (space, newline) {
                (Some(spc), Some(nl)) => spc < nl,
                (Some(_), None) => true,
                (None, _) => false,
            };

            if !is_header {
                // The separator must be a blank line exactly at the cursor.
                match newline {
                    Some(nl) if nl == pos => {
                        kvlm.message = data[nl + 1..].to_vec();
                        return Ok(kvlm);
                    }
                    Some(_) => return Err(ParseKvlmError::MalformedHeader(pos)),
                    None => return Err(ParseKvlmError::MissingMessage),
                }
            }

            let space = match space {
                Some(spc) => spc,
                None => unreachable!(),
            };

            // The value runs to the first newline not followed by a space.
            let mut end = space;
            loop {
                match position(data, end + 1, b'\n') {
                    Some(nl) => {
                        end = nl;
                        if data.get(end + 1) != Some(&b' ') {
                            break;
                        }
                    }
                    None => return Err(ParseKvlmError::MissingMessage),
                }
            }

            let key = &data[pos..space];
            let value = unfold(&data[space + 1..end]);
            kvlm.push(key, &value);

            pos = end + 1;
        }
    }

    /// Encode back to the wire form.
    ///
    /// Round-trip law: `Kvlm::decode(&m.encode()) == Ok(m)` for any mapping
    /// built through [`Kvlm::push`] and [`Kvlm::set_message`].
    pub fn encode(&self) -> Vec<u8> {
        let mut out = Vec::new();

        for (key, values) in &self.fields {
            for value in values {
                out.extend_from_slice(key);
                out.push(b' ');
                fold(value, &mut out);
                out.push(b'\n');
            }
        }

        out.push(b'\n');
        out.extend_from_slice(&self.message);
        out
    }
}

fn position(data: &[u8], from: usize, needle: u8) -> Option<usize> {
    if from > data.len() {
        return None;
    }
    data[from..].iter().position(|b| *b == needle).map(|n| n + from)
}

// Collapse each on-wire "\n " continuation back to a bare "\n".
fn unfold(raw: &[u8]) -> Vec<u8> {
    let mut out = Vec::with_capacity(raw.len());
    let mut i = 0;

    while i < raw.len() {
        out.push(raw[i]);
        if raw[i] == b'\n' && raw.get(i + 1) == Some(&b' ') {
            i += 2;
        } else {
            i += 1;
        }
    }

    out
}

// Escape each "\n" in a value as "\n " so the next line reads as a
// continuation rather than a new header.
fn fold(value: &[u8], out: &mut Vec<u8>) {
    for &b in value {
        out.push(b);
        if b == b'\n' {
            out.push(b' ');
        }
    }
}
