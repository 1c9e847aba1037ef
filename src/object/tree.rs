//! Codec for the packed binary listing inside tree objects.
//!
//! Each entry is `mode SP name NUL hash`, where mode is 5 or 6 ASCII digits,
//! name is arbitrary NUL-free bytes, and hash is the raw 20-byte object ID of
//! the entry's target. Entries are packed back to back with no separators.

use thiserror::Error;

use super::id::Id;

/// An error which can be returned when decoding a tree payload.
#[derive(Clone, Copy, Debug, Eq, Error, PartialEq)]
pub enum ParseTreeError {
    /// No space terminates the mode field of the entry at this offset.
    #[error("tree entry at offset {0} has no space after the mode field")]
    MissingMode(usize),

    /// The mode field has the wrong width.
    #[error("tree entry at offset {offset} has a {len}-byte mode (expected 5 or 6)")]
    BadModeWidth { offset: usize, len: usize },

    /// No NUL terminates the name of the entry at this offset.
    #[error("tree entry name at offset {0} is not NUL-terminated")]
    UnterminatedName(usize),

    /// The input ends before the entry's 20-byte object ID.
    #[error("tree entry at offset {0} is truncated before its object ID")]
    TruncatedId(usize),
}

/// One `(mode, name, target)` entry in a tree object.
///
/// The target ID is held in its raw 20-byte form; hex appears only when an
/// [`Id`] is displayed.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct TreeEntry {
    pub mode: Vec<u8>,
    pub name: Vec<u8>,
    pub id: Id,
}

/// Decode a tree payload into its entries, in the order they appear.
///
/// No ordering is imposed or checked; entries round-trip through
/// [`encode`] exactly as given.
pub fn decode(data: &[u8]) -> Result<Vec<TreeEntry>, ParseTreeError> {
    let mut entries = Vec::new();
    let mut pos = 0;

    while pos < data.len() {
        let space = data[pos..]
            .iter()
            .position(|b| *b == b' ')
            .map(|n| n + pos)
            .ok_or(ParseTreeError::MissingMode(pos))?;

        let mode_len = space - pos;
        if mode_len != 5 && mode_len != 6 {
            return Err(ParseTreeError::BadModeWidth {
                offset: pos,
                len: mode_len,
            });
        }

        let nul = data[space + 1..]
            .iter()
            .position(|b| *b == 0)
            .map(|n| n + space + 1)
            .ok_or(ParseTreeError::UnterminatedName(space + 1))?;

        if data.len() < nul + 1 + 20 {
            return Err(ParseTreeError::TruncatedId(nul + 1));
        }

        let mut raw = [0u8; 20];
        raw.copy_from_slice(&data[nul + 1..nul + 21]);

        entries.push(TreeEntry {
            mode: data[pos..space].to_vec(),
            name: data[space + 1..nul].to_vec(),
            id: Id::from(raw),
        });

        pos = nul + 21;
    }

    Ok(entries)
}

/// Encode entries back into the packed payload, in sequence order.
pub fn encode(entries: &[TreeEntry]) -> Vec<u8> {
    let mut out = Vec::new();

    for entry in entries {
        out.extend_from_slice(&entry.mode);
        out.push(b' ');
        out.extend_from_slice(&entry.name);
        out.push(0);
        out.extend_from_slice(entry.id.as_bytes());
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw_entry(mode: &[u8], name: &[u8], id_byte: u8) -> Vec<u8> {
        let mut e = mode.to_vec();
        e.push(b' ');
        e.extend_from_slice(name);
        e.push(0);
        e.extend_from_slice(&[id_byte; 20]);
        e
    }

    #[test]
    fn decode_two_entries() {
        let mut data = raw_entry(b"100644", b"README.md", 0xab);
        data.extend_from_slice(&raw_entry(b"40000", b"src", 0xcd));

        let entries = decode(&data).unwrap();
        assert_eq!(entries.len(), 2);

        assert_eq!(entries[0].mode, b"100644".to_vec());
        assert_eq!(entries[0].name, b"README.md".to_vec());
        assert_eq!(
            entries[0].id.to_string(),
            "abababababababababababababababababababab"
        );

        assert_eq!(entries[1].mode, b"40000".to_vec());
        assert_eq!(entries[1].name, b"src".to_vec());
        assert_eq!(entries[1].id.as_bytes(), &[0xcd; 20][..]);
    }

    #[test]
    fn empty_payload_is_empty_tree() {
        assert_eq!(decode(b"").unwrap(), Vec::new());
        assert_eq!(encode(&[]), Vec::new());
    }

    #[test]
    fn round_trip_preserves_order() {
        // Deliberately not name-sorted; the codec must not reorder.
        let mut data = raw_entry(b"100644", b"zebra", 0x01);
        data.extend_from_slice(&raw_entry(b"100755", b"apple", 0x02));
        data.extend_from_slice(&raw_entry(b"40000", b"mango", 0x03));

        let entries = decode(&data).unwrap();
        assert_eq!(encode(&entries), data);
        assert_eq!(decode(&encode(&entries)).unwrap(), entries);
    }

    #[test]
    fn leading_zero_hash_round_trips() {
        let mut id_bytes = [0u8; 20];
        id_bytes[19] = 0x07;

        let entry = TreeEntry {
            mode: b"100644".to_vec(),
            name: b"sparse".to_vec(),
            id: Id::from(id_bytes),
        };

        let decoded = decode(&encode(&[entry.clone()])).unwrap();
        assert_eq!(decoded, vec![entry]);
        assert_eq!(
            decoded[0].id.to_string(),
            "0000000000000000000000000000000000000007"
        );
    }

    #[test]
    fn error_missing_mode_space() {
        let err = decode(b"100644").unwrap_err();
        assert_eq!(err, ParseTreeError::MissingMode(0));
    }

    #[test]
    fn error_bad_mode_width() {
        let data = raw_entry(b"1006440", b"file", 0x11);
        let err = decode(&data).unwrap_err();
        assert_eq!(err, ParseTreeError::BadModeWidth { offset: 0, len: 7 });

        let data = raw_entry(b"1234", b"file", 0x11);
        assert_eq!(
            decode(&data).unwrap_err(),
            ParseTreeError::BadModeWidth { offset: 0, len: 4 }
        );
    }

    #[test]
    fn error_unterminated_name() {
        let err = decode(b"100644 no-nul-here").unwrap_err();
        assert_eq!(err, ParseTreeError::UnterminatedName(7));
    }

    #[test]
    fn error_truncated_id() {
        let mut data = b"100644 file\0".to_vec();
        data.extend_from_slice(&[0xee; 19]);

        let err = decode(&data).unwrap_err();
        assert_eq!(err, ParseTreeError::TruncatedId(12));
        assert_eq!(
            err.to_string(),
            "tree entry at offset 12 is truncated before its object ID"
        );
    }
}
