//! The loose-object store: maps a content hash to compressed object bytes
//! on disk, fanned out under a 2-character directory prefix.

use std::fs;
use std::io::{self, Read, Write};
use std::path::PathBuf;

use flate2::read::ZlibDecoder;
use flate2::write::ZlibEncoder;
use flate2::Compression;
use sha1::{Digest, Sha1};
use tempfile::NamedTempFile;

use crate::object::{Id, Kind, Object};

use super::{Error, Result};

/// A store of loose objects rooted at an objects directory.
///
/// The store is append-only and content-addressed: an object's ID is the
/// SHA-1 of its envelope (`kind SP length NUL payload`), so identical
/// content always lands at the identical path and nothing is ever mutated
/// or deleted. Each call performs its own blocking file I/O; there is no
/// caching layer.
#[derive(Debug)]
pub struct Store {
    objects_dir: PathBuf,
}

impl Store {
    /// Create a store rooted at `objects_dir`.
    ///
    /// The directory itself is expected to exist (the repository-location
    /// layer owns that); fan-out subdirectories are created on demand.
    pub fn new<P: Into<PathBuf>>(objects_dir: P) -> Store {
        Store {
            objects_dir: objects_dir.into(),
        }
    }

    /// Compute the ID `payload` would be stored under as `kind` and, when
    /// `persist` is true, write the compressed envelope into the store.
    ///
    /// The ID is returned whether or not anything was written, so callers
    /// can use `persist = false` as a dry run. Writing an object that is
    /// already present succeeds without touching it: content addressing
    /// guarantees the existing file holds the identical bytes.
    pub fn put(&self, kind: Kind, payload: &[u8], persist: bool) -> Result<Id> {
        let envelope = envelope(kind, payload);
        let id = hash(&envelope);

        if !persist {
            return Ok(id);
        }

        let hex = id.to_string();
        let dir = self.objects_dir.join(&hex[..2]);
        let path = dir.join(&hex[2..]);

        if path.exists() {
            return Ok(id);
        }

        fs::create_dir_all(&dir)?;

        // Write to a temp file in the same directory, then rename into
        // place, so a concurrent reader never observes a partial object.
        let mut temp = NamedTempFile::new_in(&dir)?;
        {
            let mut encoder = ZlibEncoder::new(temp.as_file_mut(), Compression::default());
            encoder.write_all(&envelope)?;
            encoder.finish()?;
        }
        temp.persist(&path).map_err(|e| e.error)?;

        Ok(id)
    }

    /// Read the object with this ID, returning its kind and payload.
    pub fn get(&self, id: &Id) -> Result<(Kind, Vec<u8>)> {
        let compressed = match fs::read(self.object_path(id)) {
            Ok(bytes) => bytes,
            Err(ref err) if err.kind() == io::ErrorKind::NotFound => {
                return Err(Error::NotFound(*id));
            }
            Err(err) => return Err(err.into()),
        };

        let mut envelope = Vec::new();
        let mut decoder = ZlibDecoder::new(compressed.as_slice());
        decoder
            .read_to_end(&mut envelope)
            .map_err(|err| corrupt(*id, format!("inflate failed: {}", err)))?;

        parse_envelope(*id, &envelope)
    }

    /// True if an object with this ID is present, without decompressing it.
    pub fn contains(&self, id: &Id) -> bool {
        self.object_path(id).is_file()
    }

    /// Encode a decoded object and store it. See [`Store::put`].
    pub fn put_object(&self, object: &Object, persist: bool) -> Result<Id> {
        self.put(object.kind(), &object.encode(), persist)
    }

    /// Read the object with this ID and decode it as its declared kind.
    pub fn get_object(&self, id: &Id) -> Result<Object> {
        let (kind, payload) = self.get(id)?;
        Object::decode(kind, &payload).map_err(|source| Error::Malformed { id: *id, source })
    }

    fn object_path(&self, id: &Id) -> PathBuf {
        let hex = id.to_string();
        self.objects_dir.join(&hex[..2]).join(&hex[2..])
    }
}

/// Compute the ID `payload` would be stored under as `kind`, without
/// touching any store.
pub fn object_id(kind: Kind, payload: &[u8]) -> Id {
    hash(&envelope(kind, payload))
}

fn envelope(kind: Kind, payload: &[u8]) -> Vec<u8> {
    let mut out = Vec::with_capacity(payload.len() + 16);
    out.extend_from_slice(kind.to_string().as_bytes());
    out.push(b' ');
    out.extend_from_slice(payload.len().to_string().as_bytes());
    out.push(0);
    out.extend_from_slice(payload);
    out
}

fn hash(envelope: &[u8]) -> Id {
    let mut hasher = Sha1::new();
    hasher.update(envelope);

    let mut raw = [0u8; 20];
    raw.copy_from_slice(&hasher.finalize()[..]);
    Id::from(raw)
}

fn parse_envelope(id: Id, envelope: &[u8]) -> Result<(Kind, Vec<u8>)> {
    let space = envelope
        .iter()
        .position(|b| *b == b' ')
        .ok_or_else(|| corrupt(id, "envelope has no kind tag".to_string()))?;

    let nul = envelope[space..]
        .iter()
        .position(|b| *b == 0)
        .map(|n| n + space)
        .ok_or_else(|| corrupt(id, "envelope has no length terminator".to_string()))?;

    let kind = Kind::from_tag(&envelope[..space])
        .map_err(|source| Error::UnknownKind { id, source })?;

    let declared: usize = std::str::from_utf8(&envelope[space + 1..nul])
        .ok()
        .and_then(|s| s.parse().ok())
        .ok_or_else(|| corrupt(id, "envelope length is not a decimal number".to_string()))?;

    let payload = &envelope[nul + 1..];
    if declared != payload.len() {
        return Err(corrupt(
            id,
            format!(
                "envelope declares {} payload bytes but {} are present",
                declared,
                payload.len()
            ),
        ));
    }

    Ok((kind, payload.to_vec()))
}

fn corrupt(id: Id, detail: String) -> Error {
    Error::Corrupt { id, detail }
}
