//! oxgit implements the core data model for a git-style version-control
//! system: a content-addressable store of immutable objects (blobs, trees,
//! and commits), the wire codecs for each object kind, and a walker over
//! the commit graph those objects form.
//!
//! The surrounding porcelain (staging, merging, checkout, branch and ref
//! management, transport) is out of scope here and expected to live in
//! collaborating crates that call into this one.

#![deny(warnings)]

pub mod object;
pub mod repo;
