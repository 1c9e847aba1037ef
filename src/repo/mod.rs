//! Repository storage: the on-disk `.git` layout, the loose-object store
//! beneath it, and traversal of the commit graph it contains.
//!
//! The store is deliberately primitive: read, write, exists. Everything
//! above it (refs, staging, porcelain) belongs to collaborating layers
//! that hand this module opaque object IDs.

mod error;
pub use error::{Error, Result};

mod history;
pub use history::History;

mod on_disk;
pub use on_disk::OnDisk;

mod store;
pub use store::{object_id, Store};
