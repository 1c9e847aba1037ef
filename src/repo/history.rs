//! Walks the commit graph backward from a starting commit along parent
//! links, emitting child-to-parent edges.

use std::collections::HashSet;

use crate::object::{Id, Object};

use super::{Error, Result, Store};

/// A lazy walk over the ancestry of one commit.
///
/// Each item is a `(child, parent)` edge. Every commit is fetched and
/// expanded at most once, so a diamond-shaped history visits the shared
/// ancestor a single time, and a malformed cycle in storage still
/// terminates. The visited set belongs to this walk alone.
pub struct History<'a> {
    store: &'a Store,
    pending: Vec<Id>,
    ready: Vec<(Id, Id)>,
    visited: HashSet<Id>,
}

impl<'a> History<'a> {
    /// Begin a walk at `start`, which must name a commit in `store`.
    pub fn walk(store: &'a Store, start: Id) -> History<'a> {
        History {
            store,
            pending: vec![start],
            ready: Vec::new(),
            visited: HashSet::new(),
        }
    }

    fn expand(&mut self, id: Id) -> Result<()> {
        let kvlm = match self.store.get_object(&id)? {
            Object::Commit(kvlm) => kvlm,
            other => {
                return Err(Error::Corrupt {
                    id,
                    detail: format!("expected a commit, found a {}", other.kind()),
                });
            }
        };

        // No "parent" key means a root commit; the branch ends here.
        // One value or many (a merge) are handled uniformly.
        if let Some(parents) = kvlm.get(b"parent") {
            for raw in parents {
                let parent = Id::from_hex(raw).map_err(|err| Error::Corrupt {
                    id,
                    detail: format!("unparseable parent id: {}", err),
                })?;

                self.ready.push((id, parent));
                self.pending.push(parent);
            }
        }

        Ok(())
    }
}

impl<'a> Iterator for History<'a> {
    type Item = Result<(Id, Id)>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(edge) = self.ready.pop() {
                return Some(Ok(edge));
            }

            let id = self.pending.pop()?;
            if !self.visited.insert(id) {
                continue;
            }

            if let Err(err) = self.expand(id) {
                return Some(Err(err));
            }
        }
    }
}
