//! End-to-end exercises of the object store and the commit graph built on
//! top of it, against a real on-disk repository layout.

use oxgit::object::{Id, Kind, Kvlm, Object, TreeEntry};
use oxgit::repo::{Error, History, OnDisk, Result, Store};

use tempfile::{tempdir, TempDir};

fn temp_repo() -> (TempDir, OnDisk) {
    let dir = tempdir().unwrap();
    let repo = OnDisk::init(dir.path()).unwrap();
    (dir, repo)
}

#[test]
fn blob_round_trip_through_repo() {
    let (_dir, repo) = temp_repo();
    let store = repo.store();

    let id = store.put(Kind::Blob, b"what is up, doc?", true).unwrap();
    assert_eq!(id.to_string(), "bd9dbf5aae1a3862dd1526723246b20206e5fc37");

    // The fan-out prefix is the first two characters of the full hex ID.
    let hex = id.to_string();
    assert!(repo.objects_dir().join(&hex[..2]).join(&hex[2..]).is_file());

    let (kind, payload) = store.get(&id).unwrap();
    assert_eq!(kind, Kind::Blob);
    assert_eq!(payload, b"what is up, doc?".to_vec());
}

#[test]
fn every_kind_round_trips() {
    let (_dir, repo) = temp_repo();
    let store = repo.store();

    let blob = Object::Blob(b"file contents\n".to_vec());
    let blob_id = store.put_object(&blob, true).unwrap();

    let tree = Object::Tree(vec![TreeEntry {
        mode: b"100644".to_vec(),
        name: b"file.txt".to_vec(),
        id: blob_id,
    }]);
    let tree_id = store.put_object(&tree, true).unwrap();

    let mut kvlm = Kvlm::new();
    kvlm.push(b"tree", tree_id.to_string().as_bytes());
    kvlm.push(b"author", b"A. U. Thor <author@localhost> 1 +0000");
    kvlm.set_message(b"first\n");
    let commit = Object::Commit(kvlm);
    let commit_id = store.put_object(&commit, true).unwrap();

    assert_eq!(store.get_object(&blob_id).unwrap(), blob);
    assert_eq!(store.get_object(&tree_id).unwrap(), tree);
    assert_eq!(store.get_object(&commit_id).unwrap(), commit);
}

#[test]
fn identical_content_yields_identical_id() {
    let (_dir, repo) = temp_repo();
    let store = repo.store();

    let a = store.put(Kind::Blob, b"stable", true).unwrap();
    let b = store.put(Kind::Blob, b"stable", true).unwrap();
    assert_eq!(a, b);

    // A second store over the same directory computes the same address.
    let other = Store::new(repo.objects_dir());
    assert!(other.contains(&a));
}

#[test]
fn dry_run_then_persist() {
    let (_dir, repo) = temp_repo();
    let store = repo.store();

    let dry = store.put(Kind::Blob, b"maybe later", false).unwrap();
    assert!(!store.contains(&dry));

    let wet = store.put(Kind::Blob, b"maybe later", true).unwrap();
    assert_eq!(dry, wet);
    assert!(store.contains(&wet));
}

#[test]
fn history_over_stored_commits() {
    let (_dir, repo) = temp_repo();
    let store = repo.store();

    let tree_id = store.put_object(&Object::Tree(Vec::new()), true).unwrap();

    let commit = |parents: &[Id], msg: &str| -> Id {
        let mut kvlm = Kvlm::new();
        kvlm.push(b"tree", tree_id.to_string().as_bytes());
        for p in parents {
            kvlm.push(b"parent", p.to_string().as_bytes());
        }
        kvlm.set_message(msg.as_bytes());
        store.put(Kind::Commit, &kvlm.encode(), true).unwrap()
    };

    let root = commit(&[], "root");
    let a = commit(&[root], "a");
    let b = commit(&[root], "b");
    let merge = commit(&[a, b], "merge");

    let edges: Vec<(Id, Id)> = History::walk(&store, merge)
        .collect::<Result<_>>()
        .unwrap();

    // merge->a, merge->b, a->root, b->root; root expanded once.
    assert_eq!(edges.len(), 4);
    assert_eq!(edges.iter().filter(|(c, _)| *c == merge).count(), 2);
    assert_eq!(edges.iter().filter(|(_, p)| *p == root).count(), 2);
}

#[test]
fn missing_object_is_not_found() {
    let (_dir, repo) = temp_repo();
    let store = repo.store();

    let ghost = Id::from_hex("0123456789abcdef0123456789abcdef01234567").unwrap();
    assert!(!store.contains(&ghost));

    match store.get(&ghost).unwrap_err() {
        Error::NotFound(id) => assert_eq!(id, ghost),
        other => panic!("expected NotFound, got {:?}", other),
    }
}
