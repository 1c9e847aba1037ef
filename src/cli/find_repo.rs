use std::env;
use std::error::Error;
use std::path::Path;

use oxgit::repo::OnDisk;

// Discover a repo starting from the given path, walking up through parent
// directories the way command-line git does. Handles only the simple case
// where a `.git` directory is nested directly within some ancestor.
pub(crate) fn from_path(path: &Path) -> Result<OnDisk, Box<dyn Error>> {
    let mut dir = path.to_path_buf();

    loop {
        if dir.join(".git").is_dir() {
            return Ok(OnDisk::new(&dir)?);
        }

        if !dir.pop() {
            return Err("not a repository (or any of the parent directories): .git".into());
        }
    }
}

// Discover a repo starting from the current working directory.
pub(crate) fn from_current_dir() -> Result<OnDisk, Box<dyn Error>> {
    let dir = env::current_dir()?;
    from_path(&dir)
}
