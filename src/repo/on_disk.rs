//! A repository that stores content on the local file system, using the
//! same `.git` folder format as command-line git so that results may be
//! compared for similar operations.

use std::fs;
use std::path::{Path, PathBuf};

use super::{Error, Result, Store};

/// An on-disk repository: a working directory with a `.git` directory
/// inside it.
///
/// This type owns repository location and layout only. Object access goes
/// through the [`Store`] it hands out; ref and name resolution live in
/// collaborating layers.
#[derive(Debug)]
pub struct OnDisk {
    work_dir: PathBuf,
    git_dir: PathBuf,
}

impl OnDisk {
    /// Open an existing on-disk repository.
    ///
    /// `work_dir` should be the top-level working directory with a `.git`
    /// directory at it. Use [`OnDisk::init`] to create an empty repository.
    /// The repository's `config` must exist and, if it declares a
    /// `repositoryformatversion`, declare version 0.
    pub fn new<P: AsRef<Path>>(work_dir: P) -> Result<Self> {
        let work_dir = work_dir.as_ref().to_path_buf();
        if !work_dir.exists() {
            return Err(Error::WorkDirDoesntExist(work_dir));
        }

        let git_dir = work_dir.join(".git");
        if !git_dir.exists() {
            return Err(Error::GitDirDoesntExist(git_dir));
        }

        check_config(&git_dir)?;

        Ok(OnDisk { work_dir, git_dir })
    }

    /// Creates a new, empty repository on the local file system.
    ///
    /// Analogous to [`git init`](https://git-scm.com/docs/git-init).
    pub fn init<P: AsRef<Path>>(work_dir: P) -> Result<Self> {
        let work_dir = work_dir.as_ref();
        let git_dir = work_dir.join(".git");
        if git_dir.exists() {
            return Err(Error::GitDirShouldntExist(git_dir));
        }

        fs::create_dir_all(&git_dir)?;

        create_config(&git_dir)?;
        create_description(&git_dir)?;
        create_head(&git_dir)?;
        create_branches_dir(&git_dir)?;
        create_objects_dir(&git_dir)?;
        create_refs_dirs(&git_dir)?;

        Ok(OnDisk {
            work_dir: work_dir.to_path_buf(),
            git_dir,
        })
    }

    /// Return the working directory for this repo.
    pub fn work_dir(&self) -> &Path {
        self.work_dir.as_path()
    }

    /// Return the path to the `.git` directory.
    pub fn git_dir(&self) -> &Path {
        self.git_dir.as_path()
    }

    /// Return the path under which loose objects fan out.
    pub fn objects_dir(&self) -> PathBuf {
        self.git_dir.join("objects")
    }

    /// The loose-object store for this repository.
    pub fn store(&self) -> Store {
        Store::new(self.objects_dir())
    }
}

fn check_config(git_dir: &Path) -> Result<()> {
    let config_path = git_dir.join("config");
    if !config_path.exists() {
        return Err(Error::ConfigMissing(config_path));
    }

    let config = fs::read_to_string(&config_path)?;
    for line in config.lines() {
        if let Some(rest) = line.trim().strip_prefix("repositoryformatversion") {
            let version = rest.trim_start().trim_start_matches('=').trim();
            if version != "0" {
                return Err(Error::UnsupportedFormatVersion(version.to_string()));
            }
        }
    }

    Ok(())
}

fn create_config(git_dir: &Path) -> Result<()> {
    let config_path = git_dir.join("config");
    let config_txt =
        "[core]\n\trepositoryformatversion = 0\n\tfilemode = false\n\tbare = false\n";

    fs::write(config_path, config_txt)?;
    Ok(())
}

fn create_description(git_dir: &Path) -> Result<()> {
    let desc_path = git_dir.join("description");
    let desc_txt = "Unnamed repository; edit this file 'description' to name the repository.\n";

    fs::write(desc_path, desc_txt)?;
    Ok(())
}

fn create_head(git_dir: &Path) -> Result<()> {
    let head_path = git_dir.join("HEAD");
    let head_txt = "ref: refs/heads/master\n";

    fs::write(head_path, head_txt)?;
    Ok(())
}

fn create_branches_dir(git_dir: &Path) -> Result<()> {
    fs::create_dir_all(git_dir.join("branches"))?;
    Ok(())
}

fn create_objects_dir(git_dir: &Path) -> Result<()> {
    fs::create_dir_all(git_dir.join("objects"))?;
    Ok(())
}

fn create_refs_dirs(git_dir: &Path) -> Result<()> {
    fs::create_dir_all(git_dir.join("refs/heads"))?;
    fs::create_dir_all(git_dir.join("refs/tags"))?;
    Ok(())
}
