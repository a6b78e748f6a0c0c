use std::{
    fs,
    path::{Path, PathBuf},
};

use log::{debug, warn};

use crate::RunError;

/// whether a missing file is an error or only worth a warning
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Policy {
    Require,
    Optional,
}

/// A working directory for one program run. It is created on demand and left
/// in place afterwards, since the programs write plenty of files worth
/// inspecting after a failure
#[derive(Clone, Debug)]
pub struct Scratch {
    path: PathBuf,
}

impl Scratch {
    /// create (if needed) the directory `name` inside `parent`
    pub fn create(
        parent: impl AsRef<Path>,
        name: &str,
    ) -> Result<Self, RunError> {
        let path = parent.as_ref().join(name);
        fs::create_dir_all(&path).map_err(|e| RunError::io(&path, e))?;
        debug!("using scratch directory {}", path.display());
        Ok(Self { path })
    }

    /// an existing directory, without creating it
    pub fn existing(path: impl Into<PathBuf>) -> Result<Self, RunError> {
        let path = path.into();
        if !path.is_dir() {
            return Err(RunError::FileNotFound(path.display().to_string()));
        }
        Ok(Self { path })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn join(&self, name: impl AsRef<Path>) -> PathBuf {
        self.path.join(name)
    }

    /// handle a missing `file` according to `policy`, returning whether it
    /// exists
    fn check(file: &Path, policy: Policy) -> Result<bool, RunError> {
        if file.exists() {
            return Ok(true);
        }
        match policy {
            Policy::Require => {
                Err(RunError::FileNotFound(file.display().to_string()))
            }
            Policy::Optional => {
                warn!("{} not found, skipping it", file.display());
                Ok(false)
            }
        }
    }

    /// copy `file` into the scratch directory under the same file name
    pub fn stage(&self, file: &Path, policy: Policy) -> Result<bool, RunError> {
        if !Self::check(file, policy)? {
            return Ok(false);
        }
        let dest = self.join(file_name(file)?);
        fs::copy(file, &dest).map_err(|e| RunError::io(file, e))?;
        Ok(true)
    }

    /// move `file` into the scratch directory, falling back to copy and
    /// delete when a rename is not possible
    pub fn stage_move(
        &self,
        file: &Path,
        policy: Policy,
    ) -> Result<bool, RunError> {
        if !Self::check(file, policy)? {
            return Ok(false);
        }
        let dest = self.join(file_name(file)?);
        if fs::rename(file, &dest).is_err() {
            fs::copy(file, &dest).map_err(|e| RunError::io(file, e))?;
            fs::remove_file(file).map_err(|e| RunError::io(file, e))?;
        }
        Ok(true)
    }

    /// copy each of `names` from the scratch directory into `dest`, returning
    /// the paths of the copies that were made
    pub fn collect<'a>(
        &self,
        names: impl IntoIterator<Item = (&'a str, Policy)>,
        dest: &Path,
    ) -> Result<Vec<PathBuf>, RunError> {
        let mut ret = Vec::new();
        for (name, policy) in names {
            let src = self.join(name);
            if !Self::check(&src, policy)? {
                continue;
            }
            let to = dest.join(name);
            fs::copy(&src, &to).map_err(|e| RunError::io(&src, e))?;
            ret.push(to);
        }
        Ok(ret)
    }
}

fn file_name(file: &Path) -> Result<&std::ffi::OsStr, RunError> {
    file.file_name()
        .ok_or_else(|| RunError::FileNotFound(file.display().to_string()))
}
