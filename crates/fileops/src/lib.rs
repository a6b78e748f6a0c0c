//! File chores that do not involve a quantum chemistry program: joining and
//! cleaning CSV tables, renaming exported notes, searching PDFs, and writing
//! a series of inputs from a template.

use std::{
    error::Error,
    fmt::Display,
    io::ErrorKind,
    path::{Path, PathBuf},
};

use qcrun::RunError;

pub mod omega;
pub mod pdf;
pub mod rename;
pub mod table;
pub mod uvvis;
pub mod wsl;

pub use table::{Table, concat};

#[cfg(test)]
mod tests;

#[derive(Debug, PartialEq, Eq)]
pub enum FileError {
    FileNotFound(String),
    Io(String, ErrorKind),
    /// the contents of the named file are not what was expected
    Format(String, String),
    Run(RunError),
}

impl Display for FileError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FileError::FileNotFound(p) => write!(f, "file `{p}` not found"),
            FileError::Io(p, e) => write!(f, "i/o error on `{p}`: {e}"),
            FileError::Format(p, msg) => write!(f, "{p}: {msg}"),
            FileError::Run(e) => write!(f, "{e}"),
        }
    }
}

impl Error for FileError {}

impl From<RunError> for FileError {
    fn from(value: RunError) -> Self {
        Self::Run(value)
    }
}

impl FileError {
    pub(crate) fn io(path: impl AsRef<Path>, e: std::io::Error) -> Self {
        let p = path.as_ref().display().to_string();
        match e.kind() {
            ErrorKind::NotFound => FileError::FileNotFound(p),
            k => FileError::Io(p, k),
        }
    }
}

pub(crate) fn read_to_string(
    path: impl AsRef<Path>,
) -> Result<String, FileError> {
    let path = path.as_ref();
    std::fs::read_to_string(path).map_err(|e| FileError::io(path, e))
}

/// write `contents` to `path`, creating missing parent directories first
pub(crate) fn write(
    path: impl AsRef<Path>,
    contents: impl AsRef<[u8]>,
) -> Result<(), FileError> {
    let path = path.as_ref();
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .map_err(|e| FileError::io(parent, e))?;
    }
    std::fs::write(path, contents).map_err(|e| FileError::io(path, e))
}

/// the regular files directly in `dir` accepted by `keep`, sorted by name
pub fn files_in(
    dir: impl AsRef<Path>,
    keep: impl Fn(&Path) -> bool,
) -> Result<Vec<PathBuf>, FileError> {
    let dir = dir.as_ref();
    let entries = std::fs::read_dir(dir).map_err(|e| FileError::io(dir, e))?;
    let mut ret = Vec::new();
    for entry in entries {
        let path = entry.map_err(|e| FileError::io(dir, e))?.path();
        if path.is_file() && keep(&path) {
            ret.push(path);
        }
    }
    ret.sort();
    Ok(ret)
}

/// whether the extension of `path` is `ext`, ignoring case
pub fn has_extension(path: &Path, ext: &str) -> bool {
    path.extension()
        .is_some_and(|e| e.to_string_lossy().eq_ignore_ascii_case(ext))
}
