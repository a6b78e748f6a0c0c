//! Wrappers for running the external quantum chemistry programs (ORCA, xtb,
//! CREST, CENSO, ANMR) and the converters they lean on, each in a scratch
//! directory whose results are copied back next to the input.

use std::{error::Error, fmt::Display, io::ErrorKind};

pub mod job;
pub mod program;
pub mod scratch;
pub mod solvent;

pub use job::{Job, locate};
pub use program::{Program, Tools};
pub use scratch::{Policy, Scratch};
pub use solvent::{Flavor, Solvent};


/// build a `Vec<String>` from a list of anything `String: From` accepts
#[macro_export]
macro_rules! string {
    ($($str:expr),* $(,)?) => ({
        vec![$(String::from($str),)*] as Vec<String>
    });
}

#[derive(Debug, PartialEq, Eq)]
pub enum RunError {
    /// the named executable is not configured and not on `PATH`
    NotFound(String),
    /// the program could not be started at all
    Spawn(String, ErrorKind),
    /// the program ran but exited unsuccessfully. `status` is `None` if it was
    /// killed by a signal
    Failed { program: String, status: Option<i32> },
    /// a required input or result file is missing
    FileNotFound(String),
    Io(String, ErrorKind),
    UnknownSolvent(String),
    UnknownNucleus(String),
    /// a program output could not be understood
    Parse(String),
}

impl Display for RunError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RunError::NotFound(p) => {
                write!(f, "`{p}` is not configured and not on PATH")
            }
            RunError::Spawn(p, e) => write!(f, "failed to start `{p}`: {e}"),
            RunError::Failed {
                program,
                status: Some(s),
            } => write!(f, "`{program}` exited with status {s}"),
            RunError::Failed {
                program,
                status: None,
            } => write!(f, "`{program}` was terminated by a signal"),
            RunError::FileNotFound(p) => write!(f, "file `{p}` not found"),
            RunError::Io(p, e) => write!(f, "i/o error on `{p}`: {e}"),
            RunError::UnknownSolvent(s) => write!(f, "unknown solvent `{s}`"),
            RunError::UnknownNucleus(s) => write!(
                f,
                "unknown nucleus `{s}`, expected one of 1H, 13C, 19F, 29Si, 31P"
            ),
            RunError::Parse(s) => write!(f, "failed to parse `{s}`"),
        }
    }
}

impl Error for RunError {}

impl RunError {
    /// wrap an [std::io::Error] from an operation on `path`, turning
    /// `NotFound` into [RunError::FileNotFound]
    pub fn io(path: impl AsRef<std::path::Path>, e: std::io::Error) -> Self {
        let p = path.as_ref().display().to_string();
        match e.kind() {
            ErrorKind::NotFound => RunError::FileNotFound(p),
            k => RunError::Io(p, k),
        }
    }
}

/// the namespace for outputs derived from `path`: its file name with
/// everything from the first `.` dropped, so `mol.xtbopt.xyz` gives `mol`
pub fn namespace(path: impl AsRef<std::path::Path>) -> String {
    let name = path
        .as_ref()
        .file_name()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    match name.split_once('.') {
        Some((stem, _)) => stem.to_owned(),
        None => name,
    }
}
