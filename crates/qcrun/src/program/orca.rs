use std::path::{Path, PathBuf};

use crate::{Policy, RunError, Scratch, namespace};

use super::{Program, Tools};

/// An ORCA run of an existing input file
#[derive(Clone, Debug)]
pub struct Orca {
    input: PathBuf,
    namespace: String,
    scratch: String,
}

impl Orca {
    /// `input` may be given with or without the `.inp` extension
    pub fn new(input: impl AsRef<Path>, scratch: &str) -> Self {
        let input = input.as_ref();
        let input = if input.extension().is_some_and(|e| e == "inp") {
            input.to_path_buf()
        } else {
            let mut s = input.as_os_str().to_owned();
            s.push(".inp");
            PathBuf::from(s)
        };
        Self {
            namespace: namespace(&input),
            input,
            scratch: scratch.to_owned(),
        }
    }

    pub fn input(&self) -> &Path {
        &self.input
    }
}

impl Program for Orca {
    const NAME: &'static str = "orca";

    fn namespace(&self) -> &str {
        &self.namespace
    }

    fn scratch_dir(&self) -> &str {
        &self.scratch
    }

    fn stage(
        &self,
        _tools: &Tools,
        cwd: &Path,
        scratch: &Scratch,
    ) -> Result<(), RunError> {
        scratch.stage(&cwd.join(&self.input), Policy::Require)?;
        Ok(())
    }

    /// ORCA has to be started with its full path for parallel runs, which
    /// [Tools::get] already provides, and the bare input file name
    fn args(&self) -> Vec<String> {
        let name = self.input.file_name().unwrap_or_default();
        vec![name.to_string_lossy().into_owned()]
    }

    fn results(&self) -> Vec<(String, Policy)> {
        vec![(self.outfile(), Policy::Require)]
    }
}
