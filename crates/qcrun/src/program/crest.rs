use std::path::{Path, PathBuf};

use crate::{Flavor, Policy, RunError, Scratch, Solvent, namespace, string};

use super::{Program, Tools};

/// the CREST outputs needed by a subsequent CENSO run
pub const CREST_RESULTS: [&str; 4] =
    ["crest_conformers.xyz", "coord", "anmr_nucinfo", "anmr_rotamer"];

/// A CREST conformer search in NMR mode
#[derive(Clone, Debug)]
pub struct Crest {
    pub xyz: PathBuf,
    pub namespace: String,
    pub solvent: Option<Solvent>,
    pub threads: usize,
    pub scratch: String,
}

impl Crest {
    pub fn new(xyz: impl Into<PathBuf>) -> Self {
        let xyz = xyz.into();
        Self {
            namespace: namespace(&xyz),
            xyz,
            solvent: None,
            threads: 4,
            scratch: "crest_tmp".to_owned(),
        }
    }
}

impl Program for Crest {
    const NAME: &'static str = "crest";

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
        scratch.stage(&cwd.join(&self.xyz), Policy::Require)?;
        Ok(())
    }

    fn args(&self) -> Vec<String> {
        let xyz = self.xyz.file_name().unwrap_or_default();
        let mut ret = string![xyz.to_string_lossy(), "--gfn2", "--nmr"];
        if let Some(solvent) = self.solvent {
            ret.extend(string!["--alpb", solvent.name_for(Flavor::Crest)]);
        }
        ret.extend(string!["-T", self.threads.to_string()]);
        ret
    }

    fn results(&self) -> Vec<(String, Policy)> {
        CREST_RESULTS
            .iter()
            .map(|&s| (s.to_owned(), Policy::Optional))
            .collect()
    }
}
