use std::path::{Path, PathBuf};

use log::info;

use crate::RunError;

use super::{Program, Tools, anmr::Anmr, censo::Censo, crest::Crest};

/// The full NMR workflow: a CREST conformer search, CENSO refinement of the
/// ensemble, and the ANMR spectrum simulation
#[derive(Clone, Debug)]
pub struct NmrPipeline {
    pub crest: Crest,
    pub censo: Censo,
    pub anmr: Anmr,
}

impl NmrPipeline {
    /// run each stage in turn in `cwd`, stopping at the first failure
    pub fn run(
        &self,
        tools: &Tools,
        cwd: &Path,
    ) -> Result<Vec<PathBuf>, RunError> {
        info!("starting CREST for {}", self.crest.namespace());
        self.crest.run(tools, cwd)?;
        info!("starting CENSO for {}", self.censo.namespace());
        self.censo.run(tools, cwd)?;
        info!("starting ANMR for {}", self.anmr.namespace());
        self.anmr.run(tools, cwd)
    }
}
