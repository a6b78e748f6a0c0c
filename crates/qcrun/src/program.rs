use std::{
    collections::HashMap,
    path::{Path, PathBuf},
};

use crate::{Job, Policy, RunError, Scratch, locate};

pub mod anmr;
pub mod censo;
pub mod crest;
pub mod mapspc;
pub mod nmr;
pub mod obabel;
pub mod orca;
pub mod xtb;

/// Where to find each external executable. Names without a configured path
/// are looked up on `PATH` under their default executable name
#[derive(Clone, Debug, Default)]
pub struct Tools {
    paths: HashMap<String, PathBuf>,
}

impl Tools {
    pub fn new(paths: HashMap<String, PathBuf>) -> Self {
        Self { paths }
    }

    /// configure the executable for `name`
    pub fn with(mut self, name: &str, path: impl Into<PathBuf>) -> Self {
        self.paths.insert(name.to_owned(), path.into());
        self
    }

    /// the default executable name of the tool called `name`
    pub fn default_exe(name: &str) -> &str {
        match name {
            "nmrplot" => "nmrplot.py",
            n => n,
        }
    }

    pub fn get(&self, name: &str) -> Result<PathBuf, RunError> {
        match self.paths.get(name) {
            Some(p) => locate(&p.to_string_lossy()),
            None => locate(Self::default_exe(name)),
        }
    }
}

/// A program run in its own scratch directory. The default [Program::run]
/// stages the inputs, runs [Program::NAME] with [Program::args] and standard
/// output redirected to [Program::outfile], calls [Program::finish], and
/// copies [Program::results] back to the working directory
pub trait Program {
    /// the key used to find the executable in [Tools]
    const NAME: &'static str;

    /// the base name for output files
    fn namespace(&self) -> &str;

    /// return `self.namespace()` with ".out" appended
    fn outfile(&self) -> String {
        self.namespace().to_owned() + ".out"
    }

    /// the name of the scratch directory, relative to the working directory
    fn scratch_dir(&self) -> &str;

    /// copy or move the inputs from `cwd` into `scratch` and write any
    /// generated input files
    fn stage(
        &self,
        tools: &Tools,
        cwd: &Path,
        scratch: &Scratch,
    ) -> Result<(), RunError>;

    fn args(&self) -> Vec<String>;

    /// post-processing inside `scratch` after a successful run
    fn finish(
        &self,
        _tools: &Tools,
        _scratch: &Scratch,
    ) -> Result<(), RunError> {
        Ok(())
    }

    /// the files to copy back from the scratch directory
    fn results(&self) -> Vec<(String, Policy)> {
        Vec::new()
    }

    fn job(&self, tools: &Tools, scratch: &Scratch) -> Result<Job, RunError> {
        Ok(Job::new(tools.get(Self::NAME)?)
            .args(self.args())
            .dir(scratch.path())
            .stdout_to(self.outfile()))
    }

    /// run `self` in a scratch directory under `cwd`, returning the paths of
    /// the results copied back into `cwd`
    fn run(&self, tools: &Tools, cwd: &Path) -> Result<Vec<PathBuf>, RunError> {
        let scratch = Scratch::create(cwd, self.scratch_dir())?;
        self.stage(tools, cwd, &scratch)?;
        self.job(tools, &scratch)?.run()?;
        self.finish(tools, &scratch)?;
        let results = self.results();
        scratch.collect(results.iter().map(|(n, p)| (n.as_str(), *p)), cwd)
    }
}
