use std::{
    fs,
    path::{Path, PathBuf},
};

use log::info;

use crate::{Flavor, Policy, RunError, Scratch, Solvent, namespace, string};

use super::{Program, Tools, obabel};

/// An xtb optimization plus frequency calculation (`--ohess`)
#[derive(Clone, Debug)]
pub struct Xtb {
    pub xyz: PathBuf,
    pub namespace: String,
    pub charge: isize,
    pub parallel: usize,
    pub verbose: bool,
    pub lmo: bool,
    pub molden: bool,
    pub solvent: Option<Solvent>,
    /// also export the optimized geometry in Tinker XYZ format for Chem3D
    pub tinker: bool,
    pub scratch: String,
}

impl Xtb {
    /// an xtb run on `xyz` with the namespace taken from its file name
    pub fn new(xyz: impl Into<PathBuf>) -> Self {
        let xyz = xyz.into();
        Self {
            namespace: namespace(&xyz),
            xyz,
            charge: 0,
            parallel: 1,
            verbose: false,
            lmo: false,
            molden: false,
            solvent: None,
            tinker: false,
            scratch: "temp1".to_owned(),
        }
    }

    fn file(&self, suffix: &str) -> String {
        format!("{}{suffix}", self.namespace)
    }
}

impl Program for Xtb {
    const NAME: &'static str = "xtb";

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
        let mut ret = string![
            xyz.to_string_lossy(),
            "--ohess",
            "--chrg",
            self.charge.to_string()
        ];
        if self.parallel > 1 {
            ret.extend(string!["--parallel", self.parallel.to_string()]);
        }
        ret.extend(string!["--namespace", self.namespace.as_str()]);
        for (set, flag) in [
            (self.verbose, "--verbose"),
            (self.lmo, "--lmo"),
            (self.molden, "--molden"),
        ] {
            if set {
                ret.push(flag.to_owned());
            }
        }
        if let Some(solvent) = self.solvent {
            ret.extend(string!["--alpb", solvent.name_for(Flavor::Xtb)]);
        }
        ret
    }

    fn finish(&self, tools: &Tools, scratch: &Scratch) -> Result<(), RunError> {
        let dir = scratch.path();
        obabel::convert(
            tools,
            dir,
            &self.file(".g98.out"),
            "g98",
            "molden",
            &self.file("_FREQ.molden"),
        )?;

        let log = scratch.join(self.file(".xtbopt.log"));
        let trj = scratch.join(self.file(".xtbopt.trj.xyz"));
        if trj.exists() {
            fs::remove_file(&trj).map_err(|e| RunError::io(&trj, e))?;
        }
        fs::rename(&log, &trj).map_err(|e| RunError::io(&log, e))?;

        if self.tinker {
            info!("writing Tinker XYZ for {}", self.namespace);
            obabel::convert(
                tools,
                dir,
                &self.file(".xtbopt.xyz"),
                "xyz",
                "txyz",
                &self.file("_tinker.xyz"),
            )?;
        }
        Ok(())
    }

    fn results(&self) -> Vec<(String, Policy)> {
        let mut ret: Vec<_> =
            [".out", "_FREQ.molden", ".xtbopt.trj.xyz", ".xtbopt.xyz"]
                .into_iter()
                .map(|s| (self.file(s), Policy::Require))
                .collect();
        if self.tinker {
            ret.push((self.file("_tinker.xyz"), Policy::Require));
        }
        ret
    }
}
