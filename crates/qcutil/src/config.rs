//! Optional settings for qcutil, read from a TOML file like
//!
//! ```toml
//! scratch = "temp1"
//!
//! [programs]
//! orca = "/opt/orca/orca"
//!
//! [censo]
//! orca = "/opt/orca"
//! orca_version = "5.0.4"
//! ```

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use log::debug;
use qcrun::{Tools, program::censo::CensoPrograms};
use serde::{Deserialize, Serialize};


/// the environment variable naming a configuration file
pub const ENV_VAR: &str = "QCUTIL_CONFIG";

/// the configuration file looked for in the working directory
pub const DEFAULT_FILE: &str = "qcutil.toml";

/// Paths to the external executables. Programs left unset are looked up on
/// `PATH`
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Programs {
    pub orca: Option<PathBuf>,
    pub xtb: Option<PathBuf>,
    pub crest: Option<PathBuf>,
    pub censo: Option<PathBuf>,
    pub anmr: Option<PathBuf>,
    pub obabel: Option<PathBuf>,
    pub orca_mapspc: Option<PathBuf>,
    pub nmrplot: Option<PathBuf>,
    pub pdftotext: Option<PathBuf>,
}

impl Programs {
    fn entries(&self) -> [(&'static str, &Option<PathBuf>); 9] {
        [
            ("orca", &self.orca),
            ("xtb", &self.xtb),
            ("crest", &self.crest),
            ("censo", &self.censo),
            ("anmr", &self.anmr),
            ("obabel", &self.obabel),
            ("orca_mapspc", &self.orca_mapspc),
            ("nmrplot", &self.nmrplot),
            ("pdftotext", &self.pdftotext),
        ]
    }
}

#[derive(Deserialize, Debug, Default, PartialEq)]
#[serde(deny_unknown_fields)]
struct RawConfig {
    /// Paths to the external programs, keyed by the program name. Any program
    /// not given here is searched for on PATH.
    programs: Option<Programs>,

    /// The program paths and ORCA version written into the `.censorc` file of
    /// CENSO runs. These default to the paths in `programs`.
    censo: Option<CensoPrograms>,

    /// The name of the scratch directory for ORCA and xtb runs, relative to
    /// the working directory. Defaults to `temp1`.
    scratch: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(from = "RawConfig")]
pub struct Config {
    pub programs: Programs,

    pub censo: CensoPrograms,

    /// scratch directory name for ORCA and xtb
    pub scratch: String,

    /// the file `self` was loaded from, if any
    #[serde(skip)]
    pub source: Option<PathBuf>,
}

impl From<RawConfig> for Config {
    fn from(rc: RawConfig) -> Self {
        Self {
            programs: rc.programs.unwrap_or_default(),
            censo: rc.censo.unwrap_or_default(),
            scratch: rc.scratch.unwrap_or_else(|| String::from("temp1")),
            source: None,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        RawConfig::default().into()
    }
}

impl Config {
    /// load a [Config] from the TOML file at `path`
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path).with_context(|| {
            format!("failed to read config file {}", path.display())
        })?;
        let mut ret: Self = toml::from_str(&contents).with_context(|| {
            format!("failed to deserialize config file {}", path.display())
        })?;
        ret.source = Some(path.to_path_buf());
        Ok(ret)
    }

    /// the configuration file to use: `flag` if given, then the value of
    /// `env`, then [DEFAULT_FILE] in `cwd` if it exists
    pub fn locate(
        flag: Option<&Path>,
        env: Option<PathBuf>,
        cwd: &Path,
    ) -> Option<PathBuf> {
        if let Some(p) = flag {
            return Some(p.to_path_buf());
        }
        if let Some(p) = env.filter(|p| !p.as_os_str().is_empty()) {
            return Some(p);
        }
        let p = cwd.join(DEFAULT_FILE);
        p.is_file().then_some(p)
    }

    /// load the configuration chosen by [Config::locate], or the defaults if
    /// there is none
    pub fn find(flag: Option<&Path>, cwd: &Path) -> Result<Self> {
        let env = std::env::var_os(ENV_VAR).map(PathBuf::from);
        match Self::locate(flag, env, cwd) {
            Some(p) => {
                debug!("loading configuration from {}", p.display());
                Self::load(p)
            }
            None => {
                debug!("no configuration file, using defaults");
                Ok(Self::default())
            }
        }
    }

    pub fn tools(&self) -> Tools {
        self.programs
            .entries()
            .into_iter()
            .filter_map(|(name, p)| Some((name, p.as_ref()?)))
            .fold(Tools::default(), |t, (name, p)| t.with(name, p))
    }
}
