use std::{
    collections::HashSet,
    fmt::Display,
    fs,
    path::{Path, PathBuf},
    str::FromStr,
};

use log::warn;
use serde::{Deserialize, Serialize};

use crate::{Flavor, Policy, RunError, Scratch, Solvent, string};

use super::{Program, Tools, crest::CREST_RESULTS};

/// The nuclei CENSO can compute shieldings and couplings for
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Nucleus {
    H1,
    C13,
    F19,
    Si29,
    P31,
}

impl Nucleus {
    pub const ALL: [Nucleus; 5] = [
        Nucleus::H1,
        Nucleus::C13,
        Nucleus::F19,
        Nucleus::Si29,
        Nucleus::P31,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Nucleus::H1 => "1H",
            Nucleus::C13 => "13C",
            Nucleus::F19 => "19F",
            Nucleus::Si29 => "29Si",
            Nucleus::P31 => "31P",
        }
    }
}

impl Display for Nucleus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

impl FromStr for Nucleus {
    type Err = RunError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        Self::ALL
            .into_iter()
            .find(|n| n.label().eq_ignore_ascii_case(s))
            .ok_or_else(|| RunError::UnknownNucleus(s.to_owned()))
    }
}

/// Paths written to the program section of `.censorc`. Unset paths are
/// resolved through [Tools]
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CensoPrograms {
    pub orca: Option<PathBuf>,
    pub orca_version: String,
    pub xtb: Option<PathBuf>,
    pub crest: Option<PathBuf>,
}

/// A CENSO conformer ensemble refinement with NMR properties (part 4)
#[derive(Clone, Debug)]
pub struct Censo {
    pub namespace: String,
    /// the conformer ensemble, normally `crest_conformers.xyz`
    pub input: String,
    pub nuclei: HashSet<Nucleus>,
    /// spectrometer frequency in MHz
    pub freq: f64,
    pub func0: String,
    pub func_nmr: String,
    pub basis: String,
    pub solvent: Option<Solvent>,
    pub programs: CensoPrograms,
    pub scratch: String,
}

impl Default for Censo {
    fn default() -> Self {
        let input = "crest_conformers.xyz".to_owned();
        Self {
            namespace: crate::namespace(&input),
            input,
            nuclei: HashSet::from([Nucleus::H1]),
            freq: 300.0,
            func0: "b97-d3".to_owned(),
            func_nmr: "tpss-d4".to_owned(),
            basis: "pcsseg-3".to_owned(),
            solvent: None,
            programs: CensoPrograms::default(),
            scratch: "censo_tmp".to_owned(),
        }
    }
}

impl Censo {
    fn program_path(
        tools: &Tools,
        name: &str,
        configured: &Option<PathBuf>,
    ) -> String {
        let path = match configured {
            Some(p) => p.clone(),
            None => tools.get(name).unwrap_or_else(|e| {
                warn!("{e}, writing the bare name to .censorc");
                PathBuf::from(name)
            }),
        };
        path.display().to_string()
    }

    fn switch(&self, n: Nucleus) -> &'static str {
        if self.nuclei.contains(&n) { "on" } else { "off" }
    }

    /// the contents of the `.censorc` configuration file
    pub fn censorc(&self, tools: &Tools) -> String {
        let orca = Self::program_path(tools, "orca", &self.programs.orca);
        let xtb = Self::program_path(tools, "xtb", &self.programs.xtb);
        let crest = Self::program_path(tools, "crest", &self.programs.crest);
        let version = &self.programs.orca_version;
        let solvent = self.solvent.map_or("gas", |s| s.name_for(Flavor::Crest));
        let [h, c, f, si, p] = Nucleus::ALL.map(|n| self.switch(n));
        let Censo {
            func0,
            func_nmr,
            basis,
            freq,
            ..
        } = self;
        format!(
            "$CENSO global configuration file: .censorc
$VERSION:1.2.0

ORCA: {orca}
ORCA version: {version}
GFN-xTB: {xtb}
CREST: {crest}
mpshift: /path/including/binary/mpshift-binary
escf: /path/including/binary/escf-binary
$ENDPROGRAMS

$CRE SORTING SETTINGS:
$GENERAL SETTINGS:
nconf: all
charge: 0
unpaired: 0
solvent: {solvent}
prog_rrho: xtb
temperature: 298.15
trange: [273.15, 378.15, 5]
multitemp: on
evaluate_rrho: on
consider_sym: on
bhess: on
imagthr: automatic
sthr: automatic
scale: automatic
rmsdbias: off
sm_rrho: alpb
progress: off
check: on
prog: orca
func: r2scan-3c
basis: automatic
maxthreads: 2
omp: 4
balance: off
cosmorsparam: automatic

$PART0 - CHEAP-PRESCREENING - SETTINGS:
part0: on
func0: {func0}
basis0: def2-SV(P)
part0_gfnv: gfn2
part0_threshold: 4.0

$PART1 - PRESCREENING - SETTINGS:
part1: on
smgsolv1: smd
part1_gfnv: gfn2
part1_threshold: 3.5

$PART2 - OPTIMIZATION - SETTINGS:
part2: on
prog2opt: prog
part2_threshold: 2.5
sm2: smd
smgsolv2: smd
part2_gfnv: gfn2
ancopt: on
hlow: 0.01
opt_spearman: on
part2_P_threshold: 99
optlevel2: automatic
optcycles: 8
spearmanthr: -4.0
radsize: 10
crestcheck: off

$PART3 - REFINEMENT - SETTINGS:
part3: off
prog3: prog
func3: pw6b95
basis3: def2-TZVPD
smgsolv3: smd
part3_gfnv: gfn2
part3_threshold: 99

$NMR PROPERTY SETTINGS:
$PART4 SETTINGS:
part4: on
couplings: on
progJ: orca
funcJ: {func_nmr}
basisJ: {basis}
sm4J: smd
shieldings: on
progS: prog
funcS: {func_nmr}
basisS: {basis}
sm4S: smd
reference_1H: TMS
reference_13C: TMS
reference_19F: CFCl3
reference_29Si: TMS
reference_31P: TMP
1H_active: {h}
13C_active: {c}
19F_active: {f}
29Si_active: {si}
31P_active: {p}
resonance_frequency: {freq}

$OPTICAL ROTATION PROPERTY SETTINGS:
$PART5 SETTINGS:
optical_rotation: off
funcOR: pbe
funcOR_SCF: r2scan-3c
basisOR: def2-SVPD
frequency_optical_rot: [589.0]
$END CENSORC
"
        )
    }
}

impl Program for Censo {
    const NAME: &'static str = "censo";

    fn namespace(&self) -> &str {
        &self.namespace
    }

    fn outfile(&self) -> String {
        format!("{}_censo.out", self.namespace)
    }

    fn scratch_dir(&self) -> &str {
        &self.scratch
    }

    /// move the CREST results into the scratch directory. Unlike the copy
    /// back from CREST, every one of them is required here, and nothing is
    /// moved unless all of them are present
    fn stage(
        &self,
        tools: &Tools,
        cwd: &Path,
        scratch: &Scratch,
    ) -> Result<(), RunError> {
        let mut inputs: Vec<&str> = CREST_RESULTS.to_vec();
        if !inputs.contains(&self.input.as_str()) {
            inputs[0] = self.input.as_str();
        }
        let inputs: Vec<PathBuf> = inputs.iter().map(|f| cwd.join(f)).collect();
        if let Some(missing) = inputs.iter().find(|p| !p.exists()) {
            return Err(RunError::FileNotFound(missing.display().to_string()));
        }
        for f in &inputs {
            scratch.stage_move(f, Policy::Require)?;
        }
        let rc = scratch.join(".censorc");
        fs::write(&rc, self.censorc(tools)).map_err(|e| RunError::io(&rc, e))
    }

    fn args(&self) -> Vec<String> {
        let mut ret = string!["--input", self.input.as_str()];
        ret.extend(string!["--func0", self.func0.as_str()]);
        if let Some(solvent) = self.solvent {
            ret.extend(string!["--solvent", solvent.name_for(Flavor::Crest)]);
        }
        ret.extend(string![
            "-smgsolv1",
            "smd",
            "-sm2",
            "smd",
            "--smgsolv2",
            "smd",
            "--prog",
            "orca",
            "--part4",
            "on",
            "--prog4J",
            "orca",
            "-funcJ",
            self.func_nmr.as_str(),
            "-funcS",
            self.func_nmr.as_str(),
            "-basisJ",
            self.basis.as_str(),
            "-basisS",
            self.basis.as_str(),
            "-cactive",
            "off"
        ]);
        ret
    }
}
