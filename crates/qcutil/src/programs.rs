use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Args;
use log::info;
use qcrun::{
    Program, Solvent,
    program::{
        anmr::Anmr,
        censo::{Censo, Nucleus},
        crest::Crest,
        mapspc::orca_mapspc,
        nmr::NmrPipeline,
        orca::Orca,
        xtb::Xtb,
    },
};

use crate::config::Config;

/// a spectrometer frequency, which has to be a positive number of MHz
fn parse_freq(s: &str) -> Result<f64, String> {
    match s.trim().parse::<f64>() {
        Ok(f) if f.is_finite() && f > 0.0 => Ok(f),
        Ok(f) => Err(format!("frequency must be positive, got {f}")),
        Err(e) => Err(format!("invalid frequency `{s}`: {e}")),
    }
}

#[derive(Args, Debug)]
pub struct OrcaArgs {
    /// ORCA input file, with or without the .inp extension
    input: PathBuf,

    /// Scratch directory. Defaults to the configured `scratch`.
    #[arg(long)]
    scratch: Option<String>,

    /// Broaden the IR spectrum of the output with orca_mapspc afterwards.
    #[arg(long, default_value_t = false)]
    mapspc: bool,
}

#[derive(Args, Debug)]
pub struct XtbArgs {
    /// Starting geometry in XYZ format
    xyz: PathBuf,

    /// Base name of the output files. Defaults to the file name of the
    /// geometry up to its first `.`
    #[arg(short, long)]
    namespace: Option<String>,

    /// Molecular charge
    #[arg(short, long, default_value_t = 0, allow_hyphen_values = true)]
    charge: isize,

    /// Number of threads for xtb to use
    #[arg(short, long, default_value_t = 1)]
    parallel: usize,

    /// ALPB implicit solvent, by any of its aliases
    #[arg(short, long)]
    solvent: Option<Solvent>,

    /// Pass --verbose to xtb
    #[arg(long, default_value_t = false)]
    xtb_verbose: bool,

    /// Localize the orbitals (--lmo)
    #[arg(long, default_value_t = false)]
    lmo: bool,

    /// Write a molden file of the orbitals (--molden)
    #[arg(long, default_value_t = false)]
    molden: bool,

    /// Also convert the optimized geometry to Tinker XYZ for Chem3D
    #[arg(long, default_value_t = false)]
    tinker: bool,

    /// Scratch directory. Defaults to the configured `scratch`.
    #[arg(long)]
    scratch: Option<String>,
}

#[derive(Args, Debug)]
pub struct CrestArgs {
    /// Starting geometry in XYZ format
    xyz: PathBuf,

    /// ALPB implicit solvent, by any of its aliases
    #[arg(short, long)]
    solvent: Option<Solvent>,

    /// Number of threads
    #[arg(short = 'T', long, default_value_t = 4)]
    threads: usize,
}

#[derive(Args, Debug)]
pub struct CensoArgs {
    /// Conformer ensemble. Defaults to crest_conformers.xyz
    #[arg(short, long)]
    input: Option<String>,

    /// Nuclei to compute, separated by commas: 1H, 13C, 19F, 29Si, 31P
    #[arg(short = 'N', long, value_delimiter = ',', default_value = "1H")]
    nuclei: Vec<Nucleus>,

    /// Spectrometer frequency in MHz
    #[arg(short, long, default_value_t = 300.0, value_parser = parse_freq)]
    freq: f64,

    /// Functional for the conformer prescreening
    #[arg(long)]
    func0: Option<String>,

    /// Functional for the shielding calculations
    #[arg(long)]
    func_nmr: Option<String>,

    /// Basis set for the shielding calculations
    #[arg(long)]
    basis: Option<String>,

    /// SMD implicit solvent, by any of its aliases
    #[arg(short, long)]
    solvent: Option<Solvent>,
}

#[derive(Args, Debug)]
pub struct AnmrArgs {
    /// Base name of the output files
    namespace: String,

    /// Spectrometer frequency in MHz
    #[arg(short, long, default_value_t = 300.0, value_parser = parse_freq)]
    freq: f64,

    /// Maximum spin system size
    #[arg(long, default_value_t = 12)]
    mss: usize,

    /// Skip plotting the spectrum with nmrplot.py
    #[arg(long, default_value_t = false)]
    no_plot: bool,
}

#[derive(Args, Debug)]
pub struct NmrArgs {
    /// Starting geometry in XYZ format
    xyz: PathBuf,

    /// Spectrometer frequency in MHz
    #[arg(short, long, default_value_t = 300.0, value_parser = parse_freq)]
    freq: f64,

    /// Nuclei to compute, separated by commas: 1H, 13C, 19F, 29Si, 31P
    #[arg(short = 'N', long, value_delimiter = ',', default_value = "1H")]
    nuclei: Vec<Nucleus>,

    /// Implicit solvent for all three programs, by any of its aliases
    #[arg(short, long)]
    solvent: Option<Solvent>,

    /// Number of threads for CREST
    #[arg(short = 'T', long, default_value_t = 4)]
    threads: usize,

    /// Skip plotting the spectrum with nmrplot.py
    #[arg(long, default_value_t = false)]
    no_plot: bool,
}

fn report(results: &[PathBuf]) {
    for r in results {
        info!("copied {}", r.display());
    }
}

pub fn orca(args: OrcaArgs, config: &Config, cwd: &Path) -> Result<()> {
    let tools = config.tools();
    let scratch = args.scratch.as_deref().unwrap_or(&config.scratch);
    let orca = Orca::new(&args.input, scratch);
    let results = orca.run(&tools, cwd).with_context(|| {
        format!("ORCA run of {} failed", orca.input().display())
    })?;
    report(&results);
    if args.mapspc {
        orca_mapspc(&tools, cwd, &orca.outfile())
            .context("orca_mapspc failed")?;
    }
    Ok(())
}

pub fn xtb(args: XtbArgs, config: &Config, cwd: &Path) -> Result<()> {
    let mut xtb = Xtb::new(&args.xyz);
    if let Some(ns) = args.namespace {
        xtb.namespace = ns;
    }
    xtb.charge = args.charge;
    xtb.parallel = args.parallel;
    xtb.solvent = args.solvent;
    xtb.verbose = args.xtb_verbose;
    xtb.lmo = args.lmo;
    xtb.molden = args.molden;
    xtb.tinker = args.tinker;
    xtb.scratch = args.scratch.unwrap_or_else(|| config.scratch.clone());
    let results = xtb
        .run(&config.tools(), cwd)
        .with_context(|| format!("xtb run of {} failed", xtb.xyz.display()))?;
    report(&results);
    Ok(())
}

fn crest_for(xyz: &Path, solvent: Option<Solvent>, threads: usize) -> Crest {
    let mut crest = Crest::new(xyz);
    crest.solvent = solvent;
    crest.threads = threads;
    crest
}

pub fn crest(args: CrestArgs, config: &Config, cwd: &Path) -> Result<()> {
    let crest = crest_for(&args.xyz, args.solvent, args.threads);
    let results = crest.run(&config.tools(), cwd).with_context(|| {
        format!("CREST run of {} failed", args.xyz.display())
    })?;
    report(&results);
    Ok(())
}

pub fn censo(args: CensoArgs, config: &Config, cwd: &Path) -> Result<()> {
    let mut censo = Censo {
        nuclei: args.nuclei.into_iter().collect(),
        freq: args.freq,
        solvent: args.solvent,
        programs: config.censo.clone(),
        ..Censo::default()
    };
    if let Some(input) = args.input {
        censo.namespace = qcrun::namespace(&input);
        censo.input = input;
    }
    if let Some(f) = args.func0 {
        censo.func0 = f;
    }
    if let Some(f) = args.func_nmr {
        censo.func_nmr = f;
    }
    if let Some(b) = args.basis {
        censo.basis = b;
    }
    let results = censo
        .run(&config.tools(), cwd)
        .context("CENSO run failed")?;
    report(&results);
    Ok(())
}

pub fn anmr(args: AnmrArgs, config: &Config, cwd: &Path) -> Result<()> {
    let mut anmr = Anmr::new(&args.namespace, args.freq);
    anmr.mss = args.mss;
    anmr.plot = !args.no_plot;
    let results = anmr.run(&config.tools(), cwd).context("ANMR run failed")?;
    report(&results);
    Ok(())
}

pub fn nmr(args: NmrArgs, config: &Config, cwd: &Path) -> Result<()> {
    let crest = crest_for(&args.xyz, args.solvent, args.threads);
    let ns = crest.namespace().to_owned();
    let censo = Censo {
        namespace: ns.clone(),
        nuclei: args.nuclei.into_iter().collect(),
        freq: args.freq,
        solvent: args.solvent,
        programs: config.censo.clone(),
        ..Censo::default()
    };
    let mut anmr = Anmr::new(&ns, args.freq);
    anmr.plot = !args.no_plot;
    let pipeline = NmrPipeline { crest, censo, anmr };
    let results = pipeline
        .run(&config.tools(), cwd)
        .with_context(|| format!("NMR workflow for {ns} failed"))?;
    report(&results);
    Ok(())
}
