use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use log::info;

use config::Config;

mod config;
mod files;
mod programs;
mod text;

/// utilities for running and post-processing quantum chemistry calculations
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Configuration file. Defaults to the value of $QCUTIL_CONFIG, then to
    /// qcutil.toml in the current directory if it exists.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Log debugging information. RUST_LOG takes precedence if it is set.
    #[arg(short, long, global = true, default_value_t = false)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run ORCA on an input file in a scratch directory
    Orca(programs::OrcaArgs),

    /// Optimize a geometry and compute frequencies with xtb
    Xtb(programs::XtbArgs),

    /// Run a CREST conformer search in NMR mode
    Crest(programs::CrestArgs),

    /// Refine a CREST ensemble and compute NMR properties with CENSO
    Censo(programs::CensoArgs),

    /// Simulate the NMR spectrum of a finished CENSO run with ANMR
    Anmr(programs::AnmrArgs),

    /// Run CREST, CENSO, and ANMR in sequence
    Nmr(programs::NmrArgs),

    /// Print the IR spectrum table of an ORCA output
    Ir(text::IrArgs),

    /// Tabulate Loewdin orbital compositions from an ORCA output
    Loewdin(text::LoewdinArgs),

    /// Extract the eigenvalue rows of xtb frequency printouts for Chemcraft
    #[command(name = "freq2chemcraft")]
    FreqToChemcraft(text::BatchArgs),

    /// Rewrite xtb optimization trajectories for Chemcraft
    #[command(name = "trj2chemcraft")]
    TrjToChemcraft(text::BatchArgs),

    /// Report the energy of every frame of a trajectory
    Trj(text::TrjArgs),

    /// Convert Chem3D Tinker XYZ files to standard XYZ files
    #[command(name = "tinker2xyz")]
    TinkerToXyz(text::BatchArgs),

    /// Convert XYZ files in bohr to Å
    #[command(name = "bohr2aa")]
    BohrToAngstrom(text::BatchArgs),

    /// Print the Z-matrix of an XYZ geometry
    Zmat(text::ZmatArgs),

    /// Look up an atomic number, element symbol, or angular momentum letter
    Element(text::ElementArgs),

    /// Concatenate CSV files
    Concat(files::ConcatArgs),

    /// Filter Agilent Cary 60 UV-Vis exports
    Uvvis(files::UvvisArgs),

    /// Remove trailing 32-character ids from file and directory names
    Rename(files::RenameArgs),

    /// Search the text of PDF files
    PdfSearch(files::PdfSearchArgs),

    /// Write a series of ORCA inputs for tuning ω from a template
    OmegaInputs(files::OmegaArgs),

    /// Convert a Windows path to the corresponding WSL path
    Wslpath(files::WslArgs),

    /// Show the packages updated by the most recent `choco upgrade`
    Chocolog(text::ChocoArgs),

    /// Show the configuration in effect
    Config {
        /// Print the whole configuration as JSON
        #[arg(long, default_value_t = false)]
        dump: bool,
    },
}

fn show_config(config: &Config, dump: bool) -> Result<()> {
    if dump {
        println!("{}", serde_json::to_string_pretty(config)?);
        return Ok(());
    }
    match &config.source {
        Some(p) => println!("configuration loaded from {}", p.display()),
        None => println!("no configuration file, using the defaults"),
    }
    Ok(())
}

fn main() -> Result<()> {
    let args = Args::parse();
    let level = if args.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or(level),
    )
    .init();

    let cwd = std::env::current_dir()?;
    let config = Config::find(args.config.as_deref(), &cwd)?;
    if let Some(p) = &config.source {
        info!("using configuration from {}", p.display());
    }

    match args.command {
        Command::Orca(a) => programs::orca(a, &config, &cwd),
        Command::Xtb(a) => programs::xtb(a, &config, &cwd),
        Command::Crest(a) => programs::crest(a, &config, &cwd),
        Command::Censo(a) => programs::censo(a, &config, &cwd),
        Command::Anmr(a) => programs::anmr(a, &config, &cwd),
        Command::Nmr(a) => programs::nmr(a, &config, &cwd),
        Command::Ir(a) => text::ir(a, &config, &cwd),
        Command::Loewdin(a) => text::loewdin(a),
        Command::FreqToChemcraft(a) => text::freq_to_chemcraft(a, &cwd),
        Command::TrjToChemcraft(a) => text::trj_to_chemcraft(a, &cwd),
        Command::Trj(a) => text::trj(a),
        Command::TinkerToXyz(a) => text::tinker_to_xyz(a, &cwd),
        Command::BohrToAngstrom(a) => text::bohr_to_angstrom(a, &cwd),
        Command::Zmat(a) => text::zmat(a),
        Command::Element(a) => text::element(a),
        Command::Concat(a) => files::concat(a),
        Command::Uvvis(a) => files::uvvis(a, &cwd),
        Command::Rename(a) => files::rename(a, &cwd),
        Command::PdfSearch(a) => files::pdf_search(a, &config, &cwd),
        Command::OmegaInputs(a) => files::omega_inputs(a, &cwd),
        Command::Wslpath(a) => files::wslpath(a, &cwd),
        Command::Chocolog(a) => text::chocolog(a),
        Command::Config { dump } => show_config(&config, dump),
    }
}
