use std::path::{Path, PathBuf};

use anyhow::{Context, Result, anyhow, bail};
use atoms::{Xyz, azimuthal_letter, number_to_symbol, symbol_to_number, zmat};
use clap::Args;
use fileops::has_extension;
use log::{info, warn};
use qcrun::program::mapspc::orca_mapspc;
use scrape::{
    choco, convert,
    ir::{self, IrSpectrum},
    loewdin::{self, Composition, Filter, LoewdinMode},
    trj::{Source, Trajectory},
    xtb,
};

use crate::config::Config;

#[derive(Args, Debug)]
pub struct IrArgs {
    /// ORCA output file
    file: PathBuf,

    /// Write the IR block to <file>_IR_Part.out
    #[arg(short, long, default_value_t = false)]
    export: bool,

    /// Export to this file instead of <file>_IR_Part.out
    #[arg(short, long, conflicts_with = "dated")]
    output: Option<PathBuf>,

    /// Export to a file in the current directory named after today's date,
    /// like Output16_10_2026
    #[arg(long, default_value_t = false)]
    dated: bool,

    /// Print the parsed modes as JSON instead of the raw block
    #[arg(long, default_value_t = false)]
    json: bool,

    /// Also broaden the spectrum with orca_mapspc
    #[arg(long, default_value_t = false)]
    mapspc: bool,
}

fn parse_range(s: &str) -> Result<(usize, usize), String> {
    let (lo, hi) = s
        .split_once(['-', ':'])
        .ok_or_else(|| format!("expected a range like 10-20, got `{s}`"))?;
    let parse = |x: &str| {
        x.trim()
            .parse::<usize>()
            .map_err(|e| format!("invalid orbital number `{x}`: {e}"))
    };
    let (lo, hi) = (parse(lo)?, parse(hi)?);
    if lo > hi {
        return Err(format!("empty orbital range {lo}-{hi}"));
    }
    Ok((lo, hi))
}

#[derive(Args, Debug)]
pub struct LoewdinArgs {
    /// ORCA output file
    file: PathBuf,

    /// Which printout to read: CASSCF, UHF, or UNO
    #[arg(short, long, default_value = "casscf")]
    mode: LoewdinMode,

    /// Inclusive range of orbital numbers, like 10-20
    #[arg(short, long, value_parser = parse_range)]
    orbitals: Option<(usize, usize)>,

    /// Atom indices to keep, counting from 0 as ORCA does
    #[arg(short, long, value_delimiter = ',')]
    atoms: Option<Vec<usize>>,

    /// Prefixes of the atomic orbital labels to keep, like d or pz
    #[arg(long, value_delimiter = ',')]
    aos: Option<Vec<String>>,

    /// Shells to sum over, so that 3dz2, 3dxy, ... become 3d
    #[arg(long, value_delimiter = ',')]
    sum: Vec<char>,

    /// Also write the table to this CSV file
    #[arg(long)]
    csv: Option<PathBuf>,
}

/// Arguments shared by the converters that work on many files at once
#[derive(Args, Debug)]
pub struct BatchArgs {
    /// Files to convert. Defaults to every .xyz file in the current directory
    /// that is not itself the output of a conversion
    files: Vec<PathBuf>,
}

#[derive(Args, Debug)]
pub struct TrjArgs {
    /// Multi-frame XYZ file
    file: PathBuf,

    /// The program that wrote the trajectory: xtb or orca
    #[arg(short, long, default_value = "xtb")]
    source: Source,

    /// Print the frames as JSON
    #[arg(long, default_value_t = false)]
    json: bool,
}

#[derive(Args, Debug)]
pub struct ZmatArgs {
    /// Geometry in XYZ format, in Å
    file: PathBuf,
}

#[derive(Args, Debug)]
pub struct ElementArgs {
    /// An element symbol or atomic number
    query: String,

    /// Treat the query as an angular momentum quantum number and print its
    /// letter
    #[arg(short = 'l', long, default_value_t = false)]
    azimuthal: bool,
}

#[derive(Args, Debug)]
pub struct ChocoArgs {
    /// Chocolatey log file
    #[arg(default_value = r"C:\ProgramData\chocolatey\logs\chocolatey.log")]
    log: PathBuf,
}

fn read(path: &Path) -> Result<String> {
    std::fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))
}

fn write(path: &Path, contents: &str) -> Result<()> {
    std::fs::write(path, contents)
        .with_context(|| format!("failed to write {}", path.display()))?;
    info!("wrote {}", path.display());
    Ok(())
}

/// `path` with its extension replaced by `suffix`, so `mol.xyz` and `_std.xyz`
/// give `mol_std.xyz`
fn with_suffix(path: &Path, suffix: &str) -> PathBuf {
    let stem = path.file_stem().unwrap_or_default().to_string_lossy();
    path.with_file_name(format!("{stem}{suffix}"))
}

/// whether `path` was written by one of the batch converters
fn is_generated(path: &Path) -> bool {
    let stem = path.file_stem().unwrap_or_default().to_string_lossy();
    ["_std", "_chemcraft", "xtbopt"]
        .iter()
        .any(|s| stem.ends_with(s))
}

fn batch_inputs(args: BatchArgs, cwd: &Path) -> Result<Vec<PathBuf>> {
    if !args.files.is_empty() {
        return Ok(args.files);
    }
    let files = fileops::files_in(cwd, |p| {
        has_extension(p, "xyz") && !is_generated(p)
    })?;
    if files.is_empty() {
        bail!("no .xyz files to convert in {}", cwd.display());
    }
    Ok(files)
}

pub fn ir(args: IrArgs, config: &Config, cwd: &Path) -> Result<()> {
    let spectrum = IrSpectrum::load(&args.file).with_context(|| {
        format!("failed to read the IR spectrum of {}", args.file.display())
    })?;
    if args.json {
        println!("{}", serde_json::to_string_pretty(&spectrum.modes)?);
    } else {
        for line in &spectrum.lines {
            println!("{line}");
        }
    }
    if args.export || args.output.is_some() || args.dated {
        let out = match (args.output, args.dated) {
            (Some(p), _) => p,
            (None, true) => cwd.join(ir::default_export_name()),
            (None, false) => ir::export_name(&args.file),
        };
        spectrum
            .export(&out)
            .with_context(|| format!("failed to write {}", out.display()))?;
        info!("exported the IR block to {}", out.display());
    }
    if args.mapspc {
        let dir = match args.file.parent() {
            Some(p) if !p.as_os_str().is_empty() => p,
            _ => cwd,
        };
        let name =
            args.file.file_name().unwrap_or_default().to_string_lossy();
        orca_mapspc(&config.tools(), dir, &name)
            .context("orca_mapspc failed")?;
    }
    Ok(())
}

pub fn loewdin(args: LoewdinArgs) -> Result<()> {
    let text = read(&args.file)?;
    let lines: Vec<&str> = text.lines().collect();
    let mut orbs = loewdin::read(&lines, args.mode).with_context(|| {
        format!("failed to read Loewdin populations of {}", args.file.display())
    })?;
    loewdin::sum_shells(&mut orbs, &args.sum);
    let filter = Filter {
        orbitals: args.orbitals,
        atoms: args.atoms,
        aos: args.aos,
    };
    let comp = Composition::new(&orbs, &filter);
    if comp.aos.is_empty() {
        warn!("no contributions left after filtering");
    }
    print!("{comp}");
    if let Some(csv) = args.csv {
        write(&csv, &comp.to_csv())?;
    }
    Ok(())
}

pub fn freq_to_chemcraft(args: BatchArgs, cwd: &Path) -> Result<()> {
    for file in batch_inputs(args, cwd)? {
        let text = read(&file)?;
        let rows = xtb::eigenvalues(&text);
        if rows.is_empty() {
            warn!("no eigenvalues in {}", file.display());
            continue;
        }
        let mut s = rows.join("\n");
        s.push('\n');
        write(&with_suffix(&file, "_chemcraft.xyz"), &s)?;
    }
    Ok(())
}

pub fn trj_to_chemcraft(args: BatchArgs, cwd: &Path) -> Result<()> {
    for file in batch_inputs(args, cwd)? {
        let text = read(&file)?;
        write(
            &with_suffix(&file, "_chemcraft.xyz"),
            &xtb::trj_to_chemcraft(&text),
        )?;
    }
    Ok(())
}

pub fn trj(args: TrjArgs) -> Result<()> {
    let text = read(&args.file)?;
    let trj = Trajectory::parse(&text, args.source)
        .with_context(|| format!("failed to parse {}", args.file.display()))?;
    if args.json {
        println!("{}", serde_json::to_string_pretty(&trj)?);
    } else {
        print!("{trj}");
    }
    Ok(())
}

pub fn tinker_to_xyz(args: BatchArgs, cwd: &Path) -> Result<()> {
    for file in batch_inputs(args, cwd)? {
        let text = read(&file)?;
        let xyz = convert::tinker_to_xyz(&text).with_context(|| {
            format!("failed to convert {}", file.display())
        })?;
        write(&with_suffix(&file, "_std.xyz"), &xyz.to_string())?;
    }
    Ok(())
}

pub fn bohr_to_angstrom(args: BatchArgs, cwd: &Path) -> Result<()> {
    for file in batch_inputs(args, cwd)? {
        let text = read(&file)?;
        let conv = convert::bohr_xyz_to_angstrom(&text).with_context(|| {
            format!("failed to convert {}", file.display())
        })?;
        let ext = file
            .extension()
            .map(|e| format!(".{}", e.to_string_lossy()))
            .unwrap_or_default();
        let out = with_suffix(&file, &format!("_std{ext}"));
        write(&out, &conv.xyz.to_string())?;
    }
    Ok(())
}

pub fn zmat(args: ZmatArgs) -> Result<()> {
    let xyz: Xyz = read(&args.file)?
        .parse()
        .with_context(|| format!("failed to parse {}", args.file.display()))?;
    for line in zmat::from_atoms(&xyz.atoms) {
        println!("{line}");
    }
    Ok(())
}

pub fn element(args: ElementArgs) -> Result<()> {
    let q = args.query.trim();
    if args.azimuthal {
        let l: usize = q
            .parse()
            .with_context(|| format!("`{q}` is not a quantum number"))?;
        let c = azimuthal_letter(l)
            .ok_or_else(|| anyhow!("no letter for l = {l}"))?;
        println!("{c}");
        return Ok(());
    }
    match q.parse::<usize>() {
        Ok(z) => {
            let sym = number_to_symbol(z)
                .ok_or_else(|| anyhow!("no element with atomic number {z}"))?;
            println!("{sym}");
        }
        Err(_) => {
            let z = symbol_to_number(q)
                .ok_or_else(|| anyhow!("unknown element symbol `{q}`"))?;
            println!("{z}");
        }
    }
    Ok(())
}

pub fn chocolog(args: ChocoArgs) -> Result<()> {
    let log = read(&args.log)?;
    match choco::last_upgrade(&log) {
        Some(up) => {
            println!("last upgrade at {}", up.time);
            for (name, version) in &up.packages {
                println!("{name}: {version}");
            }
        }
        None => println!("no upgrades found in {}", args.log.display()),
    }
    Ok(())
}
