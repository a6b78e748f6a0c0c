use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use clap::Args;
use fileops::{
    omega, pdf,
    rename::rename_tree,
    table::{DEFAULT_OUTPUT, concat_files},
    uvvis::{self, Options},
    wsl::to_wsl,
};
use log::{info, warn};

use crate::config::Config;

#[derive(Args, Debug)]
pub struct ConcatArgs {
    /// CSV files to concatenate, in order
    #[arg(required = true)]
    inputs: Vec<PathBuf>,

    /// Output file
    #[arg(short, long, default_value = DEFAULT_OUTPUT)]
    output: PathBuf,
}

#[derive(Args, Debug)]
pub struct UvvisArgs {
    /// Exports to filter. Defaults to every .csv and .dat file in the
    /// current directory
    files: Vec<PathBuf>,

    /// Directory for the filtered files
    #[arg(short, long, default_value = uvvis::OUTPUT_DIR)]
    out_dir: PathBuf,

    /// Number of data rows after the header. Defaults to everything up to the
    /// first empty row
    #[arg(long)]
    split_at: Option<usize>,

    /// Keep at most this many rows, starting from the shortest wavelength
    #[arg(long)]
    max_rows: Option<usize>,

    /// Treat the files as illumination series and name the columns by the
    /// cumulative illumination time
    #[arg(long, default_value_t = false)]
    illumination: bool,
}

#[derive(Args, Debug)]
pub struct RenameArgs {
    /// Directory to clean up. It is not renamed itself
    #[arg(default_value = ".")]
    dir: PathBuf,

    /// Only print what would be renamed
    #[arg(short = 'n', long, default_value_t = false)]
    dry_run: bool,
}

#[derive(Args, Debug)]
pub struct PdfSearchArgs {
    /// Word or fragment to look for, ignoring case
    term: String,

    /// PDF files to search. Defaults to every PDF in the current directory
    files: Vec<PathBuf>,

    /// Print every hit with its context as JSON
    #[arg(long, default_value_t = false)]
    json: bool,
}

#[derive(Args, Debug)]
pub struct OmegaArgs {
    /// Smallest ω value, as it appears in the file names
    low: i64,

    /// Largest ω value, included if reached by `step`
    high: i64,

    /// Increment between inputs
    #[arg(default_value_t = 1)]
    step: i64,

    /// Template input containing the placeholder `Value`
    #[arg(short, long, default_value = omega::TEMPLATE)]
    template: PathBuf,
}

#[derive(Args, Debug)]
pub struct WslArgs {
    /// Windows path. Defaults to the current directory
    path: Option<String>,
}

pub fn concat(args: ConcatArgs) -> Result<()> {
    let table = concat_files(&args.inputs)?;
    if table.header.is_empty() {
        bail!("none of the inputs could be read");
    }
    table.write(&args.output)?;
    info!(
        "wrote {} rows and {} columns to {}",
        table.len(),
        table.header.len(),
        args.output.display()
    );
    Ok(())
}

pub fn uvvis(args: UvvisArgs, cwd: &Path) -> Result<()> {
    let files = if args.files.is_empty() {
        uvvis::inputs(cwd)?
    } else {
        args.files
    };
    if files.is_empty() {
        bail!("no .csv or .dat files in {}", cwd.display());
    }
    let out_dir = cwd.join(&args.out_dir);
    let opts = Options {
        split_at: args.split_at,
        max_rows: args.max_rows,
        ..Options::default()
    };
    let mut failed = 0;
    for file in &files {
        let res = if args.illumination {
            uvvis::illumination_file(file, &out_dir, &opts).map(|_| ())
        } else {
            uvvis::filter_file(file, &out_dir, &opts).map(|_| ())
        };
        if let Err(e) = res {
            warn!("skipping {}: {e}", file.display());
            failed += 1;
        }
    }
    if failed == files.len() {
        bail!("failed to filter any of the {} files", files.len());
    }
    Ok(())
}

pub fn rename(args: RenameArgs, cwd: &Path) -> Result<()> {
    let root = cwd.join(&args.dir);
    let renames = rename_tree(&root, args.dry_run)
        .with_context(|| format!("failed to rename in {}", root.display()))?;
    for r in &renames {
        println!("{} -> {}", r.from.display(), r.to.display());
    }
    if renames.is_empty() {
        info!("nothing to rename");
    }
    Ok(())
}

pub fn pdf_search(
    args: PdfSearchArgs,
    config: &Config,
    cwd: &Path,
) -> Result<()> {
    let files = if args.files.is_empty() {
        pdf::pdfs_in(cwd)?
    } else {
        args.files
    };
    if files.is_empty() {
        bail!("no PDF files in {}", cwd.display());
    }
    let tools = config.tools();
    let mut reports = Vec::with_capacity(files.len());
    for file in &files {
        match pdf::report(&tools, file, &args.term) {
            Ok(r) => reports.push(r),
            Err(e) => warn!("skipping {}: {e}", file.display()),
        }
    }
    if args.json {
        println!("{}", serde_json::to_string_pretty(&reports)?);
        return Ok(());
    }
    for r in &reports {
        println!("{}: {}", r.file, r.count);
    }
    let total: usize = reports.iter().map(|r| r.count).sum();
    info!("{total} occurrences of `{}` in {} files", args.term, reports.len());
    Ok(())
}

pub fn omega_inputs(args: OmegaArgs, cwd: &Path) -> Result<()> {
    let template = cwd.join(&args.template);
    let written =
        omega::write_inputs(cwd, &template, args.low, args.high, args.step)?;
    for w in &written {
        info!("wrote {}", w.display());
    }
    Ok(())
}

pub fn wslpath(args: WslArgs, cwd: &Path) -> Result<()> {
    let path = match args.path {
        Some(p) => p,
        None => cwd.display().to_string(),
    };
    println!("{}", to_wsl(&path));
    Ok(())
}
