//! Cleanup of the CSV exports of an Agilent Cary 60 UV-Vis spectrometer.
//!
//! An export starts with a row of sample names, each spanning two columns,
//! followed by a row of `Wavelength (nm)`/`Abs` labels, the data in descending
//! wavelength, a blank line, and the instrument log for every sample.

use std::{
    path::{Path, PathBuf},
    sync::OnceLock,
};

use log::{debug, info, warn};
use regex::Regex;

use crate::{FileError, Table, has_extension, table::split_record};

/// the header of the single wavelength column in the output
pub const WAVELENGTH: &str = "Wavelength [nm]";

/// the label the instrument puts over every wavelength column
const LABEL: &str = "Wavelength (nm)";

/// baseline scans, which are never wanted in the output
pub const BASELINES: [&str; 2] = ["Baseline 100%T", "Baseline 0%T"];

/// measurement settings commonly encoded in the file names
pub const NAME_TOKENS: [&str; 10] = [
    "OD_", "0p5_", "10mm_", "lex_", "340nm_", "illu_", "10s_", "210s_", "90s_",
    "10x2mm_",
];

/// the directory the filtered files are written to by default
pub const OUTPUT_DIR: &str = "Filtered_Data";

#[derive(Clone, Debug, PartialEq)]
pub struct Options {
    /// the number of rows after the header that hold data. Everything after
    /// is log. When unset, the data ends at the first empty row
    pub split_at: Option<usize>,

    /// keep at most this many rows, counted from the shortest wavelength
    pub max_rows: Option<usize>,

    /// substrings removed from the file name of the outputs
    pub tokens: Vec<String>,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            split_at: None,
            max_rows: None,
            tokens: NAME_TOKENS.iter().map(|&s| s.to_owned()).collect(),
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Filtered {
    /// the wavelength column followed by one column per sample
    pub data: Table,

    /// the non-empty lines after the data, without trailing commas
    pub log: Vec<String>,
}

fn is_empty_row(row: &[String]) -> bool {
    row.iter().all(|c| c.trim().is_empty())
}

/// filter the contents of a Cary 60 export
pub fn filter(text: &str, opts: &Options) -> Result<Filtered, String> {
    let mut lines = text.lines().skip_while(|l| l.trim().is_empty());
    let header = lines.next().map(split_record).ok_or("empty file")?;
    let body: Vec<&str> = lines.collect();

    let (data, log) = match opts.split_at {
        Some(n) => body.split_at(n.min(body.len())),
        None => {
            let n = body
                .iter()
                .position(|l| is_empty_row(&split_record(l)))
                .unwrap_or(body.len());
            body.split_at(n)
        }
    };
    let log = log
        .iter()
        .map(|l| l.trim_end().trim_end_matches(',').to_owned())
        .filter(|l| !l.is_empty())
        .collect();

    let rows: Vec<Vec<String>> = data
        .iter()
        .map(|l| split_record(l))
        .filter(|r| !is_empty_row(r))
        .filter(|r| !r.iter().any(|c| c.trim() == LABEL))
        .collect();

    // columns empty in the header and in every row, like the one left by a
    // trailing comma
    let ncols = rows.iter().map(Vec::len).chain([header.len()]).max();
    let cell = |row: &[String], col: usize| -> String {
        row.get(col).map(|s| s.trim().to_owned()).unwrap_or_default()
    };
    let cols: Vec<usize> = (0..ncols.unwrap_or(0))
        .filter(|&c| {
            !cell(&header, c).is_empty()
                || rows.iter().any(|r| !cell(r, c).is_empty())
        })
        .collect();

    let pairs: Vec<_> = cols.chunks_exact(2).map(|p| (p[0], p[1])).collect();
    if cols.len() % 2 == 1 {
        warn!("ignoring unpaired column {}", cols[cols.len() - 1]);
    }
    let Some(&(wl_col, _)) = pairs.first() else {
        return Err("no wavelength/absorbance column pairs".to_owned());
    };
    let samples: Vec<_> = pairs
        .iter()
        .filter(|&&(name, _)| {
            let baseline = BASELINES.contains(&cell(&header, name).as_str());
            if baseline {
                debug!("dropping baseline column {}", cell(&header, name));
            }
            !baseline
        })
        .collect();

    let mut out = Vec::with_capacity(rows.len());
    for row in &rows {
        let wl = cell(row, wl_col);
        let Ok(x) = wl.parse::<f64>() else {
            debug!("dropping row with wavelength `{wl}`");
            continue;
        };
        let mut r = vec![wl];
        r.extend(samples.iter().map(|&&(_, v)| cell(row, v)));
        out.push((x, r));
    }
    if out.is_empty() {
        return Err("no data rows".to_owned());
    }
    out.sort_by(|a, b| a.0.total_cmp(&b.0));
    if let Some(max) = opts.max_rows {
        out.truncate(max);
    }

    let mut names = vec![WAVELENGTH.to_owned()];
    names.extend(samples.iter().map(|&&(name, _)| cell(&header, name)));
    Ok(Filtered {
        data: Table::new(names, out.into_iter().map(|(_, r)| r).collect()),
        log,
    })
}

/// remove every token in `tokens` from `stem`
pub fn clean_name<S: AsRef<str>>(stem: &str, tokens: &[S]) -> String {
    tokens
        .iter()
        .fold(stem.to_owned(), |s, t| s.replace(t.as_ref(), ""))
}

/// the exports in `dir`: `.csv` and `.dat` files that are not themselves
/// outputs of [filter_file]
pub fn inputs(dir: impl AsRef<Path>) -> Result<Vec<PathBuf>, FileError> {
    crate::files_in(dir, |p| {
        let stem = p.file_stem().unwrap_or_default().to_string_lossy();
        (has_extension(p, "csv") || has_extension(p, "dat"))
            && !stem.ends_with("_f_data")
            && !stem.ends_with("_f_log")
            && !stem.ends_with("_select")
    })
}

fn stem(path: &Path) -> String {
    path.file_stem()
        .unwrap_or_default()
        .to_string_lossy()
        .into_owned()
}

/// filter the export at `path`, writing `<name>_f_data.csv` and
/// `<name>_f_log.csv` to `out_dir`, where `<name>` is the cleaned file stem.
/// Returns the paths of the data and log files
pub fn filter_file(
    path: impl AsRef<Path>,
    out_dir: impl AsRef<Path>,
    opts: &Options,
) -> Result<(PathBuf, PathBuf), FileError> {
    let path = path.as_ref();
    let text = crate::read_to_string(path)?;
    let f = filter(&text, opts)
        .map_err(|e| FileError::Format(path.display().to_string(), e))?;
    let name = clean_name(&stem(path), &opts.tokens);
    let data = out_dir.as_ref().join(format!("{name}_f_data.csv"));
    let log = out_dir.as_ref().join(format!("{name}_f_log.csv"));
    f.data.write(&data)?;
    let mut s = f.log.join("\n");
    s.push('\n');
    crate::write(&log, s)?;
    info!(
        "filtered {} into {} ({} rows, {} samples)",
        path.display(),
        data.display(),
        f.data.len(),
        f.data.header.len() - 1
    );
    Ok((data, log))
}

/// rename the sample columns of an illumination series by the cumulative
/// illumination time. Every sample name ends in `_<n>` for the first scan or
/// `_+<n>` for a scan after `n` more seconds of illumination
pub fn illumination_names<S: AsRef<str>>(
    names: &[S],
) -> Result<Vec<String>, String> {
    static TIME: OnceLock<Regex> = OnceLock::new();
    let time = TIME.get_or_init(|| Regex::new(r"\+?\d+").unwrap());
    let mut total = 0;
    let mut ret = Vec::with_capacity(names.len());
    for name in names {
        let name = name.as_ref();
        let last = name.rsplit('_').next().unwrap_or_default();
        let Some(m) = time.find(last) else {
            return Err(format!("no illumination time in `{name}`"));
        };
        match m.as_str().strip_prefix('+') {
            Some(n) => {
                total += n
                    .parse::<u64>()
                    .map_err(|_| format!("bad time in `{name}`"))?;
                ret.push(total.to_string());
            }
            None => ret.push("0".to_owned()),
        }
    }
    Ok(ret)
}

/// filter an illumination series at `path` and write it to
/// `<out_dir>/<stem>_select.csv` with the samples named by
/// [illumination_names]
pub fn illumination_file(
    path: impl AsRef<Path>,
    out_dir: impl AsRef<Path>,
    opts: &Options,
) -> Result<PathBuf, FileError> {
    let path = path.as_ref();
    let format = |e| FileError::Format(path.display().to_string(), e);
    let text = crate::read_to_string(path)?;
    let mut f = filter(&text, opts).map_err(format)?;
    let names = illumination_names(&f.data.header[1..]).map_err(format)?;
    f.data.header.truncate(1);
    f.data.header.extend(names);
    let out = out_dir.as_ref().join(format!("{}_select.csv", stem(path)));
    f.data.write(&out)?;
    info!("wrote illumination series {}", out.display());
    Ok(out)
}
