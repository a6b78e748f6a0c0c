use std::{
    fmt::Write,
    fs,
    path::{Path, PathBuf},
};

use log::{error, info};

use crate::{Job, Policy, RunError, Scratch, string};

use super::{Program, Tools};

/// intensities below this are dropped from `anmr.dat`
pub const THRESHOLD: f64 = 0.001;

/// An ANMR spectrum simulation inside the directory of a finished CENSO run
#[derive(Clone, Debug)]
pub struct Anmr {
    pub namespace: String,
    /// spectrometer frequency in MHz
    pub freq: f64,
    /// maximum spin system size
    pub mss: usize,
    /// run `nmrplot.py` on the filtered spectrum
    pub plot: bool,
    pub scratch: String,
}

impl Anmr {
    pub fn new(namespace: &str, freq: f64) -> Self {
        Self {
            namespace: crate::namespace(namespace),
            freq,
            mss: 12,
            plot: true,
            scratch: "censo_tmp".to_owned(),
        }
    }

    pub fn spectrum_file(&self) -> String {
        format!("{}_anmr.dat", self.namespace)
    }
}

impl Program for Anmr {
    const NAME: &'static str = "anmr";

    fn namespace(&self) -> &str {
        &self.namespace
    }

    fn outfile(&self) -> String {
        format!("{}_anmr.out", self.namespace)
    }

    fn scratch_dir(&self) -> &str {
        &self.scratch
    }

    fn stage(
        &self,
        _tools: &Tools,
        _cwd: &Path,
        _scratch: &Scratch,
    ) -> Result<(), RunError> {
        Ok(())
    }

    /// `--plain` reads the couplings from the `nmrprop.dat` files CENSO
    /// writes instead of the ORCA outputs
    fn args(&self) -> Vec<String> {
        string![
            "--orca",
            "--plain",
            "-mf",
            self.freq.to_string(),
            "-mss",
            self.mss.to_string()
        ]
    }

    fn finish(&self, tools: &Tools, scratch: &Scratch) -> Result<(), RunError> {
        let raw = scratch.join("anmr.dat");
        let data = fs::read_to_string(&raw).map_err(|e| RunError::io(&raw, e))?;
        let spectrum = filter_spectrum(&data, THRESHOLD)?;
        let out = scratch.join(self.spectrum_file());
        fs::write(&out, write_spectrum(&spectrum))
            .map_err(|e| RunError::io(&out, e))?;
        info!("wrote {} points to {}", spectrum.len(), out.display());

        if self.plot {
            Job::new(tools.get("nmrplot")?)
                .args([
                    "-i".to_owned(),
                    self.spectrum_file(),
                    "-o".to_owned(),
                    format!("{}_nmrplot", self.namespace),
                ])
                .dir(scratch.path())
                .run()?;
        }
        Ok(())
    }

    /// the outputs stay next to the CENSO results, and the scratch directory
    /// must already exist
    fn run(&self, tools: &Tools, cwd: &Path) -> Result<Vec<PathBuf>, RunError> {
        let scratch =
            Scratch::existing(cwd.join(&self.scratch)).inspect_err(|_| {
                error!(
                    "was CENSO run? start from the directory containing `{}`",
                    self.scratch
                )
            })?;
        self.job(tools, &scratch)?.run()?;
        self.finish(tools, &scratch)?;
        Ok(vec![
            scratch.join(self.outfile()),
            scratch.join(self.spectrum_file()),
        ])
    }

    fn results(&self) -> Vec<(String, Policy)> {
        Vec::new()
    }
}

/// read the two-column `anmr.dat` output and drop the points with intensity
/// below `threshold`. The first and last shift of the full spectrum are
/// re-inserted at `threshold` to keep the plotted range
pub fn filter_spectrum(
    data: &str,
    threshold: f64,
) -> Result<Vec<(f64, f64)>, RunError> {
    let mut points = Vec::new();
    for line in data.lines() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        let mut fields = line.split_whitespace().map(str::parse::<f64>);
        match (fields.next(), fields.next()) {
            (Some(Ok(x)), Some(Ok(y))) => points.push((x, y)),
            _ => return Err(RunError::Parse(line.to_owned())),
        }
    }
    let (Some(&(first, _)), Some(&(last, _))) = (points.first(), points.last())
    else {
        return Err(RunError::Parse("empty spectrum".to_owned()));
    };
    let mut ret = Vec::with_capacity(points.len() + 2);
    ret.push((first, threshold));
    ret.extend(points.into_iter().filter(|&(_, y)| y >= threshold));
    ret.push((last, threshold));
    Ok(ret)
}

/// format `x` like C's `%.5e`, with a sign and at least two exponent digits
pub fn sci(x: f64) -> String {
    let s = format!("{x:.5e}");
    let Some((mantissa, exp)) = s.split_once('e') else {
        return s;
    };
    let exp: i32 = exp.parse().unwrap_or_default();
    let sign = if exp < 0 { '-' } else { '+' };
    format!("{mantissa}e{sign}{:02}", exp.abs())
}

pub fn write_spectrum(points: &[(f64, f64)]) -> String {
    let mut s = String::new();
    for (x, y) in points {
        let _ = writeln!(s, "{} {}", sci(*x), sci(*y));
    }
    s
}
