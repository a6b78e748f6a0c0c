//! Energies along a multi-frame XYZ trajectory written by xtb or ORCA.

use std::{fmt::Display, str::FromStr, sync::OnceLock};

use atoms::HARTREE_TO_KCAL;
use log::warn;
use regex::Regex;
use serde::Serialize;

use crate::ParseError;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Source {
    Xtb,
    Orca,
}

impl FromStr for Source {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().trim_start_matches('-') {
            "xtb" => Ok(Self::Xtb),
            "orca" => Ok(Self::Orca),
            _ => Err(ParseError::Format(format!(
                "unknown trajectory source `{s}`, expected xtb or orca"
            ))),
        }
    }
}

static CELL: OnceLock<[Regex; 2]> = OnceLock::new();

impl Source {
    /// the energy in the comment line of a frame
    pub fn energy(&self, comment: &str) -> Option<f64> {
        let [xtb, orca] = CELL.get_or_init(|| {
            [
                Regex::new(r"energy:\s*(-?\d+\.\d+)").unwrap(),
                Regex::new(
                    r"^\w+ \w+ [a-zA-Z-]+ [a-zA-Z0-9_\-*]+ E (-?\d+\.\d+)",
                )
                .unwrap(),
            ]
        });
        let re = match self {
            Source::Xtb => xtb,
            Source::Orca => orca,
        };
        re.captures(comment)?[1].parse().ok()
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct Frame {
    pub index: usize,
    /// energy in hartree, if the comment line had one
    pub energy: Option<f64>,
    /// energy relative to the lowest frame in kcal/mol
    pub relative: Option<f64>,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Trajectory {
    pub atoms: usize,
    pub frames: Vec<Frame>,
}

impl Trajectory {
    /// split `text` into frames of `atoms + 2` lines, where `atoms` comes from
    /// the first line, and read the energy of each
    pub fn parse(text: &str, source: Source) -> Result<Self, ParseError> {
        let lines: Vec<&str> = text.lines().collect();
        let first = lines.first().map(|l| l.trim()).unwrap_or_default();
        let atoms: usize = first.parse().map_err(|_| {
            ParseError::Format(format!(
                "invalid trajectory: atom count `{first}` is not a number"
            ))
        })?;
        let size = atoms.checked_add(2).ok_or_else(|| {
            ParseError::Format(format!(
                "invalid trajectory: atom count {atoms} is too large"
            ))
        })?;
        let mut frames = Vec::new();
        for (index, chunk) in lines.chunks(size).enumerate() {
            let energy = chunk.get(1).and_then(|c| source.energy(c));
            if energy.is_none() {
                warn!("no energy found for frame {index}");
            }
            frames.push(Frame {
                index,
                energy,
                relative: None,
            });
        }
        let min = frames
            .iter()
            .filter_map(|f| f.energy)
            .min_by(f64::total_cmp);
        if let Some(min) = min {
            for f in &mut frames {
                f.relative = f.energy.map(|e| (e - min) * HARTREE_TO_KCAL);
            }
        }
        Ok(Self { atoms, frames })
    }

    /// the frame with the lowest energy
    pub fn lowest(&self) -> Option<&Frame> {
        self.frames
            .iter()
            .filter_map(|f| Some((f, f.energy?)))
            .min_by(|a, b| a.1.total_cmp(&b.1))
            .map(|(f, _)| f)
    }
}

impl Display for Trajectory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "{:>5} {:>18} {:>12}", "frame", "E/Eh", "ΔE/kcal/mol")?;
        for frame in &self.frames {
            match (frame.energy, frame.relative) {
                (Some(e), Some(r)) => {
                    writeln!(f, "{:>5} {e:>18.10} {r:>12.4}", frame.index)?
                }
                _ => writeln!(f, "{:>5} {:>18} {:>12}", frame.index, "-", "-")?,
            }
        }
        if let Some(low) = self.lowest() {
            writeln!(f, "lowest energy in frame {}", low.index)?;
        }
        Ok(())
    }
}
