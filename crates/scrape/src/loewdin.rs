//! Loewdin orbital compositions from ORCA outputs (`! NormalPrint`), as a
//! matrix of percent contributions of atomic orbitals to molecular orbitals.

use std::{fmt::Display, str::FromStr};

use rustc_hash::FxHashMap;
use serde::Serialize;

use crate::{Block, EndCondition, ParseError, fields};

/// Which printout to read. For UHF only the spin-up orbitals are read
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum LoewdinMode {
    #[default]
    Casscf,
    Uhf,
    Uno,
}

impl LoewdinMode {
    pub fn marker(&self) -> &'static str {
        match self {
            LoewdinMode::Casscf => "LOEWDIN ORBITAL-COMPOSITIONS",
            LoewdinMode::Uhf => "LOEWDIN REDUCED ORBITAL POPULATIONS PER MO",
            LoewdinMode::Uno => "LOEWDIN REDUCED ORBITAL POPULATIONS PER UNO",
        }
    }

    /// the composition block, cut at the second blank line in a row or at the
    /// next section's dashed line. The dashes under the title are skipped
    pub fn block(&self) -> Block {
        Block::new(
            self.marker(),
            EndCondition::BlankOrSeparator {
                blanks: 2,
                separator: "-".repeat(28),
            },
        )
        .contains()
        .skip(1)
    }
}

impl FromStr for LoewdinMode {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "casscf" => Ok(Self::Casscf),
            "uhf" => Ok(Self::Uhf),
            "uno" => Ok(Self::Uno),
            _ => Err(ParseError::Format(format!(
                "unknown Loewdin mode `{s}`, expected CASSCF, UHF, or UNO"
            ))),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Orbital {
    pub number: usize,
    /// orbital energy in hartree
    pub energy: f64,
    pub occupation: f64,
    /// percent contribution keyed by atom index and AO label, like `3dz2`
    pub contributions: FxHashMap<String, f64>,
}

/// parse every field of `line` as a `T`, or `None` if any of them fails or
/// the line is empty
fn parse_all<T: FromStr>(line: &str) -> Option<Vec<T>> {
    let v: Vec<T> = line
        .split_whitespace()
        .map(str::parse)
        .collect::<Result<_, _>>()
        .ok()?;
    (!v.is_empty()).then_some(v)
}

fn header<T: FromStr>(
    line: Option<&str>,
    n: usize,
) -> Result<Vec<T>, ParseError> {
    let line = line.unwrap_or_default();
    match parse_all(line) {
        Some(v) if v.len() == n => Ok(v),
        _ => Err(ParseError::Format(format!(
            "expected {n} values in orbital header `{}`",
            line.trim()
        ))),
    }
}

/// parse the column groups of a composition block. Each group is a line of
/// orbital numbers, a line of energies, a line of occupations, a dashed line,
/// and one row per atomic orbital
pub fn parse<L: AsRef<str>>(block: &[L]) -> Result<Vec<Orbital>, ParseError> {
    let line = |i: usize| block.get(i).map(|l| l.as_ref());
    let mut orbs: Vec<Orbital> = Vec::new();
    let mut i = 0;
    while let Some(l) = line(i) {
        if l.trim() == "SPIN DOWN" {
            break;
        }
        let Some(numbers) = parse_all::<usize>(l) else {
            i += 1;
            continue;
        };
        let n = numbers.len();
        let energies: Vec<f64> = header(line(i + 1), n)?;
        let occupations: Vec<f64> = header(line(i + 2), n)?;
        i += 3;
        if line(i).is_some_and(|l| l.trim().starts_with('-')) {
            i += 1;
        }
        let start = orbs.len();
        orbs.extend(numbers.into_iter().zip(energies).zip(occupations).map(
            |((number, energy), occupation)| Orbital {
                number,
                energy,
                occupation,
                contributions: FxHashMap::default(),
            },
        ));
        while let Some(row) = line(i).filter(|l| !l.trim().is_empty()) {
            let f = fields(row);
            let key = format!("{}{}", f.get(0)?, f.get(2)?);
            for (j, orb) in orbs[start..].iter_mut().enumerate() {
                orb.contributions.insert(key.clone(), f.parse(3 + j)?);
            }
            i += 1;
        }
    }
    if orbs.is_empty() {
        return Err(ParseError::Format(
            "no orbitals in Loewdin block".to_owned(),
        ));
    }
    Ok(orbs)
}

/// extract and parse the compositions for `mode` from the lines of an ORCA
/// output
pub fn read<L: AsRef<str>>(
    lines: &[L],
    mode: LoewdinMode,
) -> Result<Vec<Orbital>, ParseError> {
    parse(mode.block().extract(lines)?)
}

/// split a contribution key like `12dxy` into the atom index and AO label
pub fn split_key(key: &str) -> (usize, &str) {
    let i = key
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(key.len());
    (key[..i].parse().unwrap_or_default(), &key[i..])
}

/// merge the contributions of each AO whose label begins with one of
/// `shells` into a single entry per atom, so that `3dz2` and `3dxy` become
/// `3d`
pub fn sum_shells(orbs: &mut [Orbital], shells: &[char]) {
    if shells.is_empty() {
        return;
    }
    for orb in orbs {
        let mut summed = FxHashMap::default();
        for (key, v) in orb.contributions.drain() {
            let (atom, ao) = split_key(&key);
            let key = match ao.chars().next() {
                Some(c) if shells.contains(&c) => format!("{atom}{c}"),
                _ => key,
            };
            *summed.entry(key).or_insert(0.0) += v;
        }
        orb.contributions = summed;
    }
}

/// Which part of the composition matrix to keep
#[derive(Clone, Debug, Default)]
pub struct Filter {
    /// inclusive range of orbital numbers
    pub orbitals: Option<(usize, usize)>,
    /// atom indices, as printed by ORCA starting from 0
    pub atoms: Option<Vec<usize>>,
    /// prefixes of the AO labels to keep, like `d` or `pz`
    pub aos: Option<Vec<String>>,
}

impl Filter {
    fn keep_orbital(&self, n: usize) -> bool {
        self.orbitals.is_none_or(|(lo, hi)| (lo..=hi).contains(&n))
    }

    fn keep_key(&self, key: &str) -> bool {
        let (atom, ao) = split_key(key);
        self.atoms.as_ref().is_none_or(|a| a.contains(&atom))
            && self
                .aos
                .as_ref()
                .is_none_or(|p| p.iter().any(|p| ao.starts_with(p.as_str())))
    }
}

/// A composition matrix with one row per AO and one column per orbital.
/// Missing contributions are zero
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Composition {
    pub orbitals: Vec<usize>,
    pub aos: Vec<String>,
    pub values: Vec<Vec<f64>>,
}

impl Composition {
    pub fn new(orbs: &[Orbital], filter: &Filter) -> Self {
        let orbs: Vec<_> =
            orbs.iter().filter(|o| filter.keep_orbital(o.number)).collect();
        let mut aos: Vec<String> = orbs
            .iter()
            .flat_map(|o| o.contributions.keys())
            .filter(|k| filter.keep_key(k))
            .cloned()
            .collect();
        aos.sort_by(|a, b| split_key(a).cmp(&split_key(b)));
        aos.dedup();
        let values = aos
            .iter()
            .map(|ao| {
                orbs.iter()
                    .map(|o| o.contributions.get(ao).copied().unwrap_or(0.0))
                    .collect()
            })
            .collect();
        Self {
            orbitals: orbs.iter().map(|o| o.number).collect(),
            aos,
            values,
        }
    }

    pub fn to_csv(&self) -> String {
        let mut s = String::from("AO");
        for o in &self.orbitals {
            s.push_str(&format!(",{o}"));
        }
        s.push('\n');
        for (ao, row) in self.aos.iter().zip(&self.values) {
            s.push_str(ao);
            for v in row {
                s.push_str(&format!(",{v}"));
            }
            s.push('\n');
        }
        s
    }
}

impl Display for Composition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let w = self.aos.iter().map(String::len).max().unwrap_or(0).max(2);
        write!(f, "{:<w$}", "AO")?;
        for o in &self.orbitals {
            write!(f, "{o:>8}")?;
        }
        writeln!(f)?;
        for (ao, row) in self.aos.iter().zip(&self.values) {
            write!(f, "{ao:<w$}")?;
            for v in row {
                write!(f, "{v:>8.1}")?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
