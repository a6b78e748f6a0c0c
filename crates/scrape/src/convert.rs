//! Conversions of other XYZ dialects to standard XYZ files.

use atoms::{Atom, Xyz, bohr_to_angstrom};
use log::warn;

use crate::ParseError;

/// placeholder atoms written by Chem3D: lone pairs and dummies
fn is_placeholder(label: &str) -> bool {
    label.eq_ignore_ascii_case("lp") || label.eq_ignore_ascii_case("xx")
}

fn bad_atom(e: atoms::AtomError) -> ParseError {
    ParseError::Format(e.to_string())
}

/// the atom count at the start of the first non-blank line. Tinker files may
/// follow it with a title
fn parse_count(text: &str) -> Result<isize, ParseError> {
    let first = text
        .lines()
        .find(|l| !l.trim().is_empty())
        .and_then(|l| l.split_whitespace().next())
        .unwrap_or_default();
    first.parse().map_err(|_| ParseError::BadNumber(first.to_owned()))
}

/// parse `label` and three coordinates, or `None` if a coordinate is not a
/// number
fn atom(label: &str, coords: &[&str]) -> Option<Result<Atom, ParseError>> {
    let mut coord = [0.0; 3];
    for (c, s) in coord.iter_mut().zip(coords) {
        *c = s.replace(',', ".").parse().ok()?;
    }
    let [x, y, z] = coord;
    Some(Atom::new_from_label(label, x, y, z).map_err(bad_atom))
}

/// convert a Tinker XYZ file as written by Chem3D to standard XYZ. Each atom
/// line is `index symbol x y z type connections...`; lone pairs and dummy
/// atoms are dropped and the atom count adjusted to match
pub fn tinker_to_xyz(text: &str) -> Result<Xyz, ParseError> {
    let count = parse_count(text)?;
    if count < 0 {
        return Err(ParseError::Format(format!(
            "negative number of atoms: {count}"
        )));
    }
    let mut atoms = Vec::new();
    for line in text.lines().skip_while(|l| l.trim().is_empty()).skip(1) {
        let f: Vec<&str> = line.split_whitespace().collect();
        if f.len() < 5 || f[0].parse::<usize>().is_err() {
            continue;
        }
        if is_placeholder(f[1]) {
            continue;
        }
        if let Some(a) = atom(f[1], &f[2..5]) {
            atoms.push(a?);
        }
    }
    Ok(Xyz::new("", atoms))
}

/// The result of converting a bohr XYZ file
#[derive(Debug, PartialEq)]
pub struct Converted {
    pub xyz: Xyz,
    /// the count line was negative and its absolute value was used
    pub negative_count: bool,
}

/// convert an XYZ file with coordinates in bohr to Å. Atomic numbers in the
/// label column are replaced by element symbols, lone pairs and dummy atoms
/// are dropped
pub fn bohr_xyz_to_angstrom(text: &str) -> Result<Converted, ParseError> {
    let count = parse_count(text)?;
    let negative_count = count < 0;
    if negative_count {
        warn!("number of atoms is negative, using its absolute value");
    }
    let mut dropped = 0;
    let mut atoms = Vec::new();
    for line in text.lines().skip_while(|l| l.trim().is_empty()).skip(1) {
        let f: Vec<&str> = line.split_whitespace().collect();
        if f.len() != 4 {
            continue;
        }
        if is_placeholder(f[0]) {
            dropped += 1;
            continue;
        }
        if let Some(a) = atom(f[0], &f[1..]) {
            let a = a?;
            atoms.push(Atom::new(
                a.atomic_number,
                bohr_to_angstrom(a.x),
                bohr_to_angstrom(a.y),
                bohr_to_angstrom(a.z),
            ));
        }
    }
    let want = count.unsigned_abs().saturating_sub(dropped);
    if want != atoms.len() {
        warn!("expected {want} atoms but found {}", atoms.len());
    }
    Ok(Converted {
        xyz: Xyz::new("", atoms),
        negative_count,
    })
}
