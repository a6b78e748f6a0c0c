use std::{fmt::Display, str::FromStr};

use crate::{Atom, AtomError, BOHR_TO_ANGSTROM};

/// A single frame of an XYZ file: the atom count line is implied by `atoms`
#[derive(Debug, Default, PartialEq, Clone)]
pub struct Xyz {
    pub comment: String,
    pub atoms: Vec<Atom>,
}

impl Xyz {
    pub fn new(comment: impl Into<String>, atoms: Vec<Atom>) -> Self {
        Self {
            comment: comment.into(),
            atoms,
        }
    }

    /// return a copy of `self` with the coordinates converted from bohr to Å
    pub fn to_angstrom(&self) -> Self {
        Self {
            comment: self.comment.clone(),
            atoms: self.atoms.iter().map(|&a| a * BOHR_TO_ANGSTROM).collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.atoms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.atoms.is_empty()
    }
}

impl Display for Xyz {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "{}", self.atoms.len())?;
        writeln!(f, "{}", self.comment)?;
        for atom in &self.atoms {
            writeln!(f, "{atom}")?;
        }
        Ok(())
    }
}

impl FromStr for Xyz {
    type Err = AtomError;

    /// parse the first frame of an XYZ file. Leading blank lines are skipped,
    /// and anything after the last atom is ignored
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut lines = s.lines().skip_while(|l| l.trim().is_empty());
        let count_line = lines.next().unwrap_or_default();
        let count: usize = count_line
            .trim()
            .parse()
            .map_err(|_| AtomError::BadCount(count_line.to_owned()))?;
        let comment = lines.next().unwrap_or_default().trim().to_owned();
        let mut atoms = Vec::with_capacity(count);
        for line in lines.take(count) {
            atoms.push(line.parse()?);
        }
        if atoms.len() < count {
            return Err(AtomError::TooFewAtoms {
                want: count,
                got: atoms.len(),
            });
        }
        Ok(Self { comment, atoms })
    }
}
