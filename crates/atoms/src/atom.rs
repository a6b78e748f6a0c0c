use std::{
    fmt::Display,
    ops::{Mul, Neg},
    str::FromStr,
};

use crate::{AtomError, MAX_Z, NUMBER_TO_SYMBOL, Vec3, symbol_to_number};

#[derive(Debug, Clone, Copy)]
pub struct Atom {
    pub atomic_number: usize,
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl PartialEq for Atom {
    fn eq(&self, other: &Self) -> bool {
        let eps = 1e-8;
        let close = |a: f64, b: f64| (a - b).abs() < eps;
        self.atomic_number == other.atomic_number
            && close(self.x, other.x)
            && close(self.y, other.y)
            && close(self.z, other.z)
    }
}

impl Neg for Atom {
    type Output = Self;

    fn neg(self) -> Self::Output {
        Self {
            atomic_number: self.atomic_number,
            x: -self.x,
            y: -self.y,
            z: -self.z,
        }
    }
}

/// scale the coordinates, leaving the element alone
impl Mul<f64> for Atom {
    type Output = Atom;

    fn mul(self, rhs: f64) -> Self::Output {
        Atom {
            x: self.x * rhs,
            y: self.y * rhs,
            z: self.z * rhs,
            ..self
        }
    }
}

impl Display for Atom {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{:2} {:15.10} {:15.10} {:15.10}",
            self.label(),
            self.x,
            self.y,
            self.z
        )
    }
}

/// parse a coordinate, accepting a comma as the decimal separator
pub(crate) fn parse_coord(s: &str) -> Option<f64> {
    if s.contains(',') {
        s.replace(',', ".").parse().ok()
    } else {
        s.parse().ok()
    }
}

impl FromStr for Atom {
    type Err = AtomError;

    /// parse an Atom from a line like
    ///  C 1.0 1.0 1.0
    /// where the label can also be an atomic number
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let fields: Vec<_> = s.split_whitespace().collect();
        if fields.len() != 4 {
            return Err(AtomError::FieldCount(s.to_owned()));
        }
        let mut coord = [0.0; 3];
        for (c, f) in coord.iter_mut().zip(&fields[1..]) {
            *c = parse_coord(f)
                .ok_or_else(|| AtomError::BadCoord(s.to_owned()))?;
        }
        let [x, y, z] = coord;
        Self::new_from_label(fields[0], x, y, z)
    }
}

impl Atom {
    pub fn new(atomic_number: usize, x: f64, y: f64, z: f64) -> Self {
        Self {
            atomic_number,
            x,
            y,
            z,
        }
    }

    /// construct an Atom from either an element symbol or an atomic number
    pub fn new_from_label(
        label: &str,
        x: f64,
        y: f64,
        z: f64,
    ) -> Result<Self, AtomError> {
        let number = match label.parse::<usize>() {
            Ok(n) if (1..=MAX_Z).contains(&n) => n,
            Ok(_) => return Err(AtomError::UnknownElement(label.to_owned())),
            Err(_) => symbol_to_number(label)
                .ok_or_else(|| AtomError::UnknownElement(label.to_owned()))?,
        };
        Ok(Self::new(number, x, y, z))
    }

    /// the element symbol, or the dummy atom `X` for atomic numbers past
    /// the end of the periodic table
    #[inline]
    pub fn label(&self) -> &str {
        NUMBER_TO_SYMBOL
            .get(self.atomic_number)
            .copied()
            .unwrap_or(NUMBER_TO_SYMBOL[0])
    }

    pub fn coord(&self) -> Vec3 {
        Vec3::new(self.x, self.y, self.z)
    }
}
