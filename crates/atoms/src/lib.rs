//! Atoms, element symbols, and the small amount of geometry needed to shuffle
//! coordinate files between formats.

use std::{error::Error, fmt::Display};

pub use atom::*;
pub use periodic::*;
pub use units::*;
pub use xyz::*;

pub mod atom;
pub mod periodic;
pub mod units;
pub mod xyz;
pub mod zmat;

#[cfg(test)]
mod tests;

use nalgebra as na;

pub type Vec3 = na::Vector3<f64>;

#[derive(Debug, PartialEq, Eq, Clone)]
pub enum AtomError {
    /// an atom line did not have exactly four fields
    FieldCount(String),
    /// a coordinate field could not be parsed as a float
    BadCoord(String),
    /// the label is neither a known symbol nor an atomic number in [1, 118]
    UnknownElement(String),
    /// the first line of an XYZ file was not an atom count
    BadCount(String),
    /// the XYZ file ended before `want` atoms were read
    TooFewAtoms { want: usize, got: usize },
}

impl Display for AtomError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AtomError::FieldCount(line) => {
                write!(f, "wrong number of fields in atom line `{line}`")
            }
            AtomError::BadCoord(line) => {
                write!(f, "failed to parse coordinate in `{line}`")
            }
            AtomError::UnknownElement(s) => write!(f, "unknown element `{s}`"),
            AtomError::BadCount(line) => {
                write!(f, "expected an atom count, found `{line}`")
            }
            AtomError::TooFewAtoms { want, got } => {
                write!(f, "expected {want} atoms, found {got}")
            }
        }
    }
}

impl Error for AtomError {}
