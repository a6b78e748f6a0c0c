//! Cartesian to Z-matrix conversion along the atom ordering: atom `i` is bonded
//! to `i-1`, makes an angle with `i-2`, and a dihedral with `i-3`.

use std::fmt::Display;

use crate::{Atom, Vec3};

/// a reference atom (1-based, as written in the Z-matrix) and the value of
/// the internal coordinate to it
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ref {
    pub atom: usize,
    pub value: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ZmatLine {
    pub label: String,
    pub bond: Option<Ref>,
    pub angle: Option<Ref>,
    pub dihedral: Option<Ref>,
}

impl Display for ZmatLine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:<2}", self.label)?;
        for r in [self.bond, self.angle, self.dihedral].into_iter().flatten() {
            write!(f, " {:4} {:12.6}", r.atom, r.value)?;
        }
        Ok(())
    }
}

/// distance between `a` and `b`
pub fn distance(a: &Vec3, b: &Vec3) -> f64 {
    (a - b).norm()
}

/// angle a-b-c in degrees, with the vertex at `b`
pub fn angle(a: &Vec3, b: &Vec3, c: &Vec3) -> f64 {
    let u = a - b;
    let v = c - b;
    let cos = (u.dot(&v) / (u.norm() * v.norm())).clamp(-1.0, 1.0);
    cos.acos().to_degrees()
}

/// dihedral angle a-b-c-d in degrees, in (-180, 180]
pub fn dihedral(a: &Vec3, b: &Vec3, c: &Vec3, d: &Vec3) -> f64 {
    let b0 = a - b;
    let b1 = (c - b).normalize();
    let b2 = d - c;
    let v = b0 - b1 * b0.dot(&b1);
    let w = b2 - b1 * b2.dot(&b1);
    let x = v.dot(&w);
    let y = b1.cross(&v).dot(&w);
    y.atan2(x).to_degrees()
}

pub fn from_atoms(atoms: &[Atom]) -> Vec<ZmatLine> {
    let coords: Vec<Vec3> = atoms.iter().map(Atom::coord).collect();
    let mut ret = Vec::with_capacity(atoms.len());
    for (i, atom) in atoms.iter().enumerate() {
        let r = &coords[i];
        let bond = (i >= 1).then(|| Ref {
            atom: i,
            value: distance(r, &coords[i - 1]),
        });
        let angle = (i >= 2).then(|| Ref {
            atom: i - 1,
            value: angle(r, &coords[i - 1], &coords[i - 2]),
        });
        let dihedral = (i >= 3).then(|| Ref {
            atom: i - 2,
            value: dihedral(r, &coords[i - 1], &coords[i - 2], &coords[i - 3]),
        });
        ret.push(ZmatLine {
            label: atom.label().to_owned(),
            bond,
            angle,
            dihedral,
        });
    }
    ret
}
