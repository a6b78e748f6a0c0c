/// CODATA 2018 Bohr radius in Å
pub const BOHR_TO_ANGSTROM: f64 = 0.529177210903;

/// kcal/mol per hartree
pub const HARTREE_TO_KCAL: f64 = 627.5094740631;

#[inline]
pub fn bohr_to_angstrom(x: f64) -> f64 {
    x * BOHR_TO_ANGSTROM
}

#[inline]
pub fn angstrom_to_bohr(x: f64) -> f64 {
    x / BOHR_TO_ANGSTROM
}
