use approx::assert_abs_diff_eq;
use test_case::test_case;

use crate::{zmat, *};

#[test]
fn symbol_round_trip() {
    for z in 1..=MAX_Z {
        let sym = number_to_symbol(z).unwrap();
        assert_eq!(symbol_to_number(sym), Some(z), "round trip of {sym}");
    }
    assert_eq!(MAX_Z, 118);
    assert_eq!(number_to_symbol(118), Some("Og"));
    assert_eq!(number_to_symbol(0), None);
    assert_eq!(number_to_symbol(119), None);
}

#[test_case("Fe", Some(26))]
#[test_case("FE", Some(26))]
#[test_case("fe", Some(26))]
#[test_case(" C ", Some(6))]
#[test_case("X", None; "dummy is not an element")]
#[test_case("Zz", None)]
#[test_case("", None)]
fn symbols(sym: &str, want: Option<usize>) {
    assert_eq!(symbol_to_number(sym), want);
}

#[test]
fn titlecase() {
    assert_eq!(super::periodic::titlecase("AL"), "Al");
    assert_eq!(super::periodic::titlecase("Al"), "Al");
    assert_eq!(super::periodic::titlecase("al"), "Al");
    assert_eq!(super::periodic::titlecase("H"), "H");
    assert_eq!(super::periodic::titlecase("h"), "H");
    assert_eq!(super::periodic::titlecase(""), "");
}

#[test_case(0, Some('s'))]
#[test_case(2, Some('d'))]
#[test_case(3, Some('f'))]
#[test_case(4, Some('g'))]
#[test_case(12, Some('o'))]
#[test_case(13, None)]
fn azimuthal(l: usize, want: Option<char>) {
    assert_eq!(azimuthal_letter(l), want);
}

#[test]
fn bohr() {
    assert_abs_diff_eq!(bohr_to_angstrom(1.0), 0.529177210903);
    assert_abs_diff_eq!(bohr_to_angstrom(1.8897261246), 1.0, epsilon = 1e-9);
    assert_abs_diff_eq!(
        angstrom_to_bohr(bohr_to_angstrom(3.7)),
        3.7,
        epsilon = 1e-12
    );
}

#[test]
fn parse_atom() {
    let got: Atom = " O  0.0 -0.0657441568  1,5 ".parse().unwrap();
    assert_eq!(got, Atom::new(8, 0.0, -0.0657441568, 1.5));

    let got: Atom = "26 1.0 2.0 3.0".parse().unwrap();
    assert_eq!(got.label(), "Fe");
    let big = Atom::new(200, 0.0, 0.0, 0.0);
    assert_eq!(big.label(), "X");
    assert!(big.to_string().starts_with("X "));

    assert_eq!(
        "C 1.0 2.0".parse::<Atom>(),
        Err(AtomError::FieldCount("C 1.0 2.0".to_owned()))
    );
    assert_eq!(
        "Q 1.0 2.0 3.0".parse::<Atom>(),
        Err(AtomError::UnknownElement("Q".to_owned()))
    );
    assert_eq!(
        "0 1.0 2.0 3.0".parse::<Atom>(),
        Err(AtomError::UnknownElement("0".to_owned()))
    );
}

#[test]
fn parse_xyz() {
    let got: Xyz = "
3
water geometry
 H          0.0000000000        0.7574590974        0.5217905143
 O          0.0000000000        0.0000000000       -0.0657441568
 H          0.0000000000       -0.7574590974        0.5217905143
"
    .parse()
    .unwrap();
    assert_eq!(
        got,
        Xyz::new(
            "water geometry",
            vec![
                Atom::new(1, 0.0000000000, 0.7574590974, 0.5217905143),
                Atom::new(8, 0.0000000000, 0.0000000000, -0.0657441568),
                Atom::new(1, 0.0000000000, -0.7574590974, 0.5217905143),
            ]
        )
    );

    let ang = got.to_angstrom();
    assert_abs_diff_eq!(ang.atoms[0].y, 0.7574590974 * BOHR_TO_ANGSTROM);
    assert_eq!(ang.comment, "water geometry");
}

#[test]
fn xyz_too_short() {
    let got = "3\n\nH 0.0 0.0 0.0\n".parse::<Xyz>();
    assert_eq!(got, Err(AtomError::TooFewAtoms { want: 3, got: 1 }));
    assert!(matches!(
        "three\n\n".parse::<Xyz>(),
        Err(AtomError::BadCount(_))
    ));
}

#[test]
fn zmatrix() {
    let atoms = [
        Atom::new(1, 1.0, 0.0, 0.0),
        Atom::new(8, 0.0, 0.0, 0.0),
        Atom::new(8, 0.0, 1.0, 0.0),
        Atom::new(1, 0.0, 1.0, 1.0),
    ];
    let got = zmat::from_atoms(&atoms);
    assert_eq!(got.len(), 4);
    assert_eq!(got[0].bond, None);

    let bond = got[1].bond.unwrap();
    assert_eq!(bond.atom, 1);
    assert_abs_diff_eq!(bond.value, 1.0);

    let angle = got[2].angle.unwrap();
    assert_eq!(angle.atom, 1);
    assert_abs_diff_eq!(angle.value, 90.0, epsilon = 1e-10);

    let dihedral = got[3].dihedral.unwrap();
    assert_eq!((got[3].bond.unwrap().atom, dihedral.atom), (3, 1));
    assert_abs_diff_eq!(dihedral.value, -90.0, epsilon = 1e-10);

    assert_eq!(got[0].to_string(), "H ");
    assert_eq!(got[1].to_string(), "O     1     1.000000");
}
