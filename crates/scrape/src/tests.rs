use std::fs::read_to_string;

use approx::assert_abs_diff_eq;
use atoms::{Atom, BOHR_TO_ANGSTROM, HARTREE_TO_KCAL};
use test_case::test_case;

use crate::{
    choco, convert,
    ir::{self, IrMode, IrSpectrum},
    loewdin::{self, Composition, Filter, LoewdinMode},
    trj::{Source, Trajectory},
    xtb, *,
};

const LINES: [&str; 9] =
    ["junk", "START", "a", "b", "", "", "c", "--- end", "c"];

#[test_case(EndCondition::TwoBlankLines, &["START", "a", "b"])]
#[test_case(EndCondition::Separator("---".to_owned()), &["START", "a", "b", "", "", "c"])]
#[test_case(EndCondition::RepeatedLine, &["START", "a", "b"])]
#[test_case(
    EndCondition::BlankOrSeparator { blanks: 2, separator: "---".to_owned() },
    &["START", "a", "b", ""]
)]
#[test_case(
    EndCondition::BlankOrSeparator { blanks: 3, separator: "---".to_owned() },
    &["START", "a", "b", "", "", "c"]
)]
fn extract(end: EndCondition, want: &[&str]) {
    let got = extract_block(&LINES, "START", end).unwrap();
    assert_eq!(got, want);
}

#[test]
fn extract_options() {
    assert_eq!(
        extract_block(&LINES, "missing", EndCondition::TwoBlankLines),
        Err(BlockError::StartNotFound("missing".to_owned()))
    );

    let lines = ["x", "  a START line  ", "y", "z"];
    let block = Block::new("START", EndCondition::TwoBlankLines);
    assert!(matches!(
        block.extract(&lines),
        Err(BlockError::StartNotFound(_))
    ));
    let block = block.contains();
    assert_eq!(
        block.extract(&lines),
        Err(BlockError::Unterminated("START".to_owned()))
    );
    let block = block.allow_eof().offset(1);
    assert_eq!(block.extract(&lines).unwrap(), &lines[..]);

    // the underline would otherwise end the block immediately
    let lines = ["TITLE", "-----", "a", "-----"];
    let block = Block::new("TITLE", EndCondition::Separator("--".to_owned()));
    assert_eq!(block.extract(&lines).unwrap(), &["TITLE"]);
    assert_eq!(block.skip(1).extract(&lines).unwrap(), &lines[..3]);
}

#[test]
fn field_access() {
    let f = fields("  6:   1581.67  x");
    assert_eq!(f.len(), 3);
    assert_eq!(f.parse_trimmed::<usize>(0), Ok(6));
    assert_eq!(f.parse::<f64>(1), Ok(1581.67));
    assert_eq!(f.parse::<f64>(2), Err(ParseError::BadNumber("x".to_owned())));
    assert_eq!(
        f.get(5),
        Err(ParseError::MissingField {
            line: "  6:   1581.67  x".to_owned(),
            index: 5
        })
    );
}

#[test]
fn ir_spectrum() {
    let got = IrSpectrum::load("testfiles/ir.out").unwrap();
    assert_eq!(got.lines.len(), 13);
    assert_eq!(got.lines[0], "-----------");
    assert_eq!(got.lines[1], "IR SPECTRUM");
    assert!(got.lines[12].starts_with("** The dipole"));
    assert_eq!(
        got.modes,
        vec![
            IrMode {
                mode: 6,
                freq: 1581.67,
                eps: 0.012835,
                intensity: 64.86
            },
            IrMode {
                mode: 7,
                freq: 3719.47,
                eps: 0.000891,
                intensity: 4.50
            },
            IrMode {
                mode: 8,
                freq: 3831.70,
                eps: 0.007542,
                intensity: 38.11
            },
        ]
    );

    let dir = tempfile::tempdir().unwrap();
    let out = ir::export_name(&dir.path().join("ir.out"));
    assert_eq!(out, dir.path().join("ir.out_IR_Part.out"));
    got.export(&out).unwrap();
    let want: Vec<_> = got.lines.iter().map(|l| format!("{l}\n")).collect();
    assert_eq!(read_to_string(&out).unwrap(), want.concat());
}

#[test]
fn ir_to_eof() {
    let lines = ["--", "IR SPECTRUM", "--", "  6:  100.0  0.1  2.0  0.1 ( 0 0 0)"];
    let got = IrSpectrum::from_lines(&lines).unwrap();
    assert_eq!(got.lines.len(), 4);
    assert_eq!(got.modes.len(), 1);
    assert_eq!(
        IrSpectrum::from_lines(&["nothing here"]),
        Err(ParseError::Block(BlockError::StartNotFound(
            "IR SPECTRUM".to_owned()
        )))
    );
}

#[test]
fn default_export_name() {
    let got = ir::default_export_name();
    assert!(got.starts_with("Output"));
    assert_eq!(got.len(), "Output".len() + "dd_mm_YYYY".len());
}

fn casscf() -> Vec<loewdin::Orbital> {
    let s = read_to_string("testfiles/casscf.out").unwrap();
    let lines: Vec<_> = s.lines().collect();
    loewdin::read(&lines, LoewdinMode::Casscf).unwrap()
}

#[test]
fn loewdin_orbitals() {
    let orbs = casscf();
    assert_eq!(orbs.len(), 8);
    let numbers: Vec<_> = orbs.iter().map(|o| o.number).collect();
    assert_eq!(numbers, (0..8).collect::<Vec<_>>());
    assert_eq!(orbs[4].energy, -0.55954);
    assert_eq!(orbs[4].occupation, 1.5);
    assert_eq!(orbs[4].contributions.len(), 4);
    assert_eq!(orbs[4].contributions["1dz2"], 70.0);
    assert_eq!(orbs[7].contributions["1dxy"], 40.0);

    assert!(matches!(
        loewdin::read(&["nothing"], LoewdinMode::Uhf),
        Err(ParseError::Block(BlockError::StartNotFound(_)))
    ));
}

#[test]
fn loewdin_summed() {
    let mut orbs = casscf();
    loewdin::sum_shells(&mut orbs, &['d']);
    assert_eq!(orbs[4].contributions.len(), 3);
    assert_abs_diff_eq!(orbs[4].contributions["1d"], 100.0);
    assert_eq!(orbs[4].contributions["0pz"], 0.0);

    let filter = Filter {
        orbitals: Some((3, 6)),
        atoms: Some(vec![1]),
        aos: None,
    };
    let got = Composition::new(&orbs, &filter);
    assert_eq!(got.orbitals, vec![3, 4, 5, 6]);
    assert_eq!(got.aos, vec!["1d"]);
    assert_eq!(
        got.to_string(),
        "AO       3       4       5       6\n\
         1d    36.7   100.0    52.2    50.0\n"
    );
}

#[test]
fn loewdin_csv() {
    let filter = Filter {
        orbitals: Some((6, 7)),
        atoms: None,
        aos: Some(vec!["pz".to_owned(), "dx".to_owned()]),
    };
    let got = Composition::new(&casscf(), &filter);
    assert_eq!(got.to_csv(), "AO,6,7\n0pz,48,20\n1dxy,25,40\n");
}

fn uhf(mode: LoewdinMode) -> Vec<loewdin::Orbital> {
    let s = read_to_string("testfiles/uhf.out").unwrap();
    let lines: Vec<_> = s.lines().collect();
    loewdin::read(&lines, mode).unwrap()
}

#[test]
fn loewdin_uhf_spin_up() {
    let orbs = uhf(LoewdinMode::Uhf);
    let numbers: Vec<_> = orbs.iter().map(|o| o.number).collect();
    assert_eq!(numbers, [0, 1, 2]);
    assert_eq!(orbs[0].energy, -19.12345);
    assert_eq!(orbs[2].occupation, 0.0);
    assert_eq!(orbs[1].contributions["1s"], 99.8);
    assert!(orbs.iter().all(|o| o.energy != -19.1 && o.energy != -0.4));

    let got = Composition::new(&orbs, &Filter::default());
    assert_eq!(
        got.to_csv(),
        "AO,0,1,2\n0pz,0.5,0,60\n0s,99.5,0.2,10\n1s,0,99.8,30\n"
    );
}

#[test]
fn loewdin_uno() {
    let orbs = uhf(LoewdinMode::Uno);
    assert_eq!(orbs.len(), 2);
    assert_eq!(orbs[1].energy, -0.3);
    assert_eq!(orbs[1].occupation, 0.95);
    assert_eq!(orbs[1].contributions.len(), 2);
    assert_eq!(orbs[1].contributions["0px"], 85.0);
    assert_eq!(orbs[0].contributions["0s"], 99.0);
}

#[test_case("3dz2", (3, "dz2"))]
#[test_case("12s", (12, "s"))]
fn loewdin_keys(key: &str, want: (usize, &str)) {
    assert_eq!(loewdin::split_key(key), want);
}

#[test]
fn loewdin_modes() {
    assert_eq!("uno".parse::<LoewdinMode>(), Ok(LoewdinMode::Uno));
    assert_eq!("CASSCF".parse::<LoewdinMode>(), Ok(LoewdinMode::Casscf));
    assert!("rhf".parse::<LoewdinMode>().is_err());
}

const TRJ: &str = "3
 energy: -5.070544440612 gnorm: 0.000321164002 xtb: 6.5.1 (579679a)
O  0.00000000  0.00000000 -0.39
H  0.00000000  0.76 0.19
H  0.00000000 -0.76 0.19
3
 energy: -5.080000000000 gnorm: 0.000100000000 xtb: 6.5.1 (579679a)
O  0.00000000  0.00000000 -0.38
H  0.00000000  0.75 0.18
H  0.00000000 -0.75 0.18
";

#[test]
fn xtb_chemcraft() {
    let got = xtb::trj_to_chemcraft(&format!("{TRJ}trailing junk\n"));
    let lines: Vec<_> = got.lines().collect();
    assert_eq!(lines.len(), 10);
    assert_eq!(lines[1], "-5.070544440612\t frame 0\txyz file by xtb");
    assert_eq!(lines[6], "-5.080000000000\t frame 1\txyz file by xtb");
    assert_eq!(lines[2], "O  0.00000000  0.00000000 -0.39");
}

#[test]
fn xtb_eigenvalues() {
    let text = "
  eigval :       -0.00    -0.00     0.00     0.00     0.00     0.00
  some other line
  eigval :     1581.67   3719.47   \n\
";
    assert_eq!(
        xtb::eigenvalues(text),
        vec![
            "eigval :       -0.00    -0.00     0.00     0.00     0.00     0.00",
            "eigval :     1581.67   3719.47",
        ]
    );
}

#[test]
fn trajectory() {
    let got = Trajectory::parse(TRJ, Source::Xtb).unwrap();
    assert_eq!(got.atoms, 3);
    assert_eq!(got.frames.len(), 2);
    assert_eq!(got.frames[0].energy, Some(-5.070544440612));
    assert_eq!(got.lowest().unwrap().index, 1);
    assert_eq!(got.frames[1].relative, Some(0.0));
    assert_abs_diff_eq!(
        got.frames[0].relative.unwrap(),
        (-5.070544440612 - -5.08) * HARTREE_TO_KCAL,
        epsilon = 1e-8
    );

    // the xtb pattern finds nothing in ORCA comments
    let orca = "1\nCoordinates from ORCA-job input E -76.123456789\nO 0.0 0.0 0.0\n";
    let got = Trajectory::parse(orca, Source::Xtb).unwrap();
    assert_eq!(got.frames[0].energy, None);
    assert!(got.lowest().is_none());
    let got = Trajectory::parse(orca, Source::Orca).unwrap();
    assert_eq!(got.frames[0].energy, Some(-76.123456789));

    assert!(Trajectory::parse("three\n", Source::Xtb).is_err());
    let huge = format!("{}\n", usize::MAX);
    assert!(matches!(
        Trajectory::parse(&huge, Source::Xtb),
        Err(ParseError::Format(_))
    ));
    assert_eq!("-orca".parse::<Source>(), Ok(Source::Orca));
}

#[test]
fn tinker() {
    let text = "    4  chem3d title
  1  C   0.000000  0.000000  0.000000  1  2 3
  2  H   1.000000  0.000000  0.000000  5  1
  3  Lp  0.500000  0.500000  0.500000 20  1
  4  Cl -1,500000  0.000000  0.000000 12  1
";
    let got = convert::tinker_to_xyz(text).unwrap();
    assert_eq!(
        got.atoms,
        vec![
            Atom::new(6, 0.0, 0.0, 0.0),
            Atom::new(1, 1.0, 0.0, 0.0),
            Atom::new(17, -1.5, 0.0, 0.0),
        ]
    );
    assert!(got.to_string().starts_with("3\n\n"));
    assert!(convert::tinker_to_xyz("-1\n").is_err());
}

#[test]
fn bohr_to_angstrom() {
    let text = "-3
comment line
8 0.0 0.0 1.0
H 1,0 0.0 0.0
Xx 0.0 0.0 0.0
";
    let got = convert::bohr_xyz_to_angstrom(text).unwrap();
    assert!(got.negative_count);
    assert_eq!(
        got.xyz.atoms,
        vec![
            Atom::new(8, 0.0, 0.0, BOHR_TO_ANGSTROM),
            Atom::new(1, BOHR_TO_ANGSTROM, 0.0, 0.0),
        ]
    );
    let s = got.xyz.to_string();
    assert_eq!(s.lines().nth(2).unwrap(), "O     0.0000000000    0.0000000000    0.5291772109");
    assert!(convert::bohr_xyz_to_angstrom("Q 1.0\n").is_err());
}

#[test]
fn chocolatey() {
    let log = "\
2023-05-01 10:00:00,100 1234 [WARN ] - Upgraded:
2023-05-01 10:00:00,101 1234 [INFO ] -  - git v2.40.1
2023-05-01 10:00:00,102 1234 [INFO ] -  - 7zip v23.1.0
2023-05-01 10:00:00,103 1234 [INFO ] - \n\
2023-06-01 09:00:00,100 99 [WARN ] - Upgraded:
2023-06-01 09:00:00,101 99 [INFO ] -  - nodejs v20.3.0
2023-06-01 09:00:00,102 99 [INFO ] - \n\
2023-06-01 09:00:01,000 99 [INFO ] - Chocolatey upgraded 1/1 packages.
";
    let got = choco::last_upgrade(log).unwrap();
    assert_eq!(got.time, "2023-06-01 09:00:00");
    assert_eq!(
        got.packages,
        vec![("nodejs".to_owned(), "v20.3.0".to_owned())]
    );
    assert_eq!(choco::last_upgrade("nothing to see"), None);
}
