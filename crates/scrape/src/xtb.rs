//! Conversions of xtb outputs for viewing in Chemcraft.

use std::sync::OnceLock;

use regex::Regex;

static CELL: OnceLock<[Regex; 4]> = OnceLock::new();

fn regexes() -> &'static [Regex; 4] {
    CELL.get_or_init(|| {
        [
            Regex::new(r"eigval\s:(\s+-?\d+\.\d+)+").unwrap(),
            Regex::new(
                r"\w+:\s(-\d+\.\d+)\s\w+:\s\d\.\d+\s\w+:\s\d\.\d\.\d\s\(\w+\)",
            )
            .unwrap(),
            Regex::new(r"^\s*[A-Za-z]{1,2}(\s+[-+]?\d+[.,]\d+){3}\s*$").unwrap(),
            Regex::new(r"^\s*\d+\s*$").unwrap(),
        ]
    })
}

/// the `eigval :` rows of an xtb frequency printout
pub fn eigenvalues(text: &str) -> Vec<&str> {
    let [eigval, ..] = regexes();
    text.lines()
        .filter_map(|l| eigval.find(l))
        .map(|m| m.as_str())
        .collect()
}

/// rewrite an xtb optimization trajectory for Chemcraft. The comment lines
/// `energy: -x gnorm: y xtb: 6.x.y (hash)` become
/// `-x<TAB> frame N<TAB>xyz file by xtb`, counting frames from 0. Count
/// lines and atom lines are kept and anything else is dropped
pub fn trj_to_chemcraft(text: &str) -> String {
    let [_, comment, atom, count] = regexes();
    let mut ret = String::new();
    let mut frame = 0;
    for line in text.lines() {
        if count.is_match(line) || atom.is_match(line) {
            ret.push_str(line);
        } else if let Some(c) = comment.captures(line) {
            let energy = &c[1];
            ret.push_str(&format!("{energy}\t frame {frame}\txyz file by xtb"));
            frame += 1;
        } else {
            continue;
        }
        ret.push('\n');
    }
    ret
}
