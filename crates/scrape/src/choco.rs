//! The most recent `choco upgrade` in a Chocolatey log.

use std::sync::OnceLock;

use regex::Regex;
use serde::Serialize;

/// the closing line must follow the `Upgraded:` line within this many lines
const MAX_SPAN: usize = 20;

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Upgrade {
    /// `YYYY-mm-dd HH:MM:SS` of the `Upgraded:` line
    pub time: String,
    /// package name and version, like `("git", "v2.40.1")`
    pub packages: Vec<(String, String)>,
}

static CELL: OnceLock<[Regex; 3]> = OnceLock::new();

pub fn last_upgrade(log: &str) -> Option<Upgrade> {
    let [upgraded, end, package] = CELL.get_or_init(|| {
        const STAMP: &str = r"^(\d{4}-\d{2}-\d{2} \d{2}:\d{2}:\d{2}),\d{3} \d+";
        [
            Regex::new(&format!(r"{STAMP} \[WARN \] - Upgraded:")).unwrap(),
            Regex::new(&format!(r"{STAMP} \[INFO \] - *$")).unwrap(),
            Regex::new(&format!(r"{STAMP} \[INFO \] -  - (\S+)\s+(v[\d.]+)"))
                .unwrap(),
        ]
    });
    let lines: Vec<&str> = log.lines().collect();
    let (start, stop) = lines
        .iter()
        .enumerate()
        .filter(|(_, l)| upgraded.is_match(l))
        .filter_map(|(i, _)| {
            let j = (i + 1..lines.len()).find(|&j| end.is_match(lines[j]))?;
            (j - i < MAX_SPAN).then_some((i, j))
        })
        .last()?;
    let time = upgraded.captures(lines[start])?[1].to_owned();
    let packages = lines[start + 1..stop]
        .iter()
        .filter_map(|l| package.captures(l))
        .map(|c| (c[2].to_owned(), c[3].to_owned()))
        .collect();
    Some(Upgrade { time, packages })
}
