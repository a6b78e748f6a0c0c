use std::{borrow::Cow, path::Path};

use log::{debug, warn};

use crate::{FileError, has_extension};

/// the default name for the output of [concat_files]
pub const DEFAULT_OUTPUT: &str = "concatenated.csv";

/// split a single CSV record on commas. Fields may be wrapped in double
/// quotes, inside of which commas are literal and `""` is a quote
pub fn split_record(line: &str) -> Vec<String> {
    let mut ret = Vec::new();
    let mut field = String::new();
    let mut quoted = false;
    let mut chars = line.trim_end_matches(['\r', '\n']).chars().peekable();
    while let Some(c) = chars.next() {
        match c {
            '"' if quoted && chars.peek() == Some(&'"') => {
                field.push('"');
                chars.next();
            }
            '"' => quoted = !quoted,
            ',' if !quoted => ret.push(std::mem::take(&mut field)),
            c => field.push(c),
        }
    }
    ret.push(field);
    ret
}

/// split `text` into CSV records. Quoted fields may span lines, so a line
/// that leaves a quote open is joined to the next one
pub fn records(text: &str) -> Vec<Vec<String>> {
    let mut ret = Vec::new();
    let mut pending = String::new();
    for line in text.lines() {
        if pending.is_empty() {
            if line.trim().is_empty() {
                continue;
            }
        } else {
            pending.push('\n');
        }
        pending.push_str(line.trim_end_matches('\r'));
        if pending.matches('"').count() % 2 == 0 {
            ret.push(split_record(&std::mem::take(&mut pending)));
        }
    }
    if !pending.is_empty() {
        ret.push(split_record(&pending));
    }
    ret
}

fn quote(field: &str) -> Cow<'_, str> {
    if field.contains([',', '"', '\n']) {
        Cow::Owned(format!("\"{}\"", field.replace('"', "\"\"")))
    } else {
        Cow::Borrowed(field)
    }
}

pub(crate) fn join_record<S: AsRef<str>>(fields: &[S]) -> String {
    fields
        .iter()
        .map(|f| quote(f.as_ref()))
        .collect::<Vec<_>>()
        .join(",")
}

/// A CSV table with a header row. Rows are not required to have the same
/// length as the header; missing cells read as empty
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Table {
    pub header: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl Table {
    pub fn new(header: Vec<String>, rows: Vec<Vec<String>>) -> Self {
        Self { header, rows }
    }

    /// parse `text` with the first record as the header. Blank lines between
    /// records are skipped
    pub fn parse(text: &str) -> Self {
        let mut records = records(text).into_iter();
        let header = records.next().unwrap_or_default();
        let rows = records.collect();
        Self { header, rows }
    }

    pub fn read(path: impl AsRef<Path>) -> Result<Self, FileError> {
        crate::read_to_string(path).map(|s| Self::parse(&s))
    }

    pub fn column(&self, name: &str) -> Option<usize> {
        self.header.iter().position(|h| h == name)
    }

    /// the cell at `row`, `col`, empty if the row is too short
    pub fn cell(&self, row: usize, col: usize) -> &str {
        self.rows
            .get(row)
            .and_then(|r| r.get(col))
            .map(String::as_str)
            .unwrap_or_default()
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn to_csv(&self) -> String {
        let mut s = join_record(&self.header);
        s.push('\n');
        for row in &self.rows {
            s.push_str(&join_record(row));
            s.push('\n');
        }
        s
    }

    /// write `self` to `path` as CSV, creating the parent directories
    pub fn write(&self, path: impl AsRef<Path>) -> Result<(), FileError> {
        crate::write(path, self.to_csv())
    }
}

/// stack `tables` on top of each other. The header is the union of the input
/// headers in the order the columns are first seen, and cells for columns a
/// table lacks are left empty
pub fn concat(tables: &[Table]) -> Table {
    let mut header: Vec<String> = Vec::new();
    for t in tables {
        for h in &t.header {
            if !header.contains(h) {
                header.push(h.clone());
            }
        }
    }
    let mut rows = Vec::with_capacity(tables.iter().map(Table::len).sum());
    for t in tables {
        let map: Vec<Option<usize>> =
            header.iter().map(|h| t.column(h)).collect();
        for i in 0..t.len() {
            rows.push(
                map.iter()
                    .map(|c| c.map(|c| t.cell(i, c)).unwrap_or_default())
                    .map(str::to_owned)
                    .collect(),
            );
        }
    }
    Table { header, rows }
}

/// read every `.csv` file in `inputs` and [concat] them. Paths that do not
/// end in `.csv` or do not exist are skipped with a warning
pub fn concat_files<P: AsRef<Path>>(inputs: &[P]) -> Result<Table, FileError> {
    let mut tables = Vec::new();
    for input in inputs {
        let input = input.as_ref();
        if !has_extension(input, "csv") {
            warn!("skipping {}: not a .csv file", input.display());
            continue;
        }
        if !input.exists() {
            warn!("skipping {}: file not found", input.display());
            continue;
        }
        let t = Table::read(input)?;
        debug!("read {} rows from {}", t.len(), input.display());
        tables.push(t);
    }
    Ok(concat(&tables))
}
