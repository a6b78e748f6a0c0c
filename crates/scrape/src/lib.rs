//! Extraction of bounded blocks of text from program outputs, and the parsers
//! built on top of it for ORCA, xtb, and a few plain-text formats.

use std::{error::Error, fmt::Display, str::FromStr};

pub mod choco;
pub mod convert;
pub mod ir;
pub mod loewdin;
pub mod trj;
pub mod xtb;

#[cfg(test)]
mod tests;

#[derive(Debug, PartialEq, Eq)]
pub enum BlockError {
    /// the start marker never occurs
    StartNotFound(String),
    /// the start marker was found but the end condition never holds
    Unterminated(String),
}

impl Display for BlockError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BlockError::StartNotFound(s) => {
                write!(f, "start marker `{s}` not found")
            }
            BlockError::Unterminated(s) => {
                write!(f, "block starting at `{s}` is never terminated")
            }
        }
    }
}

impl Error for BlockError {}

#[derive(Debug, PartialEq)]
pub enum ParseError {
    Block(BlockError),
    /// a line had fewer fields than needed
    MissingField { line: String, index: usize },
    BadNumber(String),
    /// anything else wrong with the input, with a description
    Format(String),
}

impl Display for ParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ParseError::Block(e) => write!(f, "{e}"),
            ParseError::MissingField { line, index } => {
                write!(f, "missing field {index} in `{line}`")
            }
            ParseError::BadNumber(s) => write!(f, "failed to parse `{s}`"),
            ParseError::Format(s) => write!(f, "{s}"),
        }
    }
}

impl Error for ParseError {}

impl From<BlockError> for ParseError {
    fn from(value: BlockError) -> Self {
        Self::Block(value)
    }
}

/// Where a block stops. The line at which the condition holds is not part of
/// the block
#[derive(Clone, Debug, PartialEq)]
pub enum EndCondition {
    /// the first of two consecutive blank lines
    TwoBlankLines,
    /// the first of two consecutive identical lines
    RepeatedLine,
    /// a line starting with the given text
    Separator(String),
    /// the `blanks`-th blank line in a row, or a line starting with
    /// `separator`, whichever comes first
    BlankOrSeparator { blanks: usize, separator: String },
}

impl EndCondition {
    /// the index in `lines` where `self` first holds, searching from `from`
    fn find<L: AsRef<str>>(&self, lines: &[L], from: usize) -> Option<usize> {
        let blank = |i: usize| lines[i].as_ref().trim().is_empty();
        match self {
            EndCondition::TwoBlankLines => (from..lines.len().saturating_sub(1))
                .find(|&i| blank(i) && blank(i + 1)),
            EndCondition::RepeatedLine => (from..lines.len().saturating_sub(1))
                .find(|&i| lines[i].as_ref() == lines[i + 1].as_ref()),
            EndCondition::Separator(sep) => {
                (from..lines.len()).find(|&i| lines[i].as_ref().starts_with(sep))
            }
            EndCondition::BlankOrSeparator { blanks, separator } => {
                let mut run = 0;
                for i in from..lines.len() {
                    let line = lines[i].as_ref();
                    if line.starts_with(separator.as_str()) {
                        return Some(i);
                    }
                    if blank(i) {
                        run += 1;
                        if run >= *blanks {
                            return Some(i);
                        }
                    } else {
                        run = 0;
                    }
                }
                None
            }
        }
    }
}

/// how a line is compared with the start marker. Lines are trimmed first
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Match {
    #[default]
    Exact,
    Contains,
}

/// A description of a block of lines: where it starts, where it ends, and
/// how forgiving to be about the end
#[derive(Clone, Debug)]
pub struct Block {
    pub start: String,
    pub matching: Match,
    /// start the block this many lines before the marker
    pub offset: usize,
    /// lines after the marker not checked against the end condition, for
    /// underlined titles
    pub skip: usize,
    pub end: EndCondition,
    /// return the rest of the input when the end condition never holds
    pub allow_eof: bool,
}

impl Block {
    pub fn new(start: impl Into<String>, end: EndCondition) -> Self {
        Self {
            start: start.into(),
            matching: Match::Exact,
            offset: 0,
            skip: 0,
            end,
            allow_eof: false,
        }
    }

    pub fn contains(mut self) -> Self {
        self.matching = Match::Contains;
        self
    }

    pub fn offset(mut self, offset: usize) -> Self {
        self.offset = offset;
        self
    }

    pub fn skip(mut self, skip: usize) -> Self {
        self.skip = skip;
        self
    }

    pub fn allow_eof(mut self) -> Self {
        self.allow_eof = true;
        self
    }

    fn is_start(&self, line: &str) -> bool {
        let line = line.trim();
        match self.matching {
            Match::Exact => line == self.start,
            Match::Contains => line.contains(&self.start),
        }
    }

    /// the index of the first marker line in `lines`
    pub fn find_start<L: AsRef<str>>(&self, lines: &[L]) -> Option<usize> {
        lines.iter().position(|l| self.is_start(l.as_ref()))
    }

    /// return the sub-slice of `lines` described by `self`, starting from the
    /// first occurrence of the marker
    pub fn extract<'a, L: AsRef<str>>(
        &self,
        lines: &'a [L],
    ) -> Result<&'a [L], BlockError> {
        let Some(marker) = self.find_start(lines) else {
            return Err(BlockError::StartNotFound(self.start.clone()));
        };
        let begin = marker.saturating_sub(self.offset);
        let from = (marker + 1 + self.skip).min(lines.len());
        match self.end.find(lines, from) {
            Some(end) => Ok(&lines[begin..end]),
            None if self.allow_eof => Ok(&lines[begin..]),
            None => Err(BlockError::Unterminated(self.start.clone())),
        }
    }
}

/// extract the block of `lines` from the line equal to `start` up to `end`.
/// See [Block] for more options
pub fn extract_block<'a, L: AsRef<str>>(
    lines: &'a [L],
    start: &str,
    end: EndCondition,
) -> Result<&'a [L], BlockError> {
    Block::new(start, end).extract(lines)
}

/// The whitespace-separated fields of a line with checked access
#[derive(Debug)]
pub struct Fields<'a> {
    line: &'a str,
    fields: Vec<&'a str>,
}

/// split `line` on whitespace
pub fn fields(line: &str) -> Fields<'_> {
    Fields {
        line,
        fields: line.split_whitespace().collect(),
    }
}

impl<'a> Fields<'a> {
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn as_slice(&self) -> &[&'a str] {
        &self.fields
    }

    pub fn get(&self, index: usize) -> Result<&'a str, ParseError> {
        self.fields
            .get(index)
            .copied()
            .ok_or_else(|| ParseError::MissingField {
                line: self.line.to_owned(),
                index,
            })
    }

    /// parse field `index` as a `T`
    pub fn parse<T: FromStr>(&self, index: usize) -> Result<T, ParseError> {
        let f = self.get(index)?;
        f.parse().map_err(|_| ParseError::BadNumber(f.to_owned()))
    }

    /// like [Fields::parse], but drop a trailing `:` first, as ORCA writes
    /// after mode numbers
    pub fn parse_trimmed<T: FromStr>(
        &self,
        index: usize,
    ) -> Result<T, ParseError> {
        let f = self.get(index)?.trim_end_matches(':');
        f.parse().map_err(|_| ParseError::BadNumber(f.to_owned()))
    }
}
