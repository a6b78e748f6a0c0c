//! Case-insensitive word search through the text of PDF files, extracted
//! page by page with `pdftotext`.

use std::path::{Path, PathBuf};

use log::debug;
use qcrun::{Job, Tools};
use serde::Serialize;

use crate::{FileError, has_extension};

/// the number of words shown on either side of a hit
pub const CONTEXT: usize = 4;

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Hit {
    /// 1-based page number
    pub page: usize,
    pub context: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Report {
    pub file: String,
    pub count: usize,
    pub hits: Vec<Hit>,
}

/// split `pdftotext` output into pages. The form feed after the last page
/// does not start another one
pub fn pages(text: &str) -> Vec<&str> {
    let mut ret: Vec<&str> = text.split('\x0c').collect();
    if ret.len() > 1 && ret.last().is_some_and(|p| p.trim().is_empty()) {
        ret.pop();
    }
    ret
}

/// every word on `pages` containing `term`, ignoring case, with the
/// [CONTEXT] words around it
pub fn search<S: AsRef<str>>(pages: &[S], term: &str) -> Vec<Hit> {
    let term = term.to_lowercase();
    let mut ret = Vec::new();
    for (i, page) in pages.iter().enumerate() {
        let page = page.as_ref().to_lowercase();
        let words: Vec<&str> = page.split_whitespace().collect();
        for (j, word) in words.iter().enumerate() {
            if !word.contains(&term) {
                continue;
            }
            let lo = j.saturating_sub(CONTEXT);
            let hi = (j + CONTEXT + 1).min(words.len());
            ret.push(Hit {
                page: i + 1,
                context: words[lo..hi].join(" "),
            });
        }
    }
    ret
}

/// the number of words on `pages` containing `term`, ignoring case
pub fn count<S: AsRef<str>>(pages: &[S], term: &str) -> usize {
    let term = term.to_lowercase();
    pages
        .iter()
        .map(|p| {
            p.as_ref()
                .to_lowercase()
                .split_whitespace()
                .filter(|w| w.contains(&term))
                .count()
        })
        .sum()
}

/// the text of `pdf`, as written by `pdftotext -layout <pdf> -`
pub fn extract(tools: &Tools, pdf: &Path) -> Result<String, FileError> {
    if !pdf.is_file() {
        return Err(FileError::FileNotFound(pdf.display().to_string()));
    }
    let text = Job::new(tools.get("pdftotext")?)
        .arg("-layout")
        .arg(pdf)
        .arg("-")
        .output()?;
    debug!("extracted {} bytes from {}", text.len(), pdf.display());
    Ok(text)
}

/// search `pdf` for `term`
pub fn report(
    tools: &Tools,
    pdf: &Path,
    term: &str,
) -> Result<Report, FileError> {
    let text = extract(tools, pdf)?;
    let hits = search(&pages(&text), term);
    Ok(Report {
        file: pdf.display().to_string(),
        count: hits.len(),
        hits,
    })
}

/// the PDF files directly in `dir`
pub fn pdfs_in(dir: impl AsRef<Path>) -> Result<Vec<PathBuf>, FileError> {
    crate::files_in(dir, |p| has_extension(p, "pdf"))
}
