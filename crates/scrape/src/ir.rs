use std::{
    fs,
    path::{Path, PathBuf},
};

use serde::Serialize;

use crate::{Block, EndCondition, ParseError, fields};

/// One row of the ORCA `IR SPECTRUM` table
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct IrMode {
    pub mode: usize,
    /// frequency in cm⁻¹
    pub freq: f64,
    /// molar absorption coefficient in L/(mol cm)
    pub eps: f64,
    /// intensity in km/mol
    pub intensity: f64,
}

#[derive(Clone, Debug, PartialEq)]
pub struct IrSpectrum {
    /// the raw block, from the dashed line above the title
    pub lines: Vec<String>,
    pub modes: Vec<IrMode>,
}

/// the `IR SPECTRUM` section of an ORCA output. It begins with the dashed
/// line above the title and ends before the first pair of identical lines,
/// normally two blank lines. ORCA runs that die early stop at end of file
pub fn ir_block() -> Block {
    Block::new("IR SPECTRUM", EndCondition::RepeatedLine)
        .offset(1)
        .allow_eof()
}

impl IrSpectrum {
    pub fn from_lines<L: AsRef<str>>(lines: &[L]) -> Result<Self, ParseError> {
        let block = ir_block().extract(lines)?;
        let mut modes = Vec::new();
        for line in block {
            let line = line.as_ref();
            let f = fields(line);
            let is_row = f.get(0).is_ok_and(|m| {
                m.ends_with(':') && m[..m.len() - 1].parse::<usize>().is_ok()
            });
            if !is_row {
                continue;
            }
            modes.push(IrMode {
                mode: f.parse_trimmed(0)?,
                freq: f.parse(1)?,
                eps: f.parse(2)?,
                intensity: f.parse(3)?,
            });
        }
        Ok(Self {
            lines: block.iter().map(|l| l.as_ref().to_owned()).collect(),
            modes,
        })
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ParseError> {
        let path = path.as_ref();
        let s = fs::read_to_string(path).map_err(|e| {
            let path = path.display();
            ParseError::Format(format!("failed to read {path}: {e}"))
        })?;
        let lines: Vec<&str> = s.lines().collect();
        Self::from_lines(&lines)
    }

    /// write the raw block to `path`, one line at a time
    pub fn export(&self, path: impl AsRef<Path>) -> std::io::Result<()> {
        let mut s = self.lines.join("\n");
        s.push('\n');
        fs::write(path, s)
    }
}

/// the export name for the IR block of `input`: `<file name>_IR_Part.out`
pub fn export_name(input: &Path) -> PathBuf {
    let name = input.file_name().unwrap_or_default().to_string_lossy();
    input.with_file_name(format!("{name}_IR_Part.out"))
}

/// the fallback export name, `Output` followed by today's date as
/// `dd_mm_YYYY`
pub fn default_export_name() -> String {
    let today = jiff::Zoned::now().date();
    format!("Output{}", today.strftime("%d_%m_%Y"))
}
