//! A series of ORCA inputs for tuning the range-separation parameter ω,
//! written from one template with the placeholder `Value`.

use std::path::{Path, PathBuf};

use log::info;

use crate::FileError;

pub const PLACEHOLDER: &str = "Value";

/// the template name looked for when none is given
pub const TEMPLATE: &str = "omegaIP_Value.inp";

/// the values `low`, `low + step`, ... up to and including `high`
pub fn values(low: i64, high: i64, step: i64) -> Result<Vec<i64>, String> {
    if step <= 0 {
        return Err(format!("step must be positive, got {step}"));
    }
    let mut ret = Vec::new();
    let mut n = low;
    while n <= high {
        ret.push(n);
        match n.checked_add(step) {
            Some(next) => n = next,
            None => break,
        }
    }
    Ok(ret)
}

pub fn render(template: &str, n: i64) -> String {
    template.replace(PLACEHOLDER, &n.to_string())
}

/// write `omegaIP_<n>.inp` into `dir` for each `n` in [values], from the
/// template at `template`
pub fn write_inputs(
    dir: impl AsRef<Path>,
    template: impl AsRef<Path>,
    low: i64,
    high: i64,
    step: i64,
) -> Result<Vec<PathBuf>, FileError> {
    let template = template.as_ref();
    let text = crate::read_to_string(template)?;
    if !text.contains(PLACEHOLDER) {
        log::warn!(
            "{} does not contain `{PLACEHOLDER}`, all inputs will be identical",
            template.display()
        );
    }
    let values = values(low, high, step)
        .map_err(|e| FileError::Format(template.display().to_string(), e))?;
    let mut ret = Vec::with_capacity(values.len());
    for n in values {
        let path = dir.as_ref().join(format!("omegaIP_{n}.inp"));
        crate::write(&path, render(&text, n))?;
        ret.push(path);
    }
    info!("wrote {} inputs from {}", ret.len(), template.display());
    Ok(ret)
}
