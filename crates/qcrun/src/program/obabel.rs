use std::path::Path;

use crate::{Job, RunError};

use super::Tools;

/// convert `input` in format `from` to `output` in format `to` inside `dir`
/// with Open Babel
pub fn convert(
    tools: &Tools,
    dir: &Path,
    input: &str,
    from: &str,
    to: &str,
    output: &str,
) -> Result<(), RunError> {
    Job::new(tools.get("obabel")?)
        .args([input, "-i", from, "-o", to, "-O", output])
        .dir(dir)
        .output()
        .map(|_| ())
}
