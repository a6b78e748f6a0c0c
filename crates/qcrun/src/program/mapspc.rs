use std::path::Path;

use crate::{Job, RunError};

use super::Tools;

/// broaden the IR lines of the ORCA output `file` with `orca_mapspc`, using a
/// line width of 25 cm⁻¹
pub fn orca_mapspc(
    tools: &Tools,
    dir: &Path,
    file: &str,
) -> Result<(), RunError> {
    Job::new(tools.get("orca_mapspc")?)
        .args([file, "ir", "-w25"])
        .dir(dir)
        .run()
}
