//! CLI command implementations.

mod check;
mod render;
mod vars;

pub use check::{run_check, CheckArgs};
pub use render::{run_render, RenderArgs};
pub use vars::{run_vars, VarsArgs};

use std::fs::read_to_string;
use std::path::Path;

use miette::miette;

/// Reads a file, mapping failures to a `NOINPUT` exit.
pub(crate) fn read_input(path: &Path) -> Result<String, i32> {
    read_to_string(path).map_err(|e| {
        eprintln!("{:?}", miette!("Cannot read {}: {}", path.display(), e));
        exitcode::NOINPUT
    })
}
