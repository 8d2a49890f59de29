//! Version bump step

use std::path::Path;

use console::style;

use crate::error::CbError;
use crate::release;

/// Bump the version constant against the latest upstream tag
pub fn run(project_root: &Path) -> Result<(), CbError> {
    let (current, next) = release::bump(project_root)?;
    eprintln!(
        "{} version {} -> {} ({})",
        style("==>").cyan().bold(),
        current,
        style(&next).green().bold(),
        release::VERSION_HEADER
    );
    Ok(())
}
