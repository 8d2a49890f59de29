//! Documentation generation step

use std::path::Path;

use console::style;

use crate::error::{hints, CbError};
use crate::exec::{command_exists, run_step};

/// Generate API documentation with Doxygen
pub fn run(project_root: &Path, verbose: bool) -> Result<(), CbError> {
    if !command_exists("doxygen") {
        return Err(CbError::missing_tool(
            "doxygen",
            "the doc action",
            hints::doxygen(),
        ));
    }

    if !project_root.join("Doxyfile").is_file() {
        return Err(CbError::external_process(
            "doc",
            format!("no Doxyfile in {}", project_root.display()),
        ));
    }

    eprintln!("{} generating documentation", style("==>").cyan().bold());
    run_step("doc", "doxygen", &["Doxyfile"], Some(project_root), verbose)
}
