//! Source reformatting step

use std::path::{Path, PathBuf};

use console::style;
use walkdir::WalkDir;

use crate::error::{hints, CbError};
use crate::exec::{command_exists, run_step};

const SOURCE_EXTENSIONS: &[&str] = &["h", "hpp", "c", "cc", "cpp"];

/// Reformat all C/C++ sources in place with clang-format
pub fn run(project_root: &Path, verbose: bool) -> Result<(), CbError> {
    if !command_exists("clang-format") {
        return Err(CbError::missing_tool(
            "clang-format",
            "the src action",
            hints::clang_format(),
        ));
    }

    let files = collect_sources(project_root);
    if files.is_empty() {
        eprintln!("{} no sources to reformat", style("==>").cyan().bold());
        return Ok(());
    }

    eprintln!(
        "{} reformatting {} file(s)",
        style("==>").cyan().bold(),
        files.len()
    );

    let mut args = vec!["-i".to_string()];
    args.extend(files.iter().map(|f| f.display().to_string()));
    run_step("reformat", "clang-format", &args, Some(project_root), verbose)
}

/// Collect formattable sources, skipping hidden directories and build trees
fn collect_sources(project_root: &Path) -> Vec<PathBuf> {
    WalkDir::new(project_root)
        .into_iter()
        .filter_entry(|entry| {
            if entry.depth() == 0 {
                return true;
            }
            let name = entry.file_name().to_string_lossy();
            !name.starts_with('.') && name != "cmake_build"
        })
        .filter_map(Result::ok)
        .filter(|entry| entry.file_type().is_file())
        .map(|entry| entry.into_path())
        .filter(|path| {
            path.extension()
                .and_then(|e| e.to_str())
                .map(|e| SOURCE_EXTENSIONS.contains(&e))
                .unwrap_or(false)
        })
        .collect()
}
