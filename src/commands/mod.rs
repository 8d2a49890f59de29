//! Action step implementations
//!
//! Each module implements one delegated step. The driver runs the requested
//! actions in a fixed order regardless of token order on the command line:
//! deps, build, test, doc, install, reformat, bump. Every step runs to
//! completion or fails the whole invocation; nothing is retried or rolled
//! back.

pub mod build;
pub mod bump;
pub mod deps;
pub mod doc;
pub mod fmt;

use std::path::PathBuf;

use crate::config::{Action, Config};
use crate::error::CbError;
use crate::platform::PlatformIdentity;

/// Run every requested action in sequence
pub fn run(config: &Config) -> Result<(), CbError> {
    let project_root = std::env::current_dir().map_err(|e| CbError::ExternalProcess {
        step: "startup".to_string(),
        message: "cannot determine the current directory".to_string(),
        source: Some(e.into()),
    })?;
    let platform = PlatformIdentity::detect(config.is_cross());

    if config.actions.contains(Action::InstallDeps) {
        deps::run(config, &platform)?;
    }

    let mut build_tree: Option<PathBuf> = None;
    if config.actions.needs_build_tree() {
        build_tree = Some(build::run(config, &platform, &project_root)?);
    }

    if config.actions.contains(Action::Test) {
        // needs_build_tree guarantees the tree exists at this point
        if let Some(tree) = &build_tree {
            build::run_tests(tree, config.verbose)?;
        }
    }

    if config.actions.contains(Action::GenerateDocs) {
        doc::run(&project_root, config.verbose)?;
    }

    if config.actions.contains(Action::Install) {
        if let Some(tree) = &build_tree {
            build::run_install(tree, config.verbose)?;
        }
    }

    if config.actions.contains(Action::Reformat) {
        fmt::run(&project_root, config.verbose)?;
    }

    if config.actions.contains(Action::BumpVersion) {
        bump::run(&project_root)?;
    }

    Ok(())
}
