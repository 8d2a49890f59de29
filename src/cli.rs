//! CLI argument parsing using clap derive macros
//!
//! Flags are handled by clap; the positional action tokens keep their own
//! accumulating grammar ('all' composes five actions, a 'test' prefix implies
//! a build) and are folded in `config`.

use clap::Parser;

use crate::commands;
use crate::config::Config;
use crate::error::CbError;

/// cbuild - resource-aware build front end
///
/// Translates user intents into configured CMake, package-manager and
/// versioning invocations, adapting to the host platform and memory budget.
#[derive(Parser, Debug)]
#[command(name = "cb")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Actions to run, in any order and combination:
    /// deps, build, debug, test*, doc, install, all, src, bump
    #[arg(value_name = "ACTION")]
    pub actions: Vec<String>,

    /// Build without plugin support (injects -DENABLE_PLUGINS=OFF)
    #[arg(long)]
    pub no_plugins: bool,

    /// Build without TLS support (injects -DENABLE_TLS=OFF)
    #[arg(long)]
    pub no_tls: bool,

    /// Answer yes to package-manager prompts
    #[arg(short = 'y', long = "yes")]
    pub assume_yes: bool,

    /// Override the computed number of parallel build jobs
    #[arg(short, long)]
    pub jobs: Option<usize>,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,

    /// Disable colored output
    #[arg(long)]
    pub no_color: bool,
}

impl Cli {
    /// Fold the invocation into a configuration record and run it
    pub fn execute(self) -> Result<(), CbError> {
        if self.no_color {
            console::set_colors_enabled(false);
            console::set_colors_enabled_stderr(false);
        }

        // The environment is read exactly once, here.
        let config = Config::assemble(
            &self.actions,
            self.no_plugins,
            self.no_tls,
            self.assume_yes,
            self.jobs,
            self.verbose,
            |name| std::env::var(name).ok(),
        )?;

        commands::run(&config)
    }
}
