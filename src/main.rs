//! cbuild - a resource-aware build front end for a CMake-based C++ project
//!
//! Turns user intents (install dependencies, build, test, document, install,
//! reformat, bump version) into correctly configured invocations of the
//! underlying tools, adapting to the host package manager, the memory/CPU
//! budget and an optional armv7 cross target.
//!
//! ## Architecture
//!
//! ```text
//! cli → config (immutable record) → commands/ → cmake / package manager / git
//! ```

mod cli;
mod cmake;
mod commands;
mod config;
mod cross;
mod deps;
mod error;
mod exec;
mod platform;
mod release;
mod resources;

use clap::Parser;

use cli::Cli;

fn main() {
    let cli = Cli::parse();
    if let Err(err) = cli.execute() {
        err.display_with_hints();
        std::process::exit(err.exit_code());
    }
}
