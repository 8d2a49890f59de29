//! Dependency installation step

use console::style;

use crate::config::Config;
use crate::deps::PackageManager;
use crate::error::CbError;
use crate::platform::PlatformIdentity;

/// Install build dependencies for the detected platform
pub fn run(config: &Config, platform: &PlatformIdentity) -> Result<(), CbError> {
    let manager = PackageManager::select(platform)?;

    eprintln!(
        "{} installing dependencies via {:?}{}",
        style("==>").cyan().bold(),
        manager,
        if platform.is_cross_target {
            " (with armv7 cross toolchain)"
        } else {
            ""
        }
    );

    manager.install(platform.is_cross_target, config.assume_yes, config.verbose)
}
