//! Build, test and install steps
//!
//! Configures the CMake tree out-of-tree under `cmake_build/{release|debug}`,
//! compiles with a memory-aware job count, and drives `ctest` and
//! `cmake --install` against the same tree.

use std::path::{Path, PathBuf};

use console::style;

use crate::cmake::{BuildType, CMakeConfig};
use crate::config::{Action, Config};
use crate::cross::CrossProfile;
use crate::error::CbError;
use crate::exec::run_step;
use crate::platform::{HostOs, PlatformIdentity};
use crate::resources::{cpu_cores, ResourceBudget};

/// Configure and compile every requested build type
///
/// Returns the primary build tree for the later test/install steps: the
/// release tree unless only a debug build was requested.
pub fn run(
    config: &Config,
    platform: &PlatformIdentity,
    project_root: &Path,
) -> Result<PathBuf, CbError> {
    let debug_requested = config.actions.contains(Action::Debug);
    let release_requested = !debug_requested || config.actions.contains(Action::Build);

    let mut build_types = Vec::new();
    if release_requested {
        build_types.push(BuildType::Release);
    }
    if debug_requested {
        build_types.push(BuildType::Debug);
    }

    let cross = match &config.target {
        Some(target) => {
            let profile = CrossProfile::resolve(target, &config.cross_env)?;
            profile.validate()?;
            Some(profile)
        }
        None => None,
    };

    let jobs = effective_jobs(config, platform, cross.as_ref());

    let mut raw_args = config.extra_build_args.clone();
    if let Some(profile) = &cross {
        raw_args.extend(profile.cmake_args());
    }

    // INSTALL_PREFIX applies only to the Darwin profile
    let install_prefix = if platform.os == HostOs::Darwin {
        config.install_prefix.clone()
    } else {
        None
    };

    // Tests and installs run against the first configured tree (release
    // unless only a debug build was requested)
    let primary_tree = project_root
        .join("cmake_build")
        .join(build_types[0].subdir());

    for build_type in build_types {
        let build_dir = project_root
            .join("cmake_build")
            .join(build_type.subdir());

        eprintln!(
            "{} {} build with {} job(s){}",
            style("==>").cyan().bold(),
            build_type,
            jobs,
            cross
                .as_ref()
                .map(|p| format!(" for {}", p.target))
                .unwrap_or_default()
        );

        let cmake = CMakeConfig::new(project_root.to_path_buf(), build_dir)
            .build_type(build_type)
            .install_prefix(install_prefix.clone())
            .raw_args(raw_args.iter().cloned())
            .jobs(jobs)
            .verbose(config.verbose);

        cmake.configure()?;
        cmake.build()?;
    }

    Ok(primary_tree)
}

/// Resolve the parallelism level: explicit -j wins, otherwise the
/// memory-aware budget, falling back to raw core count when the host budget
/// cannot be measured
fn effective_jobs(
    config: &Config,
    platform: &PlatformIdentity,
    cross: Option<&CrossProfile>,
) -> usize {
    let measure = || {
        let compiler = cross.map(|p| p.cc.as_str()).unwrap_or("cc");
        match ResourceBudget::detect(platform.os, compiler) {
            Ok(budget) => Some(budget.jobs()),
            Err(e) => {
                if config.verbose {
                    eprintln!("Memory budget unavailable ({}), using core count", e);
                }
                None
            }
        }
    };
    resolve_jobs(config.jobs, measure, cpu_cores())
}

/// Pick the job count: an explicit -j wins and is clamped to at least one;
/// otherwise the measured budget; otherwise the fallback. `measure` is only
/// invoked when no explicit count is given.
fn resolve_jobs(
    explicit: Option<usize>,
    measure: impl FnOnce() -> Option<usize>,
    fallback: usize,
) -> usize {
    match explicit {
        Some(jobs) => jobs.max(1),
        None => measure().unwrap_or(fallback),
    }
}

/// Run the test suite inside the build tree
pub fn run_tests(build_dir: &Path, verbose: bool) -> Result<(), CbError> {
    eprintln!("{} running tests", style("==>").cyan().bold());
    run_step(
        "test",
        "ctest",
        &["--output-on-failure"],
        Some(build_dir),
        verbose,
    )
}

/// Install the artifacts of the build tree
pub fn run_install(build_dir: &Path, verbose: bool) -> Result<(), CbError> {
    let cmake = crate::cmake::find_cmake()?;
    eprintln!("{} installing", style("==>").cyan().bold());
    run_step(
        "install",
        &cmake.display().to_string(),
        &["--install".to_string(), build_dir.display().to_string()],
        None,
        verbose,
    )
}
