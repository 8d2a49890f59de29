//! CMake configuration and execution
//!
//! Builds the argument list for the configure, build and install steps and
//! delegates to the `cmake` binary. The front end never compiles anything
//! itself.

use std::path::PathBuf;

use crate::error::{hints, CbError};
use crate::exec::run_step;

/// CMake build type
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum BuildType {
    Debug,
    #[default]
    Release,
}

impl std::fmt::Display for BuildType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BuildType::Debug => write!(f, "Debug"),
            BuildType::Release => write!(f, "Release"),
        }
    }
}

impl BuildType {
    /// Build-tree subdirectory for this configuration
    pub fn subdir(&self) -> &'static str {
        match self {
            BuildType::Debug => "debug",
            BuildType::Release => "release",
        }
    }
}

/// CMake invocation builder
#[derive(Debug, Default)]
pub struct CMakeConfig {
    /// Source directory (where CMakeLists.txt is located)
    source_dir: PathBuf,
    /// Build directory
    build_dir: PathBuf,
    /// Build type
    build_type: BuildType,
    /// Install prefix
    install_prefix: Option<PathBuf>,
    /// Raw arguments forwarded to the configure step, in order
    raw_args: Vec<String>,
    /// Number of parallel jobs
    jobs: Option<usize>,
    /// Verbose output
    verbose: bool,
}

impl CMakeConfig {
    pub fn new(source_dir: PathBuf, build_dir: PathBuf) -> Self {
        Self {
            source_dir,
            build_dir,
            ..Default::default()
        }
    }

    pub fn build_type(mut self, build_type: BuildType) -> Self {
        self.build_type = build_type;
        self
    }

    pub fn install_prefix(mut self, prefix: Option<PathBuf>) -> Self {
        self.install_prefix = prefix;
        self
    }

    /// Forward pre-assembled arguments (feature overrides, cross toolchain
    /// variables, CMAKE_FLAGS) verbatim to the configure step
    pub fn raw_args(mut self, args: impl IntoIterator<Item = String>) -> Self {
        self.raw_args.extend(args);
        self
    }

    pub fn jobs(mut self, jobs: usize) -> Self {
        self.jobs = Some(jobs);
        self
    }

    pub fn verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    /// Argument list for the configure step
    fn configure_args(&self) -> Vec<String> {
        let mut args = vec![
            "-S".to_string(),
            self.source_dir.display().to_string(),
            "-B".to_string(),
            self.build_dir.display().to_string(),
            format!("-DCMAKE_BUILD_TYPE={}", self.build_type),
        ];
        if let Some(prefix) = &self.install_prefix {
            args.push(format!("-DCMAKE_INSTALL_PREFIX={}", prefix.display()));
        }
        args.extend(self.raw_args.iter().cloned());
        args
    }

    /// Run CMake configure step
    pub fn configure(&self) -> Result<(), CbError> {
        let cmake = find_cmake()?;
        std::fs::create_dir_all(&self.build_dir).map_err(|e| CbError::ExternalProcess {
            step: "configure".to_string(),
            message: format!("failed to create {}", self.build_dir.display()),
            source: Some(e.into()),
        })?;

        run_step(
            "configure",
            &cmake.display().to_string(),
            &self.configure_args(),
            None,
            self.verbose,
        )
    }

    /// Run CMake build step
    pub fn build(&self) -> Result<(), CbError> {
        let cmake = find_cmake()?;
        let mut args = vec![
            "--build".to_string(),
            self.build_dir.display().to_string(),
        ];
        if let Some(jobs) = self.jobs {
            args.push("-j".to_string());
            args.push(jobs.to_string());
        }
        if self.verbose {
            args.push("--verbose".to_string());
        }

        run_step(
            "build",
            &cmake.display().to_string(),
            &args,
            None,
            self.verbose,
        )
    }
}

/// Locate the cmake binary in PATH
pub fn find_cmake() -> Result<PathBuf, CbError> {
    which::which("cmake")
        .map_err(|_| CbError::missing_tool("cmake", "the build action", hints::cmake()))
}
