//! Error types and helpers for user-friendly error messages
//!
//! Every fatal condition in the orchestrator maps onto one of these variants so
//! that `main` can render a short diagnostic plus an actionable hint and pick
//! the right exit code.

use thiserror::Error;

/// Fatal conditions the orchestrator can surface to the user
#[derive(Error, Debug)]
pub enum CbError {
    /// Bad or missing action/flag on the command line
    #[error("Usage error: {message}")]
    Usage { message: String },

    /// Host OS/distro (or requested target) has no matching recipe
    #[error("Unsupported platform: {message}")]
    UnsupportedPlatform {
        message: String,
        hint: Option<String>,
    },

    /// A delegated install/build/reformat/doc step returned non-success
    #[error("Step '{step}' failed: {message}")]
    ExternalProcess {
        step: String,
        message: String,
        #[source]
        source: Option<anyhow::Error>,
    },

    /// Tool/executable not found in PATH
    #[error("Missing tool: {tool} (required for {required_for})")]
    MissingTool {
        tool: String,
        required_for: String,
        hint: String,
    },

    /// The remote tag lookup could not produce a usable latest version
    #[error("Remote version lookup failed: {message}")]
    RemoteVersion { message: String, hint: String },

    /// The local version constant is missing or malformed
    #[error("Version error: {message}")]
    Version { message: String, hint: String },
}

impl CbError {
    pub fn usage(message: impl Into<String>) -> Self {
        Self::Usage {
            message: message.into(),
        }
    }

    pub fn unsupported_platform(message: impl Into<String>) -> Self {
        Self::UnsupportedPlatform {
            message: message.into(),
            hint: None,
        }
    }

    pub fn unsupported_platform_with_hint(
        message: impl Into<String>,
        hint: impl Into<String>,
    ) -> Self {
        Self::UnsupportedPlatform {
            message: message.into(),
            hint: Some(hint.into()),
        }
    }

    pub fn external_process(step: impl Into<String>, message: impl Into<String>) -> Self {
        Self::ExternalProcess {
            step: step.into(),
            message: message.into(),
            source: None,
        }
    }

    pub fn missing_tool(
        tool: impl Into<String>,
        required_for: impl Into<String>,
        hint: impl Into<String>,
    ) -> Self {
        Self::MissingTool {
            tool: tool.into(),
            required_for: required_for.into(),
            hint: hint.into(),
        }
    }

    pub fn remote_version(message: impl Into<String>, hint: impl Into<String>) -> Self {
        Self::RemoteVersion {
            message: message.into(),
            hint: hint.into(),
        }
    }

    pub fn version_error(message: impl Into<String>, hint: impl Into<String>) -> Self {
        Self::Version {
            message: message.into(),
            hint: hint.into(),
        }
    }

    /// Exit code for this error class. Usage errors follow the conventional 2.
    pub fn exit_code(&self) -> i32 {
        match self {
            CbError::Usage { .. } => 2,
            _ => 1,
        }
    }

    /// Display error with formatting and hints
    pub fn display_with_hints(&self) {
        use console::style;

        eprintln!("\n{} {}", style("ERROR:").red().bold(), self);

        match self {
            CbError::Usage { .. } => {
                eprintln!(
                    "\n{} run `cb --help` for the action list",
                    style("HINT:").yellow().bold()
                );
            }
            CbError::UnsupportedPlatform { hint, .. } => {
                if let Some(h) = hint {
                    eprintln!("\n{} {}", style("HINT:").yellow().bold(), h);
                }
            }
            CbError::ExternalProcess { source, .. } => {
                if let Some(s) = source {
                    eprintln!("\n{} {}", style("CAUSE:").cyan().bold(), s);
                }
            }
            CbError::MissingTool { hint, .. }
            | CbError::RemoteVersion { hint, .. }
            | CbError::Version { hint, .. } => {
                eprintln!("\n{} {}", style("HINT:").yellow().bold(), hint);
            }
        }

        eprintln!();
    }
}

/// Common error hints for missing tools
pub mod hints {
    pub fn cmake() -> &'static str {
        "Install CMake from https://cmake.org/ or use your package manager:\n\
         • macOS: brew install cmake\n\
         • Ubuntu: sudo apt install cmake\n\
         • Fedora: sudo dnf install cmake"
    }

    pub fn git() -> &'static str {
        "Install Git from https://git-scm.com/ or use your package manager:\n\
         • macOS: brew install git\n\
         • Ubuntu: sudo apt install git"
    }

    pub fn clang_format() -> &'static str {
        "Install clang-format:\n\
         • macOS: brew install clang-format\n\
         • Ubuntu: sudo apt install clang-format\n\
         • Fedora: sudo dnf install clang-tools-extra"
    }

    pub fn doxygen() -> &'static str {
        "Install Doxygen for documentation generation:\n\
         • macOS: brew install doxygen\n\
         • Ubuntu: sudo apt install doxygen\n\
         • Fedora: sudo dnf install doxygen"
    }

    pub fn unsupported_distro() -> &'static str {
        "Automatic dependency installation knows apt (Ubuntu/Debian), dnf (Fedora),\n\
         pacman (Arch) and Homebrew (macOS). On other systems install the packages\n\
         listed in the README by hand, then re-run without the 'deps' action."
    }

    pub fn cross_toolchain() -> &'static str {
        "Set CROSS_CC/CROSS_CXX to your cross compilers, or CROSS_PREFIX to their\n\
         common prefix (e.g. CROSS_PREFIX=arm-linux-gnueabihf-)."
    }
}
