//! Host platform detection
//!
//! Identifies the operating system family and, on Linux, the distribution.
//! An unknown distro is not fatal here; only the dependency dispatcher needs
//! one and it reports the failure itself.

use std::fs;
use std::path::Path;

/// Operating system family
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HostOs {
    Linux,
    Darwin,
    Other,
}

/// Identity of the host the orchestrator runs on
#[derive(Debug, Clone)]
pub struct PlatformIdentity {
    pub os: HostOs,
    /// Distribution ID, resolved only on Linux (e.g. "ubuntu", "fedora")
    pub distro: Option<String>,
    /// Whether a non-native build target was requested
    pub is_cross_target: bool,
}

impl PlatformIdentity {
    /// Detect the host platform
    pub fn detect(is_cross_target: bool) -> Self {
        let os = match std::env::consts::OS {
            "linux" => HostOs::Linux,
            "macos" => HostOs::Darwin,
            _ => HostOs::Other,
        };

        let distro = if os == HostOs::Linux {
            detect_distro(Path::new("/etc/os-release"), Path::new("/proc/version"))
        } else {
            None
        };

        PlatformIdentity {
            os,
            distro,
            is_cross_target,
        }
    }
}

/// Resolve the Linux distribution ID
///
/// Reads `ID=` from os-release; when that file is absent, probes the kernel
/// version string for the WSL marker and labels the distro `ubuntu`.
fn detect_distro(os_release: &Path, proc_version: &Path) -> Option<String> {
    if let Ok(content) = fs::read_to_string(os_release) {
        if let Some(id) = parse_os_release_id(&content) {
            return Some(id);
        }
    }

    if let Ok(version) = fs::read_to_string(proc_version) {
        if version.to_lowercase().contains("microsoft") {
            return Some("ubuntu".to_string());
        }
    }

    None
}

/// Extract the `ID=` value from os-release content, stripping quotes
fn parse_os_release_id(content: &str) -> Option<String> {
    content
        .lines()
        .map(str::trim)
        .find_map(|line| line.strip_prefix("ID="))
        .map(|value| value.trim_matches('"').trim_matches('\'').to_string())
        .filter(|value| !value.is_empty())
}
