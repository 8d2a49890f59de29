//! Dependency installation dispatch
//!
//! Platform identity selects one installation recipe out of a fixed strategy
//! set; adding a platform means adding one table row plus a package list.
//! The first failing step aborts the recipe; previously installed packages
//! are left in place.

pub mod packages;

use crate::error::{hints, CbError};
use crate::exec::run_step;
use crate::platform::{HostOs, PlatformIdentity};

/// Recognized package managers, one per recipe
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PackageManager {
    Apt,
    Dnf,
    Pacman,
    Brew,
}

impl PackageManager {
    /// Select the recipe for the given platform identity
    ///
    /// Unknown OS/distro pairs are rejected here, never silently skipped.
    pub fn select(platform: &PlatformIdentity) -> Result<Self, CbError> {
        let manager = match (platform.os, platform.distro.as_deref()) {
            (HostOs::Darwin, _) => PackageManager::Brew,
            (HostOs::Linux, Some("ubuntu")) | (HostOs::Linux, Some("debian")) => {
                PackageManager::Apt
            }
            (HostOs::Linux, Some("fedora")) => PackageManager::Dnf,
            (HostOs::Linux, Some("arch")) => PackageManager::Pacman,
            (HostOs::Linux, Some(distro)) => {
                return Err(CbError::unsupported_platform_with_hint(
                    format!("no dependency recipe for Linux distro '{}'", distro),
                    hints::unsupported_distro(),
                ));
            }
            (HostOs::Linux, None) => {
                return Err(CbError::unsupported_platform_with_hint(
                    "could not determine the Linux distribution",
                    hints::unsupported_distro(),
                ));
            }
            (HostOs::Other, _) => {
                return Err(CbError::unsupported_platform_with_hint(
                    format!("no dependency recipe for OS '{}'", std::env::consts::OS),
                    hints::unsupported_distro(),
                ));
            }
        };

        // Foreign-architecture toolchain packages exist only in the apt recipe
        if platform.is_cross_target && manager != PackageManager::Apt {
            return Err(CbError::unsupported_platform(
                "cross-compile dependency installation is only supported on apt-based distros",
            ));
        }

        Ok(manager)
    }

    fn program(&self) -> &'static str {
        match self {
            PackageManager::Apt => "apt-get",
            PackageManager::Dnf => "dnf",
            PackageManager::Pacman => "pacman",
            PackageManager::Brew => "brew",
        }
    }

    fn base_packages(&self) -> &'static [&'static str] {
        match self {
            PackageManager::Apt => packages::APT_BASE,
            PackageManager::Dnf => packages::DNF_BASE,
            PackageManager::Pacman => packages::PACMAN_BASE,
            PackageManager::Brew => packages::BREW_BASE,
        }
    }

    /// Foreign-architecture toolchain packages; only the apt recipe has any
    fn cross_packages(&self) -> &'static [&'static str] {
        match self {
            PackageManager::Apt => packages::APT_CROSS,
            PackageManager::Dnf | PackageManager::Pacman | PackageManager::Brew => &[],
        }
    }

    /// Install-command argument list for one batch of packages
    fn install_args(&self, assume_yes: bool, pkgs: &[&str]) -> Vec<String> {
        let mut args: Vec<String> = match self {
            PackageManager::Apt | PackageManager::Dnf => {
                let mut a = vec!["install".to_string()];
                if assume_yes {
                    a.push("-y".to_string());
                }
                a
            }
            PackageManager::Pacman => {
                let mut a = vec!["-S".to_string(), "--needed".to_string()];
                if assume_yes {
                    a.push("--noconfirm".to_string());
                }
                a
            }
            // brew never prompts per package
            PackageManager::Brew => vec!["install".to_string()],
        };
        args.extend(pkgs.iter().map(|p| p.to_string()));
        args
    }

    /// Whether the manager needs root
    fn needs_sudo(&self) -> bool {
        !matches!(self, PackageManager::Brew)
    }

    fn run_manager(&self, step: &str, args: &[String], verbose: bool) -> Result<(), CbError> {
        if self.needs_sudo() {
            let mut full = vec![self.program().to_string()];
            full.extend(args.iter().cloned());
            run_step(step, "sudo", &full, None, verbose)
        } else {
            run_step(step, self.program(), args, None, verbose)
        }
    }

    /// Run the full recipe: refresh the index, install base packages, then
    /// the cross toolchain when requested
    pub fn install(
        &self,
        cross: bool,
        assume_yes: bool,
        verbose: bool,
    ) -> Result<(), CbError> {
        match self {
            PackageManager::Apt => {
                self.run_manager("deps:update", &["update".to_string()], verbose)?;
            }
            PackageManager::Pacman => {
                self.run_manager("deps:update", &["-Sy".to_string()], verbose)?;
            }
            // dnf and brew resolve metadata during install
            PackageManager::Dnf | PackageManager::Brew => {}
        }

        self.run_manager(
            "deps:install",
            &self.install_args(assume_yes, self.base_packages()),
            verbose,
        )?;

        let cross_pkgs = self.cross_packages();
        if cross && !cross_pkgs.is_empty() {
            self.run_manager(
                "deps:cross-toolchain",
                &self.install_args(assume_yes, cross_pkgs),
                verbose,
            )?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn linux(distro: Option<&str>, cross: bool) -> PlatformIdentity {
        PlatformIdentity {
            os: HostOs::Linux,
            distro: distro.map(str::to_string),
            is_cross_target: cross,
        }
    }

    #[test]
    fn test_select_known_distros() {
        assert_eq!(
            PackageManager::select(&linux(Some("ubuntu"), false)).unwrap(),
            PackageManager::Apt
        );
        assert_eq!(
            PackageManager::select(&linux(Some("debian"), false)).unwrap(),
            PackageManager::Apt
        );
        assert_eq!(
            PackageManager::select(&linux(Some("fedora"), false)).unwrap(),
            PackageManager::Dnf
        );
        assert_eq!(
            PackageManager::select(&linux(Some("arch"), false)).unwrap(),
            PackageManager::Pacman
        );
    }

    #[test]
    fn test_select_darwin_is_brew() {
        let platform = PlatformIdentity {
            os: HostOs::Darwin,
            distro: None,
            is_cross_target: false,
        };
        assert_eq!(
            PackageManager::select(&platform).unwrap(),
            PackageManager::Brew
        );
    }

    #[test]
    fn test_unknown_distro_is_unsupported_never_a_noop() {
        for distro in [Some("slackware"), None] {
            let err = PackageManager::select(&linux(distro, false)).unwrap_err();
            assert!(matches!(err, CbError::UnsupportedPlatform { .. }));
        }
    }

    #[test]
    fn test_other_os_is_unsupported() {
        let platform = PlatformIdentity {
            os: HostOs::Other,
            distro: None,
            is_cross_target: false,
        };
        let err = PackageManager::select(&platform).unwrap_err();
        assert!(matches!(err, CbError::UnsupportedPlatform { .. }));
    }

    #[test]
    fn test_cross_requires_apt_recipe() {
        assert!(PackageManager::select(&linux(Some("ubuntu"), true)).is_ok());
        let err = PackageManager::select(&linux(Some("fedora"), true)).unwrap_err();
        assert!(matches!(err, CbError::UnsupportedPlatform { .. }));
    }

    #[test]
    fn test_only_the_apt_recipe_carries_cross_packages() {
        assert!(!PackageManager::Apt.cross_packages().is_empty());
        for manager in [
            PackageManager::Dnf,
            PackageManager::Pacman,
            PackageManager::Brew,
        ] {
            assert!(manager.cross_packages().is_empty());
        }
    }

    #[test]
    fn test_install_args_respect_assume_yes() {
        let with_yes = PackageManager::Apt.install_args(true, &["cmake"]);
        assert_eq!(with_yes, vec!["install", "-y", "cmake"]);
        let without = PackageManager::Apt.install_args(false, &["cmake"]);
        assert_eq!(without, vec!["install", "cmake"]);

        let pacman = PackageManager::Pacman.install_args(true, &["cmake", "ninja"]);
        assert_eq!(
            pacman,
            vec!["-S", "--needed", "--noconfirm", "cmake", "ninja"]
        );
    }
}
