//! Cross-compilation target configuration
//!
//! One non-native target is supported: `armv7`. Toolchain binaries default to
//! the `arm-linux-gnueabihf-` prefix convention; environment overrides win
//! with precedence explicit binary > explicit prefix > built-in prefix.

use std::path::PathBuf;

use crate::config::CrossEnv;
use crate::error::{hints, CbError};

/// The one supported non-native architecture
pub const SUPPORTED_TARGET: &str = "armv7";

const DEFAULT_PREFIX: &str = "arm-linux-gnueabihf-";

/// Reject any target name other than the supported one
///
/// Called once during configuration assembly, so every action path (not just
/// the build) fails before touching the system.
pub fn ensure_supported(target: &str) -> Result<(), CbError> {
    if target != SUPPORTED_TARGET {
        return Err(CbError::unsupported_platform_with_hint(
            format!("unknown cross-compile target '{}'", target),
            format!("the only supported cross target is '{}'", SUPPORTED_TARGET),
        ));
    }
    Ok(())
}

/// Resolved toolchain parameters for a cross build
#[derive(Debug, Clone)]
pub struct CrossProfile {
    pub target: String,
    pub sysroot: Option<PathBuf>,
    pub cc: String,
    pub cxx: String,
    pub system_name: String,
    pub system_processor: String,
}

impl CrossProfile {
    /// Resolve the profile for `target` with environment overrides applied
    pub fn resolve(target: &str, env: &CrossEnv) -> Result<Self, CbError> {
        ensure_supported(target)?;

        let prefix = env.prefix.as_deref().unwrap_or(DEFAULT_PREFIX);
        let cc = env
            .cc
            .clone()
            .unwrap_or_else(|| format!("{}gcc", prefix));
        let cxx = env
            .cxx
            .clone()
            .unwrap_or_else(|| format!("{}g++", prefix));

        Ok(CrossProfile {
            target: target.to_string(),
            sysroot: env.sysroot.clone().map(PathBuf::from),
            cc,
            cxx,
            system_name: "Linux".to_string(),
            system_processor: SUPPORTED_TARGET.to_string(),
        })
    }

    /// CMake arguments for this profile
    ///
    /// Plugins are disabled unconditionally: the plugin loader is
    /// host-architecture-specific and a foreign-architecture binary cannot
    /// load it at runtime.
    pub fn cmake_args(&self) -> Vec<String> {
        let mut args = vec![
            format!("-DCMAKE_SYSTEM_NAME={}", self.system_name),
            format!("-DCMAKE_SYSTEM_PROCESSOR={}", self.system_processor),
            format!("-DCMAKE_C_COMPILER={}", self.cc),
            format!("-DCMAKE_CXX_COMPILER={}", self.cxx),
        ];
        if let Some(sysroot) = &self.sysroot {
            args.push(format!("-DCMAKE_SYSROOT={}", sysroot.display()));
        }
        args.push("-DENABLE_PLUGINS=OFF".to_string());
        args
    }

    /// Validate that the cross compilers are reachable
    pub fn validate(&self) -> Result<(), CbError> {
        for tool in [&self.cc, &self.cxx] {
            // Absolute paths bypass the PATH lookup
            let found = if tool.contains('/') {
                PathBuf::from(tool).exists()
            } else {
                crate::exec::command_exists(tool)
            };
            if !found {
                return Err(CbError::unsupported_platform_with_hint(
                    format!("cross compiler '{}' not found", tool),
                    hints::cross_toolchain(),
                ));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_prefix_names() {
        let profile = CrossProfile::resolve("armv7", &CrossEnv::default()).unwrap();
        assert_eq!(profile.cc, "arm-linux-gnueabihf-gcc");
        assert_eq!(profile.cxx, "arm-linux-gnueabihf-g++");
        assert_eq!(profile.system_name, "Linux");
        assert_eq!(profile.system_processor, "armv7");
        assert!(profile.sysroot.is_none());
    }

    #[test]
    fn test_prefix_override() {
        let env = CrossEnv {
            prefix: Some("/opt/cross/bin/armv7l-unknown-linux-gnueabihf-".to_string()),
            ..CrossEnv::default()
        };
        let profile = CrossProfile::resolve("armv7", &env).unwrap();
        assert_eq!(profile.cc, "/opt/cross/bin/armv7l-unknown-linux-gnueabihf-gcc");
        assert_eq!(profile.cxx, "/opt/cross/bin/armv7l-unknown-linux-gnueabihf-g++");
    }

    #[test]
    fn test_explicit_binary_beats_prefix() {
        let env = CrossEnv {
            prefix: Some("arm-none-".to_string()),
            cc: Some("clang".to_string()),
            cxx: None,
            sysroot: None,
        };
        let profile = CrossProfile::resolve("armv7", &env).unwrap();
        assert_eq!(profile.cc, "clang");
        // Unset binary still falls back to prefix
        assert_eq!(profile.cxx, "arm-none-g++");
    }

    #[test]
    fn test_sysroot_forwarded_verbatim() {
        let env = CrossEnv {
            sysroot: Some("/srv/armhf-rootfs".to_string()),
            ..CrossEnv::default()
        };
        let profile = CrossProfile::resolve("armv7", &env).unwrap();
        let args = profile.cmake_args();
        assert!(args.contains(&"-DCMAKE_SYSROOT=/srv/armhf-rootfs".to_string()));
    }

    #[test]
    fn test_plugins_always_disabled_for_cross() {
        let profile = CrossProfile::resolve("armv7", &CrossEnv::default()).unwrap();
        assert!(profile
            .cmake_args()
            .contains(&"-DENABLE_PLUGINS=OFF".to_string()));
    }

    #[test]
    fn test_unknown_target_is_unsupported() {
        let err = CrossProfile::resolve("mips", &CrossEnv::default()).unwrap_err();
        assert!(matches!(err, CbError::UnsupportedPlatform { .. }));
    }
}
