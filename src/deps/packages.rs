//! Per-distro package tables
//!
//! Static data consumed by the dispatcher. Package name spelling differs per
//! distro; the lists are otherwise equivalent.

/// Base build dependencies, apt spelling (Ubuntu/Debian)
pub const APT_BASE: &[&str] = &[
    "build-essential",
    "cmake",
    "ninja-build",
    "pkg-config",
    "libssl-dev",
    "zlib1g-dev",
    "doxygen",
    "clang-format",
];

/// armv7 cross toolchain and foreign-architecture runtime, apt only
pub const APT_CROSS: &[&str] = &[
    "gcc-arm-linux-gnueabihf",
    "g++-arm-linux-gnueabihf",
    "libc6-dev-armhf-cross",
];

/// Base build dependencies, dnf spelling (Fedora)
pub const DNF_BASE: &[&str] = &[
    "gcc",
    "gcc-c++",
    "make",
    "cmake",
    "ninja-build",
    "pkgconf-pkg-config",
    "openssl-devel",
    "zlib-devel",
    "doxygen",
    "clang-tools-extra",
];

/// Base build dependencies, pacman spelling (Arch)
pub const PACMAN_BASE: &[&str] = &[
    "base-devel",
    "cmake",
    "ninja",
    "pkgconf",
    "openssl",
    "zlib",
    "doxygen",
    "clang",
];

/// Base build dependencies, Homebrew spelling (macOS)
pub const BREW_BASE: &[&str] = &[
    "cmake",
    "ninja",
    "pkg-config",
    "openssl@3",
    "doxygen",
    "clang-format",
];
