//! Invocation configuration
//!
//! All command-line tokens and environment overrides are folded into one
//! immutable [`Config`] before any other component runs. Parsing has no side
//! effects; a bad token short-circuits the whole invocation with a usage error.

use std::path::PathBuf;

use crate::error::CbError;

/// A top-level user intent
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    InstallDeps,
    Build,
    Debug,
    Test,
    GenerateDocs,
    Install,
    Reformat,
    BumpVersion,
}

/// Accumulated set of requested actions
///
/// Actions compose and are never mutually exclusive; inserting the same action
/// twice is a no-op.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ActionSet {
    install_deps: bool,
    build: bool,
    debug: bool,
    test: bool,
    generate_docs: bool,
    install: bool,
    reformat: bool,
    bump_version: bool,
}

impl ActionSet {
    pub fn insert(&mut self, action: Action) {
        match action {
            Action::InstallDeps => self.install_deps = true,
            Action::Build => self.build = true,
            Action::Debug => self.debug = true,
            Action::Test => self.test = true,
            Action::GenerateDocs => self.generate_docs = true,
            Action::Install => self.install = true,
            Action::Reformat => self.reformat = true,
            Action::BumpVersion => self.bump_version = true,
        }
    }

    pub fn contains(&self, action: Action) -> bool {
        match action {
            Action::InstallDeps => self.install_deps,
            Action::Build => self.build,
            Action::Debug => self.debug,
            Action::Test => self.test,
            Action::GenerateDocs => self.generate_docs,
            Action::Install => self.install,
            Action::Reformat => self.reformat,
            Action::BumpVersion => self.bump_version,
        }
    }

    pub fn is_empty(&self) -> bool {
        *self == ActionSet::default()
    }

    /// Whether any action needs a configured CMake build tree
    pub fn needs_build_tree(&self) -> bool {
        self.build || self.debug || self.test || self.install
    }
}

/// Raw cross-toolchain overrides from the environment
///
/// Read once at startup; precedence between them is resolved later by the
/// cross-compile configurator, never re-read ad hoc.
#[derive(Debug, Clone, Default)]
pub struct CrossEnv {
    pub sysroot: Option<String>,
    pub prefix: Option<String>,
    pub cc: Option<String>,
    pub cxx: Option<String>,
}

/// Immutable configuration record for one invocation
#[derive(Debug, Clone)]
pub struct Config {
    pub actions: ActionSet,
    /// Forward the non-interactive flag to package managers
    pub assume_yes: bool,
    /// Extra build-system arguments; new flags are PREPENDED, so the
    /// last-registered flag lands first in the final argument list.
    pub extra_build_args: Vec<String>,
    /// Cross-compilation target name; `None` means a native build
    pub target: Option<String>,
    /// Explicit `-j` override of the parallelism calculator
    pub jobs: Option<usize>,
    /// Install prefix, honored only on the Darwin profile
    pub install_prefix: Option<PathBuf>,
    pub cross_env: CrossEnv,
    pub verbose: bool,
}

impl Config {
    /// Fold command-line tokens and flags plus an environment snapshot into a
    /// configuration record.
    ///
    /// `env` is injected so tests never touch process environment. Empty
    /// variable values are treated as unset, matching shell conventions.
    pub fn assemble(
        tokens: &[String],
        no_plugins: bool,
        no_tls: bool,
        assume_yes: bool,
        jobs: Option<usize>,
        verbose: bool,
        env: impl Fn(&str) -> Option<String>,
    ) -> Result<Self, CbError> {
        let actions = fold_actions(tokens)?;

        let env_nonempty = |name: &str| env(name).filter(|v| !v.trim().is_empty());

        // CMAKE_FLAGS seeds the list; CLI flags prepend in declaration order so
        // the last-registered one ends up first.
        let mut extra_build_args: Vec<String> = env_nonempty("CMAKE_FLAGS")
            .map(|v| v.split_whitespace().map(str::to_string).collect())
            .unwrap_or_default();
        if no_plugins {
            extra_build_args.insert(0, "-DENABLE_PLUGINS=OFF".to_string());
        }
        if no_tls {
            extra_build_args.insert(0, "-DENABLE_TLS=OFF".to_string());
        }

        // CB_CROSS_TARGET is checked first and wins over CROSS_TARGET. The
        // target name is checked here so every action path rejects an unknown
        // target before touching the system.
        let target = env_nonempty("CB_CROSS_TARGET").or_else(|| env_nonempty("CROSS_TARGET"));
        if let Some(target) = &target {
            crate::cross::ensure_supported(target)?;
        }

        let cross_env = CrossEnv {
            sysroot: env_nonempty("CROSS_SYSROOT"),
            prefix: env_nonempty("CROSS_PREFIX"),
            cc: env_nonempty("CROSS_CC"),
            cxx: env_nonempty("CROSS_CXX"),
        };

        Ok(Config {
            actions,
            assume_yes,
            extra_build_args,
            target,
            jobs,
            install_prefix: env_nonempty("INSTALL_PREFIX").map(PathBuf::from),
            cross_env,
            verbose,
        })
    }

    pub fn is_cross(&self) -> bool {
        self.target.is_some()
    }
}

/// Pure left fold over the action tokens
///
/// A token starting with `test` (e.g. `test`, `tests`, `testxml`) requests
/// both a build and the test run; `all` expands to the five-action composite.
fn fold_actions(tokens: &[String]) -> Result<ActionSet, CbError> {
    let mut actions = ActionSet::default();

    for token in tokens {
        match token.as_str() {
            "deps" => actions.insert(Action::InstallDeps),
            "build" => actions.insert(Action::Build),
            "debug" => actions.insert(Action::Debug),
            "doc" => actions.insert(Action::GenerateDocs),
            "install" => actions.insert(Action::Install),
            "src" => actions.insert(Action::Reformat),
            "bump" => actions.insert(Action::BumpVersion),
            "all" => {
                actions.insert(Action::InstallDeps);
                actions.insert(Action::Build);
                actions.insert(Action::Test);
                actions.insert(Action::GenerateDocs);
                actions.insert(Action::Install);
            }
            t if t.starts_with("test") => {
                actions.insert(Action::Build);
                actions.insert(Action::Test);
            }
            t => {
                return Err(CbError::usage(format!("unknown action '{}'", t)));
            }
        }
    }

    if actions.is_empty() {
        return Err(CbError::usage("no action given"));
    }

    Ok(actions)
}
