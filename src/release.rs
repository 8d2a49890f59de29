//! Version bump engine
//!
//! The single source of truth for the project version is one `#define` line
//! in a generated header. The bump compares the local triple against the
//! latest published tag of the upstream remote:
//!
//! - same major.minor as upstream: start a new minor line (`minor + 1`,
//!   `patch = 1`) — snapshot numbering ahead of the published release;
//! - different major.minor: the local line is already ahead, so accumulate
//!   (`patch + 1`).
//!
//! The engine only rewrites the header; it never tags, commits or publishes.
//! Concurrent bump invocations race on the header file; this is a documented
//! limitation.

use std::fs;
use std::path::Path;

use regex::Regex;
use semver::Version;

use crate::error::{hints, CbError};
use crate::exec::run_captured;

/// Header holding the authoritative version constant, relative to the
/// project root
pub const VERSION_HEADER: &str = "include/project_version.h";

const VERSION_DEFINE: &str = "PROJECT_VERSION";

fn version_line_regex() -> Regex {
    // Matches: #define PROJECT_VERSION "1.2.3"
    Regex::new(&format!(
        r#"(?m)^(\s*#define\s+{}\s+")(\d+\.\d+\.\d+)(")"#,
        VERSION_DEFINE
    ))
    .unwrap()
}

/// Read the current version triple from the header
pub fn read_local_version(header: &Path) -> Result<Version, CbError> {
    let content = fs::read_to_string(header).map_err(|e| {
        CbError::version_error(
            format!("cannot read {}: {}", header.display(), e),
            format!("expected the version constant in {}", VERSION_HEADER),
        )
    })?;

    let caps = version_line_regex().captures(&content).ok_or_else(|| {
        CbError::version_error(
            format!(
                "no `#define {} \"x.y.z\"` line in {}",
                VERSION_DEFINE,
                header.display()
            ),
            "restore the version constant before bumping",
        )
    })?;

    Version::parse(&caps[2]).map_err(|e| {
        CbError::version_error(
            format!("malformed version literal '{}': {}", &caps[2], e),
            "the constant must be a plain major.minor.patch triple",
        )
    })
}

/// Rewrite the version literal in place, touching nothing else
pub fn write_local_version(header: &Path, next: &Version) -> Result<(), CbError> {
    let content = fs::read_to_string(header).map_err(|e| {
        CbError::version_error(
            format!("cannot read {}: {}", header.display(), e),
            format!("expected the version constant in {}", VERSION_HEADER),
        )
    })?;

    let re = version_line_regex();
    if !re.is_match(&content) {
        return Err(CbError::version_error(
            format!("no version constant found in {}", header.display()),
            "restore the version constant before bumping",
        ));
    }

    let replaced = re.replace(&content, format!("${{1}}{}${{3}}", next));
    fs::write(header, replaced.as_bytes()).map_err(|e| {
        CbError::version_error(
            format!("cannot write {}: {}", header.display(), e),
            "check file permissions",
        )
    })?;
    Ok(())
}

/// Latest published version from the upstream remote's tags
///
/// An unreachable remote or a tag list with no parseable `vX.Y.Z` entries is
/// a fatal, distinct error; the engine never guesses a baseline.
pub fn latest_remote_version(project_root: &Path) -> Result<Version, CbError> {
    if !crate::exec::command_exists("git") {
        return Err(CbError::missing_tool("git", "the bump action", hints::git()));
    }

    let root = project_root.display().to_string();
    let out = run_captured(
        "git",
        &["-C", root.as_str(), "ls-remote", "--tags", "origin"],
    )
    .map_err(|e| {
        CbError::remote_version(
            format!("failed to run git ls-remote: {}", e),
            "check that this is a git checkout with an 'origin' remote",
        )
    })?;

    if !out.success {
        return Err(CbError::remote_version(
            format!("git ls-remote failed: {}", out.stderr.trim()),
            "check network access and the 'origin' remote URL",
        ));
    }

    parse_remote_tags(&out.stdout)
        .into_iter()
        .max()
        .ok_or_else(|| {
            CbError::remote_version(
                "origin has no vX.Y.Z tags",
                "push a version tag upstream before bumping against it",
            )
        })
}

/// Parse `git ls-remote --tags` output into version triples
///
/// Peeled entries (`^{}`) and tags without the `v` triple shape are skipped.
fn parse_remote_tags(output: &str) -> Vec<Version> {
    output
        .lines()
        .filter_map(|line| line.split_whitespace().nth(1))
        .filter(|r| !r.ends_with("^{}"))
        .filter_map(|r| r.strip_prefix("refs/tags/"))
        .filter_map(|tag| tag.strip_prefix('v'))
        .filter_map(|v| Version::parse(v).ok())
        .filter(|v| v.pre.is_empty() && v.build.is_empty())
        .collect()
}

/// Compute the next version under the minor/patch policy
pub fn next_version(current: &Version, latest: &Version) -> Version {
    if current.major == latest.major && current.minor == latest.minor {
        Version::new(current.major, current.minor + 1, 1)
    } else {
        Version::new(current.major, current.minor, current.patch + 1)
    }
}

/// Run the full bump: read, compare against upstream, write back
pub fn bump(project_root: &Path) -> Result<(Version, Version), CbError> {
    let header = project_root.join(VERSION_HEADER);
    let current = read_local_version(&header)?;
    let latest = latest_remote_version(project_root)?;
    let next = next_version(&current, &latest);
    write_local_version(&header, &next)?;
    Ok((current, next))
}
