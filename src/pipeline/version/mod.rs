// cavaux-assemble: Release Assembly Pipeline
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Version derivation and propagation.
//!
//! ```text
//! --tag X.Y.Z[.B] ─┐
//! git describe ────┼─> Version ─┬─> .hemtt/project.toml  [version] major/minor/patch/build
//! fallback 0.0.0.0 ┘            └─> mod.cpp              DevBuild | vA.B.C.D → vX.Y.Z.B
//!
//! --commit ID ─────┐
//! git rev-parse ───┼─> commit id
//! xxxxxxxx ────────┘
//! ```
//!
//! Both file rewrites are idempotent.

use std::fmt;
use std::path::Path;
use std::str::FromStr;

use anyhow::Context;
use regex::Regex;
use toml_edit::{DocumentMut, value};
use tracing::{debug, info, warn};

use crate::config::paths::PathsConfig;
use crate::error::{FsError, Result};
use crate::tools::{ToolContext, git};

/// Commit id used when HEAD cannot be resolved.
pub const FALLBACK_COMMIT: &str = "xxxxxxxx";

/// Four-part release version.
///
/// Versions read from git tags always carry build 0. Only an explicit
/// override parsed through `FromStr` may set the build number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
pub struct Version {
    pub major: u32,
    pub minor: u32,
    pub patch: u32,
    pub build: u32,
}

impl Version {
    #[must_use]
    pub const fn new(major: u32, minor: u32, patch: u32, build: u32) -> Self {
        Self {
            major,
            minor,
            patch,
            build,
        }
    }

    /// Parses a git tag as `MAJOR.MINOR.PATCH`; the build number is always 0.
    ///
    /// A leading `v` is accepted. Anything else, four-part tags included,
    /// yields `None`.
    #[must_use]
    pub fn parse_tag(tag: &str) -> Option<Self> {
        match parse_parts(tag)?.as_slice() {
            [major, minor, patch] => Some(Self::new(*major, *minor, *patch, 0)),
            _ => None,
        }
    }
}

fn parse_parts(text: &str) -> Option<Vec<u32>> {
    let text = text.trim();
    let text = text
        .strip_prefix('v')
        .or_else(|| text.strip_prefix('V'))
        .unwrap_or(text);

    text.split('.')
        .map(|part| {
            if part.is_empty() || !part.bytes().all(|b| b.is_ascii_digit()) {
                return None;
            }
            part.parse::<u32>().ok()
        })
        .collect()
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}.{}.{}.{}",
            self.major, self.minor, self.patch, self.build
        )
    }
}

impl FromStr for Version {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match parse_parts(s).as_deref() {
            Some([major, minor, patch]) => Ok(Self::new(*major, *minor, *patch, 0)),
            Some([major, minor, patch, build]) => Ok(Self::new(*major, *minor, *patch, *build)),
            _ => Err(format!("expected X.Y.Z or X.Y.Z.B, got '{s}'")),
        }
    }
}

/// Picks the release version: the override, else the latest tag, else `0.0.0.0`.
///
/// # Errors
///
/// Returns an error only if git cannot be run or the run was interrupted.
pub async fn resolve_version(ctx: &ToolContext, tag_override: Option<Version>) -> Result<Version> {
    if let Some(version) = tag_override {
        info!(version = %version, "Using version from --tag");
        return Ok(version);
    }

    let version = match git::latest_tag(ctx).await? {
        Some(tag) => Version::parse_tag(&tag).unwrap_or_else(|| {
            warn!(tag = %tag, "Tag is not a MAJOR.MINOR.PATCH version, using 0.0.0.0 instead");
            Version::default()
        }),
        None => {
            warn!("No git tags detected, using 0.0.0.0 instead");
            Version::default()
        }
    };
    info!(version = %version, "Version resolved");
    Ok(version)
}

/// Picks the commit id: the override, else `git rev-parse`, else `xxxxxxxx`.
///
/// # Errors
///
/// Returns an error only if git cannot be run or the run was interrupted.
pub async fn resolve_commit(ctx: &ToolContext, commit_override: Option<&str>) -> Result<String> {
    if let Some(commit) = commit_override.filter(|c| !c.is_empty()) {
        return Ok(commit.to_string());
    }

    Ok(git::short_commit(ctx).await?.unwrap_or_else(|| {
        warn!("No git commit id detected, using '{FALLBACK_COMMIT}' instead");
        FALLBACK_COMMIT.to_string()
    }))
}

fn read_required(path: &Path) -> Result<String> {
    if !path.is_file() {
        return Err(FsError::NotFound(path.display().to_string()).into());
    }
    std::fs::read_to_string(path).map_err(|source| {
        FsError::IoError {
            path: path.display().to_string(),
            source,
        }
        .into()
    })
}

/// Sets `version.major/minor/patch/build` in the build tool project file.
///
/// Formatting and comments elsewhere in the file are preserved.
///
/// # Errors
///
/// Returns an error if the file is missing, is not valid TOML, or has a
/// non-table `version` key.
pub fn write_build_project(path: &Path, version: Version) -> Result<()> {
    let content = read_required(path)?;
    let mut doc: DocumentMut = content
        .parse()
        .with_context(|| format!("failed to parse {}", path.display()))?;

    let table = doc
        .entry("version")
        .or_insert(toml_edit::table())
        .as_table_like_mut()
        .with_context(|| format!("'version' in {} is not a table", path.display()))?;
    table.insert("major", value(i64::from(version.major)));
    table.insert("minor", value(i64::from(version.minor)));
    table.insert("patch", value(i64::from(version.patch)));
    table.insert("build", value(i64::from(version.build)));

    std::fs::write(path, doc.to_string())
        .with_context(|| format!("failed to write {}", path.display()))?;
    debug!(path = %path.display(), version = %version, "build project version set");
    Ok(())
}

/// Replaces the `DevBuild` placeholder or a previous `vA.B.C.D` token.
///
/// Returns whether a token was found.
///
/// # Errors
///
/// Returns an error if the file is missing or cannot be written.
pub fn write_mod_descriptor(path: &Path, version: Version) -> Result<bool> {
    let content = read_required(path)?;
    let regex = Regex::new(r"DevBuild|v[0-9]+\.[0-9]+\.[0-9]+\.[0-9]+")
        .context("failed to compile descriptor version regex")?;
    if !regex.is_match(&content) {
        warn!(path = %path.display(), "No version placeholder found");
        return Ok(false);
    }

    let replacement = format!("v{version}");
    let updated = regex.replace_all(&content, replacement.as_str());
    std::fs::write(path, updated.as_bytes())
        .with_context(|| format!("failed to write {}", path.display()))?;
    debug!(path = %path.display(), version = %version, "mod descriptor version set");
    Ok(true)
}

/// Writes the version into both configuration files.
///
/// # Errors
///
/// Returns an error if either file is missing or cannot be rewritten.
pub fn apply_version(paths: &PathsConfig, version: Version) -> Result<()> {
    write_build_project(&paths.build_project, version)?;
    write_mod_descriptor(&paths.mod_descriptor, version)?;
    Ok(())
}

#[cfg(test)]
mod tests;
