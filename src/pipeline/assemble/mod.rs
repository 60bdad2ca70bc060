// cavaux-assemble: Release Assembly Pipeline
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Release tree assembly.
//!
//! ```text
//! <content>/<id>/addons/*.pbo ──┐
//! <build_output>/addons/*.pbo ──┼──> <work>/release/addons/
//! <build_output>/<metadata> ────┴──> <work>/release/
//!                                    <work>/release/keys/   (empty, for the signer)
//! previous <work>/release/ ──> removed first
//! <releases>/*.zip ──> deleted
//! ```

use std::path::{Path, PathBuf};

use anyhow::Context;
use tokio::fs;
use tracing::{debug, info};

use crate::config::paths::ReleaseLayout;
use crate::error::{PipelineError, Result};
use crate::utility::fs::copy::{copy_file_into, remove_files};
use crate::utility::fs::walk::{WalkOptions, find_files, list_entry_names};

const PACKAGE_PATTERN: &str = "(?i)*.pbo";

/// What ended up in the staging tree.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AssemblySummary {
    /// Staged packages, sorted.
    pub packages: Vec<PathBuf>,
    /// Archives removed from the releases directory.
    pub removed_archives: Vec<PathBuf>,
}

/// Creates a fresh staging tree and fills it with every package and metadata
/// file. Keys and signatures from an earlier run are discarded.
///
/// # Errors
///
/// Returns `PipelineError::ArtifactMissing` if a metadata file is absent from
/// the build output, or an error if any copy fails.
pub async fn assemble(layout: &ReleaseLayout, metadata_files: &[String]) -> Result<AssemblySummary> {
    if layout.staging().exists() {
        debug!(path = %layout.staging().display(), "removing previous staging tree");
        fs::remove_dir_all(layout.staging())
            .await
            .with_context(|| format!("failed to remove {}", layout.staging().display()))?;
    }

    let addons = layout.staging_addons();
    for dir in [&addons, &layout.staging_keys()] {
        fs::create_dir_all(dir)
            .await
            .with_context(|| format!("failed to create {}", dir.display()))?;
    }

    info!("Copying downloaded mods");
    if layout.content().is_dir() {
        for entry in list_entry_names(layout.content())? {
            let entry_addons = layout.content().join(&entry).join("addons");
            copy_packages(&entry_addons, &addons).await?;
        }
    }

    info!("Copying build output");
    for name in metadata_files {
        let source = layout.build_output().join(name);
        if !source.is_file() {
            return Err(PipelineError::ArtifactMissing {
                path: source.display().to_string(),
            }
            .into());
        }
        copy_file_into(&source, layout.staging()).await?;
    }
    copy_packages(&layout.build_addons(), &addons).await?;

    let removed_archives = remove_archives(layout.releases()).await?;
    let packages = find_files(&addons, PACKAGE_PATTERN, &WalkOptions::shallow())?;
    info!(count = packages.len(), "Release tree assembled");

    Ok(AssemblySummary {
        packages,
        removed_archives,
    })
}

/// Copies every package directly inside `src` into `dst`.
///
/// A missing `src` copies nothing.
async fn copy_packages(src: &Path, dst: &Path) -> Result<usize> {
    if !src.is_dir() {
        debug!(path = %src.display(), "no addons directory");
        return Ok(0);
    }
    let packages = find_files(src, PACKAGE_PATTERN, &WalkOptions::shallow())?;
    for package in &packages {
        copy_file_into(package, dst).await?;
    }
    debug!(from = %src.display(), count = packages.len(), "packages copied");
    Ok(packages.len())
}

async fn remove_archives(releases: &Path) -> Result<Vec<PathBuf>> {
    if !releases.is_dir() {
        return Ok(Vec::new());
    }
    let archives = find_files(releases, "(?i)*.zip", &WalkOptions::shallow())?;
    remove_files(&archives).await?;
    for archive in &archives {
        debug!(path = %archive.display(), "removed previous archive");
    }
    Ok(archives)
}
