// cavaux-assemble: Release Assembly Pipeline
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Publishing and archiving.
//!
//! ```text
//! <work>/release/ ──copy───> <releases>/@cavaux/ (replaced) ──zip──> <releases>/cavaux-<version>.zip
//!                                                         entries: @cavaux/addons/..., @cavaux/keys/..., @cavaux/mod.cpp
//! ```

use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::{Path, PathBuf};

use anyhow::Context;
use tracing::{debug, info};
use zip::CompressionMethod;
use zip::write::{SimpleFileOptions, ZipWriter};

use crate::config::paths::ReleaseLayout;
use crate::error::Result;
use crate::utility::fs::copy::copy_dir_contents_async;
use crate::utility::fs::walk::{WalkOptions, find_files};

/// Replaces the published directory with the staging tree and zips it.
///
/// Returns the archive path. An archive of the same version is replaced.
///
/// # Errors
///
/// Returns an error if the previous tree cannot be removed, the copy fails,
/// or the archive cannot be written.
pub async fn publish(layout: &ReleaseLayout, version: impl std::fmt::Display) -> Result<PathBuf> {
    info!("Creating archive...");
    let published = layout.published();
    if published.exists() {
        debug!(path = %published.display(), "removing previous published tree");
        tokio::fs::remove_dir_all(published)
            .await
            .with_context(|| format!("failed to remove {}", published.display()))?;
    }
    copy_dir_contents_async(layout.staging(), layout.published()).await?;

    let archive = layout.archive(version);
    let source = layout.published().to_path_buf();
    let prefix = layout.mod_dir().to_string();
    let target = archive.clone();
    let count = tokio::task::spawn_blocking(move || write_archive(&source, &prefix, &target))
        .await
        .context("archive task panicked")??;

    debug!(archive = %archive.display(), entries = count, "archive written");
    Ok(archive)
}

/// Writes every file below `source` into a fresh zip at `target`, each entry
/// prefixed with `prefix/`.
///
/// Returns the number of files written.
///
/// # Errors
///
/// Returns an error if a file cannot be read or the archive cannot be written.
pub fn write_archive(source: &Path, prefix: &str, target: &Path) -> Result<usize> {
    let files = find_files(source, "**", &WalkOptions::default())?;
    let file = File::create(target)
        .with_context(|| format!("failed to create {}", target.display()))?;
    let mut writer = ZipWriter::new(BufWriter::new(file));
    let options = SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);

    for path in &files {
        let relative = path.strip_prefix(source).with_context(|| {
            format!("{} is outside {}", path.display(), source.display())
        })?;
        let name = relative
            .components()
            .map(|c| c.as_os_str().to_string_lossy())
            .fold(prefix.to_string(), |mut name, part| {
                name.push('/');
                name.push_str(&part);
                name
            });

        writer
            .start_file(name.as_str(), options)
            .with_context(|| format!("failed to add {name} to {}", target.display()))?;
        let mut input = BufReader::new(
            File::open(path).with_context(|| format!("failed to open {}", path.display()))?,
        );
        std::io::copy(&mut input, &mut writer)
            .with_context(|| format!("failed to write {name} to {}", target.display()))?;
    }

    writer
        .finish()
        .with_context(|| format!("failed to finish {}", target.display()))?;
    Ok(files.len())
}

/// Logs every archive in the releases directory and returns them.
///
/// # Errors
///
/// Returns an error if the directory cannot be listed.
pub fn list_archives(releases: &Path) -> Result<Vec<PathBuf>> {
    let archives = find_files(releases, "(?i)*.zip", &WalkOptions::shallow())?;
    for archive in &archives {
        info!("Created release: {}", archive.display());
    }
    Ok(archives)
}

#[cfg(test)]
mod tests;
