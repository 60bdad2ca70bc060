// cavaux-assemble: Release Assembly Pipeline
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Download verification.
//!
//! Compares the entries of the workshop content directory with the ids the
//! manifest declares. Every absent id is reported before the step fails.

use std::collections::{BTreeMap, BTreeSet};
use std::path::Path;

use tracing::{error, info};

use crate::error::{PipelineError, Result};
use crate::manifest::ModEntry;
use crate::utility::fs::walk::list_entry_names;

/// Checks that `content` holds exactly one entry per declared id.
///
/// Returns the entry names found.
///
/// # Errors
///
/// - `PipelineError::NoDownloads` if `content` does not exist.
/// - `PipelineError::DownloadCountMismatch` if the entry count differs.
/// - `PipelineError::MissingMods` if the counts match but ids differ.
pub fn verify_downloads(content: &Path, expected: &BTreeMap<String, ModEntry>) -> Result<Vec<String>> {
    if !content.is_dir() {
        error!(path = %content.display(), "Failed to discover any mods");
        return Err(PipelineError::NoDownloads {
            path: content.display().to_string(),
        }
        .into());
    }

    let found = list_entry_names(content)?;
    let present: BTreeSet<&str> = found.iter().map(String::as_str).collect();

    let mut missing = Vec::new();
    for (id, entry) in expected {
        if !present.contains(id.as_str()) {
            error!("{} [{id}] does not exist or has not downloaded properly", entry.name);
            missing.push(id.clone());
        }
    }

    if found.len() != expected.len() {
        return Err(PipelineError::DownloadCountMismatch {
            expected: expected.len(),
            actual: found.len(),
            missing,
        }
        .into());
    }
    if !missing.is_empty() {
        return Err(PipelineError::MissingMods { missing }.into());
    }

    info!(count = found.len(), "All mods downloaded");
    Ok(found)
}
