// cavaux-assemble: Release Assembly Pipeline
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! License audit command.

use std::path::{Path, PathBuf};

use tracing::{info, warn};

use crate::cli::AuditArgs;
use crate::config::Config;
use crate::error::Result;
use crate::manifest::{LicenseFinding, Manifest};

/// Resolves the manifest path: `--data` relative to the project root, else
/// the configured manifest.
#[must_use]
pub fn manifest_path(data: Option<&Path>, config: &Config) -> PathBuf {
    data.map_or_else(
        || config.project.manifest.clone(),
        |path| config.paths.root.join(path),
    )
}

/// Logs every workshop entry whose license is not the accepted one.
///
/// The audit is advisory; findings are returned for the caller to inspect.
#[must_use]
pub fn report_licenses(manifest: &Manifest, accepted: &str) -> Vec<LicenseFinding> {
    info!("Checking and verifying mod list...");
    let findings = manifest.audit(accepted);
    for finding in &findings {
        warn!(
            category = %finding.category,
            "{} [{}]: non standard license agreement '{}'",
            finding.name,
            finding.id,
            finding.license
        );
    }
    info!(
        checked = manifest.workshop_entry_count(),
        flagged = findings.len(),
        "License audit finished"
    );
    findings
}

/// Loads the manifest and runs the license audit.
///
/// # Errors
///
/// Returns a `ManifestError` if the manifest is missing or malformed.
pub fn run_audit_command(args: &AuditArgs, config: &Config) -> Result<()> {
    let manifest = Manifest::load(&manifest_path(args.data.as_deref(), config))?;
    let findings = report_licenses(&manifest, &config.project.accepted_license);
    if findings.is_empty() {
        info!("All workshop mods carry an accepted license");
    }
    Ok(())
}
