// cavaux-assemble: Release Assembly Pipeline
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Release command, the full pipeline.
//!
//! ```text
//! tools ─> manifest + audit ─> version/commit ─> download ─> verify
//!   ─> hemtt release ─> assemble ─> sign ─> publish + zip
//! ```
//!
//! Nothing external is touched before the tool check, the manifest and the
//! credentials file have been validated. Once the staging tree exists, a
//! failure removes it again unless `--keep-partial` is given.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use crate::cli::release::ReleaseArgs;
use crate::cmd::audit::{manifest_path, report_licenses};
use crate::config::Config;
use crate::config::credentials::Credentials;
use crate::config::paths::ReleaseLayout;
use crate::error::Result;
use crate::manifest::Manifest;
use crate::pipeline::archive::{list_archives, publish};
use crate::pipeline::assemble::assemble;
use crate::pipeline::download::download;
use crate::pipeline::resolver::check_tools;
use crate::pipeline::sign::sign_release;
use crate::pipeline::verify::verify_downloads;
use crate::pipeline::version::{Version, apply_version, resolve_commit, resolve_version};
use crate::tools::hemtt::HemttTool;
use crate::tools::{Tool, ToolContext};

/// Outcome of a successful release run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReleaseReport {
    pub version: Version,
    pub commit: String,
    pub key_name: String,
    pub archive: PathBuf,
    pub packages: usize,
}

/// Removes the staging tree on drop unless disarmed.
struct StagingGuard {
    path: PathBuf,
    armed: bool,
}

impl StagingGuard {
    fn new(path: &Path, keep_partial: bool) -> Self {
        Self {
            path: path.to_path_buf(),
            armed: !keep_partial,
        }
    }

    const fn disarm(&mut self) {
        self.armed = false;
    }
}

impl Drop for StagingGuard {
    fn drop(&mut self) {
        if !self.armed || !self.path.exists() {
            return;
        }
        match std::fs::remove_dir_all(&self.path) {
            Ok(()) => info!(path = %self.path.display(), "Removed partial release"),
            Err(e) => warn!(path = %self.path.display(), error = %e, "failed to remove partial release"),
        }
    }
}

/// Main handler for the release command.
///
/// # Errors
///
/// Returns the first fatal condition of any stage: missing tools, a missing
/// or malformed manifest, unreadable credentials, a missing config file,
/// incomplete downloads, a failed build, missing artifacts, signing failures
/// or `PipelineError::Interrupted` after Ctrl+C.
pub async fn run_release_command(
    args: &ReleaseArgs,
    config: Config,
    cancel_token: CancellationToken,
    verbose: bool,
) -> Result<ReleaseReport> {
    let config = Arc::new(config);
    let ctx = ToolContext::new(Arc::clone(&config), cancel_token, verbose);
    let layout = ReleaseLayout::new(&config);
    let project = &config.project;

    check_tools(&config.tools)?;

    let manifest = Manifest::load(&manifest_path(args.data.as_deref(), &config))?;
    let flagged = report_licenses(&manifest, &project.accepted_license);
    debug!(flagged = flagged.len(), "license audit");
    let expected = manifest.workshop_items(&project.workshop_category)?;
    let items: Vec<String> = expected.keys().cloned().collect();

    let credentials = Credentials::resolve(
        args.username.as_deref(),
        args.password.as_deref(),
        args.credentials.as_deref(),
    )?;

    let version = resolve_version(&ctx, args.tag).await?;
    let commit = resolve_commit(&ctx, args.commit.as_deref()).await?;
    apply_version(&config.paths, version)?;
    ctx.check_cancelled()?;

    info!("Downloading mods from workshop...");
    download(&ctx, &layout, &credentials, &items, args.skip_download).await?;
    ctx.check_cancelled()?;

    info!("Checking downloads...");
    verify_downloads(layout.content(), expected)?;

    HemttTool::new().run(&ctx).await?;
    ctx.check_cancelled()?;

    let mut staging = StagingGuard::new(layout.staging(), args.keep_partial);
    let summary = assemble(&layout, &project.metadata_files).await?;
    ctx.check_cancelled()?;

    info!("Creating keys and resigning addons...");
    let key_name = layout.key_name(version, &commit);
    sign_release(
        &ctx,
        &layout.staging_keys(),
        &layout.staging_addons(),
        &key_name,
        &summary.packages,
    )
    .await?;
    ctx.check_cancelled()?;

    let archive = publish(&layout, version).await?;
    staging.disarm();
    list_archives(layout.releases())?;

    Ok(ReleaseReport {
        version,
        commit,
        key_name,
        archive,
        packages: summary.packages.len(),
    })
}
