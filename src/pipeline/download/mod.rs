// cavaux-assemble: Release Assembly Pipeline
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Workshop download step.
//!
//! ```text
//! --skip-download ──────────────> Skipped (cache reused)
//! steamcmd +quit
//! username or password empty ───> Skipped (warning names what is missing)
//! otherwise: one download invocation --> Completed
//! ```

use tokio::fs;
use tracing::warn;

use anyhow::Context;

use crate::config::credentials::Credentials;
use crate::config::paths::ReleaseLayout;
use crate::error::Result;
use crate::tools::steamcmd::SteamCmdTool;
use crate::tools::{Tool, ToolContext};

/// What the download step ended up doing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DownloadOutcome {
    /// Nothing was downloaded; whatever is cached gets verified.
    Skipped,
    /// The downloader ran. Its exit status is not a verdict.
    Completed,
}

/// Downloads the given workshop items into the work directory.
///
/// # Errors
///
/// Returns an error if the work directory cannot be created, a downloader
/// process cannot be spawned, or the run was interrupted.
pub async fn download(
    ctx: &ToolContext,
    layout: &ReleaseLayout,
    credentials: &Credentials,
    items: &[String],
    skip: bool,
) -> Result<DownloadOutcome> {
    if skip {
        warn!("Running with --skip-download, will use preexisting downloaded cache instead");
        return Ok(DownloadOutcome::Skipped);
    }

    SteamCmdTool::new().bootstrap_op().run(ctx).await?;

    if let Some(missing) = credentials.missing() {
        if credentials.username().is_empty() && credentials.password().is_empty() {
            warn!("No steamcmd username and password provided, skipping download");
        } else {
            warn!("No steamcmd {missing} provided, skipping download");
        }
        return Ok(DownloadOutcome::Skipped);
    }

    fs::create_dir_all(layout.work())
        .await
        .with_context(|| format!("failed to create {}", layout.work().display()))?;

    SteamCmdTool::new()
        .install_dir(layout.work())
        .credentials(credentials.clone())
        .items(items.iter().cloned())
        .download_op()
        .run(ctx)
        .await?;

    Ok(DownloadOutcome::Completed)
}

#[cfg(test)]
mod tests;
