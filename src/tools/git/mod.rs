// cavaux-assemble: Release Assembly Pipeline
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Read-only git queries run in the project root.
//!
//! ```text
//! latest_tag()    git describe --tags --abbrev=0
//! short_commit()  git rev-parse --short=8 HEAD
//! ```
//!
//! A non-zero exit (128 outside a repository or without tags) yields `None`;
//! callers pick the fallback.

use tracing::debug;

use super::ToolContext;
use crate::core::process::builder::{ProcessBuilder, ProcessFlags};
use crate::error::Result;

async fn query(ctx: &ToolContext, args: &[&str]) -> Result<Option<String>> {
    let config = ctx.config();
    let builder = ProcessBuilder::new(&config.tools.git)
        .args(args)
        .cwd(&config.paths.root)
        .capture_output()
        .flag(ProcessFlags::ALLOW_FAILURE);

    let output = ctx.run(builder).await?;
    if !output.success() {
        debug!(
            args = ?args,
            exit_code = output.exit_code(),
            stderr = %output.stderr(),
            "git query failed"
        );
        return Ok(None);
    }

    let value = output.stdout().trim();
    Ok((!value.is_empty()).then(|| value.to_string()))
}

/// Returns the most recent tag reachable from HEAD.
///
/// # Errors
///
/// Returns an error if git cannot be spawned or the run was interrupted.
pub async fn latest_tag(ctx: &ToolContext) -> Result<Option<String>> {
    query(ctx, &["describe", "--tags", "--abbrev=0"]).await
}

/// Returns the 8-character abbreviated id of HEAD.
///
/// # Errors
///
/// Returns an error if git cannot be spawned or the run was interrupted.
pub async fn short_commit(ctx: &ToolContext) -> Result<Option<String>> {
    query(ctx, &["rev-parse", "--short=8", "HEAD"]).await
}
