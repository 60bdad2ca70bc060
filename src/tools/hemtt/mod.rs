// cavaux-assemble: Release Assembly Pipeline
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Addon build tool.
//!
//! ```text
//! HemttTool: hemtt release   (cwd = project root)
//! Uses: config.tools.hemtt, config.paths.root
//! ```
//!
//! A non-zero exit is fatal since every later step consumes the build output.

use tracing::{error, info};

use super::{BoxFuture, Tool, ToolContext};
use crate::core::process::builder::{ProcessBuilder, ProcessFlags};
use crate::error::{PipelineError, Result};

/// Runs the release build of the primary addon.
#[derive(Debug, Clone, Copy, Default)]
pub struct HemttTool;

impl HemttTool {
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    async fn release(ctx: &ToolContext) -> Result<()> {
        let config = ctx.config();
        let builder = ProcessBuilder::new(&config.tools.hemtt)
            .arg("release")
            .cwd(&config.paths.root)
            .flag(ProcessFlags::ALLOW_FAILURE);

        info!("Building main addon");
        let output = ctx.run(ctx.with_output(builder)).await?;
        if !output.success() {
            error!(exit_code = output.exit_code(), "build failed");
            return Err(PipelineError::BuildFailed {
                code: output.exit_code(),
            }
            .into());
        }
        Ok(())
    }
}

impl Tool for HemttTool {
    fn name(&self) -> &'static str {
        "hemtt"
    }

    fn run<'a>(&'a self, ctx: &'a ToolContext) -> BoxFuture<'a, Result<()>> {
        Box::pin(Self::release(ctx))
    }
}
