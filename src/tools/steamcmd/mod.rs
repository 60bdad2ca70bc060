// cavaux-assemble: Release Assembly Pipeline
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Workshop downloader driven through `steamcmd`.
//!
//! ```text
//! SteamCmdTool
//! Operations: Bootstrap | Download
//! Bootstrap: steamcmd +quit                  (self-update)
//! Download:  steamcmd +force_install_dir <dir> +login <user> <pass>
//!              (+workshop_download_item <app> <id> validate)... +quit
//! Uses: config.tools.steamcmd, config.project.app_id
//! ```
//!
//! The exit code is never fatal; what arrived on disk is checked afterwards.
//! With `--verbose` the terminal is handed over so Steam Guard can prompt.

use std::path::{Path, PathBuf};

use anyhow::Context;
use tracing::{info, warn};

use super::{BoxFuture, Tool, ToolContext};
use crate::config::credentials::Credentials;
use crate::core::process::builder::{ProcessBuilder, ProcessFlags};
use crate::error::Result;

/// Steamcmd operation to perform.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SteamCmdOperation {
    /// Start and quit once so steamcmd can update itself.
    Bootstrap,
    /// Log in and download every configured workshop item.
    #[default]
    Download,
}

/// Workshop download tool.
///
/// # Example
///
/// ```ignore
/// let tool = SteamCmdTool::new()
///     .install_dir(".cavauxout")
///     .credentials(credentials)
///     .items(["450814997", "843577117"]);
/// tool.run(&ctx).await?;
/// ```
#[derive(Debug, Clone, Default)]
pub struct SteamCmdTool {
    install_dir: Option<PathBuf>,
    credentials: Credentials,
    items: Vec<String>,
    operation: SteamCmdOperation,
}

impl SteamCmdTool {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn install_dir(mut self, path: impl AsRef<Path>) -> Self {
        self.install_dir = Some(path.as_ref().to_path_buf());
        self
    }

    #[must_use]
    pub fn credentials(mut self, credentials: Credentials) -> Self {
        self.credentials = credentials;
        self
    }

    #[must_use]
    pub fn items(mut self, items: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.items = items.into_iter().map(Into::into).collect();
        self
    }

    #[must_use]
    pub const fn bootstrap_op(mut self) -> Self {
        self.operation = SteamCmdOperation::Bootstrap;
        self
    }

    #[must_use]
    pub const fn download_op(mut self) -> Self {
        self.operation = SteamCmdOperation::Download;
        self
    }

    fn install_dir_required(&self) -> Result<&Path> {
        self.install_dir
            .as_deref()
            .context("SteamCmdTool: install directory is required for Download operation")
    }

    /// Builds the download invocation; the password is a masked argument.
    pub(crate) fn download_command(&self, ctx: &ToolContext) -> Result<ProcessBuilder> {
        let install_dir = self.install_dir_required()?;
        let app_id = ctx.config().project.app_id.to_string();

        let mut builder = ProcessBuilder::new(&ctx.config().tools.steamcmd)
            .arg("+force_install_dir")
            .arg(install_dir)
            .arg("+login")
            .arg(self.credentials.username())
            .secret_arg(self.credentials.password());

        for item in &self.items {
            builder = builder
                .arg("+workshop_download_item")
                .arg(&app_id)
                .arg(item)
                .arg("validate");
        }

        Ok(builder.arg("+quit").flag(ProcessFlags::ALLOW_FAILURE))
    }

    async fn bootstrap(&self, ctx: &ToolContext) -> Result<()> {
        let builder = ProcessBuilder::new(&ctx.config().tools.steamcmd)
            .arg("+quit")
            .flag(ProcessFlags::ALLOW_FAILURE);
        let output = ctx.run(ctx.with_output(builder)).await?;
        if !output.success() {
            warn!(exit_code = output.exit_code(), "steamcmd self-update exited unsuccessfully");
        }
        Ok(())
    }

    async fn download(&self, ctx: &ToolContext) -> Result<()> {
        let builder = self.download_command(ctx)?;
        let builder = if ctx.is_verbose() {
            builder.interactive()
        } else {
            builder
        };

        info!(count = self.items.len(), "Downloading mods...");
        let output = ctx.run(builder).await?;
        if output.success() {
            info!("Successfully downloaded mods");
        } else {
            warn!(
                exit_code = output.exit_code(),
                "steamcmd exited unsuccessfully, downloads will be verified"
            );
        }
        Ok(())
    }
}

impl Tool for SteamCmdTool {
    fn name(&self) -> &'static str {
        "steamcmd"
    }

    fn run<'a>(&'a self, ctx: &'a ToolContext) -> BoxFuture<'a, Result<()>> {
        Box::pin(async move {
            match self.operation {
                SteamCmdOperation::Bootstrap => self.bootstrap(ctx).await,
                SteamCmdOperation::Download => self.download(ctx).await,
            }
        })
    }
}

#[cfg(test)]
mod tests;
