// cavaux-assemble: Release Assembly Pipeline
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Key generation, package signing and signature checking.
//!
//! ```text
//! SignerTool
//! Operations: CreateKey | Sign | Check
//! CreateKey: DSCreateKey <name>                     (cwd = keys dir)
//! Sign:      DSSignFile <private key> <package>
//! Check:     DSCheckSignatures -deep <addons> <keys>
//! Uses: config.tools.{create_key, sign_file, check_signatures}
//! ```
//!
//! Key creation and signing report through the files they leave behind, so
//! their exit codes are only logged. The checker's exit code is authoritative.

use std::path::{Path, PathBuf};

use anyhow::Context;
use tracing::{debug, error, info, warn};

use super::{BoxFuture, Tool, ToolContext};
use crate::core::process::builder::{ProcessBuilder, ProcessFlags};
use crate::error::{PipelineError, Result};

/// Signing operation to perform.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SignerOperation {
    /// Create `<name>.biprivatekey` and `<name>.bikey` in the keys directory.
    #[default]
    CreateKey,
    /// Write `<package>.<name>.bisign` next to the package.
    Sign,
    /// Verify every package in the addons directory against the keys.
    Check,
}

/// Signing tool.
///
/// # Example
///
/// ```ignore
/// SignerTool::new().keys_dir(&keys).key_name("cavaux_1.0.0.0-abcd1234").create_key_op().run(&ctx).await?;
/// SignerTool::new().private_key(&private).package(&pbo).sign_op().run(&ctx).await?;
/// SignerTool::new().addons_dir(&addons).keys_dir(&keys).check_op().run(&ctx).await?;
/// ```
#[derive(Debug, Clone, Default)]
pub struct SignerTool {
    keys_dir: Option<PathBuf>,
    key_name: Option<String>,
    private_key: Option<PathBuf>,
    package: Option<PathBuf>,
    addons_dir: Option<PathBuf>,
    operation: SignerOperation,
}

impl SignerTool {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn keys_dir(mut self, path: impl AsRef<Path>) -> Self {
        self.keys_dir = Some(path.as_ref().to_path_buf());
        self
    }

    #[must_use]
    pub fn key_name(mut self, name: impl Into<String>) -> Self {
        self.key_name = Some(name.into());
        self
    }

    #[must_use]
    pub fn private_key(mut self, path: impl AsRef<Path>) -> Self {
        self.private_key = Some(path.as_ref().to_path_buf());
        self
    }

    #[must_use]
    pub fn package(mut self, path: impl AsRef<Path>) -> Self {
        self.package = Some(path.as_ref().to_path_buf());
        self
    }

    #[must_use]
    pub fn addons_dir(mut self, path: impl AsRef<Path>) -> Self {
        self.addons_dir = Some(path.as_ref().to_path_buf());
        self
    }

    #[must_use]
    pub const fn create_key_op(mut self) -> Self {
        self.operation = SignerOperation::CreateKey;
        self
    }

    #[must_use]
    pub const fn sign_op(mut self) -> Self {
        self.operation = SignerOperation::Sign;
        self
    }

    #[must_use]
    pub const fn check_op(mut self) -> Self {
        self.operation = SignerOperation::Check;
        self
    }

    fn required<'a, T: ?Sized>(value: Option<&'a T>, what: &str) -> Result<&'a T> {
        value.with_context(|| format!("SignerTool: {what} is required"))
    }

    async fn create_key(&self, ctx: &ToolContext) -> Result<()> {
        let keys_dir = Self::required(self.keys_dir.as_deref(), "keys directory")?;
        let name = Self::required(self.key_name.as_deref(), "key name")?;

        debug!(key = %name, "Making key");
        let builder = ProcessBuilder::new(&ctx.config().tools.create_key)
            .arg(name)
            .cwd(keys_dir)
            .flag(ProcessFlags::ALLOW_FAILURE);
        let output = ctx.run(builder).await?;
        if !output.success() {
            warn!(exit_code = output.exit_code(), "key creation exited unsuccessfully");
        }
        Ok(())
    }

    async fn sign(&self, ctx: &ToolContext) -> Result<()> {
        let private_key = Self::required(self.private_key.as_deref(), "private key")?;
        let package = Self::required(self.package.as_deref(), "package")?;

        let mut builder = ProcessBuilder::new(&ctx.config().tools.sign_file)
            .arg(private_key)
            .arg(package)
            .flag(ProcessFlags::ALLOW_FAILURE);
        if let Some(dir) = package.parent() {
            builder = builder.cwd(dir);
        }
        let output = ctx.run(builder).await?;
        if !output.success() {
            warn!(
                package = %package.display(),
                exit_code = output.exit_code(),
                "signing exited unsuccessfully"
            );
        }
        Ok(())
    }

    async fn check(&self, ctx: &ToolContext) -> Result<()> {
        let addons_dir = Self::required(self.addons_dir.as_deref(), "addons directory")?;
        let keys_dir = Self::required(self.keys_dir.as_deref(), "keys directory")?;

        info!("Checking project signature...");
        let builder = ProcessBuilder::new(&ctx.config().tools.check_signatures)
            .arg("-deep")
            .arg(addons_dir)
            .arg(keys_dir)
            .capture_output()
            .flag(ProcessFlags::ALLOW_FAILURE);
        let output = ctx.run(builder).await?;

        for line in output.stdout().lines().chain(output.stderr().lines()) {
            info!("{line}");
        }
        if !output.success() {
            error!(exit_code = output.exit_code(), "failed to sign pbos");
            return Err(PipelineError::VerificationFailed {
                code: output.exit_code(),
            }
            .into());
        }
        Ok(())
    }
}

impl Tool for SignerTool {
    fn name(&self) -> &'static str {
        match self.operation {
            SignerOperation::CreateKey => "create_key",
            SignerOperation::Sign => "sign_file",
            SignerOperation::Check => "check_signatures",
        }
    }

    fn run<'a>(&'a self, ctx: &'a ToolContext) -> BoxFuture<'a, Result<()>> {
        Box::pin(async move {
            match self.operation {
                SignerOperation::CreateKey => self.create_key(ctx).await,
                SignerOperation::Sign => self.sign(ctx).await,
                SignerOperation::Check => self.check(ctx).await,
            }
        })
    }
}

#[cfg(test)]
mod tests;
