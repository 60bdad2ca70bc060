// cavaux-assemble: Release Assembly Pipeline
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Release signing.
//!
//! ```text
//! DSCreateKey <name>            --> keys/<name>.biprivatekey, keys/<name>.bikey
//! DSSignFile  <private> <pbo>   --> addons/<pbo>.<name>.bisign   (one per package)
//! DSCheckSignatures -deep addons keys
//! keys/<name>.biprivatekey      --> deleted, whatever happened
//! ```

use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use indicatif::{ProgressBar, ProgressStyle};
use tracing::{debug, error, info, warn};

use crate::error::{PipelineError, Result};
use crate::tools::signer::SignerTool;
use crate::tools::{Tool, ToolContext};
use crate::utility::fs::walk::list_entry_names;

/// Paths produced by a successful signing run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignSummary {
    /// The public key shipped in `keys/`.
    pub public_key: PathBuf,
    /// One signature per package, in package order.
    pub signatures: Vec<PathBuf>,
}

/// Deletes the private key when dropped.
///
/// Held for the whole signing run so the key never survives a failure.
#[derive(Debug)]
pub struct PrivateKeyGuard {
    path: PathBuf,
}

impl PrivateKeyGuard {
    #[must_use]
    pub const fn new(path: PathBuf) -> Self {
        Self { path }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Drop for PrivateKeyGuard {
    fn drop(&mut self) {
        match std::fs::remove_file(&self.path) {
            Ok(()) => debug!(path = %self.path.display(), "private key removed"),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
            Err(e) => warn!(path = %self.path.display(), error = %e, "failed to remove private key"),
        }
    }
}

fn bar_style() -> ProgressStyle {
    static STYLE: OnceLock<ProgressStyle> = OnceLock::new();
    STYLE
        .get_or_init(|| {
            ProgressStyle::with_template(
                "{spinner:.green} [{elapsed_precise}] [{wide_bar:.cyan/blue}] {pos}/{len} {msg}",
            )
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("#>-")
        })
        .clone()
}

/// Returns the signatures of `package` lying next to it.
///
/// # Errors
///
/// Returns an error if the package directory cannot be listed.
pub fn signatures_of(package: &Path) -> Result<Vec<PathBuf>> {
    let Some(dir) = package.parent() else {
        return Ok(Vec::new());
    };
    let prefix = package
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default();

    Ok(list_entry_names(dir)?
        .into_iter()
        .filter(|name| name.starts_with(&prefix) && name.ends_with(".bisign"))
        .map(|name| dir.join(name))
        .collect())
}

/// Creates a key pair, signs every package, verifies the result and removes
/// the private key.
///
/// # Errors
///
/// - `PipelineError::KeyNotCreated` if the private key did not appear.
/// - `PipelineError::SignatureMissing` for the first package that does not
///   end up with exactly one signature.
/// - `PipelineError::VerificationFailed` if the checker rejects the release.
pub async fn sign_release(
    ctx: &ToolContext,
    keys_dir: &Path,
    addons_dir: &Path,
    key_name: &str,
    packages: &[PathBuf],
) -> Result<SignSummary> {
    let guard = PrivateKeyGuard::new(keys_dir.join(format!("{key_name}.biprivatekey")));
    let public_key = keys_dir.join(format!("{key_name}.bikey"));

    info!(key = %key_name, "Making key");
    SignerTool::new()
        .keys_dir(keys_dir)
        .key_name(key_name)
        .create_key_op()
        .run(ctx)
        .await?;

    let key_files = list_entry_names(keys_dir)?;
    if key_files.is_empty() || !guard.path().is_file() {
        error!(found = key_files.len(), "No keys have been created");
        return Err(PipelineError::KeyNotCreated {
            private_key: guard.path().display().to_string(),
        }
        .into());
    }

    let mut sorted = packages.to_vec();
    sorted.sort();

    info!(count = sorted.len(), "Signing pbos");
    let bar = ProgressBar::new(sorted.len() as u64);
    bar.set_style(bar_style());

    let mut signatures = Vec::with_capacity(sorted.len());
    for package in &sorted {
        let display_name = package
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default();
        bar.set_message(display_name);

        SignerTool::new()
            .private_key(guard.path())
            .package(package)
            .sign_op()
            .run(ctx)
            .await
            .inspect_err(|_| bar.abandon())?;

        let found = signatures_of(package)?;
        if found.len() != 1 {
            bar.abandon();
            error!(package = %package.display(), found = found.len(), "Failed to sign pbo");
            return Err(PipelineError::SignatureMissing {
                package: package.display().to_string(),
                found: found.len(),
            }
            .into());
        }
        signatures.extend(found);
        bar.inc(1);
    }
    bar.finish_and_clear();

    SignerTool::new()
        .addons_dir(addons_dir)
        .keys_dir(keys_dir)
        .check_op()
        .run(ctx)
        .await?;

    drop(guard);
    info!(key = %public_key.display(), count = signatures.len(), "Release signed");
    Ok(SignSummary {
        public_key,
        signatures,
    })
}
