// cavaux-assemble: Release Assembly Pipeline
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Release command arguments.
//!
//! # Options
//!
//! ```text
//! credentials: -u USER -p PASS, or -C creds.json {"username", "password"}
//! version:     -t X.Y.Z[.B] instead of the latest tag
//! commit:      -s ID instead of HEAD
//! manifest:    -d FILE instead of project.manifest
//! --skip-download  reuse the cached workshop content
//! --keep-partial   keep <work>/release after a failure
//! ```

use clap::Args;
use std::path::PathBuf;

use crate::pipeline::version::Version;

/// Arguments for the `release` command.
#[derive(Debug, Clone, Default, Args)]
pub struct ReleaseArgs {
    /// Steam username for the workshop download.
    #[arg(short = 'u', long = "username", value_name = "USER")]
    pub username: Option<String>,

    /// Steam password for the workshop download.
    #[arg(short = 'p', long = "password", value_name = "PASS")]
    pub password: Option<String>,

    /// JSON file providing `username` and `password`.
    /// Values given on the command line take precedence.
    #[arg(short = 'C', long = "config", value_name = "FILE")]
    pub credentials: Option<PathBuf>,

    /// Release version, e.g. 1.4.2 (defaults to the latest git tag).
    #[arg(short = 't', long = "tag", value_name = "VERSION")]
    pub tag: Option<Version>,

    /// Commit id used in the key name (defaults to the short HEAD id).
    #[arg(short = 's', long = "commit", value_name = "ID")]
    pub commit: Option<String>,

    /// Mod manifest to read instead of `project.manifest`.
    #[arg(short = 'd', long = "data", value_name = "FILE")]
    pub data: Option<PathBuf>,

    /// Skips the workshop download and reuses the cached content.
    #[arg(long = "skip-download")]
    pub skip_download: bool,

    /// Keeps the staging tree when the release fails.
    #[arg(long = "keep-partial")]
    pub keep_partial: bool,
}
