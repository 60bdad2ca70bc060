// cavaux-assemble: Release Assembly Pipeline
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! CLI module for cavaux-assemble using clap derive.
//!
//! # Command Structure
//!
//! ```text
//! assemble [global options] <command>
//! version
//! options
//! inis
//! tools
//! audit [-d FILE]
//! release [-u USER] [-p PASS] [-C FILE] [-t X.Y.Z] [-s ID] [-d FILE]
//!         [--skip-download] [--keep-partial]
//! ```

pub mod global;
pub mod release;


use std::path::PathBuf;

use crate::cli::global::GlobalOptions;
use crate::cli::release::ReleaseArgs;
use clap::{Args, Parser, Subcommand};

/// Release assembly pipeline for the cavaux mod pack.
#[derive(Debug, Parser)]
#[command(
    name = "assemble",
    author,
    version,
    about = "Release assembly pipeline for the cavaux mod pack",
    long_about = "cavaux-assemble Copyright (C) 2026 Romeo Ahmed\n\
                  This program comes with ABSOLUTELY NO WARRANTY\n\
                  This is free software, and you are welcome to redistribute it\n\
                  under certain conditions; see LICENSE for details.\n\n\
                  Downloads the workshop mods listed in the manifest, builds the\n\
                  project with hemtt, signs every pbo and packs the release into\n\
                  a zip archive. Run `assemble release` from the project root, or\n\
                  point --root at it. See `assemble <command> --help` for more.",
    after_help = "CONFIGURATION:\n\n\
                  Settings are layered: built-in defaults, then `assemble.toml` in\n\
                  the project root (if present), then every --ini file in order,\n\
                  then ASSEMBLE_<SECTION>__<KEY> environment variables, then --set\n\
                  options and finally dedicated flags such as --log-level."
)]
pub struct Cli {
    /// Global options shared by all commands
    #[command(flatten)]
    pub global: GlobalOptions,

    /// Command to execute
    #[command(subcommand)]
    pub command: Option<Command>,
}

/// Available commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Shows the version.
    #[command(visible_alias = "-v")]
    Version,

    /// Lists all options and their effective values.
    Options,

    /// Lists the configuration files in load order.
    Inis,

    /// Checks that every external tool is on PATH.
    Tools,

    /// Reports workshop mods without an accepted license.
    Audit(AuditArgs),

    /// Builds, signs and packs a release.
    Release(ReleaseArgs),
}

/// Arguments for the `audit` command.
#[derive(Debug, Clone, Default, Args)]
pub struct AuditArgs {
    /// Mod manifest to read instead of `project.manifest`.
    #[arg(short = 'd', long = "data", value_name = "FILE")]
    pub data: Option<PathBuf>,
}

/// Parses command-line arguments.
#[must_use]
pub fn parse() -> Cli {
    Cli::parse()
}

/// Parses command-line arguments from an iterator.
pub fn parse_from<I, T>(iter: I) -> Cli
where
    I: IntoIterator<Item = T>,
    T: Into<std::ffi::OsString> + Clone,
{
    Cli::parse_from(iter)
}

/// Tries to parse command-line arguments, returning an error on failure.
///
/// # Errors
///
/// Returns a `clap::Error` if the arguments are invalid or if help/version information
/// was requested.
pub fn try_parse() -> Result<Cli, clap::Error> {
    Cli::try_parse()
}
