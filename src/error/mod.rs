// cavaux-assemble: Release Assembly Pipeline
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Error handling module.
//!
//! ```text
//!            AssembleError (~24 bytes)
//!                     |
//!   +--------+--------+--------+--------+------+
//!   |        |        |        |        |      |
//!   v        v        v        v        v      v
//! Config  Process  Manifest Pipeline   Fs   Io/Other
//!  Box      Box      Box      Box      Box   Box<str>
//!
//! Sub-errors (unboxed internally):
//!   Config    ReadError, ParseError, MissingKey, InvalidValue
//!   Process   SpawnFailed, NonZeroExit
//!   Manifest  NotFound, Parse, MissingCategory
//!   Pipeline  ToolsMissing, DownloadCountMismatch, MissingMods,
//!             BuildFailed, KeyNotCreated, SignatureMissing,
//!             VerificationFailed, Interrupted
//!   Fs        NotFound, IoError
//! ```

use std::fmt::Write as _;

use thiserror::Error;

/// Convenience alias for `anyhow::Result`.
pub type Result<T> = anyhow::Result<T>;

/// Result type using [`AssembleError`].
pub type AssembleResult<T> = std::result::Result<T, AssembleError>;

/// Top-level application error type.
///
/// All sub-errors are boxed to keep this enum small on the stack.
#[derive(Debug, Error)]
pub enum AssembleError {
    /// Configuration error.
    #[error("config error: {0}")]
    Config(#[from] Box<ConfigError>),

    /// Process execution error.
    #[error("process error: {0}")]
    Process(#[from] Box<ProcessError>),

    /// Mod manifest error.
    #[error("manifest error: {0}")]
    Manifest(#[from] Box<ManifestError>),

    /// A pipeline gate failed.
    #[error("{0}")]
    Pipeline(#[from] Box<PipelineError>),

    /// Filesystem error.
    #[error("filesystem error: {0}")]
    Fs(#[from] Box<FsError>),

    /// I/O error.
    #[error("io error: {0}")]
    Io(Box<std::io::Error>),

    /// Generic error with message.
    #[error("{0}")]
    Other(Box<str>),
}

macro_rules! impl_from_boxed {
    ($($error:ty => $variant:ident),+ $(,)?) => {
        $(
            impl From<$error> for AssembleError {
                fn from(err: $error) -> Self {
                    AssembleError::$variant(Box::new(err))
                }
            }
        )+
    };
}

impl_from_boxed! {
    ConfigError => Config,
    ProcessError => Process,
    ManifestError => Manifest,
    PipelineError => Pipeline,
    FsError => Fs,
    std::io::Error => Io,
}

// --- Config Errors ---

/// Configuration-related errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to read a configuration or credentials file.
    #[error("failed to read config file '{path}': {source}")]
    ReadError {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// Failed to parse a configuration or credentials file.
    #[error("failed to parse config file '{path}': {message}")]
    ParseError { path: String, message: String },

    /// Missing required configuration key.
    #[error("missing required config key '{key}' in section '[{section}]'")]
    MissingKey { section: String, key: String },

    /// Invalid configuration value.
    #[error("invalid value for '{key}' in section '[{section}]': {message}")]
    InvalidValue {
        section: String,
        key: String,
        message: String,
    },
}

// --- Process Errors ---

/// Process execution errors.
#[derive(Debug, Error)]
pub enum ProcessError {
    /// Failed to spawn process.
    #[error("failed to spawn process '{command}': {source}")]
    SpawnFailed {
        command: String,
        #[source]
        source: std::io::Error,
    },

    /// Process exited with a non-zero code.
    #[error("process '{command}' exited with code {code}")]
    NonZeroExit { command: String, code: i32 },
}

// --- Manifest Errors ---

/// Mod manifest errors.
#[derive(Debug, Error)]
pub enum ManifestError {
    /// The manifest file does not exist.
    #[error("{path} does not exist in project root")]
    NotFound { path: String },

    /// The manifest is not valid JSON or does not match the expected shape.
    #[error("failed to parse {path}: {message}")]
    Parse { path: String, message: String },

    /// The manifest lacks the category the download list is taken from.
    #[error("category '{category}' not found in {path}")]
    MissingCategory { category: String, path: String },
}

// --- Pipeline Errors ---

/// Fatal pipeline gate failures.
///
/// Each variant carries enough context to reproduce the diagnostic that was
/// printed when the gate tripped.
#[derive(Debug, Error)]
pub enum PipelineError {
    /// Required external tools are not resolvable via PATH.
    #[error(
        "vital tools are missing: {}. Make sure they are installed and present in your PATH",
        missing.join(", ")
    )]
    ToolsMissing { missing: Vec<String> },

    /// The workshop content directory does not exist after the download step.
    #[error("failed to discover any mods in {path}")]
    NoDownloads { path: String },

    /// Downloaded entry count differs from the manifest.
    #[error(
        "downloaded mod mismatch: got {actual} expected {expected}{}",
        missing_suffix(missing)
    )]
    DownloadCountMismatch {
        expected: usize,
        actual: usize,
        missing: Vec<String>,
    },

    /// Counts match but some declared ids are absent.
    #[error("mods missing from download: {}", missing.join(", "))]
    MissingMods { missing: Vec<String> },

    /// The build tool exited unsuccessfully.
    #[error("build tool exited with code {code}")]
    BuildFailed { code: i32 },

    /// A file the build was expected to produce is absent.
    #[error("build artifact missing: {path}")]
    ArtifactMissing { path: String },

    /// Key generation produced nothing usable.
    #[error("no keys have been created (expected {private_key})")]
    KeyNotCreated { private_key: String },

    /// A package did not end up with exactly one signature.
    #[error("failed to sign {package}: found {found} signature(s), expected 1")]
    SignatureMissing { package: String, found: usize },

    /// The signature checker rejected the release.
    #[error("signature verification failed with code {code}")]
    VerificationFailed { code: i32 },

    /// The run was interrupted by the user.
    #[error("interrupted")]
    Interrupted,
}

fn missing_suffix(missing: &[String]) -> String {
    let mut suffix = String::new();
    if !missing.is_empty() {
        let _ = write!(suffix, " (missing: {})", missing.join(", "));
    }
    suffix
}

// --- Filesystem Errors ---

/// Filesystem operation errors.
#[derive(Debug, Error)]
pub enum FsError {
    /// Path not found.
    #[error("path not found: {0}")]
    NotFound(String),

    /// General I/O error.
    #[error("I/O error on '{path}': {source}")]
    IoError {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

/// Returns true if the error chain contains [`PipelineError::Interrupted`].
#[must_use]
pub fn is_interrupted(err: &anyhow::Error) -> bool {
    err.chain().any(|cause| {
        matches!(
            cause.downcast_ref::<PipelineError>(),
            Some(PipelineError::Interrupted)
        ) || matches!(
            cause.downcast_ref::<AssembleError>(),
            Some(AssembleError::Pipeline(inner)) if matches!(**inner, PipelineError::Interrupted)
        )
    })
}

#[cfg(test)]
mod tests;
