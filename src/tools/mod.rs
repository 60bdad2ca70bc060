// cavaux-assemble: Release Assembly Pipeline
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Wrappers around the external tools the release is made with.
//!
//! ```text
//! pipeline --> ToolContext --> ProcessBuilder --> Tools
//!   git (queries), steamcmd, hemtt, DSCreateKey/DSSignFile/DSCheckSignatures
//! ToolContext: cancel token --> run_with_cancellation
//! ```
//!
//! All tools support graceful cancellation via `CancellationToken`. A run
//! that was cancelled surfaces as `PipelineError::Interrupted`.

use std::sync::Arc;

use tokio_util::sync::CancellationToken;

use crate::config::Config;
use crate::core::process::builder::{ProcessBuilder, ProcessOutput, StreamFlags};
use crate::error::{PipelineError, Result};

pub mod git;
pub mod hemtt;
pub mod signer;
pub mod steamcmd;

use futures_util::future::BoxFuture;

/// Context provided to tools during execution.
///
/// Contains the configuration, the cancellation token and output flags.
#[derive(Clone)]
pub struct ToolContext {
    /// Cancelled on Ctrl+C; the running child is killed.
    cancel_token: CancellationToken,

    /// Hand tool output to the terminal instead of the trace log.
    verbose: bool,

    /// Reference to the configuration.
    config: Arc<Config>,
}

impl ToolContext {
    /// Creates a new `ToolContext`.
    #[must_use]
    pub const fn new(config: Arc<Config>, cancel_token: CancellationToken, verbose: bool) -> Self {
        Self {
            cancel_token,
            verbose,
            config,
        }
    }

    /// Returns a reference to the configuration.
    #[must_use]
    pub const fn config(&self) -> &Arc<Config> {
        &self.config
    }

    /// Returns a reference to the cancellation token.
    #[must_use]
    pub const fn cancel_token(&self) -> &CancellationToken {
        &self.cancel_token
    }

    #[must_use]
    pub const fn is_verbose(&self) -> bool {
        self.verbose
    }

    /// Checks if cancellation has been requested.
    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        self.cancel_token.is_cancelled()
    }

    /// Fails with `PipelineError::Interrupted` once cancellation was requested.
    ///
    /// # Errors
    ///
    /// Returns `PipelineError::Interrupted` if the token is cancelled.
    pub fn check_cancelled(&self) -> Result<()> {
        if self.is_cancelled() {
            return Err(PipelineError::Interrupted.into());
        }
        Ok(())
    }

    /// Routes stdout to the terminal when verbose, to the trace log otherwise.
    #[must_use]
    pub fn with_output(&self, builder: ProcessBuilder) -> ProcessBuilder {
        if self.verbose {
            builder.stdout_flags(StreamFlags::INHERIT)
        } else {
            builder.stdout_flags(StreamFlags::FORWARD_TO_LOG)
        }
    }

    /// Runs a process under this context's cancellation token.
    ///
    /// # Errors
    ///
    /// Returns `PipelineError::Interrupted` if the run was cancelled, or the
    /// process error if spawning or exit-code validation failed.
    pub async fn run(&self, builder: ProcessBuilder) -> Result<ProcessOutput> {
        let output = builder
            .run_with_cancellation(self.cancel_token.clone())
            .await?;
        if output.is_interrupted() {
            return Err(PipelineError::Interrupted.into());
        }
        Ok(output)
    }
}

/// Trait for tools that execute external processes.
///
/// Each tool encapsulates one external operation (workshop download, addon
/// build, signing). Queries that produce a value live beside the tools as
/// plain async functions instead.
///
/// # Implementation Notes
///
/// - Tools run processes through `ToolContext::run()` so Ctrl+C is honoured
pub trait Tool: Send + Sync {
    /// Returns the name of this tool (e.g., "steamcmd", "hemtt").
    fn name(&self) -> &str;

    /// Executes the tool's operation.
    ///
    /// # Arguments
    /// * `ctx` - The tool context with cancellation token and configuration
    ///
    /// # Returns
    /// * `Ok(())` if the operation completed successfully
    /// * `Err(...)` if the operation failed or was cancelled
    fn run<'a>(&'a self, ctx: &'a ToolContext) -> BoxFuture<'a, Result<()>>;
}

#[cfg(test)]
pub(crate) mod test_utils;
#[cfg(test)]
mod tests;
