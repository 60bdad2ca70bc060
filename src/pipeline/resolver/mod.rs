// cavaux-assemble: Release Assembly Pipeline
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Tool presence check.
//!
//! ```text
//! Checking tools:
//!  > git:        /usr/bin/git
//!  > steamcmd:   Does not exist
//! ```

use std::fmt;
use std::path::PathBuf;

use tracing::{error, info};

use crate::config::types::ToolsConfig;
use crate::core::process::builder::ProcessBuilder;
use crate::error::{PipelineError, Result};

/// Where one configured tool resolved to, if anywhere.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolStatus {
    executable: PathBuf,
    resolved: Option<PathBuf>,
}

impl ToolStatus {
    /// Name shown in the status line, the executable's file name.
    #[must_use]
    pub fn display_name(&self) -> String {
        self.executable.file_name().map_or_else(
            || self.executable.display().to_string(),
            |name| name.to_string_lossy().into_owned(),
        )
    }

    #[must_use]
    pub fn resolved(&self) -> Option<&PathBuf> {
        self.resolved.as_ref()
    }
}

impl fmt::Display for ToolStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = format!("{}: ", self.display_name());
        match &self.resolved {
            Some(path) => write!(f, "{label:<12}{}", path.display()),
            None => write!(f, "{label:<12}Does not exist"),
        }
    }
}

/// Resolves every configured tool via PATH without failing.
#[must_use]
pub fn tool_report(tools: &ToolsConfig) -> Vec<ToolStatus> {
    tools
        .entries()
        .into_iter()
        .map(|(_, executable)| ToolStatus {
            executable: executable.clone(),
            resolved: ProcessBuilder::find(&executable.to_string_lossy()),
        })
        .collect()
}

/// Logs one status line per tool and fails if any is unresolved.
///
/// # Errors
///
/// Returns `PipelineError::ToolsMissing` naming every unresolved tool.
pub fn check_tools(tools: &ToolsConfig) -> Result<Vec<ToolStatus>> {
    info!("Checking tools:");
    let report = tool_report(tools);
    for status in &report {
        if status.resolved.is_some() {
            info!(" > {status}");
        } else {
            error!(" > {status}");
        }
    }

    let missing: Vec<String> = report
        .iter()
        .filter(|status| status.resolved.is_none())
        .map(ToolStatus::display_name)
        .collect();
    if !missing.is_empty() {
        return Err(PipelineError::ToolsMissing { missing }.into());
    }
    Ok(report)
}

#[cfg(test)]
mod tests;
