// cavaux-assemble: Release Assembly Pipeline
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Tools command.

use crate::config::Config;
use crate::error::Result;
use crate::pipeline::resolver::check_tools;

/// Logs where every configured tool resolves to.
///
/// # Errors
///
/// Returns `PipelineError::ToolsMissing` if any tool is not on PATH.
pub fn run_tools_command(config: &Config) -> Result<()> {
    check_tools(&config.tools).map(|_| ())
}
