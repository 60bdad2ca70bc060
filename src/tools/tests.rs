// cavaux-assemble: Release Assembly Pipeline
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

use super::ToolContext;
use super::test_utils::context;
use crate::config::Config;
use crate::core::process::builder::ProcessBuilder;
use crate::error::is_interrupted;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;

#[test]
fn test_tool_context_creation() {
    let ctx = context(Config::default());

    assert!(!ctx.is_cancelled());
    assert!(!ctx.is_verbose());
    assert!(ctx.check_cancelled().is_ok());
}

#[test]
fn test_tool_context_cancellation() {
    let config = Arc::new(Config::default());
    let token = CancellationToken::new();
    let ctx = ToolContext::new(config, token.clone(), true);

    assert!(ctx.is_verbose());
    token.cancel();
    assert!(ctx.is_cancelled());
    assert!(is_interrupted(&ctx.check_cancelled().unwrap_err()));
}

#[cfg(unix)]
#[tokio::test]
async fn test_run_maps_cancellation_to_interrupted() {
    let ctx = context(Config::default());
    ctx.cancel_token().cancel();

    let err = ctx
        .run(ProcessBuilder::new("sh").args(["-c", "exit 0"]))
        .await
        .unwrap_err();
    assert!(is_interrupted(&err));
}

#[cfg(unix)]
#[tokio::test]
async fn test_run_returns_output() {
    let ctx = context(Config::default());
    let output = ctx
        .run(ProcessBuilder::new("echo").arg("ok").capture_stdout())
        .await
        .unwrap();
    assert_eq!(output.stdout(), "ok");
}
