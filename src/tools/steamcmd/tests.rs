// cavaux-assemble: Release Assembly Pipeline
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

use super::{SteamCmdOperation, SteamCmdTool};
use crate::config::Config;
use crate::config::credentials::Credentials;
use crate::tools::Tool;
use crate::tools::test_utils::context;

#[test]
fn test_steamcmd_tool_defaults() {
    let tool = SteamCmdTool::new();
    assert_eq!(tool.name(), "steamcmd");
    assert_eq!(tool.operation, SteamCmdOperation::Download);
    assert!(tool.install_dir_required().is_err());
    assert_eq!(tool.bootstrap_op().operation, SteamCmdOperation::Bootstrap);
}

#[test]
fn test_download_command_masks_password() {
    let ctx = context(Config::default());
    let tool = SteamCmdTool::new()
        .install_dir("/work")
        .credentials(Credentials::new("alice", "hunter2"))
        .items(["450814997", "843577117"]);

    let command = tool.download_command(&ctx).unwrap().command_line();
    insta::assert_snapshot!(
        command,
        @"steamcmd +force_install_dir /work +login alice *** +workshop_download_item 107410 450814997 validate +workshop_download_item 107410 843577117 validate +quit"
    );
}

#[cfg(unix)]
#[tokio::test]
async fn test_download_failure_is_not_fatal() {
    use crate::tools::test_utils::{run_with_logs, write_script};

    let temp = tempfile::tempdir().unwrap();
    let mut config = Config::default();
    config.tools.steamcmd = write_script(temp.path(), "steamcmd", "exit 5");
    let ctx = context(config);

    let tool = SteamCmdTool::new()
        .install_dir(temp.path())
        .credentials(Credentials::new("alice", "hunter2"))
        .items(["1"]);

    let (result, logs) = run_with_logs(|| tool.run(&ctx)).await;
    assert!(result.is_ok());
    assert!(logs.contains("steamcmd exited unsuccessfully"));
    assert!(!logs.contains("hunter2"));
}

#[cfg(unix)]
#[tokio::test]
async fn test_download_passes_arguments() {
    use crate::tools::test_utils::write_script;

    let temp = tempfile::tempdir().unwrap();
    let record = temp.path().join("args.txt");
    let mut config = Config::default();
    config.tools.steamcmd = write_script(
        temp.path(),
        "steamcmd",
        &format!("echo \"$@\" > '{}'", record.display()),
    );
    let ctx = context(config);

    SteamCmdTool::new()
        .install_dir("/work")
        .credentials(Credentials::new("alice", "hunter2"))
        .items(["42"])
        .run(&ctx)
        .await
        .unwrap();

    let args = std::fs::read_to_string(&record).unwrap();
    assert_eq!(
        args.trim(),
        "+force_install_dir /work +login alice hunter2 +workshop_download_item 107410 42 validate +quit"
    );
}
