// cavaux-assemble: Release Assembly Pipeline
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

use super::{ToolStatus, check_tools, tool_report};
use crate::config::types::ToolsConfig;
use std::path::PathBuf;

fn missing_tools() -> ToolsConfig {
    ToolsConfig {
        git: PathBuf::from("assemble_missing_git_12345"),
        steamcmd: PathBuf::from("assemble_missing_steamcmd_12345"),
        hemtt: PathBuf::from("assemble_missing_hemtt_12345"),
        create_key: PathBuf::from("assemble_missing_create_12345"),
        sign_file: PathBuf::from("assemble_missing_sign_12345"),
        check_signatures: PathBuf::from("assemble_missing_check_12345"),
    }
}

#[test]
fn test_status_line_format() {
    let found = ToolStatus {
        executable: PathBuf::from("git"),
        resolved: Some(PathBuf::from("/usr/bin/git")),
    };
    let missing = ToolStatus {
        executable: PathBuf::from("steamcmd"),
        resolved: None,
    };
    insta::assert_snapshot!(found.to_string(), @"git:        /usr/bin/git");
    insta::assert_snapshot!(missing.to_string(), @"steamcmd:   Does not exist");
}

#[test]
fn test_missing_tools_are_all_named() {
    let mut tools = missing_tools();
    tools.git = PathBuf::from("cargo");

    let report = tool_report(&tools);
    assert_eq!(report.len(), 6);
    assert!(report[0].resolved().is_some());

    let err = check_tools(&tools).unwrap_err();
    insta::assert_snapshot!(
        err.to_string(),
        @"vital tools are missing: assemble_missing_steamcmd_12345, assemble_missing_hemtt_12345, assemble_missing_create_12345, assemble_missing_sign_12345, assemble_missing_check_12345. Make sure they are installed and present in your PATH"
    );
}

#[cfg(unix)]
#[test]
fn test_absolute_paths_resolve() {
    use crate::tools::test_utils::write_script;

    let temp = tempfile::tempdir().unwrap();
    let script = |name: &str| write_script(temp.path(), name, "exit 0");
    let tools = ToolsConfig {
        git: script("git"),
        steamcmd: script("steamcmd"),
        hemtt: script("hemtt"),
        create_key: script("DSCreateKey"),
        sign_file: script("DSSignFile"),
        check_signatures: script("DSCheckSignatures"),
    };

    let report = check_tools(&tools).unwrap();
    assert!(report.iter().all(|status| status.resolved().is_some()));
    assert_eq!(report[3].display_name(), "DSCreateKey");
}
