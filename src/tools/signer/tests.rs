// cavaux-assemble: Release Assembly Pipeline
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

use super::{SignerOperation, SignerTool};
use crate::config::Config;
use crate::tools::Tool;
use crate::tools::test_utils::context;

#[test]
fn test_signer_tool_operations() {
    let tool = SignerTool::new();
    assert_eq!(tool.operation, SignerOperation::CreateKey);
    assert_eq!(tool.name(), "create_key");
    assert_eq!(SignerTool::new().sign_op().name(), "sign_file");
    assert_eq!(SignerTool::new().check_op().name(), "check_signatures");
}

#[tokio::test]
async fn test_missing_arguments_are_reported() {
    let ctx = context(Config::default());

    let err = SignerTool::new().key_name("k").run(&ctx).await.unwrap_err();
    insta::assert_snapshot!(err.to_string(), @"SignerTool: keys directory is required");

    let err = SignerTool::new()
        .private_key("k.biprivatekey")
        .sign_op()
        .run(&ctx)
        .await
        .unwrap_err();
    insta::assert_snapshot!(err.to_string(), @"SignerTool: package is required");
}

#[cfg(unix)]
#[tokio::test]
async fn test_create_key_runs_in_keys_dir() {
    use crate::tools::test_utils::write_script;

    let keys = tempfile::tempdir().unwrap();
    let bin = tempfile::tempdir().unwrap();
    let mut config = Config::default();
    config.tools.create_key = write_script(
        bin.path(),
        "DSCreateKey",
        "touch \"$1.biprivatekey\" \"$1.bikey\"",
    );
    let ctx = context(config);

    SignerTool::new()
        .keys_dir(keys.path())
        .key_name("cavaux_1.0.0.0-abcd1234")
        .create_key_op()
        .run(&ctx)
        .await
        .unwrap();

    assert!(keys.path().join("cavaux_1.0.0.0-abcd1234.biprivatekey").exists());
    assert!(keys.path().join("cavaux_1.0.0.0-abcd1234.bikey").exists());
}

#[cfg(unix)]
#[tokio::test]
async fn test_check_failure_is_fatal_and_logged() {
    use crate::tools::test_utils::{run_with_logs, write_script};

    let temp = tempfile::tempdir().unwrap();
    let mut config = Config::default();
    config.tools.check_signatures = write_script(
        temp.path(),
        "DSCheckSignatures",
        "echo 'a.pbo: signature mismatch'; exit 1",
    );
    let ctx = context(config);

    let tool = SignerTool::new()
        .addons_dir(temp.path())
        .keys_dir(temp.path())
        .check_op();
    let (result, logs) = run_with_logs(|| tool.run(&ctx)).await;

    insta::assert_snapshot!(
        result.unwrap_err().to_string(),
        @"signature verification failed with code 1"
    );
    assert!(logs.contains("a.pbo: signature mismatch"));
}
