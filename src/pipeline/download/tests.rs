// cavaux-assemble: Release Assembly Pipeline
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

use super::{DownloadOutcome, download};
use crate::config::credentials::Credentials;
use crate::config::paths::ReleaseLayout;
use crate::tools::test_utils::{config_at, context, run_with_logs};

#[tokio::test]
async fn test_skip_flag_wins_over_credentials() {
    let temp = tempfile::tempdir().unwrap();
    let config = config_at(temp.path());
    let layout = ReleaseLayout::new(&config);
    let ctx = context(config);
    let creds = Credentials::new("alice", "hunter2");

    let items = ["1".to_string()];

    let (outcome, logs) = run_with_logs(|| download(&ctx, &layout, &creds, &items, true)).await;
    assert_eq!(outcome.unwrap(), DownloadOutcome::Skipped);
    assert!(logs.contains("will use preexisting downloaded cache instead"));
    assert!(!layout.work().exists());
}

#[cfg(unix)]
#[tokio::test]
async fn test_missing_credentials_still_bootstraps() {
    use crate::tools::test_utils::write_script;

    let temp = tempfile::tempdir().unwrap();
    let bin = tempfile::tempdir().unwrap();
    let record = bin.path().join("calls.txt");
    let mut config = config_at(temp.path());
    config.tools.steamcmd = write_script(
        bin.path(),
        "steamcmd",
        &format!("echo \"$@\" >> '{}'", record.display()),
    );
    let layout = ReleaseLayout::new(&config);
    let ctx = context(config);
    let items: Vec<String> = Vec::new();

    let cases = [
        (Credentials::default(), "No steamcmd username and password provided"),
        (Credentials::new("", "hunter2"), "No steamcmd username provided"),
        (Credentials::new("alice", ""), "No steamcmd password provided"),
    ];
    for (creds, expected) in cases {
        let (outcome, logs) = run_with_logs(|| download(&ctx, &layout, &creds, &items, false)).await;
        assert_eq!(outcome.unwrap(), DownloadOutcome::Skipped);
        assert!(logs.contains(expected), "{logs}");
    }

    let calls = std::fs::read_to_string(&record).unwrap();
    assert_eq!(calls.lines().collect::<Vec<_>>(), vec!["+quit"; 3]);
    assert!(!layout.work().exists());
}

#[cfg(unix)]
#[tokio::test]
async fn test_download_bootstraps_then_downloads() {
    use crate::tools::test_utils::write_script;

    let temp = tempfile::tempdir().unwrap();
    let bin = tempfile::tempdir().unwrap();
    let record = bin.path().join("calls.txt");
    let mut config = config_at(temp.path());
    config.tools.steamcmd = write_script(
        bin.path(),
        "steamcmd",
        &format!("echo \"$@\" >> '{}'", record.display()),
    );
    let layout = ReleaseLayout::new(&config);
    let ctx = context(config);
    let creds = Credentials::new("alice", "hunter2");
    let items = vec!["450814997".to_string(), "843577117".to_string()];

    let outcome = download(&ctx, &layout, &creds, &items, false).await.unwrap();
    assert_eq!(outcome, DownloadOutcome::Completed);
    assert!(layout.work().is_dir());

    let calls = std::fs::read_to_string(&record).unwrap();
    let calls: Vec<&str> = calls.lines().collect();
    assert_eq!(calls.len(), 2);
    assert_eq!(calls[0], "+quit");
    assert_eq!(
        calls[1],
        format!(
            "+force_install_dir {} +login alice hunter2 \
             +workshop_download_item 107410 450814997 validate \
             +workshop_download_item 107410 843577117 validate +quit",
            layout.work().display()
        )
    );
}
