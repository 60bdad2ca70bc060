// cavaux-assemble: Release Assembly Pipeline
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

use super::{AssembleError, AssembleResult, ConfigError, PipelineError, is_interrupted};

#[test]
fn test_config_error_display() {
    let err = ConfigError::MissingKey {
        section: "project".to_string(),
        key: "name".to_string(),
    };
    insta::assert_snapshot!(err.to_string(), @"missing required config key 'name' in section '[project]'");
}

#[test]
fn test_download_mismatch_lists_missing_ids() {
    let err = PipelineError::DownloadCountMismatch {
        expected: 3,
        actual: 2,
        missing: vec!["450814997".to_string()],
    };
    insta::assert_snapshot!(
        err.to_string(),
        @"downloaded mod mismatch: got 2 expected 3 (missing: 450814997)"
    );
}

#[test]
fn test_download_mismatch_without_missing_ids() {
    let err = PipelineError::DownloadCountMismatch {
        expected: 1,
        actual: 2,
        missing: Vec::new(),
    };
    insta::assert_snapshot!(err.to_string(), @"downloaded mod mismatch: got 2 expected 1");
}

#[test]
fn test_tools_missing_display() {
    let err = PipelineError::ToolsMissing {
        missing: vec!["steamcmd".to_string(), "DSSignFile".to_string()],
    };
    assert!(err.to_string().contains("steamcmd, DSSignFile"));
}

#[test]
fn test_is_interrupted() {
    let direct = anyhow::Error::from(PipelineError::Interrupted);
    assert!(is_interrupted(&direct));

    let wrapped = anyhow::Error::from(AssembleError::from(PipelineError::Interrupted))
        .context("while signing");
    assert!(is_interrupted(&wrapped));

    let other = anyhow::Error::from(PipelineError::BuildFailed { code: 1 });
    assert!(!is_interrupted(&other));
}

#[test]
fn test_assemble_error_size() {
    // Box<str> variants are 16 bytes; with discriminant and alignment that is 24
    let size = std::mem::size_of::<AssembleError>();
    assert!(size <= 24, "AssembleError is {size} bytes, expected <= 24");
}

#[test]
fn test_assemble_result_size() {
    let size = std::mem::size_of::<AssembleResult<()>>();
    assert!(size <= 24, "AssembleResult<()> is {size} bytes, expected <= 24");
}
