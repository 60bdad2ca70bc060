// cavaux-assemble: Release Assembly Pipeline
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

use super::{Version, apply_version, write_build_project, write_mod_descriptor};
use crate::config::paths::PathsConfig;

#[test]
fn test_parse_tag() {
    let cases = [
        "1.4.2", "v1.4.2", "1.2.3.4", " 2.0.1\n", "1.4", "1.4.x", "1..2", "", "1.2.3.4.5", "-1.2.3",
    ];
    let parsed: Vec<String> = cases
        .iter()
        .map(|tag| Version::parse_tag(tag).map_or_else(|| "none".to_string(), |v| v.to_string()))
        .collect();
    assert_eq!(
        parsed,
        vec![
            "1.4.2.0", "1.4.2.0", "none", "2.0.1.0", "none", "none", "none", "none", "none",
            "none",
        ]
    );
}

#[test]
fn test_version_defaults_to_zero() {
    assert_eq!(Version::default().to_string(), "0.0.0.0");
    assert_eq!("1.4.2".parse::<Version>(), Ok(Version::new(1, 4, 2, 0)));
    assert_eq!("v1.2.3.4".parse::<Version>(), Ok(Version::new(1, 2, 3, 4)));
    assert!("1.2.3.4.5".parse::<Version>().is_err());
    insta::assert_snapshot!(
        "nope".parse::<Version>().unwrap_err(),
        @"expected X.Y.Z or X.Y.Z.B, got 'nope'"
    );
}

const PROJECT_TOML: &str = r#"name = "cavaux"
prefix = "cavaux"

# release version
[version]
major = 0
minor = 0
patch = 0
build = 0

[files]
include = ["mod.cpp", "meta.cpp"]
"#;

#[test]
fn test_write_build_project_preserves_layout() {
    let temp = tempfile::tempdir().unwrap();
    let path = temp.path().join("project.toml");
    std::fs::write(&path, PROJECT_TOML).unwrap();

    write_build_project(&path, Version::new(1, 4, 2, 0)).unwrap();
    let first = std::fs::read_to_string(&path).unwrap();
    insta::assert_snapshot!(first, @r#"
    name = "cavaux"
    prefix = "cavaux"

    # release version
    [version]
    major = 1
    minor = 4
    patch = 2
    build = 0

    [files]
    include = ["mod.cpp", "meta.cpp"]
    "#);

    write_build_project(&path, Version::new(1, 4, 2, 0)).unwrap();
    assert_eq!(std::fs::read_to_string(&path).unwrap(), first);

    write_build_project(&path, Version::new(1, 5, 0, 3)).unwrap();
    let doc: toml_edit::DocumentMut = std::fs::read_to_string(&path).unwrap().parse().unwrap();
    assert_eq!(doc["version"]["minor"].as_integer(), Some(5));
    assert_eq!(doc["version"]["build"].as_integer(), Some(3));
}

#[test]
fn test_write_build_project_adds_missing_table() {
    let temp = tempfile::tempdir().unwrap();
    let path = temp.path().join("project.toml");
    std::fs::write(&path, "name = \"cavaux\"\n").unwrap();

    write_build_project(&path, Version::new(2, 0, 0, 0)).unwrap();
    let doc: toml_edit::DocumentMut = std::fs::read_to_string(&path).unwrap().parse().unwrap();
    assert_eq!(doc["version"]["major"].as_integer(), Some(2));
    assert_eq!(doc["name"].as_str(), Some("cavaux"));
}

#[test]
fn test_write_mod_descriptor_is_idempotent() {
    let temp = tempfile::tempdir().unwrap();
    let path = temp.path().join("mod.cpp");
    std::fs::write(&path, "name = \"Cavaux\";\nversion = \"DevBuild\";\n").unwrap();

    assert!(write_mod_descriptor(&path, Version::new(1, 4, 2, 0)).unwrap());
    let first = std::fs::read_to_string(&path).unwrap();
    insta::assert_snapshot!(first, @r#"
    name = "Cavaux";
    version = "v1.4.2.0";
    "#);

    assert!(write_mod_descriptor(&path, Version::new(1, 4, 2, 0)).unwrap());
    assert_eq!(std::fs::read_to_string(&path).unwrap(), first);

    assert!(write_mod_descriptor(&path, Version::new(1, 5, 0, 0)).unwrap());
    assert!(std::fs::read_to_string(&path).unwrap().contains("\"v1.5.0.0\""));
}

#[test]
fn test_write_mod_descriptor_without_placeholder() {
    let temp = tempfile::tempdir().unwrap();
    let path = temp.path().join("mod.cpp");
    std::fs::write(&path, "name = \"Cavaux\";\n").unwrap();
    assert!(!write_mod_descriptor(&path, Version::new(1, 0, 0, 0)).unwrap());
}

#[test]
fn test_apply_version_missing_file_is_fatal() {
    let temp = tempfile::tempdir().unwrap();
    let mut paths = PathsConfig {
        root: temp.path().to_path_buf(),
        ..Default::default()
    };
    paths.resolve().unwrap();

    let err = apply_version(&paths, Version::new(1, 0, 0, 0)).unwrap_err();
    assert!(err.to_string().starts_with("path not found"));
    assert!(err.to_string().ends_with("project.toml"));
}

#[cfg(unix)]
#[tokio::test]
async fn test_resolve_fallbacks_outside_repository() {
    use super::{FALLBACK_COMMIT, resolve_commit, resolve_version};
    use crate::tools::test_utils::{config_at, context, write_script};

    let temp = tempfile::tempdir().unwrap();
    let bin = tempfile::tempdir().unwrap();
    let mut config = config_at(temp.path());
    config.tools.git = write_script(bin.path(), "git", "echo 'fatal: not a git repository' >&2; exit 128");
    let ctx = context(config);

    assert_eq!(resolve_version(&ctx, None).await.unwrap(), Version::default());
    assert_eq!(resolve_commit(&ctx, None).await.unwrap(), FALLBACK_COMMIT);

    let pinned = Version::new(3, 2, 1, 7);
    assert_eq!(resolve_version(&ctx, Some(pinned)).await.unwrap(), pinned);
    assert_eq!(resolve_commit(&ctx, Some("deadbeef")).await.unwrap(), "deadbeef");
}

#[cfg(unix)]
#[tokio::test]
async fn test_resolve_unparsable_tag() {
    use super::resolve_version;
    use crate::tools::test_utils::{config_at, context, write_script};

    let temp = tempfile::tempdir().unwrap();
    let mut config = config_at(temp.path());
    config.tools.git = write_script(temp.path(), "git", "echo release-candidate");
    let ctx = context(config);

    assert_eq!(resolve_version(&ctx, None).await.unwrap(), Version::default());
}

#[cfg(unix)]
#[tokio::test]
async fn test_resolve_four_part_tag_keeps_build_zero() {
    use super::resolve_version;
    use crate::tools::test_utils::{config_at, context, write_script};

    let temp = tempfile::tempdir().unwrap();
    let bin = tempfile::tempdir().unwrap();
    let mut config = config_at(temp.path());
    config.tools.git = write_script(bin.path(), "git", "echo v1.2.3.4");
    let ctx = context(config);

    let version = resolve_version(&ctx, None).await.unwrap();
    assert_eq!(version.build, 0);
    assert_eq!(version, Version::default());
}
