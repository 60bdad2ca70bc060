// cavaux-assemble: Release Assembly Pipeline
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

use super::copy::{copy_dir_contents_async, copy_file_into, remove_files};
use super::walk::{WalkOptions, find_files, list_entry_names};
use std::path::Path;
use tempfile::TempDir;

fn temp_dir() -> TempDir {
    tempfile::tempdir().expect("failed to create temp dir")
}

fn names(paths: &[std::path::PathBuf], root: &Path) -> Vec<String> {
    paths
        .iter()
        .map(|p| {
            p.strip_prefix(root)
                .unwrap()
                .to_string_lossy()
                .replace('\\', "/")
        })
        .collect()
}

#[test]
fn test_find_files_case_insensitive_shallow() {
    let temp = temp_dir();
    std::fs::write(temp.path().join("a.pbo"), "").unwrap();
    std::fs::write(temp.path().join("B.PBO"), "").unwrap();
    std::fs::write(temp.path().join("c.bisign"), "").unwrap();
    std::fs::create_dir(temp.path().join("sub")).unwrap();
    std::fs::write(temp.path().join("sub/d.pbo"), "").unwrap();

    let found = find_files(temp.path(), "(?i)*.pbo", &WalkOptions::shallow()).unwrap();
    assert_eq!(names(&found, temp.path()), vec!["B.PBO", "a.pbo"]);

    let deep = find_files(temp.path(), "**/*.pbo", &WalkOptions::default()).unwrap();
    assert_eq!(names(&deep, temp.path()), vec!["a.pbo", "sub/d.pbo"]);
}

#[test]
fn test_find_files_ignores_gitignore_and_hidden() {
    let temp = temp_dir();
    std::fs::create_dir(temp.path().join(".hidden")).unwrap();
    std::fs::write(temp.path().join(".hidden/x.pbo"), "").unwrap();
    std::fs::write(temp.path().join(".gitignore"), "*.pbo\n").unwrap();
    std::fs::write(temp.path().join("y.pbo"), "").unwrap();

    let found = find_files(temp.path(), "**/*.pbo", &WalkOptions::default()).unwrap();
    assert_eq!(names(&found, temp.path()), vec![".hidden/x.pbo", "y.pbo"]);
}

#[test]
fn test_find_files_errors() {
    let temp = temp_dir();
    assert!(find_files(temp.path().join("missing"), "*", &WalkOptions::default()).is_err());
    assert!(find_files(temp.path(), "[", &WalkOptions::default()).is_err());
}

#[test]
fn test_list_entry_names() {
    let temp = temp_dir();
    std::fs::create_dir(temp.path().join("843577117")).unwrap();
    std::fs::create_dir(temp.path().join("450814997")).unwrap();
    std::fs::write(temp.path().join("stray.txt"), "").unwrap();

    insta::assert_snapshot!(
        list_entry_names(temp.path()).unwrap().join(","),
        @"450814997,843577117,stray.txt"
    );
}

#[tokio::test]
async fn test_copy_dir_contents_merges() {
    let src = temp_dir();
    let dst = temp_dir();

    std::fs::create_dir_all(src.path().join("addons")).unwrap();
    std::fs::write(src.path().join("addons/a.pbo"), "new").unwrap();
    std::fs::write(src.path().join("mod.cpp"), "mod").unwrap();
    std::fs::create_dir_all(dst.path().join("addons")).unwrap();
    std::fs::write(dst.path().join("addons/a.pbo"), "old").unwrap();
    std::fs::write(dst.path().join("addons/keep.pbo"), "keep").unwrap();

    copy_dir_contents_async(src.path(), dst.path()).await.unwrap();

    assert_eq!(std::fs::read_to_string(dst.path().join("addons/a.pbo")).unwrap(), "new");
    assert_eq!(std::fs::read_to_string(dst.path().join("addons/keep.pbo")).unwrap(), "keep");
    assert_eq!(std::fs::read_to_string(dst.path().join("mod.cpp")).unwrap(), "mod");
}

#[tokio::test]
async fn test_copy_file_into_and_remove() {
    let src = temp_dir();
    let dst = temp_dir();
    std::fs::write(src.path().join("meta.cpp"), "meta").unwrap();

    let copied = copy_file_into(&src.path().join("meta.cpp"), dst.path())
        .await
        .unwrap();
    assert_eq!(copied, dst.path().join("meta.cpp"));
    assert_eq!(std::fs::read_to_string(&copied).unwrap(), "meta");

    let missing = copy_file_into(&src.path().join("logo.paa"), dst.path()).await;
    assert!(missing.unwrap_err().to_string().starts_with("path not found"));

    remove_files(&[copied.clone()]).await.unwrap();
    assert!(!copied.exists());
}
