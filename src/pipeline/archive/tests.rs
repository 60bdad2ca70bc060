// cavaux-assemble: Release Assembly Pipeline
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

use std::io::Read;
use std::path::Path;

use super::{list_archives, publish};
use crate::config::paths::ReleaseLayout;
use crate::tools::test_utils::{config_at, run_with_logs};

fn entries(archive: &Path) -> Vec<String> {
    let file = std::fs::File::open(archive).unwrap();
    let zip = zip::ZipArchive::new(file).unwrap();
    let mut names: Vec<String> = zip.file_names().map(str::to_string).collect();
    names.sort();
    names
}

fn stage(layout: &ReleaseLayout) {
    let addons = layout.staging_addons();
    let keys = layout.staging_keys();
    std::fs::create_dir_all(&addons).unwrap();
    std::fs::create_dir_all(&keys).unwrap();
    std::fs::write(addons.join("cavaux_main.pbo"), "pbo").unwrap();
    std::fs::write(keys.join("cavaux_1.0.0.0-abcd1234.bikey"), "key").unwrap();
    std::fs::write(layout.staging().join("mod.cpp"), "name = \"Cavaux\";").unwrap();
}

#[tokio::test]
async fn test_publish_roots_entries_at_mod_dir() {
    let temp = tempfile::tempdir().unwrap();
    let layout = ReleaseLayout::new(&config_at(temp.path()));
    stage(&layout);

    let archive = publish(&layout, "1.0.0.0").await.unwrap();
    assert_eq!(archive, layout.releases().join("cavaux-1.0.0.0.zip"));
    insta::assert_snapshot!(entries(&archive).join("\n"), @r"
    @cavaux/addons/cavaux_main.pbo
    @cavaux/keys/cavaux_1.0.0.0-abcd1234.bikey
    @cavaux/mod.cpp
    ");
    assert!(layout.published().join("addons/cavaux_main.pbo").is_file());

    let mut zip = zip::ZipArchive::new(std::fs::File::open(&archive).unwrap()).unwrap();
    let mut content = String::new();
    zip.by_name("@cavaux/mod.cpp")
        .unwrap()
        .read_to_string(&mut content)
        .unwrap();
    assert_eq!(content, "name = \"Cavaux\";");
}

#[tokio::test]
async fn test_publish_twice_overwrites() {
    let temp = tempfile::tempdir().unwrap();
    let layout = ReleaseLayout::new(&config_at(temp.path()));
    stage(&layout);

    let first = publish(&layout, "1.0.0.0").await.unwrap();
    let first_entries = entries(&first);
    let second = publish(&layout, "1.0.0.0").await.unwrap();
    assert_eq!(first, second);
    assert_eq!(entries(&second), first_entries);
}

#[tokio::test]
async fn test_publish_drops_previous_release_content() {
    let temp = tempfile::tempdir().unwrap();
    let layout = ReleaseLayout::new(&config_at(temp.path()));
    stage(&layout);
    publish(&layout, "1.0.0.0").await.unwrap();

    std::fs::remove_dir_all(layout.staging()).unwrap();
    let addons = layout.staging_addons();
    let keys = layout.staging_keys();
    std::fs::create_dir_all(&addons).unwrap();
    std::fs::create_dir_all(&keys).unwrap();
    std::fs::write(addons.join("new.pbo"), "pbo").unwrap();
    std::fs::write(keys.join("cavaux_1.1.0.0-ffff0000.bikey"), "key").unwrap();

    let archive = publish(&layout, "1.1.0.0").await.unwrap();
    insta::assert_snapshot!(entries(&archive).join("\n"), @r"
    @cavaux/addons/new.pbo
    @cavaux/keys/cavaux_1.1.0.0-ffff0000.bikey
    ");
    assert!(!layout.published().join("mod.cpp").exists());
}

#[tokio::test]
async fn test_list_archives_logs_each_zip() {
    let temp = tempfile::tempdir().unwrap();
    std::fs::write(temp.path().join("cavaux-1.0.0.0.zip"), "").unwrap();
    std::fs::write(temp.path().join("notes.txt"), "").unwrap();

    let (archives, logs) = run_with_logs(|| async { list_archives(temp.path()) }).await;
    assert_eq!(archives.unwrap(), vec![temp.path().join("cavaux-1.0.0.0.zip")]);
    assert!(logs.contains("Created release: "));
    assert!(logs.contains("cavaux-1.0.0.0.zip"));
}
