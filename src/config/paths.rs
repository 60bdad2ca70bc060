// cavaux-assemble: Release Assembly Pipeline
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Path configuration.
//!
//! ```text
//! root/
//!   .hemtt/project.toml      (build_project)
//!   mod.cpp                  (mod_descriptor)
//!   .hemttout/release/       (build_output)
//!     addons/*.pbo
//!   .cavauxout/              (work)
//!     steamapps/workshop/content/<app_id>/<id>/addons/*.pbo
//!     release/               (staging)
//!       addons/
//!       keys/
//!   releases/
//!     @cavaux/               (published)
//!     cavaux-<version>.zip   (archive)
//! ```
//!
//! Relative paths are resolved against `root`.

use serde::{Deserialize, Serialize};
use std::fmt::Display;
use std::path::{Path, PathBuf};

use anyhow::Context;

use super::Config;
use crate::error::Result;

/// Project-relative locations the pipeline reads from and writes to.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PathsConfig {
    /// Project root; the build tool runs here.
    pub root: PathBuf,
    /// Scratch directory for downloads and the staging tree.
    pub work: PathBuf,
    /// Directory the build tool writes its release into.
    pub build_output: PathBuf,
    /// Directory receiving the published tree and archives.
    pub releases: PathBuf,
    /// Build tool project file carrying the version table.
    pub build_project: PathBuf,
    /// Mod descriptor carrying the display version.
    pub mod_descriptor: PathBuf,
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            root: PathBuf::from("."),
            work: PathBuf::from(".cavauxout"),
            build_output: PathBuf::from(".hemttout/release"),
            releases: PathBuf::from("releases"),
            build_project: PathBuf::from(".hemtt/project.toml"),
            mod_descriptor: PathBuf::from("mod.cpp"),
        }
    }
}

impl PathsConfig {
    /// Makes `root` absolute and resolves every other relative path against it.
    ///
    /// # Errors
    ///
    /// Returns an error if the current directory cannot be determined.
    pub fn resolve(&mut self) -> Result<()> {
        self.root = std::path::absolute(&self.root)
            .with_context(|| format!("failed to resolve root {}", self.root.display()))?;

        let root = self.root.clone();
        for path in [
            &mut self.work,
            &mut self.build_output,
            &mut self.releases,
            &mut self.build_project,
            &mut self.mod_descriptor,
        ] {
            if path.is_relative() {
                *path = root.join(&*path);
            }
        }
        Ok(())
    }
}

/// Every path touched by a release run, derived once from the configuration.
#[derive(Debug, Clone)]
pub struct ReleaseLayout {
    root: PathBuf,
    work: PathBuf,
    content: PathBuf,
    build_output: PathBuf,
    staging: PathBuf,
    releases: PathBuf,
    published: PathBuf,
    project_name: String,
    mod_dir: String,
}

impl ReleaseLayout {
    #[must_use]
    pub fn new(config: &Config) -> Self {
        let paths = &config.paths;
        let project = &config.project;
        Self {
            root: paths.root.clone(),
            work: paths.work.clone(),
            content: paths
                .work
                .join("steamapps")
                .join("workshop")
                .join("content")
                .join(project.app_id.to_string()),
            build_output: paths.build_output.clone(),
            staging: paths.work.join("release"),
            releases: paths.releases.clone(),
            published: paths.releases.join(&project.mod_dir),
            project_name: project.name.clone(),
            mod_dir: project.mod_dir.clone(),
        }
    }

    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Install directory handed to the workshop downloader.
    #[must_use]
    pub fn work(&self) -> &Path {
        &self.work
    }

    /// Directory holding one entry per downloaded workshop item.
    #[must_use]
    pub fn content(&self) -> &Path {
        &self.content
    }

    #[must_use]
    pub fn build_output(&self) -> &Path {
        &self.build_output
    }

    #[must_use]
    pub fn build_addons(&self) -> PathBuf {
        self.build_output.join("addons")
    }

    #[must_use]
    pub fn staging(&self) -> &Path {
        &self.staging
    }

    #[must_use]
    pub fn staging_addons(&self) -> PathBuf {
        self.staging.join("addons")
    }

    #[must_use]
    pub fn staging_keys(&self) -> PathBuf {
        self.staging.join("keys")
    }

    #[must_use]
    pub fn releases(&self) -> &Path {
        &self.releases
    }

    /// Unpacked copy of the release next to the archives.
    #[must_use]
    pub fn published(&self) -> &Path {
        &self.published
    }

    /// Top-level directory of every archive entry.
    #[must_use]
    pub fn mod_dir(&self) -> &str {
        &self.mod_dir
    }

    /// `<releases>/<project>-<version>.zip`
    #[must_use]
    pub fn archive(&self, version: impl Display) -> PathBuf {
        self.releases
            .join(format!("{}-{version}.zip", self.project_name))
    }

    /// `<project>_<version>-<commit>`, the base name of the signing key pair.
    #[must_use]
    pub fn key_name(&self, version: impl Display, commit: &str) -> String {
        format!("{}_{version}-{commit}", self.project_name)
    }
}
