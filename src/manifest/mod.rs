// cavaux-assemble: Release Assembly Pipeline
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Mod manifest loading and license audit.
//!
//! ```text
//! cavAuxModList.json
//! {
//!   "workshop":       { "<id>": { "name": "...", "License": "...", ... } },
//!   "workshop_extra": { ... },
//!   "local":          { ... }
//! }
//!
//! audit:     every category containing "workshop"
//! downloads: the configured category only
//! ```

use std::collections::BTreeMap;
use std::io;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::{FsError, ManifestError, Result};

/// One manifest entry. Fields other than these two are ignored.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ModEntry {
    #[serde(default)]
    pub name: String,
    #[serde(default, rename = "License")]
    pub license: String,
}

/// Category name → (mod id → entry).
pub type Categories = BTreeMap<String, BTreeMap<String, ModEntry>>;

/// Parsed mod manifest. Read once, never written.
#[derive(Debug, Clone)]
pub struct Manifest {
    path: PathBuf,
    categories: Categories,
}

/// An entry whose license differs from the accepted value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LicenseFinding {
    pub category: String,
    pub id: String,
    pub name: String,
    pub license: String,
}

impl Manifest {
    /// Reads and parses the manifest at `path`.
    ///
    /// # Errors
    ///
    /// Returns `ManifestError::NotFound` if the file does not exist,
    /// `FsError::IoError` if it cannot be read, and `ManifestError::Parse` if
    /// it is not a category → id → entry object.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|source| -> anyhow::Error {
            if source.kind() == io::ErrorKind::NotFound {
                ManifestError::NotFound {
                    path: path.display().to_string(),
                }
                .into()
            } else {
                FsError::IoError {
                    path: path.display().to_string(),
                    source,
                }
                .into()
            }
        })?;
        Self::parse(path, &content)
    }

    /// Parses manifest JSON; `path` is only used for diagnostics.
    ///
    /// # Errors
    ///
    /// Returns `ManifestError::Parse` if the content does not match the shape.
    pub fn parse(path: &Path, content: &str) -> Result<Self> {
        let categories = serde_json::from_str(content).map_err(|e| ManifestError::Parse {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;
        Ok(Self {
            path: path.to_path_buf(),
            categories,
        })
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    #[must_use]
    pub const fn categories(&self) -> &Categories {
        &self.categories
    }

    /// Returns the entries of the category the download list is taken from.
    ///
    /// # Errors
    ///
    /// Returns `ManifestError::MissingCategory` if the manifest lacks it.
    pub fn workshop_items(&self, category: &str) -> Result<&BTreeMap<String, ModEntry>> {
        self.categories.get(category).ok_or_else(|| {
            ManifestError::MissingCategory {
                category: category.to_string(),
                path: self.path.display().to_string(),
            }
            .into()
        })
    }

    /// Reports every workshop entry whose license is not exactly `accepted`.
    ///
    /// Categories are considered workshop categories when their name contains
    /// `workshop`. The result is advisory and never fails the run.
    #[must_use]
    pub fn audit(&self, accepted: &str) -> Vec<LicenseFinding> {
        self.categories
            .iter()
            .filter(|(category, _)| category.contains("workshop"))
            .flat_map(|(category, entries)| {
                entries
                    .iter()
                    .filter(|(_, entry)| entry.license != accepted)
                    .map(move |(id, entry)| LicenseFinding {
                        category: category.clone(),
                        id: id.clone(),
                        name: entry.name.clone(),
                        license: entry.license.clone(),
                    })
            })
            .collect()
    }

    /// Number of entries across all workshop categories.
    #[must_use]
    pub fn workshop_entry_count(&self) -> usize {
        self.categories
            .iter()
            .filter(|(category, _)| category.contains("workshop"))
            .map(|(_, entries)| entries.len())
            .sum()
    }
}
