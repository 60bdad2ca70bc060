// cavaux-assemble: Release Assembly Pipeline
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

use crate::error::Result;
use bon::Builder;
use ignore::WalkBuilder;
use std::path::{Path, PathBuf};
use tracing::warn;
use wax::{Glob, Program};

/// Options for directory traversal.
///
/// Release trees live in ignored, often hidden, directories, so the defaults
/// neither skip hidden entries nor honour `.gitignore`.
#[derive(Debug, Clone, Builder)]
pub struct WalkOptions {
    /// Maximum depth to traverse (None = unlimited)
    #[builder(setters(name = with_max_depth))]
    max_depth: Option<usize>,
    /// Include hidden files/directories
    #[builder(setters(name = with_include_hidden), default = true)]
    include_hidden: bool,
    /// Respect .gitignore files
    #[builder(setters(name = with_respect_gitignore), default = false)]
    respect_gitignore: bool,
}

impl Default for WalkOptions {
    fn default() -> Self {
        Self::builder().build()
    }
}

impl WalkOptions {
    /// Only the direct children of the root.
    #[must_use]
    pub fn shallow() -> Self {
        Self::builder().with_max_depth(1).build()
    }

    #[must_use]
    pub const fn max_depth(&self) -> Option<usize> {
        self.max_depth
    }

    #[must_use]
    pub const fn include_hidden(&self) -> bool {
        self.include_hidden
    }

    #[must_use]
    pub const fn respect_gitignore(&self) -> bool {
        self.respect_gitignore
    }
}

pub(super) fn build_walker(root: &Path, options: &WalkOptions) -> WalkBuilder {
    let mut builder = WalkBuilder::new(root);

    builder.max_depth(options.max_depth());
    builder.hidden(!options.include_hidden());

    builder.git_ignore(options.respect_gitignore());
    builder.git_global(options.respect_gitignore());
    builder.git_exclude(options.respect_gitignore());
    builder.ignore(options.respect_gitignore());
    builder.parents(options.respect_gitignore());

    builder
}

/// Finds files below `root` whose root-relative path matches a glob.
///
/// Uses the `wax` crate for glob matching; prefix the pattern with `(?i)` to
/// match case-insensitively. Results are sorted.
///
/// # Errors
///
/// Returns an error if:
/// - The root directory does not exist.
/// - The glob pattern is invalid.
///
/// # Example
/// ```no_run
/// use cavaux_assemble::utility::fs::walk::{find_files, WalkOptions};
///
/// let pbos = find_files("release/addons", "(?i)*.pbo", &WalkOptions::shallow())?;
/// for file in pbos {
///     println!("{}", file.display());
/// }
/// # Ok::<(), anyhow::Error>(())
/// ```
pub fn find_files<P: AsRef<Path>>(
    root: P,
    pattern: &str,
    options: &WalkOptions,
) -> Result<Vec<PathBuf>> {
    let root = root.as_ref();

    if !root.is_dir() {
        anyhow::bail!("root directory does not exist: {}", root.display());
    }

    let glob =
        Glob::new(pattern).map_err(|e| anyhow::anyhow!("invalid glob pattern '{pattern}': {e}"))?;

    let mut files = Vec::new();
    for entry in build_walker(root, options).build() {
        match entry {
            Ok(entry) => {
                if entry.file_type().is_some_and(|ft| ft.is_file())
                    && let Ok(rel_path) = entry.path().strip_prefix(root)
                    && glob.is_match(rel_path)
                {
                    files.push(entry.into_path());
                }
            }
            Err(e) => warn!(error = %e, "walk error"),
        }
    }

    files.sort();
    Ok(files)
}

/// Lists the names of the direct children of `dir`, sorted.
///
/// # Errors
///
/// Returns an error if the directory cannot be read.
pub fn list_entry_names(dir: &Path) -> Result<Vec<String>> {
    let mut names = Vec::new();
    for entry in build_walker(dir, &WalkOptions::shallow()).build() {
        let entry = entry?;
        if entry.depth() == 0 {
            continue;
        }
        names.push(entry.file_name().to_string_lossy().into_owned());
    }
    names.sort();
    Ok(names)
}
