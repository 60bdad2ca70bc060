// cavaux-assemble: Release Assembly Pipeline
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

use crate::error::{FsError, Result};
use anyhow::Context;
use std::path::{Path, PathBuf};
use tokio::fs;

/// Recursively copies all contents from src directory to dst directory (async version).
///
/// Creates dst if it doesn't exist. Existing files are overwritten, other
/// files already in dst are left alone.
///
/// # Example
/// ```no_run
/// use cavaux_assemble::utility::fs::copy::copy_dir_contents_async;
/// use std::path::Path;
///
/// # async fn example() -> anyhow::Result<()> {
/// copy_dir_contents_async(Path::new(".cavauxout/release"), Path::new("releases/@cavaux")).await?;
/// # Ok(())
/// # }
/// ```
/// # Errors
///
/// Returns an error if any IO operation fails (creating directory, reading, copying).
pub async fn copy_dir_contents_async(src: &Path, dst: &Path) -> Result<()> {
    fs::create_dir_all(dst)
        .await
        .with_context(|| format!("failed to create directory {}", dst.display()))?;

    let mut entries = fs::read_dir(src)
        .await
        .with_context(|| format!("failed to read directory {}", src.display()))?;

    while let Some(entry) = entries
        .next_entry()
        .await
        .with_context(|| format!("failed to read entry from {}", src.display()))?
    {
        let src_path = entry.path();
        let dst_path = dst.join(entry.file_name());

        if src_path.is_dir() {
            Box::pin(copy_dir_contents_async(&src_path, &dst_path)).await?;
        } else {
            fs::copy(&src_path, &dst_path).await.with_context(|| {
                format!(
                    "failed to copy {} to {}",
                    src_path.display(),
                    dst_path.display()
                )
            })?;
        }
    }

    Ok(())
}

/// Copies one file into `dst_dir`, keeping its file name.
///
/// Returns the path of the copy.
///
/// # Errors
///
/// Returns `FsError::NotFound` if `src` is not a file, or an error if the
/// copy fails.
pub async fn copy_file_into(src: &Path, dst_dir: &Path) -> Result<PathBuf> {
    let name = src
        .file_name()
        .filter(|_| src.is_file())
        .ok_or_else(|| FsError::NotFound(src.display().to_string()))?;
    let dst = dst_dir.join(name);
    fs::copy(src, &dst)
        .await
        .map_err(|source| FsError::IoError {
            path: dst.display().to_string(),
            source,
        })?;
    Ok(dst)
}

/// Deletes every file in the list.
///
/// # Errors
///
/// Returns an error on the first file that cannot be removed.
pub async fn remove_files(files: &[PathBuf]) -> Result<()> {
    for file in files {
        fs::remove_file(file)
            .await
            .with_context(|| format!("failed to remove {}", file.display()))?;
    }
    Ok(())
}
