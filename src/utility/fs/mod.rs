// cavaux-assemble: Release Assembly Pipeline
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Filesystem utilities with glob matching and async copy.
//!
//! ```text
//! walk:  find_files()     wax glob over ignore::Walk, sorted
//!        WalkOptions      max_depth, hidden, gitignore
//! copy:  copy_dir_contents_async() recursive merge copy
//!        copy_file_into()          single file into a directory
//!        remove_files()            delete a list of files
//! ```

pub mod copy;
pub mod walk;

#[cfg(test)]
mod tests;
