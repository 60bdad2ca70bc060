// cavaux-assemble: Release Assembly Pipeline
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Utility modules.
//!
//! ```text
//! fs
//!   walk:  find_files(), WalkOptions
//!   copy:  copy_dir_contents_async(), copy_file_into(), remove_files()
//! ```

pub mod fs;
