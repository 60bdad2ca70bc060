// cavaux-assemble: Release Assembly Pipeline
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Core process management.
//!
//! ```text
//!      core
//!       |
//!       v
//!    process
//!       |
//!   Builder, Output, PATH lookup cache
//! ```

pub mod process;
