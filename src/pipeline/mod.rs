// cavaux-assemble: Release Assembly Pipeline
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Release pipeline stages.
//!
//! ```text
//! resolver  tools on PATH?             --> ToolsMissing
//! version   tag → Version, rewrite     --> project.toml, mod.cpp
//! download  steamcmd (soft skip)       --> <work>/steamapps/...
//! verify    content dir vs manifest    --> NoDownloads/DownloadCountMismatch/MissingMods
//! (build)   hemtt release              --> BuildFailed
//! assemble  pbos + metadata → staging  --> ArtifactMissing
//! sign      key, sign, check, drop key --> KeyNotCreated/SignatureMissing/VerificationFailed
//! archive   staging → @mod + zip
//! ```
//!
//! Each stage is a free function; `cmd::release` sequences them.

pub mod archive;
pub mod assemble;
pub mod download;
pub mod resolver;
pub mod sign;
pub mod verify;
pub mod version;
