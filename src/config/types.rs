// cavaux-assemble: Release Assembly Pipeline
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Configuration types.
//!
//! ```text
//! Config: GlobalConfig, ProjectConfig, PathsConfig, ToolsConfig
//! ```

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::logging::LogLevel;

/// Global configuration options.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GlobalConfig {
    /// Log level for console output (0-6).
    pub output_log_level: LogLevel,
    /// Log level for file output (0-6).
    pub file_log_level: LogLevel,
    /// Path to log file; no file log when unset.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub log_file: Option<PathBuf>,
}

impl Default for GlobalConfig {
    fn default() -> Self {
        Self {
            output_log_level: LogLevel::INFO,
            file_log_level: LogLevel::TRACE,
            log_file: None,
        }
    }
}

/// Identity of the mod being released and of its workshop sources.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ProjectConfig {
    /// Project name; prefixes the archive and key names.
    pub name: String,
    /// Directory name of the published mod (`@cavaux`).
    pub mod_dir: String,
    /// Steam application id the workshop items belong to.
    pub app_id: u32,
    /// Mod manifest, relative to the project root.
    pub manifest: PathBuf,
    /// Manifest category whose ids are downloaded.
    pub workshop_category: String,
    /// The only license value the audit accepts.
    pub accepted_license: String,
    /// Files copied from the build output next to `addons/`.
    pub metadata_files: Vec<String>,
}

impl Default for ProjectConfig {
    fn default() -> Self {
        Self {
            name: "cavaux".to_string(),
            mod_dir: "@cavaux".to_string(),
            app_id: 107_410,
            manifest: PathBuf::from("cavAuxModList.json"),
            workshop_category: "workshop".to_string(),
            accepted_license: "License permits".to_string(),
            metadata_files: vec![
                "mod.cpp".to_string(),
                "meta.cpp".to_string(),
                "logo_cavaux_ca.paa".to_string(),
            ],
        }
    }
}

/// External executables, by name (looked up in PATH) or by path.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ToolsConfig {
    pub git: PathBuf,
    pub steamcmd: PathBuf,
    pub hemtt: PathBuf,
    pub create_key: PathBuf,
    pub sign_file: PathBuf,
    pub check_signatures: PathBuf,
}

impl Default for ToolsConfig {
    fn default() -> Self {
        Self {
            git: PathBuf::from("git"),
            steamcmd: PathBuf::from("steamcmd"),
            hemtt: PathBuf::from("hemtt"),
            create_key: PathBuf::from("DSCreateKey"),
            sign_file: PathBuf::from("DSSignFile"),
            check_signatures: PathBuf::from("DSCheckSignatures"),
        }
    }
}

impl ToolsConfig {
    /// Returns every configured tool as `(key, executable)` in pipeline order.
    #[must_use]
    pub fn entries(&self) -> [(&'static str, &PathBuf); 6] {
        [
            ("git", &self.git),
            ("steamcmd", &self.steamcmd),
            ("hemtt", &self.hemtt),
            ("create_key", &self.create_key),
            ("sign_file", &self.sign_file),
            ("check_signatures", &self.check_signatures),
        ]
    }
}
