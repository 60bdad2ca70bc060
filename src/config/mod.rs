// cavaux-assemble: Release Assembly Pipeline
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Configuration management.
//!
//! # Configuration Hierarchy
//!
//! ```text
//! Priority (low → high)
//! 1. defaults
//! 2. assemble.toml (project root, optional)
//! 3. --ini FILE...
//! 4. ASSEMBLE_* env vars
//! 5. --set KEY=VALUE
//! 6. CLI flags
//! ```
//!
//! # Environment Variable Mapping
//!
//! ```text
//! ASSEMBLE_PROJECT__APP_ID=107410  → project.app_id = 107410
//! ASSEMBLE_PATHS__WORK=/tmp/out    → paths.work = "/tmp/out"
//! ASSEMBLE_TOOLS__HEMTT=/opt/hemtt → tools.hemtt = "/opt/hemtt"
//! ```

pub mod credentials;
pub mod loader;
pub mod paths;
pub mod types;


use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

use crate::error::{ConfigError, Result};

use loader::ConfigLoader;
use paths::PathsConfig;
use types::{GlobalConfig, ProjectConfig, ToolsConfig};

/// Name of the optional configuration file looked up in the project root.
pub const CONFIG_FILE_NAME: &str = "assemble.toml";

/// Prefix of configuration environment variables.
pub const ENV_PREFIX: &str = "ASSEMBLE";

/// Complete application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Global options.
    pub global: GlobalConfig,
    /// Mod identity and manifest settings.
    pub project: ProjectConfig,
    /// Paths configuration.
    pub paths: PathsConfig,
    /// Tool executables.
    pub tools: ToolsConfig,
}

impl Config {
    /// Create a new configuration builder.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use cavaux_assemble::config::Config;
    ///
    /// let config = Config::builder()
    ///     .add_toml_file_optional("assemble.toml")
    ///     .with_env_prefix("ASSEMBLE")
    ///     .build()?;
    /// # Ok::<(), anyhow::Error>(())
    /// ```
    #[must_use]
    pub fn builder() -> ConfigLoader {
        ConfigLoader::new()
    }

    /// Load configuration from a single TOML file (simple API).
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, contains invalid TOML, or
    /// does not match the `Config` structure.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        Self::builder().add_toml_file(path).build()
    }

    /// Load configuration from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns an error if the content is not valid TOML or does not match the
    /// `Config` structure.
    pub fn parse(content: &str) -> Result<Self> {
        Self::builder().add_toml_str(content).build()
    }

    /// Resolve all paths and validate configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the root cannot be made absolute or a required
    /// project value is empty.
    pub fn resolve_and_validate(&mut self) -> Result<()> {
        self.paths.resolve()?;
        if self.project.manifest.is_relative() {
            self.project.manifest = self.paths.root.join(&self.project.manifest);
        }

        for (key, value) in [
            ("name", &self.project.name),
            ("mod_dir", &self.project.mod_dir),
            ("workshop_category", &self.project.workshop_category),
        ] {
            if value.is_empty() {
                return Err(ConfigError::MissingKey {
                    section: "project".to_string(),
                    key: key.to_string(),
                }
                .into());
            }
        }
        Ok(())
    }

    /// Format configuration options for display.
    ///
    /// Returns one aligned `key = value` line per option, deterministically
    /// ordered.
    #[must_use]
    pub fn format_options(&self) -> Vec<String> {
        let mut options = BTreeMap::new();
        self.format_global_options(&mut options);
        self.format_project_options(&mut options);
        self.format_paths_options(&mut options);
        self.format_tools_options(&mut options);

        let max_key_len = options.keys().map(String::len).max().unwrap_or(0);

        options
            .into_iter()
            .map(|(key, value)| format!("{key:<max_key_len$} = {value}"))
            .collect()
    }

    fn format_global_options(&self, options: &mut BTreeMap<String, String>) {
        options.insert(
            "global.output_log_level".into(),
            self.global.output_log_level.as_u8().to_string(),
        );
        options.insert(
            "global.file_log_level".into(),
            self.global.file_log_level.as_u8().to_string(),
        );
        options.insert(
            "global.log_file".into(),
            self.global
                .log_file
                .as_ref()
                .map_or_else(String::new, |p| p.display().to_string()),
        );
    }

    fn format_project_options(&self, options: &mut BTreeMap<String, String>) {
        let project = &self.project;
        options.insert("project.name".into(), project.name.clone());
        options.insert("project.mod_dir".into(), project.mod_dir.clone());
        options.insert("project.app_id".into(), project.app_id.to_string());
        options.insert(
            "project.manifest".into(),
            project.manifest.display().to_string(),
        );
        options.insert(
            "project.workshop_category".into(),
            project.workshop_category.clone(),
        );
        options.insert(
            "project.accepted_license".into(),
            project.accepted_license.clone(),
        );
        options.insert(
            "project.metadata_files".into(),
            project.metadata_files.join(", "),
        );
    }

    fn format_paths_options(&self, options: &mut BTreeMap<String, String>) {
        let paths = &self.paths;
        for (key, path) in [
            ("root", &paths.root),
            ("work", &paths.work),
            ("build_output", &paths.build_output),
            ("releases", &paths.releases),
            ("build_project", &paths.build_project),
            ("mod_descriptor", &paths.mod_descriptor),
        ] {
            options.insert(format!("paths.{key}"), path.display().to_string());
        }
    }

    fn format_tools_options(&self, options: &mut BTreeMap<String, String>) {
        for (key, path) in self.tools.entries() {
            options.insert(format!("tools.{key}"), path.display().to_string());
        }
    }
}
