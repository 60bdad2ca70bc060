// cavaux-assemble: Release Assembly Pipeline
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Workshop login credentials.
//!
//! ```text
//! per field:  --username/--password  >  -C creds.json  >  ""
//! ```
//!
//! An empty command-line value does not shadow the file.

use std::fmt;
use std::path::Path;

use serde::Deserialize;

use crate::error::{ConfigError, Result};

/// Username and password for the workshop downloader.
#[derive(Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Credentials {
    username: String,
    password: String,
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field(
                "password",
                &if self.password.is_empty() {
                    ""
                } else {
                    "[hidden]"
                },
            )
            .finish()
    }
}

impl Credentials {
    #[must_use]
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }

    /// Reads a JSON object with optional `username` and `password` strings.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError::ReadError` if the file cannot be read and a
    /// `ConfigError::ParseError` if it is not such an object.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::ReadError {
            path: path.display().to_string(),
            source,
        })?;
        let credentials =
            serde_json::from_str(&content).map_err(|e| ConfigError::ParseError {
                path: path.display().to_string(),
                message: e.to_string(),
            })?;
        Ok(credentials)
    }

    /// Merges command-line values over an optional credentials file.
    ///
    /// # Errors
    ///
    /// Returns an error if `file` is given but cannot be read or parsed.
    pub fn resolve(
        username: Option<&str>,
        password: Option<&str>,
        file: Option<&Path>,
    ) -> Result<Self> {
        let stored = match file {
            Some(path) => Self::from_file(path)?,
            None => Self::default(),
        };
        Ok(stored.overridden_by(username, password))
    }

    /// Replaces each field with the given value unless that value is empty.
    #[must_use]
    pub fn overridden_by(mut self, username: Option<&str>, password: Option<&str>) -> Self {
        if let Some(username) = username.filter(|s| !s.is_empty()) {
            self.username = username.to_string();
        }
        if let Some(password) = password.filter(|s| !s.is_empty()) {
            self.password = password.to_string();
        }
        self
    }

    #[must_use]
    pub fn username(&self) -> &str {
        &self.username
    }

    #[must_use]
    pub fn password(&self) -> &str {
        &self.password
    }

    /// Names the first empty field, if any.
    #[must_use]
    pub const fn missing(&self) -> Option<&'static str> {
        if self.username.is_empty() {
            Some("username")
        } else if self.password.is_empty() {
            Some("password")
        } else {
            None
        }
    }
}
