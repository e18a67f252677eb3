//! Session flag persistence.
//!
//! The flag is set by whatever authenticates the user; EventMate only reads
//! it (to decide whether to offer "Log Out") and clears it. The value is
//! passed around explicitly as a [`Session`]; only [`SessionStore`] touches
//! the file.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde_json::{Map, Value};

use crate::config::paths;

/// Key holding the authenticated flag in the session file.
pub const AUTH_FLAG_KEY: &str = "isAuthenticated";

/// Authentication context handed to the views.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Session {
    pub authenticated: bool,
}

impl Session {
    pub fn authenticated() -> Self {
        Self {
            authenticated: true,
        }
    }

    pub fn anonymous() -> Self {
        Self::default()
    }
}

/// File-backed store for the session flag (`session.json`).
#[derive(Debug, Clone)]
pub struct SessionStore {
    path: PathBuf,
}

impl SessionStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Store at `${EVENTMATE_HOME}/session.json`.
    pub fn default_location() -> Self {
        Self::new(paths::session_path())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Reads the flag. A missing file means not authenticated.
    ///
    /// Both `true` and the string `"true"` count as set.
    ///
    /// # Errors
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn load(&self) -> Result<Session> {
        let entries = self.read_entries()?;
        let authenticated = match entries.get(AUTH_FLAG_KEY) {
            Some(Value::Bool(flag)) => *flag,
            Some(Value::String(s)) => s == "true",
            _ => false,
        };
        Ok(Session { authenticated })
    }

    /// Sets the flag, keeping any other keys in the file.
    ///
    /// # Errors
    /// Returns an error if the file cannot be read or written.
    pub fn set_authenticated(&self) -> Result<()> {
        let mut entries = self.read_entries()?;
        entries.insert(AUTH_FLAG_KEY.to_string(), Value::Bool(true));
        self.write_entries(&entries)
    }

    /// Removes the flag. The file is deleted once nothing else is left in it.
    ///
    /// # Errors
    /// Returns an error if the file cannot be read, written or removed.
    pub fn clear(&self) -> Result<()> {
        let mut entries = self.read_entries()?;
        entries.remove(AUTH_FLAG_KEY);
        if !entries.is_empty() {
            return self.write_entries(&entries);
        }
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(e) => {
                Err(e).with_context(|| format!("Failed to remove {}", self.path.display()))
            }
        }
    }

    fn read_entries(&self) -> Result<Map<String, Value>> {
        let contents = match fs::read_to_string(&self.path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Map::new()),
            Err(e) => {
                return Err(e)
                    .with_context(|| format!("Failed to read {}", self.path.display()));
            }
        };
        if contents.trim().is_empty() {
            return Ok(Map::new());
        }
        serde_json::from_str(&contents)
            .with_context(|| format!("Failed to parse {}", self.path.display()))
    }

    fn write_entries(&self, entries: &Map<String, Value>) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }
        let json = serde_json::to_string_pretty(entries).context("Failed to encode session")?;
        fs::write(&self.path, json)
            .with_context(|| format!("Failed to write {}", self.path.display()))
    }
}
