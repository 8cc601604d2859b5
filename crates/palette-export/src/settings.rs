//! Settings store boundary.
//!
//! The companion component owns the saved configuration and the generated
//! stylesheet; the export handler only ever sees one [`SettingsSnapshot`]
//! per request, taken in a single read, so the precondition checks cannot
//! observe two different states.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::capability::CompanionProbe;
use palette_common::SettingsError;

/// Read-once view of the companion component's saved state.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SettingsSnapshot {
    saved: bool,
    css: Option<String>,
}

impl SettingsSnapshot {
    pub fn new(saved: bool, css: Option<String>) -> Self {
        Self { saved, css }
    }

    /// Whether any configuration has ever been saved.
    pub fn has_saved_settings(&self) -> bool {
        self.saved
    }

    /// The stored generated CSS, if it resolves to non-empty content.
    pub fn css_payload(&self) -> Option<&str> {
        self.css.as_deref().filter(|css| !css.trim().is_empty())
    }
}

/// Source of settings snapshots. Implementations must produce the whole
/// snapshot from one consistent read of the underlying store.
pub trait SettingsStore {
    fn snapshot(&self) -> Result<SettingsSnapshot, SettingsError>;
}

// ---------------------------------------------------------------------------
// JSON file store
// ---------------------------------------------------------------------------

/// On-disk store layout. The companion writes this file; we only read it.
#[derive(Debug, Default, Serialize, Deserialize)]
struct StoreFile {
    #[serde(default)]
    version: u32,
    #[serde(default)]
    core_active: bool,
    #[serde(default)]
    settings: serde_json::Map<String, serde_json::Value>,
    #[serde(default)]
    generated_css: Option<String>,
}

/// Settings store backed by a single JSON file.
///
/// A missing file is an empty store (nothing saved yet), not an error;
/// unreadable or unparseable content is.
#[derive(Debug, Clone)]
pub struct JsonSettingsStore {
    path: PathBuf,
}

impl JsonSettingsStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read(&self) -> Result<StoreFile, SettingsError> {
        if !self.path.exists() {
            return Ok(StoreFile::default());
        }
        let raw = std::fs::read_to_string(&self.path)
            .map_err(|e| SettingsError::ReadError(format!("{}: {e}", self.path.display())))?;
        let file: StoreFile = serde_json::from_str(&raw)
            .map_err(|e| SettingsError::ParseError(e.to_string()))?;
        if file.version != 0 && file.version != 1 {
            return Err(SettingsError::UnsupportedVersion(file.version));
        }
        Ok(file)
    }
}

impl SettingsStore for JsonSettingsStore {
    fn snapshot(&self) -> Result<SettingsSnapshot, SettingsError> {
        let file = self.read()?;
        Ok(SettingsSnapshot::new(
            !file.settings.is_empty(),
            file.generated_css,
        ))
    }
}

impl CompanionProbe for JsonSettingsStore {
    /// The companion marks itself active in the store; an unreadable store
    /// reports inactive rather than guessing.
    fn companion_active(&self) -> bool {
        self.read().map(|file| file.core_active).unwrap_or(false)
    }
}

/// Platform default location of the settings store file.
///
/// On Linux: `~/.local/share/palette-pro/settings.json`.
pub fn default_store_path() -> Result<PathBuf, SettingsError> {
    let data_dir = dirs::data_dir().ok_or_else(|| {
        SettingsError::ReadError("could not determine data directory".into())
    })?;
    Ok(data_dir.join("palette-pro").join("settings.json"))
}
