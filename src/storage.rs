//! Definition files: registry source lists and backup key lists on disk
//!
//! A definition file describes one namespace:
//!
//! ```json
//! {
//!   "namespace": "system",
//!   "backup": ["volume_ring"],
//!   "legacy": [],
//!   "validators": [
//!     { "key": "volume_ring", "validator": { "type": "inclusive_integer_range", "min": 0, "max": 7 } }
//!   ]
//! }
//! ```
//!
//! Validators are a list rather than a map so that a key written twice reaches
//! the registry builder and fails there instead of being merged by the parser.

use crate::backup_keys::BackupKeys;
use crate::config::Namespace;
use crate::error::{Error, Result};
use crate::registry::ValidatorRegistry;
use crate::validators::Validator;
use serde::{Deserialize, Serialize, de::DeserializeOwned};
use std::path::Path;

/// Trait for definition file formats
pub trait DefinitionFormat {
    /// File extension for this format (e.g., "json", "toml")
    fn extension(&self) -> &str;

    /// Serialize data to string
    ///
    /// # Errors
    ///
    /// Returns an error if `data` cannot be represented in this format.
    fn serialize<T: Serialize>(&self, data: &T) -> Result<String>;

    /// Deserialize data from string
    ///
    /// # Errors
    ///
    /// Returns an error if `content` is malformed.
    fn deserialize<T: DeserializeOwned>(&self, content: &str) -> Result<T>;

    /// Read and deserialize from file
    ///
    /// # Errors
    ///
    /// Returns `Error::FileRead` if the file cannot be read, or a parse error.
    fn read<T: DeserializeOwned>(&self, path: &Path) -> Result<T> {
        let content = std::fs::read_to_string(path).map_err(|e| Error::FileRead {
            path: path.to_path_buf(),
            source: e,
        })?;
        self.deserialize(&content)
    }
}

// =============================================================================
// JSON Format
// =============================================================================

/// JSON definitions (default)
#[derive(Debug, Clone, Default)]
pub struct JsonFormat {
    pretty: bool,
}

impl JsonFormat {
    /// JSON with pretty printing
    #[must_use]
    pub fn new() -> Self {
        Self { pretty: true }
    }

    /// Compact JSON
    #[must_use]
    pub fn compact() -> Self {
        Self { pretty: false }
    }
}

impl DefinitionFormat for JsonFormat {
    fn extension(&self) -> &str {
        "json"
    }

    fn serialize<T: Serialize>(&self, data: &T) -> Result<String> {
        if self.pretty {
            serde_json::to_string_pretty(data).map_err(Error::from)
        } else {
            serde_json::to_string(data).map_err(Error::from)
        }
    }

    fn deserialize<T: DeserializeOwned>(&self, content: &str) -> Result<T> {
        serde_json::from_str(content).map_err(Error::from)
    }
}

// =============================================================================
// TOML Format
// =============================================================================

/// TOML definitions (requires the `toml` feature)
#[cfg(feature = "toml")]
#[derive(Debug, Clone, Default)]
pub struct TomlFormat;

#[cfg(feature = "toml")]
impl DefinitionFormat for TomlFormat {
    fn extension(&self) -> &str {
        "toml"
    }

    fn serialize<T: Serialize>(&self, data: &T) -> Result<String> {
        toml::to_string_pretty(data).map_err(|e| Error::Parse(format!("TOML serialize: {e}")))
    }

    fn deserialize<T: DeserializeOwned>(&self, content: &str) -> Result<T> {
        toml::from_str(content).map_err(|e| Error::Parse(e.to_string()))
    }
}

// =============================================================================
// Namespace definitions
// =============================================================================

/// One `(key, validator)` pair of a registry source list
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidatorEntry {
    pub key: String,
    pub validator: Validator,
}

/// Everything a definition file says about one namespace
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NamespaceDefinition {
    pub namespace: Namespace,

    #[serde(default)]
    pub backup: Vec<String>,

    #[serde(default)]
    pub legacy: Vec<String>,

    #[serde(default)]
    pub validators: Vec<ValidatorEntry>,
}

impl NamespaceDefinition {
    /// Describe an existing registry and its key lists
    ///
    /// Validators are written in key order so exported files diff cleanly.
    ///
    /// # Errors
    ///
    /// Returns `Error::NamespaceMismatch` if `keys` belong to another
    /// namespace than `registry`.
    pub fn from_parts(registry: &ValidatorRegistry, keys: &BackupKeys) -> Result<Self> {
        if keys.namespace != registry.namespace() {
            return Err(Error::NamespaceMismatch {
                expected: registry.namespace(),
                found: keys.namespace,
            });
        }

        let validators = registry
            .keys()
            .into_iter()
            .filter_map(|key| {
                registry.get(key).map(|validator| ValidatorEntry {
                    key: key.to_string(),
                    validator: validator.clone(),
                })
            })
            .collect();

        Ok(Self {
            namespace: registry.namespace(),
            backup: keys.backup.clone(),
            legacy: keys.legacy.clone(),
            validators,
        })
    }

    /// Backup and legacy lists of this definition
    #[must_use]
    pub fn backup_keys(&self) -> BackupKeys {
        BackupKeys::new(self.namespace)
            .backup(self.backup.iter().cloned())
            .legacy(self.legacy.iter().cloned())
    }

    /// Build the registry described by this definition
    ///
    /// # Errors
    ///
    /// Returns the registry builder's error on duplicate keys or bad rules.
    pub fn registry(&self) -> Result<ValidatorRegistry> {
        ValidatorRegistry::from_entries(
            self.namespace,
            self.validators
                .iter()
                .map(|e| (e.key.clone(), e.validator.clone())),
        )
    }

    /// Split into a registry and its key lists
    ///
    /// # Errors
    ///
    /// Returns the registry builder's error on duplicate keys or bad rules.
    pub fn into_parts(self) -> Result<(ValidatorRegistry, BackupKeys)> {
        let keys = BackupKeys::new(self.namespace)
            .backup(self.backup)
            .legacy(self.legacy);
        let registry = ValidatorRegistry::from_entries(
            self.namespace,
            self.validators.into_iter().map(|e| (e.key, e.validator)),
        )?;
        Ok((registry, keys))
    }
}

/// Load a namespace definition, choosing the format from the file extension
///
/// # Errors
///
/// Returns `Error::UnsupportedFormat` for unknown extensions (or `.toml`
/// without the `toml` feature), `Error::FileRead` if the file cannot be read,
/// and a parse error for malformed content.
pub fn load_definition(path: &Path) -> Result<NamespaceDefinition> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or_default();

    match ext {
        "json" => JsonFormat::new().read(path),
        #[cfg(feature = "toml")]
        "toml" => TomlFormat.read(path),
        other => Err(Error::UnsupportedFormat(format!(
            "'{}' (extension '{other}')",
            path.display()
        ))),
    }
}

// =============================================================================
// Tests
// =============================================================================
