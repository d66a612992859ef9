//! Backup key lists

use crate::config::Namespace;
use serde::{Deserialize, Serialize};

/// Keys a namespace includes in new backups, plus keys only honored on restore
///
/// The lists are owned by whoever decides the backup policy. Order carries no
/// meaning beyond keeping diagnostics readable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BackupKeys {
    /// Namespace the keys belong to
    pub namespace: Namespace,

    /// Keys captured by new backups
    #[serde(default)]
    pub backup: Vec<String>,

    /// Keys from older backups still accepted on restore
    #[serde(default)]
    pub legacy: Vec<String>,
}

impl BackupKeys {
    /// Create empty lists for `namespace`
    #[must_use]
    pub fn new(namespace: Namespace) -> Self {
        Self {
            namespace,
            backup: Vec::new(),
            legacy: Vec::new(),
        }
    }

    /// Set the keys captured by new backups
    #[must_use]
    pub fn backup<I, S>(mut self, keys: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.backup = keys.into_iter().map(Into::into).collect();
        self
    }

    /// Set the legacy restore-only keys
    #[must_use]
    pub fn legacy<I, S>(mut self, keys: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.legacy = keys.into_iter().map(Into::into).collect();
        self
    }

    /// Backup keys followed by legacy keys
    pub fn restorable(&self) -> impl Iterator<Item = &str> {
        self.backup
            .iter()
            .chain(self.legacy.iter())
            .map(String::as_str)
    }

    /// Total number of listed keys, duplicates included
    #[must_use]
    pub fn len(&self) -> usize {
        self.backup.len() + self.legacy.len()
    }

    /// Check if both lists are empty
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.backup.is_empty() && self.legacy.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_restorable_keeps_backup_then_legacy_order() {
        let keys = BackupKeys::new(Namespace::System)
            .backup(["b", "a"])
            .legacy(["c"]);

        let all: Vec<&str> = keys.restorable().collect();
        assert_eq!(all, vec!["b", "a", "c"]);
        assert_eq!(keys.len(), 3);
    }

    #[test]
    fn test_missing_legacy_list_deserializes_empty() {
        let keys: BackupKeys =
            serde_json::from_str(r#"{"namespace": "global", "backup": ["x"]}"#).unwrap();

        assert_eq!(keys.namespace, Namespace::Global);
        assert!(keys.legacy.is_empty());
        assert!(!keys.is_empty());
    }
}
