//! Completeness check: every restorable key must have a validator
//!
//! This is a build/test gate rather than a runtime path. Run it from a test
//! against the shipped registries so a key added to a backup list without a
//! validator fails CI with the full list of gaps.
//!
//! ```rust
//! use setguard::{check_completeness, BackupKeys, Namespace, Validator, ValidatorRegistry};
//!
//! let registry = ValidatorRegistry::builder(Namespace::System)
//!     .with("a", Validator::Boolean)
//!     .with("b", Validator::AnyString)
//!     .build()?;
//! let keys = BackupKeys::new(Namespace::System).backup(["a", "b"]).legacy(["c"]);
//!
//! let report = check_completeness(&keys, &registry)?;
//! assert_eq!(report.offenders, vec!["c".to_string()]);
//! assert!(report.into_result().unwrap_err().to_string().contains("c"));
//! # Ok::<(), setguard::Error>(())
//! ```

use crate::backup_keys::BackupKeys;
use crate::config::Namespace;
use crate::error::{Error, Result};
use crate::registry::{NamespaceRegistries, ValidatorRegistry};

/// Outcome of checking one namespace
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompletenessReport {
    /// Namespace that was checked
    pub namespace: Namespace,

    /// Keys without a validator, in backup-then-legacy order
    pub offenders: Vec<String>,

    /// Number of keys examined
    pub checked: usize,
}

impl CompletenessReport {
    /// Check if every key had a validator
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.offenders.is_empty()
    }

    /// Turn a gap into an error naming every offender
    ///
    /// # Errors
    ///
    /// Returns `Error::MissingValidators` if any offender was found.
    pub fn into_result(self) -> Result<()> {
        if self.is_complete() {
            Ok(())
        } else {
            Err(Error::MissingValidators {
                namespace: self.namespace,
                offenders: self.offenders,
            })
        }
    }
}

/// Find every backup or legacy key of `keys` that `registry` cannot validate
///
/// The registry is consulted for each listed key in order; the scan never
/// stops early. A key listed twice is reported twice.
///
/// # Errors
///
/// Returns `Error::NamespaceMismatch` if `registry` belongs to another
/// namespace than `keys`.
pub fn check_completeness(
    keys: &BackupKeys,
    registry: &ValidatorRegistry,
) -> Result<CompletenessReport> {
    if keys.namespace != registry.namespace() {
        return Err(Error::NamespaceMismatch {
            expected: keys.namespace,
            found: registry.namespace(),
        });
    }
    Ok(collect_offenders(keys, registry))
}

/// Run [`check_completeness`] for each key set against its namespace's registry
#[must_use]
pub fn check_all(keys: &[BackupKeys], registries: &NamespaceRegistries) -> Vec<CompletenessReport> {
    keys.iter()
        .map(|k| collect_offenders(k, registries.get(k.namespace)))
        .collect()
}

fn collect_offenders(keys: &BackupKeys, registry: &ValidatorRegistry) -> CompletenessReport {
    let offenders = keys
        .restorable()
        .filter(|key| registry.get(key).is_none())
        .map(str::to_string)
        .collect();

    CompletenessReport {
        namespace: keys.namespace,
        offenders,
        checked: keys.len(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validators::Validator;

    fn registry() -> ValidatorRegistry {
        ValidatorRegistry::builder(Namespace::System)
            .with("a", Validator::Boolean)
            .with("b", Validator::AnyString)
            .build()
            .unwrap()
    }

    #[test]
    fn test_complete_lists() {
        let keys = BackupKeys::new(Namespace::System).backup(["a", "b"]);
        let report = check_completeness(&keys, &registry()).unwrap();

        assert!(report.is_complete());
        assert_eq!(report.checked, 2);
        assert!(report.into_result().is_ok());
    }

    #[test]
    fn test_reports_every_offender_in_order() {
        let keys = BackupKeys::new(Namespace::System)
            .backup(["z", "a", "y"])
            .legacy(["b", "x"]);
        let report = check_completeness(&keys, &registry()).unwrap();

        assert_eq!(report.offenders, vec!["z", "y", "x"]);
        assert_eq!(report.checked, 5);
    }

    #[test]
    fn test_duplicate_offender_reported_per_occurrence() {
        let keys = BackupKeys::new(Namespace::System)
            .backup(["gone"])
            .legacy(["gone"]);
        let report = check_completeness(&keys, &registry()).unwrap();

        assert_eq!(report.offenders, vec!["gone", "gone"]);
    }

    #[test]
    fn test_empty_lists_are_complete() {
        let keys = BackupKeys::new(Namespace::System);
        assert!(check_completeness(&keys, &registry()).unwrap().is_complete());
    }

    #[test]
    fn test_key_lookup_is_case_sensitive() {
        let keys = BackupKeys::new(Namespace::System).backup(["A"]);
        let report = check_completeness(&keys, &registry()).unwrap();

        assert_eq!(report.offenders, vec!["A"]);
    }

    #[test]
    fn test_registry_of_other_namespace_is_rejected() {
        let keys = BackupKeys::new(Namespace::Global).backup(["a"]);
        let err = check_completeness(&keys, &registry()).unwrap_err();

        assert!(matches!(
            err,
            Error::NamespaceMismatch {
                expected: Namespace::Global,
                found: Namespace::System,
            }
        ));
    }
}
