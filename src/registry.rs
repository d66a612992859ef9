//! Per-namespace validator registries
//!
//! A [`ValidatorRegistry`] maps every known key of one [`Namespace`] to exactly
//! one [`Validator`]. It is built once and never changes afterwards, so it can
//! be shared across threads by reference or `Arc` without locking.
//!
//! ```rust
//! use setguard::{Namespace, Validator, ValidatorRegistry};
//!
//! let registry = ValidatorRegistry::builder(Namespace::System)
//!     .with("screen_brightness", Validator::integer_range(0, 255))
//!     .with("haptic_feedback_enabled", Validator::Boolean)
//!     .build()?;
//!
//! assert!(registry.get("screen_brightness").is_some());
//! assert!(registry.get("SCREEN_BRIGHTNESS").is_none());
//! # Ok::<(), setguard::Error>(())
//! ```

use crate::config::Namespace;
use crate::error::{Error, Result};
use crate::validators::Validator;
use log::debug;
use std::collections::HashMap;

/// Immutable key → validator map for one namespace
#[derive(Debug, Clone, PartialEq)]
pub struct ValidatorRegistry {
    namespace: Namespace,
    validators: HashMap<String, Validator>,
}

impl ValidatorRegistry {
    /// Start building a registry for `namespace`
    #[must_use]
    pub fn builder(namespace: Namespace) -> RegistryBuilder {
        RegistryBuilder::new(namespace)
    }

    /// Build a registry from a source list of `(key, validator)` pairs
    ///
    /// # Errors
    ///
    /// Returns `Error::DuplicateValidator` if a key appears twice and
    /// `Error::InvalidValidatorDefinition` if a rule is ill-formed.
    pub fn from_entries<I, K>(namespace: Namespace, entries: I) -> Result<Self>
    where
        I: IntoIterator<Item = (K, Validator)>,
        K: Into<String>,
    {
        RegistryBuilder::new(namespace).extend(entries).build()
    }

    /// Namespace this registry belongs to
    #[must_use]
    pub fn namespace(&self) -> Namespace {
        self.namespace
    }

    /// Look up the validator bound to `key`
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Validator> {
        self.validators.get(key)
    }

    /// Check if `key` has a validator
    #[must_use]
    pub fn contains(&self, key: &str) -> bool {
        self.validators.contains_key(key)
    }

    /// Number of keys with a validator
    #[must_use]
    pub fn len(&self) -> usize {
        self.validators.len()
    }

    /// Check if the registry binds no keys
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.validators.is_empty()
    }

    /// All bound keys, sorted
    #[must_use]
    pub fn keys(&self) -> Vec<&str> {
        let mut keys: Vec<&str> = self.validators.keys().map(String::as_str).collect();
        keys.sort_unstable();
        keys
    }

    /// Iterate over `(key, validator)` pairs in arbitrary order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Validator)> {
        self.validators.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Validate `value` for `key`, or `None` when the key is unknown
    #[must_use]
    pub fn validate(&self, key: &str, value: &str) -> Option<bool> {
        self.get(key).map(|validator| validator.validate(value))
    }
}

// =============================================================================
// Builder
// =============================================================================

/// Builder for a [`ValidatorRegistry`]
///
/// Entries are collected first and checked in [`build`](Self::build), so a
/// registry either comes out complete and unambiguous or not at all.
#[derive(Debug, Clone)]
pub struct RegistryBuilder {
    namespace: Namespace,
    entries: Vec<(String, Validator)>,
}

impl RegistryBuilder {
    /// Create an empty builder
    #[must_use]
    pub fn new(namespace: Namespace) -> Self {
        Self {
            namespace,
            entries: Vec::new(),
        }
    }

    /// Bind `key` to `validator`
    #[must_use]
    pub fn with(mut self, key: impl Into<String>, validator: Validator) -> Self {
        self.entries.push((key.into(), validator));
        self
    }

    /// Bind every pair of a source list
    #[must_use]
    pub fn extend<I, K>(mut self, entries: I) -> Self
    where
        I: IntoIterator<Item = (K, Validator)>,
        K: Into<String>,
    {
        self.entries
            .extend(entries.into_iter().map(|(k, v)| (k.into(), v)));
        self
    }

    /// Build the registry
    ///
    /// # Errors
    ///
    /// Returns `Error::DuplicateValidator` on the first key bound twice, or
    /// `Error::InvalidValidatorDefinition` on the first ill-formed rule.
    pub fn build(self) -> Result<ValidatorRegistry> {
        let mut validators = HashMap::with_capacity(self.entries.len());

        for (key, validator) in self.entries {
            validator
                .check_definition()
                .map_err(|reason| Error::InvalidValidatorDefinition {
                    key: key.clone(),
                    reason,
                })?;

            if validators.contains_key(&key) {
                return Err(Error::DuplicateValidator {
                    namespace: self.namespace,
                    key,
                });
            }
            validators.insert(key, validator);
        }

        debug!(
            "Built {} validator registry with {} keys",
            self.namespace,
            validators.len()
        );

        Ok(ValidatorRegistry {
            namespace: self.namespace,
            validators,
        })
    }
}

// =============================================================================
// Registries for every namespace
// =============================================================================

/// One registry per namespace
#[derive(Debug, Clone, PartialEq)]
pub struct NamespaceRegistries {
    system: ValidatorRegistry,
    global: ValidatorRegistry,
    secure: ValidatorRegistry,
}

impl NamespaceRegistries {
    /// Group three registries, checking each is filed under its own namespace
    ///
    /// # Errors
    ///
    /// Returns `Error::NamespaceMismatch` if a registry was built for a
    /// different namespace than the slot it is passed in.
    pub fn new(
        system: ValidatorRegistry,
        global: ValidatorRegistry,
        secure: ValidatorRegistry,
    ) -> Result<Self> {
        for (expected, registry) in [
            (Namespace::System, &system),
            (Namespace::Global, &global),
            (Namespace::Secure, &secure),
        ] {
            if registry.namespace() != expected {
                return Err(Error::NamespaceMismatch {
                    expected,
                    found: registry.namespace(),
                });
            }
        }

        Ok(Self {
            system,
            global,
            secure,
        })
    }

    /// Registry for `namespace`
    #[must_use]
    pub fn get(&self, namespace: Namespace) -> &ValidatorRegistry {
        match namespace {
            Namespace::System => &self.system,
            Namespace::Global => &self.global,
            Namespace::Secure => &self.secure,
        }
    }

    /// Iterate over every registry in [`Namespace::ALL`] order
    pub fn iter(&self) -> impl Iterator<Item = &ValidatorRegistry> {
        Namespace::ALL.into_iter().map(|ns| self.get(ns))
    }
}

/// Macro for spelling a registry source list
///
/// Expands to a `Vec<(String, Validator)>` ready for
/// [`ValidatorRegistry::from_entries`].
///
/// # Example
/// ```rust
/// use setguard::{validators, Namespace, Validator, ValidatorRegistry};
///
/// let registry = ValidatorRegistry::from_entries(
///     Namespace::Secure,
///     validators! {
///         "accessibility_enabled" => Validator::Boolean,
///         "default_input_method" => Validator::NullableComponentName,
///     },
/// )?;
/// assert_eq!(registry.len(), 2);
/// # Ok::<(), setguard::Error>(())
/// ```
#[macro_export]
macro_rules! validators {
    ($($key:expr => $value:expr),* $(,)?) => {{
        let entries: Vec<(String, $crate::Validator)> = vec![
            $(($key.to_string(), $value)),*
        ];
        entries
    }};
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_send_sync<T: Send + Sync>() {}

    #[test]
    fn test_registry_is_shareable() {
        assert_send_sync::<ValidatorRegistry>();
        assert_send_sync::<NamespaceRegistries>();
    }

    #[test]
    fn test_lookup() {
        let registry = ValidatorRegistry::builder(Namespace::System)
            .with("vol", Validator::integer_range(0, 15))
            .with("dim", Validator::Boolean)
            .build()
            .unwrap();

        assert_eq!(registry.namespace(), Namespace::System);
        assert_eq!(registry.len(), 2);
        assert_eq!(registry.get("vol"), Some(&Validator::integer_range(0, 15)));
        assert!(registry.get("Vol").is_none());
        assert_eq!(registry.keys(), vec!["dim", "vol"]);
        assert_eq!(registry.validate("vol", "5"), Some(true));
        assert_eq!(registry.validate("vol", "16"), Some(false));
        assert_eq!(registry.validate("nope", "1"), None);
    }

    #[test]
    fn test_duplicate_key_fails_construction() {
        let result = ValidatorRegistry::from_entries(
            Namespace::Global,
            validators! {
                "a" => Validator::Boolean,
                "b" => Validator::AnyString,
                "a" => Validator::AnyString,
            },
        );

        match result {
            Err(Error::DuplicateValidator { namespace, key }) => {
                assert_eq!(namespace, Namespace::Global);
                assert_eq!(key, "a");
            }
            other => panic!("expected duplicate error, got {other:?}"),
        }
    }

    #[test]
    fn test_invalid_definition_fails_construction() {
        let result = ValidatorRegistry::builder(Namespace::Secure)
            .with("range", Validator::integer_range(10, 1))
            .build();

        assert!(matches!(
            result,
            Err(Error::InvalidValidatorDefinition { ref key, .. }) if key == "range"
        ));
    }

    #[test]
    fn test_empty_registry() {
        let registry = ValidatorRegistry::from_entries(Namespace::System, validators! {}).unwrap();

        assert!(registry.is_empty());
        assert!(registry.get("").is_none());
    }

    #[test]
    fn test_namespace_registries_reject_misfiled_registry() {
        let system = ValidatorRegistry::builder(Namespace::System).build().unwrap();
        let global = ValidatorRegistry::builder(Namespace::Global).build().unwrap();
        let secure = ValidatorRegistry::builder(Namespace::Secure).build().unwrap();

        let err = NamespaceRegistries::new(system.clone(), secure.clone(), global.clone())
            .unwrap_err();
        assert!(matches!(
            err,
            Error::NamespaceMismatch {
                expected: Namespace::Global,
                found: Namespace::Secure
            }
        ));

        let all = NamespaceRegistries::new(system, global, secure).unwrap();
        let order: Vec<Namespace> = all.iter().map(ValidatorRegistry::namespace).collect();
        assert_eq!(order, Namespace::ALL.to_vec());
    }
}
