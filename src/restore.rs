//! Restore validation pipeline
//!
//! Filters a restore stream of `(key, value)` pairs through a namespace's
//! [`ValidatorRegistry`]. Pairs that pass are kept in stream order; every
//! rejected pair leaves a [`Diagnostic`] behind. A bad pair never stops the
//! pass.
//!
//! ```rust
//! use setguard::{Namespace, RestoreEntry, RestorePipeline, Validator, ValidatorRegistry};
//!
//! let registry = ValidatorRegistry::builder(Namespace::System)
//!     .with("vol", Validator::integer_range(0, 15))
//!     .build()?;
//!
//! let outcome = RestorePipeline::new(&registry).run([
//!     RestoreEntry::new("vol", "5"),
//!     RestoreEntry::new("vol", "nine"),
//!     RestoreEntry::new("unknownKey", "x"),
//! ]);
//!
//! assert_eq!(outcome.accepted, vec![RestoreEntry::new("vol", "5")]);
//! assert_eq!(outcome.diagnostics.len(), 2);
//! # Ok::<(), setguard::Error>(())
//! ```

use crate::config::{Namespace, RestoreOptions, UnknownKeyPolicy};
use crate::error::Result;
use crate::registry::ValidatorRegistry;
use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::fmt;

// =============================================================================
// Stream items
// =============================================================================

/// One `(key, value)` pair from a restore stream
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RestoreEntry {
    /// Setting key
    pub key: String,

    /// Setting value; `None` if the setting was unset on the source device
    pub value: Option<String>,
}

impl RestoreEntry {
    /// Create an entry carrying a value
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: Some(value.into()),
        }
    }

    /// Create an entry for an unset setting
    pub fn absent(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: None,
        }
    }

    /// Borrow the value, if any
    #[must_use]
    pub fn value(&self) -> Option<&str> {
        self.value.as_deref()
    }
}

impl<K: Into<String>, V: Into<String>> From<(K, V)> for RestoreEntry {
    fn from((key, value): (K, V)) -> Self {
        Self::new(key, value)
    }
}

// =============================================================================
// Diagnostics
// =============================================================================

/// Why a pair was flagged
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DiagnosticKind {
    /// No validator is registered for the key
    UnvalidatedKey,
    /// The validator rejected the value
    InvalidValue,
}

impl DiagnosticKind {
    /// Reason tag used in logs and serialized records
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            DiagnosticKind::UnvalidatedKey => "unvalidated-key",
            DiagnosticKind::InvalidValue => "invalid-value",
        }
    }
}

impl fmt::Display for DiagnosticKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Audit record for a flagged pair
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Diagnostic {
    /// Reason tag
    #[serde(rename = "reason")]
    pub kind: DiagnosticKind,

    /// Key of the flagged pair
    pub key: String,

    /// Rejected value (`invalid-value` only)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
}

impl Diagnostic {
    /// Record a key with no validator
    pub fn unvalidated_key(key: impl Into<String>) -> Self {
        Self {
            kind: DiagnosticKind::UnvalidatedKey,
            key: key.into(),
            value: None,
        }
    }

    /// Record a value its validator rejected
    pub fn invalid_value(key: impl Into<String>, value: Option<String>) -> Self {
        Self {
            kind: DiagnosticKind::InvalidValue,
            key: key.into(),
            value,
        }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (&self.kind, &self.value) {
            (DiagnosticKind::InvalidValue, Some(value)) => {
                write!(f, "{}({}, {value})", self.kind, self.key)
            }
            _ => write!(f, "{}({})", self.kind, self.key),
        }
    }
}

// =============================================================================
// Outcome
// =============================================================================

/// Result of passing one restore stream through the pipeline
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RestoreOutcome {
    /// Pairs cleared for the store, in stream order
    pub accepted: Vec<RestoreEntry>,

    /// Flagged pairs, in stream order
    pub diagnostics: Vec<Diagnostic>,

    /// Number of pairs read from the stream
    pub received: usize,

    /// Whether this was a dry run (nothing forwarded to a sink)
    pub is_dry_run: bool,
}

impl RestoreOutcome {
    /// Check if any pair was dropped
    #[must_use]
    pub fn has_rejections(&self) -> bool {
        self.rejected_count() > 0
    }

    /// Number of pairs dropped
    #[must_use]
    pub fn rejected_count(&self) -> usize {
        self.received.saturating_sub(self.accepted.len())
    }

    /// Total number of pairs processed
    #[must_use]
    pub fn total(&self) -> usize {
        self.received
    }

    /// Diagnostics with the given reason
    pub fn diagnostics_of(&self, kind: DiagnosticKind) -> impl Iterator<Item = &Diagnostic> {
        self.diagnostics.iter().filter(move |d| d.kind == kind)
    }
}

// =============================================================================
// Store seam
// =============================================================================

/// Destination for accepted pairs (the live configuration store)
pub trait SettingsSink {
    /// Apply one accepted pair
    ///
    /// # Errors
    ///
    /// Implementations return `Error::Sink` when the store refuses the write.
    fn apply(&mut self, namespace: Namespace, entry: &RestoreEntry) -> Result<()>;
}

impl SettingsSink for Vec<RestoreEntry> {
    fn apply(&mut self, _namespace: Namespace, entry: &RestoreEntry) -> Result<()> {
        self.push(entry.clone());
        Ok(())
    }
}

/// In-memory settings store
///
/// Applying the same pair twice leaves the store unchanged, which makes it a
/// convenient stand-in for a real store when replaying restores.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MemoryStore {
    values: HashMap<Namespace, BTreeMap<String, Option<String>>>,
}

impl MemoryStore {
    /// Create an empty store
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Current value of `key`; `None` if unknown or unset
    #[must_use]
    pub fn get(&self, namespace: Namespace, key: &str) -> Option<&str> {
        self.values
            .get(&namespace)
            .and_then(|ns| ns.get(key))
            .and_then(Option::as_deref)
    }

    /// Check if `key` was ever written, even as unset
    #[must_use]
    pub fn contains(&self, namespace: Namespace, key: &str) -> bool {
        self.values
            .get(&namespace)
            .is_some_and(|ns| ns.contains_key(key))
    }

    /// Number of keys stored in `namespace`
    #[must_use]
    pub fn len(&self, namespace: Namespace) -> usize {
        self.values.get(&namespace).map_or(0, BTreeMap::len)
    }

    /// Check if nothing was stored in any namespace
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.values().all(BTreeMap::is_empty)
    }
}

impl SettingsSink for MemoryStore {
    fn apply(&mut self, namespace: Namespace, entry: &RestoreEntry) -> Result<()> {
        self.values
            .entry(namespace)
            .or_default()
            .insert(entry.key.clone(), entry.value.clone());
        Ok(())
    }
}

// =============================================================================
// Pipeline
// =============================================================================

/// Validates restore streams against one namespace's registry
#[derive(Debug, Clone)]
pub struct RestorePipeline<'a> {
    registry: &'a ValidatorRegistry,
    options: RestoreOptions,
}

impl<'a> RestorePipeline<'a> {
    /// Create a pipeline with default options (unknown keys rejected)
    #[must_use]
    pub fn new(registry: &'a ValidatorRegistry) -> Self {
        Self::with_options(registry, RestoreOptions::default())
    }

    /// Create a pipeline with explicit options
    #[must_use]
    pub fn with_options(registry: &'a ValidatorRegistry, options: RestoreOptions) -> Self {
        Self { registry, options }
    }

    /// Options in effect
    #[must_use]
    pub fn options(&self) -> &RestoreOptions {
        &self.options
    }

    /// Filter a restore stream and collect the accepted pairs
    pub fn run<I, E>(&self, entries: I) -> RestoreOutcome
    where
        I: IntoIterator<Item = E>,
        E: Into<RestoreEntry>,
    {
        let mut outcome = self.start();
        for entry in entries {
            outcome.received += 1;
            if let Some(entry) = self.screen(entry.into(), &mut outcome.diagnostics) {
                outcome.accepted.push(entry);
            }
        }
        self.finish(&outcome);
        outcome
    }

    /// Filter a restore stream and apply each accepted pair to `sink`
    ///
    /// Pairs reach the sink in stream order. In dry run mode the sink is never
    /// touched.
    ///
    /// # Errors
    ///
    /// Returns the sink's error as soon as it refuses a pair; pairs after it
    /// are not processed.
    pub fn run_into<I, E, S>(&self, entries: I, sink: &mut S) -> Result<RestoreOutcome>
    where
        I: IntoIterator<Item = E>,
        E: Into<RestoreEntry>,
        S: SettingsSink + ?Sized,
    {
        let namespace = self.registry.namespace();
        let mut outcome = self.start();
        for entry in entries {
            outcome.received += 1;
            if let Some(entry) = self.screen(entry.into(), &mut outcome.diagnostics) {
                if !self.options.dry_run {
                    sink.apply(namespace, &entry)?;
                }
                outcome.accepted.push(entry);
            }
        }
        self.finish(&outcome);
        Ok(outcome)
    }

    fn mode_str(&self) -> &'static str {
        if self.options.dry_run {
            "[DRY RUN] "
        } else {
            ""
        }
    }

    fn start(&self) -> RestoreOutcome {
        info!(
            "{}Validating restore stream for {} settings",
            self.mode_str(),
            self.registry.namespace()
        );
        RestoreOutcome {
            is_dry_run: self.options.dry_run,
            ..Default::default()
        }
    }

    fn finish(&self, outcome: &RestoreOutcome) {
        info!(
            "{}Restore validation for {} settings complete: {} accepted, {} rejected",
            self.mode_str(),
            self.registry.namespace(),
            outcome.accepted.len(),
            outcome.rejected_count()
        );
    }

    /// Decide one pair; returns it if it should be forwarded
    fn screen(
        &self,
        entry: RestoreEntry,
        diagnostics: &mut Vec<Diagnostic>,
    ) -> Option<RestoreEntry> {
        let namespace = self.registry.namespace();

        if let Some(len) = entry
            .value()
            .map(str::len)
            .filter(|len| *len > self.options.max_value_len)
        {
            warn!(
                "{}Rejecting {namespace} key '{}' ({len} bytes, limit {})",
                self.mode_str(),
                entry.key,
                self.options.max_value_len
            );
            diagnostics.push(Diagnostic::invalid_value(entry.key, entry.value));
            return None;
        }

        let Some(validator) = self.registry.get(&entry.key) else {
            diagnostics.push(Diagnostic::unvalidated_key(entry.key.clone()));
            return match self.options.unknown_key_policy {
                UnknownKeyPolicy::PassThrough => {
                    warn!(
                        "{}Passing through {namespace} key '{}' without validation",
                        self.mode_str(),
                        entry.key
                    );
                    Some(entry)
                }
                UnknownKeyPolicy::Reject => {
                    warn!(
                        "{}Skipping {namespace} key '{}' (no validator)",
                        self.mode_str(),
                        entry.key
                    );
                    None
                }
            };
        };

        if !validator.validate_opt(entry.value()) {
            warn!(
                "{}Rejecting {namespace} key '{}' ({} bytes, expected {validator})",
                self.mode_str(),
                entry.key,
                entry.value().map_or(0, str::len)
            );
            diagnostics.push(Diagnostic::invalid_value(entry.key, entry.value));
            return None;
        }

        debug!("{}Accepted {namespace} key '{}'", self.mode_str(), entry.key);
        Some(entry)
    }
}

// =============================================================================
// Tests
// =============================================================================
