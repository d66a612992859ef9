//! # setguard - Settings Validation Registry
//!
//! Guards a device-settings restore path: every key a backup may carry is bound
//! to a validation rule, and restored values are screened against those rules
//! before they reach the settings store.
//!
//! ## Features
//!
//! - **Validator Catalog**: Booleans, integer and float ranges, discrete sets,
//!   component and package names, URIs, locales, colors and more
//! - **Registries**: One immutable key → validator map per namespace
//!   (`system`, `global`, `secure`), safe to share across threads
//! - **Completeness Check**: A test-time gate that fails when a backed-up key
//!   has no validator, naming every offender
//! - **Restore Pipeline**: Filters restored pairs, keeps the ones that pass
//!   and reports the rest as diagnostics
//! - **Definition Files**: Load registries and backup lists from JSON (or TOML
//!   with the `toml` feature)
//!
//! ## Quick Start
//!
//! ```rust
//! use setguard::{validators, Namespace, RestorePipeline, Validator, ValidatorRegistry};
//!
//! let registry = ValidatorRegistry::from_entries(
//!     Namespace::System,
//!     validators! {
//!         "volume_ring" => Validator::integer_range(0, 7),
//!         "haptic_feedback_enabled" => Validator::Boolean,
//!     },
//! )?;
//!
//! let outcome = RestorePipeline::new(&registry).run([
//!     ("volume_ring", "5"),
//!     ("volume_ring", "9"),
//!     ("unknown_key", "x"),
//! ]);
//!
//! assert_eq!(outcome.accepted.len(), 1);
//! assert_eq!(outcome.diagnostics.len(), 2);
//! # Ok::<(), setguard::Error>(())
//! ```
//!
//! ## Completeness
//!
//! Run the check from a test so a key added to a backup list without a
//! validator breaks the build:
//!
//! ```rust
//! use setguard::{builtin, check_all};
//!
//! let registries = builtin::registries()?;
//! for report in check_all(&builtin::all_backup_keys(), &registries) {
//!     report.into_result()?;
//! }
//! # Ok::<(), setguard::Error>(())
//! ```
//!
//! ## Restore Options
//!
//! ```rust
//! use setguard::{builtin, MemoryStore, Namespace, RestoreOptions, RestorePipeline, UnknownKeyPolicy};
//!
//! let registry = builtin::registry(Namespace::Global)?;
//! let pipeline = RestorePipeline::with_options(
//!     &registry,
//!     RestoreOptions::new()
//!         .unknown_keys(UnknownKeyPolicy::PassThrough)
//!         .max_value_len(1024),
//! );
//!
//! let mut store = MemoryStore::new();
//! let outcome = pipeline.run_into([("auto_time", "1"), ("vendor_flag", "on")], &mut store)?;
//!
//! assert_eq!(outcome.accepted.len(), 2);
//! assert_eq!(store.get(Namespace::Global, "vendor_flag"), Some("on"));
//! # Ok::<(), setguard::Error>(())
//! ```

// Core modules
mod docs;
mod error;
pub mod backup_keys;
pub mod completeness;
pub mod registry;
pub mod restore;
pub mod storage;

// Grouped modules
pub mod config;
pub mod validators;

// Stock definitions
pub mod builtin;

// Re-exports from core
pub use backup_keys::BackupKeys;
pub use completeness::{check_all, check_completeness, CompletenessReport};
pub use docs::{generate_catalog_docs, generate_docs, DocsConfig};
pub use error::{Error, Result};
pub use registry::{NamespaceRegistries, RegistryBuilder, ValidatorRegistry};
pub use restore::{
    Diagnostic, DiagnosticKind, MemoryStore, RestoreEntry, RestoreOutcome, RestorePipeline,
    SettingsSink,
};
pub use storage::{
    load_definition, DefinitionFormat, JsonFormat, NamespaceDefinition, ValidatorEntry,
};

#[cfg(feature = "toml")]
pub use storage::TomlFormat;

// Re-exports from config
pub use config::{Namespace, RestoreOptions, UnknownKeyPolicy, DEFAULT_MAX_VALUE_LEN};

// Re-exports from validators
pub use validators::{Validator, MAX_IPV6_LEN};
