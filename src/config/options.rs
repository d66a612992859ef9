//! Restore pipeline options

use serde::{Deserialize, Serialize};

/// Values longer than this are rejected before any validator runs (64 KiB)
pub const DEFAULT_MAX_VALUE_LEN: usize = 64 * 1024;

/// What the restore pipeline does with a key that has no validator
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UnknownKeyPolicy {
    /// Drop the pair and record an `unvalidated-key` diagnostic
    #[default]
    Reject,
    /// Forward the pair unchecked and still record the diagnostic.
    ///
    /// Only for transports that must carry keys introduced by newer releases.
    PassThrough,
}

/// Options for validating a restore stream
///
/// # Example
/// ```rust
/// use setguard::{RestoreOptions, UnknownKeyPolicy};
///
/// let options = RestoreOptions::new()
///     .unknown_keys(UnknownKeyPolicy::PassThrough)
///     .max_value_len(4096)
///     .dry_run(true);
///
/// assert!(options.dry_run);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RestoreOptions {
    /// Handling of keys missing from the registry
    pub unknown_key_policy: UnknownKeyPolicy,

    /// Validate only; never forward anything to a sink
    pub dry_run: bool,

    /// Upper bound on value length in bytes
    pub max_value_len: usize,
}

impl Default for RestoreOptions {
    fn default() -> Self {
        Self {
            unknown_key_policy: UnknownKeyPolicy::Reject,
            dry_run: false,
            max_value_len: DEFAULT_MAX_VALUE_LEN,
        }
    }
}

impl RestoreOptions {
    /// Create options with the default reject-unknown policy
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the unknown key policy
    #[must_use]
    pub fn unknown_keys(mut self, policy: UnknownKeyPolicy) -> Self {
        self.unknown_key_policy = policy;
        self
    }

    /// Enable dry run mode (validate without forwarding)
    #[must_use]
    pub fn dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    /// Set the maximum accepted value length in bytes
    #[must_use]
    pub fn max_value_len(mut self, len: usize) -> Self {
        self.max_value_len = len;
        self
    }
}
