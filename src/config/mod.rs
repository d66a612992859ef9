//! Core configuration types
//!
//! This module contains the foundational types shared by the registry and the
//! restore pipeline:
//! - `Namespace` - The configuration scope a key belongs to
//! - `RestoreOptions` - Policy knobs for the restore validation pipeline

mod namespace;
mod options;

pub use namespace::Namespace;
pub use options::{DEFAULT_MAX_VALUE_LEN, RestoreOptions, UnknownKeyPolicy};
