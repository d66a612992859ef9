//! Common test utilities for setguard integration tests
//!
//! Provides shared registries, key lists and restore streams.

#![allow(dead_code)]

use setguard::{validators, BackupKeys, Namespace, RestoreEntry, Validator, ValidatorRegistry};
use std::path::PathBuf;
use tempfile::TempDir;

/// Route `log` output through the test harness (`RUST_LOG=debug cargo test`)
pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

// =============================================================================
// Test Registry
// =============================================================================

/// A small system registry covering the common rule kinds
pub fn system_registry() -> ValidatorRegistry {
    ValidatorRegistry::from_entries(
        Namespace::System,
        validators! {
            "vol" => Validator::integer_range(0, 15),
            "screen_brightness" => Validator::integer_range(0, 255),
            "haptic_feedback_enabled" => Validator::Boolean,
            "font_scale" => Validator::float_range(0.85, 1.3),
            "ringtone" => Validator::Uri,
            "time_12_24" => Validator::discrete(["12", "24"]),
            "date_format" => Validator::AnyString,
        },
    )
    .unwrap()
}

/// Key lists that `system_registry` fully covers
pub fn system_keys() -> BackupKeys {
    BackupKeys::new(Namespace::System)
        .backup(["vol", "screen_brightness", "haptic_feedback_enabled", "font_scale"])
        .legacy(["ringtone", "time_12_24"])
}

/// A restore stream mixing good, bad and unknown pairs
pub fn mixed_stream() -> Vec<RestoreEntry> {
    vec![
        RestoreEntry::new("vol", "5"),
        RestoreEntry::new("vol", "nine"),
        RestoreEntry::new("unknownKey", "x"),
        RestoreEntry::new("haptic_feedback_enabled", "1"),
        RestoreEntry::new("font_scale", "2.0"),
        RestoreEntry::new("ringtone", "content://media/internal/audio/media/12"),
        RestoreEntry::absent("date_format"),
        RestoreEntry::absent("screen_brightness"),
    ]
}

// =============================================================================
// Definition File Fixture
// =============================================================================

/// Temp directory for definition files, removed on drop
pub struct DefinitionDir {
    pub temp_dir: TempDir,
}

impl DefinitionDir {
    pub fn new() -> Self {
        Self {
            temp_dir: TempDir::new().unwrap(),
        }
    }

    /// Write `content` to `name` inside the directory and return its path
    pub fn write(&self, name: &str, content: &str) -> PathBuf {
        let path = self.temp_dir.path().join(name);
        std::fs::write(&path, content).unwrap();
        path
    }
}
