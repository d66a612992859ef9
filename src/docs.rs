//! Documentation generator for validator registries
//!
//! Renders markdown reference tables from a [`ValidatorRegistry`] and,
//! optionally, the backup lists of its namespace.

use crate::backup_keys::BackupKeys;
use crate::completeness::check_completeness;
use crate::registry::{NamespaceRegistries, ValidatorRegistry};
use std::collections::HashSet;
use std::fmt::Write;

/// Configuration for docs generation
#[derive(Debug, Clone, Default)]
pub struct DocsConfig {
    /// Title for the documentation
    pub title: Option<String>,
    /// Description/introduction text
    pub description: Option<String>,
    /// Whether to list keys that are in no backup list
    pub show_unlisted: bool,
}

impl DocsConfig {
    #[must_use]
    pub fn new() -> Self {
        Self {
            show_unlisted: true,
            ..Default::default()
        }
    }

    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    #[must_use]
    pub fn with_description(mut self, desc: impl Into<String>) -> Self {
        self.description = Some(desc.into());
        self
    }

    /// Only document keys that appear in a backup or legacy list
    #[must_use]
    pub fn hide_unlisted(mut self) -> Self {
        self.show_unlisted = false;
        self
    }
}

/// Generate a markdown reference for one namespace
///
/// With `keys`, each row also says whether the key is backed up or only
/// accepted from legacy backups, and listed keys without a validator are
/// called out at the end. Key lists of another namespace are ignored.
#[must_use]
pub fn generate_docs(
    registry: &ValidatorRegistry,
    keys: Option<&BackupKeys>,
    config: &DocsConfig,
) -> String {
    let mut output = String::new();

    let title = config
        .title
        .clone()
        .unwrap_or_else(|| "Settings Validators".to_string());
    writeln!(output, "# {title}\n").unwrap();

    if let Some(desc) = &config.description {
        writeln!(output, "{desc}\n").unwrap();
    }

    write_namespace(&mut output, registry, keys, config);
    output
}

/// Generate one markdown document covering every namespace
///
/// `keys` are matched to registries by namespace; a namespace without key
/// lists is documented without the backup column.
#[must_use]
pub fn generate_catalog_docs(
    registries: &NamespaceRegistries,
    keys: &[BackupKeys],
    config: &DocsConfig,
) -> String {
    let mut output = String::new();

    let title = config
        .title
        .clone()
        .unwrap_or_else(|| "Settings Validators".to_string());
    writeln!(output, "# {title}\n").unwrap();

    if let Some(desc) = &config.description {
        writeln!(output, "{desc}\n").unwrap();
    }

    for registry in registries.iter() {
        let ns_keys = keys.iter().find(|k| k.namespace == registry.namespace());
        write_namespace(&mut output, registry, ns_keys, config);
    }

    output
}

fn write_namespace(
    out: &mut String,
    registry: &ValidatorRegistry,
    keys: Option<&BackupKeys>,
    config: &DocsConfig,
) {
    let namespace = registry.namespace();
    let keys = keys.filter(|k| k.namespace == namespace);
    writeln!(out, "## {}\n", capitalize(namespace.as_str())).unwrap();

    let backup: HashSet<&str> = keys
        .map(|k| k.backup.iter().map(String::as_str).collect())
        .unwrap_or_default();
    let legacy: HashSet<&str> = keys
        .map(|k| k.legacy.iter().map(String::as_str).collect())
        .unwrap_or_default();

    if keys.is_some() {
        out.push_str("| Key | Rule | Restore |\n");
        out.push_str("|-----|------|---------|\n");
    } else {
        out.push_str("| Key | Rule |\n");
        out.push_str("|-----|------|\n");
    }

    for key in registry.keys() {
        let listed = backup.contains(key) || legacy.contains(key);
        if keys.is_some() && !listed && !config.show_unlisted {
            continue;
        }

        let Some(validator) = registry.get(key) else {
            continue;
        };
        let rule = escape_cell(&validator.to_string());

        if keys.is_some() {
            let status = if backup.contains(key) {
                "backup"
            } else if legacy.contains(key) {
                "legacy"
            } else {
                "-"
            };
            writeln!(out, "| `{key}` | {rule} | {status} |").unwrap();
        } else {
            writeln!(out, "| `{key}` | {rule} |").unwrap();
        }
    }
    out.push('\n');

    let gaps = keys
        .and_then(|k| check_completeness(k, registry).ok())
        .filter(|report| !report.is_complete());
    if let Some(report) = gaps {
        out.push_str("**Missing validators:**\n\n");
        for key in &report.offenders {
            writeln!(out, "- `{key}`").unwrap();
        }
        out.push('\n');
    }
}

fn escape_cell(s: &str) -> String {
    s.replace('|', "\\|")
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        None => String::new(),
        Some(first) => first.to_uppercase().chain(chars).collect(),
    }
}

// =============================================================================
// Tests
// =============================================================================
