//! Configuration namespaces

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A configuration scope with its own key space and validator registry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Namespace {
    /// Per-user preferences (display, sound, input)
    System,
    /// Device-wide settings shared by all users
    Global,
    /// Per-user settings that apps may read but not write
    Secure,
}

impl Namespace {
    /// Every namespace, in a stable order
    pub const ALL: [Namespace; 3] = [Namespace::System, Namespace::Global, Namespace::Secure];

    /// Lowercase name used in definition files and messages
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Namespace::System => "system",
            Namespace::Global => "global",
            Namespace::Secure => "secure",
        }
    }
}

impl fmt::Display for Namespace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Namespace {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Namespace::ALL
            .into_iter()
            .find(|ns| ns.as_str() == s)
            .ok_or_else(|| Error::Parse(format!("unknown namespace '{s}'")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_namespace() {
        assert_eq!("global".parse::<Namespace>().unwrap(), Namespace::Global);
        assert!("Global".parse::<Namespace>().is_err());
        assert!("".parse::<Namespace>().is_err());
    }

    #[test]
    fn test_serde_names_match_display() {
        for ns in Namespace::ALL {
            let json = serde_json::to_string(&ns).unwrap();
            assert_eq!(json, format!("\"{ns}\""));
        }
    }
}
