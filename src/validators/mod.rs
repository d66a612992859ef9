//! Validator catalog
//!
//! # Overview
//!
//! A [`Validator`] is a pure predicate over one untrusted string. The catalog is
//! closed: every rule a registry can bind is a variant of the enum, so a
//! registry can never hold a missing or half-built validator.
//!
//! ```rust
//! use setguard::Validator;
//!
//! let volume = Validator::integer_range(0, 7);
//! assert!(volume.validate("5"));
//! assert!(!volume.validate("8"));
//! assert!(!volume.validate("loud"));
//!
//! let theme = Validator::discrete(["light", "dark"]);
//! assert!(theme.validate("dark"));
//! assert!(!theme.validate("Dark"));
//! ```
//!
//! # Failure model
//!
//! `validate` answers `true` or `false` and nothing else. Parse failures,
//! overflow and malformed escapes all fold into `false`, so a hostile restore
//! payload can at worst get its own values rejected.
//!
//! # Definition files
//!
//! Validators deserialize from internally tagged objects:
//!
//! ```rust
//! use setguard::Validator;
//!
//! let rule: Validator =
//!     serde_json::from_str(r#"{"type": "inclusive_float_range", "min": 0.5, "max": 2.0}"#).unwrap();
//! assert_eq!(rule, Validator::float_range(0.5, 2.0));
//! ```

mod syntax;

pub use syntax::MAX_IPV6_LEN;

use serde::{Deserialize, Serialize};
use std::fmt;

/// A validation rule bound to one setting key
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Validator {
    /// Exactly `"1"` or `"0"`
    Boolean,
    /// Anything, including an absent value
    AnyString,
    /// Any 32-bit signed integer
    AnyInteger,
    /// A 32-bit signed integer that is zero or positive
    NonNegativeInteger,
    /// A 32-bit signed integer in `min..=max`
    InclusiveIntegerRange { min: i32, max: i32 },
    /// A 32-bit float in `min..=max`
    InclusiveFloatRange { min: f32, max: f32 },
    /// One of a fixed set of strings (case-sensitive)
    DiscreteValueSet { values: Vec<String> },
    /// A number whose integral value is one of a fixed set
    DiscreteNumericSet { values: Vec<i64> },
    /// A flattened `<package>/<class>` component name
    ComponentName,
    /// A component name, or no value at all
    NullableComponentName,
    /// Component names joined by `separator`
    ComponentNameList { separator: char },
    /// A dotted package name
    PackageName,
    /// Package names joined by `separator`
    PackageNameList { separator: char },
    /// A URI reference
    Uri,
    /// A locale tag such as `en_US`
    Locale,
    /// A color as `#RRGGBB`, `#AARRGGBB` or a decimal ARGB integer
    Color,
    /// Anything short enough to be a textual IP address
    LenientIpAddress,
    /// A JSON object
    JsonObject,
}

impl Validator {
    // =========================================================================
    // Constructors for parameterized rules
    // =========================================================================

    /// Integer range, bounds included
    #[must_use]
    pub fn integer_range(min: i32, max: i32) -> Self {
        Self::InclusiveIntegerRange { min, max }
    }

    /// Float range, bounds included
    #[must_use]
    pub fn float_range(min: f32, max: f32) -> Self {
        Self::InclusiveFloatRange { min, max }
    }

    /// Fixed set of accepted strings
    #[must_use]
    pub fn discrete<I, S>(values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::DiscreteValueSet {
            values: values.into_iter().map(Into::into).collect(),
        }
    }

    /// Fixed set of accepted numeric values
    #[must_use]
    pub fn discrete_numeric(values: impl IntoIterator<Item = i64>) -> Self {
        Self::DiscreteNumericSet {
            values: values.into_iter().collect(),
        }
    }

    /// List of component names
    #[must_use]
    pub fn component_list(separator: char) -> Self {
        Self::ComponentNameList { separator }
    }

    /// List of package names
    #[must_use]
    pub fn package_list(separator: char) -> Self {
        Self::PackageNameList { separator }
    }

    // =========================================================================
    // Validation
    // =========================================================================

    /// Check a present value against this rule
    #[must_use]
    pub fn validate(&self, value: &str) -> bool {
        match self {
            Self::Boolean => value == "1" || value == "0",
            Self::AnyString => true,
            Self::AnyInteger => syntax::parse_int(value).is_some(),
            Self::NonNegativeInteger => syntax::parse_int(value).is_some_and(|v| v >= 0),
            Self::InclusiveIntegerRange { min, max } => {
                syntax::parse_int(value).is_some_and(|v| *min <= v && v <= *max)
            }
            Self::InclusiveFloatRange { min, max } => value
                .parse::<f32>()
                .is_ok_and(|v| *min <= v && v <= *max),
            Self::DiscreteValueSet { values } => values.iter().any(|v| v == value),
            Self::DiscreteNumericSet { values } => {
                syntax::parse_integral(value).is_some_and(|v| values.contains(&v))
            }
            Self::ComponentName | Self::NullableComponentName => {
                syntax::is_component_name(value)
            }
            Self::ComponentNameList { separator } => {
                syntax::all_elements(value, *separator, syntax::is_component_name)
            }
            Self::PackageName => syntax::is_package_name(value),
            Self::PackageNameList { separator } => {
                syntax::all_elements(value, *separator, syntax::is_package_name)
            }
            Self::Uri => syntax::is_uri(value),
            Self::Locale => syntax::is_locale(value),
            Self::Color => syntax::is_color(value),
            Self::LenientIpAddress => value.chars().count() <= MAX_IPV6_LEN,
            Self::JsonObject => {
                serde_json::from_str::<serde_json::Value>(value).is_ok_and(|v| v.is_object())
            }
        }
    }

    /// Check a possibly absent value against this rule
    #[must_use]
    pub fn validate_opt(&self, value: Option<&str>) -> bool {
        match value {
            Some(value) => self.validate(value),
            None => self.accepts_absent(),
        }
    }

    /// Whether an unset value passes this rule
    #[must_use]
    pub fn accepts_absent(&self) -> bool {
        matches!(self, Self::AnyString | Self::NullableComponentName)
    }

    /// Validate the rule definition itself
    ///
    /// Checks:
    /// - Ranges have `min <= max`
    /// - Float bounds are finite
    /// - Discrete sets are not empty
    /// - List separators are not whitespace or identifier characters
    ///
    /// # Errors
    ///
    /// Returns a description of the first problem found.
    pub fn check_definition(&self) -> Result<(), String> {
        match self {
            Self::InclusiveIntegerRange { min, max } if min > max => {
                Err(format!("min ({min}) cannot be greater than max ({max})"))
            }
            Self::InclusiveFloatRange { min, max } => {
                if !min.is_finite() || !max.is_finite() {
                    Err(format!("float bounds must be finite, got {min}..={max}"))
                } else if min > max {
                    Err(format!("min ({min}) cannot be greater than max ({max})"))
                } else {
                    Ok(())
                }
            }
            Self::DiscreteValueSet { values } if values.is_empty() => {
                Err("value set cannot be empty".to_string())
            }
            Self::DiscreteNumericSet { values } if values.is_empty() => {
                Err("numeric set cannot be empty".to_string())
            }
            Self::ComponentNameList { separator } | Self::PackageNameList { separator }
                if separator.is_whitespace()
                    || separator.is_alphanumeric()
                    || matches!(*separator, '.' | '_' | '/' | '$') =>
            {
                Err(format!("'{separator}' cannot separate list elements"))
            }
            _ => Ok(()),
        }
    }
}

impl fmt::Display for Validator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Boolean => f.write_str("boolean (\"1\" or \"0\")"),
            Self::AnyString => f.write_str("any string"),
            Self::AnyInteger => f.write_str("integer"),
            Self::NonNegativeInteger => f.write_str("non-negative integer"),
            Self::InclusiveIntegerRange { min, max } => write!(f, "integer in {min}..={max}"),
            Self::InclusiveFloatRange { min, max } => write!(f, "number in {min}..={max}"),
            Self::DiscreteValueSet { values } => write!(f, "one of [{}]", values.join(", ")),
            Self::DiscreteNumericSet { values } => {
                let values: Vec<String> = values.iter().map(ToString::to_string).collect();
                write!(f, "one of [{}]", values.join(", "))
            }
            Self::ComponentName => f.write_str("component name"),
            Self::NullableComponentName => f.write_str("component name or unset"),
            Self::ComponentNameList { separator } => {
                write!(f, "component names separated by '{separator}'")
            }
            Self::PackageName => f.write_str("package name"),
            Self::PackageNameList { separator } => {
                write!(f, "package names separated by '{separator}'")
            }
            Self::Uri => f.write_str("URI"),
            Self::Locale => f.write_str("locale"),
            Self::Color => f.write_str("color"),
            Self::LenientIpAddress => write!(f, "IP address (at most {MAX_IPV6_LEN} characters)"),
            Self::JsonObject => f.write_str("JSON object"),
        }
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_boolean_canonical_tokens() {
        let v = Validator::Boolean;

        assert!(v.validate("1"));
        assert!(v.validate("0"));

        for rejected in ["true", "false", "", " 1", "1 ", "01", "2", "TRUE"] {
            assert!(!v.validate(rejected), "{rejected:?} should be rejected");
        }
        assert!(!v.validate_opt(None));
    }

    #[test]
    fn test_integer_range() {
        let v = Validator::integer_range(0, 5);

        assert!(v.validate("3"));
        assert!(v.validate("0"));
        assert!(v.validate("5"));
        assert!(!v.validate("6"));
        assert!(!v.validate("-1"));
        assert!(!v.validate("abc"));
        assert!(!v.validate("3.0"));
        assert!(!v.validate("99999999999999999999"));
    }

    #[test]
    fn test_non_negative_and_any_integer() {
        assert!(Validator::NonNegativeInteger.validate("0"));
        assert!(Validator::NonNegativeInteger.validate("2147483647"));
        assert!(!Validator::NonNegativeInteger.validate("-1"));
        assert!(!Validator::NonNegativeInteger.validate("2147483648"));

        assert!(Validator::AnyInteger.validate("-2147483648"));
        assert!(!Validator::AnyInteger.validate("1.5"));
    }

    #[test]
    fn test_float_range() {
        let v = Validator::float_range(0.5, 2.0);

        assert!(v.validate("1"));
        assert!(v.validate("0.5"));
        assert!(v.validate("2.0"));
        assert!(v.validate("1e0"));
        assert!(!v.validate("2.01"));
        assert!(!v.validate("NaN"));
        assert!(!v.validate("inf"));
        assert!(!v.validate("one"));
    }

    #[test]
    fn test_discrete_value_set_is_case_sensitive() {
        let v = Validator::discrete(["a", "b"]);

        assert!(v.validate("a"));
        assert!(!v.validate("A"));
        assert!(!v.validate("c"));
        assert!(!v.validate(""));
    }

    #[test]
    fn test_discrete_numeric_set() {
        let v = Validator::discrete_numeric([0, 1, 2, 4]);

        assert!(v.validate("4"));
        assert!(v.validate("4.0"));
        assert!(v.validate("+2"));
        assert!(!v.validate("3"));
        assert!(!v.validate("4.5"));
        assert!(!v.validate("four"));
    }

    #[test]
    fn test_nullable_rules() {
        assert!(Validator::AnyString.validate_opt(None));
        assert!(Validator::NullableComponentName.validate_opt(None));
        assert!(!Validator::ComponentName.validate_opt(None));
        assert!(!Validator::Uri.validate_opt(None));

        assert!(Validator::NullableComponentName.validate_opt(Some("com.a/.B")));
        assert!(!Validator::NullableComponentName.validate_opt(Some("")));
    }

    #[test]
    fn test_lenient_ip_address() {
        let v = Validator::LenientIpAddress;

        assert!(v.validate("192.168.0.1"));
        assert!(v.validate("ffff:ffff:ffff:ffff:ffff:ffff:255.255.255.255"));
        assert!(v.validate(""));
        assert!(!v.validate(&"1".repeat(MAX_IPV6_LEN + 1)));
    }

    #[test]
    fn test_json_object() {
        let v = Validator::JsonObject;

        assert!(v.validate(r#"{"a": 1}"#));
        assert!(v.validate("{}"));
        assert!(!v.validate("[1, 2]"));
        assert!(!v.validate("{"));
        assert!(!v.validate(""));
    }

    #[test]
    fn test_check_definition() {
        assert!(Validator::integer_range(0, 0).check_definition().is_ok());
        assert!(Validator::integer_range(5, 0).check_definition().is_err());
        assert!(Validator::float_range(f32::NAN, 1.0).check_definition().is_err());
        assert!(Validator::float_range(2.0, 1.0).check_definition().is_err());
        assert!(Validator::discrete(Vec::<String>::new()).check_definition().is_err());
        assert!(Validator::discrete_numeric([]).check_definition().is_err());
        assert!(Validator::component_list('.').check_definition().is_err());
        assert!(Validator::package_list(' ').check_definition().is_err());
        assert!(Validator::package_list(':').check_definition().is_ok());
    }

    #[test]
    fn test_definition_serialization() {
        let v = Validator::discrete(["light", "dark"]);
        let json = serde_json::to_value(&v).unwrap();

        assert_eq!(
            json,
            serde_json::json!({"type": "discrete_value_set", "values": ["light", "dark"]})
        );

        let list: Validator =
            serde_json::from_str(r#"{"type": "component_name_list", "separator": ":"}"#).unwrap();
        assert_eq!(list, Validator::component_list(':'));
    }

    #[test]
    fn test_display() {
        assert_eq!(Validator::integer_range(0, 7).to_string(), "integer in 0..=7");
        assert_eq!(
            Validator::discrete(["a", "b"]).to_string(),
            "one of [a, b]"
        );
    }
}
