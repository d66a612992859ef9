//! Syntax checks shared by the validator catalog
//!
//! Every function here is total: it inspects a borrowed string and answers
//! with a `bool`, whatever the input.

use regex::Regex;
use std::sync::LazyLock;

/// Longest textual IPv6 address (`ffff:ffff:ffff:ffff:ffff:ffff:255.255.255.255`)
pub const MAX_IPV6_LEN: usize = 45;

static URI_SCHEME: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z][A-Za-z0-9+.\-]*$").expect("valid scheme pattern"));

static LOCALE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[a-z]{2,8}(?:[_-](?:[A-Z]{2}|[0-9]{3})(?:[_-][0-9A-Za-z]{4,8})?)?$")
        .expect("valid locale pattern")
});

/// Characters that may never appear unescaped in a URI reference
const URI_FORBIDDEN: &[char] = &['<', '>', '"', '{', '}', '|', '\\', '^', '`'];

/// Parse a 32-bit signed integer (optional leading `+` or `-`, no whitespace)
pub fn parse_int(value: &str) -> Option<i32> {
    value.parse::<i32>().ok()
}

/// Parse a number that carries an integral value.
///
/// `"5"`, `"+5"` and `"5.0"` all yield `5`; `"5.5"`, `"NaN"` and `"inf"` yield nothing.
pub fn parse_integral(value: &str) -> Option<i64> {
    if let Ok(v) = value.parse::<i64>() {
        return Some(v);
    }
    // Beyond 2^53 a float no longer identifies a single integer
    const EXACT_LIMIT: f64 = 9_007_199_254_740_992.0;
    value
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite() && v.fract() == 0.0 && v.abs() <= EXACT_LIMIT)
        .map(|v| v as i64)
}

/// Package names: dot-separated segments, each starting with a letter and
/// continuing with letters, digits or underscores.
pub fn is_package_name(value: &str) -> bool {
    !value.is_empty() && value.split('.').all(is_package_segment)
}

fn is_package_segment(segment: &str) -> bool {
    let mut chars = segment.chars();
    match chars.next() {
        Some(first) if first.is_alphabetic() => {
            chars.all(|c| c.is_alphanumeric() || c == '_')
        }
        _ => false,
    }
}

/// Dotted class names (`com.example.Foo`, `Foo$Inner`)
fn is_class_name(value: &str) -> bool {
    !value.is_empty() && value.split('.').all(is_identifier)
}

fn is_identifier(segment: &str) -> bool {
    let mut chars = segment.chars();
    match chars.next() {
        Some(first) if first.is_alphabetic() || first == '_' || first == '$' => {
            chars.all(|c| c.is_alphanumeric() || c == '_' || c == '$')
        }
        _ => false,
    }
}

/// Flattened component names: `<package>/<class>`.
///
/// A class starting with `.` is relative to the package, so
/// `com.example/.Service` names `com.example.Service`.
pub fn is_component_name(value: &str) -> bool {
    let Some((package, class)) = value.split_once('/') else {
        return false;
    };
    if !is_package_name(package) || class.is_empty() {
        return false;
    }
    if class.starts_with('.') {
        is_class_name(&format!("{package}{class}"))
    } else {
        is_class_name(class)
    }
}

/// Separator-joined lists where every element passes `element_ok`.
///
/// The empty string is the empty list and is accepted; empty elements are not.
pub fn all_elements(value: &str, separator: char, element_ok: fn(&str) -> bool) -> bool {
    value.is_empty() || value.split(separator).all(element_ok)
}

/// URI references, absolute (`content://media/1`) or relative (`/sdcard/a.ogg`).
pub fn is_uri(value: &str) -> bool {
    if value.is_empty() {
        return false;
    }
    if value
        .chars()
        .any(|c| c.is_whitespace() || c.is_control() || URI_FORBIDDEN.contains(&c))
    {
        return false;
    }
    if !has_valid_escapes(value) {
        return false;
    }
    // A ':' before any of "/?#" ends the scheme
    match value.find([':', '/', '?', '#']) {
        Some(idx) if value[idx..].starts_with(':') => URI_SCHEME.is_match(&value[..idx]),
        _ => true,
    }
}

fn has_valid_escapes(value: &str) -> bool {
    let bytes = value.as_bytes();
    let mut i = 0;
    while i < bytes.len() {
        if bytes[i] == b'%' {
            let escaped = bytes.get(i + 1..i + 3);
            if !escaped.is_some_and(|pair| pair.iter().all(u8::is_ascii_hexdigit)) {
                return false;
            }
            i += 3;
        } else {
            i += 1;
        }
    }
    true
}

/// Locale tags such as `en`, `en_US`, `es-419` or `de_DE_POSIX`
pub fn is_locale(value: &str) -> bool {
    LOCALE.is_match(value)
}

/// `#RRGGBB`, `#AARRGGBB` or a signed decimal ARGB integer
pub fn is_color(value: &str) -> bool {
    match value.strip_prefix('#') {
        Some(hex) => matches!(hex.len(), 6 | 8) && hex.bytes().all(|b| b.is_ascii_hexdigit()),
        None => parse_int(value).is_some(),
    }
}
