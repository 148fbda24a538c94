//! Type name validation and normalization
//!
//! Type names are the keys shared by the type registry and the factories:
//! - Allowed characters: ASCII letters, digits and `_ : , * & < >`
//! - Whitespace is insignificant and stripped (`Pair<i32, u8>` is `Pair<i32,u8>`)
//! - Must not be empty

use regex::Regex;
use std::sync::LazyLock;
use thiserror::Error;

/// Validation errors for type names
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NameError {
    /// Name is empty (or only whitespace)
    #[error("type name cannot be empty")]
    Empty,

    /// Name contains a character outside the allowed set
    #[error("type name '{name}' contains invalid character '{character}'")]
    InvalidCharacter { name: String, character: char },
}

/// Matches the first character that may not appear in a type name
static INVALID_CHAR_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^A-Za-z0-9_:,*&<>]").unwrap());

/// Check whether a byte may appear in a type name.
pub const fn is_name_char(c: u8) -> bool {
    c.is_ascii_alphanumeric() || matches!(c, b'_' | b':' | b',' | b'*' | b'&' | b'<' | b'>')
}

/// Check a type name at compile time.
///
/// Unlike [`normalize_type_name`], whitespace is rejected rather than
/// stripped: names declared by [`TypeInfo`](super::TypeInfo) are used as
/// registry keys verbatim.
///
/// ```
/// use typereg::rtti::is_valid_type_name;
///
/// const _: () = assert!(is_valid_type_name("Pair<i32,u8>"));
/// assert!(!is_valid_type_name("Pair<i32, u8>"));
/// assert!(!is_valid_type_name(""));
/// ```
pub const fn is_valid_type_name(name: &str) -> bool {
    let bytes = name.as_bytes();
    if bytes.is_empty() {
        return false;
    }

    let mut i = 0;
    while i < bytes.len() {
        if !is_name_char(bytes[i]) {
            return false;
        }
        i += 1;
    }
    true
}

/// Normalize a type name supplied at runtime (tooling, manifests).
///
/// # Returns
/// - `Ok(normalized)` - Name with all whitespace removed
/// - `Err(NameError)` - Specific validation failure
///
/// # Examples
/// ```
/// use typereg::rtti::normalize_type_name;
///
/// assert_eq!(normalize_type_name("Pair<i32, u8>").unwrap(), "Pair<i32,u8>");
/// assert_eq!(normalize_type_name(" scene::Transform ").unwrap(), "scene::Transform");
/// assert!(normalize_type_name("   ").is_err());
/// assert!(normalize_type_name("Foo-Bar").is_err());
/// ```
pub fn normalize_type_name(name: &str) -> Result<String, NameError> {
    let normalized: String = name.chars().filter(|c| !c.is_whitespace()).collect();

    if normalized.is_empty() {
        return Err(NameError::Empty);
    }

    if let Some(found) = INVALID_CHAR_REGEX.find(&normalized) {
        let character = found.as_str().chars().next().unwrap_or_default();
        return Err(NameError::InvalidCharacter {
            name: normalized,
            character,
        });
    }

    Ok(normalized)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_names() {
        assert_eq!(normalize_type_name("Transform").unwrap(), "Transform");
        assert_eq!(
            normalize_type_name("spark::core::GameObject").unwrap(),
            "spark::core::GameObject"
        );
        assert_eq!(normalize_type_name("Handle<T*>").unwrap(), "Handle<T*>");
        assert_eq!(normalize_type_name("Ref<T&>").unwrap(), "Ref<T&>");
        assert_eq!(normalize_type_name("snake_case_2").unwrap(), "snake_case_2");
    }

    #[test]
    fn test_whitespace_is_stripped() {
        assert_eq!(
            normalize_type_name("Map<String, Vec<u8> >").unwrap(),
            "Map<String,Vec<u8>>"
        );
        assert_eq!(normalize_type_name("\tLeaf\n").unwrap(), "Leaf");
    }

    #[test]
    fn test_empty_name() {
        assert_eq!(normalize_type_name(""), Err(NameError::Empty));
        assert_eq!(normalize_type_name(" \t "), Err(NameError::Empty));
    }

    #[test]
    fn test_invalid_characters() {
        assert_eq!(
            normalize_type_name("my-type"),
            Err(NameError::InvalidCharacter {
                name: "my-type".to_string(),
                character: '-',
            })
        );
        assert_eq!(
            normalize_type_name("Über"),
            Err(NameError::InvalidCharacter {
                name: "Über".to_string(),
                character: 'Ü',
            })
        );
        assert!(normalize_type_name("a.b").is_err());
        assert!(normalize_type_name("fn()").is_err());
    }

    #[test]
    fn test_const_validation_agrees_with_runtime() {
        for name in ["Leaf", "a::B", "Pair<i32,u8>", "P*", "R&"] {
            assert!(is_valid_type_name(name), "{name} should be valid");
            assert_eq!(normalize_type_name(name).unwrap(), name);
        }
        for name in ["", "a b", "a-b", "a.b", "é"] {
            assert!(!is_valid_type_name(name), "{name} should be invalid");
        }
    }
}
