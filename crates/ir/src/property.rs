//! DTO property definitions
//!
//! A `Property` becomes one private field, one constructor parameter, one
//! getter and one setter in the generated DTO.

use crudgen_core::naming::{to_pascal_case, to_snake_case};
use crudgen_core::php;
use serde::{Deserialize, Serialize};

// ============================================================================
// Property
// ============================================================================

/// A DTO property
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Property {
    /// Property name (camelCase identifier)
    pub name: String,

    /// Declared type (`string`, `int`, `bool`, ...). Empty means untyped.
    #[serde(rename = "type", default)]
    pub type_name: String,

    /// Constructor default; `None` renders as `null`
    #[serde(default)]
    pub default: Option<DefaultLiteral>,
}

impl Property {
    /// Create a typed property with a `null` default
    pub fn new(name: impl Into<String>, type_name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            type_name: type_name.into(),
            default: None,
        }
    }

    /// Create an untyped property
    pub fn untyped(name: impl Into<String>) -> Self {
        Self::new(name, "")
    }

    /// Set the constructor default
    pub fn with_default(mut self, default: DefaultLiteral) -> Self {
        self.default = Some(default);
        self
    }

    /// Whether the property carries a type annotation
    pub fn is_typed(&self) -> bool {
        !self.type_name.is_empty()
    }

    /// Type annotation as it appears in field, parameter and accessor signatures.
    ///
    /// Returns `None` for untyped properties. A typed property whose default
    /// is `null` is widened to accept `null` (`?string`, `int|float|null`).
    pub fn type_annotation(&self) -> Option<String> {
        if !self.is_typed() {
            return None;
        }

        let t = self.type_name.as_str();
        let already_nullable = t.starts_with('?')
            || t.eq_ignore_ascii_case("mixed")
            || t.eq_ignore_ascii_case("null")
            || t.split('|').any(|part| part.eq_ignore_ascii_case("null"));

        if self.default.is_some() || already_nullable {
            Some(t.to_string())
        } else if t.contains('|') {
            Some(format!("{}|null", t))
        } else {
            Some(format!("?{}", t))
        }
    }

    /// Default value as PHP source
    pub fn default_php(&self) -> String {
        match &self.default {
            Some(lit) => lit.to_php(),
            None => "null".to_string(),
        }
    }

    /// Accessor stem (`isActive` → `IsActive`, used as `getIsActive`)
    pub fn accessor_stem(&self) -> String {
        to_pascal_case(&self.name)
    }

    /// Key under which the property is serialized (`isActive` → `is_active`)
    pub fn serialized_key(&self) -> String {
        to_snake_case(&self.name)
    }
}

// ============================================================================
// DefaultLiteral
// ============================================================================

/// Constructor default value of a property
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum DefaultLiteral {
    /// Boolean value
    Bool(bool),
    /// Integer value
    Int(i64),
    /// Float value
    Float(f64),
    /// String value
    Text(String),
}

impl DefaultLiteral {
    /// Default for a declared type when none is given: `0` for `int`,
    /// `false` for `bool`, `null` otherwise.
    pub fn for_type(type_name: &str) -> Option<Self> {
        match type_name {
            "int" => Some(DefaultLiteral::Int(0)),
            "bool" => Some(DefaultLiteral::Bool(false)),
            _ => None,
        }
    }

    /// Convert to PHP representation
    pub fn to_php(&self) -> String {
        match self {
            DefaultLiteral::Bool(v) => php::bool_literal(*v).to_string(),
            DefaultLiteral::Int(v) => v.to_string(),
            DefaultLiteral::Float(v) => php::float_literal(*v),
            DefaultLiteral::Text(v) => php::string_literal(v),
        }
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_nullable_when_default_is_null() {
        let prop = Property::new("state", "string");
        assert_eq!(prop.type_annotation().as_deref(), Some("?string"));
        assert_eq!(prop.default_php(), "null");
    }

    #[test]
    fn test_not_nullable_with_default() {
        let prop = Property::new("isActive", "bool").with_default(DefaultLiteral::Bool(false));
        assert_eq!(prop.type_annotation().as_deref(), Some("bool"));
        assert_eq!(prop.default_php(), "false");
    }

    #[test]
    fn test_untyped_has_no_annotation() {
        let prop = Property::untyped("payload");
        assert!(!prop.is_typed());
        assert_eq!(prop.type_annotation(), None);
    }

    #[test]
    fn test_union_and_explicit_nullable() {
        assert_eq!(
            Property::new("amount", "int|float").type_annotation().as_deref(),
            Some("int|float|null")
        );
        assert_eq!(
            Property::new("note", "?string").type_annotation().as_deref(),
            Some("?string")
        );
        assert_eq!(
            Property::new("anything", "mixed").type_annotation().as_deref(),
            Some("mixed")
        );
    }

    #[test]
    fn test_accessor_and_serialized_names() {
        let prop = Property::new("exportNo", "string");
        assert_eq!(prop.accessor_stem(), "ExportNo");
        assert_eq!(prop.serialized_key(), "export_no");
    }

    #[test]
    fn test_default_literals() {
        assert_eq!(DefaultLiteral::Int(0).to_php(), "0");
        assert_eq!(DefaultLiteral::Float(1.0).to_php(), "1.0");
        assert_eq!(DefaultLiteral::Text("N/A".into()).to_php(), "\"N/A\"");
        assert_eq!(DefaultLiteral::for_type("int"), Some(DefaultLiteral::Int(0)));
        assert_eq!(DefaultLiteral::for_type("string"), None);
    }

    #[test]
    fn test_deserialize_defaults() {
        let prop: Property =
            serde_json::from_str(r#"{"name":"isActive","type":"bool","default":false}"#).unwrap();
        assert_eq!(prop.default, Some(DefaultLiteral::Bool(false)));

        let prop: Property = serde_json::from_str(r#"{"name":"state","default":null}"#).unwrap();
        assert_eq!(prop.type_name, "");
        assert_eq!(prop.default, None);

        let prop: Property = serde_json::from_str(r#"{"name":"qty","type":"int","default":3}"#).unwrap();
        assert_eq!(prop.default, Some(DefaultLiteral::Int(3)));
    }
}
