//! Naming transforms shared by the schema model and the renderer
//!
//! Class names are PascalCase, properties camelCase and serialized keys
//! snake_case. `to_snake_case` must agree exactly with the key rewrite the
//! generated DTOs perform at runtime (`preg_replace('/(?<!^)[A-Z]/', '_$0')`
//! followed by `strtolower`), so it is written out by hand rather than taken
//! from `heck`, whose word splitting differs on runs of capitals.

use heck::{ToKebabCase, ToTitleCase};

/// Convert a camelCase key to its serialized snake_case form.
///
/// An `_` is inserted before every ASCII uppercase letter that is not the
/// first character, then the whole string is lowercased.
///
/// ```
/// use crudgen_core::naming::to_snake_case;
///
/// assert_eq!(to_snake_case("exportNo"), "export_no");
/// assert_eq!(to_snake_case("objstate"), "objstate");
/// ```
pub fn to_snake_case(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + 4);
    for (i, c) in s.chars().enumerate() {
        if i > 0 && c.is_ascii_uppercase() {
            out.push('_');
        }
        out.push(c.to_ascii_lowercase());
    }
    out
}

/// Uppercase the first character, leave the rest untouched (`isActive` → `IsActive`).
pub fn to_pascal_case(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Convert a column id to a camelCase property name (`EXPORT_NO` → `exportNo`).
///
/// The id is lowercased as a whole and every `_` followed by a letter is
/// folded into an uppercase letter, so `to_snake_case` of the result gives
/// back the lowercased id (`ExportNo` → `exportno`, `ADDR_1` → `addr_1`).
/// Underscores before digits or other underscores are kept for that reason.
pub fn to_camel_case(s: &str) -> String {
    let lower = s.to_ascii_lowercase();
    let mut out = String::with_capacity(lower.len());
    let mut chars = lower.chars().peekable();

    while let Some(c) = chars.next() {
        match chars.peek() {
            Some(next) if c == '_' && !out.is_empty() && next.is_ascii_lowercase() => {
                out.push(next.to_ascii_uppercase());
                chars.next();
            }
            _ => out.push(c),
        }
    }
    out
}

/// Convert a class name to a route segment (`ProdModel` → `prod-model`).
pub fn to_kebab_case(s: &str) -> String {
    s.to_kebab_case()
}

/// Convert a class name to a display title (`ProdModel` → `Prod Model`).
pub fn to_title_case(s: &str) -> String {
    s.to_title_case()
}

/// Check if a string is a valid identifier
pub fn is_valid_identifier(s: &str) -> bool {
    let mut chars = s.chars();
    let Some(first) = chars.next() else {
        return false;
    };

    // First character must be letter or underscore
    if !first.is_alphabetic() && first != '_' {
        return false;
    }

    // Rest must be alphanumeric or underscore
    chars.all(|c| c.is_alphanumeric() || c == '_')
}

/// Check a type annotation such as `string`, `?int`, `\App\Dto\Money` or `int|float`.
///
/// The empty string is accepted and means "untyped".
pub fn is_valid_type_annotation(s: &str) -> bool {
    if s.is_empty() {
        return true;
    }

    let body = s.strip_prefix('?').unwrap_or(s);
    if body.is_empty() {
        return false;
    }

    body.split('|').all(|part| {
        let part = part.strip_prefix('\\').unwrap_or(part);
        !part.is_empty() && part.split('\\').all(is_valid_identifier)
    })
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_snake_case_examples() {
        assert_eq!(to_snake_case("objstate"), "objstate");
        assert_eq!(to_snake_case("exportNo"), "export_no");
        assert_eq!(to_snake_case("isActive"), "is_active");
    }

    #[test]
    fn test_snake_case_capital_runs_split_every_letter() {
        assert_eq!(to_snake_case("partNoID"), "part_no_i_d");
        assert_eq!(to_snake_case("URL"), "u_r_l");
    }

    #[test]
    fn test_snake_case_leading_capital_not_prefixed() {
        assert_eq!(to_snake_case("State"), "state");
        assert_eq!(to_snake_case(""), "");
    }

    #[test]
    fn test_pascal_case() {
        assert_eq!(to_pascal_case("isActive"), "IsActive");
        assert_eq!(to_pascal_case("objstate"), "Objstate");
        assert_eq!(to_pascal_case(""), "");
    }

    #[test]
    fn test_camel_case_from_column_ids() {
        assert_eq!(to_camel_case("EXPORT_NO"), "exportNo");
        assert_eq!(to_camel_case("OBJSTATE"), "objstate");
        assert_eq!(to_camel_case("IS_ACTIVE"), "isActive");
    }

    #[test]
    fn test_camel_case_round_trips_to_lowercased_id() {
        assert_eq!(to_camel_case("ExportNo"), "exportno");
        assert_eq!(to_camel_case("HTTPCode"), "httpcode");
        assert_eq!(to_camel_case("ADDR_1"), "addr_1");
        assert_eq!(to_camel_case("_HIDDEN"), "_hidden");

        for id in ["ExportNo", "HTTPCode", "EXPORT_NO", "ADDR_1", "ADDR2_LINE", "A__B", "_HIDDEN"] {
            assert_eq!(to_snake_case(&to_camel_case(id)), id.to_ascii_lowercase(), "{}", id);
        }
    }

    #[test]
    fn test_kebab_and_title() {
        assert_eq!(to_kebab_case("ProdModel"), "prod-model");
        assert_eq!(to_title_case("ProdModel"), "Prod Model");
    }

    #[test]
    fn test_kebab_and_title_keep_acronym_runs_together() {
        assert_eq!(to_kebab_case("HTTPServer"), "http-server");
        assert_eq!(to_title_case("HTTPServer"), "Http Server");
        assert_eq!(to_kebab_case("OrderV2"), "order-v2");
        // Differs from the snake rule, which splits every capital
        assert_eq!(to_snake_case("HTTPServer"), "h_t_t_p_server");
    }

    #[test]
    fn test_is_valid_identifier() {
        assert!(is_valid_identifier("exportNo"));
        assert!(is_valid_identifier("_private"));
        assert!(is_valid_identifier("field2"));

        assert!(!is_valid_identifier(""));
        assert!(!is_valid_identifier("2field"));
        assert!(!is_valid_identifier("export-no"));
        assert!(!is_valid_identifier("export no"));
    }

    #[test]
    fn test_type_annotations() {
        assert!(is_valid_type_annotation(""));
        assert!(is_valid_type_annotation("string"));
        assert!(is_valid_type_annotation("?int"));
        assert!(is_valid_type_annotation("\\App\\Dto\\Money"));
        assert!(is_valid_type_annotation("int|float"));

        assert!(!is_valid_type_annotation("?"));
        assert!(!is_valid_type_annotation("int|"));
        assert!(!is_valid_type_annotation("array<int>"));
        assert!(!is_valid_type_annotation("my type"));
    }
}
