//! # DTO Generator
//!
//! Generates `{Class}Dto`: one private field, constructor parameter,
//! getter and setter per property, and a `jsonSerialize()` that lays the
//! own properties (under their snake_case keys) over the base DTO's fields.

use crudgen_core::{ArtifactKind, php};
use crudgen_ir::Property;

use super::INDENT;
use crate::artifact::Artifact;
use crate::context::RenderContext;

/// Renders `{Class}Dto`
pub struct DtoArtifact;

impl Artifact for DtoArtifact {
    fn kind(&self) -> ArtifactKind {
        ArtifactKind::Dto
    }

    fn body(&self, ctx: &RenderContext<'_>) -> String {
        let properties = &ctx.schema.properties;
        let mut out = String::with_capacity(512 + properties.len() * 320);

        // Fields
        for prop in properties {
            out.push_str(&format!("{INDENT}private {}${};\n", type_prefix(prop), prop.name));
        }
        out.push('\n');

        // Constructor
        out.push_str(&format!("{INDENT}public function __construct(\n"));
        let params: Vec<String> = properties
            .iter()
            .map(|prop| {
                format!(
                    "{INDENT}{INDENT}{}${} = {}",
                    type_prefix(prop),
                    prop.name,
                    prop.default_php()
                )
            })
            .collect();
        out.push_str(&params.join(",\n"));
        out.push('\n');
        out.push_str(&format!("{INDENT}) {{\n"));
        out.push_str(&format!("{INDENT}{INDENT}parent::__construct();\n"));
        for prop in properties {
            out.push_str(&format!("{INDENT}{INDENT}$this->{0} = ${0};\n", prop.name));
        }
        out.push_str(&format!("{INDENT}}}\n"));

        // Accessors
        for prop in properties {
            out.push('\n');
            out.push_str(&accessors(prop));
        }

        // Serialization
        out.push('\n');
        out.push_str(&json_serialize(properties));

        out
    }
}

/// `string ` / `?string ` / empty for untyped properties
fn type_prefix(prop: &Property) -> String {
    prop.type_annotation()
        .map(|t| format!("{} ", t))
        .unwrap_or_default()
}

fn accessors(prop: &Property) -> String {
    let stem = prop.accessor_stem();
    let return_type = prop
        .type_annotation()
        .map(|t| format!(": {}", t))
        .unwrap_or_default();

    let mut out = String::with_capacity(320);

    out.push_str(&format!("{INDENT}public function get{}(){}\n", stem, return_type));
    out.push_str(&format!("{INDENT}{{\n"));
    out.push_str(&format!("{INDENT}{INDENT}return $this->{};\n", prop.name));
    out.push_str(&format!("{INDENT}}}\n"));
    out.push('\n');
    out.push_str(&format!(
        "{INDENT}public function set{}({}${}): void\n",
        stem,
        type_prefix(prop),
        prop.name
    ));
    out.push_str(&format!("{INDENT}{{\n"));
    out.push_str(&format!("{INDENT}{INDENT}$this->{0} = ${0};\n", prop.name));
    out.push_str(&format!("{INDENT}}}\n"));

    out
}

fn json_serialize(properties: &[Property]) -> String {
    let mut out = String::with_capacity(128 + properties.len() * 48);

    out.push_str(&format!("{INDENT}public function jsonSerialize()\n"));
    out.push_str(&format!("{INDENT}{{\n"));
    out.push_str(&format!("{INDENT}{INDENT}return array_merge(parent::jsonSerialize(), [\n"));
    for prop in properties {
        out.push_str(&format!(
            "{INDENT}{INDENT}{INDENT}{} => $this->{},\n",
            php::string_literal(&prop.serialized_key()),
            prop.name
        ));
    }
    out.push_str(&format!("{INDENT}{INDENT}]);\n"));
    out.push_str(&format!("{INDENT}}}\n"));

    out
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use crate::{render_dto, serialized_keys};
    use crudgen_ir::{DefaultLiteral, Property, Schema};
    use pretty_assertions::assert_eq;

    fn prod_model() -> Schema {
        Schema::new("Warranty.Setup", "ProdModel")
            .with_property(Property::new("isActive", "bool").with_default(DefaultLiteral::Bool(false)))
    }

    #[test]
    fn test_single_property_dto() {
        let text = render_dto(&prod_model()).unwrap();

        let expected = r#"<?php

namespace App\Dto\Warranty\Setup;

use App\Dto\BaseDto;

class ProdModelDto extends BaseDto
{
    private bool $isActive;

    public function __construct(
        bool $isActive = false
    ) {
        parent::__construct();
        $this->isActive = $isActive;
    }

    public function getIsActive(): bool
    {
        return $this->isActive;
    }

    public function setIsActive(bool $isActive): void
    {
        $this->isActive = $isActive;
    }

    public function jsonSerialize()
    {
        return array_merge(parent::jsonSerialize(), [
            "is_active" => $this->isActive,
        ]);
    }
}
"#;
        assert_eq!(text, expected);
        assert_eq!(serialized_keys(&prod_model()), vec!["is_active"]);
    }

    #[test]
    fn test_nullable_string_has_one_accessor_pair() {
        let schema = Schema::new("Warranty.Setup", "ProdModel").with_property(Property::new("state", "string"));
        let text = render_dto(&schema).unwrap();

        assert_eq!(text.matches("function getState(").count(), 1);
        assert_eq!(text.matches("function setState(").count(), 1);
        assert!(text.contains("private ?string $state;"));
        assert!(text.contains("?string $state = null"));
        assert!(text.contains("public function getState(): ?string"));
        assert!(text.contains("\"state\" => $this->state,"));
    }

    #[test]
    fn test_untyped_property_has_no_annotations() {
        let schema = Schema::new("Sales", "Order").with_property(Property::untyped("payload"));
        let text = render_dto(&schema).unwrap();

        assert!(text.contains("    private $payload;\n"));
        assert!(text.contains("        $payload = null\n"));
        assert!(text.contains("    public function getPayload()\n"));
        assert!(text.contains("    public function setPayload($payload): void\n"));
    }

    #[test]
    fn test_parameters_are_comma_separated_in_order() {
        let schema = Schema::new("Sales", "Order")
            .with_property(Property::new("orderNo", "string"))
            .with_property(Property::new("qty", "int").with_default(DefaultLiteral::Int(0)))
            .with_property(Property::new("note", "string").with_default(DefaultLiteral::Text("n/a".into())));
        let text = render_dto(&schema).unwrap();

        assert!(text.contains(
            "        ?string $orderNo = null,\n        int $qty = 0,\n        string $note = \"n/a\"\n    ) {\n"
        ));

        let keys = text.find("\"order_no\"").unwrap() < text.find("\"qty\"").unwrap();
        assert!(keys);
    }

    #[test]
    fn test_dto_without_properties_fails() {
        let err = render_dto(&Schema::new("Sales", "Order")).unwrap_err();
        assert!(err.is_validation());
    }

    #[test]
    fn test_dto_rejects_invalid_property_name() {
        let schema = Schema::new("Sales", "Order").with_property(Property::new("order-no", "string"));
        assert!(render_dto(&schema).unwrap_err().is_validation());
    }

    #[test]
    fn test_dto_rejects_colliding_serialized_keys() {
        let schema = prod_model().with_property(Property::new("is_active", "bool"));
        let err = render_dto(&schema).unwrap_err();
        assert!(err.is_validation());
        assert!(err.to_string().contains("is_active"), "{}", err);
    }
}
