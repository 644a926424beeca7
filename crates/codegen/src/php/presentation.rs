//! # Presentation Generator
//!
//! Generates `{Class}Pres`, the declarative description of a CRUD screen.
//! The constructor runs four initializers, always in this order:
//!
//! 1. `initPresentationContent` - page id, title and flags
//! 2. `initFormLayoutContent` - rows of field ids
//! 3. `initPresentationFieldContent` - one record per field, every key present
//! 4. `initUnpackCheck` - insert/update eligibility per field

use crudgen_core::php::{bool_literal, optional_string_literal, string_list_literal, string_literal};
use crudgen_core::ArtifactKind;
use crudgen_ir::{PresentationField, UnpackField, ZoomLink};

use super::INDENT;
use crate::artifact::Artifact;
use crate::context::RenderContext;

/// Renders `{Class}Pres`
pub struct PresentationArtifact;

impl Artifact for PresentationArtifact {
    fn kind(&self) -> ArtifactKind {
        ArtifactKind::Presentation
    }

    fn imports(&self, _ctx: &RenderContext<'_>) -> Vec<String> {
        vec![
            "App\\Dto\\FieldTypeEnum".to_string(),
            ArtifactKind::Presentation.base_class_fqn(),
        ]
    }

    fn body(&self, ctx: &RenderContext<'_>) -> String {
        let mut out = String::with_capacity(2048 + ctx.schema.presentation_fields.len() * 1024);

        out.push_str(&format!("{INDENT}public function __construct()\n{INDENT}{{\n"));
        for init in [
            "initPresentationContent",
            "initFormLayoutContent",
            "initPresentationFieldContent",
            "initUnpackCheck",
        ] {
            out.push_str(&format!("{INDENT}{INDENT}$this->{}();\n", init));
        }
        out.push_str(&format!("{INDENT}}}\n\n"));

        out.push_str(&presentation_content(ctx));
        out.push('\n');
        out.push_str(&form_layout(&ctx.schema.form_layout_groups));
        out.push('\n');
        out.push_str(&presentation_fields(&ctx.schema.presentation_fields));
        out.push('\n');
        out.push_str(&unpack_check(&ctx.schema.unpack_check_fields));

        out
    }
}

// ============================================================================
// Initializers
// ============================================================================

fn method(name: &str, property: &str, entries: &[String]) -> String {
    let mut out = String::with_capacity(128 + entries.iter().map(String::len).sum::<usize>());

    out.push_str(&format!("{INDENT}public function {}(): void\n{INDENT}{{\n", name));
    if entries.is_empty() {
        out.push_str(&format!("{INDENT}{INDENT}$this->{} = [];\n", property));
    } else {
        out.push_str(&format!("{INDENT}{INDENT}$this->{} = [\n", property));
        out.push_str(&entries.join(",\n"));
        out.push('\n');
        out.push_str(&format!("{INDENT}{INDENT}];\n"));
    }
    out.push_str(&format!("{INDENT}}}\n"));

    out
}

fn presentation_content(ctx: &RenderContext<'_>) -> String {
    let opts = &ctx.schema.presentation_options;
    let toolbar = &opts.toolbar;
    let scanner = &opts.scanner;
    let pad = format!("{INDENT}{INDENT}{INDENT}");

    let lines = [
        format!(
            "{pad}\"id\" => {}, \"title\" => {}, \"table\" => {}, \"form\" => {}, \"tab\" => {}",
            string_literal(ctx.entity()),
            string_literal(&ctx.schema.display_title()),
            bool_literal(opts.table),
            bool_literal(opts.form),
            bool_literal(opts.tab),
        ),
        format!(
            "{pad}\"readonly\" => {}, \"autoPopulate\" => {}, \"findByPrimaryKey\" => {}",
            bool_literal(opts.readonly),
            bool_literal(opts.auto_populate),
            bool_literal(opts.find_by_primary_key),
        ),
        format!("{pad}\"tabContent\" => null"),
        format!(
            "{pad}\"toolbarButtonContent\" => [\"refresh\" => {}, \"operation\" => {}, \"create\" => {}, \"edit\" => {}, \"delete\" => {}]",
            bool_literal(toolbar.refresh),
            bool_literal(toolbar.operation),
            bool_literal(toolbar.create),
            bool_literal(toolbar.edit),
            bool_literal(toolbar.delete),
        ),
        format!(
            "{pad}\"scannerButtonContent\" => [\"qrcode\" => {}, \"barcode\" => {}]",
            bool_literal(scanner.qrcode),
            bool_literal(scanner.barcode),
        ),
    ];

    method("initPresentationContent", "presentationContent", &lines)
}

fn form_layout(groups: &[Vec<String>]) -> String {
    let rows: Vec<String> = groups
        .iter()
        .map(|group| format!("{INDENT}{INDENT}{INDENT}{}", string_list_literal(group)))
        .collect();

    method("initFormLayoutContent", "formLayout", &rows)
}

fn presentation_fields(fields: &[PresentationField]) -> String {
    let records: Vec<String> = fields.iter().map(field_record).collect();
    method("initPresentationFieldContent", "presentationFields", &records)
}

fn unpack_check(entries: &[UnpackField]) -> String {
    let rows: Vec<String> = entries
        .iter()
        .map(|entry| {
            format!(
                "{INDENT}{INDENT}{INDENT}[\"id\" => {}, \"insert\" => {}, \"update\" => {}]",
                string_literal(&entry.id),
                bool_literal(entry.insertable),
                bool_literal(entry.updateable),
            )
        })
        .collect();

    method("initUnpackCheck", "unpackCheck", &rows)
}

// ============================================================================
// Field records
// ============================================================================

fn field_record(f: &PresentationField) -> String {
    let open = format!("{INDENT}{INDENT}{INDENT}");
    let pad = format!("{INDENT}{INDENT}{INDENT}{INDENT}");
    let onchange_lookup = f
        .onchange_lookup
        .as_deref()
        .map(string_list_literal)
        .unwrap_or_else(|| "null".to_string());

    let lines = [
        format!("\"id\" => {}, \"label\" => {}", string_literal(&f.id), string_literal(&f.label)),
        format!(
            "\"type\" => {}, \"inputType\" => {}, \"length\" => {}",
            f.field_type.to_php(),
            f.input_type.to_php(),
            f.length
        ),
        format!(
            "\"primaryKey\" => {}, \"presentation\" => {}, \"hidden\" => {}, \"visible\" => {}",
            bool_literal(f.primary_key),
            bool_literal(f.presentation),
            bool_literal(f.hidden),
            bool_literal(f.visible),
        ),
        format!(
            "\"detail\" => {}, \"mandatory\" => {}, \"insertable\" => {}, \"updateable\" => {}",
            bool_literal(f.detail),
            bool_literal(f.mandatory),
            bool_literal(f.insertable),
            bool_literal(f.updateable),
        ),
        format!(
            "\"onchange\" => {}, \"onchangeLookup\" => {}, \"lov\" => {}, \"lovDetail\" => {}",
            bool_literal(f.onchange),
            onchange_lookup,
            bool_literal(f.lov),
            optional_string_literal(f.lov_detail.as_deref()),
        ),
        format!(
            "\"referenceController\" => {}, \"referenceService\" => {}, \"referencePres\" => {}",
            optional_string_literal(f.reference_controller.as_deref()),
            optional_string_literal(f.reference_service.as_deref()),
            optional_string_literal(f.reference_pres.as_deref()),
        ),
        format!(
            "\"iid\" => {}, \"staticIidEnum\" => {}, \"uploader\" => {}, \"downloader\" => {}",
            bool_literal(f.iid),
            optional_string_literal(f.static_iid_enum.as_deref()),
            bool_literal(f.uploader),
            bool_literal(f.downloader),
        ),
        format!(
            "\"thousandSeparator\" => {}, \"decimalPrecision\" => {}",
            bool_literal(f.thousand_separator),
            f.decimal_precision
        ),
        format!(
            "\"internalZoomContent\" => {}",
            zoom_content(f.internal_zoom_content.as_deref(), true)
        ),
        format!(
            "\"externalZoomContent\" => {}",
            zoom_content(f.external_zoom_content.as_deref(), false)
        ),
    ];

    let mut out = String::with_capacity(1024);
    out.push_str(&format!("{open}[\n"));
    let body: Vec<String> = lines.iter().map(|l| format!("{pad}{l}")).collect();
    out.push_str(&body.join(",\n"));
    out.push('\n');
    out.push_str(&format!("{open}]"));
    out
}

/// Zoom links as a nested list, or `null` when absent.
///
/// Internal zooms always carry a `tab` key; external zooms only when one is set.
fn zoom_content(links: Option<&[ZoomLink]>, internal: bool) -> String {
    let Some(links) = links else {
        return "null".to_string();
    };
    if links.is_empty() {
        return "[]".to_string();
    }

    let outer = format!("{INDENT}{INDENT}{INDENT}{INDENT}");
    let inner = format!("{outer}{INDENT}");
    let innermost = format!("{inner}{INDENT}");

    let records: Vec<String> = links
        .iter()
        .map(|z| {
            let mut tail = format!(
                "\"zoomController\" => {}",
                optional_string_literal(z.zoom_controller.as_deref())
            );
            if internal || z.tab.is_some() {
                tail.push_str(&format!(", \"tab\" => {}", optional_string_literal(z.tab.as_deref())));
            }
            tail.push_str(&format!(", \"openNewTab\" => {}", bool_literal(z.open_new_tab)));

            format!(
                "{inner}[\n{innermost}\"id\" => {}, \"name\" => {}, \"sourceParam\" => {}, \"targetParam\" => {},\n{innermost}{}\n{inner}]",
                string_literal(&z.id),
                string_literal(&z.name),
                string_list_literal(&z.source_param),
                string_list_literal(&z.target_param),
                tail
            )
        })
        .collect();

    format!("[\n{}\n{outer}]", records.join(",\n"))
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use crate::render_presentation;
    use crudgen_ir::{FieldType, PresentationField, Schema, UnpackField, ZoomLink};
    use pretty_assertions::assert_eq;

    fn prod_model() -> Schema {
        Schema::new("Warranty.Setup", "ProdModel")
            .with_title("Product Model")
            .with_field(
                PresentationField::new("is_active", "Generator Activation")
                    .with_type(FieldType::Checkbox)
                    .primary_key()
                    .with_access(true, false),
            )
            .with_layout_group(["is_active"])
            .with_unpack(UnpackField::new("is_active", true, false))
    }

    #[test]
    fn test_full_presentation() {
        let text = render_presentation(&prod_model()).unwrap();

        let expected = r#"<?php

namespace App\Presentation\Warranty\Setup;

use App\Dto\FieldTypeEnum;
use App\Presentation\BasePres;

class ProdModelPres extends BasePres
{
    public function __construct()
    {
        $this->initPresentationContent();
        $this->initFormLayoutContent();
        $this->initPresentationFieldContent();
        $this->initUnpackCheck();
    }

    public function initPresentationContent(): void
    {
        $this->presentationContent = [
            "id" => "ProdModel", "title" => "Product Model", "table" => true, "form" => true, "tab" => false,
            "readonly" => false, "autoPopulate" => true, "findByPrimaryKey" => false,
            "tabContent" => null,
            "toolbarButtonContent" => ["refresh" => true, "operation" => false, "create" => true, "edit" => true, "delete" => true],
            "scannerButtonContent" => ["qrcode" => false, "barcode" => false]
        ];
    }

    public function initFormLayoutContent(): void
    {
        $this->formLayout = [
            ["is_active"]
        ];
    }

    public function initPresentationFieldContent(): void
    {
        $this->presentationFields = [
            [
                "id" => "is_active", "label" => "Generator Activation",
                "type" => FieldTypeEnum::CHECKBOX, "inputType" => FieldTypeEnum::CHECKBOX, "length" => 100,
                "primaryKey" => true, "presentation" => true, "hidden" => false, "visible" => true,
                "detail" => false, "mandatory" => false, "insertable" => true, "updateable" => false,
                "onchange" => false, "onchangeLookup" => null, "lov" => false, "lovDetail" => null,
                "referenceController" => null, "referenceService" => null, "referencePres" => null,
                "iid" => false, "staticIidEnum" => null, "uploader" => false, "downloader" => false,
                "thousandSeparator" => false, "decimalPrecision" => 2,
                "internalZoomContent" => null,
                "externalZoomContent" => null
            ]
        ];
    }

    public function initUnpackCheck(): void
    {
        $this->unpackCheck = [
            ["id" => "is_active", "insert" => true, "update" => false]
        ];
    }
}
"#;
        assert_eq!(text, expected);
    }

    #[test]
    fn test_field_and_layout_order_preserved() {
        let schema = Schema::new("Sales", "Order")
            .with_field(PresentationField::new("c", "C"))
            .with_field(PresentationField::new("a", "A"))
            .with_field(PresentationField::new("b", "B"))
            .with_layout_group(["b", "c"])
            .with_layout_group(["a"]);
        let text = render_presentation(&schema).unwrap();

        let pos = |needle: &str| text.find(needle).unwrap();
        assert!(pos("\"id\" => \"c\"") < pos("\"id\" => \"a\""));
        assert!(pos("\"id\" => \"a\"") < pos("\"id\" => \"b\""));
        assert!(text.contains("            [\"b\", \"c\"],\n            [\"a\"]\n"));
    }

    #[test]
    fn test_unknown_layout_id_fails() {
        let schema = Schema::new("Sales", "Order")
            .with_field(PresentationField::new("a", "A"))
            .with_layout_group(["a", "ghost"]);
        assert!(render_presentation(&schema).unwrap_err().is_validation());
    }

    #[test]
    fn test_empty_lists_and_title_fallback() {
        let text = render_presentation(&Schema::new("Sales", "SalesOrder")).unwrap();
        assert!(text.contains("\"title\" => \"Sales Order\""));
        assert!(text.contains("$this->formLayout = [];"));
        assert!(text.contains("$this->presentationFields = [];"));
        assert!(text.contains("$this->unpackCheck = [];"));
    }

    #[test]
    fn test_zoom_and_references() {
        let mut field = PresentationField::new("part_no", "Part No")
            .with_internal_zoom(vec![
                ZoomLink::new("zoomPart", "Part")
                    .with_params(&["part_no"], &["part_no"])
                    .with_controller("PartController"),
            ])
            .with_external_zoom(vec![ZoomLink::new("zoomCatalog", "Catalog").with_controller("CatalogController")]);
        field.reference_controller = Some("App\\Http\\Controllers\\PartController".into());
        field.onchange_lookup = Some(vec!["description".into()]);

        let schema = Schema::new("Sales", "Order")
            .with_field(field)
            .with_layout_group(["part_no"]);
        let text = render_presentation(&schema).unwrap();

        assert!(text.contains("\"referenceController\" => \"App\\\\Http\\\\Controllers\\\\PartController\""));
        assert!(text.contains("\"onchangeLookup\" => [\"description\"]"));
        assert!(text.contains(
            "                \"internalZoomContent\" => [\n                    [\n                        \"id\" => \"zoomPart\", \"name\" => \"Part\", \"sourceParam\" => [\"part_no\"], \"targetParam\" => [\"part_no\"],\n                        \"zoomController\" => \"PartController\", \"tab\" => null, \"openNewTab\" => false\n                    ]\n                ],\n"
        ));
        assert!(text.contains(
            "\"zoomController\" => \"CatalogController\", \"openNewTab\" => false\n"
        ));
    }

    #[test]
    fn test_options_are_rendered() {
        let mut schema = prod_model();
        schema.presentation_options.readonly = true;
        schema.presentation_options.toolbar.delete = false;
        schema.presentation_options.scanner.barcode = true;
        let text = render_presentation(&schema).unwrap();

        assert!(text.contains("\"readonly\" => true"));
        assert!(text.contains("\"delete\" => false]"));
        assert!(text.contains("\"barcode\" => true]"));
    }
}
