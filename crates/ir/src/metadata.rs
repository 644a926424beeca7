//! Schema import from table metadata documents
//!
//! A metadata document is the column description of one table as exported
//! by the ERP metadata projection:
//!
//! ```json
//! { "value": [ { "Id": "EXPORT_NO", "Type": "STRING", "Label": "Export No",
//!               "Length": 50, "PrimaryKey": "false", "Mandatory": "false",
//!               "Insertable": "true", "Updateable": "true" } ] }
//! ```
//!
//! Flags arrive as JSON booleans or as the strings `"true"` / `"false"`.

use crate::serialization::read_document;
use crate::{DefaultLiteral, FieldType, NamespacePath, PresentationField, Property, Schema};
use crudgen_core::naming::to_camel_case;
use crudgen_core::{CrudgenError, CrudgenResult};
use serde::{Deserialize, Deserializer, Serialize};
use std::path::Path;
use tracing::debug;

/// Column ids skipped unless the caller supplies its own list
pub const DEFAULT_EXCLUDED_IDS: [&str; 3] = ["OBJKEY", "OBJID", "OBJVERSION"];

/// Fields per form layout row unless the caller says otherwise
pub const DEFAULT_GROUP_SIZE: usize = 4;

/// Length used for columns that carry none
const DEFAULT_LENGTH: u32 = 100;

// ============================================================================
// Document types
// ============================================================================

/// A table metadata document
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MetadataDocument {
    #[serde(default)]
    pub value: Vec<MetadataColumn>,
}

/// One column of a table metadata document
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct MetadataColumn {
    pub id: String,
    #[serde(rename = "Type")]
    pub column_type: Option<String>,
    pub label: Option<String>,
    #[serde(deserialize_with = "lenient_length")]
    pub length: Option<u32>,
    #[serde(deserialize_with = "lenient_flag")]
    pub primary_key: bool,
    #[serde(deserialize_with = "lenient_flag")]
    pub mandatory: bool,
    #[serde(deserialize_with = "lenient_flag")]
    pub insertable: bool,
    #[serde(deserialize_with = "lenient_flag")]
    pub updateable: bool,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum Lenient {
    Bool(bool),
    Number(u64),
    Text(String),
}

/// Accept `true`, `"true"` (any case) and `null`; everything else is false
fn lenient_flag<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<Lenient>::deserialize(deserializer)? {
        Some(Lenient::Bool(b)) => b,
        Some(Lenient::Text(s)) => s.trim().eq_ignore_ascii_case("true"),
        Some(Lenient::Number(n)) => n != 0,
        None => false,
    })
}

/// Accept a number, a numeric string or `null`
fn lenient_length<'de, D>(deserializer: D) -> Result<Option<u32>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<Lenient>::deserialize(deserializer)? {
        Some(Lenient::Number(n)) => u32::try_from(n).ok(),
        Some(Lenient::Text(s)) => s.trim().parse().ok(),
        Some(Lenient::Bool(_)) | None => None,
    })
}

impl MetadataColumn {
    fn type_upper(&self) -> String {
        self.column_type
            .as_deref()
            .map(|t| t.trim().to_ascii_uppercase())
            .unwrap_or_default()
    }

    /// DTO property type (`STRING` → `string`, `NUMBER` → `int`, `BOOLEAN` → `bool`)
    pub fn property_type(&self) -> &'static str {
        match self.type_upper().as_str() {
            "STRING" => "string",
            "NUMBER" => "int",
            "BOOLEAN" => "bool",
            _ => "",
        }
    }

    /// Presentation field type
    pub fn field_type(&self) -> FieldType {
        match self.type_upper().as_str() {
            "NUMBER" => FieldType::Number,
            "BOOLEAN" => FieldType::Checkbox,
            "DATE/DATE" => FieldType::Date,
            "DATE/DATETIME" => FieldType::Datetime,
            _ => FieldType::String,
        }
    }

    /// Field length: the declared one for string columns, 100 otherwise
    pub fn field_length(&self) -> u32 {
        match self.length {
            Some(len) if len > 0 && self.type_upper() == "STRING" => len,
            _ => DEFAULT_LENGTH,
        }
    }

    /// Display label, falling back to the column id
    pub fn display_label(&self) -> String {
        match self.label.as_deref().map(str::trim) {
            Some(label) if !label.is_empty() => label.to_string(),
            _ => self.id.clone(),
        }
    }

    /// DTO property for this column
    pub fn to_property(&self) -> Property {
        let type_name = self.property_type();
        Property {
            name: to_camel_case(&self.id),
            type_name: type_name.to_string(),
            default: DefaultLiteral::for_type(type_name),
        }
    }

    /// Presentation field for this column
    pub fn to_field(&self) -> PresentationField {
        let mut field = PresentationField::new(self.id.to_ascii_lowercase(), self.display_label())
            .with_type(self.field_type())
            .with_length(self.field_length())
            .with_access(self.insertable, self.updateable);
        field.primary_key = self.primary_key;
        field.mandatory = self.mandatory;
        field.detail = true;
        field
    }
}

// ============================================================================
// ImportOptions
// ============================================================================

/// Everything a metadata document does not carry itself
#[derive(Debug, Clone)]
pub struct ImportOptions {
    pub class_name: String,
    pub namespace_prefix: NamespacePath,
    pub presentation_title: String,
    pub menu_route: String,
    pub projection_url: String,
    /// Column ids to skip, compared upper-cased
    pub excluded_ids: Vec<String>,
    /// Fields per form layout row
    pub group_size: usize,
}

impl ImportOptions {
    /// Create options with the default exclusions and group size
    pub fn new(class_name: impl Into<String>, namespace_prefix: impl Into<NamespacePath>) -> Self {
        Self {
            class_name: class_name.into(),
            namespace_prefix: namespace_prefix.into(),
            presentation_title: String::new(),
            menu_route: String::new(),
            projection_url: String::new(),
            excluded_ids: DEFAULT_EXCLUDED_IDS.iter().map(|s| s.to_string()).collect(),
            group_size: DEFAULT_GROUP_SIZE,
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.presentation_title = title.into();
        self
    }

    pub fn with_menu_route(mut self, route: impl Into<String>) -> Self {
        self.menu_route = route.into();
        self
    }

    pub fn with_projection_url(mut self, url: impl Into<String>) -> Self {
        self.projection_url = url.into();
        self
    }

    /// Replace the exclusion list
    pub fn with_excluded_ids<S: Into<String>>(mut self, ids: impl IntoIterator<Item = S>) -> Self {
        self.excluded_ids = ids.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_group_size(mut self, group_size: usize) -> Self {
        self.group_size = group_size;
        self
    }

    fn is_excluded(&self, id: &str) -> bool {
        let upper = id.trim().to_ascii_uppercase();
        self.excluded_ids
            .iter()
            .any(|ex| ex.trim().eq_ignore_ascii_case(&upper))
    }
}

// ============================================================================
// Import
// ============================================================================

/// Build a schema from a metadata document.
///
/// Excluded columns are dropped from the properties, the presentation
/// fields and the form layout alike.
pub fn import_schema(doc: &MetadataDocument, options: &ImportOptions) -> CrudgenResult<Schema> {
    if let Some(pos) = doc.value.iter().position(|c| c.id.trim().is_empty()) {
        return Err(CrudgenError::metadata(format!("column {} has no Id", pos)));
    }

    let columns: Vec<&MetadataColumn> = doc
        .value
        .iter()
        .filter(|c| !options.is_excluded(&c.id))
        .collect();

    if columns.is_empty() {
        return Err(CrudgenError::metadata(format!(
            "no importable columns for '{}' ({} excluded)",
            options.class_name,
            doc.value.len()
        )));
    }

    let mut schema = Schema::new(options.namespace_prefix.clone(), options.class_name.clone())
        .with_title(options.presentation_title.clone())
        .with_menu_route(options.menu_route.clone())
        .with_projection_url(options.projection_url.clone());

    for column in &columns {
        schema.properties.push(column.to_property());
        schema.presentation_fields.push(column.to_field());
    }

    schema.auto_layout(options.group_size);
    schema.derive_unpack_checks();

    debug!(
        class_name = %schema.class_name,
        columns = doc.value.len(),
        imported = columns.len(),
        "Imported metadata document"
    );

    Ok(schema)
}

/// Load a metadata document from a JSON file
pub fn load_metadata(path: impl AsRef<Path>) -> CrudgenResult<MetadataDocument> {
    let path = path.as_ref();
    let content = read_document(path)?;
    parse_metadata(&content).map_err(|e| match e {
        CrudgenError::Json(je) => CrudgenError::FileRead {
            path: path.to_path_buf(),
            message: format!("Invalid metadata document: {}", je),
        },
        other => other,
    })
}

/// Parse a metadata document from JSON text
pub fn parse_metadata(json: &str) -> CrudgenResult<MetadataDocument> {
    Ok(serde_json::from_str(json)?)
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::UnpackField;
    use crudgen_core::Validatable;
    use pretty_assertions::assert_eq;

    const PROD_MODEL: &str = r#"{
        "value": [
            { "Id": "OBJSTATE", "Type": "STRING", "Label": "", "Length": null },
            { "Id": "OBJEVENTS", "Type": "STRING", "Label": null, "Length": 10 },
            { "Id": "STATE", "Type": "STRING", "Label": "State", "Length": "20" },
            { "Id": "OBJKEY", "Type": "STRING", "Label": "", "Length": 50 },
            { "Id": "EXPORT_NO", "Type": "STRING", "Label": "Export Serial No", "Length": 50 },
            { "Id": "IS_ACTIVE", "Type": "BOOLEAN", "Label": "Generator Activation",
              "PrimaryKey": "true", "Insertable": true, "Updateable": "false" }
        ]
    }"#;

    fn prod_model() -> Schema {
        let doc = parse_metadata(PROD_MODEL).unwrap();
        let options = ImportOptions::new("ProdModel", "Warranty.Setup").with_title("Product Model");
        import_schema(&doc, &options).unwrap()
    }

    #[test]
    fn test_excluded_ids_skipped_everywhere() {
        let schema = prod_model();
        assert!(schema.property("objkey").is_none());
        assert!(schema.field("objkey").is_none());
        assert!(!schema.layout_contains("objkey"));
    }

    #[test]
    fn test_properties_follow_type_mapping() {
        let schema = prod_model();
        let names: Vec<&str> = schema.properties.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["objstate", "objevents", "state", "exportNo", "isActive"]);

        let export_no = schema.property("exportNo").unwrap();
        assert_eq!(export_no.type_name, "string");
        assert_eq!(export_no.default, None);
        assert_eq!(export_no.serialized_key(), "export_no");

        let is_active = schema.property("isActive").unwrap();
        assert_eq!(is_active.type_name, "bool");
        assert_eq!(is_active.default, Some(DefaultLiteral::Bool(false)));
    }

    #[test]
    fn test_fields_follow_template() {
        let schema = prod_model();

        let objstate = schema.field("objstate").unwrap();
        assert_eq!(objstate.label, "OBJSTATE");
        assert_eq!(objstate.length, 100);
        assert!(objstate.detail);
        assert!(!objstate.insertable);

        assert_eq!(schema.field("objevents").unwrap().length, 10);
        assert_eq!(schema.field("state").unwrap().length, 20);

        let is_active = schema.field("is_active").unwrap();
        assert_eq!(is_active.field_type, FieldType::Checkbox);
        assert_eq!(is_active.input_type, FieldType::Checkbox);
        assert!(is_active.primary_key);
        assert!(is_active.insertable);
        assert!(!is_active.updateable);
        assert_eq!(is_active.length, 100);
    }

    #[test]
    fn test_layout_groups_of_four() {
        let schema = prod_model();
        assert_eq!(
            schema.form_layout_groups,
            vec![
                vec!["objstate", "objevents", "state", "export_no"],
                vec!["is_active"],
            ]
        );
    }

    #[test]
    fn test_unpack_only_insertable_or_updateable() {
        let schema = prod_model();
        assert_eq!(
            schema.unpack_check_fields,
            vec![UnpackField::new("is_active", true, false)]
        );
    }

    #[test]
    fn test_imported_schema_is_valid() {
        let mut schema = prod_model();
        schema.projection_url = "https://erp.example.com/projection/v1/ProdModel.svc".into();
        assert!(schema.is_valid(), "{:?}", schema.validation_errors());
    }

    #[test]
    fn test_mixed_case_ids_serialize_under_field_id() {
        let doc = parse_metadata(
            r#"{"value":[
                {"Id":"ExportNo","Type":"STRING"},
                {"Id":"HTTPCode","Type":"NUMBER"},
                {"Id":"ADDR2_LINE","Type":"STRING"}
            ]}"#,
        )
        .unwrap();
        let schema = import_schema(&doc, &ImportOptions::new("Export", "Sales")).unwrap();

        assert_eq!(schema.properties[0].name, "exportno");
        assert_eq!(schema.properties[1].name, "httpcode");
        assert_eq!(schema.properties[2].name, "addr2Line");
        for (prop, field) in schema.properties.iter().zip(&schema.presentation_fields) {
            assert_eq!(prop.serialized_key(), field.id);
        }
    }

    #[test]
    fn test_date_types() {
        let col = |t: &str| MetadataColumn {
            id: "D".into(),
            column_type: Some(t.into()),
            ..Default::default()
        };
        assert_eq!(col("DATE/DATE").field_type(), FieldType::Date);
        assert_eq!(col("Date/DateTime").field_type(), FieldType::Datetime);
        assert_eq!(col("DATE/DATE").property_type(), "");
        assert_eq!(col("NUMBER").to_property().default, Some(DefaultLiteral::Int(0)));
        assert_eq!(col("ENUMERATION").field_type(), FieldType::String);
    }

    #[test]
    fn test_custom_exclusions_and_group_size() {
        let doc = parse_metadata(PROD_MODEL).unwrap();
        let options = ImportOptions::new("ProdModel", "Warranty.Setup")
            .with_excluded_ids(["objstate", "OBJEVENTS"])
            .with_group_size(2);
        let schema = import_schema(&doc, &options).unwrap();

        assert!(schema.field("objkey").is_some());
        assert!(schema.field("objstate").is_none());
        assert_eq!(schema.form_layout_groups.len(), 2);
        assert_eq!(schema.form_layout_groups[0], vec!["state", "objkey"]);
    }

    #[test]
    fn test_empty_import_rejected() {
        let doc = parse_metadata(r#"{"value":[{"Id":"OBJKEY"}]}"#).unwrap();
        let err = import_schema(&doc, &ImportOptions::new("Empty", "")).unwrap_err();
        assert!(matches!(err, CrudgenError::InvalidMetadata(_)));

        let doc = parse_metadata(r#"{"value":[{"Type":"STRING"}]}"#).unwrap();
        assert!(import_schema(&doc, &ImportOptions::new("NoId", "")).is_err());
    }
}
