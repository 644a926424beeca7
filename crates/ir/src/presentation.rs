//! Presentation metadata
//!
//! Everything the generated presentation class needs besides the form
//! layout: one `PresentationField` per displayed column, optional zoom links
//! to other entities, the unpack-check list and the fixed page-level flags.

use serde::{Deserialize, Deserializer, Serialize};

// ============================================================================
// FieldType
// ============================================================================

/// Case of the framework's `FieldTypeEnum`
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum FieldType {
    #[default]
    String,
    Number,
    Checkbox,
    Boolean,
    Date,
    Datetime,
    Time,
    Textarea,
    Lov,
}

impl FieldType {
    /// Enum case name (`STRING`)
    pub fn case_name(&self) -> &'static str {
        match self {
            FieldType::String => "STRING",
            FieldType::Number => "NUMBER",
            FieldType::Checkbox => "CHECKBOX",
            FieldType::Boolean => "BOOLEAN",
            FieldType::Date => "DATE",
            FieldType::Datetime => "DATETIME",
            FieldType::Time => "TIME",
            FieldType::Textarea => "TEXTAREA",
            FieldType::Lov => "LOV",
        }
    }

    /// Class-constant reference used in generated code (`FieldTypeEnum::STRING`)
    pub fn to_php(&self) -> String {
        format!("FieldTypeEnum::{}", self.case_name())
    }
}

// ============================================================================
// ZoomLink
// ============================================================================

/// Cross-reference from a presentation field to another entity's view
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ZoomLink {
    pub id: String,
    pub name: String,
    pub source_param: Vec<String>,
    pub target_param: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub zoom_controller: Option<String>,
    /// Tab to open in the target view (internal zooms only)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tab: Option<String>,
    pub open_new_tab: bool,
}

impl ZoomLink {
    /// Create a zoom link
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            ..Self::default()
        }
    }

    /// Set the parameter mapping
    pub fn with_params(mut self, source: &[&str], target: &[&str]) -> Self {
        self.source_param = source.iter().map(|s| s.to_string()).collect();
        self.target_param = target.iter().map(|s| s.to_string()).collect();
        self
    }

    /// Set the controller the zoom opens
    pub fn with_controller(mut self, controller: impl Into<String>) -> Self {
        self.zoom_controller = Some(controller.into());
        self
    }

    /// Set the tab the zoom opens
    pub fn with_tab(mut self, tab: impl Into<String>) -> Self {
        self.tab = Some(tab.into());
        self
    }
}

/// Accept either a single zoom record or a list of them
fn one_or_many<'de, D>(deserializer: D) -> Result<Option<Vec<ZoomLink>>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum OneOrMany {
        Many(Vec<ZoomLink>),
        One(ZoomLink),
    }

    Ok(Option::<OneOrMany>::deserialize(deserializer)?.map(|v| match v {
        OneOrMany::Many(links) => links,
        OneOrMany::One(link) => vec![link],
    }))
}

// ============================================================================
// PresentationField
// ============================================================================

/// One field of the generated presentation
///
/// Missing keys in a schema document take the framework's default field
/// template values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PresentationField {
    pub id: String,
    pub label: String,
    #[serde(rename = "type")]
    pub field_type: FieldType,
    pub input_type: FieldType,
    pub length: u32,
    pub primary_key: bool,
    pub presentation: bool,
    pub hidden: bool,
    pub visible: bool,
    pub detail: bool,
    pub mandatory: bool,
    pub insertable: bool,
    pub updateable: bool,
    pub onchange: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub onchange_lookup: Option<Vec<String>>,
    pub lov: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lov_detail: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reference_controller: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reference_service: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reference_pres: Option<String>,
    pub iid: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub static_iid_enum: Option<String>,
    pub uploader: bool,
    pub downloader: bool,
    pub thousand_separator: bool,
    pub decimal_precision: u32,
    #[serde(deserialize_with = "one_or_many", skip_serializing_if = "Option::is_none")]
    pub internal_zoom_content: Option<Vec<ZoomLink>>,
    #[serde(deserialize_with = "one_or_many", skip_serializing_if = "Option::is_none")]
    pub external_zoom_content: Option<Vec<ZoomLink>>,
}

impl Default for PresentationField {
    fn default() -> Self {
        Self {
            id: String::new(),
            label: String::new(),
            field_type: FieldType::String,
            input_type: FieldType::String,
            length: 100,
            primary_key: false,
            presentation: true,
            hidden: false,
            visible: true,
            detail: false,
            mandatory: false,
            insertable: true,
            updateable: true,
            onchange: false,
            onchange_lookup: None,
            lov: false,
            lov_detail: None,
            reference_controller: None,
            reference_service: None,
            reference_pres: None,
            iid: false,
            static_iid_enum: None,
            uploader: false,
            downloader: false,
            thousand_separator: false,
            decimal_precision: 2,
            internal_zoom_content: None,
            external_zoom_content: None,
        }
    }
}

impl PresentationField {
    /// Create a field with template defaults
    pub fn new(id: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            ..Self::default()
        }
    }

    /// Set both the display type and the input type
    pub fn with_type(mut self, field_type: FieldType) -> Self {
        self.field_type = field_type;
        self.input_type = field_type;
        self
    }

    /// Set the maximum length
    pub fn with_length(mut self, length: u32) -> Self {
        self.length = length;
        self
    }

    /// Mark as primary key
    pub fn primary_key(mut self) -> Self {
        self.primary_key = true;
        self
    }

    /// Mark as mandatory
    pub fn mandatory(mut self) -> Self {
        self.mandatory = true;
        self
    }

    /// Set the insert/update flags
    pub fn with_access(mut self, insertable: bool, updateable: bool) -> Self {
        self.insertable = insertable;
        self.updateable = updateable;
        self
    }

    /// Attach internal zoom links
    pub fn with_internal_zoom(mut self, links: Vec<ZoomLink>) -> Self {
        self.internal_zoom_content = Some(links);
        self
    }

    /// Attach external zoom links
    pub fn with_external_zoom(mut self, links: Vec<ZoomLink>) -> Self {
        self.external_zoom_content = Some(links);
        self
    }

    /// Whether the field takes part in partial-update diffing
    pub fn participates_in_unpack(&self) -> bool {
        self.insertable || self.updateable
    }
}

// ============================================================================
// UnpackField
// ============================================================================

/// Insert/update eligibility of one field for partial-update diffing
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UnpackField {
    pub id: String,
    #[serde(default)]
    pub insertable: bool,
    #[serde(default)]
    pub updateable: bool,
}

impl UnpackField {
    /// Create an unpack entry
    pub fn new(id: impl Into<String>, insertable: bool, updateable: bool) -> Self {
        Self {
            id: id.into(),
            insertable,
            updateable,
        }
    }
}

impl From<&PresentationField> for UnpackField {
    fn from(field: &PresentationField) -> Self {
        Self::new(field.id.clone(), field.insertable, field.updateable)
    }
}

// ============================================================================
// PresentationOptions
// ============================================================================

/// Page-level flags of the generated presentation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PresentationOptions {
    pub table: bool,
    pub form: bool,
    pub tab: bool,
    pub readonly: bool,
    pub auto_populate: bool,
    pub find_by_primary_key: bool,
    pub toolbar: ToolbarButtons,
    pub scanner: ScannerButtons,
}

impl Default for PresentationOptions {
    fn default() -> Self {
        Self {
            table: true,
            form: true,
            tab: false,
            readonly: false,
            auto_populate: true,
            find_by_primary_key: false,
            toolbar: ToolbarButtons::default(),
            scanner: ScannerButtons::default(),
        }
    }
}

/// Toolbar buttons shown above the table
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ToolbarButtons {
    pub refresh: bool,
    pub operation: bool,
    pub create: bool,
    pub edit: bool,
    pub delete: bool,
}

impl Default for ToolbarButtons {
    fn default() -> Self {
        Self {
            refresh: true,
            operation: false,
            create: true,
            edit: true,
            delete: true,
        }
    }
}

/// Scanner buttons
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScannerButtons {
    pub qrcode: bool,
    pub barcode: bool,
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_field_defaults_follow_template() {
        let field = PresentationField::new("state", "State");
        assert_eq!(field.length, 100);
        assert!(field.presentation);
        assert!(field.visible);
        assert!(!field.hidden);
        assert!(field.insertable);
        assert!(field.updateable);
        assert_eq!(field.decimal_precision, 2);
        assert!(field.internal_zoom_content.is_none());
    }

    #[test]
    fn test_field_deserialize_sparse_document() {
        let field: PresentationField = serde_json::from_str(
            r#"{"id":"is_active","label":"Generator Activation","type":"CHECKBOX","inputType":"CHECKBOX","primaryKey":true,"updateable":false}"#,
        )
        .unwrap();

        assert_eq!(field.field_type, FieldType::Checkbox);
        assert!(field.primary_key);
        assert!(field.insertable);
        assert!(!field.updateable);
        assert_eq!(field.length, 100);
    }

    #[test]
    fn test_zoom_accepts_single_record() {
        let field: PresentationField = serde_json::from_str(
            r#"{"id":"part_no","label":"Part","internalZoomContent":{"id":"z1","name":"Part","sourceParam":["part_no"],"targetParam":["part_no"],"zoomController":"PartController","tab":"general","openNewTab":true}}"#,
        )
        .unwrap();

        let zoom = field.internal_zoom_content.unwrap();
        assert_eq!(zoom.len(), 1);
        assert_eq!(zoom[0].zoom_controller.as_deref(), Some("PartController"));
        assert_eq!(zoom[0].tab.as_deref(), Some("general"));
        assert!(zoom[0].open_new_tab);
        assert!(field.external_zoom_content.is_none());
    }

    #[test]
    fn test_zoom_accepts_list_and_null() {
        let field: PresentationField = serde_json::from_str(
            r#"{"id":"a","externalZoomContent":[{"id":"z1","name":"One"},{"id":"z2","name":"Two"}],"internalZoomContent":null}"#,
        )
        .unwrap();

        assert_eq!(field.external_zoom_content.unwrap().len(), 2);
        assert!(field.internal_zoom_content.is_none());
    }

    #[test]
    fn test_field_type_php() {
        assert_eq!(FieldType::Datetime.to_php(), "FieldTypeEnum::DATETIME");
        let parsed: FieldType = serde_json::from_str("\"NUMBER\"").unwrap();
        assert_eq!(parsed, FieldType::Number);
    }

    #[test]
    fn test_unpack_from_field() {
        let field = PresentationField::new("qty", "Qty").with_access(true, false);
        assert!(field.participates_in_unpack());
        assert_eq!(UnpackField::from(&field), UnpackField::new("qty", true, false));

        let locked = PresentationField::new("objstate", "State").with_access(false, false);
        assert!(!locked.participates_in_unpack());
    }

    #[test]
    fn test_presentation_options_defaults() {
        let opts: PresentationOptions = serde_json::from_str(r#"{"readonly":true}"#).unwrap();
        assert!(opts.readonly);
        assert!(opts.table);
        assert!(opts.auto_populate);
        assert!(opts.toolbar.refresh);
        assert!(!opts.toolbar.operation);
        assert!(!opts.scanner.qrcode);
    }
}
