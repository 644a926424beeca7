//! Validation rules and utilities for crudgen schemas
//!
//! Each rule checks one concern of a `Schema` and declares which artifact
//! kinds depend on it, so a DTO render is not rejected because of a broken
//! form layout it never reads.

use crate::Schema;
use crudgen_core::naming::{is_valid_identifier, is_valid_type_annotation};
use crudgen_core::{ArtifactKind, CrudgenError, CrudgenResult};
use std::collections::HashSet;

// ============================================================================
// ValidationResult
// ============================================================================

/// Result of a validation operation
#[derive(Debug, Clone)]
pub struct ValidationResult {
    /// Whether the validation passed
    pub valid: bool,

    /// List of errors (empty if valid)
    pub errors: Vec<ValidationError>,

    /// List of warnings (non-fatal issues)
    pub warnings: Vec<ValidationWarning>,
}

impl ValidationResult {
    /// Create a successful validation result
    pub fn ok() -> Self {
        Self {
            valid: true,
            errors: Vec::new(),
            warnings: Vec::new(),
        }
    }

    /// Create a failed validation result with an error
    pub fn error(error: ValidationError) -> Self {
        Self {
            valid: false,
            errors: vec![error],
            warnings: Vec::new(),
        }
    }

    /// Add an error to the result
    pub fn add_error(&mut self, error: ValidationError) {
        self.valid = false;
        self.errors.push(error);
    }

    /// Add a warning to the result
    pub fn add_warning(&mut self, warning: ValidationWarning) {
        self.warnings.push(warning);
    }

    /// Merge another validation result into this one
    pub fn merge(&mut self, other: ValidationResult) {
        if !other.valid {
            self.valid = false;
        }
        self.errors.extend(other.errors);
        self.warnings.extend(other.warnings);
    }

    /// Check if there are any errors
    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    /// Check if there are any warnings
    pub fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }

    /// Convert to CrudgenResult (fails if any errors)
    pub fn to_result(self, schema_name: &str) -> CrudgenResult<()> {
        if self.valid {
            Ok(())
        } else {
            let issues = self.errors.iter().map(ToString::to_string).collect();
            Err(CrudgenError::schema_validation(schema_name, issues))
        }
    }
}

impl Default for ValidationResult {
    fn default() -> Self {
        Self::ok()
    }
}

// ============================================================================
// ValidationError
// ============================================================================

/// A validation error
#[derive(Debug, Clone)]
pub struct ValidationError {
    /// Error code for programmatic handling
    pub code: ValidationErrorCode,

    /// Human-readable error message
    pub message: String,

    /// Path to the problematic element (e.g., "properties.isActive")
    pub path: Option<String>,

    /// Suggested fix
    pub suggestion: Option<String>,
}

impl ValidationError {
    /// Create a new validation error
    pub fn new(code: ValidationErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            path: None,
            suggestion: None,
        }
    }

    /// Add a path to the error
    pub fn with_path(mut self, path: impl Into<String>) -> Self {
        self.path = Some(path.into());
        self
    }

    /// Add a suggestion to the error
    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestion = Some(suggestion.into());
        self
    }
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if let Some(path) = &self.path {
            write!(f, "[{}] {}", path, self.message)
        } else {
            write!(f, "{}", self.message)
        }
    }
}

// ============================================================================
// ValidationErrorCode
// ============================================================================

/// Error codes for validation errors
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValidationErrorCode {
    // Class errors
    EmptyClassName,
    InvalidClassName,
    InvalidNamespace,
    InvalidRoute,

    // Property errors
    NoProperties,
    InvalidPropertyName,
    DuplicatePropertyName,
    DuplicateSerializedKey,
    InvalidPropertyType,

    // Presentation errors
    InvalidFieldId,
    DuplicateFieldId,
    UnknownLayoutId,
    FieldNotInLayout,
    DuplicateLayoutId,
    UnknownUnpackId,
    DuplicateUnpackId,

    // Generic
    Custom,
}

// ============================================================================
// ValidationWarning
// ============================================================================

/// A validation warning (non-fatal issue)
#[derive(Debug, Clone)]
pub struct ValidationWarning {
    /// Warning code
    pub code: ValidationWarningCode,

    /// Human-readable warning message
    pub message: String,

    /// Path to the element
    pub path: Option<String>,
}

impl ValidationWarning {
    /// Create a new warning
    pub fn new(code: ValidationWarningCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            path: None,
        }
    }

    /// Add a path
    pub fn with_path(mut self, path: impl Into<String>) -> Self {
        self.path = Some(path.into());
        self
    }
}

impl std::fmt::Display for ValidationWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if let Some(path) = &self.path {
            write!(f, "[{}] Warning: {}", path, self.message)
        } else {
            write!(f, "Warning: {}", self.message)
        }
    }
}

// ============================================================================
// ValidationWarningCode
// ============================================================================

/// Warning codes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValidationWarningCode {
    EmptyLabel,
    EmptyLayoutGroup,
    UnpackNoOp,
    NoProjectionUrl,
    Custom,
}

// ============================================================================
// ValidationRule Trait
// ============================================================================

/// Trait for validation rules
pub trait ValidationRule: Send + Sync {
    /// Get the rule name
    fn name(&self) -> &'static str;

    /// Get the rule description
    fn description(&self) -> &'static str;

    /// Artifact kinds whose output depends on this rule
    fn kinds(&self) -> &'static [ArtifactKind] {
        &ArtifactKind::ALL
    }

    /// Validate a schema and return the result
    fn validate(&self, schema: &Schema) -> ValidationResult;
}

// ============================================================================
// Validator
// ============================================================================

/// Schema validator that runs multiple validation rules
#[derive(Default)]
pub struct Validator {
    rules: Vec<Box<dyn ValidationRule>>,
}

impl Validator {
    /// Create a new validator
    pub fn new() -> Self {
        Self { rules: Vec::new() }
    }

    /// Create a validator with every built-in rule
    pub fn with_default_rules() -> Self {
        let mut validator = Self::new();
        for rule in default_rules() {
            validator.add_rule(rule);
        }
        validator
    }

    /// Create a validator with the built-in rules one artifact kind depends on
    pub fn for_kind(kind: ArtifactKind) -> Self {
        let mut validator = Self::new();
        for rule in default_rules() {
            if rule.kinds().contains(&kind) {
                validator.add_rule(rule);
            }
        }
        validator
    }

    /// Add a validation rule
    pub fn add_rule(&mut self, rule: Box<dyn ValidationRule>) {
        self.rules.push(rule);
    }

    /// Names of the configured rules, in run order
    pub fn rule_names(&self) -> Vec<&'static str> {
        self.rules.iter().map(|r| r.name()).collect()
    }

    /// Validate a schema with all rules
    pub fn validate(&self, schema: &Schema) -> ValidationResult {
        let mut result = ValidationResult::ok();

        for rule in &self.rules {
            let rule_result = rule.validate(schema);
            result.merge(rule_result);
        }

        result
    }

    /// Validate and return Result
    pub fn validate_result(&self, schema: &Schema) -> CrudgenResult<()> {
        self.validate(schema).to_result(&schema.class_name)
    }
}

fn default_rules() -> Vec<Box<dyn ValidationRule>> {
    vec![
        Box::new(ClassNameRule),
        Box::new(NamespaceRule),
        Box::new(RouteRule),
        Box::new(PropertiesRule),
        Box::new(PresentationFieldsRule),
        Box::new(FormLayoutRule),
        Box::new(UnpackCheckRule),
        Box::new(ProjectionUrlRule),
    ]
}

// ============================================================================
// Built-in Validation Rules
// ============================================================================

/// Rule: Validate the class name
pub struct ClassNameRule;

impl ValidationRule for ClassNameRule {
    fn name(&self) -> &'static str {
        "class_name"
    }

    fn description(&self) -> &'static str {
        "Validates that the class name is a valid identifier"
    }

    fn validate(&self, schema: &Schema) -> ValidationResult {
        if schema.class_name.is_empty() {
            return ValidationResult::error(
                ValidationError::new(ValidationErrorCode::EmptyClassName, "Class name cannot be empty")
                    .with_path("className"),
            );
        }

        if !is_valid_identifier(&schema.class_name) {
            return ValidationResult::error(
                ValidationError::new(
                    ValidationErrorCode::InvalidClassName,
                    format!("Class name '{}' is not a valid identifier", schema.class_name),
                )
                .with_path("className")
                .with_suggestion("Use PascalCase with only letters and numbers"),
            );
        }

        ValidationResult::ok()
    }
}

/// Rule: Validate the namespace prefix
pub struct NamespaceRule;

impl ValidationRule for NamespaceRule {
    fn name(&self) -> &'static str {
        "namespace"
    }

    fn description(&self) -> &'static str {
        "Validates that every namespace segment is a valid identifier"
    }

    fn validate(&self, schema: &Schema) -> ValidationResult {
        let mut result = ValidationResult::ok();

        for segment in schema.namespace_prefix.segments() {
            if !is_valid_identifier(segment) {
                result.add_error(
                    ValidationError::new(
                        ValidationErrorCode::InvalidNamespace,
                        format!(
                            "Namespace segment '{}' of '{}' is not a valid identifier",
                            segment,
                            schema.namespace_prefix.to_dotted()
                        ),
                    )
                    .with_path("namespacePrefix"),
                );
            }
        }

        result
    }
}

/// Rule: Validate the menu route
pub struct RouteRule;

impl ValidationRule for RouteRule {
    fn name(&self) -> &'static str {
        "route"
    }

    fn description(&self) -> &'static str {
        "Validates that the registered route contains no whitespace or quotes"
    }

    fn kinds(&self) -> &'static [ArtifactKind] {
        &[ArtifactKind::Controller]
    }

    fn validate(&self, schema: &Schema) -> ValidationResult {
        let route = &schema.menu_route;
        if route.chars().any(|c| c.is_whitespace() || c == '"' || c == '\'') {
            return ValidationResult::error(
                ValidationError::new(
                    ValidationErrorCode::InvalidRoute,
                    format!("Menu route '{}' contains whitespace or quotes", route),
                )
                .with_path("menuRoute"),
            );
        }

        ValidationResult::ok()
    }
}

/// Rule: Validate DTO properties
pub struct PropertiesRule;

impl ValidationRule for PropertiesRule {
    fn name(&self) -> &'static str {
        "properties"
    }

    fn description(&self) -> &'static str {
        "Validates that the DTO has uniquely named, well-typed properties"
    }

    fn kinds(&self) -> &'static [ArtifactKind] {
        &[ArtifactKind::Dto]
    }

    fn validate(&self, schema: &Schema) -> ValidationResult {
        let mut result = ValidationResult::ok();

        if schema.properties.is_empty() {
            result.add_error(
                ValidationError::new(
                    ValidationErrorCode::NoProperties,
                    format!("DTO '{}' has no properties", schema.class_name),
                )
                .with_path("properties"),
            );
            return result;
        }

        let mut seen_names: HashSet<&str> = HashSet::new();
        let mut seen_keys: HashSet<String> = HashSet::new();

        for property in &schema.properties {
            let path = format!("properties.{}", property.name);

            if !is_valid_identifier(&property.name) {
                result.add_error(
                    ValidationError::new(
                        ValidationErrorCode::InvalidPropertyName,
                        format!("Property name '{}' is not a valid identifier", property.name),
                    )
                    .with_path(&path),
                );
            }

            if !seen_names.insert(&property.name) {
                result.add_error(
                    ValidationError::new(
                        ValidationErrorCode::DuplicatePropertyName,
                        format!("Duplicate property name: '{}'", property.name),
                    )
                    .with_path(&path),
                );
                continue;
            }

            if !is_valid_type_annotation(&property.type_name) {
                result.add_error(
                    ValidationError::new(
                        ValidationErrorCode::InvalidPropertyType,
                        format!(
                            "Property '{}' has malformed type '{}'",
                            property.name, property.type_name
                        ),
                    )
                    .with_path(&path)
                    .with_suggestion("Use a class or scalar name, optionally '?'-prefixed or '|'-joined"),
                );
            }

            let key = property.serialized_key();
            if !seen_keys.insert(key.clone()) {
                result.add_error(
                    ValidationError::new(
                        ValidationErrorCode::DuplicateSerializedKey,
                        format!(
                            "Property '{}' serializes to '{}', which an earlier property already uses",
                            property.name, key
                        ),
                    )
                    .with_path(&path)
                    .with_suggestion("Rename one property; jsonSerialize would keep only the last value"),
                );
            }
        }

        result
    }
}

/// Rule: Validate presentation fields
pub struct PresentationFieldsRule;

impl ValidationRule for PresentationFieldsRule {
    fn name(&self) -> &'static str {
        "presentation_fields"
    }

    fn description(&self) -> &'static str {
        "Validates that presentation field ids are valid and unique"
    }

    fn kinds(&self) -> &'static [ArtifactKind] {
        &[ArtifactKind::Presentation]
    }

    fn validate(&self, schema: &Schema) -> ValidationResult {
        let mut result = ValidationResult::ok();
        let mut seen_ids: HashSet<&str> = HashSet::new();

        for field in &schema.presentation_fields {
            let path = format!("presentationFields.{}", field.id);

            if !is_valid_identifier(&field.id) {
                result.add_error(
                    ValidationError::new(
                        ValidationErrorCode::InvalidFieldId,
                        format!("Field id '{}' is not a valid identifier", field.id),
                    )
                    .with_path(&path),
                );
            }

            if !seen_ids.insert(&field.id) {
                result.add_error(
                    ValidationError::new(
                        ValidationErrorCode::DuplicateFieldId,
                        format!("Duplicate field id: '{}'", field.id),
                    )
                    .with_path(&path),
                );
            }

            if field.label.trim().is_empty() {
                result.add_warning(
                    ValidationWarning::new(
                        ValidationWarningCode::EmptyLabel,
                        format!("Field '{}' has an empty label", field.id),
                    )
                    .with_path(&path),
                );
            }
        }

        result
    }
}

/// Rule: Validate the form layout against the presentation fields
pub struct FormLayoutRule;

impl ValidationRule for FormLayoutRule {
    fn name(&self) -> &'static str {
        "form_layout"
    }

    fn description(&self) -> &'static str {
        "Validates that the form layout places every field exactly once"
    }

    fn kinds(&self) -> &'static [ArtifactKind] {
        &[ArtifactKind::Presentation]
    }

    fn validate(&self, schema: &Schema) -> ValidationResult {
        let mut result = ValidationResult::ok();
        let mut placed: HashSet<&str> = HashSet::new();

        for (index, group) in schema.form_layout_groups.iter().enumerate() {
            let path = format!("formLayoutGroups[{}]", index);

            if group.is_empty() {
                result.add_warning(
                    ValidationWarning::new(ValidationWarningCode::EmptyLayoutGroup, "Empty layout group")
                        .with_path(&path),
                );
            }

            for id in group {
                if schema.field(id).is_none() {
                    result.add_error(
                        ValidationError::new(
                            ValidationErrorCode::UnknownLayoutId,
                            format!("Layout references unknown field '{}'", id),
                        )
                        .with_path(&path),
                    );
                }

                if !placed.insert(id) {
                    result.add_error(
                        ValidationError::new(
                            ValidationErrorCode::DuplicateLayoutId,
                            format!("Field '{}' appears more than once in the layout", id),
                        )
                        .with_path(&path),
                    );
                }
            }
        }

        for field in &schema.presentation_fields {
            if !placed.contains(field.id.as_str()) {
                result.add_error(
                    ValidationError::new(
                        ValidationErrorCode::FieldNotInLayout,
                        format!("Field '{}' is missing from the form layout", field.id),
                    )
                    .with_path(format!("presentationFields.{}", field.id))
                    .with_suggestion("Add the id to a formLayoutGroups row"),
                );
            }
        }

        result
    }
}

/// Rule: Validate the unpack-check list
pub struct UnpackCheckRule;

impl ValidationRule for UnpackCheckRule {
    fn name(&self) -> &'static str {
        "unpack_check"
    }

    fn description(&self) -> &'static str {
        "Validates that unpack-check entries reference existing fields"
    }

    fn kinds(&self) -> &'static [ArtifactKind] {
        &[ArtifactKind::Presentation]
    }

    fn validate(&self, schema: &Schema) -> ValidationResult {
        let mut result = ValidationResult::ok();
        let mut seen_ids: HashSet<&str> = HashSet::new();

        for entry in &schema.unpack_check_fields {
            let path = format!("unpackCheckFields.{}", entry.id);

            if schema.field(&entry.id).is_none() {
                result.add_error(
                    ValidationError::new(
                        ValidationErrorCode::UnknownUnpackId,
                        format!("Unpack check references unknown field '{}'", entry.id),
                    )
                    .with_path(&path),
                );
            }

            if !seen_ids.insert(&entry.id) {
                result.add_error(
                    ValidationError::new(
                        ValidationErrorCode::DuplicateUnpackId,
                        format!("Duplicate unpack check entry: '{}'", entry.id),
                    )
                    .with_path(&path),
                );
            }

            if !entry.insertable && !entry.updateable {
                result.add_warning(
                    ValidationWarning::new(
                        ValidationWarningCode::UnpackNoOp,
                        format!("Unpack check entry '{}' is neither insertable nor updateable", entry.id),
                    )
                    .with_path(&path),
                );
            }
        }

        result
    }
}

/// Rule: Check the service's projection URL
pub struct ProjectionUrlRule;

impl ValidationRule for ProjectionUrlRule {
    fn name(&self) -> &'static str {
        "projection_url"
    }

    fn description(&self) -> &'static str {
        "Warns when the service has no projection API URL"
    }

    fn kinds(&self) -> &'static [ArtifactKind] {
        &[ArtifactKind::Service]
    }

    fn validate(&self, schema: &Schema) -> ValidationResult {
        let mut result = ValidationResult::ok();

        if schema.projection_url.trim().is_empty() {
            result.add_warning(
                ValidationWarning::new(
                    ValidationWarningCode::NoProjectionUrl,
                    format!("Service '{}' has no projection URL", schema.class_name),
                )
                .with_path("projectionUrl"),
            );
        }

        result
    }
}

// ============================================================================
// Tests
// ============================================================================
