//! Schema definitions for crudgen
//!
//! This module contains `Schema`, the single declarative input of a render
//! call: one entity's class name and namespace, its DTO properties and its
//! presentation description.

use crate::validation::Validator;
use crate::{NamespacePath, PresentationField, PresentationOptions, Property, UnpackField};
use crudgen_core::naming::{to_kebab_case, to_title_case};
use crudgen_core::{ArtifactKind, CrudgenResult, Validatable};
use serde::{Deserialize, Serialize};

// ============================================================================
// Schema
// ============================================================================

/// Declarative description of one entity and its presentation
///
/// A schema is read-only input: renderers borrow it and never mutate it, so
/// the same value can be rendered any number of times, from any thread.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Schema {
    /// Sub-namespace under each kind's root (`Warranty.Setup`)
    pub namespace_prefix: NamespacePath,

    /// Base class name (`ProdModel`); kind suffixes are appended
    pub class_name: String,

    /// DTO properties, in declaration order
    #[serde(default)]
    pub properties: Vec<Property>,

    /// Presentation fields, in display order
    #[serde(default)]
    pub presentation_fields: Vec<PresentationField>,

    /// Form layout rows, each an ordered list of field ids
    #[serde(default)]
    pub form_layout_groups: Vec<Vec<String>>,

    /// Fields eligible for partial-update diffing
    #[serde(default)]
    pub unpack_check_fields: Vec<UnpackField>,

    /// Page title; empty falls back to the class name in title case
    #[serde(default)]
    pub presentation_title: String,

    /// Route the controller registers; empty falls back to the class name in kebab case
    #[serde(default)]
    pub menu_route: String,

    /// External API base URL wired into the service
    #[serde(default)]
    pub projection_url: String,

    /// Page-level presentation flags
    #[serde(default)]
    pub presentation_options: PresentationOptions,
}

impl Schema {
    /// Create an empty schema for a class
    pub fn new(namespace_prefix: impl Into<NamespacePath>, class_name: impl Into<String>) -> Self {
        Self {
            namespace_prefix: namespace_prefix.into(),
            class_name: class_name.into(),
            properties: Vec::new(),
            presentation_fields: Vec::new(),
            form_layout_groups: Vec::new(),
            unpack_check_fields: Vec::new(),
            presentation_title: String::new(),
            menu_route: String::new(),
            projection_url: String::new(),
            presentation_options: PresentationOptions::default(),
        }
    }

    // ========================================================================
    // Builder methods
    // ========================================================================

    /// Add a DTO property
    pub fn with_property(mut self, property: Property) -> Self {
        self.properties.push(property);
        self
    }

    /// Add a presentation field
    pub fn with_field(mut self, field: PresentationField) -> Self {
        self.presentation_fields.push(field);
        self
    }

    /// Add a form layout row
    pub fn with_layout_group<S: Into<String>>(mut self, ids: impl IntoIterator<Item = S>) -> Self {
        self.form_layout_groups
            .push(ids.into_iter().map(Into::into).collect());
        self
    }

    /// Add an unpack-check entry
    pub fn with_unpack(mut self, entry: UnpackField) -> Self {
        self.unpack_check_fields.push(entry);
        self
    }

    /// Set the presentation title
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.presentation_title = title.into();
        self
    }

    /// Set the menu route
    pub fn with_menu_route(mut self, route: impl Into<String>) -> Self {
        self.menu_route = route.into();
        self
    }

    /// Set the projection API URL
    pub fn with_projection_url(mut self, url: impl Into<String>) -> Self {
        self.projection_url = url.into();
        self
    }

    // ========================================================================
    // Derived values
    // ========================================================================

    /// Class name for one artifact kind (`ProdModel` → `ProdModelDto`)
    pub fn class_name_for(&self, kind: ArtifactKind) -> String {
        format!("{}{}", self.class_name, kind.suffix())
    }

    /// Namespace of one artifact kind (`App\Dto\Warranty\Setup`)
    pub fn namespace_for(&self, kind: ArtifactKind) -> String {
        self.namespace_prefix.under(kind.namespace_root())
    }

    /// Fully qualified class name of one artifact kind
    pub fn fqcn_for(&self, kind: ArtifactKind) -> String {
        format!("{}\\{}", self.namespace_for(kind), self.class_name_for(kind))
    }

    /// Title shown on the page
    pub fn display_title(&self) -> String {
        if self.presentation_title.trim().is_empty() {
            to_title_case(&self.class_name)
        } else {
            self.presentation_title.clone()
        }
    }

    /// Route registered by the controller
    pub fn route(&self) -> String {
        if self.menu_route.trim().is_empty() {
            to_kebab_case(&self.class_name)
        } else {
            self.menu_route.clone()
        }
    }

    /// Look up a presentation field by id
    pub fn field(&self, id: &str) -> Option<&PresentationField> {
        self.presentation_fields.iter().find(|f| f.id == id)
    }

    /// Look up a property by name
    pub fn property(&self, name: &str) -> Option<&Property> {
        self.properties.iter().find(|p| p.name == name)
    }

    /// Every field id mentioned in the form layout, in layout order
    pub fn layout_ids(&self) -> impl Iterator<Item = &str> {
        self.form_layout_groups
            .iter()
            .flat_map(|group| group.iter().map(String::as_str))
    }

    /// Whether a field id appears anywhere in the form layout
    pub fn layout_contains(&self, id: &str) -> bool {
        self.layout_ids().any(|l| l == id)
    }

    /// Serialized DTO keys of the own properties, in declaration order
    pub fn serialized_keys(&self) -> Vec<String> {
        self.properties.iter().map(Property::serialized_key).collect()
    }

    // ========================================================================
    // Derivation helpers
    // ========================================================================

    /// Lay every presentation field out in rows of `group_size`, in field order.
    ///
    /// A `group_size` of zero is treated as one field per row.
    pub fn auto_layout(&mut self, group_size: usize) {
        let size = group_size.max(1);
        self.form_layout_groups = self
            .presentation_fields
            .chunks(size)
            .map(|chunk| chunk.iter().map(|f| f.id.clone()).collect())
            .collect();
    }

    /// Rebuild the unpack-check list from the fields' insert/update flags
    pub fn derive_unpack_checks(&mut self) {
        self.unpack_check_fields = self
            .presentation_fields
            .iter()
            .filter(|f| f.participates_in_unpack())
            .map(UnpackField::from)
            .collect();
    }
}

impl Validatable for Schema {
    fn validate(&self) -> CrudgenResult<()> {
        Validator::with_default_rules().validate_result(self)
    }
}

// ============================================================================
// Tests
// ============================================================================
