//! # crudgen IR (schema model)
//!
//! This crate provides the schema model crudgen renders from. It contains
//! the data structures describing one entity, the rules that check them,
//! and the readers that produce them from schema documents, table metadata
//! and batch manifests.
//!
//! ## Core Concepts
//!
//! - **Schema**: one entity: class name, namespace prefix, DTO properties and presentation
//! - **Property**: a DTO field with an optional type and a constructor default
//! - **PresentationField**: one displayed column of the generated presentation
//! - **UnpackField**: insert/update eligibility used for partial-update diffing
//! - **Manifest**: a TOML batch of entities generated in one run
//!

// Module declarations
pub mod manifest;
pub mod metadata;
pub mod namespace;
pub mod presentation;
pub mod property;
pub mod schema;
pub mod serialization;
pub mod validation;

// Re-export commonly used types at crate root
pub use manifest::{Manifest, ManifestEntity, load_manifest, parse_manifest};
pub use metadata::{
    DEFAULT_EXCLUDED_IDS, DEFAULT_GROUP_SIZE, ImportOptions, MetadataColumn, MetadataDocument,
    import_schema, load_metadata, parse_metadata,
};
pub use namespace::NamespacePath;
pub use presentation::{
    FieldType, PresentationField, PresentationOptions, ScannerButtons, ToolbarButtons,
    UnpackField, ZoomLink,
};
pub use property::{DefaultLiteral, Property};
pub use schema::Schema;
pub use serialization::{
    DocumentFormat, load_schema, load_schema_from_str, save_schema, save_schema_to_string,
};
pub use validation::{ValidationResult, ValidationRule, Validator};

// Re-export core types that are commonly used with the schema model
pub use crudgen_core::{ArtifactKind, CrudgenError, CrudgenResult, Validatable};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// ============================================================================
// Prelude Module
// ============================================================================

/// Convenient re-exports for common usage
pub mod prelude {
    pub use crate::{
        // Re-exported from core
        ArtifactKind,
        CrudgenError,
        CrudgenResult,
        // Model
        DefaultLiteral,
        FieldType,
        NamespacePath,
        PresentationField,
        Property,
        Schema,
        UnpackField,
        Validatable,
        ZoomLink,
        // Readers
        load_manifest,
        load_schema,
    };
}

// ============================================================================
// Tests
// ============================================================================
