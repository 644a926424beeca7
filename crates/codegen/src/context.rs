//! # Render Context
//!
//! The `RenderContext` pairs a schema with the render options and answers
//! the naming questions every artifact asks: which class, which namespace,
//! which sibling class to import.

use crudgen_core::ArtifactKind;
use crudgen_ir::Schema;

use crate::RenderOptions;

// ============================================================================
// RenderContext
// ============================================================================

/// Everything one artifact render reads. Borrowed, never mutated.
#[derive(Debug, Clone, Copy)]
pub struct RenderContext<'a> {
    pub schema: &'a Schema,
    pub options: &'a RenderOptions,
}

impl<'a> RenderContext<'a> {
    pub fn new(schema: &'a Schema, options: &'a RenderOptions) -> Self {
        Self { schema, options }
    }

    /// Class name of a kind (`ProdModelDto`)
    pub fn class_name(&self, kind: ArtifactKind) -> String {
        self.schema.class_name_for(kind)
    }

    /// Namespace of a kind (`App\Dto\Warranty\Setup`)
    pub fn namespace(&self, kind: ArtifactKind) -> String {
        self.schema.namespace_for(kind)
    }

    /// Fully qualified class name of a kind
    pub fn fqcn(&self, kind: ArtifactKind) -> String {
        self.schema.fqcn_for(kind)
    }

    /// Entity name without any suffix (`ProdModel`)
    pub fn entity(&self) -> &str {
        &self.schema.class_name
    }
}

// ============================================================================
// Tests
// ============================================================================
