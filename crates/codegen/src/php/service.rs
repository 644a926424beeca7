//! # Service Generator
//!
//! Generates `{Class}Service`: the projection API URL, a lazily created
//! instance cached in a static slot declared on the class itself (so every
//! service keeps its own instance), and the `transformDto` guard.

use crudgen_core::{ArtifactKind, php};

use super::INDENT;
use crate::artifact::{Artifact, transform_dto_hook};
use crate::context::RenderContext;

/// Renders `{Class}Service`
pub struct ServiceArtifact;

impl Artifact for ServiceArtifact {
    fn kind(&self) -> ArtifactKind {
        ArtifactKind::Service
    }

    fn imports(&self, ctx: &RenderContext<'_>) -> Vec<String> {
        vec![
            ArtifactKind::Dto.base_class_fqn(),
            ArtifactKind::Service.base_class_fqn(),
            ctx.fqcn(ArtifactKind::Dto),
        ]
    }

    fn body(&self, ctx: &RenderContext<'_>) -> String {
        let mut out = String::with_capacity(1024);

        out.push_str(&format!("{INDENT}protected static $instance = null;\n\n"));

        // Constructor
        out.push_str(&format!("{INDENT}public function __construct()\n{INDENT}{{\n"));
        out.push_str(&format!("{INDENT}{INDENT}parent::__construct();\n"));
        out.push_str(&format!(
            "{INDENT}{INDENT}$this->ifsProjectionAPIUrl = {};\n",
            php::string_literal(&ctx.schema.projection_url)
        ));
        out.push_str(&format!("{INDENT}}}\n\n"));

        // Lazy accessor
        out.push_str(&format!("{INDENT}public static function getInstance()\n{INDENT}{{\n"));
        out.push_str(&format!("{INDENT}{INDENT}if (self::$instance === null) {{\n"));
        out.push_str(&format!("{INDENT}{INDENT}{INDENT}self::$instance = new self();\n"));
        out.push_str(&format!("{INDENT}{INDENT}}}\n\n"));
        out.push_str(&format!("{INDENT}{INDENT}return self::$instance;\n"));
        out.push_str(&format!("{INDENT}}}\n\n"));

        out.push_str(&transform_dto_hook(ctx));

        out
    }
}

// ============================================================================
// Tests
// ============================================================================
