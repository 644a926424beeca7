//! # Artifact capability
//!
//! The generated classes all share a frame: an opening tag, a namespace, a
//! `use` block and a class extending the kind's framework base class. The
//! `Artifact` trait supplies that frame by default; each kind only provides
//! its own imports and class body.

use crudgen_core::ArtifactKind;

use crate::context::RenderContext;

/// One renderable artifact kind
pub trait Artifact {
    /// The kind this artifact renders
    fn kind(&self) -> ArtifactKind;

    /// Fully qualified classes imported by the generated file.
    ///
    /// Defaults to the kind's base class alone.
    fn imports(&self, _ctx: &RenderContext<'_>) -> Vec<String> {
        vec![self.kind().base_class_fqn()]
    }

    /// Class members, already indented, without the surrounding braces
    fn body(&self, ctx: &RenderContext<'_>) -> String;

    /// Render the complete file
    fn render(&self, ctx: &RenderContext<'_>) -> String {
        let kind = self.kind();
        let body = self.body(ctx);
        let mut out = String::with_capacity(body.len() + 256);

        out.push_str("<?php\n\n");
        out.push_str(&format!("namespace {};\n\n", ctx.namespace(kind)));

        let imports = self.imports(ctx);
        if !imports.is_empty() {
            for import in &imports {
                out.push_str(&format!("use {};\n", import));
            }
            out.push('\n');
        }

        out.push_str(&format!(
            "class {} extends {}\n{{\n",
            ctx.class_name(kind),
            kind.base_class()
        ));
        out.push_str(&body);
        out.push_str("}\n");

        out
    }
}

/// The `transformDto` override shared by controllers and services.
///
/// The `instanceof` guard always holds for a `BaseDto` parameter; the method
/// exists so the base class can obtain a fresh DTO of the concrete type.
pub fn transform_dto_hook(ctx: &RenderContext<'_>) -> String {
    let dto = ctx.class_name(ArtifactKind::Dto);
    let mut out = String::with_capacity(256);

    out.push_str("    protected function transformDto(BaseDto $dto): BaseDto\n");
    out.push_str("    {\n");
    out.push_str("        if ($dto instanceof BaseDto) {\n");
    out.push_str(&format!("            return new {}();\n", dto));
    out.push_str("        }\n");
    out.push('\n');
    out.push_str("        return $dto;\n");
    out.push_str("    }\n");

    out
}

// ============================================================================
// Tests
// ============================================================================
