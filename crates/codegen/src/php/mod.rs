//! # PHP Artifact Renderers
//!
//! One module per artifact kind. Each renderer validates the schema with
//! the rules its kind depends on, then builds the file text.
//!
//! | Kind         | Module           | Output class            |
//! |--------------|------------------|-------------------------|
//! | Controller   | `controller`     | `{Class}Controller`     |
//! | DTO          | `dto`            | `{Class}Dto`            |
//! | Presentation | `presentation`   | `{Class}Pres`           |
//! | Service      | `service`        | `{Class}Service`        |

pub mod controller;
pub mod dto;
pub mod presentation;
pub mod service;

pub use controller::ControllerArtifact;
pub use dto::DtoArtifact;
pub use presentation::PresentationArtifact;
pub use service::ServiceArtifact;

use crudgen_core::{ArtifactKind, CrudgenResult};
use crudgen_ir::{Schema, Validator};

use crate::RenderOptions;
use crate::artifact::Artifact;
use crate::context::RenderContext;

/// One level of indentation in generated PHP
pub(crate) const INDENT: &str = "    ";

/// The renderer for a kind
pub fn artifact_for(kind: ArtifactKind) -> &'static dyn Artifact {
    match kind {
        ArtifactKind::Controller => &ControllerArtifact,
        ArtifactKind::Dto => &DtoArtifact,
        ArtifactKind::Presentation => &PresentationArtifact,
        ArtifactKind::Service => &ServiceArtifact,
    }
}

/// Validate `schema` for `kind` and render it.
///
/// Returns the text together with the validation warnings, which do not
/// stop rendering.
pub(crate) fn render_checked(
    kind: ArtifactKind,
    schema: &Schema,
    options: &RenderOptions,
) -> CrudgenResult<(String, Vec<String>)> {
    let result = Validator::for_kind(kind).validate(schema);
    let warnings: Vec<String> = result.warnings.iter().map(ToString::to_string).collect();
    result.to_result(&schema.class_name)?;

    let ctx = RenderContext::new(schema, options);
    let text = artifact_for(kind).render(&ctx);
    tracing::debug!(class = %schema.class_name_for(kind), bytes = text.len(), "Rendered artifact");

    Ok((text, warnings))
}

/// Render the controller of a schema
pub fn render_controller(schema: &Schema, options: &RenderOptions) -> CrudgenResult<String> {
    render_checked(ArtifactKind::Controller, schema, options).map(|(text, _)| text)
}

/// Render the DTO of a schema
pub fn render_dto(schema: &Schema) -> CrudgenResult<String> {
    render_checked(ArtifactKind::Dto, schema, &RenderOptions::default()).map(|(text, _)| text)
}

/// Render the presentation of a schema
pub fn render_presentation(schema: &Schema) -> CrudgenResult<String> {
    render_checked(ArtifactKind::Presentation, schema, &RenderOptions::default()).map(|(text, _)| text)
}

/// Render the service of a schema
pub fn render_service(schema: &Schema) -> CrudgenResult<String> {
    render_checked(ArtifactKind::Service, schema, &RenderOptions::default()).map(|(text, _)| text)
}

/// Keys the generated DTO serializes its own properties under, in order
pub fn serialized_keys(schema: &Schema) -> Vec<String> {
    schema.serialized_keys()
}
