//! # Controller Generator
//!
//! Generates `{Class}Controller`, the HTTP entry point of a screen. The
//! controller wires the service instance and a fresh presentation; with a
//! DTO it also wires the DTO and overrides `transformDto`, without one it
//! points `$this->url` at a placeholder.

use crudgen_core::{ArtifactKind, php};

use super::INDENT;
use crate::artifact::{Artifact, transform_dto_hook};
use crate::context::RenderContext;

/// Renders `{Class}Controller`
pub struct ControllerArtifact;

impl Artifact for ControllerArtifact {
    fn kind(&self) -> ArtifactKind {
        ArtifactKind::Controller
    }

    fn imports(&self, ctx: &RenderContext<'_>) -> Vec<String> {
        let mut imports = Vec::with_capacity(5);
        if ctx.options.with_dto {
            imports.push(ArtifactKind::Dto.base_class_fqn());
        }
        imports.push(ArtifactKind::Controller.base_class_fqn());
        if ctx.options.with_dto {
            imports.push(ctx.fqcn(ArtifactKind::Dto));
        }
        imports.push(ctx.fqcn(ArtifactKind::Service));
        imports.push(ctx.fqcn(ArtifactKind::Presentation));
        imports
    }

    fn body(&self, ctx: &RenderContext<'_>) -> String {
        let options = ctx.options;
        let mut out = String::with_capacity(1024);

        if options.with_route_registration {
            out.push_str(&format!(
                "{INDENT}public static string $route = {};\n\n",
                php::string_literal(&ctx.schema.route())
            ));
        }

        // Constructor
        out.push_str(&format!("{INDENT}public function __construct()\n{INDENT}{{\n"));
        out.push_str(&format!(
            "{INDENT}{INDENT}$this->service = {}::getInstance();\n",
            ctx.class_name(ArtifactKind::Service)
        ));
        out.push_str(&format!(
            "{INDENT}{INDENT}$this->pres = new {}();\n",
            ctx.class_name(ArtifactKind::Presentation)
        ));
        if options.with_dto {
            out.push_str(&format!(
                "{INDENT}{INDENT}$this->dto = new {}();\n",
                ctx.class_name(ArtifactKind::Dto)
            ));
        } else {
            out.push_str(&format!(
                "{INDENT}{INDENT}$this->url = {};\n",
                php::string_literal(&options.placeholder_url)
            ));
        }
        out.push_str(&format!("{INDENT}{INDENT}parent::__construct();\n"));
        out.push_str(&format!("{INDENT}}}\n"));

        if options.with_route_registration {
            out.push('\n');
            out.push_str(&format!("{INDENT}public static function register()\n{INDENT}{{\n"));
            out.push_str(&format!("{INDENT}{INDENT}parent::registerRoutes(self::$route);\n"));
            out.push_str(&format!("{INDENT}}}\n"));
        }

        if options.with_dto {
            out.push('\n');
            out.push_str(&transform_dto_hook(ctx));
        }

        out
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use crate::{RenderOptions, render_controller};
    use crudgen_ir::Schema;
    use pretty_assertions::assert_eq;

    fn schema() -> Schema {
        Schema::new("Warranty.Setup", "ProdModel").with_menu_route("prod-model")
    }

    #[test]
    fn test_controller_with_dto_and_route() {
        let text = render_controller(&schema(), &RenderOptions::default()).unwrap();

        let expected = r#"<?php

namespace App\Http\Controllers\Warranty\Setup;

use App\Dto\BaseDto;
use App\Http\Controllers\BaseController;
use App\Dto\Warranty\Setup\ProdModelDto;
use App\Services\Warranty\Setup\ProdModelService;
use App\Presentation\Warranty\Setup\ProdModelPres;

class ProdModelController extends BaseController
{
    public static string $route = "prod-model";

    public function __construct()
    {
        $this->service = ProdModelService::getInstance();
        $this->pres = new ProdModelPres();
        $this->dto = new ProdModelDto();
        parent::__construct();
    }

    public static function register()
    {
        parent::registerRoutes(self::$route);
    }

    protected function transformDto(BaseDto $dto): BaseDto
    {
        if ($dto instanceof BaseDto) {
            return new ProdModelDto();
        }

        return $dto;
    }
}
"#;
        assert_eq!(text, expected);
    }

    #[test]
    fn test_controller_without_dto() {
        let options = RenderOptions::new().without_dto();
        let text = render_controller(&schema(), &options).unwrap();

        assert!(text.contains("$this->url = \"{url here}\";"));
        assert!(text.contains("$this->service = ProdModelService::getInstance();"));
        assert!(text.contains("parent::__construct();"));
        assert!(!text.contains("ProdModelDto"));
        assert!(!text.contains("BaseDto"));
        assert!(!text.contains("transformDto"));
    }

    #[test]
    fn test_controller_without_route_registration() {
        let options = RenderOptions::new().without_route_registration();
        let text = render_controller(&schema(), &options).unwrap();

        assert!(!text.contains("$route"));
        assert!(!text.contains("register()"));
        assert!(text.contains("transformDto"));
    }

    #[test]
    fn test_custom_placeholder_and_default_route() {
        let options = RenderOptions::new()
            .without_dto()
            .with_placeholder_url("https://erp.example.com/prod-model");
        let text = render_controller(&Schema::new("Warranty.Setup", "ProdModel"), &options).unwrap();

        assert!(text.contains("$this->url = \"https://erp.example.com/prod-model\";"));
        assert!(text.contains("public static string $route = \"prod-model\";"));
    }

    #[test]
    fn test_controller_needs_no_properties() {
        assert!(render_controller(&Schema::new("Sales", "Order"), &RenderOptions::default()).is_ok());
    }

    #[test]
    fn test_controller_rejects_bad_route() {
        let err = render_controller(
            &schema().with_menu_route("prod model"),
            &RenderOptions::default(),
        )
        .unwrap_err();
        assert!(err.is_validation());
    }
}
