//! # crudgen CLI
//!
//! Command-line interface for crudgen.
//!
//! ## Commands
//!
//! - `render` - Print one artifact of a schema to stdout
//! - `generate` - Write the artifacts of a schema under the artifact root
//! - `batch` - Generate every entity of a TOML manifest
//! - `import` - Build a schema document from a column metadata document
//! - `validate` - Report schema errors and warnings
//! - `clean` - Remove generated files from the artifact root
//!

pub mod commands;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use crudgen_core::ArtifactKind;

// Re-export dependencies for use in main.rs
pub use crudgen_codegen;
pub use crudgen_core;
pub use crudgen_ir;

/// CLI version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Environment variable consulted when `--out` is not given
pub const ARTIFACT_ROOT_ENV: &str = "CRUDGEN_ARTIFACT_ROOT";

/// Artifact root used when neither `--out` nor the environment sets one
pub const DEFAULT_ARTIFACT_ROOT: &str = "./generated";

/// Schema-driven scaffolding for CRUD controller, DTO, presentation and service classes
#[derive(Parser, Debug)]
#[command(name = "crudgen")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Log debug output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Controller shape switches shared by `render` and `generate`
#[derive(clap::Args, Debug, Clone, Default)]
pub struct ShapeArgs {
    /// Render the controller without DTO wiring
    #[arg(long)]
    pub no_dto: bool,

    /// Render the controller without the static route and register()
    #[arg(long)]
    pub no_route: bool,

    /// URL assigned to $this->url when --no-dto is set
    #[arg(long, value_name = "URL")]
    pub placeholder_url: Option<String>,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Print one artifact (controller, dto, pres, service) to stdout
    Render {
        /// Artifact kind
        kind: String,

        /// Schema document (.json or .toml)
        #[arg(short, long)]
        schema: PathBuf,

        #[command(flatten)]
        shape: ShapeArgs,
    },

    /// Write the artifacts of a schema under the artifact root
    Generate {
        /// Schema document (.json or .toml)
        #[arg(short, long)]
        schema: PathBuf,

        /// Artifact root
        #[arg(short, long, env = ARTIFACT_ROOT_ENV, default_value = DEFAULT_ARTIFACT_ROOT)]
        out: PathBuf,

        /// Only generate these kinds (repeatable; default: all)
        #[arg(short, long = "kind", value_name = "KIND")]
        kinds: Vec<ArtifactKind>,

        /// Replace files that already exist
        #[arg(long)]
        overwrite: bool,

        #[command(flatten)]
        shape: ShapeArgs,
    },

    /// Generate every entity of a manifest
    Batch {
        /// Manifest file (TOML)
        manifest: PathBuf,

        /// Artifact root when the manifest sets none
        #[arg(short, long, env = ARTIFACT_ROOT_ENV)]
        out: Option<PathBuf>,

        /// Replace files that already exist
        #[arg(long)]
        overwrite: bool,
    },

    /// Build a schema document from a column metadata document
    Import {
        /// Metadata document (JSON, `{"value": [...]}`)
        #[arg(short, long)]
        metadata: PathBuf,

        /// Class name of the entity
        #[arg(short, long)]
        class_name: String,

        /// Namespace prefix (dotted, e.g. Warranty.Setup)
        #[arg(short, long)]
        namespace: String,

        /// Presentation title
        #[arg(long)]
        title: Option<String>,

        /// Menu route
        #[arg(long)]
        menu_route: Option<String>,

        /// Projection API URL
        #[arg(long)]
        projection_url: Option<String>,

        /// Fields per form layout row
        #[arg(long)]
        group_size: Option<usize>,

        /// Column ids to skip (repeatable; replaces the default list)
        #[arg(long = "exclude", value_name = "ID")]
        excluded: Vec<String>,

        /// Write the schema here instead of stdout (.json or .toml)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Report schema errors and warnings
    Validate {
        /// Schema document (.json or .toml)
        #[arg(short, long)]
        schema: PathBuf,

        /// Only check the rules this kind depends on
        #[arg(short, long)]
        kind: Option<ArtifactKind>,
    },

    /// Remove generated files and empty directories
    Clean {
        /// Artifact root
        #[arg(env = ARTIFACT_ROOT_ENV, default_value = DEFAULT_ARTIFACT_ROOT)]
        dir: PathBuf,
    },
}

/// Run a parsed command line
pub fn run(cli: Cli) -> anyhow::Result<()> {
    match cli.command {
        Commands::Render { kind, schema, shape } => commands::render(&kind, &schema, &shape),
        Commands::Generate {
            schema,
            out,
            kinds,
            overwrite,
            shape,
        } => commands::generate(&schema, out, &kinds, overwrite, &shape),
        Commands::Batch {
            manifest,
            out,
            overwrite,
        } => commands::batch(&manifest, out, overwrite),
        Commands::Import {
            metadata,
            class_name,
            namespace,
            title,
            menu_route,
            projection_url,
            group_size,
            excluded,
            output,
        } => {
            let mut options = crudgen_ir::ImportOptions::new(class_name, namespace.as_str());
            if let Some(title) = title {
                options = options.with_title(title);
            }
            if let Some(route) = menu_route {
                options = options.with_menu_route(route);
            }
            if let Some(url) = projection_url {
                options = options.with_projection_url(url);
            }
            if let Some(size) = group_size {
                options = options.with_group_size(size);
            }
            if !excluded.is_empty() {
                options = options.with_excluded_ids(excluded);
            }
            commands::import(&metadata, &options, output.as_deref())
        }
        Commands::Validate { schema, kind } => commands::validate(&schema, kind),
        Commands::Clean { dir } => commands::clean(&dir),
    }
}

// ============================================================================
// Tests
// ============================================================================
