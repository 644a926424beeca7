//! # Code Generator Orchestrator
//!
//! The `Generator` is the top-level entry point for code generation. It takes a
//! [`Schema`] and a [`GeneratorConfig`], renders every configured artifact kind
//! and lays the results out as a [`GeneratedSet`].
//!
//! ## Pipeline
//!
//! ```text
//! Schema + GeneratorConfig
//!         │
//!         ├──► Validator::for_kind(kind)   → errors abort, warnings collected
//!         ├──► artifact_for(kind).render() → String
//!         │
//!         ▼
//!   GeneratedSet { files, warnings }
//!         │
//!         ▼
//!   write_to_disk(artifact_root)
//! ```
//!
//! ## Usage
//!
//! ```rust,ignore
//! use crudgen_codegen::{Generator, GeneratorConfig};
//! use crudgen_ir::Schema;
//!
//! let schema = Schema::new("Warranty.Setup", "ProdModel");
//! let config = GeneratorConfig::new().with_artifact_root("./generated");
//!
//! let set = Generator::new(config).generate_and_write(&schema)?;
//! println!("Generated {} files", set.file_count());
//! ```

use std::path::PathBuf;

use crudgen_core::{ArtifactKind, CrudgenResult};
use crudgen_ir::Schema;

use crate::php::render_checked;
use crate::{GeneratedFile, GeneratedSet, GeneratorConfig, RenderOptions};

// ============================================================================
// Generator
// ============================================================================

/// Top-level code generator.
///
/// The `Generator` is stateless aside from its configuration. Call
/// [`generate`](Generator::generate) with a schema to produce a
/// [`GeneratedSet`] containing every file that should be written to disk.
#[derive(Debug, Clone, Default)]
pub struct Generator {
    /// Configuration controlling output behaviour (artifact root, kinds, etc.).
    config: GeneratorConfig,
}

impl Generator {
    // ====================================================================
    // Construction
    // ====================================================================

    /// Create a new generator with the given configuration.
    pub fn new(config: GeneratorConfig) -> Self {
        Self { config }
    }

    /// Create a generator with default configuration.
    pub fn with_defaults() -> Self {
        Self::new(GeneratorConfig::default())
    }

    /// Get the current configuration.
    pub fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    /// Replace the configuration.
    pub fn set_config(&mut self, config: GeneratorConfig) {
        self.config = config;
    }

    // ====================================================================
    // Rendering
    // ====================================================================

    /// Render one artifact with this generator's render options.
    pub fn render(&self, kind: ArtifactKind, schema: &Schema) -> CrudgenResult<String> {
        render(kind, schema, &self.config.render)
    }

    /// Render one artifact selected by name (`controller`, `dto`, `pres`, `service`).
    pub fn render_named(&self, name: &str, schema: &Schema) -> CrudgenResult<String> {
        render_named(name, schema, &self.config.render)
    }

    // ====================================================================
    // Generation
    // ====================================================================

    /// Render every configured kind for one schema.
    ///
    /// All or nothing: the first kind whose rules fail aborts the set.
    /// Warnings are collected on the set and logged.
    pub fn generate(&self, schema: &Schema) -> CrudgenResult<GeneratedSet> {
        let mut set = GeneratedSet::new(&schema.class_name);
        let dir = schema.namespace_prefix.to_path();

        for &kind in &self.config.kinds {
            let (content, warnings) = render_checked(kind, schema, &self.config.render)?;

            for warning in warnings {
                tracing::warn!(schema = %schema.class_name, kind = %kind, "{}", warning);
                set.add_warning(format!("{} ({}): {}", schema.class_name, kind, warning));
            }

            let file_name = format!("{}.php", schema.class_name_for(kind));
            set.add_file(GeneratedFile::new(dir.join(file_name), content, kind));
        }

        tracing::info!(
            schema = %schema.class_name,
            files = set.file_count(),
            warnings = set.warnings.len(),
            "code generation complete",
        );

        Ok(set)
    }

    /// Render every configured kind for several schemas into one set.
    ///
    /// Fails on the first invalid schema; nothing is returned for the others.
    pub fn generate_all<'a>(&self, schemas: impl IntoIterator<Item = &'a Schema>) -> CrudgenResult<GeneratedSet> {
        let mut batch = GeneratedSet::new("batch");
        for schema in schemas {
            batch.merge(self.generate(schema)?);
        }
        Ok(batch)
    }

    // ====================================================================
    // Convenience: generate and write to disk
    // ====================================================================

    /// Generate one schema and write its files under the artifact root.
    pub fn generate_and_write(&self, schema: &Schema) -> CrudgenResult<GeneratedSet> {
        let set = self.generate(schema)?;
        self.write(&set)?;
        Ok(set)
    }

    /// Generate several schemas and write them together.
    ///
    /// Every schema is rendered and every target checked before the first
    /// file is written.
    pub fn generate_all_and_write<'a>(
        &self,
        schemas: impl IntoIterator<Item = &'a Schema>,
    ) -> CrudgenResult<GeneratedSet> {
        let set = self.generate_all(schemas)?;
        self.write(&set)?;
        Ok(set)
    }

    fn write(&self, set: &GeneratedSet) -> CrudgenResult<Vec<PathBuf>> {
        let written = set.write_to_disk(&self.config.artifact_root, self.config.overwrite)?;
        tracing::info!(
            artifact_root = %self.config.artifact_root.display(),
            files = written.len(),
            "files written to disk",
        );
        Ok(written)
    }
}

// ============================================================================
// Standalone convenience functions
// ============================================================================

/// Render one artifact of a schema.
pub fn render(kind: ArtifactKind, schema: &Schema, options: &RenderOptions) -> CrudgenResult<String> {
    render_checked(kind, schema, options).map(|(text, _)| text)
}

/// Render one artifact selected by name.
///
/// Unknown names fail with `TemplateSelection`.
pub fn render_named(name: &str, schema: &Schema, options: &RenderOptions) -> CrudgenResult<String> {
    render(ArtifactKind::parse(name)?, schema, options)
}

/// Generate all four artifacts of a schema with default configuration.
pub fn generate(schema: &Schema) -> CrudgenResult<GeneratedSet> {
    Generator::with_defaults().generate(schema)
}

/// Generate all four artifacts and write them under `artifact_root`.
pub fn generate_to_dir(schema: &Schema, artifact_root: impl Into<PathBuf>) -> CrudgenResult<GeneratedSet> {
    let config = GeneratorConfig::new().with_artifact_root(artifact_root);
    Generator::new(config).generate_and_write(schema)
}

// ============================================================================
// GenerationSummary
// ============================================================================

/// A human-readable summary of a completed generation run.
///
/// Use [`summarize`] to produce a `GenerationSummary` from a `GeneratedSet`.
#[derive(Debug, Clone)]
pub struct GenerationSummary {
    /// Set name.
    pub name: String,
    /// Total number of files generated.
    pub total_files: usize,
    /// Number of controllers.
    pub controllers: usize,
    /// Number of DTOs.
    pub dtos: usize,
    /// Number of presentations.
    pub presentations: usize,
    /// Number of services.
    pub services: usize,
    /// Number of warnings.
    pub warning_count: usize,
    /// Total bytes of generated content.
    pub total_bytes: usize,
}

impl GenerationSummary {
    /// Build a summary from a generated set.
    pub fn from_set(set: &GeneratedSet) -> Self {
        let count = |kind| set.files_by_kind(kind).len();

        Self {
            name: set.name.clone(),
            total_files: set.file_count(),
            controllers: count(ArtifactKind::Controller),
            dtos: count(ArtifactKind::Dto),
            presentations: count(ArtifactKind::Presentation),
            services: count(ArtifactKind::Service),
            warning_count: set.warnings.len(),
            total_bytes: set.total_bytes(),
        }
    }

    /// Format the summary as a human-readable string.
    pub fn display(&self) -> String {
        let mut out = String::with_capacity(512);

        out.push_str("╔══════════════════════════════════════════════════╗\n");
        out.push_str("║         Code Generation Complete                 ║\n");
        out.push_str("╠══════════════════════════════════════════════════╣\n");
        out.push_str(&format!("║  Set:         {:<35}║\n", self.name));
        out.push_str(&format!("║  Total Files: {:<35}║\n", self.total_files));
        out.push_str(&format!("║    Controller:{:<35}║\n", self.controllers));
        out.push_str(&format!("║    Dto:       {:<35}║\n", self.dtos));
        out.push_str(&format!("║    Pres:      {:<35}║\n", self.presentations));
        out.push_str(&format!("║    Service:   {:<35}║\n", self.services));
        out.push_str(&format!("║  Warnings:    {:<35}║\n", self.warning_count));

        let size_str = if self.total_bytes < 1024 {
            format!("{} B", self.total_bytes)
        } else if self.total_bytes < 1024 * 1024 {
            format!("{:.1} KB", self.total_bytes as f64 / 1024.0)
        } else {
            format!("{:.1} MB", self.total_bytes as f64 / (1024.0 * 1024.0))
        };
        out.push_str(&format!("║  Total Size:  {:<35}║\n", size_str));
        out.push_str("╚══════════════════════════════════════════════════╝\n");

        out
    }
}

impl std::fmt::Display for GenerationSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display())
    }
}

/// Produce a [`GenerationSummary`] from a [`GeneratedSet`].
pub fn summarize(set: &GeneratedSet) -> GenerationSummary {
    GenerationSummary::from_set(set)
}

// ============================================================================
// Tests
// ============================================================================
