//! # crudgen Codegen
//!
//! Schema-driven renderer for crudgen.
//!
//! This crate turns a validated `Schema` into the PHP source of the four
//! artifact kinds of a CRUD screen and lays the results out on disk.
//!
//! ## Features
//!
//! - **Controller**: route registration, service/presentation/DTO wiring
//! - **DTO**: typed fields, constructor defaults, accessors, snake_case serialization
//! - **Presentation**: page flags, form layout, field list, unpack-check list
//! - **Service**: projection API URL and a lazily created per-class instance
//!
//! Rendering is a pure function of `(ArtifactKind, Schema, RenderOptions)`:
//! no clock, no randomness, no hash-order iteration.
//!

// ============================================================================
// Modules
// ============================================================================

pub mod artifact;
pub mod context;
pub mod generator;
pub mod php;

// ============================================================================
// Re-exports
// ============================================================================

pub use artifact::Artifact;
pub use context::RenderContext;
pub use generator::{
    GenerationSummary, Generator, generate, generate_to_dir, render, render_named, summarize,
};
pub use php::{render_controller, render_dto, render_presentation, render_service, serialized_keys};

use crudgen_core::{ArtifactKind, CrudgenError, CrudgenResult};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Placeholder URL written into controllers rendered without a DTO
pub const DEFAULT_PLACEHOLDER_URL: &str = "{url here}";

// ============================================================================
// RenderOptions
// ============================================================================

/// Per-render switches that change the shape of the generated controller
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderOptions {
    /// Wire a DTO into the controller (otherwise a placeholder URL is set)
    pub with_dto: bool,

    /// Emit the static route and `register()` in the controller
    pub with_route_registration: bool,

    /// URL assigned to `$this->url` when `with_dto` is off
    pub placeholder_url: String,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            with_dto: true,
            with_route_registration: true,
            placeholder_url: DEFAULT_PLACEHOLDER_URL.to_string(),
        }
    }
}

impl RenderOptions {
    /// Create options with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Render the controller without a DTO
    pub fn without_dto(mut self) -> Self {
        self.with_dto = false;
        self
    }

    /// Render the controller without route registration
    pub fn without_route_registration(mut self) -> Self {
        self.with_route_registration = false;
        self
    }

    /// Set the placeholder URL used when the DTO is off
    pub fn with_placeholder_url(mut self, url: impl Into<String>) -> Self {
        self.placeholder_url = url.into();
        self
    }
}

// ============================================================================
// GeneratorConfig
// ============================================================================

/// Configuration for the generator
#[derive(Debug, Clone)]
pub struct GeneratorConfig {
    /// Root directory generated files are written under
    pub artifact_root: PathBuf,

    /// Whether to overwrite existing files
    pub overwrite: bool,

    /// Artifact kinds to produce, in output order
    pub kinds: Vec<ArtifactKind>,

    /// Controller shape switches
    pub render: RenderOptions,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            artifact_root: PathBuf::from("./generated"),
            overwrite: false,
            kinds: ArtifactKind::ALL.to_vec(),
            render: RenderOptions::default(),
        }
    }
}

impl GeneratorConfig {
    /// Create a new configuration with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the artifact root
    pub fn with_artifact_root(mut self, dir: impl Into<PathBuf>) -> Self {
        self.artifact_root = dir.into();
        self
    }

    /// Allow overwriting existing files
    pub fn allow_overwrite(mut self) -> Self {
        self.overwrite = true;
        self
    }

    /// Restrict generation to the given kinds.
    ///
    /// Duplicates are dropped and the canonical order
    /// (controller, dto, pres, service) is kept.
    pub fn with_kinds(mut self, kinds: impl IntoIterator<Item = ArtifactKind>) -> Self {
        let requested: Vec<ArtifactKind> = kinds.into_iter().collect();
        self.kinds = ArtifactKind::ALL
            .into_iter()
            .filter(|k| requested.contains(k))
            .collect();
        self
    }

    /// Set the render options
    pub fn with_render_options(mut self, render: RenderOptions) -> Self {
        self.render = render;
        self
    }
}

// ============================================================================
// GeneratedFile
// ============================================================================

/// Represents a single generated file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedFile {
    /// Relative path from the artifact root
    pub path: PathBuf,

    /// File content
    pub content: String,

    /// Artifact kind, for categorization
    pub kind: ArtifactKind,
}

impl GeneratedFile {
    /// Create a new generated file
    pub fn new(path: impl Into<PathBuf>, content: impl Into<String>, kind: ArtifactKind) -> Self {
        Self {
            path: path.into(),
            content: content.into(),
            kind,
        }
    }

    /// Get the file extension
    pub fn extension(&self) -> &str {
        "php"
    }
}

// ============================================================================
// GeneratedSet
// ============================================================================

/// Collection of generated files for one schema (or a merged batch)
#[derive(Debug, Clone, Default)]
pub struct GeneratedSet {
    /// Name of the set (the schema's class name, or "batch")
    pub name: String,

    /// All generated files
    pub files: Vec<GeneratedFile>,

    /// Validation warnings raised while rendering
    pub warnings: Vec<String>,
}

impl GeneratedSet {
    /// Create a new, empty set
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            files: Vec::new(),
            warnings: Vec::new(),
        }
    }

    /// Add a file to the set
    pub fn add_file(&mut self, file: GeneratedFile) {
        self.files.push(file);
    }

    /// Add a warning
    pub fn add_warning(&mut self, warning: impl Into<String>) {
        self.warnings.push(warning.into());
    }

    /// Append another set's files and warnings
    pub fn merge(&mut self, other: GeneratedSet) {
        self.files.extend(other.files);
        self.warnings.extend(other.warnings);
    }

    /// Get the number of files
    pub fn file_count(&self) -> usize {
        self.files.len()
    }

    /// Check if there are any warnings
    pub fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }

    /// Get files by kind
    pub fn files_by_kind(&self, kind: ArtifactKind) -> Vec<&GeneratedFile> {
        self.files.iter().filter(|f| f.kind == kind).collect()
    }

    /// Total size of all generated content in bytes
    pub fn total_bytes(&self) -> usize {
        self.files.iter().map(|f| f.content.len()).sum()
    }

    /// Write all files under `base_dir`.
    ///
    /// Every target is checked before anything is written, so an existing
    /// file (with `overwrite` off) or two files mapping to the same path
    /// leaves the disk untouched.
    pub fn write_to_disk(&self, base_dir: impl AsRef<Path>, overwrite: bool) -> CrudgenResult<Vec<PathBuf>> {
        let base_dir = base_dir.as_ref();
        let targets: Vec<PathBuf> = self.files.iter().map(|f| base_dir.join(&f.path)).collect();

        for (i, target) in targets.iter().enumerate() {
            if targets[..i].contains(target) {
                return Err(CrudgenError::FileWrite {
                    path: target.clone(),
                    message: "generated twice in the same run".to_string(),
                });
            }
            if !overwrite && target.exists() {
                return Err(CrudgenError::OutputExists(target.clone()));
            }
        }

        for (file, full_path) in self.files.iter().zip(&targets) {
            // Create parent directories
            if let Some(parent) = full_path.parent() {
                std::fs::create_dir_all(parent).map_err(|e| CrudgenError::DirectoryCreate {
                    path: parent.to_path_buf(),
                    message: e.to_string(),
                })?;
            }

            // Write file
            std::fs::write(full_path, &file.content).map_err(|e| CrudgenError::FileWrite {
                path: full_path.clone(),
                message: e.to_string(),
            })?;

            debug!(path = %full_path.display(), bytes = file.content.len(), "Wrote artifact");
        }

        Ok(targets)
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_generator_config_default() {
        let config = GeneratorConfig::default();
        assert_eq!(config.kinds, ArtifactKind::ALL.to_vec());
        assert!(!config.overwrite);
        assert!(config.render.with_dto);
        assert_eq!(config.render.placeholder_url, "{url here}");
    }

    #[test]
    fn test_generator_config_builder() {
        let config = GeneratorConfig::new()
            .with_artifact_root("/tmp/output")
            .with_kinds([ArtifactKind::Service, ArtifactKind::Dto, ArtifactKind::Dto])
            .with_render_options(RenderOptions::new().without_dto())
            .allow_overwrite();

        assert_eq!(config.artifact_root, PathBuf::from("/tmp/output"));
        assert_eq!(config.kinds, vec![ArtifactKind::Dto, ArtifactKind::Service]);
        assert!(!config.render.with_dto);
        assert!(config.overwrite);
    }

    #[test]
    fn test_generated_set() {
        let mut set = GeneratedSet::new("ProdModel");
        set.add_file(GeneratedFile::new("ProdModelDto.php", "<?php\n", ArtifactKind::Dto));
        set.add_file(GeneratedFile::new("ProdModelPres.php", "<?php\n", ArtifactKind::Presentation));

        assert_eq!(set.file_count(), 2);
        assert_eq!(set.files_by_kind(ArtifactKind::Dto).len(), 1);
        assert_eq!(set.total_bytes(), 12);
        assert_eq!(set.files[0].extension(), "php");
    }

    #[test]
    fn test_write_refuses_existing_without_overwrite() {
        let dir = tempdir().unwrap();
        std::fs::create_dir_all(dir.path().join("Sales")).unwrap();
        std::fs::write(dir.path().join("Sales/OrderPres.php"), "old").unwrap();

        let mut set = GeneratedSet::new("Order");
        set.add_file(GeneratedFile::new("Sales/OrderDto.php", "dto", ArtifactKind::Dto));
        set.add_file(GeneratedFile::new("Sales/OrderPres.php", "pres", ArtifactKind::Presentation));

        let err = set.write_to_disk(dir.path(), false).unwrap_err();
        assert!(matches!(err, CrudgenError::OutputExists(_)));
        assert!(!dir.path().join("Sales/OrderDto.php").exists());

        let written = set.write_to_disk(dir.path(), true).unwrap();
        assert_eq!(written.len(), 2);
        assert_eq!(
            std::fs::read_to_string(dir.path().join("Sales/OrderPres.php")).unwrap(),
            "pres"
        );
    }

    #[test]
    fn test_write_rejects_duplicate_targets() {
        let dir = tempdir().unwrap();
        let mut set = GeneratedSet::new("batch");
        set.add_file(GeneratedFile::new("A/OrderDto.php", "one", ArtifactKind::Dto));
        set.add_file(GeneratedFile::new("A/OrderDto.php", "two", ArtifactKind::Dto));

        assert!(set.write_to_disk(dir.path(), true).is_err());
        assert!(!dir.path().join("A").exists());
    }
}
