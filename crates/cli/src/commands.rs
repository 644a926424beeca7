//! Command handlers
//!
//! Each handler loads its inputs, calls into the library crates and prints
//! a short report. Library errors are wrapped with the file they concern.

use std::path::{Path, PathBuf};

use anyhow::{Context, bail};
use colored::Colorize;
use crudgen_codegen::{
    DEFAULT_PLACEHOLDER_URL, GeneratedSet, Generator, GeneratorConfig, RenderOptions, render_named,
    summarize,
};
use crudgen_core::ArtifactKind;
use crudgen_ir::{
    DocumentFormat, ImportOptions, Validator, import_schema, load_manifest, load_metadata,
    load_schema, save_schema, save_schema_to_string,
};
use walkdir::WalkDir;

use crate::{DEFAULT_ARTIFACT_ROOT, ShapeArgs};

impl ShapeArgs {
    /// Render options selected on the command line
    pub fn render_options(&self) -> RenderOptions {
        let mut options = RenderOptions::new();
        if self.no_dto {
            options = options.without_dto();
        }
        if self.no_route {
            options = options.without_route_registration();
        }
        if let Some(url) = &self.placeholder_url {
            options = options.with_placeholder_url(url.clone());
        }
        options
    }
}

// ============================================================================
// render / generate / batch
// ============================================================================

/// `crudgen render <kind>`
pub fn render(kind: &str, schema_path: &Path, shape: &ShapeArgs) -> anyhow::Result<()> {
    let schema = load_schema(schema_path)
        .with_context(|| format!("failed to load schema {}", schema_path.display()))?;

    let text = render_named(kind, &schema, &shape.render_options())
        .with_context(|| format!("failed to render {} for {}", kind, schema.class_name))?;

    print!("{}", text);
    Ok(())
}

/// `crudgen generate`
pub fn generate(
    schema_path: &Path,
    out: PathBuf,
    kinds: &[ArtifactKind],
    overwrite: bool,
    shape: &ShapeArgs,
) -> anyhow::Result<()> {
    let schema = load_schema(schema_path)
        .with_context(|| format!("failed to load schema {}", schema_path.display()))?;

    let mut config = GeneratorConfig::new()
        .with_artifact_root(&out)
        .with_render_options(shape.render_options());
    if !kinds.is_empty() {
        config = config.with_kinds(kinds.iter().copied());
    }
    if overwrite {
        config = config.allow_overwrite();
    }

    let set = Generator::new(config)
        .generate_and_write(&schema)
        .with_context(|| format!("failed to generate {} into {}", schema.class_name, out.display()))?;

    report(&set, &out);
    Ok(())
}

/// `crudgen batch <manifest>`
pub fn batch(manifest_path: &Path, out: Option<PathBuf>, overwrite: bool) -> anyhow::Result<()> {
    let manifest = load_manifest(manifest_path)
        .with_context(|| format!("failed to load manifest {}", manifest_path.display()))?;

    let schemas = manifest
        .resolve_schemas()
        .with_context(|| format!("failed to resolve entities of {}", manifest_path.display()))?;

    let artifact_root = manifest
        .artifact_root()
        .or(out)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_ARTIFACT_ROOT));

    let mut render = RenderOptions::new();
    if !manifest.with_dto {
        render = render.without_dto();
    }
    if !manifest.with_route_registration {
        render = render.without_route_registration();
    }
    render = render.with_placeholder_url(
        manifest
            .placeholder_url
            .clone()
            .unwrap_or_else(|| DEFAULT_PLACEHOLDER_URL.to_string()),
    );

    let mut config = GeneratorConfig::new()
        .with_artifact_root(&artifact_root)
        .with_render_options(render);
    if overwrite || manifest.overwrite {
        config = config.allow_overwrite();
    }

    let set = Generator::new(config)
        .generate_all_and_write(&schemas)
        .with_context(|| format!("failed to generate batch into {}", artifact_root.display()))?;

    report(&set, &artifact_root);
    Ok(())
}

fn report(set: &GeneratedSet, root: &Path) {
    for file in &set.files {
        println!("  {} {}", "✓".green(), root.join(&file.path).display());
    }
    for warning in &set.warnings {
        println!("  {} {}", "!".yellow(), warning.yellow());
    }
    println!();
    print!("{}", summarize(set));
}

// ============================================================================
// import
// ============================================================================

/// `crudgen import`
pub fn import(metadata_path: &Path, options: &ImportOptions, output: Option<&Path>) -> anyhow::Result<()> {
    let doc = load_metadata(metadata_path)
        .with_context(|| format!("failed to load metadata {}", metadata_path.display()))?;

    let schema = import_schema(&doc, options)
        .with_context(|| format!("failed to import {}", metadata_path.display()))?;

    match output {
        Some(path) => {
            save_schema(&schema, path)
                .with_context(|| format!("failed to write schema {}", path.display()))?;
            eprintln!(
                "{} {} ({} properties, {} fields)",
                "✓".green(),
                path.display(),
                schema.properties.len(),
                schema.presentation_fields.len()
            );
        }
        None => print!("{}", save_schema_to_string(&schema, DocumentFormat::Json)?),
    }

    Ok(())
}

// ============================================================================
// validate
// ============================================================================

/// `crudgen validate`
pub fn validate(schema_path: &Path, kind: Option<ArtifactKind>) -> anyhow::Result<()> {
    let schema = load_schema(schema_path)
        .with_context(|| format!("failed to load schema {}", schema_path.display()))?;

    let validator = match kind {
        Some(kind) => Validator::for_kind(kind),
        None => Validator::with_default_rules(),
    };
    let result = validator.validate(&schema);

    for error in &result.errors {
        println!("  {} {}", "✗".red(), error);
        if let Some(suggestion) = &error.suggestion {
            println!("    {} {}", "hint:".dimmed(), suggestion);
        }
    }
    for warning in &result.warnings {
        println!("  {} {}", "!".yellow(), warning);
    }

    if !result.valid {
        bail!(
            "{} has {} error(s) and {} warning(s)",
            schema.class_name,
            result.errors.len(),
            result.warnings.len()
        );
    }

    println!(
        "{} {} is valid ({} warning(s))",
        "✓".green(),
        schema.class_name,
        result.warnings.len()
    );
    Ok(())
}

// ============================================================================
// clean
// ============================================================================

/// Whether a file name looks like a generated artifact (`ProdModelDto.php`).
///
/// The hand-written base classes (`BaseDto.php` and friends) never match.
pub fn is_generated_file(name: &str) -> bool {
    let Some(stem) = name.strip_suffix(".php") else {
        return false;
    };
    if ArtifactKind::ALL.iter().any(|kind| kind.base_class() == stem) {
        return false;
    }
    ArtifactKind::ALL.iter().any(|kind| {
        stem.strip_suffix(kind.suffix())
            .is_some_and(|class| !class.is_empty())
    })
}

/// Remove generated files under `dir`, then the directories left empty.
///
/// Returns the number of files removed.
pub fn clean_dir(dir: &Path) -> anyhow::Result<usize> {
    if !dir.exists() {
        return Ok(0);
    }

    let mut removed = 0;
    for entry in WalkDir::new(dir) {
        let entry = entry.with_context(|| format!("failed to walk {}", dir.display()))?;
        if entry.file_type().is_file() && is_generated_file(&entry.file_name().to_string_lossy()) {
            std::fs::remove_file(entry.path())
                .with_context(|| format!("failed to remove {}", entry.path().display()))?;
            tracing::debug!(path = %entry.path().display(), "Removed artifact");
            removed += 1;
        }
    }

    // Children before parents; the root itself is kept
    for entry in WalkDir::new(dir).min_depth(1).contents_first(true) {
        let entry = entry.with_context(|| format!("failed to walk {}", dir.display()))?;
        if entry.file_type().is_dir() && is_empty_dir(entry.path())? {
            std::fs::remove_dir(entry.path())
                .with_context(|| format!("failed to remove {}", entry.path().display()))?;
        }
    }

    Ok(removed)
}

fn is_empty_dir(path: &Path) -> anyhow::Result<bool> {
    let mut entries =
        std::fs::read_dir(path).with_context(|| format!("failed to read {}", path.display()))?;
    Ok(entries.next().is_none())
}

/// `crudgen clean`
pub fn clean(dir: &Path) -> anyhow::Result<()> {
    let removed = clean_dir(dir)?;
    println!("{} removed {} file(s) from {}", "✓".green(), removed, dir.display());
    Ok(())
}

// ============================================================================
// Tests
// ============================================================================
