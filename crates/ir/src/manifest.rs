//! Batch manifests
//!
//! A manifest is a TOML file listing every entity to generate in one run:
//!
//! ```toml
//! artifact_root = "generated"
//! with_dto = true
//!
//! [[entity]]
//! class_name = "ProdModel"
//! namespace_prefix = "Warranty.Setup"
//! presentation_title = "Product Model"
//! table_name = "PROD_MODEL"
//! metadata = "metadata/prod_model.json"
//! ```
//!
//! Relative paths resolve against the directory holding the manifest.

use crate::metadata::{ImportOptions, import_schema, load_metadata};
use crate::serialization::{load_schema, read_document};
use crate::{NamespacePath, Schema};
use crudgen_core::{CrudgenError, CrudgenResult};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

fn default_true() -> bool {
    true
}

// ============================================================================
// Manifest
// ============================================================================

/// A batch of entities plus the settings shared by all of them
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Manifest {
    /// Output directory; the CLI default applies when absent
    #[serde(default)]
    pub artifact_root: Option<PathBuf>,

    #[serde(default = "default_true")]
    pub with_dto: bool,

    #[serde(default = "default_true")]
    pub with_route_registration: bool,

    #[serde(default)]
    pub overwrite: bool,

    /// URL written into controllers rendered without a DTO
    #[serde(default)]
    pub placeholder_url: Option<String>,

    #[serde(default, rename = "entity")]
    pub entities: Vec<ManifestEntity>,

    /// Directory relative paths resolve against
    #[serde(skip)]
    pub base_dir: PathBuf,
}

/// One entity of a batch
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ManifestEntity {
    /// Required for metadata entries; overrides the schema's own for schema entries
    #[serde(default)]
    pub class_name: Option<String>,
    #[serde(default)]
    pub namespace_prefix: Option<String>,
    #[serde(default)]
    pub presentation_title: Option<String>,
    #[serde(default)]
    pub menu_route: Option<String>,
    #[serde(default)]
    pub projection_url: Option<String>,
    /// Source table, kept for reference only
    #[serde(default)]
    pub table_name: Option<String>,
    /// Path to a schema document
    #[serde(default)]
    pub schema: Option<PathBuf>,
    /// Path to a metadata document
    #[serde(default)]
    pub metadata: Option<PathBuf>,
    #[serde(default)]
    pub group_size: Option<usize>,
    #[serde(default)]
    pub excluded_ids: Option<Vec<String>>,
}

impl Manifest {
    /// Resolve a manifest-relative path
    pub fn resolve_path(&self, path: &Path) -> PathBuf {
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.base_dir.join(path)
        }
    }

    /// Output directory, resolved against the manifest directory
    pub fn artifact_root(&self) -> Option<PathBuf> {
        self.artifact_root.as_deref().map(|p| self.resolve_path(p))
    }

    /// Check the structural rules serde cannot express
    pub fn check(&self) -> CrudgenResult<()> {
        if self.entities.is_empty() {
            return Err(CrudgenError::manifest("no [[entity]] tables"));
        }

        for (index, entity) in self.entities.iter().enumerate() {
            match (&entity.schema, &entity.metadata) {
                (Some(_), Some(_)) => {
                    return Err(CrudgenError::manifest(format!(
                        "entity {} ({}) sets both 'schema' and 'metadata'",
                        index,
                        entity.label()
                    )));
                }
                (None, None) => {
                    return Err(CrudgenError::manifest(format!(
                        "entity {} ({}) needs one of 'schema' or 'metadata'",
                        index,
                        entity.label()
                    )));
                }
                (None, Some(_)) if entity.class_name.as_deref().is_none_or(str::is_empty) => {
                    return Err(CrudgenError::manifest(format!(
                        "entity {} imports metadata but has no 'class_name'",
                        index
                    )));
                }
                _ => {}
            }
        }

        Ok(())
    }

    /// Turn every entity into a schema, in manifest order
    pub fn resolve_schemas(&self) -> CrudgenResult<Vec<Schema>> {
        self.check()?;

        let schemas = self
            .entities
            .iter()
            .map(|entity| entity.resolve(self))
            .collect::<CrudgenResult<Vec<_>>>()?;

        info!(count = schemas.len(), "Resolved manifest entities");
        Ok(schemas)
    }
}

impl ManifestEntity {
    fn label(&self) -> &str {
        self.class_name
            .as_deref()
            .or(self.table_name.as_deref())
            .unwrap_or("unnamed")
    }

    /// Load or import this entity's schema and apply the manifest overrides
    pub fn resolve(&self, manifest: &Manifest) -> CrudgenResult<Schema> {
        let mut schema = if let Some(path) = &self.schema {
            let path = manifest.resolve_path(path);
            debug!(path = %path.display(), "Loading schema document");
            load_schema(&path)?
        } else if let Some(path) = &self.metadata {
            let path = manifest.resolve_path(path);
            debug!(path = %path.display(), table = ?self.table_name, "Importing metadata document");

            let class_name = self.class_name.clone().unwrap_or_default();
            let namespace = self.namespace_prefix.as_deref().unwrap_or_default();
            let mut options = ImportOptions::new(class_name, namespace);
            if let Some(size) = self.group_size {
                options = options.with_group_size(size);
            }
            if let Some(ids) = &self.excluded_ids {
                options = options.with_excluded_ids(ids.iter().cloned());
            }
            import_schema(&load_metadata(&path)?, &options)?
        } else {
            return Err(CrudgenError::manifest(format!(
                "entity '{}' has no schema source",
                self.label()
            )));
        };

        if let Some(name) = self.class_name.as_ref().filter(|s| !s.is_empty()) {
            schema.class_name = name.clone();
        }
        if let Some(ns) = &self.namespace_prefix {
            schema.namespace_prefix = NamespacePath::parse(ns);
        }
        if let Some(title) = &self.presentation_title {
            schema.presentation_title = title.clone();
        }
        if let Some(route) = &self.menu_route {
            schema.menu_route = route.clone();
        }
        if let Some(url) = &self.projection_url {
            schema.projection_url = url.clone();
        }

        Ok(schema)
    }
}

// ============================================================================
// Load Functions
// ============================================================================

/// Load a manifest; relative paths inside it resolve against its directory
pub fn load_manifest(path: impl AsRef<Path>) -> CrudgenResult<Manifest> {
    let path = path.as_ref();
    let content = read_document(path)?;
    let base_dir = path
        .parent()
        .map(Path::to_path_buf)
        .unwrap_or_default();

    parse_manifest(&content, base_dir)
}

/// Parse a manifest from TOML text
pub fn parse_manifest(content: &str, base_dir: impl Into<PathBuf>) -> CrudgenResult<Manifest> {
    let mut manifest: Manifest =
        toml::from_str(content).map_err(|e| CrudgenError::manifest(e.to_string()))?;
    manifest.base_dir = base_dir.into();
    manifest.check()?;
    Ok(manifest)
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Property, save_schema};
    use tempfile::tempdir;

    const METADATA: &str = r#"{"value":[
        {"Id":"OBJKEY","Type":"STRING"},
        {"Id":"EXPORT_NO","Type":"STRING","Label":"Export No","Length":50,"Insertable":"true"}
    ]}"#;

    #[test]
    fn test_parse_defaults() {
        let manifest = parse_manifest(
            r#"
[[entity]]
class_name = "ProdModel"
metadata = "prod_model.json"
"#,
            "/work",
        )
        .unwrap();

        assert!(manifest.with_dto);
        assert!(manifest.with_route_registration);
        assert!(!manifest.overwrite);
        assert_eq!(manifest.artifact_root(), None);
        assert_eq!(
            manifest.resolve_path(Path::new("prod_model.json")),
            PathBuf::from("/work/prod_model.json")
        );
    }

    #[test]
    fn test_entity_needs_exactly_one_source() {
        let both = parse_manifest(
            "[[entity]]\nclass_name = \"A\"\nschema = \"a.json\"\nmetadata = \"a.json\"\n",
            ".",
        );
        assert!(matches!(both, Err(CrudgenError::InvalidManifest(_))));

        let neither = parse_manifest("[[entity]]\nclass_name = \"A\"\n", ".");
        assert!(matches!(neither, Err(CrudgenError::InvalidManifest(_))));

        let nameless = parse_manifest("[[entity]]\nmetadata = \"a.json\"\n", ".");
        assert!(matches!(nameless, Err(CrudgenError::InvalidManifest(_))));

        let empty = parse_manifest("with_dto = false\n", ".");
        assert!(matches!(empty, Err(CrudgenError::InvalidManifest(_))));
    }

    #[test]
    fn test_unknown_keys_rejected() {
        let err = parse_manifest(
            "[[entity]]\nclass_name = \"A\"\nmetadata = \"a.json\"\npackage = \"x\"\n",
            ".",
        )
        .unwrap_err();
        assert!(matches!(err, CrudgenError::InvalidManifest(_)));
    }

    #[test]
    fn test_resolve_mixed_sources() {
        let dir = tempdir().unwrap();
        std::fs::create_dir(dir.path().join("metadata")).unwrap();
        std::fs::write(dir.path().join("metadata/prod_model.json"), METADATA).unwrap();

        let schema = Schema::new("Sales", "Order").with_property(Property::new("orderNo", "string"));
        save_schema(&schema, dir.path().join("order.toml")).unwrap();

        let manifest_path = dir.path().join("crudgen.toml");
        std::fs::write(
            &manifest_path,
            r#"
artifact_root = "out"

[[entity]]
class_name = "ProdModel"
namespace_prefix = "Warranty.Setup"
presentation_title = "Product Model"
table_name = "PROD_MODEL"
metadata = "metadata/prod_model.json"

[[entity]]
schema = "order.toml"
menu_route = "sales/order"
"#,
        )
        .unwrap();

        let manifest = load_manifest(&manifest_path).unwrap();
        assert_eq!(manifest.artifact_root(), Some(dir.path().join("out")));

        let schemas = manifest.resolve_schemas().unwrap();
        assert_eq!(schemas.len(), 2);

        assert_eq!(schemas[0].class_name, "ProdModel");
        assert_eq!(schemas[0].namespace_prefix.to_php(), "Warranty\\Setup");
        assert_eq!(schemas[0].display_title(), "Product Model");
        assert_eq!(schemas[0].properties.len(), 1);
        assert_eq!(schemas[0].properties[0].name, "exportNo");

        assert_eq!(schemas[1].class_name, "Order");
        assert_eq!(schemas[1].route(), "sales/order");
        assert_eq!(schemas[1].namespace_prefix.to_php(), "Sales");
    }

    #[test]
    fn test_missing_source_file() {
        let dir = tempdir().unwrap();
        let manifest = parse_manifest(
            "[[entity]]\nschema = \"missing.json\"\n",
            dir.path(),
        )
        .unwrap();
        assert!(manifest.resolve_schemas().unwrap_err().is_io());
    }
}
