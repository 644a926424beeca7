//! Loading and saving schema documents
//!
//! Schemas are stored as JSON (`.json`) or TOML (`.toml`); the format is
//! chosen from the file extension.

use crate::Schema;
use crudgen_core::{CrudgenError, CrudgenResult};
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::path::Path;

// ============================================================================
// DocumentFormat
// ============================================================================

/// On-disk format of a schema document
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentFormat {
    Json,
    Toml,
}

impl DocumentFormat {
    /// Pick the format from a file extension (case-insensitive)
    pub fn from_path(path: &Path) -> CrudgenResult<Self> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase());

        match ext.as_deref() {
            Some("json") => Ok(DocumentFormat::Json),
            Some("toml") => Ok(DocumentFormat::Toml),
            _ => Err(CrudgenError::UnsupportedFormat(path.to_path_buf())),
        }
    }

    /// Parse a document in this format
    pub fn parse<T: DeserializeOwned>(&self, content: &str) -> CrudgenResult<T> {
        match self {
            DocumentFormat::Json => Ok(serde_json::from_str(content)?),
            DocumentFormat::Toml => Ok(toml::from_str(content)?),
        }
    }

    /// Render a value in this format
    pub fn render<T: Serialize>(&self, value: &T) -> CrudgenResult<String> {
        match self {
            DocumentFormat::Json => {
                let mut out = serde_json::to_string_pretty(value)?;
                out.push('\n');
                Ok(out)
            }
            DocumentFormat::Toml => Ok(toml::to_string_pretty(value)?),
        }
    }
}

// ============================================================================
// Save Functions
// ============================================================================

/// Save a schema to a file, creating parent directories as needed
pub fn save_schema(schema: &Schema, path: impl AsRef<Path>) -> CrudgenResult<()> {
    let path = path.as_ref();
    let content = save_schema_to_string(schema, DocumentFormat::from_path(path)?)?;

    // Ensure parent directory exists
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            std::fs::create_dir_all(parent).map_err(|e| CrudgenError::DirectoryCreate {
                path: parent.to_path_buf(),
                message: e.to_string(),
            })?;
        }
    }

    std::fs::write(path, content).map_err(|e| CrudgenError::FileWrite {
        path: path.to_path_buf(),
        message: e.to_string(),
    })?;

    Ok(())
}

/// Save a schema to a string in the given format
pub fn save_schema_to_string(schema: &Schema, format: DocumentFormat) -> CrudgenResult<String> {
    format.render(schema)
}

// ============================================================================
// Load Functions
// ============================================================================

/// Load a schema from a file
///
/// # Example
///
/// ```rust,ignore
/// use crudgen_ir::load_schema;
///
/// let schema = load_schema("schemas/prod_model.json").unwrap();
/// println!("Loaded schema: {}", schema.class_name);
/// ```
pub fn load_schema(path: impl AsRef<Path>) -> CrudgenResult<Schema> {
    let path = path.as_ref();
    let format = DocumentFormat::from_path(path)?;
    let content = read_document(path)?;

    load_schema_from_str(&content, format).map_err(|e| match e {
        CrudgenError::Json(_) | CrudgenError::TomlDecode(_) => CrudgenError::FileRead {
            path: path.to_path_buf(),
            message: format!("Invalid schema document: {}", e),
        },
        other => other,
    })
}

/// Load a schema from a string in the given format
pub fn load_schema_from_str(content: &str, format: DocumentFormat) -> CrudgenResult<Schema> {
    format.parse(content)
}

/// Read a whole document into memory
pub(crate) fn read_document(path: &Path) -> CrudgenResult<String> {
    std::fs::read_to_string(path).map_err(|e| CrudgenError::FileRead {
        path: path.to_path_buf(),
        message: e.to_string(),
    })
}

// ============================================================================
// Tests
// ============================================================================
