//! Error types for crudgen
//!
//! This module provides unified error handling across the workspace:
//! schema validation failures, template selection failures, and the IO and
//! format errors raised while reading schemas or writing artifacts.

use std::path::PathBuf;
use thiserror::Error;

/// The main error type for crudgen
#[derive(Debug, Error)]
pub enum CrudgenError {
    // ========================================================================
    // Render Errors
    // ========================================================================
    /// The schema is malformed or inconsistent for the requested artifact
    #[error("Schema validation failed for '{schema}': {}", .issues.join("; "))]
    SchemaValidation { schema: String, issues: Vec<String> },

    /// An unknown artifact kind was requested
    #[error("Unknown artifact kind '{0}' (expected one of: controller, dto, pres, service)")]
    TemplateSelection(String),

    // ========================================================================
    // Input Errors
    // ========================================================================
    /// The metadata document could not be turned into a schema
    #[error("Invalid metadata document: {0}")]
    InvalidMetadata(String),

    /// The batch manifest is inconsistent
    #[error("Invalid manifest: {0}")]
    InvalidManifest(String),

    /// The file extension does not map to a supported document format
    #[error("Unsupported document format for '{0}' (expected .json or .toml)")]
    UnsupportedFormat(PathBuf),

    // ========================================================================
    // Output Errors
    // ========================================================================
    /// A target file already exists and overwriting is disabled
    #[error("Output file already exists: {0}")]
    OutputExists(PathBuf),

    // ========================================================================
    // IO Errors
    // ========================================================================
    /// File IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// File read error
    #[error("Failed to read file '{path}': {message}")]
    FileRead { path: PathBuf, message: String },

    /// File write error
    #[error("Failed to write file '{path}': {message}")]
    FileWrite { path: PathBuf, message: String },

    /// Directory creation failed
    #[error("Failed to create directory '{path}': {message}")]
    DirectoryCreate { path: PathBuf, message: String },

    // ========================================================================
    // Serialization Errors
    // ========================================================================
    /// JSON (de)serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// TOML parse error
    #[error("TOML parse error: {0}")]
    TomlDecode(#[from] toml::de::Error),

    /// TOML serialization error
    #[error("TOML serialization error: {0}")]
    TomlEncode(#[from] toml::ser::Error),
}

impl CrudgenError {
    /// Create a schema validation error
    pub fn schema_validation(schema: impl Into<String>, issues: Vec<String>) -> Self {
        CrudgenError::SchemaValidation {
            schema: schema.into(),
            issues,
        }
    }

    /// Create a schema validation error with a single issue
    pub fn schema_issue(schema: impl Into<String>, issue: impl Into<String>) -> Self {
        Self::schema_validation(schema, vec![issue.into()])
    }

    /// Create a metadata error
    pub fn metadata(msg: impl Into<String>) -> Self {
        CrudgenError::InvalidMetadata(msg.into())
    }

    /// Create a manifest error
    pub fn manifest(msg: impl Into<String>) -> Self {
        CrudgenError::InvalidManifest(msg.into())
    }

    /// Check if this error is a schema validation error
    pub fn is_validation(&self) -> bool {
        matches!(self, CrudgenError::SchemaValidation { .. })
    }

    /// Check if this error is a template selection error
    pub fn is_template_selection(&self) -> bool {
        matches!(self, CrudgenError::TemplateSelection(_))
    }

    /// Check if this error is an IO error
    pub fn is_io(&self) -> bool {
        matches!(
            self,
            CrudgenError::Io(_)
                | CrudgenError::FileRead { .. }
                | CrudgenError::FileWrite { .. }
                | CrudgenError::DirectoryCreate { .. }
                | CrudgenError::OutputExists(_)
        )
    }

    /// Validation issues carried by this error (empty for other kinds)
    pub fn issues(&self) -> &[String] {
        match self {
            CrudgenError::SchemaValidation { issues, .. } => issues,
            _ => &[],
        }
    }
}

/// Result type alias using CrudgenError
pub type CrudgenResult<T> = Result<T, CrudgenError>;

// ============================================================================
// Tests
// ============================================================================
