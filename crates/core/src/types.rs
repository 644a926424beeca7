//! Core types used throughout crudgen
//!
//! The artifact kind is the one type every crate agrees on: the schema
//! validator scopes its rules by kind, the renderer dispatches on it, and the
//! file writer derives paths from it.

use crate::error::{CrudgenError, CrudgenResult};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

// ============================================================================
// ArtifactKind
// ============================================================================

/// One of the four generated class kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ArtifactKind {
    Controller,
    Dto,
    #[serde(rename = "pres", alias = "presentation")]
    Presentation,
    Service,
}

impl ArtifactKind {
    /// Every kind, in generation order
    pub const ALL: [ArtifactKind; 4] = [
        ArtifactKind::Controller,
        ArtifactKind::Dto,
        ArtifactKind::Presentation,
        ArtifactKind::Service,
    ];

    /// Short lowercase name used on the command line and in manifests
    pub fn name(&self) -> &'static str {
        match self {
            ArtifactKind::Controller => "controller",
            ArtifactKind::Dto => "dto",
            ArtifactKind::Presentation => "pres",
            ArtifactKind::Service => "service",
        }
    }

    /// Class-name suffix (`ProdModel` + suffix)
    pub fn suffix(&self) -> &'static str {
        match self {
            ArtifactKind::Controller => "Controller",
            ArtifactKind::Dto => "Dto",
            ArtifactKind::Presentation => "Pres",
            ArtifactKind::Service => "Service",
        }
    }

    /// Namespace every class of this kind lives under
    pub fn namespace_root(&self) -> &'static str {
        match self {
            ArtifactKind::Controller => "App\\Http\\Controllers",
            ArtifactKind::Dto => "App\\Dto",
            ArtifactKind::Presentation => "App\\Presentation",
            ArtifactKind::Service => "App\\Services",
        }
    }

    /// Short name of the framework base class
    pub fn base_class(&self) -> &'static str {
        match self {
            ArtifactKind::Controller => "BaseController",
            ArtifactKind::Dto => "BaseDto",
            ArtifactKind::Presentation => "BasePres",
            ArtifactKind::Service => "BaseService",
        }
    }

    /// Fully qualified name of the framework base class
    pub fn base_class_fqn(&self) -> String {
        format!("{}\\{}", self.namespace_root(), self.base_class())
    }

    /// Parse a kind name, reporting unknown names as a template selection error
    pub fn parse(name: &str) -> CrudgenResult<Self> {
        name.parse()
    }
}

impl fmt::Display for ArtifactKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for ArtifactKind {
    type Err = CrudgenError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "controller" => Ok(ArtifactKind::Controller),
            "dto" => Ok(ArtifactKind::Dto),
            "pres" | "presentation" => Ok(ArtifactKind::Presentation),
            "service" => Ok(ArtifactKind::Service),
            _ => Err(CrudgenError::TemplateSelection(s.to_string())),
        }
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_known_kinds() {
        assert_eq!(ArtifactKind::parse("controller").unwrap(), ArtifactKind::Controller);
        assert_eq!(ArtifactKind::parse("DTO").unwrap(), ArtifactKind::Dto);
        assert_eq!(ArtifactKind::parse("pres").unwrap(), ArtifactKind::Presentation);
        assert_eq!(
            ArtifactKind::parse("presentation").unwrap(),
            ArtifactKind::Presentation
        );
        assert_eq!(ArtifactKind::parse(" service ").unwrap(), ArtifactKind::Service);
    }

    #[test]
    fn test_parse_unknown_kind() {
        let err = ArtifactKind::parse("repository").unwrap_err();
        assert!(err.is_template_selection());
    }

    #[test]
    fn test_suffixes_and_bases() {
        assert_eq!(ArtifactKind::Presentation.suffix(), "Pres");
        assert_eq!(ArtifactKind::Dto.base_class(), "BaseDto");
        assert_eq!(
            ArtifactKind::Controller.base_class_fqn(),
            "App\\Http\\Controllers\\BaseController"
        );
    }

    #[test]
    fn test_serde_names() {
        let json = serde_json::to_string(&ArtifactKind::Presentation).unwrap();
        assert_eq!(json, "\"pres\"");
        let kind: ArtifactKind = serde_json::from_str("\"presentation\"").unwrap();
        assert_eq!(kind, ArtifactKind::Presentation);
    }

    #[test]
    fn test_display_round_trips_through_parse() {
        for kind in ArtifactKind::ALL {
            assert_eq!(ArtifactKind::parse(&kind.to_string()).unwrap(), kind);
        }
    }
}
