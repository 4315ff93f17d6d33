//! # Error Types
//!
//! Structured error types for spring_core. Every failure is a local
//! validation failure raised where the bad value enters the system, so each
//! variant names the offending field and carries enough context to fix it.
//!
//! ## Example
//!
//! ```rust
//! use spring_core::errors::{SpringError, SpringResult};
//!
//! fn validate_coils(active_coils: f64) -> SpringResult<()> {
//!     if active_coils <= 0.0 {
//!         return Err(SpringError::invalid_geometry(
//!             "active_coils",
//!             active_coils.to_string(),
//!             "Active coil count must be positive",
//!         ));
//!     }
//!     Ok(())
//! }
//! ```

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Result type alias for spring_core operations
pub type SpringResult<T> = Result<T, SpringError>;

/// Structured error type for spring calculations.
#[derive(Error, Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", content = "details")]
pub enum SpringError {
    /// A geometry field is non-positive, non-finite, or inconsistent
    /// (e.g. wire diameter not smaller than mean diameter)
    #[error("Invalid geometry for '{field}': {value} - {reason}")]
    InvalidGeometry {
        field: String,
        value: String,
        reason: String,
    },

    /// Free length does not exceed solid length, so the spring cannot compress
    #[error(
        "Infeasible design: free length {free_length_m} m does not exceed \
         solid length {solid_length_m} m"
    )]
    InfeasibleDesign {
        free_length_m: f64,
        solid_length_m: f64,
    },

    /// Insufficient, inconsistent or non-positive material constants
    #[error("Invalid material: {reason}")]
    InvalidMaterial { reason: String },

    /// Unknown material preset name
    #[error("Material not found: {material_name}")]
    MaterialNotFound { material_name: String },

    /// Inverse solve has no positive real solution for the given inputs
    #[error("Domain error for '{field}': {value} - {reason}")]
    DomainError {
        field: String,
        value: String,
        reason: String,
    },

    /// Unknown display/input unit system name
    #[error("Unknown unit system: {name} (expected 'En' or 'SI')")]
    UnknownUnitSystem { name: String },

    /// Settings file parsed but holds contradictory values
    #[error("Invalid settings: {reason}")]
    InvalidSettings { reason: String },

    /// JSON serialization/deserialization error
    #[error("Serialization error: {reason}")]
    SerializationError { reason: String },
}

impl SpringError {
    /// Create an InvalidGeometry error
    pub fn invalid_geometry(
        field: impl Into<String>,
        value: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        SpringError::InvalidGeometry {
            field: field.into(),
            value: value.into(),
            reason: reason.into(),
        }
    }

    /// Create an InfeasibleDesign error from base-unit lengths
    pub fn infeasible_design(free_length_m: f64, solid_length_m: f64) -> Self {
        SpringError::InfeasibleDesign {
            free_length_m,
            solid_length_m,
        }
    }

    /// Create an InvalidMaterial error
    pub fn invalid_material(reason: impl Into<String>) -> Self {
        SpringError::InvalidMaterial {
            reason: reason.into(),
        }
    }

    /// Create a MaterialNotFound error
    pub fn material_not_found(material_name: impl Into<String>) -> Self {
        SpringError::MaterialNotFound {
            material_name: material_name.into(),
        }
    }

    /// Create a DomainError
    pub fn domain_error(
        field: impl Into<String>,
        value: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        SpringError::DomainError {
            field: field.into(),
            value: value.into(),
            reason: reason.into(),
        }
    }

    /// Create an UnknownUnitSystem error
    pub fn unknown_unit_system(name: impl Into<String>) -> Self {
        SpringError::UnknownUnitSystem { name: name.into() }
    }

    /// Get a short error code for programmatic handling
    pub fn error_code(&self) -> &'static str {
        match self {
            SpringError::InvalidGeometry { .. } => "INVALID_GEOMETRY",
            SpringError::InfeasibleDesign { .. } => "INFEASIBLE_DESIGN",
            SpringError::InvalidMaterial { .. } => "INVALID_MATERIAL",
            SpringError::MaterialNotFound { .. } => "MATERIAL_NOT_FOUND",
            SpringError::DomainError { .. } => "DOMAIN_ERROR",
            SpringError::UnknownUnitSystem { .. } => "UNKNOWN_UNIT_SYSTEM",
            SpringError::InvalidSettings { .. } => "INVALID_SETTINGS",
            SpringError::SerializationError { .. } => "SERIALIZATION_ERROR",
        }
    }
}

impl From<serde_json::Error> for SpringError {
    fn from(err: serde_json::Error) -> Self {
        SpringError::SerializationError {
            reason: err.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_serialization() {
        let error = SpringError::invalid_geometry(
            "wire_diameter",
            "-0.001",
            "Wire diameter must be positive",
        );
        let json = serde_json::to_string(&error).unwrap();
        assert!(json.contains("\"type\":\"InvalidGeometry\""));
        let roundtrip: SpringError = serde_json::from_str(&json).unwrap();
        assert_eq!(error, roundtrip);
    }

    #[test]
    fn test_error_codes() {
        assert_eq!(
            SpringError::material_not_found("unobtainium").error_code(),
            "MATERIAL_NOT_FOUND"
        );
        assert_eq!(SpringError::domain_error("k", "0", "zero").error_code(), "DOMAIN_ERROR");
        assert_eq!(SpringError::infeasible_design(0.01, 0.02).error_code(), "INFEASIBLE_DESIGN");
    }

    #[test]
    fn test_json_error_conversion() {
        let parse_err = serde_json::from_str::<f64>("not a number").unwrap_err();
        let err: SpringError = parse_err.into();
        assert_eq!(err.error_code(), "SERIALIZATION_ERROR");
    }

    #[test]
    fn test_display_message() {
        let err = SpringError::unknown_unit_system("cubits");
        assert_eq!(err.to_string(), "Unknown unit system: cubits (expected 'En' or 'SI')");
    }
}
