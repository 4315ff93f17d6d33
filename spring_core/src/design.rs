//! # Design Files
//!
//! A `SpringDesign` is the JSON form of one spring as a user writes it: plain
//! numbers in a chosen input unit system, a material spec, and either a wire
//! diameter or a target rate to solve for. [`SpringDesign::build`] turns it
//! into a validated [`Spring`].
//!
//! Reading the file is left to the caller; this module only parses text.
//!
//! ## JSON Example
//!
//! ```json
//! {
//!   "label": "Latch return",
//!   "units": "En",
//!   "material": { "preset": "steel" },
//!   "mean_diameter": 0.420,
//!   "target_rate": 2.0,
//!   "free_length": 4.0,
//!   "active_coils": 32
//! }
//! ```

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::calculations::Spring;
use crate::errors::{SpringError, SpringResult};
use crate::materials::MaterialSpec;
use crate::units::{Dimension, Length, Stiffness, UnitSystem};

/// One spring as written in a design file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SpringDesign {
    /// User label (e.g. "S-1", "Latch return")
    #[serde(default)]
    pub label: String,

    /// Unit system the numbers below are expressed in
    #[serde(default)]
    pub units: UnitSystem,

    pub material: MaterialSpec,

    pub mean_diameter: f64,

    /// Wire diameter; give this or `target_rate`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub wire_diameter: Option<f64>,

    /// Target spring rate to solve the wire diameter for
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_rate: Option<f64>,

    pub free_length: f64,

    pub active_coils: f64,
}

impl SpringDesign {
    /// Parse a design from JSON text
    pub fn from_json(json: &str) -> SpringResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Resolve the material and build the spring.
    ///
    /// # Errors
    ///
    /// - `InvalidGeometry` if both or neither of `wire_diameter` and
    ///   `target_rate` are given, or the geometry is invalid
    /// - material and solve errors as raised by their constructors
    pub fn build(&self) -> SpringResult<Spring> {
        let material = Arc::new(self.material.resolve(self.units)?);
        let length = self.units.input_unit(Dimension::Length).scale;
        let rate = self.units.input_unit(Dimension::Stiffness).scale;

        let mean_diameter = Length::from_unit(self.mean_diameter, length);
        let free_length = Length::from_unit(self.free_length, length);

        match (self.wire_diameter, self.target_rate) {
            (Some(d), None) => Spring::new(
                mean_diameter,
                Length::from_unit(d, length),
                free_length,
                self.active_coils,
                material,
            ),
            (None, Some(k)) => Spring::for_rate(
                mean_diameter,
                self.active_coils,
                free_length,
                Stiffness::from_unit(k, rate),
                material,
            ),
            (Some(_), Some(_)) => Err(SpringError::invalid_geometry(
                "wire_diameter",
                "both given",
                "Give either wire_diameter or target_rate, not both",
            )),
            (None, None) => Err(SpringError::invalid_geometry(
                "wire_diameter",
                "missing",
                "Give wire_diameter or a target_rate to solve for",
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::units::{INCH, LBF_PER_IN, MILLIMETER};
    use approx::assert_relative_eq;

    const REFERENCE: &str = r#"{
        "label": "S-1",
        "units": "En",
        "material": { "preset": "steel" },
        "mean_diameter": 0.465,
        "wire_diameter": 0.035,
        "free_length": 1.0,
        "active_coils": 8
    }"#;

    #[test]
    fn test_build_with_wire_diameter() {
        let design = SpringDesign::from_json(REFERENCE).unwrap();
        assert_eq!(design.label, "S-1");
        let spring = design.build().unwrap();
        let k = spring.spring_constant().to_unit(LBF_PER_IN);
        assert_relative_eq!(k, 2.601, max_relative = 1e-3);
    }

    #[test]
    fn test_build_with_target_rate() {
        let json = r#"{
            "units": "En",
            "material": { "preset": "music wire" },
            "mean_diameter": 0.420,
            "target_rate": 2.0,
            "free_length": 4.0,
            "active_coils": 32
        }"#;
        let spring = SpringDesign::from_json(json).unwrap().build().unwrap();
        assert_relative_eq!(spring.wire_diameter().to_unit(INCH), 0.0429, max_relative = 2e-3);
        assert_relative_eq!(spring.spring_constant().to_unit(LBF_PER_IN), 2.0, max_relative = 1e-9);
    }

    #[test]
    fn test_si_units_match_english() {
        let si = SpringDesign {
            label: "metric".to_string(),
            units: UnitSystem::Si,
            material: MaterialSpec::from_preset("steel"),
            mean_diameter: 0.465 * INCH,
            wire_diameter: Some(0.035 * INCH),
            target_rate: None,
            free_length: 1.0 * INCH,
            active_coils: 8.0,
        };
        let english = SpringDesign::from_json(REFERENCE).unwrap();
        assert_relative_eq!(
            si.build().unwrap().spring_constant().value(),
            english.build().unwrap().spring_constant().value(),
            max_relative = 1e-12
        );
        assert_relative_eq!(0.035 * INCH / MILLIMETER, 0.889, max_relative = 1e-12);
    }

    #[test]
    fn test_requires_exactly_one_of_wire_or_rate() {
        let mut design = SpringDesign::from_json(REFERENCE).unwrap();
        design.target_rate = Some(2.6);
        assert_eq!(design.build().unwrap_err().error_code(), "INVALID_GEOMETRY");

        design.wire_diameter = None;
        design.target_rate = None;
        assert!(design.build().is_err());
    }

    #[test]
    fn test_rejects_unknown_fields() {
        let json = r#"{
            "material": { "preset": "steel" },
            "mean_diameter": 1,
            "free_length": 1,
            "active_coils": 1,
            "colour": "red"
        }"#;
        let err = SpringDesign::from_json(json).unwrap_err();
        assert_eq!(err.error_code(), "SERIALIZATION_ERROR");
    }

    #[test]
    fn test_unknown_material() {
        let json = REFERENCE.replace("steel", "unobtainium");
        let err = SpringDesign::from_json(&json).unwrap().build().unwrap_err();
        assert_eq!(err.error_code(), "MATERIAL_NOT_FOUND");
    }
}
