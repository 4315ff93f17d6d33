//! # Materials
//!
//! Elastic constants for spring wire. A [`Material`] is built once, is
//! read-only afterwards, and carries no reference to spring geometry, so a
//! single instance can back any number of springs.
//!
//! The only constant the spring equations need is the shear modulus G. It
//! can be given directly or derived from Young's modulus E and Poisson ratio
//! ν through `G = E / (2(1 + ν))`.
//!
//! ## Example
//!
//! ```rust
//! use spring_core::materials::{Material, MaterialPreset};
//! use spring_core::units::{Stress, PSI};
//!
//! let steel = Material::preset(MaterialPreset::MusicWire);
//! assert!((steel.shear_modulus().to_unit(PSI) - 11.153_846e6).abs() < 1.0);
//!
//! let bronze_e = Stress::from_unit(15e6, PSI);
//! let custom = Material::from_youngs_modulus("Bronze", bronze_e, 0.2).unwrap();
//! assert!((custom.shear_modulus().to_unit(PSI) - 6.25e6).abs() < 1e-3);
//! ```

pub mod presets;

pub use presets::{MaterialPreset, PresetProperties};

use serde::{Deserialize, Serialize};

use crate::errors::{SpringError, SpringResult};
use crate::units::{Density, Dimension, Stress, UnitSystem};

/// Relative tolerance when G, E and ν are all supplied
pub const MODULUS_CONSISTENCY_TOLERANCE: f64 = 0.01;

/// Elastic and advisory constants of a spring wire material.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Material {
    name: String,
    shear_modulus: Stress,
    youngs_modulus: Option<Stress>,
    poisson_ratio: Option<f64>,
    density: Option<Density>,
    allowable_shear: Option<Stress>,
}

impl Material {
    /// Build a material from a named preset.
    pub fn preset(preset: MaterialPreset) -> Self {
        let props = preset.properties();
        Material {
            name: preset.display_name().to_string(),
            shear_modulus: shear_from_youngs(props.youngs_modulus, props.poisson_ratio),
            youngs_modulus: Some(props.youngs_modulus),
            poisson_ratio: Some(props.poisson_ratio),
            density: Some(props.density),
            allowable_shear: Some(props.allowable_shear),
        }
    }

    /// Build a material from a preset name such as `"steel"` or `"music wire"`.
    pub fn from_name(name: &str) -> SpringResult<Self> {
        MaterialPreset::from_str_flexible(name).map(Material::preset)
    }

    /// Build from Young's modulus and Poisson ratio, deriving G.
    pub fn from_youngs_modulus(
        name: impl Into<String>,
        youngs_modulus: Stress,
        poisson_ratio: f64,
    ) -> SpringResult<Self> {
        Material::from_moduli(name, None, Some(youngs_modulus), Some(poisson_ratio))
    }

    /// Build from the shear modulus alone.
    pub fn from_shear_modulus(
        name: impl Into<String>,
        shear_modulus: Stress,
    ) -> SpringResult<Self> {
        Material::from_moduli(name, Some(shear_modulus), None, None)
    }

    /// Build from any sufficient combination of G, E and ν.
    ///
    /// - G alone, or G with one of E/ν (the other is derived)
    /// - E with ν (G is derived)
    /// - all three, which must satisfy `G = E / (2(1 + ν))` within
    ///   [`MODULUS_CONSISTENCY_TOLERANCE`]
    pub fn from_moduli(
        name: impl Into<String>,
        shear_modulus: Option<Stress>,
        youngs_modulus: Option<Stress>,
        poisson_ratio: Option<f64>,
    ) -> SpringResult<Self> {
        if let Some(g) = shear_modulus {
            check_positive_modulus("shear modulus G", g)?;
        }
        if let Some(e) = youngs_modulus {
            check_positive_modulus("Young's modulus E", e)?;
        }
        if let Some(nu) = poisson_ratio {
            check_poisson_ratio(nu)?;
        }

        let (g, e, nu) = match (shear_modulus, youngs_modulus, poisson_ratio) {
            (Some(g), None, None) => (g, None, None),
            (None, Some(e), Some(nu)) => (shear_from_youngs(e, nu), Some(e), Some(nu)),
            (Some(g), Some(e), None) => {
                let nu = e / (g * 2.0) - 1.0;
                check_poisson_ratio(nu)?;
                (g, Some(e), Some(nu))
            }
            (Some(g), None, Some(nu)) => (g, Some(g * (2.0 * (1.0 + nu))), Some(nu)),
            (Some(g), Some(e), Some(nu)) => {
                let derived = shear_from_youngs(e, nu);
                let mismatch = ((g - derived) / derived).abs();
                if mismatch > MODULUS_CONSISTENCY_TOLERANCE {
                    return Err(SpringError::invalid_material(format!(
                        "G = {} Pa is inconsistent with E = {} Pa and nu = {} (expected G = {} Pa)",
                        g.value(),
                        e.value(),
                        nu,
                        derived.value()
                    )));
                }
                (g, Some(e), Some(nu))
            }
            (None, Some(_), None) | (None, None, Some(_)) => {
                return Err(SpringError::invalid_material(
                    "Young's modulus and Poisson ratio must be given together when G is absent",
                ));
            }
            (None, None, None) => {
                return Err(SpringError::invalid_material(
                    "no preset and no elastic constants supplied",
                ));
            }
        };

        Ok(Material {
            name: name.into(),
            shear_modulus: g,
            youngs_modulus: e,
            poisson_ratio: nu,
            density: None,
            allowable_shear: None,
        })
    }

    /// Attach a mass density (enables wire mass).
    pub fn with_density(mut self, density: Density) -> SpringResult<Self> {
        if !(density.value().is_finite() && density.value() > 0.0) {
            return Err(SpringError::invalid_material(format!(
                "density must be positive, got {} kg/m^3",
                density.value()
            )));
        }
        self.density = Some(density);
        Ok(self)
    }

    /// Attach an advisory allowable shear stress (enables stress utilization).
    pub fn with_allowable_shear(mut self, allowable: Stress) -> SpringResult<Self> {
        if !(allowable.value().is_finite() && allowable.value() > 0.0) {
            return Err(SpringError::invalid_material(format!(
                "allowable shear stress must be positive, got {} Pa",
                allowable.value()
            )));
        }
        self.allowable_shear = Some(allowable);
        Ok(self)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Shear modulus G
    pub fn shear_modulus(&self) -> Stress {
        self.shear_modulus
    }

    /// Young's modulus E, when known
    pub fn youngs_modulus(&self) -> Option<Stress> {
        self.youngs_modulus
    }

    /// Poisson ratio ν, when known
    pub fn poisson_ratio(&self) -> Option<f64> {
        self.poisson_ratio
    }

    /// Mass density, when known
    pub fn density(&self) -> Option<Density> {
        self.density
    }

    /// Advisory allowable shear stress, when known
    pub fn allowable_shear(&self) -> Option<Stress> {
        self.allowable_shear
    }
}

impl Default for Material {
    fn default() -> Self {
        Material::preset(MaterialPreset::MusicWire)
    }
}

impl std::fmt::Display for Material {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name)
    }
}

impl From<MaterialPreset> for Material {
    fn from(preset: MaterialPreset) -> Self {
        Material::preset(preset)
    }
}

/// G = E / (2(1 + ν))
pub fn shear_from_youngs(youngs_modulus: Stress, poisson_ratio: f64) -> Stress {
    youngs_modulus / (2.0 * (1.0 + poisson_ratio))
}

fn check_positive_modulus(what: &str, modulus: Stress) -> SpringResult<()> {
    if modulus.value().is_finite() && modulus.value() > 0.0 {
        Ok(())
    } else {
        Err(SpringError::invalid_material(format!(
            "{} must be positive, got {} Pa",
            what,
            modulus.value()
        )))
    }
}

fn check_poisson_ratio(nu: f64) -> SpringResult<()> {
    if nu.is_finite() && nu > -1.0 && nu <= 0.5 {
        Ok(())
    } else {
        Err(SpringError::invalid_material(format!(
            "Poisson ratio must lie in (-1, 0.5], got {}",
            nu
        )))
    }
}

/// Material as written in a design file.
///
/// Either names a preset or gives elastic constants in the design's input
/// unit system (psi for English designs, Pa for SI).
///
/// ```json
/// { "preset": "steel" }
/// { "name": "Phosphor bronze", "youngs_modulus": 15e6, "poisson_ratio": 0.2 }
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct MaterialSpec {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub preset: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shear_modulus: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub youngs_modulus: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub poisson_ratio: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub density: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub allowable_shear: Option<f64>,
}

impl MaterialSpec {
    /// Spec naming a preset
    pub fn from_preset(name: impl Into<String>) -> Self {
        MaterialSpec {
            preset: Some(name.into()),
            ..Default::default()
        }
    }

    /// Resolve into a validated [`Material`], reading magnitudes in `units`.
    ///
    /// Explicit density or allowable stress override the preset's values.
    pub fn resolve(&self, units: UnitSystem) -> SpringResult<Material> {
        let stress = units.input_unit(Dimension::Stress).scale;
        let density = units.input_unit(Dimension::Density).scale;

        let mut material = match &self.preset {
            Some(preset) => {
                if self.shear_modulus.is_some()
                    || self.youngs_modulus.is_some()
                    || self.poisson_ratio.is_some()
                {
                    return Err(SpringError::invalid_material(
                        "give either a preset or elastic constants, not both",
                    ));
                }
                let mut material = Material::from_name(preset)?;
                if let Some(name) = &self.name {
                    material.name = name.clone();
                }
                material
            }
            None => Material::from_moduli(
                self.name.clone().unwrap_or_else(|| "Custom".to_string()),
                self.shear_modulus.map(|g| Stress::from_unit(g, stress)),
                self.youngs_modulus.map(|e| Stress::from_unit(e, stress)),
                self.poisson_ratio,
            )?,
        };

        if let Some(rho) = self.density {
            material = material.with_density(Density::from_unit(rho, density))?;
        }
        if let Some(tau) = self.allowable_shear {
            material = material.with_allowable_shear(Stress::from_unit(tau, stress))?;
        }
        Ok(material)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::units::{GIGAPASCAL, LB_PER_IN3, PSI};
    use approx::assert_relative_eq;

    #[test]
    fn test_steel_preset() {
        let steel = Material::from_name("steel").unwrap();
        assert_relative_eq!(steel.shear_modulus().to_unit(PSI), 29.0e6 / 2.6, max_relative = 1e-12);
        assert_eq!(steel.poisson_ratio(), Some(0.3));
        assert!(steel.density().is_some());
        assert!(steel.allowable_shear().is_some());
    }

    #[test]
    fn test_unknown_preset() {
        let err = Material::from_name("unobtainium").unwrap_err();
        assert_eq!(err, SpringError::material_not_found("unobtainium"));
    }

    #[test]
    fn test_from_shear_modulus() {
        let g = Stress::from_unit(79.3, GIGAPASCAL);
        let mat = Material::from_shear_modulus("G only", g).unwrap();
        assert_relative_eq!(mat.shear_modulus().value(), 79.3e9);
        assert_eq!(mat.youngs_modulus(), None);
        assert_eq!(mat.poisson_ratio(), None);
    }

    #[test]
    fn test_derive_missing_constant() {
        let g = Stress::from_unit(11.5e6, PSI);
        let e = Stress::from_unit(29.9e6, PSI);
        let mat = Material::from_moduli("G+E", Some(g), Some(e), None).unwrap();
        assert_relative_eq!(mat.poisson_ratio().unwrap(), 0.3, max_relative = 1e-9);

        let mat = Material::from_moduli("G+nu", Some(g), None, Some(0.3)).unwrap();
        let e_psi = mat.youngs_modulus().unwrap().to_unit(PSI);
        assert_relative_eq!(e_psi, 29.9e6, max_relative = 1e-12);
    }

    #[test]
    fn test_consistent_triple() {
        let e = Stress::from_unit(29.0e6, PSI);
        let g = Stress::from_unit(11.2e6, PSI);
        assert!(Material::from_moduli("ok", Some(g), Some(e), Some(0.3)).is_ok());

        let g_bad = Stress::from_unit(12.0e6, PSI);
        let err = Material::from_moduli("bad", Some(g_bad), Some(e), Some(0.3)).unwrap_err();
        assert_eq!(err.error_code(), "INVALID_MATERIAL");
    }

    #[test]
    fn test_insufficient_constants() {
        assert!(Material::from_moduli("none", None, None, None).is_err());
        assert!(Material::from_moduli("E only", None, Some(Stress(200e9)), None).is_err());
        assert!(Material::from_moduli("nu only", None, None, Some(0.3)).is_err());
    }

    #[test]
    fn test_non_positive_modulus() {
        assert!(Material::from_shear_modulus("zero", Stress(0.0)).is_err());
        assert!(Material::from_youngs_modulus("neg", Stress(-1.0), 0.3).is_err());
        assert!(Material::from_youngs_modulus("nu", Stress(200e9), 0.7).is_err());
    }

    #[test]
    fn test_with_density() {
        let mat = Material::from_shear_modulus("x", Stress(80e9)).unwrap();
        assert!(mat.clone().with_density(Density(-1.0)).is_err());
        let mat = mat.with_density(Density(7850.0)).unwrap();
        assert_eq!(mat.density(), Some(Density(7850.0)));
    }

    #[test]
    fn test_spec_resolve_preset() {
        let spec: MaterialSpec = serde_json::from_str(r#"{ "preset": "steel" }"#).unwrap();
        let mat = spec.resolve(UnitSystem::English).unwrap();
        assert_eq!(mat, Material::preset(MaterialPreset::MusicWire));
    }

    #[test]
    fn test_spec_resolve_english_moduli() {
        let json = r#"{
            "name": "Phosphor bronze",
            "youngs_modulus": 15e6,
            "poisson_ratio": 0.2,
            "density": 0.320
        }"#;
        let spec: MaterialSpec = serde_json::from_str(json).unwrap();
        let mat = spec.resolve(UnitSystem::English).unwrap();
        assert_eq!(mat.name(), "Phosphor bronze");
        assert_relative_eq!(mat.shear_modulus().to_unit(PSI), 6.25e6, max_relative = 1e-12);
        let density = mat.density().unwrap().to_unit(LB_PER_IN3);
        assert_relative_eq!(density, 0.320, max_relative = 1e-12);
    }

    #[test]
    fn test_spec_rejects_preset_with_moduli() {
        let spec = MaterialSpec {
            preset: Some("steel".to_string()),
            shear_modulus: Some(11.5e6),
            ..Default::default()
        };
        assert!(spec.resolve(UnitSystem::English).is_err());
    }

    #[test]
    fn test_spec_rejects_empty() {
        let err = MaterialSpec::default().resolve(UnitSystem::Si).unwrap_err();
        assert_eq!(err.error_code(), "INVALID_MATERIAL");
    }

    #[test]
    fn test_material_serialization() {
        let json = serde_json::to_string(&Material::default()).unwrap();
        assert!(json.contains("\"shear_modulus\""));
        assert!(json.contains("Music wire"));
    }
}
