//! Spring Wire Presets
//!
//! Nominal elastic constants for common round spring wire. The allowable
//! shear stresses are static-load values (set removed) expressed as a
//! fraction of a representative minimum tensile strength; they feed the
//! advisory stress check only and are not a substitute for the wire
//! supplier's size-dependent tables.

use serde::{Deserialize, Serialize};

use crate::errors::{SpringError, SpringResult};
use crate::units::{Density, Stress, KSI, LB_PER_IN3, PSI};

/// Named spring wire materials
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MaterialPreset {
    /// High-carbon music wire (ASTM A228), what most calculators call "steel"
    #[serde(rename = "music-wire", alias = "steel")]
    MusicWire,
    /// Austenitic stainless steel 302 (ASTM A313)
    #[serde(rename = "stainless-302", alias = "stainless")]
    Stainless302,
}

/// Nominal constants for a preset
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PresetProperties {
    /// Young's modulus E
    pub youngs_modulus: Stress,
    /// Poisson ratio
    pub poisson_ratio: f64,
    /// Mass density
    pub density: Density,
    /// Advisory allowable shear stress
    pub allowable_shear: Stress,
}

impl MaterialPreset {
    /// Parse from common string representations
    pub fn from_str_flexible(s: &str) -> SpringResult<Self> {
        match s.trim().to_lowercase().replace([' ', '_'], "-").as_str() {
            "steel" | "music-wire" | "musicwire" | "a228" | "astm-a228" => {
                Ok(MaterialPreset::MusicWire)
            }
            "stainless" | "stainless-302" | "ss302" | "ss-302" | "302" | "a313" | "astm-a313" => {
                Ok(MaterialPreset::Stainless302)
            }
            _ => Err(SpringError::material_not_found(s)),
        }
    }

    /// Get display name
    pub fn display_name(&self) -> &'static str {
        match self {
            MaterialPreset::MusicWire => "Music wire (ASTM A228)",
            MaterialPreset::Stainless302 => "Stainless steel 302 (ASTM A313)",
        }
    }

    /// Nominal constants for this preset
    pub fn properties(&self) -> PresetProperties {
        match self {
            MaterialPreset::MusicWire => PresetProperties {
                youngs_modulus: Stress::from_unit(29.0e6, PSI),
                poisson_ratio: 0.3,
                density: Density::from_unit(0.284, LB_PER_IN3),
                // 45% of a 230 ksi minimum tensile strength
                allowable_shear: Stress::from_unit(0.45 * 230.0, KSI),
            },
            MaterialPreset::Stainless302 => PresetProperties {
                youngs_modulus: Stress::from_unit(28.0e6, PSI),
                poisson_ratio: 0.31,
                density: Density::from_unit(0.286, LB_PER_IN3),
                // 35% of a 190 ksi minimum tensile strength
                allowable_shear: Stress::from_unit(0.35 * 190.0, KSI),
            },
        }
    }
}

impl std::fmt::Display for MaterialPreset {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}
