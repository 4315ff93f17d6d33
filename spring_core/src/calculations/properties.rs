//! # Property Sets
//!
//! A snapshot of every derived property of a spring, handed to presentation
//! layers as structured data. The core never formats these; a front end
//! picks display units per [`Dimension`](crate::units::Dimension) and renders
//! [`SpringProperties::entries`] in order.
//!
//! ## JSON Example
//!
//! ```json
//! {
//!   "material": "Music wire (ASTM A228)",
//!   "outer_diameter": 0.0127,
//!   "spring_constant": 455.5,
//!   "spring_index": 13.29,
//!   "index_rating": "Acceptable",
//!   "feasible": true,
//!   ...
//! }
//! ```

use serde::{Deserialize, Serialize};

use crate::settings::{IndexBand, IndexRating};
use crate::units::{Angle, Force, Length, Mass, Quantity, Stiffness, Stress};

use super::spring::Spring;

/// Every derived property of one spring, in base units.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpringProperties {
    pub material: String,
    pub shear_modulus: Stress,

    pub outer_diameter: Length,
    pub mean_diameter: Length,
    pub inner_diameter: Length,
    pub wire_diameter: Length,
    pub free_length: Length,
    pub active_coils: f64,
    pub total_coils: f64,

    pub spring_constant: Stiffness,
    pub spring_index: f64,
    pub wahl_factor: f64,
    pub max_force: Force,
    pub max_shear_stress: Stress,
    pub solid_length: Length,
    /// Negative when the design is infeasible
    pub max_displacement: Length,
    pub coil_pitch: Length,
    pub rise_angle: Angle,
    pub wire_length: Length,
    pub wire_mass: Option<Mass>,

    pub index_rating: IndexRating,
    /// τ_max / allowable, when the material has an allowable
    pub stress_utilization: Option<f64>,
    pub feasible: bool,
}

/// Names of the reported properties, in report order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PropertyName {
    OuterDiameter,
    MeanDiameter,
    InnerDiameter,
    WireDiameter,
    FreeLength,
    ActiveCoils,
    SpringConstant,
    SpringIndex,
    WahlFactor,
    MaxForce,
    MaxShearStress,
    SolidLength,
    MaxDisplacement,
    CoilPitch,
    RiseAngle,
    WireLength,
    WireMass,
    ShearModulus,
}

impl PropertyName {
    /// Human-readable label
    pub fn label(&self) -> &'static str {
        match self {
            PropertyName::OuterDiameter => "Outer diameter",
            PropertyName::MeanDiameter => "Mean diameter",
            PropertyName::InnerDiameter => "Inside diameter",
            PropertyName::WireDiameter => "Wire diameter",
            PropertyName::FreeLength => "Free length",
            PropertyName::ActiveCoils => "Number of coils",
            PropertyName::SpringConstant => "Spring constant",
            PropertyName::SpringIndex => "Spring index",
            PropertyName::WahlFactor => "Wahl factor",
            PropertyName::MaxForce => "Max force possible",
            PropertyName::MaxShearStress => "Max shear stress",
            PropertyName::SolidLength => "Solid height",
            PropertyName::MaxDisplacement => "Max displacement",
            PropertyName::CoilPitch => "Coil pitch",
            PropertyName::RiseAngle => "Rise angle",
            PropertyName::WireLength => "Spring wire length",
            PropertyName::WireMass => "Spring wire mass",
            PropertyName::ShearModulus => "Shear modulus",
        }
    }
}

/// Advisory findings a report should surface alongside the numbers
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind")]
pub enum Advisory {
    /// Free length does not exceed solid length
    Infeasible { max_displacement: Length },
    /// Spring index outside the acceptable band
    IndexOutOfRange { spring_index: f64 },
    /// Max shear stress above the material's allowable
    Overstressed { utilization: f64 },
}

impl Spring {
    /// Snapshot every derived property, rating the index against `band`.
    pub fn properties(&self, band: &IndexBand) -> SpringProperties {
        SpringProperties {
            material: self.material().name().to_string(),
            shear_modulus: self.material().shear_modulus(),
            outer_diameter: self.outer_diameter(),
            mean_diameter: self.mean_diameter(),
            inner_diameter: self.inner_diameter(),
            wire_diameter: self.wire_diameter(),
            free_length: self.free_length(),
            active_coils: self.active_coils(),
            total_coils: self.total_coils(),
            spring_constant: self.spring_constant(),
            spring_index: self.spring_index(),
            wahl_factor: self.wahl_factor(),
            max_force: self.max_force(),
            max_shear_stress: self.max_shear_stress(),
            solid_length: self.solid_length(),
            max_displacement: self.max_displacement(),
            coil_pitch: self.coil_pitch(),
            rise_angle: self.rise_angle(),
            wire_length: self.wire_length(),
            wire_mass: self.wire_mass(),
            index_rating: self.index_rating(band),
            stress_utilization: self.stress_utilization(),
            feasible: self.is_feasible(),
        }
    }
}

impl SpringProperties {
    /// Reported properties in fixed order. Wire mass is omitted when the
    /// material has no density.
    pub fn entries(&self) -> Vec<(PropertyName, Quantity)> {
        let mut entries: Vec<(PropertyName, Quantity)> = vec![
            (PropertyName::OuterDiameter, self.outer_diameter.into()),
            (PropertyName::MeanDiameter, self.mean_diameter.into()),
            (PropertyName::InnerDiameter, self.inner_diameter.into()),
            (PropertyName::WireDiameter, self.wire_diameter.into()),
            (PropertyName::FreeLength, self.free_length.into()),
            (PropertyName::ActiveCoils, Quantity::Ratio(self.active_coils)),
            (PropertyName::SpringConstant, self.spring_constant.into()),
            (PropertyName::SpringIndex, Quantity::Ratio(self.spring_index)),
            (PropertyName::WahlFactor, Quantity::Ratio(self.wahl_factor)),
            (PropertyName::MaxForce, self.max_force.into()),
            (PropertyName::MaxShearStress, self.max_shear_stress.into()),
            (PropertyName::SolidLength, self.solid_length.into()),
            (PropertyName::MaxDisplacement, self.max_displacement.into()),
            (PropertyName::CoilPitch, self.coil_pitch.into()),
            (PropertyName::RiseAngle, self.rise_angle.into()),
            (PropertyName::WireLength, self.wire_length.into()),
        ];
        if let Some(mass) = self.wire_mass {
            entries.push((PropertyName::WireMass, mass.into()));
        }
        entries.push((PropertyName::ShearModulus, self.shear_modulus.into()));
        entries
    }

    /// Look up a single property
    pub fn get(&self, name: PropertyName) -> Option<Quantity> {
        self.entries()
            .into_iter()
            .find(|(n, _)| *n == name)
            .map(|(_, q)| q)
    }

    /// Advisory findings: infeasible design, then index outside the band,
    /// then stress above the allowable
    pub fn advisories(&self) -> Vec<Advisory> {
        let mut advisories = Vec::new();
        if !self.feasible {
            advisories.push(Advisory::Infeasible {
                max_displacement: self.max_displacement,
            });
        }
        if self.index_rating == IndexRating::OutOfRange {
            advisories.push(Advisory::IndexOutOfRange {
                spring_index: self.spring_index,
            });
        }
        if let Some(utilization) = self.stress_utilization {
            if utilization > 1.0 {
                advisories.push(Advisory::Overstressed { utilization });
            }
        }
        advisories
    }
}
