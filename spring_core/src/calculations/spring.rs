//! # Helical Compression Spring
//!
//! Closed-form properties of a round-wire helical compression spring with
//! two inactive end coils (closed ends).
//!
//! ## Assumptions
//!
//! - Static loading; the Wahl factor covers curvature and direct shear
//! - Solid length counts two inactive end coils: `L_solid = d (n_a + 2)`
//! - Wire length includes the two end coils as flat turns
//!
//! ## Example
//!
//! ```rust
//! use std::sync::Arc;
//! use spring_core::calculations::Spring;
//! use spring_core::materials::{Material, MaterialPreset};
//! use spring_core::units::{Length, INCH, LBF_PER_IN};
//!
//! let steel = Arc::new(Material::preset(MaterialPreset::MusicWire));
//! let spring = Spring::new(
//!     Length::from_unit(0.465, INCH),
//!     Length::from_unit(0.035, INCH),
//!     Length::from_unit(1.0, INCH),
//!     8.0,
//!     steel,
//! )
//! .unwrap();
//!
//! let k = spring.spring_constant().to_unit(LBF_PER_IN);
//! assert!((k - 2.60).abs() < 0.01);
//! ```

use std::f64::consts::PI;
use std::sync::Arc;

use serde::Serialize;
use tracing::warn;

use crate::errors::{SpringError, SpringResult};
use crate::materials::Material;
use crate::settings::{IndexBand, IndexRating};
use crate::units::{Angle, Force, Length, Mass, Stiffness, Stress};

use super::solve::solve_diameter;

/// Number of inactive end coils (closed ends)
pub const END_COILS: f64 = 2.0;

/// One spring design: fixed geometry plus a shared material.
///
/// Every derived property is recomputed on demand from the four geometry
/// fields and the material. To iterate on a design, build a new spring with
/// [`Spring::with_wire_diameter`] and friends.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Spring {
    mean_diameter: Length,
    wire_diameter: Length,
    free_length: Length,
    active_coils: f64,
    material: Arc<Material>,
}

impl Spring {
    /// Build a spring, rejecting invalid geometry.
    ///
    /// # Errors
    ///
    /// `InvalidGeometry` when any length or the coil count is non-positive or
    /// non-finite, or when the wire diameter is not smaller than the mean
    /// diameter (which keeps the spring index above 1).
    ///
    /// A spring whose free length does not exceed its solid length is still
    /// built; it is reported through [`Spring::is_feasible`] and a warning.
    pub fn new(
        mean_diameter: Length,
        wire_diameter: Length,
        free_length: Length,
        active_coils: f64,
        material: Arc<Material>,
    ) -> SpringResult<Self> {
        check_positive("mean_diameter", mean_diameter.value())?;
        check_positive("wire_diameter", wire_diameter.value())?;
        check_positive("free_length", free_length.value())?;
        check_positive("active_coils", active_coils)?;
        if wire_diameter >= mean_diameter {
            return Err(SpringError::invalid_geometry(
                "wire_diameter",
                wire_diameter.value().to_string(),
                format!(
                    "Wire diameter must be smaller than mean diameter ({} m)",
                    mean_diameter.value()
                ),
            ));
        }

        let spring = Spring {
            mean_diameter,
            wire_diameter,
            free_length,
            active_coils,
            material,
        };

        if !spring.is_feasible() {
            warn!(
                free_length_m = free_length.value(),
                solid_length_m = spring.solid_length().value(),
                "free length does not exceed solid length; spring cannot be compressed"
            );
        }

        Ok(spring)
    }

    /// Solve the wire diameter for a target rate, then build the spring.
    pub fn for_rate(
        mean_diameter: Length,
        active_coils: f64,
        free_length: Length,
        target_rate: Stiffness,
        material: Arc<Material>,
    ) -> SpringResult<Self> {
        let wire_diameter = solve_diameter(mean_diameter, active_coils, target_rate, &material)?;
        Spring::new(mean_diameter, wire_diameter, free_length, active_coils, material)
    }

    /// Wire diameter giving `target_rate` for the given coil diameter and count.
    ///
    /// See [`solve_diameter`](super::solve::solve_diameter).
    pub fn solve_diameter(
        mean_diameter: Length,
        active_coils: f64,
        target_rate: Stiffness,
        material: &Material,
    ) -> SpringResult<Length> {
        solve_diameter(mean_diameter, active_coils, target_rate, material)
    }

    /// Same spring with a different wire diameter
    pub fn with_wire_diameter(&self, wire_diameter: Length) -> SpringResult<Self> {
        Spring::new(
            self.mean_diameter,
            wire_diameter,
            self.free_length,
            self.active_coils,
            Arc::clone(&self.material),
        )
    }

    /// Same spring with a different mean coil diameter
    pub fn with_mean_diameter(&self, mean_diameter: Length) -> SpringResult<Self> {
        Spring::new(
            mean_diameter,
            self.wire_diameter,
            self.free_length,
            self.active_coils,
            Arc::clone(&self.material),
        )
    }

    /// Same spring with a different active coil count
    pub fn with_active_coils(&self, active_coils: f64) -> SpringResult<Self> {
        Spring::new(
            self.mean_diameter,
            self.wire_diameter,
            self.free_length,
            active_coils,
            Arc::clone(&self.material),
        )
    }

    /// Same spring with a different free length
    pub fn with_free_length(&self, free_length: Length) -> SpringResult<Self> {
        Spring::new(
            self.mean_diameter,
            self.wire_diameter,
            free_length,
            self.active_coils,
            Arc::clone(&self.material),
        )
    }

    // ------------------------------------------------------------------------
    // Geometry
    // ------------------------------------------------------------------------

    pub fn mean_diameter(&self) -> Length {
        self.mean_diameter
    }

    pub fn wire_diameter(&self) -> Length {
        self.wire_diameter
    }

    pub fn free_length(&self) -> Length {
        self.free_length
    }

    pub fn active_coils(&self) -> f64 {
        self.active_coils
    }

    pub fn material(&self) -> &Material {
        &self.material
    }

    /// Shared handle to the material
    pub fn material_arc(&self) -> Arc<Material> {
        Arc::clone(&self.material)
    }

    /// Active plus end coils
    pub fn total_coils(&self) -> f64 {
        self.active_coils + END_COILS
    }

    /// D + d
    pub fn outer_diameter(&self) -> Length {
        self.mean_diameter + self.wire_diameter
    }

    /// D - d
    pub fn inner_diameter(&self) -> Length {
        self.mean_diameter - self.wire_diameter
    }

    /// C = D / d
    pub fn spring_index(&self) -> f64 {
        self.mean_diameter / self.wire_diameter
    }

    /// W = (4C - 1)/(4C - 4) + 0.615/C
    pub fn wahl_factor(&self) -> f64 {
        let c = self.spring_index();
        (4.0 * c - 1.0) / (4.0 * c - 4.0) + 0.615 / c
    }

    /// L_solid = d (n_a + 2)
    pub fn solid_length(&self) -> Length {
        self.wire_diameter * (self.active_coils + END_COILS)
    }

    /// Free length minus solid length.
    ///
    /// Negative or zero for an infeasible design; check [`Spring::is_feasible`]
    /// before treating this as a usable travel.
    pub fn max_displacement(&self) -> Length {
        self.free_length - self.solid_length()
    }

    /// p = L_free / n_a
    pub fn coil_pitch(&self) -> Length {
        self.free_length / self.active_coils
    }

    /// Helix angle relative to a plane perpendicular to the spring axis
    pub fn rise_angle(&self) -> Angle {
        Angle::new(self.coil_pitch().value().atan2(PI * self.mean_diameter.value()))
    }

    /// Wire consumed by the active helix plus two flat end coils:
    /// π D (n_a / cos α + 2)
    pub fn wire_length(&self) -> Length {
        let turns = self.active_coils / self.rise_angle().value().cos() + END_COILS;
        self.mean_diameter * (PI * turns)
    }

    /// Mass of the wire, when the material density is known
    pub fn wire_mass(&self) -> Option<Mass> {
        self.material.density().map(|rho| {
            let d = self.wire_diameter.value();
            let area = PI * d * d / 4.0;
            Mass::new(rho.value() * area * self.wire_length().value())
        })
    }

    // ------------------------------------------------------------------------
    // Stiffness, force and stress
    // ------------------------------------------------------------------------

    /// k = G d^4 / (8 n_a D^3)
    pub fn spring_constant(&self) -> Stiffness {
        let g = self.material.shear_modulus().value();
        let d = self.wire_diameter.value();
        let mean = self.mean_diameter.value();
        Stiffness::new(g * d.powi(4) / (8.0 * self.active_coils * mean.powi(3)))
    }

    /// Force needed to compress the spring by `deflection`
    pub fn force_at(&self, deflection: Length) -> Force {
        self.spring_constant() * deflection
    }

    /// Corrected shear stress τ = 8 F D W / (π d^3) under axial load `force`
    pub fn shear_stress_at(&self, force: Force) -> Stress {
        let d = self.wire_diameter.value();
        let mean = self.mean_diameter.value();
        Stress::new(8.0 * force.value() * mean * self.wahl_factor() / (PI * d.powi(3)))
    }

    /// Force at solid: k (L_free - L_solid)
    pub fn max_force(&self) -> Force {
        self.force_at(self.max_displacement())
    }

    /// Shear stress at solid
    pub fn max_shear_stress(&self) -> Stress {
        self.shear_stress_at(self.max_force())
    }

    // ------------------------------------------------------------------------
    // Advisory checks
    // ------------------------------------------------------------------------

    /// True when the free length exceeds the solid length
    pub fn is_feasible(&self) -> bool {
        self.max_displacement().value() > 0.0
    }

    /// Hard-failure form of [`Spring::is_feasible`]
    pub fn check_feasible(&self) -> SpringResult<()> {
        if self.is_feasible() {
            Ok(())
        } else {
            Err(SpringError::infeasible_design(
                self.free_length.value(),
                self.solid_length().value(),
            ))
        }
    }

    /// Classify the spring index against an advisory band
    pub fn index_rating(&self, band: &IndexBand) -> IndexRating {
        band.rate(self.spring_index())
    }

    /// Max shear stress over the material's allowable, when one is known
    pub fn stress_utilization(&self) -> Option<f64> {
        self.material
            .allowable_shear()
            .map(|allowable| self.max_shear_stress() / allowable)
    }
}

fn check_positive(field: &str, value: f64) -> SpringResult<()> {
    if !value.is_finite() {
        return Err(SpringError::invalid_geometry(
            field,
            value.to_string(),
            "Value must be finite",
        ));
    }
    if value <= 0.0 {
        return Err(SpringError::invalid_geometry(
            field,
            value.to_string(),
            "Value must be positive",
        ));
    }
    Ok(())
}
