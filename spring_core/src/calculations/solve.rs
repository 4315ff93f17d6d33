//! # Inverse Design
//!
//! Recovers the wire diameter that gives a target spring rate. The rate
//! equation `k = G d^4 / (8 n_a D^3)` is a monotonic quartic in `d`, so the
//! single positive root is taken directly:
//!
//! ```text
//! d = (8 n_a D^3 k / G)^(1/4)
//! ```

use tracing::debug;

use crate::errors::{SpringError, SpringResult};
use crate::materials::Material;
use crate::units::{Length, Stiffness};

/// Wire diameter giving `target_rate` for mean diameter `mean_diameter`,
/// `active_coils` active coils and the material's shear modulus.
///
/// # Errors
///
/// `DomainError` when the target rate, mean diameter, coil count or shear
/// modulus is zero, negative or non-finite.
///
/// # Example
///
/// ```rust
/// use spring_core::calculations::solve_diameter;
/// use spring_core::materials::Material;
/// use spring_core::units::{Length, Stiffness, INCH, LBF_PER_IN};
///
/// let steel = Material::from_name("steel").unwrap();
/// let d = solve_diameter(
///     Length::from_unit(0.465, INCH),
///     8.0,
///     Stiffness::from_unit(2.6, LBF_PER_IN),
///     &steel,
/// )
/// .unwrap();
/// assert!((d.to_unit(INCH) - 0.035).abs() < 0.0005);
/// ```
pub fn solve_diameter(
    mean_diameter: Length,
    active_coils: f64,
    target_rate: Stiffness,
    material: &Material,
) -> SpringResult<Length> {
    let g = material.shear_modulus().value();
    check_domain("target_rate", target_rate.value())?;
    check_domain("mean_diameter", mean_diameter.value())?;
    check_domain("active_coils", active_coils)?;
    check_domain("shear_modulus", g)?;

    let mean = mean_diameter.value();
    let d = (8.0 * active_coils * mean.powi(3) * target_rate.value() / g).powf(0.25);

    debug!(
        mean_diameter_m = mean,
        active_coils,
        target_rate_n_per_m = target_rate.value(),
        wire_diameter_m = d,
        "solved wire diameter"
    );

    Ok(Length::new(d))
}

fn check_domain(field: &str, value: f64) -> SpringResult<()> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(SpringError::domain_error(
            field,
            value.to_string(),
            "must be positive and finite for a real wire diameter to exist",
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calculations::Spring;
    use crate::materials::MaterialPreset;
    use crate::units::{Stress, INCH, KSI, LBF_PER_IN, POUND_FORCE, PSI};
    use approx::assert_relative_eq;
    use std::sync::Arc;

    fn steel() -> Material {
        Material::preset(MaterialPreset::MusicWire)
    }

    #[test]
    fn test_recovers_reference_wire() {
        let d = solve_diameter(
            Length::from_unit(0.465, INCH),
            8.0,
            Stiffness::from_unit(2.6, LBF_PER_IN),
            &steel(),
        )
        .unwrap();
        assert_relative_eq!(d.to_unit(INCH), 0.035, max_relative = 1e-3);
    }

    #[test]
    fn test_round_trip_rate() {
        let material = Arc::new(steel());
        let cases = [(0.465, 8.0, 2.6), (0.420, 32.0, 2.0), (1.25, 5.5, 40.0)];
        for (mean_in, coils, rate) in cases {
            let mean = Length::from_unit(mean_in, INCH);
            let k = Stiffness::from_unit(rate, LBF_PER_IN);
            let d = solve_diameter(mean, coils, k, &material).unwrap();
            let free = Length::from_unit(10.0, INCH);
            let spring = Spring::new(mean, d, free, coils, Arc::clone(&material)).unwrap();
            assert_relative_eq!(spring.spring_constant().value(), k.value(), max_relative = 1e-9);
        }
    }

    #[test]
    fn test_long_spring_design() {
        // 0.420" mean diameter, 32 active coils, 4" free length, 2 lbf/in
        let spring = Spring::for_rate(
            Length::from_unit(0.420, INCH),
            32.0,
            Length::from_unit(4.0, INCH),
            Stiffness::from_unit(2.0, LBF_PER_IN),
            Arc::new(steel()),
        )
        .unwrap();
        assert_relative_eq!(spring.wire_diameter().to_unit(INCH), 0.0429, max_relative = 2e-3);
        assert_relative_eq!(spring.spring_index(), 9.78, max_relative = 1e-3);
        assert_relative_eq!(spring.max_force().to_unit(POUND_FORCE), 5.08, max_relative = 1e-3);
        assert_relative_eq!(spring.max_shear_stress().to_unit(KSI), 78.8, max_relative = 1e-3);
    }

    #[test]
    fn test_zero_rate_is_domain_error() {
        let mean = Length::from_unit(0.465, INCH);
        let err = solve_diameter(mean, 8.0, Stiffness::new(0.0), &steel()).unwrap_err();
        assert!(matches!(
            err,
            SpringError::DomainError { ref field, .. } if field == "target_rate"
        ));
    }

    #[test]
    fn test_negative_coils_is_domain_error() {
        let err = solve_diameter(
            Length::from_unit(0.465, INCH),
            -8.0,
            Stiffness::from_unit(2.6, LBF_PER_IN),
            &steel(),
        )
        .unwrap_err();
        assert_eq!(err.error_code(), "DOMAIN_ERROR");
    }

    #[test]
    fn test_other_domain_errors() {
        let k = Stiffness::from_unit(2.6, LBF_PER_IN);
        assert!(solve_diameter(Length::new(0.0), 8.0, k, &steel()).is_err());
        assert!(solve_diameter(Length::new(-0.01), 8.0, k, &steel()).is_err());
        assert!(solve_diameter(Length::new(0.01), 8.0, Stiffness::new(-5.0), &steel()).is_err());
        assert!(solve_diameter(Length::new(0.01), f64::INFINITY, k, &steel()).is_err());
    }

    #[test]
    fn test_softer_material_needs_thicker_wire() {
        let mean = Length::from_unit(0.5, INCH);
        let k = Stiffness::from_unit(5.0, LBF_PER_IN);
        let soft = Material::from_shear_modulus("soft", Stress::from_unit(6.0e6, PSI)).unwrap();
        let d_soft = solve_diameter(mean, 10.0, k, &soft).unwrap();
        let d_steel = solve_diameter(mean, 10.0, k, &steel()).unwrap();
        assert!(d_soft > d_steel);
    }
}
