//! # Unit Types
//!
//! Physical quantities stored as plain `f64` values in one fixed base unit
//! per dimension (SI: meters, newtons, pascals, radians, kilograms). The
//! governing equations only ever see base-unit values; conversion to and
//! from inches, pounds-force, ksi or degrees happens at the boundary by
//! multiplying or dividing by the named scale constants below.
//!
//! ## Example
//!
//! ```rust
//! use spring_core::units::{Length, INCH, MILLIMETER};
//!
//! let wire = Length::from_unit(0.035, INCH);
//! assert!((wire.to_unit(MILLIMETER) - 0.889).abs() < 1e-12);
//! ```

use std::fmt;
use std::ops::{Add, Div, Mul, Sub};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::errors::{SpringError, SpringResult};

// ============================================================================
// Scale Factors (value of one named unit expressed in base units)
// ============================================================================

/// Meter (base length)
pub const METER: f64 = 1.0;
/// Millimeter
pub const MILLIMETER: f64 = 0.001;
/// International inch
pub const INCH: f64 = 0.0254;
/// International foot
pub const FOOT: f64 = 12.0 * INCH;

/// Newton (base force)
pub const NEWTON: f64 = 1.0;
/// Pound-force
pub const POUND_FORCE: f64 = 4.448_221_615_260_5;

/// Pascal (base stress)
pub const PASCAL: f64 = 1.0;
/// Pounds-force per square inch
pub const PSI: f64 = POUND_FORCE / (INCH * INCH);
/// Kips (1000 lbf) per square inch
pub const KSI: f64 = 1000.0 * PSI;
/// Megapascal
pub const MEGAPASCAL: f64 = 1.0e6;
/// Gigapascal
pub const GIGAPASCAL: f64 = 1.0e9;

/// Radian (base angle)
pub const RADIAN: f64 = 1.0;
/// Degree
pub const DEGREE: f64 = std::f64::consts::PI / 180.0;

/// Kilogram (base mass)
pub const KILOGRAM: f64 = 1.0;
/// Avoirdupois pound (mass)
pub const POUND_MASS: f64 = 0.453_592_37;

/// Kilograms per cubic meter (base density)
pub const KG_PER_M3: f64 = 1.0;
/// Pounds (mass) per cubic inch
pub const LB_PER_IN3: f64 = POUND_MASS / (INCH * INCH * INCH);

/// Newtons per meter (base spring rate)
pub const N_PER_M: f64 = 1.0;
/// Pounds-force per inch
pub const LBF_PER_IN: f64 = POUND_FORCE / INCH;

// ============================================================================
// Base-Unit Newtypes
// ============================================================================

/// Length in meters
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Length(pub f64);

/// Force in newtons
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Force(pub f64);

/// Stress or modulus in pascals
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Stress(pub f64);

/// Angle in radians
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Angle(pub f64);

/// Spring rate in newtons per meter
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Stiffness(pub f64);

/// Density in kilograms per cubic meter
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Density(pub f64);

/// Mass in kilograms
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Mass(pub f64);

macro_rules! impl_quantity {
    ($type:ty) => {
        impl Add for $type {
            type Output = Self;
            fn add(self, rhs: Self) -> Self::Output {
                Self(self.0 + rhs.0)
            }
        }

        impl Sub for $type {
            type Output = Self;
            fn sub(self, rhs: Self) -> Self::Output {
                Self(self.0 - rhs.0)
            }
        }

        impl Mul<f64> for $type {
            type Output = Self;
            fn mul(self, rhs: f64) -> Self::Output {
                Self(self.0 * rhs)
            }
        }

        impl Div<f64> for $type {
            type Output = Self;
            fn div(self, rhs: f64) -> Self::Output {
                Self(self.0 / rhs)
            }
        }

        /// Ratio of two quantities of the same dimension
        impl Div for $type {
            type Output = f64;
            fn div(self, rhs: Self) -> Self::Output {
                self.0 / rhs.0
            }
        }

        impl $type {
            /// Get the raw base-unit value
            pub fn value(self) -> f64 {
                self.0
            }

            /// Create from a raw base-unit value
            pub fn new(value: f64) -> Self {
                Self(value)
            }

            /// Create from a magnitude expressed in a named unit (e.g. `INCH`)
            pub fn from_unit(magnitude: f64, scale: f64) -> Self {
                Self(magnitude * scale)
            }

            /// Express this quantity as a magnitude in a named unit
            pub fn to_unit(self, scale: f64) -> f64 {
                self.0 / scale
            }
        }
    };
}

impl_quantity!(Length);
impl_quantity!(Force);
impl_quantity!(Stress);
impl_quantity!(Angle);
impl_quantity!(Stiffness);
impl_quantity!(Density);
impl_quantity!(Mass);

// Cross-dimension products used by the spring equations

impl Mul<Length> for Stiffness {
    type Output = Force;
    fn mul(self, rhs: Length) -> Force {
        Force(self.0 * rhs.0)
    }
}

impl Div<Length> for Force {
    type Output = Stiffness;
    fn div(self, rhs: Length) -> Stiffness {
        Stiffness(self.0 / rhs.0)
    }
}

impl Div<Stiffness> for Force {
    type Output = Length;
    fn div(self, rhs: Stiffness) -> Length {
        Length(self.0 / rhs.0)
    }
}

impl Angle {
    /// Create from degrees
    pub fn from_degrees(degrees: f64) -> Self {
        Angle::from_unit(degrees, DEGREE)
    }

    /// Express in degrees
    pub fn to_degrees(self) -> f64 {
        self.to_unit(DEGREE)
    }
}

// ============================================================================
// Dimension-Tagged Quantity
// ============================================================================

/// Physical dimension of a reported value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Dimension {
    Length,
    Force,
    Stress,
    Angle,
    Stiffness,
    Density,
    Mass,
    /// Dimensionless (spring index, coil count, factors)
    Ratio,
}

/// A base-unit value tagged with its dimension.
///
/// This is what the calculation core hands to presentation layers: they pick
/// a display unit for the dimension and divide by its scale.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "dimension", content = "value")]
pub enum Quantity {
    Length(Length),
    Force(Force),
    Stress(Stress),
    Angle(Angle),
    Stiffness(Stiffness),
    Density(Density),
    Mass(Mass),
    Ratio(f64),
}

impl Quantity {
    /// Get the dimension tag
    pub fn dimension(&self) -> Dimension {
        match self {
            Quantity::Length(_) => Dimension::Length,
            Quantity::Force(_) => Dimension::Force,
            Quantity::Stress(_) => Dimension::Stress,
            Quantity::Angle(_) => Dimension::Angle,
            Quantity::Stiffness(_) => Dimension::Stiffness,
            Quantity::Density(_) => Dimension::Density,
            Quantity::Mass(_) => Dimension::Mass,
            Quantity::Ratio(_) => Dimension::Ratio,
        }
    }

    /// Get the raw base-unit value
    pub fn base_value(&self) -> f64 {
        match *self {
            Quantity::Length(q) => q.value(),
            Quantity::Force(q) => q.value(),
            Quantity::Stress(q) => q.value(),
            Quantity::Angle(q) => q.value(),
            Quantity::Stiffness(q) => q.value(),
            Quantity::Density(q) => q.value(),
            Quantity::Mass(q) => q.value(),
            Quantity::Ratio(r) => r,
        }
    }

    /// Express as a magnitude in the given named unit
    pub fn to_unit(&self, scale: f64) -> f64 {
        self.base_value() / scale
    }

    /// Express in the display unit a unit system uses for this dimension
    pub fn in_system(&self, system: UnitSystem) -> f64 {
        self.to_unit(system.display_unit(self.dimension()).scale)
    }
}

macro_rules! impl_into_quantity {
    ($type:ident) => {
        impl From<$type> for Quantity {
            fn from(q: $type) -> Self {
                Quantity::$type(q)
            }
        }
    };
}

impl_into_quantity!(Length);
impl_into_quantity!(Force);
impl_into_quantity!(Stress);
impl_into_quantity!(Angle);
impl_into_quantity!(Stiffness);
impl_into_quantity!(Density);
impl_into_quantity!(Mass);

impl From<f64> for Quantity {
    fn from(r: f64) -> Self {
        Quantity::Ratio(r)
    }
}

// ============================================================================
// Unit Systems
// ============================================================================

/// A named unit with its scale in base units
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DisplayUnit {
    pub symbol: &'static str,
    pub scale: f64,
}

impl DisplayUnit {
    pub const fn new(symbol: &'static str, scale: f64) -> Self {
        DisplayUnit { symbol, scale }
    }
}

/// Named group of units used for display and for design-file inputs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum UnitSystem {
    /// Inches, pounds-force, ksi, degrees
    #[default]
    #[serde(rename = "En", alias = "en", alias = "EN", alias = "English")]
    English,
    /// Meters, newtons, pascals, degrees
    #[serde(rename = "SI", alias = "si", alias = "Si", alias = "Metric")]
    Si,
}

impl UnitSystem {
    /// Parse from common string representations
    pub fn from_str_flexible(s: &str) -> SpringResult<Self> {
        match s.trim().to_lowercase().as_str() {
            "en" | "english" | "imperial" | "us" => Ok(UnitSystem::English),
            "si" | "metric" => Ok(UnitSystem::Si),
            _ => Err(SpringError::unknown_unit_system(s)),
        }
    }

    /// Short code as used on the command line ("En" / "SI")
    pub fn code(&self) -> &'static str {
        match self {
            UnitSystem::English => "En",
            UnitSystem::Si => "SI",
        }
    }

    /// Unit used when reporting values of the given dimension
    pub fn display_unit(&self, dimension: Dimension) -> DisplayUnit {
        match (self, dimension) {
            (UnitSystem::English, Dimension::Length) => DisplayUnit::new("in", INCH),
            (UnitSystem::English, Dimension::Force) => DisplayUnit::new("lbf", POUND_FORCE),
            (UnitSystem::English, Dimension::Stress) => DisplayUnit::new("ksi", KSI),
            (UnitSystem::English, Dimension::Stiffness) => DisplayUnit::new("lbf/in", LBF_PER_IN),
            (UnitSystem::English, Dimension::Density) => DisplayUnit::new("lb/in^3", LB_PER_IN3),
            (UnitSystem::English, Dimension::Mass) => DisplayUnit::new("lb", POUND_MASS),
            (UnitSystem::Si, Dimension::Length) => DisplayUnit::new("m", METER),
            (UnitSystem::Si, Dimension::Force) => DisplayUnit::new("N", NEWTON),
            (UnitSystem::Si, Dimension::Stress) => DisplayUnit::new("Pa", PASCAL),
            (UnitSystem::Si, Dimension::Stiffness) => DisplayUnit::new("N/m", N_PER_M),
            (UnitSystem::Si, Dimension::Density) => DisplayUnit::new("kg/m^3", KG_PER_M3),
            (UnitSystem::Si, Dimension::Mass) => DisplayUnit::new("kg", KILOGRAM),
            (_, Dimension::Angle) => DisplayUnit::new("deg", DEGREE),
            (_, Dimension::Ratio) => DisplayUnit::new("", 1.0),
        }
    }

    /// Unit in which design-file inputs of the given dimension are expressed.
    ///
    /// Same as the display unit except English stresses and moduli, which are
    /// entered in psi (e.g. `29e6` for steel).
    pub fn input_unit(&self, dimension: Dimension) -> DisplayUnit {
        match (self, dimension) {
            (UnitSystem::English, Dimension::Stress) => DisplayUnit::new("psi", PSI),
            _ => self.display_unit(dimension),
        }
    }
}

impl FromStr for UnitSystem {
    type Err = SpringError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        UnitSystem::from_str_flexible(s)
    }
}

impl fmt::Display for UnitSystem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}
