//! # spring_core - Helical Compression Spring Calculator
//!
//! `spring_core` computes the mechanical properties of round-wire helical
//! compression springs from geometry and material, and solves the inverse
//! problem of finding the wire diameter for a target spring rate.
//!
//! ## Design Philosophy
//!
//! - **Stateless**: materials and springs are immutable values; every
//!   property is a closed-form function of them
//! - **One unit system inside**: all values are held in SI base units; named
//!   scale constants convert at the boundary
//! - **Structured output**: results are returned as data ([`SpringProperties`]),
//!   never as formatted text
//! - **Rich Errors**: structured, serializable error types
//!
//! ## Quick Start
//!
//! ```rust
//! use std::sync::Arc;
//! use spring_core::{IndexBand, Material, Spring};
//! use spring_core::units::{Length, Stiffness, INCH, KSI, LBF_PER_IN};
//!
//! let steel = Arc::new(Material::from_name("steel").unwrap());
//!
//! // Forward: properties of a known spring
//! let spring = Spring::new(
//!     Length::from_unit(0.465, INCH),
//!     Length::from_unit(0.035, INCH),
//!     Length::from_unit(1.0, INCH),
//!     8.0,
//!     Arc::clone(&steel),
//! )
//! .unwrap();
//! let props = spring.properties(&IndexBand::default());
//! assert!((props.max_shear_stress.to_unit(KSI) - 51.7).abs() < 0.1);
//!
//! // Inverse: wire diameter for a target rate
//! let d = Spring::solve_diameter(
//!     Length::from_unit(0.465, INCH),
//!     8.0,
//!     Stiffness::from_unit(2.6, LBF_PER_IN),
//!     &steel,
//! )
//! .unwrap();
//! assert!((d.to_unit(INCH) - 0.035).abs() < 0.0005);
//! ```
//!
//! ## Modules
//!
//! - [`units`] - Base-unit quantity types, scale constants, unit systems
//! - [`materials`] - Material constants and presets
//! - [`calculations`] - Spring model, inverse solve, property sets
//! - [`design`] - JSON design-file schema
//! - [`settings`] - Display and advisory settings
//! - [`errors`] - Structured error types

pub mod calculations;
pub mod design;
pub mod errors;
pub mod materials;
pub mod settings;
pub mod units;

// Re-export commonly used types at crate root for convenience
pub use calculations::{solve_diameter, Advisory, PropertyName, Spring, SpringProperties};
pub use design::SpringDesign;
pub use errors::{SpringError, SpringResult};
pub use materials::{Material, MaterialPreset, MaterialSpec};
pub use settings::{DesignSettings, IndexBand, IndexRating};
pub use units::{Quantity, UnitSystem};
