//! # Spring Calculations
//!
//! The calculation core. Everything here is a pure function of the spring
//! geometry and its material:
//!
//! - [`spring`] - `Spring` value object and its closed-form derivations
//! - [`solve`] - inverse design (wire diameter from a target rate)
//! - [`properties`] - structured property snapshot for presentation layers

pub mod properties;
pub mod solve;
pub mod spring;

pub use properties::{Advisory, PropertyName, SpringProperties};
pub use solve::solve_diameter;
pub use spring::{Spring, END_COILS};
