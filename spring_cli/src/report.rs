//! Plain-text and JSON rendering of spring property sets.

use serde::Serialize;
use spring_core::units::{Dimension, Quantity, UnitSystem};
use spring_core::{Advisory, IndexBand, PropertyName, SpringProperties};

const RULE: &str = "-------------------------------------";
const LABEL_WIDTH: usize = 21;

/// JSON document emitted with `--json`
#[derive(Debug, Serialize)]
pub struct JsonReport<'a> {
    pub label: &'a str,
    pub units: UnitSystem,
    pub properties: &'a SpringProperties,
    pub advisories: Vec<Advisory>,
}

/// Render the fixed-order property report.
pub fn render(
    props: &SpringProperties,
    units: UnitSystem,
    band: &IndexBand,
    label: &str,
) -> String {
    let mut out = banner(label);
    out.push_str(&line("Material", props.material.clone()));

    for (name, quantity) in props.entries() {
        let value = format_quantity(name, &quantity, units);
        let text = match name {
            PropertyName::SpringIndex => format!("{} ({})", value, props.index_rating),
            PropertyName::CoilPitch => format!("{} per coil", value),
            _ => value,
        };
        out.push_str(&line(&label_for(name, band), text));
    }

    if let Some(utilization) = props.stress_utilization {
        let text = format!("{:.0}% of allowable", utilization * 100.0);
        out.push_str(&line("Stress utilization", text));
    }

    for advisory in props.advisories() {
        out.push_str(&format!("WARNING: {}\n", describe(&advisory, units, band)));
    }

    out
}

/// One-line answer for a bare wire-diameter solve, under the label banner
pub fn render_wire_diameter(wire_diameter: Quantity, units: UnitSystem, label: &str) -> String {
    let mut out = banner(label);
    out.push_str(&format!(
        "Recommended wire diameter: {}\n",
        format_quantity(PropertyName::WireDiameter, &wire_diameter, units)
    ));
    out
}

/// `Spring: <label>` between two rules; empty when there is no label
fn banner(label: &str) -> String {
    if label.is_empty() {
        String::new()
    } else {
        format!("{RULE}\nSpring: {label}\n{RULE}\n")
    }
}

fn line(label: &str, value: String) -> String {
    format!("{:<width$}:{}\n", label, value, width = LABEL_WIDTH)
}

fn label_for(name: PropertyName, band: &IndexBand) -> String {
    match name {
        PropertyName::SpringIndex => format!(
            "{} [{}-{}]",
            name.label(),
            band.acceptable_min,
            band.acceptable_max
        ),
        _ => name.label().to_string(),
    }
}

/// Value in the system's display unit, with the unit symbol appended
pub fn format_quantity(name: PropertyName, quantity: &Quantity, units: UnitSystem) -> String {
    let unit = units.display_unit(quantity.dimension());
    let value = quantity.to_unit(unit.scale);
    let digits = precision(name, quantity.dimension(), units);
    let number = format_number(value, digits);
    if unit.symbol.is_empty() {
        number
    } else {
        format!("{} {}", number, unit.symbol)
    }
}

fn precision(name: PropertyName, dimension: Dimension, units: UnitSystem) -> usize {
    match (name, dimension, units) {
        (PropertyName::WahlFactor, _, _) => 3,
        (_, Dimension::Ratio, _) => 1,
        (_, Dimension::Length, UnitSystem::English) => 3,
        (_, Dimension::Length, UnitSystem::Si) => 5,
        (_, Dimension::Mass, _) => 4,
        (_, Dimension::Stress, UnitSystem::English) => 1,
        _ => 2,
    }
}

/// Fixed-point for ordinary magnitudes, scientific for very large or small ones
fn format_number(value: f64, digits: usize) -> String {
    let magnitude = value.abs();
    if magnitude >= 1.0e5 || (magnitude > 0.0 && magnitude < 1.0e-3) {
        format!("{:.3e}", value)
    } else {
        format!("{:.*}", digits, value)
    }
}

/// Human-readable advisory text
pub fn describe(advisory: &Advisory, units: UnitSystem, band: &IndexBand) -> String {
    match *advisory {
        Advisory::Infeasible { max_displacement } => format!(
            "free length does not exceed solid length (max displacement {}); \
             the spring cannot be compressed",
            format_quantity(PropertyName::MaxDisplacement, &max_displacement.into(), units)
        ),
        Advisory::IndexOutOfRange { spring_index } => format!(
            "spring index {:.1} is outside the acceptable range {}-{}",
            spring_index, band.acceptable_min, band.acceptable_max
        ),
        Advisory::Overstressed { utilization } => format!(
            "max shear stress is {:.0}% of the material allowable",
            utilization * 100.0
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use spring_core::units::{Length, INCH};
    use spring_core::{Material, MaterialPreset, Spring};
    use std::sync::Arc;

    fn props(free_in: f64) -> SpringProperties {
        Spring::new(
            Length::from_unit(0.465, INCH),
            Length::from_unit(0.035, INCH),
            Length::from_unit(free_in, INCH),
            8.0,
            Arc::new(Material::preset(MaterialPreset::MusicWire)),
        )
        .unwrap()
        .properties(&IndexBand::default())
    }

    #[test]
    fn test_english_report() {
        let text = render(&props(1.0), UnitSystem::English, &IndexBand::default(), "S-1");
        assert!(text.starts_with(RULE));
        assert!(text.contains("Spring: S-1\n"));
        assert!(text.contains("Outer diameter       :0.500 in\n"));
        assert!(text.contains("Spring constant      :2.60 lbf/in\n"));
        assert!(text.contains("Spring index [5-15]  :13.3 (acceptable)\n"));
        assert!(text.contains("Max shear stress     :51.7 ksi\n"));
        assert!(text.contains("Coil pitch           :0.125 in per coil\n"));
        assert!(text.contains("Spring wire length   :14.651 in\n"));
        assert!(!text.contains("WARNING"));
    }

    #[test]
    fn test_order_follows_entries() {
        let text = render(&props(1.0), UnitSystem::English, &IndexBand::default(), "");
        let outer = text.find("Outer diameter").unwrap();
        let rate = text.find("Spring constant").unwrap();
        let wire = text.find("Spring wire length").unwrap();
        assert!(outer < rate && rate < wire);
        assert!(!text.contains("Spring:"));
    }

    #[test]
    fn test_si_report_uses_metric_units() {
        let text = render(&props(1.0), UnitSystem::Si, &IndexBand::default(), "");
        assert!(text.contains("Outer diameter       :0.01270 m\n"));
        assert!(text.contains(" N/m\n"));
        assert!(text.contains(" Pa\n"));
        assert!(text.contains(" deg\n"));
    }

    #[test]
    fn test_infeasible_warning() {
        let text = render(&props(0.3), UnitSystem::English, &IndexBand::default(), "short");
        let warning =
            "WARNING: free length does not exceed solid length (max displacement -0.050 in)";
        assert!(text.contains(warning));
    }

    #[test]
    fn test_format_number() {
        assert_eq!(format_number(2.6011, 2), "2.60");
        assert_eq!(format_number(3.5e8, 2), "3.500e8");
        assert_eq!(format_number(0.0, 3), "0.000");
    }

    #[test]
    fn test_wire_diameter_line() {
        let wire: Quantity = Length::from_unit(0.035, INCH).into();
        let text = render_wire_diameter(wire, UnitSystem::English, "");
        assert_eq!(text, "Recommended wire diameter: 0.035 in\n");

        let text = render_wire_diameter(wire, UnitSystem::English, "S-1");
        assert!(text.starts_with(RULE));
        assert!(text.contains("Spring: S-1\n"));
    }
}
