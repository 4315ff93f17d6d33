//! # Springcalc CLI
//!
//! Command-line front end for the spring calculator. Analyzes a spring with a
//! known wire diameter, solves the wire diameter for a target rate, or runs a
//! JSON design file, and prints a fixed-order property report.
//!
//! ```text
//! springcalc analyze --mean-diameter 0.465 --wire-diameter 0.035 --free-length 1 --coils 8
//! springcalc solve --mean-diameter 0.42 --coils 32 --rate 2 --free-length 4
//! springcalc --units si --json design latch.json
//! ```
//!
//! Logging goes to stderr. `RUST_LOG` overrides the default `warn` level;
//! `-v` raises it to `debug`.

mod report;

use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{ArgAction, Parser, Subcommand};
use serde::Serialize;
use spring_core::units::{Dimension, Length, Stiffness};
use spring_core::{
    solve_diameter, DesignSettings, MaterialSpec, SpringDesign, SpringError, UnitSystem,
};
use thiserror::Error;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use report::JsonReport;

/// Helical compression spring calculator
#[derive(Parser, Debug)]
#[command(name = "springcalc")]
#[command(version, about = "Helical compression spring calculator", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Display unit system (en or si); defaults to the settings file, then En
    #[arg(short, long, global = true)]
    units: Option<UnitSystem>,

    /// Print JSON instead of the text report
    #[arg(long, global = true)]
    json: bool,

    /// JSON settings file (display units, spring index band)
    #[arg(long, global = true)]
    settings: Option<PathBuf>,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    verbose: u8,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Report every property of a spring with a known wire diameter
    Analyze {
        #[command(flatten)]
        geometry: Geometry,

        /// Wire diameter
        #[arg(short = 'd', long)]
        wire_diameter: f64,

        /// Free (uncompressed) length
        #[arg(short = 'L', long)]
        free_length: f64,
    },

    /// Solve the wire diameter for a target spring rate
    Solve {
        #[command(flatten)]
        geometry: Geometry,

        /// Target spring rate (lbf/in or N/m)
        #[arg(short = 'k', long)]
        rate: f64,

        /// Free length; when given, the full report is printed
        #[arg(short = 'L', long)]
        free_length: Option<f64>,
    },

    /// Run a JSON design file
    Design {
        /// Path to the design file
        path: PathBuf,
    },
}

/// Inputs shared by `analyze` and `solve`
#[derive(clap::Args, Debug)]
struct Geometry {
    /// Mean coil diameter
    #[arg(short = 'D', long)]
    mean_diameter: f64,

    /// Number of active coils
    #[arg(short = 'n', long)]
    coils: f64,

    /// Material preset (steel, stainless)
    #[arg(short, long, default_value = "steel")]
    material: String,

    /// Unit system the inputs are given in
    #[arg(long, default_value = "En")]
    input_units: UnitSystem,

    /// Label printed in the report banner
    #[arg(short, long, default_value = "")]
    label: String,
}

#[derive(Debug, Error)]
enum CliError {
    #[error("Failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error(transparent)]
    Spring(#[from] SpringError),
}

impl CliError {
    fn error_code(&self) -> &'static str {
        match self {
            CliError::Io { .. } => "IO_ERROR",
            CliError::Spring(e) => e.error_code(),
        }
    }
}

#[derive(Serialize)]
struct JsonError {
    code: &'static str,
    message: String,
}

#[derive(Serialize)]
struct JsonWireDiameter<'a> {
    label: &'a str,
    units: UnitSystem,
    wire_diameter: Length,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match run(&cli) {
        Ok(output) => {
            print!("{}", output);
            ExitCode::SUCCESS
        }
        Err(e) => {
            if cli.json {
                let body = JsonError {
                    code: e.error_code(),
                    message: e.to_string(),
                };
                match serde_json::to_string_pretty(&body) {
                    Ok(json) => println!("{}", json),
                    Err(_) => eprintln!("Error: {}", e),
                }
            } else {
                eprintln!("Error: {}", e);
            }
            ExitCode::FAILURE
        }
    }
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    let filter = if verbose > 0 {
        EnvFilter::new(level)
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn run(cli: &Cli) -> Result<String, CliError> {
    let settings = match &cli.settings {
        Some(path) => DesignSettings::from_json(&read(path)?)?,
        None => DesignSettings::default(),
    };
    let units = cli.units.unwrap_or(settings.units);
    debug!(units = units.code(), "resolved display units");

    let design = match &cli.command {
        Command::Analyze {
            geometry,
            wire_diameter,
            free_length,
        } => geometry.design(Some(*wire_diameter), None, *free_length),
        Command::Solve {
            geometry,
            rate,
            free_length: Some(free_length),
        } => geometry.design(None, Some(*rate), *free_length),
        Command::Solve {
            geometry,
            rate,
            free_length: None,
        } => return solve_only(geometry, *rate, units, cli.json),
        Command::Design { path } => SpringDesign::from_json(&read(path)?)?,
    };

    let spring = design.build()?;
    info!(label = %design.label, "built spring");
    let props = spring.properties(&settings.index_band);

    if cli.json {
        let body = JsonReport {
            label: &design.label,
            units,
            properties: &props,
            advisories: props.advisories(),
        };
        Ok(to_json(&body)?)
    } else {
        Ok(report::render(&props, units, &settings.index_band, &design.label))
    }
}

/// Wire diameter alone, when no free length is given
fn solve_only(
    geometry: &Geometry,
    rate: f64,
    units: UnitSystem,
    json: bool,
) -> Result<String, CliError> {
    let input = geometry.input_units;
    let material = MaterialSpec::from_preset(&geometry.material).resolve(input)?;
    let wire_diameter = solve_diameter(
        Length::from_unit(geometry.mean_diameter, input.input_unit(Dimension::Length).scale),
        geometry.coils,
        Stiffness::from_unit(rate, input.input_unit(Dimension::Stiffness).scale),
        &material,
    )?;

    if json {
        let body = JsonWireDiameter {
            label: &geometry.label,
            units,
            wire_diameter,
        };
        Ok(to_json(&body)?)
    } else {
        Ok(report::render_wire_diameter(wire_diameter.into(), units, &geometry.label))
    }
}

fn to_json<T: Serialize>(body: &T) -> Result<String, SpringError> {
    Ok(format!("{}\n", serde_json::to_string_pretty(body)?))
}

impl Geometry {
    fn design(
        &self,
        wire_diameter: Option<f64>,
        target_rate: Option<f64>,
        free_length: f64,
    ) -> SpringDesign {
        SpringDesign {
            label: self.label.clone(),
            units: self.input_units,
            material: MaterialSpec::from_preset(&self.material),
            mean_diameter: self.mean_diameter,
            wire_diameter,
            target_rate,
            free_length,
            active_coils: self.coils,
        }
    }
}

fn read(path: &Path) -> Result<String, CliError> {
    fs::read_to_string(path).map_err(|source| CliError::Io {
        path: path.display().to_string(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use clap::CommandFactory;
    use spring_core::units::INCH;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("springcalc").chain(args.iter().copied())).unwrap()
    }

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_analyze() {
        let cli = parse(&[
            "--units", "si", "analyze", "-D", "0.465", "-d", "0.035", "-L", "1", "-n", "8",
        ]);
        assert_eq!(cli.units, Some(UnitSystem::Si));
        assert!(matches!(
            cli.command,
            Command::Analyze { wire_diameter, .. } if wire_diameter == 0.035
        ));
    }

    #[test]
    fn test_unknown_units_rejected() {
        let args = ["springcalc", "--units", "furlongs", "design", "x.json"];
        assert!(Cli::try_parse_from(args).is_err());
    }

    #[test]
    fn test_run_analyze_text() {
        let cli = parse(&[
            "analyze", "-D", "0.465", "-d", "0.035", "-L", "1", "-n", "8", "-l", "S-1",
        ]);
        let text = run(&cli).unwrap();
        assert!(text.contains("Spring: S-1"));
        assert!(text.contains("Spring constant      :2.60 lbf/in"));
    }

    #[test]
    fn test_run_solve_only() {
        let cli = parse(&["solve", "-D", "0.465", "-n", "8", "-k", "2.6"]);
        assert_eq!(run(&cli).unwrap(), "Recommended wire diameter: 0.035 in\n");
    }

    #[test]
    fn test_run_solve_only_prints_label() {
        let cli = parse(&["solve", "-D", "0.465", "-n", "8", "-k", "2.6", "-l", "S-1"]);
        let text = run(&cli).unwrap();
        assert!(text.contains("Spring: S-1\n"));
        assert!(text.ends_with("Recommended wire diameter: 0.035 in\n"));
    }

    #[test]
    fn test_run_solve_only_json() {
        let cli = parse(&["--json", "solve", "-D", "0.465", "-n", "8", "-k", "2.6", "-l", "S-1"]);
        let json: serde_json::Value = serde_json::from_str(&run(&cli).unwrap()).unwrap();
        assert_eq!(json["label"], "S-1");
        let wire_m = json["wire_diameter"].as_f64().unwrap();
        assert_relative_eq!(wire_m / INCH, 0.035, max_relative = 1e-3);
    }

    #[test]
    fn test_run_solve_json() {
        let cli = parse(&["--json", "solve", "-D", "0.42", "-n", "32", "-k", "2", "-L", "4"]);
        let json: serde_json::Value = serde_json::from_str(&run(&cli).unwrap()).unwrap();
        assert_eq!(json["units"], "En");
        assert_eq!(json["properties"]["index_rating"], "Ideal");
        assert!(json["advisories"].as_array().unwrap().is_empty());
        let wire_m = json["properties"]["wire_diameter"].as_f64().unwrap();
        assert_relative_eq!(wire_m / INCH, 0.0429, max_relative = 2e-3);
    }

    #[test]
    fn test_run_rejects_wire_thicker_than_coil() {
        let cli = parse(&["analyze", "-D", "0.035", "-d", "0.465", "-L", "1", "-n", "8"]);
        assert_eq!(run(&cli).unwrap_err().error_code(), "INVALID_GEOMETRY");
    }

    #[test]
    fn test_missing_design_file() {
        let cli = parse(&["design", "/nonexistent/spring.json"]);
        assert_eq!(run(&cli).unwrap_err().error_code(), "IO_ERROR");
    }
}
