//! # Design Settings
//!
//! Display preferences and advisory thresholds shared by every spring in a
//! session. Settings are plain serde data; the CLI reads them from an
//! optional JSON file and falls back to [`DesignSettings::default`].
//!
//! ```json
//! {
//!   "units": "En",
//!   "index_band": {
//!     "acceptable_min": 5.0,
//!     "acceptable_max": 15.0,
//!     "ideal_min": 6.0,
//!     "ideal_max": 12.0
//!   }
//! }
//! ```

use serde::{Deserialize, Serialize};

use crate::errors::{SpringError, SpringResult};
use crate::units::UnitSystem;

/// Session-wide settings.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct DesignSettings {
    /// Unit system used for reports
    pub units: UnitSystem,

    /// Spring index advisory band
    pub index_band: IndexBand,
}

impl DesignSettings {
    /// Parse and validate settings from JSON. Missing fields take defaults.
    pub fn from_json(json: &str) -> SpringResult<Self> {
        let settings: DesignSettings = serde_json::from_str(json)?;
        settings.index_band.validate()?;
        Ok(settings)
    }
}

/// Manufacturability band for the spring index C = D/d.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct IndexBand {
    pub acceptable_min: f64,
    pub acceptable_max: f64,
    pub ideal_min: f64,
    pub ideal_max: f64,
}

impl Default for IndexBand {
    fn default() -> Self {
        IndexBand {
            acceptable_min: 5.0,
            acceptable_max: 15.0,
            ideal_min: 6.0,
            ideal_max: 12.0,
        }
    }
}

impl IndexBand {
    /// Check that the ideal band sits inside the acceptable band.
    pub fn validate(&self) -> SpringResult<()> {
        let ordered = self.acceptable_min > 1.0
            && self.acceptable_min <= self.ideal_min
            && self.ideal_min <= self.ideal_max
            && self.ideal_max <= self.acceptable_max;
        if ordered {
            Ok(())
        } else {
            Err(SpringError::InvalidSettings {
                reason: format!(
                    "index band must satisfy 1 < acceptable_min <= ideal_min \
                     <= ideal_max <= acceptable_max, got {:?}",
                    self
                ),
            })
        }
    }

    /// Classify a spring index
    pub fn rate(&self, spring_index: f64) -> IndexRating {
        if spring_index >= self.ideal_min && spring_index <= self.ideal_max {
            IndexRating::Ideal
        } else if spring_index >= self.acceptable_min && spring_index <= self.acceptable_max {
            IndexRating::Acceptable
        } else {
            IndexRating::OutOfRange
        }
    }
}

/// Advisory classification of the spring index
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum IndexRating {
    Ideal,
    Acceptable,
    OutOfRange,
}

impl IndexRating {
    pub fn display_name(&self) -> &'static str {
        match self {
            IndexRating::Ideal => "ideal",
            IndexRating::Acceptable => "acceptable",
            IndexRating::OutOfRange => "out of range",
        }
    }
}

impl std::fmt::Display for IndexRating {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}
