//! Engine configuration. Values arrive from TOML or are built in code; both
//! paths go through `sanitized()` before use.

use std::error::Error;
use std::fmt;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::geokey::GeoKey;

pub const DEFAULT_JITTER_DEGREES: f64 = 0.005;
pub const DEFAULT_MAX_BLOCK_POINTS: usize = 10_000;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AtlasConfig {
    pub region: RegionFilter,
    /// Half-width of the symmetric jitter interval, in degrees, applied to
    /// block point placement around the tract centroid.
    pub jitter_degrees: f64,
    /// Cap on the block point list; the largest blocks by total count win.
    pub max_block_points: usize,
}

impl Default for AtlasConfig {
    fn default() -> Self {
        Self {
            region: RegionFilter::default(),
            jitter_degrees: DEFAULT_JITTER_DEGREES,
            max_block_points: DEFAULT_MAX_BLOCK_POINTS,
        }
    }
}

impl AtlasConfig {
    pub fn sanitized(mut self) -> Self {
        self.region = self.region.sanitized();
        if !self.jitter_degrees.is_finite() {
            self.jitter_degrees = DEFAULT_JITTER_DEGREES;
        }
        self.jitter_degrees = self.jitter_degrees.abs();
        self
    }

    pub fn from_toml_file(path: &Path) -> Result<AtlasConfig, ConfigError> {
        let content = fs::read_to_string(path).map_err(|err| ConfigError::ReadFile {
            path: path.display().to_string(),
            message: err.to_string(),
        })?;
        let config: AtlasConfig = toml::from_str(&content).map_err(|err| ConfigError::Parse {
            path: path.display().to_string(),
            message: err.to_string(),
        })?;
        Ok(config.sanitized())
    }
}

/// Region of interest. Blocks outside the configured state/county are dropped
/// before aggregation; an empty component disables that component's filter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RegionFilter {
    pub state: String,
    pub county: String,
}

impl Default for RegionFilter {
    fn default() -> Self {
        // LA County.
        Self {
            state: "06".to_string(),
            county: "037".to_string(),
        }
    }
}

impl RegionFilter {
    pub fn sanitized(mut self) -> Self {
        if !self.state.is_empty() {
            self.state = format!("{:0>2}", self.state.trim());
        }
        if !self.county.is_empty() {
            self.county = format!("{:0>3}", self.county.trim());
        }
        self
    }

    pub fn matches(&self, key: &GeoKey) -> bool {
        (self.state.is_empty() || key.state() == self.state)
            && (self.county.is_empty() || key.county() == self.county)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    ReadFile { path: String, message: String },
    Parse { path: String, message: String },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::ReadFile { path, message } => {
                write!(f, "read config file failed ({path}): {message}")
            }
            ConfigError::Parse { path, message } => {
                write!(f, "parse config file failed ({path}): {message}")
            }
        }
    }
}

impl Error for ConfigError {}
