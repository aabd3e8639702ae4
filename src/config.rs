use serde::{ Deserialize, Serialize };

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use crate::error::PlateError;

/// Thresholds for the single glyph admissibility test.
/// All bounds are exclusive.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GlyphFilterConfig {
    pub min_area: u32,
    pub min_width: u32,
    pub min_height: u32,
    pub min_aspect: f64,
    pub max_aspect: f64,
}

impl Default for GlyphFilterConfig {
    fn default() -> Self {
        Self {
            min_area: 300,
            min_width: 12,
            min_height: 18,
            min_aspect: 0.6,
            max_aspect: 1.0,
        }
    }
}

/// Limits used when comparing a glyph against an anchor glyph.
/// Changes are relative to the anchor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MatchConfig {
    /// max center distance, in multiples of the anchor diagonal
    pub max_diag_multiple: f64,
    /// degrees
    pub max_angle: f64,
    pub max_area_change: f64,
    pub max_width_change: f64,
    pub max_height_change: f64,
}

impl Default for MatchConfig {
    fn default() -> Self {
        Self {
            max_diag_multiple: 5.0,
            max_angle: 12.0,
            max_area_change: 0.5,
            max_width_change: 0.8,
            max_height_change: 0.2,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClusterConfig {
    pub min_group_size: usize,
}

impl Default for ClusterConfig {
    fn default() -> Self {
        Self { min_group_size: 5 }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlateConfig {
    pub width_padding: f64,
    pub height_padding: f64,
}

impl Default for PlateConfig {
    fn default() -> Self {
        Self { width_padding: 1.3, height_padding: 1.5 }
    }
}

/// Settings of the built-in blob extraction pipeline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PreprocessConfig {
    /// gaussian sigma, 1.1 is what a 5x5 kernel gets by default
    pub blur_sigma: f32,
    pub threshold: u8,
    /// images wider than this are scaled down first
    pub max_width: Option<u32>,
}

impl Default for PreprocessConfig {
    fn default() -> Self {
        Self { blur_sigma: 1.1, threshold: 127, max_width: Some(1280) }
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct DetectorConfig {
    pub filter: GlyphFilterConfig,
    pub matching: MatchConfig,
    pub cluster: ClusterConfig,
    pub plate: PlateConfig,
    pub preprocess: PreprocessConfig,
}

impl DetectorConfig {

    /// Load a json config. Missing fields keep their defaults.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, PlateError> {
        let file = File::open(path)?;
        let config = serde_json::from_reader(BufReader::new(file))?;
        Ok(config)
    }

    pub fn from_json_str(s: &str) -> Result<Self, PlateError> {
        Ok(serde_json::from_str(s)?)
    }
}
