use crate::airfoil::extract::{ExtractOptions, DEFAULT_UNIT_THRESHOLD};
use crate::airfoil::generate::DEFAULT_POINT_COUNT;
use crate::airfoil::normalize::SurfaceSplit;
use crate::errors::{AirfoilError, Result};
use crate::pipeline::ConvertOptions;
use crate::serialize::SerializationFormat;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Settings loaded from a TOML file. Every field has a default, so an empty file is valid.
///
/// ```toml
/// format = "solidworks"
///
/// [generate]
/// point_count = 121
///
/// [convert]
/// split = "chord"
/// unit_threshold = 10.0
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Settings {
    pub format: SerializationFormat,
    pub generate: GenerateSettings,
    pub convert: ConvertSettings,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GenerateSettings {
    pub point_count: usize,
}

impl Default for GenerateSettings {
    fn default() -> Self {
        GenerateSettings {
            point_count: DEFAULT_POINT_COUNT,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ConvertSettings {
    pub split: SurfaceSplit,
    pub unit_threshold: f64,
}

impl Default for ConvertSettings {
    fn default() -> Self {
        ConvertSettings {
            split: SurfaceSplit::default(),
            unit_threshold: DEFAULT_UNIT_THRESHOLD,
        }
    }
}

impl Settings {
    pub fn from_file(path: &Path) -> Result<Settings> {
        let content = std::fs::read_to_string(path).map_err(|e| AirfoilError::io(path, e))?;
        Settings::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Settings> {
        let settings: Settings = toml::from_str(content).map_err(|e| AirfoilError::Config {
            message: e.to_string(),
        })?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn validate(&self) -> Result<()> {
        if self.generate.point_count == 0 {
            return Err(AirfoilError::Config {
                message: "generate.point_count must be at least 1".to_string(),
            });
        }

        let threshold = self.convert.unit_threshold;
        if !threshold.is_finite() || threshold <= 0.0 {
            return Err(AirfoilError::Config {
                message: format!(
                    "convert.unit_threshold must be a positive number, got {}",
                    threshold
                ),
            });
        }

        Ok(())
    }

    pub fn convert_options(&self) -> ConvertOptions {
        ConvertOptions {
            format: self.format,
            split: self.convert.split,
            extract: ExtractOptions {
                unit_threshold: self.convert.unit_threshold,
            },
        }
    }
}
