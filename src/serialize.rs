use crate::errors::{AirfoilError, Result};
use itertools::Itertools;
use ncollide2d::na::Point2;
use serde::{Deserialize, Serialize, Serializer};
use std::fmt::{Display, Formatter};
use std::path::Path;
use std::str::FromStr;

#[derive(Serialize)]
#[serde(remote = "Point2<f64>")]
pub struct Point2f64 {
    x: f64,
    y: f64,
}

#[derive(Serialize)]
struct PointRow(#[serde(with = "Point2f64")] Point2<f64>);

/// Serializes a point sequence as a list of `{"x": .., "y": ..}` objects
pub fn serialize_points<S: Serializer>(
    points: &[Point2<f64>],
    serializer: S,
) -> std::result::Result<S::Ok, S::Error> {
    serializer.collect_seq(points.iter().map(|p| PointRow(*p)))
}

/// Text layouts for a coordinate listing
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SerializationFormat {
    /// A name line followed by two space padded columns
    #[default]
    Standard,

    /// Headerless x y z rows with z fixed at zero, for import as a CAD curve
    SolidWorks,
}

impl FromStr for SerializationFormat {
    type Err = AirfoilError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "standard" => Ok(SerializationFormat::Standard),
            "solidworks" | "sw" => Ok(SerializationFormat::SolidWorks),
            _ => Err(AirfoilError::InvalidFormat {
                value: s.to_string(),
            }),
        }
    }
}

impl Display for SerializationFormat {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            SerializationFormat::Standard => write!(f, "standard"),
            SerializationFormat::SolidWorks => write!(f, "solidworks"),
        }
    }
}

/// Renders the points with six fixed decimals, one point per line, joined without a trailing
/// newline. The header is only written in the standard layout.
pub fn render(points: &[Point2<f64>], header: &str, format: SerializationFormat) -> String {
    match format {
        SerializationFormat::Standard => std::iter::once(header.to_string())
            .chain(points.iter().map(|p| format!("  {:.6}  {:.6}", p.x, p.y)))
            .join("\n"),
        SerializationFormat::SolidWorks => points
            .iter()
            .map(|p| format!("{:.6} {:.6} 0.000000", p.x, p.y))
            .join("\n"),
    }
}

/// Writes rendered text to a file, creating parent directories as needed
pub fn write_profile(path: &Path, text: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent).map_err(|e| AirfoilError::io(parent, e))?;
        }
    }

    std::fs::write(path, text).map_err(|e| AirfoilError::io(path, e))
}
