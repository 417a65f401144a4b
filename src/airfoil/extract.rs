//! Recovers airfoil surface coordinates from loosely structured, comma delimited text such as the
//! CSV exports produced by airfoil databases and plotting tools.
//!
//! The scan is a small state machine. Every trimmed line is classified exactly once by
//! [`classify`], using the current [`ScanState`] to resolve the cases where the same text means
//! different things in different parts of the file, and the state then advances through
//! [`ScanState::next`]. Only rows seen inside an "airfoil surface" section contribute points.
//! Rows that cannot be read are skipped and reported as [`RowDiagnostic`]s rather than aborting
//! the whole extraction.

use crate::errors::{AirfoilError, Result};
use itertools::Itertools;
use ncollide2d::na::Point2;
use serde::Serialize;
use std::collections::BTreeMap;
use std::path::Path;
use tracing::{debug, info, warn};

pub const UNKNOWN_NAME: &str = "Unknown Airfoil";

/// Maximum x above which the coordinates are assumed to be in absolute units (millimeters, percent
/// of chord) and are rescaled to a unit chord
pub const DEFAULT_UNIT_THRESHOLD: f64 = 10.0;

const COORDINATE_LABELS: [&str; 4] = ["X(mm)", "Y(mm)", "X", "Y"];

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Section {
    Surface,
    CamberLine,
    ChordLine,
}

impl Section {
    fn detect(line: &str) -> Option<Section> {
        let lower = line.to_lowercase();
        if lower.contains("airfoil surface") {
            Some(Section::Surface)
        } else if lower.contains("camber line") {
            Some(Section::CamberLine)
        } else if lower.contains("chord line") {
            Some(Section::ChordLine)
        } else {
            None
        }
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum ScanState {
    /// No section marker seen yet, key/value lines are metadata
    Preamble,
    /// Inside the airfoil surface section, before its column header
    InSurfaceHeader,
    /// Inside the airfoil surface section, after its column header
    InSurfaceData,
    /// Inside a camber line or chord line section
    InOtherSection,
}

impl ScanState {
    pub fn in_surface(self) -> bool {
        matches!(self, ScanState::InSurfaceHeader | ScanState::InSurfaceData)
    }

    pub fn next(self, kind: &LineKind) -> ScanState {
        match kind {
            LineKind::Section(Section::Surface) => ScanState::InSurfaceHeader,
            LineKind::Section(_) => ScanState::InOtherSection,
            LineKind::ColumnHeader if self.in_surface() => ScanState::InSurfaceData,
            _ => self,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum LineKind<'a> {
    Skip,
    Name(&'a str),
    Section(Section),
    Metadata { key: &'a str, value: &'a str },
    ColumnHeader,
    Row(&'a str),
    Noise,
}

/// Classifies a single trimmed line. The checks run in a fixed precedence order, so a section
/// marker is never mistaken for metadata and a column header is never parsed as data.
pub fn classify(line: &str, state: ScanState) -> LineKind<'_> {
    if line.chars().all(|c| c == ',' || c.is_whitespace()) {
        return LineKind::Skip;
    }

    if let Some(rest) = line.strip_prefix("Name,") {
        return LineKind::Name(rest.trim());
    }

    if let Some(section) = Section::detect(line) {
        return LineKind::Section(section);
    }

    if state == ScanState::Preamble {
        if let Some((key, value)) = line.split_once(',') {
            let key = key.trim();
            let value = value.trim();
            if key.is_empty() || value.is_empty() || is_coordinate_label(key) {
                return LineKind::Noise;
            }
            return LineKind::Metadata { key, value };
        }
    }

    if is_column_header(line) {
        return LineKind::ColumnHeader;
    }

    if state.in_surface() && line.contains(',') {
        return LineKind::Row(line);
    }

    LineKind::Noise
}

fn is_coordinate_label(key: &str) -> bool {
    COORDINATE_LABELS.contains(&key) || key.to_lowercase().contains("surface")
}

fn is_column_header(line: &str) -> bool {
    if line.contains("X(") && line.contains("Y(") {
        return true;
    }
    let lower = line.to_lowercase();
    lower.contains('x') && lower.contains('y')
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RowIssue {
    MissingField,
    ResidualHeader,
    NotNumeric,
}

/// A data row inside the surface section which was skipped
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RowDiagnostic {
    pub line_number: usize,
    pub line: String,
    pub issue: RowIssue,
}

fn parse_row(line: &str) -> std::result::Result<Point2<f64>, RowIssue> {
    let mut fields = line.split(',').map(str::trim);
    let x_str = fields.next().unwrap_or("");
    let y_str = fields.next().unwrap_or("");

    if x_str.is_empty() || y_str.is_empty() {
        return Err(RowIssue::MissingField);
    }
    if x_str.contains("X(") || x_str.contains("Y(") {
        return Err(RowIssue::ResidualHeader);
    }

    match (x_str.parse::<f64>(), y_str.parse::<f64>()) {
        (Ok(x), Ok(y)) if x.is_finite() && y.is_finite() => Ok(Point2::new(x, y)),
        _ => Err(RowIssue::NotNumeric),
    }
}

#[derive(Debug, Clone)]
pub struct ExtractOptions {
    pub unit_threshold: f64,
}

impl Default for ExtractOptions {
    fn default() -> Self {
        ExtractOptions {
            unit_threshold: DEFAULT_UNIT_THRESHOLD,
        }
    }
}

#[derive(Debug, Clone)]
pub struct AirfoilRecord {
    pub name: String,
    pub metadata: BTreeMap<String, String>,
    pub coordinates: Vec<Point2<f64>>,
    pub diagnostics: Vec<RowDiagnostic>,

    /// The divisor applied to every coordinate when the input looked like absolute units
    pub scale: Option<f64>,
}

impl AirfoilRecord {
    /// True if any surface row was discarded during extraction
    pub fn is_lossy(&self) -> bool {
        !self.diagnostics.is_empty()
    }
}

pub fn extract(text: &str) -> Result<AirfoilRecord> {
    extract_with(text, &ExtractOptions::default())
}

pub fn extract_with(text: &str, options: &ExtractOptions) -> Result<AirfoilRecord> {
    let mut name: Option<String> = None;
    let mut metadata = BTreeMap::new();
    let mut coordinates = Vec::new();
    let mut diagnostics = Vec::new();
    let mut state = ScanState::Preamble;

    for (i, raw) in text.lines().enumerate() {
        let line = raw.trim();
        let kind = classify(line, state);

        match &kind {
            LineKind::Name(n) => name = Some(n.to_string()),
            LineKind::Metadata { key, value } => {
                metadata.insert(key.to_string(), value.to_string());
            }
            LineKind::Row(row) => match parse_row(row) {
                Ok(p) => coordinates.push(p),
                Err(issue) => diagnostics.push(RowDiagnostic {
                    line_number: i + 1,
                    line: row.to_string(),
                    issue,
                }),
            },
            _ => {}
        }

        let next = state.next(&kind);
        if next != state {
            debug!(line = i + 1, from = ?state, to = ?next, "scan state transition");
        }
        state = next;
    }

    if coordinates.is_empty() {
        return Err(AirfoilError::NoCoordinateData);
    }

    if !diagnostics.is_empty() {
        warn!(
            skipped = diagnostics.len(),
            lines = %diagnostics.iter().map(|d| d.line_number).join(","),
            "skipped unreadable surface rows"
        );
    }

    let scale = rescale_to_unit_chord(&mut coordinates, options.unit_threshold);
    let name = name.unwrap_or_else(|| UNKNOWN_NAME.to_string());
    info!(name = %name, points = coordinates.len(), scale = ?scale, "extracted airfoil table");

    Ok(AirfoilRecord {
        name,
        metadata,
        coordinates,
        diagnostics,
        scale,
    })
}

/// Divides every coordinate by the maximum x when that maximum exceeds the threshold, returning
/// the divisor that was applied.
fn rescale_to_unit_chord(points: &mut [Point2<f64>], threshold: f64) -> Option<f64> {
    let max_x = points.iter().map(|p| p.x).fold(f64::MIN, f64::max);
    if max_x > threshold {
        for p in points.iter_mut() {
            *p /= max_x;
        }
        Some(max_x)
    } else {
        None
    }
}

pub fn extract_bytes(bytes: &[u8], options: &ExtractOptions) -> Result<AirfoilRecord> {
    extract_with(&String::from_utf8_lossy(bytes), options)
}

pub fn extract_file(path: &Path, options: &ExtractOptions) -> Result<AirfoilRecord> {
    let bytes = std::fs::read(path).map_err(|e| AirfoilError::io(path, e))?;
    debug!(path = %path.display(), bytes = bytes.len(), "read airfoil table");
    extract_bytes(&bytes, options)
}
