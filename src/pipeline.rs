//! Entry points that run a whole producer → normalizer → serializer chain and package the result
//! for a caller such as the command line tool or a request handler.

use crate::airfoil::extract::{self, AirfoilRecord, ExtractOptions, RowDiagnostic};
use crate::airfoil::generate::generate_str;
use crate::airfoil::normalize::{normalize_with, SurfaceSplit};
use crate::errors::Result;
use crate::serialize::{render, serialize_points, SerializationFormat};
use ncollide2d::na::Point2;
use serde::Serialize;
use std::collections::BTreeMap;
use std::path::Path;
use tracing::info;

#[derive(Debug, Clone, Default)]
pub struct ConvertOptions {
    pub format: SerializationFormat,
    pub split: SurfaceSplit,
    pub extract: ExtractOptions,
}

#[derive(Debug, Clone, Serialize)]
pub struct ProfileOutput {
    pub name: String,
    pub format: SerializationFormat,
    pub point_count: usize,
    pub text: String,

    #[serde(serialize_with = "serialize_points")]
    pub points: Vec<Point2<f64>>,

    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub metadata: BTreeMap<String, String>,

    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub diagnostics: Vec<RowDiagnostic>,
}

impl ProfileOutput {
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// Generates a NACA 4-digit profile and renders it. Generated points are already in canonical
/// order and are not passed through the normalizer.
pub fn generate_profile(
    code: &str,
    point_count: usize,
    format: SerializationFormat,
) -> Result<ProfileOutput> {
    let profile = generate_str(code, point_count)?;
    let text = render(&profile.points, &profile.header, format);
    info!(name = %profile.name, points = profile.points.len(), %format, "rendered generated profile");

    Ok(ProfileOutput {
        name: profile.name,
        format,
        point_count: profile.points.len(),
        text,
        points: profile.points,
        metadata: BTreeMap::new(),
        diagnostics: Vec::new(),
    })
}

fn convert_record(record: AirfoilRecord, options: &ConvertOptions) -> ProfileOutput {
    let points = normalize_with(&record.coordinates, options.split);
    let text = render(&points, &record.name, options.format);
    info!(
        name = %record.name,
        raw = record.coordinates.len(),
        points = points.len(),
        split = %options.split,
        format = %options.format,
        "rendered extracted profile"
    );

    ProfileOutput {
        name: record.name,
        format: options.format,
        point_count: points.len(),
        text,
        points,
        metadata: record.metadata,
        diagnostics: record.diagnostics,
    }
}

pub fn convert_text(text: &str, options: &ConvertOptions) -> Result<ProfileOutput> {
    let record = extract::extract_with(text, &options.extract)?;
    Ok(convert_record(record, options))
}

pub fn convert_bytes(bytes: &[u8], options: &ConvertOptions) -> Result<ProfileOutput> {
    let record = extract::extract_bytes(bytes, &options.extract)?;
    Ok(convert_record(record, options))
}

pub fn convert_path(path: &Path, options: &ConvertOptions) -> Result<ProfileOutput> {
    let record = extract::extract_file(path, &options.extract)?;
    Ok(convert_record(record, options))
}
