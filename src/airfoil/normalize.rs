use crate::errors::AirfoilError;
use crate::geometry::distances2::{farthest_point_index, side_of};
use itertools::{Itertools, MinMaxResult};
use ncollide2d::na::Point2;
use ncollide2d::shape::ConvexPolygon;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt::{Display, Formatter};
use std::str::FromStr;

/// Two x values closer than this at the leading edge are treated as the same vertex
pub const LEADING_EDGE_TOL: f64 = 1e-6;

/// The method used to decide which points of a raw sequence belong to the upper surface and which
/// to the lower surface before each is sorted into canonical order.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SurfaceSplit {
    /// Split at the middle index of the sequence, the first half (including the middle point)
    /// being the upper surface. Only correct for sequences that already list one surface and
    /// then the other.
    #[default]
    Midpoint,

    /// Estimate the chord from the trailing edge to the farthest convex hull vertex and put every
    /// point on or above the chord on the upper surface.
    Chord,
}

impl FromStr for SurfaceSplit {
    type Err = AirfoilError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "midpoint" => Ok(SurfaceSplit::Midpoint),
            "chord" => Ok(SurfaceSplit::Chord),
            _ => Err(AirfoilError::InvalidSplit {
                value: s.to_string(),
            }),
        }
    }
}

impl Display for SurfaceSplit {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            SurfaceSplit::Midpoint => write!(f, "midpoint"),
            SurfaceSplit::Chord => write!(f, "chord"),
        }
    }
}

pub fn normalize(points: &[Point2<f64>]) -> Vec<Point2<f64>> {
    normalize_with(points, SurfaceSplit::Midpoint)
}

/// Reorders a raw coordinate sequence into the canonical traversal: upper surface from trailing
/// edge to leading edge, then lower surface from leading edge to trailing edge.
pub fn normalize_with(points: &[Point2<f64>], split: SurfaceSplit) -> Vec<Point2<f64>> {
    if points.is_empty() {
        return Vec::new();
    }

    let (upper, lower) = match split {
        SurfaceSplit::Midpoint => midpoint_split(points),
        SurfaceSplit::Chord => chord_split(points),
    };

    order_surfaces(upper, lower)
}

fn midpoint_split(points: &[Point2<f64>]) -> (Vec<Point2<f64>>, Vec<Point2<f64>>) {
    let mid = points.len() / 2;
    (points[..=mid].to_vec(), points[mid + 1..].to_vec())
}

fn chord_split(points: &[Point2<f64>]) -> (Vec<Point2<f64>>, Vec<Point2<f64>>) {
    let (le, te) = estimate_chord(points);
    points
        .iter()
        .partition(|p| side_of(&le, &te, p) >= 0.0)
}

/// Returns the (leading edge, trailing edge) pair of an estimated chord line. The trailing edge
/// is the midpoint of the two aft-most points, which closes an open trailing edge gap, and the
/// leading edge is the point farthest from it.
fn estimate_chord(points: &[Point2<f64>]) -> (Point2<f64>, Point2<f64>) {
    let aft: Vec<&Point2<f64>> = points.iter().sorted_by(|a, b| cmp_x(b, a)).take(2).collect();
    let te = match aft.as_slice() {
        [a, b] => Point2::from((a.coords + b.coords) * 0.5),
        [a] => **a,
        _ => Point2::origin(),
    };

    // The farthest point from any location is always a vertex of the convex hull
    let candidates = if is_degenerate(points) {
        points.to_vec()
    } else {
        ConvexPolygon::try_from_points(points)
            .map(|hull| hull.points().to_vec())
            .unwrap_or_else(|| points.to_vec())
    };
    let le = candidates[farthest_point_index(&candidates, &te)];

    (le, te)
}

/// Fewer than three points, or all of them on one line, have no usable convex hull
fn is_degenerate(points: &[Point2<f64>]) -> bool {
    match points.iter().minmax_by(|a, b| cmp_x(a, b)) {
        MinMaxResult::MinMax(a, b) => {
            points.len() < 3 || points.iter().all(|p| side_of(a, b, p).abs() <= 1e-12)
        }
        _ => true,
    }
}

fn cmp_x(a: &Point2<f64>, b: &Point2<f64>) -> Ordering {
    a.x.partial_cmp(&b.x).unwrap_or(Ordering::Equal)
}

fn order_surfaces(
    mut upper: Vec<Point2<f64>>,
    mut lower: Vec<Point2<f64>>,
) -> Vec<Point2<f64>> {
    upper.sort_by(|a, b| cmp_x(b, a));
    lower.sort_by(cmp_x);

    if let (Some(first), Some(last)) = (lower.first(), upper.last()) {
        if (first.x - last.x).abs() < LEADING_EDGE_TOL {
            lower.remove(0);
        }
    }

    upper.append(&mut lower);
    upper
}
