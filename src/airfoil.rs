use ncollide2d::na::Point2;

pub mod extract;
pub mod generate;
pub mod normalize;

/// A single chordwise sample of an airfoil: the point on the mean camber line and the two surface
/// points offset from it along the camber normal.
#[derive(Debug, Copy, Clone)]
pub struct CamberStation {
    pub camber: Point2<f64>,
    pub upper: Point2<f64>,
    pub lower: Point2<f64>,
}

impl CamberStation {
    pub fn new(camber: Point2<f64>, upper: Point2<f64>, lower: Point2<f64>) -> CamberStation {
        CamberStation {
            camber,
            upper,
            lower,
        }
    }
}

/// The camber line and the two surfaces of an airfoil, each ordered from the leading edge to the
/// trailing edge.
#[derive(Debug, Clone)]
pub struct Airfoil {
    pub camber: Vec<Point2<f64>>,
    pub upper: Vec<Point2<f64>>,
    pub lower: Vec<Point2<f64>>,
}

impl Airfoil {
    pub fn from_stations(stations: &[CamberStation]) -> Airfoil {
        Airfoil {
            camber: stations.iter().map(|s| s.camber).collect(),
            upper: stations.iter().map(|s| s.upper).collect(),
            lower: stations.iter().map(|s| s.lower).collect(),
        }
    }

    /// Produces the canonical contour: the upper surface from the trailing edge to the leading
    /// edge, followed by the lower surface back to the trailing edge. The lower surface's leading
    /// edge point is shared with the last upper point and is not repeated.
    pub fn to_outer_contour(&self) -> Vec<Point2<f64>> {
        let mut result: Vec<Point2<f64>> = self.upper.iter().rev().cloned().collect();
        result.extend(self.lower.iter().skip(1));
        result
    }
}
