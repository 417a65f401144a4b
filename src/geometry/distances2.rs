use ncollide2d::na::{Point2, RealField};

/// Return the distance between two 2D points
pub fn dist<N: RealField + Copy>(a: &Point2<N>, b: &Point2<N>) -> N {
    (a - b).norm()
}

/// Returns the z component of the cross product of (b - a) and (p - a). Positive values put p to
/// the left of the directed line from a to b, negative values to the right.
pub fn side_of<N: RealField + Copy>(a: &Point2<N>, b: &Point2<N>, p: &Point2<N>) -> N {
    (b - a).perp(&(p - a))
}

/// Find the index of the point farthest from a reference point. Ties keep the earliest index.
pub fn farthest_point_index<N: RealField + Copy>(points: &[Point2<N>], from: &Point2<N>) -> usize {
    let mut index: usize = 0;
    let mut farthest: N = N::zero();
    for (i, p) in points.iter().enumerate() {
        let d = dist(p, from);
        if d > farthest {
            farthest = d;
            index = i;
        }
    }

    index
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use ncollide2d::shape::ConvexPolygon;
    use test_case::test_case;

    #[test_case((0.0, 0.0), (3.0, 4.0), 5.0)]
    #[test_case((1.0, 1.0), (1.0, 1.0), 0.0)]
    #[test_case((-1.0, 2.0), (2.0, -2.0), 5.0)]
    fn test_dist(a: (f64, f64), b: (f64, f64), e: f64) {
        let d = dist(&Point2::new(a.0, a.1), &Point2::new(b.0, b.1));
        assert_relative_eq!(e, d, epsilon = 1e-12);
    }

    #[test_case((0.5, 0.1), 1.0)]
    #[test_case((0.5, -0.1), -1.0)]
    #[test_case((0.5, 0.0), 0.0)]
    fn test_side_of_chord(p: (f64, f64), sign: f64) {
        let a = Point2::new(0.0, 0.0);
        let b = Point2::new(1.0, 0.0);
        let s = side_of(&a, &b, &Point2::new(p.0, p.1));
        assert_relative_eq!(sign * 0.1, s, epsilon = 1e-12);
    }

    #[test]
    fn test_farthest_point_on_hull() {
        let points = vec![
            Point2::new(0.0, 0.0),
            Point2::new(0.5, 0.06),
            Point2::new(1.0, 0.001),
            Point2::new(1.0, -0.001),
            Point2::new(0.5, -0.04),
        ];
        let hull = ConvexPolygon::try_from_points(&points).unwrap();
        let te = Point2::new(1.0, 0.0);
        let i = farthest_point_index(hull.points(), &te);
        assert_relative_eq!(0.0, hull.points()[i].x, epsilon = 1e-12);
        assert_relative_eq!(0.0, hull.points()[i].y, epsilon = 1e-12);
    }

    #[test]
    fn test_farthest_point_ties_keep_first() {
        let points = vec![Point2::new(1.0, 0.0), Point2::new(-1.0, 0.0)];
        assert_eq!(0, farthest_point_index(&points, &Point2::origin()));
    }
}
