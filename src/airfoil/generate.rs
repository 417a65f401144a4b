use crate::airfoil::{Airfoil, CamberStation};
use crate::errors::{AirfoilError, Result};
use ncollide2d::na::{Point2, Vector2};
use std::f64::consts::PI;
use std::fmt::{Display, Formatter};
use std::str::FromStr;
use tracing::debug;

pub const DEFAULT_POINT_COUNT: usize = 81;

/// An AirfoilGenerator is an entity which can generate the height and slope of the mean camber
/// line and the airfoil half thickness at fractions of the chord. This provides the information
/// necessary for a generator to compute the airfoil surfaces.
pub trait AirfoilGenerator {
    /// Return the height of the camber line at a chord fraction from 0.0 to 1.0
    fn camber_line(&self, x: f64) -> f64;

    /// Return the slope dyc/dx of the camber line at a chord fraction from 0.0 to 1.0
    fn camber_slope(&self, x: f64) -> f64;

    /// Return the half thickness of the airfoil, measured perpendicular to the camber line, at a
    /// chord fraction from 0.0 to 1.0
    fn half_thickness(&self, x: f64) -> f64;

    fn station_at(&self, x: f64) -> CamberStation {
        let theta = self.camber_slope(x).atan();
        let yt = self.half_thickness(x);
        let camber = Point2::new(x, self.camber_line(x));
        let normal = Vector2::new(-theta.sin(), theta.cos());

        CamberStation::new(camber, camber + normal * yt, camber - normal * yt)
    }

    /// Samples `n` stations with cosine spacing, which clusters them near the leading and
    /// trailing edges where the curvature is highest.
    fn stations(&self, n: usize) -> Vec<CamberStation> {
        cosine_spacing(n)
            .into_iter()
            .map(|x| self.station_at(x))
            .collect()
    }

    fn generate(&self, n: usize) -> Airfoil {
        Airfoil::from_stations(&self.stations(n))
    }
}

/// Returns `n` chord fractions x = 0.5 * (1 - cos(beta)) for beta evenly spaced over [0, pi]
pub fn cosine_spacing(n: usize) -> Vec<f64> {
    if n == 1 {
        return vec![0.0];
    }

    (0..n)
        .map(|i| {
            let beta = PI * i as f64 / (n - 1) as f64;
            0.5 * (1.0 - beta.cos())
        })
        .collect()
}

/// A validated 4-digit NACA designation of the form MPTT
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct NacaCode {
    digits: [u8; 4],
}

impl NacaCode {
    /// Maximum camber as a fraction of the chord
    pub fn max_camber(&self) -> f64 {
        self.digits[0] as f64 / 100.0
    }

    /// Chordwise position of the maximum camber as a fraction of the chord
    pub fn camber_position(&self) -> f64 {
        self.digits[1] as f64 / 10.0
    }

    /// Maximum thickness as a fraction of the chord
    pub fn thickness(&self) -> f64 {
        (self.digits[2] * 10 + self.digits[3]) as f64 / 100.0
    }

    pub fn header(&self) -> String {
        format!(
            "NACA {} Airfoil M={:.1}% P={:.1}% T={:.1}%",
            self,
            self.max_camber() * 100.0,
            self.camber_position() * 100.0,
            self.thickness() * 100.0
        )
    }
}

impl FromStr for NacaCode {
    type Err = AirfoilError;

    fn from_str(s: &str) -> Result<Self> {
        let bytes = s.as_bytes();
        if bytes.len() != 4 || !bytes.iter().all(|b| b.is_ascii_digit()) {
            return Err(AirfoilError::InvalidCode {
                code: s.to_string(),
            });
        }

        let mut digits = [0u8; 4];
        for (d, b) in digits.iter_mut().zip(bytes) {
            *d = b - b'0';
        }

        Ok(NacaCode { digits })
    }
}

impl Display for NacaCode {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        for d in self.digits.iter() {
            write!(f, "{}", d)?;
        }
        Ok(())
    }
}

/// A generator for a NACA 4-digit airfoil of the form MPTT, where M is the maximum camber P is the
/// location of the maximum camber, and TT is the maximum thickness of the airfoil as a fraction of
/// the chord.  For example, a NACA 2412 airfoil has a 2% camber at 40% of the chord and a max
/// thickness which is 12% of the chord length.
pub struct Naca4Digit {
    t: f64,
    m: f64,
    p: f64,
}

impl Naca4Digit {
    /// Create a new NACA 4 digit generator.
    ///
    /// # Arguments
    ///
    /// * `t_max` - the maximum thickness of the airfoil as a fraction of the chord length. For
    /// instance, on a NACA 2412 t_max should be 0.12
    ///
    /// * `max_camber` - The max camber as a fraction, for example on a NACA 2412 this value should
    /// be set to 0.02
    ///
    /// * `max_camber_chord` - The location of the max camber as a fraction of chord length. For
    /// example on a NACA 2412 this values should be 0.4
    pub fn new(t_max: f64, max_camber: f64, max_camber_chord: f64) -> Naca4Digit {
        Naca4Digit {
            t: t_max,
            m: max_camber,
            p: max_camber_chord,
        }
    }

    pub fn from_code(code: &NacaCode) -> Naca4Digit {
        Naca4Digit::new(code.thickness(), code.max_camber(), code.camber_position())
    }

    fn is_symmetric(&self) -> bool {
        self.m == 0.0 || self.p == 0.0
    }
}

impl AirfoilGenerator for Naca4Digit {
    fn camber_line(&self, x: f64) -> f64 {
        if self.is_symmetric() {
            0.0
        } else if x <= self.p {
            (self.m / self.p.powi(2)) * (2.0 * self.p * x - x.powi(2))
        } else {
            (self.m / (1.0 - self.p).powi(2)) * ((1.0 - 2.0 * self.p) + 2.0 * self.p * x - x.powi(2))
        }
    }

    fn camber_slope(&self, x: f64) -> f64 {
        if self.is_symmetric() {
            0.0
        } else if x <= self.p {
            (2.0 * self.m / self.p.powi(2)) * (self.p - x)
        } else {
            (2.0 * self.m / (1.0 - self.p).powi(2)) * (self.p - x)
        }
    }

    fn half_thickness(&self, x: f64) -> f64 {
        5.0 * self.t
            * (0.2969 * x.sqrt() - 0.1260 * x - 0.3516 * x.powi(2) + 0.2843 * x.powi(3)
                - 0.1015 * x.powi(4))
    }
}

/// Output of the parametric generator: the points in canonical contour order together with the
/// descriptive header line
#[derive(Debug, Clone)]
pub struct GeneratedProfile {
    pub name: String,
    pub header: String,
    pub points: Vec<Point2<f64>>,
}

pub fn generate(code: &NacaCode, n: usize) -> Result<GeneratedProfile> {
    if n == 0 {
        return Err(AirfoilError::InvalidPointCount { count: n });
    }

    let airfoil = Naca4Digit::from_code(code).generate(n);
    let points = airfoil.to_outer_contour();
    debug!(code = %code, stations = n, points = points.len(), "generated NACA profile");

    Ok(GeneratedProfile {
        name: format!("NACA {}", code),
        header: code.header(),
        points,
    })
}

pub fn generate_str(code: &str, n: usize) -> Result<GeneratedProfile> {
    generate(&code.parse()?, n)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use test_case::test_case;

    #[test_case(1.000000, 0.001260)]
    #[test_case(0.840000, 0.021694)]
    #[test_case(0.680000, 0.038557)]
    #[test_case(0.520000, 0.051635)]
    #[test_case(0.360000, 0.059263)]
    #[test_case(0.300000, 0.060017)]
    #[test_case(0.200000, 0.057375)]
    #[test_case(0.040000, 0.032277)]
    fn test_naca_4_thickness(x: f64, e: f64) {
        let naca = Naca4Digit::new(0.12, 0.0, 0.0);
        let result = naca.half_thickness(x);
        assert_relative_eq!(e, result, epsilon = 1e-6);
    }

    #[test_case(1.0000, 0.0013)]
    #[test_case(0.9000, 0.0208)]
    #[test_case(0.7000, 0.0518)]
    #[test_case(0.5000, 0.0724)]
    #[test_case(0.3000, 0.0788)]
    #[test_case(0.2000, 0.0726)]
    #[test_case(0.1000, 0.0563)]
    fn test_naca_4_camber(x: f64, e: f64) {
        let naca = Naca4Digit::new(0.12, 0.02, 0.4);
        let t = naca.half_thickness(x);
        let c = naca.camber_line(x);
        assert_relative_eq!(e, t + c, epsilon = 1e-3);
    }

    #[test_case(0.4, 0.02)]
    #[test_case(0.2, 0.015)]
    #[test_case(0.7, 0.015)]
    #[test_case(0.0, 0.0)]
    fn test_naca_2412_camber_line(x: f64, e: f64) {
        let naca = Naca4Digit::new(0.12, 0.02, 0.4);
        assert_relative_eq!(e, naca.camber_line(x), epsilon = 1e-12);
    }

    #[test]
    fn test_camber_slope_zero_at_max_camber() {
        let naca = Naca4Digit::new(0.12, 0.02, 0.4);
        assert_relative_eq!(0.0, naca.camber_slope(0.4), epsilon = 1e-12);
        assert!(naca.camber_slope(0.1) > 0.0);
        assert!(naca.camber_slope(0.9) < 0.0);
    }

    #[test_case("2412", 0.02, 0.4, 0.12)]
    #[test_case("0012", 0.0, 0.0, 0.12)]
    #[test_case("4415", 0.04, 0.4, 0.15)]
    #[test_case("9999", 0.09, 0.9, 0.99)]
    fn test_parse_code(s: &str, m: f64, p: f64, t: f64) {
        let code: NacaCode = s.parse().unwrap();
        assert_relative_eq!(m, code.max_camber(), epsilon = 1e-12);
        assert_relative_eq!(p, code.camber_position(), epsilon = 1e-12);
        assert_relative_eq!(t, code.thickness(), epsilon = 1e-12);
        assert_eq!(s, code.to_string());
    }

    #[test_case("")]
    #[test_case("241")]
    #[test_case("24120")]
    #[test_case("24a2")]
    #[test_case(" 2412")]
    #[test_case("-412")]
    #[test_case("２４１２")]
    fn test_invalid_code(s: &str) {
        let result = s.parse::<NacaCode>();
        assert!(matches!(result, Err(AirfoilError::InvalidCode { .. })));
    }

    #[test_case("2412", "NACA 2412 Airfoil M=2.0% P=40.0% T=12.0%")]
    #[test_case("0012", "NACA 0012 Airfoil M=0.0% P=0.0% T=12.0%")]
    #[test_case("9324", "NACA 9324 Airfoil M=9.0% P=30.0% T=24.0%")]
    fn test_header(s: &str, e: &str) {
        let code: NacaCode = s.parse().unwrap();
        assert_eq!(e, code.header());
    }

    #[test_case(2)]
    #[test_case(5)]
    #[test_case(81)]
    #[test_case(200)]
    fn test_cosine_spacing_ends(n: usize) {
        let xs = cosine_spacing(n);
        assert_eq!(n, xs.len());
        assert_relative_eq!(0.0, xs[0], epsilon = 1e-15);
        assert_relative_eq!(1.0, xs[n - 1], epsilon = 1e-15);
        assert!(xs.windows(2).all(|w| w[1] > w[0]));
    }

    #[test_case("2412", 81)]
    #[test_case("0012", 81)]
    #[test_case("4415", 41)]
    #[test_case("6409", 3)]
    fn test_point_count(code: &str, n: usize) {
        let profile = generate_str(code, n).unwrap();
        assert_eq!(2 * n - 1, profile.points.len());
    }

    #[test]
    fn test_single_station() {
        let profile = generate_str("2412", 1).unwrap();
        assert_eq!(1, profile.points.len());
        assert_relative_eq!(0.0, profile.points[0].x);
        assert_relative_eq!(0.0, profile.points[0].y);
    }

    #[test]
    fn test_zero_points_rejected() {
        let result = generate_str("2412", 0);
        assert!(matches!(
            result,
            Err(AirfoilError::InvalidPointCount { count: 0 })
        ));
    }

    #[test]
    fn test_naca_2412_landmarks() {
        let profile = generate_str("2412", 81).unwrap();
        let first = profile.points[0];
        let mid = profile.points[80];
        let last = profile.points[160];

        assert_relative_eq!(1.0, first.x, epsilon = 1e-3);
        assert_relative_eq!(0.0, first.y, epsilon = 2e-3);
        assert_relative_eq!(0.0, mid.x, epsilon = 1e-12);
        assert_relative_eq!(0.0, mid.y, epsilon = 1e-12);
        assert_relative_eq!(1.0, last.x, epsilon = 1e-3);
        assert!(first.y > last.y);
        assert_eq!("NACA 2412", profile.name);
        assert_eq!("NACA 2412 Airfoil M=2.0% P=40.0% T=12.0%", profile.header);
    }

    #[test]
    fn test_surface_formulas_hold() {
        let naca = Naca4Digit::new(0.12, 0.02, 0.4);
        for (x, s) in cosine_spacing(81).into_iter().zip(naca.stations(81)) {
            let m = 0.02;
            let p = 0.4;
            let (yc, slope) = if x <= p {
                (
                    (m / (p * p)) * (2.0 * p * x - x * x),
                    (2.0 * m / (p * p)) * (p - x),
                )
            } else {
                (
                    (m / ((1.0 - p) * (1.0 - p))) * ((1.0 - 2.0 * p) + 2.0 * p * x - x * x),
                    (2.0 * m / ((1.0 - p) * (1.0 - p))) * (p - x),
                )
            };
            let yt = 0.6
                * (0.2969 * x.sqrt() - 0.1260 * x - 0.3516 * x * x + 0.2843 * x * x * x
                    - 0.1015 * x * x * x * x);
            let theta = slope.atan();

            assert_relative_eq!(x - yt * theta.sin(), s.upper.x, epsilon = 1e-9);
            assert_relative_eq!(yc + yt * theta.cos(), s.upper.y, epsilon = 1e-9);
            assert_relative_eq!(x + yt * theta.sin(), s.lower.x, epsilon = 1e-9);
            assert_relative_eq!(yc - yt * theta.cos(), s.lower.y, epsilon = 1e-9);
        }
    }

    #[test_case("0012")]
    #[test_case("0009")]
    #[test_case("2012")]
    fn test_symmetric_sections_mirror(code: &str) {
        let c: NacaCode = code.parse().unwrap();
        let naca = Naca4Digit::from_code(&c);
        for s in naca.stations(81) {
            assert_eq!(0.0, s.camber.y);
            assert_relative_eq!(s.upper.x, s.lower.x, epsilon = 1e-12);
            assert_relative_eq!(s.upper.y, -s.lower.y, epsilon = 1e-12);
        }
    }

    #[test]
    fn test_contour_pairs_stations_around_leading_edge() {
        let profile = generate_str("4412", 61).unwrap();
        let stations = Naca4Digit::new(0.12, 0.04, 0.4).stations(61);
        for (i, s) in stations.iter().enumerate().skip(1) {
            let upper = profile.points[60 - i];
            let lower = profile.points[60 + i];
            assert_relative_eq!(s.upper.x, upper.x, epsilon = 1e-12);
            assert_relative_eq!(s.lower.y, lower.y, epsilon = 1e-12);
            assert!(upper.y > lower.y);
        }
    }
}
