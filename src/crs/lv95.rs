use geo::Point;

/// The LV95 extent covering Switzerland, as `(e_min, n_min, e_max, n_max)`.
/// Coordinates outside this window are rejected by the dataset loader.
pub const SWISS_EXTENT: (f64, f64, f64, f64) = (2_450_000.0, 1_050_000.0, 2_850_000.0, 1_310_000.0);

/// A planar LV95 position in metres.
#[derive(Debug, Copy, Clone, PartialEq, PartialOrd)]
pub struct Lv95 {
    pub e: f64,
    pub n: f64,
}

impl Lv95 {
    pub fn new(e: f64, n: f64) -> Self {
        Lv95 { e, n }
    }

    /// Planar Euclidean distance in metres.
    pub fn distance(&self, other: &Lv95) -> f64 {
        ((self.e - other.e).powi(2) + (self.n - other.n).powi(2)).sqrt()
    }

    pub fn is_finite(&self) -> bool {
        self.e.is_finite() && self.n.is_finite()
    }

    pub fn within_swiss_extent(&self) -> bool {
        let (e_min, n_min, e_max, n_max) = SWISS_EXTENT;
        self.e >= e_min && self.e <= e_max && self.n >= n_min && self.n <= n_max
    }

    /// Projects to WGS84 using the swisstopo approximation formulas,
    /// accurate to roughly a metre over Switzerland.
    pub fn to_wgs84(&self) -> Point<f64> {
        let y = (self.e - 2_600_000.0) / 1_000_000.0;
        let x = (self.n - 1_200_000.0) / 1_000_000.0;

        let lng = 2.6779094 + 4.728982 * y + 0.791484 * y * x + 0.1306 * y * x * x
            - 0.0436 * y * y * y;
        let lat = 16.9023892 + 3.238272 * x
            - 0.270978 * y * y
            - 0.002528 * x * x
            - 0.0447 * y * y * x
            - 0.0140 * x * x * x;

        // The formulas yield results in units of 10000 arc-seconds
        Point::new(lng * 100.0 / 36.0, lat * 100.0 / 36.0)
    }

    /// Inverse of [`Lv95::to_wgs84`]: projects a WGS84 point (lng/lat degrees)
    /// into LV95 metres.
    pub fn from_wgs84(point: &Point<f64>) -> Lv95 {
        let phi = (point.y() * 3600.0 - 169_028.66) / 10_000.0;
        let lambda = (point.x() * 3600.0 - 26_782.5) / 10_000.0;

        let e = 2_600_072.37 + 211_455.93 * lambda
            - 10_938.51 * lambda * phi
            - 0.36 * lambda * phi * phi
            - 44.54 * lambda * lambda * lambda;
        let n = 1_200_147.07 + 308_807.95 * phi + 3_745.25 * lambda * lambda
            + 76.63 * phi * phi
            - 194.56 * lambda * lambda * phi
            + 119.79 * phi * phi * phi;

        Lv95 { e, n }
    }
}

/// An LV95 vertex with elevation (metres above sea level).
/// Elevation defaults to `0.0` for 2-D source geometry.
#[derive(Debug, Copy, Clone, PartialEq, PartialOrd)]
pub struct Coord3 {
    pub e: f64,
    pub n: f64,
    pub z: f64,
}

impl Coord3 {
    pub fn new(e: f64, n: f64, z: f64) -> Self {
        Coord3 { e, n, z }
    }

    pub fn planar(&self) -> Lv95 {
        Lv95 {
            e: self.e,
            n: self.n,
        }
    }

    pub fn is_finite(&self) -> bool {
        self.e.is_finite() && self.n.is_finite() && self.z.is_finite()
    }
}

impl From<Coord3> for Lv95 {
    fn from(value: Coord3) -> Self {
        value.planar()
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn bern_reference_point() {
        // The LV95 projection origin lies at the old Bern observatory
        let bern = Lv95::new(2_600_000.0, 1_200_000.0);
        let wgs = bern.to_wgs84();

        assert_relative_eq!(wgs.x(), 7.438637, epsilon = 1e-4);
        assert_relative_eq!(wgs.y(), 46.951081, epsilon = 1e-4);
    }

    #[test]
    fn round_trip_within_metres() {
        let samples = [
            Lv95::new(2_600_000.0, 1_200_000.0), // Bern
            Lv95::new(2_683_350.0, 1_248_120.0), // Zurich
            Lv95::new(2_537_800.0, 1_152_300.0), // Lausanne
            Lv95::new(2_632_750.0, 1_170_900.0), // Interlaken
        ];

        for sample in samples {
            let back = Lv95::from_wgs84(&sample.to_wgs84());
            assert!(
                sample.distance(&back) < 2.0,
                "round trip drifted {}m for {:?}",
                sample.distance(&back),
                sample
            );
        }
    }

    #[test]
    fn planar_distance() {
        let a = Lv95::new(2_600_000.0, 1_200_000.0);
        let b = Lv95::new(2_600_300.0, 1_200_400.0);
        assert_relative_eq!(a.distance(&b), 500.0);
    }

    #[test]
    fn extent_check() {
        assert!(Lv95::new(2_600_000.0, 1_200_000.0).within_swiss_extent());
        assert!(!Lv95::new(600_000.0, 200_000.0).within_swiss_extent());
    }
}
