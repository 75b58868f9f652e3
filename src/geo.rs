use ::geo::{Distance, Geodesic, Point};
use lazy_static::lazy_static;
use regex::Regex;

const METERS_PER_NM: f64 = 1852.0;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LatLon(f64, f64);

impl LatLon {
    /// Parses a pair of decimal degree columns, e.g. ` 40.639751` and ` -73.778925`.
    /// Surrounding padding is ignored.
    pub fn from_decimal(lat: &str, lon: &str) -> Option<Self> {
        lazy_static! {
            static ref DECIMAL_REGEX: Regex =
                Regex::new(r"^\s*[-+]?(\d+\.?\d*|\.\d+)\s*$").unwrap();
        }

        let parse = |s: &str| -> Option<f64> {
            if DECIMAL_REGEX.is_match(s) {
                s.trim().parse().ok()
            } else {
                None
            }
        };

        Some(LatLon(parse(lat)?, parse(lon)?))
    }

    /// Geodesic distance on the WGS-84 ellipsoid in nautical miles.
    pub fn distance_nm(self, other: LatLon) -> f64 {
        Geodesic.distance(Point::from(self), Point::from(other)) / METERS_PER_NM
    }
}

impl From<LatLon> for Point<f64> {
    fn from(c: LatLon) -> Self {
        Point::new(c.1, c.0)
    }
}
