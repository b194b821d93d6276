//!
//! Geographic coordinates
//!

use crate::datums::Datum;

/// A geographic point on a datum. Angles in degrees, altitude in meters.
///
/// Construction normalizes the longitude into [-180, 180] by whole-turn
/// wrapping and clamps the latitude into [-90, 90], so downstream code
/// always sees canonical values.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GeoCoord {
    pub latitude: f64,
    pub longitude: f64,
    pub altitude: f64,
    pub datum: Datum,
}

impl GeoCoord {
    pub fn new(latitude: f64, longitude: f64, altitude: f64, datum: Datum) -> Self {
        let mut longitude = longitude;
        if longitude.is_finite() {
            while longitude > 180. {
                longitude -= 360.;
            }
            while longitude < -180. {
                longitude += 360.;
            }
        }
        Self {
            latitude: latitude.clamp(-90., 90.),
            longitude,
            altitude,
            datum,
        }
    }

    /// Same position retagged on another datum. The numeric shift itself
    /// is the context's job; this only rewrites the tag.
    pub(crate) fn with_datum(self, datum: Datum) -> Self {
        Self { datum, ..self }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn longitude_wraps_by_whole_turns() {
        let c = GeoCoord::new(10., 190., 0., Datum::Wgs84);
        assert_eq!(c.longitude, -170.);
        let c = GeoCoord::new(10., -555., 0., Datum::Wgs84);
        assert_eq!(c.longitude, 165.);
        let c = GeoCoord::new(10., 725., 0., Datum::Wgs84);
        assert_eq!(c.longitude, 5.);
    }

    #[test]
    fn latitude_clamps() {
        assert_eq!(GeoCoord::new(95., 0., 0., Datum::Wgs84).latitude, 90.);
        assert_eq!(GeoCoord::new(-100., 0., 0., Datum::Wgs84).latitude, -90.);
    }
}
