//!
//! Geodesic computations
//!
//! Thin wrapper over the GeographicLib solver; the context re-creates the
//! handle whenever its active ellipsoid changes.
//!

use geographiclib_rs::{DirectGeodesic, Geodesic, InverseGeodesic};

use crate::ellps::Ellipsoid;

/// Result of an inverse geodesic computation: distance in meters,
/// azimuths in degrees clockwise from north.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GeodesicResult {
    pub distance: f64,
    pub azimuth1: f64,
    pub azimuth2: f64,
}

pub(crate) struct Solver {
    geod: Geodesic,
}

impl Solver {
    pub(crate) fn new(ellps: &Ellipsoid) -> Self {
        Self {
            geod: Geodesic::new(ellps.a, ellps.f),
        }
    }

    /// Distance and forward/reverse azimuths between two points, degrees in.
    pub(crate) fn inverse(&self, lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> (f64, f64, f64) {
        let (s12, azi1, azi2, _a12): (f64, f64, f64, f64) =
            self.geod.inverse(lat1, lon1, lat2, lon2);
        (s12, azi1, azi2)
    }

    /// Destination and arrival azimuth from a start, azimuth and distance.
    pub(crate) fn direct(&self, lat1: f64, lon1: f64, azi1: f64, s12: f64) -> (f64, f64, f64) {
        let (lat2, lon2, azi2): (f64, f64, f64) = self.geod.direct(lat1, lon1, azi1, s12);
        (lat2, lon2, azi2)
    }
}
