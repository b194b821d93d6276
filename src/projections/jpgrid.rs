//!
//! Japan plane-rectangular grid
//!
//! Nineteen zones on the Tokyo datum (Bessel 1841), each a Transverse
//! Mercator with its own true origin, scale 0.9999 and no false offsets.
//! By national convention x is the northing and y the easting.
//!

use crate::coord::GeoCoord;
use crate::datums::Datum;
use crate::errors::{Error, Result};
use crate::projections::tmerc;

const K0: f64 = 0.9999;

/// Per-zone true origins (latitude, longitude) in degrees, zones 1..=19.
#[rustfmt::skip]
const ORIGINS: [(f64, f64); 19] = [
    (33., 129. + 30. / 60.),
    (33., 131.),
    (36., 132. + 10. / 60.),
    (33., 133. + 30. / 60.),
    (36., 134. + 20. / 60.),
    (36., 136.),
    (36., 137. + 10. / 60.),
    (36., 138. + 30. / 60.),
    (36., 139. + 50. / 60.),
    (40., 140. + 50. / 60.),
    (44., 140. + 15. / 60.),
    (44., 142. + 15. / 60.),
    (44., 144. + 15. / 60.),
    (26., 142.),
    (26., 127. + 30. / 60.),
    (26., 124.),
    (26., 131.),
    (20., 136.),
    (26., 154.),
];

/// A plane-rectangular point: x north, y east of the zone origin, meters.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct JapanGridPoint {
    pub zone: u8,
    pub x: f64,
    pub y: f64,
    pub datum: Datum,
}

/// Zone whose origin is closest in squared angular distance. There is no
/// hard geographic bound; any input selects some zone.
pub(crate) fn nearest_zone(lat: f64, lon: f64) -> u8 {
    let mut best = 0usize;
    let mut best_d2 = f64::INFINITY;
    for (i, (phi0, lam0)) in ORIGINS.iter().enumerate() {
        let dlat = lat - phi0;
        let dlon = lon - lam0;
        let d2 = dlat * dlat + dlon * dlon;
        if d2 < best_d2 {
            best_d2 = d2;
            best = i;
        }
    }
    best as u8 + 1
}

fn projection(zone: u8) -> Result<tmerc::Projection> {
    if !(1..=19).contains(&zone) {
        return Err(Error::OutOfRange("Japan grid zone"));
    }
    let (phi0, lam0) = ORIGINS[zone as usize - 1];
    Ok(tmerc::Projection::new(
        &Datum::Tokyo.ellipsoid(),
        lam0.to_radians(),
        phi0.to_radians(),
        K0,
        0.,
        0.,
    ))
}

/// Project a Tokyo-datum geographic point into its nearest zone.
pub(crate) fn to_grid(coord: &GeoCoord) -> Result<JapanGridPoint> {
    let zone = nearest_zone(coord.latitude, coord.longitude);
    let (easting, northing) = projection(zone)?.forward(
        coord.longitude.to_radians(),
        coord.latitude.to_radians(),
    )?;
    Ok(JapanGridPoint {
        zone,
        x: northing,
        y: easting,
        datum: Datum::Tokyo,
    })
}

/// Invert a plane-rectangular point to Tokyo-datum geographic coordinates.
pub(crate) fn from_grid(point: &JapanGridPoint) -> Result<GeoCoord> {
    let (lon, lat) = projection(point.zone)?.inverse(point.y, point.x)?;
    Ok(GeoCoord::new(
        lat.to_degrees(),
        lon.to_degrees(),
        0.,
        Datum::Tokyo,
    ))
}
