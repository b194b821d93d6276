//!
//! Universal Transverse Mercator
//!
//! Zone and latitude-band machinery, including the Norway and Svalbard
//! zone exceptions, on top of the shared Transverse Mercator core.
//!

use crate::coord::GeoCoord;
use crate::datums::Datum;
use crate::ellps::Ellipsoid;
use crate::errors::{Error, Result};
use crate::projections::tmerc;

pub(crate) const K0: f64 = 0.9996;
pub(crate) const FALSE_EASTING: f64 = 500_000.;
pub(crate) const FALSE_NORTHING: f64 = 10_000_000.;

/// Latitude bands from 80S to 84N, 8 degrees each, I and O skipped.
const BANDS: &[u8] = b"CDEFGHJKLMNPQRSTUVWX";

/// A projected UTM point. Easting carries the 500 km false easting;
/// southern northings carry the 10 000 km false northing. Convergence in
/// degrees, positive east of the central meridian in the northern
/// hemisphere.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct UtmPoint {
    pub zone: u8,
    pub band: char,
    pub easting: f64,
    pub northing: f64,
    pub convergence: f64,
    pub scale: f64,
    pub datum: Datum,
}

/// UTM zone for a geographic position, with the Norway and Svalbard
/// exceptions applied.
pub fn utm_zone(lon: f64, lat: f64) -> u8 {
    // South-west Norway is folded into zone 32
    if (56.0..64.0).contains(&lat) && (3.0..12.0).contains(&lon) {
        return 32;
    }
    // Svalbard uses the odd zones 31..37 only
    if (72.0..84.0).contains(&lat) {
        match lon {
            l if (0.0..9.0).contains(&l) => return 31,
            l if (9.0..21.0).contains(&l) => return 33,
            l if (21.0..33.0).contains(&l) => return 35,
            l if (33.0..42.0).contains(&l) => return 37,
            _ => {}
        }
    }
    let zone = ((lon + 180.) / 6.).floor() as i32 + 1;
    zone.clamp(1, 60) as u8
}

/// Latitude band letter, saturating to C below 80S and X above 84N.
pub fn utm_band(lat: f64) -> char {
    let idx = (((lat + 80.) / 8.).floor() as isize).clamp(0, BANDS.len() as isize - 1);
    BANDS[idx as usize] as char
}

pub(crate) fn band_index(band: char) -> Option<usize> {
    BANDS.iter().position(|&b| b as char == band)
}

/// Bands C..M sit south of the equator.
pub(crate) fn band_is_south(band: char) -> bool {
    band < 'N'
}

/// Lower latitude edge of a band, degrees.
pub(crate) fn band_min_lat(band: char) -> Option<f64> {
    band_index(band).map(|i| i as f64 * 8. - 80.)
}

pub(crate) fn central_meridian_deg(zone: u8) -> f64 {
    (zone as f64 - 1.) * 6. - 180. + 3.
}

fn projection(ellps: &Ellipsoid, zone: u8) -> tmerc::Projection {
    tmerc::Projection::new(
        ellps,
        central_meridian_deg(zone).to_radians(),
        0.,
        K0,
        FALSE_EASTING,
        0.,
    )
}

/// Project a geographic point to UTM on its own datum's ellipsoid.
pub(crate) fn to_utm(ellps: &Ellipsoid, coord: &GeoCoord) -> Result<UtmPoint> {
    if !coord.latitude.is_finite() || !coord.longitude.is_finite() {
        return Err(Error::InvalidCoord);
    }
    let zone = utm_zone(coord.longitude, coord.latitude);
    let band = utm_band(coord.latitude);
    let proj = projection(ellps, zone);

    let lon = coord.longitude.to_radians();
    let lat = coord.latitude.to_radians();
    let (easting, mut northing) = proj.forward(lon, lat)?;
    if coord.latitude < 0. {
        northing += FALSE_NORTHING;
    }
    let (gamma, scale) = proj.convergence_scale(lon, lat);

    Ok(UtmPoint {
        zone,
        band,
        easting,
        northing,
        convergence: gamma.to_degrees(),
        scale,
        datum: coord.datum,
    })
}

/// Invert a UTM point back to geographic coordinates on its datum.
pub(crate) fn from_utm(ellps: &Ellipsoid, utm: &UtmPoint) -> Result<GeoCoord> {
    if !(1..=60).contains(&utm.zone) {
        return Err(Error::InvalidUtmZone);
    }
    if band_index(utm.band).is_none() {
        return Err(Error::InvalidCoord);
    }
    if !(100_000.0..=900_000.0).contains(&utm.easting) {
        return Err(Error::OutOfRange("UTM easting"));
    }
    let south = band_is_south(utm.band);
    // Southern inputs are accepted both in the false-northing convention
    // [0, 10M] and in the shifted reading [10M, 20M]
    let max_northing = if south {
        2. * FALSE_NORTHING
    } else {
        FALSE_NORTHING
    };
    if !(0.0..=max_northing).contains(&utm.northing) {
        return Err(Error::OutOfRange("UTM northing"));
    }

    let mut northing = utm.northing;
    if south {
        northing -= FALSE_NORTHING;
    }

    let proj = projection(ellps, utm.zone);
    let (lon, lat) = proj.inverse(utm.easting, northing)?;
    Ok(GeoCoord::new(
        lat.to_degrees(),
        lon.to_degrees(),
        0.,
        utm.datum,
    ))
}
