//!
//! Geodetic to/from geocentric conversion
//!
use crate::errors::{Error, Result};
use crate::math::consts::{FRAC_PI_2, PI, TAU};

const GENAU: f64 = 1.0e-12;
const FRAC_PI_2_EPS: f64 = 1.001 * FRAC_PI_2;

/// Convert geodetic coordinates (lon, lat in radians, height in meters)
/// to geocentric Cartesian (X, Y, Z) on the ellipsoid (a, es).
///
/// The X axis points from the Earth centre to (lat 0, lon 0), the Y axis to
/// (lat 0, lon 90E) and the Z axis to the North pole.
pub(crate) fn geodetic_to_geocentric(
    lon: f64,
    lat: f64,
    height: f64,
    a: f64,
    es: f64,
) -> Result<(f64, f64, f64)> {
    let mut lon = lon;
    let mut lat = lat;

    // Tolerate tiny overshoots of the poles, reject anything worse
    if lat < -FRAC_PI_2 && lat > -FRAC_PI_2_EPS {
        lat = -FRAC_PI_2
    } else if lat > FRAC_PI_2 && lat < FRAC_PI_2_EPS {
        lat = FRAC_PI_2
    } else if !(-FRAC_PI_2..=FRAC_PI_2).contains(&lat) {
        return Err(Error::InvalidCoord);
    };

    if lon > PI {
        lon -= TAU;
    }

    let (sin_lat, cos_lat) = lat.sin_cos();
    // Prime vertical radius of curvature at location
    let rn = a / (1. - es * (sin_lat * sin_lat)).sqrt();
    Ok((
        (rn + height) * cos_lat * lon.cos(),
        (rn + height) * cos_lat * lon.sin(),
        (rn * (1. - es) + height) * sin_lat,
    ))
}

/// Convert geocentric Cartesian (X, Y, Z) back to geodetic (lon, lat,
/// height) on the ellipsoid (a, es, b).
///
/// Uses the Bowring closed form with the parametric latitude as
/// intermediate; sub-micrometer accuracy for any terrestrial height.
pub(crate) fn geocentric_to_geodetic(
    x: f64,
    y: f64,
    z: f64,
    a: f64,
    es: f64,
    b: f64,
) -> Result<(f64, f64, f64)> {
    // distance from the rotation axis
    let p = x.hypot(y);

    // On the axis longitude is arbitrary; at the centre of mass the
    // height degenerates to the semi-minor axis
    if p / a < GENAU {
        if (p.hypot(z)) / a < GENAU {
            return Ok((0., FRAC_PI_2, -b));
        }
        let lat = if z < 0. { -FRAC_PI_2 } else { FRAC_PI_2 };
        return Ok((0., lat, z.abs() - b));
    }

    let ep2 = es / (1. - es);
    let theta = (z * a).atan2(p * b);
    let (sin_t, cos_t) = theta.sin_cos();

    let lat = (z + ep2 * b * sin_t * sin_t * sin_t)
        .atan2(p - es * a * cos_t * cos_t * cos_t);
    let lon = y.atan2(x);

    let sin_lat = lat.sin();
    let rn = a / (1. - es * sin_lat * sin_lat).sqrt();
    let height = p / lat.cos() - rn;

    Ok((lon, lat, height))
}
