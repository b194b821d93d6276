//!
//! British National Grid
//!
//! Transverse Mercator on OSGB36 / Airy 1830 with the Ordnance Survey
//! origin constants, plus the 500 km / 100 km square lettering. The
//! inverse uses the OS iterative recovery of the footpoint latitude.
//!

use crate::coord::GeoCoord;
use crate::datums::Datum;
use crate::errors::{Error, Result};
use crate::projections::tmerc;

const PHI0_DEG: f64 = 49.;
const LAM0_DEG: f64 = -2.;
const FALSE_EASTING: f64 = 400_000.;
const FALSE_NORTHING: f64 = -100_000.;
const K0: f64 = 0.9996012717;

const SQUARE: f64 = 100_000.;
const MAX_ITER: usize = 10;
const TOL: f64 = 1.0e-12;

/// 25-letter grid alphabet; only I is skipped.
const LETTERS: &[u8] = b"ABCDEFGHJKLMNOPQRSTUVWXYZ";

/// A grid reference: the two square letters and the position within the
/// 100 km square in meters. Always anchored on OSGB36.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BritishGridPoint {
    pub letters: [char; 2],
    pub easting: f64,
    pub northing: f64,
    pub datum: Datum,
}

/// Letters for a full easting/northing pair. Squares outside the British
/// Isles wrap the alphabet and are not standardized.
fn square_letters(easting: f64, northing: f64) -> [char; 2] {
    let gx = (easting / SQUARE).floor() as i64;
    let gy = (northing / SQUARE).floor() as i64;
    let c1 = (17 - gy.div_euclid(5) * 5 + gx.div_euclid(5)).rem_euclid(25);
    let c2 = (20 - gy.rem_euclid(5) * 5 + gx.rem_euclid(5)).rem_euclid(25);
    [LETTERS[c1 as usize] as char, LETTERS[c2 as usize] as char]
}

/// 100 km square indices east and north of the false origin.
fn square_indices(letters: [char; 2]) -> Result<(i64, i64)> {
    let find = |c: char| {
        LETTERS
            .iter()
            .position(|&l| l as char == c)
            .map(|i| i as i64)
            .ok_or(Error::InvalidCoord)
    };
    let i1 = find(letters[0])?;
    let i2 = find(letters[1])?;
    let e100k = (i1 - 2).rem_euclid(5) * 5 + i2.rem_euclid(5);
    let n100k = 19 - i1.div_euclid(5) * 5 - i2.div_euclid(5);
    Ok((e100k, n100k))
}

fn projection() -> tmerc::Projection {
    tmerc::Projection::new(
        &Datum::Osgb36.ellipsoid(),
        LAM0_DEG.to_radians(),
        PHI0_DEG.to_radians(),
        K0,
        FALSE_EASTING,
        FALSE_NORTHING,
    )
}

/// OS meridional-arc series in the third flattening.
fn meridional(phi: f64, phi0: f64, n: f64, bf0: f64) -> f64 {
    let n2 = n * n;
    let n3 = n2 * n;
    let dphi = phi - phi0;
    let sphi = phi + phi0;
    bf0 * ((1. + n + 5. / 4. * n2 + 5. / 4. * n3) * dphi
        - (3. * n + 3. * n2 + 21. / 8. * n3) * dphi.sin() * sphi.cos()
        + (15. / 8. * n2 + 15. / 8. * n3) * (2. * dphi).sin() * (2. * sphi).cos()
        - 35. / 24. * n3 * (3. * dphi).sin() * (3. * sphi).cos())
}

/// OS closed-form inverse: iterate the footpoint latitude, then apply the
/// VII..XIIA series. Converges in a handful of iterations over the grid
/// domain; past the cap the last estimate is used as-is.
fn inverse_projection(easting: f64, northing: f64) -> (f64, f64) {
    let ellps = Datum::Osgb36.ellipsoid();
    let af0 = ellps.a * K0;
    let bf0 = ellps.b * K0;
    let n = (ellps.a - ellps.b) / (ellps.a + ellps.b);
    let phi0 = PHI0_DEG.to_radians();
    let lam0 = LAM0_DEG.to_radians();

    let mut phi = (northing - FALSE_NORTHING) / af0 + phi0;
    for _ in 0..MAX_ITER {
        let m = meridional(phi, phi0, n, bf0);
        let delta = (northing - FALSE_NORTHING - m) / af0;
        phi += delta;
        if delta.abs() < TOL {
            break;
        }
    }

    let es = ellps.es;
    let sin2 = phi.sin() * phi.sin();
    let nu = af0 / (1. - es * sin2).sqrt();
    let rho = nu * (1. - es) / (1. - es * sin2);
    let eta2 = nu / rho - 1.;

    let tan = phi.tan();
    let t2 = tan * tan;
    let t4 = t2 * t2;
    let sec = 1. / phi.cos();
    let de = easting - FALSE_EASTING;

    let vii = tan / (2. * rho * nu);
    let viii = tan / (24. * rho * nu.powi(3)) * (5. + 3. * t2 + eta2 - 9. * t2 * eta2);
    let ix = tan / (720. * rho * nu.powi(5)) * (61. + 90. * t2 + 45. * t4);
    let x = sec / nu;
    let xi = sec / (6. * nu.powi(3)) * (nu / rho + 2. * t2);
    let xii = sec / (120. * nu.powi(5)) * (5. + 28. * t2 + 24. * t4);
    let xiia = sec / (5040. * nu.powi(7)) * (61. + 662. * t2 + 1320. * t4 + 720. * t2 * t4);

    let de2 = de * de;
    let lat = phi - vii * de2 + viii * de2 * de2 - ix * de2 * de2 * de2;
    let lon = lam0 + x * de - xi * de * de2 + xii * de * de2 * de2 - xiia * de * de2 * de2 * de2;
    (lon, lat)
}

/// Project an OSGB36 geographic point to a grid reference.
pub(crate) fn to_grid(coord: &GeoCoord) -> Result<BritishGridPoint> {
    let (easting, northing) = projection().forward(
        coord.longitude.to_radians(),
        coord.latitude.to_radians(),
    )?;
    Ok(BritishGridPoint {
        letters: square_letters(easting, northing),
        easting: easting.rem_euclid(SQUARE),
        northing: northing.rem_euclid(SQUARE),
        datum: Datum::Osgb36,
    })
}

/// Invert a grid reference to OSGB36 geographic coordinates.
pub(crate) fn from_grid(point: &BritishGridPoint) -> Result<GeoCoord> {
    if !(0.0..SQUARE).contains(&point.easting) || !(0.0..SQUARE).contains(&point.northing) {
        return Err(Error::OutOfRange("grid square offsets"));
    }
    let (e100k, n100k) = square_indices(point.letters)?;
    let easting = e100k as f64 * SQUARE + point.easting;
    let northing = n100k as f64 * SQUARE + point.northing;
    let (lon, lat) = inverse_projection(easting, northing);
    Ok(GeoCoord::new(
        lat.to_degrees(),
        lon.to_degrees(),
        0.,
        Datum::Osgb36,
    ))
}
