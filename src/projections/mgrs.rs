//!
//! MGRS 100 km square lettering
//!
//! Column letters cycle through six zone sets with origins A, J, S; row
//! letters repeat every 2 000 km with a zone-parity offset. Decoding picks
//! the row cycle that lands inside the latitude band.
//!

use crate::datums::Datum;
use crate::ellps::Ellipsoid;
use crate::errors::{Error, Result};
use crate::math::{marc, marc_coefs};
use crate::projections::utm::{
    band_index, band_is_south, band_min_lat, UtmPoint, FALSE_NORTHING, K0,
};

/// 24-letter column alphabet, I and O skipped.
const COLS: &[u8] = b"ABCDEFGHJKLMNPQRSTUVWXYZ";
/// 20-letter row alphabet, I and O skipped.
const ROWS: &[u8] = b"ABCDEFGHJKLMNPQRSTUV";

/// Column-letter origins of the six zone sets: A, J, S, A, J, S,
/// as indices into [`COLS`].
const SET_ORIGINS: [i64; 6] = [0, 8, 16, 0, 8, 16];

const SQUARE: f64 = 100_000.;
const ROW_PERIOD: i64 = 20;

/// An MGRS reference: UTM zone and band plus the 100 km square letters and
/// the position within the square in meters.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MgrsPoint {
    pub zone: u8,
    pub band: char,
    pub column: char,
    pub row: char,
    pub easting: f64,
    pub northing: f64,
    pub datum: Datum,
}

/// Row-letter offset: northern bands shift even zones by five rows,
/// southern bands shift odd zones.
fn row_offset(zone: u8, south: bool) -> i64 {
    let odd = zone % 2 == 1;
    if odd != south {
        0
    } else {
        5
    }
}

/// Column letter for a zone and 100 km column index (1..=8).
pub(crate) fn column_letter(zone: u8, col_100k: i64) -> char {
    let origin = SET_ORIGINS[((zone as i64 - 1) % 6) as usize];
    COLS[(origin + col_100k - 1).rem_euclid(COLS.len() as i64) as usize] as char
}

/// Number of 100 km columns east of the zone edge for a column letter,
/// counting steps from the zone set's origin letter.
fn column_index(zone: u8, column: char) -> Result<i64> {
    let pos = COLS
        .iter()
        .position(|&c| c as char == column)
        .ok_or(Error::InvalidCoord)? as i64;
    let origin = SET_ORIGINS[((zone as i64 - 1) % 6) as usize];
    let col_100k = (pos - origin).rem_euclid(COLS.len() as i64) + 1;
    if !(1..=8).contains(&col_100k) {
        return Err(Error::OutOfRange("MGRS column letter"));
    }
    Ok(col_100k)
}

/// Encode a UTM point as an MGRS reference.
pub(crate) fn encode(utm: &UtmPoint) -> Result<MgrsPoint> {
    if !(1..=60).contains(&utm.zone) {
        return Err(Error::InvalidUtmZone);
    }
    if band_index(utm.band).is_none() {
        return Err(Error::InvalidCoord);
    }
    let col_100k = (utm.easting / SQUARE).floor() as i64;
    if !(1..=8).contains(&col_100k) {
        return Err(Error::OutOfRange("UTM easting"));
    }

    let south = band_is_south(utm.band);
    let true_northing = utm.northing - if south { FALSE_NORTHING } else { 0. };
    // Euclidean remainders keep southern (negative) rows valid for any
    // magnitude, not only the first cycle below the equator
    let row_100k = ((true_northing / SQUARE).floor() as i64).rem_euclid(ROW_PERIOD);
    let row_idx = (row_100k + row_offset(utm.zone, south)).rem_euclid(ROW_PERIOD);

    Ok(MgrsPoint {
        zone: utm.zone,
        band: utm.band,
        column: column_letter(utm.zone, col_100k),
        row: ROWS[row_idx as usize] as char,
        easting: utm.easting.rem_euclid(SQUARE),
        northing: true_northing.rem_euclid(SQUARE),
        datum: utm.datum,
    })
}

/// Decode an MGRS reference back to a UTM point.
///
/// The row letter only fixes the northing modulo 2 000 km; the cycle is
/// anchored at the meridional arc of the band's lower edge.
pub(crate) fn decode(ellps: &Ellipsoid, mgrs: &MgrsPoint) -> Result<UtmPoint> {
    if !(1..=60).contains(&mgrs.zone) {
        return Err(Error::InvalidUtmZone);
    }
    if band_index(mgrs.band).is_none() {
        return Err(Error::InvalidCoord);
    }
    if !(0.0..SQUARE).contains(&mgrs.easting) || !(0.0..SQUARE).contains(&mgrs.northing) {
        return Err(Error::OutOfRange("MGRS offsets"));
    }

    let col_100k = column_index(mgrs.zone, mgrs.column)?;
    let row_pos = ROWS
        .iter()
        .position(|&c| c as char == mgrs.row)
        .ok_or(Error::InvalidCoord)? as i64;

    let south = band_is_south(mgrs.band);
    let row_base = (row_pos - row_offset(mgrs.zone, south)).rem_euclid(ROW_PERIOD);

    // Anchor the 20-row cycle at the bottom edge of the band. South of the
    // equator the grid northing dips a few kilometers below the central
    // meridian arc towards the zone edges, hence the slack.
    let phi_min = band_min_lat(mgrs.band).ok_or(Error::InvalidCoord)?.to_radians();
    let en = marc_coefs(ellps.es);
    let min_northing = K0 * marc(phi_min, ellps.a, en) - 5_000.;
    let base_row = (min_northing / SQUARE).floor() as i64;
    let row_100k = base_row + (row_base - base_row).rem_euclid(ROW_PERIOD);

    let true_northing = row_100k as f64 * SQUARE + mgrs.northing;
    let northing = true_northing + if south { FALSE_NORTHING } else { 0. };

    Ok(UtmPoint {
        zone: mgrs.zone,
        band: mgrs.band,
        easting: col_100k as f64 * SQUARE + mgrs.easting,
        northing,
        convergence: 0.,
        scale: K0,
        datum: mgrs.datum,
    })
}
