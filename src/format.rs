//!
//! Output format dispatcher
//!
//! Routes (point, target format, target datum) to the right projector and
//! serializer, shifting the datum first when required. The textual forms
//! produced here are the crate's output contract.
//!

use std::fmt;

use crate::context::Context;
use crate::coord::GeoCoord;
use crate::datums::Datum;
use crate::errors::Result;
use crate::projections::bng::BritishGridPoint;
use crate::projections::jpgrid::JapanGridPoint;
use crate::projections::mgrs::MgrsPoint;
use crate::projections::utm::UtmPoint;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CoordFormat {
    /// `31.230416°N, 121.473701°E`
    DecimalDegrees,
    /// `31°13.825'N, 121°28.422'E`
    DegreesDecimalMinutes,
    /// `31°13'49.50"N, 121°28'25.32"E`
    DegreesMinutesSeconds,
    /// `50S 447600E 4419300N`
    Utm,
    /// `31U DQ 48251 11932`
    Mgrs,
    /// `TG 51409 13177`
    BritishGrid,
    /// `Zone {n}: {x:.3}, {y:.3}` with x north and y east of the zone origin
    JapanGrid,
}

fn lat_hemisphere(v: f64) -> char {
    if v < 0. {
        'S'
    } else {
        'N'
    }
}

fn lon_hemisphere(v: f64) -> char {
    if v < 0. {
        'W'
    } else {
        'E'
    }
}

fn decimal_degrees(coord: &GeoCoord) -> String {
    format!(
        "{:.6}°{}, {:.6}°{}",
        coord.latitude.abs(),
        lat_hemisphere(coord.latitude),
        coord.longitude.abs(),
        lon_hemisphere(coord.longitude),
    )
}

fn degrees_decimal_minutes(coord: &GeoCoord) -> String {
    let (lat_deg, lat_min) = split_minutes(coord.latitude);
    let (lon_deg, lon_min) = split_minutes(coord.longitude);
    format!(
        "{}°{:.3}'{}, {}°{:.3}'{}",
        lat_deg,
        lat_min,
        lat_hemisphere(coord.latitude),
        lon_deg,
        lon_min,
        lon_hemisphere(coord.longitude),
    )
}

fn degrees_minutes_seconds(coord: &GeoCoord) -> String {
    let (lat_deg, lat_min, lat_sec) = split_seconds(coord.latitude);
    let (lon_deg, lon_min, lon_sec) = split_seconds(coord.longitude);
    format!(
        "{}°{}'{:.2}\"{}, {}°{}'{:.2}\"{}",
        lat_deg,
        lat_min,
        lat_sec,
        lat_hemisphere(coord.latitude),
        lon_deg,
        lon_min,
        lon_sec,
        lon_hemisphere(coord.longitude),
    )
}

fn split_minutes(angle: f64) -> (u32, f64) {
    let angle = angle.abs();
    let deg = angle.trunc();
    (deg as u32, (angle - deg) * 60.)
}

fn split_seconds(angle: f64) -> (u32, u32, f64) {
    let (deg, minutes) = split_minutes(angle);
    let min = minutes.trunc();
    (deg, min as u32, (minutes - min) * 60.)
}

impl fmt::Display for UtmPoint {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "{}{} {:.0}E {:.0}N",
            self.zone, self.band, self.easting, self.northing
        )
    }
}

impl fmt::Display for MgrsPoint {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "{}{} {}{} {:05.0} {:05.0}",
            self.zone, self.band, self.column, self.row, self.easting, self.northing
        )
    }
}

impl fmt::Display for BritishGridPoint {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "{}{} {:.0} {:.0}",
            self.letters[0], self.letters[1], self.easting, self.northing
        )
    }
}

impl fmt::Display for JapanGridPoint {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Zone {}: {:.3}, {:.3}", self.zone, self.x, self.y)
    }
}

pub(crate) fn format_coord(
    ctx: &Context,
    coord: &GeoCoord,
    format: CoordFormat,
    datum: Datum,
) -> Result<String> {
    let coord = ctx.convert_datum(coord, datum)?;
    match format {
        CoordFormat::DecimalDegrees => Ok(decimal_degrees(&coord)),
        CoordFormat::DegreesDecimalMinutes => Ok(degrees_decimal_minutes(&coord)),
        CoordFormat::DegreesMinutesSeconds => Ok(degrees_minutes_seconds(&coord)),
        CoordFormat::Utm => ctx.to_utm(&coord).map(|p| p.to_string()),
        CoordFormat::Mgrs => ctx.to_mgrs(&coord).map(|p| p.to_string()),
        CoordFormat::BritishGrid => ctx.to_british_grid(&coord).map(|p| p.to_string()),
        CoordFormat::JapanGrid => ctx.to_japan_grid(&coord).map(|p| p.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn shanghai() -> GeoCoord {
        GeoCoord::new(31.230416, 121.473701, 0., Datum::Wgs84)
    }

    #[test]
    fn decimal_degrees_form() {
        assert_eq!(decimal_degrees(&shanghai()), "31.230416°N, 121.473701°E");
        let sydney = GeoCoord::new(-33.868, 151.209, 0., Datum::Wgs84);
        assert_eq!(decimal_degrees(&sydney), "33.868000°S, 151.209000°E");
    }

    #[test]
    fn decimal_minutes_form() {
        assert_eq!(
            degrees_decimal_minutes(&shanghai()),
            "31°13.825'N, 121°28.422'E"
        );
    }

    #[test]
    fn minutes_seconds_form() {
        assert_eq!(
            degrees_minutes_seconds(&shanghai()),
            "31°13'49.50\"N, 121°28'25.32\"E"
        );
    }

    #[test]
    fn utm_display() {
        let p = UtmPoint {
            zone: 50,
            band: 'S',
            easting: 447_600.,
            northing: 4_419_300.,
            convergence: 0.,
            scale: 0.9996,
            datum: Datum::Wgs84,
        };
        assert_eq!(p.to_string(), "50S 447600E 4419300N");
    }

    #[test]
    fn mgrs_display_pads_offsets() {
        let p = MgrsPoint {
            zone: 51,
            band: 'R',
            column: 'U',
            row: 'Q',
            easting: 5_444.,
            northing: 56_268.,
            datum: Datum::Wgs84,
        };
        assert_eq!(p.to_string(), "51R UQ 05444 56268");
    }

    #[test]
    fn british_grid_display() {
        let p = BritishGridPoint {
            letters: ['T', 'G'],
            easting: 51_409.,
            northing: 13_177.,
            datum: Datum::Osgb36,
        };
        assert_eq!(p.to_string(), "TG 51409 13177");
    }

    #[test]
    fn japan_grid_display_orders_x_first() {
        let p = JapanGridPoint {
            zone: 9,
            x: -36_258.662,
            y: 32_829.025,
            datum: Datum::Tokyo,
        };
        assert_eq!(p.to_string(), "Zone 9: -36258.662, 32829.025");
    }
}
