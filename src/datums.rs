//!
//! Datum definitions
//!
//! A datum pairs a reference ellipsoid with an anchoring to the Earth.
//! `MgrsGrid` and `UtmGrid` are grid aliases of WGS84 kept for callers that
//! address output grids as datums; the output grid itself is always selected
//! by the format argument.
//!

use crate::ellipsoids::{constants as ellps, EllipsoidDefn};
use crate::ellps::Ellipsoid;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Datum {
    Wgs84,
    Nad83,
    Nad27,
    Ed50,
    Tokyo,
    Osgb36,
    MgrsGrid,
    UtmGrid,
}

/// Number of datum tags, sizing the [D x D] shift parameter table.
pub(crate) const DATUM_COUNT: usize = 8;

impl Datum {
    pub(crate) const ALL: [Datum; DATUM_COUNT] = [
        Datum::Wgs84,
        Datum::Nad83,
        Datum::Nad27,
        Datum::Ed50,
        Datum::Tokyo,
        Datum::Osgb36,
        Datum::MgrsGrid,
        Datum::UtmGrid,
    ];

    /// Dense index into the shift parameter table.
    pub(crate) const fn index(self) -> usize {
        match self {
            Datum::Wgs84 => 0,
            Datum::Nad83 => 1,
            Datum::Nad27 => 2,
            Datum::Ed50 => 3,
            Datum::Tokyo => 4,
            Datum::Osgb36 => 5,
            Datum::MgrsGrid => 6,
            Datum::UtmGrid => 7,
        }
    }

    const fn defn(self) -> &'static EllipsoidDefn {
        match self {
            Datum::Wgs84 | Datum::MgrsGrid | Datum::UtmGrid => &ellps::WGS84,
            Datum::Nad83 => &ellps::GRS80,
            Datum::Nad27 => &ellps::CLRK66,
            Datum::Ed50 => &ellps::INTL,
            Datum::Tokyo => &ellps::BESSEL,
            Datum::Osgb36 => &ellps::AIRY,
        }
    }

    /// The ellipsoid this datum is anchored on.
    pub fn ellipsoid(self) -> Ellipsoid {
        Ellipsoid::from_defn(self.defn())
    }

    pub const fn id(self) -> &'static str {
        match self {
            Datum::Wgs84 => "WGS84",
            Datum::Nad83 => "NAD83",
            Datum::Nad27 => "NAD27",
            Datum::Ed50 => "ED50",
            Datum::Tokyo => "Tokyo",
            Datum::Osgb36 => "OSGB36",
            Datum::MgrsGrid => "MGRS",
            Datum::UtmGrid => "UTM",
        }
    }

}
