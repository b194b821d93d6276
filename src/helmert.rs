//!
//! Seven-parameter Helmert datum shift
//!
//! Shifts run through geocentric Cartesian coordinates: geodetic on the
//! source ellipsoid -> (X, Y, Z) -> linearized Helmert -> geodetic on the
//! target ellipsoid. Missing pairs are represented as an explicit
//! `Identity` rather than all-zero parameters.
//!

use crate::datums::{Datum, DATUM_COUNT};
use crate::ellps::Ellipsoid;
use crate::errors::Result;
use crate::geocent::{geocentric_to_geodetic, geodetic_to_geocentric};
use crate::math::consts::SEC_TO_RAD;

/// Helmert parameters: translations in meters, rotations in arc-seconds,
/// scale in parts per million.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ShiftParams {
    pub dx: f64,
    pub dy: f64,
    pub dz: f64,
    pub rx: f64,
    pub ry: f64,
    pub rz: f64,
    pub scale: f64,
}

impl ShiftParams {
    pub const fn new(dx: f64, dy: f64, dz: f64, rx: f64, ry: f64, rz: f64, scale: f64) -> Self {
        Self {
            dx,
            dy,
            dz,
            rx,
            ry,
            rz,
            scale,
        }
    }

    fn is_zero(&self) -> bool {
        *self == Self::new(0., 0., 0., 0., 0., 0., 0.)
    }

    /// Apply the linearized transform to a geocentric triple.
    fn apply(&self, x: f64, y: f64, z: f64) -> (f64, f64, f64) {
        let sigma = 1. + self.scale * 1.0e-6;
        let rx = self.rx * SEC_TO_RAD;
        let ry = self.ry * SEC_TO_RAD;
        let rz = self.rz * SEC_TO_RAD;
        (
            self.dx + sigma * x + rz * y - ry * z,
            self.dy - rz * x + sigma * y + rx * z,
            self.dz + ry * x - rx * y + sigma * z,
        )
    }

    /// Derive the reverse-direction parameters.
    ///
    /// Scale and rotations negate; translations are rescaled and corrected
    /// to first order for the rotation coupling.
    fn inverse(&self) -> Self {
        let sigma = 1. + self.scale * 1.0e-6;
        let (rx, ry, rz) = (-self.rx, -self.ry, -self.rz);
        let (dx, dy, dz) = (-self.dx / sigma, -self.dy / sigma, -self.dz / sigma);
        let cx = (ry * dz - rz * dy) * SEC_TO_RAD;
        let cy = (rz * dx - rx * dz) * SEC_TO_RAD;
        let cz = (rx * dy - ry * dx) * SEC_TO_RAD;
        Self::new(dx - cx, dy - cy, dz - cz, rx, ry, rz, -self.scale)
    }
}

/// A pair entry of the shift table.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum DatumShift {
    Identity,
    Helmert(ShiftParams),
}

impl DatumShift {
    fn inverse(&self) -> Self {
        match self {
            DatumShift::Identity => DatumShift::Identity,
            DatumShift::Helmert(p) => DatumShift::Helmert(p.inverse()),
        }
    }
}

/// Shift a geographic point (lon, lat in radians, height in meters) from
/// the source ellipsoid to the target ellipsoid.
///
/// Identity entries short-circuit the Cartesian round trip entirely; the
/// caller only rewrites the datum tag.
pub(crate) fn shift_geographic(
    src: &Ellipsoid,
    dst: &Ellipsoid,
    shift: &DatumShift,
    lon: f64,
    lat: f64,
    height: f64,
) -> Result<(f64, f64, f64)> {
    match shift {
        DatumShift::Identity => Ok((lon, lat, height)),
        DatumShift::Helmert(p) => {
            let (x, y, z) = geodetic_to_geocentric(lon, lat, height, src.a, src.es)?;
            let (x, y, z) = p.apply(x, y, z);
            geocentric_to_geodetic(x, y, z, dst.a, dst.es, dst.b)
        }
    }
}

/// Dense per-ordered-pair parameter table.
///
/// Seeded with the default pairs on creation; `set` installs an entry and
/// derives its reverse.
#[derive(Clone)]
pub(crate) struct ShiftTable {
    entries: [[Option<DatumShift>; DATUM_COUNT]; DATUM_COUNT],
}

// Default forward entries, WGS84 -> target
const WGS84_TO_NAD27: ShiftParams = ShiftParams::new(-8., 160., 176., -0.25, 0.75, -0.06, -0.34);
const WGS84_TO_ED50: ShiftParams = ShiftParams::new(-87., -98., -121., -0.59, -0.32, -1.12, -3.72);
const WGS84_TO_TOKYO: ShiftParams = ShiftParams::new(-148., 507., 685., 0., 0., 0., 0.);
const WGS84_TO_OSGB36: ShiftParams =
    ShiftParams::new(-446.448, 125.157, -542.060, -0.1502, -0.2470, -0.8421, 20.4894);

impl ShiftTable {
    pub(crate) fn seeded() -> Self {
        let mut table = Self {
            entries: [[None; DATUM_COUNT]; DATUM_COUNT],
        };
        for d in Datum::ALL {
            table.entries[d.index()][d.index()] = Some(DatumShift::Identity);
        }
        table.set(Datum::Wgs84, Datum::Nad83, DatumShift::Identity);
        table.set(Datum::Wgs84, Datum::MgrsGrid, DatumShift::Identity);
        table.set(Datum::Wgs84, Datum::UtmGrid, DatumShift::Identity);
        table.set(
            Datum::Wgs84,
            Datum::Nad27,
            DatumShift::Helmert(WGS84_TO_NAD27),
        );
        table.set(Datum::Wgs84, Datum::Ed50, DatumShift::Helmert(WGS84_TO_ED50));
        table.set(
            Datum::Wgs84,
            Datum::Tokyo,
            DatumShift::Helmert(WGS84_TO_TOKYO),
        );
        table.set(
            Datum::Wgs84,
            Datum::Osgb36,
            DatumShift::Helmert(WGS84_TO_OSGB36),
        );
        table
    }

    /// Install `shift` for (from, to) and the derived reverse for
    /// (to, from). All-zero parameters collapse to `Identity`.
    pub(crate) fn set(&mut self, from: Datum, to: Datum, shift: DatumShift) {
        let shift = match shift {
            DatumShift::Helmert(p) if p.is_zero() => DatumShift::Identity,
            other => other,
        };
        self.entries[from.index()][to.index()] = Some(shift);
        self.entries[to.index()][from.index()] = Some(shift.inverse());
    }

    pub(crate) fn get(&self, from: Datum, to: Datum) -> Option<DatumShift> {
        self.entries[from.index()][to.index()]
    }
}
