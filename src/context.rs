//!
//! Transform context
//!
//! Per-instance holder of the active ellipsoid, the per-pair datum shift
//! table and the geodesic handle. A context is single-threaded; callers
//! wanting concurrency create one per thread.
//!

use crate::coord::GeoCoord;
use crate::datums::Datum;
use crate::ellps::Ellipsoid;
use crate::errors::{Error, Result};
use crate::format::{format_coord, CoordFormat};
use crate::geodesic::{GeodesicResult, Solver};
use crate::helmert::{shift_geographic, DatumShift, ShiftParams, ShiftTable};
use crate::log;
use crate::projections::bng::{self, BritishGridPoint};
use crate::projections::jpgrid::{self, JapanGridPoint};
use crate::projections::mgrs::{self, MgrsPoint};
use crate::projections::utm::{self, UtmPoint};

type ErrorSink = Box<dyn Fn(&Error) + Send + Sync>;

pub struct Context {
    datum: Datum,
    ellps: Ellipsoid,
    shifts: ShiftTable,
    solver: Solver,
    error_sink: Option<ErrorSink>,
}

impl Default for Context {
    fn default() -> Self {
        Self::new()
    }
}

impl Context {
    /// A fresh context on WGS84 with the default shift table.
    pub fn new() -> Self {
        Self::with_datum(Datum::Wgs84)
    }

    pub fn with_datum(datum: Datum) -> Self {
        let ellps = datum.ellipsoid();
        let solver = Solver::new(&ellps);
        Self {
            datum,
            ellps,
            shifts: ShiftTable::seeded(),
            solver,
            error_sink: None,
        }
    }

    pub fn datum(&self) -> Datum {
        self.datum
    }

    pub fn ellipsoid(&self) -> &Ellipsoid {
        &self.ellps
    }

    /// Switch the active datum. The active ellipsoid and the geodesic
    /// handle follow.
    pub fn set_datum(&mut self, datum: Datum) {
        self.datum = datum;
        self.ellps = datum.ellipsoid();
        self.solver = Solver::new(&self.ellps);
    }

    /// Override the active ellipsoid with custom axes and re-initialize
    /// the geodesic handle. Fails with `InvalidInput` unless a > 0 and
    /// 0 < f < 1.
    pub fn set_custom_ellipsoid(&mut self, a: f64, f: f64) -> Result<()> {
        let result = Ellipsoid::new(a, f).map(|ellps| {
            self.solver = Solver::new(&ellps);
            self.ellps = ellps;
        });
        self.notify(result)
    }

    /// Install a sink notified of every failure crossing the public entry
    /// points. Must be thread-safe; there is no process-global fallback.
    pub fn set_error_sink(&mut self, sink: impl Fn(&Error) + Send + Sync + 'static) {
        self.error_sink = Some(Box::new(sink));
    }

    pub fn clear_error_sink(&mut self) {
        self.error_sink = None;
    }

    fn notify<T>(&self, result: Result<T>) -> Result<T> {
        if let (Err(err), Some(sink)) = (&result, &self.error_sink) {
            sink(err);
        }
        result
    }

    /// Active ellipsoid for the active datum, registry ellipsoid otherwise.
    fn ellipsoid_for(&self, datum: Datum) -> Ellipsoid {
        if datum == self.datum {
            self.ellps.clone()
        } else {
            datum.ellipsoid()
        }
    }

    // ----------------
    // Datum shifts
    // ----------------

    /// Install Helmert parameters for an ordered pair; the reverse entry
    /// is derived and stored as well. All-zero parameters register the
    /// pair as identical datums.
    pub fn set_shift_params(&mut self, from: Datum, to: Datum, params: ShiftParams) {
        self.shifts.set(from, to, DatumShift::Helmert(params));
    }

    pub fn shift_params(&self, from: Datum, to: Datum) -> Option<DatumShift> {
        self.shifts.get(from, to)
    }

    /// Shift a point to another datum through geocentric Cartesian
    /// coordinates. Identity pairs only rewrite the datum tag; pairs
    /// without a direct entry chain through WGS84.
    pub fn convert_datum(&self, coord: &GeoCoord, to: Datum) -> Result<GeoCoord> {
        let result = self.convert_datum_inner(coord, to);
        self.notify(result)
    }

    pub(crate) fn convert_datum_inner(&self, coord: &GeoCoord, to: Datum) -> Result<GeoCoord> {
        if coord.datum == to {
            return Ok(*coord);
        }
        if let Some(DatumShift::Identity) = self.shifts.get(coord.datum, to) {
            return Ok(coord.with_datum(to));
        }

        let src = self.ellipsoid_for(coord.datum);
        let dst = self.ellipsoid_for(to);
        let lon = coord.longitude.to_radians();
        let lat = coord.latitude.to_radians();
        let alt = coord.altitude;

        let (lon, lat, alt) = match self.shifts.get(coord.datum, to) {
            Some(shift) => shift_geographic(&src, &dst, &shift, lon, lat, alt)?,
            None => {
                // No direct pair: pivot through WGS84 geocentric space
                log::debug!("no direct shift {:?} -> {:?}, going through WGS84", coord.datum, to);
                let leg1 = self
                    .shifts
                    .get(coord.datum, Datum::Wgs84)
                    .ok_or(Error::DatumTransform)?;
                let leg2 = self
                    .shifts
                    .get(Datum::Wgs84, to)
                    .ok_or(Error::DatumTransform)?;
                let wgs = self.ellipsoid_for(Datum::Wgs84);
                let (lon, lat, alt) = shift_geographic(&src, &wgs, &leg1, lon, lat, alt)?;
                shift_geographic(&wgs, &dst, &leg2, lon, lat, alt)?
            }
        };
        Ok(GeoCoord::new(lat.to_degrees(), lon.to_degrees(), alt, to))
    }

    // ----------------
    // Grid projections
    // ----------------

    pub fn to_utm(&self, coord: &GeoCoord) -> Result<UtmPoint> {
        let result = utm::to_utm(&self.ellipsoid_for(coord.datum), coord);
        self.notify(result)
    }

    pub fn from_utm(&self, point: &UtmPoint) -> Result<GeoCoord> {
        let result = utm::from_utm(&self.ellipsoid_for(point.datum), point);
        self.notify(result)
    }

    pub fn to_mgrs(&self, coord: &GeoCoord) -> Result<MgrsPoint> {
        let result = utm::to_utm(&self.ellipsoid_for(coord.datum), coord)
            .and_then(|utm| mgrs::encode(&utm));
        self.notify(result)
    }

    pub fn from_mgrs(&self, point: &MgrsPoint) -> Result<GeoCoord> {
        let ellps = self.ellipsoid_for(point.datum);
        let result = mgrs::decode(&ellps, point).and_then(|utm| utm::from_utm(&ellps, &utm));
        self.notify(result)
    }

    /// Project to the British grid; the input is shifted to OSGB36 first,
    /// whatever its datum.
    pub fn to_british_grid(&self, coord: &GeoCoord) -> Result<BritishGridPoint> {
        let result = self
            .convert_datum_inner(coord, Datum::Osgb36)
            .and_then(|shifted| bng::to_grid(&shifted));
        self.notify(result)
    }

    /// Invert a British grid reference and shift the result to the
    /// requested output datum.
    pub fn from_british_grid(&self, point: &BritishGridPoint, datum: Datum) -> Result<GeoCoord> {
        let result = bng::from_grid(point)
            .and_then(|geo| self.convert_datum_inner(&geo, datum));
        self.notify(result)
    }

    /// Project to the Japan plane-rectangular grid; the input is shifted
    /// to the Tokyo datum first, whatever its datum.
    pub fn to_japan_grid(&self, coord: &GeoCoord) -> Result<JapanGridPoint> {
        let result = self
            .convert_datum_inner(coord, Datum::Tokyo)
            .and_then(|shifted| jpgrid::to_grid(&shifted));
        self.notify(result)
    }

    /// Invert a Japan grid point and shift the result to the requested
    /// output datum.
    pub fn from_japan_grid(&self, point: &JapanGridPoint, datum: Datum) -> Result<GeoCoord> {
        let result = jpgrid::from_grid(point)
            .and_then(|geo| self.convert_datum_inner(&geo, datum));
        self.notify(result)
    }

    // ----------------
    // Geodesics
    // ----------------

    /// Geodesic distance and azimuths; `p2` is shifted onto `p1`'s datum
    /// first when they differ.
    pub fn distance(&self, p1: &GeoCoord, p2: &GeoCoord) -> Result<(f64, f64, f64)> {
        self.geodesic_inverse(p1, p2)
            .map(|r| (r.distance, r.azimuth1, r.azimuth2))
    }

    pub fn geodesic_inverse(&self, p1: &GeoCoord, p2: &GeoCoord) -> Result<GeodesicResult> {
        let result = (|| {
            let p2 = if p2.datum != p1.datum {
                self.convert_datum_inner(p2, p1.datum)?
            } else {
                *p2
            };
            let (distance, azimuth1, azimuth2) =
                self.solver
                    .inverse(p1.latitude, p1.longitude, p2.latitude, p2.longitude);
            Ok(GeodesicResult {
                distance,
                azimuth1,
                azimuth2,
            })
        })();
        self.notify(result)
    }

    /// Destination from a start point, azimuth in degrees and
    /// non-negative distance in meters. The result stays on the start's
    /// datum.
    pub fn geodesic_direct(&self, start: &GeoCoord, azimuth: f64, distance: f64) -> Result<GeoCoord> {
        let result = (|| {
            if !(distance >= 0.) {
                return Err(Error::InvalidInput("negative geodesic distance"));
            }
            if !azimuth.is_finite() {
                return Err(Error::InvalidInput("non-finite azimuth"));
            }
            let (lat, lon, _azi2) =
                self.solver
                    .direct(start.latitude, start.longitude, azimuth, distance);
            Ok(GeoCoord::new(lat, lon, start.altitude, start.datum))
        })();
        self.notify(result)
    }

    // ----------------
    // Dispatcher
    // ----------------

    /// Shift to the target datum if needed, project for the target format
    /// and serialize. Every step reports to the error sink on its own.
    pub fn format(&self, coord: &GeoCoord, format: CoordFormat, datum: Datum) -> Result<String> {
        format_coord(self, coord, format, datum)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use std::sync::atomic::{AtomicU32, Ordering};
    use std::sync::Arc;

    #[test]
    fn identity_pairs_only_retag() {
        let ctx = Context::new();
        let coord = GeoCoord::new(31.230416, 121.473701, 12.5, Datum::Wgs84);
        let shifted = ctx.convert_datum(&coord, Datum::Nad83).unwrap();
        assert_eq!(shifted.datum, Datum::Nad83);
        assert_eq!(shifted.latitude, coord.latitude);
        assert_eq!(shifted.longitude, coord.longitude);
        assert_eq!(shifted.altitude, coord.altitude);
    }

    #[test]
    fn datum_round_trips() {
        let ctx = Context::new();
        let coord = GeoCoord::new(31.230416, 121.473701, 0., Datum::Wgs84);
        for datum in [Datum::Nad27, Datum::Ed50, Datum::Tokyo, Datum::Osgb36] {
            let there = ctx.convert_datum(&coord, datum).unwrap();
            let back = ctx.convert_datum(&there, Datum::Wgs84).unwrap();
            assert_abs_diff_eq!(back.latitude, coord.latitude, epsilon = 1e-6);
            assert_abs_diff_eq!(back.longitude, coord.longitude, epsilon = 1e-6);
        }
    }

    #[test]
    fn cross_pair_chains_through_wgs84() {
        let ctx = Context::new();
        let coord = GeoCoord::new(48.85, 2.35, 0., Datum::Ed50);
        let direct = ctx.convert_datum(&coord, Datum::Osgb36).unwrap();
        // Same journey spelled out by hand
        let wgs = ctx.convert_datum(&coord, Datum::Wgs84).unwrap();
        let manual = ctx.convert_datum(&wgs, Datum::Osgb36).unwrap();
        assert_abs_diff_eq!(direct.latitude, manual.latitude, epsilon = 1e-12);
        assert_abs_diff_eq!(direct.longitude, manual.longitude, epsilon = 1e-12);
    }

    #[test]
    fn custom_ellipsoid_validation() {
        let mut ctx = Context::new();
        assert!(ctx.set_custom_ellipsoid(6_378_388., 1. / 297.).is_ok());
        assert_eq!(ctx.ellipsoid().a, 6_378_388.);
        let err = ctx.set_custom_ellipsoid(-1., 0.5).unwrap_err();
        assert_eq!(err.code(), 1);
        // The failed call leaves the previous override in place
        assert_eq!(ctx.ellipsoid().a, 6_378_388.);
    }

    #[test]
    fn error_sink_sees_failures() {
        let hits = Arc::new(AtomicU32::new(0));
        let mut ctx = Context::new();
        let counter = hits.clone();
        ctx.set_error_sink(move |_| {
            counter.fetch_add(1, Ordering::SeqCst);
        });
        let start = GeoCoord::new(0., 0., 0., Datum::Wgs84);
        assert!(ctx.geodesic_direct(&start, 45., -1.).is_err());
        assert!(ctx.set_custom_ellipsoid(0., 0.5).is_err());
        assert_eq!(hits.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn set_shift_params_installs_both_directions() {
        let mut ctx = Context::new();
        ctx.set_shift_params(
            Datum::Nad27,
            Datum::Tokyo,
            ShiftParams::new(10., -20., 30., 0.1, -0.2, 0.3, 1.5),
        );
        assert!(matches!(
            ctx.shift_params(Datum::Nad27, Datum::Tokyo),
            Some(DatumShift::Helmert(_))
        ));
        assert!(matches!(
            ctx.shift_params(Datum::Tokyo, Datum::Nad27),
            Some(DatumShift::Helmert(_))
        ));
    }

    #[test]
    fn geodesic_follows_active_ellipsoid() {
        let mut ctx = Context::new();
        let p1 = GeoCoord::new(0., 0., 0., Datum::Wgs84);
        let p2 = GeoCoord::new(0., 1., 0., Datum::Wgs84);
        let (d_wgs, _, _) = ctx.distance(&p1, &p2).unwrap();
        // A 1% smaller planet shortens every distance
        ctx.set_custom_ellipsoid(6_378_137. * 0.99, 1. / 298.257_223_563)
            .unwrap();
        let (d_small, _, _) = ctx.distance(&p1, &p2).unwrap();
        assert_abs_diff_eq!(d_small / d_wgs, 0.99, epsilon = 1e-6);
    }
}
