//!
//! Geodetic coordinate transformation library
//!
//! Three families of operations on geographic points:
//!
//! * projection between latitude/longitude and grid formats (UTM, MGRS,
//!   British National Grid, Japan plane-rectangular grid),
//! * datum shifts between reference ellipsoids through a seven-parameter
//!   Helmert transform in geocentric Cartesian space,
//! * geodesic computations (inverse and direct) on the active ellipsoid.
//!
//! A [`Context`] holds the active ellipsoid, the per-pair shift table and
//! the geodesic handle; create one per thread. String parsing of user
//! input is out of scope; the textual output forms live in [`CoordFormat`].
//!

mod context;
mod coord;
mod datums;
mod ellipsoids;
mod ellps;
mod format;
mod geocent;
mod geodesic;
mod helmert;
mod math;
mod projections;

pub mod errors;

// Reexport
pub use context::Context;
pub use coord::GeoCoord;
pub use datums::Datum;
pub use ellps::Ellipsoid;
pub use errors::{Error, Result};
pub use format::CoordFormat;
pub use geodesic::GeodesicResult;
pub use helmert::{DatumShift, ShiftParams};
pub use projections::bng::BritishGridPoint;
pub use projections::jpgrid::JapanGridPoint;
pub use projections::mgrs::MgrsPoint;
pub use projections::utm::{utm_band, utm_zone, UtmPoint};

// log for logging (optional).
#[cfg(feature = "logging")]
use log;

#[cfg(not(feature = "logging"))]
mod log {
    // Use __XXX__ to prevent 'ambiguous name' error
    // when exporting
    macro_rules! __trace__    ( ($($tt:tt)*) => {{}} );
    macro_rules! __debug__    ( ($($tt:tt)*) => {{}} );
    macro_rules! __error__    ( ($($tt:tt)*) => {{}} );
    macro_rules! __info__     ( ($($tt:tt)*) => {{}} );
    macro_rules! __warn__     ( ($($tt:tt)*) => {{}} );

    #[allow(unused_imports)]
    pub(crate) use {
        __debug__ as debug, __error__ as error, __info__ as info, __trace__ as trace,
        __warn__ as warn,
    };
}
