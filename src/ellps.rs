//!
//! Derived values for ellipsoids
//!
//! A definition provides the size (semi-major axis) and shape (reverse
//! flattening) parameters; everything else the projection and datum-shift
//! cores need is derived once here.
//!

use crate::ellipsoids::EllipsoidDefn;
use crate::errors::{Error, Result};

#[derive(Clone, Debug, PartialEq)]
pub struct Ellipsoid {
    /// Semi-major axis (m)
    pub a: f64,
    /// Semi-minor axis (m)
    pub b: f64,
    /// First flattening
    pub f: f64,
    /// Reverse flattening
    pub rf: f64,
    /// First eccentricity
    pub e: f64,
    /// First eccentricity squared
    pub es: f64,
    /// Second eccentricity squared
    pub ep2: f64,
    /// Display name
    pub name: &'static str,
}

impl Ellipsoid {
    /// Derive the full parameter set from `a` and `f`.
    ///
    /// Fails with `InvalidInput` unless a > 0 and 0 < f < 1.
    pub fn new(a: f64, f: f64) -> Result<Self> {
        if !(a > 0. && a.is_finite()) {
            return Err(Error::InvalidInput("Invalid major axis"));
        }
        if !(f > 0. && f < 1.) {
            return Err(Error::InvalidInput("Invalid flattening"));
        }
        let es = 2. * f - f * f;
        Ok(Self {
            a,
            b: a * (1. - f),
            f,
            rf: 1. / f,
            e: es.sqrt(),
            es,
            ep2: es / (1. - es),
            name: "Custom",
        })
    }

    pub(crate) fn from_defn(defn: &EllipsoidDefn) -> Self {
        // Registry entries are all well-formed
        let mut ellps = Self::new(defn.a, 1. / defn.rf).unwrap();
        ellps.name = defn.id;
        ellps
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ellipsoids::constants;
    use approx::assert_abs_diff_eq;

    #[test]
    fn wgs84_derived() {
        let e = Ellipsoid::from_defn(&constants::WGS84);
        assert_abs_diff_eq!(e.b, 6_356_752.314_245_18, epsilon = 1e-6);
        assert_abs_diff_eq!(e.es, 0.006_694_379_990_141_3, epsilon = 1e-15);
        assert_abs_diff_eq!(e.ep2, 0.006_739_496_742_276_4, epsilon = 1e-15);
    }

    #[test]
    fn rejects_degenerate_shapes() {
        assert!(Ellipsoid::new(0., 1. / 298.).is_err());
        assert!(Ellipsoid::new(-6378137., 1. / 298.).is_err());
        assert!(Ellipsoid::new(6378137., 0.).is_err());
        assert!(Ellipsoid::new(6378137., 1.).is_err());
    }
}
