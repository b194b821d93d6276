//!
//! Transverse Mercator core
//!
//! Gauss-Krueger series to 6th order in the longitude difference from the
//! central meridian, parameterized by ellipsoid, central meridian, scale
//! factor, false offsets and latitude of origin. UTM, the British grid and
//! the Japan grid all project through this one core.
//!

use crate::ellps::Ellipsoid;
use crate::errors::{Error, Result};
use crate::math::{
    adjlon,
    consts::{EPS_10, FRAC_PI_2},
    footpoint, marc, marc_coefs, Marc,
};

#[derive(Debug)]
pub(crate) struct Projection {
    a: f64,
    es: f64,
    esp: f64,
    k0: f64,
    lam0: f64,
    x0: f64,
    y0: f64,
    ml0: f64,
    en: Marc,
}

impl Projection {
    /// Set up the series for one (ellipsoid, origin) combination.
    /// `lam0`/`phi0` in radians, offsets in meters.
    pub fn new(ellps: &Ellipsoid, lam0: f64, phi0: f64, k0: f64, x0: f64, y0: f64) -> Self {
        let en = marc_coefs(ellps.es);
        Self {
            a: ellps.a,
            es: ellps.es,
            esp: ellps.ep2,
            k0,
            lam0,
            x0,
            y0,
            ml0: marc(phi0, ellps.a, en),
            en,
        }
    }

    /// Project (lon, lat) in radians to (easting, northing) in meters,
    /// false offsets included.
    pub fn forward(&self, lon: f64, lat: f64) -> Result<(f64, f64)> {
        let lam = adjlon(lon - self.lam0);
        // The series is garbage past a quarter turn from the central meridian
        if !(-FRAC_PI_2..=FRAC_PI_2).contains(&lam) {
            return Err(Error::OutOfRange("longitude too far from central meridian"));
        }

        let (sinphi, cosphi) = lat.sin_cos();
        let t = if cosphi.abs() > EPS_10 {
            sinphi / cosphi
        } else {
            0.
        };
        let t2 = t * t;
        let c = self.esp * cosphi * cosphi;
        let al = lam * cosphi;
        let als = al * al;
        let n = self.a / (1. - self.es * sinphi * sinphi).sqrt();
        let m = marc(lat, self.a, self.en);

        let easting = self.x0
            + self.k0
                * n
                * al
                * (1. + als / 6.
                    * (1. - t2 + c
                        + als / 20. * (5. - 18. * t2 + t2 * t2 + 72. * c - 58. * self.esp)));
        let northing = self.y0
            + self.k0
                * (m - self.ml0
                    + n * t * als / 2.
                        * (1. + als / 12.
                            * (5. - t2 + 9. * c + 4. * c * c
                                + als / 30.
                                    * (61. - 58. * t2 + t2 * t2 + 600. * c - 330. * self.esp))));
        Ok((easting, northing))
    }

    /// Invert (easting, northing) in meters to (lon, lat) in radians via
    /// the footpoint latitude.
    pub fn inverse(&self, easting: f64, northing: f64) -> Result<(f64, f64)> {
        let x = easting - self.x0;
        let y = northing - self.y0;

        let m = self.ml0 + y / self.k0;
        let phi1 = footpoint(m, self.a, self.es, self.en);
        if phi1.abs() >= FRAC_PI_2 {
            // At the poles the longitude degenerates to the central meridian
            let lat = if y < 0. { -FRAC_PI_2 } else { FRAC_PI_2 };
            return Ok((self.lam0, lat));
        }

        let (sinphi, cosphi) = phi1.sin_cos();
        let t1 = sinphi / cosphi;
        let t1s = t1 * t1;
        let c1 = self.esp * cosphi * cosphi;
        let con = 1. - self.es * sinphi * sinphi;
        let n1 = self.a / con.sqrt();
        let r1 = n1 * (1. - self.es) / con;
        let d = x / (n1 * self.k0);
        let ds = d * d;

        let lat = phi1
            - (n1 * t1 / r1)
                * (ds / 2.
                    * (1. - ds / 12.
                        * (5. + 3. * t1s + 10. * c1 - 4. * c1 * c1 - 9. * self.esp
                            - ds / 30.
                                * (61. + 90. * t1s + 298. * c1 + 45. * t1s * t1s
                                    - 252. * self.esp
                                    - 3. * c1 * c1))));
        let lon = adjlon(
            self.lam0
                + d * (1. - ds / 6.
                    * (1. + 2. * t1s + c1
                        - ds / 20.
                            * (5. - 2. * c1 + 28. * t1s - 3. * c1 * c1
                                + 8. * self.esp
                                + 24. * t1s * t1s)))
                    / cosphi,
        );
        Ok((lon, lat))
    }

    /// Meridian convergence (radians) and point scale factor at (lon, lat).
    pub fn convergence_scale(&self, lon: f64, lat: f64) -> (f64, f64) {
        let lam = adjlon(lon - self.lam0);
        let (sinphi, cosphi) = lat.sin_cos();
        let t = if cosphi.abs() > EPS_10 {
            sinphi / cosphi
        } else {
            0.
        };
        let t2 = t * t;
        let c = self.esp * cosphi * cosphi;
        let al = lam * cosphi;
        let als = al * al;

        let gamma = t * al * (1. + als / 3. * (1. + 3. * c + 2. * c * c) + als * als / 15. * (2. - t2));
        let k = self.k0
            * (1. + als / 2. * (1. + c)
                + als * als / 24. * (5. - 4. * t2 + 42. * c + 13. * c * c - 28. * self.esp)
                + als * als * als / 720. * (61. - 148. * t2 + 16. * t2 * t2));
        (gamma, k)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::datums::Datum;
    use approx::assert_abs_diff_eq;

    fn utm_zone17_north() -> Projection {
        let ellps = Datum::Wgs84.ellipsoid();
        Projection::new(&ellps, (-81.0_f64).to_radians(), 0., 0.9996, 500_000., 0.)
    }

    #[test]
    fn cn_tower() {
        // 43 38'33.24"N 79 23'13.7"W is 17T 630084 4833438
        let p = utm_zone17_north();
        let (e, n) = p
            .forward((-79.387139_f64).to_radians(), 43.642567_f64.to_radians())
            .unwrap();
        assert_abs_diff_eq!(e, 630_084., epsilon = 1.0);
        assert_abs_diff_eq!(n, 4_833_438., epsilon = 1.0);
    }

    #[test]
    fn round_trip_across_the_zone() {
        let p = utm_zone17_north();
        for lat in [-75., -33.87, -0.5, 0., 7.3, 43.64, 71.9, 83.5] {
            for dlon in [-3., -1.2, 0., 0.7, 3.] {
                let lon = (-81.0 + dlon as f64).to_radians();
                let lat = (lat as f64).to_radians();
                let (e, n) = p.forward(lon, lat).unwrap();
                let (lon2, lat2) = p.inverse(e, n).unwrap();
                assert_abs_diff_eq!(lon2.to_degrees(), lon.to_degrees(), epsilon = 1e-7);
                assert_abs_diff_eq!(lat2.to_degrees(), lat.to_degrees(), epsilon = 1e-7);
            }
        }
    }

    #[test]
    fn central_meridian_is_straight() {
        let p = utm_zone17_north();
        let (e, n) = p.forward((-81.0_f64).to_radians(), 45_f64.to_radians()).unwrap();
        assert_abs_diff_eq!(e, 500_000., epsilon = 1e-6);
        assert!(n > 0.);
        // No convergence and nominal scale on the central meridian
        let (gamma, k) = p.convergence_scale((-81.0_f64).to_radians(), 45_f64.to_radians());
        assert_abs_diff_eq!(gamma, 0., epsilon = 1e-12);
        assert_abs_diff_eq!(k, 0.9996, epsilon = 1e-12);
    }

    #[test]
    fn rejects_far_longitudes() {
        let p = utm_zone17_north();
        assert!(p.forward(99_f64.to_radians(), 0.5).is_err());
    }

    #[test]
    fn southern_latitudes_project_negative() {
        let p = utm_zone17_north();
        let (_, n) = p
            .forward((-81.0_f64).to_radians(), (-10.0_f64).to_radians())
            .unwrap();
        assert!(n < 0.);
    }
}
