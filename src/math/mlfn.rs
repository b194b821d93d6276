//!
//! Meridional arc distance and footpoint latitude
//!

/// Series coefficients for the meridional arc, precomputed per ellipsoid
pub(crate) type Marc = (f64, f64, f64, f64);

/// Meridional-arc series coefficients in the first eccentricity squared.
/// 6th order, accurate to well under a millimeter for Earth-sized axes.
pub(crate) fn marc_coefs(es: f64) -> Marc {
    let es2 = es * es;
    let es3 = es2 * es;
    (
        1. - es / 4. - 3. * es2 / 64. - 5. * es3 / 256.,
        3. * es / 8. + 3. * es2 / 32. + 45. * es3 / 1024.,
        15. * es2 / 256. + 45. * es3 / 1024.,
        35. * es3 / 3072.,
    )
}

/// Meridional arc length in meters from the equator to latitude `phi` on
/// the ellipsoid with semi-major axis `a`.
pub(crate) fn marc(phi: f64, a: f64, en: Marc) -> f64 {
    a * (en.0 * phi - en.1 * (2. * phi).sin() + en.2 * (4. * phi).sin() - en.3 * (6. * phi).sin())
}

/// Footpoint latitude: the latitude on the central meridian whose
/// meridional arc equals `m`. Direct series in e1, no iteration.
pub(crate) fn footpoint(m: f64, a: f64, es: f64, en: Marc) -> f64 {
    let mu = m / (a * en.0);
    let sqrt_one_es = (1. - es).sqrt();
    let e1 = (1. - sqrt_one_es) / (1. + sqrt_one_es);
    let e1_2 = e1 * e1;
    let e1_3 = e1_2 * e1;
    let e1_4 = e1_3 * e1;

    mu + (3. * e1 / 2. - 27. * e1_3 / 32.) * (2. * mu).sin()
        + (21. * e1_2 / 16. - 55. * e1_4 / 32.) * (4. * mu).sin()
        + (151. * e1_3 / 96.) * (6. * mu).sin()
        + (1097. * e1_4 / 512.) * (8. * mu).sin()
}
