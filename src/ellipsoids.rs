//!
//! Reference ellipsoid definitions
//!

/// A named ellipsoid is defined by its semi-major axis and its
/// reverse flattening
pub struct EllipsoidDefn {
    pub id: &'static str,
    pub a: f64,
    pub rf: f64,
}

#[rustfmt::skip]
pub mod constants {
    use super::*;

    macro_rules! ellps {
        ($name:ident, $id:expr, $a:expr, $rf:expr $(,)?) => {
            pub(crate) const $name: EllipsoidDefn = EllipsoidDefn {
                id: $id,
                a: $a,
                rf: $rf,
            };
        };
    }

    ellps!(WGS84,  "WGS 84",             6_378_137.,     298.257_223_563);
    ellps!(GRS80,  "GRS 1980",           6_378_137.,     298.257_222_101);
    ellps!(CLRK66, "Clarke 1866",        6_378_206.4,    294.978_698_2);
    ellps!(INTL,   "International 1924", 6_378_388.,     297.);
    ellps!(BESSEL, "Bessel 1841",        6_377_397.155,  299.152_812_8);
    ellps!(AIRY,   "Airy 1830",          6_377_563.396,  299.324_964_6);
}
