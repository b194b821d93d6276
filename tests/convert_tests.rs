//!
//! End-to-end conversion scenarios
//!
use approx::assert_abs_diff_eq;
use geotrans::{Context, CoordFormat, Datum, GeoCoord, UtmPoint};

fn shanghai() -> GeoCoord {
    GeoCoord::new(31.230416, 121.473701, 0., Datum::Wgs84)
}

fn beijing() -> GeoCoord {
    GeoCoord::new(39.904211, 116.407394, 0., Datum::Wgs84)
}

#[test]
fn shanghai_utm_zone_and_band() {
    let ctx = Context::new();
    let utm = ctx.to_utm(&shanghai()).unwrap();
    assert_eq!(utm.zone, 51);
    assert_eq!(utm.band, 'R');
}

#[test]
fn shanghai_mgrs_designator() {
    let ctx = Context::new();
    let mgrs = ctx.to_mgrs(&shanghai()).unwrap();
    assert_eq!(mgrs.zone, 51);
    assert_eq!(mgrs.band, 'R');
    let text = ctx
        .format(&shanghai(), CoordFormat::Mgrs, Datum::Wgs84)
        .unwrap();
    assert!(text.starts_with("51R "), "got {text}");
}

#[test]
fn shanghai_to_beijing_distance() {
    let ctx = Context::new();
    let (d, _, _) = ctx.distance(&shanghai(), &beijing()).unwrap();
    assert_abs_diff_eq!(d, 1_067_000., epsilon = 2_000.);
}

#[test]
fn utm_reference_lands_near_beijing() {
    let ctx = Context::new();
    // "50N 447600E 4419300N", band letter resolved to the 39.9N band
    let utm = UtmPoint {
        zone: 50,
        band: 'S',
        easting: 447_600.,
        northing: 4_419_300.,
        convergence: 0.,
        scale: 0.9996,
        datum: Datum::Wgs84,
    };
    let geo = ctx.from_utm(&utm).unwrap();
    assert_abs_diff_eq!(geo.latitude, 39.90, epsilon = 0.05);
    assert_abs_diff_eq!(geo.longitude, 116.41, epsilon = 0.05);
}

#[test]
fn direct_from_shanghai() {
    let ctx = Context::new();
    let end = ctx.geodesic_direct(&shanghai(), 45., 100_000.).unwrap();
    assert_abs_diff_eq!(end.latitude, 31.86, epsilon = 0.05);
    assert_abs_diff_eq!(end.longitude, 122.22, epsilon = 0.05);
    assert_eq!(end.datum, Datum::Wgs84);
}

#[test]
fn utm_round_trip_sweep() {
    let ctx = Context::new();
    let mut lat = -79.;
    while lat < 84. {
        let mut lon = -177.;
        while lon < 180. {
            let coord = GeoCoord::new(lat, lon, 0., Datum::Wgs84);
            let utm = ctx.to_utm(&coord).unwrap();
            let back = ctx.from_utm(&utm).unwrap();
            assert_abs_diff_eq!(back.latitude, lat, epsilon = 1e-7);
            assert_abs_diff_eq!(back.longitude, lon, epsilon = 1e-7);
            lon += 17.;
        }
        lat += 7.;
    }
}

#[test]
fn mgrs_round_trip_sweep() {
    let ctx = Context::new();
    let mut lat = -79.;
    while lat < 84. {
        let mut lon = -177.;
        while lon < 180. {
            let coord = GeoCoord::new(lat, lon, 0., Datum::Wgs84);
            let mgrs = ctx.to_mgrs(&coord).unwrap();
            let back = ctx.from_mgrs(&mgrs).unwrap();
            // Within one meter of ground distance
            let (d, _, _) = ctx.distance(&coord, &back).unwrap();
            assert!(d < 1., "({lat}, {lon}) came back {d} m away");
            lon += 17.;
        }
        lat += 7.;
    }
}

#[test]
fn wgs84_to_nad27_offset_magnitude() {
    let ctx = Context::new();
    let shifted = ctx.convert_datum(&shanghai(), Datum::Nad27).unwrap();
    // Compare the numeric positions on the same sphere of reference
    let renamed = GeoCoord::new(shifted.latitude, shifted.longitude, 0., Datum::Wgs84);
    let (offset, _, _) = ctx.distance(&shanghai(), &renamed).unwrap();
    assert_abs_diff_eq!(offset, 280., epsilon = 50.);
}

#[test]
fn datum_round_trips_stay_put() {
    let ctx = Context::new();
    for datum in [Datum::Nad27, Datum::Ed50, Datum::Tokyo, Datum::Osgb36] {
        let there = ctx.convert_datum(&shanghai(), datum).unwrap();
        let back = ctx.convert_datum(&there, Datum::Wgs84).unwrap();
        assert_abs_diff_eq!(back.latitude, shanghai().latitude, epsilon = 1e-6);
        assert_abs_diff_eq!(back.longitude, shanghai().longitude, epsilon = 1e-6);
    }
}

#[test]
fn british_grid_from_any_datum() {
    let ctx = Context::new();
    // Trafalgar Square, WGS84; the projector shifts to OSGB36 internally
    let london = GeoCoord::new(51.50807, -0.12804, 0., Datum::Wgs84);
    let grid = ctx.to_british_grid(&london).unwrap();
    assert_eq!(grid.datum, Datum::Osgb36);
    assert_eq!(grid.letters, ['T', 'Q']);
    let back = ctx.from_british_grid(&grid, Datum::Wgs84).unwrap();
    assert_eq!(back.datum, Datum::Wgs84);
    assert_abs_diff_eq!(back.latitude, london.latitude, epsilon = 1e-5);
    assert_abs_diff_eq!(back.longitude, london.longitude, epsilon = 1e-5);
}

#[test]
fn japan_grid_from_any_datum() {
    let ctx = Context::new();
    let tokyo_station = GeoCoord::new(35.681236, 139.767125, 0., Datum::Wgs84);
    let grid = ctx.to_japan_grid(&tokyo_station).unwrap();
    assert_eq!(grid.zone, 9);
    assert_eq!(grid.datum, Datum::Tokyo);
    let back = ctx.from_japan_grid(&grid, Datum::Wgs84).unwrap();
    assert_abs_diff_eq!(back.latitude, tokyo_station.latitude, epsilon = 1e-5);
    assert_abs_diff_eq!(back.longitude, tokyo_station.longitude, epsilon = 1e-5);
}

#[test]
fn dispatcher_text_forms() {
    let ctx = Context::new();
    let dd = ctx
        .format(&shanghai(), CoordFormat::DecimalDegrees, Datum::Wgs84)
        .unwrap();
    assert_eq!(dd, "31.230416°N, 121.473701°E");
    let utm = ctx
        .format(&shanghai(), CoordFormat::Utm, Datum::Wgs84)
        .unwrap();
    assert!(utm.starts_with("51R "), "got {utm}");
    assert!(utm.ends_with('N'), "got {utm}");
    let jp = ctx
        .format(&shanghai(), CoordFormat::JapanGrid, Datum::Wgs84)
        .unwrap();
    assert!(jp.starts_with("Zone "), "got {jp}");
}

#[test]
fn stable_error_codes_cross_the_api() {
    let ctx = Context::new();
    let bad_zone = UtmPoint {
        zone: 0,
        band: 'R',
        easting: 500_000.,
        northing: 3_456_000.,
        convergence: 0.,
        scale: 0.9996,
        datum: Datum::Wgs84,
    };
    assert_eq!(ctx.from_utm(&bad_zone).unwrap_err().code(), 7);

    let mut ctx = Context::new();
    assert_eq!(ctx.set_custom_ellipsoid(1., 2.).unwrap_err().code(), 1);
}
