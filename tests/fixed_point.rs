use edgefill::*;

#[test]
fn fdot6_rounding_and_division() {
    assert_eq!(fdot6_round(32), 1);
    assert_eq!(fdot6_round(31), 0);
    assert_eq!(fdot6_round(-32), 0);
    assert_eq!(fdot6_floor(-1), -1);
    assert_eq!(fdot6_ceil(1), 1);
    assert_eq!(fdot6_ceil(64), 1);

    assert!(matches!(fdot6_div(64, 0), Err(RasterError::DivideByZero)));
    assert_eq!(fdot6_div(64, 64).unwrap(), FIXED_ONE);
    assert_eq!(fdot6_div(-64, 128).unwrap(), -FIXED_HALF);
}

#[test]
fn conversions() {
    assert_eq!(int_to_fdot6(5), 5 * 64);
    assert_eq!(fdot6_to_fixed(FDOT6_ONE), FIXED_ONE);
    assert_eq!(fixed_to_fdot6(FIXED_ONE), FDOT6_ONE);
    assert_eq!(scalar_to_fdot6(1.5, 0), 96);
    assert_eq!(scalar_to_fdot6(1.5, 2), 384);
    assert_eq!(fixed_round_to_int(FIXED_HALF), 1);
    assert_eq!(fixed_round_to_int(FIXED_HALF - 1), 0);
    assert_eq!(fixed_floor_to_int(-1), -1);
    assert_eq!(fixed_mul(FIXED_HALF, 100), 50);
    assert!((fdot6_to_scalar(96) - 1.5).abs() < 1e-12);
    assert_eq!(fdot6_up_shift(96, 2), scalar_to_fdot6(1.5, 2));
    assert_eq!(fdot6_up_shift(-64, 3), -512);
}

#[test]
fn edge_from_line_samples_pixel_centers() {
    // x = y / 2, centers at y + 0.5
    let e = Edge::from_line(Point::new(0., 0.), Point::new(5., 10.), 0).unwrap();
    assert_eq!((e.first_y, e.last_y, e.winding), (0, 9, 1));
    assert_eq!(e.x, FIXED_ONE / 4);
    assert_eq!(e.dx, FIXED_HALF);
    assert_eq!(e.x_at(3), FIXED_ONE * 7 / 4);

    // upward lines flip winding, same rows
    let up = Edge::from_line(Point::new(5., 10.), Point::new(0., 0.), 0).unwrap();
    assert_eq!((up.first_y, up.last_y, up.winding), (0, 9, -1));
    assert_eq!(up.x, e.x);

    // shorter than a scanline center
    assert!(Edge::from_line(Point::new(0., 0.2), Point::new(3., 0.4), 0).is_none());
    // supersampled rows
    let s = Edge::from_line(Point::new(0., 0.), Point::new(0., 2.), 2).unwrap();
    assert_eq!((s.first_y, s.last_y), (0, 7));
}
