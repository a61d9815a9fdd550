use edgefill::*;

fn a8_mask(bounds: IntRect, fill: impl Fn(i32, i32) -> u8) -> Mask {
    let mut m = Mask::new(bounds, MaskFormat::A8);
    m.alloc_image(&RasterConfig::default()).unwrap();
    for y in bounds.y1..bounds.y2 {
        for x in bounds.x1..bounds.x2 {
            m.set_alpha(x, y, fill(x, y));
        }
    }
    m
}

fn emboss() -> MaskFilter {
    MaskFilter::Emboss(Emboss::new([1.0, 1.0, 1.0], 32, 128, 1.5).unwrap())
}

#[test]
fn stipple_keeps_even_pixels() {
    let src = a8_mask(IntRect::new(1, 0, 5, 3), |_, _| 200);
    let mut dst = Mask::new(IntRect::default(), MaskFormat::A8);
    MaskFilter::Stipple.filter_mask(&mut dst, &src, &Transform::new(), None).unwrap();
    assert_eq!(dst.bounds, src.bounds);
    for y in 0..3 {
        for x in 1..5 {
            let expected = if (x + y) % 2 == 0 { 200 } else { 0 };
            assert_eq!(dst.alpha_at(x, y), expected, "({}, {})", x, y);
        }
    }
    // second pass changes nothing
    let mut again = Mask::new(IntRect::default(), MaskFormat::A8);
    stipple(&mut again, &dst).unwrap();
    assert_eq!(again, dst);
}

#[test]
fn stipple_only_takes_a8() {
    let mut dst = Mask::new(IntRect::default(), MaskFormat::A8);
    for format in [MaskFormat::Bw, MaskFormat::ThreeD] {
        let mut src = Mask::new(IntRect::new(0, 0, 4, 4), format);
        src.alloc_image(&RasterConfig::default()).unwrap();
        let err = MaskFilter::Stipple.filter_mask(&mut dst, &src, &Transform::new(), None);
        assert!(matches!(err, Err(RasterError::UnsupportedMaskFormat { expected: MaskFormat::A8, .. })));
    }
    assert_eq!(MaskFilter::Stipple.format(), MaskFormat::A8);
    assert_eq!(MaskFilter::Stipple.margin(&Transform::new()), IPoint::new(0, 0));
}

#[test]
fn emboss_grows_and_shades() {
    let _ = env_logger::builder().is_test(true).try_init();
    let filter = emboss();
    assert_eq!(filter.format(), MaskFormat::ThreeD);
    let expected_margin = filter.margin(&Transform::new());
    assert_eq!(expected_margin, IPoint::new(5, 5));

    let src = a8_mask(IntRect::new(10, 10, 22, 20), |_, _| 255);
    let mut dst = Mask::new(IntRect::default(), MaskFormat::A8);
    let mut margin = IPoint::default();
    filter.filter_mask(&mut dst, &src, &Transform::new(), Some(&mut margin)).unwrap();
    assert_eq!(margin, expected_margin);
    assert_eq!(dst.format, MaskFormat::ThreeD);
    assert_eq!(dst.bounds, src.bounds.outset(margin.x, margin.y));
    assert_eq!(dst.image.len(), 3 * dst.plane_size().unwrap());

    // alpha is the unblurred source
    assert_eq!(dst.count_nonzero(), src.count_nonzero());
    for y in dst.bounds.y1..dst.bounds.y2 {
        for x in dst.bounds.x1..dst.bounds.x2 {
            assert_eq!(dst.alpha_at(x, y), src.alpha_at(x, y));
        }
    }
    // lit from the top left: the top left rim is brighter than the bottom right
    let (mul, rb) = (dst.plane(1), dst.row_bytes);
    let at = |x: i32, y: i32| mul[(y - dst.bounds.y1) as usize * rb + (x - dst.bounds.x1) as usize];
    assert!(at(10, 15) > at(21, 15), "{} {}", at(10, 15), at(21, 15));
    assert!(at(16, 10) > at(16, 19));
    // no shading outside the source
    assert_eq!(at(8, 8), 0);
    assert_eq!(dst.plane(2)[0], 0);
}

#[test]
fn emboss_of_nothing_is_nothing() {
    let src = a8_mask(IntRect::new(0, 0, 6, 6), |_, _| 0);
    let mut dst = Mask::new(IntRect::default(), MaskFormat::A8);
    emboss().filter_mask(&mut dst, &src, &Transform::new(), None).unwrap();
    assert!(!dst.image.is_empty());
    assert!(dst.image.iter().all(|&v| v == 0));

    // bounds only
    let src = Mask::new(IntRect::new(0, 0, 6, 6), MaskFormat::A8);
    emboss().filter_mask(&mut dst, &src, &Transform::new(), None).unwrap();
    assert!(dst.image.is_empty());
}

#[test]
fn emboss_rejects_bad_input() {
    let mut dst = Mask::new(IntRect::default(), MaskFormat::A8);
    let mut bw = Mask::new(IntRect::new(0, 0, 8, 8), MaskFormat::Bw);
    bw.alloc_image(&RasterConfig::default()).unwrap();
    assert!(matches!(emboss().filter_mask(&mut dst, &bw, &Transform::new(), None),
                     Err(RasterError::UnsupportedMaskFormat { found: MaskFormat::Bw, .. })));

    let src = a8_mask(IntRect::new(0, 0, 8, 8), |x, _| if x < 4 { 255 } else { 0 });
    let tight = RasterConfig::default().max_mask_bytes(100);
    let err = emboss().filter_mask_with(&mut dst, &src, &Transform::new(), None, &tight);
    assert!(matches!(err, Err(RasterError::MaskTooLarge { width: 18, height: 18 })));
}

#[test]
fn emboss_follows_the_transform() {
    let filter = emboss();
    let scale = Transform::new_scale(2.0, 2.0);
    assert_eq!(filter.margin(&scale), IPoint::new(9, 9));

    let light = Light::new([1.0, 0.0, 1.0], 0, 0).unwrap();
    let turned = light.transformed(&Transform::new_rotate(std::f64::consts::FRAC_PI_2));
    assert!(turned.direction[0].abs() < 1e-9);
    assert!((turned.direction[1] - light.direction[0]).abs() < 1e-9);
    assert_eq!(turned.direction[2], light.direction[2]);
}

#[test]
fn blur_spreads_coverage() {
    let config = RasterConfig::default();
    let src = a8_mask(IntRect::new(0, 0, 1, 1), |_, _| 255);
    let (out, margin) = box_blur(&src, 2.0, BlurStyle::Normal, &config).unwrap();
    assert_eq!(margin, IPoint::new(6, 6));
    assert_eq!(out.bounds, IntRect::new(-6, -6, 7, 7));
    // symmetric around the source pixel
    assert_eq!(out.alpha_at(-2, 0), out.alpha_at(2, 0));
    assert_eq!(out.alpha_at(0, -3), out.alpha_at(0, 3));
    assert!(out.alpha_at(0, 0) < 255 && out.alpha_at(0, 0) > out.alpha_at(1, 0));

    let (inner, _) = box_blur(&src, 2.0, BlurStyle::Inner, &config).unwrap();
    assert_eq!(inner.count_nonzero(), 1);
    assert_eq!(inner.alpha_at(0, 0), multiply_u8(out.alpha_at(0, 0), 255));
}
