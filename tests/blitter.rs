use edgefill::*;

const RED: u32 = 0xFFFF_0000;

fn red(alpha: u8) -> Paint {
    Paint::new(Rgba8::new(255, 0, 0, alpha)).anti_alias(false)
}

fn star() -> Path {
    Path::polygon(&[(10., 0.), (16., 20.), (0., 7.), (20., 7.), (4., 20.)])
}

#[test]
fn opaque_and_translucent_argb32() {
    let config = RasterConfig::default();
    let mut pix = Pixmap::new(8, 8, PixelFormat::Argb32).unwrap();
    draw_path(&mut pix, &Path::rect(1., 1., 4., 4.), &red(255), &Transform::new(), &config).unwrap();
    assert_eq!(pix.get_argb32(1, 1), RED);
    assert_eq!(pix.get_argb32(3, 3), RED);
    assert_eq!(pix.get_argb32(4, 4), 0);
    assert_eq!(pix.count_nonzero(), 9);

    let mut pix = Pixmap::new(8, 8, PixelFormat::Argb32).unwrap();
    pix.fill(0xFFFF_FFFF);
    draw_path(&mut pix, &Path::rect(0., 0., 2., 2.), &red(128), &Transform::new(), &config).unwrap();
    assert_eq!(pix.get_argb32(0, 0), 0xFFFF_7F7F);
    assert_eq!(pix.get_argb32(5, 5), 0xFFFF_FFFF);

    // translucent over nothing keeps the premultiplied source
    let mut pix = Pixmap::new(4, 4, PixelFormat::Argb32).unwrap();
    draw_path(&mut pix, &Path::rect(0., 0., 2., 2.), &red(128), &Transform::new(), &config).unwrap();
    assert_eq!(pix.get_argb32(1, 1), 0x8080_0000);
}

#[test]
fn rgb565_and_a8() {
    let config = RasterConfig::default();
    let mut pix = Pixmap::new(4, 4, PixelFormat::Rgb565).unwrap();
    pix.fill(0xFFFF_FFFF);
    assert_eq!(pix.get_565(0, 0), 0xFFFF);
    draw_path(&mut pix, &Path::rect(0., 0., 1., 4.), &red(255), &Transform::new(), &config).unwrap();
    draw_path(&mut pix, &Path::rect(1., 0., 2., 4.), &red(128), &Transform::new(), &config).unwrap();
    assert_eq!(pix.get_565(0, 2), 0xF800);
    assert_eq!(pix.get_565(1, 2), 0xFBEF);
    assert_eq!(pix.get_565(2, 2), 0xFFFF);
    assert_eq!(pix.pixel(0, 0), 0xFFFF_0000);

    let mut a8 = Pixmap::new(4, 4, PixelFormat::A8).unwrap();
    draw_path(&mut a8, &Path::rect(0., 0., 2., 2.), &red(200), &Transform::new(), &config).unwrap();
    assert_eq!(a8.get_a8(1, 1), 200);
    assert_eq!(a8.get_a8(2, 2), 0);
    assert_eq!(a8.pixel(1, 1), 200 << 24);
}

#[test]
fn factory_picks_by_format_and_paint() {
    let config = RasterConfig::default();
    let ctx = BlitContext::new(&config);

    // transparent paint draws nothing
    let mut pix = Pixmap::new(4, 4, PixelFormat::Argb32).unwrap();
    pix.fill(0xFF00_00FF);
    let before = pix.clone();
    {
        let mut b = choose_blitter(&mut pix, &red(0), &ctx).unwrap();
        b.blit_rect(0, 0, 4, 4);
        b.blit_anti_h(0, 1, &[255, 128]);
    }
    assert_eq!(pix, before);

    // runs are clipped to the pixmap
    {
        let mut b = choose_blitter(&mut pix, &red(255), &ctx).unwrap();
        b.blit_h(-3, 0, 5);
        b.blit_h(2, -1, 5);
        b.blit_anti_h(3, 3, &[255, 255, 255]);
        b.blit_v(0, 2, 10, 255);
    }
    assert_eq!(pix.get_argb32(0, 0), RED);
    assert_eq!(pix.get_argb32(1, 0), RED);
    assert_eq!(pix.get_argb32(2, 0), 0xFF00_00FF);
    assert_eq!(pix.get_argb32(3, 3), RED);
    assert_eq!(pix.get_argb32(0, 3), RED);

    // concrete blitters check their destination
    let mut a8 = Pixmap::new(2, 2, PixelFormat::A8).unwrap();
    assert!(matches!(Argb32OpaqueBlitter::new(&mut a8, RED),
                     Err(RasterError::UnsupportedPixelFormat { expected: PixelFormat::Argb32,
                                                               found: PixelFormat::A8 })));
    assert!(Rgb565Blitter::new(&mut a8, RED).is_err());
    assert!(A8Blitter::new(&mut a8, 255).is_ok());
}

#[test]
fn proc_blitter_matches_specialized() {
    let _ = env_logger::builder().is_test(true).try_init();
    let fast = RasterConfig::default();
    let slow = RasterConfig::default().specialized_blitters(false);
    let paints = [
        Paint::new(Rgba8::new(30, 200, 90, 255)),
        Paint::new(Rgba8::new(30, 200, 90, 100)),
        Paint::new(Rgba8::new(250, 10, 190, 100)).anti_alias(false),
        Paint::new(Rgba8::new(250, 10, 190, 255)).fill_rule(FillingRule::EvenOdd),
    ];
    for format in [PixelFormat::A8, PixelFormat::Rgb565, PixelFormat::Argb32] {
        for paint in &paints {
            let mut a = Pixmap::new(24, 24, format).unwrap();
            a.fill(0x8040_2010);
            let mut b = a.clone();
            draw_path(&mut a, &star(), paint, &Transform::new(), &fast).unwrap();
            draw_path(&mut b, &star(), paint, &Transform::new(), &slow).unwrap();
            assert_eq!(a, b, "{:?} {:?}", format, paint);
        }
    }
}

#[test]
fn coverage_rows_split_into_runs() {
    #[derive(Default)]
    struct Calls(Vec<String>);
    impl Blitter for Calls {
        fn blit_h(&mut self, x: i32, y: i32, width: i32) {
            self.0.push(format!("h {} {} {}", x, y, width));
        }
        fn blit_anti_h(&mut self, x: i32, y: i32, covers: &[u8]) {
            self.0.push(format!("a {} {} {:?}", x, y, covers));
        }
    }
    let mut calls = Calls::default();
    blit_coverage_row(&mut calls, 10, 3, &[0, 255, 255, 40, 0, 0, 9, 255]);
    assert_eq!(calls.0, vec!["h 11 3 2", "a 13 3 [40]", "a 16 3 [9]", "h 17 3 1"]);
}

#[test]
fn masks_blit_through_the_clip() {
    let config = RasterConfig::default();
    let ctx = BlitContext::new(&config);

    let mut bw = Mask::new(IntRect::new(2, 1, 12, 2), MaskFormat::Bw);
    bw.alloc_image(&config).unwrap();
    for x in (2..12).step_by(3) {
        bw.set_alpha(x, 1, 255);
    }
    let mut pix = Pixmap::new(8, 4, PixelFormat::Argb32).unwrap();
    {
        let mut b = choose_blitter(&mut pix, &red(255), &ctx).unwrap();
        b.blit_mask(&bw, &IntRect::new(0, 0, 8, 4));
    }
    let lit: Vec<usize> = (0..8).filter(|&x| pix.get_argb32(x, 1) != 0).collect();
    assert_eq!(lit, vec![2, 5]);
    assert_eq!(pix.count_nonzero(), 2);

    // shaded masks modulate the color
    let mut shaded = Mask::new(IntRect::new(0, 0, 2, 1), MaskFormat::ThreeD);
    shaded.alloc_image(&config).unwrap();
    shaded.image.copy_from_slice(&[255, 255, 128, 128, 0, 50]);
    let mut pix = Pixmap::new(2, 1, PixelFormat::Argb32).unwrap();
    {
        let mut b = choose_blitter(&mut pix, &red(255), &ctx).unwrap();
        b.blit_mask(&shaded, &pix_bounds(2, 1));
    }
    assert_eq!(pix.get_argb32(0, 0), 0xFF80_0000);
    assert_eq!(pix.get_argb32(1, 0), 0xFFB2_3232);

    // masks without shading support fall back to coverage
    let mut m = Mask::new(IntRect::new(0, 0, 2, 1), MaskFormat::A8);
    m.alloc_image(&config).unwrap();
    let mut blitter = MaskBlitter::new(&mut m);
    blitter.blit_mask(&shaded, &IntRect::new(0, 0, 2, 1));
    assert_eq!(m.image, vec![255, 255]);
}

#[test]
fn coverage_masks_through_the_shaded_path() {
    let config = RasterConfig::default();
    let mut a8 = Mask::new(IntRect::new(1, 0, 4, 2), MaskFormat::A8);
    a8.alloc_image(&config).unwrap();
    a8.image.copy_from_slice(&[255, 128, 0, 200, 255, 64]);
    for specialized in [true, false] {
        let ctx = BlitContext::new(&config.clone().specialized_blitters(specialized));
        for format in [PixelFormat::A8, PixelFormat::Rgb565, PixelFormat::Argb32] {
            let mut plain = Pixmap::new(6, 3, format).unwrap();
            let mut shaded = Pixmap::new(6, 3, format).unwrap();
            {
                let mut b = choose_blitter(&mut plain, &red(255), &ctx).unwrap();
                b.blit_mask(&a8, &pix_bounds(6, 3));
            }
            {
                let mut b = choose_blitter(&mut shaded, &red(255), &ctx).unwrap();
                // wider than the mask on purpose
                b.blit_mask_3d(&a8, &pix_bounds(6, 3));
            }
            assert_eq!(plain, shaded, "{:?} specialized {}", format, specialized);
            assert_eq!(shaded.pixel(1, 0) >> 24, 0xFF);
            assert_eq!(shaded.count_nonzero(), 5);
        }
    }
}

fn pix_bounds(w: i32, h: i32) -> IntRect {
    IntRect::new(0, 0, w, h)
}

#[test]
fn sprites() {
    let config = RasterConfig::default();
    let mut src = Pixmap::new(2, 2, PixelFormat::Argb32).unwrap();
    src.set_argb32(0, 0, 0xFF11_2233);
    src.set_argb32(1, 0, 0xFF44_5566);
    src.set_argb32(0, 1, 0x8040_0000);
    src.set_argb32(1, 1, 0);

    let mut dst = Pixmap::new(4, 4, PixelFormat::Argb32).unwrap();
    dst.fill(0xFF00_00FF);
    draw_sprite(&mut dst, &src, 1, 1, &config).unwrap();
    assert_eq!(dst.get_argb32(1, 1), 0xFF11_2233);
    assert_eq!(dst.get_argb32(2, 1), 0xFF44_5566);
    assert_eq!(dst.get_argb32(1, 2), src_over_argb32(0x8040_0000, 0xFF00_00FF));
    // transparent source pixel and everything outside stay put
    assert_eq!(dst.get_argb32(2, 2), 0xFF00_00FF);
    assert_eq!(dst.get_argb32(0, 0), 0xFF00_00FF);
    assert_eq!(dst.get_argb32(3, 3), 0xFF00_00FF);

    // partly outside the destination
    let mut dst = Pixmap::new(4, 4, PixelFormat::Argb32).unwrap();
    draw_sprite(&mut dst, &src, -1, -1, &config).unwrap();
    assert_eq!(dst.count_nonzero(), 0);
    draw_sprite(&mut dst, &src, 3, -1, &config).unwrap();
    assert_eq!(dst.get_argb32(3, 0), 0x8040_0000);
    assert_eq!(dst.count_nonzero(), 1);

    // 16 bit sources convert, coverage scales the source
    let mut src16 = Pixmap::new(1, 1, PixelFormat::Rgb565).unwrap();
    src16.set_565(0, 0, 0xF800);
    let mut dst = Pixmap::new(2, 1, PixelFormat::Argb32).unwrap();
    let ctx = BlitContext::new(&config);
    {
        let mut b = choose_sprite_blitter(&mut dst, &src16, 1, 0, &ctx).unwrap();
        b.blit_anti_h(0, 0, &[255, 128]);
    }
    assert_eq!(dst.get_argb32(0, 0), 0);
    assert_eq!(dst.get_argb32(1, 0), blend_argb32(0xFFFF_0000, 0, 128));

    // alpha only sources only draw into alpha destinations
    let a8 = Pixmap::new(2, 2, PixelFormat::A8).unwrap();
    let mut dst = Pixmap::new(4, 4, PixelFormat::Argb32).unwrap();
    assert!(matches!(draw_sprite(&mut dst, &a8, 0, 0, &config),
                     Err(RasterError::UnsupportedPixelFormat { .. })));
    let mut dst8 = Pixmap::new(4, 4, PixelFormat::A8).unwrap();
    assert!(draw_sprite(&mut dst8, &src, 0, 0, &config).is_err());
    let mut a8 = a8;
    a8.set_a8(1, 1, 77);
    draw_sprite(&mut dst8, &a8, 2, 2, &config).unwrap();
    assert_eq!(dst8.get_a8(3, 3), 77);
    assert_eq!(dst8.count_nonzero(), 1);
}
