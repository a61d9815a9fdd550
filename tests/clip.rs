use edgefill::*;

fn clip_rect() -> Rect {
    Rect::new(0., 0., 10., 10.)
}

fn clip(p0: (f64, f64), p1: (f64, f64), mode: HorizontalClip) -> Vec<[Point; 2]> {
    let mut out = [[Point::default(); 2]; MAX_CLIPPED_LINE_SEGMENTS];
    let n = clip_line(Point::new(p0.0, p0.1), Point::new(p1.0, p1.1), &clip_rect(), mode, &mut out);
    out[..n].to_vec()
}

#[test]
fn lines_outside_vertically_are_dropped() {
    for mode in [HorizontalClip::Clamp, HorizontalClip::Exact] {
        assert!(clip((5., -10.), (5., -1.), mode).is_empty());
        assert!(clip((5., 11.), (5., 20.), mode).is_empty());
        assert!(clip((-5., 3.), (15., 3.), mode).is_empty());
    }
}

#[test]
fn vertical_chop_keeps_direction() {
    let segs = clip((0., -10.), (10., 20.), HorizontalClip::Exact);
    assert_eq!(segs.len(), 1);
    let [a, b] = segs[0];
    assert!((a.y - 0.).abs() < 1e-9 && (b.y - 10.).abs() < 1e-9);
    assert!((a.x - 10. / 3.).abs() < 1e-9);

    let segs = clip((10., 20.), (0., -10.), HorizontalClip::Exact);
    assert_eq!(segs.len(), 1);
    assert!(segs[0][0].y > segs[0][1].y);
}

#[test]
fn clamp_and_exact_agree_on_winding() {
    // Line crossing the right side
    let exact = clip((5., 0.), (15., 10.), HorizontalClip::Exact);
    let clamp = clip((5., 0.), (15., 10.), HorizontalClip::Clamp);
    assert_eq!(exact.len(), 2);
    assert_eq!(exact[1], [Point::new(10., 5.), Point::new(10., 10.)]);
    for segs in [&exact, &clamp] {
        let dy: f64 = segs.iter().map(|s| s[1].y - s[0].y).sum();
        assert!((dy - 10.).abs() < 1e-9);
        for s in segs.iter() {
            assert!(s[0].x <= 10. && s[1].x <= 10.);
        }
    }
    // Entirely to the left becomes a vertical line on the left side
    let left = clip((-5., 2.), (-3., 8.), HorizontalClip::Exact);
    assert_eq!(left, vec![[Point::new(0., 2.), Point::new(0., 8.)]]);
}

#[test]
fn clipper_flattens_curves_inside_clip() {
    let mut clipper = EdgeClipper::new(Some(clip_rect()), HorizontalClip::Exact, 0.1);
    clipper.clip_quad([Point::new(0., 0.), Point::new(20., 5.), Point::new(0., 10.)]);
    assert!(clipper.remaining() > 2);
    let segs: Vec<_> = clipper.by_ref().collect();
    for [a, b] in &segs {
        assert!(a.x >= 0. && a.x <= 10. && b.x >= 0. && b.x <= 10.);
        assert!(a.y >= 0. && b.y <= 10.);
    }
    assert_eq!(clipper.remaining(), 0);

    // Curve entirely below the clip
    clipper.clip_cubic([Point::new(0., 20.), Point::new(5., 30.), Point::new(5., 30.), Point::new(9., 25.)]);
    assert_eq!(clipper.next(), None);
}

#[test]
fn outset_saturates() {
    let r = IntRect::new(0, 0, 16, 16);
    assert_eq!(r.outset(2, 3), IntRect::new(-2, -3, 18, 19));
    let big = r.outset(i32::MAX, i32::MAX);
    assert_eq!((big.x1, big.x2), (-i32::MAX, i32::MAX));
    assert_eq!((big.width(), big.height()), (i32::MAX, i32::MAX));
}
