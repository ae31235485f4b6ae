use morphloop::{
    CycleConfig, Lerp, Outline, OutlineInterpolator, ResampleInterpolator, Rgba8, ShapeMorpher,
    ShapeSet, derive_visual,
};

fn interpolators() -> [ResampleInterpolator; 2] {
    [
        ResampleInterpolator::default(),
        CycleConfig::default().interpolator().unwrap(),
    ]
}

#[test]
fn every_hero_step_morphs_with_exact_endpoints() {
    let set = ShapeSet::hero().unwrap();
    let n = set.len();
    for interp in interpolators() {
        for i in 0..n {
            let from = &set.shapes()[i];
            let to = &set.shapes()[(i + 1) % n];
            let morph = interp.interpolate(from, to).unwrap();
            assert!(morph.ring_count() >= 1);
            assert_eq!(&morph.at(0.0), from);
            assert_eq!(&morph.at(1.0), to);
            assert_eq!(&morph.at(-3.0), from);
            assert_eq!(&morph.at(7.0), to);
        }
    }
}

#[test]
fn intermediate_outlines_reparse_and_stay_in_view_box() {
    let set = ShapeSet::hero().unwrap();
    let interp = CycleConfig::default().interpolator().unwrap();
    for i in 0..set.len() {
        let morph = interp
            .interpolate(&set.shapes()[i], &set.shapes()[(i + 1) % set.len()])
            .unwrap();
        for t in [0.1, 0.25, 0.5, 0.75, 0.9] {
            let mid = morph.at(t);
            let reparsed = Outline::parse(mid.d()).unwrap();
            assert_eq!(reparsed.d(), mid.d());

            let rings = mid.rings(0.01);
            assert!(!rings.is_empty() && rings.len() <= morph.ring_count());
            for p in rings.iter().flatten() {
                assert!((-0.5..=24.5).contains(&p.x), "x out of range at step {i}, t={t}");
                assert!((-0.5..=24.5).contains(&p.y), "y out of range at step {i}, t={t}");
            }
        }
    }
}

#[test]
fn morph_is_continuous_near_the_middle() {
    let set = ShapeSet::hero().unwrap();
    let interp = CycleConfig::default().interpolator().unwrap();
    let morph = interp.interpolate(&set.shapes()[0], &set.shapes()[2]).unwrap();

    let a = morph.at(0.5).rings(0.01);
    let b = morph.at(0.501).rings(0.01);
    assert_eq!(a.len(), b.len());
    for (ra, rb) in a.iter().zip(&b) {
        assert_eq!(ra.len(), rb.len());
        for (pa, pb) in ra.iter().zip(rb) {
            assert!(pa.distance(*pb) < 0.5);
        }
    }
}

#[test]
fn derive_visual_blends_color_and_wraps() {
    let set = ShapeSet::hero().unwrap();
    let morpher = ShapeMorpher::new(set.clone(), &ResampleInterpolator::default()).unwrap();
    let table = morpher.table();

    let half = derive_visual(0.5, table, set.colors()).unwrap();
    assert_eq!(half.index, 0);
    assert_eq!(
        half.color,
        Rgba8::lerp(&set.colors()[0], &set.colors()[1], 0.5)
    );
    assert_ne!(&half.outline, &set.shapes()[0]);
    assert_ne!(&half.outline, &set.shapes()[1]);

    let wrapped = derive_visual(6.0, table, set.colors()).unwrap();
    assert_eq!(wrapped.index, 0);
    assert_eq!(wrapped.outline, set.shapes()[0]);
    assert_eq!(wrapped.color, set.colors()[0]);

    let last = derive_visual(5.5, table, set.colors()).unwrap();
    assert_eq!(last.index, 5);
    assert_eq!(
        last.color,
        Rgba8::lerp(&set.colors()[5], &set.colors()[0], 0.5)
    );

    assert!(derive_visual(0.0, table, &set.colors()[..3]).is_err());
}

#[test]
fn outlines_without_area_are_rejected() {
    assert!(Outline::parse("").is_err());
    assert!(Outline::parse("not a path").is_err());

    let lone_move = Outline::parse("M3 3").unwrap();
    let set = ShapeSet::hero().unwrap();
    let bulb = &set.shapes()[0];
    let interp = ResampleInterpolator::default();
    assert!(interp.interpolate(&lone_move, bulb).is_err());
    assert!(interp.interpolate(bulb, &lone_move).is_err());
}
