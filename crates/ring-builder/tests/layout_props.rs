use proptest::prelude::*;
use ring_builder::layout::{PRONG_RADIUS_MM, SEATING_DEPTH};
use ring_builder::{radial_pattern, BuildError, RingLayout, SizeTable};
use ring_types::RingSpec;

fn size_code() -> impl Strategy<Value = String> {
    prop::sample::select(vec!["6", "7", "8", "9"]).prop_map(str::to_string)
}

proptest! {
    #[test]
    fn layout_is_pure(
        code in size_code(),
        width in 0.1f64..10.0,
        thickness in 0.1f64..5.0,
        stone in 0.1f64..15.0,
    ) {
        let spec = RingSpec::new(code, width, thickness, stone);
        let sizes = SizeTable::standard();
        let a = RingLayout::compute(&spec, &sizes).unwrap();
        let b = RingLayout::compute(&spec, &sizes).unwrap();
        prop_assert_eq!(a, b);
    }

    #[test]
    fn layout_relations_hold(
        code in size_code(),
        width in 0.1f64..10.0,
        thickness in 0.1f64..5.0,
        stone in 0.1f64..15.0,
    ) {
        let spec = RingSpec::new(code.clone(), width, thickness, stone);
        let sizes = SizeTable::standard();
        let layout = RingLayout::compute(&spec, &sizes).unwrap();

        prop_assert_eq!(layout.inner_radius * 2.0, sizes.lookup(&code).unwrap());
        prop_assert!((layout.outer_radius - layout.inner_radius - thickness).abs() < 1e-9);
        let expected_z = width / 2.0 + stone / 2.0 * SEATING_DEPTH;
        prop_assert!((layout.stone_center_z - expected_z).abs() < 1e-9);
        // The stone always dips below the band top.
        prop_assert!(layout.stone_center_z - layout.stone_radius < layout.band_top_z());
        prop_assert_eq!(layout.prong_radius, PRONG_RADIUS_MM);
        prop_assert_eq!(layout.prongs.len(), 4);
        for p in &layout.prongs {
            let r = (p.offset[0].powi(2) + p.offset[1].powi(2)).sqrt();
            prop_assert!((r - 0.8 * layout.stone_radius).abs() < 1e-9);
            prop_assert!((p.offset[2] - layout.prong_center_z).abs() < 1e-12);
        }
    }

    #[test]
    fn unknown_codes_always_rejected(code in "[a-z]{1,4}|[1-9][0-9]{1,3}") {
        let spec = RingSpec::new(code, 2.0, 1.5, 4.0);
        let is_unsupported = matches!(
            RingLayout::compute(&spec, &SizeTable::standard()),
            Err(BuildError::UnsupportedSize { .. })
        );
        prop_assert!(is_unsupported);
    }

    #[test]
    fn pattern_spacing_is_even(count in 1usize..32, radius in 0.1f64..20.0, phase in -3.0f64..3.0) {
        let placements: Vec<_> = radial_pattern(count, radius, phase, 0.0).collect();
        prop_assert_eq!(placements.len(), count);
        let step = std::f64::consts::TAU / count as f64;
        for pair in placements.windows(2) {
            prop_assert!((pair[1].angle - pair[0].angle - step).abs() < 1e-9);
        }
    }
}
