use super::*;

const ALL: [Ease; 10] = [
    Ease::Linear,
    Ease::InQuad,
    Ease::OutQuad,
    Ease::InOutQuad,
    Ease::InCubic,
    Ease::OutCubic,
    Ease::InOutCubic,
    Ease::InQuart,
    Ease::OutQuart,
    Ease::InOutQuart,
];

#[test]
fn endpoints_are_stable() {
    for ease in ALL {
        assert_eq!(ease.apply(0.0), 0.0);
        assert_eq!(ease.apply(1.0), 1.0);
    }
}

#[test]
fn monotonic_spot_check() {
    for ease in ALL {
        let a = ease.apply(0.25);
        let b = ease.apply(0.5);
        let c = ease.apply(0.75);
        assert!(a < b, "{ease:?}");
        assert!(b < c, "{ease:?}");
    }
}

#[test]
fn out_of_range_input_is_clamped() {
    for ease in ALL {
        assert_eq!(ease.apply(-3.0), 0.0);
        assert_eq!(ease.apply(7.0), 1.0);
    }
}

#[test]
fn in_out_curves_cross_midpoint() {
    for ease in [Ease::InOutQuad, Ease::InOutCubic, Ease::InOutQuart] {
        assert!((ease.apply(0.5) - 0.5).abs() < 1e-12);
    }
}

#[test]
fn serde_names_are_snake_case() {
    assert_eq!(
        serde_json::to_string(&Ease::InOutQuart).unwrap(),
        "\"in_out_quart\""
    );
    let e: Ease = serde_json::from_str("\"out_quad\"").unwrap();
    assert_eq!(e, Ease::OutQuad);
}
