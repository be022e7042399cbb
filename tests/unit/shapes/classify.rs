use super::*;

fn raw(id: u32, role: FillRole, x: f64, y: f64, w: f64, h: f64) -> RawShape {
    RawShape {
        id: ShapeId(id),
        role,
        bbox: BoundingBox::new(x, y, w, h),
        path_length: 40.0,
    }
}

fn ink(id: u32, x: f64, y: f64, w: f64, h: f64) -> RawShape {
    raw(id, FillRole::Ink, x, y, w, h)
}

fn rules() -> ClassifyRules {
    ClassifyRules {
        view_box: ViewBox::new(600.0, 600.0).unwrap(),
        cutoffs: ZoneCutoffs {
            emblem_below: 370.0,
            wordmark_below: 475.0,
        },
        min_extent: 5.0,
    }
}

fn ids(shapes: &[ClassifiedShape]) -> Vec<u32> {
    shapes.iter().map(|s| s.id.0).collect()
}

#[test]
fn shapes_outside_view_box_are_excluded_on_every_edge() {
    let extracted = Extracted {
        ink: vec![
            ink(0, 601.0, 100.0, 20.0, 20.0),  // past right edge
            ink(1, 100.0, 601.0, 20.0, 20.0),  // past bottom edge
            ink(2, -30.0, 100.0, 20.0, 20.0),  // before left edge
            ink(3, 100.0, -30.0, 20.0, 20.0),  // before top edge
            ink(4, 590.0, 100.0, 20.0, 20.0),  // straddles right
            ink(5, -10.0, 100.0, 20.0, 20.0),  // straddles left
            ink(6, 100.0, -10.0, 20.0, 20.0),  // straddles top
            ink(7, 100.0, 590.0, 20.0, 20.0),  // straddles bottom
        ],
        negative_space: vec![],
    };

    let out = classify_shapes(&extracted, &rules());
    let mut kept: Vec<u32> = out.shapes().map(|s| s.id.0).collect();
    kept.sort();
    assert_eq!(kept, vec![4, 5, 6, 7]);
}

#[test]
fn tiny_shapes_are_noise_unless_large_on_one_axis() {
    let extracted = Extracted {
        ink: vec![
            ink(0, 100.0, 100.0, 4.0, 4.0),
            ink(1, 100.0, 100.0, 40.0, 2.0),
            ink(2, 100.0, 100.0, 2.0, 40.0),
            ink(3, 100.0, 100.0, 5.0, 5.0),
        ],
        negative_space: vec![raw(4, FillRole::NegativeSpace, 100.0, 100.0, 1.0, 1.0)],
    };

    let out = classify_shapes(&extracted, &rules());
    let mut kept: Vec<u32> = out.shapes().map(|s| s.id.0).collect();
    kept.sort();
    assert_eq!(kept, vec![1, 2, 3]);
}

#[test]
fn vertical_center_selects_zone() {
    let extracted = Extracted {
        // centers at cy = 100, 400, 500
        ink: vec![
            ink(0, 10.0, 90.0, 20.0, 20.0),
            ink(1, 10.0, 390.0, 20.0, 20.0),
            ink(2, 10.0, 490.0, 20.0, 20.0),
        ],
        negative_space: vec![],
    };

    let out = classify_shapes(&extracted, &rules());
    assert_eq!(ids(&out.emblem.ink), vec![0]);
    assert_eq!(ids(&out.wordmark.ink), vec![1]);
    assert_eq!(ids(&out.script.ink), vec![2]);
    assert_eq!(out.script.ink[0].zone, Zone::Script);
}

#[test]
fn cutoffs_are_half_open() {
    let c = ZoneCutoffs::default();
    assert_eq!(c.zone_of(369.999), Zone::Emblem);
    assert_eq!(c.zone_of(370.0), Zone::Wordmark);
    assert_eq!(c.zone_of(474.999), Zone::Wordmark);
    assert_eq!(c.zone_of(475.0), Zone::Script);
}

#[test]
fn ink_is_ordered_by_horizontal_center() {
    // cx = 30, 10, 20
    let extracted = Extracted {
        ink: vec![
            ink(0, 25.0, 10.0, 10.0, 10.0),
            ink(1, 5.0, 10.0, 10.0, 10.0),
            ink(2, 15.0, 10.0, 10.0, 10.0),
        ],
        negative_space: vec![],
    };

    let out = classify_shapes(&extracted, &rules());
    let cxs: Vec<f64> = out.emblem.ink.iter().map(|s| s.cx).collect();
    assert_eq!(cxs, vec![10.0, 20.0, 30.0]);
    assert_eq!(ids(&out.emblem.ink), vec![1, 2, 0]);
}

#[test]
fn equal_centers_keep_document_order() {
    let extracted = Extracted {
        ink: vec![
            ink(7, 10.0, 10.0, 10.0, 10.0),
            ink(3, 10.0, 30.0, 10.0, 10.0),
            ink(5, 0.0, 10.0, 10.0, 10.0),
        ],
        negative_space: vec![],
    };

    let out = classify_shapes(&extracted, &rules());
    assert_eq!(ids(&out.emblem.ink), vec![5, 7, 3]);
}

#[test]
fn negative_space_keeps_document_order() {
    let extracted = Extracted {
        ink: vec![],
        negative_space: vec![
            raw(0, FillRole::NegativeSpace, 300.0, 10.0, 10.0, 10.0),
            raw(1, FillRole::NegativeSpace, 10.0, 10.0, 10.0, 10.0),
        ],
    };

    let out = classify_shapes(&extracted, &rules());
    assert_eq!(ids(&out.emblem.negative_space), vec![0, 1]);
    assert!(out.emblem.ink.is_empty());
}

#[test]
fn validate_rejects_inverted_cutoffs() {
    let mut r = rules();
    r.cutoffs.emblem_below = 500.0;
    assert!(r.validate().is_err());

    let mut r = rules();
    r.min_extent = -1.0;
    assert!(r.validate().is_err());

    assert!(rules().validate().is_ok());
    assert!(ClassifyRules::default().validate().is_ok());
}
