use std::collections::BTreeMap;

use super::*;

struct Fixture {
    shapes: Vec<TaggedShape>,
    boxes: BTreeMap<ShapeId, BoundingBox>,
}

impl Fixture {
    fn new() -> Self {
        Self {
            shapes: Vec::new(),
            boxes: BTreeMap::new(),
        }
    }

    fn with(mut self, role: FillRole, bbox: Option<BoundingBox>) -> Self {
        let id = ShapeId(self.shapes.len() as u32);
        self.shapes.push(TaggedShape {
            id,
            role,
            path_length: 10.0,
        });
        if let Some(b) = bbox {
            self.boxes.insert(id, b);
        }
        self
    }
}

impl Illustration for Fixture {
    fn shapes(&self) -> Vec<TaggedShape> {
        self.shapes.clone()
    }

    fn measure(&self, id: ShapeId) -> Option<BoundingBox> {
        self.boxes.get(&id).copied()
    }
}

#[test]
fn splits_by_role_in_document_order() {
    let b = BoundingBox::new(0.0, 0.0, 10.0, 10.0);
    let ill = Fixture::new()
        .with(FillRole::Ink, Some(b))
        .with(FillRole::NegativeSpace, Some(b))
        .with(FillRole::Ink, Some(b));

    let out = extract_shapes(&ill);
    assert_eq!(
        out.ink.iter().map(|s| s.id).collect::<Vec<_>>(),
        vec![ShapeId(0), ShapeId(2)]
    );
    assert_eq!(out.negative_space.len(), 1);
    assert_eq!(out.negative_space[0].id, ShapeId(1));
    assert_eq!(out.len(), 3);
}

#[test]
fn unmeasurable_shapes_are_skipped_silently() {
    let ill = Fixture::new()
        .with(FillRole::Ink, None)
        .with(
            FillRole::Ink,
            Some(BoundingBox::new(f64::NAN, 0.0, 1.0, 1.0)),
        )
        .with(FillRole::NegativeSpace, Some(BoundingBox::new(0.0, 0.0, 3.0, 3.0)));

    let out = extract_shapes(&ill);
    assert!(out.ink.is_empty());
    assert_eq!(out.negative_space.len(), 1);
    assert!(!out.is_empty());
}

#[test]
fn empty_illustration_extracts_nothing() {
    let out = extract_shapes(&Fixture::new());
    assert!(out.is_empty());
}
