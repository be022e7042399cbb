use crate::foundation::core::{BoundingBox, ShapeId};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
/// How a shape takes part in the reveal.
pub enum FillRole {
    /// Solid foreground shape: drawn as an outline, then flood-filled.
    Ink,
    /// Cut-out detail painted in the backdrop color and revealed last.
    NegativeSpace,
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
/// A drawable element as listed by an [`Illustration`], before measurement.
pub struct TaggedShape {
    /// Stable shape identity.
    pub id: ShapeId,
    /// Role marker attached to the element.
    pub role: FillRole,
    /// Stroke length used by the outline draw-in.
    pub path_length: f64,
}

/// Source of tagged shapes plus the geometry capability used to measure them.
///
/// Implementations decide how roles are marked; the engine only sees [`FillRole`] values.
/// Elements without a role marker are simply not listed.
pub trait Illustration {
    /// Tagged shapes in document order.
    fn shapes(&self) -> Vec<TaggedShape>;

    /// Bounding box of `id` in illustration coordinates, `None` when it cannot be computed.
    fn measure(&self, id: ShapeId) -> Option<BoundingBox>;
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
/// A measured shape.
pub struct RawShape {
    /// Stable shape identity.
    pub id: ShapeId,
    /// Fill role.
    pub role: FillRole,
    /// Native bounding box.
    pub bbox: BoundingBox,
    /// Stroke length.
    pub path_length: f64,
}

#[derive(Clone, Debug, Default, PartialEq, serde::Serialize)]
/// Measured shapes split by role, each list in document order.
pub struct Extracted {
    /// Ink shapes.
    pub ink: Vec<RawShape>,
    /// Negative-space shapes.
    pub negative_space: Vec<RawShape>,
}

impl Extracted {
    /// Total number of measured shapes.
    pub fn len(&self) -> usize {
        self.ink.len() + self.negative_space.len()
    }

    /// `true` when nothing could be measured.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Collect and measure every tagged shape of `illustration`.
///
/// Shapes whose geometry cannot be computed are left out without error.
#[tracing::instrument(skip(illustration))]
pub fn extract_shapes(illustration: &impl Illustration) -> Extracted {
    let mut out = Extracted::default();

    for shape in illustration.shapes() {
        let Some(bbox) = illustration
            .measure(shape.id)
            .filter(BoundingBox::is_well_formed)
        else {
            tracing::trace!(id = shape.id.0, "shape has no usable geometry, skipped");
            continue;
        };

        let raw = RawShape {
            id: shape.id,
            role: shape.role,
            bbox,
            path_length: if shape.path_length.is_finite() {
                shape.path_length.max(0.0)
            } else {
                0.0
            },
        };
        match raw.role {
            FillRole::Ink => out.ink.push(raw),
            FillRole::NegativeSpace => out.negative_space.push(raw),
        }
    }

    tracing::debug!(
        ink = out.ink.len(),
        negative_space = out.negative_space.len(),
        "extracted shapes"
    );
    out
}

#[cfg(test)]
#[path = "../../tests/unit/shapes/extract.rs"]
mod tests;
