use std::{path::Path, sync::Arc};

use anyhow::Context as _;
use kurbo::{BezPath, ParamCurveArclen as _};

use crate::{
    foundation::core::{Affine, BoundingBox, Rgba8, ShapeId, ViewBox},
    foundation::error::{SplashError, SplashResult},
    shapes::extract::{FillRole, Illustration, TaggedShape},
    timeline::scene::Palette,
};

const ARCLEN_ACCURACY: f64 = 1e-3;

/// Parse SVG bytes into a `usvg` tree.
pub fn parse_svg(bytes: &[u8]) -> SplashResult<Arc<usvg::Tree>> {
    let opts = usvg::Options::default();
    let tree = usvg::Tree::from_data(bytes, &opts).context("parse svg tree")?;
    Ok(Arc::new(tree))
}

#[derive(Clone, Debug)]
struct SvgShape {
    tagged: TaggedShape,
    label: String,
    bbox: Option<BoundingBox>,
}

/// An SVG illustration whose shapes are tagged by their resolved fill color.
///
/// `usvg` resolves `style` attributes, CSS and inheritance into a typed paint, so tagging
/// does not depend on how the source spells its styles. A path filled with exactly the
/// palette's ink color is ink, one filled with the negative-space color is negative space;
/// every other path is ignored. Geometry is in the tree's canvas coordinates.
#[derive(Clone)]
pub struct SvgIllustration {
    tree: Arc<usvg::Tree>,
    shapes: Vec<SvgShape>,
}

impl SvgIllustration {
    /// Tag the shapes of an already parsed tree.
    pub fn from_tree(tree: Arc<usvg::Tree>, palette: &Palette) -> Self {
        let mut shapes = Vec::new();
        collect_group(tree.root(), palette, &mut shapes);
        tracing::debug!(tagged = shapes.len(), "tagged svg shapes");
        Self { tree, shapes }
    }

    /// Parse and tag SVG bytes.
    pub fn from_data(bytes: &[u8], palette: &Palette) -> SplashResult<Self> {
        Ok(Self::from_tree(parse_svg(bytes)?, palette))
    }

    /// Read, parse and tag an SVG file.
    pub fn load(path: &Path, palette: &Palette) -> SplashResult<Self> {
        let bytes =
            std::fs::read(path).with_context(|| format!("read svg '{}'", path.display()))?;
        Self::from_data(&bytes, palette)
            .map_err(|e| SplashError::svg(format!("{}: {e}", path.display())))
    }

    /// Canvas size of the parsed tree, usable as the classification view box.
    pub fn view_box(&self) -> SplashResult<ViewBox> {
        let size = self.tree.size();
        ViewBox::new(f64::from(size.width()), f64::from(size.height()))
    }

    /// Element `id` of a tagged shape (may be empty).
    pub fn label(&self, id: ShapeId) -> Option<&str> {
        self.shapes
            .get(id.0 as usize)
            .map(|s| s.label.as_str())
    }
}

impl std::fmt::Debug for SvgIllustration {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SvgIllustration")
            .field("size", &self.tree.size())
            .field("shapes", &self.shapes)
            .finish()
    }
}

impl Illustration for SvgIllustration {
    fn shapes(&self) -> Vec<TaggedShape> {
        self.shapes.iter().map(|s| s.tagged.clone()).collect()
    }

    fn measure(&self, id: ShapeId) -> Option<BoundingBox> {
        self.shapes.get(id.0 as usize)?.bbox
    }
}

fn collect_group(group: &usvg::Group, palette: &Palette, out: &mut Vec<SvgShape>) {
    for node in group.children() {
        match node {
            usvg::Node::Group(g) => collect_group(g.as_ref(), palette, out),
            usvg::Node::Text(t) => collect_group(t.flattened(), palette, out),
            usvg::Node::Path(p) => {
                let Some(role) = fill_role(p, palette) else {
                    continue;
                };
                let id = ShapeId(out.len() as u32);
                out.push(SvgShape {
                    tagged: TaggedShape {
                        id,
                        role,
                        path_length: path_length(p),
                    },
                    label: p.id().to_string(),
                    bbox: measure_path(p),
                });
            }
            usvg::Node::Image(_) => {}
        }
    }
}

fn fill_role(path: &usvg::Path, palette: &Palette) -> Option<FillRole> {
    let usvg::Paint::Color(c) = path.fill()?.paint() else {
        return None;
    };
    let color = Rgba8::rgb(c.red, c.green, c.blue);
    if color.same_rgb(palette.ink) {
        Some(FillRole::Ink)
    } else if color.same_rgb(palette.negative_space) {
        Some(FillRole::NegativeSpace)
    } else {
        None
    }
}

fn measure_path(path: &usvg::Path) -> Option<BoundingBox> {
    let r = path.abs_bounding_box();
    let bbox = BoundingBox::new(
        f64::from(r.x()),
        f64::from(r.y()),
        f64::from(r.width()),
        f64::from(r.height()),
    );
    if bbox.is_well_formed() && (bbox.width > 0.0 || bbox.height > 0.0) {
        Some(bbox)
    } else {
        None
    }
}

/// Stroke length of `path` in canvas coordinates.
fn path_length(path: &usvg::Path) -> f64 {
    let bez = to_bez_path(path.data());
    let t = path.abs_transform();
    let affine = Affine::new([
        f64::from(t.sx),
        f64::from(t.ky),
        f64::from(t.kx),
        f64::from(t.sy),
        f64::from(t.tx),
        f64::from(t.ty),
    ]);
    (affine * bez)
        .segments()
        .map(|seg| seg.arclen(ARCLEN_ACCURACY))
        .sum()
}

fn to_bez_path(data: &usvg::tiny_skia_path::Path) -> BezPath {
    use usvg::tiny_skia_path::PathSegment;

    let pt = |p: usvg::tiny_skia_path::Point| kurbo::Point::new(f64::from(p.x), f64::from(p.y));
    let mut out = BezPath::new();
    for seg in data.segments() {
        match seg {
            PathSegment::MoveTo(p) => out.move_to(pt(p)),
            PathSegment::LineTo(p) => out.line_to(pt(p)),
            PathSegment::QuadTo(p1, p) => out.quad_to(pt(p1), pt(p)),
            PathSegment::CubicTo(p1, p2, p) => out.curve_to(pt(p1), pt(p2), pt(p)),
            PathSegment::Close => out.close_path(),
        }
    }
    out
}

#[cfg(test)]
#[path = "../../tests/unit/assets/svg.rs"]
mod tests;
