use crate::{
    foundation::core::{BoundingBox, ShapeId, ViewBox},
    foundation::error::{SplashError, SplashResult},
    shapes::extract::{Extracted, FillRole, RawShape},
};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
/// Vertical region of the illustration. Declaration order is play order.
pub enum Zone {
    /// Top region: the pictorial mark.
    Emblem,
    /// Middle region: the brand name.
    Wordmark,
    /// Bottom region: the fine script line.
    Script,
}

impl Zone {
    /// All zones in play order.
    pub const ALL: [Zone; 3] = [Zone::Emblem, Zone::Wordmark, Zone::Script];
}

#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(deny_unknown_fields)]
/// The two vertical cutoffs on a shape's center `cy`.
pub struct ZoneCutoffs {
    /// `cy` below this is emblem.
    pub emblem_below: f64,
    /// `cy` below this (and not emblem) is wordmark; the rest is script.
    pub wordmark_below: f64,
}

impl Default for ZoneCutoffs {
    fn default() -> Self {
        Self {
            emblem_below: 370.0,
            wordmark_below: 475.0,
        }
    }
}

impl ZoneCutoffs {
    /// Zone for a vertical center.
    pub fn zone_of(&self, cy: f64) -> Zone {
        if cy < self.emblem_below {
            Zone::Emblem
        } else if cy < self.wordmark_below {
            Zone::Wordmark
        } else {
            Zone::Script
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
/// Filtering and zoning constants for one illustration.
pub struct ClassifyRules {
    /// Illustration coordinate space.
    pub view_box: ViewBox,
    /// Vertical zone cutoffs.
    pub cutoffs: ZoneCutoffs,
    /// Shapes smaller than this on both axes are noise.
    pub min_extent: f64,
}

impl Default for ClassifyRules {
    fn default() -> Self {
        Self {
            view_box: ViewBox::default(),
            cutoffs: ZoneCutoffs::default(),
            min_extent: 5.0,
        }
    }
}

impl ClassifyRules {
    /// Reject inconsistent constants.
    pub fn validate(&self) -> SplashResult<()> {
        self.view_box.validate()?;
        let ZoneCutoffs {
            emblem_below,
            wordmark_below,
        } = self.cutoffs;
        if !emblem_below.is_finite() || !wordmark_below.is_finite() {
            return Err(SplashError::validation("zone cutoffs must be finite"));
        }
        if emblem_below >= wordmark_below {
            return Err(SplashError::validation(
                "cutoffs.emblem_below must be < cutoffs.wordmark_below",
            ));
        }
        if !(self.min_extent.is_finite() && self.min_extent >= 0.0) {
            return Err(SplashError::validation(
                "min_extent must be finite and >= 0",
            ));
        }
        Ok(())
    }

    /// `true` when a shape with this box takes part in the animation.
    pub fn accepts(&self, bbox: &BoundingBox) -> bool {
        if self.view_box.excludes(bbox) {
            return false;
        }
        !(bbox.width < self.min_extent && bbox.height < self.min_extent)
    }
}

#[derive(Clone, Debug, PartialEq, serde::Serialize)]
/// A shape that passed filtering, with its zone and ordering key.
pub struct ClassifiedShape {
    /// Stable shape identity.
    pub id: ShapeId,
    /// Fill role.
    pub role: FillRole,
    /// Vertical region.
    pub zone: Zone,
    /// Native bounding box.
    pub bbox: BoundingBox,
    /// Horizontal center, the draw-order key.
    pub cx: f64,
    /// Stroke length.
    pub path_length: f64,
}

#[derive(Clone, Debug, PartialEq, serde::Serialize)]
/// All shapes of one zone.
pub struct ShapeGroup {
    /// Zone shared by every member.
    pub zone: Zone,
    /// Ink shapes, ascending `cx` (stable for equal keys).
    pub ink: Vec<ClassifiedShape>,
    /// Negative-space shapes, document order.
    pub negative_space: Vec<ClassifiedShape>,
}

impl ShapeGroup {
    fn empty(zone: Zone) -> Self {
        Self {
            zone,
            ink: Vec::new(),
            negative_space: Vec::new(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, serde::Serialize)]
/// Classification result: one group per zone.
pub struct Classified {
    /// Top region.
    pub emblem: ShapeGroup,
    /// Middle region.
    pub wordmark: ShapeGroup,
    /// Bottom region.
    pub script: ShapeGroup,
}

impl Classified {
    /// Group for `zone`.
    pub fn group(&self, zone: Zone) -> &ShapeGroup {
        match zone {
            Zone::Emblem => &self.emblem,
            Zone::Wordmark => &self.wordmark,
            Zone::Script => &self.script,
        }
    }

    fn group_mut(&mut self, zone: Zone) -> &mut ShapeGroup {
        match zone {
            Zone::Emblem => &mut self.emblem,
            Zone::Wordmark => &mut self.wordmark,
            Zone::Script => &mut self.script,
        }
    }

    /// Groups in play order.
    pub fn groups(&self) -> impl Iterator<Item = &ShapeGroup> {
        Zone::ALL.into_iter().map(|z| self.group(z))
    }

    /// Every classified shape, zone by zone, ink before negative space.
    pub fn shapes(&self) -> impl Iterator<Item = &ClassifiedShape> {
        self.groups()
            .flat_map(|g| g.ink.iter().chain(g.negative_space.iter()))
    }
}

/// Filter, zone and order extracted shapes.
#[tracing::instrument(skip(extracted, rules), fields(shapes = extracted.len()))]
pub fn classify_shapes(extracted: &Extracted, rules: &ClassifyRules) -> Classified {
    let mut out = Classified {
        emblem: ShapeGroup::empty(Zone::Emblem),
        wordmark: ShapeGroup::empty(Zone::Wordmark),
        script: ShapeGroup::empty(Zone::Script),
    };

    for raw in extracted.ink.iter().chain(extracted.negative_space.iter()) {
        let Some(shape) = classify_one(raw, rules) else {
            tracing::trace!(id = raw.id.0, "shape outside view box or below min extent");
            continue;
        };
        let group = out.group_mut(shape.zone);
        match shape.role {
            FillRole::Ink => group.ink.push(shape),
            FillRole::NegativeSpace => group.negative_space.push(shape),
        }
    }

    for zone in Zone::ALL {
        // stable: equal centers keep document order
        out.group_mut(zone)
            .ink
            .sort_by(|a, b| a.cx.total_cmp(&b.cx));
    }

    for g in out.groups() {
        tracing::debug!(
            zone = ?g.zone,
            ink = g.ink.len(),
            negative_space = g.negative_space.len(),
            "classified zone"
        );
    }
    out
}

fn classify_one(raw: &RawShape, rules: &ClassifyRules) -> Option<ClassifiedShape> {
    if !rules.accepts(&raw.bbox) {
        return None;
    }
    Some(ClassifiedShape {
        id: raw.id,
        role: raw.role,
        zone: rules.cutoffs.zone_of(raw.bbox.cy()),
        bbox: raw.bbox,
        cx: raw.bbox.cx(),
        path_length: raw.path_length,
    })
}

#[cfg(test)]
#[path = "../../tests/unit/shapes/classify.rs"]
mod tests;
