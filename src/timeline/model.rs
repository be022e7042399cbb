use crate::{
    animation::tween::{Target, Tween},
    shapes::classify::Zone,
    timeline::scene::SceneState,
};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(tag = "stage", content = "zone", rename_all = "snake_case")]
/// Kind of a timeline segment.
pub enum StageKind {
    /// Ink outlines drawn along their stroke length.
    Draw(Zone),
    /// Ink interiors flooded, strokes removed.
    Fill(Zone),
    /// Negative-space details faded in.
    Reveal(Zone),
    /// Zone had no ink; nothing plays.
    Skip(Zone),
    /// Completed mark held still before docking.
    Hold,
}

impl StageKind {
    /// Zone the stage belongs to, `None` for the hold.
    pub fn zone(self) -> Option<Zone> {
        match self {
            Self::Draw(z) | Self::Fill(z) | Self::Reveal(z) | Self::Skip(z) => Some(z),
            Self::Hold => None,
        }
    }
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
/// One timeline segment and the tweens it owns.
pub struct Stage {
    /// Segment kind.
    pub kind: StageKind,
    /// Start offset in seconds.
    pub start: f64,
    /// Span in seconds, stagger included.
    pub duration: f64,
    /// Per-shape property tweens.
    pub tweens: Vec<Tween>,
}

impl Stage {
    /// End offset in seconds.
    pub fn end(&self) -> f64 {
        self.start + self.duration
    }

    /// Number of distinct shapes animated by the stage.
    pub fn shape_count(&self) -> usize {
        self.tweens
            .iter()
            .filter_map(|t| match t.target {
                Target::Shape(id) => Some(id),
                _ => None,
            })
            .collect::<std::collections::BTreeSet<_>>()
            .len()
    }
}

#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
/// Ordered stages plus the scheduled dock call point.
pub struct Timeline {
    /// Stages sorted by start (ties keep build order).
    pub stages: Vec<Stage>,
    /// Offset where the hold ends and the dock transition is invoked.
    pub end: f64,
}

impl Timeline {
    /// Write every property value active at `t` into `scene`.
    pub fn apply(&self, t: f64, scene: &mut SceneState) {
        for tween in self.stages.iter().flat_map(|s| s.tweens.iter()) {
            if let Some(v) = tween.sample(t) {
                scene.set(tween.target, tween.prop, v);
            }
        }
    }

    /// First stage of `kind`, if any.
    pub fn stage(&self, kind: StageKind) -> Option<&Stage> {
        self.stages.iter().find(|s| s.kind == kind)
    }

    /// Total number of tweens.
    pub fn tween_count(&self) -> usize {
        self.stages.iter().map(|s| s.tweens.len()).sum()
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
/// Where a group is placed relative to the timeline built so far.
pub(crate) enum Position {
    /// At the current end.
    End,
    /// This many seconds before the current end (never before 0).
    BeforeEnd(f64),
    /// At an absolute offset.
    At(f64),
}

#[derive(Clone, Copy, Debug, Default)]
/// Tracks the end of everything placed so far.
pub(crate) struct Cursor {
    end: f64,
}

impl Cursor {
    /// Reserve `span` seconds at `pos`; returns the start offset.
    pub(crate) fn place(&mut self, pos: Position, span: f64) -> f64 {
        self.place_from(0.0, pos, span)
    }

    /// Like [`place`](Self::place), but the start never precedes `floor`.
    pub(crate) fn place_from(&mut self, floor: f64, pos: Position, span: f64) -> f64 {
        let start = match pos {
            Position::End => self.end,
            Position::BeforeEnd(d) => self.end - d,
            Position::At(t) => t,
        }
        .max(floor)
        .max(0.0);
        self.end = self.end.max(start + span);
        start
    }

    pub(crate) fn end(&self) -> f64 {
        self.end
    }
}

#[cfg(test)]
#[path = "../../tests/unit/timeline/model.rs"]
mod tests;
