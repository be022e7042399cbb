use crate::{
    animation::{
        ease::Ease,
        tween::{Prop, Target, Tween, staggered_span},
    },
    foundation::error::{SplashError, SplashResult},
    shapes::classify::{Classified, ClassifiedShape, ShapeGroup, Zone},
    timeline::model::{Cursor, Position, Stage, StageKind, Timeline},
};

#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(deny_unknown_fields)]
/// Timing of one zone's stage.
pub struct StageTuning {
    /// Outline draw-in duration per shape (seconds).
    pub draw_duration: f64,
    /// Delay between consecutive shape starts during draw-in.
    pub draw_stagger: f64,
    /// Fill flood duration per shape.
    pub fill_duration: f64,
    /// Outline stroke width before the flood removes it.
    pub stroke_width: f64,
}

impl StageTuning {
    fn validate(&self, zone: Zone) -> SplashResult<()> {
        for (name, v) in [
            ("draw_duration", self.draw_duration),
            ("draw_stagger", self.draw_stagger),
            ("fill_duration", self.fill_duration),
            ("stroke_width", self.stroke_width),
        ] {
            if !(v.is_finite() && v >= 0.0) {
                return Err(SplashError::validation(format!(
                    "{zone:?}.{name} must be finite and >= 0"
                )));
            }
        }
        Ok(())
    }
}

#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
/// Per-zone tuning: emblem slowest, script fastest.
pub struct StageTunings {
    /// Emblem timing.
    pub emblem: StageTuning,
    /// Wordmark timing.
    pub wordmark: StageTuning,
    /// Script timing.
    pub script: StageTuning,
}

impl Default for StageTunings {
    fn default() -> Self {
        Self {
            emblem: StageTuning {
                draw_duration: 0.7,
                draw_stagger: 0.07,
                fill_duration: 0.35,
                stroke_width: 2.0,
            },
            wordmark: StageTuning {
                draw_duration: 0.5,
                draw_stagger: 0.03,
                fill_duration: 0.25,
                stroke_width: 1.5,
            },
            script: StageTuning {
                draw_duration: 0.35,
                draw_stagger: 0.02,
                fill_duration: 0.2,
                stroke_width: 1.0,
            },
        }
    }
}

impl StageTunings {
    /// Tuning for `zone`.
    pub fn get(&self, zone: Zone) -> &StageTuning {
        match zone {
            Zone::Emblem => &self.emblem,
            Zone::Wordmark => &self.wordmark,
            Zone::Script => &self.script,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
/// Negative-space reveal timing, shared by all zones.
pub struct RevealSettings {
    /// Fade-in duration per shape.
    pub duration: f64,
    /// Delay between consecutive shape starts.
    pub stagger: f64,
    /// How long before the end of the fill flood the reveal starts.
    pub lead: f64,
    /// Fade curve.
    pub ease: Ease,
}

impl Default for RevealSettings {
    fn default() -> Self {
        Self {
            duration: 0.2,
            stagger: 0.03,
            lead: 0.15,
            ease: Ease::OutQuad,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
/// Everything the choreographer needs besides the shapes.
pub struct ChoreographySettings {
    /// Per-zone timing.
    pub stages: StageTunings,
    /// Fill starts `fill_duration * fill_lead_ratio` before the draw-in ends.
    pub fill_lead_ratio: f64,
    /// Fill stagger is `draw_stagger * fill_stagger_ratio`.
    pub fill_stagger_ratio: f64,
    /// Draw-in curve.
    pub draw_ease: Ease,
    /// Flood curve.
    pub fill_ease: Ease,
    /// Negative-space reveal.
    pub reveal: RevealSettings,
    /// Still period after the last zone (seconds).
    pub hold: f64,
}

impl Default for ChoreographySettings {
    fn default() -> Self {
        Self {
            stages: StageTunings::default(),
            fill_lead_ratio: 0.6,
            fill_stagger_ratio: 0.3,
            draw_ease: Ease::InOutQuad,
            fill_ease: Ease::InCubic,
            reveal: RevealSettings::default(),
            hold: 0.5,
        }
    }
}

impl ChoreographySettings {
    /// Reject negative or non-finite timings.
    pub fn validate(&self) -> SplashResult<()> {
        for zone in Zone::ALL {
            self.stages.get(zone).validate(zone)?;
        }
        for (name, v) in [
            ("fill_lead_ratio", self.fill_lead_ratio),
            ("fill_stagger_ratio", self.fill_stagger_ratio),
            ("reveal.duration", self.reveal.duration),
            ("reveal.stagger", self.reveal.stagger),
            ("reveal.lead", self.reveal.lead),
            ("hold", self.hold),
        ] {
            if !(v.is_finite() && v >= 0.0) {
                return Err(SplashError::validation(format!(
                    "{name} must be finite and >= 0"
                )));
            }
        }
        Ok(())
    }
}

/// Build the zone stages and the hold.
///
/// Zones play emblem → wordmark → script; each zone's first group is appended at the end
/// of everything placed before it, so zones never overlap. Within a zone the fill flood
/// and the reveal start before the previous step ends, but never before that step starts.
#[tracing::instrument(skip_all)]
pub fn build_timeline(classified: &Classified, settings: &ChoreographySettings) -> Timeline {
    let mut cursor = Cursor::default();
    let mut stages = Vec::new();

    for group in classified.groups() {
        if group.ink.is_empty() {
            let start = cursor.place(Position::End, 0.0);
            stages.push(Stage {
                kind: StageKind::Skip(group.zone),
                start,
                duration: 0.0,
                tweens: Vec::new(),
            });
            tracing::debug!(zone = ?group.zone, "zone has no ink, stage skipped");
            continue;
        }
        zone_stages(group, settings, &mut cursor, &mut stages);
    }

    let hold_start = cursor.place(Position::End, settings.hold);
    stages.push(Stage {
        kind: StageKind::Hold,
        start: hold_start,
        duration: settings.hold,
        tweens: Vec::new(),
    });

    // stable: ties keep build order
    stages.sort_by(|a, b| a.start.total_cmp(&b.start));

    let timeline = Timeline {
        stages,
        end: cursor.end(),
    };
    tracing::debug!(
        stages = timeline.stages.len(),
        tweens = timeline.tween_count(),
        end = timeline.end,
        "built timeline"
    );
    timeline
}

fn zone_stages(
    group: &ShapeGroup,
    settings: &ChoreographySettings,
    cursor: &mut Cursor,
    stages: &mut Vec<Stage>,
) {
    let zone = group.zone;
    let tuning = settings.stages.get(zone);
    let n = group.ink.len();

    let draw_span = staggered_span(n, tuning.draw_duration, tuning.draw_stagger);
    let draw_start = cursor.place(Position::End, draw_span);
    let draw = staggered(&group.ink, draw_start, tuning.draw_stagger, |shape, start| {
        vec![Tween {
            target: Target::Shape(shape.id),
            prop: Prop::Draw,
            start,
            duration: tuning.draw_duration,
            ease: settings.draw_ease,
            from: 0.0,
            to: 1.0,
        }]
    });
    stages.push(Stage {
        kind: StageKind::Draw(zone),
        start: draw_start,
        duration: draw_span,
        tweens: draw,
    });

    let fill_stagger = tuning.draw_stagger * settings.fill_stagger_ratio;
    let fill_span = staggered_span(n, tuning.fill_duration, fill_stagger);
    let fill_start = cursor.place_from(
        draw_start,
        Position::BeforeEnd(tuning.fill_duration * settings.fill_lead_ratio),
        fill_span,
    );
    let fill = staggered(&group.ink, fill_start, fill_stagger, |shape, start| {
        vec![
            Tween {
                target: Target::Shape(shape.id),
                prop: Prop::FillAmount,
                start,
                duration: tuning.fill_duration,
                ease: settings.fill_ease,
                from: 0.0,
                to: 1.0,
            },
            Tween {
                target: Target::Shape(shape.id),
                prop: Prop::StrokeWidth,
                start,
                duration: tuning.fill_duration,
                ease: settings.fill_ease,
                from: tuning.stroke_width,
                to: 0.0,
            },
        ]
    });
    stages.push(Stage {
        kind: StageKind::Fill(zone),
        start: fill_start,
        duration: fill_span,
        tweens: fill,
    });

    if group.negative_space.is_empty() {
        return;
    }

    let reveal = &settings.reveal;
    let reveal_span = staggered_span(group.negative_space.len(), reveal.duration, reveal.stagger);
    let reveal_start =
        cursor.place_from(fill_start, Position::BeforeEnd(reveal.lead), reveal_span);
    let tweens = staggered(
        &group.negative_space,
        reveal_start,
        reveal.stagger,
        |shape, start| {
            vec![Tween {
                target: Target::Shape(shape.id),
                prop: Prop::Opacity,
                start,
                duration: reveal.duration,
                ease: reveal.ease,
                from: 0.0,
                to: 1.0,
            }]
        },
    );
    stages.push(Stage {
        kind: StageKind::Reveal(zone),
        start: reveal_start,
        duration: reveal_span,
        tweens,
    });
}

fn staggered(
    shapes: &[ClassifiedShape],
    start: f64,
    stagger: f64,
    mut make: impl FnMut(&ClassifiedShape, f64) -> Vec<Tween>,
) -> Vec<Tween> {
    shapes
        .iter()
        .enumerate()
        .flat_map(|(i, shape)| make(shape, start + stagger * i as f64))
        .collect()
}

#[cfg(test)]
#[path = "../../tests/unit/timeline/choreograph.rs"]
mod tests;
