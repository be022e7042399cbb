use std::collections::BTreeMap;

use crate::{
    animation::tween::{Prop, Target},
    foundation::core::{Affine, Point, Rgba8, ShapeId, Transform2D, Vec2},
    shapes::{
        classify::{Classified, Zone},
        extract::FillRole,
    },
    timeline::choreograph::ChoreographySettings,
};

#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
/// Colors used by the splash.
pub struct Palette {
    /// Final fill of ink shapes; also the fill color that tags ink in SVG input.
    pub ink: Rgba8,
    /// Fill color that tags negative-space shapes in SVG input.
    pub negative_space: Rgba8,
    /// Outline color during draw-in.
    pub stroke: Rgba8,
    /// Backdrop color; negative-space shapes are repainted with it.
    pub background: Rgba8,
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            ink: Rgba8::rgb(0x00, 0x00, 0x00),
            negative_space: Rgba8::rgb(0xff, 0xff, 0xff),
            stroke: Rgba8::rgb(0x1a, 0x10, 0x08),
            background: Rgba8::rgb(0xff, 0xf8, 0xf0),
        }
    }
}

#[derive(Clone, Debug, PartialEq, serde::Serialize)]
/// Resolved visual state of one shape.
pub struct ShapeVisual {
    /// Shape identity.
    pub id: ShapeId,
    /// Zone of the shape.
    pub zone: Zone,
    /// Fill role.
    pub role: FillRole,
    /// Visible stroke fraction in `[0, 1]`.
    pub draw: f64,
    /// Dash offset that hides the undrawn part of a `path_length` dash.
    pub dash_offset: f64,
    /// Full stroke length.
    pub path_length: f64,
    /// Stroke width, `0` when no stroke is shown.
    pub stroke_width: f64,
    /// Stroke color. Outlines are meant to be painted with round caps and joins.
    pub stroke: Rgba8,
    /// Fill color (alpha carries the flood amount).
    pub fill: Rgba8,
    /// Element opacity.
    pub opacity: f64,
}

#[derive(Clone, Debug, PartialEq, serde::Serialize)]
/// Everything a host needs to paint the splash at one instant.
pub struct SplashFrame {
    /// Seconds since mount.
    pub time: f64,
    /// Classified shapes; unlisted shapes render as authored.
    pub shapes: Vec<ShapeVisual>,
    /// Illustration container transform in page space.
    pub container_transform: Transform2D,
    /// Same transform as a matrix.
    pub container_affine: Affine,
    /// Illustration container opacity.
    pub container_opacity: f64,
    /// Backdrop color.
    pub backdrop: Rgba8,
    /// Opacity of the whole splash surface.
    pub surface_opacity: f64,
}

#[derive(Clone, Debug, PartialEq)]
struct ShapeState {
    id: ShapeId,
    zone: Zone,
    role: FillRole,
    path_length: f64,
    draw: f64,
    fill_amount: f64,
    stroke_width: f64,
    opacity: f64,
}

#[derive(Clone, Debug, PartialEq)]
/// Mutable property store written by tweens.
pub struct SceneState {
    shapes: Vec<ShapeState>,
    index: BTreeMap<ShapeId, usize>,
    translate: Vec2,
    scale: f64,
    anchor: Point,
    container_opacity: f64,
    backdrop_alpha: f64,
    surface_opacity: f64,
}

impl SceneState {
    /// Pre-animation state: ink as empty outlines, negative space hidden.
    pub fn prepared(classified: &Classified, settings: &ChoreographySettings) -> Self {
        let mut shapes = Vec::new();
        for shape in classified.shapes() {
            let state = match shape.role {
                FillRole::Ink => ShapeState {
                    id: shape.id,
                    zone: shape.zone,
                    role: shape.role,
                    path_length: shape.path_length,
                    draw: 0.0,
                    fill_amount: 0.0,
                    stroke_width: settings.stages.get(shape.zone).stroke_width,
                    opacity: 1.0,
                },
                FillRole::NegativeSpace => ShapeState {
                    id: shape.id,
                    zone: shape.zone,
                    role: shape.role,
                    path_length: shape.path_length,
                    draw: 1.0,
                    fill_amount: 1.0,
                    stroke_width: 0.0,
                    opacity: 0.0,
                },
            };
            shapes.push(state);
        }
        let index = shapes.iter().enumerate().map(|(i, s)| (s.id, i)).collect();

        Self {
            shapes,
            index,
            translate: Vec2::ZERO,
            scale: 1.0,
            anchor: Point::ORIGIN,
            container_opacity: 1.0,
            backdrop_alpha: 1.0,
            surface_opacity: 1.0,
        }
    }

    /// Pivot for container scaling.
    pub fn set_anchor(&mut self, anchor: Point) {
        self.anchor = anchor;
    }

    /// Write one property value. Unknown shapes are ignored.
    pub fn set(&mut self, target: Target, prop: Prop, value: f64) {
        match target {
            Target::Shape(id) => {
                let Some(&i) = self.index.get(&id) else {
                    return;
                };
                let s = &mut self.shapes[i];
                match prop {
                    Prop::Draw => s.draw = value.clamp(0.0, 1.0),
                    Prop::FillAmount => s.fill_amount = value.clamp(0.0, 1.0),
                    Prop::StrokeWidth => s.stroke_width = value.max(0.0),
                    Prop::Opacity => s.opacity = value.clamp(0.0, 1.0),
                    _ => {}
                }
            }
            Target::Container => match prop {
                Prop::TranslateX => self.translate.x = value,
                Prop::TranslateY => self.translate.y = value,
                Prop::Scale => self.scale = value,
                Prop::Opacity => self.container_opacity = value.clamp(0.0, 1.0),
                _ => {}
            },
            Target::Backdrop => {
                if prop == Prop::BackdropAlpha {
                    self.backdrop_alpha = value.clamp(0.0, 1.0);
                }
            }
            Target::Surface => {
                if prop == Prop::Opacity {
                    self.surface_opacity = value.clamp(0.0, 1.0);
                }
            }
        }
    }

    /// Resolve into colors and a container transform.
    pub fn to_frame(&self, time: f64, palette: &Palette) -> SplashFrame {
        let shapes = self
            .shapes
            .iter()
            .map(|s| match s.role {
                FillRole::Ink => ShapeVisual {
                    id: s.id,
                    zone: s.zone,
                    role: s.role,
                    draw: s.draw,
                    dash_offset: s.path_length * (1.0 - s.draw),
                    path_length: s.path_length,
                    stroke_width: s.stroke_width,
                    stroke: palette.stroke,
                    fill: palette.ink.faded(s.fill_amount),
                    opacity: s.opacity,
                },
                FillRole::NegativeSpace => ShapeVisual {
                    id: s.id,
                    zone: s.zone,
                    role: s.role,
                    draw: 1.0,
                    dash_offset: 0.0,
                    path_length: s.path_length,
                    stroke_width: 0.0,
                    stroke: palette.stroke.with_alpha(0),
                    fill: palette.background,
                    opacity: s.opacity,
                },
            })
            .collect();

        let container_transform = Transform2D {
            translate: self.translate,
            scale: self.scale,
            anchor: self.anchor,
        };

        SplashFrame {
            time,
            shapes,
            container_transform,
            container_affine: container_transform.to_affine(),
            container_opacity: self.container_opacity,
            backdrop: palette.background.faded(self.backdrop_alpha),
            surface_opacity: self.surface_opacity,
        }
    }
}

impl SplashFrame {
    /// Visual state of `id`, if it is animated.
    pub fn shape(&self, id: ShapeId) -> Option<&ShapeVisual> {
        self.shapes.iter().find(|s| s.id == id)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/timeline/scene.rs"]
mod tests;
