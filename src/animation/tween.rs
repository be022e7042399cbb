use crate::{animation::ease::Ease, foundation::core::ShapeId};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(tag = "kind", content = "id", rename_all = "snake_case")]
/// What a tween writes to.
pub enum Target {
    /// One illustration shape.
    Shape(ShapeId),
    /// The element wrapping the illustration (moved and scaled by the dock step).
    Container,
    /// The full-screen backdrop behind the illustration.
    Backdrop,
    /// The whole splash surface (container + backdrop).
    Surface,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
/// Animated visual property. All values are scalars.
pub enum Prop {
    /// Visible fraction of the stroke, `0..=1` of the path length.
    Draw,
    /// Ink flood amount, `0` transparent to `1` solid ink.
    FillAmount,
    /// Stroke width in illustration units.
    StrokeWidth,
    /// Opacity in `[0, 1]`.
    Opacity,
    /// Backdrop color alpha in `[0, 1]`.
    BackdropAlpha,
    /// Horizontal translation in page units.
    TranslateX,
    /// Vertical translation in page units.
    TranslateY,
    /// Uniform scale.
    Scale,
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
/// One property animated from `from` to `to` over `[start, start + duration]` seconds.
pub struct Tween {
    /// Animated element.
    pub target: Target,
    /// Animated property.
    pub prop: Prop,
    /// Start offset in seconds on the owning timeline's clock.
    pub start: f64,
    /// Duration in seconds.
    pub duration: f64,
    /// Easing curve.
    pub ease: Ease,
    /// Value at progress 0.
    pub from: f64,
    /// Value at progress 1.
    pub to: f64,
}

impl Tween {
    /// End offset in seconds.
    pub fn end(&self) -> f64 {
        self.start + self.duration
    }

    /// Linear progress at time `t`, `None` before the tween starts.
    pub fn progress(&self, t: f64) -> Option<f64> {
        if t < self.start {
            return None;
        }
        if self.duration <= 0.0 {
            return Some(1.0);
        }
        Some(((t - self.start) / self.duration).clamp(0.0, 1.0))
    }

    /// Eased value at time `t`, `None` before the tween starts.
    pub fn sample(&self, t: f64) -> Option<f64> {
        let p = self.ease.apply(self.progress(t)?);
        Some(self.from + (self.to - self.from) * p)
    }
}

/// Span covered by `count` tweens of `duration` whose starts are `stagger` apart.
pub fn staggered_span(count: usize, duration: f64, stagger: f64) -> f64 {
    if count == 0 {
        return 0.0;
    }
    duration + stagger * (count - 1) as f64
}

#[cfg(test)]
#[path = "../../tests/unit/animation/tween.rs"]
mod tests;
