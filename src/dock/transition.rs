use crate::{
    animation::{
        ease::Ease,
        tween::{Prop, Target, Tween},
    },
    dock::{completion::CompletionSignal, host::DockHost},
    foundation::core::{Point, Rect, Vec2},
    foundation::error::{SplashError, SplashResult},
    timeline::{
        model::{Cursor, Position},
        scene::SceneState,
        stop::StopToken,
    },
};

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
/// Timing of the shrink-and-dock step and of the fallback fade.
pub struct DockSettings {
    /// Identifier of the page element the mark docks into.
    pub target_id: String,
    /// Translate + scale duration.
    pub move_duration: f64,
    /// Translate + scale curve.
    pub move_ease: Ease,
    /// Backdrop fade start, relative to the dock start.
    pub backdrop_delay: f64,
    /// Backdrop fade duration.
    pub backdrop_duration: f64,
    /// Backdrop fade curve.
    pub backdrop_ease: Ease,
    /// Container fade-out duration.
    pub fade_duration: f64,
    /// How long before the end of the motion the container fade starts.
    pub fade_overlap: f64,
    /// Container fade curve.
    pub fade_ease: Ease,
    /// Whole-surface fade duration when no target is found.
    pub fallback_duration: f64,
    /// Whole-surface fade curve.
    pub fallback_ease: Ease,
}

impl Default for DockSettings {
    fn default() -> Self {
        Self {
            target_id: "home-brand".to_string(),
            move_duration: 0.8,
            move_ease: Ease::InOutQuart,
            backdrop_delay: 0.2,
            backdrop_duration: 0.6,
            backdrop_ease: Ease::OutCubic,
            fade_duration: 0.25,
            fade_overlap: 0.2,
            fade_ease: Ease::InCubic,
            fallback_duration: 0.5,
            fallback_ease: Ease::InCubic,
        }
    }
}

impl DockSettings {
    /// Reject an empty target id and negative or non-finite timings.
    pub fn validate(&self) -> SplashResult<()> {
        if self.target_id.trim().is_empty() {
            return Err(SplashError::validation("dock.target_id must be non-empty"));
        }
        for (name, v) in [
            ("move_duration", self.move_duration),
            ("backdrop_delay", self.backdrop_delay),
            ("backdrop_duration", self.backdrop_duration),
            ("fade_duration", self.fade_duration),
            ("fade_overlap", self.fade_overlap),
            ("fallback_duration", self.fallback_duration),
        ] {
            if !(v.is_finite() && v >= 0.0) {
                return Err(SplashError::validation(format!(
                    "dock.{name} must be finite and >= 0"
                )));
            }
        }
        Ok(())
    }
}

#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
/// Container and target rectangles, sampled once.
pub struct DockGeometry {
    /// Illustration container.
    pub container: Rect,
    /// Dock target.
    pub target: Rect,
}

impl DockGeometry {
    /// Read the geometry from `host`; `None` when the target is missing.
    ///
    /// Both rectangles are normalized, so flipped corners never mirror the shrink.
    pub fn resolve(host: &impl DockHost, target_id: &str) -> Option<Self> {
        let target = host.locate(target_id)?.abs();
        Some(Self {
            container: host.container_rect().abs(),
            target,
        })
    }

    /// Uniform scale that matches the container height to the target height.
    pub fn scale(&self) -> f64 {
        self.target.height() / self.container.height()
    }

    /// Vector from the container center to the target center.
    pub fn translation(&self) -> Vec2 {
        self.target.center() - self.container.center()
    }

    fn is_usable(&self) -> bool {
        let h = self.container.height();
        h.is_finite() && h > 0.0 && self.scale().is_finite() && {
            let t = self.translation();
            t.x.is_finite() && t.y.is_finite()
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
/// Which ending ran.
pub enum DockBranch {
    /// Shrink into the dock target.
    Dock,
    /// Fade the whole surface out.
    Fallback,
}

#[derive(Clone, Debug, PartialEq, serde::Serialize)]
/// Tweens of the closing transition, on a clock that starts at hold end.
pub struct DockPlan {
    /// Branch taken.
    pub branch: DockBranch,
    /// Container scale pivot (container center).
    pub anchor: Point,
    /// Closing tweens.
    pub tweens: Vec<Tween>,
    /// Time until completion.
    pub duration: f64,
}

impl DockPlan {
    /// Plan Branch A when `geometry` is present and usable, Branch B otherwise.
    pub fn new(settings: &DockSettings, geometry: Option<DockGeometry>) -> Self {
        match geometry {
            Some(g) if g.is_usable() => Self::dock(settings, g),
            Some(g) => {
                tracing::warn!(
                    container = ?g.container,
                    "container has no usable height, falling back to fade"
                );
                Self::fallback(settings)
            }
            None => Self::fallback(settings),
        }
    }

    fn dock(settings: &DockSettings, g: DockGeometry) -> Self {
        let translation = g.translation();
        let scale = g.scale();
        let mut cursor = Cursor::default();
        let mut tweens = Vec::new();

        let move_start = cursor.place(Position::End, settings.move_duration);
        for (prop, to, from) in [
            (Prop::TranslateX, translation.x, 0.0),
            (Prop::TranslateY, translation.y, 0.0),
            (Prop::Scale, scale, 1.0),
        ] {
            tweens.push(Tween {
                target: Target::Container,
                prop,
                start: move_start,
                duration: settings.move_duration,
                ease: settings.move_ease,
                from,
                to,
            });
        }

        let backdrop_start = cursor.place(
            Position::At(settings.backdrop_delay),
            settings.backdrop_duration,
        );
        tweens.push(Tween {
            target: Target::Backdrop,
            prop: Prop::BackdropAlpha,
            start: backdrop_start,
            duration: settings.backdrop_duration,
            ease: settings.backdrop_ease,
            from: 1.0,
            to: 0.0,
        });

        let fade_start = cursor.place(
            Position::BeforeEnd(settings.fade_overlap),
            settings.fade_duration,
        );
        tweens.push(Tween {
            target: Target::Container,
            prop: Prop::Opacity,
            start: fade_start,
            duration: settings.fade_duration,
            ease: settings.fade_ease,
            from: 1.0,
            to: 0.0,
        });

        tracing::debug!(scale, dx = translation.x, dy = translation.y, "planned dock");
        Self {
            branch: DockBranch::Dock,
            anchor: g.container.center(),
            tweens,
            duration: cursor.end(),
        }
    }

    fn fallback(settings: &DockSettings) -> Self {
        tracing::debug!("dock target missing, planned fallback fade");
        Self {
            branch: DockBranch::Fallback,
            anchor: Point::ORIGIN,
            tweens: vec![Tween {
                target: Target::Surface,
                prop: Prop::Opacity,
                start: 0.0,
                duration: settings.fallback_duration,
                ease: settings.fallback_ease,
                from: 1.0,
                to: 0.0,
            }],
            duration: settings.fallback_duration,
        }
    }

    /// `true` when the plan moves or scales the container.
    pub fn has_transform(&self) -> bool {
        self.tweens.iter().any(|t| {
            matches!(
                t.prop,
                Prop::TranslateX | Prop::TranslateY | Prop::Scale
            )
        })
    }

    /// Write every value active at `t` (dock clock) into `scene`.
    pub fn apply(&self, t: f64, scene: &mut SceneState) {
        scene.set_anchor(self.anchor);
        for tween in &self.tweens {
            if let Some(v) = tween.sample(t) {
                scene.set(tween.target, tween.prop, v);
            }
        }
    }
}

#[derive(Debug)]
/// Running closing transition that owns the completion callback.
pub struct DockTransition {
    plan: DockPlan,
    elapsed: f64,
    completion: Option<CompletionSignal>,
}

impl DockTransition {
    /// Start `plan`, taking ownership of `completion`.
    pub fn start(plan: DockPlan, completion: CompletionSignal) -> Self {
        Self {
            plan,
            elapsed: 0.0,
            completion: Some(completion),
        }
    }

    /// Planned tweens.
    pub fn plan(&self) -> &DockPlan {
        &self.plan
    }

    /// Give back the plan once the transition is over.
    pub fn into_plan(self) -> DockPlan {
        self.plan
    }

    /// Seconds since the transition started.
    pub fn elapsed(&self) -> f64 {
        self.elapsed
    }

    /// `true` once the completion callback has been consumed.
    pub fn is_finished(&self) -> bool {
        self.completion.is_none()
    }

    /// Advance by `dt` seconds; fires completion and returns `true` on the step that
    /// reaches the end. A stopped token drops the callback unfired.
    pub fn advance(&mut self, dt: f64, stop: &StopToken) -> bool {
        if stop.is_stopped() {
            self.completion = None;
            return false;
        }
        if self.completion.is_none() {
            return false;
        }
        self.elapsed += dt;
        if self.elapsed < self.plan.duration {
            return false;
        }
        self.elapsed = self.elapsed.min(self.plan.duration);
        if let Some(done) = self.completion.take() {
            done.fire();
        }
        true
    }

    /// Write the current values into `scene`.
    pub fn apply(&self, scene: &mut SceneState) {
        self.plan.apply(self.elapsed, scene);
    }
}

#[cfg(test)]
#[path = "../../tests/unit/dock/transition.rs"]
mod tests;
