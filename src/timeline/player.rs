use crate::{
    config::model::SplashConfig,
    dock::{
        completion::CompletionSignal,
        host::DockHost,
        transition::{DockBranch, DockGeometry, DockPlan, DockTransition},
    },
    foundation::error::SplashResult,
    shapes::{
        classify::{Classified, Zone, classify_shapes},
        extract::{Illustration, extract_shapes},
    },
    timeline::{
        choreograph::build_timeline,
        model::{StageKind, Timeline},
        scene::{SceneState, SplashFrame},
        stop::StopToken,
    },
};

#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
/// Observable transitions of a run, in the order they happen.
pub enum SplashEvent {
    /// A draw, fill or reveal stage began.
    StageStarted {
        /// Stage kind.
        kind: StageKind,
        /// Number of shapes it animates.
        shapes: usize,
    },
    /// A zone without ink was passed over.
    ZoneSkipped {
        /// Skipped zone.
        zone: Zone,
    },
    /// The hold period began.
    HoldStarted,
    /// Dock geometry was read and the closing transition began.
    DockStarted {
        /// Branch taken.
        branch: DockBranch,
    },
    /// The completion callback was invoked.
    Completed,
    /// The run was cancelled; nothing fires afterwards.
    Cancelled,
}

#[derive(Debug)]
enum Phase {
    Stages,
    Docking(DockTransition),
    Done(DockPlan),
    Cancelled,
}

/// Drives one splash run: stages by elapsed time, then the dock transition.
///
/// Nothing blocks: the host calls [`advance`](Self::advance) from its frame loop and
/// reads [`frame`](Self::frame) to paint. Dropping the player tears the run down without
/// invoking the completion callback.
pub struct SplashPlayer<H: DockHost> {
    config: SplashConfig,
    classified: Classified,
    timeline: Timeline,
    initial: SceneState,
    host: H,
    stop: StopToken,
    clock: f64,
    next_stage: usize,
    completion: Option<CompletionSignal>,
    phase: Phase,
}

impl<H: DockHost> SplashPlayer<H> {
    /// Extract, classify and choreograph `illustration`, then return a player at time 0.
    ///
    /// Only an invalid `config` is an error; everything about the illustration and the
    /// page degrades gracefully.
    #[tracing::instrument(skip_all)]
    pub fn mount(
        illustration: &impl Illustration,
        config: SplashConfig,
        host: H,
        on_complete: impl FnOnce() + 'static,
    ) -> SplashResult<Self> {
        config.validate()?;

        let extracted = extract_shapes(illustration);
        let classified = classify_shapes(&extracted, &config.rules);
        let timeline = build_timeline(&classified, &config.choreography);
        let initial = SceneState::prepared(&classified, &config.choreography);

        Ok(Self {
            config,
            classified,
            timeline,
            initial,
            host,
            stop: StopToken::new(),
            clock: 0.0,
            next_stage: 0,
            completion: Some(CompletionSignal::new(on_complete)),
            phase: Phase::Stages,
        })
    }

    /// Handle that cancels this run from anywhere in the host.
    pub fn stop_token(&self) -> StopToken {
        self.stop.clone()
    }

    /// Cancel the run. Idempotent.
    pub fn cancel(&mut self) {
        self.stop.stop();
    }

    /// Built timeline.
    pub fn timeline(&self) -> &Timeline {
        &self.timeline
    }

    /// Classification the timeline was built from.
    pub fn classified(&self) -> &Classified {
        &self.classified
    }

    /// Active configuration.
    pub fn config(&self) -> &SplashConfig {
        &self.config
    }

    /// Closing plan, once the hold has ended.
    pub fn dock_plan(&self) -> Option<&DockPlan> {
        match &self.phase {
            Phase::Docking(tr) => Some(tr.plan()),
            Phase::Done(plan) => Some(plan),
            Phase::Stages | Phase::Cancelled => None,
        }
    }

    /// Seconds since mount (stops advancing once finished or cancelled).
    pub fn elapsed(&self) -> f64 {
        match &self.phase {
            Phase::Docking(tr) => self.timeline.end + tr.elapsed(),
            Phase::Done(plan) => self.timeline.end + plan.duration,
            Phase::Stages | Phase::Cancelled => self.clock,
        }
    }

    /// `true` after completion fired.
    pub fn is_finished(&self) -> bool {
        matches!(self.phase, Phase::Done(_))
    }

    /// `true` after cancellation.
    pub fn is_cancelled(&self) -> bool {
        matches!(self.phase, Phase::Cancelled)
    }

    /// Advance the run by `dt` seconds and report what happened on the way.
    ///
    /// Negative or non-finite steps count as zero. Once finished or cancelled the player
    /// ignores further calls.
    pub fn advance(&mut self, dt: f64) -> Vec<SplashEvent> {
        let dt = if dt.is_finite() { dt.max(0.0) } else { 0.0 };
        let mut events = Vec::new();

        if matches!(self.phase, Phase::Done(_) | Phase::Cancelled)
            || self.check_stopped(&mut events)
        {
            return events;
        }

        if matches!(self.phase, Phase::Docking(_)) {
            self.advance_dock(dt, &mut events);
            return events;
        }

        let target = self.clock + dt;
        if !self.run_stages(target, &mut events) {
            return events;
        }
        if target < self.timeline.end {
            self.clock = target;
            return events;
        }
        self.clock = self.timeline.end;
        if self.begin_dock(&mut events) {
            // carry the remainder into the dock clock
            self.advance_dock(target - self.timeline.end, &mut events);
        }
        events
    }

    /// Visual state at the current time.
    pub fn frame(&self) -> SplashFrame {
        let mut scene = self.initial.clone();
        let stages_t = self.clock.min(self.timeline.end);
        self.timeline.apply(stages_t, &mut scene);
        match &self.phase {
            Phase::Docking(tr) => tr.apply(&mut scene),
            Phase::Done(plan) => plan.apply(plan.duration, &mut scene),
            Phase::Stages | Phase::Cancelled => {}
        }
        scene.to_frame(self.elapsed(), &self.config.palette)
    }

    /// Emit every stage whose start is at or before `until`. Returns `false` when the run
    /// was cancelled on the way.
    fn run_stages(&mut self, until: f64, events: &mut Vec<SplashEvent>) -> bool {
        while let Some(stage) = self.timeline.stages.get(self.next_stage) {
            if stage.start > until {
                break;
            }
            let at = stage.start;
            let event = match stage.kind {
                StageKind::Skip(zone) => SplashEvent::ZoneSkipped { zone },
                StageKind::Hold => SplashEvent::HoldStarted,
                kind => SplashEvent::StageStarted {
                    kind,
                    shapes: stage.shape_count(),
                },
            };
            if self.check_stopped(events) {
                return false;
            }
            tracing::debug!(?event, at, "stage transition");
            events.push(event);
            self.next_stage += 1;
        }
        true
    }

    /// Read dock geometry once and start the closing transition.
    fn begin_dock(&mut self, events: &mut Vec<SplashEvent>) -> bool {
        if self.check_stopped(events) {
            return false;
        }
        let Some(completion) = self.completion.take() else {
            return false;
        };

        let geometry = DockGeometry::resolve(&self.host, &self.config.dock.target_id);
        let plan = DockPlan::new(&self.config.dock, geometry);
        let branch = plan.branch;
        tracing::debug!(?branch, "hold ended, starting dock transition");

        self.phase = Phase::Docking(DockTransition::start(plan, completion));
        events.push(SplashEvent::DockStarted { branch });
        true
    }

    fn advance_dock(&mut self, dt: f64, events: &mut Vec<SplashEvent>) {
        if self.check_stopped(events) {
            return;
        }
        let Phase::Docking(tr) = &mut self.phase else {
            return;
        };
        if !tr.advance(dt, &self.stop) {
            return;
        }

        let Phase::Docking(tr) = std::mem::replace(&mut self.phase, Phase::Cancelled) else {
            return;
        };
        self.phase = Phase::Done(tr.into_plan());
        tracing::debug!("splash completed");
        events.push(SplashEvent::Completed);
    }

    fn check_stopped(&mut self, events: &mut Vec<SplashEvent>) -> bool {
        if !self.stop.is_stopped() {
            return false;
        }
        if !self.is_cancelled() {
            // dropping these discards the callback unfired
            self.completion = None;
            self.phase = Phase::Cancelled;
            tracing::debug!(at = self.clock, "splash cancelled");
            events.push(SplashEvent::Cancelled);
        }
        true
    }
}

impl<H: DockHost> std::fmt::Debug for SplashPlayer<H> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SplashPlayer")
            .field("clock", &self.clock)
            .field("next_stage", &self.next_stage)
            .field("phase", &self.phase)
            .field("stopped", &self.stop.is_stopped())
            .finish()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/timeline/player.rs"]
mod tests;
