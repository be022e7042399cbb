use std::{cell::Cell, rc::Rc};

use super::*;
use crate::dock::host::StaticHost;

fn approx(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-9
}

fn geometry() -> DockGeometry {
    DockGeometry {
        // 400 x 200 centered at (500, 400)
        container: Rect::new(300.0, 300.0, 700.0, 500.0),
        // 80 x 40 centered at (60, 30)
        target: Rect::new(20.0, 10.0, 100.0, 50.0),
    }
}

fn counter() -> (Rc<Cell<u32>>, CompletionSignal) {
    let calls = Rc::new(Cell::new(0));
    let c = calls.clone();
    (calls, CompletionSignal::new(move || c.set(c.get() + 1)))
}

#[test]
fn geometry_scale_and_translation() {
    let g = geometry();
    assert!(approx(g.scale(), 0.2));
    assert_eq!(g.translation(), Vec2::new(-440.0, -370.0));
}

#[test]
fn geometry_resolves_only_known_target() {
    let host = StaticHost::with_target(geometry().container, "home-brand", geometry().target);
    assert_eq!(DockGeometry::resolve(&host, "home-brand"), Some(geometry()));
    assert_eq!(DockGeometry::resolve(&host, "other"), None);
    let bare = StaticHost::without_target(geometry().container);
    assert_eq!(DockGeometry::resolve(&bare, "home-brand"), None);
}

#[test]
fn geometry_normalizes_flipped_rects() {
    let g = geometry();
    let flipped = |r: Rect| Rect::new(r.x1, r.y1, r.x0, r.y0);
    let host = StaticHost::with_target(flipped(g.container), "home-brand", flipped(g.target));

    let resolved = DockGeometry::resolve(&host, "home-brand").unwrap();
    assert_eq!(resolved, g);
    assert!(approx(resolved.scale(), 0.2));

    let plan = DockPlan::new(&DockSettings::default(), Some(resolved));
    assert_eq!(plan.branch, DockBranch::Dock);
}

#[test]
fn dock_plan_default_offsets() {
    let plan = DockPlan::new(&DockSettings::default(), Some(geometry()));
    assert_eq!(plan.branch, DockBranch::Dock);
    assert!(plan.has_transform());
    assert_eq!(plan.anchor, Point::new(500.0, 400.0));

    let find = |target, prop| {
        plan.tweens
            .iter()
            .find(|t| t.target == target && t.prop == prop)
            .unwrap()
    };
    let scale = find(Target::Container, Prop::Scale);
    assert!(approx(scale.to, 0.2));
    assert_eq!(scale.ease, Ease::InOutQuart);

    let backdrop = find(Target::Backdrop, Prop::BackdropAlpha);
    assert!(approx(backdrop.start, 0.2));
    assert!(approx(backdrop.duration, 0.6));

    // container fade overlaps the last 0.2 s of the motion
    let fade = find(Target::Container, Prop::Opacity);
    assert!(approx(fade.start, 0.6));
    assert!(approx(plan.duration, 0.85));
}

#[test]
fn dock_plan_lands_container_on_target() {
    let g = geometry();
    let plan = DockPlan::new(&DockSettings::default(), Some(g));
    let classified = crate::shapes::classify::classify_shapes(
        &Default::default(),
        &Default::default(),
    );
    let mut scene = SceneState::prepared(&classified, &Default::default());
    plan.apply(plan.duration, &mut scene);

    let frame = scene.to_frame(0.0, &Default::default());
    let landed = frame.container_affine.transform_rect_bbox(g.container);
    assert!(approx(landed.center().x, g.target.center().x));
    assert!(approx(landed.center().y, g.target.center().y));
    assert!(approx(landed.height(), g.target.height()));
    assert_eq!(frame.container_opacity, 0.0);
    assert_eq!(frame.backdrop.a, 0);
    assert_eq!(frame.surface_opacity, 1.0);
}

#[test]
fn missing_target_plans_fallback_fade_only() {
    let plan = DockPlan::new(&DockSettings::default(), None);
    assert_eq!(plan.branch, DockBranch::Fallback);
    assert!(!plan.has_transform());
    assert_eq!(plan.tweens.len(), 1);
    assert_eq!(plan.tweens[0].target, Target::Surface);
    assert!(approx(plan.duration, 0.5));
}

#[test]
fn degenerate_container_falls_back() {
    let mut g = geometry();
    g.container = Rect::new(0.0, 10.0, 100.0, 10.0);
    let plan = DockPlan::new(&DockSettings::default(), Some(g));
    assert_eq!(plan.branch, DockBranch::Fallback);
}

#[test]
fn transition_fires_completion_once_at_end() {
    let (calls, done) = counter();
    let stop = StopToken::new();
    let mut tr = DockTransition::start(DockPlan::new(&DockSettings::default(), None), done);

    assert!(!tr.advance(0.25, &stop));
    assert_eq!(calls.get(), 0);
    assert!(tr.advance(0.25, &stop));
    assert_eq!(calls.get(), 1);
    assert!(tr.is_finished());

    assert!(!tr.advance(1.0, &stop));
    assert_eq!(calls.get(), 1);
    assert!(approx(tr.elapsed(), 0.5));
}

#[test]
fn stopped_transition_never_fires() {
    let (calls, done) = counter();
    let stop = StopToken::new();
    let mut tr = DockTransition::start(
        DockPlan::new(&DockSettings::default(), Some(geometry())),
        done,
    );
    assert!(!tr.advance(0.3, &stop));
    stop.stop();
    assert!(!tr.advance(5.0, &stop));
    assert!(!tr.advance(5.0, &stop));
    assert_eq!(calls.get(), 0);
}

#[test]
fn settings_validation() {
    let mut s = DockSettings::default();
    s.target_id = "  ".to_string();
    assert!(s.validate().is_err());

    let mut s = DockSettings::default();
    s.fade_duration = -1.0;
    assert!(s.validate().is_err());

    assert!(DockSettings::default().validate().is_ok());
}
