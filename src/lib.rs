//! splashmark is a host-agnostic brand-reveal animation engine.
//!
//! It takes a vector illustration whose shapes are tagged as ink or negative space and plays
//! a choreographed intro over it: outlines draw in, interiors flood with ink, cut-out
//! details fade in, the finished mark holds, then shrinks into a dock target on the page (or
//! the whole splash fades out when there is none).
//!
//! # Pipeline overview
//!
//! 1. **Extract**: `Illustration -> Extracted` (tagged shapes, measured once)
//! 2. **Classify**: `Extracted -> Classified` (filtered, zoned, ordered left to right)
//! 3. **Choreograph**: `Classified -> Timeline` (draw / fill / reveal stages plus the hold)
//! 4. **Play**: [`SplashPlayer`] advances the timeline by elapsed time, reads the dock
//!    geometry once at hold end, and fires the completion callback exactly once.
//!
//! The crate never draws pixels. Each [`SplashFrame`] is a plain description of every
//! animated property, applied by the host to its own scene.
//!
//! The key design constraints:
//!
//! - **No unsafe**: `unsafe` is forbidden in this crate.
//! - **No fatal errors in the animation core**: bad geometry, empty zones, a missing dock
//!   target and teardown all degrade to skipping or fading out.
//! - **Cooperative**: no threads and no blocking; the host drives [`SplashPlayer::advance`].
#![forbid(unsafe_code)]
#![deny(missing_docs)]
#![allow(missing_docs_in_private_items)]

mod animation;
mod assets;
mod config;
mod dock;
mod foundation;
mod shapes;
mod timeline;

pub use animation::ease::Ease;
pub use animation::tween::{Prop, Target, Tween, staggered_span};
pub use assets::svg::{SvgIllustration, parse_svg};
pub use config::model::SplashConfig;
pub use dock::completion::CompletionSignal;
pub use dock::host::{DockHost, StaticHost};
pub use dock::transition::{
    DockBranch, DockGeometry, DockPlan, DockSettings, DockTransition,
};
pub use foundation::core::{
    Affine, BoundingBox, Fps, FrameIndex, Point, Rect, Rgba8, ShapeId, Transform2D, Vec2,
    ViewBox,
};
pub use foundation::error::{SplashError, SplashResult};
pub use shapes::classify::{
    Classified, ClassifiedShape, ClassifyRules, ShapeGroup, Zone, ZoneCutoffs, classify_shapes,
};
pub use shapes::extract::{Extracted, FillRole, Illustration, RawShape, TaggedShape, extract_shapes};
pub use timeline::choreograph::{
    ChoreographySettings, RevealSettings, StageTuning, StageTunings, build_timeline,
};
pub use timeline::model::{Stage, StageKind, Timeline};
pub use timeline::player::{SplashEvent, SplashPlayer};
pub use timeline::scene::{Palette, SceneState, ShapeVisual, SplashFrame};
pub use timeline::stop::StopToken;
