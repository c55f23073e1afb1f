//! Voice + gesture spellcasting core.
//!
//! A spell is cast by speaking its incantation while drawing its gesture.
//! Speech recognition happens elsewhere; this crate receives the recognized
//! incantation as a string and owns everything from the captured gesture to
//! the on-screen effect message.
//!
//! # Architecture
//!
//! ```text
//!  camera rays ──► GestureRecorder ──► CapturedPath ─┐
//!                                                    ▼
//!  incantation ────────────────────────────────► SpellCaster ──► CastOutcome
//!                                                    │  ▲
//!                                   Spellbook (YAML) ┘  │ GestureMatcher
//!                                                    │
//!                                                    ▼ fire()
//!                                              MessageBoard
//! ```
//!
//! Components hold no globals. The [`Spellbook`] is an owned context object
//! passed to whoever needs lookups, and stages talk through direct calls.

pub mod caster;
pub mod config;
pub mod display;
pub mod error;
pub mod recorder;
pub mod spellbook;

pub use caster::{CastOutcome, CasterState, Chambered, FiredSpell, FizzleReason, SpellCaster};
pub use config::CasterConfig;
pub use display::{DisplayMessage, LabelRect, MessageBoard};
pub use error::SpellbookError;
pub use recorder::{CapturedPath, GestureRecorder, RecorderConfig};
pub use spellbook::{Ranked, SpellData, SpellEffect, Spellbook};

pub use gesture_core::{
    CameraPose, CameraProjector, ConfigError, GestureMatcher, MatcherConfig,
    OrthographicProjector, Plane, Point2, Point3, Projector, Ray,
};

/// Score at or above which a drawn gesture counts as the spell's gesture.
pub const DEFAULT_ACCEPTANCE_THRESHOLD: f32 = 0.8;

/// Seconds a chambered spell stays ready to fire.
pub const DEFAULT_AIM_GRACE_SECS: f32 = 3.0;

/// Distance from the camera to the casting plane.
pub const DEFAULT_PLANE_DISTANCE: f32 = 1.0;

/// Minimum spacing between recorded gesture points.
pub const DEFAULT_MIN_POINT_DISTANCE: f32 = 0.01;
