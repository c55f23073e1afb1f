//! Casting state machine.
//!
//! ```text
//!          begin()              release() score >= threshold
//!   Idle ──────────► Recording ─────────────────────────────► Chambered
//!    ▲                   │                                        │
//!    │   release() fizzle│                       fire() in grace  │
//!    └───────────────────┴────────────────────────────────────────┘
//! ```
//!
//! Callers drive it with direct calls: the input layer calls `begin` and
//! `sample`, the voice layer supplies the recognized incantation to
//! `release`, and the game loop calls `fire` when the player lets go.
//! Time is passed in as seconds so the machine stays deterministic.

use crate::config::CasterConfig;
use crate::recorder::{CapturedPath, GestureRecorder};
use crate::spellbook::{SpellEffect, Spellbook};
use gesture_core::{CameraPose, ConfigError, GestureMatcher, Projector, Ray};
use serde::Serialize;
use tracing::{debug, info, warn};

/// A spell validated and waiting to be fired.
#[derive(Debug, Clone, PartialEq)]
pub struct Chambered {
    pub incantation: String,
    pub score: f32,
    pub effect: SpellEffect,
    pub chambered_at: f64,
}

/// Where the caster is in the casting loop.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum CasterState {
    #[default]
    Idle,
    Recording,
    Chambered(Chambered),
}

/// Why a cast did not chamber.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "reason", rename_all = "snake_case")]
pub enum FizzleReason {
    /// `release` without a preceding `begin`.
    NotRecording,
    /// Nothing was heard.
    NoIncantation,
    /// The words matched no spell.
    UnknownIncantation { incantation: String },
    /// The words matched but the drawing did not.
    GestureMismatch {
        incantation: String,
        score: f32,
        threshold: f32,
    },
}

/// Result of releasing the cast button.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum CastOutcome {
    Chambered { incantation: String, score: f32 },
    Fizzled(FizzleReason),
}

impl CastOutcome {
    pub fn is_chambered(&self) -> bool {
        matches!(self, CastOutcome::Chambered { .. })
    }
}

/// A spell that left the wand.
#[derive(Debug, Clone, PartialEq)]
pub struct FiredSpell {
    pub incantation: String,
    pub effect: SpellEffect,
}

/// Validates incantation + gesture pairs and holds the chambered spell.
#[derive(Debug)]
pub struct SpellCaster {
    config: CasterConfig,
    matcher: GestureMatcher,
    recorder: GestureRecorder,
    state: CasterState,
}

impl SpellCaster {
    pub fn new(config: CasterConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            matcher: GestureMatcher::with_config(config.matcher)?,
            recorder: GestureRecorder::new(config.recorder),
            config,
            state: CasterState::Idle,
        })
    }

    pub fn config(&self) -> &CasterConfig {
        &self.config
    }

    pub fn matcher(&self) -> &GestureMatcher {
        &self.matcher
    }

    pub fn state(&self) -> &CasterState {
        &self.state
    }

    pub fn recorder(&self) -> &GestureRecorder {
        &self.recorder
    }

    /// Enter casting mode and start capturing the gesture. Any chambered
    /// spell is discarded.
    pub fn begin(&mut self, camera: &CameraPose) {
        self.recorder.cancel();
        self.recorder.start(camera);
        self.state = CasterState::Recording;
        debug!("casting started");
    }

    /// Feed a pointer ray while recording. Returns whether a point was kept.
    pub fn sample(&mut self, ray: &Ray) -> bool {
        matches!(self.state, CasterState::Recording) && self.recorder.sample(ray)
    }

    /// Stop recording and validate against the spellbook, projecting the
    /// capture onto its own casting plane.
    pub fn release(
        &mut self,
        spellbook: &Spellbook,
        incantation: Option<&str>,
        now: f64,
    ) -> CastOutcome {
        self.release_inner(spellbook, incantation, now, None::<&dyn Projector>)
    }

    /// [`release`](Self::release) with a caller-supplied projector, e.g. a
    /// [`CameraProjector`](gesture_core::CameraProjector) for screen space.
    pub fn release_with<P>(
        &mut self,
        spellbook: &Spellbook,
        incantation: Option<&str>,
        projector: &P,
        now: f64,
    ) -> CastOutcome
    where
        P: Projector + ?Sized,
    {
        self.release_inner(spellbook, incantation, now, Some(projector))
    }

    fn release_inner<P>(
        &mut self,
        spellbook: &Spellbook,
        incantation: Option<&str>,
        now: f64,
        projector: Option<&P>,
    ) -> CastOutcome
    where
        P: Projector + ?Sized,
    {
        if !matches!(self.state, CasterState::Recording) {
            return CastOutcome::Fizzled(FizzleReason::NotRecording);
        }
        self.state = CasterState::Idle;

        let Some(path) = self.recorder.stop() else {
            return CastOutcome::Fizzled(FizzleReason::NotRecording);
        };

        let outcome = self.validate(spellbook, incantation, &path, projector, now);
        match &outcome {
            CastOutcome::Chambered { incantation, score } => {
                info!(%incantation, score, "spell chambered");
            }
            CastOutcome::Fizzled(reason) => {
                warn!(?reason, "spell fizzled");
            }
        }
        outcome
    }

    fn validate<P>(
        &mut self,
        spellbook: &Spellbook,
        incantation: Option<&str>,
        path: &CapturedPath,
        projector: Option<&P>,
        now: f64,
    ) -> CastOutcome
    where
        P: Projector + ?Sized,
    {
        let Some(said) = incantation.map(str::trim).filter(|s| !s.is_empty()) else {
            return CastOutcome::Fizzled(FizzleReason::NoIncantation);
        };
        let Some(spell) = spellbook.get(said) else {
            return CastOutcome::Fizzled(FizzleReason::UnknownIncantation {
                incantation: said.to_string(),
            });
        };

        let score = match projector {
            Some(p) => self.matcher.recognize(path.points(), &spell.gesture, p),
            None => self
                .matcher
                .recognize(path.points(), &spell.gesture, &path.projector()),
        };

        let threshold = self.config.acceptance_threshold;
        if score < threshold {
            return CastOutcome::Fizzled(FizzleReason::GestureMismatch {
                incantation: spell.incantation.clone(),
                score,
                threshold,
            });
        }

        self.state = CasterState::Chambered(Chambered {
            incantation: spell.incantation.clone(),
            score,
            effect: spell.effect.clone(),
            chambered_at: now,
        });
        CastOutcome::Chambered {
            incantation: spell.incantation.clone(),
            score,
        }
    }

    /// Fire the chambered spell. A spell held past the aiming grace period
    /// fizzles and nothing is returned.
    pub fn fire(&mut self, now: f64) -> Option<FiredSpell> {
        if !matches!(self.state, CasterState::Chambered(_)) {
            return None;
        }
        let CasterState::Chambered(chambered) = std::mem::take(&mut self.state) else {
            return None;
        };

        let held = now - chambered.chambered_at;
        if held > f64::from(self.config.aim_grace_secs) {
            warn!(
                incantation = %chambered.incantation,
                held,
                "chambered spell expired before firing"
            );
            return None;
        }

        info!(incantation = %chambered.incantation, "spell fired");
        Some(FiredSpell {
            incantation: chambered.incantation,
            effect: chambered.effect,
        })
    }

    /// Abandon whatever is in progress.
    pub fn cancel(&mut self) {
        self.recorder.cancel();
        self.state = CasterState::Idle;
    }
}
