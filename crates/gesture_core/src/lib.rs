//! Template gesture matching for freehand casting paths.
//!
//! A captured path is compared against a stored pattern by pushing both
//! through the same pure pipeline:
//!
//! ```text
//! Point3 capture ──► Projector ──┐
//!                                ▼
//!                 Point2 path ──► resample(N) ──► normalize(S) ──┐
//!                                                                ├──► score(K) ──► [0, 1]
//!                 Pattern     ──► resample(N) ──► normalize(S) ──┘
//! ```
//!
//! The comparison is index-aligned. It does not search rotations, reversals
//! or time warps, so a shape drawn end-to-start scores poorly against a
//! pattern authored start-to-end.
//!
//! # Example
//!
//! ```
//! use gesture_core::{GestureMatcher, Point2};
//!
//! let line: Vec<Point2> = (0..5).map(|i| Point2::new(i as f32, 0.0)).collect();
//! let matcher = GestureMatcher::default();
//!
//! let score = matcher.recognize_2d(&line, &line);
//! assert!((score - 1.0).abs() < 1e-6);
//! ```

mod config;
mod error;
mod matcher;
mod normalize;
mod point;
mod resample;
mod score;
pub mod space;

pub use config::MatcherConfig;
pub use error::ConfigError;
pub use matcher::GestureMatcher;
pub use normalize::{bounding_box, normalize, BoundingBox};
pub use point::Point2;
pub use resample::{path_length, resample};
pub use score::{average_distance, score};
pub use space::{
    CameraPose, CameraProjector, OrthographicProjector, Plane, Point3, Projector, Ray,
};

/// Number of points both sequences are resampled to before comparison.
pub const DEFAULT_RESAMPLE_COUNT: usize = 64;

/// Side of the canonical square the normalized shapes are fitted into.
pub const DEFAULT_SQUARE_SIZE: f32 = 1.0;

/// Average distance at which the score reaches zero.
pub const DEFAULT_SCORE_SCALE: f32 = 0.5;

/// Minimum number of points for a path or pattern to be comparable.
pub const MIN_POINTS: usize = 2;
