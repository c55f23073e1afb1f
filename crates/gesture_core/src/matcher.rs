//! Resample → normalize → score orchestration.

use crate::config::MatcherConfig;
use crate::error::ConfigError;
use crate::normalize::normalize;
use crate::point::Point2;
use crate::resample::resample;
use crate::score::score;
use crate::space::{Point3, Projector};
use crate::MIN_POINTS;
use tracing::{debug, enabled, trace, Level};

/// Scores captured paths against stored patterns.
///
/// Stateless apart from its configuration: every call works on fresh copies
/// of its inputs, so one matcher can be shared freely across threads.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct GestureMatcher {
    config: MatcherConfig,
}

impl GestureMatcher {
    /// Matcher with default tunables (N = 64, S = 1.0, K = 0.5).
    pub fn new() -> Self {
        Self::default()
    }

    /// Matcher with validated custom tunables.
    pub fn with_config(config: MatcherConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &MatcherConfig {
        &self.config
    }

    /// Score a 3D capture against a 2D pattern in `[0, 1]`.
    ///
    /// The capture is flattened with `projector` first. Fewer than two points
    /// on either side scores exactly zero.
    pub fn recognize<P>(&self, captured: &[Point3], pattern: &[Point2], projector: &P) -> f32
    where
        P: Projector + ?Sized,
    {
        if captured.len() < MIN_POINTS || pattern.len() < MIN_POINTS {
            return 0.0;
        }
        let flattened: Vec<Point2> = captured.iter().map(|&p| projector.project(p)).collect();
        self.recognize_2d(&flattened, pattern)
    }

    /// Score an already projected path against a pattern in `[0, 1]`.
    pub fn recognize_2d(&self, path: &[Point2], pattern: &[Point2]) -> f32 {
        if path.len() < MIN_POINTS || pattern.len() < MIN_POINTS {
            debug!(
                path_points = path.len(),
                pattern_points = pattern.len(),
                "too few points to compare"
            );
            return 0.0;
        }

        let candidate = self.prepare(path);
        let template = self.prepare(pattern);

        if enabled!(Level::TRACE) {
            log_points("normalized path", &candidate);
            log_points("normalized pattern", &template);
        }

        let result = score(&candidate, &template, self.config.score_scale);
        debug!(
            path_points = path.len(),
            pattern_points = pattern.len(),
            score = result,
            "gesture scored"
        );
        result
    }

    /// Resample and normalize one sequence into comparable form.
    pub fn prepare(&self, points: &[Point2]) -> Vec<Point2> {
        let resampled = resample(points, self.config.resample_count);
        normalize(&resampled, self.config.square_size)
    }
}

fn log_points(label: &str, points: &[Point2]) {
    for (i, p) in points.iter().enumerate() {
        trace!("{} point {}: ({:.3}, {:.3})", label, i, p.x, p.y);
    }
}
