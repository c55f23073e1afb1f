//! Gesture capture on a plane in front of the camera.
//!
//! While recording, every pointer ray is intersected with a casting plane
//! set up at a fixed distance in front of the camera when recording starts.
//! Hits closer than `min_point_distance` to the previous point are dropped
//! so a resting hand does not pile up duplicates.

use crate::{DEFAULT_MIN_POINT_DISTANCE, DEFAULT_PLANE_DISTANCE};
use gesture_core::{CameraPose, ConfigError, OrthographicProjector, Plane, Point3, Ray};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Recorder configuration.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RecorderConfig {
    /// Distance from the camera to the casting plane.
    pub plane_distance: f32,
    /// Minimum distance from the last point for a new point to be kept.
    pub min_point_distance: f32,
}

impl Default for RecorderConfig {
    fn default() -> Self {
        Self {
            plane_distance: DEFAULT_PLANE_DISTANCE,
            min_point_distance: DEFAULT_MIN_POINT_DISTANCE,
        }
    }
}

impl RecorderConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        ConfigError::require_positive("plane_distance", self.plane_distance)?;
        ConfigError::require_non_negative("min_point_distance", self.min_point_distance)
    }
}

/// A finished gesture capture. Read-only once handed out.
#[derive(Debug, Clone, PartialEq)]
pub struct CapturedPath {
    points: Vec<Point3>,
    plane: Plane,
}

impl CapturedPath {
    /// Wrap points captured on `plane`.
    pub fn new(points: Vec<Point3>, plane: Plane) -> Self {
        Self { points, plane }
    }

    pub fn points(&self) -> &[Point3] {
        &self.points
    }

    pub fn plane(&self) -> &Plane {
        &self.plane
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Projector flattening this capture onto its own casting plane.
    pub fn projector(&self) -> OrthographicProjector {
        OrthographicProjector::onto(&self.plane)
    }
}

/// Records a gesture between `start` and `stop`.
#[derive(Debug, Default)]
pub struct GestureRecorder {
    config: RecorderConfig,
    plane: Option<Plane>,
    points: Vec<Point3>,
}

impl GestureRecorder {
    pub fn new(config: RecorderConfig) -> Self {
        Self {
            config,
            plane: None,
            points: Vec::new(),
        }
    }

    pub fn config(&self) -> &RecorderConfig {
        &self.config
    }

    pub fn is_recording(&self) -> bool {
        self.plane.is_some()
    }

    /// Points captured so far in the current recording.
    pub fn points(&self) -> &[Point3] {
        &self.points
    }

    /// Begin recording on a plane in front of `camera`. Ignored while
    /// already recording.
    pub fn start(&mut self, camera: &CameraPose) {
        if self.is_recording() {
            return;
        }
        let (_, _, forward) = camera.frame();
        let origin = camera.position + forward * self.config.plane_distance;
        self.points.clear();
        self.plane = Some(Plane::facing(forward, origin));
        debug!(?origin, "gesture recording started");
    }

    /// Intersect a pointer ray with the casting plane and record the hit.
    ///
    /// Returns whether a point was added.
    pub fn sample(&mut self, ray: &Ray) -> bool {
        let Some(plane) = self.plane else {
            return false;
        };
        match plane.raycast(ray) {
            Some(hit) => self.push(hit),
            None => false,
        }
    }

    /// Record an already resolved point, subject to the spacing rule.
    pub fn push(&mut self, point: Point3) -> bool {
        if !self.is_recording() {
            return false;
        }
        let far_enough = self
            .points
            .last()
            .map_or(true, |last| last.distance(point) > self.config.min_point_distance);
        if far_enough {
            self.points.push(point);
        }
        far_enough
    }

    /// Finish recording and hand over the captured path. `None` if not
    /// recording.
    pub fn stop(&mut self) -> Option<CapturedPath> {
        let plane = self.plane.take()?;
        let points = std::mem::take(&mut self.points);
        debug!(points = points.len(), "gesture recording stopped");
        Some(CapturedPath::new(points, plane))
    }

    /// Abandon the current recording.
    pub fn cancel(&mut self) {
        self.plane = None;
        self.points.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gesture_core::{Point2, Projector};

    fn camera() -> CameraPose {
        CameraPose::looking_forward(Point3::ZERO)
    }

    fn ray_to(x: f32, y: f32) -> Ray {
        Ray::new(Point3::ZERO, Point3::new(x, y, 1.0))
    }

    #[test]
    fn idle_recorder_ignores_input() {
        let mut recorder = GestureRecorder::new(RecorderConfig::default());
        assert!(!recorder.is_recording());
        assert!(!recorder.sample(&ray_to(0.0, 0.0)));
        assert!(!recorder.push(Point3::ZERO));
        assert!(recorder.stop().is_none());
    }

    #[test]
    fn records_hits_on_casting_plane() {
        let mut recorder = GestureRecorder::new(RecorderConfig::default());
        recorder.start(&camera());
        assert!(recorder.sample(&ray_to(0.0, 0.0)));
        assert!(recorder.sample(&ray_to(0.2, 0.1)));

        let path = recorder.stop().unwrap();
        assert_eq!(path.len(), 2);
        for p in path.points() {
            assert!((p.z - 1.0).abs() < 1e-6);
        }
        assert!(!recorder.is_recording());
    }

    #[test]
    fn drops_points_closer_than_spacing() {
        let mut recorder = GestureRecorder::new(RecorderConfig {
            plane_distance: 1.0,
            min_point_distance: 0.1,
        });
        recorder.start(&camera());
        assert!(recorder.push(Point3::new(0.0, 0.0, 1.0)));
        assert!(!recorder.push(Point3::new(0.05, 0.0, 1.0)));
        assert!(!recorder.push(Point3::new(0.0, 0.08, 1.0)));
        assert!(recorder.push(Point3::new(0.2, 0.0, 1.0)));
        assert_eq!(recorder.points().len(), 2);
    }

    #[test]
    fn missed_rays_record_nothing() {
        let mut recorder = GestureRecorder::new(RecorderConfig::default());
        recorder.start(&camera());
        let backwards = Ray::new(Point3::ZERO, Point3::new(0.0, 0.0, -1.0));
        assert!(!recorder.sample(&backwards));
        assert!(recorder.points().is_empty());
    }

    #[test]
    fn restart_clears_previous_path() {
        let mut recorder = GestureRecorder::new(RecorderConfig::default());
        recorder.start(&camera());
        recorder.sample(&ray_to(0.0, 0.0));
        let first = recorder.stop().unwrap();
        assert_eq!(first.len(), 1);

        recorder.start(&camera());
        assert!(recorder.points().is_empty());
    }

    #[test]
    fn start_while_recording_keeps_points() {
        let mut recorder = GestureRecorder::new(RecorderConfig::default());
        recorder.start(&camera());
        recorder.sample(&ray_to(0.0, 0.0));
        recorder.start(&camera());
        assert_eq!(recorder.points().len(), 1);
    }

    #[test]
    fn captured_path_projects_onto_its_plane() {
        let mut recorder = GestureRecorder::new(RecorderConfig::default());
        recorder.start(&camera());
        recorder.sample(&ray_to(0.3, -0.2));
        let path = recorder.stop().unwrap();
        let flat = path.projector().project(path.points()[0]);
        assert!(flat.distance(Point2::new(0.3, -0.2)) < 1e-5);
    }

    #[test]
    fn cancel_discards_recording() {
        let mut recorder = GestureRecorder::new(RecorderConfig::default());
        recorder.start(&camera());
        recorder.sample(&ray_to(0.0, 0.0));
        recorder.cancel();
        assert!(!recorder.is_recording());
        assert!(recorder.points().is_empty());
        assert!(recorder.stop().is_none());
    }
}
