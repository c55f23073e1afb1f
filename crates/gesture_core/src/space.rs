//! 3D capture space and projection onto the matching plane.
//!
//! Gestures are captured as points on a plane floating in front of the
//! camera. The matcher works in 2D, so captures go through a [`Projector`]
//! first. Any `Fn(Point3) -> Point2` is a projector; two concrete ones cover
//! the usual cases:
//!
//! - [`OrthographicProjector`] drops depth along a plane normal.
//! - [`CameraProjector`] is a pinhole camera mapping world points to screen
//!   pixels.

use crate::point::Point2;
use serde::{Deserialize, Serialize};
use std::ops::{Add, Mul, Sub};

const PARALLEL_EPSILON: f32 = 1e-6;

/// A 3D coordinate.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(from = "[f32; 3]", into = "[f32; 3]")]
pub struct Point3 {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl Point3 {
    pub const ZERO: Point3 = Point3::new(0.0, 0.0, 0.0);
    pub const UP: Point3 = Point3::new(0.0, 1.0, 0.0);
    pub const FORWARD: Point3 = Point3::new(0.0, 0.0, 1.0);

    pub const fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    pub fn dot(self, other: Point3) -> f32 {
        self.x * other.x + self.y * other.y + self.z * other.z
    }

    pub fn cross(self, other: Point3) -> Point3 {
        Point3::new(
            self.y * other.z - self.z * other.y,
            self.z * other.x - self.x * other.z,
            self.x * other.y - self.y * other.x,
        )
    }

    pub fn length(self) -> f32 {
        self.dot(self).sqrt()
    }

    pub fn distance(self, other: Point3) -> f32 {
        (self - other).length()
    }

    /// Unit vector in the same direction, or `None` for a zero vector.
    pub fn normalized(self) -> Option<Point3> {
        let len = self.length();
        (len > PARALLEL_EPSILON && len.is_finite()).then(|| self * (1.0 / len))
    }
}

impl From<[f32; 3]> for Point3 {
    fn from([x, y, z]: [f32; 3]) -> Self {
        Self { x, y, z }
    }
}

impl From<Point3> for [f32; 3] {
    fn from(p: Point3) -> Self {
        [p.x, p.y, p.z]
    }
}

impl Add for Point3 {
    type Output = Point3;

    fn add(self, rhs: Point3) -> Point3 {
        Point3::new(self.x + rhs.x, self.y + rhs.y, self.z + rhs.z)
    }
}

impl Sub for Point3 {
    type Output = Point3;

    fn sub(self, rhs: Point3) -> Point3 {
        Point3::new(self.x - rhs.x, self.y - rhs.y, self.z - rhs.z)
    }
}

impl Mul<f32> for Point3 {
    type Output = Point3;

    fn mul(self, rhs: f32) -> Point3 {
        Point3::new(self.x * rhs, self.y * rhs, self.z * rhs)
    }
}

/// Half-line from `origin` along `direction`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Ray {
    pub origin: Point3,
    pub direction: Point3,
}

impl Ray {
    pub fn new(origin: Point3, direction: Point3) -> Self {
        Self { origin, direction }
    }

    /// Point at parameter `t` along the ray.
    pub fn at(&self, t: f32) -> Point3 {
        self.origin + self.direction * t
    }
}

/// Infinite plane through `origin` with unit `normal`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Plane {
    pub normal: Point3,
    pub origin: Point3,
}

impl Plane {
    /// Plane facing `forward` through `origin`. A zero `forward` falls back
    /// to [`Point3::FORWARD`].
    pub fn facing(forward: Point3, origin: Point3) -> Self {
        Self {
            normal: forward.normalized().unwrap_or(Point3::FORWARD),
            origin,
        }
    }

    /// Signed distance of `p` from the plane along its normal.
    pub fn signed_distance(&self, p: Point3) -> f32 {
        (p - self.origin).dot(self.normal)
    }

    /// Where `ray` crosses the plane, if it does so in front of its origin.
    pub fn raycast(&self, ray: &Ray) -> Option<Point3> {
        let denom = ray.direction.dot(self.normal);
        if denom.abs() < PARALLEL_EPSILON {
            return None;
        }
        let t = (self.origin - ray.origin).dot(self.normal) / denom;
        (t >= 0.0 && t.is_finite()).then(|| ray.at(t))
    }

    /// Orthonormal in-plane axes `(u, v)` with `u × v = normal`.
    pub fn basis(&self) -> (Point3, Point3) {
        let helper = if self.normal.dot(Point3::UP).abs() > 0.99 {
            Point3::new(1.0, 0.0, 0.0)
        } else {
            Point3::UP
        };
        let u = helper
            .cross(self.normal)
            .normalized()
            .unwrap_or(Point3::new(1.0, 0.0, 0.0));
        let v = self.normal.cross(u);
        (u, v)
    }
}

/// Camera position and orientation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CameraPose {
    pub position: Point3,
    pub forward: Point3,
    pub up: Point3,
}

impl CameraPose {
    pub fn new(position: Point3, forward: Point3, up: Point3) -> Self {
        Self {
            position,
            forward,
            up,
        }
    }

    /// Camera at `position` looking down +Z with +Y up.
    pub fn looking_forward(position: Point3) -> Self {
        Self::new(position, Point3::FORWARD, Point3::UP)
    }

    /// Orthonormal `(right, up, forward)` frame of the camera.
    pub fn frame(&self) -> (Point3, Point3, Point3) {
        let forward = self.forward.normalized().unwrap_or(Point3::FORWARD);
        let right = self
            .up
            .cross(forward)
            .normalized()
            .or_else(|| Point3::UP.cross(forward).normalized())
            .unwrap_or(Point3::new(1.0, 0.0, 0.0));
        let up = forward.cross(right);
        (right, up, forward)
    }
}

/// Maps a captured 3D point onto the 2D matching plane.
pub trait Projector {
    fn project(&self, point: Point3) -> Point2;
}

impl<F> Projector for F
where
    F: Fn(Point3) -> Point2,
{
    fn project(&self, point: Point3) -> Point2 {
        self(point)
    }
}

/// Orthographic projection onto a plane's in-plane axes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OrthographicProjector {
    origin: Point3,
    u: Point3,
    v: Point3,
}

impl OrthographicProjector {
    /// Project onto `plane`, measuring coordinates from its origin.
    pub fn onto(plane: &Plane) -> Self {
        let (u, v) = plane.basis();
        Self {
            origin: plane.origin,
            u,
            v,
        }
    }

    /// Drop the z coordinate.
    pub fn xy() -> Self {
        Self {
            origin: Point3::ZERO,
            u: Point3::new(1.0, 0.0, 0.0),
            v: Point3::UP,
        }
    }
}

impl Projector for OrthographicProjector {
    fn project(&self, point: Point3) -> Point2 {
        let rel = point - self.origin;
        Point2::new(rel.dot(self.u), rel.dot(self.v))
    }
}

/// Pinhole camera producing screen-space pixels, origin bottom-left.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraProjector {
    position: Point3,
    right: Point3,
    up: Point3,
    forward: Point3,
    focal_length: f32,
    center: Point2,
}

impl CameraProjector {
    /// `focal_length` is in pixels; `viewport` is the screen size in pixels.
    pub fn new(pose: CameraPose, focal_length: f32, viewport: Point2) -> Self {
        let (right, up, forward) = pose.frame();
        Self {
            position: pose.position,
            right,
            up,
            forward,
            focal_length,
            center: viewport * 0.5,
        }
    }
}

impl Projector for CameraProjector {
    fn project(&self, point: Point3) -> Point2 {
        let rel = point - self.position;
        let mut depth = rel.dot(self.forward);
        if depth.abs() < PARALLEL_EPSILON {
            depth = PARALLEL_EPSILON.copysign(depth);
        }
        let scale = self.focal_length / depth;
        Point2::new(
            self.center.x + rel.dot(self.right) * scale,
            self.center.y + rel.dot(self.up) * scale,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: Point2, b: Point2) -> bool {
        a.distance(b) < 1e-4
    }

    #[test]
    fn raycast_hits_plane_in_front() {
        let plane = Plane::facing(Point3::FORWARD, Point3::new(0.0, 0.0, 1.0));
        let ray = Ray::new(Point3::ZERO, Point3::new(0.5, 0.0, 1.0));
        let hit = plane.raycast(&ray).unwrap();
        assert!(hit.distance(Point3::new(0.5, 0.0, 1.0)) < 1e-6);
        assert!(plane.signed_distance(hit).abs() < 1e-6);
    }

    #[test]
    fn raycast_misses_parallel_and_behind() {
        let plane = Plane::facing(Point3::FORWARD, Point3::new(0.0, 0.0, 1.0));
        let parallel = Ray::new(Point3::ZERO, Point3::new(1.0, 0.0, 0.0));
        assert!(plane.raycast(&parallel).is_none());
        let away = Ray::new(Point3::ZERO, Point3::new(0.0, 0.0, -1.0));
        assert!(plane.raycast(&away).is_none());
    }

    #[test]
    fn plane_basis_is_orthonormal() {
        for normal in [
            Point3::FORWARD,
            Point3::UP,
            Point3::new(1.0, 2.0, 3.0),
        ] {
            let plane = Plane::facing(normal, Point3::ZERO);
            let (u, v) = plane.basis();
            assert!((u.length() - 1.0).abs() < 1e-5);
            assert!((v.length() - 1.0).abs() < 1e-5);
            assert!(u.dot(v).abs() < 1e-5);
            assert!(u.dot(plane.normal).abs() < 1e-5);
            assert!(v.dot(plane.normal).abs() < 1e-5);
        }
    }

    #[test]
    fn orthographic_drops_depth() {
        let plane = Plane::facing(Point3::FORWARD, Point3::new(0.0, 0.0, 2.0));
        let projector = OrthographicProjector::onto(&plane);
        let a = projector.project(Point3::new(1.0, 2.0, 2.0));
        let b = projector.project(Point3::new(1.0, 2.0, 9.0));
        assert!(close(a, b));
        assert!(close(
            OrthographicProjector::xy().project(Point3::new(3.0, -1.0, 7.0)),
            Point2::new(3.0, -1.0)
        ));
    }

    #[test]
    fn camera_centers_forward_axis() {
        let pose = CameraPose::looking_forward(Point3::ZERO);
        let projector = CameraProjector::new(pose, 100.0, Point2::new(800.0, 600.0));
        let p = projector.project(Point3::new(0.0, 0.0, 5.0));
        assert!(close(p, Point2::new(400.0, 300.0)));
    }

    #[test]
    fn camera_keeps_screen_orientation() {
        let pose = CameraPose::looking_forward(Point3::ZERO);
        let projector = CameraProjector::new(pose, 100.0, Point2::new(800.0, 600.0));
        let up = projector.project(Point3::new(0.0, 1.0, 1.0));
        let right = projector.project(Point3::new(1.0, 0.0, 1.0));
        assert!(up.y > 300.0);
        assert!(right.x > 400.0);
        assert!((up.x - 400.0).abs() < 1e-4);
        assert!((right.y - 300.0).abs() < 1e-4);
    }

    #[test]
    fn closure_is_a_projector() {
        let flatten = |p: Point3| Point2::new(p.x, p.z);
        assert_eq!(flatten.project(Point3::new(1.0, 2.0, 3.0)), Point2::new(1.0, 3.0));
    }
}
