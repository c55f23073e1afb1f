//! Bounding-box normalization.
//!
//! Removes absolute position and size from a shape so two drawings of the
//! same gesture at different places and scales line up. Aspect ratio is kept:
//! the longer side of the box becomes the square size and the shorter side
//! shrinks proportionally.

use crate::point::Point2;

/// Axis-aligned bounding box.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingBox {
    pub min: Point2,
    pub max: Point2,
}

impl BoundingBox {
    pub fn width(&self) -> f32 {
        self.max.x - self.min.x
    }

    pub fn height(&self) -> f32 {
        self.max.y - self.min.y
    }

    pub fn center(&self) -> Point2 {
        Point2::new(
            (self.min.x + self.max.x) * 0.5,
            (self.min.y + self.max.y) * 0.5,
        )
    }

    /// Larger of width and height.
    pub fn extent(&self) -> f32 {
        self.width().max(self.height())
    }
}

/// Bounding box of `points`, or `None` for an empty slice.
pub fn bounding_box(points: &[Point2]) -> Option<BoundingBox> {
    let first = *points.first()?;
    let mut bbox = BoundingBox {
        min: first,
        max: first,
    };
    for p in &points[1..] {
        bbox.min.x = bbox.min.x.min(p.x);
        bbox.min.y = bbox.min.y.min(p.y);
        bbox.max.x = bbox.max.x.max(p.x);
        bbox.max.y = bbox.max.y.max(p.y);
    }
    Some(bbox)
}

/// Recenter `points` on the origin and scale them so the larger side of
/// their bounding box equals `square_size`.
///
/// A shape with no extent (every point identical) cannot be scaled; each
/// point maps to the origin instead.
pub fn normalize(points: &[Point2], square_size: f32) -> Vec<Point2> {
    let Some(bbox) = bounding_box(points) else {
        return Vec::new();
    };

    let scale = bbox.extent();
    if scale <= f32::EPSILON {
        return vec![Point2::ORIGIN; points.len()];
    }

    let center = bbox.center();
    points
        .iter()
        .map(|&p| (p - center) / scale * square_size)
        .collect()
}
