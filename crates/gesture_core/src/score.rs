//! Index-aligned similarity scoring.

use crate::point::Point2;
use tracing::trace;

/// Mean distance between points at the same index.
///
/// Distances are summed over the common prefix of the two sequences and
/// divided by the length of `points`. An empty `points` yields infinity, which
/// [`score`] turns into zero.
pub fn average_distance(points: &[Point2], template: &[Point2]) -> f32 {
    let mut total = 0.0f32;
    for (i, (p, t)) in points.iter().zip(template).enumerate() {
        let d = p.distance(*t);
        trace!(
            index = i,
            "compare ({:.2},{:.2}) vs ({:.2},{:.2}) distance {:.3}",
            p.x,
            p.y,
            t.x,
            t.y,
            d
        );
        total += d;
    }

    if points.is_empty() {
        return f32::INFINITY;
    }
    total / points.len() as f32
}

/// Similarity of two resampled, normalized sequences in `[0, 1]`.
///
/// `1 - average_distance / scale`, floored at zero. A larger `scale` is more
/// forgiving. Non-finite averages score zero.
pub fn score(points: &[Point2], template: &[Point2], scale: f32) -> f32 {
    let average = average_distance(points, template);
    let raw = 1.0 - average / scale;

    // f32::max drops NaN in favour of the other operand.
    let score = raw.max(0.0).min(1.0);
    trace!(average, score, "scored");
    score
}
