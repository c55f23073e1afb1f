//! Arc-length resampling of polylines.

use crate::point::Point2;
use crate::MIN_POINTS;

/// Total length of the polyline through `points`.
pub fn path_length(points: &[Point2]) -> f32 {
    points.windows(2).map(|w| w[0].distance(w[1])).sum()
}

/// Resample a polyline to exactly `n` points evenly spaced by arc length.
///
/// The first output point is always the first input point. Inputs with fewer
/// than two points are returned unchanged; a polyline with no length becomes
/// `n` copies of its first point. Floating point drift can leave the walk one
/// sample short, in which case the tail is padded with the last input point.
///
/// `n` must be at least 2; [`MatcherConfig`](crate::MatcherConfig) enforces
/// this for the matcher.
pub fn resample(points: &[Point2], n: usize) -> Vec<Point2> {
    if points.len() < MIN_POINTS {
        return points.to_vec();
    }

    let first = points[0];
    let mut out = Vec::with_capacity(n);
    out.push(first);

    let total = path_length(points);
    if total <= 0.0 {
        out.resize(n, first);
        return out;
    }

    let interval = total / (n.saturating_sub(1).max(1)) as f32;
    let mut covered = 0.0f32;

    for segment in points.windows(2) {
        if out.len() >= n {
            break;
        }

        let (a, b) = (segment[0], segment[1]);
        let length = a.distance(b);
        if length > 0.0 {
            while out.len() < n && covered + length >= interval * out.len() as f32 {
                let into_segment = interval * out.len() as f32 - covered;
                out.push(a.lerp(b, into_segment / length));
            }
        }
        covered += length;
    }

    let last = points[points.len() - 1];
    out.resize(n, last);
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn line(n: usize) -> Vec<Point2> {
        (0..n).map(|i| Point2::new(i as f32, 0.0)).collect()
    }

    #[test]
    fn path_length_of_polyline() {
        let points = vec![
            Point2::new(0.0, 0.0),
            Point2::new(3.0, 4.0),
            Point2::new(3.0, 0.0),
        ];
        assert!((path_length(&points) - 9.0).abs() < 1e-6);
        assert_eq!(path_length(&[]), 0.0);
        assert_eq!(path_length(&[Point2::new(1.0, 1.0)]), 0.0);
    }

    #[test]
    fn short_input_returned_unchanged() {
        assert!(resample(&[], 64).is_empty());
        let single = vec![Point2::new(2.0, 3.0)];
        assert_eq!(resample(&single, 64), single);
    }

    #[test]
    fn coincident_points_repeat_first() {
        let points = vec![Point2::new(1.0, 1.0); 5];
        let out = resample(&points, 16);
        assert_eq!(out, vec![Point2::new(1.0, 1.0); 16]);
    }

    #[test]
    fn evenly_spaced_along_line() {
        let out = resample(&line(5), 9);
        assert_eq!(out.len(), 9);
        for (i, p) in out.iter().enumerate() {
            assert!((p.x - i as f32 * 0.5).abs() < 1e-5, "point {} at {:?}", i, p);
            assert_eq!(p.y, 0.0);
        }
    }

    #[test]
    fn endpoints_preserved() {
        let points = vec![
            Point2::new(0.0, 0.0),
            Point2::new(10.0, 0.0),
            Point2::new(10.0, 7.0),
        ];
        let out = resample(&points, 64);
        assert_eq!(out.len(), 64);
        assert_eq!(out[0], points[0]);
        assert!(out[63].distance(points[2]) < 1e-3);
    }

    #[test]
    fn two_point_target() {
        let out = resample(&line(10), 2);
        assert_eq!(out.len(), 2);
        assert_eq!(out[0], Point2::new(0.0, 0.0));
        assert!(out[1].distance(Point2::new(9.0, 0.0)) < 1e-4);
    }

    #[test]
    fn zero_length_segments_skipped() {
        let points = vec![
            Point2::new(0.0, 0.0),
            Point2::new(0.0, 0.0),
            Point2::new(2.0, 0.0),
            Point2::new(2.0, 0.0),
            Point2::new(4.0, 0.0),
        ];
        let out = resample(&points, 5);
        assert_eq!(out.len(), 5);
        for (i, p) in out.iter().enumerate() {
            assert!(p.is_finite());
            assert!((p.x - i as f32).abs() < 1e-5);
        }
    }

    #[test]
    fn downsamples_dense_input() {
        let dense: Vec<Point2> = (0..1000).map(|i| Point2::new(i as f32 * 0.01, 0.0)).collect();
        let out = resample(&dense, 64);
        assert_eq!(out.len(), 64);
    }

    #[test]
    fn does_not_mutate_input() {
        let points = line(4);
        let before = points.clone();
        let _ = resample(&points, 32);
        assert_eq!(points, before);
    }
}
