use crate::scalar::Scalar;
use crate::segment::{BoundingBox, Segment};
use crate::traits::Transformation;
use crate::utils::{min_max, quadratic_polynomial_roots, uniform_flattening_steps};
use crate::LineSegment;
use crate::{Box3D, Point, Vector};
use num_traits::NumCast;

use std::ops::Range;

/// A 3d curve segment defined by four points: the beginning of the segment, two control
/// points and the end of the segment.
///
/// The curve is defined by equation:
/// ```∀ t ∈ [0..1],  P(t) = (1 - t)³ * from + 3 * (1 - t)² * t * ctrl1 + 3 * t² * (1 - t) * ctrl2 + t³ * to```
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serialization", derive(Serialize, Deserialize))]
pub struct CubicBezierSegment<S> {
    pub from: Point<S>,
    pub ctrl1: Point<S>,
    pub ctrl2: Point<S>,
    pub to: Point<S>,
}

impl<S: Scalar> CubicBezierSegment<S> {
    pub fn cast<NewS: NumCast>(self) -> CubicBezierSegment<NewS> {
        CubicBezierSegment {
            from: self.from.cast(),
            ctrl1: self.ctrl1.cast(),
            ctrl2: self.ctrl2.cast(),
            to: self.to.cast(),
        }
    }

    /// Sample the curve at t (expecting t between 0 and 1).
    pub fn sample(&self, t: S) -> Point<S> {
        let t2 = t * t;
        let t3 = t2 * t;
        let one_t = S::ONE - t;
        let one_t2 = one_t * one_t;
        let one_t3 = one_t2 * one_t;

        self.from * one_t3
            + self.ctrl1.to_vector() * S::THREE * one_t2 * t
            + self.ctrl2.to_vector() * S::THREE * one_t * t2
            + self.to.to_vector() * t3
    }

    /// Sample the curve's derivative at t (expecting t between 0 and 1).
    pub fn derivative(&self, t: S) -> Vector<S> {
        let one_t = S::ONE - t;
        ((self.ctrl1 - self.from) * one_t * one_t
            + (self.ctrl2 - self.ctrl1) * S::TWO * one_t * t
            + (self.to - self.ctrl2) * t * t)
            * S::THREE
    }

    /// Sample the curve's second derivative at t (expecting t between 0 and 1).
    pub fn second_derivative(&self, t: S) -> Vector<S> {
        let (d0, d1) = self.second_differences();
        (d0 * (S::ONE - t) + d1 * t) * S::SIX
    }

    fn second_differences(&self) -> (Vector<S>, Vector<S>) {
        (
            self.from.to_vector() + self.ctrl2.to_vector() - self.ctrl1.to_vector() * S::TWO,
            self.ctrl1.to_vector() + self.to.to_vector() - self.ctrl2.to_vector() * S::TWO,
        )
    }

    /// Swap the beginning and the end of the segment.
    pub fn flip(&self) -> Self {
        CubicBezierSegment {
            from: self.to,
            ctrl1: self.ctrl2,
            ctrl2: self.ctrl1,
            to: self.from,
        }
    }

    /// Split this curve into two sub-curves.
    pub fn split(&self, t: S) -> (CubicBezierSegment<S>, CubicBezierSegment<S>) {
        let ctrl1a = self.from + (self.ctrl1 - self.from) * t;
        let ctrl2a = self.ctrl1 + (self.ctrl2 - self.ctrl1) * t;
        let ctrl1aa = ctrl1a + (ctrl2a - ctrl1a) * t;
        let ctrl3a = self.ctrl2 + (self.to - self.ctrl2) * t;
        let ctrl2aa = ctrl2a + (ctrl3a - ctrl2a) * t;
        let ctrl1aaa = ctrl1aa + (ctrl2aa - ctrl1aa) * t;

        (
            CubicBezierSegment {
                from: self.from,
                ctrl1: ctrl1a,
                ctrl2: ctrl1aa,
                to: ctrl1aaa,
            },
            CubicBezierSegment {
                from: ctrl1aaa,
                ctrl1: ctrl2aa,
                ctrl2: ctrl3a,
                to: self.to,
            },
        )
    }

    /// Applies the transform to this curve and returns the results.
    #[inline]
    pub fn transformed<T: Transformation<S>>(&self, transform: &T) -> Self {
        CubicBezierSegment {
            from: transform.transform_point(self.from),
            ctrl1: transform.transform_point(self.ctrl1),
            ctrl2: transform.transform_point(self.ctrl2),
            to: transform.transform_point(self.to),
        }
    }

    #[inline]
    pub fn translate(&self, by: Vector<S>) -> Self {
        CubicBezierSegment {
            from: self.from + by,
            ctrl1: self.ctrl1 + by,
            ctrl2: self.ctrl2 + by,
            to: self.to + by,
        }
    }

    /// Number of line segments [`for_each_flattened`](Self::for_each_flattened) produces
    /// for a given tolerance.
    pub fn num_flattening_steps(&self, tolerance: S) -> u32 {
        let (d0, d1) = self.second_differences();
        let max_dd = S::SIX * d0.length().max(d1.length());

        uniform_flattening_steps(max_dd, tolerance)
    }

    /// Approximates the curve with sequence of line segments.
    ///
    /// The `tolerance` parameter defines the maximum distance between the curve and
    /// its approximation.
    pub fn for_each_flattened<F>(&self, tolerance: S, callback: &mut F)
    where
        F: FnMut(&LineSegment<S>),
    {
        self.for_each_flattened_with_t(tolerance, &mut |segment, _| callback(segment));
    }

    /// Approximates the curve with sequence of line segments.
    ///
    /// The `tolerance` parameter defines the maximum distance between the curve and
    /// its approximation.
    ///
    /// The end of the t parameter range at the final segment is guaranteed to be equal to `1.0`.
    pub fn for_each_flattened_with_t<F>(&self, tolerance: S, callback: &mut F)
    where
        F: FnMut(&LineSegment<S>, Range<S>),
    {
        let count = self.num_flattening_steps(tolerance);
        let step = S::ONE / S::value(count as f32);

        let mut from = self.from;
        let mut t_from = S::ZERO;
        for i in 1..count {
            let t = step * S::value(i as f32);
            let s = LineSegment {
                from,
                to: self.sample(t),
            };

            callback(&s, t_from..t);
            from = s.to;
            t_from = t;
        }

        let s = LineSegment { from, to: self.to };

        callback(&s, t_from..S::ONE);
    }

    /// Returns the flattened representation of the curve as an iterator, starting *after* the
    /// current point.
    pub fn flattened(&self, tolerance: S) -> Flattened<S> {
        Flattened::new(self, tolerance)
    }

    /// Compute the length of the segment using a flattened approximation.
    pub fn approximate_length(&self, tolerance: S) -> S {
        let mut length = S::ZERO;

        self.for_each_flattened(tolerance, &mut |line| {
            length += line.length();
        });

        length
    }

    /// Values of t in `(0, 1)` where the derivative on an axis is zero.
    fn local_extrema_t(from: S, ctrl1: S, ctrl2: S, to: S) -> impl Iterator<Item = S> {
        let a = to - S::THREE * ctrl2 + S::THREE * ctrl1 - from;
        let b = S::TWO * (ctrl2 - S::TWO * ctrl1 + from);
        let c = ctrl1 - from;

        quadratic_polynomial_roots(a, b, c)
            .into_iter()
            .filter(|t| *t > S::ZERO && *t < S::ONE)
    }

    fn axis_range(&self, axis: impl Fn(Point<S>) -> S) -> (S, S) {
        let (from, to) = (axis(self.from), axis(self.to));
        let (mut min, mut max) = min_max(from, to);
        for t in Self::local_extrema_t(from, axis(self.ctrl1), axis(self.ctrl2), to) {
            let v = axis(self.sample(t));
            min = min.min(v);
            max = max.max(v);
        }

        (min, max)
    }

    /// Returns a conservative box that contains the curve.
    pub fn fast_bounding_box(&self) -> Box3D<S> {
        Box3D {
            min: self.from.min(self.ctrl1).min(self.ctrl2).min(self.to),
            max: self.from.max(self.ctrl1).max(self.ctrl2).max(self.to),
        }
    }

    /// Returns a conservative range of x that contains this curve.
    pub fn fast_bounding_range_x(&self) -> (S, S) {
        let b = self.fast_bounding_box();
        (b.min.x, b.max.x)
    }

    /// Returns a conservative range of y that contains this curve.
    pub fn fast_bounding_range_y(&self) -> (S, S) {
        let b = self.fast_bounding_box();
        (b.min.y, b.max.y)
    }

    /// Returns a conservative range of z that contains this curve.
    pub fn fast_bounding_range_z(&self) -> (S, S) {
        let b = self.fast_bounding_box();
        (b.min.z, b.max.z)
    }

    /// Returns the smallest box containing this curve.
    pub fn bounding_box(&self) -> Box3D<S> {
        BoundingBox::bounding_box(self)
    }

    /// Returns the smallest range of x that contains this curve.
    pub fn bounding_range_x(&self) -> (S, S) {
        self.axis_range(|p| p.x)
    }

    /// Returns the smallest range of y that contains this curve.
    pub fn bounding_range_y(&self) -> (S, S) {
        self.axis_range(|p| p.y)
    }

    /// Returns the smallest range of z that contains this curve.
    pub fn bounding_range_z(&self) -> (S, S) {
        self.axis_range(|p| p.z)
    }

    /// Returns the parameter `t` of the point of the curve closest to `pos`.
    ///
    /// The curve is first searched through a fine flattening, then the candidate is
    /// refined with a few Newton iterations on `(P(t) - pos)·P'(t) = 0`.
    pub fn closest_point(&self, pos: Point<S>) -> S {
        let extent = self.fast_bounding_box();
        let diagonal = (extent.max - extent.min).length();
        let tolerance = (diagonal * S::value(1e-3)).max(S::EPSILON);

        let mut best_t = S::ZERO;
        let mut best_sq_dist = (self.from - pos).square_length();
        self.for_each_flattened_with_t(tolerance, &mut |segment, t_range| {
            let local_t = segment.closest_point_t(pos);
            let d = (segment.sample(local_t) - pos).square_length();
            if d < best_sq_dist {
                best_sq_dist = d;
                best_t = t_range.start + (t_range.end - t_range.start) * local_t;
            }
        });

        // Chords cut inside the curve, measure the candidate on the curve itself.
        best_sq_dist = (self.sample(best_t) - pos).square_length();
        let mut t = best_t;
        for _ in 0..8 {
            let offset = self.sample(t) - pos;
            let d1 = self.derivative(t);
            let numerator = offset.dot(d1);
            let denominator = d1.dot(d1) + offset.dot(self.second_derivative(t));
            if !(denominator > S::ZERO) {
                break;
            }

            let next = (t - numerator / denominator).max(S::ZERO).min(S::ONE);
            let d = (self.sample(next) - pos).square_length();
            if !(d < best_sq_dist) {
                break;
            }
            best_sq_dist = d;
            best_t = next;
            t = next;
        }

        best_t
    }

    /// Returns the shortest distance between this segment and a point.
    pub fn distance_to_point(&self, pos: Point<S>) -> S {
        (self.sample(self.closest_point(pos)) - pos).length()
    }

    /// Returns the shortest squared distance between this segment and a point.
    pub fn square_distance_to_point(&self, pos: Point<S>) -> S {
        (self.sample(self.closest_point(pos)) - pos).square_length()
    }
}

/// A flattening iterator for cubic bézier segments.
///
/// Yields points at each iteration.
pub struct Flattened<S> {
    curve: CubicBezierSegment<S>,
    count: u32,
    i: u32,
}

impl<S: Scalar> Flattened<S> {
    pub(crate) fn new(curve: &CubicBezierSegment<S>, tolerance: S) -> Self {
        Flattened {
            curve: *curve,
            count: curve.num_flattening_steps(tolerance),
            i: 1,
        }
    }
}

impl<S: Scalar> Iterator for Flattened<S> {
    type Item = Point<S>;

    fn next(&mut self) -> Option<Point<S>> {
        if self.i > self.count {
            return None;
        }

        let i = self.i;
        self.i += 1;
        if i == self.count {
            return Some(self.curve.to);
        }

        let t = S::value(i as f32) / S::value(self.count as f32);
        Some(self.curve.sample(t))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let count = (self.count + 1 - self.i) as usize;
        (count, Some(count))
    }
}

impl<S: Scalar> Segment for CubicBezierSegment<S> {
    impl_segment!(S);
}

impl<S: Scalar> BoundingBox for CubicBezierSegment<S> {
    impl_bounding_box!(S);
}

#[cfg(test)]
use crate::point;

#[cfg(test)]
fn curve() -> CubicBezierSegment<f64> {
    CubicBezierSegment {
        from: point(4.0, 3.0, 0.0),
        ctrl1: point(5.0, -1.0, 0.0),
        ctrl2: point(6.0, 5.0, 0.0),
        to: point(7.0, -5.0, 0.0),
    }
}

#[test]
fn fast_bounding_box_for_cubic_bezier_segment() {
    let a = CubicBezierSegment {
        from: point(0.0, 0.0, 0.0),
        ctrl1: point(0.5, 1.0, 0.0),
        ctrl2: point(1.5, -1.0, 2.0),
        to: point(2.0, 0.0, 0.0),
    };

    let actual_aabb = a.fast_bounding_box();

    assert_eq!(actual_aabb.min, point(0.0, -1.0, 0.0));
    assert_eq!(actual_aabb.max, point(2.0, 1.0, 2.0));
}

#[test]
fn minimum_bounding_box_for_cubic_bezier_segment() {
    let a = CubicBezierSegment {
        from: point(0.0, 0.0, 0.0),
        ctrl1: point(0.5, 2.0, 0.0),
        ctrl2: point(1.5, -2.0, 0.0),
        to: point(2.0, 0.0, 0.0),
    };

    let expected_bigger_aabb_min = point(0.0, -0.6, 0.0);
    let expected_bigger_aabb_max = point(2.0, 0.6, 0.0);
    let actual_minimum_aabb = a.bounding_box();

    assert!(actual_minimum_aabb.min.y >= expected_bigger_aabb_min.y);
    assert!(actual_minimum_aabb.max.y <= expected_bigger_aabb_max.y);
    assert!(actual_minimum_aabb.min.y < -0.5);
    assert!(actual_minimum_aabb.max.y > 0.5);
    assert_eq!(actual_minimum_aabb.min.x, expected_bigger_aabb_min.x);
    assert_eq!(actual_minimum_aabb.max.x, expected_bigger_aabb_max.x);
}

#[test]
fn bounding_box_stays_within_endpoints() {
    // The interior extrema of this curve stay inside the endpoints' y range.
    let b = curve().bounding_box();
    assert!((b.min.y + 5.0).abs() < 1e-12);
    assert!((b.max.y - 3.0).abs() < 1e-12);
    assert_eq!(b.min.x, 4.0);
    assert_eq!(b.max.x, 7.0);
}

#[test]
fn derivatives() {
    let c = curve();
    assert_eq!(c.derivative(0.0), (c.ctrl1 - c.from) * 3.0);
    assert_eq!(c.derivative(1.0), (c.to - c.ctrl2) * 3.0);

    // x is linear in t.
    for &t in &[0.0, 0.3, 1.0] {
        assert!((c.derivative(t).x - 3.0).abs() < 1e-12);
        assert!(c.second_derivative(t).x.abs() < 1e-12);
    }
}

#[test]
fn closest_point() {
    let c = curve();

    let p = c.sample(c.closest_point(point(6.0, 0.0, 0.0)));
    assert!((p.x - 6.20551).abs() < 1e-4);
    assert!((p.y - 0.06134).abs() < 1e-4);
    assert!((c.distance_to_point(point(6.0, 0.0, 0.0)) - 0.21447).abs() < 1e-4);

    assert!((c.distance_to_point(point(5.0, 3.0, 0.0)) - 0.96674).abs() < 1e-4);
    assert!((c.distance_to_point(point(4.0, -2.0, 0.0)) - 2.59913).abs() < 1e-4);

    assert_eq!(c.closest_point(point(3.0, 4.0, 0.0)), 0.0);
    assert_eq!(c.closest_point(point(8.0, -6.0, 0.0)), 1.0);
}

#[test]
fn approximate_length() {
    assert!((curve().approximate_length(0.0001) - 9.07270).abs() < 1e-3);
}

#[test]
fn test_flattening() {
    let c = curve();

    let mut last_t = 0.0;
    let mut count = 0;
    c.for_each_flattened_with_t(0.01, &mut |s, t| {
        assert_eq!(t.start, last_t);
        last_t = t.end;
        count += 1;
        assert!(c.distance_to_point(s.sample(0.5)) <= 0.01);
    });

    assert_eq!(last_t, 1.0);
    assert_eq!(count, c.num_flattening_steps(0.01));

    let points: Vec<_> = c.flattened(0.01).collect();
    assert_eq!(points.len() as u32, count);
    assert_eq!(*points.last().unwrap(), c.to);
}

#[test]
fn split_and_flip() {
    let c = curve();
    let (a, b) = c.split(0.3);
    assert!((a.sample(0.5) - c.sample(0.15)).length() < 1e-12);
    assert!((b.sample(0.5) - c.sample(0.65)).length() < 1e-12);
    assert!((c.flip().sample(0.25) - c.sample(0.75)).length() < 1e-12);
}

#[test]
fn transformed_curve() {
    use crate::{vector, Transform};

    let c = curve();
    let t: Transform<f64> = Transform::translation(1.0, 2.0, 3.0);
    let moved = c.transformed(&t);
    assert_eq!(moved, c.translate(vector(1.0, 2.0, 3.0)));
    assert_eq!(moved.from, point(5.0, 5.0, 3.0));
}
