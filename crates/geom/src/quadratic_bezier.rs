use crate::scalar::Scalar;
use crate::segment::{BoundingBox, Segment};
use crate::traits::Transformation;
use crate::utils::{cubic_polynomial_roots, min_max, uniform_flattening_steps};
use crate::{CubicBezierSegment, LineSegment};
use crate::{Box3D, Point, Vector};
use num_traits::NumCast;

use std::ops::Range;

/// A 3d curve segment defined by three points: the beginning of the segment, a control
/// point and the end of the segment.
///
/// The curve is defined by equation:
/// ```∀ t ∈ [0..1],  P(t) = (1 - t)² * from + 2 * (1 - t) * t * ctrl + t² * to```
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serialization", derive(Serialize, Deserialize))]
pub struct QuadraticBezierSegment<S> {
    pub from: Point<S>,
    pub ctrl: Point<S>,
    pub to: Point<S>,
}

impl<S: Scalar> QuadraticBezierSegment<S> {
    pub fn cast<NewS: NumCast>(self) -> QuadraticBezierSegment<NewS> {
        QuadraticBezierSegment {
            from: self.from.cast(),
            ctrl: self.ctrl.cast(),
            to: self.to.cast(),
        }
    }

    /// Sample the curve at t (expecting t between 0 and 1).
    pub fn sample(&self, t: S) -> Point<S> {
        let t2 = t * t;
        let one_t = S::ONE - t;
        let one_t2 = one_t * one_t;

        self.from * one_t2 + self.ctrl.to_vector() * S::TWO * one_t * t + self.to.to_vector() * t2
    }

    #[inline]
    fn derivative_coefficients(&self, t: S) -> (S, S, S) {
        (S::TWO * t - S::TWO, -S::FOUR * t + S::TWO, S::TWO * t)
    }

    /// Sample the curve's derivative at t (expecting t between 0 and 1).
    pub fn derivative(&self, t: S) -> Vector<S> {
        let (c0, c1, c2) = self.derivative_coefficients(t);
        self.from.to_vector() * c0 + self.ctrl.to_vector() * c1 + self.to.to_vector() * c2
    }

    /// The (constant) second derivative of the curve.
    #[inline]
    pub fn second_derivative(&self) -> Vector<S> {
        (self.from.to_vector() + self.to.to_vector() - self.ctrl.to_vector() * S::TWO) * S::TWO
    }

    /// Swap the beginning and the end of the segment.
    pub fn flip(&self) -> Self {
        QuadraticBezierSegment {
            from: self.to,
            ctrl: self.ctrl,
            to: self.from,
        }
    }

    /// Return the sub-curve inside a given range of t.
    ///
    /// This is equivalent splitting at the range's end points.
    pub fn split_range(&self, t_range: Range<S>) -> Self {
        let t0 = t_range.start;
        let t1 = t_range.end;

        let from = self.sample(t0);
        let to = self.sample(t1);
        let ctrl = from + (self.ctrl - self.from).lerp(self.to - self.ctrl, t0) * (t1 - t0);

        QuadraticBezierSegment { from, ctrl, to }
    }

    /// Split this curve into two sub-curves.
    pub fn split(&self, t: S) -> (QuadraticBezierSegment<S>, QuadraticBezierSegment<S>) {
        let split_point = self.sample(t);

        (
            QuadraticBezierSegment {
                from: self.from,
                ctrl: self.from.lerp(self.ctrl, t),
                to: split_point,
            },
            QuadraticBezierSegment {
                from: split_point,
                ctrl: self.ctrl.lerp(self.to, t),
                to: self.to,
            },
        )
    }

    /// Elevate this curve to a third order bézier.
    pub fn to_cubic(&self) -> CubicBezierSegment<S> {
        CubicBezierSegment {
            from: self.from,
            ctrl1: (self.from + self.ctrl.to_vector() * S::TWO) / S::THREE,
            ctrl2: (self.to + self.ctrl.to_vector() * S::TWO) / S::THREE,
            to: self.to,
        }
    }

    /// Returns whether the curve can be approximated with a single point, given
    /// a tolerance threshold.
    pub fn is_a_point(&self, tolerance: S) -> bool {
        let tol2 = tolerance * tolerance;
        (self.from - self.to).square_length() <= tol2
            && (self.from - self.ctrl).square_length() <= tol2
    }

    /// Applies the transform to this curve and returns the results.
    #[inline]
    pub fn transformed<T: Transformation<S>>(&self, transform: &T) -> Self {
        QuadraticBezierSegment {
            from: transform.transform_point(self.from),
            ctrl: transform.transform_point(self.ctrl),
            to: transform.transform_point(self.to),
        }
    }

    #[inline]
    pub fn translate(&self, by: Vector<S>) -> Self {
        QuadraticBezierSegment {
            from: self.from + by,
            ctrl: self.ctrl + by,
            to: self.to + by,
        }
    }

    /// Number of line segments [`for_each_flattened`](Self::for_each_flattened) produces
    /// for a given tolerance.
    pub fn num_flattening_steps(&self, tolerance: S) -> u32 {
        uniform_flattening_steps(self.second_derivative().length(), tolerance)
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

    /// Compute a flattened approximation of the curve, invoking a callback at
    /// each step.
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

    /// Return the t at which the curve's derivative on an axis is zero, if it lies
    /// strictly inside the curve.
    fn local_extremum_t(from: S, ctrl: S, to: S) -> Option<S> {
        let div = from - S::TWO * ctrl + to;
        if div == S::ZERO {
            return None;
        }
        let t = (from - ctrl) / div;
        if t > S::ZERO && t < S::ONE {
            return Some(t);
        }

        None
    }

    fn axis_range(&self, axis: impl Fn(Point<S>) -> S) -> (S, S) {
        let (from, ctrl, to) = (axis(self.from), axis(self.ctrl), axis(self.to));
        let (mut min, mut max) = min_max(from, to);
        if let Some(t) = Self::local_extremum_t(from, ctrl, to) {
            let v = axis(self.sample(t));
            min = min.min(v);
            max = max.max(v);
        }

        (min, max)
    }

    /// Return the x extremum or None if this curve is x-monotonic.
    pub fn local_x_extremum_t(&self) -> Option<S> {
        Self::local_extremum_t(self.from.x, self.ctrl.x, self.to.x)
    }

    /// Return the y extremum or None if this curve is y-monotonic.
    pub fn local_y_extremum_t(&self) -> Option<S> {
        Self::local_extremum_t(self.from.y, self.ctrl.y, self.to.y)
    }

    /// Returns a conservative box that contains the curve.
    pub fn fast_bounding_box(&self) -> Box3D<S> {
        Box3D {
            min: self.from.min(self.ctrl).min(self.to),
            max: self.from.max(self.ctrl).max(self.to),
        }
    }

    /// Returns a conservative range of x that contains this curve.
    pub fn fast_bounding_range_x(&self) -> (S, S) {
        let min_x = self.from.x.min(self.ctrl.x).min(self.to.x);
        let max_x = self.from.x.max(self.ctrl.x).max(self.to.x);

        (min_x, max_x)
    }

    /// Returns a conservative range of y that contains this curve.
    pub fn fast_bounding_range_y(&self) -> (S, S) {
        let min_y = self.from.y.min(self.ctrl.y).min(self.to.y);
        let max_y = self.from.y.max(self.ctrl.y).max(self.to.y);

        (min_y, max_y)
    }

    /// Returns a conservative range of z that contains this curve.
    pub fn fast_bounding_range_z(&self) -> (S, S) {
        let min_z = self.from.z.min(self.ctrl.z).min(self.to.z);
        let max_z = self.from.z.max(self.ctrl.z).max(self.to.z);

        (min_z, max_z)
    }

    /// Returns the smallest box the curve is contained in.
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

    /// Analytic solution to finding the closest point on the curve to `pos`.
    ///
    /// Returns the parameter `t` of that point.
    pub fn closest_point(&self, pos: Point<S>) -> S {
        // We are looking for the points in the curve where the line passing through pos
        // and these points are perpendicular to the curve.
        let a = self.from - pos;
        let b = self.ctrl - self.from;
        let c = self.from + self.to.to_vector() - self.ctrl * S::TWO;

        // Polynomial coefficients
        let c0 = c.dot(c);
        let c1 = b.dot(c) * S::THREE;
        let c2 = b.dot(b) * S::TWO + a.dot(c);
        let c3 = a.dot(b);

        let roots = cubic_polynomial_roots(c0, c1, c2, c3);

        let mut sq_dist = a.square_length();
        let mut t = S::ZERO;
        let to_dist = (self.to - pos).square_length();
        if to_dist < sq_dist {
            sq_dist = to_dist;
            t = S::ONE
        }
        for root in roots {
            if root >= S::ZERO && root <= S::ONE {
                let p = self.sample(root);
                let d = (pos - p).square_length();
                if d < sq_dist {
                    sq_dist = d;
                    t = root;
                }
            }
        }

        t
    }

    /// Returns the shortest distance between this segment and a point.
    pub fn distance_to_point(&self, pos: Point<S>) -> S {
        (self.sample(self.closest_point(pos)) - pos).length()
    }

    /// Returns the shortest squared distance between this segment and a point.
    ///
    /// May be useful to avoid the cost of a square root when comparing against a distance
    /// that can be squared instead.
    pub fn square_distance_to_point(&self, pos: Point<S>) -> S {
        (self.sample(self.closest_point(pos)) - pos).square_length()
    }

    /// Computes the length of this segment.
    ///
    /// Implements Raph Levien's analytical approach described in
    /// https://raphlinus.github.io/curves/2018/12/28/bezier-arclength.html
    pub fn length(&self) -> S {
        let d2 = self.from - self.ctrl * S::TWO + self.to.to_vector();
        let d1 = self.ctrl - self.from;
        let a = d2.square_length();
        let c = d1.square_length();
        if a < S::value(1e-4) * c {
            // The segment is almost straight.
            //
            // Legendre-Gauss quadrature using formula from Behdad
            // in https://github.com/Pomax/BezierInfo-2/issues/77
            let v0 = (self.from.to_vector() * S::value(-0.492943519233745)
                + self.ctrl.to_vector() * S::value(0.430331482911935)
                + self.to.to_vector() * S::value(0.0626120363218102))
            .length();
            let v1 = ((self.to - self.from) * S::value(0.4444444444444444)).length();
            let v2 = (self.from.to_vector() * S::value(-0.0626120363218102)
                + self.ctrl.to_vector() * S::value(-0.430331482911935)
                + self.to.to_vector() * S::value(0.492943519233745))
            .length();
            return v0 + v1 + v2;
        }

        let b = S::TWO * d2.dot(d1);

        let sqr_abc = (a + b + c).sqrt();
        let a2 = a.powf(-S::HALF);
        let a32 = a2.powi(3);
        let c2 = S::TWO * c.sqrt();
        let ba_c2 = b * a2 + c2;

        let v0 = S::HALF * S::HALF * a2 * a2 * b * (S::TWO * sqr_abc - c2) + sqr_abc;

        if ba_c2 < S::EPSILON {
            // The curve has a sharp turns.
            v0
        } else {
            v0 + S::HALF
                * S::HALF
                * a32
                * (S::FOUR * c * a - b * b)
                * (((S::TWO * a + b) * a2 + S::TWO * sqr_abc) / ba_c2).ln()
        }
    }

    // This is to conform to the `impl_segment!` macro
    fn approximate_length(&self, _tolerance: S) -> S {
        self.length()
    }
}

/// A flattening iterator for quadratic bézier segments.
///
/// Yields points at each iteration.
pub struct Flattened<S> {
    curve: QuadraticBezierSegment<S>,
    count: u32,
    i: u32,
}

impl<S: Scalar> Flattened<S> {
    #[inline]
    pub(crate) fn new(curve: &QuadraticBezierSegment<S>, tolerance: S) -> Self {
        Flattened {
            curve: *curve,
            count: curve.num_flattening_steps(tolerance),
            i: 1,
        }
    }
}

impl<S: Scalar> Iterator for Flattened<S> {
    type Item = Point<S>;

    #[inline]
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

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        let count = (self.count + 1 - self.i) as usize;
        (count, Some(count))
    }
}

impl<S: Scalar> Segment for QuadraticBezierSegment<S> {
    impl_segment!(S);
}

impl<S: Scalar> BoundingBox for QuadraticBezierSegment<S> {
    impl_bounding_box!(S);
}

#[cfg(test)]
use crate::point;

#[cfg(test)]
fn curve() -> QuadraticBezierSegment<f64> {
    QuadraticBezierSegment {
        from: point(1.0, 1.0, 0.0),
        ctrl: point(3.0, 0.0, 0.0),
        to: point(4.0, 3.0, 0.0),
    }
}

#[test]
fn fast_bounding_box_for_quadratic_bezier_segment() {
    let a = QuadraticBezierSegment {
        from: point(0.0, 0.0, 0.0),
        ctrl: point(1.0, 1.0, 0.0),
        to: point(2.0, 0.0, 0.0),
    };

    let actual_aabb = a.fast_bounding_box();

    assert_eq!(actual_aabb.min, point(0.0, 0.0, 0.0));
    assert_eq!(actual_aabb.max, point(2.0, 1.0, 0.0));
}

#[test]
fn minimum_bounding_box_for_quadratic_bezier_segment() {
    let a = QuadraticBezierSegment {
        from: point(0.0, 0.0, 0.0),
        ctrl: point(1.0, 1.0, -1.0),
        to: point(2.0, 0.0, 0.0),
    };

    let actual_aabb = a.bounding_box();

    assert_eq!(actual_aabb.min, point(0.0, 0.0, -0.5));
    assert_eq!(actual_aabb.max, point(2.0, 0.5, 0.0));
}

#[test]
fn bounding_box_with_interior_extremum() {
    let b = curve().bounding_box();
    assert_eq!(b.min, point(1.0, 0.75, 0.0));
    assert_eq!(b.max, point(4.0, 3.0, 0.0));

    assert_eq!(curve().local_y_extremum_t(), Some(0.25));
    assert_eq!(curve().local_x_extremum_t(), None);
}

#[test]
fn length_straight_line() {
    // Sanity check: aligned points so both these curves are straight lines
    // that go form (0.0, 0.0) to (2.0, 0.0).

    let len = QuadraticBezierSegment {
        from: point(0.0f64, 0.0, 0.0),
        ctrl: point(1.0, 0.0, 0.0),
        to: point(2.0, 0.0, 0.0),
    }
    .length();
    assert!((len - 2.0).abs() < 1e-6);

    let len = CubicBezierSegment {
        from: point(0.0f64, 0.0, 0.0),
        ctrl1: point(1.0, 0.0, 0.0),
        ctrl2: point(1.0, 0.0, 0.0),
        to: point(2.0, 0.0, 0.0),
    }
    .approximate_length(0.01);
    assert!((len - 2.0).abs() < 1e-6);
}

#[test]
fn arc_length() {
    let c = curve();
    let mut flattened = 0.0;
    c.for_each_flattened(0.0001, &mut |s| flattened += s.length());

    assert!((c.length() - flattened).abs() < 1e-3);
}

#[test]
fn derivatives() {
    let c = QuadraticBezierSegment {
        from: point(1.0f64, 1.0, 0.0),
        ctrl: point(2.0, 1.0, 1.0),
        to: point(2.0, 2.0, 2.0),
    };

    assert_eq!(c.derivative(0.0), Vector::new(2.0, 0.0, 2.0));
    assert_eq!(c.derivative(1.0), Vector::new(0.0, 2.0, 2.0));
    assert_eq!(c.second_derivative(), Vector::new(-2.0, 2.0, 0.0));
}

#[test]
fn closest_point() {
    let c = curve();
    let t = c.closest_point(point(3.0, 0.0, 0.0));
    let p = c.sample(t);
    assert!((p.x - 2.565365).abs() < 1e-4);
    assert!((p.y - 0.893896).abs() < 1e-4);
    assert!((c.distance_to_point(point(3.0, 0.0, 0.0)) - 0.993961).abs() < 1e-4);

    // Beyond the endpoints.
    assert_eq!(c.closest_point(point(0.0, 1.0, 0.0)), 0.0);
    assert_eq!(c.closest_point(point(5.0, 4.0, 0.0)), 1.0);
}

#[test]
fn test_flattening() {
    let c = curve();

    let mut points = Vec::new();
    let mut last_t = 0.0;
    c.for_each_flattened_with_t(0.01, &mut |s, t| {
        assert_eq!(t.start, last_t);
        assert!(t.end > t.start);
        last_t = t.end;
        points.push(s.to);
        // Every chord stays close to the curve.
        let mid = s.sample(0.5);
        assert!(c.distance_to_point(mid) <= 0.01);
    });

    assert_eq!(last_t, 1.0);
    assert_eq!(points.len() as u32, c.num_flattening_steps(0.01));
    assert_eq!(*points.last().unwrap(), c.to);

    let from_iter: Vec<_> = c.flattened(0.01).collect();
    assert_eq!(from_iter.len(), points.len());
    for (a, b) in from_iter.iter().zip(points.iter()) {
        assert!((*a - *b).length() < 1e-12);
    }
}

#[test]
fn test_flattening_empty_curve() {
    let curve = QuadraticBezierSegment {
        from: point(0.0f64, 0.0, 0.0),
        ctrl: point(0.0, 0.0, 0.0),
        to: point(0.0, 0.0, 0.0),
    };

    let mut count = 0;
    curve.for_each_flattened(0.1, &mut |seg| {
        assert_eq!(seg.from, point(0.0, 0.0, 0.0));
        assert_eq!(seg.to, point(0.0, 0.0, 0.0));
        count += 1;
    });
    assert_eq!(count, 1);
    assert!(curve.is_a_point(0.1));
}

#[test]
fn split_and_elevate() {
    let c = curve();
    let (a, b) = c.split(0.5);
    assert_eq!(a.to, b.from);
    assert!((a.to - c.sample(0.5)).length() < 1e-12);

    let cubic = c.to_cubic();
    for &t in &[0.1, 0.5, 0.8] {
        assert!((cubic.sample(t) - c.sample(t)).length() < 1e-12);
    }

    let r = c.split_range(0.25..0.75);
    assert!((r.sample(0.5) - c.sample(0.5)).length() < 1e-12);
}
