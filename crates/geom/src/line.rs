use crate::scalar::Scalar;
use crate::segment::{BoundingBox, Segment};
use crate::traits::Transformation;
use crate::utils::min_max;
use crate::{point, Box3D, Point, Vector};

use std::ops::Range;

/// A linear segment.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serialization", derive(Serialize, Deserialize))]
pub struct LineSegment<S> {
    pub from: Point<S>,
    pub to: Point<S>,
}

impl<S: Scalar> LineSegment<S> {
    /// Sample the segment at t (expecting t between 0 and 1).
    #[inline]
    pub fn sample(&self, t: S) -> Point<S> {
        self.from.lerp(self.to, t)
    }

    #[inline]
    pub fn from(&self) -> Point<S> {
        self.from
    }

    #[inline]
    pub fn to(&self) -> Point<S> {
        self.to
    }

    /// Returns an inverted version of this segment where the beginning and the end
    /// points are swapped.
    #[inline]
    pub fn flip(&self) -> Self {
        LineSegment {
            from: self.to,
            to: self.from,
        }
    }

    /// Return the sub-segment inside a given range of t.
    ///
    /// This is equivalent to splitting at the range's end points.
    #[inline]
    pub fn split_range(&self, t_range: Range<S>) -> Self {
        LineSegment {
            from: self.sample(t_range.start),
            to: self.sample(t_range.end),
        }
    }

    /// Split this segment into two sub-segments.
    #[inline]
    pub fn split(&self, t: S) -> (Self, Self) {
        let split_point = self.sample(t);

        (
            LineSegment {
                from: self.from,
                to: split_point,
            },
            LineSegment {
                from: split_point,
                to: self.to,
            },
        )
    }

    /// Return the segment before the split point.
    #[inline]
    pub fn before_split(&self, t: S) -> Self {
        LineSegment {
            from: self.from,
            to: self.sample(t),
        }
    }

    /// Return the segment after the split point.
    #[inline]
    pub fn after_split(&self, t: S) -> Self {
        LineSegment {
            from: self.sample(t),
            to: self.to,
        }
    }

    /// Return the smallest box containing this segment.
    #[inline]
    pub fn bounding_box(&self) -> Box3D<S> {
        Box3D {
            min: self.from.min(self.to),
            max: self.from.max(self.to),
        }
    }

    #[inline]
    fn bounding_range_x(&self) -> (S, S) {
        min_max(self.from.x, self.to.x)
    }

    #[inline]
    fn bounding_range_y(&self) -> (S, S) {
        min_max(self.from.y, self.to.y)
    }

    #[inline]
    fn bounding_range_z(&self) -> (S, S) {
        min_max(self.from.z, self.to.z)
    }

    /// Returns the vector between this segment's `from` and `to` points.
    #[inline]
    pub fn to_vector(&self) -> Vector<S> {
        self.to - self.from
    }

    /// Computes the length of this segment.
    #[inline]
    pub fn length(&self) -> S {
        self.to_vector().length()
    }

    /// Computes the squared length of this segment.
    #[inline]
    pub fn square_length(&self) -> S {
        self.to_vector().square_length()
    }

    #[inline]
    pub fn translate(&self, by: Vector<S>) -> Self {
        LineSegment {
            from: self.from + by,
            to: self.to + by,
        }
    }

    /// Applies the transform to this segment and returns the results.
    #[inline]
    pub fn transformed<T: Transformation<S>>(&self, transform: &T) -> Self {
        LineSegment {
            from: transform.transform_point(self.from),
            to: transform.transform_point(self.to),
        }
    }

    /// Returns the parameter of the point of this segment closest to `p`.
    ///
    /// Degenerate segments return `0`.
    #[inline]
    pub fn closest_point_t(&self, p: Point<S>) -> S {
        let v1 = self.to_vector();
        let v2 = p - self.from;
        let sq_len = v1.dot(v1);
        if sq_len <= S::ZERO {
            return S::ZERO;
        }

        S::min(S::max(v2.dot(v1) / sq_len, S::ZERO), S::ONE)
    }

    /// Computes the closest point on this segment to `p`.
    #[inline]
    pub fn closest_point(&self, p: Point<S>) -> Point<S> {
        self.sample(self.closest_point_t(p))
    }

    /// Computes the distance between this segment and a point.
    #[inline]
    pub fn distance_to_point(&self, p: Point<S>) -> S {
        self.square_distance_to_point(p).sqrt()
    }

    /// Computes the squared distance between this segment and a point.
    ///
    /// Can be useful to save a square root and a division when comparing against
    /// a distance that can be squared.
    #[inline]
    pub fn square_distance_to_point(&self, p: Point<S>) -> S {
        (self.closest_point(p) - p).square_length()
    }

    /// Returns the endpoint that is the farthest from `p`.
    ///
    /// Ties go to `from`.
    #[inline]
    pub fn farthest_point(&self, p: Point<S>) -> Point<S> {
        if (self.to - p).square_length() > (self.from - p).square_length() {
            self.to
        } else {
            self.from
        }
    }

    /// Computes the parameters `(s, t)` of the closest pair of points between this
    /// segment (at `s`) and another one (at `t`).
    pub fn closest_approach_t(&self, other: &Self) -> (S, S) {
        let clamp = |v: S| S::min(S::max(v, S::ZERO), S::ONE);
        let d1 = self.to_vector();
        let d2 = other.to_vector();
        let r = self.from - other.from;
        let a = d1.dot(d1);
        let e = d2.dot(d2);
        let f = d2.dot(r);

        if a <= S::EPSILON && e <= S::EPSILON {
            return (S::ZERO, S::ZERO);
        }

        if a <= S::EPSILON {
            return (S::ZERO, clamp(f / e));
        }

        let c = d1.dot(r);
        if e <= S::EPSILON {
            return (clamp(-c / a), S::ZERO);
        }

        let b = d1.dot(d2);
        let denom = a * e - b * b;
        // Parallel segments pick an arbitrary point of the first one.
        let mut s = if denom > S::ZERO {
            clamp((b * f - c * e) / denom)
        } else {
            S::ZERO
        };
        let mut t = (b * s + f) / e;

        if t < S::ZERO {
            t = S::ZERO;
            s = clamp(-c / a);
        } else if t > S::ONE {
            t = S::ONE;
            s = clamp((b - c) / a);
        }

        (s, t)
    }

    /// Computes the squared distance between the closest pair of points of two segments.
    #[inline]
    pub fn square_distance_to_segment(&self, other: &Self) -> S {
        let (s, t) = self.closest_approach_t(other);
        (self.sample(s) - other.sample(t)).square_length()
    }

    /// Returns true if the two segments come within `epsilon` of each other.
    #[inline]
    pub fn intersects(&self, other: &Self, epsilon: S) -> bool {
        self.square_distance_to_segment(other) <= epsilon * epsilon
    }

    /// Returns true if a point of this segment is within `radius` of `center`.
    #[inline]
    pub fn intersects_sphere(&self, center: Point<S>, radius: S) -> bool {
        self.square_distance_to_point(center) <= radius * radius
    }

    /// Clip this segment against a box.
    ///
    /// The faces of the box are part of it.
    pub fn clipped(&self, clip: &Box3D<S>) -> Option<Self> {
        let d = self.to_vector();
        let mut t0 = S::ZERO;
        let mut t1 = S::ONE;

        let slabs = [
            (d.x, self.from.x, clip.min.x, clip.max.x),
            (d.y, self.from.y, clip.min.y, clip.max.y),
            (d.z, self.from.z, clip.min.z, clip.max.z),
        ];

        for &(d, from, min, max) in &slabs {
            for &(p, q) in &[(-d, from - min), (d, max - from)] {
                if p == S::ZERO {
                    if q < S::ZERO {
                        return None;
                    }
                    continue;
                }

                let r = q / p;
                if p < S::ZERO {
                    if r > t1 {
                        return None;
                    }
                    if r > t0 {
                        t0 = r;
                    }
                } else {
                    if r < t0 {
                        return None;
                    }
                    if r < t1 {
                        t1 = r;
                    }
                }
            }
        }

        Some(self.split_range(t0..t1))
    }

    /// Returns true if a part of this segment is inside the box (faces included).
    #[inline]
    pub fn intersects_box(&self, clip: &Box3D<S>) -> bool {
        self.clipped(clip).is_some()
    }

    #[inline]
    pub fn to_f32(&self) -> LineSegment<f32> {
        LineSegment {
            from: self.from.to_f32(),
            to: self.to.to_f32(),
        }
    }

    #[inline]
    pub fn to_f64(&self) -> LineSegment<f64> {
        LineSegment {
            from: self.from.to_f64(),
            to: self.to.to_f64(),
        }
    }
}

impl<S: Scalar> Segment for LineSegment<S> {
    type Scalar = S;
    fn from(&self) -> Point<S> {
        self.from
    }
    fn to(&self) -> Point<S> {
        self.to
    }
    fn sample(&self, t: S) -> Point<S> {
        self.sample(t)
    }
    fn derivative(&self, _t: S) -> Vector<S> {
        self.to_vector()
    }
    fn split(&self, t: S) -> (Self, Self) {
        self.split(t)
    }
    fn before_split(&self, t: S) -> Self {
        self.before_split(t)
    }
    fn after_split(&self, t: S) -> Self {
        self.after_split(t)
    }
    fn flip(&self) -> Self {
        self.flip()
    }
    fn approximate_length(&self, _tolerance: S) -> S {
        self.length()
    }

    fn for_each_flattened_with_t(
        &self,
        _tolerance: Self::Scalar,
        callback: &mut dyn FnMut(&LineSegment<S>, Range<S>),
    ) {
        callback(self, S::ZERO..S::ONE);
    }
}

impl<S: Scalar> BoundingBox for LineSegment<S> {
    type Scalar = S;
    fn bounding_range_x(&self) -> (S, S) {
        self.bounding_range_x()
    }
    fn bounding_range_y(&self) -> (S, S) {
        self.bounding_range_y()
    }
    fn bounding_range_z(&self) -> (S, S) {
        self.bounding_range_z()
    }
    fn fast_bounding_range_x(&self) -> (S, S) {
        self.bounding_range_x()
    }
    fn fast_bounding_range_y(&self) -> (S, S) {
        self.bounding_range_y()
    }
    fn fast_bounding_range_z(&self) -> (S, S) {
        self.bounding_range_z()
    }
}

#[cfg(test)]
fn segment(a: (f64, f64, f64), b: (f64, f64, f64)) -> LineSegment<f64> {
    LineSegment {
        from: point(a.0, a.1, a.2),
        to: point(b.0, b.1, b.2),
    }
}

#[test]
fn bounding_box() {
    let s = segment((3.0, -1.0, 2.0), (1.0, 4.0, 2.0));
    let b = s.bounding_box();
    assert_eq!(b.min, point(1.0, -1.0, 2.0));
    assert_eq!(b.max, point(3.0, 4.0, 2.0));
    assert_eq!(BoundingBox::bounding_box(&s), b);
}

#[test]
fn distance_to_point() {
    let s = segment((0.0, 0.0, 0.0), (1.0, 1.0, 1.0));

    // Projection falls before the start.
    assert_eq!(s.closest_point(point(-1.0, -1.0, -5.0)), point(0.0, 0.0, 0.0));
    // And after the end.
    assert_eq!(s.closest_point(point(4.0, 2.0, 3.0)), point(1.0, 1.0, 1.0));

    let p = s.closest_point(point(1.0, 0.0, 0.5));
    assert!((p.x - 0.5).abs() < 1e-12);
    assert!((p.y - 0.5).abs() < 1e-12);
    assert!((p.z - 0.5).abs() < 1e-12);
    assert!((s.distance_to_point(point(1.0, 0.0, 0.5)) - 0.5f64.sqrt()).abs() < 1e-12);

    assert_eq!(s.farthest_point(point(-1.0, 0.0, 0.0)), point(1.0, 1.0, 1.0));
    assert_eq!(s.farthest_point(point(2.0, 2.0, 2.0)), point(0.0, 0.0, 0.0));
}

#[test]
fn degenerate_segment_distance() {
    let s = segment((1.0, 2.0, 3.0), (1.0, 2.0, 3.0));
    assert_eq!(s.closest_point(point(0.0, 0.0, 0.0)), point(1.0, 2.0, 3.0));
}

#[test]
fn skew_segments() {
    // One along x at z = 0, the other along y at z = 1.
    let a = segment((-1.0, 0.0, 0.0), (1.0, 0.0, 0.0));
    let b = segment((0.0, -1.0, 1.0), (0.0, 1.0, 1.0));
    let (s, t) = a.closest_approach_t(&b);
    assert!((s - 0.5).abs() < 1e-12);
    assert!((t - 0.5).abs() < 1e-12);
    assert!((a.square_distance_to_segment(&b) - 1.0).abs() < 1e-12);
    assert!(!a.intersects(&b, 0.5));
    assert!(a.intersects(&b, 1.0));

    let c = segment((0.0, -1.0, 0.0), (0.0, 1.0, 0.0));
    assert!(a.intersects(&c, 1e-8));
}

#[test]
fn parallel_segments() {
    let a = segment((0.0, 0.0, 0.0), (2.0, 0.0, 0.0));
    let b = segment((3.0, 1.0, 0.0), (5.0, 1.0, 0.0));
    // Closest points are (2, 0, 0) and (3, 1, 0).
    assert!((a.square_distance_to_segment(&b) - 2.0).abs() < 1e-12);
}

#[test]
fn clipped() {
    let clip = Box3D {
        min: point(0.0, 0.0, 0.0),
        max: point(2.0, 2.0, 2.0),
    };

    let s = segment((-1.0, 1.0, 1.0), (3.0, 1.0, 1.0));
    let c = s.clipped(&clip).unwrap();
    assert_eq!(c.from, point(0.0, 1.0, 1.0));
    assert_eq!(c.to, point(2.0, 1.0, 1.0));

    // Entirely inside.
    let s = segment((0.5, 0.5, 0.5), (1.0, 1.5, 1.0));
    assert_eq!(s.clipped(&clip), Some(s));

    // Parallel to a face, outside of it.
    assert!(segment((-1.0, 3.0, 1.0), (3.0, 3.0, 1.0)).clipped(&clip).is_none());

    // Touching a face counts.
    assert!(segment((-1.0, 2.0, 1.0), (3.0, 2.0, 1.0)).intersects_box(&clip));

    // Passing diagonally next to a corner.
    assert!(!segment((3.0, 0.0, 1.0), (0.0, 3.0, 1.0)).intersects_box(&Box3D {
        min: point(0.0, 0.0, 0.0),
        max: point(1.0, 1.0, 2.0),
    }));
}

#[test]
fn sphere_intersection() {
    let s = segment((-2.0, 1.0, 0.0), (2.0, 1.0, 0.0));
    assert!(s.intersects_sphere(point(0.0, 0.0, 0.0), 1.0));
    assert!(!s.intersects_sphere(point(0.0, 0.0, 0.0), 0.5));
}
