use crate::scalar::Scalar;
use crate::{point, Box3D, LineSegment, Point, Vector};

use std::ops::Range;

/// Common APIs to segment types.
pub trait Segment: Copy + Sized {
    type Scalar: Scalar;

    /// Start of the curve.
    fn from(&self) -> Point<Self::Scalar>;

    /// End of the curve.
    fn to(&self) -> Point<Self::Scalar>;

    /// Sample the curve at t (expecting t between 0 and 1).
    fn sample(&self, t: Self::Scalar) -> Point<Self::Scalar>;

    /// Sample the derivative at t (expecting t between 0 and 1).
    fn derivative(&self, t: Self::Scalar) -> Vector<Self::Scalar>;

    /// Split this curve into two sub-curves.
    fn split(&self, t: Self::Scalar) -> (Self, Self);

    /// Return the curve before the split point.
    fn before_split(&self, t: Self::Scalar) -> Self {
        self.split(t).0
    }

    /// Return the curve after the split point.
    fn after_split(&self, t: Self::Scalar) -> Self {
        self.split(t).1
    }

    /// Swap the direction of the segment.
    fn flip(&self) -> Self;

    /// Compute the length of the segment using a flattened approximation.
    fn approximate_length(&self, tolerance: Self::Scalar) -> Self::Scalar;

    /// Approximates the curve with sequence of line segments.
    ///
    /// The `tolerance` parameter defines the maximum distance between the curve and
    /// its approximation.
    ///
    /// The parameter `t` at the final segment is guaranteed to be equal to `1.0`.
    #[allow(clippy::type_complexity)]
    fn for_each_flattened_with_t(
        &self,
        tolerance: Self::Scalar,
        callback: &mut dyn FnMut(&LineSegment<Self::Scalar>, Range<Self::Scalar>),
    );
}

pub trait BoundingBox {
    type Scalar: Scalar;

    /// Returns the smallest box that contains the curve.
    fn bounding_box(&self) -> Box3D<Self::Scalar> {
        let (min_x, max_x) = self.bounding_range_x();
        let (min_y, max_y) = self.bounding_range_y();
        let (min_z, max_z) = self.bounding_range_z();

        Box3D {
            min: point(min_x, min_y, min_z),
            max: point(max_x, max_y, max_z),
        }
    }

    /// Returns a conservative box that contains the curve.
    ///
    /// This does not necessarily return the smallest possible bounding box.
    fn fast_bounding_box(&self) -> Box3D<Self::Scalar> {
        let (min_x, max_x) = self.fast_bounding_range_x();
        let (min_y, max_y) = self.fast_bounding_range_y();
        let (min_z, max_z) = self.fast_bounding_range_z();

        Box3D {
            min: point(min_x, min_y, min_z),
            max: point(max_x, max_y, max_z),
        }
    }

    /// Returns the smallest range of x values that contains the curve.
    fn bounding_range_x(&self) -> (Self::Scalar, Self::Scalar);

    /// Returns the smallest range of y values that contains the curve.
    fn bounding_range_y(&self) -> (Self::Scalar, Self::Scalar);

    /// Returns the smallest range of z values that contains the curve.
    fn bounding_range_z(&self) -> (Self::Scalar, Self::Scalar);

    /// Returns a range of x values that contains the curve.
    fn fast_bounding_range_x(&self) -> (Self::Scalar, Self::Scalar);

    /// Returns a range of y values that contains the curve.
    fn fast_bounding_range_y(&self) -> (Self::Scalar, Self::Scalar);

    /// Returns a range of z values that contains the curve.
    fn fast_bounding_range_z(&self) -> (Self::Scalar, Self::Scalar);
}

macro_rules! impl_segment {
    ($S:ty) => {
        type Scalar = $S;
        fn from(&self) -> Point<$S> {
            self.from
        }
        fn to(&self) -> Point<$S> {
            self.to
        }
        fn sample(&self, t: $S) -> Point<$S> {
            self.sample(t)
        }
        fn derivative(&self, t: $S) -> Vector<$S> {
            self.derivative(t)
        }
        fn split(&self, t: $S) -> (Self, Self) {
            self.split(t)
        }
        fn flip(&self) -> Self {
            self.flip()
        }
        fn approximate_length(&self, tolerance: $S) -> $S {
            self.approximate_length(tolerance)
        }
        fn for_each_flattened_with_t(
            &self,
            tolerance: $S,
            callback: &mut dyn FnMut(&LineSegment<$S>, Range<$S>),
        ) {
            self.for_each_flattened_with_t(tolerance, &mut |s, t| callback(s, t));
        }
    };
}

macro_rules! impl_bounding_box {
    ($S:ty) => {
        type Scalar = $S;
        fn bounding_range_x(&self) -> ($S, $S) {
            self.bounding_range_x()
        }
        fn bounding_range_y(&self) -> ($S, $S) {
            self.bounding_range_y()
        }
        fn bounding_range_z(&self) -> ($S, $S) {
            self.bounding_range_z()
        }
        fn fast_bounding_range_x(&self) -> ($S, $S) {
            self.fast_bounding_range_x()
        }
        fn fast_bounding_range_y(&self) -> ($S, $S) {
            self.fast_bounding_range_y()
        }
        fn fast_bounding_range_z(&self) -> ($S, $S) {
            self.fast_bounding_range_z()
        }
    };
}
