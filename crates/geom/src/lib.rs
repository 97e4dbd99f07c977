#![deny(bare_trait_objects)]
#![deny(unconditional_recursion)]
#![allow(clippy::excessive_precision)]
#![allow(clippy::let_and_return)]
#![allow(clippy::many_single_char_names)]

//! Simple 3D geometric primitives on top of euclid.
//!
//! This crate is reexported in [afp](../afp/index.html).
//!
//! # Overview.
//!
//! This crate implements some of the maths to work with:
//!
//! - line segments in space, including closest approach between two segments,
//! - quadratic and cubic bézier curves,
//! - the polynomial root finders the curve code relies on.
//!
//! All curve types are generic over the [`Scalar`] trait, implemented for `f32` and `f64`.
//!
//! # Flattening
//!
//! Flattening is the action of approximating a curve with a succession of line segments.
//!
//! The tolerance threshold taken as input by the flattening algorithms corresponds
//! to the maximum distance between the curve and its linear approximation.
//! The smaller the tolerance is, the more precise the approximation and the more segments
//! are generated.
//!
//! Curves are flattened with uniform steps in `t`. The number of steps is derived from
//! the magnitude of the second derivative (Wang's formula), which bounds the distance
//! between the curve and its chords independently of the curve's orientation in space.

// Reexport dependencies.
pub use arrayvec;
pub use euclid;

#[cfg(feature = "serialization")]
#[macro_use]
pub extern crate serde;

#[macro_use]
mod segment;
pub mod cubic_bezier;
mod line;
pub mod quadratic_bezier;
pub mod utils;

#[doc(inline)]
pub use crate::cubic_bezier::CubicBezierSegment;
#[doc(inline)]
pub use crate::line::LineSegment;
#[doc(inline)]
pub use crate::quadratic_bezier::QuadraticBezierSegment;
#[doc(inline)]
pub use crate::segment::{BoundingBox, Segment};

pub use crate::scalar::Scalar;

mod scalar {
    pub(crate) use euclid::Trig;
    pub(crate) use num_traits::{Float, FloatConst, NumCast};

    use std::fmt::{Debug, Display};
    use std::ops::{AddAssign, DivAssign, MulAssign, SubAssign};

    pub trait Scalar:
        Float
        + NumCast
        + FloatConst
        + Sized
        + Display
        + Debug
        + Trig
        + AddAssign
        + SubAssign
        + MulAssign
        + DivAssign
        + Send
        + Sync
        + 'static
    {
        const HALF: Self;
        const ZERO: Self;
        const ONE: Self;
        const TWO: Self;
        const THREE: Self;
        const FOUR: Self;
        const SIX: Self;
        const EIGHT: Self;

        const MIN: Self;
        const MAX: Self;

        /// Threshold under which two coordinates are considered equal.
        const EPSILON: Self;

        /// Epsilon constants are usually not a good way to deal with float precision.
        /// Float precision depends on the magnitude of the values and so should appropriate
        /// epsilons.
        fn epsilon_for(_reference: Self) -> Self {
            Self::EPSILON
        }

        fn value(v: f32) -> Self;
    }

    impl Scalar for f32 {
        const HALF: Self = 0.5;
        const ZERO: Self = 0.0;
        const ONE: Self = 1.0;
        const TWO: Self = 2.0;
        const THREE: Self = 3.0;
        const FOUR: Self = 4.0;
        const SIX: Self = 6.0;
        const EIGHT: Self = 8.0;

        const MIN: Self = f32::MIN;
        const MAX: Self = f32::MAX;

        const EPSILON: Self = 1e-4;

        fn epsilon_for(reference: Self) -> Self {
            let magnitude = reference.abs() as i32;
            match magnitude {
                0..=7 => 1e-5,
                8..=1023 => 1e-3,
                1024..=4095 => 1e-2,
                4096..=65535 => 1e-1,
                65536..=8_388_607 => 0.5,
                _ => 1.0,
            }
        }

        #[inline]
        fn value(v: f32) -> Self {
            v
        }
    }

    impl Scalar for f64 {
        const HALF: Self = 0.5;
        const ZERO: Self = 0.0;
        const ONE: Self = 1.0;
        const TWO: Self = 2.0;
        const THREE: Self = 3.0;
        const FOUR: Self = 4.0;
        const SIX: Self = 6.0;
        const EIGHT: Self = 8.0;

        const MIN: Self = f64::MIN;
        const MAX: Self = f64::MAX;

        const EPSILON: Self = 1e-8;

        fn epsilon_for(reference: Self) -> Self {
            let magnitude = reference.abs() as i64;
            match magnitude {
                0..=65_535 => 1e-8,
                65_536..=8_388_607 => 1e-5,
                8_388_608..=4_294_967_295 => 1e-3,
                _ => 1e-1,
            }
        }

        #[inline]
        fn value(v: f32) -> Self {
            v as f64
        }
    }
}

/// Alias for `euclid::default::Point3D`.
pub use euclid::default::Point3D as Point;

/// Alias for `euclid::default::Vector3D`.
pub use euclid::default::Vector3D as Vector;

/// Alias for `euclid::default::Size3D`.
pub use euclid::default::Size3D as Size;

/// Alias for `euclid::default::Box3D`
pub use euclid::default::Box3D;

/// Alias for `euclid::default::Transform3D`
pub type Transform<S> = euclid::default::Transform3D<S>;

/// Alias for `euclid::Translation3D` with unknown units.
pub type Translation<S> = euclid::Translation3D<S, euclid::UnknownUnit, euclid::UnknownUnit>;

/// Shorthand for `Vector::new(x, y, z)`.
#[inline]
pub fn vector<S>(x: S, y: S, z: S) -> Vector<S> {
    Vector::new(x, y, z)
}

/// Shorthand for `Point::new(x, y, z)`.
#[inline]
pub fn point<S>(x: S, y: S, z: S) -> Point<S> {
    Point::new(x, y, z)
}

/// Shorthand for `Size::new(w, h, d)`.
#[inline]
pub fn size<S>(w: S, h: S, d: S) -> Size<S> {
    Size::new(w, h, d)
}

pub mod traits {
    pub use crate::segment::{BoundingBox, Segment};

    use crate::{Point, Scalar, Transform, Translation, Vector};

    /// Affine maps that can be applied to points and vectors.
    ///
    /// Projective transforms are applied without the perspective division.
    pub trait Transformation<S> {
        fn transform_point(&self, p: Point<S>) -> Point<S>;
        fn transform_vector(&self, v: Vector<S>) -> Vector<S>;
    }

    // euclid uses the row-vector convention: the translation lives in the last row.
    impl<S: Scalar> Transformation<S> for Transform<S> {
        fn transform_point(&self, p: Point<S>) -> Point<S> {
            Point::new(
                p.x * self.m11 + p.y * self.m21 + p.z * self.m31 + self.m41,
                p.x * self.m12 + p.y * self.m22 + p.z * self.m32 + self.m42,
                p.x * self.m13 + p.y * self.m23 + p.z * self.m33 + self.m43,
            )
        }

        fn transform_vector(&self, v: Vector<S>) -> Vector<S> {
            Vector::new(
                v.x * self.m11 + v.y * self.m21 + v.z * self.m31,
                v.x * self.m12 + v.y * self.m22 + v.z * self.m32,
                v.x * self.m13 + v.y * self.m23 + v.z * self.m33,
            )
        }
    }

    impl<S: Scalar> Transformation<S> for Translation<S> {
        fn transform_point(&self, p: Point<S>) -> Point<S> {
            Point::new(p.x + self.x, p.y + self.y, p.z + self.z)
        }

        fn transform_vector(&self, v: Vector<S>) -> Vector<S> {
            v
        }
    }

    impl<S: Scalar> Transformation<S> for Vector<S> {
        fn transform_point(&self, p: Point<S>) -> Point<S> {
            p + *self
        }

        fn transform_vector(&self, v: Vector<S>) -> Vector<S> {
            v
        }
    }

    // Automatically implement Transformation for all &Transformation.
    impl<'l, S: Scalar, T: Transformation<S>> Transformation<S> for &'l T {
        #[inline]
        fn transform_point(&self, p: Point<S>) -> Point<S> {
            (*self).transform_point(p)
        }

        #[inline]
        fn transform_vector(&self, v: Vector<S>) -> Vector<S> {
            (*self).transform_vector(v)
        }
    }
}
