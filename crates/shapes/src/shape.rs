//! The query contract shared by every shape.

use crate::aligned_box::AlignedBox;
use crate::geom::utils::{l1_length, linf_length};
use crate::math::{Box3D, Point, Transform, Vector};
use crate::multi_shape::MultiShape;
use crate::path::{elements_approx_eq, Path, PathElement};
use crate::segment::Segment;
use crate::sphere::Sphere;
use crate::{intersections, PathShape, QueryOptions, ShapeError};

use parking_lot::RwLock;

use std::fmt;
use std::sync::Arc;

/// A boxed iterator over the elements of the outline of a shape.
pub type PathElements<'l> = Box<dyn Iterator<Item = PathElement> + 'l>;

/// A handle to a shape that can be shared between composites and mutated in place.
pub type SharedShape = Arc<RwLock<dyn ShapeMut>>;

/// Wraps a shape into a new shared handle.
pub fn shared<S: ShapeMut + 'static>(shape: S) -> SharedShape {
    Arc::new(RwLock::new(shape))
}

/// A view of a shape as one of the concrete shape types.
///
/// Pairwise queries between two shapes dispatch on this.
#[derive(Copy, Clone, Debug)]
pub enum ShapeKind<'l> {
    Segment(&'l Segment),
    AlignedBox(&'l AlignedBox),
    Sphere(&'l Sphere),
    Path(&'l PathShape),
    Multi(&'l MultiShape),
}

impl<'l> ShapeKind<'l> {
    pub fn as_shape(self) -> &'l dyn Shape {
        match self {
            ShapeKind::Segment(s) => s,
            ShapeKind::AlignedBox(s) => s,
            ShapeKind::Sphere(s) => s,
            ShapeKind::Path(s) => s,
            ShapeKind::Multi(s) => s,
        }
    }
}

/// Queries supported by all shapes.
///
/// Points are considered inside a shape when they are on its boundary.
pub trait Shape: fmt::Debug + Send + Sync {
    fn kind(&self) -> ShapeKind;

    /// The parameters used by the queries on this shape.
    fn options(&self) -> QueryOptions {
        QueryOptions::DEFAULT
    }

    /// The smallest axis-aligned box containing the shape.
    fn bounding_box(&self) -> Box3D;

    fn contains_point(&self, p: &Point) -> bool;

    /// Whether the whole box is inside the shape.
    fn contains_box(&self, b: &Box3D) -> bool;

    fn intersects(&self, other: &dyn Shape) -> bool {
        intersections::intersects(self.kind(), other.kind(), &self.options())
    }

    /// The point of the shape closest to `p`, which is `p` itself when it is inside.
    fn closest_point(&self, p: &Point) -> Result<Point, ShapeError>;

    /// The point of the shape farthest from `p`.
    fn farthest_point(&self, p: &Point) -> Result<Point, ShapeError>;

    fn distance_squared(&self, p: &Point) -> Result<f64, ShapeError> {
        Ok((self.closest_point(p)? - *p).square_length())
    }

    fn distance(&self, p: &Point) -> Result<f64, ShapeError> {
        Ok(self.distance_squared(p)?.sqrt())
    }

    /// Taxicab distance to the closest point.
    fn distance_l1(&self, p: &Point) -> Result<f64, ShapeError> {
        Ok(l1_length(self.closest_point(p)? - *p))
    }

    /// Chebyshev distance to the closest point.
    fn distance_linf(&self, p: &Point) -> Result<f64, ShapeError> {
        Ok(linf_length(self.closest_point(p)? - *p))
    }

    /// Iterates over the outline of the shape.
    fn path_elements(&self) -> PathElements;

    fn transformed_path_elements<'l>(&'l self, transform: &'l Transform) -> PathElements<'l> {
        Box::new(self.path_elements().map(move |e| e.transformed(transform)))
    }

    /// Builds a path from the transformed outline of the shape.
    fn transformed(&self, transform: &Transform) -> Result<PathShape, ShapeError> {
        let path = Path::from_elements(self.transformed_path_elements(transform))?;
        Ok(PathShape::from(path))
    }

    /// Whether both outlines have the same elements, within the epsilon of this shape.
    fn equals_to_shape(&self, other: &dyn Shape) -> bool {
        elements_approx_eq(self.path_elements(), other.path_elements(), self.options().epsilon)
    }

    fn equals_to_elements(&self, elements: &mut dyn Iterator<Item = PathElement>) -> bool {
        elements_approx_eq(self.path_elements(), elements, self.options().epsilon)
    }
}

/// In-place modifications of a shape.
pub trait ShapeMut: Shape {
    fn translate(&mut self, by: Vector);

    /// Resets the geometry of the shape.
    fn clear(&mut self);

    /// A counter that changes every time the geometry of the shape changes.
    fn revision(&self) -> u64;

    /// Deep copy into a new shared handle.
    fn clone_shared(&self) -> SharedShape;
}

/// Implements the operators that translate a shape by a vector.
macro_rules! impl_translation_ops {
    ($ty:ty) => {
        impl std::ops::AddAssign<crate::math::Vector> for $ty {
            fn add_assign(&mut self, by: crate::math::Vector) {
                crate::ShapeMut::translate(self, by);
            }
        }

        impl std::ops::SubAssign<crate::math::Vector> for $ty {
            fn sub_assign(&mut self, by: crate::math::Vector) {
                crate::ShapeMut::translate(self, -by);
            }
        }

        impl std::ops::Add<crate::math::Vector> for $ty {
            type Output = $ty;
            fn add(mut self, by: crate::math::Vector) -> $ty {
                self += by;
                self
            }
        }

        impl std::ops::Sub<crate::math::Vector> for $ty {
            type Output = $ty;
            fn sub(mut self, by: crate::math::Vector) -> $ty {
                self -= by;
                self
            }
        }

        impl $ty {
            /// Returns a translated copy.
            pub fn translated(&self, by: crate::math::Vector) -> $ty {
                self.clone() + by
            }
        }
    };
}
