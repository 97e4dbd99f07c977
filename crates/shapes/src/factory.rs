//! Construction of shapes through an injectable interface.
//!
//! Code that builds shapes without knowing their concrete construction can take a
//! `&dyn ShapeFactory`. [`DefaultShapeFactory`] forwards to the constructors of this crate.

use crate::math::{point, vector, Point, Size, Vector};
use crate::path::WindingRule;
use crate::{AlignedBox, MultiShape, PathShape, Segment, ShapeError, Sphere};

/// Creates points, vectors and shapes.
pub trait ShapeFactory {
    fn new_point(&self, x: f64, y: f64, z: f64) -> Point {
        point(x, y, z)
    }

    fn new_vector(&self, x: f64, y: f64, z: f64) -> Vector {
        vector(x, y, z)
    }

    fn new_segment(&self, p1: Point, p2: Point) -> Result<Segment, ShapeError>;

    /// Creates a box from its minimum corner and its extent along each axis.
    fn new_box(&self, corner: Point, extent: Size) -> Result<AlignedBox, ShapeError>;

    fn new_sphere(&self, center: Point, radius: f64) -> Result<Sphere, ShapeError>;

    fn new_path(&self, winding_rule: WindingRule) -> PathShape;

    fn new_multi_shape(&self) -> MultiShape;
}

/// Builds the shapes of this crate with their default options.
#[derive(Copy, Clone, Debug, Default)]
pub struct DefaultShapeFactory;

impl ShapeFactory for DefaultShapeFactory {
    fn new_segment(&self, p1: Point, p2: Point) -> Result<Segment, ShapeError> {
        Segment::new(p1, p2)
    }

    fn new_box(&self, corner: Point, extent: Size) -> Result<AlignedBox, ShapeError> {
        AlignedBox::from_corner_and_size(corner, extent)
    }

    fn new_sphere(&self, center: Point, radius: f64) -> Result<Sphere, ShapeError> {
        Sphere::new(center, radius)
    }

    fn new_path(&self, winding_rule: WindingRule) -> PathShape {
        PathShape::with_winding_rule(winding_rule)
    }

    fn new_multi_shape(&self) -> MultiShape {
        MultiShape::new()
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::math::{size, Box3D};
    use crate::Shape;

    #[test]
    fn default_factory() {
        let f = DefaultShapeFactory;

        assert_eq!(f.new_point(1.0, 2.0, 3.0), point(1.0, 2.0, 3.0));
        assert_eq!(f.new_vector(1.0, 2.0, 3.0), vector(1.0, 2.0, 3.0));

        let b = f.new_box(point(5.0, 8.0, 0.0), size(2.0, 1.0, 0.0)).unwrap();
        assert_eq!(b.min(), point(5.0, 8.0, 0.0));
        assert_eq!(b.max(), point(7.0, 9.0, 0.0));
        assert_eq!(
            f.new_box(point(0.0, 0.0, 0.0), size(-1.0, 1.0, 1.0)),
            Err(ShapeError::InvalidArgument("negative box size"))
        );

        let s = f.new_sphere(point(-5.0, 18.0, 0.0), 2.0).unwrap();
        assert!(s.contains_point(&point(-4.0, 19.0, 0.0)));
        assert!(f.new_sphere(point(0.0, 0.0, 0.0), -2.0).is_err());
        assert!(f
            .new_segment(point(0.0, f64::NAN, 0.0), point(0.0, 0.0, 0.0))
            .is_err());

        let p = f.new_path(WindingRule::EvenOdd);
        assert_eq!(p.winding_rule(), WindingRule::EvenOdd);
        assert!(p.is_empty());
        assert!(f.new_multi_shape().is_empty());
    }

    #[test]
    fn through_a_trait_object() {
        let f: &dyn ShapeFactory = &DefaultShapeFactory;
        let cube = f.new_box(f.new_point(0.0, 0.0, 0.0), size(1.0, 1.0, 1.0)).unwrap();
        assert_eq!(
            cube.bounding_box(),
            Box3D::new(point(0.0, 0.0, 0.0), point(1.0, 1.0, 1.0))
        );
    }
}
