//! Axis-aligned rectangular prisms.

use crate::math::{point, Box3D, Point, Size, Vector};
use crate::path::PathElement;
use crate::segment::check_point;
use crate::shape::{shared, PathElements, Shape, ShapeKind, ShapeMut, SharedShape};
use crate::ShapeError;

/// A rectangular prism with faces parallel to the axes.
///
/// The faces are part of the box. A box where `max < min` on an axis is empty, which is
/// what the intersection of two disjoint boxes produces.
#[derive(Copy, Clone, Debug)]
#[cfg_attr(feature = "serialization", derive(Serialize, Deserialize))]
pub struct AlignedBox {
    min: Point,
    max: Point,
    #[cfg_attr(feature = "serialization", serde(skip))]
    revision: u64,
}

/// Compares the geometry only, the revision is ignored.
impl PartialEq for AlignedBox {
    fn eq(&self, other: &Self) -> bool {
        self.min == other.min && self.max == other.max
    }
}

impl AlignedBox {
    /// Creates a box from two opposite corners, in any order.
    pub fn new(a: Point, b: Point) -> Result<Self, ShapeError> {
        check_point(&a)?;
        check_point(&b)?;
        Ok(AlignedBox {
            min: a.min(b),
            max: a.max(b),
            revision: 0,
        })
    }

    pub fn from_corner_and_size(corner: Point, size: Size) -> Result<Self, ShapeError> {
        check_point(&corner)?;
        if !(size.width >= 0.0 && size.height >= 0.0 && size.depth >= 0.0) {
            return Err(ShapeError::InvalidArgument("negative box size"));
        }

        Ok(AlignedBox {
            min: corner,
            max: corner + size.to_vector(),
            revision: 0,
        })
    }

    #[inline]
    pub fn min(&self) -> Point {
        self.min
    }

    #[inline]
    pub fn max(&self) -> Point {
        self.max
    }

    pub fn set(&mut self, a: Point, b: Point) -> Result<(), ShapeError> {
        *self = AlignedBox {
            revision: self.revision,
            ..AlignedBox::new(a, b)?
        };
        self.touch();
        Ok(())
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.max.x < self.min.x || self.max.y < self.min.y || self.max.z < self.min.z
    }

    #[inline]
    pub fn to_box3d(&self) -> Box3D {
        Box3D {
            min: self.min,
            max: self.max,
        }
    }

    #[inline]
    pub fn size(&self) -> Size {
        let v = self.max - self.min;
        Size::new(v.x, v.y, v.z)
    }

    #[inline]
    pub fn center(&self) -> Point {
        self.min.lerp(self.max, 0.5)
    }

    /// Moves the box so that its center is at `center`, keeping its size.
    pub fn set_center(&mut self, center: Point) -> Result<(), ShapeError> {
        check_point(&center)?;
        let by = center - self.center();
        self.translate(by);
        Ok(())
    }

    /// Extends the box so that it contains `p`.
    pub fn add_point(&mut self, p: Point) -> Result<(), ShapeError> {
        check_point(&p)?;
        if self.is_empty() {
            self.min = p;
            self.max = p;
        } else {
            self.min = self.min.min(p);
            self.max = self.max.max(p);
        }
        self.touch();
        Ok(())
    }

    /// The smallest box containing both boxes. Empty boxes are ignored.
    pub fn union(&self, other: &AlignedBox) -> AlignedBox {
        let mut result = *self;
        result.set_union(other);
        result
    }

    pub fn set_union(&mut self, other: &AlignedBox) {
        if other.is_empty() {
            return;
        }
        if self.is_empty() {
            self.min = other.min;
            self.max = other.max;
        } else {
            self.min = self.min.min(other.min);
            self.max = self.max.max(other.max);
        }
        self.touch();
    }

    /// The part common to both boxes. It is empty when the boxes are disjoint.
    pub fn intersection(&self, other: &AlignedBox) -> AlignedBox {
        let mut result = *self;
        result.set_intersection(other);
        result
    }

    pub fn set_intersection(&mut self, other: &AlignedBox) {
        self.min = self.min.max(other.min);
        self.max = self.max.min(other.max);
        self.touch();
    }

    /// Grows the box by the given amounts on both sides of each axis.
    ///
    /// Negative amounts shrink it.
    pub fn inflate(&mut self, x: f64, y: f64, z: f64) {
        let by = Vector::new(x, y, z);
        self.min -= by;
        self.max += by;
        self.touch();
    }

    fn touch(&mut self) {
        self.revision = self.revision.wrapping_add(1);
    }
}

/// The eight corners of a box.
pub(crate) fn box_corners(b: &Box3D) -> [Point; 8] {
    let (min, max) = (b.min, b.max);
    [
        point(min.x, min.y, min.z),
        point(max.x, min.y, min.z),
        point(min.x, max.y, min.z),
        point(max.x, max.y, min.z),
        point(min.x, min.y, max.z),
        point(max.x, min.y, max.z),
        point(min.x, max.y, max.z),
        point(max.x, max.y, max.z),
    ]
}

impl Shape for AlignedBox {
    fn kind(&self) -> ShapeKind {
        ShapeKind::AlignedBox(self)
    }

    fn bounding_box(&self) -> Box3D {
        if self.is_empty() {
            return crate::math::zero_box();
        }

        self.to_box3d()
    }

    fn contains_point(&self, p: &Point) -> bool {
        p.x >= self.min.x
            && p.x <= self.max.x
            && p.y >= self.min.y
            && p.y <= self.max.y
            && p.z >= self.min.z
            && p.z <= self.max.z
    }

    fn contains_box(&self, b: &Box3D) -> bool {
        self.contains_point(&b.min) && self.contains_point(&b.max)
    }

    fn closest_point(&self, p: &Point) -> Result<Point, ShapeError> {
        if self.is_empty() {
            return Err(ShapeError::EmptyShape);
        }

        Ok(p.clamp(self.min, self.max))
    }

    fn farthest_point(&self, p: &Point) -> Result<Point, ShapeError> {
        if self.is_empty() {
            return Err(ShapeError::EmptyShape);
        }

        let center = self.center();
        let pick = |v: f64, c: f64, min: f64, max: f64| if v <= c { max } else { min };
        Ok(point(
            pick(p.x, center.x, self.min.x, self.max.x),
            pick(p.y, center.y, self.min.y, self.max.y),
            pick(p.z, center.z, self.min.z, self.max.z),
        ))
    }

    /// The outline of the bottom face, counter-clockwise from the min corner.
    fn path_elements(&self) -> PathElements {
        if self.is_empty() {
            return Box::new(std::iter::empty());
        }

        let (min, max) = (self.min, self.max);
        let corners = [
            min,
            point(max.x, min.y, min.z),
            point(max.x, max.y, min.z),
            point(min.x, max.y, min.z),
        ];
        let mut elements = Vec::with_capacity(5);
        elements.push(PathElement::MoveTo { to: corners[0] });
        for pair in corners.windows(2) {
            elements.push(PathElement::LineTo {
                from: pair[0],
                to: pair[1],
            });
        }
        elements.push(PathElement::Close {
            last: corners[3],
            first: corners[0],
        });

        Box::new(elements.into_iter())
    }
}

impl ShapeMut for AlignedBox {
    fn translate(&mut self, by: Vector) {
        self.min += by;
        self.max += by;
        self.touch();
    }

    fn clear(&mut self) {
        self.min = Point::origin();
        self.max = Point::origin();
        self.touch();
    }

    fn revision(&self) -> u64 {
        self.revision
    }

    fn clone_shared(&self) -> SharedShape {
        shared(*self)
    }
}

impl_translation_ops!(AlignedBox);

#[cfg(test)]
mod test {
    use super::*;
    use crate::math::{size, vector};

    fn unit() -> AlignedBox {
        AlignedBox::from_corner_and_size(point(0.0, 0.0, 0.0), size(1.0, 1.0, 1.0)).unwrap()
    }

    #[test]
    fn construction() {
        let b = AlignedBox::new(point(5.0, -1.0, 2.0), point(1.0, 3.0, 0.0)).unwrap();
        assert_eq!(b.min(), point(1.0, -1.0, 0.0));
        assert_eq!(b.max(), point(5.0, 3.0, 2.0));
        assert_eq!(b.size(), size(4.0, 4.0, 2.0));
        assert_eq!(b.center(), point(3.0, 1.0, 1.0));

        assert_eq!(
            AlignedBox::from_corner_and_size(point(0.0, 0.0, 0.0), size(1.0, -1.0, 1.0)),
            Err(ShapeError::InvalidArgument("negative box size"))
        );
        assert!(AlignedBox::new(point(0.0, 0.0, f64::NAN), point(1.0, 1.0, 1.0)).is_err());
    }

    #[test]
    fn containment_is_closed() {
        let b = unit();
        assert!(b.contains_point(&point(0.5, 0.5, 0.5)));
        assert!(b.contains_point(&point(1.0, 1.0, 1.0)));
        assert!(b.contains_point(&point(0.0, 0.5, 1.0)));
        assert!(!b.contains_point(&point(1.0, 1.0, 1.01)));

        assert!(b.contains_box(&Box3D::new(point(0.0, 0.0, 0.0), point(1.0, 0.5, 0.5))));
        assert!(!b.contains_box(&Box3D::new(point(0.5, 0.5, 0.5), point(1.5, 0.5, 0.5))));
    }

    #[test]
    fn union_and_intersection() {
        let a = unit();
        let b = AlignedBox::new(point(0.5, 0.5, 0.5), point(2.0, 2.0, 2.0)).unwrap();

        let u = a.union(&b);
        assert_eq!(u.min(), point(0.0, 0.0, 0.0));
        assert_eq!(u.max(), point(2.0, 2.0, 2.0));

        let i = a.intersection(&b);
        assert_eq!(i.min(), point(0.5, 0.5, 0.5));
        assert_eq!(i.max(), point(1.0, 1.0, 1.0));

        let far = AlignedBox::new(point(3.0, 3.0, 3.0), point(4.0, 4.0, 4.0)).unwrap();
        let empty = a.intersection(&far);
        assert!(empty.is_empty());
        assert_eq!(empty.bounding_box(), crate::math::zero_box());
        assert_eq!(empty.closest_point(&point(0.0, 0.0, 0.0)), Err(ShapeError::EmptyShape));
        assert_eq!(empty.path_elements().count(), 0);

        // Empty boxes do not grow unions.
        assert_eq!(far.union(&empty).to_box3d(), far.to_box3d());
        let mut grown = empty;
        grown.add_point(point(1.0, 2.0, 3.0)).unwrap();
        assert_eq!(grown.min(), point(1.0, 2.0, 3.0));
        assert_eq!(grown.max(), point(1.0, 2.0, 3.0));
    }

    #[test]
    fn closest_and_farthest() {
        let b = AlignedBox::new(point(0.0, 0.0, 0.0), point(2.0, 4.0, 6.0)).unwrap();
        assert_eq!(b.closest_point(&point(-1.0, 2.0, 9.0)).unwrap(), point(0.0, 2.0, 6.0));
        assert_eq!(b.closest_point(&point(1.0, 1.0, 1.0)).unwrap(), point(1.0, 1.0, 1.0));
        assert_eq!(b.farthest_point(&point(-1.0, 2.0, 9.0)).unwrap(), point(2.0, 4.0, 0.0));
        assert_eq!(b.distance(&point(1.0, 1.0, 1.0)).unwrap(), 0.0);
        assert_eq!(b.distance(&point(5.0, 0.0, 0.0)).unwrap(), 3.0);
        assert_eq!(b.distance_l1(&point(3.0, 5.0, 0.0)).unwrap(), 2.0);
        assert_eq!(b.distance_linf(&point(3.0, 6.0, 0.0)).unwrap(), 2.0);
    }

    #[test]
    fn center_size_and_inflate() {
        let mut b = unit();
        b.set_center(point(10.0, 10.0, 10.0)).unwrap();
        assert_eq!(b.min(), point(9.5, 9.5, 9.5));
        assert_eq!(b.size(), size(1.0, 1.0, 1.0));

        b.inflate(0.5, 1.0, 0.0);
        assert_eq!(b.min(), point(9.0, 8.5, 9.5));
        assert_eq!(b.max(), point(11.0, 11.5, 10.5));
    }

    #[test]
    fn translation() {
        let mut b = unit();
        let revision = b.revision();
        b += vector(1.0, 2.0, 3.0);
        assert_ne!(b.revision(), revision);
        assert_eq!(b.min(), point(1.0, 2.0, 3.0));
        assert_eq!((b - vector(1.0, 2.0, 3.0)).to_box3d(), unit().to_box3d());
        assert!(b.translated(vector(-1.0, -2.0, -3.0)).equals_to_shape(&unit()));
    }

    #[test]
    fn outline() {
        let elements: Vec<PathElement> = unit().path_elements().collect();
        assert_eq!(elements.len(), 5);
        assert_eq!(
            elements[4],
            PathElement::Close {
                last: point(0.0, 1.0, 0.0),
                first: point(0.0, 0.0, 0.0)
            }
        );
    }

    #[test]
    fn equality_ignores_revision() {
        let a = unit();
        let v = vector(1.0, 0.0, 0.0);
        let b = a + v - v;
        assert_ne!(a.revision(), b.revision());
        assert_eq!(a, b);

        let mut c = unit();
        c.set(point(1.0, 1.0, 1.0), point(0.0, 0.0, 0.0)).unwrap();
        assert_eq!(c, a);
        assert_ne!(a + v, a);
    }
}
