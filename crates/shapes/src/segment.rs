use crate::aligned_box::box_corners;
use crate::geom::LineSegment;
use crate::math::{Box3D, Point, Vector};
use crate::path::PathElement;
use crate::shape::{shared, PathElements, Shape, ShapeKind, ShapeMut, SharedShape};
use crate::ShapeError;

use std::iter;

/// A straight segment between two points.
#[derive(Copy, Clone, Debug)]
#[cfg_attr(feature = "serialization", derive(Serialize, Deserialize))]
pub struct Segment {
    p1: Point,
    p2: Point,
    #[cfg_attr(feature = "serialization", serde(skip))]
    revision: u64,
}

/// Compares the geometry only, the revision is ignored.
impl PartialEq for Segment {
    fn eq(&self, other: &Self) -> bool {
        self.p1 == other.p1 && self.p2 == other.p2
    }
}

impl Segment {
    pub fn new(p1: Point, p2: Point) -> Result<Self, ShapeError> {
        check_point(&p1)?;
        check_point(&p2)?;
        Ok(Segment {
            p1,
            p2,
            revision: 0,
        })
    }

    #[inline]
    pub fn p1(&self) -> Point {
        self.p1
    }

    #[inline]
    pub fn p2(&self) -> Point {
        self.p2
    }

    pub fn set_p1(&mut self, p: Point) -> Result<(), ShapeError> {
        check_point(&p)?;
        self.p1 = p;
        self.touch();
        Ok(())
    }

    pub fn set_p2(&mut self, p: Point) -> Result<(), ShapeError> {
        check_point(&p)?;
        self.p2 = p;
        self.touch();
        Ok(())
    }

    pub fn set(&mut self, p1: Point, p2: Point) -> Result<(), ShapeError> {
        check_point(&p1)?;
        check_point(&p2)?;
        self.p1 = p1;
        self.p2 = p2;
        self.touch();
        Ok(())
    }

    #[inline]
    pub fn length(&self) -> f64 {
        self.line().length()
    }

    #[inline]
    pub fn length_squared(&self) -> f64 {
        self.line().square_length()
    }

    #[inline]
    pub fn line(&self) -> LineSegment<f64> {
        LineSegment {
            from: self.p1,
            to: self.p2,
        }
    }

    fn touch(&mut self) {
        self.revision = self.revision.wrapping_add(1);
    }
}

impl From<LineSegment<f64>> for Segment {
    fn from(line: LineSegment<f64>) -> Self {
        Segment {
            p1: line.from,
            p2: line.to,
            revision: 0,
        }
    }
}

pub(crate) fn check_point(p: &Point) -> Result<(), ShapeError> {
    if p.x.is_nan() || p.y.is_nan() || p.z.is_nan() {
        return Err(ShapeError::InvalidArgument("NaN coordinate"));
    }

    Ok(())
}

impl Shape for Segment {
    fn kind(&self) -> ShapeKind {
        ShapeKind::Segment(self)
    }

    fn bounding_box(&self) -> Box3D {
        self.line().bounding_box()
    }

    fn contains_point(&self, p: &Point) -> bool {
        let epsilon = self.options().epsilon;
        self.line().square_distance_to_point(*p) <= epsilon * epsilon
    }

    fn contains_box(&self, b: &Box3D) -> bool {
        // Only boxes flattened onto the segment fit in it.
        box_corners(b).iter().all(|c| self.contains_point(c))
    }

    fn closest_point(&self, p: &Point) -> Result<Point, ShapeError> {
        Ok(self.line().closest_point(*p))
    }

    fn farthest_point(&self, p: &Point) -> Result<Point, ShapeError> {
        Ok(self.line().farthest_point(*p))
    }

    fn path_elements(&self) -> PathElements {
        Box::new(
            iter::once(PathElement::MoveTo { to: self.p1 }).chain(iter::once(PathElement::LineTo {
                from: self.p1,
                to: self.p2,
            })),
        )
    }
}

impl ShapeMut for Segment {
    fn translate(&mut self, by: Vector) {
        self.p1 += by;
        self.p2 += by;
        self.touch();
    }

    fn clear(&mut self) {
        self.p1 = Point::origin();
        self.p2 = Point::origin();
        self.touch();
    }

    fn revision(&self) -> u64 {
        self.revision
    }

    fn clone_shared(&self) -> SharedShape {
        shared(*self)
    }
}

impl_translation_ops!(Segment);
