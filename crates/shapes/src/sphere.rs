use crate::aligned_box::box_corners;
use crate::math::{point, vector, Box3D, Point, Vector};
use crate::path::PathElement;
use crate::segment::check_point;
use crate::shape::{shared, PathElements, Shape, ShapeKind, ShapeMut, SharedShape};
use crate::ShapeError;

/// Distance of the control points of a cubic bézier approximating a quarter circle of
/// radius one.
const CIRCLE_CTRL: f64 = 0.5522847498;

/// A solid ball.
#[derive(Copy, Clone, Debug)]
#[cfg_attr(feature = "serialization", derive(Serialize, Deserialize))]
pub struct Sphere {
    center: Point,
    radius: f64,
    #[cfg_attr(feature = "serialization", serde(skip))]
    revision: u64,
}

/// Compares the geometry only, the revision is ignored.
impl PartialEq for Sphere {
    fn eq(&self, other: &Self) -> bool {
        self.center == other.center && self.radius == other.radius
    }
}

impl Sphere {
    pub fn new(center: Point, radius: f64) -> Result<Self, ShapeError> {
        check_point(&center)?;
        check_radius(radius)?;
        Ok(Sphere {
            center,
            radius,
            revision: 0,
        })
    }

    #[inline]
    pub fn center(&self) -> Point {
        self.center
    }

    #[inline]
    pub fn radius(&self) -> f64 {
        self.radius
    }

    pub fn set_center(&mut self, center: Point) -> Result<(), ShapeError> {
        check_point(&center)?;
        self.center = center;
        self.touch();
        Ok(())
    }

    pub fn set_radius(&mut self, radius: f64) -> Result<(), ShapeError> {
        check_radius(radius)?;
        self.radius = radius;
        self.touch();
        Ok(())
    }

    fn touch(&mut self) {
        self.revision = self.revision.wrapping_add(1);
    }
}

fn check_radius(radius: f64) -> Result<(), ShapeError> {
    if !(radius >= 0.0) {
        return Err(ShapeError::InvalidArgument("negative radius"));
    }

    Ok(())
}

impl Shape for Sphere {
    fn kind(&self) -> ShapeKind {
        ShapeKind::Sphere(self)
    }

    fn bounding_box(&self) -> Box3D {
        let r = vector(self.radius, self.radius, self.radius);
        Box3D {
            min: self.center - r,
            max: self.center + r,
        }
    }

    fn contains_point(&self, p: &Point) -> bool {
        (*p - self.center).square_length() <= self.radius * self.radius
    }

    fn contains_box(&self, b: &Box3D) -> bool {
        box_corners(b).iter().all(|c| self.contains_point(c))
    }

    fn closest_point(&self, p: &Point) -> Result<Point, ShapeError> {
        let v = *p - self.center;
        let len = v.length();
        if len <= self.radius {
            return Ok(*p);
        }

        Ok(self.center + v * (self.radius / len))
    }

    fn farthest_point(&self, p: &Point) -> Result<Point, ShapeError> {
        let v = *p - self.center;
        let len = v.length();
        if len == 0.0 {
            return Ok(self.center + vector(self.radius, 0.0, 0.0));
        }

        Ok(self.center - v * (self.radius / len))
    }

    /// The equator in the plane `z = center.z`, as four cubic arcs going counter-clockwise
    /// from `center + (radius, 0, 0)`.
    fn path_elements(&self) -> PathElements {
        let c = self.center;
        let r = self.radius;
        let k = r * CIRCLE_CTRL;
        let at = |x: f64, y: f64| point(c.x + x, c.y + y, c.z);

        let quarters = [
            (at(r, k), at(k, r), at(0.0, r)),
            (at(-k, r), at(-r, k), at(-r, 0.0)),
            (at(-r, -k), at(-k, -r), at(0.0, -r)),
            (at(k, -r), at(r, -k), at(r, 0.0)),
        ];

        let first = at(r, 0.0);
        let mut from = first;
        let mut elements = Vec::with_capacity(6);
        elements.push(PathElement::MoveTo { to: first });
        for &(ctrl1, ctrl2, to) in &quarters {
            elements.push(PathElement::CurveTo {
                from,
                ctrl1,
                ctrl2,
                to,
            });
            from = to;
        }
        elements.push(PathElement::Close { last: from, first });

        Box::new(elements.into_iter())
    }
}

impl ShapeMut for Sphere {
    fn translate(&mut self, by: Vector) {
        self.center += by;
        self.touch();
    }

    fn clear(&mut self) {
        self.center = Point::origin();
        self.radius = 0.0;
        self.touch();
    }

    fn revision(&self) -> u64 {
        self.revision
    }

    fn clone_shared(&self) -> SharedShape {
        shared(*self)
    }
}

impl_translation_ops!(Sphere);
